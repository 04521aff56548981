//! Tangle command implementation.

use std::fs;
use std::path::PathBuf;

use crate::errors::Result;
use crate::interface::Context;
use crate::model;

/// Options for the tangle command.
#[derive(Debug, Clone, Default)]
pub struct TangleCommandOptions {
    /// Literate document to read.
    pub source: PathBuf,
    /// Fragment to expand (defaults to the configured root).
    pub root: Option<String>,
    /// Emit source line comments even if the configuration does not.
    pub source_line_comments: bool,
    /// Comment token overriding the configured one.
    pub comment_prefix: Option<String>,
    /// Write to this file instead of stdout.
    pub output: Option<PathBuf>,
    /// Dry run - show what would be done without doing it.
    pub dry_run: bool,
}

/// Reads the source document and tangles it, without writing anything.
pub fn tangle_source(ctx: &Context, options: &TangleCommandOptions) -> Result<String> {
    let store = ctx.load_document(&options.source)?;
    let root = options.root.as_deref().unwrap_or(&ctx.config.root);

    let mut tangle_options = ctx.config.tangle_options();
    if options.source_line_comments {
        tangle_options.include_source_line_comments = true;
    }
    if let Some(prefix) = &options.comment_prefix {
        tangle_options.comment_prefix = prefix.clone();
    }

    model::tangle(&store, root, &tangle_options)
}

/// Executes the tangle command.
///
/// The output file is only written once the whole document has tangled.
pub fn tangle(ctx: &Context, options: TangleCommandOptions) -> Result<()> {
    tracing::info!("Tangling {}...", options.source.display());

    let text = tangle_source(ctx, &options)?;
    let line_count = text.lines().count();

    match &options.output {
        Some(output) => {
            let path = ctx.resolve_path(output);
            if options.dry_run {
                println!("Would write {} lines to {}", line_count, path.display());
                return Ok(());
            }
            if let Some(parent) = path.parent() {
                fs::create_dir_all(parent)?;
            }
            fs::write(&path, &text)?;
            tracing::info!("Wrote {} lines to {}", line_count, path.display());
        }
        None if options.dry_run => {
            println!("Would print {} lines", line_count);
        }
        None => print!("{}", text),
    }

    Ok(())
}
