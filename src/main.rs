//! Webtangle CLI

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use webtangle::commands;
use webtangle::interface::Context;

#[derive(Parser)]
#[command(name = "webtangle")]
#[command(author, version, about = "Tangle WEB-style literate documents", long_about = None)]
struct Cli {
    /// Configuration file path
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Working directory
    #[arg(short = 'C', long, global = true)]
    directory: Option<PathBuf>,

    /// Verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Expand a root fragment into flat source code
    Tangle {
        /// Literate document to tangle
        #[arg(value_name = "FILE")]
        source: PathBuf,

        /// Fragment to expand (default from config, usually "*")
        #[arg(short = 'f', long)]
        root: Option<String>,

        /// Comment each expanded fragment with its definition line
        #[arg(short = 'L', long)]
        source_line_comments: bool,

        /// Line comment token for those comments
        #[arg(long)]
        comment_prefix: Option<String>,

        /// Write to a file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Dry run - show what would be done without doing it
        #[arg(short = 'n', long)]
        dry_run: bool,
    },

    /// List the fragments defined in a document
    Fragments {
        /// Literate document to read
        #[arg(value_name = "FILE")]
        source: PathBuf,

        /// Dump the full fragment store as JSON
        #[arg(long)]
        json: bool,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    // Logs go to stderr so tangled output on stdout stays clean
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    // Determine working directory
    let base_dir = cli
        .directory
        .or_else(|| std::env::current_dir().ok())
        .unwrap_or_else(|| PathBuf::from("."));

    let config = match cli.config {
        Some(ref path) => webtangle::config::read_config_file(path),
        None => webtangle::config::read_config(&base_dir),
    };
    let config = match config {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error reading configuration: {}", e);
            return ExitCode::FAILURE;
        }
    };

    let ctx = match Context::new(config, base_dir) {
        Ok(ctx) => ctx,
        Err(e) => {
            eprintln!("Error initializing: {}", e);
            return ExitCode::FAILURE;
        }
    };

    let result = match cli.command {
        Commands::Tangle {
            source,
            root,
            source_line_comments,
            comment_prefix,
            output,
            dry_run,
        } => {
            let options = commands::TangleCommandOptions {
                source,
                root,
                source_line_comments,
                comment_prefix,
                output,
                dry_run,
            };
            commands::tangle(&ctx, options)
        }

        Commands::Fragments { source, json } => {
            let options = commands::FragmentsOptions { source, json };
            commands::fragments(&ctx, options)
        }
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}
