//! Fragments command: dumps the fragment store of a document.

use std::path::PathBuf;

use crate::errors::Result;
use crate::interface::Context;
use crate::model::FragmentStore;

/// Options for the fragments command.
#[derive(Debug, Clone, Default)]
pub struct FragmentsOptions {
    /// Literate document to read.
    pub source: PathBuf,
    /// Print the store as JSON instead of a summary.
    pub json: bool,
}

/// One summary line per fragment name, in order of first definition.
pub fn describe_fragments(store: &FragmentStore) -> Vec<String> {
    store
        .iter()
        .map(|(name, defs)| {
            let lines: Vec<String> = defs
                .iter()
                .map(|d| d.definition_line().to_string())
                .collect();
            let total: usize = defs.iter().map(|d| d.line_count()).sum();
            format!(
                "{}: {} definition{} at line {} ({} lines)",
                store.syntax().markers().format_reference(name.as_str()),
                defs.len(),
                if defs.len() == 1 { "" } else { "s" },
                lines.join(", "),
                total
            )
        })
        .collect()
}

/// Executes the fragments command.
pub fn fragments(ctx: &Context, options: FragmentsOptions) -> Result<()> {
    let store = ctx.load_document(&options.source)?;

    if options.json {
        println!("{}", serde_json::to_string_pretty(&store)?);
        return Ok(());
    }

    if store.is_empty() {
        println!("No fragments defined.");
        return Ok(());
    }

    for line in describe_fragments(&store) {
        println!("{}", line);
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Syntax;
    use crate::readers::parse_document;
    use pretty_assertions::assert_eq;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn test_describe_fragments() {
        let input = "@<*@>=\n@<body@>\n@<body@>=\na\nb\n@\n@<body@>=\nc\n";
        let store = parse_document(input, None, &Syntax::default()).unwrap();

        assert_eq!(
            describe_fragments(&store),
            vec![
                "@<*@>: 1 definition at line 1 (1 lines)",
                "@<body@>: 2 definitions at line 3, 7 (3 lines)",
            ]
        );
    }

    #[test]
    fn test_fragments_command() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("prog.w"), "@<*@>=\nx\n").unwrap();
        let ctx = Context::default_for_dir(dir.path().to_path_buf()).unwrap();

        let options = FragmentsOptions {
            source: PathBuf::from("prog.w"),
            json: true,
        };
        assert!(fragments(&ctx, options).is_ok());
    }
}
