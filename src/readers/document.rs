//! Chunk parser for literate documents.

use std::path::Path;

use crate::config::Syntax;
use crate::errors::{Result, WebtangleError};
use crate::model::{FragmentName, FragmentStore, FragmentStoreBuilder};
use crate::text_location::TextLocation;

use super::classify::{classify_line, LineKind};

/// A code chunk under construction.
#[derive(Debug)]
struct PendingFragment {
    name: FragmentName,
    location: TextLocation,
    lines: Vec<String>,
}

/// Parser state between lines.
#[derive(Debug)]
enum ChunkState {
    /// Inside a documentation chunk, or before the first header.
    Documentation,
    /// A code header was seen and no content has followed yet.
    HeaderPending(PendingFragment),
    /// Collecting lines of a code chunk.
    Code(PendingFragment),
}

/// Builds a fragment store from a document, one line at a time.
struct ChunkParser<'s> {
    syntax: &'s Syntax,
    source_path: Option<&'s Path>,
    builder: FragmentStoreBuilder,
    state: ChunkState,
}

impl<'s> ChunkParser<'s> {
    fn new(syntax: &'s Syntax, source_path: Option<&'s Path>) -> Self {
        Self {
            syntax,
            source_path,
            builder: FragmentStoreBuilder::with_syntax(syntax.clone()),
            state: ChunkState::Documentation,
        }
    }

    fn location(&self, line_number: usize) -> TextLocation {
        TextLocation::new(self.source_path.map(Path::to_path_buf), line_number)
    }

    fn feed(&mut self, line: &str, line_number: usize) -> Result<()> {
        match classify_line(self.syntax, line) {
            LineKind::Blank => {}
            LineKind::Malformed => {
                return Err(WebtangleError::MalformedHeader {
                    location: self.location(line_number),
                    line: line.to_string(),
                });
            }
            LineKind::DocumentationHeader => {
                self.flush();
            }
            LineKind::CodeHeader { name, trailing } => {
                self.flush();
                let mut pending = PendingFragment {
                    name: FragmentName::new(name),
                    location: self.location(line_number),
                    lines: Vec::new(),
                };
                // Whitespace after `=` only separates the header from its content
                let trailing = trailing.trim_start();
                self.state = if trailing.is_empty() {
                    ChunkState::HeaderPending(pending)
                } else {
                    pending.lines.push(trailing.to_string());
                    ChunkState::Code(pending)
                };
            }
            LineKind::Content => {
                self.state = match std::mem::replace(&mut self.state, ChunkState::Documentation) {
                    ChunkState::Documentation => ChunkState::Documentation,
                    ChunkState::HeaderPending(mut pending) | ChunkState::Code(mut pending) => {
                        pending.lines.push(line.to_string());
                        ChunkState::Code(pending)
                    }
                };
            }
        }
        Ok(())
    }

    /// Closes the current chunk, storing it if it is code.
    fn flush(&mut self) {
        match std::mem::replace(&mut self.state, ChunkState::Documentation) {
            ChunkState::Documentation => {}
            ChunkState::HeaderPending(pending) => {
                tracing::debug!(
                    "Fragment <<{}>> at {} has no content",
                    pending.name,
                    pending.location
                );
                self.store(pending);
            }
            ChunkState::Code(pending) => self.store(pending),
        }
    }

    fn store(&mut self, pending: PendingFragment) {
        let fragment = self
            .builder
            .insert(pending.name, pending.location, pending.lines);
        tracing::trace!(
            "Captured {} ({} lines) at {}",
            fragment,
            fragment.line_count(),
            fragment.location
        );
    }

    fn finish(mut self) -> FragmentStore {
        self.flush();
        self.builder.build()
    }
}

/// Parses document lines into a fragment store.
pub fn parse_lines<'a, I>(lines: I, source_path: Option<&Path>, syntax: &Syntax) -> Result<FragmentStore>
where
    I: IntoIterator<Item = &'a str>,
{
    let mut parser = ChunkParser::new(syntax, source_path);
    for (i, line) in lines.into_iter().enumerate() {
        parser.feed(line, i + 1)?;
    }

    let store = parser.finish();
    tracing::debug!(
        "Parsed {} fragments ({} definitions)",
        store.len(),
        store.definition_count()
    );
    Ok(store)
}

/// Parses a whole document into a fragment store.
pub fn parse_document(input: &str, source_path: Option<&Path>, syntax: &Syntax) -> Result<FragmentStore> {
    parse_lines(input.lines(), source_path, syntax)
}

/// Reads a document from disk and parses it.
pub fn read_document_file(path: &Path, syntax: &Syntax) -> Result<FragmentStore> {
    let content = std::fs::read_to_string(path)?;
    parse_document(&content, Some(path), syntax)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Markers;
    use pretty_assertions::assert_eq;
    use std::path::PathBuf;

    fn parse(input: &str) -> FragmentStore {
        parse_document(input, None, &Syntax::default()).unwrap()
    }

    fn lines_of<'a>(store: &'a FragmentStore, name: &str, index: usize) -> Vec<&'a str> {
        store.get(name).unwrap()[index]
            .lines
            .iter()
            .map(String::as_str)
            .collect()
    }

    #[test]
    fn test_documentation_is_discarded() {
        let store = parse(
            "Some preamble text.\n\
             @ A documentation chunk\n\
             with more prose.\n",
        );
        assert!(store.is_empty());
    }

    #[test]
    fn test_simple_fragment() {
        let input = r#"@ Intro

@<*@>=
import sys

print(sys.argv)
@ The end.
this is prose
"#;
        let store = parse(input);
        assert_eq!(store.len(), 1);
        assert_eq!(lines_of(&store, "*", 0), vec!["import sys", "print(sys.argv)"]);
        assert_eq!(store.get("*").unwrap()[0].definition_line(), 3);
    }

    #[test]
    fn test_header_with_inline_definition() {
        let store = parse("@<tup1@>= 123\n@<tup2@>=   \n456\n@<call@>=   f(x)  \n");
        assert_eq!(lines_of(&store, "tup1", 0), vec!["123"]);
        assert_eq!(lines_of(&store, "tup2", 0), vec!["456"]);
        assert_eq!(lines_of(&store, "call", 0), vec!["f(x)  "]);
    }

    #[test]
    fn test_mistyped_header_in_documentation_is_prose() {
        let store = parse("@ prose\n@<main@> = 1\n@<main@>=\nx\n");
        assert_eq!(store.definition_count(), 1);
        assert_eq!(lines_of(&store, "main", 0), vec!["x"]);
    }

    #[test]
    fn test_additive_fragments() {
        let input = "@<main body@>=\na = 1\n@\nprose\n@<main body@>=\nb = 2\n";
        let store = parse(input);
        assert_eq!(store.count_by_name("main body"), 2);
        assert_eq!(lines_of(&store, "main body", 0), vec!["a = 1"]);
        assert_eq!(lines_of(&store, "main body", 1), vec!["b = 2"]);
        assert_eq!(store.get("main body").unwrap()[1].definition_line(), 5);
        assert_eq!(store.get("main body").unwrap()[1].index, 1);
    }

    #[test]
    fn test_empty_fragment() {
        let store = parse("@<nothing@>=\n@<something@>=\nx\n");
        assert!(store.get("nothing").unwrap()[0].is_empty());
        assert_eq!(lines_of(&store, "something", 0), vec!["x"]);
    }

    #[test]
    fn test_blank_lines_are_dropped() {
        let store = parse("@<*@>=\n\nx\n   \n\t\ny\n\n");
        assert_eq!(lines_of(&store, "*", 0), vec!["x", "y"]);
    }

    #[test]
    fn test_indentation_is_preserved() {
        let store = parse("@<main function@>=\ndef main():\n    @<main body@>\n");
        assert_eq!(
            lines_of(&store, "main function", 0),
            vec!["def main():", "    @<main body@>"]
        );
    }

    #[test]
    fn test_column_zero_references_stay_in_chunk() {
        let store = parse("@<main@>=\n@<imports@>\n@<functions@>\nmain()\n");
        assert_eq!(
            lines_of(&store, "main", 0),
            vec!["@<imports@>", "@<functions@>", "main()"]
        );
    }

    #[test]
    fn test_eof_flushes_fragment() {
        let store = parse("@<*@>=\nlast line");
        assert_eq!(lines_of(&store, "*", 0), vec!["last line"]);
    }

    #[test]
    fn test_crlf_input() {
        let store = parse("@<*@>=\r\nx = 1\r\n@\r\n");
        assert_eq!(lines_of(&store, "*", 0), vec!["x = 1"]);
    }

    #[test]
    fn test_malformed_header() {
        let result = parse_document("@<*@>=\nx\n@<broken=\ny\n", None, &Syntax::default());
        match result {
            Err(WebtangleError::MalformedHeader { location, line }) => {
                assert_eq!(location.line, 3);
                assert_eq!(line, "@<broken=");
            }
            other => panic!("Expected MalformedHeader, got {:?}", other),
        }
    }

    #[test]
    fn test_malformed_header_in_documentation() {
        let result = parse_document("@ prose\n@<oops\n", None, &Syntax::default());
        assert!(matches!(
            result,
            Err(WebtangleError::MalformedHeader { .. })
        ));
    }

    #[test]
    fn test_location_tracking() {
        let path = Path::new("prog.w");
        let store = parse_document("@\n\n@<*@>=\nx\n", Some(path), &Syntax::default()).unwrap();
        let fragment = &store.get("*").unwrap()[0];
        assert_eq!(fragment.location.line, 3);
        assert_eq!(fragment.location.filename, Some(PathBuf::from("prog.w")));
    }

    #[test]
    fn test_custom_markers() {
        let syntax = Syntax::new(&Markers::new("%", "<<", ">>")).unwrap();
        let store = parse_document("% prose\n<<*>>=\n  <<body>>\n% more\n", None, &syntax).unwrap();
        assert_eq!(lines_of(&store, "*", 0), vec!["  <<body>>"]);
        assert_eq!(store.syntax().markers().open, "<<");
    }

    #[test]
    fn test_read_document_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("hello.w");
        std::fs::write(&path, "@<*@>=\nprint('hello')\n").unwrap();

        let store = read_document_file(&path, &Syntax::default()).unwrap();
        let fragment = &store.get("*").unwrap()[0];
        assert_eq!(fragment.lines, vec!["print('hello')"]);
        assert_eq!(fragment.location.filename.as_deref(), Some(path.as_path()));
    }

    #[test]
    fn test_read_missing_file() {
        let result = read_document_file(Path::new("/nonexistent/doc.w"), &Syntax::default());
        assert!(matches!(result, Err(WebtangleError::Io(_))));
    }
}
