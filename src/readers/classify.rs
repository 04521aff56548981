//! Per-line classification of literate documents.

use crate::config::Syntax;

/// What a single document line is, independent of the surrounding chunk.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineKind<'a> {
    /// Empty or whitespace only. Never significant.
    Blank,
    /// Starts a documentation chunk.
    DocumentationHeader,
    /// Starts a code chunk; `trailing` is the text after `=`.
    CodeHeader { name: &'a str, trailing: &'a str },
    /// Starts with the open marker but is neither a header nor a reference.
    Malformed,
    /// Anything else: code in a code chunk, prose in a documentation chunk.
    Content,
}

impl LineKind<'_> {
    /// Returns true if the line starts a new chunk.
    pub fn is_header(&self) -> bool {
        matches!(self, Self::DocumentationHeader | Self::CodeHeader { .. })
    }
}

/// Classifies one line.
///
/// A line that begins with the open marker is a code header when it matches
/// `open name close =`. Otherwise it must at least contain a close marker (a
/// column-0 reference such as `@<imports@>`), or it is malformed. A header with
/// an empty name is malformed too.
pub fn classify_line<'a>(syntax: &Syntax, line: &'a str) -> LineKind<'a> {
    if line.trim().is_empty() {
        return LineKind::Blank;
    }

    if let Some(header) = syntax.code_header(line) {
        if header.name.is_empty() {
            return LineKind::Malformed;
        }
        return LineKind::CodeHeader {
            name: header.name,
            trailing: header.trailing,
        };
    }

    if syntax.starts_with_open(line) && !syntax.contains_close(line) {
        return LineKind::Malformed;
    }

    if syntax.is_documentation_header(line) {
        return LineKind::DocumentationHeader;
    }

    LineKind::Content
}
