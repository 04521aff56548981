//! Readers for literate documents.

mod classify;
mod document;

pub use classify::{classify_line, LineKind};
pub use document::{parse_document, parse_lines, read_document_file};
