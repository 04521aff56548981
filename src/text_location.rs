//! Source locations for fragment definitions and diagnostics.

use std::fmt;
use std::path::PathBuf;

use serde::Serialize;

/// A line within a literate document.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct TextLocation {
    /// The document path (if known).
    pub filename: Option<PathBuf>,
    /// Line number (1-indexed).
    pub line: usize,
}

impl TextLocation {
    /// Creates a new TextLocation.
    pub fn new(filename: Option<PathBuf>, line: usize) -> Self {
        Self { filename, line }
    }

    /// Creates a TextLocation with only line information.
    pub fn line_only(line: usize) -> Self {
        Self {
            filename: None,
            line,
        }
    }

    /// Returns a new location with updated filename.
    pub fn with_filename(mut self, filename: PathBuf) -> Self {
        self.filename = Some(filename);
        self
    }
}

impl Default for TextLocation {
    fn default() -> Self {
        Self {
            filename: None,
            line: 1,
        }
    }
}

impl fmt::Display for TextLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.filename {
            Some(path) => write!(f, "{}:{}", path.display(), self.line),
            None => write!(f, "line {}", self.line),
        }
    }
}
