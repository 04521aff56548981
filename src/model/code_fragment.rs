//! A single definition of a named fragment.

use std::fmt;

use serde::Serialize;

use super::fragment_name::FragmentName;
use crate::text_location::TextLocation;

/// One textual definition of a fragment.
///
/// A name may be defined several times; `index` is the position of this
/// definition among those sharing its name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CodeFragment {
    /// The fragment name.
    pub name: FragmentName,

    /// Position among same-named definitions (0-indexed).
    pub index: usize,

    /// Location of the header line.
    pub location: TextLocation,

    /// Content lines, blank lines removed.
    pub lines: Vec<String>,
}

impl CodeFragment {
    /// Creates a new CodeFragment.
    pub fn new(name: FragmentName, index: usize, location: TextLocation, lines: Vec<String>) -> Self {
        Self {
            name,
            index,
            location,
            lines,
        }
    }

    /// Line number of the header line (1-indexed).
    pub fn definition_line(&self) -> usize {
        self.location.line
    }

    /// Returns the line count.
    pub fn line_count(&self) -> usize {
        self.lines.len()
    }

    /// Returns true if the definition has no content lines.
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}

impl fmt::Display for CodeFragment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}[{}]", self.name, self.index)
    }
}
