//! Chunk and reference markers, and the compiled syntax built from them.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::errors::{Result, WebtangleError};

/// Marker strings of the document syntax.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Markers {
    /// Starts a documentation chunk when followed by whitespace or end of line.
    #[serde(default = "default_documentation")]
    pub documentation: String,

    /// Opens a fragment name, in headers and references.
    #[serde(default = "default_open")]
    pub open: String,

    /// Closes a fragment name, in headers and references.
    #[serde(default = "default_close")]
    pub close: String,
}

fn default_documentation() -> String {
    "@".to_string()
}

fn default_open() -> String {
    "@<".to_string()
}

fn default_close() -> String {
    "@>".to_string()
}

impl Default for Markers {
    fn default() -> Self {
        Self {
            documentation: default_documentation(),
            open: default_open(),
            close: default_close(),
        }
    }
}

impl Markers {
    /// Creates a new Markers configuration.
    pub fn new(documentation: &str, open: &str, close: &str) -> Self {
        Self {
            documentation: documentation.to_string(),
            open: open.to_string(),
            close: close.to_string(),
        }
    }

    /// Checks that the markers can delimit names unambiguously.
    pub fn validate(&self) -> Result<()> {
        if self.documentation.is_empty() || self.open.is_empty() || self.close.is_empty() {
            return Err(WebtangleError::Config(
                "markers must not be empty".to_string(),
            ));
        }
        if self.open == self.close {
            return Err(WebtangleError::Config(format!(
                "open and close markers must differ (both are {:?})",
                self.open
            )));
        }
        if self.open.contains(&self.close) || self.close.contains(&self.open) {
            return Err(WebtangleError::Config(format!(
                "open marker {:?} and close marker {:?} must not contain each other",
                self.open, self.close
            )));
        }
        Ok(())
    }

    /// Formats a reference to the given fragment name.
    pub fn format_reference(&self, name: &str) -> String {
        format!("{}{}{}", self.open, name, self.close)
    }

    /// Regex source for documentation chunk headers.
    pub fn documentation_pattern(&self) -> String {
        format!(r"^{}(?:\s|$)", regex::escape(&self.documentation))
    }

    /// Regex source for code chunk headers.
    pub fn header_pattern(&self) -> String {
        format!(
            r"^{}(?P<name>.*?){}=(?P<trailing>.*)$",
            regex::escape(&self.open),
            regex::escape(&self.close)
        )
    }

    /// Regex source for whole-line references.
    pub fn reference_line_pattern(&self) -> String {
        format!(
            r"^(?P<indent>\s*){}(?P<name>.+?){}\s*$",
            regex::escape(&self.open),
            regex::escape(&self.close)
        )
    }
}

static DEFAULT_SYNTAX: Lazy<Syntax> =
    Lazy::new(|| Syntax::new(&Markers::default()).unwrap());

/// Compiled line patterns for one set of markers.
#[derive(Debug, Clone)]
pub struct Syntax {
    markers: Markers,
    documentation: Regex,
    header: Regex,
    reference_line: Regex,
}

/// A whole-line reference: indentation prefix and fragment name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReferenceLine<'a> {
    pub indent: &'a str,
    pub name: &'a str,
}

/// The parts of a code chunk header line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Header<'a> {
    pub name: &'a str,
    pub trailing: &'a str,
}

impl Syntax {
    /// Compiles the patterns for the given markers.
    pub fn new(markers: &Markers) -> Result<Self> {
        markers.validate()?;
        Ok(Self {
            markers: markers.clone(),
            documentation: Regex::new(&markers.documentation_pattern())?,
            header: Regex::new(&markers.header_pattern())?,
            reference_line: Regex::new(&markers.reference_line_pattern())?,
        })
    }

    /// Returns the markers this syntax was compiled from.
    pub fn markers(&self) -> &Markers {
        &self.markers
    }

    /// True for `@`, `@ prose`, and the like.
    pub fn is_documentation_header(&self, line: &str) -> bool {
        self.documentation.is_match(line)
    }

    /// Matches a code chunk header. A name containing either marker is not a header.
    pub fn code_header<'a>(&self, line: &'a str) -> Option<Header<'a>> {
        let caps = self.header.captures(line)?;
        let name = caps.name("name")?.as_str();
        if self.contains_marker(name) {
            return None;
        }
        Some(Header {
            name,
            trailing: caps.name("trailing")?.as_str(),
        })
    }

    /// Matches a line consisting of a single reference and surrounding whitespace.
    pub fn reference_line<'a>(&self, line: &'a str) -> Option<ReferenceLine<'a>> {
        let caps = self.reference_line.captures(line)?;
        let name = caps.name("name")?.as_str();
        if self.contains_marker(name) {
            return None;
        }
        Some(ReferenceLine {
            indent: caps.name("indent")?.as_str(),
            name,
        })
    }

    /// True if the line begins with the open marker.
    pub fn starts_with_open(&self, line: &str) -> bool {
        line.starts_with(&self.markers.open)
    }

    /// True if the line contains the close marker anywhere.
    pub fn contains_close(&self, line: &str) -> bool {
        line.contains(&self.markers.close)
    }

    /// Names of all well-formed `open name close` occurrences in a line, left to right.
    ///
    /// Unbalanced markers are skipped; the inline pass reports them.
    pub fn references<'a>(&self, line: &'a str) -> Vec<&'a str> {
        let open = self.markers.open.as_str();
        let close = self.markers.close.as_str();
        let mut names = Vec::new();
        let mut cursor = 0;

        while let Some(start) = line[cursor..].find(open) {
            let name_start = cursor + start + open.len();
            let Some(len) = line[name_start..].find(close) else {
                break;
            };
            names.push(&line[name_start..name_start + len]);
            cursor = name_start + len + close.len();
        }

        names
    }

    fn contains_marker(&self, text: &str) -> bool {
        text.contains(&self.markers.open) || text.contains(&self.markers.close)
    }
}

impl Default for Syntax {
    fn default() -> Self {
        DEFAULT_SYNTAX.clone()
    }
}
