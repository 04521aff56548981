//! Error types for webtangle.

use thiserror::Error;

use crate::model::FragmentName;
use crate::text_location::TextLocation;

/// Main error type for parsing and tangling.
#[derive(Error, Debug)]
pub enum WebtangleError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Regex error: {0}")]
    Regex(#[from] regex::Error),

    #[error("Malformed code chunk header at {location}: {line:?}")]
    MalformedHeader { location: TextLocation, line: String },

    #[error("Fragment not found: <<{}>>{}", .name, referenced_at(.location))]
    UnresolvedFragment {
        name: FragmentName,
        location: Option<TextLocation>,
    },

    #[error("Inline reference <<{name}>> is ambiguous: fragment has {count} definitions")]
    AmbiguousInlineDefinition { name: FragmentName, count: usize },

    #[error("Inline reference <<{name}>> must have exactly one line of code, found {lines}")]
    OversizedInlineDefinition { name: FragmentName, lines: usize },

    #[error("Mismatched reference tags on tangled line {line}: {message}")]
    TagMismatch { line: usize, message: String },

    #[error("Cycle detected in references: {}", render_cycle(.0))]
    ReferenceCycle(Vec<FragmentName>),
}

/// Result type alias for webtangle operations.
pub type Result<T> = std::result::Result<T, WebtangleError>;

fn referenced_at(location: &Option<TextLocation>) -> String {
    match location {
        Some(loc) => format!(" (referenced from fragment defined at {})", loc),
        None => String::new(),
    }
}

fn render_cycle(names: &[FragmentName]) -> String {
    names
        .iter()
        .map(|n| format!("<<{}>>", n))
        .collect::<Vec<_>>()
        .join(" -> ")
}
