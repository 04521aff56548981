//! Configuration data structures.

use serde::{Deserialize, Serialize};

use super::markers::Markers;
use crate::model::TangleOptions;

/// Main configuration structure for webtangle.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Fragment expanded when no root is given on the command line.
    #[serde(default = "default_root")]
    pub root: String,

    /// Emit a comment with the definition line before each expanded fragment.
    #[serde(default)]
    pub source_line_comments: bool,

    /// Line comment token of the tangled language.
    #[serde(default = "default_comment_prefix")]
    pub comment_prefix: String,

    /// Check the reference graph for cycles before expanding.
    #[serde(default = "default_check_cycles")]
    pub check_cycles: bool,

    /// Document markers.
    #[serde(default)]
    pub markers: Markers,
}

fn default_root() -> String {
    "*".to_string()
}

fn default_comment_prefix() -> String {
    "#".to_string()
}

fn default_check_cycles() -> bool {
    true
}

impl Default for Config {
    fn default() -> Self {
        Self {
            root: default_root(),
            source_line_comments: false,
            comment_prefix: default_comment_prefix(),
            check_cycles: default_check_cycles(),
            markers: Markers::default(),
        }
    }
}

impl Config {
    /// Builds the tangle options this configuration describes.
    pub fn tangle_options(&self) -> TangleOptions {
        TangleOptions {
            include_source_line_comments: self.source_line_comments,
            comment_prefix: self.comment_prefix.clone(),
            check_cycles: self.check_cycles,
        }
    }
}
