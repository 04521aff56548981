//! Tangle driver: multiline pass, then inline pass.

use super::cycles::check_reference_cycles;
use super::fragment_store::FragmentStore;
use super::inline::inline_expand;
use super::multiline::multiline_expand;
use crate::errors::Result;

/// Options for one tangle run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TangleOptions {
    /// Emit a comment with the definition line before each expanded fragment.
    pub include_source_line_comments: bool,
    /// Line comment token used for those comments.
    pub comment_prefix: String,
    /// Check the reference graph for cycles before expanding.
    pub check_cycles: bool,
}

impl Default for TangleOptions {
    fn default() -> Self {
        Self {
            include_source_line_comments: false,
            comment_prefix: "#".to_string(),
            check_cycles: true,
        }
    }
}

/// Tangles `root` into flat source text.
///
/// The result ends with a newline unless it is empty. Any error aborts the run;
/// no partial output is returned.
pub fn tangle(store: &FragmentStore, root: &str, options: &TangleOptions) -> Result<String> {
    store.require(root, None)?;

    if options.check_cycles {
        check_reference_cycles(store, root)?;
    }

    let multiline = multiline_expand(store, root, options)?;
    if multiline.lines.is_empty() {
        return Ok(String::new());
    }

    let mut output = inline_expand(store, &multiline.lines.join("\n"))?;
    output.push('\n');

    tracing::debug!(
        "Tangled <<{}>> into {} lines",
        root,
        multiline.lines.len()
    );
    Ok(output)
}
