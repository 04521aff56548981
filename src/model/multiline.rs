//! Whole-line reference expansion.
//!
//! Fragment bodies are plain text, so a reference nested inside a fragment only
//! becomes visible once its parent has been expanded. The expander therefore
//! rewrites the whole working sequence pass by pass until a pass finds no
//! whole-line references left.

use std::rc::Rc;

use super::fragment_name::FragmentName;
use super::fragment_store::FragmentStore;
use super::tangle::TangleOptions;
use crate::config::ReferenceLine;
use crate::errors::{Result, WebtangleError};
use crate::text_location::TextLocation;

/// Output of the multiline pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MultilineExpansion {
    /// The expanded lines.
    pub lines: Vec<String>,
    /// Number of passes that expanded at least one reference.
    pub passes: usize,
}

/// Where a working line came from.
#[derive(Debug, Default)]
struct Origin {
    /// Fragments whose expansion produced the line, outermost first.
    chain: Vec<FragmentName>,
    /// Definition the line was copied from.
    location: Option<TextLocation>,
}

#[derive(Debug)]
struct WorkingLine {
    text: String,
    origin: Rc<Origin>,
}

/// Expands `root` and every whole-line reference it leads to.
pub fn multiline_expand(
    store: &FragmentStore,
    root: &str,
    options: &TangleOptions,
) -> Result<MultilineExpansion> {
    let seed = store.syntax().markers().format_reference(root);
    let expansion = expand_lines(store, vec![seed], options)?;
    tracing::debug!(
        "Multiline expansion of <<{}>> took {} passes ({} lines)",
        root,
        expansion.passes,
        expansion.lines.len()
    );
    Ok(expansion)
}

/// Runs multiline passes over arbitrary lines until none contains a whole-line reference.
pub fn expand_lines(
    store: &FragmentStore,
    lines: Vec<String>,
    options: &TangleOptions,
) -> Result<MultilineExpansion> {
    let top = Rc::new(Origin::default());
    let mut working: Vec<WorkingLine> = lines
        .into_iter()
        .map(|text| WorkingLine {
            text,
            origin: Rc::clone(&top),
        })
        .collect();
    let mut passes = 0;

    loop {
        let mut next = Vec::with_capacity(working.len());
        let mut expanded = false;

        for line in working {
            match store.syntax().reference_line(&line.text) {
                Some(reference) => {
                    expand_reference(store, &line, reference, options, &mut next)?;
                    expanded = true;
                }
                None => next.push(line),
            }
        }

        working = next;
        if !expanded {
            break;
        }

        passes += 1;
        tracing::trace!(
            "multiline pass {}:\n{}",
            passes,
            working
                .iter()
                .map(|l| l.text.as_str())
                .collect::<Vec<_>>()
                .join("\n")
        );
    }

    Ok(MultilineExpansion {
        lines: working.into_iter().map(|l| l.text).collect(),
        passes,
    })
}

/// Replaces one reference line with the indented content of every definition.
fn expand_reference(
    store: &FragmentStore,
    line: &WorkingLine,
    reference: ReferenceLine<'_>,
    options: &TangleOptions,
    out: &mut Vec<WorkingLine>,
) -> Result<()> {
    let name = FragmentName::new(reference.name);
    if line.origin.chain.contains(&name) {
        let mut cycle = line.origin.chain.clone();
        cycle.push(name);
        return Err(WebtangleError::ReferenceCycle(cycle));
    }

    let defs = store.require(reference.name, line.origin.location.as_ref())?;
    let mut chain = line.origin.chain.clone();
    chain.push(name);

    for (i, def) in defs.iter().enumerate() {
        let origin = Rc::new(Origin {
            chain: chain.clone(),
            location: Some(def.location.clone()),
        });

        if i == 0 && options.include_source_line_comments {
            out.push(WorkingLine {
                text: format!(
                    "{}{}",
                    reference.indent,
                    source_line_comment(&options.comment_prefix, &def.name, def.definition_line())
                ),
                origin: Rc::clone(&origin),
            });
        }

        for content in &def.lines {
            out.push(WorkingLine {
                text: format!("{}{}", reference.indent, content),
                origin: Rc::clone(&origin),
            });
        }
    }

    Ok(())
}

/// Formats the traceability comment placed before an expanded fragment.
///
/// The name is quoted rather than wrapped in markers so the comment never reads
/// as a reference.
pub fn source_line_comment(prefix: &str, name: &FragmentName, line: usize) -> String {
    format!("{} '{}', line {}", prefix, name, line)
}
