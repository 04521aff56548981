//! Inline reference expansion.

use std::collections::HashMap;

use super::cycles::CycleDetector;
use super::fragment_name::FragmentName;
use super::fragment_store::FragmentStore;
use crate::errors::{Result, WebtangleError};

/// Resolves references embedded inside lines.
///
/// An inline reference is replaced by the single line of its fragment, stripped
/// of surrounding whitespace. Fragment lines may contain inline references
/// themselves; those are resolved depth-first and every fully resolved name is
/// cached for the lifetime of the expander.
#[derive(Debug)]
pub struct InlineExpander<'a> {
    store: &'a FragmentStore,
    cache: HashMap<FragmentName, String>,
    detector: CycleDetector,
}

impl<'a> InlineExpander<'a> {
    /// Creates an expander with an empty cache.
    pub fn new(store: &'a FragmentStore) -> Self {
        Self {
            store,
            cache: HashMap::new(),
            detector: CycleDetector::new(),
        }
    }

    /// Number of names resolved so far.
    pub fn cache_len(&self) -> usize {
        self.cache.len()
    }

    /// Returns the cached resolution of a name, if it has been resolved.
    pub fn cached(&self, name: &str) -> Option<&str> {
        self.cache.get(name).map(String::as_str)
    }

    /// Expands every line of `text`. Line numbers in errors are 1-based.
    pub fn expand_text(&mut self, text: &str) -> Result<String> {
        let mut out = Vec::new();
        for (i, line) in text.split('\n').enumerate() {
            out.push(self.expand_line(line, i + 1)?);
        }
        Ok(out.join("\n"))
    }

    /// Expands all inline references in one line.
    pub fn expand_line(&mut self, line: &str, line_number: usize) -> Result<String> {
        self.splice(line, line_number, None)
    }

    /// Resolves a name to its fully expanded single line.
    pub fn resolve(&mut self, name: &str, line_number: usize) -> Result<String> {
        if let Some(done) = self.cache.get(name) {
            return Ok(done.clone());
        }

        let fragment_name = FragmentName::new(name);
        self.detector.enter(&fragment_name)?;
        let result = self.resolve_uncached(&fragment_name, line_number);
        self.detector.exit();

        let resolved = result?;
        tracing::trace!("inline <<{}>> resolved to {:?}", fragment_name, resolved);
        self.cache.insert(fragment_name, resolved.clone());
        Ok(resolved)
    }

    fn resolve_uncached(&mut self, name: &FragmentName, line_number: usize) -> Result<String> {
        let store = self.store;
        let defs = store.require(name.as_str(), None)?;
        if defs.len() != 1 {
            return Err(WebtangleError::AmbiguousInlineDefinition {
                name: name.clone(),
                count: defs.len(),
            });
        }
        let def = &defs[0];
        if def.lines.len() != 1 {
            return Err(WebtangleError::OversizedInlineDefinition {
                name: name.clone(),
                lines: def.lines.len(),
            });
        }

        self.splice(def.lines[0].trim(), line_number, Some(name))
    }

    /// Copies `text`, replacing each `open name close` span by its resolution.
    fn splice(
        &mut self,
        text: &str,
        line_number: usize,
        within: Option<&FragmentName>,
    ) -> Result<String> {
        let store = self.store;
        let markers = store.syntax().markers();
        let (open, close) = (markers.open.as_str(), markers.close.as_str());
        let mismatch = |message: String| WebtangleError::TagMismatch {
            line: line_number,
            message: match within {
                Some(name) => format!("in fragment <<{}>>: {}", name, message),
                None => message,
            },
        };

        let mut out = String::with_capacity(text.len());
        let mut cursor = 0;

        loop {
            let rest = &text[cursor..];
            let (start, end) = match (rest.find(open), rest.find(close)) {
                (None, None) => {
                    out.push_str(rest);
                    return Ok(out);
                }
                (Some(start), None) => {
                    return Err(mismatch(format!(
                        "{:?} at column {} has no closing {:?}",
                        open,
                        cursor + start + 1,
                        close
                    )));
                }
                (None, Some(end)) => {
                    return Err(mismatch(format!(
                        "{:?} at column {} has no opening {:?}",
                        close,
                        cursor + end + 1,
                        open
                    )));
                }
                (Some(start), Some(end)) if end < start + open.len() => {
                    return Err(mismatch(format!(
                        "{:?} at column {} comes before {:?} at column {}",
                        close,
                        cursor + end + 1,
                        open,
                        cursor + start + 1
                    )));
                }
                (Some(start), Some(end)) => (start, end),
            };

            out.push_str(&rest[..start]);
            let name = &rest[start + open.len()..end];
            out.push_str(&self.resolve(name, line_number)?);
            cursor += end + close.len();
        }
    }
}

/// Resolves every inline reference in `text` with a fresh cache.
pub fn inline_expand(store: &FragmentStore, text: &str) -> Result<String> {
    let mut expander = InlineExpander::new(store);
    let expanded = expander.expand_text(text)?;
    tracing::debug!("Inline expansion resolved {} fragments", expander.cache_len());
    Ok(expanded)
}
