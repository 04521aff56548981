//! Ordered store of fragment definitions.

use indexmap::IndexMap;
use serde::Serialize;

use super::code_fragment::CodeFragment;
use super::fragment_name::FragmentName;
use crate::config::Syntax;
use crate::errors::{Result, WebtangleError};
use crate::text_location::TextLocation;

/// Fragment definitions grouped by name.
///
/// Both the names and the definitions under each name keep document order.
/// The store is read-only once built; use [`FragmentStoreBuilder`] to fill it.
/// It remembers the syntax of the document it came from, so references in
/// fragment lines are recognised with the same markers.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(transparent)]
pub struct FragmentStore {
    fragments: IndexMap<FragmentName, Vec<CodeFragment>>,
    #[serde(skip)]
    syntax: Syntax,
}

impl FragmentStore {
    /// The syntax the document was parsed with.
    pub fn syntax(&self) -> &Syntax {
        &self.syntax
    }

    /// Gets all definitions of a name, in document order.
    pub fn get(&self, name: &str) -> Option<&[CodeFragment]> {
        self.fragments.get(name).map(Vec::as_slice)
    }

    /// Gets all definitions of a name, failing if the name is unknown.
    ///
    /// `referenced_from` is the definition holding the reference, for diagnostics.
    pub fn require(
        &self,
        name: &str,
        referenced_from: Option<&TextLocation>,
    ) -> Result<&[CodeFragment]> {
        self.get(name)
            .ok_or_else(|| WebtangleError::UnresolvedFragment {
                name: FragmentName::new(name),
                location: referenced_from.cloned(),
            })
    }

    /// Checks if a name exists in the store.
    pub fn contains_name(&self, name: &str) -> bool {
        self.fragments.contains_key(name)
    }

    /// Returns the number of definitions with the given name.
    pub fn count_by_name(&self, name: &str) -> usize {
        self.fragments.get(name).map(Vec::len).unwrap_or(0)
    }

    /// Returns all names in order of first definition.
    pub fn names(&self) -> impl Iterator<Item = &FragmentName> {
        self.fragments.keys()
    }

    /// Returns all (name, definitions) pairs in order of first definition.
    pub fn iter(&self) -> impl Iterator<Item = (&FragmentName, &[CodeFragment])> {
        self.fragments.iter().map(|(name, defs)| (name, defs.as_slice()))
    }

    /// Returns every definition in document order.
    pub fn fragments(&self) -> impl Iterator<Item = &CodeFragment> {
        let mut all: Vec<&CodeFragment> = self.fragments.values().flatten().collect();
        all.sort_by_key(|f| f.location.line);
        all.into_iter()
    }

    /// Returns the number of distinct names.
    pub fn len(&self) -> usize {
        self.fragments.len()
    }

    /// Returns the total number of definitions.
    pub fn definition_count(&self) -> usize {
        self.fragments.values().map(Vec::len).sum()
    }

    /// Returns true if there are no fragments.
    pub fn is_empty(&self) -> bool {
        self.fragments.is_empty()
    }
}

/// Append-only builder used while a document is being parsed.
#[derive(Debug, Default)]
pub struct FragmentStoreBuilder {
    fragments: IndexMap<FragmentName, Vec<CodeFragment>>,
    syntax: Syntax,
}

impl FragmentStoreBuilder {
    /// Creates a new empty builder for the default syntax.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a new empty builder for documents written with `syntax`.
    #[must_use]
    pub fn with_syntax(syntax: Syntax) -> Self {
        Self {
            fragments: IndexMap::new(),
            syntax,
        }
    }

    /// Appends a definition under `name`, after any earlier ones.
    pub fn insert(
        &mut self,
        name: FragmentName,
        location: TextLocation,
        lines: Vec<String>,
    ) -> &CodeFragment {
        let defs = self.fragments.entry(name.clone()).or_default();
        defs.push(CodeFragment::new(name, defs.len(), location, lines));
        &defs[defs.len() - 1]
    }

    /// Finishes the store.
    pub fn build(self) -> FragmentStore {
        FragmentStore {
            fragments: self.fragments,
            syntax: self.syntax,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::store_from;

    #[test]
    fn test_insert_assigns_indices() {
        let mut builder = FragmentStoreBuilder::new();
        let first = builder
            .insert(FragmentName::new("main"), TextLocation::line_only(1), vec!["a".into()])
            .index;
        let second = builder
            .insert(FragmentName::new("main"), TextLocation::line_only(5), vec!["b".into()])
            .index;

        assert_eq!(first, 0);
        assert_eq!(second, 1);

        let store = builder.build();
        assert_eq!(store.len(), 1);
        assert_eq!(store.definition_count(), 2);
        assert_eq!(store.count_by_name("main"), 2);
    }

    #[test]
    fn test_additive_definitions_keep_order() {
        let store = store_from(&[("body", "x"), ("other", "o"), ("body", "y")]);

        let defs = store.get("body").unwrap();
        let lines: Vec<_> = defs.iter().flat_map(|d| d.lines.iter()).collect();
        assert_eq!(lines, vec!["x", "y"]);
    }

    #[test]
    fn test_names_in_first_definition_order() {
        let store = store_from(&[("c", "3"), ("a", "1"), ("c", "33"), ("b", "2")]);

        let names: Vec<_> = store.names().map(|n| n.as_str()).collect();
        assert_eq!(names, vec!["c", "a", "b"]);
    }

    #[test]
    fn test_fragments_in_document_order() {
        let store = store_from(&[("c", "3"), ("a", "1"), ("c", "33")]);

        let lines: Vec<_> = store.fragments().map(|f| f.lines[0].as_str()).collect();
        assert_eq!(lines, vec!["3", "1", "33"]);
    }

    #[test]
    fn test_require_missing() {
        let store = FragmentStore::default();
        let result = store.require("nope", Some(&TextLocation::line_only(3)));
        match result {
            Err(WebtangleError::UnresolvedFragment { name, location }) => {
                assert_eq!(name.as_str(), "nope");
                assert_eq!(location, Some(TextLocation::line_only(3)));
            }
            other => panic!("Expected UnresolvedFragment, got {:?}", other),
        }
    }

    #[test]
    fn test_serialize_store() {
        let store = store_from(&[("greet", "\"hi\"")]);
        let json = serde_json::to_value(&store).unwrap();
        assert_eq!(json["greet"][0]["lines"][0], "\"hi\"");
        assert_eq!(json["greet"][0]["index"], 0);
    }
}
