//! Reference cycle detection.

use std::collections::HashSet;

use super::fragment_name::FragmentName;
use super::fragment_store::FragmentStore;
use crate::errors::{Result, WebtangleError};

/// Tracks the fragments currently being expanded along one branch.
#[derive(Debug, Clone, Default)]
pub struct CycleDetector {
    /// Names in the order they were entered (for error reporting).
    stack: Vec<FragmentName>,
    /// Set for O(1) membership checks.
    seen: HashSet<FragmentName>,
}

impl CycleDetector {
    /// Creates a new cycle detector.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Enters a fragment, failing if it is already open on this branch.
    pub fn enter(&mut self, name: &FragmentName) -> Result<()> {
        if self.seen.contains(name) {
            let mut cycle = self.stack.clone();
            cycle.push(name.clone());
            return Err(WebtangleError::ReferenceCycle(cycle));
        }
        self.seen.insert(name.clone());
        self.stack.push(name.clone());
        Ok(())
    }

    /// Exits the most recently entered fragment.
    pub fn exit(&mut self) {
        if let Some(name) = self.stack.pop() {
            self.seen.remove(&name);
        }
    }

    /// Returns the current depth.
    pub fn depth(&self) -> usize {
        self.stack.len()
    }
}

/// Walks the reference graph reachable from `root` and fails on the first cycle.
///
/// Every `open name close` occurrence counts as an edge, whether it would be
/// expanded as a whole-line or an inline reference. Edges to unknown names are
/// skipped; expansion reports those with better context.
pub fn check_reference_cycles(store: &FragmentStore, root: &str) -> Result<()> {
    let mut detector = CycleDetector::new();
    let mut finished = HashSet::new();
    visit(store, root, &mut detector, &mut finished)?;
    tracing::debug!(
        "Reference graph from <<{}>> is acyclic ({} fragments reachable)",
        root,
        finished.len()
    );
    Ok(())
}

fn visit(
    store: &FragmentStore,
    name: &str,
    detector: &mut CycleDetector,
    finished: &mut HashSet<FragmentName>,
) -> Result<()> {
    if finished.contains(name) {
        return Ok(());
    }
    let Some(defs) = store.get(name) else {
        return Ok(());
    };

    let fragment_name = FragmentName::new(name);
    detector.enter(&fragment_name)?;
    for def in defs {
        for line in &def.lines {
            for reference in store.syntax().references(line) {
                visit(store, reference, detector, finished)?;
            }
        }
    }
    detector.exit();

    finished.insert(fragment_name);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::store_from;

    #[test]
    fn test_cycle_detector() {
        let mut detector = CycleDetector::new();

        detector.enter(&FragmentName::new("a")).unwrap();
        detector.enter(&FragmentName::new("b")).unwrap();
        detector.enter(&FragmentName::new("c")).unwrap();

        assert_eq!(detector.depth(), 3);

        let result = detector.enter(&FragmentName::new("a"));
        match result {
            Err(WebtangleError::ReferenceCycle(chain)) => {
                let names: Vec<_> = chain.iter().map(FragmentName::as_str).collect();
                assert_eq!(names, vec!["a", "b", "c", "a"]);
            }
            other => panic!("Expected ReferenceCycle, got {:?}", other),
        }

        detector.exit();
        detector.exit();
        detector.exit();

        assert_eq!(detector.depth(), 0);
        assert!(detector.enter(&FragmentName::new("a")).is_ok());
    }

    #[test]
    fn test_acyclic_graph() {
        let store = store_from(&[
            ("*", "@<a@>\n@<b@>"),
            ("a", "x = @<c@>"),
            ("b", "  @<c@>"),
            ("c", "1"),
        ]);
        assert!(check_reference_cycles(&store, "*").is_ok());
    }

    #[test]
    fn test_self_reference() {
        let store = store_from(&[("*", "@<*@>")]);
        let result = check_reference_cycles(&store, "*");
        assert!(matches!(result, Err(WebtangleError::ReferenceCycle(_))));
    }

    #[test]
    fn test_mixed_whole_line_and_inline_cycle() {
        let store = store_from(&[("*", "@<a@>"), ("a", "    @<b@>"), ("b", "f(@<a@>)")]);
        match check_reference_cycles(&store, "*") {
            Err(WebtangleError::ReferenceCycle(chain)) => {
                let names: Vec<_> = chain.iter().map(FragmentName::as_str).collect();
                assert_eq!(names, vec!["*", "a", "b", "a"]);
            }
            other => panic!("Expected ReferenceCycle, got {:?}", other),
        }
    }

    #[test]
    fn test_cycle_in_later_definition() {
        let store = store_from(&[("*", "@<a@>"), ("a", "ok"), ("a", "@<*@>")]);
        assert!(check_reference_cycles(&store, "*").is_err());
    }

    #[test]
    fn test_unreachable_cycle_is_ignored() {
        let store = store_from(&[("*", "fine"), ("loop", "@<loop@>")]);
        assert!(check_reference_cycles(&store, "*").is_ok());
    }

    #[test]
    fn test_missing_names_are_skipped() {
        let store = store_from(&[("*", "@<missing@>")]);
        assert!(check_reference_cycles(&store, "*").is_ok());
    }
}
