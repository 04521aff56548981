//! Shared test utilities.

use crate::model::{FragmentName, FragmentStore, FragmentStoreBuilder};
use crate::text_location::TextLocation;

/// Builds a store from `(name, content)` pairs, one definition per pair.
///
/// Content lines are separated by `\n`; an empty string gives an empty
/// definition. Each definition is placed ten lines after the previous one.
pub fn store_from(defs: &[(&str, &str)]) -> FragmentStore {
    let mut builder = FragmentStoreBuilder::new();
    for (i, (name, content)) in defs.iter().enumerate() {
        let lines = content
            .lines()
            .filter(|l| !l.trim().is_empty())
            .map(str::to_string)
            .collect();
        builder.insert(
            FragmentName::new(*name),
            TextLocation::line_only(1 + i * 10),
            lines,
        );
    }
    builder.build()
}
