//! Fragment names.

use std::fmt;

use serde::Serialize;

/// The name of a code fragment, kept verbatim.
///
/// Whitespace inside a name is significant: `main body` and `main  body` are
/// different fragments.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct FragmentName(String);

impl FragmentName {
    /// Creates a new FragmentName from a string.
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    /// Returns the name as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for FragmentName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<String> for FragmentName {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for FragmentName {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl AsRef<str> for FragmentName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl std::borrow::Borrow<str> for FragmentName {
    fn borrow(&self) -> &str {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_verbatim_name() {
        let name = FragmentName::new("main body");
        assert_eq!(name.as_str(), "main body");
        assert_ne!(name, FragmentName::new("main  body"));
    }

    #[test]
    fn test_lookup_by_str() {
        let mut map = HashMap::new();
        map.insert(FragmentName::new("greet"), 1);
        assert_eq!(map.get("greet"), Some(&1));
    }
}
