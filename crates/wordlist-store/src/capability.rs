//! Capabilities the persistence layer consumes but does not implement.
//!
//! Word-validity rules and the built-in list catalog are owned elsewhere.
//! The stores only call through these traits.

use std::collections::BTreeSet;

/// Decides whether a stored word may be used in a session.
pub trait WordValidator: Send + Sync {
    /// Returns `true` if `word` is usable.
    fn is_valid_word(&self, word: &str) -> bool;
}

impl<F> WordValidator for F
where
    F: Fn(&str) -> bool + Send + Sync,
{
    fn is_valid_word(&self, word: &str) -> bool {
        self(word)
    }
}

/// Enumerates the names of the lists shipped with the application.
pub trait BuiltInCatalog: Send + Sync {
    /// Every built-in list name currently available.
    fn list_names(&self) -> Vec<String>;
}

impl BuiltInCatalog for Vec<String> {
    fn list_names(&self) -> Vec<String> {
        self.clone()
    }
}

impl BuiltInCatalog for BTreeSet<String> {
    fn list_names(&self) -> Vec<String> {
        self.iter().cloned().collect()
    }
}

/// A fixed catalog of built-in list names.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct StaticCatalog {
    names: BTreeSet<String>,
}

impl StaticCatalog {
    /// Build a catalog from any collection of names.
    pub fn new<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            names: names.into_iter().map(Into::into).collect(),
        }
    }

    /// Returns `true` if `name` is in the catalog.
    pub fn contains(&self, name: &str) -> bool {
        self.names.contains(name)
    }
}

impl BuiltInCatalog for StaticCatalog {
    fn list_names(&self) -> Vec<String> {
        self.names.iter().cloned().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn closures_are_validators() {
        let only_short = |w: &str| w.chars().count() <= 3;
        assert!(only_short.is_valid_word("cat"));
        assert!(!only_short.is_valid_word("horse"));
    }

    #[test]
    fn static_catalog_dedups_names() {
        let catalog = StaticCatalog::new(["Level 1", "Level 2", "Level 1"]);
        assert_eq!(catalog.list_names(), vec!["Level 1", "Level 2"]);
        assert!(catalog.contains("Level 2"));
        assert!(!catalog.contains("level 2"));
    }
}
