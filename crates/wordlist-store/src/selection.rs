//! Per-category sets of selected (active) list names.
//!
//! Selections reference lists by name only and are not updated when a list
//! is renamed or deleted. Instead, every read of a category's selection
//! compares it with the live catalog and deselects names that no longer
//! exist. The invariant "every selected name exists" therefore holds for
//! values returned by [`SelectionStore::get_selected_built_in_list_names`]
//! and [`SelectionStore::get_selected_custom_list_names`], not for the raw
//! stored value in between.

use std::collections::HashSet;
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::capability::BuiltInCatalog;
use crate::error::Result;
use crate::handle::StoreHandle;
use crate::keys::selection_key;
use crate::lists::ListStore;

/// The kind of list a selection refers to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ListCategory {
    #[serde(rename = "builtin")]
    BuiltIn,
    #[serde(rename = "custom")]
    Custom,
}

impl ListCategory {
    /// Name used in the storage key.
    pub fn as_str(self) -> &'static str {
        match self {
            ListCategory::BuiltIn => "builtin",
            ListCategory::Custom => "custom",
        }
    }
}

impl fmt::Display for ListCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ListCategory {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, String> {
        match s {
            "builtin" => Ok(ListCategory::BuiltIn),
            "custom" => Ok(ListCategory::Custom),
            other => Err(format!("unknown list category: {other:?} (expected builtin or custom)")),
        }
    }
}

/// Selection tracking over a [`StoreHandle`].
#[derive(Clone)]
pub struct SelectionStore {
    handle: StoreHandle,
    lists: ListStore,
    catalog: Arc<dyn BuiltInCatalog>,
}

impl SelectionStore {
    pub fn new(handle: StoreHandle, lists: ListStore, catalog: Arc<dyn BuiltInCatalog>) -> Self {
        Self {
            handle,
            lists,
            catalog,
        }
    }

    /// The stored selection for `category`, without pruning.
    ///
    /// A category that was never written has an empty selection.
    pub fn get_selected_list_names(&self, category: ListCategory) -> Result<Vec<String>> {
        Ok(self
            .handle
            .read_string_array(&selection_key(category))?
            .unwrap_or_default())
    }

    /// Select or deselect a list.
    ///
    /// Selecting moves the name to the end, so the stored order is
    /// most-recently-selected last.
    pub fn set_list_selected(
        &self,
        category: ListCategory,
        list_name: &str,
        is_selected: bool,
    ) -> Result<()> {
        let _guard = self.handle.lock()?;
        self.set_selected_locked(category, list_name, is_selected)
    }

    pub fn set_built_in_list_selected(&self, list_name: &str, is_selected: bool) -> Result<()> {
        self.set_list_selected(ListCategory::BuiltIn, list_name, is_selected)
    }

    pub fn set_custom_list_selected(&self, list_name: &str, is_selected: bool) -> Result<()> {
        self.set_list_selected(ListCategory::Custom, list_name, is_selected)
    }

    /// Selected built-in lists, pruned against the built-in catalog.
    pub fn get_selected_built_in_list_names(&self) -> Result<Vec<String>> {
        let _guard = self.handle.lock()?;
        let available = self.catalog.list_names();
        self.prune_locked(ListCategory::BuiltIn, &available)
    }

    /// Selected custom lists, pruned against the lists that currently exist.
    ///
    /// The catalog is read under the handle's lock, so a list created and
    /// selected concurrently is either seen as existing or not selected yet.
    pub fn get_selected_custom_list_names(&self) -> Result<Vec<String>> {
        let _guard = self.handle.lock()?;
        let available = self.lists.get_custom_list_names()?;
        self.prune_locked(ListCategory::Custom, &available)
    }

    fn prune_locked(&self, category: ListCategory, available: &[String]) -> Result<Vec<String>> {
        let available: HashSet<&str> = available.iter().map(String::as_str).collect();

        let selected = self.get_selected_list_names(category)?;
        let dead: Vec<&String> = selected
            .iter()
            .filter(|name| !available.contains(name.as_str()))
            .collect();
        for name in &dead {
            warn!(category = %category, list = %name, "deselecting list that no longer exists");
            self.set_selected_locked(category, name, false)?;
        }

        self.get_selected_list_names(category)
    }

    fn set_selected_locked(
        &self,
        category: ListCategory,
        list_name: &str,
        is_selected: bool,
    ) -> Result<()> {
        let key = selection_key(category);
        let mut selected = self.handle.read_string_array(&key)?.unwrap_or_default();

        selected.retain(|name| name != list_name);
        if is_selected {
            selected.push(list_name.to_string());
        }

        self.handle.write_string_array(&key, &selected)?;
        debug!(category = %category, list = list_name, selected = is_selected, "selection updated");
        Ok(())
    }
}

impl fmt::Debug for SelectionStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SelectionStore")
            .field("lists", &self.lists)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::capability::{StaticCatalog, WordValidator};
    use crate::error::StoreError;
    use wordlist_kv::{InMemoryKvStore, KeyValueStore};

    struct Fixture {
        kv: Arc<InMemoryKvStore>,
        lists: ListStore,
        selection: SelectionStore,
    }

    fn fresh() -> Fixture {
        let kv = Arc::new(InMemoryKvStore::new());
        let handle = StoreHandle::new(kv.clone());
        let validator: Arc<dyn WordValidator> = Arc::new(|_: &str| true);
        let lists = ListStore::new(handle.clone(), validator);
        let catalog = Arc::new(StaticCatalog::new(["Level 1", "Level 2", "Level 3"]));
        let selection = SelectionStore::new(handle, lists.clone(), catalog);
        Fixture {
            kv,
            lists,
            selection,
        }
    }

    #[test]
    fn never_initialized_is_empty_and_not_written() {
        let f = fresh();
        assert!(f.selection.get_selected_list_names(ListCategory::Custom).unwrap().is_empty());
        assert!(f.kv.get("selected_lists.custom").unwrap().is_none());
    }

    #[test]
    fn select_initializes_storage() {
        let f = fresh();
        f.selection.set_list_selected(ListCategory::BuiltIn, "Level 1", true).unwrap();
        assert_eq!(
            f.kv.get("selected_lists.builtin").unwrap().as_deref(),
            Some(r#"["Level 1"]"#)
        );
    }

    #[test]
    fn deselect_on_fresh_store_writes_empty_set() {
        let f = fresh();
        f.selection.set_list_selected(ListCategory::Custom, "x", false).unwrap();
        assert_eq!(f.kv.get("selected_lists.custom").unwrap().as_deref(), Some("[]"));
    }

    #[test]
    fn reselect_moves_to_end() {
        let f = fresh();
        f.selection.set_built_in_list_selected("Level 1", true).unwrap();
        f.selection.set_built_in_list_selected("Level 2", true).unwrap();
        f.selection.set_built_in_list_selected("Level 1", true).unwrap();
        assert_eq!(
            f.selection.get_selected_list_names(ListCategory::BuiltIn).unwrap(),
            vec!["Level 2", "Level 1"]
        );
    }

    #[test]
    fn deselect_removes() {
        let f = fresh();
        f.selection.set_built_in_list_selected("Level 1", true).unwrap();
        f.selection.set_built_in_list_selected("Level 2", true).unwrap();
        f.selection.set_built_in_list_selected("Level 1", false).unwrap();
        assert_eq!(
            f.selection.get_selected_list_names(ListCategory::BuiltIn).unwrap(),
            vec!["Level 2"]
        );
    }

    #[test]
    fn categories_are_independent() {
        let f = fresh();
        f.selection.set_built_in_list_selected("same", true).unwrap();
        assert!(f.selection.get_selected_list_names(ListCategory::Custom).unwrap().is_empty());
    }

    #[test]
    fn deleted_custom_list_is_pruned_on_read() {
        let f = fresh();
        f.lists.create_custom_list("x").unwrap();
        f.lists.create_custom_list("y").unwrap();
        f.selection.set_custom_list_selected("x", true).unwrap();
        f.selection.set_custom_list_selected("y", true).unwrap();

        f.lists.delete_custom_list("x").unwrap();

        assert_eq!(f.selection.get_selected_custom_list_names().unwrap(), vec!["y"]);
        assert_eq!(f.kv.get("selected_lists.custom").unwrap().as_deref(), Some(r#"["y"]"#));
    }

    #[test]
    fn renamed_custom_list_is_pruned_under_old_name() {
        let f = fresh();
        f.lists.create_custom_list("old").unwrap();
        f.selection.set_custom_list_selected("old", true).unwrap();

        f.lists.rename_custom_list("old", "new").unwrap();

        assert!(f.selection.get_selected_custom_list_names().unwrap().is_empty());
    }

    #[test]
    fn unknown_built_in_lists_are_pruned() {
        let f = fresh();
        f.selection.set_built_in_list_selected("Level 2", true).unwrap();
        f.selection.set_built_in_list_selected("Retired", true).unwrap();
        f.selection.set_built_in_list_selected("Level 3", true).unwrap();

        assert_eq!(
            f.selection.get_selected_built_in_list_names().unwrap(),
            vec!["Level 2", "Level 3"]
        );
        assert_eq!(
            f.selection.get_selected_list_names(ListCategory::BuiltIn).unwrap(),
            vec!["Level 2", "Level 3"]
        );
    }

    #[test]
    fn pruning_with_nothing_stale_keeps_order() {
        let f = fresh();
        f.lists.create_custom_list("b").unwrap();
        f.lists.create_custom_list("a").unwrap();
        f.selection.set_custom_list_selected("b", true).unwrap();
        f.selection.set_custom_list_selected("a", true).unwrap();
        assert_eq!(f.selection.get_selected_custom_list_names().unwrap(), vec!["b", "a"]);
    }

    #[test]
    fn corrupt_selection_is_reported() {
        let f = fresh();
        f.kv.set("selected_lists.builtin", "not json").unwrap();
        let err = f.selection.get_selected_built_in_list_names().unwrap_err();
        assert!(matches!(err, StoreError::CorruptValue { .. }));
    }

    #[test]
    fn category_parsing() {
        assert_eq!("builtin".parse::<ListCategory>().unwrap(), ListCategory::BuiltIn);
        assert_eq!("custom".parse::<ListCategory>().unwrap(), ListCategory::Custom);
        assert!("Custom".parse::<ListCategory>().is_err());
    }
}
