//! Persistence for a vocabulary-learning tool.
//!
//! This crate stores user settings, user-authored word lists and the set of
//! currently active lists on top of a flat, string-keyed
//! [`KeyValueStore`]. Nothing is cached: every operation reads the store
//! again, so the store is the single source of truth.
//!
//! # Architecture
//!
//! - **Settings** are six fixed scalars under `settings.<name>`. Reads store
//!   the default on first access and parse leniently.
//! - **Custom lists** are JSON arrays of lowercase words under
//!   `custom_lists.<name>`. The key's existence is the list's existence.
//! - **Selections** are JSON arrays of list names under
//!   `selected_lists.<category>`, pruned of dangling names whenever read.
//!
//! Word-validity rules and the built-in list catalog are consumed through
//! the [`WordValidator`] and [`BuiltInCatalog`] capabilities.
//!
//! # Modules
//!
//! - [`error`] — Error types for store operations
//! - [`keys`] — The persisted key layout
//! - [`settings`] — [`SettingsStore`] and typed setting values
//! - [`lists`] — [`ListStore`] for custom list CRUD
//! - [`export`] — The [`ListExport`] exchange document
//! - [`selection`] — [`SelectionStore`] and [`ListCategory`]
//! - [`capability`] — Consumed validator and catalog traits
//! - [`handle`] — The shared [`StoreHandle`]

pub mod capability;
pub mod error;
pub mod export;
pub mod handle;
pub mod keys;
pub mod lists;
pub mod selection;
pub mod settings;

use std::sync::Arc;

pub use capability::{BuiltInCatalog, StaticCatalog, WordValidator};
pub use error::{Result, StoreError};
pub use export::ListExport;
pub use handle::StoreHandle;
pub use lists::{normalize_word, ListStore};
pub use selection::{ListCategory, SelectionStore};
pub use settings::{
    AssistanceLevel, Capitalization, Setting, SettingValue, SettingsSnapshot, SettingsStore,
    ValidatedSettings,
};
pub use wordlist_kv::{KeyValueStore, KvError};

/// The three stores wired to one key-value store.
///
/// All three share a single [`StoreHandle`], so multi-step updates made
/// through any of them are serialized against each other.
#[derive(Clone, Debug)]
pub struct WordlistStore {
    settings: SettingsStore,
    lists: ListStore,
    selection: SelectionStore,
}

impl WordlistStore {
    pub fn new(
        kv: Arc<dyn KeyValueStore>,
        validator: Arc<dyn WordValidator>,
        catalog: Arc<dyn BuiltInCatalog>,
    ) -> Self {
        let handle = StoreHandle::new(kv);
        let lists = ListStore::new(handle.clone(), validator);
        Self {
            settings: SettingsStore::new(handle.clone()),
            selection: SelectionStore::new(handle, lists.clone(), catalog),
            lists,
        }
    }

    pub fn settings(&self) -> &SettingsStore {
        &self.settings
    }

    pub fn lists(&self) -> &ListStore {
        &self.lists
    }

    pub fn selection(&self) -> &SelectionStore {
        &self.selection
    }
}
