//! In-memory key-value store for testing and ephemeral use.
//!
//! [`InMemoryKvStore`] keeps every entry in a `HashMap` protected by a
//! `RwLock`. Key enumeration follows the map's iteration order, which is
//! deliberately left unsorted so callers cannot come to depend on it.

use std::collections::HashMap;
use std::sync::RwLock;

use crate::error::{KvError, KvResult};
use crate::traits::KeyValueStore;

/// An in-memory implementation of [`KeyValueStore`].
///
/// Data is lost when the store is dropped.
#[derive(Debug, Default)]
pub struct InMemoryKvStore {
    entries: RwLock<HashMap<String, String>>,
}

impl InMemoryKvStore {
    /// Create a new empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store pre-populated with `entries`.
    pub fn with_entries<I, K, V>(entries: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            entries: RwLock::new(
                entries
                    .into_iter()
                    .map(|(k, v)| (k.into(), v.into()))
                    .collect(),
            ),
        }
    }

    /// Number of keys currently stored.
    pub fn len(&self) -> KvResult<usize> {
        Ok(self.read_entries()?.len())
    }

    /// Returns `true` if the store holds no keys.
    pub fn is_empty(&self) -> KvResult<bool> {
        Ok(self.read_entries()?.is_empty())
    }

    /// Remove every key.
    pub fn clear(&self) -> KvResult<()> {
        self.entries
            .write()
            .map_err(|e| KvError::LockPoisoned(e.to_string()))?
            .clear();
        Ok(())
    }

    fn read_entries(
        &self,
    ) -> KvResult<std::sync::RwLockReadGuard<'_, HashMap<String, String>>> {
        self.entries
            .read()
            .map_err(|e| KvError::LockPoisoned(e.to_string()))
    }
}

impl KeyValueStore for InMemoryKvStore {
    fn get(&self, key: &str) -> KvResult<Option<String>> {
        Ok(self.read_entries()?.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> KvResult<()> {
        let mut entries = self
            .entries
            .write()
            .map_err(|e| KvError::LockPoisoned(e.to_string()))?;
        entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn delete(&self, key: &str) -> KvResult<bool> {
        let mut entries = self
            .entries
            .write()
            .map_err(|e| KvError::LockPoisoned(e.to_string()))?;
        Ok(entries.remove(key).is_some())
    }

    fn list_keys(&self) -> KvResult<Vec<String>> {
        Ok(self.read_entries()?.keys().cloned().collect())
    }
}
