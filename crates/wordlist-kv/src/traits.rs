//! The [`KeyValueStore`] trait defining the host storage interface.

use crate::error::KvResult;

/// Synchronous, string-keyed, string-valued storage.
///
/// Each call is independent: there is no batching and no atomicity across
/// keys. Key enumeration order is unspecified and may differ between calls.
pub trait KeyValueStore: Send + Sync {
    /// Read the value stored under `key`.
    ///
    /// Returns `Ok(None)` if the key does not exist.
    fn get(&self, key: &str) -> KvResult<Option<String>>;

    /// Create or overwrite the value under `key`.
    fn set(&self, key: &str, value: &str) -> KvResult<()>;

    /// Remove `key`.
    ///
    /// Returns `Ok(true)` if the key existed, `Ok(false)` otherwise.
    fn delete(&self, key: &str) -> KvResult<bool>;

    /// Enumerate every key currently in the store.
    fn list_keys(&self) -> KvResult<Vec<String>>;

    /// Returns `true` if `key` is present.
    fn contains(&self, key: &str) -> KvResult<bool> {
        Ok(self.get(key)?.is_some())
    }
}
