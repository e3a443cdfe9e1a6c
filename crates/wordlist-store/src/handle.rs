//! Shared handle to the injected key-value store.

use std::fmt;
use std::sync::{Arc, Mutex, MutexGuard};

use wordlist_kv::KeyValueStore;

use crate::error::{Result, StoreError};

/// A cloneable handle to one key-value store plus the mutex that serializes
/// multi-step updates against it.
///
/// Every component built from clones of the same handle shares the same
/// mutex. The lock only orders callers inside this process; other processes
/// writing to the same backing store are not seen.
#[derive(Clone)]
pub struct StoreHandle {
    kv: Arc<dyn KeyValueStore>,
    lock: Arc<Mutex<()>>,
}

impl StoreHandle {
    /// Wrap a key-value store.
    pub fn new(kv: Arc<dyn KeyValueStore>) -> Self {
        Self {
            kv,
            lock: Arc::new(Mutex::new(())),
        }
    }

    /// The underlying store.
    pub fn kv(&self) -> &dyn KeyValueStore {
        self.kv.as_ref()
    }

    /// Acquire the per-store write lock.
    pub(crate) fn lock(&self) -> Result<MutexGuard<'_, ()>> {
        self.lock
            .lock()
            .map_err(|e| StoreError::LockPoisoned(e.to_string()))
    }

    /// Read a JSON array of strings stored under `key`.
    ///
    /// Returns `Ok(None)` if the key is absent.
    pub(crate) fn read_string_array(&self, key: &str) -> Result<Option<Vec<String>>> {
        match self.kv.get(key)? {
            None => Ok(None),
            Some(raw) => serde_json::from_str(&raw)
                .map(Some)
                .map_err(|e| StoreError::CorruptValue {
                    key: key.to_string(),
                    reason: e.to_string(),
                }),
        }
    }

    /// Store `items` as a JSON array under `key`.
    pub(crate) fn write_string_array(&self, key: &str, items: &[String]) -> Result<()> {
        let raw = serde_json::to_string(items).map_err(|e| StoreError::CorruptValue {
            key: key.to_string(),
            reason: e.to_string(),
        })?;
        self.kv.set(key, &raw)?;
        Ok(())
    }
}

impl fmt::Debug for StoreHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StoreHandle").finish_non_exhaustive()
    }
}
