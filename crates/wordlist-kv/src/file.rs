//! File-backed key-value store.
//!
//! The whole store is persisted as one JSON object mapping keys to string
//! values:
//!
//! ```text
//! {"custom_lists.animals":"[\"cat\",\"dog\"]","settings.wordRepetitions":"1"}
//! ```
//!
//! Every operation re-reads the file, so the file stays the single source of
//! truth. Writes go to a temporary file in the same directory which is then
//! renamed over the original; readers see either the old or the new content,
//! never a torn write. Writers in other processes are not coordinated with:
//! the last rename wins.

use std::collections::BTreeMap;
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use tempfile::NamedTempFile;
use tracing::debug;

use crate::error::{KvError, KvResult};
use crate::traits::KeyValueStore;

/// A [`KeyValueStore`] persisted as a single JSON document.
#[derive(Debug)]
pub struct JsonFileKvStore {
    path: PathBuf,
    /// Serializes read-modify-write cycles within this process.
    write_lock: Mutex<()>,
}

impl JsonFileKvStore {
    /// Open a store at `path`, creating parent directories as needed.
    ///
    /// The file itself is only created on the first write; a missing file
    /// reads as an empty store.
    pub fn open(path: impl AsRef<Path>) -> KvResult<Self> {
        let path = path.as_ref().to_path_buf();
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        debug!(path = %path.display(), "opened file store");
        Ok(Self {
            path,
            write_lock: Mutex::new(()),
        })
    }

    /// Location of the backing file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn load(&self) -> KvResult<BTreeMap<String, String>> {
        let text = match fs::read_to_string(&self.path) {
            Ok(text) => text,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(BTreeMap::new()),
            Err(e) => return Err(e.into()),
        };
        if text.trim().is_empty() {
            return Ok(BTreeMap::new());
        }
        serde_json::from_str(&text).map_err(|e| {
            KvError::Serialization(format!("{}: {e}", self.path.display()))
        })
    }

    fn save(&self, entries: &BTreeMap<String, String>) -> KvResult<()> {
        let data = serde_json::to_vec_pretty(entries)
            .map_err(|e| KvError::Serialization(e.to_string()))?;

        let dir = match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };
        let mut tmp = NamedTempFile::new_in(dir)?;
        tmp.write_all(&data)?;
        tmp.as_file().sync_all()?;
        tmp.persist(&self.path).map_err(|e| KvError::Io(e.error))?;

        debug!(path = %self.path.display(), keys = entries.len(), "file store saved");
        Ok(())
    }

    fn update<T>(&self, f: impl FnOnce(&mut BTreeMap<String, String>) -> (T, bool)) -> KvResult<T> {
        let _guard = self
            .write_lock
            .lock()
            .map_err(|e| KvError::LockPoisoned(e.to_string()))?;
        let mut entries = self.load()?;
        let (out, dirty) = f(&mut entries);
        if dirty {
            self.save(&entries)?;
        }
        Ok(out)
    }
}

impl KeyValueStore for JsonFileKvStore {
    fn get(&self, key: &str) -> KvResult<Option<String>> {
        Ok(self.load()?.remove(key))
    }

    fn set(&self, key: &str, value: &str) -> KvResult<()> {
        self.update(|entries| {
            entries.insert(key.to_string(), value.to_string());
            ((), true)
        })
    }

    fn delete(&self, key: &str) -> KvResult<bool> {
        self.update(|entries| {
            let existed = entries.remove(key).is_some();
            (existed, existed)
        })
    }

    fn list_keys(&self) -> KvResult<Vec<String>> {
        Ok(self.load()?.into_keys().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn temp_store() -> (TempDir, JsonFileKvStore) {
        let dir = TempDir::new().unwrap();
        let store = JsonFileKvStore::open(dir.path().join("store.json")).unwrap();
        (dir, store)
    }

    #[test]
    fn missing_file_is_empty_store() {
        let (_dir, store) = temp_store();
        assert!(store.get("anything").unwrap().is_none());
        assert!(store.list_keys().unwrap().is_empty());
        assert!(!store.path().exists());
    }

    #[test]
    fn set_persists_to_disk() {
        let (_dir, store) = temp_store();
        store.set("settings.wordsPerSession", "7").unwrap();

        let reopened = JsonFileKvStore::open(store.path()).unwrap();
        assert_eq!(
            reopened.get("settings.wordsPerSession").unwrap().as_deref(),
            Some("7")
        );
    }

    #[test]
    fn delete_removes_key() {
        let (_dir, store) = temp_store();
        store.set("a", "1").unwrap();
        store.set("b", "2").unwrap();

        assert!(store.delete("a").unwrap());
        assert!(!store.delete("a").unwrap());
        assert_eq!(store.list_keys().unwrap(), vec!["b"]);
    }

    #[test]
    fn file_is_a_json_object_of_strings() {
        let (_dir, store) = temp_store();
        store.set("custom_lists.x", r#"["cat"]"#).unwrap();

        let raw = fs::read_to_string(store.path()).unwrap();
        let parsed: BTreeMap<String, String> = serde_json::from_str(&raw).unwrap();
        assert_eq!(parsed["custom_lists.x"], r#"["cat"]"#);
    }

    #[test]
    fn creates_parent_directories() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested").join("deeper").join("store.json");
        let store = JsonFileKvStore::open(&path).unwrap();
        store.set("k", "v").unwrap();
        assert!(path.exists());
    }

    #[test]
    fn corrupt_file_is_reported() {
        let (_dir, store) = temp_store();
        fs::write(store.path(), "not json").unwrap();

        let err = store.get("k").unwrap_err();
        assert!(matches!(err, KvError::Serialization(_)), "got: {err}");
    }

    #[test]
    fn sees_writes_from_another_handle() {
        let (_dir, first) = temp_store();
        let second = JsonFileKvStore::open(first.path()).unwrap();

        first.set("k", "from-first").unwrap();
        assert_eq!(second.get("k").unwrap().as_deref(), Some("from-first"));
    }
}
