//! CRUD over named custom word lists.
//!
//! A custom list exists exactly when its `custom_lists.<name>` key exists;
//! there is no separate index. Names are case-sensitive. Words are stored
//! lowercase, and adding a word that is already present is a silent no-op.
//!
//! Every mutating operation holds the handle's lock for its whole
//! read-modify-write cycle. In particular rename checks both names, writes the
//! new key and deletes the old one without another same-process caller
//! observing the intermediate state. The backing store has no transactions,
//! so a crash between the write and the delete can still leave the list under
//! both names.

use std::sync::Arc;

use tracing::{debug, info};

use crate::capability::WordValidator;
use crate::error::{Result, StoreError};
use crate::export::ListExport;
use crate::handle::StoreHandle;
use crate::keys::{custom_list_key, custom_list_name};

/// Lowercase a word for storage and comparison.
pub fn normalize_word(word: &str) -> String {
    word.to_lowercase()
}

/// Custom list operations over a [`StoreHandle`].
#[derive(Clone)]
pub struct ListStore {
    handle: StoreHandle,
    validator: Arc<dyn WordValidator>,
}

impl ListStore {
    pub fn new(handle: StoreHandle, validator: Arc<dyn WordValidator>) -> Self {
        Self { handle, validator }
    }

    /// Names of all custom lists, sorted lexicographically.
    pub fn get_custom_list_names(&self) -> Result<Vec<String>> {
        let mut names: Vec<String> = self
            .handle
            .kv()
            .list_keys()?
            .iter()
            .filter_map(|key| custom_list_name(key))
            .map(str::to_string)
            .collect();
        names.sort();
        Ok(names)
    }

    /// Returns `true` if a custom list named `name` exists.
    pub fn custom_list_exists(&self, name: &str) -> Result<bool> {
        Ok(self.handle.kv().contains(&custom_list_key(name))?)
    }

    /// The words of a list, in stored order.
    pub fn get_custom_list(&self, name: &str) -> Result<Vec<String>> {
        self.handle
            .read_string_array(&custom_list_key(name))?
            .ok_or_else(|| not_found(name))
    }

    /// The words of a list that pass the word validator.
    pub fn get_custom_list_valid_words(&self, name: &str) -> Result<Vec<String>> {
        let mut words = self.get_custom_list(name)?;
        words.retain(|w| self.validator.is_valid_word(w));
        Ok(words)
    }

    /// Create an empty list.
    pub fn create_custom_list(&self, name: &str) -> Result<()> {
        let _guard = self.handle.lock()?;
        self.create_locked(name)
    }

    /// Move a list to a new name.
    pub fn rename_custom_list(&self, old_name: &str, new_name: &str) -> Result<()> {
        let _guard = self.handle.lock()?;
        let old_key = custom_list_key(old_name);
        let new_key = custom_list_key(new_name);

        let contents = self
            .handle
            .kv()
            .get(&old_key)?
            .ok_or_else(|| not_found(old_name))?;
        if self.handle.kv().contains(&new_key)? {
            return Err(already_exists(new_name));
        }

        self.handle.kv().set(&new_key, &contents)?;
        self.handle.kv().delete(&old_key)?;
        info!(from = old_name, to = new_name, "renamed custom list");
        Ok(())
    }

    /// Remove a list.
    pub fn delete_custom_list(&self, name: &str) -> Result<()> {
        let _guard = self.handle.lock()?;
        if !self.handle.kv().delete(&custom_list_key(name))? {
            return Err(not_found(name));
        }
        info!(list = name, "deleted custom list");
        Ok(())
    }

    /// Append a word unless its lowercase form is already in the list.
    pub fn add_custom_word(&self, list_name: &str, word: &str) -> Result<()> {
        let _guard = self.handle.lock()?;
        self.add_locked(list_name, word)
    }

    /// Overwrite the word at `index`.
    ///
    /// Unlike [`add_custom_word`](Self::add_custom_word) this does not check
    /// for duplicates, so an edit can leave the same word twice in a list.
    pub fn edit_custom_word(&self, list_name: &str, index: usize, new_value: &str) -> Result<()> {
        let _guard = self.handle.lock()?;
        let key = custom_list_key(list_name);
        let mut words = self.get_custom_list(list_name)?;
        check_index(list_name, index, words.len())?;

        words[index] = normalize_word(new_value);
        self.handle.write_string_array(&key, &words)?;
        debug!(list = list_name, index, word = %words[index], "edited word");
        Ok(())
    }

    /// Remove the word at `index`.
    pub fn delete_custom_word(&self, list_name: &str, index: usize) -> Result<()> {
        let _guard = self.handle.lock()?;
        let key = custom_list_key(list_name);
        let mut words = self.get_custom_list(list_name)?;
        check_index(list_name, index, words.len())?;

        let removed = words.remove(index);
        self.handle.write_string_array(&key, &words)?;
        debug!(list = list_name, index, word = %removed, "deleted word");
        Ok(())
    }

    /// Export a list as a `{name, words}` JSON document.
    pub fn export_list_to_json(&self, list_name: &str) -> Result<String> {
        ListExport {
            name: list_name.to_string(),
            words: self.get_custom_list(list_name)?,
        }
        .to_json()
    }

    /// Create a list from a `{name, words}` JSON document.
    ///
    /// Words go through the same normalization and de-duplication as
    /// [`add_custom_word`](Self::add_custom_word). Returns the new list's
    /// name.
    pub fn import_list_from_json(&self, data: &str) -> Result<String> {
        let doc = ListExport::from_json(data)?;

        let _guard = self.handle.lock()?;
        self.create_locked(&doc.name)?;
        for word in &doc.words {
            self.add_locked(&doc.name, word)?;
        }
        info!(list = %doc.name, words = doc.words.len(), "imported custom list");
        Ok(doc.name)
    }

    fn create_locked(&self, name: &str) -> Result<()> {
        let key = custom_list_key(name);
        if self.handle.kv().contains(&key)? {
            return Err(already_exists(name));
        }
        self.handle.write_string_array(&key, &[])?;
        info!(list = name, "created custom list");
        Ok(())
    }

    fn add_locked(&self, list_name: &str, word: &str) -> Result<()> {
        let key = custom_list_key(list_name);
        let mut words = self.get_custom_list(list_name)?;

        let word = normalize_word(word);
        if words.contains(&word) {
            debug!(list = list_name, word = %word, "word already present");
            return Ok(());
        }

        debug!(list = list_name, word = %word, "added word");
        words.push(word);
        self.handle.write_string_array(&key, &words)
    }
}

impl std::fmt::Debug for ListStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ListStore")
            .field("handle", &self.handle)
            .finish_non_exhaustive()
    }
}

fn not_found(name: &str) -> StoreError {
    StoreError::ListNotFound {
        name: name.to_string(),
    }
}

fn already_exists(name: &str) -> StoreError {
    StoreError::ListAlreadyExists {
        name: name.to_string(),
    }
}

fn check_index(list: &str, index: usize, len: usize) -> Result<()> {
    if index >= len {
        return Err(StoreError::IndexOutOfBounds {
            list: list.to_string(),
            index,
            len,
        });
    }
    Ok(())
}
