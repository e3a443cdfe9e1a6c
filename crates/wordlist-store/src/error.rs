//! Error types for the wordlist persistence layer.

use thiserror::Error;
use wordlist_kv::KvError;

/// Errors raised by the settings, list and selection stores.
///
/// All errors are returned to the immediate caller; nothing is retried or
/// recovered internally.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The setting name is not one of the fixed settings.
    #[error("unknown setting: {name}")]
    UnknownSetting { name: String },

    /// A setting value failed strict validation.
    #[error("invalid value for setting {name}: {value}")]
    InvalidSetting { name: String, value: String },

    /// No custom list exists under this name.
    #[error("not a custom list: {name:?}")]
    ListNotFound { name: String },

    /// A custom list already exists under this name.
    #[error("already a custom list: {name:?}")]
    ListAlreadyExists { name: String },

    /// A word index is past the end of the list.
    #[error("index out of bounds: index = {index}, {list}.len() = {len}")]
    IndexOutOfBounds {
        list: String,
        index: usize,
        len: usize,
    },

    /// An import payload is not a `{name, words}` document.
    #[error("invalid import data: {0}")]
    InvalidImportData(String),

    /// A stored list or selection value is not a JSON array of strings.
    #[error("corrupt value at {key}: {reason}")]
    CorruptValue { key: String, reason: String },

    /// The per-store mutex was poisoned by a panicking caller.
    #[error("store lock poisoned: {0}")]
    LockPoisoned(String),

    /// The underlying key-value store failed.
    #[error("backend error: {0}")]
    Backend(#[from] KvError),
}

/// Convenience type alias for store operations.
pub type Result<T> = std::result::Result<T, StoreError>;
