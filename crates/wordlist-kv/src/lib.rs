//! Flat, string-keyed persistent storage for the wordlist tool.
//!
//! Everything the wordlist layer persists -- settings, custom lists, list
//! selections -- is a string value under a string key. This crate defines that
//! capability as the [`KeyValueStore`] trait and ships two backends:
//!
//! - [`InMemoryKvStore`] -- `HashMap`-based store for tests and embedding
//! - [`JsonFileKvStore`] -- a single JSON object on disk, used by the CLI
//!
//! The store never interprets values. It offers no transactions and no
//! atomicity across keys; callers that need to serialize multi-key updates
//! must do so themselves.

pub mod error;
pub mod file;
pub mod memory;
pub mod traits;

pub use error::{KvError, KvResult};
pub use file::JsonFileKvStore;
pub use memory::InMemoryKvStore;
pub use traits::KeyValueStore;
