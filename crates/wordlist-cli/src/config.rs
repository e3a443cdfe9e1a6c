use std::fs;
use std::path::{Path, PathBuf};

use anyhow::Context;
use serde::{Deserialize, Serialize};

/// CLI configuration, read from an optional TOML file.
///
/// ```toml
/// store_path = "~/.local/share/wordlist/store.json"
/// builtin_lists = ["Level 1", "Level 2"]
/// word_charset = "ascii"
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CliConfig {
    /// JSON file backing the key-value store.
    pub store_path: PathBuf,
    /// Names of the built-in lists; selections of any other built-in name
    /// are pruned.
    pub builtin_lists: Vec<String>,
    /// Which words count as valid for `list show --valid`.
    pub word_charset: WordCharset,
}

impl Default for CliConfig {
    fn default() -> Self {
        Self {
            store_path: PathBuf::from("wordlist.json"),
            builtin_lists: Vec::new(),
            word_charset: WordCharset::Alphabetic,
        }
    }
}

impl CliConfig {
    /// Load from `path`, or fall back to defaults when no path is given.
    pub fn load(path: Option<&Path>) -> anyhow::Result<Self> {
        let Some(path) = path else {
            return Ok(Self::default());
        };
        let text = fs::read_to_string(path)
            .with_context(|| format!("reading config {}", path.display()))?;
        toml::from_str(&text).with_context(|| format!("parsing config {}", path.display()))
    }
}

/// Character rule for a valid word.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WordCharset {
    /// Any Unicode letters.
    Alphabetic,
    /// ASCII letters only.
    Ascii,
}

impl WordCharset {
    pub fn accepts(self, word: &str) -> bool {
        !word.is_empty()
            && match self {
                WordCharset::Alphabetic => word.chars().all(char::is_alphabetic),
                WordCharset::Ascii => word.chars().all(|c| c.is_ascii_alphabetic()),
            }
    }
}
