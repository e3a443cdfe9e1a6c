//! The list exchange document.
//!
//! A custom list is exported as a JSON object `{"name": ..., "words": [...]}`.
//! Import accepts the same shape; extra fields are ignored.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{Result, StoreError};
use crate::keys::custom_list_key;

/// A custom list in its exchange form.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListExport {
    pub name: String,
    pub words: Vec<String>,
}

impl ListExport {
    /// Serialize to compact JSON.
    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string(self).map_err(|e| export_error(&self.name, &e))
    }

    /// Parse and shape-check an import payload.
    ///
    /// Anything other than an object with a string `name` and an array of
    /// strings under `words` is [`StoreError::InvalidImportData`].
    pub fn from_json(data: &str) -> Result<Self> {
        let value: Value = serde_json::from_str(data)
            .map_err(|e| StoreError::InvalidImportData(format!("not JSON: {e}")))?;
        if !value.is_object() {
            return Err(StoreError::InvalidImportData(
                "expected a JSON object".into(),
            ));
        }
        serde_json::from_value(value).map_err(|e| StoreError::InvalidImportData(e.to_string()))
    }
}

fn export_error(name: &str, err: &serde_json::Error) -> StoreError {
    StoreError::CorruptValue {
        key: custom_list_key(name),
        reason: err.to_string(),
    }
}
