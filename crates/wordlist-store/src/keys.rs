//! Persisted key layout.
//!
//! Every entity lives under a dotted namespace in the flat store:
//!
//! - `settings.<settingName>`
//! - `custom_lists.<listName>`
//! - `selected_lists.<category>` where category is `builtin` or `custom`
//!
//! The layout is shared with previously persisted data and must not change.
//! List names are taken verbatim after the prefix, so a name may itself
//! contain dots.

use crate::selection::ListCategory;

/// Namespace prefix for scalar settings.
pub const SETTINGS_PREFIX: &str = "settings.";

/// Namespace prefix for custom word lists.
pub const CUSTOM_LIST_PREFIX: &str = "custom_lists.";

/// Namespace prefix for per-category selection sets.
pub const SELECTION_PREFIX: &str = "selected_lists.";

/// Storage key for a setting.
pub fn setting_key(name: &str) -> String {
    format!("{SETTINGS_PREFIX}{name}")
}

/// Storage key for a custom list.
pub fn custom_list_key(name: &str) -> String {
    format!("{CUSTOM_LIST_PREFIX}{name}")
}

/// Storage key for the selection set of `category`.
pub fn selection_key(category: ListCategory) -> String {
    format!("{SELECTION_PREFIX}{}", category.as_str())
}

/// Extract the list name from a custom-list key, or `None` for any other key.
pub fn custom_list_name(key: &str) -> Option<&str> {
    key.strip_prefix(CUSTOM_LIST_PREFIX)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn key_formats() {
        assert_eq!(setting_key("wordRepetitions"), "settings.wordRepetitions");
        assert_eq!(custom_list_key("Animals"), "custom_lists.Animals");
        assert_eq!(selection_key(ListCategory::BuiltIn), "selected_lists.builtin");
        assert_eq!(selection_key(ListCategory::Custom), "selected_lists.custom");
    }

    #[test]
    fn strip_custom_list_prefix() {
        assert_eq!(custom_list_name("custom_lists.fruit"), Some("fruit"));
        assert_eq!(custom_list_name("custom_lists.a.b"), Some("a.b"));
        assert_eq!(custom_list_name("custom_lists."), Some(""));
        assert_eq!(custom_list_name("settings.wordRepetitions"), None);
        assert_eq!(custom_list_name("xcustom_lists.fruit"), None);
    }
}
