//! Property tests for the wordlist stores.

use std::sync::Arc;

use proptest::prelude::*;
use wordlist_kv::{InMemoryKvStore, KeyValueStore};
use wordlist_store::{
    ListCategory, Setting, SettingValue, StaticCatalog, StoreError, WordlistStore,
};

fn fresh() -> (Arc<InMemoryKvStore>, WordlistStore) {
    let kv = Arc::new(InMemoryKvStore::new());
    let store = WordlistStore::new(
        kv.clone(),
        Arc::new(|w: &str| w.chars().all(char::is_alphabetic)),
        Arc::new(StaticCatalog::new(["Level 1", "Level 2"])),
    );
    (kv, store)
}

fn word() -> impl Strategy<Value = String> {
    "[a-zA-Z]{1,8}"
}

proptest! {
    #[test]
    fn stored_words_are_lowercase_and_unique(words in prop::collection::vec(word(), 0..20)) {
        let (_kv, store) = fresh();
        store.lists().create_custom_list("x").unwrap();
        for w in &words {
            store.lists().add_custom_word("x", w).unwrap();
        }

        let stored = store.lists().get_custom_list("x").unwrap();
        let mut expected: Vec<String> = Vec::new();
        for w in &words {
            let lower = w.to_lowercase();
            if !expected.contains(&lower) {
                expected.push(lower);
            }
        }
        prop_assert_eq!(stored, expected);
    }

    #[test]
    fn int_settings_round_trip(value in any::<i64>()) {
        let (_kv, store) = fresh();
        for setting in [Setting::WordRepetitions, Setting::WordDisplayTime, Setting::WordsPerSession] {
            store.settings().set(setting, value).unwrap();
            prop_assert_eq!(store.settings().get(setting).unwrap(), Some(SettingValue::Int(value)));
        }
    }

    #[test]
    fn text_settings_read_back_uppercased(value in "[a-zA-Z]{0,12}") {
        let (_kv, store) = fresh();
        store.settings().set_setting("assistanceLevel", value.as_str()).unwrap();
        prop_assert_eq!(
            store.settings().get_setting("assistanceLevel").unwrap(),
            Some(SettingValue::Text(value.to_uppercase()))
        );
    }

    #[test]
    fn export_import_round_trip(words in prop::collection::vec(word(), 0..15)) {
        let (_kv, store) = fresh();
        store.lists().create_custom_list("src").unwrap();
        for w in &words {
            store.lists().add_custom_word("src", w).unwrap();
        }

        let exported = store.lists().export_list_to_json("src").unwrap();
        store.lists().rename_custom_list("src", "held").unwrap();
        let name = store.lists().import_list_from_json(&exported).unwrap();

        prop_assert_eq!(name.as_str(), "src");
        prop_assert_eq!(
            store.lists().get_custom_list("src").unwrap(),
            store.lists().get_custom_list("held").unwrap()
        );
    }

    #[test]
    fn selection_never_holds_duplicates(ops in prop::collection::vec((0usize..4, any::<bool>()), 0..30)) {
        let (_kv, store) = fresh();
        let names = ["a", "b", "c", "d"];
        for (i, on) in ops {
            store.selection().set_list_selected(ListCategory::Custom, names[i], on).unwrap();
        }
        let mut selected = store.selection().get_selected_list_names(ListCategory::Custom).unwrap();
        let len = selected.len();
        selected.sort();
        selected.dedup();
        prop_assert_eq!(selected.len(), len);
    }
}

#[test]
fn fresh_store_returns_defaults_and_persists_them() {
    let (kv, store) = fresh();
    for setting in Setting::ALL {
        let value = store.settings().get(setting).unwrap();
        assert_eq!(value, Some(setting.default_value()));
        assert_eq!(
            kv.get(&setting.key()).unwrap(),
            Some(setting.default_value().to_string())
        );
    }
}

#[test]
fn stale_custom_selection_is_removed_from_storage() {
    let (kv, store) = fresh();
    store.lists().create_custom_list("x").unwrap();
    store.selection().set_list_selected(ListCategory::Custom, "x", true).unwrap();
    store.lists().delete_custom_list("x").unwrap();

    let selected = store.selection().get_selected_custom_list_names().unwrap();
    assert!(!selected.iter().any(|n| n == "x"));

    let raw = kv.get("selected_lists.custom").unwrap().unwrap();
    let stored: Vec<String> = serde_json::from_str(&raw).unwrap();
    assert!(!stored.iter().any(|n| n == "x"));
}

#[test]
fn edit_past_end_of_two_word_list_fails() {
    let (_kv, store) = fresh();
    store.lists().create_custom_list("x").unwrap();
    store.lists().add_custom_word("x", "one").unwrap();
    store.lists().add_custom_word("x", "two").unwrap();

    let err = store.lists().edit_custom_word("x", 5, "v").unwrap_err();
    assert!(matches!(err, StoreError::IndexOutOfBounds { .. }));
}
