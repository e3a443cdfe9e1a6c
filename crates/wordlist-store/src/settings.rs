//! Typed accessors over the fixed set of persisted settings.
//!
//! Each setting is stored as a string under `settings.<name>`. Reading a
//! setting that was never written first stores its default, so the store is
//! mutated by reads. Stored strings are parsed leniently: a value that does
//! not parse yields `None` instead of an error, so a corrupted or hand-edited
//! entry never breaks the reader. Writes are not validated at all; strict
//! checking happens in [`SettingsSnapshot::validate`] at the point where
//! settings are consumed.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::error::{Result, StoreError};
use crate::handle::StoreHandle;
use crate::keys::setting_key;

/// One of the fixed settings.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Setting {
    /// How many times each word is shown per session.
    WordRepetitions,
    /// How long a word stays on screen; `0` means no timer.
    WordDisplayTime,
    /// Number of words drawn for one session.
    WordsPerSession,
    /// `NONE`, `MIN` or `MAX`.
    AssistanceLevel,
    /// Whether the learner clicks to advance.
    ClickForNextWord,
    /// `UPPERCASE` or `LOWERCASE`.
    WordDisplayCapitalization,
}

impl Setting {
    /// Every setting, in declaration order.
    pub const ALL: [Setting; 6] = [
        Setting::WordRepetitions,
        Setting::WordDisplayTime,
        Setting::WordsPerSession,
        Setting::AssistanceLevel,
        Setting::ClickForNextWord,
        Setting::WordDisplayCapitalization,
    ];

    /// The setting's persisted name.
    pub fn name(self) -> &'static str {
        match self {
            Setting::WordRepetitions => "wordRepetitions",
            Setting::WordDisplayTime => "wordDisplayTime",
            Setting::WordsPerSession => "wordsPerSession",
            Setting::AssistanceLevel => "assistanceLevel",
            Setting::ClickForNextWord => "clickForNextWord",
            Setting::WordDisplayCapitalization => "wordDisplayCapitalization",
        }
    }

    /// Storage key, e.g. `settings.wordRepetitions`.
    pub fn key(self) -> String {
        setting_key(self.name())
    }

    /// Value written on first read.
    pub fn default_value(self) -> SettingValue {
        match self {
            Setting::WordRepetitions => SettingValue::Int(1),
            Setting::WordDisplayTime => SettingValue::Int(0),
            Setting::WordsPerSession => SettingValue::Int(5),
            Setting::AssistanceLevel => SettingValue::Text("MAX".into()),
            Setting::ClickForNextWord => SettingValue::Bool(true),
            Setting::WordDisplayCapitalization => SettingValue::Text("UPPERCASE".into()),
        }
    }

    /// Parse a stored string. Returns `None` if it does not parse.
    pub fn parse(self, raw: &str) -> Option<SettingValue> {
        match self {
            Setting::WordRepetitions | Setting::WordDisplayTime | Setting::WordsPerSession => {
                parse_stored_int(raw).map(SettingValue::Int)
            }
            Setting::ClickForNextWord => parse_stored_bool(raw).map(SettingValue::Bool),
            Setting::AssistanceLevel | Setting::WordDisplayCapitalization => {
                Some(SettingValue::Text(raw.to_uppercase()))
            }
        }
    }
}

impl fmt::Display for Setting {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Setting {
    type Err = StoreError;

    fn from_str(s: &str) -> Result<Self> {
        Setting::ALL
            .into_iter()
            .find(|setting| setting.name() == s)
            .ok_or_else(|| StoreError::UnknownSetting { name: s.to_string() })
    }
}

/// A parsed setting value.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SettingValue {
    Int(i64),
    Bool(bool),
    Text(String),
}

impl SettingValue {
    pub fn as_int(&self) -> Option<i64> {
        match self {
            SettingValue::Int(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            SettingValue::Bool(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            SettingValue::Text(v) => Some(v),
            _ => None,
        }
    }
}

/// The stored string form.
impl fmt::Display for SettingValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SettingValue::Int(v) => write!(f, "{v}"),
            SettingValue::Bool(v) => write!(f, "{v}"),
            SettingValue::Text(v) => f.write_str(v),
        }
    }
}

impl From<i64> for SettingValue {
    fn from(v: i64) -> Self {
        SettingValue::Int(v)
    }
}

impl From<i32> for SettingValue {
    fn from(v: i32) -> Self {
        SettingValue::Int(i64::from(v))
    }
}

impl From<bool> for SettingValue {
    fn from(v: bool) -> Self {
        SettingValue::Bool(v)
    }
}

impl From<&str> for SettingValue {
    fn from(v: &str) -> Self {
        SettingValue::Text(v.to_string())
    }
}

impl From<String> for SettingValue {
    fn from(v: String) -> Self {
        SettingValue::Text(v)
    }
}

/// Lenient integer parse: leading whitespace, an optional sign, an optional
/// `0x`/`0X` prefix selecting hexadecimal, then the longest run of digits in
/// that radix. Anything after the digits is ignored.
fn parse_stored_int(raw: &str) -> Option<i64> {
    let s = raw.trim_start();
    let (negative, rest) = match s.as_bytes().first() {
        Some(b'-') => (true, &s[1..]),
        Some(b'+') => (false, &s[1..]),
        _ => (false, s),
    };
    let (radix, body) = match rest.get(..2) {
        Some("0x" | "0X") => (16, &rest[2..]),
        _ => (10, rest),
    };
    let len = body
        .bytes()
        .take_while(|b| char::from(*b).is_digit(radix))
        .count();
    if len == 0 {
        return None;
    }
    let magnitude = i128::from_str_radix(&body[..len], radix).ok()?;
    i64::try_from(if negative { -magnitude } else { magnitude }).ok()
}

fn parse_stored_bool(raw: &str) -> Option<bool> {
    match raw {
        "true" => Some(true),
        "false" => Some(false),
        _ => None,
    }
}

/// Reads and writes settings through a [`StoreHandle`].
#[derive(Clone, Debug)]
pub struct SettingsStore {
    handle: StoreHandle,
}

impl SettingsStore {
    pub fn new(handle: StoreHandle) -> Self {
        Self { handle }
    }

    /// Read a setting by name.
    ///
    /// Fails with [`StoreError::UnknownSetting`] for names outside the fixed
    /// set. Returns `Ok(None)` if the stored value does not parse.
    pub fn get_setting(&self, name: &str) -> Result<Option<SettingValue>> {
        self.get(name.parse()?)
    }

    /// Write a setting by name. The value is stored as-is.
    pub fn set_setting(&self, name: &str, value: impl Into<SettingValue>) -> Result<()> {
        self.set(name.parse()?, value)
    }

    /// Read a setting, storing its default first if it was never written.
    pub fn get(&self, setting: Setting) -> Result<Option<SettingValue>> {
        let key = setting.key();
        let raw = {
            let _guard = self.handle.lock()?;
            match self.handle.kv().get(&key)? {
                Some(raw) => raw,
                None => {
                    let default = setting.default_value().to_string();
                    debug!(setting = %setting, value = %default, "storing default setting");
                    self.handle.kv().set(&key, &default)?;
                    default
                }
            }
        };

        let parsed = setting.parse(&raw);
        if parsed.is_none() {
            warn!(setting = %setting, raw = %raw, "stored setting does not parse");
        }
        Ok(parsed)
    }

    /// Write a setting.
    pub fn set(&self, setting: Setting, value: impl Into<SettingValue>) -> Result<()> {
        let value = value.into().to_string();
        let _guard = self.handle.lock()?;
        debug!(setting = %setting, value = %value, "setting updated");
        self.handle.kv().set(&setting.key(), &value)?;
        Ok(())
    }

    /// Read every setting at once.
    pub fn snapshot(&self) -> Result<SettingsSnapshot> {
        let int = |s: Setting| -> Result<Option<i64>> { Ok(self.get(s)?.and_then(|v| v.as_int())) };
        let text = |s: Setting| -> Result<Option<String>> {
            Ok(self.get(s)?.and_then(|v| v.as_text().map(str::to_string)))
        };
        Ok(SettingsSnapshot {
            word_repetitions: int(Setting::WordRepetitions)?,
            word_display_time: int(Setting::WordDisplayTime)?,
            words_per_session: int(Setting::WordsPerSession)?,
            assistance_level: text(Setting::AssistanceLevel)?,
            click_for_next_word: self
                .get(Setting::ClickForNextWord)?
                .and_then(|v| v.as_bool()),
            word_display_capitalization: text(Setting::WordDisplayCapitalization)?,
        })
    }
}

/// All settings as read from the store, each `None` if it did not parse.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SettingsSnapshot {
    pub word_repetitions: Option<i64>,
    pub word_display_time: Option<i64>,
    pub words_per_session: Option<i64>,
    pub assistance_level: Option<String>,
    pub click_for_next_word: Option<bool>,
    pub word_display_capitalization: Option<String>,
}

/// How much help the learner gets.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum AssistanceLevel {
    None,
    Min,
    Max,
}

impl FromStr for AssistanceLevel {
    type Err = ();

    fn from_str(s: &str) -> std::result::Result<Self, ()> {
        match s {
            "NONE" => Ok(AssistanceLevel::None),
            "MIN" => Ok(AssistanceLevel::Min),
            "MAX" => Ok(AssistanceLevel::Max),
            _ => Err(()),
        }
    }
}

/// Letter case used when showing a word.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Capitalization {
    Uppercase,
    Lowercase,
}

impl FromStr for Capitalization {
    type Err = ();

    fn from_str(s: &str) -> std::result::Result<Self, ()> {
        match s {
            "UPPERCASE" => Ok(Capitalization::Uppercase),
            "LOWERCASE" => Ok(Capitalization::Lowercase),
            _ => Err(()),
        }
    }
}

/// Settings that passed strict validation.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidatedSettings {
    pub word_repetitions: u32,
    /// `None` when no display timer is set.
    pub word_display_time: Option<u32>,
    pub words_per_session: u32,
    pub assistance_level: AssistanceLevel,
    pub click_for_next_word: bool,
    pub word_display_capitalization: Capitalization,
}

impl SettingsSnapshot {
    /// Check every value against its recognized range or variants.
    pub fn validate(&self) -> Result<ValidatedSettings> {
        let word_repetitions = positive(Setting::WordRepetitions, self.word_repetitions)?;
        let words_per_session = positive(Setting::WordsPerSession, self.words_per_session)?;
        let word_display_time = match self.word_display_time {
            Some(0) => None,
            Some(t) => Some(
                u32::try_from(t).map_err(|_| invalid(Setting::WordDisplayTime, &t.to_string()))?,
            ),
            None => return Err(invalid(Setting::WordDisplayTime, "<unparsable>")),
        };
        let assistance_level = parse_text(Setting::AssistanceLevel, &self.assistance_level)?;
        let word_display_capitalization =
            parse_text(Setting::WordDisplayCapitalization, &self.word_display_capitalization)?;
        let click_for_next_word = self
            .click_for_next_word
            .ok_or_else(|| invalid(Setting::ClickForNextWord, "<unparsable>"))?;

        Ok(ValidatedSettings {
            word_repetitions,
            word_display_time,
            words_per_session,
            assistance_level,
            click_for_next_word,
            word_display_capitalization,
        })
    }
}

fn invalid(setting: Setting, value: &str) -> StoreError {
    StoreError::InvalidSetting {
        name: setting.name().to_string(),
        value: value.to_string(),
    }
}

fn positive(setting: Setting, value: Option<i64>) -> Result<u32> {
    match value {
        Some(v) if v >= 1 => u32::try_from(v).map_err(|_| invalid(setting, &v.to_string())),
        Some(v) => Err(invalid(setting, &v.to_string())),
        None => Err(invalid(setting, "<unparsable>")),
    }
}

fn parse_text<T: FromStr>(setting: Setting, value: &Option<String>) -> Result<T> {
    let raw = value
        .as_deref()
        .ok_or_else(|| invalid(setting, "<unparsable>"))?;
    raw.parse().map_err(|_| invalid(setting, raw))
}
