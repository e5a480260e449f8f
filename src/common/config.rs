use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::warn;

use crate::engine::TrimMode;
use crate::host::storage::SettingsStore;

pub fn data_dir() -> PathBuf { dirs::home_dir().unwrap().join(".framefit") }
pub fn settings_file() -> PathBuf { data_dir().join("settings.json") }

/// The five persisted settings, each under a stable storage key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SettingKey {
    Mode,
    Padding,
    Gap,
    RemoveLastGap,
    RemoveAllGaps,
}

impl SettingKey {
    pub const ALL: [SettingKey; 5] = [
        SettingKey::Mode,
        SettingKey::Padding,
        SettingKey::Gap,
        SettingKey::RemoveLastGap,
        SettingKey::RemoveAllGaps,
    ];

    pub fn storage_key(self) -> &'static str {
        match self {
            SettingKey::Mode => "framefit.mode",
            SettingKey::Padding => "framefit.padding",
            SettingKey::Gap => "framefit.gap",
            SettingKey::RemoveLastGap => "framefit.remove-last-gap",
            SettingKey::RemoveAllGaps => "framefit.remove-all-gaps",
        }
    }
}

/// A sanitized setting value in canonical typed form. Numbers compare
/// numerically here, unlike raw JSON values where `2` and `2.0` differ.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SettingValue {
    Mode(TrimMode),
    Number(f64),
    Flag(bool),
}

impl SettingValue {
    pub fn to_json(self) -> Value {
        match self {
            SettingValue::Mode(mode) => Value::String(mode.to_string()),
            SettingValue::Number(n) => {
                serde_json::Number::from_f64(n).map(Value::Number).unwrap_or(Value::Null)
            }
            SettingValue::Flag(flag) => Value::Bool(flag),
        }
    }
}

/// User-configurable behavior for a batch resize, held in memory for the
/// session and mirrored to persistent storage.
#[derive(Serialize, Deserialize, Debug, PartialEq, Clone)]
#[serde(deny_unknown_fields)]
pub struct Settings {
    #[serde(default)]
    pub mode: TrimMode,
    #[serde(default)]
    pub padding: f64,
    #[serde(default)]
    pub gap: f64,
    #[serde(default)]
    pub remove_last_gap: bool,
    #[serde(default)]
    pub remove_all_gaps: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            mode: TrimMode::All,
            padding: 0.0,
            gap: 0.0,
            remove_last_gap: false,
            remove_all_gaps: false,
        }
    }
}

impl Settings {
    /// Loads every setting, sanitizing stored values and falling back to
    /// the built-in default when a key is absent or unreadable.
    pub fn load(store: &dyn SettingsStore) -> Settings {
        let mut settings = Settings::default();
        for key in SettingKey::ALL {
            match store.get(key.storage_key()) {
                Ok(Some(raw)) => {
                    let value = Settings::sanitize(key, &raw);
                    settings.apply(key, value);
                }
                Ok(None) => {}
                Err(err) => warn!("Failed to read setting {}: {err}", key.storage_key()),
            }
        }
        settings
    }

    /// Sanitized canonical form of a raw inbound value for `key`.
    pub fn sanitize(key: SettingKey, raw: &Value) -> SettingValue {
        match key {
            SettingKey::Mode => SettingValue::Mode(sanitize_mode(raw)),
            SettingKey::Padding | SettingKey::Gap => {
                SettingValue::Number(sanitize_non_negative(raw))
            }
            SettingKey::RemoveLastGap | SettingKey::RemoveAllGaps => {
                SettingValue::Flag(sanitize_flag(raw))
            }
        }
    }

    pub fn value(&self, key: SettingKey) -> SettingValue {
        match key {
            SettingKey::Mode => SettingValue::Mode(self.mode),
            SettingKey::Padding => SettingValue::Number(self.padding),
            SettingKey::Gap => SettingValue::Number(self.gap),
            SettingKey::RemoveLastGap => SettingValue::Flag(self.remove_last_gap),
            SettingKey::RemoveAllGaps => SettingValue::Flag(self.remove_all_gaps),
        }
    }

    /// Stores an already-sanitized value. Mismatched key/value shapes are
    /// ignored; `sanitize` never produces them.
    pub fn apply(&mut self, key: SettingKey, value: SettingValue) {
        match (key, value) {
            (SettingKey::Mode, SettingValue::Mode(mode)) => self.mode = mode,
            (SettingKey::Padding, SettingValue::Number(padding)) => self.padding = padding,
            (SettingKey::Gap, SettingValue::Number(gap)) => self.gap = gap,
            (SettingKey::RemoveLastGap, SettingValue::Flag(flag)) => self.remove_last_gap = flag,
            (SettingKey::RemoveAllGaps, SettingValue::Flag(flag)) => self.remove_all_gaps = flag,
            _ => {}
        }
    }
}

/// Accepts one of the seven mode tags; anything else falls back to
/// trimming all sides.
pub fn sanitize_mode(raw: &Value) -> TrimMode {
    match raw {
        Value::String(tag) => tag.parse().unwrap_or_default(),
        _ => TrimMode::default(),
    }
}

/// Coerces numeric-or-string input to a non-negative finite number;
/// anything else becomes 0.
pub fn sanitize_non_negative(raw: &Value) -> f64 {
    let num = match raw {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    };
    match num {
        Some(n) if n.is_finite() => n.max(0.0),
        _ => 0.0,
    }
}

/// Only the literal boolean `true` passes.
pub fn sanitize_flag(raw: &Value) -> bool { matches!(raw, Value::Bool(true)) }
