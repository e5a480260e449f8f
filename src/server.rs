use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, warn};

use crate::common::config::{SettingKey, Settings};
use crate::engine::{TrimMode, resize_selected_frames};
use crate::host::shell::HostShell;
use crate::host::storage::SettingsStore;
use crate::model::SceneNode;

pub const MIN_UI_WIDTH: f64 = 290.0;
pub const MAX_UI_WIDTH: f64 = 290.0;
pub const MIN_UI_HEIGHT: f64 = 220.0;
pub const MAX_UI_HEIGHT: f64 = 900.0;

/// Messages from the settings form. Save requests carry raw values; the
/// controller sanitizes before use or storage.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(tag = "type", rename_all = "kebab-case", rename_all_fields = "camelCase")]
pub enum UiRequest {
    UiSize {
        width: f64,
        height: f64,
    },
    UiReady,
    SaveMode {
        #[serde(default)]
        mode: Value,
    },
    SavePadding {
        #[serde(default)]
        padding: Value,
    },
    SaveGap {
        #[serde(default)]
        gap: Value,
    },
    SaveRemoveLastGap {
        #[serde(default)]
        remove_last_gap: Value,
    },
    SaveRemoveAllGaps {
        #[serde(default)]
        remove_all_gaps: Value,
    },
    Resize {
        #[serde(default)]
        mode: Value,
        #[serde(default)]
        padding: Value,
        #[serde(default)]
        gap: Value,
        #[serde(default)]
        remove_last_gap: Value,
        #[serde(default)]
        remove_all_gaps: Value,
    },
}

/// State pushed back to the settings form.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(tag = "type", rename_all = "kebab-case", rename_all_fields = "camelCase")]
pub enum UiUpdate {
    SelectionInfo {
        frame_count: usize,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        total_count: Option<usize>,
    },
    SetMode { mode: TrimMode },
    SetPadding { padding: f64 },
    SetGap { gap: f64 },
    SetRemoveLastGap { remove_last_gap: bool },
    SetRemoveAllGaps { remove_all_gaps: bool },
}

/// Message-driven front of the engine: owns the in-memory settings,
/// mirrors them to the store, and keeps the settings form in sync.
pub struct Controller<S> {
    settings: Settings,
    store: S,
    ui_ready: bool,
}

impl<S: SettingsStore> Controller<S> {
    /// Loads settings from the store. State pushes are withheld until the
    /// form signals ready.
    pub fn new(store: S) -> Controller<S> {
        let settings = Settings::load(&store);
        Controller { settings, store, ui_ready: false }
    }

    pub fn settings(&self) -> &Settings { &self.settings }

    /// Handles one inbound message against the current selection.
    pub fn handle(
        &mut self,
        msg: UiRequest,
        selection: &mut [SceneNode],
        shell: &mut dyn HostShell,
    ) {
        match msg {
            UiRequest::UiSize { width, height } => {
                if let Some((w, h)) = clamp_ui_size(width, height) {
                    shell.resize_ui(w, h);
                }
            }
            UiRequest::UiReady => {
                self.ui_ready = true;
                self.push_selection_info(selection, shell);
                for key in SettingKey::ALL {
                    self.push_setting(key, shell);
                }
            }
            UiRequest::SaveMode { mode } => self.save_setting(SettingKey::Mode, &mode),
            UiRequest::SavePadding { padding } => self.save_setting(SettingKey::Padding, &padding),
            UiRequest::SaveGap { gap } => self.save_setting(SettingKey::Gap, &gap),
            UiRequest::SaveRemoveLastGap { remove_last_gap } => {
                self.save_setting(SettingKey::RemoveLastGap, &remove_last_gap)
            }
            UiRequest::SaveRemoveAllGaps { remove_all_gaps } => {
                self.save_setting(SettingKey::RemoveAllGaps, &remove_all_gaps)
            }
            UiRequest::Resize { mode, padding, gap, remove_last_gap, remove_all_gaps } => {
                self.save_setting(SettingKey::Mode, &mode);
                self.save_setting(SettingKey::Padding, &padding);
                self.save_setting(SettingKey::Gap, &gap);
                self.save_setting(SettingKey::RemoveLastGap, &remove_last_gap);
                self.save_setting(SettingKey::RemoveAllGaps, &remove_all_gaps);

                let summary = resize_selected_frames(selection, &self.settings);
                debug!("Batch finished: {summary:?}");
                shell.notify(&summary.to_string());
                if summary.total > 0 {
                    self.push_selection_info(selection, shell);
                }
            }
        }
    }

    /// Host callback for selection changes.
    pub fn selection_changed(&mut self, selection: &[SceneNode], shell: &mut dyn HostShell) {
        self.push_selection_info(selection, shell);
    }

    /// Sanitizes, stores in memory, and persists best-effort. Values that
    /// do not change are not rewritten, and the form is not echoed back.
    fn save_setting(&mut self, key: SettingKey, raw: &Value) {
        let value = Settings::sanitize(key, raw);
        if self.settings.value(key) == value {
            return;
        }
        self.settings.apply(key, value);
        if let Err(err) = self.store.set(key.storage_key(), &value.to_json()) {
            warn!("Failed to persist setting {}: {err}", key.storage_key());
        }
    }

    fn push_selection_info(&self, selection: &[SceneNode], shell: &mut dyn HostShell) {
        let frame_count = selection.iter().filter(|node| node.is_frame()).count();
        shell.post_update(UiUpdate::SelectionInfo {
            frame_count,
            total_count: Some(selection.len()),
        });
    }

    fn push_setting(&self, key: SettingKey, shell: &mut dyn HostShell) {
        if !self.ui_ready {
            return;
        }
        let update = match key {
            SettingKey::Mode => UiUpdate::SetMode { mode: self.settings.mode },
            SettingKey::Padding => UiUpdate::SetPadding { padding: self.settings.padding },
            SettingKey::Gap => UiUpdate::SetGap { gap: self.settings.gap },
            SettingKey::RemoveLastGap => UiUpdate::SetRemoveLastGap {
                remove_last_gap: self.settings.remove_last_gap,
            },
            SettingKey::RemoveAllGaps => UiUpdate::SetRemoveAllGaps {
                remove_all_gaps: self.settings.remove_all_gaps,
            },
        };
        shell.post_update(update);
    }
}

/// Rounds and clamps a requested form size. `None` for sizes the host
/// would reject outright.
fn clamp_ui_size(width: f64, height: f64) -> Option<(u32, u32)> {
    let w = width.round().clamp(MIN_UI_WIDTH, MAX_UI_WIDTH);
    let h = height.round().clamp(MIN_UI_HEIGHT, MAX_UI_HEIGHT);
    if !w.is_finite() || !h.is_finite() {
        return None;
    }
    Some((w as u32, h as u32))
}
