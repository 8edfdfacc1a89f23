use crate::hotkey::{parse_hotkey, Hotkey};
use eframe::egui::Key;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

/// File name of the settings file inside the user's home directory.
pub const SETTINGS_FILE: &str = ".overlay_notes_settings.json";

pub fn settings_path() -> PathBuf {
    dirs_next::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(SETTINGS_FILE)
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Settings {
    /// When enabled the application initialises the logger at debug level.
    #[serde(default)]
    pub debug_logging: bool,
    /// Write log output to this file instead of stderr.
    #[serde(default)]
    pub log_file: Option<String>,
    /// Quiet period in milliseconds before edits are flushed to disk.
    #[serde(default = "default_autosave_ms")]
    pub autosave_ms: u64,
    /// Last known window position. If absent, a default position is used.
    #[serde(default = "default_window_pos")]
    pub window_pos: Option<(i32, i32)>,
    #[serde(default = "default_window_size")]
    pub window_size: Option<(i32, i32)>,
    /// Start with the window kept above all others.
    #[serde(default = "default_true")]
    pub start_pinned: bool,
    #[serde(default = "default_save_hotkey")]
    pub save_hotkey: Option<String>,
    #[serde(default = "default_open_hotkey")]
    pub open_hotkey: Option<String>,
    /// Shortcut for toggling click-through. This is the only way back once
    /// the window ignores the mouse.
    #[serde(default = "default_click_through_hotkey")]
    pub click_through_hotkey: Option<String>,
    #[serde(default = "default_pin_hotkey")]
    pub pin_hotkey: Option<String>,
    /// Flush a pending autosave when the window closes.
    #[serde(default = "default_true")]
    pub save_on_exit: bool,
    /// Store the window position in this file on exit.
    #[serde(default = "default_true")]
    pub remember_window_pos: bool,
    /// Alpha of the panel backgrounds, `0` is fully see-through.
    #[serde(default = "default_background_alpha")]
    pub background_alpha: u8,
}

fn default_true() -> bool {
    true
}

fn default_autosave_ms() -> u64 {
    2000
}

fn default_window_pos() -> Option<(i32, i32)> {
    Some((50, 50))
}

fn default_window_size() -> Option<(i32, i32)> {
    Some((600, 320))
}

fn default_save_hotkey() -> Option<String> {
    Some("Ctrl+S".into())
}

fn default_open_hotkey() -> Option<String> {
    Some("Ctrl+O".into())
}

fn default_click_through_hotkey() -> Option<String> {
    Some("Ctrl+T".into())
}

fn default_pin_hotkey() -> Option<String> {
    Some("Ctrl+P".into())
}

fn default_background_alpha() -> u8 {
    150
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            debug_logging: false,
            log_file: None,
            autosave_ms: default_autosave_ms(),
            window_pos: default_window_pos(),
            window_size: default_window_size(),
            start_pinned: true,
            save_hotkey: default_save_hotkey(),
            open_hotkey: default_open_hotkey(),
            click_through_hotkey: default_click_through_hotkey(),
            pin_hotkey: default_pin_hotkey(),
            save_on_exit: true,
            remember_window_pos: true,
            background_alpha: default_background_alpha(),
        }
    }
}

impl Settings {
    pub fn load(path: &str) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path).unwrap_or_default();
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        Ok(serde_json::from_str(&content)?)
    }

    pub fn save(&self, path: &str) -> anyhow::Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)?;
        Ok(())
    }

    pub fn autosave_delay(&self) -> Duration {
        Duration::from_millis(self.autosave_ms)
    }

    pub fn save_hotkey(&self) -> Hotkey {
        resolve_hotkey("save_hotkey", &self.save_hotkey, Hotkey::ctrl(Key::S))
    }

    pub fn open_hotkey(&self) -> Hotkey {
        resolve_hotkey("open_hotkey", &self.open_hotkey, Hotkey::ctrl(Key::O))
    }

    pub fn click_through_hotkey(&self) -> Hotkey {
        resolve_hotkey(
            "click_through_hotkey",
            &self.click_through_hotkey,
            Hotkey::ctrl(Key::T),
        )
    }

    pub fn pin_hotkey(&self) -> Hotkey {
        resolve_hotkey("pin_hotkey", &self.pin_hotkey, Hotkey::ctrl(Key::P))
    }
}

fn resolve_hotkey(name: &str, value: &Option<String>, fallback: Hotkey) -> Hotkey {
    if let Some(hotkey) = value {
        match parse_hotkey(hotkey) {
            Some(k) => return k,
            None => {
                tracing::warn!(
                    "provided {} string '{}' is invalid; using default {}",
                    name,
                    hotkey,
                    fallback
                );
            }
        }
    }
    fallback
}
