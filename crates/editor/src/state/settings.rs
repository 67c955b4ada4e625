//! Editor settings

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Pointer and viewport interaction settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InteractionSettings {
    /// Screen distance a press must travel before it becomes a drag
    pub drag_threshold_px: f64,
    /// Wheel zoom factor per notch
    pub zoom_step: f64,
    /// Screen radius around the first boundary point that closes the path
    pub boundary_close_radius_px: f64,
    /// Empty fraction left on each side by fit-to-view
    pub fit_margin: f64,
}

impl Default for InteractionSettings {
    fn default() -> Self {
        Self {
            drag_threshold_px: 5.0,
            zoom_step: 1.1,
            boundary_close_radius_px: 10.0,
            fit_margin: 0.1,
        }
    }
}

/// Rotation step sizes in degrees
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RotationSettings {
    /// Batch rotate action
    pub batch_step_degrees: f64,
    /// First step when a rotation key goes down
    pub key_initial_step_degrees: f64,
    /// Each repeat tick while the key stays down
    pub key_repeat_step_degrees: f64,
}

impl Default for RotationSettings {
    fn default() -> Self {
        Self {
            batch_step_degrees: 15.0,
            key_initial_step_degrees: 15.0,
            key_repeat_step_degrees: 4.0,
        }
    }
}

/// Held-key repeat timing
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct KeyRepeatSettings {
    pub initial_delay_ms: u64,
    pub interval_ms: u64,
}

impl Default for KeyRepeatSettings {
    fn default() -> Self {
        Self {
            initial_delay_ms: 1000,
            interval_ms: 100,
        }
    }
}

impl KeyRepeatSettings {
    pub fn initial_delay(&self) -> Duration {
        Duration::from_millis(self.initial_delay_ms)
    }

    pub fn interval(&self) -> Duration {
        Duration::from_millis(self.interval_ms.max(1))
    }
}

/// Background image scale adjustment (relative factors)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BackgroundSettings {
    pub scale_initial_step: f64,
    pub scale_repeat_step: f64,
}

impl Default for BackgroundSettings {
    fn default() -> Self {
        Self {
            scale_initial_step: 0.05,
            scale_repeat_step: 0.01,
        }
    }
}

/// Undo history
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HistorySettings {
    pub max_depth: usize,
}

impl Default for HistorySettings {
    fn default() -> Self {
        Self { max_depth: 100 }
    }
}

/// Marker visibility
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplaySettings {
    pub show_entrance: bool,
    pub show_exit: bool,
}

impl Default for DisplaySettings {
    fn default() -> Self {
        Self {
            show_entrance: true,
            show_exit: true,
        }
    }
}

/// All editor settings
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct EditorSettings {
    #[serde(default)]
    pub interaction: InteractionSettings,
    #[serde(default)]
    pub rotation: RotationSettings,
    #[serde(default)]
    pub key_repeat: KeyRepeatSettings,
    #[serde(default)]
    pub background: BackgroundSettings,
    #[serde(default)]
    pub history: HistorySettings,
    #[serde(default)]
    pub display: DisplaySettings,
}

impl EditorSettings {
    fn config_path() -> Option<PathBuf> {
        directories::ProjectDirs::from("com", "playarea", "playarea-editor")
            .map(|dirs| dirs.config_dir().join("settings.json"))
    }

    /// Load settings from file, or return default if not found
    pub fn load() -> Self {
        if let Some(path) = Self::config_path() {
            if let Ok(json) = std::fs::read_to_string(&path) {
                match serde_json::from_str(&json) {
                    Ok(settings) => return settings,
                    Err(e) => tracing::warn!("Ignoring unreadable settings at {}: {e}", path.display()),
                }
            }
        }
        Self::default()
    }

    /// Save settings to file. Failures are logged, never fatal.
    pub fn save(&self) {
        let Some(path) = Self::config_path() else {
            tracing::warn!("No config directory, settings not saved");
            return;
        };
        if let Err(e) = self.write_to(&path) {
            tracing::warn!("Failed to save settings to {}: {e}", path.display());
        }
    }

    /// Write pretty JSON to `path`, creating parent directories
    pub fn write_to(&self, path: &Path) -> std::io::Result<()> {
        if let Some(dir) = path.parent() {
            std::fs::create_dir_all(dir)?;
        }
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)
    }
}
