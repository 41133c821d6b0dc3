//! Game settings and preferences
//!
//! Persisted as JSON next to the user's home directory. Load failures of
//! any kind fall back to defaults; the game never refuses to start over a
//! bad settings file.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    /// Master volume (0.0 - 1.0)
    pub master_volume: f32,
    /// Sound effects volume (0.0 - 1.0)
    pub sfx_volume: f32,
    /// Background music volume (0.0 - 1.0)
    pub music_volume: f32,
    /// Mute everything
    pub mute: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            master_volume: 0.8,
            sfx_volume: 1.0,
            music_volume: 0.5,
            mute: false,
        }
    }
}

impl Settings {
    /// Music volume after master/mute are applied
    pub fn effective_music_volume(&self) -> f32 {
        if self.mute {
            0.0
        } else {
            (self.music_volume * self.master_volume).clamp(0.0, 1.0)
        }
    }

    /// Effects volume after master/mute are applied
    pub fn effective_sfx_volume(&self) -> f32 {
        if self.mute {
            0.0
        } else {
            (self.sfx_volume * self.master_volume).clamp(0.0, 1.0)
        }
    }

    fn path() -> PathBuf {
        let home = std::env::var("HOME").unwrap_or_else(|_| ".".to_string());
        PathBuf::from(home).join(".fruitfall_settings.json")
    }

    pub fn load() -> Self {
        match std::fs::read_to_string(Self::path()) {
            Ok(json) => match serde_json::from_str(&json) {
                Ok(settings) => {
                    log::info!("loaded settings from {}", Self::path().display());
                    settings
                }
                Err(e) => {
                    log::warn!("bad settings file, using defaults: {e}");
                    Self::default()
                }
            },
            Err(_) => Self::default(),
        }
    }

    pub fn save(&self) {
        match serde_json::to_string_pretty(self) {
            Ok(json) => {
                if let Err(e) = std::fs::write(Self::path(), json) {
                    log::warn!("failed to save settings: {e}");
                }
            }
            Err(e) => log::warn!("failed to serialize settings: {e}"),
        }
    }
}
