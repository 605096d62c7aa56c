//! Player preferences
//!
//! Persisted separately from the best score as a small JSON record.

use serde::{Deserialize, Serialize};

use crate::persistence::Storage;
use crate::sim::Difficulty;

/// Game settings/preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Selected difficulty preset
    pub difficulty: Difficulty,
    /// Background music on/off
    pub music_on: bool,
    /// Music volume (0.0 - 1.0)
    pub music_volume: f32,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            difficulty: Difficulty::Classic,
            music_on: false,
            music_volume: 1.0,
        }
    }
}

impl Settings {
    /// Storage key
    const STORAGE_KEY: &'static str = "moon-hopper-settings";

    pub fn set_music_volume(&mut self, volume: f32) {
        self.music_volume = volume.clamp(0.0, 1.0);
    }

    /// Load settings, falling back to defaults on any problem
    pub fn load<S: Storage + ?Sized>(storage: &S) -> Self {
        match storage.get(Self::STORAGE_KEY) {
            Ok(Some(json)) => match serde_json::from_str::<Settings>(&json) {
                Ok(mut settings) => {
                    settings.set_music_volume(settings.music_volume);
                    log::info!("Loaded settings");
                    return settings;
                }
                Err(err) => log::warn!("Ignoring corrupt settings: {}", err),
            },
            Ok(None) => {}
            Err(err) => log::warn!("Could not read settings: {}", err),
        }

        log::info!("Using default settings");
        Self::default()
    }

    /// Save settings; failures are logged
    pub fn save<S: Storage + ?Sized>(&self, storage: &mut S) {
        let json = match serde_json::to_string(self) {
            Ok(json) => json,
            Err(err) => {
                log::warn!("Could not encode settings: {}", err);
                return;
            }
        };
        match storage.set(Self::STORAGE_KEY, &json) {
            Ok(()) => log::info!("Settings saved"),
            Err(err) => log::warn!("Could not save settings: {}", err),
        }
    }
}
