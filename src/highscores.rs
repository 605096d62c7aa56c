//! Best score record
//!
//! Persisted as a plain base-10 string so other tools can read it.

use serde::{Deserialize, Serialize};

use crate::persistence::Storage;

/// Best score seen across all sessions
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BestScore {
    pub value: u32,
}

impl BestScore {
    /// Storage key
    pub const STORAGE_KEY: &'static str = "moon-hopper-best";

    pub fn new(value: u32) -> Self {
        Self { value }
    }

    /// Parse a stored value. Missing, negative or garbage values read as 0;
    /// trailing junk after leading digits is ignored.
    pub fn parse(stored: Option<&str>) -> u32 {
        let Some(stored) = stored else {
            return 0;
        };
        let trimmed = stored.trim_start();
        let digits_end = trimmed
            .find(|c: char| !c.is_ascii_digit())
            .unwrap_or(trimmed.len());
        trimmed[..digits_end].parse().unwrap_or(0)
    }

    /// Load the best score; any storage failure reads as 0
    pub fn load<S: Storage + ?Sized>(storage: &S) -> Self {
        match storage.get(Self::STORAGE_KEY) {
            Ok(stored) => {
                let value = Self::parse(stored.as_deref());
                log::info!("Loaded best score {}", value);
                Self::new(value)
            }
            Err(err) => {
                log::warn!("Could not read best score, starting from 0: {}", err);
                Self::default()
            }
        }
    }

    /// Save the best score; failures are logged and otherwise ignored
    pub fn save<S: Storage + ?Sized>(&self, storage: &mut S) {
        match storage.set(Self::STORAGE_KEY, &self.value.to_string()) {
            Ok(()) => log::info!("Best score saved ({})", self.value),
            Err(err) => log::warn!("Could not save best score: {}", err),
        }
    }
}
