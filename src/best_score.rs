//! Best score record
//!
//! Stored as a raw (unscaled) score string under its own LocalStorage key.

use serde::{Deserialize, Serialize};

#[cfg(target_arch = "wasm32")]
use crate::settings::keys;

/// Best raw score achieved across runs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct BestScore {
    pub raw: u64,
}

impl BestScore {
    pub fn new(raw: u64) -> Self {
        Self { raw }
    }

    /// Parse a stored value; anything unreadable counts as no record
    pub fn parse(stored: &str) -> Self {
        let raw = stored
            .trim()
            .parse::<f64>()
            .ok()
            .filter(|v| v.is_finite() && *v > 0.0)
            .map(|v| v as u64)
            .unwrap_or(0);
        Self { raw }
    }

    /// Raise the record if `score` beats it. Returns true on a new record.
    pub fn record(&mut self, score: u64) -> bool {
        if score > self.raw {
            self.raw = score;
            true
        } else {
            false
        }
    }

    /// Value shown on the HUD
    pub fn display(&self) -> u64 {
        self.raw / 10
    }

    /// Load best score from LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(Some(stored)) = storage.get_item(keys::BEST_SCORE) {
                let best = Self::parse(&stored);
                log::info!("Loaded best score {}", best.raw);
                return best;
            }
        }

        log::info!("No best score found, starting fresh");
        Self::default()
    }

    /// Save best score to LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn save(&self) {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            let _ = storage.set_item(keys::BEST_SCORE, &self.raw.to_string());
            log::info!("Best score saved ({})", self.raw);
        }
    }

    /// Native stubs
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load() -> Self {
        Self::default()
    }

    #[cfg(not(target_arch = "wasm32"))]
    pub fn save(&self) {
        // No-op for native
    }
}
