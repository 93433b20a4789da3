//! Game settings and preferences
//!
//! Persisted as a single JSON blob in LocalStorage, separate from the best score.

use serde::{Deserialize, Serialize};

/// LocalStorage keys shared with the host page
pub mod keys {
    pub const BEST_SCORE: &str = "voidrite_best_score";
    pub const SETTINGS: &str = "voidrite_settings";
}

/// How directional input drives the player craft
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ControlMode {
    /// Virtual stick adds analog input on top of the keyboard
    #[default]
    Joystick,
    /// Craft chases the touch point and fires continuously
    Drag,
}

/// Difficulty tier
///
/// Unrecognized stored values map to `Unknown`, which has its own fallback
/// multiplier set instead of failing the session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Difficulty {
    Easy,
    #[default]
    Mid,
    Hard,
    Unknown,
}

impl Difficulty {
    pub fn as_str(&self) -> &'static str {
        match self {
            Difficulty::Easy => "EASY",
            Difficulty::Mid => "MID",
            Difficulty::Hard => "HARD",
            Difficulty::Unknown => "UNKNOWN",
        }
    }

    /// Lenient parse: anything unrecognized becomes `Unknown`
    pub fn parse(s: &str) -> Self {
        match s.trim().to_lowercase().as_str() {
            "easy" => Difficulty::Easy,
            "mid" | "medium" => Difficulty::Mid,
            "hard" => Difficulty::Hard,
            _ => Difficulty::Unknown,
        }
    }
}

impl From<String> for Difficulty {
    fn from(s: String) -> Self {
        Difficulty::parse(&s)
    }
}

impl From<Difficulty> for String {
    fn from(d: Difficulty) -> Self {
        d.as_str().to_string()
    }
}

/// On-screen button size (consumed by the touch UI only)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ButtonSize {
    Small,
    Medium,
    #[default]
    Large,
}

/// Game settings/preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Settings {
    pub control_mode: ControlMode,

    // === Audio ===
    pub sound: bool,
    pub sfx: bool,

    // === Visual Effects ===
    /// Screen shake on player hits
    pub screen_shake: bool,
    /// Accessibility: suppresses shake
    pub reduced_effects: bool,

    pub difficulty: Difficulty,
    pub button_size: ButtonSize,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            control_mode: ControlMode::Joystick,
            sound: true,
            sfx: true,
            screen_shake: true,
            reduced_effects: false,
            difficulty: Difficulty::Mid,
            button_size: ButtonSize::Large,
        }
    }
}

impl Settings {
    /// Effective screen shake (respects reduced_effects)
    pub fn effective_screen_shake(&self) -> bool {
        self.screen_shake && !self.reduced_effects
    }

    /// Parse a stored settings blob. Missing fields take their defaults.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    /// Load settings from LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(Some(json)) = storage.get_item(keys::SETTINGS) {
                match Self::from_json(&json) {
                    Ok(settings) => {
                        log::info!("Loaded settings from LocalStorage");
                        return settings;
                    }
                    Err(e) => log::warn!("Discarding unreadable settings: {}", e),
                }
            }
        }

        log::info!("Using default settings");
        Self::default()
    }

    /// Save settings to LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn save(&self) {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(json) = self.to_json() {
                let _ = storage.set_item(keys::SETTINGS, &json);
                log::info!("Settings saved");
            }
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
