//! Voidrite - a vertical arcade shooter simulation core
//!
//! Core modules:
//! - `sim`: Deterministic fixed-step simulation (entities, spawning, collisions, boss logic)
//! - `settings`: Player configuration, persisted as a JSON blob
//! - `best_score`: Best raw score record
//!
//! Rendering, input capture and asset loading live outside this crate. A host
//! writes input intents into [`sim::Engine::input`], calls [`sim::Engine::update`]
//! once per display frame and reads back the entity store and HUD snapshot.

pub mod best_score;
pub mod settings;
pub mod sim;

pub use best_score::BestScore;
pub use settings::{ButtonSize, ControlMode, Difficulty, Settings};

/// Game configuration constants
pub mod consts {
    /// Fixed simulation timestep in milliseconds (60 Hz)
    pub const TICK_MS: f64 = 1000.0 / 60.0;
    /// Wall-clock gaps longer than this are dropped instead of caught up
    pub const STALE_FRAME_MS: f64 = 100.0;

    /// Virtual play-field dimensions
    pub const FIELD_WIDTH: f32 = 450.0;
    pub const FIELD_HEIGHT: f32 = 800.0;

    /// Player movement: acceleration per tick of full input, and per-tick damping
    pub const PLAYER_SPEED: f32 = 0.4;
    pub const PLAYER_ACCEL_SCALE: f32 = 2.1;
    pub const PLAYER_DAMPING: f32 = 0.85;
    /// Drag mode pursues the touch point at this fraction of the gap per tick
    pub const DRAG_PURSUIT: f32 = 0.4;
    /// Safe rectangle insets
    pub const PLAYER_MARGIN_X: f32 = 20.0;
    pub const PLAYER_MARGIN_Y: f32 = 50.0;
    pub const PLAYER_SIZE: f32 = 36.0;
    pub const PLAYER_MAX_HEALTH: f32 = 3.0;
    pub const PLAYER_MAX_SHIELD: f32 = 100.0;

    /// Player fire interval (ms) and its upgrade floor
    pub const PLAYER_FIRE_RATE: f64 = 200.0;
    pub const PLAYER_FIRE_RATE_FLOOR: f64 = 60.0;
    pub const RATE_UPGRADE_STEP: f64 = 20.0;

    /// Damage rules
    pub const SHIELD_HIT_COST: f32 = 35.0;
    pub const INVULN_MS: f64 = 2000.0;
    pub const SHAKE_MS: f64 = 400.0;

    /// First boss appears once raw score passes this value
    pub const BOSS_THRESHOLD: f64 = 5000.0;
    /// Raw score that must elapse after a boss death (divided by accel)
    pub const BOSS_COOLDOWN: f64 = 12000.0;
    /// Threshold increment after each boss spawn (divided by accel)
    pub const BOSS_THRESHOLD_STEP: f64 = 15000.0;
    /// Boss stops descending at this y
    pub const BOSS_REST_Y: f32 = 180.0;

    /// Soft-box fraction of summed extents
    pub const SOFT_BOX_FACTOR: f32 = 0.38;

    /// Background star count
    pub const STAR_COUNT: usize = 80;
}
