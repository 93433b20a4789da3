//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - Rolls come from the engine's random source only
//! - Stable iteration order (insertion order of each collection)
//! - No rendering or platform dependencies

pub mod behavior;
pub mod boss;
pub mod clock;
pub mod collision;
pub mod difficulty;
pub mod engine;
pub mod input;
pub mod rng;
pub mod spawn;
pub mod state;

pub use boss::{AttackPattern, BossPhase, PhaseProfile};
pub use clock::FixedClock;
pub use collision::{PlayerHit, Resolution, apply_power_up, hit_player, soft_box_overlap};
pub use difficulty::DifficultyModifier;
pub use engine::{Engine, HudSnapshot};
pub use input::{DirectionalKeys, InputIntent, Joystick};
pub use rng::{RandomSource, ScriptedRng, SimRng};
pub use spawn::SpawnDirector;
pub use state::{
    Body, Bullet, BulletOwner, Enemy, EnemyKind, EntityId, Particle, ParticleColor, Player,
    PowerUp, PowerUpKind, SimState, Star, WeaponTier, World,
};
