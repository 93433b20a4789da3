//! Difficulty scaling multipliers

use serde::{Deserialize, Serialize};

use crate::settings::Difficulty;

/// Multipliers applied across the simulation for a difficulty tier
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DifficultyModifier {
    /// Enemy and boss max health
    pub hp: f64,
    /// Divides enemy fire intervals and the spawn interval
    pub fire: f64,
    /// Multiplies power-up drop chances
    pub drop: f64,
    /// Multiplies score for progression curves ("scaled score")
    pub accel: f64,
}

impl DifficultyModifier {
    pub const EASY: Self = Self { hp: 1.0, fire: 1.0, drop: 1.2, accel: 1.3 };
    pub const MID: Self = Self { hp: 1.5, fire: 1.4, drop: 1.0, accel: 1.8 };
    pub const HARD: Self = Self { hp: 2.2, fire: 1.8, drop: 0.7, accel: 2.5 };
    /// Used for unrecognized difficulty values
    pub const FALLBACK: Self = Self { hp: 1.0, fire: 1.0, drop: 1.0, accel: 1.3 };

    /// Look up the multipliers for a tier. Cheap enough to call every tick.
    pub fn for_difficulty(difficulty: Difficulty) -> Self {
        match difficulty {
            Difficulty::Easy => Self::EASY,
            Difficulty::Mid => Self::MID,
            Difficulty::Hard => Self::HARD,
            Difficulty::Unknown => Self::FALLBACK,
        }
    }

    /// Raw score scaled by progression acceleration
    pub fn scaled_score(&self, score: u64) -> f64 {
        score as f64 * self.accel
    }
}

impl Difficulty {
    pub fn modifier(self) -> DifficultyModifier {
        DifficultyModifier::for_difficulty(self)
    }
}
