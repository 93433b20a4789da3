//! Boss phase state machine and attack table
//!
//! Phase selection (`BossPhase::next`) is kept apart from what each phase
//! fires (`PhaseProfile`), so tuning one never touches the other.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::rng::RandomSource;

/// Boss fire interval before any phase override (divided by difficulty `fire`)
pub const BOSS_BASE_FIRE_RATE: f64 = 1000.0;

/// Boss attack phase, ordered by escalation
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default, Serialize, Deserialize)]
pub enum BossPhase {
    #[default]
    One = 1,
    Two = 2,
    Three = 3,
    Four = 4,
}

impl BossPhase {
    pub fn number(self) -> u8 {
        self as u8
    }

    /// Highest phase whose health threshold is satisfied
    pub fn for_health(fraction: f32) -> Self {
        if fraction < 0.2 {
            BossPhase::Four
        } else if fraction < 0.5 {
            BossPhase::Three
        } else if fraction < 0.8 {
            BossPhase::Two
        } else {
            BossPhase::One
        }
    }

    /// Transition function; never steps back to an earlier phase
    pub fn next(self, fraction: f32) -> Self {
        self.max(Self::for_health(fraction))
    }

    pub fn profile(self) -> PhaseProfile {
        PHASE_TABLE[self as usize - 1]
    }
}

/// Shape of one volley
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum AttackPattern {
    /// Narrow downward fan; bullet `i` gets `vx = i * step` for `i` in `-half..=half`
    Fan { half: i32, step: f32, speed: f32, muzzle: f32 },
    /// Full circle burst whose rotation advances with time
    Ring { count: u32, speed: f32, spin: f64 },
    /// One shot whose horizontal velocity oscillates with time
    Sweep { amplitude: f32, frequency: f64, speed: f32, muzzle: f32 },
    /// Random horizontal spread and speed
    Scatter { count: u32, spread: f32, min_speed: f32, speed_range: f32 },
}

/// What a phase fires and how often
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PhaseProfile {
    pub pattern: AttackPattern,
    /// Replaces the boss fire interval after each volley in this phase
    pub fire_rate_ms: Option<f64>,
}

const PHASE_TABLE: [PhaseProfile; 4] = [
    PhaseProfile {
        pattern: AttackPattern::Fan { half: 2, step: 2.0, speed: 5.0, muzzle: 80.0 },
        fire_rate_ms: None,
    },
    PhaseProfile {
        pattern: AttackPattern::Ring { count: 14, speed: 5.0, spin: 0.0006 },
        fire_rate_ms: Some(1200.0),
    },
    PhaseProfile {
        pattern: AttackPattern::Sweep { amplitude: 8.0, frequency: 0.004, speed: 9.0, muzzle: 80.0 },
        fire_rate_ms: Some(250.0),
    },
    PhaseProfile {
        pattern: AttackPattern::Scatter { count: 6, spread: 18.0, min_speed: 4.0, speed_range: 9.0 },
        fire_rate_ms: Some(350.0),
    },
];

impl AttackPattern {
    /// Bullets (position, velocity) for one volley fired from `origin`
    pub fn volley(
        &self,
        origin: Vec2,
        time_ms: f64,
        rng: &mut impl RandomSource,
    ) -> Vec<(Vec2, Vec2)> {
        match *self {
            AttackPattern::Fan { half, step, speed, muzzle } => (-half..=half)
                .map(|i| (origin + Vec2::new(0.0, muzzle), Vec2::new(i as f32 * step, speed)))
                .collect(),
            AttackPattern::Ring { count, speed, spin } => (0..count)
                .map(|i| {
                    let angle = (i as f64 / count as f64) * std::f64::consts::TAU + time_ms * spin;
                    let dir = Vec2::new(angle.cos() as f32, angle.sin() as f32);
                    (origin, dir * speed)
                })
                .collect(),
            AttackPattern::Sweep { amplitude, frequency, speed, muzzle } => {
                let vx = (time_ms * frequency).sin() as f32 * amplitude;
                vec![(origin + Vec2::new(0.0, muzzle), Vec2::new(vx, speed))]
            }
            AttackPattern::Scatter { count, spread, min_speed, speed_range } => (0..count)
                .map(|_| {
                    let vx = rng.centered() * spread;
                    let vy = min_speed + rng.next_f32() * speed_range;
                    (origin, Vec2::new(vx, vy))
                })
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::rng::ScriptedRng;

    #[test]
    fn test_phase_thresholds() {
        assert_eq!(BossPhase::for_health(1.0), BossPhase::One);
        assert_eq!(BossPhase::for_health(0.8), BossPhase::One);
        assert_eq!(BossPhase::for_health(0.79), BossPhase::Two);
        assert_eq!(BossPhase::for_health(0.49), BossPhase::Three);
        assert_eq!(BossPhase::for_health(0.19), BossPhase::Four);
        assert_eq!(BossPhase::for_health(-0.5), BossPhase::Four);
    }

    #[test]
    fn test_phase_never_decreases() {
        let mut phase = BossPhase::One;
        let mut last = phase;
        for step in (0..=100).rev() {
            phase = phase.next(step as f32 / 100.0);
            assert!(phase >= last);
            last = phase;
        }
        assert_eq!(phase, BossPhase::Four);
        // Health going back up does not regress the phase
        assert_eq!(phase.next(1.0), BossPhase::Four);
    }

    #[test]
    fn test_volley_sizes() {
        let mut rng = ScriptedRng::constant(0.5);
        let origin = Vec2::new(225.0, 180.0);
        let counts: Vec<usize> = [BossPhase::One, BossPhase::Two, BossPhase::Three, BossPhase::Four]
            .iter()
            .map(|p| p.profile().pattern.volley(origin, 0.0, &mut rng).len())
            .collect();
        assert_eq!(counts, vec![5, 14, 1, 6]);
    }

    #[test]
    fn test_fan_is_symmetric_and_downward() {
        let mut rng = ScriptedRng::constant(0.5);
        let shots = BossPhase::One
            .profile()
            .pattern
            .volley(Vec2::ZERO, 0.0, &mut rng);
        let sum_vx: f32 = shots.iter().map(|(_, v)| v.x).sum();
        assert!(sum_vx.abs() < 1e-6);
        assert!(shots.iter().all(|(p, v)| v.y > 0.0 && p.y == 80.0));
    }

    #[test]
    fn test_phase_fire_rates() {
        assert_eq!(BossPhase::One.profile().fire_rate_ms, None);
        assert_eq!(BossPhase::Two.profile().fire_rate_ms, Some(1200.0));
        assert_eq!(BossPhase::Three.profile().fire_rate_ms, Some(250.0));
        assert_eq!(BossPhase::Four.profile().fire_rate_ms, Some(350.0));
    }
}
