//! Spawn director: enemy cadence and boss scheduling
//!
//! Progression is driven by the scaled score (raw score x difficulty
//! `accel`), so harder tiers ramp up sooner without changing the displayed
//! score.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::boss::{BOSS_BASE_FIRE_RATE, BossPhase};
use super::difficulty::DifficultyModifier;
use super::rng::RandomSource;
use super::state::{Body, Enemy, EnemyKind, World};
use crate::consts::*;

/// Slowest and fastest regular spawn intervals (ms, before `fire`)
pub const BASE_SPAWN_INTERVAL: f64 = 1800.0;
pub const MIN_SPAWN_INTERVAL: f64 = 350.0;
pub const SPAWN_INTERVAL_STEP: f64 = 150.0;
/// Regular enemy fire interval (ms, before `fire`)
pub const BASE_ENEMY_FIRE_RATE: f64 = 2800.0;
pub const MIN_ENEMY_FIRE_RATE: f64 = 600.0;
pub const ENEMY_FIRE_RATE_STEP: f64 = 250.0;
/// Scaled score per progression step
pub const PROGRESSION_STEP: f64 = 3500.0;
/// Scaled score at which enemy health has doubled
pub const HEALTH_RAMP: f64 = 35000.0;

/// Spawn timing state
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpawnDirector {
    pub spawn_timer_ms: f64,
    pub boss_active: bool,
    /// Raw score when the last boss died
    pub last_boss_score: u64,
    /// Raw score the next boss waits for
    pub boss_spawn_threshold: f64,
}

impl Default for SpawnDirector {
    fn default() -> Self {
        Self {
            spawn_timer_ms: 0.0,
            boss_active: false,
            last_boss_score: 0,
            boss_spawn_threshold: BOSS_THRESHOLD,
        }
    }
}

/// Monotonic step count derived from scaled score
pub fn progression_factor(score: u64, m: &DifficultyModifier) -> f64 {
    (m.scaled_score(score) / PROGRESSION_STEP).floor()
}

/// Regular spawn interval for the current progression
pub fn spawn_interval_ms(score: u64, m: &DifficultyModifier) -> f64 {
    let progression = progression_factor(score, m);
    ((BASE_SPAWN_INTERVAL - progression * SPAWN_INTERVAL_STEP) / m.fire).max(MIN_SPAWN_INTERVAL)
}

/// Fire interval given to a freshly spawned regular enemy
pub fn enemy_fire_rate_ms(score: u64, m: &DifficultyModifier) -> f64 {
    let progression = progression_factor(score, m);
    (BASE_ENEMY_FIRE_RATE - progression * ENEMY_FIRE_RATE_STEP).max(MIN_ENEMY_FIRE_RATE) / m.fire
}

/// Pick an enemy kind from a uniform roll, gated by scaled score
pub fn roll_enemy_kind(scaled_score: f64, roll: f32) -> EnemyKind {
    if scaled_score > 15000.0 && roll > 0.8 {
        EnemyKind::Guardian
    } else if scaled_score > 5000.0 && roll > 0.7 {
        EnemyKind::Skimmer
    } else {
        EnemyKind::Drone
    }
}

/// Boss max health at the given raw score
pub fn boss_health(score: u64, m: &DifficultyModifier) -> f32 {
    ((EnemyKind::Boss.base_health() as f64 + score as f64 / 1.5) * m.hp) as f32
}

impl SpawnDirector {
    /// Run spawn decisions for one tick
    pub fn update(
        &mut self,
        world: &mut World,
        score: u64,
        time_ms: f64,
        m: &DifficultyModifier,
        rng: &mut impl RandomSource,
    ) {
        if self.boss_active {
            return;
        }

        if self.boss_due(score, m) {
            self.spawn_boss(world, score, time_ms, m);
            self.boss_spawn_threshold += BOSS_THRESHOLD_STEP / m.accel;
            return;
        }

        self.spawn_timer_ms += TICK_MS;
        if self.spawn_timer_ms > spawn_interval_ms(score, m) {
            self.spawn_timer_ms = 0.0;
            spawn_enemy(world, score, time_ms, m, rng);
        }
    }

    /// Threshold reached and enough score since the last boss died
    pub fn boss_due(&self, score: u64, m: &DifficultyModifier) -> bool {
        score as f64 >= self.boss_spawn_threshold
            && score.saturating_sub(self.last_boss_score) as f64 > BOSS_COOLDOWN / m.accel
    }

    fn spawn_boss(&mut self, world: &mut World, score: u64, time_ms: f64, m: &DifficultyModifier) {
        self.boss_active = true;
        let health = boss_health(score, m);
        let kind = EnemyKind::Boss;
        let id = world.next_entity_id();
        world.enemies.push(Enemy {
            id,
            body: Body::new(
                Vec2::new(FIELD_WIDTH / 2.0, -300.0),
                Vec2::new(0.0, 0.5),
                Vec2::splat(kind.size()),
                health,
            ),
            kind,
            score_value: kind.score_value(),
            last_shot_ms: time_ms,
            fire_rate_ms: BOSS_BASE_FIRE_RATE / m.fire,
            phase: Some(BossPhase::One),
        });
        log::info!("Boss {} spawned at score {} with {:.0} hp", id, score, health);
    }

    /// Called when the boss dies
    pub fn boss_defeated(&mut self, score: u64) {
        self.boss_active = false;
        self.last_boss_score = score;
    }
}

/// Spawn one regular enemy above the visible area
pub fn spawn_enemy(
    world: &mut World,
    score: u64,
    time_ms: f64,
    m: &DifficultyModifier,
    rng: &mut impl RandomSource,
) {
    let scaled = m.scaled_score(score);
    let kind = roll_enemy_kind(scaled, rng.next_f32());
    let hp_scale = (1.0 + scaled / HEALTH_RAMP) * m.hp;
    let health = (kind.base_health() as f64 * hp_scale) as f32;

    let x = rng.next_f32() * (FIELD_WIDTH - 100.0) + 50.0;
    let vx = rng.centered() * 1.5;
    let vy = 1.0 + rng.next_f32() * 1.5;
    // Jitter so simultaneous spawns don't fire in lockstep
    let last_shot_ms = time_ms + rng.next_f32() as f64 * 1000.0;

    let id = world.next_entity_id();
    world.enemies.push(Enemy {
        id,
        body: Body::new(
            Vec2::new(x, -80.0),
            Vec2::new(vx, vy),
            Vec2::splat(kind.size()),
            health,
        ),
        kind,
        score_value: kind.score_value(),
        last_shot_ms,
        fire_rate_ms: enemy_fire_rate_ms(score, m),
        phase: None,
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::Difficulty;
    use crate::sim::rng::ScriptedRng;

    fn world() -> World {
        World::new(&mut ScriptedRng::constant(0.5))
    }

    #[test]
    fn test_spawn_interval_shrinks_and_floors() {
        let m = Difficulty::Easy.modifier();
        let early = spawn_interval_ms(0, &m);
        let later = spawn_interval_ms(20000, &m);
        assert_eq!(early, 1800.0);
        assert!(later < early);
        assert_eq!(spawn_interval_ms(10_000_000, &m), MIN_SPAWN_INTERVAL);
    }

    #[test]
    fn test_enemy_fire_rate_floor_divided_by_fire() {
        let m = Difficulty::Hard.modifier();
        let rate = enemy_fire_rate_ms(10_000_000, &m);
        assert!((rate - MIN_ENEMY_FIRE_RATE / m.fire).abs() < 1e-9);
    }

    #[test]
    fn test_roll_enemy_kind_gates() {
        assert_eq!(roll_enemy_kind(0.0, 0.99), EnemyKind::Drone);
        assert_eq!(roll_enemy_kind(6000.0, 0.75), EnemyKind::Skimmer);
        assert_eq!(roll_enemy_kind(6000.0, 0.95), EnemyKind::Skimmer);
        assert_eq!(roll_enemy_kind(16000.0, 0.95), EnemyKind::Guardian);
        assert_eq!(roll_enemy_kind(16000.0, 0.75), EnemyKind::Skimmer);
        assert_eq!(roll_enemy_kind(16000.0, 0.5), EnemyKind::Drone);
    }

    #[test]
    fn test_regular_spawn_cadence() {
        let m = Difficulty::Mid.modifier();
        let mut director = SpawnDirector::default();
        let mut w = world();
        let mut rng = ScriptedRng::constant(0.5);
        // 1800 / 1.4 ~= 1285.7ms interval => spawn on the 78th tick
        for _ in 0..77 {
            director.update(&mut w, 0, 0.0, &m, &mut rng);
        }
        assert!(w.enemies.is_empty());
        director.update(&mut w, 0, 0.0, &m, &mut rng);
        assert_eq!(w.enemies.len(), 1);
        assert_eq!(director.spawn_timer_ms, 0.0);
    }

    #[test]
    fn test_spawned_drone_stats() {
        let m = Difficulty::Easy.modifier();
        let mut w = world();
        spawn_enemy(&mut w, 0, 1000.0, &m, &mut ScriptedRng::constant(0.5));
        let e = &w.enemies[0];
        assert_eq!(e.kind, EnemyKind::Drone);
        assert_eq!(e.body.health, 10.0);
        assert_eq!(e.score_value, 100);
        assert_eq!(e.body.pos, Vec2::new(225.0, -80.0));
        assert_eq!(e.last_shot_ms, 1500.0);
        assert_eq!(e.fire_rate_ms, 2800.0);
    }

    #[test]
    fn test_boss_spawn_at_threshold() {
        let m = Difficulty::Hard.modifier();
        let mut director = SpawnDirector::default();
        let mut w = world();
        let mut rng = ScriptedRng::constant(0.5);

        director.update(&mut w, 4999, 0.0, &m, &mut rng);
        assert!(w.boss().is_none());

        director.update(&mut w, 5000, 0.0, &m, &mut rng);
        let boss = w.boss().expect("boss spawned");
        let expected = ((6500.0 + 5000.0 / 1.5) * m.hp) as f32;
        assert_eq!(boss.body.max_health, expected);
        assert_eq!(boss.phase, Some(BossPhase::One));
        assert!(director.boss_active);
        assert!((director.boss_spawn_threshold - (5000.0 + 15000.0 / 2.5)).abs() < 1e-9);

        // Nothing else spawns while the boss lives
        for score in 5001..6000 {
            director.update(&mut w, score, 0.0, &m, &mut rng);
        }
        assert_eq!(w.enemies.len(), 1);
    }

    #[test]
    fn test_boss_waits_for_cooldown() {
        // EASY cooldown is 12000 / 1.3 ~= 9231 raw score
        let m = Difficulty::Easy.modifier();
        let director = SpawnDirector::default();
        assert!(!director.boss_due(5000, &m));
        assert!(director.boss_due(9300, &m));

        let mut after_kill = SpawnDirector::default();
        after_kill.boss_defeated(20000);
        after_kill.boss_spawn_threshold = 25000.0;
        assert!(!after_kill.boss_due(25000, &m));
        assert!(after_kill.boss_due(29300, &m));
    }
}
