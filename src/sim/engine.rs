//! Simulation engine: owns all mutable game state and runs ticks
//!
//! Tick order is fixed: player, bullets, enemies, power-ups, particles,
//! background, collisions, spawn director, timers. Bullets fired during a
//! tick are first hit-tested on the next one.

use serde::{Deserialize, Serialize};

use super::behavior::{
    update_background, update_bullets, update_enemies, update_particles, update_player,
    update_power_ups,
};
use super::clock::FixedClock;
use super::collision::resolve_collisions;
use super::difficulty::DifficultyModifier;
use super::input::InputIntent;
use super::rng::{RandomSource, SimRng};
use super::spawn::SpawnDirector;
use super::state::{Enemy, SimState, World};
use crate::consts::*;
use crate::settings::Settings;

/// Values the HUD displays
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HudSnapshot {
    /// Raw score / 10
    pub score: u64,
    /// Best raw score / 10
    pub best_score: u64,
    pub lives: u32,
    pub shield: f32,
}

/// One play session
pub struct Engine<R = SimRng> {
    settings: Settings,
    world: World,
    director: SpawnDirector,
    clock: FixedClock,
    rng: R,
    state: SimState,
    /// Raw score; +1 per tick plus kill rewards
    score: u64,
    best_score: u64,
    /// Simulation time, advanced one tick at a time
    time_ms: f64,
    shake_ms: f64,
    /// Written by the host, copied at the start of each tick
    pub input: InputIntent,
}

impl Engine<SimRng> {
    /// Create an engine with a seeded PCG stream
    pub fn new(settings: Settings, best_score: u64, seed: u64) -> Self {
        Self::with_rng(settings, best_score, SimRng::new(seed))
    }
}

impl<R: RandomSource> Engine<R> {
    pub fn with_rng(settings: Settings, best_score: u64, mut rng: R) -> Self {
        let world = World::new(&mut rng);
        log::info!(
            "Engine created: difficulty={}, control={:?}",
            settings.difficulty.as_str(),
            settings.control_mode
        );
        Self {
            settings,
            world,
            director: SpawnDirector::default(),
            clock: FixedClock::new(),
            rng,
            state: SimState::Start,
            score: 0,
            best_score,
            time_ms: 0.0,
            shake_ms: 0.0,
            input: InputIntent::default(),
        }
    }

    /// Per-frame entry point. Returns the number of fixed ticks consumed.
    pub fn update(&mut self, now_ms: f64) -> u32 {
        let ticks = self.clock.advance(now_ms);
        for _ in 0..ticks {
            self.step();
        }
        ticks
    }

    /// Advance exactly one tick (no-op unless playing)
    pub fn step(&mut self) {
        if self.state != SimState::Playing {
            return;
        }

        let input = self.input;
        let m = self.modifier();
        let world = &mut self.world;
        // Bullets past this index are fired during this tick
        let settled_bullets = world.bullets.len();

        update_player(world, &input, self.settings.control_mode, self.time_ms);
        update_bullets(world);
        update_enemies(world, self.time_ms, &mut self.rng);
        update_power_ups(world);
        update_particles(world);
        update_background(world, &mut self.rng);

        let resolution = resolve_collisions(
            world,
            &mut self.director,
            &mut self.score,
            &m,
            &mut self.rng,
            settled_bullets,
        );
        if resolution.wounded {
            self.shake_ms = SHAKE_MS;
        }

        self.director
            .update(world, self.score, self.time_ms, &m, &mut self.rng);

        self.shake_ms = (self.shake_ms - TICK_MS).max(0.0);
        let player = &mut world.player;
        player.invuln_ms = (player.invuln_ms - TICK_MS).max(0.0);

        world.purge_inactive();
        self.score += 1;
        self.time_ms += TICK_MS;
        self.best_score = self.best_score.max(self.score);

        if resolution.player_dead {
            self.state = SimState::GameOver;
            log::info!("Game over at score {}", self.score);
        }
    }

    /// Reset every mutable field and start playing. Settings are kept.
    pub fn restart(&mut self) {
        self.rng.reset();
        self.world.reset(&mut self.rng);
        self.director = SpawnDirector::default();
        self.score = 0;
        self.time_ms = 0.0;
        self.shake_ms = 0.0;
        self.clock.resync();
        self.state = SimState::Playing;
        log::info!("Run restarted");
    }

    pub fn state(&self) -> SimState {
        self.state
    }

    /// Host-driven state change. Entering `Playing` re-syncs the clock so
    /// time spent paused is never caught up.
    pub fn set_state(&mut self, state: SimState) {
        if state == SimState::Playing && self.state != SimState::Playing {
            self.clock.resync();
        }
        self.state = state;
    }

    pub fn pause(&mut self) {
        if self.state == SimState::Playing {
            self.set_state(SimState::Paused);
        }
    }

    pub fn resume(&mut self) {
        if self.state == SimState::Paused {
            self.set_state(SimState::Playing);
        }
    }

    pub fn hud(&self) -> HudSnapshot {
        let player = &self.world.player;
        HudSnapshot {
            score: self.score / 10,
            best_score: self.best_score / 10,
            lives: player.body.health.max(0.0) as u32,
            shield: player.shield,
        }
    }

    /// Difficulty multipliers for the current settings
    pub fn modifier(&self) -> DifficultyModifier {
        self.settings.difficulty.modifier()
    }

    /// Whether the presentation should offset the frame this tick
    pub fn shake_active(&self) -> bool {
        self.shake_ms > 0.0 && self.settings.effective_screen_shake()
    }

    pub fn world(&self) -> &World {
        &self.world
    }

    pub fn boss(&self) -> Option<&Enemy> {
        self.world.boss()
    }

    pub fn director(&self) -> &SpawnDirector {
        &self.director
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn score(&self) -> u64 {
        self.score
    }

    pub fn best_score(&self) -> u64 {
        self.best_score
    }

    pub fn time_ms(&self) -> f64 {
        self.time_ms
    }
}
