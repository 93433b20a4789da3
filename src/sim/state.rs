//! Entity store and core simulation types
//!
//! Plain data only. Behavior lives in the updaters; the store just owns the
//! collections and hands out entity IDs.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::boss::BossPhase;
use super::rng::RandomSource;
use crate::consts::*;

pub type EntityId = u32;

/// Simulation lifecycle state, settable by the host
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SimState {
    #[default]
    Start,
    Playing,
    Paused,
    GameOver,
}

/// Shared kinematic and lifecycle fields of every entity
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Body {
    pub pos: Vec2,
    pub vel: Vec2,
    /// Bounding box width/height, centered on `pos`
    pub size: Vec2,
    /// Soft-delete marker; inactive entities are purged at end of tick
    pub active: bool,
    pub health: f32,
    pub max_health: f32,
}

impl Body {
    pub fn new(pos: Vec2, vel: Vec2, size: Vec2, health: f32) -> Self {
        Self {
            pos,
            vel,
            size,
            active: true,
            health,
            max_health: health,
        }
    }

    /// Advance position by one tick of velocity
    pub fn integrate(&mut self) {
        self.pos += self.vel;
    }

    pub fn health_fraction(&self) -> f32 {
        if self.max_health <= 0.0 {
            0.0
        } else {
            self.health / self.max_health
        }
    }
}

/// Player weapon upgrade level
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default, Serialize, Deserialize)]
pub enum WeaponTier {
    #[default]
    Single = 1,
    Double = 2,
    Triple = 3,
}

impl WeaponTier {
    pub fn level(self) -> u8 {
        self as u8
    }
}

/// The player's craft
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Player {
    pub body: Body,
    /// 0..=max_shield; absorbs hits before health
    pub shield: f32,
    pub max_shield: f32,
    /// Minimum ms between shots
    pub fire_rate_ms: f64,
    /// Sim time of the last shot (None until the first shot)
    pub last_shot_ms: Option<f64>,
    pub weapon: WeaponTier,
    /// Remaining invulnerability after a health-loss hit
    pub invuln_ms: f64,
}

impl Default for Player {
    fn default() -> Self {
        Self {
            body: Body::new(
                Self::spawn_point(),
                Vec2::ZERO,
                Vec2::splat(PLAYER_SIZE),
                PLAYER_MAX_HEALTH,
            ),
            shield: 0.0,
            max_shield: PLAYER_MAX_SHIELD,
            fire_rate_ms: PLAYER_FIRE_RATE,
            last_shot_ms: None,
            weapon: WeaponTier::Single,
            invuln_ms: 0.0,
        }
    }
}

impl Player {
    pub fn spawn_point() -> Vec2 {
        Vec2::new(FIELD_WIDTH / 2.0, FIELD_HEIGHT * 0.85)
    }

    /// Restore every field to its initial value
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    pub fn is_invulnerable(&self) -> bool {
        self.invuln_ms > 0.0
    }

    /// Safe rectangle the craft is clamped to (min, max)
    pub fn safe_rect() -> (Vec2, Vec2) {
        (
            Vec2::new(PLAYER_MARGIN_X, PLAYER_MARGIN_Y),
            Vec2::new(FIELD_WIDTH - PLAYER_MARGIN_X, FIELD_HEIGHT - PLAYER_MARGIN_Y),
        )
    }
}

/// Who fired a bullet; picks the collision target set
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BulletOwner {
    Player,
    Enemy,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Bullet {
    pub id: EntityId,
    /// Health is pinned to 1; only `active` matters
    pub body: Body,
    pub owner: BulletOwner,
    pub damage: f32,
}

/// Enemy types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EnemyKind {
    Drone,
    Skimmer,
    Guardian,
    Boss,
}

impl EnemyKind {
    /// Health before progression/difficulty scaling
    pub fn base_health(self) -> f32 {
        match self {
            EnemyKind::Drone => 10.0,
            EnemyKind::Skimmer => 20.0,
            EnemyKind::Guardian => 60.0,
            EnemyKind::Boss => 6500.0,
        }
    }

    pub fn size(self) -> f32 {
        match self {
            EnemyKind::Drone | EnemyKind::Skimmer => 45.0,
            EnemyKind::Guardian => 60.0,
            EnemyKind::Boss => 220.0,
        }
    }

    pub fn score_value(self) -> u64 {
        match self {
            EnemyKind::Drone | EnemyKind::Skimmer => 100,
            EnemyKind::Guardian => 400,
            EnemyKind::Boss => 10000,
        }
    }

    /// Particles in the death explosion
    pub fn explosion_size(self) -> usize {
        match self {
            EnemyKind::Boss => 120,
            _ => 12,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Enemy {
    pub id: EntityId,
    pub body: Body,
    pub kind: EnemyKind,
    pub score_value: u64,
    /// Sim time of the last volley (may be in the future to stagger spawns)
    pub last_shot_ms: f64,
    pub fire_rate_ms: f64,
    /// Boss only
    pub phase: Option<BossPhase>,
}

impl Enemy {
    pub fn is_boss(&self) -> bool {
        self.kind == EnemyKind::Boss
    }
}

/// Power-up types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PowerUpKind {
    Double,
    Triple,
    Shield,
    Rate,
    Repair,
}

impl PowerUpKind {
    pub const ALL: [PowerUpKind; 5] = [
        PowerUpKind::Double,
        PowerUpKind::Triple,
        PowerUpKind::Shield,
        PowerUpKind::Rate,
        PowerUpKind::Repair,
    ];
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PowerUp {
    pub id: EntityId,
    pub body: Body,
    pub kind: PowerUpKind,
}

/// Particle palette
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ParticleColor {
    /// White impact spark
    Spark,
    /// Neon green explosion debris
    Burst,
}

/// A particle for visual effects
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Particle {
    pub id: EntityId,
    pub body: Body,
    pub life: f32, // 1 -> 0
    pub max_life: f32,
    pub color: ParticleColor,
    pub size: f32,
}

/// Background star (cosmetic)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Star {
    pub pos: Vec2,
    pub speed: f32,
}

impl Star {
    fn random(rng: &mut impl RandomSource) -> Self {
        Self {
            pos: Vec2::new(rng.next_f32() * FIELD_WIDTH, rng.next_f32() * FIELD_HEIGHT),
            speed: rng.next_f32() * 2.0 + 0.5,
        }
    }
}

/// Player bullet damage and speed (pixels per tick)
pub const PLAYER_BULLET_DAMAGE: f32 = 10.0;
pub const PLAYER_BULLET_SPEED: f32 = -17.0;
/// Enemy bullets always deal one "hit"
pub const ENEMY_BULLET_DAMAGE: f32 = 1.0;
pub const POWER_UP_SIZE: f32 = 36.0;
pub const POWER_UP_FALL_SPEED: f32 = 1.5;
pub const PARTICLE_DECAY: f32 = 0.02;

/// Complete mutable entity state
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct World {
    pub player: Player,
    pub bullets: Vec<Bullet>,
    pub enemies: Vec<Enemy>,
    pub power_ups: Vec<PowerUp>,
    pub particles: Vec<Particle>,
    pub stars: Vec<Star>,
    next_id: EntityId,
}

impl World {
    pub fn new(rng: &mut impl RandomSource) -> Self {
        let mut world = Self {
            player: Player::default(),
            bullets: Vec::new(),
            enemies: Vec::new(),
            power_ups: Vec::new(),
            particles: Vec::new(),
            stars: Vec::with_capacity(STAR_COUNT),
            next_id: 1,
        };
        world.seed_stars(rng);
        world
    }

    /// Reinitialize everything; the player is reset in place
    pub fn reset(&mut self, rng: &mut impl RandomSource) {
        self.player.reset();
        self.bullets.clear();
        self.enemies.clear();
        self.power_ups.clear();
        self.particles.clear();
        self.next_id = 1;
        self.seed_stars(rng);
    }

    fn seed_stars(&mut self, rng: &mut impl RandomSource) {
        self.stars.clear();
        for _ in 0..STAR_COUNT {
            self.stars.push(Star::random(rng));
        }
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> EntityId {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    pub fn spawn_bullet(&mut self, pos: Vec2, vel: Vec2, owner: BulletOwner, damage: f32) {
        let size = match owner {
            BulletOwner::Player => Vec2::new(5.0, 20.0),
            BulletOwner::Enemy => Vec2::splat(12.0),
        };
        let id = self.next_entity_id();
        self.bullets.push(Bullet {
            id,
            body: Body::new(pos, vel, size, 1.0),
            owner,
            damage,
        });
    }

    pub fn spawn_enemy_bullet(&mut self, pos: Vec2, vel: Vec2) {
        self.spawn_bullet(pos, vel, BulletOwner::Enemy, ENEMY_BULLET_DAMAGE);
    }

    pub fn spawn_power_up(&mut self, pos: Vec2, kind: PowerUpKind) {
        let id = self.next_entity_id();
        self.power_ups.push(PowerUp {
            id,
            body: Body::new(
                pos,
                Vec2::new(0.0, POWER_UP_FALL_SPEED),
                Vec2::splat(POWER_UP_SIZE),
                1.0,
            ),
            kind,
        });
    }

    /// Drop a power-up of uniformly random kind
    pub fn spawn_random_power_up(&mut self, pos: Vec2, rng: &mut impl RandomSource) {
        let kind = PowerUpKind::ALL[rng.index(PowerUpKind::ALL.len())];
        self.spawn_power_up(pos, kind);
    }

    pub fn spawn_explosion(
        &mut self,
        pos: Vec2,
        count: usize,
        color: ParticleColor,
        rng: &mut impl RandomSource,
    ) {
        for _ in 0..count {
            let vel = Vec2::new(rng.centered() * 14.0, rng.centered() * 14.0);
            let size = rng.next_f32() * 6.0 + 1.0;
            let id = self.next_entity_id();
            self.particles.push(Particle {
                id,
                body: Body::new(pos, vel, Vec2::splat(3.0), 1.0),
                life: 1.0,
                max_life: 1.0,
                color,
                size,
            });
        }
    }

    /// The active boss, if any
    pub fn boss(&self) -> Option<&Enemy> {
        self.enemies.iter().find(|e| e.is_boss())
    }

    /// Drop every deactivated non-player entity
    pub fn purge_inactive(&mut self) {
        self.bullets.retain(|b| b.body.active);
        self.enemies.retain(|e| e.body.active);
        self.power_ups.retain(|p| p.body.active);
        self.particles.retain(|p| p.body.active);
    }
}
