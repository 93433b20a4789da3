//! Collision detection and resolution
//!
//! Hit-testing uses a shrunk "soft box": two bodies touch when their centers
//! are closer than `SOFT_BOX_FACTOR` of their summed extents on both axes.
//! Resolution applies damage, pickups, scoring and loot in a fixed order.

use glam::Vec2;

use super::difficulty::DifficultyModifier;
use super::rng::RandomSource;
use super::spawn::SpawnDirector;
use super::state::{Body, BulletOwner, ParticleColor, Player, PowerUpKind, World, WeaponTier};
use crate::consts::*;

/// Per-hit boss loot fires when a roll exceeds this divided by `drop`
pub const BOSS_HIT_DROP_THRESHOLD: f32 = 0.993;
/// Chance of a power-up from any kill, times `drop`
pub const BASE_DROP_CHANCE: f32 = 0.07;

/// Soft-box overlap test
pub fn soft_box_overlap(a: &Body, b: &Body) -> bool {
    let dist = (a.pos - b.pos).abs();
    let reach = (a.size + b.size) * SOFT_BOX_FACTOR;
    dist.x < reach.x && dist.y < reach.y
}

/// Outcome of damaging the player
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlayerHit {
    /// Shield soaked the hit
    Absorbed,
    /// One health lost, invulnerability started
    Wounded,
    /// Health reached zero
    Killed,
}

/// Apply one hit to the player
pub fn hit_player(player: &mut Player) -> PlayerHit {
    if player.shield > 0.0 {
        player.shield = (player.shield - SHIELD_HIT_COST).max(0.0);
        // Health unchanged, no invulnerability window
        return if player.body.health <= 0.0 {
            PlayerHit::Killed
        } else {
            PlayerHit::Absorbed
        };
    }

    player.body.health -= 1.0;
    player.invuln_ms = INVULN_MS;
    if player.body.health <= 0.0 {
        PlayerHit::Killed
    } else {
        PlayerHit::Wounded
    }
}

/// Apply a collected power-up
pub fn apply_power_up(player: &mut Player, kind: PowerUpKind) {
    match kind {
        PowerUpKind::Double => player.weapon = WeaponTier::Double,
        PowerUpKind::Triple => player.weapon = WeaponTier::Triple,
        PowerUpKind::Shield => player.shield = player.max_shield,
        PowerUpKind::Rate => {
            player.fire_rate_ms = (player.fire_rate_ms - RATE_UPGRADE_STEP).max(PLAYER_FIRE_RATE_FLOOR)
        }
        PowerUpKind::Repair => {
            player.body.health = (player.body.health + 1.0).min(player.body.max_health)
        }
    }
}

/// What happened during one resolution pass
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Resolution {
    /// Player lost health at least once (drives screen shake)
    pub wounded: bool,
    /// Player health reached zero
    pub player_dead: bool,
    pub kills: u32,
    pub boss_defeated: bool,
}

impl Resolution {
    fn record(&mut self, hit: PlayerHit) {
        match hit {
            PlayerHit::Absorbed => {}
            PlayerHit::Wounded => self.wounded = true,
            PlayerHit::Killed => {
                self.wounded = true;
                self.player_dead = true;
            }
        }
    }
}

/// Resolve every collision for this tick, then purge inactive entities
///
/// Order: player bullets vs enemies, enemy bullets vs player, enemy bodies
/// vs player, power-ups vs player.
///
/// Only the first `settled_bullets` bullets are hit-tested. Anything past
/// that index was fired this tick and waits for the next one.
pub fn resolve_collisions(
    world: &mut World,
    director: &mut SpawnDirector,
    score: &mut u64,
    m: &DifficultyModifier,
    rng: &mut impl RandomSource,
    settled_bullets: usize,
) -> Resolution {
    let mut out = Resolution::default();

    for bi in 0..settled_bullets.min(world.bullets.len()) {
        let (owner, body) = (world.bullets[bi].owner, world.bullets[bi].body);
        if !body.active {
            continue;
        }
        match owner {
            BulletOwner::Player => bullet_vs_enemies(world, bi, director, score, m, rng, &mut out),
            BulletOwner::Enemy => {
                if !world.player.is_invulnerable() && soft_box_overlap(&body, &world.player.body) {
                    world.bullets[bi].body.active = false;
                    out.record(hit_player(&mut world.player));
                }
            }
        }
    }

    for enemy in world.enemies.iter_mut() {
        if enemy.body.active
            && !world.player.is_invulnerable()
            && soft_box_overlap(&world.player.body, &enemy.body)
        {
            // The boss shrugs off rams
            if !enemy.is_boss() {
                enemy.body.active = false;
            }
            out.record(hit_player(&mut world.player));
        }
    }

    for power_up in world.power_ups.iter_mut() {
        if power_up.body.active && soft_box_overlap(&world.player.body, &power_up.body) {
            power_up.body.active = false;
            apply_power_up(&mut world.player, power_up.kind);
        }
    }

    world.purge_inactive();
    out
}

/// Test one player bullet against enemies; the first hit consumes it
fn bullet_vs_enemies(
    world: &mut World,
    bi: usize,
    director: &mut SpawnDirector,
    score: &mut u64,
    m: &DifficultyModifier,
    rng: &mut impl RandomSource,
    out: &mut Resolution,
) {
    let bullet_body = world.bullets[bi].body;
    let damage = world.bullets[bi].damage;

    let Some(ei) = world
        .enemies
        .iter()
        .position(|e| e.body.active && soft_box_overlap(&bullet_body, &e.body))
    else {
        return;
    };

    world.bullets[bi].body.active = false;
    let enemy = &mut world.enemies[ei];
    enemy.body.health -= damage;
    let (pos, kind, is_boss, dead, value) = (
        enemy.body.pos,
        enemy.kind,
        enemy.is_boss(),
        enemy.body.health <= 0.0,
        enemy.score_value,
    );
    if dead {
        enemy.body.active = false;
    }

    world.spawn_explosion(bullet_body.pos, 1, ParticleColor::Spark, rng);

    // Boss may shed loot on any hit; above `drop` ~142 this fires every time
    if is_boss && rng.next_f32() > BOSS_HIT_DROP_THRESHOLD / m.drop as f32 {
        let x = pos.x + rng.centered() * 150.0;
        world.spawn_random_power_up(Vec2::new(x, pos.y + 80.0), rng);
    }

    if !dead {
        return;
    }

    out.kills += 1;
    *score += value;
    world.spawn_explosion(pos, kind.explosion_size(), ParticleColor::Burst, rng);

    if is_boss {
        director.boss_defeated(*score);
        out.boss_defeated = true;
        log::info!("Boss defeated, score {}", score);
        apply_power_up(&mut world.player, PowerUpKind::Repair);
        for k in 0..2 {
            let x = pos.x + (k as f32 - 0.5) * 80.0;
            world.spawn_random_power_up(Vec2::new(x, pos.y), rng);
        }
    }

    if rng.next_f32() < BASE_DROP_CHANCE * m.drop as f32 {
        world.spawn_random_power_up(pos, rng);
    }
}
