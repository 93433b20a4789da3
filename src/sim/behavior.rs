//! Per-entity update rules
//!
//! Each updater advances one collection by a single tick. Anything an
//! updater spawns is pushed to the store immediately but is only tested for
//! collisions on the following tick.

use glam::Vec2;

use super::input::InputIntent;
use super::rng::RandomSource;
use super::state::{BulletOwner, Player, PLAYER_BULLET_DAMAGE, PLAYER_BULLET_SPEED, World, WeaponTier};
use crate::consts::*;
use crate::settings::ControlMode;

/// Bullets leaving the field by more than this are dropped
pub const BULLET_MARGIN: f32 = 100.0;
/// Enemies are dropped this far below the bottom edge
pub const ENEMY_EXIT_MARGIN: f32 = 400.0;
/// Power-ups are dropped this far below the bottom edge
pub const POWER_UP_EXIT_MARGIN: f32 = 100.0;

/// Move the player from input and auto-fire
pub fn update_player(world: &mut World, input: &InputIntent, mode: ControlMode, time_ms: f64) {
    steer_player(&mut world.player, input, mode);

    let player = &mut world.player;
    player.body.integrate();
    let (min, max) = Player::safe_rect();
    player.body.pos = player.body.pos.clamp(min, max);

    // Drag mode fires continuously
    let wants_fire = mode == ControlMode::Drag || input.wants_fire();
    let ready = player
        .last_shot_ms
        .is_none_or(|last| time_ms - last > player.fire_rate_ms);
    if wants_fire && ready {
        player.last_shot_ms = Some(time_ms);
        fire_player_weapon(world);
    }
}

/// Set player velocity for this tick
fn steer_player(player: &mut Player, input: &InputIntent, mode: ControlMode) {
    let stick = input.joystick;

    if mode == ControlMode::Drag && stick.active {
        let target = Vec2::new(stick.target_x, stick.target_y);
        player.body.vel = (target - player.body.pos) * DRAG_PURSUIT;
        return;
    }

    let mut dir = if stick.active {
        Vec2::new(stick.x, stick.y)
    } else {
        Vec2::ZERO
    };
    dir += input.keys.axis();

    // Keyboard diagonals are normalized; analog input keeps its magnitude
    if dir.x != 0.0 && dir.y != 0.0 && !stick.active {
        dir = dir.normalize();
    }

    player.body.vel += dir * PLAYER_SPEED * PLAYER_ACCEL_SCALE;
    player.body.vel *= PLAYER_DAMPING;
}

/// Muzzle offset and lateral speed per bullet, by weapon tier
const SINGLE_SHOT: [(Vec2, f32); 1] = [(Vec2::new(0.0, -20.0), 0.0)];
const DOUBLE_SHOT: [(Vec2, f32); 2] = [(Vec2::new(-14.0, -20.0), 0.0), (Vec2::new(14.0, -20.0), 0.0)];
const TRIPLE_SHOT: [(Vec2, f32); 3] = [
    (Vec2::new(0.0, -22.0), 0.0),
    (Vec2::new(-22.0, -15.0), -2.8),
    (Vec2::new(22.0, -15.0), 2.8),
];

fn fire_player_weapon(world: &mut World) {
    let pos = world.player.body.pos;
    let vel = Vec2::new(0.0, PLAYER_BULLET_SPEED);
    let shots: &[(Vec2, f32)] = match world.player.weapon {
        WeaponTier::Single => &SINGLE_SHOT,
        WeaponTier::Double => &DOUBLE_SHOT,
        WeaponTier::Triple => &TRIPLE_SHOT,
    };
    for &(offset, spread) in shots {
        world.spawn_bullet(
            pos + offset,
            vel + Vec2::new(spread, 0.0),
            BulletOwner::Player,
            PLAYER_BULLET_DAMAGE,
        );
    }
}

pub fn update_bullets(world: &mut World) {
    let min = Vec2::splat(-BULLET_MARGIN);
    let max = Vec2::new(FIELD_WIDTH + BULLET_MARGIN, FIELD_HEIGHT + BULLET_MARGIN);
    for bullet in world.bullets.iter_mut().filter(|b| b.body.active) {
        bullet.body.integrate();
        let p = bullet.body.pos;
        if p.x < min.x || p.x > max.x || p.y < min.y || p.y > max.y {
            bullet.body.active = false;
        }
    }
}

/// Drift regular enemies, run the boss state machine, collect enemy fire
pub fn update_enemies(world: &mut World, time_ms: f64, rng: &mut impl RandomSource) {
    // Collect shots to spawn (deferred to avoid borrow issues)
    let mut shots: Vec<(Vec2, Vec2)> = Vec::new();

    for enemy in world.enemies.iter_mut().filter(|e| e.body.active) {
        if let Some(phase) = enemy.phase {
            if enemy.body.pos.y < BOSS_REST_Y {
                // Entry descent, no attacks
                enemy.body.pos.y += enemy.body.vel.y;
            } else {
                let next = phase.next(enemy.body.health_fraction());
                if next != phase {
                    log::debug!("Boss {} entering phase {}", enemy.id, next.number());
                    enemy.phase = Some(next);
                }
                if time_ms - enemy.last_shot_ms > enemy.fire_rate_ms {
                    enemy.last_shot_ms = time_ms;
                    let profile = next.profile();
                    shots.extend(profile.pattern.volley(enemy.body.pos, time_ms, rng));
                    if let Some(rate) = profile.fire_rate_ms {
                        enemy.fire_rate_ms = rate;
                    }
                }
            }
        } else {
            enemy.body.integrate();
            if time_ms - enemy.last_shot_ms > enemy.fire_rate_ms {
                shots.push((enemy.body.pos + Vec2::new(0.0, 20.0), Vec2::new(0.0, 6.0)));
                enemy.last_shot_ms = time_ms;
            }
        }

        if enemy.body.pos.y > FIELD_HEIGHT + ENEMY_EXIT_MARGIN {
            enemy.body.active = false;
        }
    }

    for (pos, vel) in shots {
        world.spawn_enemy_bullet(pos, vel);
    }
}

pub fn update_power_ups(world: &mut World) {
    for power_up in world.power_ups.iter_mut().filter(|p| p.body.active) {
        power_up.body.pos.y += power_up.body.vel.y;
        if power_up.body.pos.y > FIELD_HEIGHT + POWER_UP_EXIT_MARGIN {
            power_up.body.active = false;
        }
    }
}

pub fn update_particles(world: &mut World) {
    for particle in world.particles.iter_mut().filter(|p| p.body.active) {
        particle.body.integrate();
        particle.life -= super::state::PARTICLE_DECAY;
        if particle.life <= 0.0 {
            particle.body.active = false;
        }
    }
}

/// Parallax starfield; stars wrap to the top at a fresh column
pub fn update_background(world: &mut World, rng: &mut impl RandomSource) {
    for star in &mut world.stars {
        star.pos.y += star.speed * 0.45;
        if star.pos.y > FIELD_HEIGHT {
            star.pos.y = -10.0;
            star.pos.x = rng.next_f32() * FIELD_WIDTH;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::boss::BossPhase;
    use crate::sim::input::{DirectionalKeys, Joystick};
    use crate::sim::rng::ScriptedRng;
    use crate::sim::state::{Body, Enemy, EnemyKind, PowerUpKind};
    use proptest::prelude::*;

    fn world() -> World {
        World::new(&mut ScriptedRng::constant(0.5))
    }

    fn firing() -> InputIntent {
        InputIntent {
            shooting: true,
            ..Default::default()
        }
    }

    #[test]
    fn test_weapon_tiers_bullet_counts() {
        for (tier, expected) in [
            (WeaponTier::Single, 1),
            (WeaponTier::Double, 2),
            (WeaponTier::Triple, 3),
        ] {
            let mut w = world();
            w.player.weapon = tier;
            update_player(&mut w, &firing(), ControlMode::Joystick, 0.0);
            assert_eq!(w.bullets.len(), expected);
            assert!(w.bullets.iter().all(|b| b.owner == BulletOwner::Player));
        }
    }

    #[test]
    fn test_triple_spreads_laterally() {
        let mut w = world();
        w.player.weapon = WeaponTier::Triple;
        update_player(&mut w, &firing(), ControlMode::Joystick, 0.0);
        let mut vx: Vec<f32> = w.bullets.iter().map(|b| b.body.vel.x).collect();
        vx.sort_by(f32::total_cmp);
        assert_eq!(vx, vec![-2.8, 0.0, 2.8]);
    }

    #[test]
    fn test_fire_interval_respected() {
        let mut w = world();
        let input = firing();
        update_player(&mut w, &input, ControlMode::Joystick, 0.0);
        update_player(&mut w, &input, ControlMode::Joystick, 100.0);
        update_player(&mut w, &input, ControlMode::Joystick, 200.0);
        assert_eq!(w.bullets.len(), 1);
        update_player(&mut w, &input, ControlMode::Joystick, 200.1);
        assert_eq!(w.bullets.len(), 2);
    }

    #[test]
    fn test_no_fire_without_intent_unless_drag() {
        let mut w = world();
        update_player(&mut w, &InputIntent::default(), ControlMode::Joystick, 0.0);
        assert!(w.bullets.is_empty());
        update_player(&mut w, &InputIntent::default(), ControlMode::Drag, 0.0);
        assert_eq!(w.bullets.len(), 1);
    }

    #[test]
    fn test_keyboard_diagonal_normalized() {
        let mut w = world();
        let input = InputIntent {
            keys: DirectionalKeys {
                right: true,
                down: true,
                ..Default::default()
            },
            ..Default::default()
        };
        update_player(&mut w, &input, ControlMode::Joystick, 0.0);
        let v = w.player.body.vel;
        let expected = PLAYER_SPEED * PLAYER_ACCEL_SCALE * PLAYER_DAMPING;
        assert!((v.length() - expected).abs() < 1e-4);
    }

    #[test]
    fn test_damping_decays_without_input() {
        let mut w = world();
        w.player.body.vel = Vec2::new(4.0, 0.0);
        update_player(&mut w, &InputIntent::default(), ControlMode::Joystick, 0.0);
        assert!((w.player.body.vel.x - 4.0 * PLAYER_DAMPING).abs() < 1e-5);
    }

    #[test]
    fn test_drag_pursues_target() {
        let mut w = world();
        let start = w.player.body.pos;
        let input = InputIntent {
            joystick: Joystick {
                active: true,
                target_x: start.x + 100.0,
                target_y: start.y,
                ..Default::default()
            },
            ..Default::default()
        };
        update_player(&mut w, &input, ControlMode::Drag, 0.0);
        assert!((w.player.body.pos.x - (start.x + 40.0)).abs() < 1e-3);
    }

    #[test]
    fn test_bullets_leave_field() {
        let mut w = world();
        w.spawn_bullet(Vec2::new(100.0, -95.0), Vec2::new(0.0, -17.0), BulletOwner::Player, 10.0);
        w.spawn_bullet(Vec2::new(100.0, 400.0), Vec2::new(0.0, -17.0), BulletOwner::Player, 10.0);
        update_bullets(&mut w);
        assert!(!w.bullets[0].body.active);
        assert!(w.bullets[1].body.active);
    }

    fn drone_at(w: &mut World, pos: Vec2, last_shot_ms: f64) {
        let id = w.next_entity_id();
        w.enemies.push(Enemy {
            id,
            body: Body::new(pos, Vec2::new(0.0, 1.0), Vec2::splat(45.0), 10.0),
            kind: EnemyKind::Drone,
            score_value: 100,
            last_shot_ms,
            fire_rate_ms: 1000.0,
            phase: None,
        });
    }

    #[test]
    fn test_enemy_fires_on_interval() {
        let mut w = world();
        let mut rng = ScriptedRng::constant(0.5);
        drone_at(&mut w, Vec2::new(100.0, 100.0), 500.0);
        update_enemies(&mut w, 1000.0, &mut rng);
        assert!(w.bullets.is_empty());
        update_enemies(&mut w, 1600.0, &mut rng);
        assert_eq!(w.bullets.len(), 1);
        assert_eq!(w.bullets[0].owner, BulletOwner::Enemy);
        assert!(w.bullets[0].body.vel.y > 0.0);
    }

    #[test]
    fn test_enemy_removed_far_below() {
        let mut w = world();
        drone_at(&mut w, Vec2::new(100.0, FIELD_HEIGHT + ENEMY_EXIT_MARGIN), 1e9);
        update_enemies(&mut w, 0.0, &mut ScriptedRng::constant(0.5));
        assert!(!w.enemies[0].body.active);
    }

    fn boss_at(w: &mut World, y: f32, health_fraction: f32) {
        let id = w.next_entity_id();
        let mut body = Body::new(Vec2::new(225.0, y), Vec2::new(0.0, 0.5), Vec2::splat(220.0), 1000.0);
        body.health = 1000.0 * health_fraction;
        w.enemies.push(Enemy {
            id,
            body,
            kind: EnemyKind::Boss,
            score_value: 10000,
            last_shot_ms: 0.0,
            fire_rate_ms: 1000.0,
            phase: Some(BossPhase::One),
        });
    }

    #[test]
    fn test_boss_descends_without_firing() {
        let mut w = world();
        boss_at(&mut w, -300.0, 0.1);
        update_enemies(&mut w, 5000.0, &mut ScriptedRng::constant(0.5));
        assert!(w.bullets.is_empty());
        assert_eq!(w.enemies[0].body.pos.y, -299.5);
        assert_eq!(w.enemies[0].phase, Some(BossPhase::One));
    }

    #[test]
    fn test_boss_phase_change_and_rate_override() {
        let mut w = world();
        boss_at(&mut w, BOSS_REST_Y, 0.6);
        update_enemies(&mut w, 1500.0, &mut ScriptedRng::constant(0.5));
        let boss = &w.enemies[0];
        assert_eq!(boss.phase, Some(BossPhase::Two));
        assert_eq!(w.bullets.len(), 14);
        assert_eq!(boss.fire_rate_ms, 1200.0);
    }

    #[test]
    fn test_power_ups_and_particles_expire() {
        let mut w = world();
        let mut rng = ScriptedRng::constant(0.5);
        w.spawn_power_up(Vec2::new(50.0, FIELD_HEIGHT + 99.0), PowerUpKind::Rate);
        w.spawn_explosion(Vec2::new(10.0, 10.0), 3, crate::sim::state::ParticleColor::Burst, &mut rng);
        update_power_ups(&mut w);
        assert!(!w.power_ups[0].body.active);
        for _ in 0..49 {
            update_particles(&mut w);
        }
        assert!(w.particles.iter().all(|p| p.body.active));
        for _ in 0..2 {
            update_particles(&mut w);
        }
        assert!(w.particles.iter().all(|p| !p.body.active));
    }

    #[test]
    fn test_stars_wrap_to_top() {
        let mut w = world();
        w.stars[0].pos.y = FIELD_HEIGHT;
        update_background(&mut w, &mut ScriptedRng::constant(0.25));
        assert_eq!(w.stars[0].pos.y, -10.0);
        assert_eq!(w.stars[0].pos.x, FIELD_WIDTH * 0.25);
    }

    fn arb_input() -> impl Strategy<Value = InputIntent> {
        (
            any::<[bool; 4]>(),
            any::<bool>(),
            -1.5f32..1.5,
            -1.5f32..1.5,
            -2000.0f32..2000.0,
            -2000.0f32..2000.0,
        )
            .prop_map(|(k, active, x, y, tx, ty)| InputIntent {
                keys: DirectionalKeys {
                    up: k[0],
                    down: k[1],
                    left: k[2],
                    right: k[3],
                    fire: false,
                },
                shooting: false,
                joystick: Joystick {
                    active,
                    x,
                    y,
                    target_x: tx,
                    target_y: ty,
                },
            })
    }

    proptest! {
        #[test]
        fn prop_player_stays_in_safe_rect(
            inputs in prop::collection::vec(arb_input(), 1..200),
            drag in any::<bool>(),
        ) {
            let mode = if drag { ControlMode::Drag } else { ControlMode::Joystick };
            let mut w = world();
            let (min, max) = Player::safe_rect();
            for (i, input) in inputs.iter().enumerate() {
                update_player(&mut w, input, mode, i as f64 * TICK_MS);
                let p = w.player.body.pos;
                prop_assert!(p.x >= min.x && p.x <= max.x);
                prop_assert!(p.y >= min.y && p.y <= max.y);
            }
        }
    }
}
