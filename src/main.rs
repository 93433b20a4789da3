//! Voidrite headless runner
//!
//! Drives the simulation at 60 Hz with a simple autopilot and reports the
//! HUD. Usage: `voidrite [EASY|MID|HARD] [seconds] [seed]`

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use voidrite::Settings;

    env_logger::init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    let mut settings = Settings::load();
    if let Some(difficulty) = args.first() {
        settings.difficulty = voidrite::Difficulty::parse(difficulty);
    }
    let seconds: f64 = args.get(1).and_then(|s| s.parse().ok()).unwrap_or(120.0);
    let seed: u64 = args.get(2).and_then(|s| s.parse().ok()).unwrap_or(0x5eed);

    log::info!(
        "Voidrite (native) headless run: {} for {}s, seed {}",
        settings.difficulty.as_str(),
        seconds,
        seed
    );

    let best = voidrite::BestScore::load();
    let hud = autopilot::run(settings, best.raw, seed, seconds);

    match serde_json::to_string_pretty(&hud) {
        Ok(json) => println!("{}", json),
        Err(e) => log::error!("Failed to encode HUD: {}", e),
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // The browser host embeds the library directly
}

#[cfg(not(target_arch = "wasm32"))]
mod autopilot {
    use voidrite::Settings;
    use voidrite::consts::FIELD_HEIGHT;
    use voidrite::sim::{Engine, HudSnapshot, SimState};

    /// Host frame interval (display refresh)
    const FRAME_MS: f64 = 1000.0 / 60.0;

    pub fn run(settings: Settings, best: u64, seed: u64, seconds: f64) -> HudSnapshot {
        let mut engine = Engine::new(settings, best, seed);
        engine.restart();
        engine.input.shooting = true;

        let frames = (seconds * 1000.0 / FRAME_MS) as u64;
        let mut now = 0.0;
        for frame in 0..frames {
            steer(&mut engine);
            now += FRAME_MS;
            engine.update(now);

            if frame % 600 == 0 {
                let hud = engine.hud();
                log::info!(
                    "t={:.0}s score={} lives={} shield={:.0} enemies={} boss={}",
                    now / 1000.0,
                    hud.score,
                    hud.lives,
                    hud.shield,
                    engine.world().enemies.len(),
                    engine.boss().is_some()
                );
            }

            if engine.state() == SimState::GameOver {
                log::info!("Autopilot down after {:.1}s", now / 1000.0);
                break;
            }
        }

        engine.hud()
    }

    /// Chase loot when it is close to the craft's row, otherwise line up
    /// under the lowest enemy.
    fn steer(engine: &mut Engine) {
        let world = engine.world();
        let player = world.player.body.pos;

        let loot = world
            .power_ups
            .iter()
            .filter(|p| p.body.pos.y > FIELD_HEIGHT * 0.5)
            .map(|p| p.body.pos.x)
            .next();
        let target_x = loot.or_else(|| {
            world
                .enemies
                .iter()
                .max_by(|a, b| a.body.pos.y.total_cmp(&b.body.pos.y))
                .map(|e| e.body.pos.x)
        });

        let keys = &mut engine.input.keys;
        keys.left = false;
        keys.right = false;
        if let Some(x) = target_x {
            if x < player.x - 8.0 {
                keys.left = true;
            } else if x > player.x + 8.0 {
                keys.right = true;
            }
        }
    }
}
