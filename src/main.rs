//! Castle Park headless runner
//!
//! Plays a full session with a simple autopilot and no rendering. Useful for
//! balancing difficulty settings: `castle-park [config.json]`.

use castle_park::consts::PARK_TOLERANCE;
use castle_park::sim::WorldState;
use castle_park::{
    AudioManager, Direction, GameConfig, HeldKeys, KeyAction, SessionController, SessionState,
    normalize_angle,
};

/// Ticks allowed per attempt before giving up on it
const MAX_TICKS_PER_ATTEMPT: u32 = 5_000;
/// Attempts per level before the run is abandoned
const MAX_ATTEMPTS_PER_LEVEL: u32 = 5;
/// Heading error tolerated while driving toward the spot
const STEER_DEADZONE: f32 = 0.05;

/// Drive straight at the spot, stop on it, then straighten up
fn autopilot(world: &WorldState) -> HeldKeys {
    let mut keys = HeldKeys::default();
    let (Some(car), Some(spot)) = (&world.car, &world.parking_spot) else {
        return keys;
    };

    let to_spot = spot.pos - car.pos;
    let arrived = to_spot.x.abs() < PARK_TOLERANCE * 0.5 && to_spot.y.abs() < PARK_TOLERANCE * 0.5;

    // Parking needs the raw heading back near zero, not just an equivalent one
    let error = if arrived {
        -car.angle
    } else {
        normalize_angle(to_spot.y.atan2(to_spot.x) - car.angle)
    };
    if error > STEER_DEADZONE {
        keys.press(Direction::Right);
    } else if error < -STEER_DEADZONE {
        keys.press(Direction::Left);
    }
    if !arrived && error.abs() < 0.5 {
        keys.press(Direction::Up);
    }
    keys
}

fn main() {
    #[cfg(not(target_arch = "wasm32"))]
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = match std::env::args().nth(1) {
        Some(path) => GameConfig::load_or_default(path),
        None => GameConfig::default(),
    };

    log::info!("Castle Park (headless) starting...");
    for line in config.difficulty.preview_progression(config.max_levels) {
        log::info!("{line}");
    }

    let mut session = SessionController::new(config, AudioManager::new());
    if !session.boot() {
        if let Err(e) = session.start("Autopilot") {
            log::error!("{e}");
            return;
        }
    }

    let mut attempts = 1;
    let mut ticks = 0;
    loop {
        match session.state() {
            SessionState::Playing => {
                let keys = autopilot(session.world());
                session.tick(&keys);
                ticks += 1;
                if ticks >= MAX_TICKS_PER_ATTEMPT {
                    log::warn!("Level {} timed out", session.world().level);
                    break;
                }
            }
            SessionState::LevelWon => {
                log::info!(
                    "Parked on level {} after {} ticks (attempt {})",
                    session.world().level,
                    ticks,
                    attempts
                );
                session.handle_action(KeyAction::AdvanceLevel);
                attempts = 1;
                ticks = 0;
            }
            SessionState::LevelLost => {
                if attempts >= MAX_ATTEMPTS_PER_LEVEL {
                    log::warn!(
                        "Giving up on level {} after {} attempts",
                        session.world().level,
                        attempts
                    );
                    break;
                }
                attempts += 1;
                ticks = 0;
                session.handle_action(KeyAction::RestartLevel);
            }
            SessionState::GameComplete => {
                log::info!("All {} levels cleared", session.config().max_levels);
                break;
            }
            SessionState::Menu => break,
        }
    }

    match serde_json::to_string_pretty(session.world()) {
        Ok(json) => println!("{json}"),
        Err(e) => log::error!("Failed to serialize world: {e}"),
    }
}
