//! Lightsaber Deflect headless runner
//!
//! Plays one scripted match with a pointer sweeping back and forth across
//! the arena and logs what happened. Set `RUST_LOG=info` (or `debug`) to
//! see the simulation's own logging.
//!
//! Usage: `lightsaber-deflect [tuning.json] [padawan|knight|master]`

use lightsaber_deflect::sim::{FrameClock, GameEvent, GamePhase, Session};
use lightsaber_deflect::{Difficulty, Tuning};

const ARENA_WIDTH: f32 = 800.0;
const ARENA_HEIGHT: f32 = 600.0;
/// Host frame period (ms), roughly 60 fps
const FRAME_MS: f64 = 1000.0 / 60.0;
/// Give up after this much simulated time
const MAX_FRAMES: u32 = 60 * 60 * 5;

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    log::info!("Lightsaber Deflect (headless) starting...");
    run();
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // The headless runner is native only; the web shell drives Session directly
}

#[cfg(not(target_arch = "wasm32"))]
fn run() {
    let mut args = std::env::args().skip(1);

    let tuning = match args.next().filter(|a| a != "-") {
        Some(path) => match std::fs::read_to_string(&path) {
            Ok(json) => match Tuning::from_json(&json) {
                Ok(tuning) => {
                    log::info!("Loaded tuning from {}", path);
                    tuning
                }
                Err(e) => {
                    log::error!("Invalid tuning in {}: {}", path, e);
                    std::process::exit(1);
                }
            },
            Err(e) => {
                log::error!("Failed to read {}: {}", path, e);
                std::process::exit(1);
            }
        },
        None => Tuning::default(),
    };

    let difficulty = args
        .next()
        .map(|a| {
            Difficulty::from_str(&a).unwrap_or_else(|| {
                log::warn!("Unknown difficulty '{}', using Padawan", a);
                Difficulty::Padawan
            })
        })
        .unwrap_or_default();

    let seed = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(42);

    let mut session = match Session::with_tuning(seed, tuning) {
        Ok(session) => session,
        Err(e) => {
            log::error!("Invalid tuning: {}", e);
            std::process::exit(1);
        }
    };
    session.set_arena_bounds(ARENA_WIDTH, ARENA_HEIGHT);
    session.set_difficulty(difficulty);
    session.set_phase(GamePhase::Playing);

    let mut clock = FrameClock::new();
    let mut deflected = 0u32;
    let mut missed = 0u32;

    for frame in 0..MAX_FRAMES {
        let time = frame as f64 * FRAME_MS;

        // Sweep the saber across the lower third, the way a player might chase shots
        let t = time as f32 / 1000.0;
        let x = ARENA_WIDTH / 2.0 + (t * 1.7).sin() * ARENA_WIDTH * 0.4;
        let y = ARENA_HEIGHT * 0.8 + (t * 0.9).cos() * 30.0;
        session.push_pointer(x, y);

        session.advance(clock.elapsed_ms(time));

        for event in session.drain_events() {
            match event {
                GameEvent::Deflected { id, score } => {
                    deflected += 1;
                    log::debug!("Deflected {} (score {})", id, score);
                }
                GameEvent::Missed { id } => {
                    missed += 1;
                    log::debug!("Missed {}", id);
                }
                GameEvent::ZoneHit { zone } => log::info!("Hit: {}", zone),
                GameEvent::GameOver { zone } => log::info!("Game over, killing blow: {}", zone),
                GameEvent::Spawned { .. } | GameEvent::PhaseChanged { .. } => {}
            }
        }

        if session.phase() == GamePhase::GameOver {
            break;
        }
    }

    println!(
        "{} after {:.1}s: score {}, deflected {}, missed {}, zones hit {:?}, killing blow {:?}",
        session.difficulty(),
        session.now_ms() as f64 / 1000.0,
        session.score(),
        deflected,
        missed,
        session.hit_zones(),
        session.killing_blow(),
    );
}
