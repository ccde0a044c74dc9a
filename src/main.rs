//! Block Breaker headless runner
//!
//! Drives a session on a virtual clock with the autopilot at the keys and
//! logs what happens. Usage: `block-breaker [seconds] [seed]`.

#[cfg(not(target_arch = "wasm32"))]
use block_breaker::{
    ConfigError, Event, MemoryStore, Session,
    consts::UPDATE_EVERY_MS,
    session::{SessionConfig, SessionEvent, autopilot_intent},
    sim::{GameEvent, GameSize, Movement},
};

#[cfg(not(target_arch = "wasm32"))]
const DEFAULT_SECONDS: f64 = 60.0;

/// Display area handed to the session, 100 display units per game unit
#[cfg(not(target_arch = "wasm32"))]
const CONTAINER: GameSize = GameSize::new(900.0, 1100.0);

#[cfg(not(target_arch = "wasm32"))]
fn main() -> Result<(), ConfigError> {
    env_logger::init();
    log::info!("Block Breaker (headless) starting...");

    let mut args = std::env::args().skip(1);
    let seconds = args
        .next()
        .and_then(|s| s.parse::<f64>().ok())
        .filter(|s| s.is_finite() && *s > 0.0)
        .unwrap_or(DEFAULT_SECONDS);
    let seed = args.next().and_then(|s| s.parse::<u64>().ok()).unwrap_or_else(|| {
        std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .map(|d| d.as_millis() as u64)
            .unwrap_or(0)
    });

    let config = SessionConfig {
        seed,
        ..SessionConfig::default()
    };
    let mut session = Session::new(config, MemoryStore::new(), CONTAINER, 0.0)?;
    log::info!("Simulating {:.0} s with seed {}", seconds, seed);

    let mut now_ms = 0.0;
    let mut blocks_destroyed = 0u32;
    let mut lives_lost = 0u32;
    while now_ms < seconds * 1000.0 {
        now_ms += UPDATE_EVERY_MS;

        let intent = autopilot_intent(session.game());
        if intent != session.movement() {
            if let Some(held) = session.movement() {
                let code = key_code(&session, held);
                session = session.reduce(&Event::KeyUp { code });
            }
            if let Some(wanted) = intent {
                let code = key_code(&session, wanted);
                session = session.reduce(&Event::KeyDown { code });
            }
        }

        session = session.reduce(&Event::Tick { now_ms });
        for event in session.last_events() {
            match event {
                SessionEvent::Game(GameEvent::BlockHit { destroyed: true }) => blocks_destroyed += 1,
                SessionEvent::Game(GameEvent::LifeLost { lives_left }) => {
                    lives_lost += 1;
                    log::info!("Ball lost at {:.1} s, {} lives left", now_ms / 1000.0, lives_left);
                }
                SessionEvent::LevelAdvanced { level } => {
                    log::info!("Now playing level {} at {:.1} s", level + 1, now_ms / 1000.0);
                }
                SessionEvent::LevelRestarted { level } => {
                    log::info!("Level {} restarted at {:.1} s", level + 1, now_ms / 1000.0);
                }
                _ => {}
            }
        }
    }

    log::info!(
        "Done: level {}, {} blocks left, {} blocks destroyed, {} lives lost",
        session.level() + 1,
        session.game().blocks.len(),
        blocks_destroyed,
        lives_lost
    );
    Ok(())
}

/// First key bound to `movement`
#[cfg(not(target_arch = "wasm32"))]
fn key_code(session: &Session<MemoryStore>, movement: Movement) -> u32 {
    let settings = session.settings();
    let keys = match movement {
        Movement::Left => &settings.left_keys,
        Movement::Right => &settings.right_keys,
    };
    keys.first().copied().unwrap_or_default()
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // Library-only on wasm; the host drives `Session` directly
}
