//! Game session driver
//!
//! Folds input events into the level being played. One reducer handles
//! everything: key and pointer input, container resizes, the pause toggle
//! and timer ticks. Level restarts (lives exhausted) and advances (blocks
//! cleared) happen here, outside the simulation step.

pub mod clock;

use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::progress::{Progress, ProgressStore};
use crate::settings::Settings;
use crate::sim::{GameEvent, GameSize, LevelCatalog, LevelState, Movement, Projection, TickInput, init_level_state, tick};
use crate::tuning::Tuning;

pub use clock::PauseClock;

/// What a key code means under the current bindings
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Key {
    Left,
    Right,
    Pause,
    Other,
}

impl Key {
    pub fn from_code(code: u32, settings: &Settings) -> Self {
        if settings.left_keys.contains(&code) {
            Key::Left
        } else if settings.right_keys.contains(&code) {
            Key::Right
        } else if code == settings.pause_key {
            Key::Pause
        } else {
            Key::Other
        }
    }
}

/// Input delivered to the session
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Event {
    /// Display area changed size (display units)
    ContainerResized { width: f32, height: f32 },
    /// Key pressed (DOM key code)
    KeyDown { code: u32 },
    /// Key released (DOM key code)
    KeyUp { code: u32 },
    /// Pointer moved to `x` display units from the field's left edge
    PointerMoved { x: f32 },
    /// Timer fired at wall-clock `now_ms`
    Tick { now_ms: f64 },
}

/// Everything a session reports after handling an event
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum SessionEvent {
    /// Something happened inside the level
    Game(GameEvent),
    /// Lives ran out; the level starts over
    LevelRestarted { level: usize },
    /// Level cleared; `level` is the one now being played
    LevelAdvanced { level: usize },
}

/// Static inputs of a session
#[derive(Debug, Clone, Default)]
pub struct SessionConfig {
    pub catalog: LevelCatalog,
    pub settings: Settings,
    pub tuning: Tuning,
    /// RNG seed for block densities, spawn headings and bounce jitter
    pub seed: u64,
}

/// A running game: current level, its state and the input it has seen
#[derive(Debug, Clone)]
pub struct Session<S> {
    catalog: LevelCatalog,
    settings: Settings,
    tuning: Tuning,
    store: S,
    rng: Pcg32,
    level: usize,
    game: LevelState,
    container: GameSize,
    projection: Projection,
    clock: PauseClock,
    movement: Option<Movement>,
    /// Pointer target (game units) waiting for the next tick
    pointer_x: Option<f32>,
    events: Vec<SessionEvent>,
}

impl<S: ProgressStore> Session<S> {
    /// Start at the saved level (level 0 when nothing was saved)
    pub fn new(config: SessionConfig, store: S, container: GameSize, now_ms: f64) -> Result<Self, ConfigError> {
        let SessionConfig {
            catalog,
            settings,
            tuning,
            seed,
        } = config;
        tuning.validate()?;

        let level = store.load().map(|p| p.level).unwrap_or(0);
        let level_config = catalog.get(level)?;

        let mut rng = Pcg32::seed_from_u64(seed);
        let game = init_level_state(level_config, tuning.ball_spawn, &mut rng);
        let projection = Projection::new(container, game.size);
        log::info!(
            "Session started at level {} of {} (seed {})",
            level + 1,
            catalog.len(),
            seed
        );

        Ok(Self {
            catalog,
            settings,
            tuning,
            store,
            rng,
            level,
            game,
            container,
            projection,
            clock: PauseClock::new(now_ms),
            movement: None,
            pointer_x: None,
            events: Vec::new(),
        })
    }

    /// Current level index (0-based)
    pub fn level(&self) -> usize {
        self.level
    }

    pub fn game(&self) -> &LevelState {
        &self.game
    }

    pub fn projection(&self) -> &Projection {
        &self.projection
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn movement(&self) -> Option<Movement> {
        self.movement
    }

    pub fn is_paused(&self) -> bool {
        self.clock.is_paused()
    }

    /// Events produced by the most recent `reduce`
    pub fn last_events(&self) -> &[SessionEvent] {
        &self.events
    }

    /// Handle one event and return the next session
    pub fn reduce(mut self, event: &Event) -> Self {
        self.events.clear();
        match *event {
            Event::ContainerResized { width, height } => self.resize(GameSize::new(width, height)),
            Event::KeyDown { code } => self.key_down(code),
            Event::KeyUp { code } => self.key_up(code),
            Event::PointerMoved { x } => self.pointer_moved(x),
            Event::Tick { now_ms } => self.tick(now_ms),
        }
    }

    fn resize(self, container: GameSize) -> Self {
        Self {
            projection: Projection::new(container, self.game.size),
            container,
            ..self
        }
    }

    fn key_down(self, code: u32) -> Self {
        let movement = match Key::from_code(code, &self.settings) {
            Key::Left => Some(Movement::Left),
            Key::Right => Some(Movement::Right),
            Key::Pause | Key::Other => return self,
        };
        Self { movement, ..self }
    }

    fn key_up(self, code: u32) -> Self {
        match Key::from_code(code, &self.settings) {
            Key::Left if self.movement == Some(Movement::Left) => Self { movement: None, ..self },
            Key::Right if self.movement == Some(Movement::Right) => Self { movement: None, ..self },
            Key::Pause => self.toggle_pause(),
            _ => self,
        }
    }

    fn pointer_moved(self, x: f32) -> Self {
        if !self.settings.paddle_control.uses_pointer() {
            return self;
        }
        let game_x = self.projection.unscale_distance(x);
        if !game_x.is_finite() {
            log::warn!("Ignoring pointer at {} with projection unit {}", x, self.projection.unit());
            return self;
        }
        Self {
            pointer_x: Some(game_x),
            ..self
        }
    }

    fn tick(mut self, now_ms: f64) -> Self {
        let (clock, elapsed_ms) = self.clock.advance(now_ms);
        self.clock = clock;
        if self.clock.is_paused() {
            return self;
        }

        let input = TickInput {
            movement: self.movement,
            pointer_x: self.pointer_x.take(),
        };
        let outcome = tick(&self.game, &input, elapsed_ms as f32, &self.tuning, &mut self.rng);
        self.events.extend(outcome.events.iter().copied().map(SessionEvent::Game));

        if outcome.state.lives < 1 {
            let level = self.level;
            log::info!("Out of lives, restarting level {}", level + 1);
            self.events.push(SessionEvent::LevelRestarted { level });
            return self.start_level(level);
        }

        if outcome.state.is_cleared() {
            let next = self.catalog.next_index(self.level);
            log::info!("Level {} cleared, starting level {}", self.level + 1, next + 1);
            self.store.save(&Progress { level: next });
            self.events.push(SessionEvent::LevelAdvanced { level: next });
            return self.start_level(next);
        }

        self.game = outcome.state;
        self
    }

    fn start_level(mut self, level: usize) -> Self {
        let config = self.catalog.get_or_last(level);
        self.game = init_level_state(config, self.tuning.ball_spawn, &mut self.rng);
        self.level = level;
        self.projection = Projection::new(self.container, self.game.size);
        self.movement = None;
        self.pointer_x = None;
        self
    }

    /// Pause or resume; paused sessions ignore ticks
    pub fn toggle_pause(mut self) -> Self {
        self.clock = self.clock.toggle();
        log::info!("{}", if self.clock.is_paused() { "Paused" } else { "Resumed" });
        self
    }

    /// Pause or resume at a known time, so no paused time reaches the next tick
    pub fn toggle_pause_at(mut self, now_ms: f64) -> Self {
        self.clock = self.clock.toggle_at(now_ms);
        log::info!("{}", if self.clock.is_paused() { "Paused" } else { "Resumed" });
        self
    }
}

/// Pure reducer over sessions, `(session, event) -> session`
pub fn reduce<S: ProgressStore>(session: Session<S>, event: &Event) -> Session<S> {
    session.reduce(event)
}

/// Keyboard intent that keeps the paddle under the ball
///
/// Used by the headless runner. Steers the paddle center toward where the
/// ball will be a short distance ahead, with a dead zone so it does not jitter.
pub fn autopilot_intent(state: &LevelState) -> Option<Movement> {
    let paddle = &state.paddle;
    let paddle_center = paddle.left() + paddle.width / 2.0;
    let lead = state.ball.center + state.ball.direction * state.ball.radius * 2.0;
    let offset = lead.x - paddle_center;
    let dead_zone = paddle.width / 4.0;

    if offset < -dead_zone {
        Some(Movement::Left)
    } else if offset > dead_zone {
        Some(Movement::Right)
    } else {
        None
    }
}
