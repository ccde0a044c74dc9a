//! Block Breaker - a breakout-style arcade game core
//!
//! Core modules:
//! - `sim`: Pure simulation (vectors, levels, collisions, tick)
//! - `session`: Driver reducer folding input events into the current level
//! - `progress`: Saved level index and the store abstraction
//! - `tuning`: Data-driven game balance
//! - `settings`: Control preferences and key bindings

pub mod error;
pub mod progress;
pub mod session;
pub mod settings;
pub mod sim;
pub mod tuning;

pub use error::ConfigError;
pub use progress::{MemoryStore, Progress, ProgressStore};
pub use session::{Event, Key, Session};
pub use settings::{PaddleControl, Settings};
pub use tuning::{BallSpawn, Tuning};

/// Game configuration constants (all distances in game units)
pub mod consts {
    /// Game units travelled per millisecond at speed 1.0
    pub const DISTANCE_PER_MS: f32 = 0.005;
    /// Target tick cadence of the driver (144 Hz)
    pub const UPDATE_EVERY_MS: f64 = 1000.0 / 144.0;

    /// Paddle defaults
    pub const PADDLE_HEIGHT: f32 = 1.0 / 3.0;
    /// Gap between the paddle bottom and the field bottom
    pub const PADDLE_BOTTOM_GAP: f32 = 0.06;

    /// Ball defaults
    pub const BALL_RADIUS: f32 = 1.0 / 5.0;

    /// Block defaults
    pub const BLOCK_WIDTH: f32 = 1.0;
    pub const BLOCK_HEIGHT: f32 = 1.0 / 4.0;
    /// Vertical distance between the tops of two block rows
    pub const BLOCK_ROW_SPACING: f32 = 1.0 / 3.0;
    /// Densities are drawn from 0..MAX_BLOCK_DENSITY
    pub const MAX_BLOCK_DENSITY: u8 = 3;

    /// Largest grid the default field holds
    pub const MAX_COLUMNS: u32 = 9;
    pub const MAX_ROWS: u32 = 11;
}
