//! Pure simulation module
//!
//! All gameplay logic lives here. This module must stay pure:
//! - Every tick returns a new state value
//! - Randomness is injected by the caller (seedable)
//! - Stable iteration order (block collection order)
//! - No rendering or platform dependencies

pub mod collision;
pub mod level;
pub mod projection;
pub mod state;
pub mod tick;
pub mod vector;

pub use collision::{Surface, block_hit_normal, bounce, spans_overlap};
pub use level::{LevelCatalog, LevelConfig, generate_blocks};
pub use projection::Projection;
pub use state::{Ball, Block, GameSize, LevelState, Paddle, init_level_state, init_paddle_and_ball};
pub use tick::{GameEvent, Movement, TickInput, TickOutcome, tick};
