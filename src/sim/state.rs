//! Level state and core simulation types
//!
//! Everything the renderer needs to draw a frame, and everything the tick
//! needs to produce the next one, lives in `LevelState`.

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::level::{LevelConfig, generate_blocks};
use super::vector::{LEFT_UP, RIGHT_UP};
use crate::consts::*;
use crate::tuning::BallSpawn;

/// Play field size in game units (not pixels)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GameSize {
    pub width: f32,
    pub height: f32,
}

impl GameSize {
    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }
}

/// The player's paddle
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Paddle {
    /// Top-left corner
    pub position: Vec2,
    pub width: f32,
    pub height: f32,
}

impl Paddle {
    #[inline]
    pub fn left(&self) -> f32 {
        self.position.x
    }

    #[inline]
    pub fn right(&self) -> f32 {
        self.position.x + self.width
    }

    #[inline]
    pub fn top(&self) -> f32 {
        self.position.y
    }

    /// Same paddle with its left edge at `x`, kept inside the field
    pub fn placed_at(&self, x: f32, field: GameSize) -> Self {
        let max_x = (field.width - self.width).max(0.0);
        Self {
            position: Vec2::new(x.clamp(0.0, max_x), self.position.y),
            width: self.width,
            height: self.height,
        }
    }
}

/// The ball
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ball {
    pub center: Vec2,
    pub radius: f32,
    /// Unit heading
    pub direction: Vec2,
}

/// A destructible block
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Block {
    /// Top-left corner
    pub position: Vec2,
    pub width: f32,
    pub height: f32,
    /// Hits remaining minus one. A block at density 0 breaks on its next hit.
    pub density: u8,
}

impl Block {
    #[inline]
    pub fn left(&self) -> f32 {
        self.position.x
    }

    #[inline]
    pub fn right(&self) -> f32 {
        self.position.x + self.width
    }

    #[inline]
    pub fn top(&self) -> f32 {
        self.position.y
    }

    #[inline]
    pub fn bottom(&self) -> f32 {
        self.position.y + self.height
    }

    /// The block after one more hit, or `None` if the hit breaks it
    pub fn hit(&self) -> Option<Block> {
        self.density.checked_sub(1).map(|density| Block {
            density,
            ..self.clone()
        })
    }
}

/// Complete state of the level being played
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LevelState {
    pub size: GameSize,
    /// Remaining blocks, in generation order
    pub blocks: Vec<Block>,
    /// Per-level speed multiplier
    pub speed: f32,
    /// Lives left; the level restarts when this reaches zero
    pub lives: u32,
    pub paddle: Paddle,
    pub ball: Ball,
}

impl LevelState {
    /// True once every block has been destroyed
    #[inline]
    pub fn is_cleared(&self) -> bool {
        self.blocks.is_empty()
    }
}

/// Build a centered paddle and a ball resting above it, heading up-left or up-right
pub fn init_paddle_and_ball<R: Rng + ?Sized>(
    size: GameSize,
    paddle_width: f32,
    spawn: BallSpawn,
    rng: &mut R,
) -> (Paddle, Ball) {
    let paddle_y = size.height - PADDLE_HEIGHT - PADDLE_BOTTOM_GAP;
    let paddle = Paddle {
        position: Vec2::new((size.width - paddle_width) / 2.0, paddle_y),
        width: paddle_width,
        height: PADDLE_HEIGHT,
    };

    let ball_x = match spawn {
        BallSpawn::FieldHeight => size.height / 2.0,
        BallSpawn::Centered => size.width / 2.0,
    };
    let direction = if rng.random_bool(0.5) { LEFT_UP } else { RIGHT_UP };
    let ball = Ball {
        center: Vec2::new(ball_x, paddle_y - BALL_RADIUS * 2.0),
        radius: BALL_RADIUS,
        direction,
    };

    (paddle, ball)
}

/// Fresh state for the start (or restart) of a level
pub fn init_level_state<R: Rng + ?Sized>(config: &LevelConfig, spawn: BallSpawn, rng: &mut R) -> LevelState {
    let size = config.size();
    let blocks = generate_blocks(config.columns, config.rows, size, rng);
    let (paddle, ball) = init_paddle_and_ball(size, config.paddle_width, spawn, rng);

    LevelState {
        size,
        blocks,
        speed: config.speed,
        lives: config.lives,
        paddle,
        ball,
    }
}
