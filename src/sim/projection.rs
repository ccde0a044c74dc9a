//! Game units to display units
//!
//! Uniform scale that fits the whole field into the container while keeping
//! its aspect ratio.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::state::GameSize;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Projection {
    /// Display units per game unit
    unit: f32,
    game: GameSize,
}

impl Projection {
    /// Fit `game` into `container`, limited by the tighter dimension
    pub fn new(container: GameSize, game: GameSize) -> Self {
        let width_ratio = container.width / game.width;
        let height_ratio = container.height / game.height;
        Self {
            unit: width_ratio.min(height_ratio),
            game,
        }
    }

    #[inline]
    pub fn unit(&self) -> f32 {
        self.unit
    }

    #[inline]
    pub fn scale_distance(&self, distance: f32) -> f32 {
        distance * self.unit
    }

    #[inline]
    pub fn unscale_distance(&self, distance: f32) -> f32 {
        distance / self.unit
    }

    #[inline]
    pub fn scale_vector(&self, v: Vec2) -> Vec2 {
        v * self.unit
    }

    /// Display size of the whole field
    pub fn view_size(&self) -> GameSize {
        GameSize::new(self.scale_distance(self.game.width), self.scale_distance(self.game.height))
    }
}
