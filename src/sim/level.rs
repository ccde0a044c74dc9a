//! Level configuration and block grid generation

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::state::{Block, GameSize};
use crate::consts::*;
use crate::error::ConfigError;

/// Static tuning for one level
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LevelConfig {
    pub lives: u32,
    pub paddle_width: f32,
    /// Speed multiplier for both paddle and ball
    pub speed: f32,
    /// Block grid columns
    pub columns: u32,
    /// Block grid rows
    pub rows: u32,
    /// Field width in game units
    pub width: f32,
    /// Field height in game units
    pub height: f32,
}

impl LevelConfig {
    pub fn size(&self) -> GameSize {
        GameSize::new(self.width, self.height)
    }

    fn validate(&self, index: usize) -> Result<(), ConfigError> {
        let invalid = |reason: String| ConfigError::InvalidLevel { index, reason };

        let positive = |v: f32| v.is_finite() && v > 0.0;
        if !positive(self.width) || !positive(self.height) {
            return Err(invalid(format!("field {}x{} must be positive", self.width, self.height)));
        }
        if !positive(self.speed) {
            return Err(invalid(format!("speed {} must be positive", self.speed)));
        }
        if !positive(self.paddle_width) || self.paddle_width > self.width {
            return Err(invalid(format!(
                "paddle width {} must be positive and fit the field width {}",
                self.paddle_width, self.width
            )));
        }
        if self.lives == 0 {
            return Err(invalid("lives must be at least 1".to_string()));
        }
        if self.columns == 0 || self.rows == 0 {
            return Err(invalid("block grid must have at least one column and row".to_string()));
        }
        if self.columns as f32 * BLOCK_WIDTH > self.width {
            return Err(invalid(format!(
                "{} columns do not fit the field width {}",
                self.columns, self.width
            )));
        }
        Ok(())
    }
}

/// Ordered, non-empty sequence of levels defining game progression
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LevelCatalog {
    levels: Vec<LevelConfig>,
}

impl LevelCatalog {
    pub fn new(levels: Vec<LevelConfig>) -> Result<Self, ConfigError> {
        if levels.is_empty() {
            return Err(ConfigError::EmptyCatalog);
        }
        for (index, level) in levels.iter().enumerate() {
            level.validate(index)?;
        }
        Ok(Self { levels })
    }

    /// Parse a JSON array of levels
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let levels: Vec<LevelConfig> = serde_json::from_str(json)?;
        Self::new(levels)
    }

    pub fn len(&self) -> usize {
        self.levels.len()
    }

    /// Always false; an empty catalog cannot be constructed
    pub fn is_empty(&self) -> bool {
        self.levels.is_empty()
    }

    pub fn get(&self, index: usize) -> Result<&LevelConfig, ConfigError> {
        self.levels.get(index).ok_or(ConfigError::LevelOutOfRange {
            index,
            len: self.levels.len(),
        })
    }

    /// Level at `index`, or the last level past the end
    pub fn get_or_last(&self, index: usize) -> &LevelConfig {
        &self.levels[index.min(self.levels.len() - 1)]
    }

    /// Level that follows `index`, holding at the last one
    pub fn next_index(&self, index: usize) -> usize {
        (index + 1).min(self.levels.len() - 1)
    }

    pub fn iter(&self) -> impl Iterator<Item = &LevelConfig> {
        self.levels.iter()
    }
}

impl Default for LevelCatalog {
    fn default() -> Self {
        let level = |lives, paddle_width, speed, columns, rows| LevelConfig {
            lives,
            paddle_width,
            speed,
            columns,
            rows,
            width: MAX_COLUMNS as f32,
            height: MAX_ROWS as f32,
        };
        Self {
            levels: vec![
                level(3, 2.5, 1.0, 6, 4),
                level(4, 3.0, 1.4, 7, 5),
                level(5, 2.5, 1.8, 8, 7),
                level(6, 2.0, 2.0, 9, 11),
            ],
        }
    }
}

/// Generate a `columns` x `rows` grid of blocks with random densities
///
/// The grid is centered horizontally; its first row sits at
/// `(height - rows) / 2 + height / 8`. Blocks come back row by row.
pub fn generate_blocks<R: Rng + ?Sized>(columns: u32, rows: u32, size: GameSize, rng: &mut R) -> Vec<Block> {
    let start_x = (size.width - columns as f32) / 2.0;
    let start_y = (size.height - rows as f32) / 2.0 + size.height / 8.0;

    let mut blocks = Vec::with_capacity((columns * rows) as usize);
    for row in 0..rows {
        for column in 0..columns {
            blocks.push(Block {
                position: Vec2::new(
                    start_x + column as f32 * BLOCK_WIDTH,
                    start_y + row as f32 * BLOCK_ROW_SPACING,
                ),
                width: BLOCK_WIDTH,
                height: BLOCK_HEIGHT,
                density: rng.random_range(0..MAX_BLOCK_DENSITY),
            });
        }
    }
    blocks
}
