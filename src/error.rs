//! Configuration errors
//!
//! The simulation itself is total; everything that can go wrong is caught
//! while the level catalog, tuning and saved progress are loaded.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("level catalog is empty")]
    EmptyCatalog,

    #[error("level index {index} out of range (catalog has {len} levels)")]
    LevelOutOfRange { index: usize, len: usize },

    #[error("level {index} is invalid: {reason}")]
    InvalidLevel { index: usize, reason: String },

    #[error("invalid tuning: {0}")]
    InvalidTuning(String),

    #[error("failed to parse config: {0}")]
    Parse(#[from] serde_json::Error),
}
