//! Data-driven game balance
//!
//! Bounce feel and spawn placement, loadable from JSON so they can be tweaked
//! without touching the simulation.

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Where a fresh ball is placed horizontally
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum BallSpawn {
    /// X = field height / 2, off-center on non-square fields
    #[default]
    FieldHeight,
    /// X = field width / 2
    Centered,
}

/// Gameplay tuning knobs
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    /// Width of the random perturbation added to every bounce.
    /// Each component is drawn from [-level/2, level/2].
    pub distortion_level: f32,
    /// Minimum angle (degrees) between a bounce direction and the surface normal.
    /// The maximum is 90 minus this.
    pub min_bounce_angle: f32,
    /// Ball spawn placement
    pub ball_spawn: BallSpawn,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            distortion_level: 0.3,
            min_bounce_angle: 15.0,
            ball_spawn: BallSpawn::FieldHeight,
        }
    }
}

impl Tuning {
    /// Largest allowed angle between a bounce direction and the normal
    #[inline]
    pub fn max_bounce_angle(&self) -> f32 {
        90.0 - self.min_bounce_angle
    }

    /// Check the knobs are usable by the simulation
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.distortion_level.is_finite() || !(0.0..1.0).contains(&self.distortion_level) {
            return Err(ConfigError::InvalidTuning(format!(
                "distortion_level must be in [0, 1), got {}",
                self.distortion_level
            )));
        }
        if !self.min_bounce_angle.is_finite() || !(0.0..45.0).contains(&self.min_bounce_angle) {
            return Err(ConfigError::InvalidTuning(format!(
                "min_bounce_angle must be in [0, 45), got {}",
                self.min_bounce_angle
            )));
        }
        Ok(())
    }

    /// Parse and validate tuning from JSON (missing fields use defaults)
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let tuning: Tuning = serde_json::from_str(json)?;
        tuning.validate()?;
        Ok(tuning)
    }
}
