//! Control preferences
//!
//! Persisted separately from level progress by whoever hosts the session.

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// How the paddle follows the player
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum PaddleControl {
    /// Arrow keys / A and D only; pointer motion is ignored
    KeyboardOnly,
    /// Pointer motion places the paddle on the next tick, otherwise keys apply
    #[default]
    PointerOverridesKeyboard,
}

impl PaddleControl {
    pub fn as_str(&self) -> &'static str {
        match self {
            PaddleControl::KeyboardOnly => "Keyboard",
            PaddleControl::PointerOverridesKeyboard => "Pointer",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "keyboard" | "keys" => Some(PaddleControl::KeyboardOnly),
            "pointer" | "mouse" => Some(PaddleControl::PointerOverridesKeyboard),
            _ => None,
        }
    }

    /// Whether pointer motion should reach the simulation
    pub fn uses_pointer(&self) -> bool {
        matches!(self, PaddleControl::PointerOverridesKeyboard)
    }
}

/// Player preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub paddle_control: PaddleControl,

    // === Key bindings (DOM key codes) ===
    /// Keys that move the paddle left (A, ArrowLeft)
    pub left_keys: Vec<u32>,
    /// Keys that move the paddle right (D, ArrowRight)
    pub right_keys: Vec<u32>,
    /// Key that toggles pause on release (Space)
    pub pause_key: u32,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            paddle_control: PaddleControl::default(),
            left_keys: vec![65, 37],
            right_keys: vec![68, 39],
            pause_key: 32,
        }
    }
}

impl Settings {
    /// Parse settings from JSON (missing fields use defaults)
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn to_json(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string(self)?)
    }
}
