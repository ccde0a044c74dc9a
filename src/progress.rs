//! Level progress
//!
//! Only the index of the level being played is remembered. Where it is
//! stored is up to the host; the session talks to a `ProgressStore`.

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Saved progress record
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Progress {
    /// Current level index (0-based)
    pub level: usize,
}

impl Progress {
    pub fn to_json(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string(self)?)
    }

    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }
}

/// Somewhere to keep progress between runs
pub trait ProgressStore {
    /// Saved progress, `None` when nothing was saved yet
    fn load(&self) -> Option<Progress>;
    fn save(&mut self, progress: &Progress);
}

/// Store that keeps progress for the lifetime of the process
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    saved: Option<String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store pre-seeded with a saved level
    pub fn with_level(level: usize) -> Self {
        let mut store = Self::new();
        store.save(&Progress { level });
        store
    }
}

impl ProgressStore for MemoryStore {
    fn load(&self) -> Option<Progress> {
        if let Some(json) = self.saved.as_deref() {
            if let Ok(progress) = serde_json::from_str::<Progress>(json) {
                log::info!("Loaded progress (level {})", progress.level + 1);
                return Some(progress);
            }
        }

        log::info!("No saved progress, starting fresh");
        None
    }

    fn save(&mut self, progress: &Progress) {
        if let Ok(json) = serde_json::to_string(progress) {
            self.saved = Some(json);
            log::info!("Progress saved (level {})", progress.level + 1);
        }
    }
}
