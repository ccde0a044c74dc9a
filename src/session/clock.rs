//! Wall-clock bookkeeping for the tick driver
//!
//! Time only advances while unpaused. Ticks that arrive during a pause are
//! stamped but simulate nothing. A resume without a timestamp (`toggle`)
//! leaks the time since the last paused tick, at most one tick period, into
//! the next `dt`; `toggle_at` excludes the paused span exactly.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PauseClock {
    /// Timestamp (ms) of the last tick seen
    last_tick_ms: f64,
    paused: bool,
}

impl PauseClock {
    pub fn new(now_ms: f64) -> Self {
        Self {
            last_tick_ms: now_ms,
            paused: false,
        }
    }

    #[inline]
    pub fn is_paused(&self) -> bool {
        self.paused
    }

    /// Pause if running, resume if paused
    pub fn toggle(self) -> Self {
        Self {
            paused: !self.paused,
            ..self
        }
    }

    /// Like `toggle`, but a resume restarts timing at `now_ms`
    pub fn toggle_at(self, now_ms: f64) -> Self {
        let toggled = self.toggle();
        if toggled.paused || !now_ms.is_finite() {
            return toggled;
        }
        Self {
            last_tick_ms: now_ms,
            ..toggled
        }
    }

    /// Stamp a tick at `now_ms` and return the milliseconds to simulate
    ///
    /// Paused clocks report zero. Clocks that run backwards or report
    /// non-finite time are clamped to zero elapsed.
    pub fn advance(self, now_ms: f64) -> (Self, f64) {
        if !now_ms.is_finite() {
            log::warn!("Ignoring non-finite tick time {}", now_ms);
            return (self, 0.0);
        }
        let stamped = Self {
            last_tick_ms: now_ms,
            ..self
        };
        if self.paused {
            return (stamped, 0.0);
        }

        let elapsed = now_ms - self.last_tick_ms;
        if elapsed < 0.0 {
            log::warn!("Clock went back {:.1} ms, simulating 0 ms", -elapsed);
            return (stamped, 0.0);
        }
        (stamped, elapsed)
    }
}
