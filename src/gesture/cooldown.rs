//! Cooldown gate for dispatched gestures
//!
//! Two checks guard dispatch: the `active` flag, which freezes the detector,
//! and an elapsed-time check made at the moment a gesture is produced. They
//! are refreshed at different points in the frame, so both are kept.

use std::time::{Duration, Instant};

use tracing::debug;

/// Default time between two dispatched gestures
pub const DEFAULT_COOLDOWN: Duration = Duration::from_secs(1);

/// Rate limiter for gesture-triggered actions
#[derive(Debug, Clone)]
pub struct CooldownGate {
    duration: Duration,
    active: bool,
    last_swipe: Instant,
}

impl CooldownGate {
    /// Create a gate whose clock starts at `started`
    ///
    /// No gesture is dispatched until `duration` has passed since `started`.
    pub fn new(duration: Duration, started: Instant) -> Self {
        Self {
            duration,
            active: false,
            last_swipe: started,
        }
    }

    /// Whether the detector is frozen
    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Whether enough time has passed since the last dispatch
    pub fn permits(&self, now: Instant) -> bool {
        self.elapsed(now) > self.duration
    }

    /// Time left before [`permits`](Self::permits) returns true
    pub fn remaining(&self, now: Instant) -> Duration {
        self.duration.saturating_sub(self.elapsed(now))
    }

    /// Start a cooldown after a dispatch at `now`
    pub fn record(&mut self, now: Instant) {
        self.active = true;
        self.last_swipe = now;
    }

    /// Clear the flag once the cooldown has run out
    ///
    /// Returns true if the cooldown ended on this call.
    pub fn refresh(&mut self, now: Instant) -> bool {
        if self.active && self.permits(now) {
            self.active = false;
            debug!(duration_ms = self.duration.as_millis() as u64, "cooldown ended");
            return true;
        }
        false
    }

    fn elapsed(&self, now: Instant) -> Duration {
        now.saturating_duration_since(self.last_swipe)
    }
}
