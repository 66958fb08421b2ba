//! Last-activity bookkeeping for idle detection.
//!
//! Input sources (the global input listener, editor hooks, the runner itself
//! when no listener is available) call [`ActivityTracker::record_activity`];
//! the scheduler asks [`ActivityTracker::is_idle`] once per tick. Nothing here
//! is persisted, so every process starts out "active".
//!
//! Elapsed time is measured on the monotonic clock, so adjusting the system
//! time neither wakes an idle user nor makes an active one idle.

use crate::libs::clock::Clock;
use parking_lot::Mutex;
use std::sync::Arc;
use std::time::{Duration, Instant};

/// No input for this long means the user is away.
pub const IDLE_THRESHOLD_MS: i64 = 2 * 60 * 1000;

/// Shared, cheaply cloneable record of the last user activity.
#[derive(Clone)]
pub struct ActivityTracker {
    clock: Arc<dyn Clock>,
    last_activity: Arc<Mutex<Instant>>,
}

impl ActivityTracker {
    pub fn new(clock: Arc<dyn Clock>) -> Self {
        let now = clock.instant();
        Self {
            clock,
            last_activity: Arc::new(Mutex::new(now)),
        }
    }

    pub fn record_activity(&self) {
        *self.last_activity.lock() = self.clock.instant();
    }

    /// True when more than `threshold_ms` milliseconds passed since the last activity.
    pub fn is_idle(&self, threshold_ms: i64) -> bool {
        let threshold = Duration::from_millis(u64::try_from(threshold_ms).unwrap_or(0));
        self.idle_for() > threshold
    }

    /// Time since the last recorded activity.
    pub fn idle_for(&self) -> Duration {
        self.clock.instant().saturating_duration_since(*self.last_activity.lock())
    }
}
