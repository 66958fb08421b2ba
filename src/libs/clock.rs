//! Time sources.
//!
//! The scheduler and the statistics engine never call `Local::now()` directly;
//! they ask a [`Clock`]. Production code uses [`SystemClock`], tests drive a
//! [`ManualClock`] to cross midnight or simulate idle time without sleeping.
//!
//! Calendar questions (which day is it) go through [`Clock::now`]. Elapsed
//! time goes through [`Clock::instant`], which never jumps when the system
//! clock is adjusted.

use chrono::{DateTime, Duration, Local, NaiveDate};
use parking_lot::Mutex;
use std::sync::Arc;
use std::time::Instant;

pub trait Clock: Send + Sync {
    /// Current local time.
    fn now(&self) -> DateTime<Local>;

    /// Monotonic reading for measuring elapsed time.
    fn instant(&self) -> Instant;

    /// Current local calendar date.
    fn today(&self) -> NaiveDate {
        self.now().date_naive()
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Local> {
        Local::now()
    }

    fn instant(&self) -> Instant {
        Instant::now()
    }
}

#[derive(Debug)]
struct ManualTime {
    now: DateTime<Local>,
    instant: Instant,
}

/// Clock that only moves when told to. Clones share the same time.
#[derive(Debug, Clone)]
pub struct ManualClock {
    time: Arc<Mutex<ManualTime>>,
}

impl ManualClock {
    pub fn new(start: DateTime<Local>) -> Self {
        Self {
            time: Arc::new(Mutex::new(ManualTime {
                now: start,
                instant: Instant::now(),
            })),
        }
    }

    /// Lets time pass. Both the wall clock and the monotonic reading move.
    pub fn advance(&self, by: Duration) {
        let mut time = self.time.lock();
        time.now += by;
        time.instant = match by.to_std() {
            Ok(forward) => time.instant + forward,
            Err(_) => {
                let back = (-by).to_std().unwrap_or_default();
                time.instant.checked_sub(back).unwrap_or(time.instant)
            }
        };
    }

    /// Moves the wall clock only, the way an NTP sync or a manual change of
    /// the system time would.
    pub fn adjust_wall_clock(&self, by: Duration) {
        self.time.lock().now += by;
    }
}

impl Default for ManualClock {
    fn default() -> Self {
        Self::new(Local::now())
    }
}

impl Clock for ManualClock {
    fn now(&self) -> DateTime<Local> {
        self.time.lock().now
    }

    fn instant(&self) -> Instant {
        self.time.lock().instant
    }
}
