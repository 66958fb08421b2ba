//! User-facing pause settings.
//!
//! Defaults follow the 20-20-20 rule: every 20 minutes, look at something
//! 20 feet away for 20 seconds. Durations are always at least 1 so no
//! countdown can start at zero or below.

use serde::{Deserialize, Serialize};

/// Persisted reminder settings.
///
/// Missing fields in stored JSON fall back to their defaults.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
#[serde(default, rename_all = "camelCase")]
pub struct PauseSettings {
    /// Whether reminders are active.
    pub enabled: bool,
    /// Minutes of work between breaks.
    pub work_interval_minutes: u32,
    /// Seconds each break lasts.
    pub break_duration_seconds: u32,
    /// Render the remaining time while the scheduler runs.
    pub show_countdown: bool,
    /// Freeze the countdown while the user is idle.
    pub pause_when_idle: bool,
}

impl Default for PauseSettings {
    fn default() -> Self {
        PauseSettings {
            enabled: false,
            work_interval_minutes: 20,
            break_duration_seconds: 20,
            show_countdown: true,
            pause_when_idle: true,
        }
    }
}

impl PauseSettings {
    /// Length of a full work interval in seconds.
    pub fn work_interval_seconds(&self) -> u32 {
        self.work_interval_minutes.max(1).saturating_mul(60)
    }

    pub fn break_seconds(&self) -> u32 {
        self.break_duration_seconds.max(1)
    }

    /// Clamps numeric fields to their minimum of 1.
    pub fn sanitized(mut self) -> Self {
        self.work_interval_minutes = self.work_interval_minutes.max(1);
        self.break_duration_seconds = self.break_duration_seconds.max(1);
        self
    }

    /// Merges a partial update into these settings.
    pub fn apply(&mut self, update: &PauseSettingsUpdate) {
        if let Some(enabled) = update.enabled {
            self.enabled = enabled;
        }
        if let Some(minutes) = update.work_interval_minutes {
            self.work_interval_minutes = clamp_positive(minutes);
        }
        if let Some(seconds) = update.break_duration_seconds {
            self.break_duration_seconds = clamp_positive(seconds);
        }
        if let Some(show) = update.show_countdown {
            self.show_countdown = show;
        }
        if let Some(pause) = update.pause_when_idle {
            self.pause_when_idle = pause;
        }
    }
}

/// Partial settings change. `None` leaves a field untouched.
///
/// Numeric fields are signed so out-of-range input can be clamped instead of
/// failing to parse.
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq, Eq)]
#[serde(default, rename_all = "camelCase")]
pub struct PauseSettingsUpdate {
    pub enabled: Option<bool>,
    pub work_interval_minutes: Option<i64>,
    pub break_duration_seconds: Option<i64>,
    pub show_countdown: Option<bool>,
    pub pause_when_idle: Option<bool>,
}

impl PauseSettingsUpdate {
    pub fn enabled(enabled: bool) -> Self {
        Self {
            enabled: Some(enabled),
            ..Default::default()
        }
    }

    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

fn clamp_positive(value: i64) -> u32 {
    value.clamp(1, u32::MAX as i64) as u32
}
