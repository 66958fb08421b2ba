//! Break countdown state machine.
//!
//! The countdown is a plain value, `{phase, remaining_seconds}`, moved forward
//! by pure transition functions. It owns no timer and performs no I/O: the
//! scheduler feeds it one tick per second and acts on the returned outcome
//! (show a prompt, record a taken break, persist, notify).
//!
//! ## Transitions
//!
//! ```text
//! Work --(remaining hits 0)--> Break      emits BreakDue
//! Break --(remaining hits 0)--> Work      emits BreakCompleted
//! any --(Snoozed)--> Work (300 s)
//! any --(Dismissed)--> Work (full interval)
//! Break --(NoResponse)--> Break (rest countdown restarts)
//! ```

use crate::libs::settings::PauseSettings;
use serde::{Deserialize, Serialize};

/// Snoozing always grants exactly five minutes, whatever the work interval.
pub const SNOOZE_SECONDS: u32 = 5 * 60;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Phase {
    /// Counting down to the next break.
    Work,
    /// Counting down the rest period.
    Break,
}

/// What the user did with a break prompt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BreakResponse {
    /// Skipped the break explicitly.
    Dismissed,
    /// Asked to be reminded again in five minutes.
    Snoozed,
    /// Closed the prompt without choosing; the break goes on.
    NoResponse,
}

/// Result of a single tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// Idle gating held the countdown.
    Frozen,
    /// The countdown moved and the phase continues.
    Counting,
    /// The work interval ran out; a break starts now.
    BreakDue,
    /// The rest period ran out; the break counts as taken.
    BreakCompleted { rest_seconds: u32 },
}

/// Break outcome that must be reflected in the statistics.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BreakOutcome {
    Taken { rest_seconds: u32 },
    Snoozed,
    Dismissed,
}

/// Persisted countdown state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Countdown {
    pub phase: Phase,
    pub remaining_seconds: u32,
}

impl Countdown {
    /// A fresh work interval.
    pub fn work(settings: &PauseSettings) -> Self {
        Self {
            phase: Phase::Work,
            remaining_seconds: settings.work_interval_seconds(),
        }
    }

    /// A fresh rest period.
    pub fn rest(settings: &PauseSettings) -> Self {
        Self {
            phase: Phase::Break,
            remaining_seconds: settings.break_seconds(),
        }
    }

    /// The short work interval granted by a snooze.
    pub fn snoozed() -> Self {
        Self {
            phase: Phase::Work,
            remaining_seconds: SNOOZE_SECONDS,
        }
    }

    /// Whether a stored countdown can be resumed.
    pub fn is_resumable(&self) -> bool {
        self.remaining_seconds > 0
    }

    pub fn is_on_break(&self) -> bool {
        self.phase == Phase::Break
    }

    // ── Transitions ──────────────────────────────────────────────────

    /// Advances the countdown by one second unless `gated` (user idle with
    /// idle pausing on), in which case nothing changes.
    pub fn tick(self, settings: &PauseSettings, gated: bool) -> (Self, TickOutcome) {
        if gated {
            return (self, TickOutcome::Frozen);
        }

        let remaining_seconds = self.remaining_seconds.saturating_sub(1);
        if remaining_seconds > 0 {
            return (Self { remaining_seconds, ..self }, TickOutcome::Counting);
        }

        match self.phase {
            Phase::Work => (Self::rest(settings), TickOutcome::BreakDue),
            Phase::Break => (
                Self::work(settings),
                TickOutcome::BreakCompleted {
                    rest_seconds: settings.break_seconds(),
                },
            ),
        }
    }

    /// Applies the user's answer to a break prompt.
    pub fn respond(self, response: BreakResponse, settings: &PauseSettings) -> (Self, Option<BreakOutcome>) {
        match response {
            BreakResponse::Dismissed => (Self::work(settings), Some(BreakOutcome::Dismissed)),
            BreakResponse::Snoozed => (Self::snoozed(), Some(BreakOutcome::Snoozed)),
            BreakResponse::NoResponse => match self.phase {
                Phase::Break => (Self::rest(settings), None),
                Phase::Work => (self, None),
            },
        }
    }
}
