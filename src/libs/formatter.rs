//! Duration formatting for terminal output.
//!
//! - [`format_countdown`]: remaining time of the running countdown, `m:ss`.
//! - [`format_duration`]: accumulated rest time, `HH:MM`.
//! - [`countdown_message`]: the line the foreground watcher prints on each
//!   state change, or nothing when the countdown is hidden.
//!
//! ```rust
//! use breakwatch::libs::formatter::{format_countdown, format_duration};
//! use chrono::Duration;
//!
//! assert_eq!(format_countdown(1200), "20:00");
//! assert_eq!(format_countdown(65), "1:05");
//! assert_eq!(format_duration(&Duration::minutes(90)), "01:30");
//! ```

use crate::libs::messages::Message;
use crate::libs::scheduler::PauseState;
use chrono::Duration;

/// Formats seconds as `m:ss`. Minutes are not capped at 59.
pub fn format_countdown(seconds: u32) -> String {
    format!("{}:{:02}", seconds / 60, seconds % 60)
}

/// Formats a duration as `HH:MM`. Seconds are truncated, negatives show as `00:00`.
pub fn format_duration(duration: &Duration) -> String {
    let hours = duration.num_hours();
    let mins = duration.num_minutes() % 60;
    format!("{:02}:{:02}", hours.max(0), mins.max(0))
}

/// Rest seconds as `HH:MM`.
pub fn format_rest_seconds(seconds: u64) -> String {
    format!("{:02}:{:02}", seconds / 3600, (seconds / 60) % 60)
}

/// Countdown line for `state`, or `None` when it should not be shown.
pub fn countdown_message(state: &PauseState) -> Option<Message> {
    if !state.running || !state.settings.show_countdown {
        return None;
    }

    let remaining = format_countdown(state.remaining_seconds);
    Some(if state.is_on_break {
        Message::CountdownBreak(remaining)
    } else {
        Message::CountdownWork(remaining)
    })
}
