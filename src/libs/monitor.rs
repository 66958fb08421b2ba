//! Global input listener feeding the [`ActivityTracker`].
//!
//! With the `input-monitor` feature, a dedicated thread listens for keyboard,
//! mouse and scroll events through `rdev` and records each one as activity.
//! `rdev::listen` blocks for the lifetime of the process, so the thread is
//! never joined. The feature is on by default. Without it there is no
//! system-wide input source and [`InputMonitor::start`] reports that idle
//! gating is unavailable.

use crate::libs::activity::ActivityTracker;

/// Handle to the input listener.
pub struct InputMonitor {
    tracker: ActivityTracker,
}

impl InputMonitor {
    pub fn new(tracker: ActivityTracker) -> Self {
        Self { tracker }
    }

    /// Starts listening in the background.
    ///
    /// Returns `false` when input monitoring is not compiled in.
    #[cfg(feature = "input-monitor")]
    pub fn start(self) -> bool {
        use crate::libs::messages::Message;
        use crate::msg_warning;
        use rdev::{listen, Event, EventType};
        use std::time::Duration;

        std::thread::spawn(move || loop {
            let tracker = self.tracker.clone();
            let result = listen(move |event: Event| match event.event_type {
                EventType::KeyPress(_) | EventType::ButtonPress(_) | EventType::MouseMove { .. } | EventType::Wheel { .. } => {
                    tracker.record_activity();
                }
                _ => {}
            });

            match result {
                Err(e) => {
                    msg_warning!(Message::InputListenerFailed(format!("{:?}", e)));
                    // A dead listener must not read as an idle user.
                    self.tracker.record_activity();
                    std::thread::sleep(Duration::from_secs(1));
                }
                Ok(()) => break,
            }
        });

        tracing::debug!("input listener started");
        true
    }

    #[cfg(not(feature = "input-monitor"))]
    pub fn start(self) -> bool {
        let _ = self.tracker;
        false
    }
}

#[cfg(test)]
mod tests {
    #[test]
    fn input_monitoring_is_a_default_feature() {
        let manifest = include_str!("../../Cargo.toml");

        assert!(manifest.contains(r#"default = ["input-monitor"]"#));
    }

    #[cfg(not(feature = "input-monitor"))]
    #[test]
    fn start_reports_missing_listener() {
        use super::InputMonitor;
        use crate::libs::activity::ActivityTracker;
        use crate::libs::clock::SystemClock;
        use std::sync::Arc;

        let tracker = ActivityTracker::new(Arc::new(SystemClock));

        assert!(!InputMonitor::new(tracker).start());
    }
}
