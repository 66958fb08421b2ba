#[cfg(test)]
mod tests {
    use breakwatch::libs::activity::{ActivityTracker, IDLE_THRESHOLD_MS};
    use breakwatch::libs::clock::ManualClock;
    use chrono::Duration;
    use std::sync::Arc;

    fn tracker() -> (ActivityTracker, ManualClock) {
        let clock = ManualClock::default();
        (ActivityTracker::new(Arc::new(clock.clone())), clock)
    }

    #[test]
    fn test_new_tracker_is_active() {
        let (tracker, _clock) = tracker();

        assert!(!tracker.is_idle(IDLE_THRESHOLD_MS));
    }

    #[test]
    fn test_idle_only_after_threshold_is_exceeded() {
        let (tracker, clock) = tracker();

        clock.advance(Duration::milliseconds(IDLE_THRESHOLD_MS));
        assert!(!tracker.is_idle(IDLE_THRESHOLD_MS));

        clock.advance(Duration::milliseconds(1));
        assert!(tracker.is_idle(IDLE_THRESHOLD_MS));
    }

    #[test]
    fn test_activity_clears_idle() {
        let (tracker, clock) = tracker();
        clock.advance(Duration::minutes(10));
        assert!(tracker.is_idle(IDLE_THRESHOLD_MS));

        tracker.record_activity();

        assert!(!tracker.is_idle(IDLE_THRESHOLD_MS));
        assert_eq!(tracker.idle_for(), std::time::Duration::ZERO);
    }

    #[test]
    fn test_clones_share_last_activity() {
        let (tracker, clock) = tracker();
        let listener_side = tracker.clone();
        clock.advance(Duration::minutes(5));

        listener_side.record_activity();

        assert!(!tracker.is_idle(IDLE_THRESHOLD_MS));
    }

    #[test]
    fn test_wall_clock_jump_forward_does_not_make_user_idle() {
        let (tracker, clock) = tracker();
        clock.advance(Duration::seconds(30));

        clock.adjust_wall_clock(Duration::hours(3));

        assert!(!tracker.is_idle(IDLE_THRESHOLD_MS));
        assert_eq!(tracker.idle_for(), std::time::Duration::from_secs(30));
    }

    #[test]
    fn test_wall_clock_jump_back_does_not_hide_idle_time() {
        let (tracker, clock) = tracker();
        clock.adjust_wall_clock(-Duration::hours(1));

        clock.advance(Duration::minutes(3));

        assert!(tracker.is_idle(IDLE_THRESHOLD_MS));
    }
}
