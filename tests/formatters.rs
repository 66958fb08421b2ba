#[cfg(test)]
mod tests {
    use breakwatch::libs::formatter::{countdown_message, format_countdown, format_duration, format_rest_seconds};
    use breakwatch::libs::messages::Message;
    use breakwatch::libs::scheduler::PauseState;
    use breakwatch::libs::settings::PauseSettings;
    use chrono::Duration;

    fn state(running: bool, is_on_break: bool, remaining_seconds: u32) -> PauseState {
        PauseState {
            settings: PauseSettings {
                enabled: running,
                ..PauseSettings::default()
            },
            running,
            remaining_seconds,
            is_on_break,
        }
    }

    #[test]
    fn test_format_countdown() {
        assert_eq!(format_countdown(0), "0:00");
        assert_eq!(format_countdown(9), "0:09");
        assert_eq!(format_countdown(300), "5:00");
        assert_eq!(format_countdown(1199), "19:59");
    }

    #[test]
    fn test_format_countdown_long_interval() {
        assert_eq!(format_countdown(90 * 60 + 1), "90:01");
    }

    #[test]
    fn test_format_duration() {
        assert_eq!(format_duration(&Duration::zero()), "00:00");
        assert_eq!(format_duration(&Duration::minutes(59)), "00:59");
        assert_eq!(format_duration(&(Duration::hours(2) + Duration::minutes(5))), "02:05");
        assert_eq!(format_duration(&Duration::seconds(119)), "00:01");
    }

    #[test]
    fn test_format_duration_negative() {
        assert_eq!(format_duration(&Duration::minutes(-30)), "00:00");
    }

    #[test]
    fn test_format_rest_seconds() {
        assert_eq!(format_rest_seconds(0), "00:00");
        assert_eq!(format_rest_seconds(20 * 90), "00:30");
        assert_eq!(format_rest_seconds(3600 * 26 + 60), "26:01");
    }

    #[test]
    fn test_countdown_message_for_work_and_break() {
        assert_eq!(
            countdown_message(&state(true, false, 1200)),
            Some(Message::CountdownWork("20:00".to_string()))
        );
        assert_eq!(
            countdown_message(&state(true, true, 15)),
            Some(Message::CountdownBreak("0:15".to_string()))
        );
    }

    #[test]
    fn test_countdown_message_hidden() {
        assert_eq!(countdown_message(&state(false, false, 1200)), None);

        let mut hidden = state(true, false, 1200);
        hidden.settings.show_countdown = false;
        assert_eq!(countdown_message(&hidden), None);
    }
}
