use crate::libs::formatter::{format_countdown, format_rest_seconds};
use crate::libs::messages::Message;
use crate::libs::scheduler::PauseState;
use crate::libs::stats::StatsSummary;
use crate::msg_print;
use anyhow::Result;
use prettytable::{row, Table};

pub struct View {}

impl View {
    /// Settings and countdown of the scheduler.
    pub fn status(state: &PauseState) -> Result<()> {
        let settings = &state.settings;
        let phase = match (state.running, state.is_on_break) {
            (false, _) => "stopped",
            (true, false) => "work",
            (true, true) => "break",
        };

        let remaining = if state.running {
            format_countdown(state.remaining_seconds)
        } else {
            "-".to_string()
        };

        msg_print!(Message::SettingsHeader, true);
        let mut table = Table::new();
        table.add_row(row!["ENABLED", "WORK (MIN)", "BREAK (S)", "COUNTDOWN", "IDLE PAUSE", "PHASE", "REMAINING"]);
        table.add_row(row![
            yes_no(settings.enabled),
            settings.work_interval_minutes,
            settings.break_duration_seconds,
            yes_no(settings.show_countdown),
            yes_no(settings.pause_when_idle),
            phase,
            remaining
        ]);
        table.printstd();

        Ok(())
    }

    /// Today, last-7-days and all-time statistics.
    pub fn stats(summary: &StatsSummary) -> Result<()> {
        let today = &summary.today;
        let week = &summary.week;
        let all_time = &summary.all_time;
        let since = all_time.first_active_date.map(|date| date.to_string()).unwrap_or_else(|| "-".to_string());

        msg_print!(Message::StatsTodayHeader, true);
        let mut table = Table::new();
        table.add_row(row!["DATE", "TAKEN", "SNOOZED", "DISMISSED", "REST"]);
        table.add_row(row![
            today.date,
            today.breaks_taken,
            today.breaks_snoozed,
            today.breaks_dismissed,
            format_rest_seconds(today.total_rest_seconds)
        ]);
        table.printstd();

        msg_print!(Message::StatsWeekHeader, true);
        let mut table = Table::new();
        table.add_row(row!["TAKEN", "SNOOZED", "DISMISSED", "REST", "COMPLIANCE"]);
        table.add_row(row![
            week.breaks_taken,
            week.breaks_snoozed,
            week.breaks_dismissed,
            format_rest_seconds(week.total_rest_seconds),
            format!("{}%", week.compliance_rate)
        ]);
        table.printstd();

        msg_print!(Message::StatsAllTimeHeader, true);
        let mut table = Table::new();
        table.add_row(row!["TAKEN", "REST", "STREAK", "LONGEST", "SINCE"]);
        table.add_row(row![
            all_time.breaks_taken,
            format_rest_seconds(all_time.total_rest_seconds),
            all_time.current_streak,
            all_time.longest_streak,
            since
        ]);
        table.printstd();

        if all_time.first_active_date.is_none() {
            msg_print!(Message::StatsEmpty, true);
        }

        Ok(())
    }
}

fn yes_no(value: bool) -> &'static str {
    if value {
        "yes"
    } else {
        "no"
    }
}
