//! Non-interactive settings changes.

use crate::commands::open_scheduler;
use crate::libs::daemon;
use crate::libs::messages::Message;
use crate::libs::settings::PauseSettingsUpdate;
use crate::libs::view::View;
use crate::{msg_info, msg_success};
use anyhow::Result;
use clap::Args;

/// Only the options given are changed. Numbers below 1 are raised to 1.
#[derive(Debug, Args)]
pub struct SetArgs {
    /// Turn break reminders on
    #[arg(long, conflicts_with = "disable")]
    enable: bool,

    /// Turn break reminders off
    #[arg(long)]
    disable: bool,

    /// Minutes of work between breaks
    #[arg(long = "work", short = 'w', allow_negative_numbers = true)]
    work_interval_minutes: Option<i64>,

    /// Break length in seconds
    #[arg(long = "break", short = 'b', allow_negative_numbers = true)]
    break_duration_seconds: Option<i64>,

    /// Show the countdown while watching
    #[arg(long = "countdown")]
    show_countdown: Option<bool>,

    /// Freeze the countdown while the user is idle
    #[arg(long = "idle-pause")]
    pause_when_idle: Option<bool>,
}

impl SetArgs {
    fn update(&self) -> PauseSettingsUpdate {
        let enabled = match (self.enable, self.disable) {
            (true, _) => Some(true),
            (_, true) => Some(false),
            _ => None,
        };

        PauseSettingsUpdate {
            enabled,
            work_interval_minutes: self.work_interval_minutes,
            break_duration_seconds: self.break_duration_seconds,
            show_countdown: self.show_countdown,
            pause_when_idle: self.pause_when_idle,
        }
    }
}

pub fn cmd(args: SetArgs) -> Result<()> {
    let update = args.update();
    if update.is_empty() {
        msg_info!(Message::SettingsNothingToChange);
        return Ok(());
    }

    daemon::ensure_not_running()?;
    let mut scheduler = open_scheduler()?;
    scheduler.update_settings(update)?;

    msg_success!(Message::SettingsSaved);
    View::status(&scheduler.state())
}
