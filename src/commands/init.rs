//! Interactive setup command.
//!
//! Walks through the prompt configuration (`config.json`) and then the
//! reminder settings stored with the scheduler state.

use crate::commands::open_scheduler;
use crate::libs::config::{init_pause_settings, Config};
use crate::libs::daemon;
use crate::libs::messages::Message;
use crate::msg_success;
use anyhow::Result;

pub fn cmd() -> Result<()> {
    daemon::ensure_not_running()?;

    Config::init()?.save()?;
    msg_success!(Message::ConfigSaved);

    let mut scheduler = open_scheduler()?;
    let update = init_pause_settings(scheduler.settings())?;
    if !update.is_empty() {
        scheduler.update_settings(update)?;
    }
    msg_success!(Message::SettingsSaved);
    Ok(())
}
