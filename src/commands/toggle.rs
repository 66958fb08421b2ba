use crate::commands::open_scheduler;
use crate::libs::daemon;
use crate::libs::messages::Message;
use crate::msg_success;
use anyhow::Result;

/// Flips reminders on or off.
pub fn cmd() -> Result<()> {
    daemon::ensure_not_running()?;

    let mut scheduler = open_scheduler()?;
    if scheduler.toggle()? {
        msg_success!(Message::RemindersEnabled);
    } else {
        msg_success!(Message::RemindersDisabled);
    }
    Ok(())
}
