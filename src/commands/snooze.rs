use crate::commands::open_scheduler;
use crate::libs::daemon::{self, WatcherRequest};
use crate::libs::messages::Message;
use crate::{msg_info, msg_success};
use anyhow::Result;

/// Postpones the next break by five minutes, in the running watcher if there
/// is one, otherwise in the stored countdown.
pub fn cmd() -> Result<()> {
    if let Some(pid) = daemon::send_request(WatcherRequest::Snooze)? {
        msg_info!(Message::WatcherRequestSent(pid));
        return Ok(());
    }

    let mut scheduler = open_scheduler()?;
    scheduler.snooze()?;
    msg_success!(Message::BreakSnoozed);
    Ok(())
}
