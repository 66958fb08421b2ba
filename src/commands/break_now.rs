//! Break-now command.
//!
//! A running watcher is asked to open a break prompt. With no watcher, the
//! prompt is shown right here and the answer is applied to the stored state.

use crate::commands::open_scheduler;
use crate::libs::config::Config;
use crate::libs::daemon::{self, WatcherRequest};
use crate::libs::messages::Message;
use crate::libs::notifier::{self, NotificationChannel};
use crate::libs::scheduler::BreakScheduler;
use crate::libs::timer::BreakResponse;
use crate::msg_info;
use anyhow::Result;

pub fn cmd() -> Result<()> {
    if let Some(pid) = daemon::send_request(WatcherRequest::BreakNow)? {
        msg_info!(Message::WatcherRequestSent(pid));
        return Ok(());
    }

    let channel = notifier::channel_for(&Config::read()?.prompt_config());
    let mut scheduler = open_scheduler()?;
    present_now(&mut scheduler, channel.as_ref())?;
    Ok(())
}

/// Shows a break prompt immediately and applies the answer.
///
/// Returns `false` without prompting when reminders are disabled.
pub fn present_now(scheduler: &mut BreakScheduler, channel: &dyn NotificationChannel) -> Result<bool> {
    if !scheduler.trigger_break_now() {
        msg_info!(Message::RemindersDisabledHint);
        return Ok(false);
    }

    for prompt in scheduler.take_prompts() {
        let response = channel.present_break_prompt(&prompt)?;
        match response {
            BreakResponse::Snoozed => msg_info!(Message::BreakSnoozed),
            BreakResponse::Dismissed => msg_info!(Message::BreakDismissed),
            BreakResponse::NoResponse => {}
        }
        scheduler.respond(response)?;
    }
    Ok(true)
}
