//! Break statistics command.

use crate::commands::open_scheduler;
use crate::libs::daemon;
use crate::libs::messages::Message;
use crate::libs::view::View;
use crate::{msg_info, msg_success};
use anyhow::Result;
use clap::Args;
use dialoguer::{theme::ColorfulTheme, Confirm};

#[derive(Debug, Args)]
pub struct StatsArgs {
    /// Delete all statistics
    #[arg(long)]
    reset: bool,

    /// Skip the confirmation prompt
    #[arg(long, short, requires = "reset")]
    yes: bool,
}

pub fn cmd(args: StatsArgs) -> Result<()> {
    if !args.reset {
        let scheduler = open_scheduler()?;
        return View::stats(&scheduler.stats());
    }

    daemon::ensure_not_running()?;

    let confirmed = args.yes
        || Confirm::with_theme(&ColorfulTheme::default())
            .with_prompt(Message::ConfirmStatsReset.to_string())
            .default(false)
            .interact()?;
    if !confirmed {
        msg_info!(Message::StatsResetCancelled);
        return Ok(());
    }

    let mut scheduler = open_scheduler()?;
    scheduler.reset_stats()?;
    msg_success!(Message::StatsReset);
    Ok(())
}
