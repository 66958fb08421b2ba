//! Break watcher command.
//!
//! Without flags the watcher runs in the foreground until Ctrl-C. `--daemon`
//! starts it in the background (replacing a running one) and `--stop` ends it.

use crate::libs::daemon;
use anyhow::Result;
use clap::Args;

#[derive(Debug, Args)]
pub struct WatchArgs {
    /// Run the watcher as a background process
    #[arg(long, short, conflicts_with = "stop")]
    daemon: bool,

    /// Stop the background watcher
    #[arg(long, short)]
    stop: bool,
}

pub async fn cmd(args: WatchArgs) -> Result<()> {
    if args.stop {
        return daemon::stop();
    }
    if args.daemon {
        return daemon::spawn();
    }

    daemon::ensure_not_running()?;
    daemon::run_with_signal_handling(false).await
}
