use crate::commands::open_scheduler;
use crate::libs::view::View;
use anyhow::Result;

/// Prints settings and the persisted countdown. Safe while a watcher runs.
pub fn cmd() -> Result<()> {
    let scheduler = open_scheduler()?;
    View::status(&scheduler.state())
}
