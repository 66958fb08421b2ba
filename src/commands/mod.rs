pub mod break_now;
pub mod init;
pub mod set;
pub mod snooze;
pub mod stats;
pub mod status;
pub mod toggle;
pub mod watch;

use crate::db::kv::SqliteStore;
use crate::libs::clock::SystemClock;
use crate::libs::config::Config;
use crate::libs::scheduler::BreakScheduler;
use anyhow::Result;
use clap::{Parser, Subcommand};
use std::sync::Arc;

#[derive(Debug, Subcommand)]
enum Commands {
    #[command(about = "Interactive setup of prompts and reminder settings")]
    Init,
    #[command(about = "Change reminder settings", arg_required_else_help = true)]
    Set(set::SetArgs),
    #[command(about = "Enable or disable break reminders")]
    Toggle,
    #[command(about = "Take a break now")]
    BreakNow,
    #[command(about = "Postpone the next break by five minutes")]
    Snooze,
    #[command(about = "Show reminder settings and the current countdown")]
    Status,
    #[command(about = "Show break statistics")]
    Stats(stats::StatsArgs),
    #[command(about = "Run the break reminder loop")]
    Watch(watch::WatchArgs),
}

#[derive(Debug, Parser)]
#[command(author, version, about, long_about = None)]
#[command(arg_required_else_help(true))]
pub struct Cli {
    #[command(subcommand)]
    command: Commands,
}

impl Cli {
    pub async fn menu() -> Result<()> {
        let cli = Self::parse();
        match cli.command {
            Commands::Init => init::cmd(),
            Commands::Set(args) => set::cmd(args),
            Commands::Toggle => toggle::cmd(),
            Commands::BreakNow => break_now::cmd(),
            Commands::Snooze => snooze::cmd(),
            Commands::Status => status::cmd(),
            Commands::Stats(args) => stats::cmd(args),
            Commands::Watch(args) => watch::cmd(args).await,
        }
    }
}

/// Scheduler over the on-disk store, with prompts in the configured language.
pub(crate) fn open_scheduler() -> Result<BreakScheduler> {
    let language = Config::read()?.prompt_config().language;
    let store = SqliteStore::new()?;
    Ok(BreakScheduler::new(Arc::new(store), Arc::new(SystemClock)).with_language(language))
}
