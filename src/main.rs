use anyhow::Result;
use breakwatch::commands::Cli;
use breakwatch::libs::daemon;
use tracing_subscriber::EnvFilter;

/// Hidden flag the background watcher is started with.
const DAEMON_RUN_FLAG: &str = "--daemon-run";

#[tokio::main]
async fn main() -> Result<()> {
    let filter = if std::env::var("BREAKWATCH_DEBUG").is_ok() {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    let _ = tracing_subscriber::fmt().with_env_filter(filter).with_writer(std::io::stderr).try_init();

    if std::env::args().any(|arg| arg == DAEMON_RUN_FLAG) {
        return daemon::run_with_signal_handling(true).await;
    }

    Cli::menu().await
}
