//! Lifecycle of the break watcher process.
//!
//! `breakwatch watch` runs the [`BreakRunner`] in the foreground;
//! `watch --daemon` re-executes the binary with `--daemon-run` as a detached
//! process and records its PID; `watch --stop` terminates it. SIGTERM, SIGINT
//! and Ctrl-C all end the runner gracefully so the countdown is persisted.
//!
//! Either kind of watcher owns the PID file while it runs. Other invocations
//! reach it through [`WatcherRequest`]s, delivered on Unix as SIGUSR1 (break
//! now) and SIGUSR2 (snooze).

use crate::db::kv::SqliteStore;
use crate::libs::clock::SystemClock;
use crate::libs::config::Config;
use crate::libs::data_storage::DataStorage;
use crate::libs::formatter::countdown_message;
use crate::libs::messages::Message;
use crate::libs::monitor::InputMonitor;
use crate::libs::notifier::{self, DesktopPrompt, NotificationChannel};
use crate::libs::observers::Subscription;
use crate::libs::runner::{BreakRunner, RunnerCommand, RunnerHandle};
use crate::libs::scheduler::{BreakScheduler, PauseState};
use crate::libs::store::KeyValueStore;
use crate::{msg_bail_anyhow, msg_error, msg_error_anyhow, msg_info, msg_print, msg_warning};
use anyhow::Result;
use parking_lot::Mutex;
use std::sync::Arc;
use std::time::Duration;

const PID_FILE: &str = "breakwatch-watch.pid";

/// Requests another invocation can make of a running watcher.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WatcherRequest {
    BreakNow,
    Snooze,
}

impl WatcherRequest {
    pub fn command(self) -> RunnerCommand {
        match self {
            WatcherRequest::BreakNow => RunnerCommand::TriggerBreak,
            WatcherRequest::Snooze => RunnerCommand::Snooze,
        }
    }

    #[cfg(unix)]
    pub fn signal(self) -> nix::sys::signal::Signal {
        use nix::sys::signal::Signal;
        match self {
            WatcherRequest::BreakNow => Signal::SIGUSR1,
            WatcherRequest::Snooze => Signal::SIGUSR2,
        }
    }
}

/// Runs the watcher until a termination signal arrives.
///
/// `detached` is set for the background process, where prompts always use
/// desktop dialogs. The PID file is released on exit.
pub async fn run_with_signal_handling(detached: bool) -> Result<()> {
    let result = watch(detached).await;

    match &result {
        Ok(()) => msg_info!(Message::RunnerExitedNormally),
        Err(e) => msg_error!(Message::RunnerError(e.to_string())),
    }

    release_pid_file();
    result
}

async fn watch(detached: bool) -> Result<()> {
    let (runner, _countdown) = build_runner(detached)?;
    if !detached {
        // The daemon's parent wrote the file already.
        std::fs::write(DataStorage::new().get_path(PID_FILE)?, std::process::id().to_string())?;
    }

    let shutdown_rx = listen_for_signals(runner.handle())?;
    runner
        .run(async {
            let _ = shutdown_rx.await;
        })
        .await;
    msg_info!(Message::RunnerShuttingDown);
    Ok(())
}

/// Opens the store, wires the input monitor and builds the runner.
///
/// The foreground watcher also gets a countdown printer, returned alongside
/// so it stays subscribed for the lifetime of the runner.
fn build_runner(detached: bool) -> Result<(BreakRunner, Option<Subscription<PauseState>>)> {
    let config = Config::read()?;
    let prompt_config = config.prompt_config();

    let store: Arc<dyn KeyValueStore> = Arc::new(SqliteStore::new()?);
    let scheduler = BreakScheduler::new(store, Arc::new(SystemClock)).with_language(prompt_config.language);

    let channel: Arc<dyn NotificationChannel> = if detached {
        Arc::new(DesktopPrompt::default())
    } else {
        notifier::channel_for(&prompt_config)
    };

    let listening = InputMonitor::new(scheduler.activity_tracker()).start();
    if !listening {
        msg_warning!(Message::InputMonitorUnavailable);
    }

    let countdown = if detached {
        None
    } else {
        if !scheduler.is_running() {
            msg_info!(Message::RemindersDisabledHint);
        }
        msg_info!(Message::WatcherStartingForeground);
        Some(scheduler.on_state_change(countdown_printer()))
    };

    let runner = BreakRunner::new(scheduler, channel).with_activity_on_tick(!listening);
    Ok((runner, countdown))
}

/// Installs the termination handlers and forwards watcher requests to
/// `handle`. The returned receiver completes when the watcher should stop.
fn listen_for_signals(handle: RunnerHandle) -> Result<tokio::sync::oneshot::Receiver<()>> {
    let (shutdown_tx, shutdown_rx) = tokio::sync::oneshot::channel::<()>();

    #[cfg(unix)]
    {
        use tokio::signal::unix::{signal, SignalKind};

        let mut sigterm = signal(SignalKind::terminate()).map_err(|e| msg_error_anyhow!(Message::WatcherSignalHandlerFailed(e.to_string())))?;
        let mut sigint = signal(SignalKind::interrupt()).map_err(|e| msg_error_anyhow!(Message::WatcherSignalHandlerFailed(e.to_string())))?;
        forward_watcher_requests(handle)?;

        tokio::spawn(async move {
            tokio::select! {
                _ = sigterm.recv() => {
                    msg_info!(Message::WatcherReceivedSigterm);
                }
                _ = sigint.recv() => {
                    msg_info!(Message::WatcherReceivedSigint);
                }
            }

            let _ = shutdown_tx.send(());
        });
    }

    #[cfg(windows)]
    {
        let _ = handle;
        tokio::spawn(async move {
            match tokio::signal::ctrl_c().await {
                Ok(()) => {
                    msg_info!(Message::WatcherReceivedCtrlC);
                }
                Err(e) => {
                    msg_error!(Message::WatcherCtrlCListenFailed(e.to_string()));
                }
            }

            let _ = shutdown_tx.send(());
        });
    }

    #[cfg(not(any(unix, windows)))]
    {
        let _ = handle;
        msg_warning!(Message::WatcherSignalHandlingNotSupported);
        std::mem::forget(shutdown_tx);
    }

    Ok(shutdown_rx)
}

/// Turns SIGUSR1 and SIGUSR2 into runner commands for as long as the runner
/// accepts them.
#[cfg(unix)]
pub fn forward_watcher_requests(handle: RunnerHandle) -> Result<()> {
    use tokio::signal::unix::{signal, SignalKind};

    let mut break_now = signal(SignalKind::user_defined1()).map_err(|e| msg_error_anyhow!(Message::WatcherSignalHandlerFailed(e.to_string())))?;
    let mut snooze = signal(SignalKind::user_defined2()).map_err(|e| msg_error_anyhow!(Message::WatcherSignalHandlerFailed(e.to_string())))?;

    tokio::spawn(async move {
        loop {
            let request = tokio::select! {
                Some(()) = break_now.recv() => WatcherRequest::BreakNow,
                Some(()) = snooze.recv() => WatcherRequest::Snooze,
                else => break,
            };
            tracing::info!(?request, "watcher request received");
            if !handle.send(request.command()) {
                break;
            }
        }
    });
    Ok(())
}

/// Delivers `request` to the running watcher.
///
/// Returns the watcher's PID, or `None` when no watcher is running.
pub fn send_request(request: WatcherRequest) -> Result<Option<u32>> {
    let Some(pid) = running_pid()? else {
        return Ok(None);
    };
    signal_watcher(pid, request)?;
    tracing::debug!(pid, ?request, "watcher request sent");
    Ok(Some(pid))
}

#[cfg(unix)]
fn signal_watcher(pid: u32, request: WatcherRequest) -> Result<()> {
    use nix::sys::signal::kill;
    use nix::unistd::Pid;

    kill(Pid::from_raw(pid as i32), request.signal())?;
    Ok(())
}

#[cfg(not(unix))]
fn signal_watcher(_pid: u32, _request: WatcherRequest) -> Result<()> {
    msg_bail_anyhow!(Message::WatcherRequestsNotSupported);
}

/// Removes the PID file if it still names this process.
fn release_pid_file() {
    let Ok(pid_path) = DataStorage::new().get_path(PID_FILE) else {
        return;
    };
    let owned = std::fs::read_to_string(&pid_path).is_ok_and(|pid| pid.trim() == std::process::id().to_string());
    if owned {
        let _ = std::fs::remove_file(&pid_path);
    }
}

/// Prints the countdown on phase changes and on every whole minute.
fn countdown_printer() -> impl Fn(&PauseState) + Send + Sync + 'static {
    let last_phase: Mutex<Option<bool>> = Mutex::new(None);
    move |state: &PauseState| {
        let mut last_phase = last_phase.lock();
        let phase_changed = *last_phase != Some(state.is_on_break);
        *last_phase = Some(state.is_on_break);

        if !phase_changed && state.remaining_seconds % 60 != 0 {
            return;
        }
        if let Some(message) = countdown_message(state) {
            msg_print!(message);
        }
    }
}

/// PID of the running watcher, if any.
///
/// A PID file left behind by a watcher that died without cleaning up is
/// removed and treated as absent.
pub fn running_pid() -> Result<Option<u32>> {
    let pid_path = DataStorage::new().get_path(PID_FILE)?;
    if !pid_path.exists() {
        return Ok(None);
    }

    let pid_str = std::fs::read_to_string(&pid_path)?;
    let pid: u32 = pid_str.trim().parse().map_err(|_| msg_error_anyhow!(Message::InvalidPidFileContent))?;

    #[cfg(unix)]
    {
        use nix::errno::Errno;
        use nix::sys::signal::kill;
        use nix::unistd::Pid;

        if let Err(Errno::ESRCH) = kill(Pid::from_raw(pid as i32), None) {
            tracing::warn!(pid, "removing stale watcher PID file");
            std::fs::remove_file(&pid_path)?;
            return Ok(None);
        }
    }

    Ok(Some(pid))
}

/// Fails when a watcher owns the reminder state.
pub fn ensure_not_running() -> Result<()> {
    if let Some(pid) = running_pid()? {
        msg_bail_anyhow!(Message::WatcherOwnsStore(pid));
    }
    Ok(())
}

/// Spawns the watcher as a detached background process, replacing a running one.
pub fn spawn() -> Result<()> {
    let pid_path = DataStorage::new().get_path(PID_FILE)?;

    if pid_path.exists() {
        if let Ok(pid_str) = std::fs::read_to_string(&pid_path) {
            msg_info!(Message::WatcherStoppingExisting(pid_str.trim().to_string()));
            if let Err(e) = stop_internal() {
                msg_warning!(Message::WatcherFailedToStopExisting(e.to_string()));
                let _ = std::fs::remove_file(&pid_path);
            }
            std::thread::sleep(Duration::from_millis(1000));
        }
    }

    let current_exe = std::env::current_exe().map_err(|_| msg_error_anyhow!(Message::FailedToGetCurrentExecutable))?;

    #[cfg(unix)]
    {
        use std::os::unix::process::CommandExt;
        use std::process::{Command, Stdio};

        let mut command = Command::new(current_exe);
        command.arg("--daemon-run").stdin(Stdio::null()).stdout(Stdio::null()).stderr(Stdio::null());
        // SAFETY: setsid is async-signal-safe and touches no state of the parent.
        unsafe {
            command.pre_exec(|| {
                nix::unistd::setsid()?;
                Ok(())
            });
        }
        let child = command.spawn()?;
        let pid = child.id();
        std::fs::write(pid_path, pid.to_string())?;
        msg_info!(Message::WatcherStarted(pid));
    }

    #[cfg(windows)]
    {
        use std::os::windows::process::CommandExt;
        const CREATE_NO_WINDOW: u32 = 0x08000000;
        let child = std::process::Command::new(current_exe)
            .arg("--daemon-run")
            .creation_flags(CREATE_NO_WINDOW)
            .spawn()?;
        let pid = child.id();
        std::fs::write(pid_path, pid.to_string())?;
        msg_info!(Message::WatcherStarted(pid));
    }

    #[cfg(not(any(unix, windows)))]
    {
        let _ = current_exe;
        msg_bail_anyhow!(Message::DaemonModeNotSupported);
    }

    Ok(())
}

/// Stops the running watcher. Not running is not an error.
pub fn stop() -> Result<()> {
    if running_pid()?.is_none() {
        msg_info!(Message::WatcherNotRunning);
        return Ok(());
    }
    stop_internal()
}

fn stop_internal() -> Result<()> {
    let pid_path = DataStorage::new().get_path(PID_FILE)?;
    let Some(pid) = running_pid()? else {
        msg_bail_anyhow!(Message::WatcherNotRunningPidNotFound);
    };

    let killed = kill_process(pid)?;
    // A watcher that exited gracefully has already removed the file.
    let _ = std::fs::remove_file(pid_path);

    if killed {
        msg_info!(Message::WatcherStopped(pid));
        Ok(())
    } else {
        msg_bail_anyhow!(Message::WatcherFailedToStop(pid));
    }
}

#[cfg(windows)]
fn kill_process(pid: u32) -> Result<bool> {
    use winapi::um::errhandlingapi::GetLastError;
    use winapi::um::handleapi::CloseHandle;
    use winapi::um::processthreadsapi::{OpenProcess, TerminateProcess};
    use winapi::um::winnt::PROCESS_TERMINATE;

    unsafe {
        let handle = OpenProcess(PROCESS_TERMINATE, 0, pid);
        if handle.is_null() {
            let error = GetLastError();
            // ERROR_INVALID_PARAMETER: no such process
            if error == 87 {
                return Ok(false);
            }
            msg_bail_anyhow!(Message::FailedToOpenProcess(error));
        }

        let result = TerminateProcess(handle, 0);
        CloseHandle(handle);

        if result == 0 {
            let error = GetLastError();
            msg_bail_anyhow!(Message::FailedToTerminateProcess(error));
        }
        std::thread::sleep(Duration::from_millis(100));
        Ok(true)
    }
}

#[cfg(unix)]
fn kill_process(pid: u32) -> Result<bool> {
    use nix::errno::Errno;
    use nix::sys::signal::{kill, Signal};
    use nix::unistd::Pid;

    let pid = Pid::from_raw(pid as i32);
    match kill(pid, None) {
        Ok(()) => {}
        Err(Errno::ESRCH) => return Ok(false),
        Err(e) => return Err(e.into()),
    }

    kill(pid, Signal::SIGTERM)?;
    for _ in 0..20 {
        std::thread::sleep(Duration::from_millis(100));
        if let Err(Errno::ESRCH) = kill(pid, None) {
            return Ok(true);
        }
    }

    // Did not exit on SIGTERM.
    kill(pid, Signal::SIGKILL)?;
    std::thread::sleep(Duration::from_millis(100));
    Ok(true)
}

#[cfg(not(any(unix, windows)))]
fn kill_process(_pid: u32) -> Result<bool> {
    msg_bail_anyhow!(Message::ProcessTerminationNotSupported);
}
