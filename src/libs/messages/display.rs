//! Text of every [`Message`].
//!
//! All user-facing wording is kept in this single match so it can be
//! reviewed (and eventually translated) in one place. Break tips and prompt
//! labels are localized separately in [`tips`](crate::libs::tips).

use super::types::Message;
use std::fmt::{Display, Formatter, Result};

impl Display for Message {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        let text = match self {
            // === CONFIG MESSAGES ===
            Message::ConfigSaved => "Configuration saved successfully".to_string(),
            Message::ConfigModulePrompt => "Prompt settings".to_string(),
            Message::ConfigModuleReminders => "Reminder settings".to_string(),
            Message::PromptSelectPromptKind => "How should break prompts be shown?".to_string(),
            Message::PromptLanguage => "Prompt language (en, es)".to_string(),
            Message::PromptEnableReminders => "Enable break reminders?".to_string(),
            Message::PromptWorkInterval => "Minutes of work between breaks".to_string(),
            Message::PromptBreakDuration => "Break length in seconds".to_string(),
            Message::PromptShowCountdown => "Show the countdown while watching?".to_string(),
            Message::PromptPauseWhenIdle => "Pause the countdown while you are away?".to_string(),

            // === SETTINGS MESSAGES ===
            Message::SettingsSaved => "Reminder settings saved".to_string(),
            Message::SettingsNothingToChange => "Nothing to change. Pass at least one option, see `breakwatch set --help`.".to_string(),
            Message::SettingsHeader => "Break reminders".to_string(),
            Message::RemindersEnabled => "Break reminders enabled".to_string(),
            Message::RemindersDisabled => "Break reminders disabled".to_string(),
            Message::RemindersDisabledHint => "Reminders are disabled. Run `breakwatch toggle` to enable them.".to_string(),

            // === BREAK MESSAGES ===
            Message::BreakSnoozed => "Snoozed for 5 minutes.".to_string(),
            Message::BreakDismissed => "Break dismissed.".to_string(),
            Message::BreakStarted => "Time for a break!".to_string(),
            Message::BreakCompleted(seconds) => format!("Break finished ({}s of rest). Back to work.", seconds),
            Message::CountdownWork(remaining) => format!("Next break in {}", remaining),
            Message::CountdownBreak(remaining) => format!("On break, {} left", remaining),
            Message::PromptFailed(error) => format!("Failed to show break prompt: {}", error),
            Message::BreakPromptStillOpen => "A break is due but the last prompt is still open. It will be shown again once answered.".to_string(),

            // === STATS MESSAGES ===
            Message::StatsTodayHeader => "Today".to_string(),
            Message::StatsWeekHeader => "Last 7 days".to_string(),
            Message::StatsAllTimeHeader => "All time".to_string(),
            Message::StatsEmpty => "No breaks recorded yet.".to_string(),
            Message::ConfirmStatsReset => "Delete all break statistics?".to_string(),
            Message::StatsReset => "Break statistics cleared".to_string(),
            Message::StatsResetCancelled => "Statistics left untouched.".to_string(),

            // === WATCHER MESSAGES ===
            Message::WatcherStarted(pid) => format!("Watcher started in the background (PID: {}).", pid),
            Message::WatcherStopped(pid) => format!("Watcher process (PID: {}) stopped successfully.", pid),
            Message::WatcherNotRunning => "Watcher is not running.".to_string(),
            Message::WatcherNotRunningPidNotFound => "Watcher does not appear to be running (PID file not found).".to_string(),
            Message::WatcherStartingForeground => "Watching for breaks... Press Ctrl+C to exit.".to_string(),
            Message::WatcherStoppingExisting(pid) => format!("Stopping existing watcher (PID: {})...", pid),
            Message::WatcherFailedToStopExisting(error) => format!("Failed to stop existing watcher: {}", error),
            Message::WatcherFailedToStop(pid) => format!("Failed to stop watcher process (PID: {})", pid),
            Message::WatcherReceivedSigterm => "Received SIGTERM, shutting down gracefully...".to_string(),
            Message::WatcherReceivedSigint => "Received SIGINT, shutting down gracefully...".to_string(),
            Message::WatcherReceivedCtrlC => "Received Ctrl+C, shutting down gracefully...".to_string(),
            Message::WatcherCtrlCListenFailed(error) => format!("Failed to listen for Ctrl+C: {}", error),
            Message::WatcherSignalHandlerFailed(error) => format!("Failed to install signal handler: {}", error),
            Message::WatcherSignalHandlingNotSupported => "Signal handling not supported on this platform".to_string(),
            Message::WatcherOwnsStore(pid) => format!(
                "A break watcher (PID: {}) owns the reminder state. Stop it with `breakwatch watch --stop` first.",
                pid
            ),
            Message::WatcherRequestSent(pid) => format!("Request sent to the break watcher (PID: {}).", pid),
            Message::WatcherRequestsNotSupported => "Sending requests to a running watcher is not supported on this platform".to_string(),
            Message::RunnerExitedNormally => "Break runner exited normally".to_string(),
            Message::RunnerShuttingDown => "Shutting down break runner...".to_string(),
            Message::RunnerError(error) => format!("Break runner error: {}", error),

            // === INPUT MESSAGES ===
            Message::InputMonitorUnavailable => {
                "Input monitoring is not compiled in; idle time will not pause the countdown. Rebuild with `--features input-monitor` to enable it.".to_string()
            }
            Message::InputListenerFailed(error) => format!("Failed to listen for input events: {}. Retrying in 1 second...", error),

            // === PROCESS MESSAGES ===
            Message::InvalidPidFileContent => "Invalid PID file content".to_string(),
            Message::FailedToGetCurrentExecutable => "Failed to get current executable path".to_string(),
            Message::FailedToOpenProcess(code) => format!("Failed to open process (error code {})", code),
            Message::FailedToTerminateProcess(code) => format!("Failed to terminate process (error code {})", code),
            Message::ProcessTerminationNotSupported => "Process termination not supported on this platform".to_string(),
            Message::DaemonModeNotSupported => "Daemon mode is not supported on this platform".to_string(),
        };

        write!(f, "{}", text)
    }
}
