/// Every user-facing text breakwatch prints.
///
/// Variants are grouped by the part of the application that emits them. The
/// rendered text lives in [`display`](super::display).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Message {
    // === CONFIG MESSAGES ===
    ConfigSaved,
    ConfigModulePrompt,
    ConfigModuleReminders,
    PromptSelectPromptKind,
    PromptLanguage,
    PromptEnableReminders,
    PromptWorkInterval,
    PromptBreakDuration,
    PromptShowCountdown,
    PromptPauseWhenIdle,

    // === SETTINGS MESSAGES ===
    SettingsSaved,
    SettingsNothingToChange,
    SettingsHeader,
    RemindersEnabled,
    RemindersDisabled,
    RemindersDisabledHint,

    // === BREAK MESSAGES ===
    BreakSnoozed,
    BreakDismissed,
    BreakStarted,
    BreakCompleted(u32),
    CountdownWork(String),
    CountdownBreak(String),
    PromptFailed(String),
    BreakPromptStillOpen,

    // === STATS MESSAGES ===
    StatsTodayHeader,
    StatsWeekHeader,
    StatsAllTimeHeader,
    StatsEmpty,
    ConfirmStatsReset,
    StatsReset,
    StatsResetCancelled,

    // === WATCHER MESSAGES ===
    WatcherStarted(u32),
    WatcherStopped(u32),
    WatcherNotRunning,
    WatcherNotRunningPidNotFound,
    WatcherStartingForeground,
    WatcherStoppingExisting(String),
    WatcherFailedToStopExisting(String),
    WatcherFailedToStop(u32),
    WatcherReceivedSigterm,
    WatcherReceivedSigint,
    WatcherReceivedCtrlC,
    WatcherCtrlCListenFailed(String),
    WatcherSignalHandlerFailed(String),
    WatcherSignalHandlingNotSupported,
    WatcherOwnsStore(u32),
    WatcherRequestSent(u32),
    WatcherRequestsNotSupported,
    RunnerExitedNormally,
    RunnerShuttingDown,
    RunnerError(String),

    // === INPUT MESSAGES ===
    InputMonitorUnavailable,
    InputListenerFailed(String),

    // === PROCESS MESSAGES ===
    InvalidPidFileContent,
    FailedToGetCurrentExecutable,
    FailedToOpenProcess(u32),
    FailedToTerminateProcess(u32),
    ProcessTerminationNotSupported,
    DaemonModeNotSupported,
}
