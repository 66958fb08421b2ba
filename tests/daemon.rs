#[cfg(test)]
mod tests {
    use breakwatch::commands::break_now::present_now;
    use breakwatch::commands::snooze;
    use breakwatch::db::kv::SqliteStore;
    use breakwatch::libs::clock::ManualClock;
    use breakwatch::libs::daemon::{self, WatcherRequest};
    use breakwatch::libs::data_storage::DataStorage;
    use breakwatch::libs::notifier::NotificationChannel;
    use breakwatch::libs::runner::{BreakRunner, RunnerCommand};
    use breakwatch::libs::scheduler::BreakScheduler;
    use breakwatch::libs::settings::PauseSettingsUpdate;
    use breakwatch::libs::store::{KeyValueStore, MemoryStore, PAUSE_STATE_KEY, PAUSE_STATS_KEY};
    use breakwatch::libs::timer::BreakResponse;
    use breakwatch::libs::tips::BreakPrompt;
    use parking_lot::Mutex;
    use serde_json::json;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;
    use std::time::Duration;
    use tempfile::TempDir;
    use test_context::{test_context, TestContext};

    /// Points the data directory at a fresh temporary home.
    struct DaemonTestContext {
        _temp_dir: TempDir,
    }

    impl TestContext for DaemonTestContext {
        fn setup() -> Self {
            let temp_dir = tempfile::tempdir().unwrap();
            std::env::set_var("HOME", temp_dir.path());
            std::env::set_var("LOCALAPPDATA", temp_dir.path());
            DaemonTestContext { _temp_dir: temp_dir }
        }
    }

    struct ScriptedPrompt {
        response: BreakResponse,
        shown: Arc<AtomicUsize>,
    }

    impl NotificationChannel for ScriptedPrompt {
        fn present_break_prompt(&self, _prompt: &BreakPrompt) -> anyhow::Result<BreakResponse> {
            self.shown.fetch_add(1, Ordering::SeqCst);
            Ok(self.response)
        }
    }

    fn enabled_scheduler(store: &Arc<MemoryStore>) -> BreakScheduler {
        let mut scheduler = BreakScheduler::new(store.clone(), Arc::new(ManualClock::default()));
        scheduler.update_settings(PauseSettingsUpdate::enabled(true)).unwrap();
        scheduler
    }

    #[test]
    fn test_watcher_requests_map_to_runner_commands() {
        assert_eq!(WatcherRequest::BreakNow.command(), RunnerCommand::TriggerBreak);
        assert_eq!(WatcherRequest::Snooze.command(), RunnerCommand::Snooze);
    }

    #[cfg(unix)]
    #[test]
    fn test_watcher_requests_use_distinct_user_signals() {
        use nix::sys::signal::Signal;

        assert_eq!(WatcherRequest::BreakNow.signal(), Signal::SIGUSR1);
        assert_eq!(WatcherRequest::Snooze.signal(), Signal::SIGUSR2);
    }

    #[cfg(unix)]
    #[test_context(DaemonTestContext)]
    #[test]
    fn test_snooze_without_watcher_updates_stored_state(_ctx: &mut DaemonTestContext) {
        // Left behind by a watcher that no longer exists.
        let pid_path = DataStorage::new().get_path("breakwatch-watch.pid").unwrap();
        std::fs::write(&pid_path, i32::MAX.to_string()).unwrap();

        snooze::cmd().unwrap();

        assert!(!pid_path.exists());
        let store = SqliteStore::new().unwrap();
        assert_eq!(
            store.get(PAUSE_STATE_KEY).unwrap(),
            Some(json!({"phase": "work", "remainingSeconds": 300}))
        );
        let stats = store.get(PAUSE_STATS_KEY).unwrap().unwrap();
        assert_eq!(stats["dailyStats"][0]["breaksSnoozed"], 1);
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_user_signals_reach_the_runner() {
        use nix::sys::signal::{raise, Signal};

        let store = Arc::new(MemoryStore::new());
        let scheduler = enabled_scheduler(&store);
        let shown = Arc::new(AtomicUsize::new(0));
        let prompt = Arc::new(ScriptedPrompt {
            response: BreakResponse::Snoozed,
            shown: shown.clone(),
        });

        // One snooze from SIGUSR2, one from answering the SIGUSR1 prompt.
        let (done_tx, done_rx) = tokio::sync::oneshot::channel();
        let done_tx = Mutex::new(Some(done_tx));
        let snoozes = AtomicUsize::new(0);
        let _subscription = scheduler.on_state_change(move |state| {
            if state.remaining_seconds == 300 && snoozes.fetch_add(1, Ordering::SeqCst) == 1 {
                if let Some(tx) = done_tx.lock().take() {
                    let _ = tx.send(());
                }
            }
        });

        let runner = BreakRunner::new(scheduler, prompt);
        daemon::forward_watcher_requests(runner.handle()).unwrap();
        raise(Signal::SIGUSR2).unwrap();
        raise(Signal::SIGUSR1).unwrap();

        let scheduler = tokio::time::timeout(
            Duration::from_secs(5),
            runner.run(async {
                let _ = done_rx.await;
            }),
        )
        .await
        .expect("signals were not forwarded");

        assert_eq!(shown.load(Ordering::SeqCst), 1);
        assert_eq!(scheduler.stats().today.breaks_snoozed, 2);
    }

    #[test]
    fn test_break_now_without_watcher_prompts_and_applies_answer() {
        let store = Arc::new(MemoryStore::new());
        let mut scheduler = enabled_scheduler(&store);
        let shown = Arc::new(AtomicUsize::new(0));
        let prompt = ScriptedPrompt {
            response: BreakResponse::Dismissed,
            shown: shown.clone(),
        };

        assert!(present_now(&mut scheduler, &prompt).unwrap());

        assert_eq!(shown.load(Ordering::SeqCst), 1);
        assert_eq!(scheduler.stats().today.breaks_dismissed, 1);
        assert_eq!(scheduler.state().remaining_seconds, 1200);
    }

    #[test]
    fn test_break_now_is_skipped_while_disabled() {
        let store = Arc::new(MemoryStore::new());
        let mut scheduler = BreakScheduler::new(store.clone(), Arc::new(ManualClock::default()));
        let shown = Arc::new(AtomicUsize::new(0));
        let prompt = ScriptedPrompt {
            response: BreakResponse::Dismissed,
            shown: shown.clone(),
        };

        assert!(!present_now(&mut scheduler, &prompt).unwrap());

        assert_eq!(shown.load(Ordering::SeqCst), 0);
        assert!(scheduler.take_prompts().is_empty());
    }
}
