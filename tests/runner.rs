#[cfg(test)]
mod tests {
    use breakwatch::libs::clock::ManualClock;
    use breakwatch::libs::notifier::NotificationChannel;
    use breakwatch::libs::runner::{BreakRunner, RunnerCommand};
    use breakwatch::libs::scheduler::BreakScheduler;
    use breakwatch::libs::settings::PauseSettingsUpdate;
    use breakwatch::libs::store::{KeyValueStore, MemoryStore, PAUSE_STATE_KEY};
    use breakwatch::libs::timer::{BreakResponse, Phase};
    use breakwatch::libs::tips::BreakPrompt;
    use parking_lot::Mutex;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;
    use std::time::Duration;

    /// Answers every prompt with a fixed response and counts the prompts.
    struct ScriptedPrompt {
        response: BreakResponse,
        shown: Arc<AtomicUsize>,
    }

    impl ScriptedPrompt {
        fn new(response: BreakResponse) -> (Arc<Self>, Arc<AtomicUsize>) {
            let shown = Arc::new(AtomicUsize::new(0));
            let prompt = Arc::new(ScriptedPrompt {
                response,
                shown: shown.clone(),
            });
            (prompt, shown)
        }
    }

    impl NotificationChannel for ScriptedPrompt {
        fn present_break_prompt(&self, _prompt: &BreakPrompt) -> anyhow::Result<BreakResponse> {
            self.shown.fetch_add(1, Ordering::SeqCst);
            Ok(self.response)
        }
    }

    fn scheduler(store: &Arc<MemoryStore>, update: Option<PauseSettingsUpdate>) -> BreakScheduler {
        let mut scheduler = BreakScheduler::new(store.clone(), Arc::new(ManualClock::default()));
        if let Some(update) = update {
            scheduler.update_settings(update).unwrap();
        }
        scheduler
    }

    fn short_cycle() -> PauseSettingsUpdate {
        PauseSettingsUpdate {
            enabled: Some(true),
            work_interval_minutes: Some(1),
            break_duration_seconds: Some(1),
            ..Default::default()
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_runner_ticks_into_break() {
        let store = Arc::new(MemoryStore::new());
        let (prompt, _shown) = ScriptedPrompt::new(BreakResponse::NoResponse);
        let runner = BreakRunner::new(scheduler(&store, Some(short_cycle())), prompt);

        let scheduler = runner.run(tokio::time::sleep(Duration::from_millis(60_500))).await;

        let countdown = scheduler.countdown();
        assert_eq!(countdown.phase, Phase::Break);
        assert_eq!(countdown.remaining_seconds, 1);
        assert_eq!(store.get(PAUSE_STATE_KEY).unwrap().unwrap()["phase"], "break");
    }

    #[tokio::test(start_paused = true)]
    async fn test_queued_snooze_is_applied() {
        let store = Arc::new(MemoryStore::new());
        let (prompt, shown) = ScriptedPrompt::new(BreakResponse::Dismissed);
        let runner = BreakRunner::new(scheduler(&store, Some(PauseSettingsUpdate::enabled(true))), prompt);
        assert!(runner.handle().snooze());

        let scheduler = runner.run(tokio::time::sleep(Duration::from_millis(500))).await;

        assert_eq!(scheduler.state().remaining_seconds, 300);
        assert_eq!(scheduler.stats().today.breaks_snoozed, 1);
        assert_eq!(shown.load(Ordering::SeqCst), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_stopped_scheduler_is_left_alone() {
        let store = Arc::new(MemoryStore::new());
        let (prompt, _shown) = ScriptedPrompt::new(BreakResponse::Dismissed);
        let runner = BreakRunner::new(scheduler(&store, None), prompt);

        let scheduler = runner.run(tokio::time::sleep(Duration::from_secs(10))).await;

        assert!(!scheduler.is_running());
        assert_eq!(scheduler.state().remaining_seconds, 1200);
        assert_eq!(store.get(PAUSE_STATE_KEY).unwrap(), None);
    }

    #[tokio::test(start_paused = true)]
    async fn test_toggle_command_starts_ticking() {
        let store = Arc::new(MemoryStore::new());
        let (prompt, _shown) = ScriptedPrompt::new(BreakResponse::Dismissed);
        let runner = BreakRunner::new(scheduler(&store, None), prompt);
        runner.handle().send(RunnerCommand::Toggle);

        let scheduler = runner.run(tokio::time::sleep(Duration::from_millis(5_500))).await;

        assert!(scheduler.is_running());
        assert_eq!(scheduler.state().remaining_seconds, 1195);
    }

    #[tokio::test(start_paused = true)]
    async fn test_settings_command_updates_scheduler() {
        let store = Arc::new(MemoryStore::new());
        let (prompt, _shown) = ScriptedPrompt::new(BreakResponse::Dismissed);
        let runner = BreakRunner::new(scheduler(&store, Some(PauseSettingsUpdate::enabled(true))), prompt);
        runner.handle().send(RunnerCommand::UpdateSettings(PauseSettingsUpdate {
            work_interval_minutes: Some(45),
            ..Default::default()
        }));

        let scheduler = runner.run(tokio::time::sleep(Duration::from_millis(2_500))).await;

        assert_eq!(scheduler.settings().work_interval_minutes, 45);
        assert_eq!(scheduler.state().remaining_seconds, 45 * 60 - 2);
    }

    #[tokio::test(start_paused = true)]
    async fn test_reported_activity_lifts_idle_freeze() {
        let store = Arc::new(MemoryStore::new());
        let clock = ManualClock::default();
        let mut scheduler = BreakScheduler::new(store.clone(), Arc::new(clock.clone()));
        scheduler.update_settings(PauseSettingsUpdate::enabled(true)).unwrap();
        clock.advance(chrono::Duration::minutes(3));

        let (prompt, _shown) = ScriptedPrompt::new(BreakResponse::Dismissed);
        let runner = BreakRunner::new(scheduler, prompt);
        let idle = runner.run(tokio::time::sleep(Duration::from_millis(2_500))).await;
        assert_eq!(idle.state().remaining_seconds, 1200);

        let (prompt, _shown) = ScriptedPrompt::new(BreakResponse::Dismissed);
        let runner = BreakRunner::new(idle, prompt);
        assert!(runner.handle().record_activity());
        let active = runner.run(tokio::time::sleep(Duration::from_millis(2_500))).await;

        assert_eq!(active.state().remaining_seconds, 1198);
    }

    #[tokio::test]
    async fn test_prompt_answer_flows_back_to_scheduler() {
        let store = Arc::new(MemoryStore::new());
        let (prompt, shown) = ScriptedPrompt::new(BreakResponse::Snoozed);
        let scheduler = scheduler(&store, Some(PauseSettingsUpdate::enabled(true)));

        let (done_tx, done_rx) = tokio::sync::oneshot::channel::<()>();
        let done_tx = Mutex::new(Some(done_tx));
        let _subscription = scheduler.on_state_change(move |state| {
            if state.remaining_seconds == 300 {
                if let Some(tx) = done_tx.lock().take() {
                    let _ = tx.send(());
                }
            }
        });

        let runner = BreakRunner::new(scheduler, prompt);
        assert!(runner.handle().trigger_break());
        let shutdown = async {
            let _ = done_rx.await;
        };

        let scheduler = tokio::time::timeout(Duration::from_secs(5), runner.run(shutdown))
            .await
            .expect("prompt answer never reached the scheduler");

        assert_eq!(shown.load(Ordering::SeqCst), 1);
        assert_eq!(scheduler.stats().today.breaks_snoozed, 1);
        assert_eq!(scheduler.countdown().phase, Phase::Work);
    }
}
