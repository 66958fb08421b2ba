//! Break reminder scheduler.
//!
//! [`BreakScheduler`] owns the pause settings, the countdown and the
//! statistics engine. It is driven from outside: something calls
//! [`BreakScheduler::tick`] once per second while it is running and feeds
//! prompt answers back through [`BreakScheduler::respond`]. Prompts that are
//! due are queued and collected with [`BreakScheduler::take_prompts`], so the
//! scheduler never blocks on user interaction.
//!
//! ## States
//!
//! - **Stopped**: reminders disabled, ticks are ignored.
//! - **Work**: counting down to the next break.
//! - **Break**: counting down the rest period.
//!
//! Every change is persisted before observers registered with
//! [`BreakScheduler::on_state_change`] are notified.

use crate::libs::activity::{ActivityTracker, IDLE_THRESHOLD_MS};
use crate::libs::clock::Clock;
use crate::libs::observers::{Observers, Subscription};
use crate::libs::settings::{PauseSettings, PauseSettingsUpdate};
use crate::libs::stats::{StatisticsStore, StatsSummary};
use crate::libs::store::{self, KeyValueStore, PAUSE_SETTINGS_KEY, PAUSE_STATE_KEY};
use crate::libs::timer::{BreakOutcome, BreakResponse, Countdown, Phase, TickOutcome};
use crate::libs::tips::{BreakPrompt, Language};
use anyhow::Result;
use serde::Serialize;
use std::sync::Arc;

/// Snapshot delivered to observers and returned by [`BreakScheduler::state`].
#[derive(Serialize, Clone, Debug, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct PauseState {
    pub settings: PauseSettings,
    pub running: bool,
    pub remaining_seconds: u32,
    pub is_on_break: bool,
}

pub struct BreakScheduler {
    store: Arc<dyn KeyValueStore>,
    settings: PauseSettings,
    countdown: Countdown,
    running: bool,
    activity: ActivityTracker,
    stats: StatisticsStore,
    observers: Observers<PauseState>,
    pending_prompts: Vec<BreakPrompt>,
    language: Language,
}

impl BreakScheduler {
    /// Restores settings and, when reminders were enabled, the countdown.
    ///
    /// Nothing is written during construction.
    pub fn new(store: Arc<dyn KeyValueStore>, clock: Arc<dyn Clock>) -> Self {
        let settings = store::load::<PauseSettings>(store.as_ref(), PAUSE_SETTINGS_KEY)
            .unwrap_or_default()
            .sanitized();

        let countdown = if settings.enabled {
            Self::stored_countdown(store.as_ref()).unwrap_or_else(|| Countdown::work(&settings))
        } else {
            Countdown::work(&settings)
        };

        let running = settings.enabled;
        tracing::debug!(running, ?countdown, "scheduler restored");

        Self {
            stats: StatisticsStore::new(store.clone(), clock.clone()),
            activity: ActivityTracker::new(clock),
            store,
            settings,
            countdown,
            running,
            observers: Observers::new(),
            pending_prompts: Vec::new(),
            language: Language::default(),
        }
    }

    /// Sets the language of break prompts.
    pub fn with_language(mut self, language: Language) -> Self {
        self.language = language;
        self
    }

    // ── Queries ──────────────────────────────────────────────────────

    pub fn state(&self) -> PauseState {
        PauseState {
            settings: self.settings.clone(),
            running: self.running,
            remaining_seconds: self.countdown.remaining_seconds,
            is_on_break: self.running && self.countdown.phase == Phase::Break,
        }
    }

    pub fn settings(&self) -> &PauseSettings {
        &self.settings
    }

    pub fn countdown(&self) -> Countdown {
        self.countdown
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn stats(&self) -> StatsSummary {
        self.stats.summary()
    }

    /// Handle that input sources use to report activity.
    pub fn activity_tracker(&self) -> ActivityTracker {
        self.activity.clone()
    }

    // ── Operations ───────────────────────────────────────────────────

    /// Merges `update` into the settings, persists them and starts or stops
    /// the countdown when `enabled` flips.
    ///
    /// Changing the work interval while working restarts the countdown with
    /// the new length. A break in progress is never shortened or extended.
    pub fn update_settings(&mut self, update: PauseSettingsUpdate) -> Result<()> {
        let mut settings = self.settings.clone();
        settings.apply(&update);
        store::save(self.store.as_ref(), PAUSE_SETTINGS_KEY, &settings)?;
        let previous = std::mem::replace(&mut self.settings, settings);

        match (previous.enabled, self.settings.enabled) {
            (false, true) => self.start(),
            (true, false) => self.stop(),
            _ => {}
        }

        if self.running && self.countdown.phase == Phase::Work && previous.work_interval_minutes != self.settings.work_interval_minutes {
            tracing::debug!(minutes = self.settings.work_interval_minutes, "work interval changed, restarting countdown");
            self.countdown = Countdown::work(&self.settings);
        }

        // The settings are already stored, so observers hear about the new
        // state even if the countdown write fails.
        let persisted = if previous.enabled || self.settings.enabled {
            self.persist_countdown()
        } else {
            Ok(())
        };
        self.notify();
        persisted
    }

    /// Flips `enabled` and returns the new value.
    pub fn toggle(&mut self) -> Result<bool> {
        let enabled = !self.settings.enabled;
        self.update_settings(PauseSettingsUpdate::enabled(enabled))?;
        Ok(enabled)
    }

    /// Advances the countdown by one second.
    ///
    /// Returns `None` when the scheduler is stopped. Persistence and
    /// statistics failures are logged; the in-memory state moves on.
    pub fn tick(&mut self) -> Option<TickOutcome> {
        if !self.running {
            return None;
        }

        let gated = self.settings.pause_when_idle && self.activity.is_idle(IDLE_THRESHOLD_MS);
        let (next, outcome) = self.countdown.tick(&self.settings, gated);
        if outcome == TickOutcome::Frozen {
            tracing::trace!("user idle, countdown frozen");
            return Some(outcome);
        }
        self.countdown = next;

        match outcome {
            TickOutcome::BreakDue => {
                tracing::info!(seconds = self.countdown.remaining_seconds, "break started");
                self.queue_prompt();
            }
            TickOutcome::BreakCompleted { rest_seconds } => {
                tracing::info!(rest_seconds, "break completed");
                if let Err(e) = self.stats.record_break_taken(rest_seconds) {
                    tracing::warn!(error = %e, "failed to record taken break");
                }
            }
            TickOutcome::Counting | TickOutcome::Frozen => {}
        }

        if let Err(e) = self.persist_countdown() {
            tracing::warn!(error = %e, "failed to persist countdown");
        }
        self.notify();
        Some(outcome)
    }

    /// Applies the user's answer to a break prompt.
    ///
    /// The countdown only changes once its new value is stored.
    pub fn respond(&mut self, response: BreakResponse) -> Result<()> {
        let (next, outcome) = self.countdown.respond(response, &self.settings);
        if next == self.countdown && outcome.is_none() {
            return Ok(());
        }
        tracing::debug!(?response, ?next, "break response");
        store::save(self.store.as_ref(), PAUSE_STATE_KEY, &next)?;
        self.countdown = next;

        let recorded = match outcome {
            Some(BreakOutcome::Snoozed) => self.stats.record_break_snoozed(),
            Some(BreakOutcome::Dismissed) => self.stats.record_break_dismissed(),
            Some(BreakOutcome::Taken { rest_seconds }) => self.stats.record_break_taken(rest_seconds),
            None => Ok(()),
        };

        self.notify();
        recorded
    }

    /// Postpones the next break by five minutes.
    pub fn snooze(&mut self) -> Result<()> {
        self.respond(BreakResponse::Snoozed)
    }

    /// Queues a break prompt without touching the countdown.
    ///
    /// Returns `false` when reminders are disabled.
    pub fn trigger_break_now(&mut self) -> bool {
        if !self.settings.enabled {
            return false;
        }
        self.queue_prompt();
        true
    }

    /// Drains the prompts that are waiting to be shown.
    pub fn take_prompts(&mut self) -> Vec<BreakPrompt> {
        std::mem::take(&mut self.pending_prompts)
    }

    pub fn reset_stats(&mut self) -> Result<()> {
        self.stats.reset()
    }

    pub fn record_activity(&self) {
        self.activity.record_activity();
    }

    /// Registers a state-change callback. Dropping the handle unregisters it.
    pub fn on_state_change<F>(&self, callback: F) -> Subscription<PauseState>
    where
        F: Fn(&PauseState) + Send + Sync + 'static,
    {
        self.observers.subscribe(callback)
    }

    /// Writes the countdown one last time before the process exits.
    ///
    /// A stopped scheduler holds no countdown of its own and writes nothing.
    pub fn shutdown(&self) {
        if !self.running {
            return;
        }
        if let Err(e) = self.persist_countdown() {
            tracing::warn!(error = %e, "failed to persist countdown on shutdown");
        }
    }

    // ── Internals ────────────────────────────────────────────────────

    fn start(&mut self) {
        self.countdown = Self::stored_countdown(self.store.as_ref()).unwrap_or_else(|| Countdown::work(&self.settings));
        self.running = true;
        tracing::info!(countdown = ?self.countdown, "reminders enabled");
    }

    fn stop(&mut self) {
        self.running = false;
        tracing::info!("reminders disabled");
    }

    fn stored_countdown(store: &dyn KeyValueStore) -> Option<Countdown> {
        store::load::<Countdown>(store, PAUSE_STATE_KEY).filter(Countdown::is_resumable)
    }

    fn queue_prompt(&mut self) {
        self.pending_prompts.push(BreakPrompt::random(self.language));
    }

    fn persist_countdown(&self) -> Result<()> {
        store::save(self.store.as_ref(), PAUSE_STATE_KEY, &self.countdown)?;
        Ok(())
    }

    fn notify(&self) {
        self.observers.notify(&self.state());
    }
}
