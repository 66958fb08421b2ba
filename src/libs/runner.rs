//! Async driver for the [`BreakScheduler`].
//!
//! The runner task is the only place the scheduler is mutated. It multiplexes
//! three sources with `tokio::select!`:
//!
//! - a one-second interval, polled only while reminders are running;
//! - a command channel carrying prompt answers and external requests;
//! - the shutdown future supplied by the caller.
//!
//! Break prompts block on user input, so each one is presented on a blocking
//! task and its answer comes back through the command channel as
//! [`RunnerCommand::Respond`]. At most one prompt is on screen at a time; a
//! prompt that falls due meanwhile is held back and shown after the answer
//! if the break is still on.

use crate::libs::messages::Message;
use crate::libs::notifier::NotificationChannel;
use crate::libs::scheduler::BreakScheduler;
use crate::libs::settings::PauseSettingsUpdate;
use crate::libs::timer::{BreakResponse, TickOutcome};
use crate::libs::tips::BreakPrompt;
use crate::{msg_error, msg_info, msg_success};
use std::future::Future;
use std::sync::Arc;
use tokio::sync::mpsc;
use tokio::time::{self, Duration, MissedTickBehavior};

/// Requests accepted by a running [`BreakRunner`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RunnerCommand {
    /// Answer to the prompt currently on screen.
    Respond(BreakResponse),
    Snooze,
    TriggerBreak,
    Toggle,
    UpdateSettings(PauseSettingsUpdate),
    ResetStats,
    RecordActivity,
}

/// Cloneable sender for [`RunnerCommand`]s.
#[derive(Clone)]
pub struct RunnerHandle {
    tx: mpsc::UnboundedSender<RunnerCommand>,
}

impl RunnerHandle {
    /// Queues `command`. Returns `false` once the runner has stopped.
    pub fn send(&self, command: RunnerCommand) -> bool {
        self.tx.send(command).is_ok()
    }

    pub fn snooze(&self) -> bool {
        self.send(RunnerCommand::Snooze)
    }

    pub fn trigger_break(&self) -> bool {
        self.send(RunnerCommand::TriggerBreak)
    }

    pub fn record_activity(&self) -> bool {
        self.send(RunnerCommand::RecordActivity)
    }
}

pub struct BreakRunner {
    scheduler: BreakScheduler,
    channel: Arc<dyn NotificationChannel>,
    tx: mpsc::UnboundedSender<RunnerCommand>,
    rx: mpsc::UnboundedReceiver<RunnerCommand>,
    activity_on_tick: bool,
    prompt_open: bool,
    held_prompt: Option<BreakPrompt>,
}

impl BreakRunner {
    pub fn new(scheduler: BreakScheduler, channel: Arc<dyn NotificationChannel>) -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        Self {
            scheduler,
            channel,
            tx,
            rx,
            activity_on_tick: false,
            prompt_open: false,
            held_prompt: None,
        }
    }

    /// Treats every tick as user activity, for builds without an input
    /// listener. Idle gating never triggers in this mode.
    pub fn with_activity_on_tick(mut self, enabled: bool) -> Self {
        self.activity_on_tick = enabled;
        self
    }

    pub fn handle(&self) -> RunnerHandle {
        RunnerHandle { tx: self.tx.clone() }
    }

    /// Drives the scheduler until `shutdown` completes, then persists the
    /// countdown and hands the scheduler back.
    pub async fn run<F>(mut self, shutdown: F) -> BreakScheduler
    where
        F: Future<Output = ()>,
    {
        let mut ticker = time::interval(Duration::from_secs(1));
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        // The first tick of an interval completes immediately.
        ticker.tick().await;

        tokio::pin!(shutdown);
        tracing::debug!(running = self.scheduler.is_running(), "break runner started");

        loop {
            let running = self.scheduler.is_running();
            tokio::select! {
                _ = &mut shutdown => break,
                Some(command) = self.rx.recv() => {
                    self.handle_command(command);
                    if !running && self.scheduler.is_running() {
                        ticker.reset();
                    }
                }
                _ = ticker.tick(), if running => {
                    if self.activity_on_tick {
                        self.scheduler.record_activity();
                    }
                    match self.scheduler.tick() {
                        Some(TickOutcome::BreakDue) => msg_info!(Message::BreakStarted),
                        Some(TickOutcome::BreakCompleted { rest_seconds }) => msg_success!(Message::BreakCompleted(rest_seconds)),
                        _ => {}
                    }
                }
            }
            self.present_prompts();
        }

        tracing::debug!("break runner stopped");
        self.scheduler.shutdown();
        self.scheduler
    }

    fn handle_command(&mut self, command: RunnerCommand) {
        tracing::debug!(?command, "runner command");
        let result = match command {
            RunnerCommand::Respond(response) => {
                self.prompt_open = false;
                match response {
                    BreakResponse::Snoozed => msg_info!(Message::BreakSnoozed),
                    BreakResponse::Dismissed => msg_info!(Message::BreakDismissed),
                    BreakResponse::NoResponse => {}
                }
                let result = self.scheduler.respond(response);
                if let Some(prompt) = self.held_prompt.take() {
                    if self.scheduler.state().is_on_break {
                        self.show(prompt);
                    }
                }
                result
            }
            RunnerCommand::Snooze => {
                let result = self.scheduler.snooze();
                if result.is_ok() {
                    msg_info!(Message::BreakSnoozed);
                }
                result
            }
            RunnerCommand::TriggerBreak => {
                if !self.scheduler.trigger_break_now() {
                    msg_info!(Message::RemindersDisabledHint);
                }
                Ok(())
            }
            RunnerCommand::Toggle => self.scheduler.toggle().map(|_| ()),
            RunnerCommand::UpdateSettings(update) => self.scheduler.update_settings(update),
            RunnerCommand::ResetStats => self.scheduler.reset_stats(),
            RunnerCommand::RecordActivity => {
                self.scheduler.record_activity();
                Ok(())
            }
        };

        if let Err(e) = result {
            msg_error!(Message::RunnerError(e.to_string()));
        }
    }

    fn present_prompts(&mut self) {
        for prompt in self.scheduler.take_prompts() {
            if self.prompt_open {
                if self.held_prompt.is_none() {
                    msg_info!(Message::BreakPromptStillOpen);
                }
                tracing::info!("break prompt still open, holding the next one back");
                self.held_prompt = Some(prompt);
                continue;
            }
            self.show(prompt);
        }
    }

    fn show(&mut self, prompt: BreakPrompt) {
        self.prompt_open = true;

        let channel = self.channel.clone();
        let tx = self.tx.clone();
        tokio::task::spawn_blocking(move || {
            let response = channel.present_break_prompt(&prompt).unwrap_or_else(|e| {
                msg_error!(Message::PromptFailed(e.to_string()));
                BreakResponse::NoResponse
            });
            let _ = tx.send(RunnerCommand::Respond(response));
        });
    }
}
