//! Break prompt presentation.
//!
//! A [`NotificationChannel`] shows a [`BreakPrompt`] and blocks until the user
//! answers or closes it. The runner calls it from a blocking task, so
//! implementations are free to wait on the terminal or a native dialog.

use crate::libs::config::{PromptConfig, PromptKind};
use crate::libs::timer::BreakResponse;
use crate::libs::tips::BreakPrompt;
use anyhow::Result;
use dialoguer::{theme::ColorfulTheme, Select};
use rfd::{MessageButtons, MessageDialog, MessageDialogResult, MessageLevel};
use std::sync::Arc;

pub trait NotificationChannel: Send + Sync {
    /// Shows `prompt` and returns the user's answer.
    fn present_break_prompt(&self, prompt: &BreakPrompt) -> Result<BreakResponse>;
}

/// Selection list in the controlling terminal. Esc counts as no response.
#[derive(Debug, Default)]
pub struct TerminalPrompt;

impl NotificationChannel for TerminalPrompt {
    fn present_break_prompt(&self, prompt: &BreakPrompt) -> Result<BreakResponse> {
        let choice = Select::with_theme(&ColorfulTheme::default())
            .with_prompt(&prompt.message)
            .items(&[&prompt.dismiss_label, &prompt.snooze_label])
            .default(0)
            .interact_opt()?;

        Ok(match choice {
            Some(0) => BreakResponse::Dismissed,
            Some(_) => BreakResponse::Snoozed,
            None => BreakResponse::NoResponse,
        })
    }
}

/// Native message box with the two labels as buttons.
#[derive(Debug)]
pub struct DesktopPrompt {
    title: String,
}

impl DesktopPrompt {
    pub fn new(title: impl Into<String>) -> Self {
        Self { title: title.into() }
    }
}

impl Default for DesktopPrompt {
    fn default() -> Self {
        Self::new("breakwatch")
    }
}

impl NotificationChannel for DesktopPrompt {
    fn present_break_prompt(&self, prompt: &BreakPrompt) -> Result<BreakResponse> {
        let result = MessageDialog::new()
            .set_level(MessageLevel::Info)
            .set_title(&self.title)
            .set_description(&prompt.message)
            .set_buttons(MessageButtons::OkCancelCustom(prompt.dismiss_label.clone(), prompt.snooze_label.clone()))
            .show();

        Ok(response_from_dialog(result, prompt))
    }
}

fn response_from_dialog(result: MessageDialogResult, prompt: &BreakPrompt) -> BreakResponse {
    match result {
        MessageDialogResult::Custom(label) if label == prompt.dismiss_label => BreakResponse::Dismissed,
        MessageDialogResult::Custom(label) if label == prompt.snooze_label => BreakResponse::Snoozed,
        MessageDialogResult::Ok => BreakResponse::Dismissed,
        _ => BreakResponse::NoResponse,
    }
}

/// Channel selected by the prompt configuration.
pub fn channel_for(config: &PromptConfig) -> Arc<dyn NotificationChannel> {
    match config.kind {
        PromptKind::Terminal => Arc::new(TerminalPrompt),
        PromptKind::Desktop => Arc::new(DesktopPrompt::default()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::libs::tips::Language;

    #[test]
    fn dialog_buttons_map_to_responses() {
        let prompt = BreakPrompt::with_tip(Language::En, "Blink.");

        assert_eq!(response_from_dialog(MessageDialogResult::Custom("Dismiss".into()), &prompt), BreakResponse::Dismissed);
        assert_eq!(response_from_dialog(MessageDialogResult::Custom("Snooze 5 min".into()), &prompt), BreakResponse::Snoozed);
        assert_eq!(response_from_dialog(MessageDialogResult::Cancel, &prompt), BreakResponse::NoResponse);
    }
}
