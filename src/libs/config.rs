//! Application configuration.
//!
//! `config.json` in the breakwatch data directory holds the knobs that are not
//! part of the reminder state itself: how break prompts are presented and in
//! which language. Pause settings live in the key-value store next to the
//! countdown and the statistics, see [`store`](crate::libs::store).
//!
//! ## File Location
//!
//! - **Windows**: `%LOCALAPPDATA%\breakwatch\config.json`
//! - **macOS**: `~/Library/Application Support/breakwatch/config.json`
//! - **Linux**: `~/.local/share/breakwatch/config.json`
//!
//! ## Usage
//!
//! ```rust,no_run
//! use breakwatch::libs::config::Config;
//!
//! let config = Config::read()?;
//! let prompt = config.prompt.unwrap_or_default();
//! println!("prompts are shown as {:?} in {}", prompt.kind, prompt.language);
//! # Ok::<(), anyhow::Error>(())
//! ```

use super::data_storage::DataStorage;
use crate::libs::messages::Message;
use crate::libs::settings::{PauseSettings, PauseSettingsUpdate};
use crate::libs::tips::Language;
use crate::msg_print;
use anyhow::Result;
use dialoguer::{theme::ColorfulTheme, Confirm, Input, Select};
use serde::{Deserialize, Serialize};
use std::fs::{self, File};
use std::path::Path;

pub const CONFIG_FILE_NAME: &str = "config.json";

/// Where break prompts are presented.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, Default, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum PromptKind {
    /// Interactive selection in the terminal running `breakwatch watch`.
    #[default]
    Terminal,
    /// Native message box. Needed when the watcher runs as a daemon.
    Desktop,
}

impl PromptKind {
    const ALL: [PromptKind; 2] = [PromptKind::Terminal, PromptKind::Desktop];

    fn label(&self) -> &'static str {
        match self {
            PromptKind::Terminal => "Terminal",
            PromptKind::Desktop => "Desktop dialog",
        }
    }
}

#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq, Eq)]
#[serde(default)]
pub struct PromptConfig {
    pub kind: PromptKind,
    /// Language of tips and button labels.
    pub language: Language,
}

/// Root of `config.json`. Unconfigured sections are omitted from the file.
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq, Eq)]
pub struct Config {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prompt: Option<PromptConfig>,
}

impl Config {
    /// Reads the configuration from the data directory.
    ///
    /// A missing file yields the defaults; a file that exists but cannot be
    /// parsed is an error.
    pub fn read() -> Result<Config> {
        let config_file_path = DataStorage::new().get_path(CONFIG_FILE_NAME)?;
        Self::read_from(config_file_path)
    }

    pub fn read_from(path: impl AsRef<Path>) -> Result<Config> {
        let path = path.as_ref();
        if !path.exists() {
            return Ok(Config::default());
        }

        let config_str = fs::read_to_string(path)?;
        let config: Config = serde_json::from_str(&config_str)?;
        Ok(config)
    }

    /// Writes the configuration as pretty-printed JSON.
    pub fn save(&self) -> Result<()> {
        let config_file_path = DataStorage::new().get_path(CONFIG_FILE_NAME)?;
        self.save_to(config_file_path)
    }

    pub fn save_to(&self, path: impl AsRef<Path>) -> Result<()> {
        let config_file = File::create(path)?;
        serde_json::to_writer_pretty(&config_file, &self)?;
        Ok(())
    }

    /// Prompt settings, or their defaults when the section is absent.
    pub fn prompt_config(&self) -> PromptConfig {
        self.prompt.clone().unwrap_or_default()
    }

    /// Interactive setup of the prompt section.
    ///
    /// Existing values are offered as defaults. A configuration that fails to
    /// load is replaced rather than blocking the wizard.
    pub fn init() -> Result<Self> {
        let mut config = Self::read().unwrap_or_default();
        let default = config.prompt_config();

        msg_print!(Message::ConfigModulePrompt);
        let kind_index = Select::with_theme(&ColorfulTheme::default())
            .with_prompt(Message::PromptSelectPromptKind.to_string())
            .items(&PromptKind::ALL.iter().map(PromptKind::label).collect::<Vec<_>>())
            .default(PromptKind::ALL.iter().position(|kind| *kind == default.kind).unwrap_or(0))
            .interact()?;

        let language: String = Input::with_theme(&ColorfulTheme::default())
            .with_prompt(Message::PromptLanguage.to_string())
            .default(default.language.to_string())
            .interact_text()?;

        config.prompt = Some(PromptConfig {
            kind: PromptKind::ALL[kind_index],
            language: Language::from_locale(&language),
        });

        Ok(config)
    }
}

/// Interactive setup of the reminder settings, starting from `current`.
///
/// Returns the changes to apply; fields the user left unchanged are `None`.
pub fn init_pause_settings(current: &PauseSettings) -> Result<PauseSettingsUpdate> {
    let theme = ColorfulTheme::default();
    msg_print!(Message::ConfigModuleReminders);

    let enabled = Confirm::with_theme(&theme)
        .with_prompt(Message::PromptEnableReminders.to_string())
        .default(current.enabled)
        .interact()?;

    let work_interval_minutes: i64 = Input::with_theme(&theme)
        .with_prompt(Message::PromptWorkInterval.to_string())
        .default(i64::from(current.work_interval_minutes))
        .interact_text()?;

    let break_duration_seconds: i64 = Input::with_theme(&theme)
        .with_prompt(Message::PromptBreakDuration.to_string())
        .default(i64::from(current.break_duration_seconds))
        .interact_text()?;

    let show_countdown = Confirm::with_theme(&theme)
        .with_prompt(Message::PromptShowCountdown.to_string())
        .default(current.show_countdown)
        .interact()?;

    let pause_when_idle = Confirm::with_theme(&theme)
        .with_prompt(Message::PromptPauseWhenIdle.to_string())
        .default(current.pause_when_idle)
        .interact()?;

    Ok(PauseSettingsUpdate {
        enabled: (enabled != current.enabled).then_some(enabled),
        work_interval_minutes: (work_interval_minutes != i64::from(current.work_interval_minutes)).then_some(work_interval_minutes),
        break_duration_seconds: (break_duration_seconds != i64::from(current.break_duration_seconds)).then_some(break_duration_seconds),
        show_countdown: (show_countdown != current.show_countdown).then_some(show_countdown),
        pause_when_idle: (pause_when_idle != current.pause_when_idle).then_some(pause_when_idle),
    })
}
