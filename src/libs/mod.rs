//! Core library modules for breakwatch.
//!
//! ## Layout
//!
//! - **Reminder core**: [`timer`] (countdown transitions), [`scheduler`]
//!   (state machine, idle gating, persistence), [`stats`] (daily counters,
//!   rollups, streaks), [`activity`] (idle detection)
//! - **Infrastructure**: [`store`] (key-value persistence), [`clock`],
//!   [`settings`], [`config`], [`data_storage`], [`observers`]
//! - **Runtime**: [`runner`] (tokio driver), [`daemon`] (watcher process),
//!   [`monitor`] (input listener), [`notifier`] (break prompts)
//! - **Presentation**: [`messages`], [`formatter`], [`view`], [`tips`]
//!
//! ## Usage
//!
//! ```rust
//! use breakwatch::libs::clock::SystemClock;
//! use breakwatch::libs::scheduler::BreakScheduler;
//! use breakwatch::libs::settings::PauseSettingsUpdate;
//! use breakwatch::libs::store::MemoryStore;
//! use std::sync::Arc;
//!
//! let mut scheduler = BreakScheduler::new(Arc::new(MemoryStore::new()), Arc::new(SystemClock));
//! scheduler.update_settings(PauseSettingsUpdate::enabled(true))?;
//! assert_eq!(scheduler.state().remaining_seconds, 20 * 60);
//! # Ok::<(), anyhow::Error>(())
//! ```

pub mod activity;
pub mod clock;
pub mod config;
pub mod daemon;
pub mod data_storage;
pub mod formatter;
pub mod messages;
pub mod monitor;
pub mod notifier;
pub mod observers;
pub mod runner;
pub mod scheduler;
pub mod settings;
pub mod stats;
pub mod store;
pub mod timer;
pub mod tips;
pub mod view;
