//! # Breakwatch - periodic rest reminders for screen work
//!
//! A command-line utility that reminds you to rest your eyes every few
//! minutes, tracks whether each break was taken, snoozed or dismissed, and
//! keeps daily, weekly and streak statistics.
//!
//! ## Features
//!
//! - **Break Scheduling**: Work/break countdown with persistent state
//! - **Idle Awareness**: The countdown freezes while you are away
//! - **Statistics**: Daily counters kept for 90 days, weekly compliance, streaks
//! - **Prompts**: Terminal or native dialog prompts with eye-health tips
//! - **Background Watcher**: Detached daemon with graceful shutdown
//!
//! ## Usage
//!
//! ```rust,no_run
//! use breakwatch::commands::Cli;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     Cli::menu().await
//! }
//! ```

pub mod commands;
pub mod db;
pub mod libs;
