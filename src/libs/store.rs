//! Key-value persistence used by the scheduler and the statistics engine.
//!
//! Everything breakwatch remembers between runs is stored as JSON under three
//! keys: the user's pause settings, the scheduler's countdown and the
//! statistics aggregate. The [`KeyValueStore`] trait keeps that contract
//! abstract so the SQLite store used by the CLI and the in-memory store used
//! by tests and embedders are interchangeable.
//!
//! ## Failure policy
//!
//! - Writes report failures through [`StoreError`]; callers decide whether to
//!   propagate (user operations) or log and continue (the tick loop).
//! - Reads through [`load`] treat missing, unreadable and malformed values the
//!   same way: as absent. A corrupted row never prevents startup.

use parking_lot::Mutex;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use thiserror::Error;

/// Key holding the persisted [`PauseSettings`](crate::libs::settings::PauseSettings).
pub const PAUSE_SETTINGS_KEY: &str = "breakwatch.pauseSettings";
/// Key holding the persisted [`Countdown`](crate::libs::timer::Countdown).
pub const PAUSE_STATE_KEY: &str = "breakwatch.pauseState";
/// Key holding the [`StoredStatsAggregate`](crate::libs::stats::StoredStatsAggregate).
pub const PAUSE_STATS_KEY: &str = "breakwatch.pauseStats";

/// Errors raised at the persistence boundary.
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// The backing store refused the operation.
    #[error("Store unavailable: {0}")]
    Unavailable(String),
}

pub type StoreResult<T> = Result<T, StoreError>;

/// Minimal persistent key-value contract.
pub trait KeyValueStore: Send + Sync {
    /// Returns the value stored under `key`, if any.
    fn get(&self, key: &str) -> StoreResult<Option<Value>>;

    /// Stores `value` under `key`, replacing any previous value.
    ///
    /// Returns only after the write is durable for this store.
    fn update(&self, key: &str, value: Value) -> StoreResult<()>;
}

/// Reads and deserializes `key`, treating any failure as absence.
pub fn load<T: DeserializeOwned>(store: &dyn KeyValueStore, key: &str) -> Option<T> {
    let value = match store.get(key) {
        Ok(Some(value)) => value,
        Ok(None) => return None,
        Err(e) => {
            tracing::warn!(key, error = %e, "failed to read stored value, using defaults");
            return None;
        }
    };

    match serde_json::from_value(value) {
        Ok(parsed) => Some(parsed),
        Err(e) => {
            tracing::warn!(key, error = %e, "ignoring malformed stored value");
            None
        }
    }
}

/// Serializes `value` and writes it under `key`.
pub fn save<T: Serialize>(store: &dyn KeyValueStore, key: &str, value: &T) -> StoreResult<()> {
    let value = serde_json::to_value(value)?;
    store.update(key, value)
}

/// Process-local store. Nothing survives the process.
///
/// Writes can be made to fail on demand, which lets callers exercise their
/// persistence-failure paths.
#[derive(Debug, Default)]
pub struct MemoryStore {
    values: Mutex<HashMap<String, Value>>,
    fail_writes: AtomicBool,
    failing_key: Mutex<Option<String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Makes every subsequent `update` fail (or succeed again).
    pub fn set_fail_writes(&self, fail: bool) {
        self.fail_writes.store(fail, Ordering::SeqCst);
    }

    /// Makes writes to `key` alone fail until cleared with `None`.
    pub fn set_failing_key(&self, key: Option<&str>) {
        *self.failing_key.lock() = key.map(str::to_string);
    }

    /// Writes a raw value, bypassing serialization. Also ignores `fail_writes`.
    pub fn insert_raw(&self, key: &str, value: Value) {
        self.values.lock().insert(key.to_string(), value);
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> StoreResult<Option<Value>> {
        Ok(self.values.lock().get(key).cloned())
    }

    fn update(&self, key: &str, value: Value) -> StoreResult<()> {
        if self.fail_writes.load(Ordering::SeqCst) || self.failing_key.lock().as_deref() == Some(key) {
            return Err(StoreError::Unavailable(format!("write to '{}' rejected", key)));
        }
        self.values.lock().insert(key.to_string(), value);
        Ok(())
    }
}
