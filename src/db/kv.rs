//! SQLite-backed key-value store.
//!
//! Each key maps to one row holding the JSON text of its value and the local
//! time of the last write. Writes are upserts, so the table never holds more
//! than one row per key.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use breakwatch::db::kv::SqliteStore;
//! use breakwatch::libs::store::{self, PAUSE_SETTINGS_KEY};
//! use breakwatch::libs::settings::PauseSettings;
//!
//! let kv = SqliteStore::new()?;
//! store::save(&kv, PAUSE_SETTINGS_KEY, &PauseSettings::default())?;
//! let settings: Option<PauseSettings> = store::load(&kv, PAUSE_SETTINGS_KEY);
//! # Ok::<(), breakwatch::libs::store::StoreError>(())
//! ```

use crate::db::db::Db;
use crate::libs::store::{KeyValueStore, StoreResult};
use parking_lot::Mutex;
use rusqlite::{params, Connection, OptionalExtension};
use serde_json::Value;
use std::path::Path;

/// SQL schema for the key-value table.
const SCHEMA_KV: &str = "CREATE TABLE IF NOT EXISTS kv (
    key TEXT NOT NULL PRIMARY KEY,
    value TEXT NOT NULL,
    updated_at TIMESTAMP NOT NULL
)";

const SELECT_VALUE: &str = "SELECT value FROM kv WHERE key = ?1";

/// Insert a value or replace the existing one, stamping the local write time.
const UPSERT_VALUE: &str = "INSERT INTO kv (key, value, updated_at) VALUES (?1, ?2, datetime(CURRENT_TIMESTAMP, 'localtime'))
    ON CONFLICT(key) DO UPDATE SET value = excluded.value, updated_at = excluded.updated_at";

const SELECT_UPDATED_AT: &str = "SELECT updated_at FROM kv WHERE key = ?1";

/// Key-value store persisted in the breakwatch SQLite database.
///
/// The connection sits behind a mutex so the store can be shared between the
/// scheduler task and the statistics engine.
pub struct SqliteStore {
    conn: Mutex<Connection>,
}

impl SqliteStore {
    /// Opens (and initializes) the store in the platform data directory.
    pub fn new() -> StoreResult<Self> {
        Self::from_db(Db::new()?)
    }

    /// Opens (and initializes) the store in an explicit database file.
    pub fn open(path: impl AsRef<Path>) -> StoreResult<Self> {
        Self::from_db(Db::open(path)?)
    }

    fn from_db(db: Db) -> StoreResult<Self> {
        db.conn.execute(SCHEMA_KV, [])?;
        Ok(Self { conn: Mutex::new(db.conn) })
    }

    /// Local timestamp (`YYYY-MM-DD HH:MM:SS`) of the last write to `key`.
    pub fn updated_at(&self, key: &str) -> StoreResult<Option<String>> {
        let conn = self.conn.lock();
        let updated_at = conn
            .query_row(SELECT_UPDATED_AT, params![key], |row| row.get::<_, String>(0))
            .optional()?;
        Ok(updated_at)
    }
}

impl KeyValueStore for SqliteStore {
    fn get(&self, key: &str) -> StoreResult<Option<Value>> {
        let raw = {
            let conn = self.conn.lock();
            conn.query_row(SELECT_VALUE, params![key], |row| row.get::<_, String>(0)).optional()?
        };

        match raw {
            Some(text) => Ok(Some(serde_json::from_str(&text)?)),
            None => Ok(None),
        }
    }

    fn update(&self, key: &str, value: Value) -> StoreResult<()> {
        let text = serde_json::to_string(&value)?;
        self.conn.lock().execute(UPSERT_VALUE, params![key, text])?;
        Ok(())
    }
}
