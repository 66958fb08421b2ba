//! SQLite persistence for breakwatch.
//!
//! All state lives in a single key-value table, see [`kv`]. [`db`] only owns
//! the connection and the database file location.

/// Connection to `breakwatch.db`.
pub mod db;

/// JSON key-value table implementing [`KeyValueStore`](crate::libs::store::KeyValueStore).
pub mod kv;
