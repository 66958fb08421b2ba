use crate::libs::data_storage::DataStorage;
use crate::libs::store::StoreResult;
use rusqlite::Connection;
use std::path::Path;

pub const DB_FILE_NAME: &str = "breakwatch.db";

pub struct Db {
    pub conn: Connection,
}

impl Db {
    /// Opens the database in the platform data directory.
    pub fn new() -> StoreResult<Db> {
        let db_file_path = DataStorage::new().get_path(DB_FILE_NAME)?;
        Self::open(db_file_path)
    }

    pub fn open(path: impl AsRef<Path>) -> StoreResult<Db> {
        let conn = Connection::open(path)?;
        Ok(Db { conn })
    }
}
