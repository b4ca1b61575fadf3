//! SQLite view state store with in-memory cache.

use std::path::Path;
use std::sync::Mutex;
use std::sync::MutexGuard;

use chrono::Utc;
use dashmap::DashMap;
use rusqlite::Connection;
use rusqlite::OptionalExtension;

use super::StateStore;
use crate::error::StateError;

/// A persistent view state store backed by SQLite.
///
/// Reads go through a DashMap cache populated on first access; writes go
/// to the database first and then to the cache.
///
/// # Example
///
/// ```ignore
/// use gbrowse_lib::state::{SqliteStore, StateProvider};
///
/// let provider = StateProvider::new(SqliteStore::open("views.db")?);
/// ```
pub struct SqliteStore {
    conn: Mutex<Connection>,
    cache: DashMap<String, Vec<u8>>,
}

impl SqliteStore {
    /// Opens a store at `path`, creating the file and table if needed.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, StateError> {
        Self::init(Connection::open(path)?)
    }

    /// Opens a store in memory. Data is lost when the store is dropped.
    pub fn open_in_memory() -> Result<Self, StateError> {
        Self::init(Connection::open_in_memory()?)
    }

    fn init(conn: Connection) -> Result<Self, StateError> {
        conn.execute(
            "CREATE TABLE IF NOT EXISTS view_state (
                key TEXT PRIMARY KEY,
                value BLOB NOT NULL,
                updated_at INTEGER NOT NULL
            )",
            [],
        )?;

        Ok(Self {
            conn: Mutex::new(conn),
            cache: DashMap::new(),
        })
    }

    fn conn(&self) -> Result<MutexGuard<'_, Connection>, StateError> {
        self.conn.lock().map_err(|_| StateError::Poisoned)
    }

    /// Seconds since the epoch of the last write to `key`.
    pub fn updated_at(&self, key: &str) -> Result<Option<i64>, StateError> {
        let conn = self.conn()?;
        let updated = conn
            .query_row(
                "SELECT updated_at FROM view_state WHERE key = ?",
                [key],
                |row| row.get(0),
            )
            .optional()?;
        Ok(updated)
    }
}

impl StateStore for SqliteStore {
    fn get_bytes(&self, key: &str) -> Result<Option<Vec<u8>>, StateError> {
        // Check cache first
        if let Some(value) = self.cache.get(key) {
            return Ok(Some(value.clone()));
        }

        let result: Option<Vec<u8>> = {
            let conn = self.conn()?;
            conn.query_row("SELECT value FROM view_state WHERE key = ?", [key], |row| row.get(0))
                .optional()?
        };

        if let Some(ref value) = result {
            self.cache.insert(key.to_string(), value.clone());
        }

        Ok(result)
    }

    fn set_bytes(&self, key: &str, value: Vec<u8>) -> Result<(), StateError> {
        {
            let conn = self.conn()?;
            conn.execute(
                "INSERT INTO view_state (key, value, updated_at) VALUES (?1, ?2, ?3)
                 ON CONFLICT(key) DO UPDATE SET value = excluded.value, updated_at = excluded.updated_at",
                rusqlite::params![key, &value, Utc::now().timestamp()],
            )?;
        }

        self.cache.insert(key.to_string(), value);
        Ok(())
    }

    fn delete(&self, key: &str) -> Result<(), StateError> {
        {
            let conn = self.conn()?;
            conn.execute("DELETE FROM view_state WHERE key = ?", [key])?;
        }

        self.cache.remove(key);
        Ok(())
    }

    fn keys_with_prefix(&self, prefix: &str) -> Result<Vec<String>, StateError> {
        let conn = self.conn()?;
        let mut stmt =
            conn.prepare("SELECT key FROM view_state WHERE substr(key, 1, length(?1)) = ?1 ORDER BY key")?;
        let rows = stmt.query_map([prefix], |row| row.get(0))?;
        Ok(rows.collect::<Result<Vec<String>, _>>()?)
    }
}
