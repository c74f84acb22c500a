//! SQLite-backed persistence for the raw tracker collections.
//!
//! Tasks and logs are stored verbatim as JSON documents in two fixed slots
//! of a key-value table. Derived state (streaks, ledger, balance) is never
//! persisted; it is replayed on load.

use rusqlite::{params, Connection};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::path::Path;

use crate::error::{DatabaseError, Result};
use crate::habit::{DailyLog, Task};

use super::data_dir;

/// Slot holding the task collection.
pub const TASKS_SLOT: &str = "sf_tasks";
/// Slot holding the daily log collection.
pub const LOGS_SLOT: &str = "sf_logs";

/// SQLite database holding the two tracker slots.
pub struct Database {
    conn: Connection,
}

impl Database {
    /// Open the database at `<data_dir>/streakflow.db`.
    ///
    /// Creates the database file and schema if they don't exist.
    ///
    /// # Errors
    /// Returns an error if the database cannot be opened or migrated.
    pub fn open() -> Result<Self> {
        let path = data_dir()?.join("streakflow.db");
        Self::open_at(&path)
    }

    /// Open (or create) a database file at an explicit path.
    pub fn open_at(path: &Path) -> Result<Self> {
        let conn = Connection::open(path).map_err(|source| DatabaseError::OpenFailed {
            path: path.to_path_buf(),
            source,
        })?;
        tracing::debug!(path = %path.display(), "opened tracker database");
        let db = Self { conn };
        db.migrate()?;
        Ok(db)
    }

    /// Open an in-memory database.
    pub fn open_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        let db = Self { conn };
        db.migrate()?;
        Ok(db)
    }

    fn migrate(&self) -> Result<(), rusqlite::Error> {
        self.conn.execute_batch(
            "CREATE TABLE IF NOT EXISTS kv (
                key   TEXT PRIMARY KEY,
                value TEXT NOT NULL
            );",
        )?;
        Ok(())
    }

    /// Get a value from the kv store.
    pub fn kv_get(&self, key: &str) -> Result<Option<String>, rusqlite::Error> {
        let mut stmt = self.conn.prepare("SELECT value FROM kv WHERE key = ?1")?;
        let result = stmt.query_row(params![key], |row| row.get::<_, String>(0));
        match result {
            Ok(v) => Ok(Some(v)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(e),
        }
    }

    /// Set a value in the kv store.
    pub fn kv_set(&self, key: &str, value: &str) -> Result<(), rusqlite::Error> {
        self.conn.execute(
            "INSERT OR REPLACE INTO kv (key, value) VALUES (?1, ?2)",
            params![key, value],
        )?;
        Ok(())
    }

    fn load_slot<T: DeserializeOwned>(&self, slot: &str) -> Result<Vec<T>> {
        let Some(raw) = self.kv_get(slot)? else {
            return Ok(Vec::new());
        };
        serde_json::from_str(&raw).map_err(|e| {
            DatabaseError::CorruptSlot {
                slot: slot.to_string(),
                message: e.to_string(),
            }
            .into()
        })
    }

    fn save_slot<T: Serialize>(&self, slot: &str, items: &[T]) -> Result<()> {
        let raw = serde_json::to_string(items)?;
        self.kv_set(slot, &raw)?;
        Ok(())
    }

    /// Load all tasks. A missing slot yields an empty list.
    pub fn load_tasks(&self) -> Result<Vec<Task>> {
        self.load_slot(TASKS_SLOT)
    }

    pub fn save_tasks(&self, tasks: &[Task]) -> Result<()> {
        self.save_slot(TASKS_SLOT, tasks)
    }

    /// Load all logs in stored order. A missing slot yields an empty list.
    pub fn load_logs(&self) -> Result<Vec<DailyLog>> {
        self.load_slot(LOGS_SLOT)
    }

    pub fn save_logs(&self, logs: &[DailyLog]) -> Result<()> {
        self.save_slot(LOGS_SLOT, logs)
    }

    /// Write both collections in a single transaction.
    pub fn save_all(&self, tasks: &[Task], logs: &[DailyLog]) -> Result<()> {
        let tx = self.conn.unchecked_transaction()?;
        self.save_tasks(tasks)?;
        self.save_logs(logs)?;
        tx.commit()?;
        Ok(())
    }
}
