//! Key-value blob persistence.
//!
//! The calendar is persisted as one JSON blob under a fixed key per tracked
//! year. The [`BlobStore`] trait keeps the store testable; the production
//! backend is a single-table SQLite database.

use std::path::Path;

use rusqlite::{Connection, OptionalExtension, params};
use thiserror::Error;

/// Errors from a blob backend.
#[derive(Debug, Error)]
pub enum BlobError {
    /// An error from the underlying database.
    #[error("sqlite error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    /// Backend-specific failure outside SQLite.
    #[error("blob backend error: {0}")]
    Backend(String),
}

/// A key-value store for serialized calendar blobs.
///
/// Implementations must tolerate absent keys on load and absent keys on
/// clear; both are normal on first run.
pub trait BlobStore {
    /// Returns the blob stored under `key`, if any.
    fn load(&self, key: &str) -> Result<Option<String>, BlobError>;

    /// Writes `value` under `key`, replacing any previous blob.
    fn save(&mut self, key: &str, value: &str) -> Result<(), BlobError>;

    /// Removes the blob under `key`. Clearing a missing key is not an error.
    fn clear(&mut self, key: &str) -> Result<(), BlobError>;
}

/// SQLite-backed blob store.
///
/// The connection is `Send` but not `Sync`; wrap the owning store in a
/// mutex if multiple writers are ever introduced.
pub struct SqliteBlob {
    conn: Connection,
}

impl SqliteBlob {
    /// Opens a database at the given path, creating it if necessary.
    pub fn open(path: &Path) -> Result<Self, BlobError> {
        let conn = Connection::open(path)?;
        let blob = Self { conn };
        blob.init()?;
        Ok(blob)
    }

    /// Opens an in-memory database.
    ///
    /// Useful for testing. The database is destroyed when the connection
    /// closes.
    pub fn open_in_memory() -> Result<Self, BlobError> {
        let conn = Connection::open_in_memory()?;
        let blob = Self { conn };
        blob.init()?;
        Ok(blob)
    }

    /// Initializes the schema. Idempotent.
    fn init(&self) -> Result<(), BlobError> {
        self.conn.execute_batch(
            "
            CREATE TABLE IF NOT EXISTS calendar_blobs (
                key TEXT PRIMARY KEY,
                value TEXT NOT NULL
            );
            ",
        )?;
        Ok(())
    }
}

impl BlobStore for SqliteBlob {
    fn load(&self, key: &str) -> Result<Option<String>, BlobError> {
        let value = self
            .conn
            .query_row(
                "SELECT value FROM calendar_blobs WHERE key = ?1",
                params![key],
                |row| row.get(0),
            )
            .optional()?;
        Ok(value)
    }

    fn save(&mut self, key: &str, value: &str) -> Result<(), BlobError> {
        self.conn.execute(
            "INSERT INTO calendar_blobs (key, value) VALUES (?1, ?2)
             ON CONFLICT(key) DO UPDATE SET value = excluded.value",
            params![key, value],
        )?;
        Ok(())
    }

    fn clear(&mut self, key: &str) -> Result<(), BlobError> {
        self.conn
            .execute("DELETE FROM calendar_blobs WHERE key = ?1", params![key])?;
        Ok(())
    }
}

/// In-memory blob store for tests and ephemeral use.
#[derive(Debug, Default)]
pub struct MemoryBlob {
    entries: std::collections::HashMap<String, String>,
}

impl MemoryBlob {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Pre-seeds a blob, e.g. to simulate data from a previous run.
    #[must_use]
    pub fn with_entry(key: &str, value: &str) -> Self {
        let mut blob = Self::new();
        blob.entries.insert(key.to_string(), value.to_string());
        blob
    }
}

impl BlobStore for MemoryBlob {
    fn load(&self, key: &str) -> Result<Option<String>, BlobError> {
        Ok(self.entries.get(key).cloned())
    }

    fn save(&mut self, key: &str, value: &str) -> Result<(), BlobError> {
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn clear(&mut self, key: &str) -> Result<(), BlobError> {
        self.entries.remove(key);
        Ok(())
    }
}
