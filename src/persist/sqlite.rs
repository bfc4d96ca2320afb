//! SQLite-backed key-value slot.

use std::path::Path;
use std::time::{SystemTime, UNIX_EPOCH};

use rusqlite::{Connection, OptionalExtension, params};

use super::{PersistResult, Slot};

/// SQLite implementation of [`crate::persist::Slot`].
pub struct SqliteSlot {
    conn: Connection,
}

impl SqliteSlot {
    /// Opens or creates a SQLite-backed slot store at `path`.
    ///
    /// Enables WAL mode and sets `synchronous=NORMAL`.
    pub fn open(path: impl AsRef<Path>) -> PersistResult<Self> {
        let conn = Connection::open(path)?;
        Self::init_connection(conn)
    }

    /// Opens an in-memory SQLite slot store.
    pub fn open_in_memory() -> PersistResult<Self> {
        let conn = Connection::open_in_memory()?;
        Self::init_connection(conn)
    }

    fn init_connection(conn: Connection) -> PersistResult<Self> {
        conn.execute_batch(include_str!("schema.sql"))?;
        conn.pragma_update(None, "journal_mode", "WAL")?;
        conn.pragma_update(None, "synchronous", "NORMAL")?;
        Ok(Self { conn })
    }

    /// Removes `key`, returning whether it existed.
    pub fn remove(&mut self, key: &str) -> PersistResult<bool> {
        let count = self
            .conn
            .execute("DELETE FROM kv WHERE key = ?1", params![key])?;
        Ok(count > 0)
    }

    /// Last write time for `key` in milliseconds since epoch.
    pub fn updated_ms(&self, key: &str) -> PersistResult<Option<u64>> {
        let ms: Option<i64> = self
            .conn
            .query_row(
                "SELECT updated_ms FROM kv WHERE key = ?1",
                params![key],
                |row| row.get(0),
            )
            .optional()?;
        Ok(ms.map(|v| v as u64))
    }
}

impl Slot for SqliteSlot {
    fn read(&mut self, key: &str) -> PersistResult<Option<Vec<u8>>> {
        let payload = self
            .conn
            .query_row(
                "SELECT payload FROM kv WHERE key = ?1",
                params![key],
                |row| row.get(0),
            )
            .optional()?;
        Ok(payload)
    }

    fn write(&mut self, key: &str, payload: &[u8]) -> PersistResult<()> {
        self.conn.execute(
            "INSERT INTO kv(key, updated_ms, payload) VALUES (?1, ?2, ?3)
             ON CONFLICT(key) DO UPDATE SET updated_ms = excluded.updated_ms, payload = excluded.payload",
            params![key, now_ms() as i64, payload],
        )?;
        Ok(())
    }

    fn flush(&mut self) -> PersistResult<()> {
        self.conn.execute_batch("PRAGMA wal_checkpoint(PASSIVE);")?;
        Ok(())
    }
}

fn now_ms() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0)
}
