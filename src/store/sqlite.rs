//! SQLite backend.
//!
//! One row per record: the id, status, and last-updated columns are
//! queryable; the full record round-trips through the payload column so
//! fields this build does not interpret survive a write cycle.

use std::path::{Path, PathBuf};

use rusqlite::{params, Connection};

use crate::store::{RecordStore, StoreError};
use crate::types::Hackathon;

const SCHEMA: &str = "
CREATE TABLE IF NOT EXISTS hackathons (
    id           TEXT PRIMARY KEY,
    status       TEXT NOT NULL,
    last_updated TEXT NOT NULL,
    payload      TEXT NOT NULL
);
";

pub struct SqliteStore {
    conn: Connection,
}

impl SqliteStore {
    /// Open (or create) the database at `~/.hackscout/hackscout.db`.
    pub fn open() -> Result<Self, StoreError> {
        let home = dirs::home_dir().ok_or(StoreError::HomeDirNotFound)?;
        Self::open_at(home.join(".hackscout").join("hackscout.db"))
    }

    /// Open a database at an explicit path. Useful for testing.
    pub fn open_at(path: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let path = path.into();
        if let Some(parent) = path.parent() {
            if !parent.exists() {
                std::fs::create_dir_all(parent)?;
            }
        }

        let conn = Connection::open(&path)?;
        conn.execute_batch("PRAGMA journal_mode=WAL;")?;
        conn.execute_batch(SCHEMA)?;
        Ok(Self { conn })
    }

    /// Borrow the underlying connection for ad-hoc queries.
    pub fn conn_ref(&self) -> &Connection {
        &self.conn
    }
}

impl RecordStore for SqliteStore {
    fn load_all(&self) -> Result<Vec<Hackathon>, StoreError> {
        let mut stmt = self
            .conn
            .prepare("SELECT id, payload FROM hackathons ORDER BY id")?;
        let rows = stmt.query_map([], |row| {
            Ok((row.get::<_, String>(0)?, row.get::<_, String>(1)?))
        })?;

        let mut records = Vec::new();
        for row in rows {
            let (id, payload) = row?;
            match serde_json::from_str::<Hackathon>(&payload) {
                Ok(record) => records.push(record),
                Err(e) => log::warn!("Invalid record payload for '{}': {}", id, e),
            }
        }
        Ok(records)
    }

    fn upsert(&self, record: &Hackathon) -> Result<(), StoreError> {
        let payload = serde_json::to_string(record)?;
        self.conn.execute(
            "INSERT INTO hackathons (id, status, last_updated, payload)
             VALUES (?1, ?2, ?3, ?4)
             ON CONFLICT(id) DO UPDATE SET
               status = excluded.status,
               last_updated = excluded.last_updated,
               payload = excluded.payload",
            params![
                record.id,
                record.status.as_str(),
                record.last_updated,
                payload
            ],
        )?;
        Ok(())
    }
}
