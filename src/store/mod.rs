//! Persistence backends for the record set.
//!
//! The core only needs two operations: load everything, and upsert one
//! record by id. Backends are injected into the pipeline so tests run
//! against the in-memory store and deployments pick JSON files or SQLite.
//!
//! All backends return records in a deterministic order, which matters:
//! the duplicate resolver's first-match-wins scan follows store order.

use thiserror::Error;

use crate::types::Hackathon;

pub mod json;
pub mod memory;
pub mod sqlite;

pub use json::JsonStore;
pub use memory::MemoryStore;
pub use sqlite::SqliteStore;

/// Errors from the persistence layer.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    #[error("Serialization error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Home directory not found")]
    HomeDirNotFound,
}

/// A keyed store of hackathon records, one per id.
///
/// Implementations must hand back exactly what was written, including
/// fields this build does not interpret (see `Hackathon::extra`).
pub trait RecordStore {
    /// Load every record. Entries that fail to parse are logged and
    /// skipped; one corrupt record never hides the rest.
    fn load_all(&self) -> Result<Vec<Hackathon>, StoreError>;

    /// Insert or replace the record with this id.
    fn upsert(&self, record: &Hackathon) -> Result<(), StoreError>;
}
