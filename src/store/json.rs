//! File-per-record JSON backend.
//!
//! Each record lives at `<dir>/<id>.json`, pretty-printed with a trailing
//! newline so the files diff cleanly under version control. Writes are
//! atomic (temp file + rename).

use std::fs;
use std::path::{Path, PathBuf};

use crate::store::{RecordStore, StoreError};
use crate::types::Hackathon;
use crate::util::atomic_write_str;

pub struct JsonStore {
    dir: PathBuf,
}

impl JsonStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }
}

impl RecordStore for JsonStore {
    fn load_all(&self) -> Result<Vec<Hackathon>, StoreError> {
        fs::create_dir_all(&self.dir)?;

        let mut paths: Vec<PathBuf> = fs::read_dir(&self.dir)?
            .filter_map(|entry| entry.ok().map(|e| e.path()))
            .filter(|p| p.extension().and_then(|e| e.to_str()) == Some("json"))
            .collect();
        // Filename order keeps the resolver's scan deterministic
        paths.sort();

        let mut records = Vec::new();
        for path in paths {
            let raw = fs::read_to_string(&path)?;
            match serde_json::from_str::<Hackathon>(&raw) {
                Ok(record) => records.push(record),
                Err(e) => log::warn!("Invalid record data in {}: {}", path.display(), e),
            }
        }
        Ok(records)
    }

    fn upsert(&self, record: &Hackathon) -> Result<(), StoreError> {
        fs::create_dir_all(&self.dir)?;
        let path = self.dir.join(format!("{}.json", record.id));
        let json = serde_json::to_string_pretty(record)?;
        atomic_write_str(&path, &format!("{}\n", json))?;
        Ok(())
    }
}
