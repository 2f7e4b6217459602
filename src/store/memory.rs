//! In-memory backend for tests and embedding.

use std::collections::BTreeMap;

use parking_lot::Mutex;

use crate::store::{RecordStore, StoreError};
use crate::types::Hackathon;

/// BTreeMap-backed store; `load_all` returns records in id order.
#[derive(Default)]
pub struct MemoryStore {
    records: Mutex<BTreeMap<String, Hackathon>>,
}

impl MemoryStore {
    /// Seed a store with existing records (later ids overwrite earlier).
    pub fn with_records(records: impl IntoIterator<Item = Hackathon>) -> Self {
        let store = Self::default();
        {
            let mut map = store.records.lock();
            for record in records {
                map.insert(record.id.clone(), record);
            }
        }
        store
    }

    pub fn len(&self) -> usize {
        self.records.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.lock().is_empty()
    }
}

impl RecordStore for MemoryStore {
    fn load_all(&self) -> Result<Vec<Hackathon>, StoreError> {
        Ok(self.records.lock().values().cloned().collect())
    }

    fn upsert(&self, record: &Hackathon) -> Result<(), StoreError> {
        self.records
            .lock()
            .insert(record.id.clone(), record.clone());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::merge::to_record;
    use crate::types::{Candidate, HackathonFormat};

    fn sample(name: &str) -> Hackathon {
        to_record(
            &Candidate {
                name: Some(name.to_string()),
                organizer: Some("Org".to_string()),
                url: Some("https://example.com/e".to_string()),
                format: Some(HackathonFormat::Hybrid),
                confidence: 0.6,
                ..Default::default()
            },
            "test",
        )
    }

    #[test]
    fn test_upsert_and_load_in_id_order() {
        let store = MemoryStore::default();
        store.upsert(&sample("Zebra")).unwrap();
        store.upsert(&sample("Alpha")).unwrap();
        let all = store.load_all().unwrap();
        assert_eq!(all.len(), 2);
        assert_eq!(all[0].id, "alpha");
        assert_eq!(all[1].id, "zebra");
    }

    #[test]
    fn test_upsert_replaces() {
        let store = MemoryStore::default();
        let mut r = sample("Event");
        store.upsert(&r).unwrap();
        r.confidence = 0.9;
        store.upsert(&r).unwrap();
        let all = store.load_all().unwrap();
        assert_eq!(all.len(), 1);
        assert_eq!(all[0].confidence, 0.9);
    }
}
