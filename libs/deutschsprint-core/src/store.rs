//! Persistence boundary for review records.

use crate::types::ReviewRecord;
use std::collections::HashMap;
use std::convert::Infallible;

/// Key-value store of review records keyed by item id.
pub trait RecordStore {
    type Error: std::error::Error + Send + Sync + 'static;

    fn get(&self, item_id: &str) -> Result<Option<ReviewRecord>, Self::Error>;
    fn set(&mut self, record: ReviewRecord) -> Result<(), Self::Error>;
    fn get_all(&self) -> Result<HashMap<String, ReviewRecord>, Self::Error>;
    fn clear(&mut self) -> Result<(), Self::Error>;
}

/// Store backed by a `HashMap`.
#[derive(Debug, Clone, Default)]
pub struct InMemoryStore {
    records: HashMap<String, ReviewRecord>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

impl RecordStore for InMemoryStore {
    type Error = Infallible;

    fn get(&self, item_id: &str) -> Result<Option<ReviewRecord>, Self::Error> {
        Ok(self.records.get(item_id).cloned())
    }

    fn set(&mut self, record: ReviewRecord) -> Result<(), Self::Error> {
        self.records.insert(record.item_id.clone(), record);
        Ok(())
    }

    fn get_all(&self) -> Result<HashMap<String, ReviewRecord>, Self::Error> {
        Ok(self.records.clone())
    }

    fn clear(&mut self) -> Result<(), Self::Error> {
        self.records.clear();
        Ok(())
    }
}
