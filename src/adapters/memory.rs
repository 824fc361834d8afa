use crate::domain::model::Record;
use crate::domain::ports::Store;
use crate::utils::error::StoreError;
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard, PoisonError};

/// In-process store. A second insert with the same id replaces the first.
#[derive(Debug, Default)]
pub struct MemoryStore<R: Record> {
    records: Mutex<HashMap<String, R>>,
}

impl<R: Record> MemoryStore<R> {
    pub fn new() -> Self {
        Self {
            records: Mutex::new(HashMap::new()),
        }
    }

    fn lock(&self) -> Result<MutexGuard<'_, HashMap<String, R>>, StoreError> {
        self.records.lock().map_err(|_| StoreError::Backend {
            message: "memory store lock poisoned".to_string(),
        })
    }

    /// Counts records even after a panicking writer poisoned the lock; the
    /// map itself is never left half-updated by `insert`.
    pub fn len(&self) -> usize {
        self.records
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[async_trait]
impl<R: Record> Store<R> for MemoryStore<R> {
    async fn insert(&self, record: R) -> Result<(), StoreError> {
        let mut records = self.lock()?;
        let id = record.record_id().to_string();
        if records.insert(id.clone(), record).is_some() {
            tracing::debug!("Replaced existing record {}", id);
        }
        Ok(())
    }

    async fn fetch(&self, id: &str, out: &mut R) -> Result<(), StoreError> {
        let records = self.lock()?;
        let record = records.get(id).ok_or_else(|| StoreError::not_found(id))?;
        *out = record.clone();
        Ok(())
    }
}
