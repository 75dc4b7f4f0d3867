use async_trait::async_trait;
use burrow_core::{DurableStore, ShortCode, StorageError, UrlRecord};
use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use std::sync::Arc;

/// Durable store adapter that keeps rows in process memory.
///
/// Nothing survives a restart, which makes it suitable for tests and
/// throwaway deployments. Clones share the same rows, so a second URL store
/// can be initialized from the data the first one wrote.
#[derive(Debug, Clone, Default)]
pub struct InMemoryStore {
    rows: Arc<DashMap<String, UrlRecord>>,
}

impl InMemoryStore {
    /// Creates a new, empty in-memory store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a new in-memory store with the specified capacity.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            rows: Arc::new(DashMap::with_capacity(capacity)),
        }
    }

    /// Number of persisted rows.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Whether a row exists for `code`.
    pub fn contains(&self, code: &ShortCode) -> bool {
        self.rows.contains_key(code.as_str())
    }
}

#[async_trait]
impl DurableStore for InMemoryStore {
    async fn insert(&self, record: &UrlRecord) -> Result<(), StorageError> {
        match self.rows.entry(record.code.as_str().to_owned()) {
            Entry::Occupied(_) => Err(StorageError::Conflict(record.code.to_string())),
            Entry::Vacant(slot) => {
                slot.insert(record.clone());
                Ok(())
            }
        }
    }

    async fn scan_all(&self) -> Result<Vec<UrlRecord>, StorageError> {
        Ok(self.rows.iter().map(|row| row.value().clone()).collect())
    }

    async fn remove(&self, code: &ShortCode) -> Result<(), StorageError> {
        self.rows.remove(code.as_str());
        Ok(())
    }
}
