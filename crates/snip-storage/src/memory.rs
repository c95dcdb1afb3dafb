use async_trait::async_trait;
use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use snip_core::repository::{ReadRepository, RecordKey, Repository, Result, UrlRecord};
use snip_core::{ShortCode, StorageError};
use std::sync::atomic::{AtomicU64, Ordering};
use tracing::trace;

/// In-memory implementation of the Repository trait using DashMap.
///
/// DashMap provides better concurrency than RwLock<HashMap> because it
/// uses sharded locks, allowing concurrent reads and writes to different
/// buckets without blocking. Code-keyed inserts go through the entry API, so
/// the uniqueness check and the write happen under the same shard lock.
#[derive(Debug)]
pub struct InMemoryRepository {
    by_code: DashMap<ShortCode, UrlRecord>,
    by_id: DashMap<u64, UrlRecord>,
    next_id: AtomicU64,
}

impl InMemoryRepository {
    /// Creates a new in-memory repository.
    pub fn new() -> Self {
        Self::with_capacity(0)
    }

    /// Creates a new in-memory repository with the specified capacity.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            by_code: DashMap::with_capacity(capacity),
            by_id: DashMap::with_capacity(capacity),
            next_id: AtomicU64::new(1),
        }
    }

    /// Returns the number of stored records across both key schemes.
    pub fn len(&self) -> usize {
        self.by_code.len() + self.by_id.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Default for InMemoryRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ReadRepository for InMemoryRepository {
    async fn get(&self, key: &RecordKey) -> Result<Option<UrlRecord>> {
        let record = match key {
            RecordKey::Id(id) => self.by_id.get(id).map(|entry| entry.clone()),
            RecordKey::Code(code) => self.by_code.get(code).map(|entry| entry.clone()),
        };
        Ok(record)
    }
}

#[async_trait]
impl Repository for InMemoryRepository {
    async fn init(&self) -> Result<()> {
        Ok(())
    }

    async fn insert(&self, code: &ShortCode, record: UrlRecord) -> Result<()> {
        match self.by_code.entry(code.clone()) {
            Entry::Occupied(_) => Err(StorageError::Conflict(code.to_string())),
            Entry::Vacant(slot) => {
                trace!(code = %code, "inserting record");
                slot.insert(record);
                Ok(())
            }
        }
    }

    async fn insert_assigned(&self, record: UrlRecord) -> Result<u64> {
        let id = self.next_id.fetch_add(1, Ordering::SeqCst);
        trace!(id, "inserting record");
        self.by_id.insert(id, record);
        Ok(id)
    }
}
