use crate::error::StorageError;
use crate::shortcode::ShortCode;
use async_trait::async_trait;
use jiff::Timestamp;
use serde::{Deserialize, Serialize};
use std::fmt::Display;

/// Result type for repository operations.
pub type Result<T> = std::result::Result<T, StorageError>;

/// A stored URL record in the repository.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UrlRecord {
    /// The normalized URL that was shortened.
    pub original_url: String,
    /// When the record was written.
    pub created_at: Timestamp,
}

impl UrlRecord {
    /// Creates a record stamped with the current time.
    pub fn new(original_url: impl Into<String>) -> Self {
        Self {
            original_url: original_url.into(),
            created_at: Timestamp::now(),
        }
    }
}

/// The primary key a record is stored under.
///
/// Surrogate-key deployments key records by a store-assigned integer;
/// content-derived deployments key them by the code itself.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum RecordKey {
    Id(u64),
    Code(ShortCode),
}

impl Display for RecordKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RecordKey::Id(id) => write!(f, "#{id}"),
            RecordKey::Code(code) => write!(f, "{code}"),
        }
    }
}

/// A read-only view of a repository.
#[async_trait]
pub trait ReadRepository: Send + Sync + 'static {
    /// Retrieves the record stored under `key`.
    /// Returns `None` if nothing was ever stored there.
    async fn get(&self, key: &RecordKey) -> Result<Option<UrlRecord>>;
}

#[async_trait]
pub trait Repository: ReadRepository {
    /// Creates the backing tables if they do not exist yet.
    ///
    /// Safe to call on every start.
    async fn init(&self) -> Result<()>;

    /// Inserts a record under a caller-chosen code.
    ///
    /// Returns `Err(StorageError::Conflict)` if the code is already taken;
    /// the existing record is left untouched.
    async fn insert(&self, code: &ShortCode, record: UrlRecord) -> Result<()>;

    /// Inserts a record under a store-assigned id and returns that id.
    ///
    /// Ids start at 1 and increase monotonically.
    async fn insert_assigned(&self, record: UrlRecord) -> Result<u64>;
}
