//! Repository backends for the snip URL shortener.

pub mod memory;
pub mod sqlite;

pub use memory::InMemoryRepository;
pub use snip_core::repository::{ReadRepository, RecordKey, Repository, UrlRecord};
pub use snip_core::StorageError;
pub use sqlite::SqliteRepository;
