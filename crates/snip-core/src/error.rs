use thiserror::Error;

/// Errors raised by the pure (storage-free) parts of the shortener.
pub type Result<T> = std::result::Result<T, CoreError>;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CoreError {
    #[error("invalid url: {0}")]
    InvalidUrl(String),
    #[error("invalid short code: {0}")]
    InvalidCode(String),
}

#[derive(Debug, Clone, Error)]
pub enum StorageError {
    #[error("key already exists: {0}")]
    Conflict(String),
    #[error("storage backend unavailable: {0}")]
    Unavailable(String),
    #[error("storage operation timed out: {0}")]
    Timeout(String),
    #[error("storage query failed: {0}")]
    Query(String),
    #[error("stored data is invalid: {0}")]
    InvalidData(String),
}

/// Errors surfaced to callers of a [`Shortener`](crate::Shortener).
///
/// Every failure of a shorten or resolve request lands in exactly one of
/// these kinds; transports map them to their own status codes.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ShortenerError {
    #[error("invalid url: {0}")]
    InvalidUrl(String),
    #[error("invalid short code: {0}")]
    InvalidCode(String),
    #[error("short code collides with a different url: {0}")]
    DuplicateKey(String),
    #[error("no url found for code: {0}")]
    NotFound(String),
    #[error("store unavailable: {0}")]
    StoreUnavailable(String),
}

impl From<CoreError> for ShortenerError {
    fn from(value: CoreError) -> Self {
        match value {
            CoreError::InvalidUrl(message) => Self::InvalidUrl(message),
            CoreError::InvalidCode(message) => Self::InvalidCode(message),
        }
    }
}

impl From<StorageError> for ShortenerError {
    fn from(value: StorageError) -> Self {
        match value {
            StorageError::Conflict(key) => Self::DuplicateKey(key),
            other => Self::StoreUnavailable(other.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn conflict_maps_to_duplicate_key() {
        let err: ShortenerError = StorageError::Conflict("abcd".to_string()).into();
        assert_eq!(err, ShortenerError::DuplicateKey("abcd".to_string()));
    }

    #[test]
    fn infrastructure_failures_map_to_store_unavailable() {
        let err: ShortenerError = StorageError::Timeout("pool".to_string()).into();
        assert!(matches!(err, ShortenerError::StoreUnavailable(_)));

        let err: ShortenerError = StorageError::Query("syntax".to_string()).into();
        assert!(matches!(err, ShortenerError::StoreUnavailable(_)));
    }

    #[test]
    fn core_errors_keep_their_kind() {
        let err: ShortenerError = CoreError::InvalidCode("bad".to_string()).into();
        assert_eq!(err, ShortenerError::InvalidCode("bad".to_string()));
    }
}
