use thiserror::Error;

/// Errors raised by a durable storage adapter.
#[derive(Debug, Clone, Error)]
pub enum StorageError {
    #[error("short code already exists: {0}")]
    Conflict(String),
    #[error("storage backend unavailable: {0}")]
    Unavailable(String),
    #[error("storage operation timed out: {0}")]
    Timeout(String),
    #[error("storage query failed: {0}")]
    Query(String),
    #[error("stored data is invalid: {0}")]
    InvalidData(String),
    #[error("storage operation failed: {0}")]
    Operation(String),
}

/// Errors returned by the URL store operations.
#[derive(Debug, Clone, Error)]
pub enum StoreError {
    #[error("short code not found: {0}")]
    NotFound(String),
    #[error("short code has expired: {0}")]
    Expired(String),
    #[error("invalid expiry: {0}")]
    InvalidExpiry(String),
    #[error("no free short code after {attempts} attempts")]
    Exhausted { attempts: u32 },
    #[error(transparent)]
    Storage(#[from] StorageError),
}

/// Failure to load the cache from durable storage at startup.
#[derive(Debug, Clone, Error)]
pub enum InitError {
    #[error("failed to load url cache: {0}")]
    CacheLoad(#[source] StorageError),
}

pub type Result<T> = std::result::Result<T, StoreError>;
