use crate::error::StorageError;
use crate::shortcode::ShortCode;
use async_trait::async_trait;
use jiff::Timestamp;
use serde::{Deserialize, Serialize};

/// A shortened URL as persisted in durable storage and mirrored in the cache.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UrlRecord {
    /// The short code, unique across every record ever created.
    pub code: ShortCode,
    /// The original URL that was shortened.
    pub target_url: String,
    /// Optional human readable title.
    pub title: Option<String>,
    /// When the record was created.
    pub created_at: Timestamp,
    /// When the record expires, if ever. Always after `created_at`.
    pub expires_at: Option<Timestamp>,
}

impl UrlRecord {
    /// Whether the record resolves at `now`.
    ///
    /// A record without an expiry is always active; otherwise it is active
    /// strictly before its expiry instant.
    pub fn is_active_at(&self, now: Timestamp) -> bool {
        self.expires_at.is_none_or(|expires_at| expires_at > now)
    }
}

/// Persistent storage behind the URL store.
///
/// Adapters only translate between [`UrlRecord`] and rows. Lookups by code
/// and expiry filtering happen in the store's cache.
#[async_trait]
pub trait DurableStore: Send + Sync + 'static {
    /// Appends one record. Returns `Err(Conflict)` if the code is already taken.
    async fn insert(&self, record: &UrlRecord) -> Result<(), StorageError>;

    /// Returns every persisted record.
    async fn scan_all(&self) -> Result<Vec<UrlRecord>, StorageError>;

    /// Deletes the record for `code`. Removing a missing code is not an error.
    async fn remove(&self, code: &ShortCode) -> Result<(), StorageError>;
}
