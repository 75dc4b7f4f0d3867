use crate::error::{Result, StoreError};
use crate::repository::UrlRecord;
use crate::shortcode::ShortCode;
use async_trait::async_trait;
use jiff::{SignedDuration, Timestamp};
use std::time::Duration;

/// Expiration policy for a shortened URL.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ExpirationPolicy {
    /// The shortened URL never expires.
    #[default]
    Never,
    /// The shortened URL expires after a certain duration from creation.
    /// A zero duration means it never expires.
    AfterDuration(Duration),
    /// The shortened URL expires at a specific timestamp.
    AtTimestamp(Timestamp),
}

impl ExpirationPolicy {
    /// Computes the expiry instant for a record created at `created_at`.
    pub fn expires_at(&self, created_at: Timestamp) -> Result<Option<Timestamp>> {
        match *self {
            ExpirationPolicy::Never => Ok(None),
            ExpirationPolicy::AfterDuration(duration) if duration.is_zero() => Ok(None),
            ExpirationPolicy::AfterDuration(duration) => {
                let duration = SignedDuration::try_from(duration)
                    .map_err(|e| StoreError::InvalidExpiry(format!("invalid duration: {e}")))?;
                created_at
                    .checked_add(duration)
                    .map(Some)
                    .map_err(|e| StoreError::InvalidExpiry(format!("expiry out of range: {e}")))
            }
            ExpirationPolicy::AtTimestamp(timestamp) => {
                if timestamp <= created_at {
                    return Err(StoreError::InvalidExpiry(format!(
                        "expiry {timestamp} is not after creation time {created_at}"
                    )));
                }
                Ok(Some(timestamp))
            }
        }
    }
}

/// Parameters for creating a shortened URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShortenParams {
    /// The original URL to be shortened.
    pub target_url: String,
    /// Optional title stored alongside the URL.
    pub title: Option<String>,
    /// The expiration policy for the shortened URL.
    pub expiration: ExpirationPolicy,
}

impl ShortenParams {
    pub fn new(target_url: impl Into<String>) -> Self {
        Self {
            target_url: target_url.into(),
            title: None,
            expiration: ExpirationPolicy::Never,
        }
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn with_expiration(mut self, expiration: ExpirationPolicy) -> Self {
        self.expiration = expiration;
        self
    }
}

#[async_trait]
pub trait Shortener: Send + Sync + 'static {
    /// Creates a shortened URL and returns its freshly generated short code.
    async fn create(&self, params: ShortenParams) -> Result<ShortCode>;

    /// Resolves a short code to its record.
    ///
    /// Fails with `NotFound` for unknown codes and `Expired` for codes whose
    /// expiry has passed.
    async fn get(&self, code: &ShortCode) -> Result<UrlRecord>;

    /// Lists active records, newest first.
    async fn list(&self) -> Result<Vec<UrlRecord>>;

    /// Permanently removes a shortened URL.
    async fn delete(&self, code: &ShortCode) -> Result<()>;
}
