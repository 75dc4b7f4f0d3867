use std::time::Duration;

use burrow_core::{ExpirationPolicy, ShortCode, ShortenParams, UrlRecord};
use jiff::Timestamp;
use serde::{Deserialize, Serialize};

use crate::error::{AppError, Result};
use crate::validation::validate_url;

/// Body of `POST /v1/urls`.
///
/// `expiry_in_secs` and `expires_at` are mutually exclusive. A non-positive
/// `expiry_in_secs` means the link never expires.
#[derive(Debug, Deserialize)]
pub struct CreateUrlRequest {
    pub url: String,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub expiry_in_secs: Option<i64>,
    #[serde(default)]
    pub expires_at: Option<Timestamp>,
}

impl CreateUrlRequest {
    pub fn into_params(self) -> Result<ShortenParams> {
        validate_url(&self.url)?;

        let expiration = match (self.expiry_in_secs, self.expires_at) {
            (Some(_), Some(_)) => {
                return Err(AppError::InvalidRequest(
                    "expiry_in_secs and expires_at cannot both be set".to_string(),
                ))
            }
            (Some(secs), None) if secs > 0 => {
                ExpirationPolicy::AfterDuration(Duration::from_secs(secs.unsigned_abs()))
            }
            (None, Some(at)) => ExpirationPolicy::AtTimestamp(at),
            _ => ExpirationPolicy::Never,
        };

        Ok(ShortenParams {
            target_url: self.url,
            title: self.title.filter(|title| !title.is_empty()),
            expiration,
        })
    }
}

#[derive(Debug, Serialize)]
pub struct CreateUrlResponse {
    pub short_code: ShortCode,
    pub short_url: String,
}

#[derive(Debug, Serialize)]
pub struct UrlResponse {
    pub short_code: ShortCode,
    pub short_url: String,
    pub url: String,
    pub title: Option<String>,
    pub created_at: Timestamp,
    pub expires_at: Option<Timestamp>,
}

impl UrlResponse {
    pub fn from_record(record: UrlRecord, base_url: &str) -> Self {
        Self {
            short_url: record.code.to_url(base_url),
            short_code: record.code,
            url: record.target_url,
            title: record.title,
            created_at: record.created_at,
            expires_at: record.expires_at,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ListUrlsResponse {
    pub urls: Vec<UrlResponse>,
}

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}
