//! Core types and traits for the Burrow URL shortener.
//!
//! This crate provides the domain types shared by the durable storage
//! adapters, the URL store and the HTTP gateway.

pub mod clock;
pub mod error;
pub mod repository;
pub mod shortcode;
pub mod shortener;

pub use clock::{Clock, ManualClock, SystemClock};
pub use error::{InitError, StorageError, StoreError};
pub use repository::{DurableStore, UrlRecord};
pub use shortcode::{InvalidShortCode, ShortCode};
pub use shortener::{ExpirationPolicy, ShortenParams, Shortener};
