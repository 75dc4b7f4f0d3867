//! The URL store: an in-memory cache of every shortened URL, kept in
//! lockstep with durable storage.
//!
//! [`UrlStore`] generates unique short codes, serves lookups from memory and
//! applies expiry when a code is read. It implements
//! [`burrow_core::Shortener`], which is what the HTTP layer depends on.

pub mod settings;
pub mod store;

pub use burrow_core::{ShortenParams, Shortener, StoreError};
pub use settings::StoreSettings;
pub use store::UrlStore;
