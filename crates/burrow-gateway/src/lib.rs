//! HTTP gateway for the Burrow URL shortener.
//!
//! Translates HTTP requests into [`burrow_core::Shortener`] calls and store
//! errors into status codes. The store itself is injected through
//! [`AppState`].

pub mod app;
pub mod error;
pub mod handlers;
pub mod model;
pub mod state;
pub mod validation;

pub use app::App;
pub use error::AppError;
pub use state::AppState;
