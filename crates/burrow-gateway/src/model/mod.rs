mod health;
mod url;

pub use health::HealthResponse;
pub use url::{CreateUrlRequest, CreateUrlResponse, ErrorResponse, ListUrlsResponse, UrlResponse};
