use std::sync::Arc;

use async_trait::async_trait;
use axum::body::{to_bytes, Body};
use axum::http::{header, Method, Request, StatusCode};
use axum::Router;
use burrow_core::{
    ManualClock, ShortCode, ShortenParams, Shortener, StorageError, StoreError, UrlRecord,
};
use burrow_gateway::{App, AppState};
use burrow_generator::RandomGenerator;
use burrow_shortener::{StoreSettings, UrlStore};
use burrow_storage::InMemoryStore;
use jiff::{SignedDuration, Timestamp};
use serde_json::{json, Value};
use tower::ServiceExt;

const BASE_URL: &str = "https://bur.row";

struct Fixture {
    router: Router,
    clock: ManualClock,
}

impl Fixture {
    async fn start() -> Self {
        let clock = ManualClock::new("2026-02-01T00:00:00Z".parse::<Timestamp>().unwrap());
        let store = UrlStore::initialize_with(
            InMemoryStore::new(),
            RandomGenerator::default(),
            clock.clone(),
            StoreSettings::default(),
        )
        .await
        .expect("load cache");

        Self {
            router: App::router(AppState::new(Arc::new(store), BASE_URL)),
            clock,
        }
    }

    async fn send(&self, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
        let response = self.raw(method, uri, body).await;
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let value = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap()
        };
        (status, value)
    }

    async fn raw(
        &self,
        method: Method,
        uri: &str,
        body: Option<Value>,
    ) -> axum::http::Response<Body> {
        let mut request = Request::builder().method(method).uri(uri);
        let body = match body {
            Some(value) => {
                request = request.header(header::CONTENT_TYPE, "application/json");
                Body::from(value.to_string())
            }
            None => Body::empty(),
        };

        self.router
            .clone()
            .oneshot(request.body(body).unwrap())
            .await
            .unwrap()
    }

    async fn create(&self, body: Value) -> String {
        let (status, value) = self.send(Method::POST, "/v1/urls", Some(body)).await;
        assert_eq!(status, StatusCode::CREATED, "{value}");
        value["short_code"].as_str().unwrap().to_string()
    }
}

#[tokio::test]
async fn health() {
    let fixture = Fixture::start().await;

    let (status, body) = fixture.send(Method::GET, "/health", None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "status": "ok" }));
}

#[tokio::test]
async fn create_returns_code_and_short_url() {
    let fixture = Fixture::start().await;

    let (status, body) = fixture
        .send(
            Method::POST,
            "/v1/urls",
            Some(json!({ "url": "https://example.com/a/very/long/path" })),
        )
        .await;

    assert_eq!(status, StatusCode::CREATED);
    let code = body["short_code"].as_str().unwrap();
    assert_eq!(code.len(), 6);
    assert_eq!(body["short_url"], format!("{BASE_URL}/{code}"));
}

#[tokio::test]
async fn create_then_get_record() {
    let fixture = Fixture::start().await;
    let code = fixture
        .create(json!({
            "url": "https://example.com",
            "title": "Example",
            "expiry_in_secs": 60,
        }))
        .await;

    let (status, body) = fixture
        .send(Method::GET, &format!("/v1/urls/{code}"), None)
        .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["short_code"], code.as_str());
    assert_eq!(body["url"], "https://example.com");
    assert_eq!(body["title"], "Example");
    assert_eq!(body["created_at"], "2026-02-01T00:00:00Z");
    assert_eq!(body["expires_at"], "2026-02-01T00:01:00Z");
}

#[tokio::test]
async fn create_rejects_invalid_url() {
    let fixture = Fixture::start().await;

    let (status, body) = fixture
        .send(Method::POST, "/v1/urls", Some(json!({ "url": "not a url" })))
        .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].as_str().unwrap().contains("invalid url"));
}

#[tokio::test]
async fn create_rejects_control_characters() {
    let fixture = Fixture::start().await;

    let (status, body) = fixture
        .send(
            Method::POST,
            "/v1/urls",
            Some(json!({ "url": "https://example.com/a\u{1}b" })),
        )
        .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].as_str().unwrap().contains("control characters"));

    let (_, body) = fixture.send(Method::GET, "/v1/urls", None).await;
    assert_eq!(body["urls"], json!([]));
}

#[tokio::test]
async fn create_rejects_past_expiry_date() {
    let fixture = Fixture::start().await;

    let (status, _body) = fixture
        .send(
            Method::POST,
            "/v1/urls",
            Some(json!({
                "url": "https://example.com",
                "expires_at": "2020-01-01T00:00:00Z",
            })),
        )
        .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn redirect_to_target() {
    let fixture = Fixture::start().await;
    let code = fixture
        .create(json!({ "url": "https://example.com/landing" }))
        .await;

    let response = fixture.raw(Method::GET, &format!("/{code}"), None).await;

    assert_eq!(response.status(), StatusCode::TEMPORARY_REDIRECT);
    assert_eq!(
        response.headers()[header::LOCATION],
        "https://example.com/landing"
    );
}

#[tokio::test]
async fn expired_code_is_gone() {
    let fixture = Fixture::start().await;
    let code = fixture
        .create(json!({ "url": "https://example.com", "expiry_in_secs": 1 }))
        .await;

    fixture.clock.advance(SignedDuration::from_secs(2));

    let (status, _) = fixture.send(Method::GET, &format!("/{code}"), None).await;
    assert_eq!(status, StatusCode::GONE);

    let (status, _) = fixture
        .send(Method::GET, &format!("/v1/urls/{code}"), None)
        .await;
    assert_eq!(status, StatusCode::GONE);
}

#[tokio::test]
async fn unknown_code_is_not_found() {
    let fixture = Fixture::start().await;

    for uri in ["/abc123", "/v1/urls/abc123", "/favicon.ico"] {
        let (status, _) = fixture.send(Method::GET, uri, None).await;
        assert_eq!(status, StatusCode::NOT_FOUND, "{uri}");
    }
}

#[tokio::test]
async fn list_newest_first_without_expired() {
    let fixture = Fixture::start().await;
    let first = fixture.create(json!({ "url": "https://a.example" })).await;
    fixture.clock.advance(SignedDuration::from_secs(1));
    fixture
        .create(json!({ "url": "https://b.example", "expiry_in_secs": 1 }))
        .await;
    fixture.clock.advance(SignedDuration::from_secs(1));
    let last = fixture.create(json!({ "url": "https://c.example" })).await;
    fixture.clock.advance(SignedDuration::from_secs(1));

    let (status, body) = fixture.send(Method::GET, "/v1/urls", None).await;

    assert_eq!(status, StatusCode::OK);
    let codes: Vec<&str> = body["urls"]
        .as_array()
        .unwrap()
        .iter()
        .map(|url| url["short_code"].as_str().unwrap())
        .collect();
    assert_eq!(codes, vec![last.as_str(), first.as_str()]);
}

#[tokio::test]
async fn delete_then_not_found() {
    let fixture = Fixture::start().await;
    let code = fixture.create(json!({ "url": "https://example.com" })).await;

    let (status, _) = fixture
        .send(Method::DELETE, &format!("/v1/urls/{code}"), None)
        .await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (status, _) = fixture
        .send(Method::DELETE, &format!("/v1/urls/{code}"), None)
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = fixture.send(Method::GET, &format!("/{code}"), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

struct BrokenShortener;

#[async_trait]
impl Shortener for BrokenShortener {
    async fn create(&self, _params: ShortenParams) -> Result<ShortCode, StoreError> {
        Err(StorageError::Unavailable("database is down".to_string()).into())
    }

    async fn get(&self, _code: &ShortCode) -> Result<UrlRecord, StoreError> {
        Err(StorageError::Unavailable("database is down".to_string()).into())
    }

    async fn list(&self) -> Result<Vec<UrlRecord>, StoreError> {
        Err(StoreError::Exhausted { attempts: 1 })
    }

    async fn delete(&self, _code: &ShortCode) -> Result<(), StoreError> {
        Err(StorageError::Timeout("too slow".to_string()).into())
    }
}

#[tokio::test]
async fn storage_failures_are_internal_errors_without_details() {
    let router = App::router(AppState::new(Arc::new(BrokenShortener), BASE_URL));

    let response = router
        .oneshot(
            Request::builder()
                .method(Method::POST)
                .uri("/v1/urls")
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(json!({ "url": "https://example.com" }).to_string()))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let body: Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(body, json!({ "error": "internal server error" }));
}
