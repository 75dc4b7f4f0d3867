use crate::error::Result;
use crate::model::{CreateUrlRequest, CreateUrlResponse, ListUrlsResponse, UrlResponse};
use crate::state::AppState;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::Redirect;
use axum::Json;
use burrow_core::{ShortCode, StoreError};
use tracing::info;

/// Codes that fail validation cannot exist in the store.
fn parse_code(raw: String) -> Result<ShortCode> {
    ShortCode::new(raw.as_str()).map_err(|_| StoreError::NotFound(raw).into())
}

pub async fn create_url_handler(
    State(state): State<AppState>,
    Json(request): Json<CreateUrlRequest>,
) -> Result<(StatusCode, Json<CreateUrlResponse>)> {
    let params = request.into_params()?;
    let short_code = state.shortener().create(params).await?;
    info!(code = %short_code, "short url created");

    let response = CreateUrlResponse {
        short_url: short_code.to_url(state.base_url()),
        short_code,
    };
    Ok((StatusCode::CREATED, Json(response)))
}

pub async fn list_urls_handler(State(state): State<AppState>) -> Result<Json<ListUrlsResponse>> {
    let records = state.shortener().list().await?;

    let urls = records
        .into_iter()
        .map(|record| UrlResponse::from_record(record, state.base_url()))
        .collect();
    Ok(Json(ListUrlsResponse { urls }))
}

pub async fn get_url_handler(
    Path(short_code): Path<String>,
    State(state): State<AppState>,
) -> Result<Json<UrlResponse>> {
    let code = parse_code(short_code)?;
    let record = state.shortener().get(&code).await?;
    Ok(Json(UrlResponse::from_record(record, state.base_url())))
}

pub async fn delete_url_handler(
    Path(short_code): Path<String>,
    State(state): State<AppState>,
) -> Result<StatusCode> {
    let code = parse_code(short_code)?;
    state.shortener().delete(&code).await?;
    info!(code = %code, "short url deleted");
    Ok(StatusCode::NO_CONTENT)
}

pub async fn redirect_handler(
    Path(short_code): Path<String>,
    State(state): State<AppState>,
) -> Result<Redirect> {
    let code = parse_code(short_code)?;
    let record = state.shortener().get(&code).await?;
    Ok(Redirect::temporary(&record.target_url))
}
