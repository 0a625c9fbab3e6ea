//! HTTP handlers for the proxy API.

use axum::{
    extract::State,
    http::header,
    response::{IntoResponse, Response},
    Json,
};
use tracing::{error, info};

use super::dto::{HealthResponse, RangeBody};
use super::error::AppError;
use super::state::AppState;

/// Text served at the root path.
pub const GREETING: &str = "Welcome to xoarchive backend.";

/// GET /
pub async fn root() -> &'static str {
    GREETING
}

/// GET /health
pub async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        allowed_origins: state.origins.len(),
    })
}

/// POST /apod
///
/// Forward a `{startDate, endDate}` range to the upstream API and return its
/// JSON body unchanged. Failures answer with a structured error body.
pub async fn proxy_apod(
    State(state): State<AppState>,
    RangeBody(request): RangeBody,
) -> Result<Response, AppError> {
    let range = request.to_range()?;

    match state.upstream.fetch_raw(range).await {
        Ok(body) => {
            info!(%range, bytes = body.len(), "Proxied APOD range");
            Ok(([(header::CONTENT_TYPE, "application/json")], body).into_response())
        }
        Err(err) => {
            error!(%range, kind = %err.kind(), error = %err, "Error fetching APOD data");
            Err(err.into())
        }
    }
}
