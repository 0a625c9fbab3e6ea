//! Cross-origin policy: an explicit allow-list of browser origins.
//!
//! Requests without an `Origin` header (server-to-server, curl) are always
//! let through. Requests from an origin outside the list are rejected before
//! they reach a handler.

use std::sync::Arc;

use axum::{
    extract::{Request, State},
    http::{header, HeaderValue, Method},
    middleware::Next,
    response::Response,
};
use tower_http::cors::{AllowOrigin, CorsLayer};
use tracing::warn;

use super::error::AppError;
use super::state::AppState;
use crate::error::{ApodError, ApodResult};

/// Parsed CORS allow-list.
#[derive(Debug, Clone)]
pub struct AllowedOrigins {
    origins: Arc<[HeaderValue]>,
}

impl AllowedOrigins {
    pub fn new<S: AsRef<str>>(origins: &[S]) -> ApodResult<Self> {
        let origins = origins
            .iter()
            .map(|o| {
                HeaderValue::from_str(o.as_ref()).map_err(|_| {
                    ApodError::configuration(format!("invalid origin '{}'", o.as_ref()))
                })
            })
            .collect::<ApodResult<Vec<_>>>()?;

        Ok(Self {
            origins: origins.into(),
        })
    }

    pub fn contains(&self, origin: &HeaderValue) -> bool {
        self.origins.iter().any(|o| o == origin)
    }

    pub fn len(&self) -> usize {
        self.origins.len()
    }

    pub fn is_empty(&self) -> bool {
        self.origins.is_empty()
    }

    /// CORS layer answering preflights and decorating responses for listed origins.
    pub fn cors_layer(&self) -> CorsLayer {
        CorsLayer::new()
            .allow_origin(AllowOrigin::list(self.origins.iter().cloned()))
            .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
            .allow_headers([header::CONTENT_TYPE])
            .allow_credentials(true)
    }
}

/// Reject requests whose `Origin` is not on the allow-list.
pub async fn require_allowed_origin(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Result<Response, AppError> {
    if let Some(origin) = request.headers().get(header::ORIGIN) {
        if !state.origins.contains(origin) {
            let origin = origin.to_str().unwrap_or("<non-ascii>").to_string();
            warn!(%origin, "Rejected request from disallowed origin");
            return Err(AppError::Forbidden(format!(
                "origin '{}' is not allowed",
                origin
            )));
        }
    }
    Ok(next.run(request).await)
}
