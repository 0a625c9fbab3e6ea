//! HTTP error handling and response types.
//!
//! Every failure path answers with a JSON [`ApiError`] body; no request is
//! left without a response.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};

use crate::error::{ApodError, ErrorKind};

/// API error response body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiError {
    /// Error category for programmatic handling
    pub kind: ErrorKind,
    /// Human-readable error message
    pub message: String,
    /// Optional additional details
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl ApiError {
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            details: None,
        }
    }

    pub fn with_details(mut self, details: impl Into<String>) -> Self {
        self.details = Some(details.into());
        self
    }
}

/// Application error type for HTTP handlers.
#[derive(Debug)]
pub enum AppError {
    /// Invalid request body or parameters
    BadRequest(String),
    /// Origin not on the allow-list
    Forbidden(String),
    /// Upstream or range error
    Apod(ApodError),
    /// Internal server error
    Internal(String),
}

impl AppError {
    fn status_and_body(self) -> (StatusCode, ApiError) {
        match self {
            AppError::BadRequest(msg) => (
                StatusCode::BAD_REQUEST,
                ApiError::new(ErrorKind::BadRequest, msg),
            ),
            AppError::Forbidden(msg) => (
                StatusCode::FORBIDDEN,
                ApiError::new(ErrorKind::OriginNotAllowed, msg),
            ),
            AppError::Internal(msg) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                ApiError::new(ErrorKind::Internal, msg),
            ),
            AppError::Apod(err) => {
                let kind = err.kind();
                match err {
                    ApodError::UpstreamStatus { status, body } => (
                        StatusCode::BAD_GATEWAY,
                        ApiError::new(kind, format!("upstream returned status {}", status))
                            .with_details(body),
                    ),
                    ApodError::Transport { .. } | ApodError::Malformed { .. } => {
                        (StatusCode::BAD_GATEWAY, ApiError::new(kind, err.to_string()))
                    }
                    ApodError::InvalidRange { .. } => {
                        (StatusCode::BAD_REQUEST, ApiError::new(kind, err.to_string()))
                    }
                    ApodError::Configuration { .. } | ApodError::Cancelled => (
                        StatusCode::INTERNAL_SERVER_ERROR,
                        ApiError::new(kind, err.to_string()),
                    ),
                }
            }
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error) = self.status_and_body();
        (status, Json(error)).into_response()
    }
}

impl From<ApodError> for AppError {
    fn from(err: ApodError) -> Self {
        AppError::Apod(err)
    }
}

impl From<anyhow::Error> for AppError {
    fn from(err: anyhow::Error) -> Self {
        AppError::Internal(err.to_string())
    }
}
