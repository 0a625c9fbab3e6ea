//! Error types shared by the upstream clients, the archive client and the proxy.
//!
//! Every error carries an [`ErrorKind`] so that the HTTP layer can report a
//! stable, machine-readable category next to the human-readable message.

use serde::{Deserialize, Serialize};

/// Result type for archive operations.
pub type ApodResult<T> = Result<T, ApodError>;

/// Machine-readable error category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    BadRequest,
    InvalidRange,
    UpstreamUnavailable,
    UpstreamStatus,
    MalformedResponse,
    OriginNotAllowed,
    Configuration,
    Cancelled,
    Internal,
}

impl ErrorKind {
    /// The snake_case name used on the wire.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::BadRequest => "bad_request",
            Self::InvalidRange => "invalid_range",
            Self::UpstreamUnavailable => "upstream_unavailable",
            Self::UpstreamStatus => "upstream_status",
            Self::MalformedResponse => "malformed_response",
            Self::OriginNotAllowed => "origin_not_allowed",
            Self::Configuration => "configuration",
            Self::Cancelled => "cancelled",
            Self::Internal => "internal",
        }
    }
}

impl std::fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error type for archive fetches and configuration.
#[derive(Debug, Clone, thiserror::Error)]
pub enum ApodError {
    /// The upstream could not be reached (DNS, connect, TLS, timeout).
    #[error("Transport error: {message}")]
    Transport { message: String },

    /// The upstream answered with a non-success status.
    #[error("Upstream returned status {status}: {body}")]
    UpstreamStatus { status: u16, body: String },

    /// The upstream body was not the expected shape.
    #[error("Malformed response: {message}")]
    Malformed { message: String },

    /// A date range that cannot be fetched.
    #[error("Invalid date range: {message}")]
    InvalidRange { message: String },

    /// Missing or invalid configuration.
    #[error("Configuration error: {message}")]
    Configuration { message: String },

    /// The request was superseded before it completed.
    #[error("Request cancelled")]
    Cancelled,
}

impl ApodError {
    pub fn transport(message: impl Into<String>) -> Self {
        Self::Transport {
            message: message.into(),
        }
    }

    pub fn upstream_status(status: u16, body: impl Into<String>) -> Self {
        Self::UpstreamStatus {
            status,
            body: body.into(),
        }
    }

    pub fn malformed(message: impl Into<String>) -> Self {
        Self::Malformed {
            message: message.into(),
        }
    }

    pub fn invalid_range(message: impl Into<String>) -> Self {
        Self::InvalidRange {
            message: message.into(),
        }
    }

    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }

    /// The category of this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Transport { .. } => ErrorKind::UpstreamUnavailable,
            Self::UpstreamStatus { .. } => ErrorKind::UpstreamStatus,
            Self::Malformed { .. } => ErrorKind::MalformedResponse,
            Self::InvalidRange { .. } => ErrorKind::InvalidRange,
            Self::Configuration { .. } => ErrorKind::Configuration,
            Self::Cancelled => ErrorKind::Cancelled,
        }
    }
}

impl From<reqwest::Error> for ApodError {
    fn from(err: reqwest::Error) -> Self {
        // The request URL carries the upstream API key as a query parameter.
        let err = err.without_url();
        if err.is_decode() {
            ApodError::malformed(err.to_string())
        } else {
            ApodError::transport(err.to_string())
        }
    }
}
