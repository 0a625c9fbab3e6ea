//! Application state for the HTTP server.

use std::sync::Arc;

use super::origin::AllowedOrigins;
use crate::config::ServerConfig;
use crate::error::ApodResult;
use crate::upstream::ApodUpstream;

/// Shared application state passed to all handlers.
#[derive(Clone)]
pub struct AppState {
    /// Upstream APOD API
    pub upstream: Arc<dyn ApodUpstream>,
    /// Origins allowed to call the API from a browser
    pub origins: AllowedOrigins,
}

impl AppState {
    /// Create a new application state with the given upstream.
    pub fn new(upstream: Arc<dyn ApodUpstream>, origins: AllowedOrigins) -> Self {
        Self { upstream, origins }
    }

    /// Build the state used in production from the server configuration.
    pub fn from_config(config: &ServerConfig) -> ApodResult<Self> {
        let upstream = Arc::new(config.upstream_client()?);
        let origins = AllowedOrigins::new(&config.allowed_origins)?;
        Ok(Self::new(upstream, origins))
    }
}
