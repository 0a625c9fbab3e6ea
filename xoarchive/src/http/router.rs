//! Router configuration for the HTTP API.
//!
//! This module sets up all routes, middleware (origin policy, CORS, request
//! ids, compression, tracing), and creates the axum router ready for serving.

use axum::{
    extract::DefaultBodyLimit,
    middleware,
    routing::{get, post},
    Router,
};
use tower_http::{
    compression::CompressionLayer,
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    trace::TraceLayer,
};

use super::handlers;
use super::origin::require_allowed_origin;
use super::state::AppState;

/// Range requests are tiny; anything larger is rejected.
const MAX_BODY_BYTES: usize = 16 * 1024;

/// Create the main application router with all routes and middleware.
pub fn create_router(state: AppState) -> Router {
    let cors = state.origins.cors_layer();

    Router::new()
        .route("/", get(handlers::root))
        .route("/health", get(handlers::health_check))
        .route("/apod", post(handlers::proxy_apod))
        .layer(DefaultBodyLimit::max(MAX_BODY_BYTES))
        .layer(middleware::from_fn_with_state(
            state.clone(),
            require_allowed_origin,
        ))
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .layer(PropagateRequestIdLayer::x_request_id())
        .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ApodResult;
    use crate::http::origin::AllowedOrigins;
    use crate::models::DateRange;
    use crate::upstream::ApodUpstream;
    use std::sync::Arc;

    struct EmptyUpstream;

    #[async_trait::async_trait]
    impl ApodUpstream for EmptyUpstream {
        async fn fetch_raw(&self, _range: DateRange) -> ApodResult<String> {
            Ok("[]".to_string())
        }
    }

    #[test]
    fn test_router_creation() {
        let origins = AllowedOrigins::new(&["http://localhost:5173"]).unwrap();
        let state = AppState::new(Arc::new(EmptyUpstream), origins);
        let _router = create_router(state);
    }
}
