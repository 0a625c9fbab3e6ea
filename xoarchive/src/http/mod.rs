//! HTTP proxy server.
//!
//! Keeps the NASA API key on the server: browsers post a date range to
//! `/apod` and receive the upstream JSON unchanged.
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────┐
//! │  HTTP Layer (axum handlers)                              │
//! │  - Origin allow-list, CORS, request ids, tracing         │
//! │  - JSON / form body parsing and date validation          │
//! └───────────────────┬──────────────────────────────────────┘
//!                     │
//! ┌───────────────────▼──────────────────────────────────────┐
//! │  Upstream (ApodUpstream)                                 │
//! │  - NasaApodClient in production                          │
//! └──────────────────────────────────────────────────────────┘
//! ```

pub mod dto;
pub mod error;
pub mod handlers;
pub mod origin;
pub mod router;
pub mod state;

pub use router::create_router;
pub use state::AppState;
