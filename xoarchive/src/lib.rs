//! # xoarchive
//!
//! Astronomy Picture of the Day gallery: proxy server and client core.
//!
//! The crate has two halves that share the archive model:
//!
//! - A small HTTP proxy that forwards date-ranged requests to the NASA APOD
//!   API so the API key never reaches the browser.
//! - A headless client core with the data-fetch and navigation logic behind
//!   the gallery front end: the archive client, the gallery and detail view
//!   models, and the half-year date filter.
//!
//! ## Architecture
//!
//! - [`models`]: Archive entries, date ranges, half-year periods, clocks
//! - [`upstream`]: NASA APOD and proxy clients
//! - [`client`]: Archive client, gallery view, detail viewer, date filter
//! - [`config`]: Server and client configuration
//! - [`error`]: Error types shared across the crate
//! - [`http`]: Axum-based proxy server (feature `http-server`)

pub mod client;
pub mod config;
pub mod error;
pub mod models;
pub mod upstream;

#[cfg(feature = "http-server")]
pub mod http;

pub use error::{ApodError, ApodResult, ErrorKind};
pub use models::{ArchiveEntry, DateRange, HalfYear};
