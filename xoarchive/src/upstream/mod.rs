//! Access to the external APOD API, either directly or through the proxy.
//!
//! Two seams are defined here:
//!
//! - [`ApodUpstream`] returns the raw JSON text of an upstream call. The proxy
//!   endpoint uses it so that responses pass through byte for byte.
//! - [`ArchiveSource`] returns a parsed, normalized batch of entries. The
//!   archive client uses it regardless of where the data comes from.

use async_trait::async_trait;
use serde_json::Value;

use crate::error::{ApodError, ApodResult};
use crate::models::{normalize_batch, ArchiveEntry, DateRange};

pub mod nasa;
pub mod proxy;

pub use nasa::NasaApodClient;
pub use proxy::ProxyClient;

/// Raw upstream access.
#[async_trait]
pub trait ApodUpstream: Send + Sync {
    /// Fetch the body the upstream returns for `range`.
    ///
    /// The text is guaranteed to be well-formed JSON but is otherwise untouched.
    async fn fetch_raw(&self, range: DateRange) -> ApodResult<String>;
}

/// Parsed archive access.
#[async_trait]
pub trait ArchiveSource: Send + Sync {
    /// Fetch the entries published within `range`, oldest first.
    async fn fetch_range(&self, range: DateRange) -> ApodResult<Vec<ArchiveEntry>>;
}

/// Parse an upstream body into a normalized batch.
///
/// A date-ranged APOD call answers with an array; anything else is rejected.
/// On a bad element the error names the JSON path of the offending field.
pub fn parse_batch(value: Value) -> ApodResult<Vec<ArchiveEntry>> {
    if !value.is_array() {
        return Err(ApodError::malformed(format!(
            "expected an array of entries, got {}",
            json_type_name(&value)
        )));
    }

    let entries: Vec<ArchiveEntry> = serde_path_to_error::deserialize(value)
        .map_err(|e| ApodError::malformed(format!("{} at {}", e.inner(), e.path())))?;

    Ok(normalize_batch(entries))
}

/// Check that `body` is well-formed JSON without building a value.
pub fn ensure_json(body: &str) -> ApodResult<()> {
    serde_json::from_str::<serde::de::IgnoredAny>(body)
        .map(|_| ())
        .map_err(|e| ApodError::malformed(format!("body is not JSON: {}", e)))
}

/// Parse upstream JSON text into a normalized batch.
pub fn parse_batch_str(body: &str) -> ApodResult<Vec<ArchiveEntry>> {
    let value: Value = serde_json::from_str(body)
        .map_err(|e| ApodError::malformed(format!("body is not JSON: {}", e)))?;
    parse_batch(value)
}

fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
