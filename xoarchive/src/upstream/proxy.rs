//! Client for the `POST /apod` proxy endpoint.
//!
//! Used by deployments that keep the API key on the server. The browser-side
//! flow only knows the backend base URL.

use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::{parse_batch_str, ArchiveSource};
use crate::error::{ApodError, ApodResult, ErrorKind};
use crate::models::{ArchiveEntry, DateRange};

/// Request body understood by the proxy endpoint.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ProxyRangeBody {
    pub start_date: String,
    pub end_date: String,
}

impl From<DateRange> for ProxyRangeBody {
    fn from(range: DateRange) -> Self {
        Self {
            start_date: range.start.to_string(),
            end_date: range.end.to_string(),
        }
    }
}

/// Structured error body returned by the proxy on failure.
#[derive(Debug, Clone, Deserialize)]
struct ProxyErrorBody {
    kind: ErrorKind,
    message: String,
}

/// Archive source that goes through the proxy backend.
#[derive(Debug, Clone)]
pub struct ProxyClient {
    http: reqwest::Client,
    endpoint: String,
}

impl ProxyClient {
    /// Create a client for the backend at `base_url` (without the `/apod` suffix).
    pub fn new(base_url: &str, timeout: Duration) -> ApodResult<Self> {
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| ApodError::configuration(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            http,
            endpoint: format!("{}/apod", base_url.trim_end_matches('/')),
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait]
impl ArchiveSource for ProxyClient {
    async fn fetch_range(&self, range: DateRange) -> ApodResult<Vec<ArchiveEntry>> {
        debug!(%range, endpoint = %self.endpoint, "Requesting APOD range via proxy");

        let response = self
            .http
            .post(&self.endpoint)
            .json(&ProxyRangeBody::from(range))
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            return Err(match serde_json::from_str::<ProxyErrorBody>(&body) {
                Ok(err) if err.kind == ErrorKind::UpstreamUnavailable => {
                    ApodError::transport(err.message)
                }
                Ok(err) if err.kind == ErrorKind::MalformedResponse => {
                    ApodError::malformed(err.message)
                }
                Ok(err) => ApodError::upstream_status(status.as_u16(), err.message),
                Err(_) => ApodError::upstream_status(status.as_u16(), body.trim()),
            });
        }

        parse_batch_str(&body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_range_body_uses_camel_case() {
        let range = DateRange::new(
            "2024-06-01".parse().unwrap(),
            "2024-06-02".parse().unwrap(),
        )
        .unwrap();
        let json = serde_json::to_value(ProxyRangeBody::from(range)).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"startDate": "2024-06-01", "endDate": "2024-06-02"})
        );
    }

    #[test]
    fn test_endpoint_trims_trailing_slash() {
        let client = ProxyClient::new("http://localhost:5000/", Duration::from_secs(5)).unwrap();
        assert_eq!(client.endpoint(), "http://localhost:5000/apod");
    }
}
