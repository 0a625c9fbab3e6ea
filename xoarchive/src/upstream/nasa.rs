//! Client for the NASA APOD API.

use std::time::Duration;

use async_trait::async_trait;
use tracing::debug;

use super::{ensure_json, parse_batch_str, ApodUpstream, ArchiveSource};
use crate::error::{ApodError, ApodResult};
use crate::models::{ArchiveEntry, DateRange};

/// Public endpoint of the APOD API.
pub const DEFAULT_APOD_URL: &str = "https://api.nasa.gov/planetary/apod";

/// Default timeout for one upstream call.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(20);

/// Direct client for `GET /planetary/apod`, holding the API key.
#[derive(Clone)]
pub struct NasaApodClient {
    http: reqwest::Client,
    base_url: String,
    api_key: String,
}

impl std::fmt::Debug for NasaApodClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NasaApodClient")
            .field("base_url", &self.base_url)
            .field("api_key", &"<redacted>")
            .finish()
    }
}

impl NasaApodClient {
    /// Create a client for `base_url` using `api_key`.
    pub fn new(
        base_url: impl Into<String>,
        api_key: impl Into<String>,
        timeout: Duration,
    ) -> ApodResult<Self> {
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| ApodError::configuration(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            http,
            base_url: base_url.into(),
            api_key: api_key.into(),
        })
    }

    /// Create a client for the public APOD endpoint.
    pub fn with_api_key(api_key: impl Into<String>) -> ApodResult<Self> {
        Self::new(DEFAULT_APOD_URL, api_key, DEFAULT_TIMEOUT)
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}

#[async_trait]
impl ApodUpstream for NasaApodClient {
    async fn fetch_raw(&self, range: DateRange) -> ApodResult<String> {
        debug!(%range, "Requesting APOD range");

        let start = range.start.to_string();
        let end = range.end.to_string();
        let response = self
            .http
            .get(&self.base_url)
            .query(&[
                ("api_key", self.api_key.as_str()),
                ("start_date", start.as_str()),
                ("end_date", end.as_str()),
            ])
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            return Err(ApodError::upstream_status(status.as_u16(), body.trim()));
        }

        ensure_json(&body)?;
        Ok(body)
    }
}

#[async_trait]
impl ArchiveSource for NasaApodClient {
    async fn fetch_range(&self, range: DateRange) -> ApodResult<Vec<ArchiveEntry>> {
        let body = self.fetch_raw(range).await?;
        parse_batch_str(&body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_debug_redacts_key() {
        let client = NasaApodClient::with_api_key("secret-key").unwrap();
        let dbg = format!("{:?}", client);
        assert!(!dbg.contains("secret-key"));
        assert!(dbg.contains(DEFAULT_APOD_URL));
    }

    #[tokio::test]
    async fn test_unreachable_upstream_is_transport_error() {
        // Port 9 (discard) on loopback is not expected to accept HTTP.
        let client = NasaApodClient::new(
            "http://127.0.0.1:9/planetary/apod",
            "sentinel-api-key",
            Duration::from_secs(2),
        )
        .unwrap();
        assert_eq!(client.base_url(), "http://127.0.0.1:9/planetary/apod");
        let range = DateRange::new(
            "2024-06-01".parse().unwrap(),
            "2024-06-02".parse().unwrap(),
        )
        .unwrap();
        let err = client.fetch_raw(range).await.unwrap_err();
        assert!(matches!(err, ApodError::Transport { .. }), "{:?}", err);
        assert!(!err.to_string().contains("sentinel-api-key"), "{}", err);
        assert!(!format!("{:?}", err).contains("sentinel-api-key"));
    }
}
