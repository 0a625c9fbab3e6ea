//! Server and client configuration.
//!
//! The server reads its settings from environment variables or from a TOML
//! file. The client picks its archive source from the environment: either the
//! proxy backend or the upstream API directly.

use std::env;
use std::fs;
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::{ApodError, ApodResult};
use crate::upstream::nasa::DEFAULT_APOD_URL;
use crate::upstream::{ArchiveSource, NasaApodClient, ProxyClient};

/// Origins allowed when `ALLOWED_ORIGINS` is not set.
pub const DEFAULT_ALLOWED_ORIGINS: [&str; 2] =
    ["http://localhost:5173", "https://xoarchives.vercel.app"];

/// Proxy server configuration.
#[derive(Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ServerConfig {
    /// NASA API key; never sent to clients
    #[serde(default)]
    pub api_key: String,
    #[serde(default = "default_allowed_origins")]
    pub allowed_origins: Vec<String>,
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
    #[serde(default = "default_apod_url")]
    pub apod_url: String,
    #[serde(default = "default_upstream_timeout_secs")]
    pub upstream_timeout_secs: u64,
}

impl std::fmt::Debug for ServerConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ServerConfig")
            .field("api_key", &"<redacted>")
            .field("allowed_origins", &self.allowed_origins)
            .field("host", &self.host)
            .field("port", &self.port)
            .field("apod_url", &self.apod_url)
            .field("upstream_timeout_secs", &self.upstream_timeout_secs)
            .finish()
    }
}

fn default_allowed_origins() -> Vec<String> {
    DEFAULT_ALLOWED_ORIGINS.iter().map(|s| s.to_string()).collect()
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    5000
}

fn default_apod_url() -> String {
    DEFAULT_APOD_URL.to_string()
}

fn default_upstream_timeout_secs() -> u64 {
    20
}

impl ServerConfig {
    /// Configuration with defaults for everything but the API key.
    pub fn with_api_key(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            allowed_origins: default_allowed_origins(),
            host: default_host(),
            port: default_port(),
            apod_url: default_apod_url(),
            upstream_timeout_secs: default_upstream_timeout_secs(),
        }
    }

    /// Load the configuration from environment variables.
    ///
    /// # Environment Variables
    /// - `NASA_API_KEY` (required): upstream API key
    /// - `ALLOWED_ORIGINS` (optional): comma-separated CORS allow-list
    /// - `HOST` (optional, default: 0.0.0.0)
    /// - `PORT` (optional, default: 5000)
    /// - `APOD_API_URL` (optional): upstream endpoint
    /// - `UPSTREAM_TIMEOUT_SECS` (optional, default: 20)
    pub fn from_env() -> ApodResult<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load the configuration through an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> ApodResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let api_key = lookup("NASA_API_KEY")
            .filter(|k| !k.trim().is_empty())
            .ok_or_else(|| ApodError::configuration("NASA_API_KEY environment variable not set"))?;

        let mut config = Self::with_api_key(api_key);

        if let Some(origins) = lookup("ALLOWED_ORIGINS") {
            config.allowed_origins = parse_origin_list(&origins);
        }
        if let Some(host) = lookup("HOST") {
            config.host = host;
        }
        if let Some(port) = lookup("PORT") {
            config.port = port
                .parse()
                .map_err(|_| ApodError::configuration("PORT must be a valid port number"))?;
        }
        if let Some(url) = lookup("APOD_API_URL") {
            config.apod_url = url;
        }
        if let Some(secs) = lookup("UPSTREAM_TIMEOUT_SECS") {
            config.upstream_timeout_secs = secs.parse().map_err(|_| {
                ApodError::configuration("UPSTREAM_TIMEOUT_SECS must be a whole number of seconds")
            })?;
        }

        Ok(config)
    }

    /// Load the configuration from a TOML file.
    ///
    /// An empty or missing `api_key` falls back to `NASA_API_KEY`.
    pub fn from_file<P: AsRef<Path>>(path: P) -> ApodResult<Self> {
        let content = fs::read_to_string(path.as_ref()).map_err(|e| {
            ApodError::configuration(format!("Failed to read config file: {}", e))
        })?;

        let mut config: ServerConfig = toml::from_str(&content).map_err(|e| {
            ApodError::configuration(format!("Failed to parse config file: {}", e))
        })?;

        if config.api_key.trim().is_empty() {
            config.api_key = env::var("NASA_API_KEY").map_err(|_| {
                ApodError::configuration("api_key missing from config file and NASA_API_KEY not set")
            })?;
        }

        Ok(config)
    }

    /// Load from the file named by `XOARCHIVE_CONFIG`, else from the environment.
    pub fn load() -> ApodResult<Self> {
        match env::var("XOARCHIVE_CONFIG") {
            Ok(path) if !path.is_empty() => Self::from_file(path),
            _ => Self::from_env(),
        }
    }

    pub fn upstream_timeout(&self) -> Duration {
        Duration::from_secs(self.upstream_timeout_secs)
    }

    /// Upstream client built from this configuration.
    pub fn upstream_client(&self) -> ApodResult<NasaApodClient> {
        NasaApodClient::new(&self.apod_url, &self.api_key, self.upstream_timeout())
    }
}

fn parse_origin_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(|o| o.trim().trim_end_matches('/'))
        .filter(|o| !o.is_empty())
        .map(str::to_string)
        .collect()
}

/// Where the client fetches the archive from.
#[derive(Clone, PartialEq, Eq)]
pub enum ClientSourceConfig {
    /// Call the upstream API directly with a key baked into the client build.
    Direct { api_key: String, apod_url: String },
    /// Go through the proxy backend at `backend_url`.
    Proxy { backend_url: String },
}

impl std::fmt::Debug for ClientSourceConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Direct { apod_url, .. } => f
                .debug_struct("Direct")
                .field("api_key", &"<redacted>")
                .field("apod_url", apod_url)
                .finish(),
            Self::Proxy { backend_url } => f
                .debug_struct("Proxy")
                .field("backend_url", backend_url)
                .finish(),
        }
    }
}

/// Client configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    pub source: ClientSourceConfig,
    pub timeout: Duration,
}

impl ClientConfig {
    /// Load the client configuration from environment variables.
    ///
    /// `APOD_BACKEND_URL` selects the proxy; otherwise `APOD_API_KEY` selects
    /// the upstream API directly (`APOD_API_URL` overrides its endpoint).
    pub fn from_env() -> ApodResult<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> ApodResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_empty = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let source = if let Some(backend_url) = non_empty("APOD_BACKEND_URL") {
            ClientSourceConfig::Proxy { backend_url }
        } else if let Some(api_key) = non_empty("APOD_API_KEY") {
            ClientSourceConfig::Direct {
                api_key,
                apod_url: non_empty("APOD_API_URL").unwrap_or_else(default_apod_url),
            }
        } else {
            return Err(ApodError::configuration(
                "set APOD_BACKEND_URL or APOD_API_KEY to choose an archive source",
            ));
        };

        Ok(Self {
            source,
            timeout: crate::upstream::nasa::DEFAULT_TIMEOUT,
        })
    }

    /// Build the configured archive source.
    pub fn into_source(self) -> ApodResult<Arc<dyn ArchiveSource>> {
        Ok(match self.source {
            ClientSourceConfig::Direct { api_key, apod_url } => {
                Arc::new(NasaApodClient::new(apod_url, api_key, self.timeout)?)
            }
            ClientSourceConfig::Proxy { backend_url } => {
                Arc::new(ProxyClient::new(&backend_url, self.timeout)?)
            }
        })
    }
}
