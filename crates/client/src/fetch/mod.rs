//! HTTP fetch pipeline for the RFC Editor site.
//!
//! One GET per call, no retries:
//! - Follows at most 5 redirects
//! - Non-2xx responses are transport errors
//! - Bodies over `max_bytes` are rejected (the index is ~15MB)

pub mod url;

use bytes::Bytes;
use reqwest::Url;
use reqwest::{Client, header};
use std::time::{Duration, Instant};

pub use self::url::{RfcEndpoints, UrlError, parse_http};

use rfcd_core::{AppConfig, Error};

/// Configuration for the fetch client.
#[derive(Debug, Clone)]
pub struct FetchConfig {
    /// User agent string (default: "rfcd/0.1")
    pub user_agent: String,

    /// Maximum response body size in bytes (default: 64MB)
    pub max_bytes: usize,

    /// Request timeout (default: 60s)
    pub timeout: Duration,

    /// Maximum number of redirects to follow (default: 5)
    pub max_redirects: usize,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            user_agent: "rfcd/0.1".to_string(),
            max_bytes: 64 * 1024 * 1024,
            timeout: Duration::from_millis(60_000),
            max_redirects: 5,
        }
    }
}

impl From<&AppConfig> for FetchConfig {
    fn from(config: &AppConfig) -> Self {
        Self {
            user_agent: config.user_agent.clone(),
            max_bytes: config.max_bytes,
            timeout: config.timeout(),
            ..Default::default()
        }
    }
}

/// Response from a fetch operation.
#[derive(Debug, Clone)]
pub struct FetchResponse {
    /// The final URL after redirects
    pub final_url: Url,
    /// Content-Type header
    pub content_type: Option<String>,
    /// Response body bytes
    pub bytes: Bytes,
    /// Time taken to fetch in milliseconds
    pub fetch_ms: u64,
}

/// HTTP fetch client with size and status checks.
#[derive(Debug, Clone)]
pub struct FetchClient {
    http: Client,
    config: FetchConfig,
}

impl FetchClient {
    /// Create a new fetch client with the given configuration.
    pub fn new(config: FetchConfig) -> Result<Self, Error> {
        let http = Client::builder()
            .user_agent(&config.user_agent)
            .timeout(config.timeout)
            .redirect(reqwest::redirect::Policy::limited(config.max_redirects))
            .use_rustls_tls()
            .gzip(true)
            .brotli(true)
            .deflate(true)
            .build()
            .map_err(|e| Error::Transport(format!("failed to build HTTP client: {}", e)))?;

        Ok(Self { http, config })
    }

    /// Fetch a URL, returning raw bytes and metadata.
    pub async fn fetch(&self, url: &Url) -> Result<FetchResponse, Error> {
        let start = Instant::now();

        let response = self
            .http
            .get(url.as_str())
            .send()
            .await
            .map_err(|e| Error::Transport(format!("GET {url}: {e}")))?;

        let status = response.status();

        if !status.is_success() {
            return Err(Error::Transport(format!("GET {url}: status {}", status.as_u16())));
        }

        if let Some(len) = response.content_length()
            && len as usize > self.config.max_bytes
        {
            return Err(Error::Transport(format!(
                "GET {url}: {} bytes exceeds {}",
                len, self.config.max_bytes
            )));
        }

        let final_url = response.url().clone();
        let content_type = response
            .headers()
            .get(header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(|s| s.to_string());

        let bytes = response
            .bytes()
            .await
            .map_err(|e| Error::Transport(format!("GET {url}: failed to read response: {e}")))?;

        if bytes.len() > self.config.max_bytes {
            return Err(Error::Transport(format!(
                "GET {url}: {} bytes exceeds {}",
                bytes.len(),
                self.config.max_bytes
            )));
        }

        let fetch_ms = start.elapsed().as_millis() as u64;

        tracing::debug!(
            "fetched {} -> {} in {}ms ({} bytes)",
            url,
            final_url,
            fetch_ms,
            bytes.len()
        );

        Ok(FetchResponse { final_url, content_type, bytes, fetch_ms })
    }
}
