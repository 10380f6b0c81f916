//! Pure JSearch REST API client.
//!
//! A minimal client for the JSearch job-search API served through RapidAPI.
//! Supports single searches; pagination beyond the first page is exposed via
//! [`SearchQuery`] but the caller decides how many pages to ask for.
//!
//! # Example
//!
//! ```rust,ignore
//! use jsearch_client::{JSearchClient, SearchQuery};
//!
//! let client = JSearchClient::new("your-rapidapi-key")?;
//!
//! let response = client.search(&SearchQuery::new("AI Engineer")).await?;
//! for job in &response.data {
//!     println!("{}", job.get("job_title").and_then(|t| t.as_str()).unwrap_or("(untitled)"));
//! }
//! ```

pub mod error;
pub mod types;

pub use error::{JSearchError, Result};
pub use types::{SearchQuery, SearchResponse, STATUS_OK};

use std::time::Duration;

pub const DEFAULT_BASE_URL: &str = "https://jsearch.p.rapidapi.com";

/// Value sent in the `X-RapidAPI-Host` header.
pub const RAPIDAPI_HOST: &str = "jsearch.p.rapidapi.com";

/// Default per-request timeout.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

const API_KEY_HEADER: &str = "X-RapidAPI-Key";
const API_HOST_HEADER: &str = "X-RapidAPI-Host";

pub struct JSearchClient {
    client: reqwest::Client,
    api_key: String,
    base_url: String,
    host: String,
    timeout: Duration,
}

impl JSearchClient {
    /// Create a client with the default base URL and a 10 second timeout.
    pub fn new(api_key: impl Into<String>) -> Result<Self> {
        Self::with_timeout(api_key, DEFAULT_TIMEOUT)
    }

    /// Create a client with a custom request timeout.
    pub fn with_timeout(api_key: impl Into<String>, timeout: Duration) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(JSearchError::Build)?;

        Ok(Self {
            client,
            api_key: api_key.into(),
            base_url: DEFAULT_BASE_URL.to_string(),
            host: RAPIDAPI_HOST.to_string(),
            timeout,
        })
    }

    /// Point the client at a different deployment (proxies, local fakes).
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Run one search. The envelope is returned as-is; a non-`OK` status is
    /// not an error at this layer.
    pub async fn search(&self, query: &SearchQuery) -> Result<SearchResponse> {
        let url = format!("{}/search", self.base_url);
        tracing::debug!(query = %query.query, page = query.page, "Sending JSearch request");

        let resp = self
            .client
            .get(&url)
            .header(API_KEY_HEADER, &self.api_key)
            .header(API_HOST_HEADER, &self.host)
            .query(query)
            .send()
            .await?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            if let Some(envelope) = error_envelope(&body) {
                tracing::debug!(http_status = status.as_u16(), status = %envelope.status, "JSearch error envelope");
                return Ok(envelope);
            }
            return Err(JSearchError::Api {
                status: status.as_u16(),
                message: body,
            });
        }

        let body = resp.text().await?;
        let envelope: SearchResponse = serde_json::from_str(&body)?;
        tracing::debug!(
            query = %query.query,
            status = %envelope.status,
            count = envelope.data.len(),
            "JSearch response received"
        );

        Ok(envelope)
    }
}

/// Parse a non-2xx body that is still a JSearch envelope (`status` and/or
/// `error` set, status not `OK`) so the caller sees the API's own error.
fn error_envelope(body: &str) -> Option<SearchResponse> {
    let envelope: SearchResponse = serde_json::from_str(body).ok()?;
    let is_envelope = !envelope.status.is_empty() || envelope.error.is_some();
    (is_envelope && !envelope.is_ok()).then_some(envelope)
}
