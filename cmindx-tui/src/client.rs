//! HTTP client for reading the event log from a cmindx server.

use std::time::Duration;

use cmindx_core::{EventList, EventSummary};
use thiserror::Error;

/// Default request timeout for dashboard reads.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Errors from a single dashboard poll.
#[derive(Error, Debug)]
pub enum PollError {
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("server returned status {0}")]
    Status(u16),
}

/// Read-only client for the `/events` and `/api/stats` endpoints.
#[derive(Debug, Clone)]
pub struct DashboardClient {
    client: reqwest::Client,
    base_url: String,
}

impl DashboardClient {
    /// Create a client for the server at `base_url` with the default timeout.
    pub fn new(base_url: &str) -> Result<Self, PollError> {
        Self::with_timeout(base_url, DEFAULT_TIMEOUT)
    }

    /// Create a client with a custom request timeout.
    pub fn with_timeout(base_url: &str, timeout: Duration) -> Result<Self, PollError> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Server base URL without a trailing slash.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Fetch the full event log.
    pub async fn fetch_events(&self) -> Result<EventList, PollError> {
        self.get_json("/events").await
    }

    /// Fetch the server-side summary.
    pub async fn fetch_summary(&self) -> Result<EventSummary, PollError> {
        self.get_json("/api/stats").await
    }

    async fn get_json<T: serde::de::DeserializeOwned>(&self, path: &str) -> Result<T, PollError> {
        let response = self
            .client
            .get(format!("{}{}", self.base_url, path))
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(PollError::Status(status.as_u16()));
        }

        Ok(response.json().await?)
    }
}
