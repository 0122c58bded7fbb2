//! Delivery of captured events to a sink.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use cmindx_core::{Event, EventSink, SinkError};
use thiserror::Error;

/// Default request timeout for [`HttpTransport`].
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Errors from delivering an event.
#[derive(Debug, Error)]
pub enum TransportError {
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("server rejected event with status {0}")]
    Status(u16),

    #[error("sink error: {0}")]
    Sink(#[from] SinkError),
}

/// Something that can deliver a single event.
#[async_trait]
pub trait Transport: Send + Sync {
    async fn send(&self, event: &Event) -> Result<(), TransportError>;
}

/// Posts events as JSON to `{base_url}/events`.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: reqwest::Client,
    endpoint: String,
}

impl HttpTransport {
    pub fn new(base_url: &str) -> Result<Self, TransportError> {
        Self::with_timeout(base_url, DEFAULT_TIMEOUT)
    }

    pub fn with_timeout(base_url: &str, timeout: Duration) -> Result<Self, TransportError> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            endpoint: events_endpoint(base_url),
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn send(&self, event: &Event) -> Result<(), TransportError> {
        let response = self.client.post(&self.endpoint).json(event).send().await?;
        if !response.status().is_success() {
            return Err(TransportError::Status(response.status().as_u16()));
        }
        Ok(())
    }
}

/// Writes events straight into an in-process sink.
pub struct SinkTransport {
    sink: Arc<dyn EventSink>,
}

impl SinkTransport {
    pub fn new(sink: Arc<dyn EventSink>) -> Self {
        Self { sink }
    }
}

#[async_trait]
impl Transport for SinkTransport {
    async fn send(&self, event: &Event) -> Result<(), TransportError> {
        self.sink.record(event.clone()).await?;
        Ok(())
    }
}

fn events_endpoint(base_url: &str) -> String {
    format!("{}/events", base_url.trim_end_matches('/'))
}
