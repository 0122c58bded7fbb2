//! Shared application state for the cmindx server

use std::sync::Arc;

use chrono::{DateTime, Utc};
use cmindx_core::{EventSink, MemoryEventSink};

/// Shared application state accessible by all handlers
#[derive(Clone)]
pub struct AppState {
    /// Where submitted events are recorded
    pub sink: Arc<dyn EventSink>,
    /// When the server started
    pub started_at: DateTime<Utc>,
}

impl AppState {
    /// Create a new AppState backed by an in-memory sink
    pub fn new() -> Self {
        Self::with_sink(Arc::new(MemoryEventSink::new()))
    }

    /// Create AppState over a specific sink
    pub fn with_sink(sink: Arc<dyn EventSink>) -> Self {
        Self {
            sink,
            started_at: Utc::now(),
        }
    }

    /// Returns how long the server has been running
    pub fn uptime_seconds(&self) -> i64 {
        (Utc::now() - self.started_at).num_seconds()
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}
