//! Event ingestion sinks.
//!
//! [`EventSink`] is the append/list contract every backend implements:
//! - [`MemoryEventSink`] keeps events in process memory (lost on restart)
//! - [`TursoEventSink`] writes one libSQL row per event
//!
//! Both preserve arrival order and keep duplicates.

mod error;
mod memory;
mod turso;

pub use error::{Result, SinkError};
pub use memory::MemoryEventSink;
pub use turso::TursoEventSink;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::events::Event;

/// Full event history as returned by [`EventSink::list_all`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EventList {
    /// Number of events in `events`
    pub count: usize,
    /// Events in arrival order
    pub events: Vec<Event>,
}

impl From<Vec<Event>> for EventList {
    fn from(events: Vec<Event>) -> Self {
        Self {
            count: events.len(),
            events,
        }
    }
}

/// Append-only event store.
#[async_trait]
pub trait EventSink: Send + Sync {
    /// Short backend name for logs and health output.
    fn backend(&self) -> &'static str;

    /// Append an event. No deduplication is performed.
    async fn record(&self, event: Event) -> Result<()>;

    /// Return the entire history in arrival order.
    async fn list_all(&self) -> Result<EventList>;
}
