//! In-memory EventSink implementation
//!
//! MemoryEventSink stores events in a Vec. Nothing survives a restart.

use async_trait::async_trait;
use tokio::sync::RwLock;

use super::{EventList, EventSink, Result};
use crate::events::Event;

/// In-memory implementation of EventSink
#[derive(Default)]
pub struct MemoryEventSink {
    events: RwLock<Vec<Event>>,
}

impl MemoryEventSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a sink pre-populated with events (for testing)
    pub fn with_events(events: Vec<Event>) -> Self {
        Self {
            events: RwLock::new(events),
        }
    }

    /// Number of stored events
    pub async fn len(&self) -> usize {
        self.events.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.events.read().await.is_empty()
    }
}

#[async_trait]
impl EventSink for MemoryEventSink {
    fn backend(&self) -> &'static str {
        "memory"
    }

    async fn record(&self, event: Event) -> Result<()> {
        self.events.write().await.push(event);
        Ok(())
    }

    async fn list_all(&self) -> Result<EventList> {
        Ok(self.events.read().await.clone().into())
    }
}
