//! The capture hook: one visitor session on one variant.
//!
//! Activating a [`CaptureHook`] mints a session id and emits a single
//! `pageview`. Clicks and scrolls are turned into events and queued for a
//! background sender task. Delivery is fire-and-forget: failures are logged
//! at debug level and dropped, never retried.
//!
//! Detaching (or dropping) the hook closes the queue. Nothing can be emitted
//! afterwards; events queued before detach are still delivered.

use std::sync::Arc;

use cmindx_core::{Event, EventType, Payload, SCROLL_PERCENT_KEY, VariantAssignment, VariantId};
use serde_json::json;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::debug;
use uuid::Uuid;

use crate::transport::Transport;

/// Maximum characters of element text carried by a click event.
pub const MAX_CLICK_TEXT_CHARS: usize = 80;

/// Queue depth between the hook and its sender task.
pub const DEFAULT_QUEUE_CAPACITY: usize = 64;

/// Settings for a capture hook.
#[derive(Debug, Clone)]
pub struct CaptureConfig {
    /// Page path reported by the pageview event
    pub path: String,
    pub assignment: VariantAssignment,
    pub queue_capacity: usize,
}

impl Default for CaptureConfig {
    fn default() -> Self {
        Self {
            path: "/".to_string(),
            assignment: VariantAssignment::Random,
            queue_capacity: DEFAULT_QUEUE_CAPACITY,
        }
    }
}

/// A pointer click on some element.
#[derive(Debug, Clone, PartialEq)]
pub struct ClickInput {
    pub x: f64,
    pub y: f64,
    /// Element tag name, e.g. `BUTTON`
    pub tag: String,
    /// Visible element text, if any
    pub text: Option<String>,
}

/// Document scroll geometry at the time of a scroll event.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScrollMetrics {
    pub scroll_top: f64,
    pub scroll_height: f64,
    pub client_height: f64,
}

impl ScrollMetrics {
    /// Scroll depth as a whole percentage in `0..=100`.
    ///
    /// A document that is not scrollable reports 0.
    pub fn percent(&self) -> u8 {
        let scrollable = self.scroll_height - self.client_height;
        if scrollable <= 0.0 {
            return 0;
        }
        let percent = (self.scroll_top / scrollable * 100.0).round();
        percent.clamp(0.0, 100.0) as u8
    }
}

/// Fresh random session identifier. Collisions are not prevented.
pub fn new_session_id() -> String {
    Uuid::new_v4().to_string()
}

/// An attached capture hook.
pub struct CaptureHook {
    session_id: String,
    variant: VariantId,
    tx: mpsc::Sender<Event>,
    task: JoinHandle<()>,
}

impl std::fmt::Debug for CaptureHook {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CaptureHook")
            .field("session_id", &self.session_id)
            .field("variant", &self.variant)
            .finish_non_exhaustive()
    }
}

impl CaptureHook {
    /// Attach a hook and emit the initial pageview.
    ///
    /// Must be called from within a tokio runtime.
    pub fn activate(transport: Arc<dyn Transport>, config: CaptureConfig) -> Self {
        let (tx, rx) = mpsc::channel(config.queue_capacity.max(1));
        let task = tokio::spawn(Self::sender_task(rx, transport));

        let hook = Self {
            session_id: new_session_id(),
            variant: config.assignment.resolve(),
            tx,
            task,
        };

        let mut payload = Payload::new();
        payload.insert("path".into(), json!(config.path));
        hook.emit(EventType::Pageview, payload);

        debug!(session_id = %hook.session_id, variant = %hook.variant, "capture hook attached");
        hook
    }

    pub fn session_id(&self) -> &str {
        &self.session_id
    }

    pub fn variant(&self) -> VariantId {
        self.variant
    }

    /// Record a pointer click.
    pub fn click(&self, input: ClickInput) {
        let mut payload = Payload::new();
        payload.insert("x".into(), json!(input.x));
        payload.insert("y".into(), json!(input.y));
        payload.insert("tag".into(), json!(input.tag));
        if let Some(text) = input.text {
            let text: String = text.chars().take(MAX_CLICK_TEXT_CHARS).collect();
            payload.insert("text".into(), json!(text));
        }
        self.emit(EventType::Click, payload);
    }

    /// Record a scroll position.
    pub fn scroll(&self, metrics: ScrollMetrics) {
        let mut payload = Payload::new();
        payload.insert(SCROLL_PERCENT_KEY.into(), json!(metrics.percent()));
        self.emit(EventType::Scroll, payload);
    }

    fn emit(&self, event_type: EventType, payload: Payload) {
        let event = Event::new(
            self.session_id.clone(),
            event_type,
            payload,
            Some(self.variant),
        );
        if let Err(e) = self.tx.try_send(event) {
            debug!(session_id = %self.session_id, "dropping capture event: {}", e);
        }
    }

    /// Detach the hook and wait for already-queued events to be handed off.
    pub async fn detach(self) {
        let Self { tx, task, .. } = self;
        drop(tx);
        if let Err(e) = task.await {
            debug!("capture sender task ended abnormally: {}", e);
        }
    }

    /// Sends queued events one at a time until the queue closes.
    async fn sender_task(mut rx: mpsc::Receiver<Event>, transport: Arc<dyn Transport>) {
        while let Some(event) = rx.recv().await {
            if let Err(e) = transport.send(&event).await {
                debug!(
                    session_id = %event.session_id,
                    event_type = %event.event_type,
                    "capture event not delivered: {}",
                    e
                );
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transport::{SinkTransport, TransportError};
    use async_trait::async_trait;
    use cmindx_core::{EventSink, MemoryEventSink};
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn fixed(variant: VariantId) -> CaptureConfig {
        CaptureConfig {
            path: "/pricing".into(),
            assignment: VariantAssignment::Fixed(variant),
            ..Default::default()
        }
    }

    fn sink_transport() -> (Arc<MemoryEventSink>, Arc<dyn Transport>) {
        let sink = Arc::new(MemoryEventSink::new());
        let transport: Arc<dyn Transport> = Arc::new(SinkTransport::new(sink.clone()));
        (sink, transport)
    }

    struct FailingTransport {
        attempts: AtomicUsize,
    }

    #[async_trait]
    impl Transport for FailingTransport {
        async fn send(&self, _event: &Event) -> Result<(), TransportError> {
            self.attempts.fetch_add(1, Ordering::SeqCst);
            Err(TransportError::Status(503))
        }
    }

    #[test]
    fn scroll_percent_rounds() {
        let m = ScrollMetrics {
            scroll_top: 333.0,
            scroll_height: 1100.0,
            client_height: 100.0,
        };
        assert_eq!(m.percent(), 33);
    }

    #[test]
    fn scroll_percent_not_scrollable_is_zero() {
        let m = ScrollMetrics {
            scroll_top: 50.0,
            scroll_height: 800.0,
            client_height: 800.0,
        };
        assert_eq!(m.percent(), 0);
    }

    #[test]
    fn scroll_percent_is_clamped() {
        let overscroll = ScrollMetrics {
            scroll_top: 1200.0,
            scroll_height: 1000.0,
            client_height: 500.0,
        };
        assert_eq!(overscroll.percent(), 100);

        let bounce = ScrollMetrics {
            scroll_top: -40.0,
            ..overscroll
        };
        assert_eq!(bounce.percent(), 0);
    }

    #[test]
    fn session_ids_are_fresh() {
        assert_ne!(new_session_id(), new_session_id());
    }

    #[tokio::test]
    async fn activation_emits_exactly_one_pageview() {
        let (sink, transport) = sink_transport();
        let hook = CaptureHook::activate(transport, fixed(VariantId::B));
        let session_id = hook.session_id().to_string();
        hook.detach().await;

        let events = sink.list_all().await.unwrap().events;
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].event_type, EventType::Pageview);
        assert_eq!(events[0].session_id, session_id);
        assert_eq!(events[0].variant_id.as_deref(), Some("B"));
        assert_eq!(events[0].payload_str("path"), Some("/pricing"));
    }

    #[tokio::test]
    async fn click_carries_coordinates_tag_and_truncated_text() {
        let (sink, transport) = sink_transport();
        let hook = CaptureHook::activate(transport, fixed(VariantId::A));
        hook.click(ClickInput {
            x: 12.0,
            y: 340.0,
            tag: "BUTTON".into(),
            text: Some("é".repeat(120)),
        });
        hook.detach().await;

        let events = sink.list_all().await.unwrap().events;
        let click = &events[1];
        assert_eq!(click.event_type, EventType::Click);
        assert_eq!(click.payload["x"], 12.0);
        assert_eq!(click.payload["y"], 340.0);
        assert_eq!(click.payload_str("tag"), Some("BUTTON"));
        assert_eq!(
            click.payload_str("text").map(|t| t.chars().count()),
            Some(MAX_CLICK_TEXT_CHARS)
        );
    }

    #[tokio::test]
    async fn click_without_text_omits_field() {
        let (sink, transport) = sink_transport();
        let hook = CaptureHook::activate(transport, fixed(VariantId::A));
        hook.click(ClickInput {
            x: 0.0,
            y: 0.0,
            tag: "IMG".into(),
            text: None,
        });
        hook.detach().await;

        let events = sink.list_all().await.unwrap().events;
        assert!(events[1].payload.get("text").is_none());
    }

    #[tokio::test]
    async fn scroll_emits_numeric_percent() {
        let (sink, transport) = sink_transport();
        let hook = CaptureHook::activate(transport, fixed(VariantId::A));
        hook.scroll(ScrollMetrics {
            scroll_top: 500.0,
            scroll_height: 2000.0,
            client_height: 1000.0,
        });
        hook.detach().await;

        let events = sink.list_all().await.unwrap().events;
        assert_eq!(events[1].event_type, EventType::Scroll);
        assert_eq!(events[1].scroll_percent(), Some(50.0));
    }

    #[tokio::test]
    async fn transport_failures_are_swallowed_without_retry() {
        let transport = Arc::new(FailingTransport {
            attempts: AtomicUsize::new(0),
        });
        let hook = CaptureHook::activate(transport.clone(), fixed(VariantId::A));
        hook.click(ClickInput {
            x: 1.0,
            y: 1.0,
            tag: "A".into(),
            text: None,
        });
        hook.detach().await;

        assert_eq!(transport.attempts.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn dropped_hook_stops_sender_task() {
        let (sink, transport) = sink_transport();
        let hook = CaptureHook::activate(transport.clone(), fixed(VariantId::A));
        drop(hook);

        tokio::time::timeout(std::time::Duration::from_secs(5), async {
            while Arc::strong_count(&transport) > 1 {
                tokio::task::yield_now().await;
            }
        })
        .await
        .expect("sender task should release the transport");
        assert_eq!(sink.len().await, 1);
    }

    #[tokio::test]
    async fn full_queue_drops_events() {
        let transport = Arc::new(FailingTransport {
            attempts: AtomicUsize::new(0),
        });
        let config = CaptureConfig {
            queue_capacity: 1,
            ..fixed(VariantId::A)
        };
        let hook = CaptureHook::activate(transport.clone(), config);
        for _ in 0..50 {
            hook.scroll(ScrollMetrics {
                scroll_top: 10.0,
                scroll_height: 100.0,
                client_height: 50.0,
            });
        }
        hook.detach().await;

        assert!(transport.attempts.load(Ordering::SeqCst) < 51);
    }
}
