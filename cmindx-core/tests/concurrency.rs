//! Concurrency tests for event sinks
//!
//! Many writers append at once, as the HTTP server does under load:
//! - no event is lost or duplicated
//! - each writer's own events keep their relative order
//! - reads can run while writes are in flight

use std::sync::Arc;

use cmindx_core::{Event, EventSink, EventType, MemoryEventSink, Payload, TursoEventSink};
use serde_json::json;

const WRITERS: usize = 8;
const EVENTS_PER_WRITER: usize = 25;

fn event(writer: usize, seq: usize) -> Event {
    let mut payload = Payload::new();
    payload.insert("seq".into(), json!(seq));
    Event::new(format!("writer-{}", writer), EventType::Click, payload, None)
}

async fn hammer(sink: Arc<dyn EventSink>) {
    let mut handles = Vec::new();
    for writer in 0..WRITERS {
        let sink = Arc::clone(&sink);
        handles.push(tokio::spawn(async move {
            for seq in 0..EVENTS_PER_WRITER {
                sink.record(event(writer, seq)).await.unwrap();
            }
        }));
    }

    let reader = {
        let sink = Arc::clone(&sink);
        tokio::spawn(async move {
            for _ in 0..10 {
                let list = sink.list_all().await.unwrap();
                assert_eq!(list.count, list.events.len());
                tokio::task::yield_now().await;
            }
        })
    };

    for handle in handles {
        handle.await.unwrap();
    }
    reader.await.unwrap();
}

fn assert_complete_and_ordered(events: &[Event]) {
    assert_eq!(events.len(), WRITERS * EVENTS_PER_WRITER);

    for writer in 0..WRITERS {
        let session = format!("writer-{}", writer);
        let seqs: Vec<u64> = events
            .iter()
            .filter(|e| e.session_id == session)
            .filter_map(|e| e.payload.get("seq").and_then(|v| v.as_u64()))
            .collect();
        let expected: Vec<u64> = (0..EVENTS_PER_WRITER as u64).collect();
        assert_eq!(seqs, expected, "writer {} out of order", writer);
    }
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn memory_sink_survives_concurrent_writers() {
    let sink = Arc::new(MemoryEventSink::new());
    hammer(sink.clone()).await;

    let list = sink.list_all().await.unwrap();
    assert_complete_and_ordered(&list.events);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn turso_sink_survives_concurrent_writers() {
    let dir = tempfile::TempDir::new().unwrap();
    let sink = Arc::new(
        TursoEventSink::new_local(&dir.path().join("events.db"))
            .await
            .unwrap(),
    );
    hammer(sink.clone()).await;

    let list = sink.list_all().await.unwrap();
    assert_complete_and_ordered(&list.events);
}
