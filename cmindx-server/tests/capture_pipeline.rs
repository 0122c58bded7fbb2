//! Capture hook posting to a live server

mod common;

use std::sync::Arc;

use cmindx_capture::{CaptureConfig, CaptureHook, ClickInput, HttpTransport, ScrollMetrics};
use cmindx_core::{EventType, TursoEventSink, VariantAssignment, VariantId};

fn config(variant: VariantId) -> CaptureConfig {
    CaptureConfig {
        path: "/".into(),
        assignment: VariantAssignment::Fixed(variant),
        ..Default::default()
    }
}

#[tokio::test]
async fn hook_events_reach_the_sink() {
    let (state, addr) = common::create_test_server().await;
    let transport = Arc::new(HttpTransport::new(&common::base_url(addr)).unwrap());

    let hook = CaptureHook::activate(transport, config(VariantId::B));
    hook.scroll(ScrollMetrics {
        scroll_top: 900.0,
        scroll_height: 2000.0,
        client_height: 1000.0,
    });
    hook.click(ClickInput {
        x: 10.0,
        y: 20.0,
        tag: "A".into(),
        text: Some("Deploy Growth Agent".into()),
    });
    let session_id = hook.session_id().to_string();
    hook.detach().await;

    let events = state.sink.list_all().await.unwrap().events;
    let kinds: Vec<_> = events.iter().map(|e| e.event_type.clone()).collect();
    assert_eq!(
        kinds,
        vec![EventType::Pageview, EventType::Scroll, EventType::Click]
    );
    assert!(events.iter().all(|e| e.session_id == session_id));
    assert!(events.iter().all(|e| e.effective_variant() == Some(VariantId::B)));
    assert_eq!(events[1].scroll_percent(), Some(90.0));
}

#[tokio::test]
async fn unreachable_server_is_silently_ignored() {
    // Nothing listens on port 9 on the loopback interface in CI.
    let transport = Arc::new(HttpTransport::new("http://127.0.0.1:9").unwrap());
    let hook = CaptureHook::activate(transport, config(VariantId::A));
    hook.scroll(ScrollMetrics {
        scroll_top: 0.0,
        scroll_height: 100.0,
        client_height: 100.0,
    });
    hook.detach().await;
}

#[tokio::test]
async fn durable_backend_serves_same_contract() {
    let dir = tempfile::TempDir::new().unwrap();
    let sink = Arc::new(
        TursoEventSink::new_local(&dir.path().join("events.db"))
            .await
            .unwrap(),
    );
    let (state, addr) = common::create_test_server_with_sink(sink).await;
    let transport = Arc::new(HttpTransport::new(&common::base_url(addr)).unwrap());

    let hook = CaptureHook::activate(transport, config(VariantId::A));
    hook.detach().await;

    let list = state.sink.list_all().await.unwrap();
    assert_eq!(state.sink.backend(), "turso");
    assert_eq!(list.count, 1);
    assert_eq!(list.events[0].payload_str("path"), Some("/"));
}
