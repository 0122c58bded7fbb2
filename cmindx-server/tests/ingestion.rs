//! End-to-end ingestion over a real socket

mod common;

use cmindx_core::{EventList, EventSummary, EventType, VariantId};
use serde_json::{Value, json};

#[tokio::test]
async fn submit_then_list_round_trips_over_http() {
    let (_state, addr) = common::create_test_server().await;
    let base = common::base_url(addr);
    let client = reqwest::Client::new();

    let response = client
        .post(format!("{}/events", base))
        .json(&json!({
            "sessionId": "sess_1",
            "eventType": "scroll",
            "payload": { "scrollPercent": 35 },
            "ts": "2025-05-05T08:00:00.000Z",
            "variantId": "B"
        }))
        .send()
        .await
        .unwrap();
    assert!(response.status().is_success());
    let body: Value = response.json().await.unwrap();
    assert_eq!(body, json!({ "ok": true }));

    let list: EventList = client
        .get(format!("{}/events", base))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(list.count, 1);
    assert_eq!(list.events[0].event_type, EventType::Scroll);
    assert_eq!(list.events[0].scroll_percent(), Some(35.0));
}

#[tokio::test]
async fn rejected_submission_reports_code() {
    let (state, addr) = common::create_test_server().await;
    let client = reqwest::Client::new();

    let response = client
        .post(format!("{}/events", common::base_url(addr)))
        .json(&json!({ "sessionId": "s", "eventType": "click", "payload": [1, 2] }))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status().as_u16(), 400);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["code"], "INVALID_PAYLOAD");

    assert_eq!(state.sink.list_all().await.unwrap().count, 0);
}

#[tokio::test]
async fn stats_endpoint_reflects_submissions() {
    let (_state, addr) = common::create_test_server().await;
    let base = common::base_url(addr);
    let client = reqwest::Client::new();

    let submissions = [
        json!({ "sessionId": "a", "eventType": "scroll", "payload": { "scrollPercent": 20 }, "variantId": "A" }),
        json!({ "sessionId": "a", "eventType": "scroll", "payload": { "scrollPercent": 60 }, "variantId": "A" }),
        json!({ "sessionId": "b", "eventType": "click", "payload": { "tag": "BUTTON" }, "variantId": "B" }),
        json!({ "sessionId": "c", "eventType": "pageview", "payload": { "path": "/" } }),
    ];
    for body in &submissions {
        client
            .post(format!("{}/events", base))
            .json(body)
            .send()
            .await
            .unwrap()
            .error_for_status()
            .unwrap();
    }

    let summary: EventSummary = client
        .get(format!("{}/api/stats", base))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();

    let a = summary.variant(VariantId::A);
    let b = summary.variant(VariantId::B);
    assert_eq!(summary.total_events, 4);
    assert_eq!(summary.unique_sessions, 3);
    assert_eq!(a.total_events, 3);
    assert_eq!(a.sessions, 2);
    assert_eq!(a.avg_scroll_percent, Some(40.0));
    assert_eq!(b.click_events, 1);
    assert_eq!(b.avg_scroll_percent, None);
    assert!(summary.winner.is_none());
}
