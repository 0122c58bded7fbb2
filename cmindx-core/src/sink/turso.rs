//! Turso/libSQL implementation of the event sink.
//!
//! Each event becomes one row. It can connect to:
//! - Remote Turso database (cloud)
//! - Local embedded SQLite file
//! - An in-memory database (tests)

use std::path::Path;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use libsql::{Builder, Connection, Database};
use tracing::{debug, instrument};

use super::{EventList, EventSink, Result, SinkError};
use crate::events::{Event, EventType, Payload};

/// SQL schema for the events table.
///
/// `id` defines arrival order; `created_at` is stamped by the server.
const SCHEMA_EVENTS: &str = r#"
CREATE TABLE IF NOT EXISTS events (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    session_id TEXT NOT NULL,
    event_type TEXT NOT NULL,
    payload TEXT NOT NULL,
    ts TEXT NOT NULL,
    created_at TEXT NOT NULL,
    variant_id TEXT
)
"#;

/// Turso-backed event sink.
///
/// Holds a single connection so `:memory:` databases stay shared across calls.
#[derive(Clone)]
pub struct TursoEventSink {
    _db: Arc<Database>,
    conn: Connection,
}

impl TursoEventSink {
    /// Open (or create) a local embedded database file.
    pub async fn new_local(path: &Path) -> Result<Self> {
        let db = Builder::new_local(path).build().await?;
        Self::open(db).await
    }

    /// Connect to a remote Turso database.
    pub async fn new_remote(url: &str, token: &str) -> Result<Self> {
        let db = Builder::new_remote(url.to_string(), token.to_string())
            .build()
            .await?;
        Self::open(db).await
    }

    /// Create an in-memory database (for testing).
    pub async fn new_memory() -> Result<Self> {
        let db = Builder::new_local(":memory:").build().await?;
        Self::open(db).await
    }

    async fn open(db: Database) -> Result<Self> {
        let conn = db.connect()?;
        conn.execute(SCHEMA_EVENTS, ()).await?;
        Ok(Self {
            _db: Arc::new(db),
            conn,
        })
    }

    /// Parse an event from a database row.
    fn parse_event(row: &libsql::Row) -> Result<Event> {
        let session_id: String = row.get(0)?;
        let event_type: String = row.get(1)?;
        let payload_json: String = row.get(2)?;
        let ts_str: String = row.get(3)?;
        let variant_id: Option<String> = row.get(4)?;

        let payload: Payload = serde_json::from_str(&payload_json)?;

        Ok(Event {
            session_id,
            event_type: EventType::parse(&event_type),
            payload,
            timestamp: parse_datetime(&ts_str)?,
            variant_id,
        })
    }
}

#[async_trait]
impl EventSink for TursoEventSink {
    fn backend(&self) -> &'static str {
        "turso"
    }

    #[instrument(skip(self, event), level = "debug")]
    async fn record(&self, event: Event) -> Result<()> {
        let payload_json = serde_json::to_string(&event.payload)?;
        debug!(session_id = %event.session_id, event_type = %event.event_type, "inserting event");

        self.conn
            .execute(
                "INSERT INTO events (session_id, event_type, payload, ts, created_at, variant_id) VALUES (?, ?, ?, ?, ?, ?)",
                libsql::params![
                    event.session_id,
                    event.event_type.as_str().to_string(),
                    payload_json,
                    format_datetime(event.timestamp),
                    format_datetime(Utc::now()),
                    event.variant_id,
                ],
            )
            .await?;
        Ok(())
    }

    #[instrument(skip(self), level = "debug")]
    async fn list_all(&self) -> Result<EventList> {
        let mut rows = self
            .conn
            .query(
                "SELECT session_id, event_type, payload, ts, variant_id FROM events ORDER BY id ASC",
                (),
            )
            .await?;

        let mut events = Vec::new();
        while let Some(row) = rows.next().await? {
            events.push(Self::parse_event(&row)?);
        }
        Ok(events.into())
    }
}

fn format_datetime(dt: DateTime<Utc>) -> String {
    dt.to_rfc3339()
}

fn parse_datetime(s: &str) -> Result<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(s)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|_| SinkError::InvalidData(format!("invalid timestamp: {}", s)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::events::VariantId;
    use serde_json::json;
    use tempfile::TempDir;

    fn scroll(session_id: &str, percent: i64, variant: Option<VariantId>) -> Event {
        let mut payload = Payload::new();
        payload.insert("scrollPercent".into(), json!(percent));
        Event::new(session_id, EventType::Scroll, payload, variant)
    }

    #[tokio::test]
    async fn empty_database_lists_nothing() {
        let sink = TursoEventSink::new_memory().await.unwrap();
        let list = sink.list_all().await.unwrap();
        assert_eq!(list.count, 0);
    }

    #[tokio::test]
    async fn round_trips_event_fields() {
        let sink = TursoEventSink::new_memory().await.unwrap();
        let event = scroll("sess-1", 40, Some(VariantId::B));

        sink.record(event.clone()).await.unwrap();

        let list = sink.list_all().await.unwrap();
        assert_eq!(list.count, 1);
        let stored = &list.events[0];
        assert_eq!(stored.session_id, "sess-1");
        assert_eq!(stored.event_type, EventType::Scroll);
        assert_eq!(stored.scroll_percent(), Some(40.0));
        assert_eq!(stored.variant_id.as_deref(), Some("B"));
        assert_eq!(stored.timestamp, event.timestamp);
    }

    #[tokio::test]
    async fn keeps_untagged_and_unknown_event_types() {
        let sink = TursoEventSink::new_memory().await.unwrap();
        let event = Event::new("s", EventType::Other("exit".into()), Payload::new(), None);

        sink.record(event).await.unwrap();

        let stored = &sink.list_all().await.unwrap().events[0];
        assert_eq!(stored.event_type, EventType::Other("exit".into()));
        assert!(stored.variant_id.is_none());
    }

    #[tokio::test]
    async fn preserves_order_and_duplicates() {
        let sink = TursoEventSink::new_memory().await.unwrap();
        let dup = scroll("s1", 10, None);
        sink.record(dup.clone()).await.unwrap();
        sink.record(scroll("s2", 20, None)).await.unwrap();
        sink.record(dup).await.unwrap();

        let ids: Vec<_> = sink
            .list_all()
            .await
            .unwrap()
            .events
            .into_iter()
            .map(|e| e.session_id)
            .collect();
        assert_eq!(ids, vec!["s1", "s2", "s1"]);
    }

    #[tokio::test]
    async fn local_file_survives_reopen() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("events.db");

        {
            let sink = TursoEventSink::new_local(&path).await.unwrap();
            sink.record(scroll("s1", 70, Some(VariantId::A))).await.unwrap();
        }

        let reopened = TursoEventSink::new_local(&path).await.unwrap();
        let list = reopened.list_all().await.unwrap();
        assert_eq!(list.count, 1);
        assert_eq!(list.events[0].scroll_percent(), Some(70.0));
    }

    #[test]
    fn parse_datetime_rejects_garbage() {
        assert!(matches!(
            parse_datetime("not a date"),
            Err(SinkError::InvalidData(_))
        ));
    }
}
