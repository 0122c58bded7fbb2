//! Live event log: newest events first, capped at a fixed number of rows.

use chrono::Local;
use cmindx_core::{Event, EventType};
use ratatui::{
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem},
};
use serde_json::Value;

use crate::Theme;

/// Default number of rows kept in the log.
pub const DEFAULT_TAIL_ROWS: usize = 80;

const SESSION_PREFIX_CHARS: usize = 8;
const EMPTY_MESSAGE: &str =
    "No events yet. Open the landing page, scroll and click to generate telemetry.";

/// One formatted row of the log.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EventRow {
    /// Local wall-clock time, `HH:MM:SS`
    pub time: String,
    /// Truncated session id
    pub session: String,
    /// Raw variant tag or `-`
    pub variant: String,
    pub kind: String,
    pub details: String,
}

impl EventRow {
    pub fn from_event(event: &Event) -> Self {
        Self {
            time: event
                .timestamp
                .with_timezone(&Local)
                .format("%H:%M:%S")
                .to_string(),
            session: short_session(&event.session_id),
            variant: event.variant_id.clone().unwrap_or_else(|| "-".into()),
            kind: event.event_type.to_string(),
            details: describe(event),
        }
    }
}

fn short_session(session_id: &str) -> String {
    let prefix: String = session_id.chars().take(SESSION_PREFIX_CHARS).collect();
    format!("{}…", prefix)
}

/// Payload value as shown to a human: strings unquoted, missing as `-`.
fn payload_text(event: &Event, key: &str) -> String {
    match event.payload.get(key) {
        None | Some(Value::Null) => "-".to_string(),
        Some(Value::String(s)) => s.clone(),
        Some(other) => other.to_string(),
    }
}

/// Human-readable details column for an event.
pub fn describe(event: &Event) -> String {
    match event.event_type {
        EventType::Scroll => format!("Scroll: {}%", payload_text(event, "scrollPercent")),
        EventType::Click => format!(
            "Click on {} \"{}\"",
            payload_text(event, "tag"),
            event.payload_str("text").unwrap_or_default()
        ),
        EventType::Pageview => format!("Path: {}", payload_text(event, "path")),
        EventType::Other(_) => String::new(),
    }
}

#[derive(Debug, Clone)]
pub struct EventLogWidget {
    pub rows: Vec<EventRow>,
    pub capacity: usize,
    pub scroll_offset: usize,
}

impl Default for EventLogWidget {
    fn default() -> Self {
        Self::new(DEFAULT_TAIL_ROWS)
    }
}

impl EventLogWidget {
    pub fn new(capacity: usize) -> Self {
        Self {
            rows: Vec::new(),
            capacity,
            scroll_offset: 0,
        }
    }

    /// Rebuild rows from the full log, newest first.
    pub fn set_events(&mut self, events: &[Event]) {
        self.rows = events
            .iter()
            .rev()
            .take(self.capacity)
            .map(EventRow::from_event)
            .collect();
        self.scroll_offset = self.scroll_offset.min(self.rows.len().saturating_sub(1));
    }

    pub fn scroll_up(&mut self) {
        self.scroll_offset = self.scroll_offset.saturating_sub(1);
    }

    pub fn scroll_down(&mut self) {
        if self.scroll_offset + 1 < self.rows.len() {
            self.scroll_offset += 1;
        }
    }

    pub fn to_list(&self, theme: &Theme) -> List<'_> {
        let header = ListItem::new(Line::from(Span::styled(
            format!(
                "{:<8}  {:<9}  {:<3}  {:<8}  {}",
                "TIME", "SESSION", "VAR", "TYPE", "DETAILS"
            ),
            theme.dim,
        )));

        let mut items = vec![header];
        if self.rows.is_empty() {
            items.push(ListItem::new(Line::from(Span::styled(
                EMPTY_MESSAGE,
                Style::default().fg(theme.muted),
            ))));
        } else {
            items.extend(
                self.rows
                    .iter()
                    .skip(self.scroll_offset)
                    .map(|row| row_to_item(row, theme)),
            );
        }

        let block = Block::default()
            .title(format!(" Live Event Log ({}) ", self.rows.len()))
            .borders(Borders::ALL)
            .border_style(Style::default().fg(theme.border));

        List::new(items).block(block)
    }
}

fn row_to_item(row: &EventRow, theme: &Theme) -> ListItem<'static> {
    ListItem::new(Line::from(vec![
        Span::styled(format!("{:<8}  ", row.time), theme.dim),
        Span::styled(
            format!("{:<9}  ", row.session),
            Style::default().fg(theme.muted),
        ),
        Span::styled(format!("{:<3}  ", row.variant), Style::default().fg(theme.fg)),
        Span::styled(
            format!("{:<8}  ", row.kind),
            Style::default()
                .fg(theme.event_color(&row.kind))
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled(row.details.clone(), Style::default().fg(theme.fg)),
    ]))
}
