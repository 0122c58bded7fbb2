//! Header stats bar.
//!
//! Single line at the top of the dashboard: total events, unique sessions,
//! the current winner and the poll status.

use cmindx_core::{EventSummary, VariantId};
use ratatui::{
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
};

use crate::Theme;

/// Status of the most recent poll.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ConnectionStatus {
    /// No poll has completed yet.
    #[default]
    Connecting,
    /// The last poll succeeded.
    Connected,
    /// The last poll failed; data on screen may be stale.
    Disconnected,
}

impl ConnectionStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Connecting => "connecting...",
            Self::Connected => "live",
            Self::Disconnected => "stale",
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct StatsBarWidget {
    pub total_events: usize,
    pub unique_sessions: usize,
    pub winner: Option<VariantId>,
    pub connection_status: ConnectionStatus,
}

impl StatsBarWidget {
    /// Copy the headline numbers out of a summary.
    pub fn update(&mut self, summary: &EventSummary) {
        self.total_events = summary.total_events;
        self.unique_sessions = summary.unique_sessions;
        self.winner = summary.winner;
    }

    /// "Variant X" or "-" when there is no winner.
    pub fn winner_label(&self) -> String {
        match self.winner {
            Some(v) => format!("Variant {}", v),
            None => "-".to_string(),
        }
    }

    /// Layout: "Events: N   Sessions: N   Winner: Variant X   Status: live"
    pub fn to_paragraph(&self, theme: &Theme) -> Paragraph<'_> {
        let status_color = match self.connection_status {
            ConnectionStatus::Connected => theme.success,
            ConnectionStatus::Connecting => theme.warning,
            ConnectionStatus::Disconnected => theme.error,
        };
        let label = Style::default().fg(theme.muted);

        let line = Line::from(vec![
            Span::styled("Events: ", label),
            Span::styled(
                self.total_events.to_string(),
                Style::default().fg(theme.accent),
            ),
            Span::raw("   "),
            Span::styled("Sessions: ", label),
            Span::styled(
                self.unique_sessions.to_string(),
                Style::default().fg(theme.success),
            ),
            Span::raw("   "),
            Span::styled("Winner: ", label),
            Span::styled(
                self.winner_label(),
                Style::default()
                    .fg(theme.accent)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::raw("   "),
            Span::styled("Status: ", label),
            Span::styled(
                self.connection_status.as_str(),
                Style::default().fg(status_color),
            ),
        ]);

        Paragraph::new(line)
    }
}
