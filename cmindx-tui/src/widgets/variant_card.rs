//! Per-variant performance card.

use cmindx_core::{VariantId, VariantStats};
use ratatui::{
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};

use crate::Theme;

/// Formats an average scroll depth as `"42.5%"`, or `"-"` with no samples.
pub fn format_avg_scroll(avg: Option<f64>) -> String {
    match avg {
        Some(value) => format!("{:.1}%", value),
        None => "-".to_string(),
    }
}

#[derive(Debug, Clone)]
pub struct VariantCardWidget {
    pub stats: VariantStats,
    pub leading: bool,
}

impl VariantCardWidget {
    pub fn new(variant: VariantId) -> Self {
        Self {
            stats: VariantStats::empty(variant),
            leading: false,
        }
    }

    /// Replace the stats; `winner` decides the LEADING badge.
    pub fn update(&mut self, stats: &VariantStats, winner: Option<VariantId>) {
        self.stats = stats.clone();
        self.leading = winner == Some(stats.variant_id);
    }

    pub fn to_paragraph(&self, theme: &Theme) -> Paragraph<'_> {
        let label = Style::default().fg(theme.muted);
        let value = Style::default().fg(theme.fg).add_modifier(Modifier::BOLD);

        let mut title = vec![Span::styled(
            format!(" Variant {} ", self.stats.variant_id),
            theme.bold,
        )];
        if self.leading {
            title.push(Span::styled(
                "LEADING ",
                Style::default()
                    .fg(theme.success)
                    .add_modifier(Modifier::BOLD),
            ));
        }

        let lines = vec![
            Line::from(vec![
                Span::styled("Sessions      ", label),
                Span::styled(self.stats.sessions.to_string(), value),
            ]),
            Line::from(vec![
                Span::styled("Total events  ", label),
                Span::styled(self.stats.total_events.to_string(), value),
            ]),
            Line::from(vec![
                Span::styled("Avg scroll    ", label),
                Span::styled(
                    format_avg_scroll(self.stats.avg_scroll_percent),
                    Style::default().fg(theme.scroll),
                ),
            ]),
            Line::from(vec![
                Span::styled("Click events  ", label),
                Span::styled(
                    self.stats.click_events.to_string(),
                    Style::default().fg(theme.click),
                ),
            ]),
        ];

        let block = Block::default()
            .title(Line::from(title))
            .borders(Borders::ALL)
            .border_style(Style::default().fg(theme.card_border(self.leading)));

        Paragraph::new(lines).block(block)
    }
}
