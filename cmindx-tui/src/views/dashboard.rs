//! Main dashboard: stats bar, variant cards and the live event log.

use ratatui::{
    Frame,
    layout::{Constraint, Layout, Rect},
    text::{Line, Span},
    widgets::Paragraph,
};

use super::traits::ViewRenderer;
use crate::App;

const CARD_HEIGHT: u16 = 6;

#[derive(Debug, Clone, Default)]
pub struct DashboardView;

impl ViewRenderer for DashboardView {
    fn render(&self, frame: &mut Frame, area: Rect, app: &App) {
        let [stats, cards, log, footer] = Layout::vertical([
            Constraint::Length(1),
            Constraint::Length(CARD_HEIGHT),
            Constraint::Min(3),
            Constraint::Length(1),
        ])
        .areas(area);

        frame.render_widget(app.stats_widget.to_paragraph(&app.theme), stats);

        let [left, right] =
            Layout::horizontal([Constraint::Percentage(50), Constraint::Percentage(50)])
                .areas(cards);
        frame.render_widget(app.cards[0].to_paragraph(&app.theme), left);
        frame.render_widget(app.cards[1].to_paragraph(&app.theme), right);

        frame.render_widget(app.log_widget.to_list(&app.theme), log);

        let help = Line::from(vec![
            Span::styled("q", app.theme.bold),
            Span::styled(" quit  ", app.theme.dim),
            Span::styled("r", app.theme.bold),
            Span::styled(" refresh  ", app.theme.dim),
            Span::styled("j/k", app.theme.bold),
            Span::styled(" scroll  ", app.theme.dim),
            Span::styled(
                format!("refreshing every {}s", app.poll_interval.as_secs()),
                app.theme.dim,
            ),
        ]);
        frame.render_widget(Paragraph::new(help), footer);
    }

    fn title(&self) -> &str {
        "Dashboard"
    }
}
