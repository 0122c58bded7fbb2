//! Placeholder shown before the first successful poll.

use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Layout, Rect},
    text::Line,
    widgets::Paragraph,
};

use super::traits::ViewRenderer;
use crate::App;

#[derive(Debug, Clone, Default)]
pub struct LoadingView;

impl ViewRenderer for LoadingView {
    fn render(&self, frame: &mut Frame, area: Rect, app: &App) {
        let [_, middle, _] = Layout::vertical([
            Constraint::Fill(1),
            Constraint::Length(2),
            Constraint::Fill(1),
        ])
        .areas(area);

        let mut lines = vec![Line::styled("Loading telemetry…", app.theme.bold)];
        if let Some(error) = &app.last_error {
            lines.push(Line::styled(format!("last attempt failed: {}", error), app.theme.dim));
        }

        frame.render_widget(Paragraph::new(lines).alignment(Alignment::Center), middle);
    }

    fn title(&self) -> &str {
        "Loading"
    }
}
