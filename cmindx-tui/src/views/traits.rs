//! View rendering trait.

use ratatui::{Frame, layout::Rect};

use crate::App;

/// A full-screen view drawn from the app state.
pub trait ViewRenderer {
    fn render(&self, frame: &mut Frame, area: Rect, app: &App);

    fn title(&self) -> &str;
}
