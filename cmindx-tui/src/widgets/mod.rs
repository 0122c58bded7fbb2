//! Dashboard widgets.

mod event_log;
mod stats_bar;
mod variant_card;

pub use event_log::{DEFAULT_TAIL_ROWS, EventLogWidget, EventRow, describe};
pub use stats_bar::{ConnectionStatus, StatsBarWidget};
pub use variant_card::{VariantCardWidget, format_avg_scroll};

/// Draw into a `TestBackend` and return the buffer as one string.
#[cfg(test)]
pub(crate) fn render_to_string(
    width: u16,
    height: u16,
    draw: impl FnOnce(&mut ratatui::Frame),
) -> String {
    use ratatui::{Terminal, backend::TestBackend};

    let mut terminal = Terminal::new(TestBackend::new(width, height)).unwrap();
    terminal.draw(draw).unwrap();
    terminal
        .backend()
        .buffer()
        .content()
        .iter()
        .map(|cell| cell.symbol())
        .collect()
}
