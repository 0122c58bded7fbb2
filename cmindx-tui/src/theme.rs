//! Retro HUD theme for the cmindx dashboard.

use ratatui::style::{Color, Modifier, Style};

/// Colors and styles used across the dashboard.
#[derive(Debug, Clone)]
pub struct Theme {
    // Base colors
    pub fg: Color,
    pub muted: Color,
    pub accent: Color,
    pub success: Color,
    pub warning: Color,
    pub error: Color,

    // Event type colors
    pub click: Color,
    pub scroll: Color,
    pub pageview: Color,

    // UI element colors
    pub border: Color,
    pub highlight: Color,

    // Text styles
    pub bold: Style,
    pub dim: Style,
}

impl Theme {
    /// Color used for an event type label in the log.
    pub fn event_color(&self, event_type: &str) -> Color {
        match event_type {
            "click" => self.click,
            "scroll" => self.scroll,
            _ => self.pageview,
        }
    }

    /// Border color for a variant card.
    pub fn card_border(&self, leading: bool) -> Color {
        if leading { self.highlight } else { self.border }
    }
}

/// Creates the default amber/lime HUD theme.
pub fn cmindx_default() -> Theme {
    let fg = Color::Rgb(248, 250, 252); // #f8fafc slate-50

    Theme {
        fg,
        muted: Color::Rgb(148, 163, 184),  // #94a3b8 slate-400
        accent: Color::Rgb(252, 211, 77),  // #fcd34d amber-300
        success: Color::Rgb(190, 242, 100), // #bef264 lime-300
        warning: Color::Rgb(251, 191, 36), // #fbbf24
        error: Color::Rgb(244, 63, 94),    // #f43f5e

        click: Color::Rgb(254, 205, 211),    // #fecdd3 rose-200
        scroll: Color::Rgb(253, 230, 138),   // #fde68a amber-200
        pageview: Color::Rgb(241, 245, 249), // #f1f5f9

        border: Color::Rgb(51, 65, 85),     // #334155 slate-700
        highlight: Color::Rgb(245, 158, 11), // #f59e0b amber-500

        bold: Style::default().fg(fg).add_modifier(Modifier::BOLD),
        dim: Style::default()
            .fg(Color::Rgb(148, 163, 184))
            .add_modifier(Modifier::DIM),
    }
}
