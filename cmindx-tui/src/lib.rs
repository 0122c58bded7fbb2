//! Terminal dashboard for cmindx.
//!
//! Polls a cmindx server for its event log, recomputes per-variant
//! statistics on every poll and renders them with ratatui:
//!
//! ```text
//! Events: 42   Sessions: 9   Winner: Variant B   Status: live
//! ┌ Variant A ─────────────┐┌ Variant B LEADING ─────┐
//! │ Sessions      4        ││ Sessions      5        │
//! │ Avg scroll    41.0%    ││ Avg scroll    63.5%    │
//! └────────────────────────┘└────────────────────────┘
//! ┌ Live Event Log (42) ───────────────────────────────┐
//! │ 14:02:11  3f2a9c1d…  B    scroll    Scroll: 70%     │
//! └────────────────────────────────────────────────────┘
//! ```

mod app;
mod client;
mod error;
mod keybindings;
mod poller;
mod terminal;
mod theme;
mod views;
mod widgets;

pub use app::{App, DashboardConfig};
pub use client::{DEFAULT_TIMEOUT, DashboardClient, PollError};
pub use error::DashboardError;
pub use keybindings::{Action, KeyBindings};
pub use poller::{DEFAULT_POLL_INTERVAL, PollState, PollUpdate, Poller, Snapshot};
pub use terminal::{DashboardTerminal, install_panic_hook, restore_terminal, setup_terminal};
pub use theme::{Theme, cmindx_default};
pub use views::{DashboardView, LoadingView, ViewRenderer};
pub use widgets::{
    ConnectionStatus, DEFAULT_TAIL_ROWS, EventLogWidget, EventRow, StatsBarWidget,
    VariantCardWidget, describe, format_avg_scroll,
};
