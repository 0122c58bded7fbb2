//! Main application struct and event loop for the dashboard.

use std::time::Duration;

use crossterm::event::{self, Event, KeyEvent, KeyEventKind};
use ratatui::Frame;
use tracing::debug;

use crate::client::{DEFAULT_TIMEOUT, DashboardClient};
use crate::error::DashboardError;
use crate::keybindings::{Action, KeyBindings};
use crate::poller::{DEFAULT_POLL_INTERVAL, PollState, PollUpdate, Poller};
use crate::views::{DashboardView, LoadingView, ViewRenderer};
use crate::widgets::{
    ConnectionStatus, DEFAULT_TAIL_ROWS, EventLogWidget, StatsBarWidget, VariantCardWidget,
};
use crate::{DashboardTerminal, Theme, cmindx_default, restore_terminal, setup_terminal};
use cmindx_core::VariantId;

/// Settings for a dashboard session.
#[derive(Debug, Clone)]
pub struct DashboardConfig {
    /// Base URL of the cmindx server
    pub url: String,
    pub poll_interval: Duration,
    /// Maximum rows in the event log
    pub tail_rows: usize,
    /// Per-request HTTP timeout
    pub timeout: Duration,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            url: "http://127.0.0.1:7743".into(),
            poll_interval: DEFAULT_POLL_INTERVAL,
            tail_rows: DEFAULT_TAIL_ROWS,
            timeout: DEFAULT_TIMEOUT,
        }
    }
}

/// Dashboard application.
#[derive(Debug)]
pub struct App {
    pub url: String,
    pub theme: Theme,
    pub keybindings: KeyBindings,
    pub state: PollState,
    pub running: bool,
    pub poll_interval: Duration,
    pub timeout: Duration,
    /// Message from the most recent failed poll
    pub last_error: Option<String>,
    pub stats_widget: StatsBarWidget,
    /// Variant A then variant B
    pub cards: [VariantCardWidget; 2],
    pub log_widget: EventLogWidget,
    poller: Option<Poller>,
}

impl App {
    /// Creates an app for `url` with default settings.
    pub fn new(url: &str) -> Self {
        Self::with_config(DashboardConfig {
            url: url.to_string(),
            ..Default::default()
        })
    }

    pub fn with_config(config: DashboardConfig) -> Self {
        Self {
            url: config.url,
            theme: cmindx_default(),
            keybindings: KeyBindings::default(),
            state: PollState::default(),
            running: true,
            poll_interval: config.poll_interval,
            timeout: config.timeout,
            last_error: None,
            stats_widget: StatsBarWidget::default(),
            cards: [
                VariantCardWidget::new(VariantId::A),
                VariantCardWidget::new(VariantId::B),
            ],
            log_widget: EventLogWidget::new(config.tail_rows),
            poller: None,
        }
    }

    /// Spawn the background poller. Requires a tokio runtime.
    pub fn start_polling(&mut self) -> Result<(), DashboardError> {
        let client = DashboardClient::with_timeout(&self.url, self.timeout)?;
        self.poller = Some(Poller::spawn(client, self.poll_interval));
        Ok(())
    }

    pub fn is_polling(&self) -> bool {
        self.poller.as_ref().is_some_and(|p| !p.is_stopped())
    }

    /// Handles a key event.
    pub fn handle_key(&mut self, key: KeyEvent) {
        if key.kind != KeyEventKind::Press {
            return;
        }
        if let Some(action) = self.keybindings.resolve(key) {
            self.execute_action(action);
        }
    }

    fn execute_action(&mut self, action: Action) {
        match action {
            Action::Quit => self.running = false,
            Action::Refresh => {
                if let Some(poller) = &self.poller {
                    debug!("manual refresh");
                    poller.refresh();
                }
            }
            Action::ScrollUp => self.log_widget.scroll_up(),
            Action::ScrollDown => self.log_widget.scroll_down(),
        }
    }

    /// Apply one poll outcome to the state and widgets.
    pub fn handle_poll_update(&mut self, update: PollUpdate) {
        match &update {
            PollUpdate::Events(_) => {
                self.stats_widget.connection_status = ConnectionStatus::Connected;
                self.last_error = None;
            }
            PollUpdate::Failed(message) => {
                self.stats_widget.connection_status = ConnectionStatus::Disconnected;
                self.last_error = Some(message.clone());
            }
        }

        if !self.state.apply(update) {
            return;
        }

        if let Some(snapshot) = self.state.snapshot() {
            let summary = &snapshot.summary;
            self.stats_widget.update(summary);
            for (card, stats) in self.cards.iter_mut().zip(summary.variants.iter()) {
                card.update(stats, summary.winner);
            }
            self.log_widget.set_events(&snapshot.events);
        }
    }

    /// Drain pending poll results.
    pub fn tick(&mut self) {
        let updates: Vec<_> = match &mut self.poller {
            Some(poller) => std::iter::from_fn(|| poller.try_recv()).collect(),
            None => Vec::new(),
        };

        for update in updates {
            self.handle_poll_update(update);
        }
    }

    /// Renders the current view.
    pub fn render(&self, frame: &mut Frame) {
        let area = frame.area();
        if self.state.is_loading() {
            LoadingView.render(frame, area, self);
        } else {
            DashboardView.render(frame, area, self);
        }
    }

    /// Runs the dashboard until the user quits.
    ///
    /// Sets up the terminal, polls in the background and always restores
    /// the terminal before returning.
    pub async fn run(&mut self) -> Result<(), DashboardError> {
        self.start_polling()?;
        let mut terminal = setup_terminal()?;

        let result = self.event_loop(&mut terminal).await;

        restore_terminal(&mut terminal)?;
        self.stop();

        result
    }

    /// Stop the background poller.
    pub fn stop(&mut self) {
        if let Some(poller) = self.poller.take() {
            poller.stop();
        }
    }

    async fn event_loop(&mut self, terminal: &mut DashboardTerminal) -> Result<(), DashboardError> {
        while self.running {
            terminal.draw(|f| self.render(f))?;

            if event::poll(Duration::from_millis(100))?
                && let Event::Key(key) = event::read()?
            {
                self.handle_key(key);
            }

            self.tick();
            tokio::task::yield_now().await;
        }

        Ok(())
    }
}
