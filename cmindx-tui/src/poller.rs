//! Background polling of the event log.
//!
//! The [`Poller`] owns a tokio task that fetches `/events` once on start
//! and then on a fixed interval. Results are handed to the UI thread over a
//! channel and drained with [`Poller::try_recv`] from the event loop, so the
//! render path never awaits the network.

use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Utc};
use cmindx_core::{Event, EventList, EventSummary};
use tokio::sync::{Notify, mpsc};
use tokio::time::MissedTickBehavior;
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

use crate::client::DashboardClient;

/// Default interval between polls.
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_secs(5);

const UPDATE_CHANNEL_CAPACITY: usize = 8;

/// Outcome of one poll attempt.
#[derive(Debug, Clone)]
pub enum PollUpdate {
    /// The server returned the full event log
    Events(EventList),
    /// The request failed; carries a display message
    Failed(String),
}

/// Data shown once at least one poll has succeeded.
#[derive(Debug, Clone)]
pub struct Snapshot {
    pub events: Vec<Event>,
    pub summary: EventSummary,
    pub fetched_at: DateTime<Utc>,
}

impl Snapshot {
    /// Build a snapshot, recomputing statistics from the raw events.
    pub fn from_events(events: Vec<Event>) -> Self {
        let summary = EventSummary::from_events(&events);
        Self {
            events,
            summary,
            fetched_at: Utc::now(),
        }
    }
}

/// Dashboard lifecycle.
///
/// Starts in `Loading` and moves to `Ready` on the first successful poll.
/// A failed poll never changes the state, so the last good snapshot stays
/// on screen.
#[derive(Debug, Clone, Default)]
pub enum PollState {
    #[default]
    Loading,
    Ready(Snapshot),
}

impl PollState {
    /// Apply a poll outcome. Returns true when the state changed.
    pub fn apply(&mut self, update: PollUpdate) -> bool {
        match update {
            PollUpdate::Events(list) => {
                *self = PollState::Ready(Snapshot::from_events(list.events));
                true
            }
            PollUpdate::Failed(_) => false,
        }
    }

    pub fn is_loading(&self) -> bool {
        matches!(self, PollState::Loading)
    }

    /// Current snapshot, if any poll has succeeded yet.
    pub fn snapshot(&self) -> Option<&Snapshot> {
        match self {
            PollState::Loading => None,
            PollState::Ready(snapshot) => Some(snapshot),
        }
    }
}

/// Handle to the background poll task.
///
/// Dropping the handle cancels the task.
pub struct Poller {
    rx: mpsc::Receiver<PollUpdate>,
    refresh: Arc<Notify>,
    cancel: CancellationToken,
}

impl std::fmt::Debug for Poller {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Poller")
            .field("cancelled", &self.cancel.is_cancelled())
            .finish_non_exhaustive()
    }
}

impl Poller {
    /// Spawn the poll task. The first fetch happens immediately.
    pub fn spawn(client: DashboardClient, interval: Duration) -> Self {
        let (tx, rx) = mpsc::channel(UPDATE_CHANNEL_CAPACITY);
        let refresh = Arc::new(Notify::new());
        let cancel = CancellationToken::new();

        tokio::spawn(poll_loop(
            client,
            interval,
            tx,
            Arc::clone(&refresh),
            cancel.clone(),
        ));

        Self {
            rx,
            refresh,
            cancel,
        }
    }

    /// Take the next pending update without blocking.
    pub fn try_recv(&mut self) -> Option<PollUpdate> {
        self.rx.try_recv().ok()
    }

    /// Wait for the next update. Returns `None` once the task has stopped.
    pub async fn recv(&mut self) -> Option<PollUpdate> {
        self.rx.recv().await
    }

    /// Ask for a poll now instead of waiting for the next tick.
    pub fn refresh(&self) {
        self.refresh.notify_one();
    }

    /// Stop polling. Further updates are not produced.
    pub fn stop(&self) {
        self.cancel.cancel();
    }

    pub fn is_stopped(&self) -> bool {
        self.cancel.is_cancelled()
    }
}

impl Drop for Poller {
    fn drop(&mut self) {
        self.cancel.cancel();
    }
}

async fn poll_loop(
    client: DashboardClient,
    interval: Duration,
    tx: mpsc::Sender<PollUpdate>,
    refresh: Arc<Notify>,
    cancel: CancellationToken,
) {
    let mut ticker = tokio::time::interval(interval);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

    loop {
        tokio::select! {
            _ = cancel.cancelled() => break,
            _ = ticker.tick() => {}
            _ = refresh.notified() => {
                ticker.reset();
            }
        }

        let result = tokio::select! {
            _ = cancel.cancelled() => break,
            result = client.fetch_events() => result,
        };

        let update = match result {
            Ok(list) => {
                debug!(count = list.count, "polled event log");
                PollUpdate::Events(list)
            }
            Err(e) => {
                warn!(url = client.base_url(), "failed to load telemetry: {}", e);
                PollUpdate::Failed(e.to_string())
            }
        };

        tokio::select! {
            _ = cancel.cancelled() => break,
            sent = tx.send(update) => {
                if sent.is_err() {
                    break;
                }
            }
        }
    }

    debug!("poller stopped");
}

#[cfg(test)]
mod tests {
    use super::*;
    use cmindx_core::{EventType, Payload, VariantId};

    fn event(session: &str) -> Event {
        Event::new(session, EventType::Pageview, Payload::new(), Some(VariantId::A))
    }

    #[test]
    fn state_starts_loading() {
        let state = PollState::default();
        assert!(state.is_loading());
        assert!(state.snapshot().is_none());
    }

    #[test]
    fn failure_while_loading_stays_loading() {
        let mut state = PollState::default();
        assert!(!state.apply(PollUpdate::Failed("connection refused".into())));
        assert!(state.is_loading());
    }

    #[test]
    fn first_success_moves_to_ready() {
        let mut state = PollState::default();
        assert!(state.apply(PollUpdate::Events(vec![event("s1")].into())));

        let snapshot = state.snapshot().unwrap();
        assert_eq!(snapshot.events.len(), 1);
        assert_eq!(snapshot.summary.total_events, 1);
    }

    #[test]
    fn failure_after_ready_keeps_previous_snapshot() {
        let mut state = PollState::default();
        state.apply(PollUpdate::Events(vec![event("s1"), event("s2")].into()));
        state.apply(PollUpdate::Failed("timeout".into()));

        let snapshot = state.snapshot().unwrap();
        assert_eq!(snapshot.events.len(), 2);
        assert_eq!(snapshot.summary.unique_sessions, 2);
    }

    #[test]
    fn ready_to_ready_replaces_snapshot() {
        let mut state = PollState::default();
        state.apply(PollUpdate::Events(vec![event("s1")].into()));
        state.apply(PollUpdate::Events(EventList::default()));

        assert_eq!(state.snapshot().unwrap().events.len(), 0);
    }

    #[tokio::test]
    async fn failing_server_reports_failure() {
        let client =
            DashboardClient::with_timeout("http://127.0.0.1:9", Duration::from_millis(500))
                .unwrap();
        let mut poller = Poller::spawn(client, Duration::from_secs(60));

        let update = poller.recv().await.unwrap();
        assert!(matches!(update, PollUpdate::Failed(_)));
    }

    #[tokio::test]
    async fn stop_ends_the_task() {
        let client =
            DashboardClient::with_timeout("http://127.0.0.1:9", Duration::from_millis(500))
                .unwrap();
        let mut poller = Poller::spawn(client, Duration::from_millis(10));
        poller.stop();
        assert!(poller.is_stopped());

        // The sender is dropped once the loop exits, closing the channel.
        while poller.recv().await.is_some() {}
    }
}
