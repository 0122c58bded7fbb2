//! A/B variant statistics
//!
//! Pure reduction of a raw event list into per-variant metrics. Recomputed
//! on every dashboard poll; nothing here is persisted.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::events::{Event, EventType, VariantId};

/// Aggregated metrics for one variant
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VariantStats {
    pub variant_id: VariantId,
    pub total_events: usize,
    /// Distinct session ids within this variant
    pub sessions: usize,
    pub scroll_events: usize,
    /// Mean numeric `scrollPercent` over scroll events; `None` when there is
    /// no numeric sample (distinct from an average of zero)
    pub avg_scroll_percent: Option<f64>,
    pub click_events: usize,
}

impl VariantStats {
    /// Zero-valued record for a variant with no events
    pub fn empty(variant_id: VariantId) -> Self {
        Self {
            variant_id,
            total_events: 0,
            sessions: 0,
            scroll_events: 0,
            avg_scroll_percent: None,
            click_events: 0,
        }
    }

    fn from_partition(variant_id: VariantId, events: &[&Event]) -> Self {
        if events.is_empty() {
            return Self::empty(variant_id);
        }

        let sessions: HashSet<&str> = events.iter().map(|e| e.session_id.as_str()).collect();

        let mut scroll_events = 0;
        let mut click_events = 0;
        let mut scroll_sum = 0.0;
        let mut scroll_samples = 0usize;

        for event in events {
            match event.event_type {
                EventType::Scroll => {
                    scroll_events += 1;
                    if let Some(percent) = event.scroll_percent() {
                        scroll_sum += percent;
                        scroll_samples += 1;
                    }
                }
                EventType::Click => click_events += 1,
                _ => {}
            }
        }

        let avg_scroll_percent =
            (scroll_samples > 0).then(|| scroll_sum / scroll_samples as f64);

        Self {
            variant_id,
            total_events: events.len(),
            sessions: sessions.len(),
            scroll_events,
            avg_scroll_percent,
            click_events,
        }
    }
}

/// Reduce events into exactly two records, A then B.
///
/// Untagged events are counted under A; tags other than A/B are dropped.
pub fn compute_variant_stats(events: &[Event]) -> [VariantStats; 2] {
    VariantId::ALL.map(|variant| {
        let partition: Vec<&Event> = events
            .iter()
            .filter(|event| event.effective_variant() == Some(variant))
            .collect();
        VariantStats::from_partition(variant, &partition)
    })
}

/// Pick the variant with the strictly higher average scroll depth.
///
/// A tie, or a missing average on either side, yields no winner.
pub fn pick_winner(first: &VariantStats, second: &VariantStats) -> Option<VariantId> {
    let (a, b) = (first.avg_scroll_percent?, second.avg_scroll_percent?);
    if a > b {
        Some(first.variant_id)
    } else if b > a {
        Some(second.variant_id)
    } else {
        None
    }
}

/// Dashboard-level view over the whole event log
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventSummary {
    /// All events, including ones whose variant tag was dropped
    pub total_events: usize,
    pub unique_sessions: usize,
    pub variants: [VariantStats; 2],
    pub winner: Option<VariantId>,
}

impl EventSummary {
    pub fn from_events(events: &[Event]) -> Self {
        let variants = compute_variant_stats(events);
        let winner = pick_winner(&variants[0], &variants[1]);
        let unique_sessions = events
            .iter()
            .map(|e| e.session_id.as_str())
            .collect::<HashSet<_>>()
            .len();

        Self {
            total_events: events.len(),
            unique_sessions,
            variants,
            winner,
        }
    }

    /// Stats for one variant
    pub fn variant(&self, id: VariantId) -> &VariantStats {
        match id {
            VariantId::A => &self.variants[0],
            VariantId::B => &self.variants[1],
        }
    }
}

impl Default for EventSummary {
    fn default() -> Self {
        Self::from_events(&[])
    }
}
