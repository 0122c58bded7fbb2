//! cmindx-core: Core library for cmindx landing page telemetry
//!
//! This crate provides the pieces shared by the server, capture client and
//! dashboard:
//!
//! - **Event model** - [`Event`], [`EventType`] and [`VariantId`], plus
//!   [`parse_submission`] for validating raw client submissions
//! - **Sinks** - the [`EventSink`] trait with [`MemoryEventSink`] and
//!   [`TursoEventSink`] adapters
//! - **Statistics** - [`compute_variant_stats`] and [`pick_winner`], the pure
//!   reduction behind the A/B dashboard
//!
//! # Quick Start
//!
//! ```
//! use cmindx_core::{Event, EventType, Payload, VariantId, compute_variant_stats};
//!
//! let events = vec![Event::new("sess-1", EventType::Click, Payload::new(), Some(VariantId::B))];
//! let [a, b] = compute_variant_stats(&events);
//! assert_eq!(a.total_events, 0);
//! assert_eq!(b.click_events, 1);
//! ```
//!
//! # Data flow
//!
//! ```text
//! capture hook ──POST /events──▶ EventSink (append-only)
//!                                     │ list_all
//!                                     ▼
//!                         compute_variant_stats ──▶ dashboard
//! ```

pub mod error;
pub mod events;
pub mod sink;
pub mod stats;
pub mod variants;

pub use error::EventError;
pub use events::{
    Event, EventType, Payload, SCROLL_PERCENT_KEY, VariantId, parse_submission,
    validate_submission,
};
pub use sink::{EventList, EventSink, MemoryEventSink, SinkError, TursoEventSink};
pub use stats::{EventSummary, VariantStats, compute_variant_stats, pick_winner};
pub use variants::{VariantAssignment, VariantCopy};
