//! Event model for cmindx telemetry

pub mod submission;
pub mod types;

pub use submission::{parse_submission, validate_submission};
pub use types::{Event, EventType, Payload, SCROLL_PERCENT_KEY, VariantId};
