//! Telemetry capture for cmindx landing pages.
//!
//! A [`CaptureHook`] represents one visitor session on one variant. It turns
//! page interactions into [`cmindx_core::Event`]s and hands them to a
//! [`Transport`] without ever surfacing delivery failures to the caller.

mod hook;
mod transport;

pub use hook::{
    CaptureConfig, CaptureHook, ClickInput, DEFAULT_QUEUE_CAPACITY, MAX_CLICK_TEXT_CHARS,
    ScrollMetrics, new_session_id,
};
pub use transport::{DEFAULT_TIMEOUT, HttpTransport, SinkTransport, Transport, TransportError};
