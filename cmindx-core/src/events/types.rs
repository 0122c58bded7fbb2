//! Telemetry event types

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Event payload: flat mapping of field name to scalar JSON value
pub type Payload = Map<String, Value>;

/// Payload key carrying scroll depth on scroll events
pub const SCROLL_PERCENT_KEY: &str = "scrollPercent";

/// One arm of the A/B test
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum VariantId {
    A,
    B,
}

impl VariantId {
    /// Both variants, in reporting order
    pub const ALL: [VariantId; 2] = [VariantId::A, VariantId::B];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::A => "A",
            Self::B => "B",
        }
    }

    /// Parse an exact variant tag. Anything other than "A" or "B" is `None`.
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "A" => Some(Self::A),
            "B" => Some(Self::B),
            _ => None,
        }
    }
}

impl fmt::Display for VariantId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for VariantId {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| format!("unknown variant: {}", s))
    }
}

/// Kind of interaction an event records
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum EventType {
    Pageview,
    Click,
    Scroll,
    /// Any other event name, preserved verbatim
    Other(String),
}

impl EventType {
    pub fn as_str(&self) -> &str {
        match self {
            Self::Pageview => "pageview",
            Self::Click => "click",
            Self::Scroll => "scroll",
            Self::Other(name) => name,
        }
    }

    pub fn parse(s: &str) -> Self {
        match s {
            "pageview" => Self::Pageview,
            "click" => Self::Click,
            "scroll" => Self::Scroll,
            other => Self::Other(other.to_string()),
        }
    }
}

impl From<String> for EventType {
    fn from(s: String) -> Self {
        Self::parse(&s)
    }
}

impl From<EventType> for String {
    fn from(t: EventType) -> Self {
        t.as_str().to_string()
    }
}

impl fmt::Display for EventType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single recorded telemetry event.
///
/// Events are immutable once recorded. `variant_id` keeps whatever tag the
/// client sent; see [`Event::effective_variant`] for how it is bucketed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Event {
    pub session_id: String,
    pub event_type: EventType,
    #[serde(default)]
    pub payload: Payload,
    #[serde(rename = "ts")]
    pub timestamp: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub variant_id: Option<String>,
}

impl Event {
    /// Create an event stamped with the current time
    pub fn new(
        session_id: impl Into<String>,
        event_type: EventType,
        payload: Payload,
        variant: Option<VariantId>,
    ) -> Self {
        Self {
            session_id: session_id.into(),
            event_type,
            payload,
            timestamp: Utc::now(),
            variant_id: variant.map(|v| v.as_str().to_string()),
        }
    }

    /// Variant bucket used for statistics.
    ///
    /// Untagged events count as variant A. Tags other than "A"/"B" yield
    /// `None` and are excluded from both buckets.
    pub fn effective_variant(&self) -> Option<VariantId> {
        match self.variant_id.as_deref() {
            None => Some(VariantId::A),
            Some(tag) => VariantId::parse(tag),
        }
    }

    /// Numeric `scrollPercent` payload value, if present and a JSON number
    pub fn scroll_percent(&self) -> Option<f64> {
        self.payload.get(SCROLL_PERCENT_KEY).and_then(Value::as_f64)
    }

    /// String payload value for `key`
    pub fn payload_str(&self, key: &str) -> Option<&str> {
        self.payload.get(key).and_then(Value::as_str)
    }
}
