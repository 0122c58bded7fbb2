//! Validation of raw event submissions
//!
//! Clients post loosely-typed JSON. [`parse_submission`] turns a request body
//! into an [`Event`] or a typed [`EventError`]. Only structure is checked:
//! field content such as a non-numeric `scrollPercent` or an unknown variant
//! tag is accepted and left for the aggregator to ignore.

use chrono::{DateTime, NaiveDateTime, Utc};
use serde_json::{Map, Value};

use super::types::{Event, EventType, Payload};
use crate::error::EventError;

/// Parse and validate a submitted event body.
///
/// `received_at` stamps events that arrive without a `ts` field.
pub fn parse_submission(body: &[u8], received_at: DateTime<Utc>) -> Result<Event, EventError> {
    let value: Value =
        serde_json::from_slice(body).map_err(|e| EventError::Malformed(e.to_string()))?;
    validate_submission(value, received_at)
}

/// Validate an already-parsed JSON value as an event submission
pub fn validate_submission(value: Value, received_at: DateTime<Utc>) -> Result<Event, EventError> {
    let Value::Object(mut fields) = value else {
        return Err(EventError::Malformed("expected a JSON object".into()));
    };

    let session_id = take_required_string(&mut fields, "sessionId")?;
    let event_type = EventType::parse(&take_required_string(&mut fields, "eventType")?);
    let payload = take_payload(&mut fields)?;

    let timestamp = match fields.remove("ts") {
        None | Some(Value::Null) => received_at,
        Some(Value::String(raw)) => {
            parse_timestamp(&raw).ok_or(EventError::InvalidTimestamp(raw))?
        }
        Some(other) => return Err(EventError::InvalidTimestamp(other.to_string())),
    };

    let variant_id = match fields.remove("variantId") {
        None | Some(Value::Null) => None,
        Some(Value::String(tag)) => Some(tag),
        Some(_) => return Err(EventError::Malformed("variantId must be a string".into())),
    };

    Ok(Event {
        session_id,
        event_type,
        payload,
        timestamp,
        variant_id,
    })
}

/// RFC 3339, or ISO-8601 without an offset read as UTC. Stored in UTC.
fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    if let Ok(ts) = DateTime::parse_from_rfc3339(raw) {
        return Some(ts.with_timezone(&Utc));
    }
    NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f")
        .ok()
        .map(|naive| naive.and_utc())
}

fn take_required_string(
    fields: &mut Map<String, Value>,
    name: &'static str,
) -> Result<String, EventError> {
    match fields.remove(name) {
        Some(Value::String(s)) if !s.trim().is_empty() => Ok(s),
        Some(Value::String(_)) | Some(Value::Null) | None => Err(EventError::MissingField(name)),
        Some(_) => Err(EventError::Malformed(format!("{} must be a string", name))),
    }
}

fn take_payload(fields: &mut Map<String, Value>) -> Result<Payload, EventError> {
    let payload = match fields.remove("payload") {
        None | Some(Value::Null) => return Ok(Payload::new()),
        Some(Value::Object(map)) => map,
        Some(_) => return Err(EventError::InvalidPayload("payload must be an object".into())),
    };

    if let Some((key, _)) = payload
        .iter()
        .find(|(_, v)| matches!(v, Value::Array(_) | Value::Object(_)))
    {
        return Err(EventError::InvalidPayload(format!(
            "field `{}` is not a scalar",
            key
        )));
    }

    Ok(payload)
}
