//! Event ingestion endpoints

use std::sync::Arc;

use axum::{
    Json,
    body::Bytes,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use chrono::Utc;
use cmindx_core::parse_submission;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::AppState;

/// Response to a successful submission
#[derive(Debug, Serialize, Deserialize)]
pub struct SubmitResponse {
    pub ok: bool,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    pub code: String,
}

pub(crate) fn error_response(status: StatusCode, error: String, code: &str) -> Response {
    (
        status,
        Json(ErrorResponse {
            error,
            code: code.into(),
        }),
    )
        .into_response()
}

/// POST /events
///
/// Validates the body and appends it to the sink. Malformed submissions are
/// rejected with 400 and a machine-readable code.
pub async fn submit_event(State(state): State<Arc<AppState>>, body: Bytes) -> Response {
    let event = match parse_submission(&body, Utc::now()) {
        Ok(event) => event,
        Err(e) => {
            warn!(code = e.code(), "rejected event submission: {}", e);
            return error_response(StatusCode::BAD_REQUEST, e.to_string(), e.code());
        }
    };

    debug!(
        session_id = %event.session_id,
        event_type = %event.event_type,
        variant = event.variant_id.as_deref().unwrap_or("-"),
        "analytics event"
    );

    match state.sink.record(event).await {
        Ok(()) => Json(SubmitResponse { ok: true }).into_response(),
        Err(e) => {
            warn!("failed to record event: {}", e);
            error_response(
                StatusCode::INTERNAL_SERVER_ERROR,
                e.to_string(),
                "INTERNAL_ERROR",
            )
        }
    }
}

/// GET /events
///
/// Returns `{count, events}` with the full history in arrival order.
pub async fn list_events(State(state): State<Arc<AppState>>) -> Response {
    match state.sink.list_all().await {
        Ok(list) => Json(list).into_response(),
        Err(e) => error_response(
            StatusCode::INTERNAL_SERVER_ERROR,
            e.to_string(),
            "INTERNAL_ERROR",
        ),
    }
}
