//! REST API handlers

use std::sync::Arc;

use axum::{
    Json,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use cmindx_core::EventSummary;
use serde::{Deserialize, Serialize};

use super::events::error_response;
use crate::AppState;

/// Health check response
#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    /// Status of the server
    pub status: String,
    /// Server version
    pub version: String,
    /// Seconds since server started
    pub uptime_seconds: i64,
    /// Name of the event sink backend
    pub backend: String,
}

/// Health check endpoint
pub async fn health(State(state): State<Arc<AppState>>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        uptime_seconds: state.uptime_seconds(),
        backend: state.sink.backend().to_string(),
    })
}

/// GET /api/stats - per-variant statistics over the full event log
pub async fn stats(State(state): State<Arc<AppState>>) -> Response {
    match state.sink.list_all().await {
        Ok(list) => Json(EventSummary::from_events(&list.events)).into_response(),
        Err(e) => error_response(
            StatusCode::INTERNAL_SERVER_ERROR,
            e.to_string(),
            "INTERNAL_ERROR",
        ),
    }
}
