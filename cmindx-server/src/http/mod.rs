//! HTTP server module

mod api;
mod events;
mod landing;

use std::sync::Arc;

use axum::{
    Router,
    routing::{get, post},
};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::AppState;

pub use api::HealthResponse;
pub use events::{ErrorResponse, SubmitResponse};
pub use landing::render_landing;

/// Create the HTTP router with all routes configured
///
/// `/api/analytics` is kept as an alias of `/events` for older landing pages.
pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(landing::landing))
        .route("/events", post(events::submit_event).get(events::list_events))
        .route(
            "/api/analytics",
            post(events::submit_event).get(events::list_events),
        )
        .route("/api/stats", get(api::stats))
        .route("/api/health", get(api::health))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
