//! HTTP API module
//! 
//! This module contains all HTTP endpoint handlers and request/response structures.

pub mod handlers;
pub mod requests;
pub mod responses;

use std::sync::Arc;
use axum::{
    routing::{get, post},
    Router,
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::state::AppState;
use handlers::*;

/// Create the HTTP router with all endpoints
pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/session", post(submit_handler))
        .route("/session/reset", post(reset_handler))
        .route("/settings", get(settings_handler))
        .route("/timers/stop-all", post(stop_all_handler))
        .route("/timers/increment", post(increment_handler))
        .route("/timers/:id/start", post(start_handler))
        .route("/timers/:id/stop", post(stop_handler))
        .route("/timers/:id/toggle", post(toggle_handler))
        .route("/timers/:id/health", post(health_points_handler))
        .route("/status", get(status_handler))
        .route("/health", get(health_handler))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
