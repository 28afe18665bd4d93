//! HTTP endpoint handlers

use std::sync::Arc;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::Json,
};
use tracing::{error, info, warn};

use crate::state::{Action, AppState, CommandError, SessionSettings, SettingsUpdate};
use super::{
    requests::{HealthRequest, IncrementRequest},
    responses::{ApiResponse, HealthResponse, StatusResponse},
};

/// Map a rejected command onto an HTTP status
fn status_for(error: &CommandError) -> StatusCode {
    match error {
        CommandError::NoSession | CommandError::SessionActive => StatusCode::CONFLICT,
        CommandError::UnknownTimer(_) => StatusCode::NOT_FOUND,
        CommandError::InvalidSettings(_) => StatusCode::UNPROCESSABLE_ENTITY,
        CommandError::SessionClosed => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

/// Forward an action to the session task and wrap the outcome
async fn run_action(
    state: &AppState,
    action: Action,
    message: String,
) -> Result<Json<ApiResponse>, StatusCode> {
    match state.dispatch(action).await {
        Ok(session) => {
            info!("{}", message);
            Ok(Json(ApiResponse::ok(message, session)))
        }
        Err(e @ CommandError::SessionClosed) => {
            error!("Failed to reach session task: {}", e);
            Err(status_for(&e))
        }
        Err(e) => {
            warn!("Request rejected: {}", e);
            Err(status_for(&e))
        }
    }
}

/// Handle POST /session - Submit settings and show the timer grid
pub async fn submit_handler(
    State(state): State<Arc<AppState>>,
    update: Option<Json<SettingsUpdate>>,
) -> Result<Json<ApiResponse>, StatusCode> {
    let update = update.map(|Json(update)| update).unwrap_or_default();
    run_action(&state, Action::Submit(update), "Session started".to_string()).await
}

/// Handle POST /session/reset - Stop all timers and return to the settings screen
pub async fn reset_handler(State(state): State<Arc<AppState>>) -> Result<Json<ApiResponse>, StatusCode> {
    run_action(&state, Action::Reset, "Session reset".to_string()).await
}

/// Handle GET /settings - Return the settings the next session starts with
pub async fn settings_handler(State(state): State<Arc<AppState>>) -> Json<SessionSettings> {
    Json(state.get_session().settings)
}

/// Handle POST /timers/:id/start
pub async fn start_handler(
    State(state): State<Arc<AppState>>,
    Path(id): Path<usize>,
) -> Result<Json<ApiResponse>, StatusCode> {
    run_action(&state, Action::Start(id), format!("Timer {} started", id)).await
}

/// Handle POST /timers/:id/stop
pub async fn stop_handler(
    State(state): State<Arc<AppState>>,
    Path(id): Path<usize>,
) -> Result<Json<ApiResponse>, StatusCode> {
    run_action(&state, Action::Stop(id), format!("Timer {} stopped", id)).await
}

/// Handle POST /timers/:id/toggle - The tap on a player's clock
pub async fn toggle_handler(
    State(state): State<Arc<AppState>>,
    Path(id): Path<usize>,
) -> Result<Json<ApiResponse>, StatusCode> {
    run_action(&state, Action::Toggle(id), format!("Timer {} toggled", id)).await
}

/// Handle POST /timers/:id/health - Adjust a player's health points
pub async fn health_points_handler(
    State(state): State<Arc<AppState>>,
    Path(id): Path<usize>,
    Json(request): Json<HealthRequest>,
) -> Result<Json<ApiResponse>, StatusCode> {
    run_action(
        &state,
        Action::AdjustHealth { id, delta: request.delta },
        format!("Timer {} health adjusted by {}", id, request.delta),
    )
    .await
}

/// Handle POST /timers/stop-all
pub async fn stop_all_handler(State(state): State<Arc<AppState>>) -> Result<Json<ApiResponse>, StatusCode> {
    run_action(&state, Action::StopAll, "All timers stopped".to_string()).await
}

/// Handle POST /timers/increment - Add or remove time on every clock
pub async fn increment_handler(
    State(state): State<Arc<AppState>>,
    Json(request): Json<IncrementRequest>,
) -> Result<Json<ApiResponse>, StatusCode> {
    run_action(
        &state,
        Action::IncrementAll(request.seconds),
        format!("All timers adjusted by {}s", request.seconds),
    )
    .await
}

/// Handle GET /status - Return the current session and server status
pub async fn status_handler(State(state): State<Arc<AppState>>) -> Json<StatusResponse> {
    let (last_action, last_action_time) = state.get_last_action();

    Json(StatusResponse {
        session: state.get_session(),
        uptime: state.get_uptime(),
        port: state.port,
        host: state.host.clone(),
        last_action,
        last_action_time,
    })
}

/// Handle GET /health - Health check endpoint
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse::ok())
}
