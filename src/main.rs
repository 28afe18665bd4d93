//! Turn Clock - A turn-based multiplayer countdown clock for tabletop games
//! 
//! This is the main entry point for the turn-clock server.

use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::info;

use turn_clock::{
    config::Config,
    state::{AppState, Controller},
    api::create_router,
    tasks::spawn_session,
    utils::shutdown_signal,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::parse();

    // Initialize tracing with appropriate log level
    tracing_subscriber::fmt()
        .with_env_filter(format!("turn_clock={},tower_http=info", config.log_level()))
        .init();

    info!("Starting turn-clock server v{}", env!("CARGO_PKG_VERSION"));
    info!("Configuration: host={}, port={}, low_time={}s",
          config.host, config.port, config.low_time_seconds);

    let settings = config.default_settings();
    if let Err(e) = settings.validate() {
        anyhow::bail!("Invalid default session settings: {}", e);
    }

    // The session task owns every timer; handlers only hold its channels
    let controller = Controller::new(settings, config.low_time_seconds);
    let (command_tx, snapshot_rx, session_handle) = spawn_session(controller);

    let state = Arc::new(AppState::new(config.port, config.host.clone(), command_tx, snapshot_rx));

    // Create HTTP router with all endpoints
    let app = create_router(Arc::clone(&state));

    // Bind to the specified address
    let addr = config.address();
    let listener = TcpListener::bind(&addr).await?;

    info!("Server running on http://{}", addr);
    info!("Endpoints:");
    info!("  POST /session             - Submit settings and start a session");
    info!("  POST /session/reset       - Stop all timers and return to settings");
    info!("  GET  /settings            - Current session settings");
    info!("  POST /timers/:id/toggle   - Start or stop a player's timer");
    info!("  POST /timers/:id/start    - Start a player's timer");
    info!("  POST /timers/:id/stop     - Stop a player's timer");
    info!("  POST /timers/:id/health   - Adjust a player's health points");
    info!("  POST /timers/stop-all     - Stop all timers");
    info!("  POST /timers/increment    - Add or remove time on all timers");
    info!("  GET  /status              - Current session state");
    info!("  GET  /health              - Health check");

    // Setup graceful shutdown
    let server = axum::serve(listener, app);

    tokio::select! {
        result = server => {
            if let Err(e) = result {
                tracing::error!("Server error: {}", e);
            }
        }
        _ = shutdown_signal() => {
            info!("Shutdown signal received");
        }
    }

    // Nothing is persisted, the session ends with the server
    session_handle.abort();

    info!("Server shutdown complete");
    Ok(())
}
