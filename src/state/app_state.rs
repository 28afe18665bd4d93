//! Shared handle used by request handlers to reach the session task

use std::{
    sync::{Arc, Mutex},
    time::Instant,
};
use chrono::{DateTime, Utc};
use tokio::sync::{mpsc, oneshot, watch};
use tracing::{info, warn};

use super::{Action, Command, CommandError, SessionSnapshot};

/// Main application state shared by all handlers
#[derive(Debug)]
pub struct AppState {
    /// Channel into the session task
    pub command_tx: mpsc::Sender<Command>,
    /// Latest state published by the session task
    pub snapshot_rx: watch::Receiver<SessionSnapshot>,
    /// Server metadata
    pub start_time: Instant,
    pub port: u16,
    pub host: String,
    /// Last action tracking
    pub last_action: Arc<Mutex<Option<String>>>,
    pub last_action_time: Arc<Mutex<Option<DateTime<Utc>>>>,
}

impl AppState {
    /// Create a new AppState connected to a running session task
    pub fn new(
        port: u16,
        host: String,
        command_tx: mpsc::Sender<Command>,
        snapshot_rx: watch::Receiver<SessionSnapshot>,
    ) -> Self {
        Self {
            command_tx,
            snapshot_rx,
            start_time: Instant::now(),
            port,
            host,
            last_action: Arc::new(Mutex::new(None)),
            last_action_time: Arc::new(Mutex::new(None)),
        }
    }

    /// Send an action to the session task and wait for the resulting state
    pub async fn dispatch(&self, action: Action) -> Result<SessionSnapshot, CommandError> {
        let label = action.label();
        info!("Dispatching action: {}", label);

        let (reply, reply_rx) = oneshot::channel();
        self.command_tx
            .send(Command { action, reply })
            .await
            .map_err(|_| CommandError::SessionClosed)?;

        let snapshot = reply_rx.await.map_err(|_| CommandError::SessionClosed)??;
        self.record_action(label);
        Ok(snapshot)
    }

    fn record_action(&self, label: String) {
        match self.last_action.lock() {
            Ok(mut last_action) => *last_action = Some(label),
            Err(e) => warn!("Failed to lock last action: {}", e),
        }
        match self.last_action_time.lock() {
            Ok(mut last_time) => *last_time = Some(Utc::now()),
            Err(e) => warn!("Failed to lock last action time: {}", e),
        }
    }

    /// Get the most recently published session state
    pub fn get_session(&self) -> SessionSnapshot {
        self.snapshot_rx.borrow().clone()
    }

    /// Calculate server uptime as a formatted string
    pub fn get_uptime(&self) -> String {
        let duration = self.start_time.elapsed();
        let hours = duration.as_secs() / 3600;
        let minutes = (duration.as_secs() % 3600) / 60;
        let seconds = duration.as_secs() % 60;

        if hours > 0 {
            format!("{}h {}m {}s", hours, minutes, seconds)
        } else if minutes > 0 {
            format!("{}m {}s", minutes, seconds)
        } else {
            format!("{}s", seconds)
        }
    }

    /// Get last action information
    pub fn get_last_action(&self) -> (Option<String>, Option<DateTime<Utc>>) {
        let last_action = self.last_action.lock().ok().and_then(|a| a.clone());
        let last_action_time = self.last_action_time.lock().ok().and_then(|t| *t);
        (last_action, last_action_time)
    }
}
