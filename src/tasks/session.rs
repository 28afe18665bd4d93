//! Session task: the single event loop that owns the controller

use tokio::{
    sync::{mpsc, watch},
    task::JoinHandle,
};
use tracing::{debug, info, warn};

use crate::state::{Command, Controller, SessionSnapshot};

/// Capacity of the command channel
pub const COMMAND_BUFFER: usize = 32;

/// Spawn the session task and return the channels used to talk to it
pub fn spawn_session(
    controller: Controller,
) -> (mpsc::Sender<Command>, watch::Receiver<SessionSnapshot>, JoinHandle<()>) {
    let (command_tx, command_rx) = mpsc::channel(COMMAND_BUFFER);
    let (snapshot_tx, snapshot_rx) = watch::channel(controller.snapshot());

    let handle = tokio::spawn(session_task(controller, command_rx, snapshot_tx));

    (command_tx, snapshot_rx, handle)
}

/// Apply commands and ticks one at a time, publishing the state after each.
///
/// Commands and ticks are handled on this task only, so a stop can never
/// race with the decrement of the timer it stops.
pub async fn session_task(
    mut controller: Controller,
    mut command_rx: mpsc::Receiver<Command>,
    snapshot_tx: watch::Sender<SessionSnapshot>,
) {
    info!("Starting session task");

    loop {
        tokio::select! {
            command = command_rx.recv() => {
                let Some(Command { action, reply }) = command else {
                    info!("All command senders dropped, stopping session task");
                    break;
                };

                debug!("Session task received action: {:?}", action);
                let result = controller.apply(action);
                if let Err(e) = &result {
                    warn!("Action rejected: {}", e);
                }

                let snapshot = controller.snapshot();
                snapshot_tx.send_replace(snapshot.clone());

                if reply.send(result.map(|()| snapshot)).is_err() {
                    debug!("Command issuer went away before the reply was sent");
                }
            }

            id = controller.next_tick() => {
                controller.tick(id);
                let snapshot = controller.snapshot();
                if let Some(timer) = snapshot.timer(id) {
                    debug!("Timer {} at {}", id, timer.timestamp);
                }
                snapshot_tx.send_replace(snapshot);
            }
        }
    }
}
