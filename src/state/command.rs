//! Commands sent from request handlers to the session task

use tokio::sync::oneshot;

use super::{CommandError, SessionSnapshot, SettingsUpdate};

/// A user intent forwarded by the presentation layer
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// Leave the settings screen and start a session
    Submit(SettingsUpdate),
    /// Stop every timer and return to the settings screen
    Reset,
    Start(usize),
    Stop(usize),
    Toggle(usize),
    StopAll,
    /// Add (or with a negative value, remove) seconds on every timer
    IncrementAll(i64),
    AdjustHealth { id: usize, delta: i64 },
}

impl Action {
    /// Short label used for last-action tracking
    pub fn label(&self) -> String {
        match self {
            Action::Submit(_) => "submit".to_string(),
            Action::Reset => "reset".to_string(),
            Action::Start(id) => format!("start:{}", id),
            Action::Stop(id) => format!("stop:{}", id),
            Action::Toggle(id) => format!("toggle:{}", id),
            Action::StopAll => "stop-all".to_string(),
            Action::IncrementAll(seconds) => format!("increment:{:+}", seconds),
            Action::AdjustHealth { id, delta } => format!("health:{}:{:+}", id, delta),
        }
    }
}

/// An action together with the channel its outcome is reported on
#[derive(Debug)]
pub struct Command {
    pub action: Action,
    pub reply: oneshot::Sender<Result<SessionSnapshot, CommandError>>,
}
