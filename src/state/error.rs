//! Errors reported back to whoever issued a command

use thiserror::Error;

/// Reasons a command could not be carried out
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CommandError {
    #[error("no session is running, submit settings first")]
    NoSession,

    #[error("a session is already running, reset it first")]
    SessionActive,

    #[error("there is no timer with id {0}")]
    UnknownTimer(usize),

    #[error("invalid settings: {0}")]
    InvalidSettings(String),

    #[error("the session task is not running")]
    SessionClosed,
}
