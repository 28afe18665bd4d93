//! Background tasks module
//! 
//! This module contains the session task that owns the timer grid.

pub mod session;

// Re-export main functions
pub use session::{session_task, spawn_session, COMMAND_BUFFER};
