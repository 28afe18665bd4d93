//! State management module
//! 
//! The timer core (timers, the grid and the root controller) together with
//! the shared handle request handlers use to reach it.

pub mod app_state;
pub mod command;
pub mod controller;
pub mod error;
pub mod settings;
pub mod snapshot;
pub mod timer;
pub mod timer_set;

// Re-export main types
pub use app_state::AppState;
pub use command::{Action, Command};
pub use controller::{Controller, Screen};
pub use error::CommandError;
pub use settings::{SessionSettings, SettingsUpdate};
pub use snapshot::{ScreenKind, SessionSnapshot, TimerSnapshot};
pub use timer::{Timer, TimerEvent, TimerPhase, MAX_REMAINING_SECONDS};
pub use timer_set::TimerSet;
