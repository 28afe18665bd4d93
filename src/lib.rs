//! Turn Clock - A turn-based multiplayer countdown clock for tabletop games
//! 
//! This library provides a grid of per-player countdown timers of which at
//! most one runs at a time, with optional bonus time per turn and health
//! points, driven by a single session task and exposed over HTTP.

pub mod config;
pub mod state;
pub mod api;
pub mod tasks;
pub mod utils;

// Re-export commonly used types
pub use config::Config;
pub use state::{AppState, Controller, TimerSet};
pub use api::create_router;
pub use tasks::spawn_session;
pub use utils::signals::shutdown_signal;
