//! Utility functions module
//! 
//! Signal handling and display formatting shared across the application.

pub mod format;
pub mod signals;

// Re-export main functions
pub use format::{accent_color, timestamp};
pub use signals::shutdown_signal;
