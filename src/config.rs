//! Configuration and CLI argument handling

use clap::Parser;

use crate::state::SessionSettings;

/// CLI argument parsing structure
#[derive(Debug, Parser)]
#[command(name = "turn-clock")]
#[command(about = "A turn-based multiplayer countdown clock for tabletop games")]
#[command(version)]
pub struct Config {
    /// Port to bind the server to
    #[arg(short, long, default_value = "20554")]
    pub port: u16,

    /// Host address to bind to
    #[arg(long, default_value = "0.0.0.0")]
    pub host: String,

    /// Enable verbose logging
    #[arg(short, long)]
    pub verbose: bool,

    /// A running timer with at most this many seconds left is shown as low on time
    #[arg(long = "low-time", default_value = "10")]
    pub low_time_seconds: u32,

    /// Default number of players
    #[arg(long, default_value = "4")]
    pub players: usize,

    /// Default base time per player in minutes
    #[arg(short, long, default_value = "15")]
    pub minutes: u32,

    /// Add bonus time every time a timer is started
    #[arg(short, long)]
    pub increment: bool,

    /// Default bonus time in seconds
    #[arg(long, default_value = "30")]
    pub increment_seconds: u32,

    /// Track health points per player
    #[arg(long)]
    pub health: bool,

    /// Default starting health points
    #[arg(long, default_value = "40")]
    pub health_points: i64,
}

impl Config {
    /// Parse configuration from command line arguments
    pub fn parse() -> Self {
        Parser::parse()
    }

    /// Get the server address as a formatted string
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Get the appropriate log level based on verbose flag
    pub fn log_level(&self) -> &'static str {
        if self.verbose { "debug" } else { "info" }
    }

    /// Settings the settings screen starts with
    pub fn default_settings(&self) -> SessionSettings {
        SessionSettings {
            players: self.players,
            minutes: self.minutes,
            increment_on_start: self.increment,
            increment_seconds: self.increment_seconds,
            shows_health: self.health,
            health_points: self.health_points,
        }
    }
}
