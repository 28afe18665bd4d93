//! Session settings chosen before the timer grid is shown

use std::ops::RangeInclusive;
use serde::{Deserialize, Serialize};

use super::CommandError;

pub const PLAYERS: RangeInclusive<usize> = 2..=10;
pub const MINUTES: RangeInclusive<u32> = 1..=360;
pub const INCREMENT_SECONDS: RangeInclusive<u32> = 1..=600;
pub const HEALTH_POINTS: RangeInclusive<i64> = 1..=10_000;

/// Everything needed to build a timer grid
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionSettings {
    /// Number of players, one timer each
    pub players: usize,
    /// Base time per player in minutes
    pub minutes: u32,
    /// Whether bonus time is added every time a timer starts
    pub increment_on_start: bool,
    /// Bonus time in seconds
    pub increment_seconds: u32,
    /// Whether health points are tracked
    pub shows_health: bool,
    /// Starting health points
    pub health_points: i64,
}

impl SessionSettings {
    pub fn initial_seconds(&self) -> u32 {
        self.minutes.saturating_mul(60)
    }

    /// Check every value against the ranges offered to players
    pub fn validate(&self) -> Result<(), CommandError> {
        if !PLAYERS.contains(&self.players) {
            return Err(out_of_range("players", self.players, &PLAYERS));
        }
        if !MINUTES.contains(&self.minutes) {
            return Err(out_of_range("minutes", self.minutes, &MINUTES));
        }
        if self.increment_on_start && !INCREMENT_SECONDS.contains(&self.increment_seconds) {
            return Err(out_of_range("increment_seconds", self.increment_seconds, &INCREMENT_SECONDS));
        }
        if self.shows_health && !HEALTH_POINTS.contains(&self.health_points) {
            return Err(out_of_range("health_points", self.health_points, &HEALTH_POINTS));
        }
        Ok(())
    }

    /// Apply a partial update on top of these settings
    pub fn merged(&self, update: &SettingsUpdate) -> Self {
        Self {
            players: update.players.unwrap_or(self.players),
            minutes: update.minutes.unwrap_or(self.minutes),
            increment_on_start: update.increment_on_start.unwrap_or(self.increment_on_start),
            increment_seconds: update.increment_seconds.unwrap_or(self.increment_seconds),
            shows_health: update.shows_health.unwrap_or(self.shows_health),
            health_points: update.health_points.unwrap_or(self.health_points),
        }
    }
}

impl Default for SessionSettings {
    fn default() -> Self {
        Self {
            players: 4,
            minutes: 15,
            increment_on_start: false,
            increment_seconds: 30,
            shows_health: false,
            health_points: 40,
        }
    }
}

/// Partial settings as submitted by a client; missing fields keep their value
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SettingsUpdate {
    pub players: Option<usize>,
    pub minutes: Option<u32>,
    pub increment_on_start: Option<bool>,
    pub increment_seconds: Option<u32>,
    pub shows_health: Option<bool>,
    pub health_points: Option<i64>,
}

fn out_of_range<T: std::fmt::Display>(field: &str, value: T, range: &RangeInclusive<T>) -> CommandError {
    CommandError::InvalidSettings(format!(
        "{} must be between {} and {}, got {}",
        field,
        range.start(),
        range.end(),
        value
    ))
}
