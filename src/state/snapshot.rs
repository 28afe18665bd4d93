//! Read models published to the presentation layer

use serde::{Deserialize, Serialize};

use super::{SessionSettings, TimerPhase};

/// Which screen the presentation layer should show
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScreenKind {
    Settings,
    Timers,
}

/// Render state of one timer
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimerSnapshot {
    pub id: usize,
    pub remaining_seconds: u32,
    /// Remaining time as `m:ss`
    pub timestamp: String,
    pub is_running: bool,
    pub phase: TimerPhase,
    pub accent: String,
    pub health_points: Option<i64>,
}

/// Render state of the whole application
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionSnapshot {
    pub screen: ScreenKind,
    pub settings: SessionSettings,
    pub active_timer: Option<usize>,
    pub timers: Vec<TimerSnapshot>,
}

impl SessionSnapshot {
    pub fn timer(&self, id: usize) -> Option<&TimerSnapshot> {
        self.timers.get(id)
    }

    pub fn running_count(&self) -> usize {
        self.timers.iter().filter(|timer| timer.is_running).count()
    }
}
