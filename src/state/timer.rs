//! Per-player countdown timer

use std::time::Duration;
use futures::future::pending;
use serde::{Deserialize, Serialize};
use tokio::time::{interval_at, Instant, Interval, MissedTickBehavior};
use tracing::debug;

use crate::utils::format::{accent_color, timestamp};
use super::snapshot::TimerSnapshot;

/// Upper bound for the time on a clock: 24 hours
pub const MAX_REMAINING_SECONDS: u32 = 24 * 60 * 60;

/// How often a running timer loses one second
pub const TICK_PERIOD: Duration = Duration::from_secs(1);

/// Events a timer emits towards its owner
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerEvent {
    /// The timer is about to start; every other timer has to stop first
    Starting(usize),
    /// The timer ran down to zero and stopped itself
    Finished(usize),
}

/// Derived visual state of a timer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TimerPhase {
    Idle,
    Running,
    LowTime,
    Finished,
}

/// A single player's countdown.
///
/// The timer is running exactly while it owns a ticker. Dropping the ticker
/// is the cancellation, so no decrement can be delivered after `stop`.
#[derive(Debug)]
pub struct Timer {
    id: usize,
    remaining_seconds: u32,
    increment_on_start: bool,
    increment_seconds: u32,
    health_points: Option<i64>,
    ticker: Option<Interval>,
}

impl Timer {
    /// Create a stopped timer
    pub fn new(
        id: usize,
        remaining_seconds: u32,
        increment_on_start: bool,
        increment_seconds: u32,
        health_points: Option<i64>,
    ) -> Self {
        Self {
            id,
            remaining_seconds: remaining_seconds.min(MAX_REMAINING_SECONDS),
            increment_on_start,
            increment_seconds,
            health_points,
            ticker: None,
        }
    }

    pub fn id(&self) -> usize {
        self.id
    }

    pub fn remaining_seconds(&self) -> u32 {
        self.remaining_seconds
    }

    pub fn is_running(&self) -> bool {
        self.ticker.is_some()
    }

    pub fn health_points(&self) -> Option<i64> {
        self.health_points
    }

    /// Out of time and not counting down
    pub fn is_finished(&self) -> bool {
        self.remaining_seconds == 0 && !self.is_running()
    }

    /// The event a `start` would emit, or `None` if the timer already runs.
    ///
    /// Owners must handle it before calling `start`.
    pub fn starting(&self) -> Option<TimerEvent> {
        if self.is_running() {
            None
        } else {
            Some(TimerEvent::Starting(self.id))
        }
    }

    /// Apply the bonus time, if any, and begin counting down
    pub(super) fn start(&mut self) {
        if self.is_running() {
            return;
        }

        if self.increment_on_start {
            self.try_increment(i64::from(self.increment_seconds));
        }

        // First decrement lands one full period after the start
        let mut ticker = interval_at(Instant::now() + TICK_PERIOD, TICK_PERIOD);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Burst);
        self.ticker = Some(ticker);

        debug!("Timer {} started with {}s on the clock", self.id, self.remaining_seconds);
    }

    /// Stop counting down. Stopping a stopped timer does nothing.
    pub fn stop(&mut self) {
        if self.ticker.take().is_some() {
            debug!("Timer {} stopped with {}s left", self.id, self.remaining_seconds);
        }
    }

    /// Stop if running, start otherwise
    pub(super) fn toggle(&mut self) {
        if self.is_running() {
            self.stop();
        } else {
            self.start();
        }
    }

    /// Add `delta` seconds if the result stays within `[0, MAX_REMAINING_SECONDS]`.
    ///
    /// Out of range requests are dropped as a whole, never clamped.
    pub fn try_increment(&mut self, delta: i64) {
        let sum = i64::from(self.remaining_seconds).checked_add(delta);

        match sum.and_then(|sum| u32::try_from(sum).ok()) {
            Some(seconds) if seconds <= MAX_REMAINING_SECONDS => self.remaining_seconds = seconds,
            _ => debug!(
                "Timer {}: ignoring increment of {}s from {}s, out of bounds",
                self.id, delta, self.remaining_seconds
            ),
        }
    }

    /// Change the health points. No-op when health is not tracked.
    pub fn adjust_health(&mut self, delta: i64) {
        if let Some(health) = self.health_points.as_mut() {
            *health = health.saturating_add(delta);
        }
    }

    /// Resolves when the next second has elapsed. Never resolves while stopped.
    pub async fn next_tick(&mut self) {
        match self.ticker.as_mut() {
            Some(ticker) => {
                ticker.tick().await;
            }
            None => pending::<()>().await,
        }
    }

    /// Account for one elapsed second
    pub fn tick(&mut self) -> Option<TimerEvent> {
        if !self.is_running() {
            return None;
        }

        self.remaining_seconds = self.remaining_seconds.saturating_sub(1);

        if self.remaining_seconds == 0 {
            self.stop();
            Some(TimerEvent::Finished(self.id))
        } else {
            None
        }
    }

    pub fn phase(&self, low_time_seconds: u32) -> TimerPhase {
        match (self.is_running(), self.remaining_seconds) {
            (false, 0) => TimerPhase::Finished,
            (false, _) => TimerPhase::Idle,
            (true, remaining) if remaining <= low_time_seconds => TimerPhase::LowTime,
            (true, _) => TimerPhase::Running,
        }
    }

    pub fn snapshot(&self, low_time_seconds: u32) -> TimerSnapshot {
        TimerSnapshot {
            id: self.id,
            remaining_seconds: self.remaining_seconds,
            timestamp: timestamp(self.remaining_seconds),
            is_running: self.is_running(),
            phase: self.phase(low_time_seconds),
            accent: accent_color(self.id).to_string(),
            health_points: self.health_points,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::time::timeout;

    fn timer(seconds: u32) -> Timer {
        Timer::new(0, seconds, false, 0, None)
    }

    #[test]
    fn increment_below_zero_is_rejected() {
        let mut timer = timer(5);
        timer.try_increment(-10);
        assert_eq!(timer.remaining_seconds(), 5);
    }

    #[test]
    fn increment_above_a_day_is_rejected() {
        let mut timer = timer(MAX_REMAINING_SECONDS);
        timer.try_increment(1);
        assert_eq!(timer.remaining_seconds(), MAX_REMAINING_SECONDS);
    }

    #[test]
    fn increment_overflowing_i64_is_rejected() {
        let mut timer = timer(100);
        timer.try_increment(i64::MAX);
        assert_eq!(timer.remaining_seconds(), 100);

        timer.try_increment(i64::MIN);
        assert_eq!(timer.remaining_seconds(), 100);

        timer.try_increment(-1);
        assert_eq!(timer.remaining_seconds(), 99);
    }

    #[test]
    fn increment_to_the_exact_bounds_is_applied() {
        let mut timer = timer(5);
        timer.try_increment(-5);
        assert_eq!(timer.remaining_seconds(), 0);

        timer.try_increment(i64::from(MAX_REMAINING_SECONDS));
        assert_eq!(timer.remaining_seconds(), MAX_REMAINING_SECONDS);
    }

    #[test]
    fn health_is_unconstrained() {
        let mut timer = Timer::new(3, 60, false, 0, Some(4));
        timer.adjust_health(-10);
        assert_eq!(timer.health_points(), Some(-6));

        let mut untracked = Timer::new(3, 60, false, 0, None);
        untracked.adjust_health(5);
        assert_eq!(untracked.health_points(), None);
    }

    #[test]
    fn zero_seconds_and_stopped_is_finished() {
        let timer = timer(0);
        assert!(timer.is_finished());
        assert_eq!(timer.phase(10), TimerPhase::Finished);
        assert_eq!(self::timer(11).phase(10), TimerPhase::Idle);
    }

    #[tokio::test(start_paused = true)]
    async fn start_applies_bonus_before_counting() {
        let mut timer = Timer::new(0, 100, true, 30, None);
        timer.start();

        assert!(timer.is_running());
        assert_eq!(timer.remaining_seconds(), 130);
    }

    #[tokio::test(start_paused = true)]
    async fn start_twice_applies_bonus_once() {
        let mut timer = Timer::new(0, 100, true, 30, None);
        assert!(timer.starting().is_some());
        timer.start();
        assert!(timer.starting().is_none());
        timer.start();

        assert_eq!(timer.remaining_seconds(), 130);
    }

    #[tokio::test(start_paused = true)]
    async fn bonus_is_dropped_when_it_would_exceed_a_day() {
        let mut timer = Timer::new(0, MAX_REMAINING_SECONDS - 10, true, 30, None);
        timer.start();
        assert_eq!(timer.remaining_seconds(), MAX_REMAINING_SECONDS - 10);
    }

    #[tokio::test(start_paused = true)]
    async fn running_timer_loses_one_second_per_tick() {
        let mut timer = timer(10);
        timer.start();

        for _ in 0..3 {
            timer.next_tick().await;
            assert_eq!(timer.tick(), None);
        }

        assert_eq!(timer.remaining_seconds(), 7);
        assert_eq!(timer.phase(10), TimerPhase::LowTime);
        assert_eq!(timer.phase(5), TimerPhase::Running);
    }

    #[tokio::test(start_paused = true)]
    async fn first_tick_waits_a_full_second() {
        let mut timer = timer(10);
        timer.start();

        assert!(timeout(Duration::from_millis(999), timer.next_tick()).await.is_err());
        assert!(timeout(Duration::from_millis(2), timer.next_tick()).await.is_ok());
    }

    #[tokio::test(start_paused = true)]
    async fn reaching_zero_stops_the_timer() {
        let mut timer = Timer::new(4, 2, false, 0, None);
        timer.start();

        timer.next_tick().await;
        assert_eq!(timer.tick(), None);
        timer.next_tick().await;
        assert_eq!(timer.tick(), Some(TimerEvent::Finished(4)));

        assert!(!timer.is_running());
        assert!(timer.is_finished());
    }

    #[tokio::test(start_paused = true)]
    async fn stopped_timer_never_ticks() {
        let mut timer = timer(10);
        timer.start();
        timer.stop();
        timer.stop();

        assert!(timeout(Duration::from_secs(5), timer.next_tick()).await.is_err());
        assert_eq!(timer.tick(), None);
        assert_eq!(timer.remaining_seconds(), 10);
        assert!(!timer.is_running());
    }

    #[tokio::test(start_paused = true)]
    async fn toggle_flips_running_state() {
        let mut timer = timer(10);
        timer.toggle();
        assert!(timer.is_running());
        timer.toggle();
        assert!(!timer.is_running());
    }
}
