//! The timer grid: a fixed set of timers of which at most one runs

use futures::future::pending;
use tracing::{debug, info};

use super::{CommandError, SessionSettings, Timer, TimerEvent, TimerSnapshot};

/// Owns every timer of a session and mediates between them.
///
/// After any public method returns, at most one timer is running.
#[derive(Debug)]
pub struct TimerSet {
    timers: Vec<Timer>,
}

impl TimerSet {
    /// Create `count` stopped timers with ids `0..count`
    pub fn new(
        count: usize,
        initial_seconds: u32,
        increment_on_start: bool,
        increment_seconds: u32,
        shows_health: bool,
        initial_health: i64,
    ) -> Self {
        let health_points = shows_health.then_some(initial_health);
        let timers = (0..count)
            .map(|id| Timer::new(id, initial_seconds, increment_on_start, increment_seconds, health_points))
            .collect();

        Self { timers }
    }

    pub fn from_settings(settings: &SessionSettings) -> Self {
        Self::new(
            settings.players,
            settings.initial_seconds(),
            settings.increment_on_start,
            settings.increment_seconds,
            settings.shows_health,
            settings.health_points,
        )
    }

    pub fn len(&self) -> usize {
        self.timers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.timers.is_empty()
    }

    pub fn get(&self, id: usize) -> Option<&Timer> {
        self.timers.get(id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Timer> {
        self.timers.iter()
    }

    /// Id of the running timer, if any
    pub fn active_timer(&self) -> Option<usize> {
        self.timers.iter().find(|timer| timer.is_running()).map(Timer::id)
    }

    fn timer_mut(&mut self, id: usize) -> Result<&mut Timer, CommandError> {
        self.timers.get_mut(id).ok_or(CommandError::UnknownTimer(id))
    }

    fn handle(&mut self, event: TimerEvent) {
        match event {
            TimerEvent::Starting(id) => {
                debug!("Timer {} is starting, stopping all timers", id);
                self.stop_all();
            }
            TimerEvent::Finished(id) => {
                info!("Timer {} ran out of time", id);
            }
        }
    }

    /// Start a timer, stopping whichever timer was running
    pub fn start(&mut self, id: usize) -> Result<(), CommandError> {
        if let Some(event) = self.timer_mut(id)?.starting() {
            self.handle(event);
            self.timer_mut(id)?.start();
        }
        Ok(())
    }

    pub fn stop(&mut self, id: usize) -> Result<(), CommandError> {
        self.timer_mut(id)?.stop();
        Ok(())
    }

    pub fn toggle(&mut self, id: usize) -> Result<(), CommandError> {
        if self.timer_mut(id)?.is_running() {
            self.stop(id)
        } else {
            self.start(id)
        }
    }

    pub fn stop_all(&mut self) {
        for timer in &mut self.timers {
            timer.stop();
        }
    }

    /// Stop everything, then add `delta` seconds to each timer that stays in bounds
    pub fn increment_all(&mut self, delta: i64) {
        self.stop_all();

        for timer in &mut self.timers {
            timer.try_increment(delta);
        }
    }

    pub fn adjust_health(&mut self, id: usize, delta: i64) -> Result<(), CommandError> {
        self.timer_mut(id)?.adjust_health(delta);
        Ok(())
    }

    /// Resolves with the id of the running timer once its next second elapsed.
    /// Never resolves while all timers are stopped.
    pub async fn next_tick(&mut self) -> usize {
        match self.timers.iter_mut().find(|timer| timer.is_running()) {
            Some(timer) => {
                timer.next_tick().await;
                timer.id()
            }
            None => pending().await,
        }
    }

    /// Account for one elapsed second on timer `id`
    pub fn tick(&mut self, id: usize) {
        let event = self.timers.get_mut(id).and_then(Timer::tick);
        if let Some(event) = event {
            self.handle(event);
        }
    }

    pub fn snapshots(&self, low_time_seconds: u32) -> Vec<TimerSnapshot> {
        self.timers
            .iter()
            .map(|timer| timer.snapshot(low_time_seconds))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;
    use proptest::prelude::*;
    use tokio::time::timeout;

    fn grid(count: usize, seconds: u32) -> TimerSet {
        TimerSet::new(count, seconds, false, 0, false, 0)
    }

    fn running(set: &TimerSet) -> Vec<usize> {
        set.iter().filter(|timer| timer.is_running()).map(Timer::id).collect()
    }

    #[test]
    fn construction_assigns_positional_ids() {
        let set = TimerSet::new(3, 600, true, 30, true, 40);

        assert_eq!(set.len(), 3);
        for (position, timer) in set.iter().enumerate() {
            assert_eq!(timer.id(), position);
            assert_eq!(timer.remaining_seconds(), 600);
            assert_eq!(timer.health_points(), Some(40));
            assert!(!timer.is_running());
        }
        assert_eq!(set.active_timer(), None);
    }

    #[tokio::test(start_paused = true)]
    async fn starting_a_timer_stops_the_others() {
        let mut set = grid(10, 100);

        set.start(7).unwrap();
        set.start(0).unwrap();

        assert_eq!(running(&set), vec![0]);
        assert_eq!(set.active_timer(), Some(0));
    }

    #[tokio::test(start_paused = true)]
    async fn starting_the_running_timer_again_keeps_it_running() {
        let mut set = TimerSet::new(2, 100, true, 30, false, 0);

        set.start(1).unwrap();
        set.start(1).unwrap();

        assert_eq!(running(&set), vec![1]);
        assert_eq!(set.get(1).unwrap().remaining_seconds(), 130);
    }

    #[tokio::test(start_paused = true)]
    async fn toggle_passes_the_turn() {
        let mut set = TimerSet::new(3, 100, true, 10, false, 0);

        set.toggle(0).unwrap();
        set.toggle(1).unwrap();
        assert_eq!(running(&set), vec![1]);

        set.toggle(1).unwrap();
        assert!(running(&set).is_empty());

        // Bonus applied on each start, including the one that was interrupted
        assert_eq!(set.get(0).unwrap().remaining_seconds(), 110);
        assert_eq!(set.get(1).unwrap().remaining_seconds(), 110);
        assert_eq!(set.get(2).unwrap().remaining_seconds(), 100);
    }

    #[test]
    fn unknown_ids_are_reported() {
        let mut set = grid(2, 100);

        assert_eq!(set.start(2), Err(CommandError::UnknownTimer(2)));
        assert_eq!(set.stop(5), Err(CommandError::UnknownTimer(5)));
        assert_eq!(set.adjust_health(9, 1), Err(CommandError::UnknownTimer(9)));
    }

    #[tokio::test(start_paused = true)]
    async fn increment_all_stops_and_applies_per_timer() {
        let mut set = grid(2, 50);
        set.increment_all(-47);
        set.increment_all(0);
        assert_eq!(set.get(0).unwrap().remaining_seconds(), 3);

        set.timer_mut(1).unwrap().try_increment(47);
        set.start(1).unwrap();

        set.increment_all(-10);
        assert!(running(&set).is_empty());
        assert_eq!(set.get(0).unwrap().remaining_seconds(), 3);
        assert_eq!(set.get(1).unwrap().remaining_seconds(), 40);

        set.increment_all(-3);
        assert_eq!(set.get(0).unwrap().remaining_seconds(), 0);
        assert_eq!(set.get(1).unwrap().remaining_seconds(), 37);
    }

    #[test]
    fn increment_all_rejects_each_timer_independently() {
        let mut set = grid(2, 86_000);
        set.timer_mut(0).unwrap().try_increment(-85_990);

        set.increment_all(500);
        assert_eq!(set.get(0).unwrap().remaining_seconds(), 510);
        assert_eq!(set.get(1).unwrap().remaining_seconds(), 86_000);
    }

    #[tokio::test(start_paused = true)]
    async fn increment_all_with_extreme_values_changes_nothing() {
        let mut set = grid(3, 600);
        set.start(1).unwrap();

        set.increment_all(i64::MAX);
        set.increment_all(i64::MIN);

        assert!(running(&set).is_empty());
        assert!(set.iter().all(|timer| timer.remaining_seconds() == 600));

        set.start(0).unwrap();
        assert_eq!(set.active_timer(), Some(0));
    }

    #[test]
    fn huge_base_time_is_capped_at_a_day() {
        let settings = SessionSettings { minutes: u32::MAX, ..Default::default() };
        let set = TimerSet::from_settings(&settings);

        assert!(set.iter().all(|timer| timer.remaining_seconds() == crate::state::MAX_REMAINING_SECONDS));
    }

    #[tokio::test(start_paused = true)]
    async fn only_the_running_timer_ticks() {
        let mut set = grid(3, 100);
        set.start(2).unwrap();

        let id = set.next_tick().await;
        assert_eq!(id, 2);
        set.tick(id);

        assert_eq!(set.get(2).unwrap().remaining_seconds(), 99);
        assert_eq!(set.get(0).unwrap().remaining_seconds(), 100);
    }

    #[tokio::test(start_paused = true)]
    async fn no_ticks_after_stop_all() {
        let mut set = grid(3, 100);
        set.start(1).unwrap();
        set.stop_all();
        set.stop_all();

        assert!(timeout(Duration::from_secs(10), set.next_tick()).await.is_err());
        assert_eq!(set.get(1).unwrap().remaining_seconds(), 100);
    }

    #[tokio::test(start_paused = true)]
    async fn finished_timer_leaves_no_timer_running() {
        let mut set = grid(2, 1);
        set.start(0).unwrap();

        let id = set.next_tick().await;
        set.tick(id);

        assert!(set.get(0).unwrap().is_finished());
        assert_eq!(set.active_timer(), None);
    }

    #[derive(Debug, Clone)]
    enum Op {
        Start(usize),
        Stop(usize),
        Toggle(usize),
        StopAll,
        IncrementAll(i64),
    }

    fn op(count: usize) -> impl Strategy<Value = Op> {
        prop_oneof![
            (0..count).prop_map(Op::Start),
            (0..count).prop_map(Op::Stop),
            (0..count).prop_map(Op::Toggle),
            Just(Op::StopAll),
            (-120i64..120).prop_map(Op::IncrementAll),
        ]
    }

    proptest! {
        #[test]
        fn at_most_one_timer_runs(ops in prop::collection::vec(op(10), 1..64)) {
            let runtime = tokio::runtime::Builder::new_current_thread()
                .enable_time()
                .start_paused(true)
                .build()
                .unwrap();
            let _guard = runtime.enter();

            let mut set = grid(10, 60);
            for op in ops {
                match op {
                    Op::Start(id) => set.start(id).unwrap(),
                    Op::Stop(id) => set.stop(id).unwrap(),
                    Op::Toggle(id) => set.toggle(id).unwrap(),
                    Op::StopAll => set.stop_all(),
                    Op::IncrementAll(delta) => set.increment_all(delta),
                }
                prop_assert!(running(&set).len() <= 1);
            }
        }
    }
}
