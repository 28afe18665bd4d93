//! Root controller owning the current screen

use futures::future::pending;
use tracing::{debug, info};

use super::{
    Action, CommandError, ScreenKind, SessionSettings, SessionSnapshot, SettingsUpdate, TimerSet,
};

/// The screen currently shown, with the state it owns
#[derive(Debug)]
pub enum Screen {
    Settings,
    Timers(TimerSet),
}

/// Owns the screen and the last submitted settings.
///
/// Settings outlive a session so the next one starts from the same choices.
#[derive(Debug)]
pub struct Controller {
    screen: Screen,
    settings: SessionSettings,
    low_time_seconds: u32,
}

impl Controller {
    /// Create a controller showing the settings screen
    pub fn new(settings: SessionSettings, low_time_seconds: u32) -> Self {
        Self {
            screen: Screen::Settings,
            settings,
            low_time_seconds,
        }
    }

    pub fn screen(&self) -> &Screen {
        &self.screen
    }

    pub fn settings(&self) -> &SessionSettings {
        &self.settings
    }

    /// Carry out a user intent
    pub fn apply(&mut self, action: Action) -> Result<(), CommandError> {
        match action {
            Action::Submit(update) => self.submit(&update),
            Action::Reset => {
                self.reset();
                Ok(())
            }
            Action::Start(id) => self.timers_mut()?.start(id),
            Action::Stop(id) => self.timers_mut()?.stop(id),
            Action::Toggle(id) => self.timers_mut()?.toggle(id),
            Action::StopAll => {
                self.timers_mut()?.stop_all();
                Ok(())
            }
            Action::IncrementAll(delta) => {
                self.timers_mut()?.increment_all(delta);
                Ok(())
            }
            Action::AdjustHealth { id, delta } => self.timers_mut()?.adjust_health(id, delta),
        }
    }

    fn submit(&mut self, update: &SettingsUpdate) -> Result<(), CommandError> {
        if matches!(self.screen, Screen::Timers(_)) {
            return Err(CommandError::SessionActive);
        }

        let settings = self.settings.merged(update);
        settings.validate()?;

        info!(
            "Starting session: {} players, {} min, bonus {}, health {}",
            settings.players,
            settings.minutes,
            if settings.increment_on_start { format!("{}s", settings.increment_seconds) } else { "off".to_string() },
            if settings.shows_health { settings.health_points.to_string() } else { "off".to_string() },
        );

        self.screen = Screen::Timers(TimerSet::from_settings(&settings));
        self.settings = settings;
        Ok(())
    }

    fn reset(&mut self) {
        match std::mem::replace(&mut self.screen, Screen::Settings) {
            Screen::Timers(mut timers) => {
                timers.stop_all();
                info!("Session reset, back to settings");
            }
            Screen::Settings => debug!("Reset requested without a session"),
        }
    }

    fn timers_mut(&mut self) -> Result<&mut TimerSet, CommandError> {
        match &mut self.screen {
            Screen::Timers(timers) => Ok(timers),
            Screen::Settings => Err(CommandError::NoSession),
        }
    }

    /// Resolves with the id of the running timer once its next second elapsed
    pub async fn next_tick(&mut self) -> usize {
        match &mut self.screen {
            Screen::Timers(timers) => timers.next_tick().await,
            Screen::Settings => pending().await,
        }
    }

    pub fn tick(&mut self, id: usize) {
        if let Screen::Timers(timers) = &mut self.screen {
            timers.tick(id);
        }
    }

    pub fn snapshot(&self) -> SessionSnapshot {
        match &self.screen {
            Screen::Settings => SessionSnapshot {
                screen: ScreenKind::Settings,
                settings: self.settings.clone(),
                active_timer: None,
                timers: Vec::new(),
            },
            Screen::Timers(timers) => SessionSnapshot {
                screen: ScreenKind::Timers,
                settings: self.settings.clone(),
                active_timer: timers.active_timer(),
                timers: timers.snapshots(self.low_time_seconds),
            },
        }
    }
}
