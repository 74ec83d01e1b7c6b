//! Rocker dimmer: ramp a dimmer up or down while a rocker side is held.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use hublink_domain::channel::trigger_events::{
    DIR1_PRESSED, DIR1_RELEASED, DIR2_PRESSED, DIR2_RELEASED,
};
use hublink_domain::configuration::Configuration;
use hublink_domain::error::ConfigurationError;
use hublink_domain::value::{Command, Percent, State, StateKind, StopMove};

use crate::error::ProfileError;
use crate::ports::{
    ChannelEvent, Profile, ProfileCallback, ProfileContext, ScheduledTask, Scheduler, Task,
    ValueConverter,
};

const STEP: &str = "step";
const INITIAL_DELAY: &str = "initialDelay";
const REPEAT_INTERVAL: &str = "repeatInterval";

/// Timing and step size of a ramp.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RampSettings {
    /// Percentage points per tick, in `(0, 100]`.
    pub step: f64,
    pub initial_delay: Duration,
    /// Non-zero.
    pub repeat_interval: Duration,
}

impl Default for RampSettings {
    fn default() -> Self {
        Self {
            step: 10.0,
            initial_delay: Duration::from_millis(500),
            repeat_interval: Duration::from_millis(200),
        }
    }
}

impl RampSettings {
    /// Read `step`, `initialDelay` (ms) and `repeatInterval` (ms), falling
    /// back to the defaults for absent options.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigurationError`] when an option is malformed or out of
    /// range.
    pub fn from_configuration(config: &Configuration) -> Result<Self, ConfigurationError> {
        let defaults = Self::default();
        let step = config.get_f64(STEP)?.unwrap_or(defaults.step);
        if step <= 0.0 || step > 100.0 {
            return Err(ConfigurationError::OutOfRange {
                name: STEP.to_string(),
                reason: "must be within (0, 100]",
            });
        }
        let initial_delay = millis(config, INITIAL_DELAY)?.unwrap_or(defaults.initial_delay);
        let repeat_interval = millis(config, REPEAT_INTERVAL)?.unwrap_or(defaults.repeat_interval);
        if repeat_interval.is_zero() {
            return Err(ConfigurationError::OutOfRange {
                name: REPEAT_INTERVAL.to_string(),
                reason: "must be positive",
            });
        }
        Ok(Self {
            step,
            initial_delay,
            repeat_interval,
        })
    }
}

fn millis(config: &Configuration, name: &str) -> Result<Option<Duration>, ConfigurationError> {
    let Some(ms) = config.get_f64(name)? else {
        return Ok(None);
    };
    let out_of_range = || ConfigurationError::OutOfRange {
        name: name.to_string(),
        reason: "must be a non-negative number of milliseconds",
    };
    if ms < 0.0 {
        return Err(out_of_range());
    }
    Duration::try_from_secs_f64(ms / 1_000.0)
        .map(Some)
        .map_err(|_| out_of_range())
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Direction {
    Up,
    Down,
}

/// State shared between the event path and the repeating task.
struct Ramp {
    direction: Option<Direction>,
    level: f64,
    /// Bumped on every stop; a tick of an older generation does nothing.
    generation: u64,
    task: Option<Box<dyn ScheduledTask>>,
}

impl Ramp {
    fn stop(&mut self) {
        if let Some(task) = self.task.take() {
            task.cancel();
        }
        self.generation = self.generation.wrapping_add(1);
        self.direction = None;
    }
}

fn lock(ramp: &Mutex<Ramp>) -> MutexGuard<'_, Ramp> {
    ramp.lock().unwrap_or_else(PoisonError::into_inner)
}

/// `DIR1_PRESSED` ramps up, `DIR2_PRESSED` ramps down; a release stops the
/// ramp and sends `STOP`.
pub struct RockerDimmerProfile {
    callback: Arc<dyn ProfileCallback>,
    scheduler: Arc<dyn Scheduler>,
    converter: Arc<dyn ValueConverter>,
    settings: RampSettings,
    ramp: Arc<Mutex<Ramp>>,
}

impl RockerDimmerProfile {
    /// # Errors
    ///
    /// Returns [`ConfigurationError::SchedulerUnavailable`] when the context
    /// has no scheduler, or a configuration error from [`RampSettings`].
    pub fn new(
        callback: Arc<dyn ProfileCallback>,
        context: &dyn ProfileContext,
    ) -> Result<Self, ConfigurationError> {
        let scheduler = context
            .scheduler()
            .ok_or(ConfigurationError::SchedulerUnavailable)?;
        let settings = RampSettings::from_configuration(context.configuration())?;
        Ok(Self {
            callback,
            scheduler,
            converter: context.value_converter(),
            settings,
            ramp: Arc::new(Mutex::new(Ramp {
                direction: None,
                level: 0.0,
                generation: 0,
                task: None,
            })),
        })
    }

    fn press(&self, direction: Direction) -> Result<(), ProfileError> {
        let mut ramp = lock(&self.ramp);
        ramp.stop();
        ramp.direction = Some(direction);
        let tick = self.tick(ramp.generation, direction);
        match self.scheduler.schedule_repeating(
            self.settings.initial_delay,
            self.settings.repeat_interval,
            tick,
        ) {
            Ok(task) => {
                ramp.task = Some(task);
                Ok(())
            }
            Err(error) => {
                ramp.direction = None;
                Err(error.into())
            }
        }
    }

    fn release(&self) {
        let mut ramp = lock(&self.ramp);
        ramp.stop();
        self.callback
            .send_command_to_item(Command::StopMove(StopMove::Stop));
    }

    fn tick(&self, generation: u64, direction: Direction) -> Task {
        let shared = Arc::clone(&self.ramp);
        let callback = Arc::clone(&self.callback);
        let delta = match direction {
            Direction::Up => self.settings.step,
            Direction::Down => -self.settings.step,
        };
        Box::new(move || {
            let mut ramp = lock(&shared);
            if ramp.generation != generation {
                return;
            }
            let next = (ramp.level + delta).clamp(0.0, 100.0);
            if (next - ramp.level).abs() < f64::EPSILON {
                // Clamped: the ramp is over, the item may report levels again.
                ramp.stop();
                return;
            }
            ramp.level = next;
            callback.send_command_to_item(Command::Percent(Percent::clamped(next)));
        })
    }
}

impl Profile for RockerDimmerProfile {
    fn handle_channel_event(&mut self, event: ChannelEvent) -> Result<(), ProfileError> {
        match event {
            ChannelEvent::Trigger(event) => match event.as_str() {
                DIR1_PRESSED => self.press(Direction::Up)?,
                DIR2_PRESSED => self.press(Direction::Down)?,
                DIR1_RELEASED | DIR2_RELEASED => self.release(),
                _ => tracing::debug!(%event, "rocker dimmer ignores trigger"),
            },
            other => tracing::debug!(event = %other, "rocker dimmer ignores non-trigger event"),
        }
        Ok(())
    }

    fn handle_item_state_change(&mut self, state: State) -> Result<(), ProfileError> {
        if state.is_absent() {
            return Ok(());
        }
        let mut ramp = lock(&self.ramp);
        if ramp.direction.is_some() {
            return Ok(());
        }
        if let State::Percent(level) = self.converter.convert(&state, StateKind::Percent)? {
            ramp.level = level.value();
        }
        Ok(())
    }

    fn dispose(&mut self) {
        lock(&self.ramp).stop();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::profiles::test_support::{
        Emission, ManualScheduler, MapContext, RecordingCallback,
    };

    struct Fixture {
        profile: RockerDimmerProfile,
        callback: Arc<RecordingCallback>,
        scheduler: Arc<ManualScheduler>,
    }

    fn fixture(config: Configuration) -> Fixture {
        let callback = RecordingCallback::new();
        let scheduler = ManualScheduler::new();
        let context = MapContext::new(config).with_scheduler(scheduler.clone());
        let profile = RockerDimmerProfile::new(callback.clone(), &context).unwrap();
        Fixture {
            profile,
            callback,
            scheduler,
        }
    }

    fn fire(profile: &mut RockerDimmerProfile, event: &str) {
        profile
            .handle_channel_event(ChannelEvent::trigger(event))
            .unwrap();
    }

    fn percent(value: f64) -> Emission {
        Emission::ItemCommand(Command::Percent(Percent::clamped(value)))
    }

    fn stop() -> Emission {
        Emission::ItemCommand(Command::StopMove(StopMove::Stop))
    }

    #[test]
    fn should_ramp_up_while_pressed_and_stop_on_release() {
        let mut f = fixture(Configuration::new());
        fire(&mut f.profile, DIR1_PRESSED);
        assert!(f.callback.take().is_empty());
        f.scheduler.tick();
        f.scheduler.tick();
        f.scheduler.tick();
        fire(&mut f.profile, DIR1_RELEASED);
        f.scheduler.tick();
        assert_eq!(
            f.callback.take(),
            vec![percent(10.0), percent(20.0), percent(30.0), stop()]
        );
        assert_eq!(f.scheduler.live_tasks(), 0);
    }

    #[test]
    fn should_stop_emitting_once_clamped() {
        let mut f = fixture(Configuration::new());
        f.profile
            .handle_item_state_change(State::Percent(Percent::clamped(95.0)))
            .unwrap();
        fire(&mut f.profile, DIR1_PRESSED);
        for _ in 0..4 {
            f.scheduler.tick();
        }
        assert_eq!(f.callback.take(), vec![percent(100.0)]);
        assert_eq!(f.scheduler.live_tasks(), 0);
    }

    #[test]
    fn should_follow_item_level_again_after_clamping() {
        let mut f = fixture(Configuration::new());
        f.profile
            .handle_item_state_change(State::Percent(Percent::clamped(95.0)))
            .unwrap();
        fire(&mut f.profile, DIR1_PRESSED);
        f.scheduler.tick();
        f.scheduler.tick();
        assert_eq!(f.callback.take(), vec![percent(100.0)]);

        f.profile
            .handle_item_state_change(State::Percent(Percent::clamped(30.0)))
            .unwrap();
        fire(&mut f.profile, DIR1_PRESSED);
        f.scheduler.tick();
        assert_eq!(f.callback.take(), vec![percent(40.0)]);
    }

    #[test]
    fn should_ramp_down_from_item_level() {
        let mut f = fixture(Configuration::new().with(STEP, 25_i64));
        f.profile
            .handle_item_state_change(State::Percent(Percent::clamped(60.0)))
            .unwrap();
        fire(&mut f.profile, DIR2_PRESSED);
        for _ in 0..4 {
            f.scheduler.tick();
        }
        assert_eq!(
            f.callback.take(),
            vec![percent(35.0), percent(10.0), percent(0.0)]
        );
    }

    #[test]
    fn should_replace_active_ramp_when_pressed_again() {
        let mut f = fixture(Configuration::new());
        fire(&mut f.profile, DIR1_PRESSED);
        f.scheduler.tick();
        fire(&mut f.profile, DIR2_PRESSED);
        f.scheduler.tick();
        assert_eq!(f.callback.take(), vec![percent(10.0), percent(0.0)]);
        assert!(f.scheduler.live_tasks() <= 1);
    }

    #[test]
    fn should_ignore_item_state_while_ramping() {
        let mut f = fixture(Configuration::new());
        fire(&mut f.profile, DIR1_PRESSED);
        f.profile
            .handle_item_state_change(State::Percent(Percent::clamped(80.0)))
            .unwrap();
        f.scheduler.tick();
        assert_eq!(f.callback.take(), vec![percent(10.0)]);
    }

    #[test]
    fn should_cancel_without_stop_when_disposed() {
        let mut f = fixture(Configuration::new());
        fire(&mut f.profile, DIR1_PRESSED);
        f.profile.dispose();
        f.scheduler.tick();
        assert!(f.callback.take().is_empty());
        assert_eq!(f.scheduler.live_tasks(), 0);
    }

    #[test]
    fn should_schedule_with_configured_timing() {
        let config = Configuration::new()
            .with(INITIAL_DELAY, 300_i64)
            .with(REPEAT_INTERVAL, 100_i64);
        let mut f = fixture(config);
        fire(&mut f.profile, DIR1_PRESSED);
        assert_eq!(
            f.scheduler.last_timing(),
            Some((Duration::from_millis(300), Duration::from_millis(100)))
        );
    }

    #[test]
    fn should_fail_activation_without_scheduler() {
        let result = RockerDimmerProfile::new(RecordingCallback::new(), &MapContext::empty());
        assert!(matches!(
            result,
            Err(ConfigurationError::SchedulerUnavailable)
        ));
    }

    #[test]
    fn should_reject_step_out_of_range() {
        for step in [0_i64, -5, 101] {
            let config = Configuration::new().with(STEP, step);
            assert!(matches!(
                RampSettings::from_configuration(&config),
                Err(ConfigurationError::OutOfRange { .. })
            ));
        }
    }

    #[test]
    fn should_reject_zero_repeat_interval() {
        let config = Configuration::new().with(REPEAT_INTERVAL, 0_i64);
        assert!(RampSettings::from_configuration(&config).is_err());
    }
}
