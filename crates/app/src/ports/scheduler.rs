//! Scheduler port — the timer facility used by time-driven profiles.

use std::time::Duration;

/// Work run on every tick of a repeating schedule.
pub type Task = Box<dyn FnMut() + Send + 'static>;

/// Schedules repeating work.
///
/// Implementations must never run `task` inline from within
/// `schedule_repeating`: callers may hold locks the task also takes.
pub trait Scheduler: Send + Sync {
    /// Run `task` after `delay`, then every `interval`, until cancelled.
    ///
    /// # Errors
    ///
    /// Returns [`SchedulerError`] if the work cannot be scheduled.
    fn schedule_repeating(
        &self,
        delay: Duration,
        interval: Duration,
        task: Task,
    ) -> Result<Box<dyn ScheduledTask>, SchedulerError>;
}

/// Handle to scheduled work.
///
/// Dropping the handle does not cancel the work.
pub trait ScheduledTask: Send {
    /// Stop the work. No tick starts after this returns.
    fn cancel(&self);

    fn is_cancelled(&self) -> bool;
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SchedulerError {
    #[error("no async runtime available")]
    RuntimeUnavailable,

    #[error("repeat interval must be non-zero")]
    ZeroInterval,
}
