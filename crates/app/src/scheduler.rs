//! Tokio-backed [`Scheduler`].

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use tokio::runtime::Handle;
use tokio::task::JoinHandle;
use tokio::time::{MissedTickBehavior, interval_at};

use crate::ports::{ScheduledTask, Scheduler, SchedulerError, Task};

/// Runs repeating work as tasks on a tokio runtime.
#[derive(Debug, Clone)]
pub struct TokioScheduler {
    handle: Handle,
}

impl TokioScheduler {
    #[must_use]
    pub fn new(handle: Handle) -> Self {
        Self { handle }
    }

    /// Bind to the runtime the caller is running on.
    ///
    /// # Errors
    ///
    /// Returns [`SchedulerError::RuntimeUnavailable`] outside a tokio runtime.
    pub fn current() -> Result<Self, SchedulerError> {
        Handle::try_current()
            .map(Self::new)
            .map_err(|_| SchedulerError::RuntimeUnavailable)
    }
}

impl Scheduler for TokioScheduler {
    fn schedule_repeating(
        &self,
        delay: Duration,
        interval: Duration,
        mut task: Task,
    ) -> Result<Box<dyn ScheduledTask>, SchedulerError> {
        if interval.is_zero() {
            return Err(SchedulerError::ZeroInterval);
        }
        let cancelled = Arc::new(AtomicBool::new(false));
        let flag = Arc::clone(&cancelled);
        let start = tokio::time::Instant::now() + delay;
        let join = self.handle.spawn(async move {
            let mut ticker = interval_at(start, interval);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
            loop {
                ticker.tick().await;
                if flag.load(Ordering::Acquire) {
                    break;
                }
                task();
            }
        });
        Ok(Box::new(TokioTask { cancelled, join }))
    }
}

struct TokioTask {
    cancelled: Arc<AtomicBool>,
    join: JoinHandle<()>,
}

impl ScheduledTask for TokioTask {
    fn cancel(&self) {
        self.cancelled.store(true, Ordering::Release);
        self.join.abort();
    }

    fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::Acquire)
    }
}
