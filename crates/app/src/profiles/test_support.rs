//! In-memory doubles for exercising profiles without a host.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;

use hublink_domain::configuration::Configuration;
use hublink_domain::value::{Command, State};

use crate::ports::{
    ProfileCallback, ProfileContext, ScheduledTask, Scheduler, SchedulerError, Task,
    ValueConverter,
};
use crate::value_converter::BasicValueConverter;

/// One call made on a [`RecordingCallback`].
#[derive(Debug, Clone, PartialEq)]
pub enum Emission {
    ItemCommand(Command),
    ItemUpdate(State),
    ItemAttribute(String, State),
    ChannelCommand(Command),
    ChannelUpdate(State),
}

#[derive(Default)]
pub struct RecordingCallback {
    emissions: Mutex<Vec<Emission>>,
}

impl RecordingCallback {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    fn push(&self, emission: Emission) {
        self.emissions
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(emission);
    }

    pub fn take(&self) -> Vec<Emission> {
        std::mem::take(&mut *self.emissions.lock().unwrap_or_else(PoisonError::into_inner))
    }
}

impl ProfileCallback for RecordingCallback {
    fn send_command_to_item(&self, command: Command) {
        self.push(Emission::ItemCommand(command));
    }

    fn send_update_to_item(&self, state: State) {
        self.push(Emission::ItemUpdate(state));
    }

    fn send_attribute_update_to_item(&self, attribute: &str, state: State) {
        self.push(Emission::ItemAttribute(attribute.to_string(), state));
    }

    fn send_command_to_channel(&self, command: Command) {
        self.push(Emission::ChannelCommand(command));
    }

    fn send_update_to_channel(&self, state: State) {
        self.push(Emission::ChannelUpdate(state));
    }
}

/// Context backed by a plain [`Configuration`].
pub struct MapContext {
    pub configuration: Configuration,
    pub scheduler: Option<Arc<dyn Scheduler>>,
}

impl MapContext {
    pub fn new(configuration: Configuration) -> Self {
        Self {
            configuration,
            scheduler: None,
        }
    }

    pub fn empty() -> Self {
        Self::new(Configuration::new())
    }

    pub fn with_scheduler(mut self, scheduler: Arc<dyn Scheduler>) -> Self {
        self.scheduler = Some(scheduler);
        self
    }
}

impl ProfileContext for MapContext {
    fn configuration(&self) -> &Configuration {
        &self.configuration
    }

    fn scheduler(&self) -> Option<Arc<dyn Scheduler>> {
        self.scheduler.clone()
    }

    fn value_converter(&self) -> Arc<dyn ValueConverter> {
        Arc::new(BasicValueConverter)
    }
}

struct ManualEntry {
    delay: Duration,
    interval: Duration,
    task: Task,
    cancelled: Arc<AtomicBool>,
}

/// Scheduler whose ticks are fired by hand from the test.
#[derive(Default)]
pub struct ManualScheduler {
    entries: Mutex<Vec<ManualEntry>>,
}

impl ManualScheduler {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    /// Run one tick of every task that is still live.
    pub fn tick(&self) {
        // Tasks are taken out so a tick can lock state the test also locks.
        let mut entries = std::mem::take(&mut *self.lock());
        for entry in &mut entries {
            if !entry.cancelled.load(Ordering::Acquire) {
                (entry.task)();
            }
        }
        let mut current = self.lock();
        entries.append(&mut current);
        *current = entries;
    }

    pub fn live_tasks(&self) -> usize {
        self.lock()
            .iter()
            .filter(|e| !e.cancelled.load(Ordering::Acquire))
            .count()
    }

    pub fn last_timing(&self) -> Option<(Duration, Duration)> {
        self.lock().last().map(|e| (e.delay, e.interval))
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Vec<ManualEntry>> {
        self.entries.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

struct ManualHandle(Arc<AtomicBool>);

impl ScheduledTask for ManualHandle {
    fn cancel(&self) {
        self.0.store(true, Ordering::Release);
    }

    fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::Acquire)
    }
}

impl Scheduler for ManualScheduler {
    fn schedule_repeating(
        &self,
        delay: Duration,
        interval: Duration,
        task: Task,
    ) -> Result<Box<dyn ScheduledTask>, SchedulerError> {
        let cancelled = Arc::new(AtomicBool::new(false));
        self.lock().push(ManualEntry {
            delay,
            interval,
            task,
            cancelled: Arc::clone(&cancelled),
        });
        Ok(Box::new(ManualHandle(cancelled)))
    }
}
