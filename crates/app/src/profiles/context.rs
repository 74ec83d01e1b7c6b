//! Concrete [`ProfileContext`] built by the link layer for each activation.

use std::sync::Arc;

use hublink_domain::configuration::Configuration;

use crate::ports::{ProfileContext, Scheduler, ValueConverter};

/// The environment of one link: its options plus shared host facilities.
pub struct LinkContext {
    configuration: Configuration,
    scheduler: Option<Arc<dyn Scheduler>>,
    converter: Arc<dyn ValueConverter>,
}

impl LinkContext {
    #[must_use]
    pub fn new(
        configuration: Configuration,
        scheduler: Option<Arc<dyn Scheduler>>,
        converter: Arc<dyn ValueConverter>,
    ) -> Self {
        Self {
            configuration,
            scheduler,
            converter,
        }
    }
}

impl ProfileContext for LinkContext {
    fn configuration(&self) -> &Configuration {
        &self.configuration
    }

    fn scheduler(&self) -> Option<Arc<dyn Scheduler>> {
        self.scheduler.clone()
    }

    fn value_converter(&self) -> Arc<dyn ValueConverter> {
        Arc::clone(&self.converter)
    }
}
