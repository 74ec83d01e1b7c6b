//! Owned, live profile bound to exactly one link.

use hublink_domain::uid::ProfileTypeUid;
use tracing::Level;
use hublink_domain::value::{Command, State};

use crate::ports::{ChannelEvent, Profile};

/// A boxed profile plus its type, with fault handling and disposal.
///
/// Handler faults are logged and swallowed so one malformed event never
/// deactivates the link. Disposal runs once, either explicitly or on drop.
pub struct ProfileInstance {
    profile_type: ProfileTypeUid,
    profile: Box<dyn Profile>,
    disposed: bool,
}

impl ProfileInstance {
    #[must_use]
    pub fn new(profile_type: ProfileTypeUid, profile: Box<dyn Profile>) -> Self {
        Self {
            profile_type,
            profile,
            disposed: false,
        }
    }

    #[must_use]
    pub fn profile_type(&self) -> &ProfileTypeUid {
        &self.profile_type
    }

    #[must_use]
    pub fn is_disposed(&self) -> bool {
        self.disposed
    }

    pub fn on_channel_event(&mut self, event: ChannelEvent) {
        if self.disposed {
            return;
        }
        let input = tracing::enabled!(Level::WARN).then(|| event.clone());
        if let Err(error) = self.profile.handle_channel_event(event)
            && let Some(input) = input
        {
            tracing::warn!(
                profile_type = %self.profile_type,
                %input,
                error = %error,
                "dropping channel event"
            );
        }
    }

    pub fn on_item_state_change(&mut self, state: State) {
        if self.disposed {
            return;
        }
        let input = tracing::enabled!(Level::WARN).then(|| state.clone());
        if let Err(error) = self.profile.handle_item_state_change(state)
            && let Some(input) = input
        {
            tracing::warn!(
                profile_type = %self.profile_type,
                %input,
                error = %error,
                "dropping item state change"
            );
        }
    }

    pub fn on_item_command(&mut self, command: Command) {
        if self.disposed {
            return;
        }
        let input = tracing::enabled!(Level::WARN).then(|| command.clone());
        if let Err(error) = self.profile.handle_item_command(command)
            && let Some(input) = input
        {
            tracing::warn!(
                profile_type = %self.profile_type,
                %input,
                error = %error,
                "dropping item command"
            );
        }
    }

    /// Cancel outstanding work. Later events are ignored.
    pub fn dispose(&mut self) {
        if !self.disposed {
            self.disposed = true;
            self.profile.dispose();
        }
    }
}

impl Drop for ProfileInstance {
    fn drop(&mut self) {
        self.dispose();
    }
}

impl std::fmt::Debug for ProfileInstance {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProfileInstance")
            .field("profile_type", &self.profile_type)
            .field("disposed", &self.disposed)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use hublink_domain::error::ValueError;

    use super::*;
    use crate::error::ProfileError;

    struct FaultyProfile {
        handled: Arc<AtomicUsize>,
        disposed: Arc<AtomicUsize>,
    }

    impl Profile for FaultyProfile {
        fn handle_channel_event(&mut self, event: ChannelEvent) -> Result<(), ProfileError> {
            self.handled.fetch_add(1, Ordering::SeqCst);
            match event {
                ChannelEvent::Trigger(_) => Err(ValueError::InvalidNumber("x".into()).into()),
                _ => Ok(()),
            }
        }

        fn handle_item_command(&mut self, _command: Command) -> Result<(), ProfileError> {
            self.handled.fetch_add(1, Ordering::SeqCst);
            Err(ValueError::InvalidNumber("y".into()).into())
        }

        fn handle_item_state_change(&mut self, _state: State) -> Result<(), ProfileError> {
            self.handled.fetch_add(1, Ordering::SeqCst);
            Err(ValueError::InvalidNumber("z".into()).into())
        }

        fn dispose(&mut self) {
            self.disposed.fetch_add(1, Ordering::SeqCst);
        }
    }

    fn faulty() -> (ProfileInstance, Arc<AtomicUsize>, Arc<AtomicUsize>) {
        let handled = Arc::new(AtomicUsize::new(0));
        let disposed = Arc::new(AtomicUsize::new(0));
        let instance = ProfileInstance::new(
            ProfileTypeUid::system("default"),
            Box::new(FaultyProfile {
                handled: Arc::clone(&handled),
                disposed: Arc::clone(&disposed),
            }),
        );
        (instance, handled, disposed)
    }

    #[test]
    fn should_keep_handling_events_after_a_fault() {
        let (mut instance, handled, _) = faulty();
        instance.on_channel_event(ChannelEvent::trigger("PRESSED"));
        instance.on_channel_event(ChannelEvent::State(State::Decimal(1.0)));
        assert_eq!(handled.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn should_swallow_item_side_faults_without_a_subscriber() {
        let (mut instance, handled, disposed) = faulty();
        instance.on_item_command(Command::Decimal(1.0));
        instance.on_item_state_change(State::Decimal(1.0));
        instance.on_item_command(Command::Decimal(2.0));
        assert_eq!(handled.load(Ordering::SeqCst), 3);
        assert_eq!(disposed.load(Ordering::SeqCst), 0);
        assert!(!instance.is_disposed());
    }

    #[test]
    fn should_dispose_once_when_disposed_then_dropped() {
        let (mut instance, _, disposed) = faulty();
        instance.dispose();
        instance.dispose();
        drop(instance);
        assert_eq!(disposed.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn should_dispose_when_dropped() {
        let (instance, _, disposed) = faulty();
        drop(instance);
        assert_eq!(disposed.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn should_ignore_events_after_dispose() {
        let (mut instance, handled, _) = faulty();
        instance.dispose();
        instance.on_channel_event(ChannelEvent::State(State::Decimal(1.0)));
        assert_eq!(handled.load(Ordering::SeqCst), 0);
        assert!(instance.is_disposed());
    }
}
