//! Trigger profiles that translate trigger events into item commands
//! without timing or memory.

use std::sync::Arc;

use hublink_domain::channel::trigger_events::{
    DIR1_PRESSED, DIR1_RELEASED, DIR2_PRESSED, DIR2_RELEASED, PRESSED, RELEASED,
};
use hublink_domain::value::{Command, OnOff, PlayPause, RewindFastforward};

use crate::error::ProfileError;
use crate::ports::{ChannelEvent, Profile, ProfileCallback};

/// Looks each trigger event up in a fixed table; unlisted events are ignored.
pub struct TriggerCommandProfile {
    callback: Arc<dyn ProfileCallback>,
    mapping: Vec<(&'static str, Command)>,
}

impl TriggerCommandProfile {
    #[must_use]
    pub fn new(callback: Arc<dyn ProfileCallback>, mapping: Vec<(&'static str, Command)>) -> Self {
        Self { callback, mapping }
    }

    /// `PRESSED` → `ON`, `RELEASED` → `OFF`.
    #[must_use]
    pub fn raw_button_on_off(callback: Arc<dyn ProfileCallback>) -> Self {
        Self::new(
            callback,
            vec![
                (PRESSED, OnOff::On.into()),
                (RELEASED, OnOff::Off.into()),
            ],
        )
    }

    /// `DIR1_PRESSED` → `dir1`, `DIR2_PRESSED` → `dir2`.
    #[must_use]
    pub fn rocker(
        callback: Arc<dyn ProfileCallback>,
        dir1: impl Into<Command>,
        dir2: impl Into<Command>,
    ) -> Self {
        Self::new(
            callback,
            vec![(DIR1_PRESSED, dir1.into()), (DIR2_PRESSED, dir2.into())],
        )
    }

    /// Seek while held, resume playing on release.
    #[must_use]
    pub fn rocker_rewind_fastforward(callback: Arc<dyn ProfileCallback>) -> Self {
        Self::new(
            callback,
            vec![
                (DIR1_PRESSED, RewindFastforward::Fastforward.into()),
                (DIR2_PRESSED, RewindFastforward::Rewind.into()),
                (DIR1_RELEASED, PlayPause::Play.into()),
                (DIR2_RELEASED, PlayPause::Play.into()),
            ],
        )
    }
}

impl Profile for TriggerCommandProfile {
    fn handle_channel_event(&mut self, event: ChannelEvent) -> Result<(), ProfileError> {
        let event = match event {
            ChannelEvent::Trigger(event) => event,
            other => {
                tracing::debug!(event = %other, "trigger profile ignores non-trigger event");
                return Ok(());
            }
        };
        match self.mapping.iter().find(|(name, _)| *name == event) {
            Some((_, command)) => self.callback.send_command_to_item(command.clone()),
            None => tracing::debug!(%event, "no command mapped to trigger"),
        }
        Ok(())
    }
}

/// Sends every trigger event name to the item as a string command.
pub struct TriggerEventStringProfile {
    callback: Arc<dyn ProfileCallback>,
}

impl TriggerEventStringProfile {
    #[must_use]
    pub fn new(callback: Arc<dyn ProfileCallback>) -> Self {
        Self { callback }
    }
}

impl Profile for TriggerEventStringProfile {
    fn handle_channel_event(&mut self, event: ChannelEvent) -> Result<(), ProfileError> {
        if let ChannelEvent::Trigger(event) = event {
            self.callback.send_command_to_item(Command::String(event));
        }
        Ok(())
    }
}
