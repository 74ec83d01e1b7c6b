//! Default and follow profiles: pass values through unchanged.

use std::sync::Arc;

use hublink_domain::value::{Command, State};

use crate::error::ProfileError;
use crate::ports::{ChannelEvent, Profile, ProfileCallback};

/// Channel state → item update, channel command → item command,
/// item command → channel command.
pub struct DefaultProfile {
    callback: Arc<dyn ProfileCallback>,
}

impl DefaultProfile {
    #[must_use]
    pub fn new(callback: Arc<dyn ProfileCallback>) -> Self {
        Self { callback }
    }
}

impl Profile for DefaultProfile {
    fn handle_channel_event(&mut self, event: ChannelEvent) -> Result<(), ProfileError> {
        forward_channel_event(self.callback.as_ref(), event);
        Ok(())
    }

    fn handle_item_command(&mut self, command: Command) -> Result<(), ProfileError> {
        self.callback.send_command_to_channel(command);
        Ok(())
    }
}

/// Like [`DefaultProfile`] on the channel side, but the item's state changes
/// are sent to the channel as commands and item commands are dropped.
pub struct FollowProfile {
    callback: Arc<dyn ProfileCallback>,
}

impl FollowProfile {
    #[must_use]
    pub fn new(callback: Arc<dyn ProfileCallback>) -> Self {
        Self { callback }
    }
}

impl Profile for FollowProfile {
    fn handle_channel_event(&mut self, event: ChannelEvent) -> Result<(), ProfileError> {
        forward_channel_event(self.callback.as_ref(), event);
        Ok(())
    }

    fn handle_item_state_change(&mut self, state: State) -> Result<(), ProfileError> {
        match Command::try_from(state) {
            Ok(command) => self.callback.send_command_to_channel(command),
            Err(error) => tracing::debug!(error = %error, "not following absent item state"),
        }
        Ok(())
    }
}

fn forward_channel_event(callback: &dyn ProfileCallback, event: ChannelEvent) {
    match event {
        ChannelEvent::State(state) => callback.send_update_to_item(state),
        ChannelEvent::Command(command) => callback.send_command_to_item(command),
        ChannelEvent::Trigger(event) => {
            tracing::debug!(%event, "state profile ignores trigger");
        }
    }
}
