//! Virtual channels — the device side of the demo links.

use std::sync::{Mutex, PoisonError};

use hublink_domain::channel::{Channel, ChannelKind, ChannelType};
use hublink_domain::uid::{ChannelTypeUid, ChannelUid};
use hublink_domain::value::{Command, State};

/// Channel types the virtual things declare on top of the system ones.
pub mod virtual_channel_types {
    use hublink_domain::uid::ChannelTypeUid;

    pub const TEMPERATURE: ChannelTypeUid = ChannelTypeUid::from_static("virtual", "temperature");
    pub const DOORBELL: ChannelTypeUid = ChannelTypeUid::from_static("virtual", "doorbell");
}

/// A simulated channel; it remembers what profiles sent back toward it.
#[derive(Debug)]
pub struct VirtualChannel {
    channel: Channel,
    received: Mutex<Received>,
}

#[derive(Debug, Default)]
struct Received {
    commands: Vec<Command>,
    state: Option<State>,
}

impl VirtualChannel {
    #[must_use]
    pub fn new(uid: ChannelUid, kind: ChannelKind, channel_type: ChannelTypeUid) -> Self {
        Self {
            channel: Channel::new(uid, kind).with_channel_type(channel_type),
            received: Mutex::new(Received::default()),
        }
    }

    #[must_use]
    pub fn channel(&self) -> &Channel {
        &self.channel
    }

    #[must_use]
    pub fn uid(&self) -> &ChannelUid {
        &self.channel.uid
    }

    /// Commands profiles sent to this channel, oldest first.
    #[must_use]
    pub fn received_commands(&self) -> Vec<Command> {
        self.lock().commands.clone()
    }

    /// Last state profiles pushed to this channel.
    #[must_use]
    pub fn last_state(&self) -> Option<State> {
        self.lock().state.clone()
    }

    pub fn receive_command(&self, command: Command) {
        tracing::debug!(
            channel = %self.channel.uid,
            command = %command,
            "virtual channel commanded"
        );
        self.lock().commands.push(command);
    }

    pub fn receive_update(&self, state: State) {
        tracing::debug!(channel = %self.channel.uid, state = %state, "virtual channel updated");
        self.lock().state = Some(state);
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Received> {
        self.received.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// Metadata for the virtual channel types.
#[must_use]
pub fn channel_types() -> Vec<ChannelType> {
    vec![
        ChannelType::new(
            virtual_channel_types::TEMPERATURE,
            ChannelKind::State,
            "Temperature",
        ),
        ChannelType::new(
            virtual_channel_types::DOORBELL,
            ChannelKind::Trigger,
            "Doorbell",
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use hublink_domain::value::OnOff;

    fn channel() -> VirtualChannel {
        VirtualChannel::new(
            "virtual:sensor:temperature".parse().unwrap(),
            ChannelKind::State,
            virtual_channel_types::TEMPERATURE,
        )
    }

    #[test]
    fn should_carry_channel_type() {
        let channel = channel();
        assert_eq!(
            channel.channel().channel_type,
            Some(virtual_channel_types::TEMPERATURE)
        );
        assert_eq!(channel.uid().as_str(), "virtual:sensor:temperature");
    }

    #[test]
    fn should_record_commands_and_last_state() {
        let channel = channel();
        channel.receive_command(Command::OnOff(OnOff::On));
        channel.receive_update(State::Decimal(1.0));
        channel.receive_update(State::Decimal(2.0));

        assert_eq!(channel.received_commands(), vec![Command::OnOff(OnOff::On)]);
        assert_eq!(channel.last_state(), Some(State::Decimal(2.0)));
    }

    #[test]
    fn should_declare_one_state_and_one_trigger_type() {
        let types = channel_types();
        assert_eq!(types.len(), 2);
        assert_eq!(types[0].kind, ChannelKind::State);
        assert_eq!(types[1].kind, ChannelKind::Trigger);
        assert_eq!(types[1].category(), None);
    }
}
