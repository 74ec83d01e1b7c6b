//! Profile ports — the policy contract and the boundary a profile emits into.
//!
//! A profile sits on one link between a channel (device side) and an item
//! (application side). The link layer feeds it events from both sides; the
//! profile reacts by emitting zero or more outputs through its
//! [`ProfileCallback`].

use std::fmt;
use std::sync::Arc;

use hublink_domain::channel::{Channel, ChannelCategory, ChannelKind};
use hublink_domain::configuration::Configuration;
use hublink_domain::error::ConfigurationError;
use hublink_domain::item::ItemType;
use hublink_domain::profile_type::ProfileType;
use hublink_domain::uid::ProfileTypeUid;
use hublink_domain::value::{Command, State};

use crate::error::ProfileError;
use crate::ports::{Scheduler, ValueConverter};
use crate::profiles::ProfileInstance;

/// Something that happened on the channel side of a link.
#[derive(Debug, Clone, PartialEq)]
pub enum ChannelEvent {
    /// The channel reported a new state.
    State(State),
    /// The channel issued a command toward the item.
    Command(Command),
    /// The trigger channel fired the named event.
    Trigger(String),
}

impl ChannelEvent {
    #[must_use]
    pub fn trigger(event: impl Into<String>) -> Self {
        Self::Trigger(event.into())
    }
}

impl fmt::Display for ChannelEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::State(state) => write!(f, "state {state}"),
            Self::Command(command) => write!(f, "command {command}"),
            Self::Trigger(event) => write!(f, "trigger {event}"),
        }
    }
}

/// Sink for everything a profile emits.
///
/// Calls are fire-and-forget: delivery failures are the implementor's
/// concern and never reach the profile.
pub trait ProfileCallback: Send + Sync {
    fn send_command_to_item(&self, command: Command);

    fn send_update_to_item(&self, state: State);

    /// Update a secondary attribute of the item (e.g. `last_changed`).
    fn send_attribute_update_to_item(&self, attribute: &str, state: State);

    fn send_command_to_channel(&self, command: Command);

    fn send_update_to_channel(&self, state: State);
}

/// Per-link environment handed to a profile at construction.
pub trait ProfileContext {
    /// The link's options.
    fn configuration(&self) -> &Configuration;

    /// Timer facility, if the host provides one.
    fn scheduler(&self) -> Option<Arc<dyn Scheduler>>;

    fn value_converter(&self) -> Arc<dyn ValueConverter>;
}

/// A stateful transformation policy bound to one link.
///
/// Handlers run serially for a given link. An `Err` is a per-event fault:
/// the event is dropped and the profile stays usable.
pub trait Profile: Send {
    /// React to an event coming from the channel.
    ///
    /// # Errors
    ///
    /// Returns [`ProfileError`] when the event cannot be transformed.
    fn handle_channel_event(&mut self, event: ChannelEvent) -> Result<(), ProfileError>;

    /// React to the linked item changing state.
    ///
    /// # Errors
    ///
    /// Returns [`ProfileError`] when the state cannot be interpreted.
    fn handle_item_state_change(&mut self, _state: State) -> Result<(), ProfileError> {
        Ok(())
    }

    /// React to a command issued on the linked item.
    ///
    /// # Errors
    ///
    /// Returns [`ProfileError`] when the command cannot be transformed.
    fn handle_item_command(&mut self, _command: Command) -> Result<(), ProfileError> {
        Ok(())
    }

    /// Release resources: cancel any scheduled work. Called exactly once.
    fn dispose(&mut self) {}
}

/// Builds live profile instances from a profile type uid.
pub trait ProfileFactory: Send + Sync {
    /// Construct the profile identified by `uid` for one link.
    ///
    /// Returns `Ok(None)` when `uid` is not one this factory knows.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigurationError`] when the link's options are missing or
    /// malformed, or a required facility (scheduler) is unavailable.
    fn create_profile(
        &self,
        uid: &ProfileTypeUid,
        callback: Arc<dyn ProfileCallback>,
        context: &dyn ProfileContext,
    ) -> Result<Option<ProfileInstance>, ConfigurationError>;

    fn supported_profile_type_uids(&self) -> Vec<ProfileTypeUid>;
}

/// Suggests a profile type for links that don't configure one.
pub trait ProfileAdvisor: Send + Sync {
    /// Suggest from the channel's kind, category and the item type.
    fn suggest_profile_type(
        &self,
        kind: ChannelKind,
        category: Option<ChannelCategory>,
        item_type: Option<&ItemType>,
    ) -> Option<ProfileTypeUid>;

    /// Suggest for a concrete channel, resolving its channel type first.
    fn suggest_for_channel(
        &self,
        channel: &Channel,
        item_type: Option<&ItemType>,
    ) -> Option<ProfileTypeUid>;
}

/// Read-only source of profile type metadata.
pub trait ProfileTypeProvider: Send + Sync {
    fn profile_types(&self) -> Vec<ProfileType>;

    fn profile_type_uids(&self) -> Vec<ProfileTypeUid> {
        self.profile_types().into_iter().map(|pt| pt.uid).collect()
    }

    fn profile_type(&self, uid: &ProfileTypeUid) -> Option<ProfileType> {
        self.profile_types().into_iter().find(|pt| &pt.uid == uid)
    }
}
