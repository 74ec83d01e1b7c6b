//! Default profile suggestion for links that don't configure one.

use std::sync::Arc;

use hublink_domain::channel::{Channel, ChannelCategory, ChannelKind};
use hublink_domain::item::ItemType;
use hublink_domain::profile_type::system_profiles as sp;
use hublink_domain::uid::ProfileTypeUid;

use crate::ports::{ChannelTypeRegistry, ProfileAdvisor};

/// Suggests a `system:*` profile from the channel's kind and category and
/// the linked item's type.
pub struct SystemProfileAdvisor {
    channel_types: Arc<dyn ChannelTypeRegistry>,
}

impl SystemProfileAdvisor {
    #[must_use]
    pub fn new(channel_types: Arc<dyn ChannelTypeRegistry>) -> Self {
        Self { channel_types }
    }
}

impl ProfileAdvisor for SystemProfileAdvisor {
    fn suggest_profile_type(
        &self,
        kind: ChannelKind,
        category: Option<ChannelCategory>,
        item_type: Option<&ItemType>,
    ) -> Option<ProfileTypeUid> {
        match (kind, category) {
            (ChannelKind::State, None) => Some(sp::DEFAULT),
            // Trigger-only categories make no sense on a state channel.
            (ChannelKind::State, Some(_)) => None,
            (ChannelKind::Trigger, Some(ChannelCategory::RawButton)) => match item_type? {
                ItemType::Switch => Some(sp::RAWBUTTON_TOGGLE_SWITCH),
                ItemType::Player => Some(sp::RAWBUTTON_TOGGLE_PLAYER),
                ItemType::Rollershutter => Some(sp::RAWBUTTON_TOGGLE_ROLLERSHUTTER),
                _ => None,
            },
            (ChannelKind::Trigger, Some(ChannelCategory::RawRocker)) => match item_type? {
                ItemType::Dimmer => Some(sp::RAWROCKER_DIMMER),
                ItemType::Player => Some(sp::RAWROCKER_PLAY_PAUSE),
                ItemType::Rollershutter => Some(sp::RAWROCKER_UP_DOWN),
                ItemType::Switch => Some(sp::RAWROCKER_ON_OFF),
                _ => None,
            },
            (ChannelKind::Trigger, _) => match item_type? {
                ItemType::String => Some(sp::TRIGGER_EVENT_STRING),
                _ => None,
            },
        }
    }

    fn suggest_for_channel(
        &self,
        channel: &Channel,
        item_type: Option<&ItemType>,
    ) -> Option<ProfileTypeUid> {
        let channel_type = channel
            .channel_type
            .as_ref()
            .and_then(|uid| self.channel_types.channel_type(uid));
        match channel_type {
            Some(ct) => self.suggest_profile_type(ct.kind, ct.category(), item_type),
            None => match channel.kind {
                ChannelKind::State => Some(sp::DEFAULT),
                ChannelKind::Trigger => None,
            },
        }
    }
}
