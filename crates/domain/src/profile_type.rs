//! Profile types — metadata describing a profile policy.

use serde::{Deserialize, Serialize};

use crate::channel::ChannelKind;
use crate::item::ItemType;
use crate::uid::{ChannelTypeUid, ProfileTypeUid};

/// Uids of the built-in profile types.
pub mod system_profiles {
    use crate::uid::ProfileTypeUid;

    pub const DEFAULT: ProfileTypeUid = ProfileTypeUid::system("default");
    pub const FOLLOW: ProfileTypeUid = ProfileTypeUid::system("follow");
    pub const HYSTERESIS: ProfileTypeUid = ProfileTypeUid::system("hysteresis");
    pub const OFFSET: ProfileTypeUid = ProfileTypeUid::system("offset");
    pub const RANGE: ProfileTypeUid = ProfileTypeUid::system("range");
    pub const BUTTON_TOGGLE_SWITCH: ProfileTypeUid = ProfileTypeUid::system("button-toggle-switch");
    pub const BUTTON_TOGGLE_PLAYER: ProfileTypeUid = ProfileTypeUid::system("button-toggle-player");
    pub const BUTTON_TOGGLE_ROLLERSHUTTER: ProfileTypeUid =
        ProfileTypeUid::system("button-toggle-rollershutter");
    pub const RAWBUTTON_ON_OFF_SWITCH: ProfileTypeUid =
        ProfileTypeUid::system("rawbutton-on-off-switch");
    pub const RAWBUTTON_TOGGLE_PLAYER: ProfileTypeUid =
        ProfileTypeUid::system("rawbutton-toggle-player");
    pub const RAWBUTTON_TOGGLE_ROLLERSHUTTER: ProfileTypeUid =
        ProfileTypeUid::system("rawbutton-toggle-rollershutter");
    pub const RAWBUTTON_TOGGLE_SWITCH: ProfileTypeUid =
        ProfileTypeUid::system("rawbutton-toggle-switch");
    pub const RAWROCKER_DIMMER: ProfileTypeUid = ProfileTypeUid::system("rawrocker-to-dimmer");
    pub const RAWROCKER_NEXT_PREVIOUS: ProfileTypeUid =
        ProfileTypeUid::system("rawrocker-to-next-previous");
    pub const RAWROCKER_ON_OFF: ProfileTypeUid = ProfileTypeUid::system("rawrocker-to-on-off");
    pub const RAWROCKER_PLAY_PAUSE: ProfileTypeUid =
        ProfileTypeUid::system("rawrocker-to-play-pause");
    pub const RAWROCKER_REWIND_FASTFORWARD: ProfileTypeUid =
        ProfileTypeUid::system("rawrocker-to-rewind-fastforward");
    pub const RAWROCKER_STOP_MOVE: ProfileTypeUid =
        ProfileTypeUid::system("rawrocker-to-stop-move");
    pub const RAWROCKER_UP_DOWN: ProfileTypeUid = ProfileTypeUid::system("rawrocker-to-up-down");
    pub const TRIGGER_EVENT_STRING: ProfileTypeUid = ProfileTypeUid::system("trigger-event-string");
    pub const TIMESTAMP_CHANGE: ProfileTypeUid = ProfileTypeUid::system("timestamp-change");
    pub const TIMESTAMP_OFFSET: ProfileTypeUid = ProfileTypeUid::system("timestamp-offset");
    pub const TIMESTAMP_TRIGGER: ProfileTypeUid = ProfileTypeUid::system("timestamp-trigger");
    pub const TIMESTAMP_UPDATE: ProfileTypeUid = ProfileTypeUid::system("timestamp-update");
}

/// Describes one profile policy: which items and channels it fits.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProfileType {
    pub uid: ProfileTypeUid,
    pub label: String,
    #[serde(default)]
    pub description: Option<String>,
    /// Channel kind the profile consumes.
    pub kind: ChannelKind,
    /// Empty means any item type.
    #[serde(default)]
    pub supported_item_types: Vec<ItemType>,
    /// Trigger profiles only; empty means any trigger channel type.
    #[serde(default)]
    pub supported_channel_types: Vec<ChannelTypeUid>,
}

impl ProfileType {
    /// A state profile accepting the given item types.
    #[must_use]
    pub fn state(uid: ProfileTypeUid, label: impl Into<String>, items: &[ItemType]) -> Self {
        Self {
            uid,
            label: label.into(),
            description: None,
            kind: ChannelKind::State,
            supported_item_types: items.to_vec(),
            supported_channel_types: Vec::new(),
        }
    }

    /// A trigger profile accepting the given item and channel types.
    #[must_use]
    pub fn trigger(
        uid: ProfileTypeUid,
        label: impl Into<String>,
        items: &[ItemType],
        channel_types: &[ChannelTypeUid],
    ) -> Self {
        Self {
            uid,
            label: label.into(),
            description: None,
            kind: ChannelKind::Trigger,
            supported_item_types: items.to_vec(),
            supported_channel_types: channel_types.to_vec(),
        }
    }

    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Whether an item of `item_type` may be linked through this profile.
    #[must_use]
    pub fn supports_item_type(&self, item_type: ItemType) -> bool {
        self.supported_item_types.is_empty()
            || self
                .supported_item_types
                .iter()
                .any(|t| t.same_base(item_type))
    }

    /// Whether a trigger channel of `channel_type` fits this profile.
    #[must_use]
    pub fn supports_channel_type(&self, channel_type: &ChannelTypeUid) -> bool {
        self.supported_channel_types.is_empty()
            || self.supported_channel_types.contains(channel_type)
    }
}
