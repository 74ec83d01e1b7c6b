//! Catalog of the built-in profile types.

use hublink_domain::channel::system_channel_types::{BUTTON, RAWBUTTON, RAWROCKER};
use hublink_domain::item::ItemType;
use hublink_domain::profile_type::{ProfileType, system_profiles as sp};

use crate::ports::ProfileTypeProvider;

/// Static, read-only list of every `system:*` profile type.
#[derive(Debug, Clone)]
pub struct SystemProfileTypes {
    types: Vec<ProfileType>,
}

impl Default for SystemProfileTypes {
    fn default() -> Self {
        Self::new()
    }
}

impl SystemProfileTypes {
    #[must_use]
    pub fn new() -> Self {
        use ItemType::{Color, DateTime, Dimmer, Number, Player, Rollershutter, Switch};

        let on_off_items = [Switch, Dimmer, Color];
        let types = vec![
            ProfileType::state(sp::DEFAULT, "Default", &[])
                .with_description("Passes states and commands through unchanged."),
            ProfileType::state(sp::FOLLOW, "Follow", &[])
                .with_description("Sends the item's state changes to the channel as commands."),
            ProfileType::state(sp::HYSTERESIS, "Hysteresis", &[Switch])
                .with_description("Switches on above an upper and off below a lower threshold."),
            ProfileType::state(sp::OFFSET, "Offset", &[Number(None)])
                .with_description("Adds an offset toward the item and removes it on the way back."),
            ProfileType::state(sp::RANGE, "Range", &[Number(None), Dimmer])
                .with_description("Rescales a numeric input range onto an output range."),
            ProfileType::trigger(
                sp::BUTTON_TOGGLE_SWITCH,
                "Button Toggle Switch",
                &on_off_items,
                &[BUTTON],
            ),
            ProfileType::trigger(
                sp::BUTTON_TOGGLE_PLAYER,
                "Button Toggle Player",
                &[Player],
                &[BUTTON],
            ),
            ProfileType::trigger(
                sp::BUTTON_TOGGLE_ROLLERSHUTTER,
                "Button Toggle Rollershutter",
                &[Rollershutter],
                &[BUTTON],
            ),
            ProfileType::trigger(
                sp::RAWBUTTON_ON_OFF_SWITCH,
                "Raw Button To On Off",
                &on_off_items,
                &[RAWBUTTON],
            ),
            ProfileType::trigger(
                sp::RAWBUTTON_TOGGLE_PLAYER,
                "Raw Button Toggle Player",
                &[Player],
                &[RAWBUTTON],
            ),
            ProfileType::trigger(
                sp::RAWBUTTON_TOGGLE_ROLLERSHUTTER,
                "Raw Button Toggle Rollershutter",
                &[Rollershutter],
                &[RAWBUTTON],
            ),
            ProfileType::trigger(
                sp::RAWBUTTON_TOGGLE_SWITCH,
                "Raw Button Toggle Switch",
                &on_off_items,
                &[RAWBUTTON],
            ),
            ProfileType::trigger(
                sp::RAWROCKER_DIMMER,
                "Raw Rocker To Dimmer",
                &[Dimmer, Color],
                &[RAWROCKER],
            )
            .with_description("Ramps the level while a rocker side is held."),
            ProfileType::trigger(
                sp::RAWROCKER_NEXT_PREVIOUS,
                "Raw Rocker To Next/Previous",
                &[Player],
                &[RAWROCKER],
            ),
            ProfileType::trigger(
                sp::RAWROCKER_ON_OFF,
                "Raw Rocker To On/Off",
                &on_off_items,
                &[RAWROCKER],
            ),
            ProfileType::trigger(
                sp::RAWROCKER_PLAY_PAUSE,
                "Raw Rocker To Play/Pause",
                &[Player],
                &[RAWROCKER],
            ),
            ProfileType::trigger(
                sp::RAWROCKER_REWIND_FASTFORWARD,
                "Raw Rocker To Rewind/Fastforward",
                &[Player],
                &[RAWROCKER],
            ),
            ProfileType::trigger(
                sp::RAWROCKER_STOP_MOVE,
                "Raw Rocker To Stop/Move",
                &[Rollershutter],
                &[RAWROCKER],
            ),
            ProfileType::trigger(
                sp::RAWROCKER_UP_DOWN,
                "Raw Rocker To Up/Down",
                &[Rollershutter],
                &[RAWROCKER],
            ),
            ProfileType::trigger(
                sp::TRIGGER_EVENT_STRING,
                "Trigger Event String",
                &[ItemType::String],
                &[],
            )
            .with_description("Sends the trigger event name as a string command."),
            ProfileType::state(sp::TIMESTAMP_CHANGE, "Timestamp on Change", &[])
                .with_description("Records when the channel state last changed."),
            ProfileType::state(sp::TIMESTAMP_OFFSET, "Timestamp Offset", &[DateTime])
                .with_description("Shifts date-time values by a fixed offset."),
            ProfileType::trigger(sp::TIMESTAMP_TRIGGER, "Timestamp on Trigger", &[DateTime], &[])
                .with_description("Records when the trigger last fired."),
            ProfileType::state(sp::TIMESTAMP_UPDATE, "Timestamp on Update", &[])
                .with_description("Records when the channel state was last updated."),
        ];
        Self { types }
    }
}

impl ProfileTypeProvider for SystemProfileTypes {
    fn profile_types(&self) -> Vec<ProfileType> {
        self.types.clone()
    }
}
