//! # hublink-adapter-virtual
//!
//! Virtual/demo integration — simulated things whose channels are linked to
//! simulated items through the system profiles.
//!
//! ## Things
//! - `virtual:sensor:temperature`: temperature readings (state channel)
//! - `virtual:remote:rocker` / `virtual:remote:blinds`: raw rockers
//! - `virtual:remote:button`: raw button
//! - `virtual:doorbell:ring`: doorbell trigger
//!
//! ## Items
//! A switch, a dimmer, a temperature number, a player, a rollershutter, two
//! strings and a date-time. Each link gets a [`VirtualLinkCallback`] that
//! applies profile output to its item and records whatever is sent back to
//! the channel. Item state changes are reported on an unbounded channel so
//! the host can feed them back into the links.

pub mod callback;
pub mod channels;
pub mod items;

use std::collections::HashMap;
use std::sync::Arc;

use hublink_app::channel_types::InMemoryChannelTypes;
use hublink_app::error::LinkError;
use hublink_app::ports::{ChannelEvent, ProfileAdvisor, ProfileFactory};
use hublink_app::profiles::RampSettings;
use hublink_app::services::link_service::LinkService;
use hublink_domain::channel::{ChannelKind, system_channel_types};
use hublink_domain::error::{HubLinkError, NotFoundError};
use hublink_domain::item::ItemType;
use hublink_domain::link::Link;
use hublink_domain::profile_type::system_profiles;
use hublink_domain::uid::{ChannelTypeUid, ChannelUid};
use hublink_domain::value::{Dimension, State};
use tokio::sync::mpsc::{self, UnboundedReceiver};

pub use callback::VirtualLinkCallback;
pub use channels::{VirtualChannel, virtual_channel_types};
pub use items::{ItemStateChanged, VirtualItem};

pub const TEMPERATURE_CHANNEL: &str = "virtual:sensor:temperature";
pub const ROCKER_CHANNEL: &str = "virtual:remote:rocker";
pub const BLINDS_CHANNEL: &str = "virtual:remote:blinds";
pub const BUTTON_CHANNEL: &str = "virtual:remote:button";
pub const DOORBELL_CHANNEL: &str = "virtual:doorbell:ring";

/// The demo things, their items and the links between them.
pub struct VirtualIntegration {
    items: HashMap<String, Arc<VirtualItem>>,
    channels: HashMap<ChannelUid, Arc<VirtualChannel>>,
    links: Vec<Link>,
    changes: Option<UnboundedReceiver<ItemStateChanged>>,
}

impl Default for VirtualIntegration {
    fn default() -> Self {
        Self::new(RampSettings::default())
    }
}

impl VirtualIntegration {
    pub const NAME: &'static str = "virtual";

    /// Build the demo set; `ramp` configures the rocker-dimmer link.
    #[must_use]
    pub fn new(ramp: RampSettings) -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        let items = [
            ("LivingRoom_Temperature", ItemType::Number(Some(Dimension::Temperature))),
            ("LivingRoom_Fan", ItemType::Switch),
            ("LivingRoom_Light", ItemType::Dimmer),
            ("Speaker", ItemType::Player),
            ("Blinds", ItemType::Rollershutter),
            ("Remote_LastEvent", ItemType::String),
            ("Doorbell_LastRing", ItemType::DateTime),
            ("Doorbell_LastEvent", ItemType::String),
        ]
        .into_iter()
        .map(|(name, item_type)| {
            let item = VirtualItem::new(name, item_type).with_changes(tx.clone());
            (name.to_string(), Arc::new(item))
        })
        .collect();

        let channels = [
            (TEMPERATURE_CHANNEL, ChannelKind::State, virtual_channel_types::TEMPERATURE),
            (ROCKER_CHANNEL, ChannelKind::Trigger, system_channel_types::RAWROCKER),
            (BLINDS_CHANNEL, ChannelKind::Trigger, system_channel_types::RAWROCKER),
            (BUTTON_CHANNEL, ChannelKind::Trigger, system_channel_types::RAWBUTTON),
            (DOORBELL_CHANNEL, ChannelKind::Trigger, virtual_channel_types::DOORBELL),
        ]
        .into_iter()
        .filter_map(|(uid, kind, channel_type)| virtual_channel(uid, kind, channel_type))
        .map(|channel| (channel.uid().clone(), Arc::new(channel)))
        .collect();

        Self {
            items,
            channels,
            links: demo_links(ramp),
            changes: Some(rx),
        }
    }

    /// The system channel types plus the virtual ones.
    #[must_use]
    pub fn channel_types(&self) -> InMemoryChannelTypes {
        channels::channel_types()
            .into_iter()
            .fold(InMemoryChannelTypes::new(), InMemoryChannelTypes::with)
    }

    #[must_use]
    pub fn item(&self, name: &str) -> Option<Arc<VirtualItem>> {
        self.items.get(name).cloned()
    }

    #[must_use]
    pub fn channel(&self, uid: &ChannelUid) -> Option<Arc<VirtualChannel>> {
        self.channels.get(uid).cloned()
    }

    /// Current state of every item, sorted by name.
    #[must_use]
    pub fn states(&self) -> Vec<(String, State)> {
        let mut states: Vec<_> = self
            .items
            .values()
            .map(|item| (item.name().to_string(), item.state()))
            .collect();
        states.sort_by(|a, b| a.0.cmp(&b.0));
        states
    }

    #[must_use]
    pub fn links(&self) -> &[Link] {
        &self.links
    }

    /// The demo link between `channel` and `item`, if one exists.
    #[must_use]
    pub fn link_between(&self, channel: &str, item: &str) -> Option<&Link> {
        self.links
            .iter()
            .find(|link| link.channel_uid.as_str() == channel && link.item_name == item)
    }

    /// Take the receiving end of the item change feed. Only the first call
    /// gets it.
    pub fn take_changes(&mut self) -> Option<UnboundedReceiver<ItemStateChanged>> {
        self.changes.take()
    }

    /// Activate one link against the virtual item and channel it names.
    ///
    /// # Errors
    ///
    /// Returns [`HubLinkError::NotFound`] for unknown items and channels and
    /// the [`LinkError`] of the activation otherwise.
    pub fn activate<F: ProfileFactory, A: ProfileAdvisor>(
        &self,
        service: &mut LinkService<F, A>,
        link: Link,
    ) -> Result<(), HubLinkError> {
        let item = self.find_item(&link.item_name)?;
        let channel = self.find_channel(&link.channel_uid)?;
        let callback = Arc::new(VirtualLinkCallback::new(
            Arc::clone(&item),
            Arc::clone(&channel),
        ));
        service.activate(link, channel.channel(), Some(item.item_type()), callback)?;
        Ok(())
    }

    /// Activate every demo link; failures are logged and skipped.
    ///
    /// Returns how many links became active.
    pub fn activate_all<F: ProfileFactory, A: ProfileAdvisor>(
        &self,
        service: &mut LinkService<F, A>,
    ) -> usize {
        let mut active = 0;
        for link in &self.links {
            match self.activate(service, link.clone()) {
                Ok(()) => active += 1,
                Err(error) => tracing::warn!(
                    link_id = %link.id,
                    channel = %link.channel_uid,
                    item = %link.item_name,
                    error = %error,
                    "virtual link not activated"
                ),
            }
        }
        tracing::info!(integration = Self::NAME, active, "virtual links activated");
        active
    }

    /// Deliver `event` to every active link of `channel`.
    ///
    /// Returns the number of links the event reached.
    ///
    /// # Errors
    ///
    /// Returns [`HubLinkError::NotFound`] when `channel` is not a virtual one.
    pub fn dispatch_channel_event<F: ProfileFactory, A: ProfileAdvisor>(
        &self,
        service: &mut LinkService<F, A>,
        channel: &ChannelUid,
        event: &ChannelEvent,
    ) -> Result<usize, HubLinkError> {
        self.find_channel(channel)?;
        let links = service.links_for_channel(channel);
        for id in &links {
            service.on_channel_event(*id, event.clone())?;
        }
        Ok(links.len())
    }

    /// Feed an item state change back into every active link of the item.
    ///
    /// # Errors
    ///
    /// Returns [`LinkError::NotActive`] only if a link vanished mid-dispatch.
    pub fn dispatch_item_change<F: ProfileFactory, A: ProfileAdvisor>(
        service: &mut LinkService<F, A>,
        change: &ItemStateChanged,
    ) -> Result<usize, LinkError> {
        let links = service.links_for_item(&change.item);
        for id in &links {
            service.on_item_state_change(*id, change.state.clone())?;
        }
        Ok(links.len())
    }

    fn find_item(&self, name: &str) -> Result<Arc<VirtualItem>, HubLinkError> {
        self.item(name).ok_or_else(|| {
            NotFoundError {
                entity: "Item",
                id: name.to_string(),
            }
            .into()
        })
    }

    fn find_channel(&self, uid: &ChannelUid) -> Result<Arc<VirtualChannel>, HubLinkError> {
        self.channel(uid).ok_or_else(|| {
            NotFoundError {
                entity: "Channel",
                id: uid.to_string(),
            }
            .into()
        })
    }
}

fn virtual_channel(
    uid: &str,
    kind: ChannelKind,
    channel_type: ChannelTypeUid,
) -> Option<VirtualChannel> {
    let uid = uid.parse().ok()?;
    Some(VirtualChannel::new(uid, kind, channel_type))
}

fn demo_links(ramp: RampSettings) -> Vec<Link> {
    let builders = [
        Link::builder()
            .item_name("LivingRoom_Temperature")
            .profile(system_profiles::OFFSET)
            .option("offset", "-0.5 °C"),
        Link::builder()
            .item_name("LivingRoom_Fan")
            .profile(system_profiles::HYSTERESIS)
            .option("lower", "24 °C")
            .option("upper", "26 °C"),
        Link::builder()
            .item_name("LivingRoom_Light")
            .option("step", ramp.step)
            .option("initialDelay", millis(ramp.initial_delay))
            .option("repeatInterval", millis(ramp.repeat_interval)),
        Link::builder().item_name("Blinds"),
        Link::builder().item_name("Speaker"),
        Link::builder()
            .item_name("Remote_LastEvent")
            .profile(system_profiles::TRIGGER_EVENT_STRING),
        Link::builder()
            .item_name("Doorbell_LastRing")
            .profile(system_profiles::TIMESTAMP_TRIGGER),
        Link::builder().item_name("Doorbell_LastEvent"),
    ];
    let channels = [
        TEMPERATURE_CHANNEL,
        TEMPERATURE_CHANNEL,
        ROCKER_CHANNEL,
        BLINDS_CHANNEL,
        BUTTON_CHANNEL,
        BUTTON_CHANNEL,
        DOORBELL_CHANNEL,
        DOORBELL_CHANNEL,
    ];
    builders
        .into_iter()
        .zip(channels)
        .filter_map(|(builder, channel)| {
            let uid = channel.parse().ok()?;
            builder.channel_uid(uid).build().ok()
        })
        .collect()
}

fn millis(duration: std::time::Duration) -> f64 {
    duration.as_secs_f64() * 1_000.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use hublink_app::advisor::SystemProfileAdvisor;
    use hublink_app::factory::SystemProfileFactory;
    use hublink_app::scheduler::TokioScheduler;
    use hublink_app::value_converter::BasicValueConverter;
    use hublink_domain::value::{Command, OnOff, PlayPause, Quantity, Unit, UpDown};

    type Service = LinkService<SystemProfileFactory, SystemProfileAdvisor>;

    fn service(integration: &VirtualIntegration) -> Service {
        LinkService::new(
            SystemProfileFactory::new(),
            SystemProfileAdvisor::new(Arc::new(integration.channel_types())),
            Arc::new(BasicValueConverter),
        )
        .with_scheduler(Arc::new(TokioScheduler::current().unwrap()))
    }

    fn uid(s: &str) -> ChannelUid {
        s.parse().unwrap()
    }

    #[test]
    fn should_declare_demo_items_channels_and_links() {
        let integration = VirtualIntegration::default();
        assert_eq!(integration.states().len(), 8);
        assert!(integration.item("LivingRoom_Light").is_some());
        assert!(integration.channel(&uid(ROCKER_CHANNEL)).is_some());
        assert_eq!(integration.links().len(), 8);
    }

    #[test]
    fn should_include_virtual_channel_types() {
        use hublink_app::ports::ChannelTypeRegistry;

        let types = VirtualIntegration::default().channel_types();
        assert!(types.channel_type(&virtual_channel_types::TEMPERATURE).is_some());
        assert!(types.channel_type(&system_channel_types::RAWROCKER).is_some());
    }

    #[test]
    fn should_carry_ramp_settings_into_rocker_link() {
        let ramp = RampSettings {
            step: 5.0,
            ..RampSettings::default()
        };
        let integration = VirtualIntegration::new(ramp);
        let link = integration
            .link_between(ROCKER_CHANNEL, "LivingRoom_Light")
            .unwrap();
        assert_eq!(link.configuration.get_f64("step").unwrap(), Some(5.0));
        assert_eq!(
            link.configuration.get_f64("repeatInterval").unwrap(),
            Some(200.0)
        );
    }

    #[test]
    fn should_hand_out_change_feed_once() {
        let mut integration = VirtualIntegration::default();
        assert!(integration.take_changes().is_some());
        assert!(integration.take_changes().is_none());
    }

    #[tokio::test(start_paused = true)]
    async fn should_return_not_found_when_item_is_unknown() {
        let integration = VirtualIntegration::default();
        let mut service = service(&integration);
        let link = Link::builder()
            .channel_uid(uid(BUTTON_CHANNEL))
            .item_name("Garage_Door")
            .build()
            .unwrap();
        let id = link.id;
        assert!(matches!(
            integration.activate(&mut service, link),
            Err(HubLinkError::NotFound(_))
        ));
        assert!(!service.is_active(id));
    }

    #[tokio::test(start_paused = true)]
    async fn should_activate_every_demo_link() {
        let integration = VirtualIntegration::default();
        let mut service = service(&integration);
        assert_eq!(integration.activate_all(&mut service), 8);

        let blinds = integration.link_between(BLINDS_CHANNEL, "Blinds").unwrap();
        assert_eq!(
            service.active_profile_type(blinds.id),
            Some(&system_profiles::RAWROCKER_UP_DOWN)
        );
        let speaker = integration.link_between(BUTTON_CHANNEL, "Speaker").unwrap();
        assert_eq!(
            service.active_profile_type(speaker.id),
            Some(&system_profiles::RAWBUTTON_TOGGLE_PLAYER)
        );
        let event = integration
            .link_between(DOORBELL_CHANNEL, "Doorbell_LastEvent")
            .unwrap();
        assert_eq!(
            service.active_profile_type(event.id),
            Some(&system_profiles::TRIGGER_EVENT_STRING)
        );
    }

    #[tokio::test(start_paused = true)]
    async fn should_route_temperature_to_offset_and_hysteresis_links() {
        let integration = VirtualIntegration::default();
        let mut service = service(&integration);
        integration.activate_all(&mut service);

        let reached = integration
            .dispatch_channel_event(
                &mut service,
                &uid(TEMPERATURE_CHANNEL),
                &ChannelEvent::State(State::Quantity(Quantity::new(27.0, Unit::Celsius))),
            )
            .unwrap();

        assert_eq!(reached, 2);
        assert_eq!(
            integration.item("LivingRoom_Temperature").unwrap().state(),
            State::Quantity(Quantity::new(26.5, Unit::Celsius))
        );
        assert_eq!(
            integration.item("LivingRoom_Fan").unwrap().state(),
            State::OnOff(OnOff::On)
        );
    }

    #[tokio::test(start_paused = true)]
    async fn should_route_button_press_to_player_and_event_string() {
        let integration = VirtualIntegration::default();
        let mut service = service(&integration);
        integration.activate_all(&mut service);

        integration
            .dispatch_channel_event(
                &mut service,
                &uid(BUTTON_CHANNEL),
                &ChannelEvent::trigger("PRESSED"),
            )
            .unwrap();

        let speaker = integration.item("Speaker").unwrap();
        assert_eq!(speaker.commands(), vec![Command::PlayPause(PlayPause::Play)]);
        assert_eq!(
            integration.item("Remote_LastEvent").unwrap().state(),
            State::String("PRESSED".into())
        );
    }

    #[tokio::test(start_paused = true)]
    async fn should_move_blinds_with_rocker() {
        let integration = VirtualIntegration::default();
        let mut service = service(&integration);
        integration.activate_all(&mut service);

        integration
            .dispatch_channel_event(
                &mut service,
                &uid(BLINDS_CHANNEL),
                &ChannelEvent::trigger("DIR2_PRESSED"),
            )
            .unwrap();

        let blinds = integration.item("Blinds").unwrap();
        assert_eq!(blinds.commands(), vec![Command::UpDown(UpDown::Down)]);
    }

    #[tokio::test(start_paused = true)]
    async fn should_report_item_changes_for_feedback() {
        let mut integration = VirtualIntegration::default();
        let mut changes = integration.take_changes().unwrap();
        let mut service = service(&integration);
        integration.activate_all(&mut service);

        integration
            .dispatch_channel_event(
                &mut service,
                &uid(BUTTON_CHANNEL),
                &ChannelEvent::trigger("PRESSED"),
            )
            .unwrap();

        let mut reached = 0;
        while let Ok(change) = changes.try_recv() {
            reached += VirtualIntegration::dispatch_item_change(&mut service, &change).unwrap();
        }
        // Speaker and Remote_LastEvent each have one link.
        assert_eq!(reached, 2);
    }

    #[tokio::test(start_paused = true)]
    async fn should_return_not_found_when_channel_is_unknown() {
        let integration = VirtualIntegration::default();
        let mut service = service(&integration);
        let result = integration.dispatch_channel_event(
            &mut service,
            &uid("virtual:garage:door"),
            &ChannelEvent::trigger("PRESSED"),
        );
        assert!(matches!(result, Err(HubLinkError::NotFound(_))));
    }
}
