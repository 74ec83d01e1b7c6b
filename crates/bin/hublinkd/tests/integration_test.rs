//! End-to-end tests for the full hublinkd stack.
//!
//! Each test wires the virtual integration into a link service built from
//! the system factory, advisor, value converter and tokio scheduler, then
//! drives it the way the daemon does: channel events in, item state and
//! channel feedback out.

use std::sync::Arc;
use std::time::Duration;

use hublink_adapter_virtual::{
    BUTTON_CHANNEL, ItemStateChanged, ROCKER_CHANNEL, TEMPERATURE_CHANNEL, VirtualIntegration,
};
use hublink_app::advisor::SystemProfileAdvisor;
use hublink_app::error::LinkError;
use hublink_app::factory::SystemProfileFactory;
use hublink_app::ports::ChannelEvent;
use hublink_app::profiles::RampSettings;
use hublink_app::scheduler::TokioScheduler;
use hublink_app::services::link_service::LinkService;
use hublink_app::value_converter::BasicValueConverter;
use hublink_domain::error::{ConfigurationError, HubLinkError};
use hublink_domain::link::Link;
use hublink_domain::profile_type::system_profiles;
use hublink_domain::uid::ChannelUid;
use hublink_domain::value::{Command, OnOff, Percent, PlayPause, State, StopMove};

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

fn send(
    integration: &VirtualIntegration,
    service: &mut Service,
    channel: &str,
    event: ChannelEvent,
) {
    integration
        .dispatch_channel_event(service, &uid(channel), &event)
        .unwrap();
}

fn percent(value: f64) -> Command {
    Command::Percent(Percent::new(value).unwrap())
}

// ---------------------------------------------------------------------------
// Offset
// ---------------------------------------------------------------------------

#[tokio::test]
async fn should_offset_state_toward_item_and_reverse_item_command() {
    let integration = VirtualIntegration::default();
    let mut service = service(&integration);
    let link = Link::builder()
        .channel_uid(uid(TEMPERATURE_CHANNEL))
        .item_name("LivingRoom_Temperature")
        .profile(system_profiles::OFFSET)
        .option("offset", 5_i64)
        .build()
        .unwrap();
    let id = link.id;
    integration.activate(&mut service, link).unwrap();

    send(
        &integration,
        &mut service,
        TEMPERATURE_CHANNEL,
        ChannelEvent::State(State::Decimal(10.0)),
    );
    let item = integration.item("LivingRoom_Temperature").unwrap();
    assert_eq!(item.state(), State::Decimal(15.0));

    service.on_item_command(id, Command::Decimal(20.0)).unwrap();
    let channel = integration.channel(&uid(TEMPERATURE_CHANNEL)).unwrap();
    assert_eq!(channel.received_commands(), vec![Command::Decimal(15.0)]);
}

#[tokio::test]
async fn should_keep_link_inactive_when_offset_is_missing() {
    let integration = VirtualIntegration::default();
    let mut service = service(&integration);
    let link = Link::builder()
        .channel_uid(uid(TEMPERATURE_CHANNEL))
        .item_name("LivingRoom_Temperature")
        .profile(system_profiles::OFFSET)
        .build()
        .unwrap();
    let id = link.id;

    let result = integration.activate(&mut service, link);

    assert!(matches!(
        result,
        Err(HubLinkError::Configuration(ConfigurationError::Missing { .. }))
    ));
    assert!(!service.is_active(id));
}

// ---------------------------------------------------------------------------
// Hysteresis
// ---------------------------------------------------------------------------

#[tokio::test]
async fn should_switch_only_when_crossing_hysteresis_band() {
    let mut integration = VirtualIntegration::default();
    let mut changes = integration.take_changes().unwrap();
    let mut service = service(&integration);
    let link = Link::builder()
        .channel_uid(uid(TEMPERATURE_CHANNEL))
        .item_name("LivingRoom_Fan")
        .profile(system_profiles::HYSTERESIS)
        .option("lower", 10_i64)
        .option("upper", 20_i64)
        .build()
        .unwrap();
    integration.activate(&mut service, link).unwrap();
    let fan = integration.item("LivingRoom_Fan").unwrap();

    let mut observed = Vec::new();
    for value in [5.0, 25.0, 15.0, 8.0] {
        send(
            &integration,
            &mut service,
            TEMPERATURE_CHANNEL,
            ChannelEvent::State(State::Decimal(value)),
        );
        observed.push(fan.state());
    }

    assert_eq!(
        observed,
        vec![
            State::Null,
            State::OnOff(OnOff::On),
            State::OnOff(OnOff::On),
            State::OnOff(OnOff::Off),
        ]
    );
    let mut fan_changes = Vec::new();
    while let Ok(ItemStateChanged { item, state }) = changes.try_recv() {
        if item == "LivingRoom_Fan" {
            fan_changes.push(state);
        }
    }
    assert_eq!(
        fan_changes,
        vec![State::OnOff(OnOff::On), State::OnOff(OnOff::Off)]
    );
}

// ---------------------------------------------------------------------------
// Rocker dimmer
// ---------------------------------------------------------------------------

#[tokio::test(start_paused = true)]
async fn should_ramp_dimmer_while_rocker_is_held_and_stop_on_release() {
    let integration = VirtualIntegration::new(RampSettings::default());
    let mut service = service(&integration);
    integration.activate_all(&mut service);
    let light = integration.item("LivingRoom_Light").unwrap();

    send(&integration, &mut service, ROCKER_CHANNEL, ChannelEvent::trigger("DIR1_PRESSED"));
    // Ticks at 500, 700 and 900 ms.
    tokio::time::sleep(Duration::from_millis(950)).await;
    send(&integration, &mut service, ROCKER_CHANNEL, ChannelEvent::trigger("DIR1_RELEASED"));
    tokio::time::sleep(Duration::from_secs(1)).await;

    assert_eq!(
        light.commands(),
        vec![
            percent(10.0),
            percent(20.0),
            percent(30.0),
            Command::StopMove(StopMove::Stop),
        ]
    );
    assert_eq!(light.state(), State::Percent(Percent::new(30.0).unwrap()));
}

#[tokio::test(start_paused = true)]
async fn should_ramp_from_level_reported_by_item() {
    let mut integration = VirtualIntegration::default();
    let mut changes = integration.take_changes().unwrap();
    let mut service = service(&integration);
    integration.activate_all(&mut service);
    let light = integration.item("LivingRoom_Light").unwrap();

    light.update(State::Percent(Percent::new(50.0).unwrap()));
    while let Ok(change) = changes.try_recv() {
        VirtualIntegration::dispatch_item_change(&mut service, &change).unwrap();
    }

    send(&integration, &mut service, ROCKER_CHANNEL, ChannelEvent::trigger("DIR2_PRESSED"));
    tokio::time::sleep(Duration::from_millis(550)).await;

    assert_eq!(light.commands(), vec![percent(40.0)]);
}

#[tokio::test(start_paused = true)]
async fn should_clamp_ramp_at_full_brightness() {
    let ramp = RampSettings {
        step: 40.0,
        ..RampSettings::default()
    };
    let integration = VirtualIntegration::new(ramp);
    let mut service = service(&integration);
    integration.activate_all(&mut service);
    let light = integration.item("LivingRoom_Light").unwrap();

    send(&integration, &mut service, ROCKER_CHANNEL, ChannelEvent::trigger("DIR1_PRESSED"));
    tokio::time::sleep(Duration::from_secs(3)).await;

    assert_eq!(
        light.commands(),
        vec![percent(40.0), percent(80.0), percent(100.0)]
    );
}

#[tokio::test(start_paused = true)]
async fn should_stop_ramping_when_links_are_disposed() {
    let integration = VirtualIntegration::default();
    let mut service = service(&integration);
    let active = integration.activate_all(&mut service);
    let light = integration.item("LivingRoom_Light").unwrap();

    send(&integration, &mut service, ROCKER_CHANNEL, ChannelEvent::trigger("DIR1_PRESSED"));
    tokio::time::sleep(Duration::from_millis(600)).await;
    assert_eq!(service.deactivate_all(), active);
    tokio::time::sleep(Duration::from_secs(2)).await;

    assert_eq!(light.commands(), vec![percent(10.0)]);
}

// ---------------------------------------------------------------------------
// Toggle and lifecycle
// ---------------------------------------------------------------------------

#[tokio::test]
async fn should_alternate_player_on_each_button_press() {
    let mut integration = VirtualIntegration::default();
    let mut changes = integration.take_changes().unwrap();
    let mut service = service(&integration);
    integration.activate_all(&mut service);

    for _ in 0..3 {
        send(&integration, &mut service, BUTTON_CHANNEL, ChannelEvent::trigger("PRESSED"));
        send(&integration, &mut service, BUTTON_CHANNEL, ChannelEvent::trigger("RELEASED"));
        while let Ok(change) = changes.try_recv() {
            VirtualIntegration::dispatch_item_change(&mut service, &change).unwrap();
        }
    }

    let speaker = integration.item("Speaker").unwrap();
    assert_eq!(
        speaker.commands(),
        vec![
            Command::PlayPause(PlayPause::Play),
            Command::PlayPause(PlayPause::Pause),
            Command::PlayPause(PlayPause::Play),
        ]
    );
}

#[tokio::test]
async fn should_reject_events_for_deactivated_link() {
    let integration = VirtualIntegration::default();
    let mut service = service(&integration);
    integration.activate_all(&mut service);
    let link = integration
        .link_between(BUTTON_CHANNEL, "Speaker")
        .unwrap()
        .clone();

    service.deactivate(link.id).unwrap();

    assert!(matches!(
        service.on_channel_event(link.id, ChannelEvent::trigger("PRESSED")),
        Err(LinkError::NotActive(_))
    ));
    assert!(
        !service
            .links_for_channel(&link.channel_uid)
            .contains(&link.id)
    );
}
