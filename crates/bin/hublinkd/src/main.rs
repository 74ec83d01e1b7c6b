//! # hublinkd — hublink daemon
//!
//! Composition root that wires the profile engine to the virtual integration.
//!
//! ## Responsibilities
//! - Parse configuration (config file, env vars)
//! - Initialise `tracing-subscriber`
//! - Construct the link service with the system factory, advisor, value
//!   converter and the tokio scheduler
//! - Activate the virtual demo links
//! - Read channel events from stdin and route them to the links
//! - Feed virtual item state changes back into the links
//! - Dispose every link on shutdown (SIGINT)
//!
//! ## Dependency rule
//! This is the **only** crate that depends on all other crates.
//! It is the wiring layer — no domain logic belongs here.

mod config;
mod input;

use std::sync::Arc;

use anyhow::Context;
use hublink_adapter_virtual::VirtualIntegration;
use hublink_app::advisor::SystemProfileAdvisor;
use hublink_app::factory::SystemProfileFactory;
use hublink_app::ports::{ProfileAdvisor, ProfileFactory};
use hublink_app::scheduler::TokioScheduler;
use hublink_app::services::link_service::LinkService;
use hublink_app::value_converter::BasicValueConverter;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing_subscriber::EnvFilter;

use crate::config::Config;
use crate::input::Input;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::load().context("loading hublink.toml")?;
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(&config.logging.filter))
        .init();

    let mut integration = VirtualIntegration::new(config.ramp_settings());
    let scheduler = TokioScheduler::current()?;
    let mut service = LinkService::new(
        SystemProfileFactory::new(),
        SystemProfileAdvisor::new(Arc::new(integration.channel_types())),
        Arc::new(BasicValueConverter),
    )
    .with_scheduler(Arc::new(scheduler));

    if config.virtual_integration.enabled {
        integration.activate_all(&mut service);
    } else {
        tracing::info!("virtual integration disabled");
    }
    let mut changes = integration
        .take_changes()
        .context("item change feed already taken")?;

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut stdin_open = true;
    let shutdown = tokio::signal::ctrl_c();
    tokio::pin!(shutdown);
    tracing::info!("hublinkd ready, reading channel events from stdin");

    loop {
        tokio::select! {
            line = lines.next_line(), if stdin_open => match line? {
                Some(line) => handle_line(&integration, &mut service, &line),
                None => {
                    tracing::info!("stdin closed, waiting for shutdown signal");
                    stdin_open = false;
                }
            },
            Some(change) = changes.recv() => {
                if let Err(error) =
                    VirtualIntegration::dispatch_item_change(&mut service, &change)
                {
                    tracing::warn!(
                        item = %change.item,
                        error = %error,
                        "item change not delivered"
                    );
                }
            }
            result = &mut shutdown => {
                result.context("listening for shutdown signal")?;
                tracing::info!("shutdown requested");
                break;
            }
        }
    }

    let disposed = service.deactivate_all();
    tracing::info!(disposed, "links disposed");
    Ok(())
}

fn handle_line<F: ProfileFactory, A: ProfileAdvisor>(
    integration: &VirtualIntegration,
    service: &mut LinkService<F, A>,
    line: &str,
) {
    match input::parse_line(line) {
        Ok(None) => {}
        Ok(Some(Input::States)) => {
            for (item, state) in integration.states() {
                tracing::info!(item = %item, state = %state, "item state");
            }
        }
        Ok(Some(Input::Channel { uid, event })) => {
            match integration.dispatch_channel_event(service, &uid, &event) {
                Ok(reached) => {
                    tracing::debug!(
                        channel = %uid,
                        event = %event,
                        reached,
                        "channel event dispatched"
                    );
                }
                Err(error) => {
                    tracing::warn!(
                        channel = %uid,
                        event = %event,
                        error = %error,
                        "channel event rejected"
                    );
                }
            }
        }
        Err(error) => tracing::warn!(line, error = %error, "ignoring input line"),
    }
}
