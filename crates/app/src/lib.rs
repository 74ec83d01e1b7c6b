//! # hublink-app
//!
//! Application layer — the profile engine and **port definitions** (traits).
//!
//! ## Responsibilities
//! - Define **port traits** at the engine's boundaries:
//!   - `Profile` / `ProfileCallback` / `ProfileContext` — the policy contract
//!     and what a policy emits into
//!   - `Scheduler` — repeating timers for time-driven policies
//!   - `ValueConverter` — conversions between state value types
//!   - `ChannelTypeRegistry` — channel type metadata
//!   - `ProfileTypeLocalizer` — translated labels
//! - Implement the engine:
//!   - `SystemProfileTypes` — catalog of the built-in profile types
//!   - `SystemProfileAdvisor` — default profile suggestion
//!   - `SystemProfileFactory` — uid → constructor dispatch
//!   - `profiles` — the policy state machines
//!   - `LinkService` — per-link ownership, event routing, disposal
//! - Provide **in-process infrastructure** that doesn't need IO
//!   (tokio scheduler, basic value converter, channel types, localization cache)
//!
//! ## Dependency rule
//! Depends on `hublink-domain` only (plus `tokio` for timers).
//! Never imports adapter crates. Adapters depend on *this* crate, not the reverse.

pub mod advisor;
pub mod catalog;
pub mod channel_types;
pub mod error;
pub mod factory;
pub mod localization;
pub mod ports;
pub mod profiles;
pub mod scheduler;
pub mod services;
pub mod value_converter;
