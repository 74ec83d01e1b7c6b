//! # hublink-domain
//!
//! Pure domain model for the hublink profile engine.
//!
//! ## Responsibilities
//! - Foundational types: typed identifiers, segmented uids, error conventions, timestamps
//! - Define **States** and **Commands** (values flowing between channels and items),
//!   with units and quantities
//! - Define **Channels** (device-side endpoints) and **Item types** (application side)
//! - Define **Links** (channel ↔ item associations) and their **Configuration**
//! - Define **Profile types** (metadata of the transformation policies)
//!
//! ## Dependency rule
//! This crate has **no internal dependencies**.
//! It must never import anything from `app`, adapters, or external IO crates.
//! All IO boundaries are expressed as traits in the `app` crate (ports).

pub mod error;
pub mod id;
pub mod time;
pub mod uid;

pub mod channel;
pub mod configuration;
pub mod item;
pub mod link;
pub mod profile_type;
pub mod value;
