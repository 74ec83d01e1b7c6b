//! Port definitions — traits that adapters and the engine meet at.
//!
//! Ports are the boundaries between the profile engine and the outside world:
//! the item/channel plumbing a profile emits into, the timer facility,
//! value conversion, channel type metadata and localization.

pub mod channel_type_registry;
pub mod localization;
pub mod profile;
pub mod scheduler;
pub mod value_converter;

pub use channel_type_registry::ChannelTypeRegistry;
pub use localization::{IdentityLocalizer, ProfileTypeLocalizer};
pub use profile::{
    ChannelEvent, Profile, ProfileAdvisor, ProfileCallback, ProfileContext, ProfileFactory,
    ProfileTypeProvider,
};
pub use scheduler::{ScheduledTask, Scheduler, SchedulerError, Task};
pub use value_converter::ValueConverter;
