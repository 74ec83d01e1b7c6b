//! Built-in profile policies.
//!
//! Every policy implements [`Profile`](crate::ports::Profile) and is
//! constructed from a [`ProfileContext`](crate::ports::ProfileContext) by the
//! [`SystemProfileFactory`](crate::factory::SystemProfileFactory).

mod context;
mod default;
mod hysteresis;
mod instance;
mod offset;
mod range;
mod rocker_dimmer;
mod timestamp;
mod toggle;
mod trigger_command;

#[cfg(test)]
pub(crate) mod test_support;

pub use context::LinkContext;
pub use default::{DefaultProfile, FollowProfile};
pub use hysteresis::HysteresisProfile;
pub use instance::ProfileInstance;
pub use offset::OffsetProfile;
pub use range::RangeProfile;
pub use rocker_dimmer::{RampSettings, RockerDimmerProfile};
pub use timestamp::{
    TimestampChangeProfile, TimestampOffsetProfile, TimestampTriggerProfile,
    TimestampUpdateProfile,
};
pub use toggle::{ToggleProfile, Toggleable};
pub use trigger_command::{TriggerCommandProfile, TriggerEventStringProfile};

use hublink_domain::error::ValueError;
use hublink_domain::value::{Quantity, State, Unit};

/// Numeric reading of a state, if it carries one.
///
/// Percentages read as their raw 0..=100 value.
fn numeric(state: &State) -> Option<Quantity> {
    match state {
        State::Decimal(v) => Some(Quantity::dimensionless(*v)),
        State::Percent(p) => Some(Quantity::dimensionless(p.value())),
        State::Quantity(q) => Some(*q),
        _ => None,
    }
}

/// Magnitude of `value` expressed in `reference`.
///
/// A dimensionless side on either end compares raw numbers.
fn magnitude_in(value: Quantity, reference: Unit) -> Result<f64, ValueError> {
    if value.unit == Unit::One || reference == Unit::One {
        Ok(value.value)
    } else {
        Ok(value.to_unit(reference)?.value)
    }
}
