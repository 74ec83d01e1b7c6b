//! Value converter port — converts between channel and item value types.

use hublink_domain::error::ValueError;
use hublink_domain::value::{State, StateKind};

pub trait ValueConverter: Send + Sync {
    /// Convert `state` into a state of kind `target`.
    ///
    /// # Errors
    ///
    /// Returns [`ValueError::Conversion`] when no conversion exists.
    fn convert(&self, state: &State, target: StateKind) -> Result<State, ValueError>;
}
