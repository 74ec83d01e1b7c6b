//! Hysteresis: switch on/off when a numeric value leaves a band.

use std::sync::Arc;

use hublink_domain::error::ConfigurationError;
use hublink_domain::value::{Command, OnOff, Quantity, State};

use super::{magnitude_in, numeric};
use crate::error::ProfileError;
use crate::ports::{ChannelEvent, Profile, ProfileCallback, ProfileContext};

const LOWER: &str = "lower";
const UPPER: &str = "upper";
const INVERTED: &str = "inverted";

/// Emits the low side below `lower`, the high side above `upper`, and
/// nothing while the value stays inside the band.
pub struct HysteresisProfile {
    callback: Arc<dyn ProfileCallback>,
    lower: Quantity,
    /// Expressed in `lower`'s unit.
    upper: f64,
    inverted: bool,
    output: OnOff,
}

impl HysteresisProfile {
    /// Read `lower` (required), `upper` (defaults to `lower`) and `inverted`.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigurationError`] when `lower` is missing, an option is
    /// malformed, or `upper` lies below `lower`.
    pub fn new(
        callback: Arc<dyn ProfileCallback>,
        context: &dyn ProfileContext,
    ) -> Result<Self, ConfigurationError> {
        let config = context.configuration();
        let lower = config.require_quantity(LOWER)?;
        let upper = config.get_quantity(UPPER)?.unwrap_or(lower);
        let upper = magnitude_in(upper, lower.unit).map_err(|source| {
            ConfigurationError::Invalid {
                name: UPPER.to_string(),
                source,
            }
        })?;
        if upper < lower.value {
            return Err(ConfigurationError::OutOfRange {
                name: UPPER.to_string(),
                reason: "must not be below lower",
            });
        }
        let inverted = config.get_bool(INVERTED)?.unwrap_or(false);
        let mut profile = Self {
            callback,
            lower,
            upper,
            inverted,
            output: OnOff::Off,
        };
        profile.output = profile.low_side();
        Ok(profile)
    }

    fn low_side(&self) -> OnOff {
        if self.inverted { OnOff::On } else { OnOff::Off }
    }

    /// New output if `value` just crossed out of the band.
    fn evaluate(&mut self, value: Quantity) -> Result<Option<OnOff>, ProfileError> {
        let v = magnitude_in(value, self.lower.unit)?;
        let side = if v < self.lower.value {
            self.low_side()
        } else if v > self.upper {
            self.low_side().toggled()
        } else {
            return Ok(None);
        };
        if side == self.output {
            return Ok(None);
        }
        self.output = side;
        Ok(Some(side))
    }
}

impl Profile for HysteresisProfile {
    fn handle_channel_event(&mut self, event: ChannelEvent) -> Result<(), ProfileError> {
        match event {
            ChannelEvent::State(state) => {
                let Some(value) = numeric(&state) else {
                    tracing::debug!(%state, "hysteresis ignores non-numeric state");
                    return Ok(());
                };
                if let Some(output) = self.evaluate(value)? {
                    self.callback.send_update_to_item(State::OnOff(output));
                }
            }
            ChannelEvent::Command(command) => {
                let value = State::try_from(command.clone())
                    .ok()
                    .as_ref()
                    .and_then(numeric);
                let Some(value) = value else {
                    tracing::debug!(%command, "hysteresis ignores non-numeric command");
                    return Ok(());
                };
                if let Some(output) = self.evaluate(value)? {
                    self.callback.send_command_to_item(Command::OnOff(output));
                }
            }
            ChannelEvent::Trigger(event) => {
                tracing::debug!(%event, "hysteresis ignores trigger");
            }
        }
        Ok(())
    }
}
