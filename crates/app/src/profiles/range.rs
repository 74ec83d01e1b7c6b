//! Range: rescale a numeric input range onto an output range.

use std::sync::Arc;

use hublink_domain::error::{ConfigurationError, ValueError};
use hublink_domain::value::{Command, State, StateKind};

use crate::error::ProfileError;
use crate::ports::{ChannelEvent, Profile, ProfileCallback, ProfileContext, ValueConverter};

pub struct RangeProfile {
    callback: Arc<dyn ProfileCallback>,
    converter: Arc<dyn ValueConverter>,
    in_min: f64,
    in_max: f64,
    out_min: f64,
    out_max: f64,
}

impl RangeProfile {
    /// Read `inMin`, `inMax`, `outMin` and `outMax`, all required.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigurationError`] when a bound is missing or malformed,
    /// or [`ConfigurationError::DegenerateRange`] when `inMin == inMax`.
    #[allow(clippy::float_cmp)]
    pub fn new(
        callback: Arc<dyn ProfileCallback>,
        context: &dyn ProfileContext,
    ) -> Result<Self, ConfigurationError> {
        let config = context.configuration();
        let in_min = config.require_f64("inMin")?;
        let in_max = config.require_f64("inMax")?;
        let out_min = config.require_f64("outMin")?;
        let out_max = config.require_f64("outMax")?;
        if in_min == in_max {
            return Err(ConfigurationError::DegenerateRange {
                min: in_min,
                max: in_max,
            });
        }
        Ok(Self {
            callback,
            converter: context.value_converter(),
            in_min,
            in_max,
            out_min,
            out_max,
        })
    }

    fn rescale(&self, value: f64) -> f64 {
        let t = ((value - self.in_min) / (self.in_max - self.in_min)).clamp(0.0, 1.0);
        if t >= 1.0 {
            self.out_max
        } else {
            self.out_min + t * (self.out_max - self.out_min)
        }
    }

    fn read(&self, state: &State) -> Result<f64, ValueError> {
        match self.converter.convert(state, StateKind::Decimal)? {
            State::Decimal(v) => Ok(v),
            other => Err(ValueError::Conversion {
                from: other.kind().name(),
                to: StateKind::Decimal.name(),
            }),
        }
    }
}

impl Profile for RangeProfile {
    fn handle_channel_event(&mut self, event: ChannelEvent) -> Result<(), ProfileError> {
        match event {
            ChannelEvent::State(state) => {
                let value = self.rescale(self.read(&state)?);
                self.callback.send_update_to_item(State::Decimal(value));
            }
            ChannelEvent::Command(command) => {
                let state = State::try_from(command)?;
                let value = self.rescale(self.read(&state)?);
                self.callback.send_command_to_item(Command::Decimal(value));
            }
            ChannelEvent::Trigger(event) => {
                tracing::debug!(%event, "range ignores trigger");
            }
        }
        Ok(())
    }
}
