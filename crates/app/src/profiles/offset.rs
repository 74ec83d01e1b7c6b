//! Offset: add a constant to values on their way to the item, subtract it
//! on the way back.

use std::sync::Arc;

use hublink_domain::error::{ConfigurationError, ValueError};
use hublink_domain::value::{Command, Percent, Quantity, State, Unit};

use crate::error::ProfileError;
use crate::ports::{ChannelEvent, Profile, ProfileCallback, ProfileContext};

const OFFSET: &str = "offset";

pub struct OffsetProfile {
    callback: Arc<dyn ProfileCallback>,
    offset: Quantity,
}

impl OffsetProfile {
    /// Read the required `offset` option (number or quantity string).
    ///
    /// # Errors
    ///
    /// Returns [`ConfigurationError`] when `offset` is missing or malformed.
    pub fn new(
        callback: Arc<dyn ProfileCallback>,
        context: &dyn ProfileContext,
    ) -> Result<Self, ConfigurationError> {
        let offset = context.configuration().require_quantity(OFFSET)?;
        Ok(Self { callback, offset })
    }
}

impl Profile for OffsetProfile {
    fn handle_channel_event(&mut self, event: ChannelEvent) -> Result<(), ProfileError> {
        match event {
            ChannelEvent::State(state) => {
                let state = shift_state(state, self.offset)?;
                self.callback.send_update_to_item(state);
            }
            ChannelEvent::Command(command) => {
                let command = shift_command(command, self.offset)?;
                self.callback.send_command_to_item(command);
            }
            ChannelEvent::Trigger(event) => {
                tracing::debug!(%event, "offset ignores trigger");
            }
        }
        Ok(())
    }

    fn handle_item_command(&mut self, command: Command) -> Result<(), ProfileError> {
        let command = shift_command(command, self.offset.negate())?;
        self.callback.send_command_to_channel(command);
        Ok(())
    }
}

fn shift_state(state: State, offset: Quantity) -> Result<State, ValueError> {
    Ok(match state {
        State::Decimal(v) => State::Decimal(shift_decimal(v, offset)?),
        State::Percent(p) => match shift_percent(p, offset)? {
            Ok(p) => State::Percent(p),
            Err(v) => State::Decimal(v),
        },
        State::Quantity(q) => State::Quantity(shift_quantity(q, offset)?),
        other => other,
    })
}

fn shift_command(command: Command, offset: Quantity) -> Result<Command, ValueError> {
    Ok(match command {
        Command::Decimal(v) => Command::Decimal(shift_decimal(v, offset)?),
        Command::Percent(p) => match shift_percent(p, offset)? {
            Ok(p) => Command::Percent(p),
            Err(v) => Command::Decimal(v),
        },
        Command::Quantity(q) => Command::Quantity(shift_quantity(q, offset)?),
        other => other,
    })
}

fn shift_decimal(value: f64, offset: Quantity) -> Result<f64, ValueError> {
    if offset.unit == Unit::One {
        Ok(value + offset.value)
    } else {
        Err(incompatible(Unit::One, offset.unit))
    }
}

/// A shifted percent leaving `0..=100` comes back as the bare decimal.
fn shift_percent(value: Percent, offset: Quantity) -> Result<Result<Percent, f64>, ValueError> {
    match offset.unit {
        Unit::One | Unit::Percent => {
            let shifted = value.value() + offset.value;
            Ok(Percent::new(shifted).map_err(|_| shifted))
        }
        other => Err(incompatible(Unit::Percent, other)),
    }
}

/// Plain offsets apply in the value's own unit; dimensioned ones are
/// converted as a difference (`+1 K` on `°F` adds `1.8`).
fn shift_quantity(value: Quantity, offset: Quantity) -> Result<Quantity, ValueError> {
    if offset.unit == Unit::One {
        Ok(Quantity::new(value.value + offset.value, value.unit))
    } else {
        value.add_delta(offset)
    }
}

fn incompatible(from: Unit, to: Unit) -> ValueError {
    ValueError::IncompatibleUnit {
        from: from.symbol().to_string(),
        to: to.symbol().to_string(),
    }
}
