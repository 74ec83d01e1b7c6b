//! Toggle: flip between two values each time a configured trigger fires.

use std::sync::Arc;

use hublink_domain::error::ConfigurationError;
use hublink_domain::value::{Command, OnOff, PlayPause, State, StateKind, UpDown};

use crate::error::ProfileError;
use crate::ports::{ChannelEvent, Profile, ProfileCallback, ProfileContext, ValueConverter};

const EVENT: &str = "event";

/// A two-valued item value a toggle flips between.
pub trait Toggleable: Copy + PartialEq + Send + 'static {
    /// Emitted first, and whenever the phase is not [`A`](Self::A).
    const A: Self;
    const B: Self;
    /// State kind the item's state is converted into to re-sync the phase.
    const KIND: StateKind;

    fn from_state(state: &State) -> Option<Self>;

    fn into_command(self) -> Command;

    #[must_use]
    fn flipped(phase: Option<Self>) -> Self {
        if phase == Some(Self::A) { Self::B } else { Self::A }
    }
}

impl Toggleable for OnOff {
    const A: Self = Self::On;
    const B: Self = Self::Off;
    const KIND: StateKind = StateKind::OnOff;

    fn from_state(state: &State) -> Option<Self> {
        match state {
            State::OnOff(v) => Some(*v),
            _ => None,
        }
    }

    fn into_command(self) -> Command {
        Command::OnOff(self)
    }
}

impl Toggleable for PlayPause {
    const A: Self = Self::Play;
    const B: Self = Self::Pause;
    const KIND: StateKind = StateKind::PlayPause;

    fn from_state(state: &State) -> Option<Self> {
        match state {
            State::PlayPause(v) => Some(*v),
            _ => None,
        }
    }

    fn into_command(self) -> Command {
        Command::PlayPause(self)
    }
}

impl Toggleable for UpDown {
    const A: Self = Self::Up;
    const B: Self = Self::Down;
    const KIND: StateKind = StateKind::UpDown;

    fn from_state(state: &State) -> Option<Self> {
        match state {
            State::UpDown(v) => Some(*v),
            _ => None,
        }
    }

    fn into_command(self) -> Command {
        Command::UpDown(self)
    }
}

/// Sends `B` when the tracked phase is `A`, otherwise `A`.
///
/// The phase starts unknown and follows both the emitted commands and the
/// item's reported state.
pub struct ToggleProfile<T: Toggleable> {
    callback: Arc<dyn ProfileCallback>,
    converter: Arc<dyn ValueConverter>,
    trigger: String,
    phase: Option<T>,
}

impl<T: Toggleable> ToggleProfile<T> {
    /// Toggle on the `event` option, or on `default_trigger` when absent.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigurationError::InvalidType`] when `event` is not a string.
    pub fn new(
        callback: Arc<dyn ProfileCallback>,
        context: &dyn ProfileContext,
        default_trigger: &str,
    ) -> Result<Self, ConfigurationError> {
        let trigger = context
            .configuration()
            .get_str(EVENT)?
            .unwrap_or(default_trigger)
            .to_string();
        Ok(Self {
            callback,
            converter: context.value_converter(),
            trigger,
            phase: None,
        })
    }
}

impl<T: Toggleable> Profile for ToggleProfile<T> {
    fn handle_channel_event(&mut self, event: ChannelEvent) -> Result<(), ProfileError> {
        match event {
            ChannelEvent::Trigger(event) if event == self.trigger => {
                let next = T::flipped(self.phase);
                self.phase = Some(next);
                self.callback.send_command_to_item(next.into_command());
            }
            other => tracing::debug!(event = %other, "toggle ignores event"),
        }
        Ok(())
    }

    fn handle_item_state_change(&mut self, state: State) -> Result<(), ProfileError> {
        if state.is_absent() {
            self.phase = None;
            return Ok(());
        }
        let converted = self.converter.convert(&state, T::KIND)?;
        self.phase = T::from_state(&converted);
        Ok(())
    }
}
