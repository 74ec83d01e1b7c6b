//! Timestamp profiles: record when a channel changed, or turn events into
//! date-time values.

use std::sync::Arc;

use hublink_domain::error::{ConfigurationError, ValueError};
use hublink_domain::time::{now, shift_millis};
use hublink_domain::value::State;

use crate::error::ProfileError;
use crate::ports::{ChannelEvent, Profile, ProfileCallback, ProfileContext};

const ATTRIBUTE: &str = "attribute";
const OFFSET: &str = "offset";

fn attribute(context: &dyn ProfileContext, default: &str) -> Result<String, ConfigurationError> {
    Ok(context
        .configuration()
        .get_str(ATTRIBUTE)?
        .unwrap_or(default)
        .to_string())
}

fn offset_millis(context: &dyn ProfileContext) -> Result<i64, ConfigurationError> {
    Ok(context
        .configuration()
        .get_duration_millis(OFFSET)?
        .unwrap_or_default())
}

/// Forwards the channel state, then stamps `attribute` with the current time
/// when the state differs from the previous one.
pub struct TimestampChangeProfile {
    callback: Arc<dyn ProfileCallback>,
    attribute: String,
    last: Option<State>,
}

impl TimestampChangeProfile {
    pub const DEFAULT_ATTRIBUTE: &'static str = "last_changed";

    /// # Errors
    ///
    /// Returns [`ConfigurationError::InvalidType`] when `attribute` is not a string.
    pub fn new(
        callback: Arc<dyn ProfileCallback>,
        context: &dyn ProfileContext,
    ) -> Result<Self, ConfigurationError> {
        Ok(Self {
            callback,
            attribute: attribute(context, Self::DEFAULT_ATTRIBUTE)?,
            last: None,
        })
    }
}

impl Profile for TimestampChangeProfile {
    fn handle_channel_event(&mut self, event: ChannelEvent) -> Result<(), ProfileError> {
        let ChannelEvent::State(state) = event else {
            return Ok(());
        };
        if self.last.as_ref() == Some(&state) {
            return Ok(());
        }
        self.last = Some(state.clone());
        self.callback.send_update_to_item(state);
        self.callback
            .send_attribute_update_to_item(&self.attribute, State::DateTime(now()));
        Ok(())
    }
}

/// Forwards the channel state, then stamps `attribute` with the current time,
/// on every update.
pub struct TimestampUpdateProfile {
    callback: Arc<dyn ProfileCallback>,
    attribute: String,
}

impl TimestampUpdateProfile {
    pub const DEFAULT_ATTRIBUTE: &'static str = "last_updated";

    /// # Errors
    ///
    /// Returns [`ConfigurationError::InvalidType`] when `attribute` is not a string.
    pub fn new(
        callback: Arc<dyn ProfileCallback>,
        context: &dyn ProfileContext,
    ) -> Result<Self, ConfigurationError> {
        Ok(Self {
            callback,
            attribute: attribute(context, Self::DEFAULT_ATTRIBUTE)?,
        })
    }
}

impl Profile for TimestampUpdateProfile {
    fn handle_channel_event(&mut self, event: ChannelEvent) -> Result<(), ProfileError> {
        if let ChannelEvent::State(state) = event {
            self.callback.send_update_to_item(state);
            self.callback
                .send_attribute_update_to_item(&self.attribute, State::DateTime(now()));
        }
        Ok(())
    }
}

/// Shifts date-time states by a fixed offset; absent states become
/// "now + offset".
pub struct TimestampOffsetProfile {
    callback: Arc<dyn ProfileCallback>,
    offset_millis: i64,
}

impl TimestampOffsetProfile {
    /// # Errors
    ///
    /// Returns [`ConfigurationError::Invalid`] when `offset` is not a duration.
    pub fn new(
        callback: Arc<dyn ProfileCallback>,
        context: &dyn ProfileContext,
    ) -> Result<Self, ConfigurationError> {
        Ok(Self {
            callback,
            offset_millis: offset_millis(context)?,
        })
    }
}

impl Profile for TimestampOffsetProfile {
    fn handle_channel_event(&mut self, event: ChannelEvent) -> Result<(), ProfileError> {
        let ChannelEvent::State(state) = event else {
            return Ok(());
        };
        let shifted = match state {
            State::DateTime(ts) => shift_millis(ts, self.offset_millis),
            State::Undef | State::Null => shift_millis(now(), self.offset_millis),
            other => {
                return Err(ValueError::Conversion {
                    from: other.kind().name(),
                    to: "DateTime",
                }
                .into());
            }
        };
        self.callback.send_update_to_item(State::DateTime(shifted));
        Ok(())
    }
}

/// Any trigger event updates the item with "now + offset".
pub struct TimestampTriggerProfile {
    callback: Arc<dyn ProfileCallback>,
    offset_millis: i64,
}

impl TimestampTriggerProfile {
    /// # Errors
    ///
    /// Returns [`ConfigurationError::Invalid`] when `offset` is not a duration.
    pub fn new(
        callback: Arc<dyn ProfileCallback>,
        context: &dyn ProfileContext,
    ) -> Result<Self, ConfigurationError> {
        Ok(Self {
            callback,
            offset_millis: offset_millis(context)?,
        })
    }
}

impl Profile for TimestampTriggerProfile {
    fn handle_channel_event(&mut self, event: ChannelEvent) -> Result<(), ProfileError> {
        if let ChannelEvent::Trigger(_) = event {
            let ts = shift_millis(now(), self.offset_millis);
            self.callback.send_update_to_item(State::DateTime(ts));
        }
        Ok(())
    }
}
