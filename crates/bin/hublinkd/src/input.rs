//! Line protocol read from stdin.
//!
//! ```text
//! virtual:remote:rocker trigger DIR1_PRESSED
//! virtual:sensor:temperature state 27 °C
//! virtual:sensor:temperature command REFRESH
//! states
//! ```

use hublink_app::ports::ChannelEvent;
use hublink_domain::error::{ValidationError, ValueError};
use hublink_domain::uid::ChannelUid;
use hublink_domain::value::State;

#[derive(Debug, Clone, PartialEq)]
pub enum Input {
    /// Deliver an event to the links of a channel.
    Channel { uid: ChannelUid, event: ChannelEvent },
    /// Log the state of every virtual item.
    States,
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum InputError {
    #[error("expected `<channel> trigger|state|command <payload>`")]
    Malformed,
    #[error("unknown event kind {0:?}")]
    UnknownKind(String),
    #[error(transparent)]
    Channel(#[from] ValidationError),
    #[error(transparent)]
    Value(#[from] ValueError),
}

/// Parse one input line; blank lines and `#` comments yield `None`.
///
/// # Errors
///
/// Returns [`InputError`] when the line does not follow the protocol.
pub fn parse_line(line: &str) -> Result<Option<Input>, InputError> {
    let line = line.trim();
    if line.is_empty() || line.starts_with('#') {
        return Ok(None);
    }
    if line.eq_ignore_ascii_case("states") {
        return Ok(Some(Input::States));
    }
    let mut parts = line.splitn(3, char::is_whitespace);
    let (Some(uid), Some(kind), Some(payload)) = (parts.next(), parts.next(), parts.next()) else {
        return Err(InputError::Malformed);
    };
    let payload = payload.trim();
    if payload.is_empty() {
        return Err(InputError::Malformed);
    }
    let uid: ChannelUid = uid.parse()?;
    let event = match kind.to_ascii_lowercase().as_str() {
        "trigger" => ChannelEvent::trigger(payload),
        "state" => match payload.parse::<State>() {
            Ok(state) => ChannelEvent::State(state),
            Err(never) => match never {},
        },
        "command" => ChannelEvent::Command(payload.parse()?),
        _ => return Err(InputError::UnknownKind(kind.to_string())),
    };
    Ok(Some(Input::Channel { uid, event }))
}
