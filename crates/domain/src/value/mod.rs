//! States and commands exchanged between channels and items.
//!
//! A [`State`] is a value an item holds or a channel reports. A [`Command`]
//! is an instruction to change a state. Most value types are both
//! (`ON` is a state and a command); a few are commands only (`STOP`,
//! `NEXT`, `INCREASE`, `REFRESH`) and two are states only (`UNDEF`, `NULL`).

mod percent;
mod unit;

pub use percent::Percent;
pub use unit::{Dimension, Quantity, Unit};

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ValueError;
use crate::time::Timestamp;

macro_rules! define_keyword_type {
    ($(#[doc = $doc:expr])* $name:ident { $($variant:ident => $text:literal),+ $(,)? }) => {
        $(#[doc = $doc])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        pub enum $name {
            $(
                #[serde(rename = $text)]
                $variant,
            )+
        }

        impl $name {
            #[must_use]
            pub const fn as_str(self) -> &'static str {
                match self {
                    $(Self::$variant => $text,)+
                }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl FromStr for $name {
            type Err = ValueError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                $(
                    if s.eq_ignore_ascii_case($text) {
                        return Ok(Self::$variant);
                    }
                )+
                Err(ValueError::Conversion {
                    from: "string",
                    to: stringify!($name),
                })
            }
        }
    };
}

define_keyword_type!(
    /// Switch state.
    OnOff { On => "ON", Off => "OFF" }
);

define_keyword_type!(
    /// Contact state.
    OpenClosed { Open => "OPEN", Closed => "CLOSED" }
);

define_keyword_type!(
    /// Rollershutter direction.
    UpDown { Up => "UP", Down => "DOWN" }
);

define_keyword_type!(
    /// Player transport state.
    PlayPause { Play => "PLAY", Pause => "PAUSE" }
);

define_keyword_type!(
    /// Player seeking state.
    RewindFastforward { Rewind => "REWIND", Fastforward => "FASTFORWARD" }
);

define_keyword_type!(
    /// Rollershutter motion command.
    StopMove { Stop => "STOP", Move => "MOVE" }
);

define_keyword_type!(
    /// Player track command.
    NextPrevious { Next => "NEXT", Previous => "PREVIOUS" }
);

define_keyword_type!(
    /// Relative dimming command.
    IncreaseDecrease { Increase => "INCREASE", Decrease => "DECREASE" }
);

impl OnOff {
    #[must_use]
    pub const fn toggled(self) -> Self {
        match self {
            Self::On => Self::Off,
            Self::Off => Self::On,
        }
    }
}

/// Discriminant of a [`State`], used as a conversion target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StateKind {
    OnOff,
    OpenClosed,
    Percent,
    Decimal,
    Quantity,
    UpDown,
    PlayPause,
    RewindFastforward,
    String,
    DateTime,
    Undef,
    Null,
}

impl StateKind {
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::OnOff => "OnOff",
            Self::OpenClosed => "OpenClosed",
            Self::Percent => "Percent",
            Self::Decimal => "Decimal",
            Self::Quantity => "Quantity",
            Self::UpDown => "UpDown",
            Self::PlayPause => "PlayPause",
            Self::RewindFastforward => "RewindFastforward",
            Self::String => "String",
            Self::DateTime => "DateTime",
            Self::Undef => "Undef",
            Self::Null => "Null",
        }
    }
}

/// A value held by an item or reported by a channel.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "snake_case")]
pub enum State {
    OnOff(OnOff),
    OpenClosed(OpenClosed),
    Percent(Percent),
    Decimal(f64),
    Quantity(Quantity),
    UpDown(UpDown),
    PlayPause(PlayPause),
    RewindFastforward(RewindFastforward),
    String(String),
    DateTime(Timestamp),
    /// The value is known to be undeterminable.
    Undef,
    /// The value has not been set yet.
    Null,
}

impl State {
    #[must_use]
    pub fn kind(&self) -> StateKind {
        match self {
            Self::OnOff(_) => StateKind::OnOff,
            Self::OpenClosed(_) => StateKind::OpenClosed,
            Self::Percent(_) => StateKind::Percent,
            Self::Decimal(_) => StateKind::Decimal,
            Self::Quantity(_) => StateKind::Quantity,
            Self::UpDown(_) => StateKind::UpDown,
            Self::PlayPause(_) => StateKind::PlayPause,
            Self::RewindFastforward(_) => StateKind::RewindFastforward,
            Self::String(_) => StateKind::String,
            Self::DateTime(_) => StateKind::DateTime,
            Self::Undef => StateKind::Undef,
            Self::Null => StateKind::Null,
        }
    }

    /// `UNDEF` or `NULL`.
    #[must_use]
    pub fn is_absent(&self) -> bool {
        matches!(self, Self::Undef | Self::Null)
    }
}

impl fmt::Display for State {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::OnOff(v) => v.fmt(f),
            Self::OpenClosed(v) => v.fmt(f),
            Self::Percent(v) => v.fmt(f),
            Self::Decimal(v) => v.fmt(f),
            Self::Quantity(v) => v.fmt(f),
            Self::UpDown(v) => v.fmt(f),
            Self::PlayPause(v) => v.fmt(f),
            Self::RewindFastforward(v) => v.fmt(f),
            Self::String(v) => f.write_str(v),
            Self::DateTime(v) => f.write_str(&v.to_rfc3339()),
            Self::Undef => f.write_str("UNDEF"),
            Self::Null => f.write_str("NULL"),
        }
    }
}

impl FromStr for State {
    type Err = std::convert::Infallible;

    /// Best-effort parse: keywords, then numbers and quantities, then
    /// RFC 3339 timestamps, falling back to a plain string.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.eq_ignore_ascii_case("UNDEF") {
            return Ok(Self::Undef);
        }
        if trimmed.eq_ignore_ascii_case("NULL") {
            return Ok(Self::Null);
        }
        if let Ok(v) = trimmed.parse() {
            return Ok(Self::OnOff(v));
        }
        if let Ok(v) = trimmed.parse() {
            return Ok(Self::OpenClosed(v));
        }
        if let Ok(v) = trimmed.parse() {
            return Ok(Self::UpDown(v));
        }
        if let Ok(v) = trimmed.parse() {
            return Ok(Self::PlayPause(v));
        }
        if let Ok(v) = trimmed.parse() {
            return Ok(Self::RewindFastforward(v));
        }
        if let Ok(q) = trimmed.parse::<Quantity>() {
            return Ok(if q.unit == Unit::One {
                Self::Decimal(q.value)
            } else {
                Self::Quantity(q)
            });
        }
        if let Ok(ts) = chrono::DateTime::parse_from_rfc3339(trimmed) {
            return Ok(Self::DateTime(ts.with_timezone(&chrono::Utc)));
        }
        Ok(Self::String(s.to_string()))
    }
}

/// An instruction sent toward an item or a channel.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "snake_case")]
pub enum Command {
    OnOff(OnOff),
    OpenClosed(OpenClosed),
    Percent(Percent),
    Decimal(f64),
    Quantity(Quantity),
    UpDown(UpDown),
    StopMove(StopMove),
    PlayPause(PlayPause),
    NextPrevious(NextPrevious),
    RewindFastforward(RewindFastforward),
    IncreaseDecrease(IncreaseDecrease),
    String(String),
    DateTime(Timestamp),
    Refresh,
}

impl Command {
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::OnOff(_) => "OnOff",
            Self::OpenClosed(_) => "OpenClosed",
            Self::Percent(_) => "Percent",
            Self::Decimal(_) => "Decimal",
            Self::Quantity(_) => "Quantity",
            Self::UpDown(_) => "UpDown",
            Self::StopMove(_) => "StopMove",
            Self::PlayPause(_) => "PlayPause",
            Self::NextPrevious(_) => "NextPrevious",
            Self::RewindFastforward(_) => "RewindFastforward",
            Self::IncreaseDecrease(_) => "IncreaseDecrease",
            Self::String(_) => "String",
            Self::DateTime(_) => "DateTime",
            Self::Refresh => "Refresh",
        }
    }
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::StopMove(v) => v.fmt(f),
            Self::NextPrevious(v) => v.fmt(f),
            Self::IncreaseDecrease(v) => v.fmt(f),
            Self::Refresh => f.write_str("REFRESH"),
            other => match State::try_from(other.clone()) {
                Ok(state) => state.fmt(f),
                Err(_) => f.write_str(other.name()),
            },
        }
    }
}

impl FromStr for Command {
    type Err = ValueError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.eq_ignore_ascii_case("REFRESH") {
            return Ok(Self::Refresh);
        }
        if let Ok(v) = trimmed.parse() {
            return Ok(Self::StopMove(v));
        }
        if let Ok(v) = trimmed.parse() {
            return Ok(Self::NextPrevious(v));
        }
        if let Ok(v) = trimmed.parse() {
            return Ok(Self::IncreaseDecrease(v));
        }
        let state: State = match s.parse() {
            Ok(state) => state,
            Err(never) => match never {},
        };
        Self::try_from(state)
    }
}

impl TryFrom<State> for Command {
    type Error = ValueError;

    fn try_from(state: State) -> Result<Self, Self::Error> {
        Ok(match state {
            State::OnOff(v) => Self::OnOff(v),
            State::OpenClosed(v) => Self::OpenClosed(v),
            State::Percent(v) => Self::Percent(v),
            State::Decimal(v) => Self::Decimal(v),
            State::Quantity(v) => Self::Quantity(v),
            State::UpDown(v) => Self::UpDown(v),
            State::PlayPause(v) => Self::PlayPause(v),
            State::RewindFastforward(v) => Self::RewindFastforward(v),
            State::String(v) => Self::String(v),
            State::DateTime(v) => Self::DateTime(v),
            other @ (State::Undef | State::Null) => {
                return Err(ValueError::Conversion {
                    from: other.kind().name(),
                    to: "Command",
                });
            }
        })
    }
}

impl TryFrom<Command> for State {
    type Error = ValueError;

    fn try_from(command: Command) -> Result<Self, Self::Error> {
        Ok(match command {
            Command::OnOff(v) => Self::OnOff(v),
            Command::OpenClosed(v) => Self::OpenClosed(v),
            Command::Percent(v) => Self::Percent(v),
            Command::Decimal(v) => Self::Decimal(v),
            Command::Quantity(v) => Self::Quantity(v),
            Command::UpDown(v) => Self::UpDown(v),
            Command::PlayPause(v) => Self::PlayPause(v),
            Command::RewindFastforward(v) => Self::RewindFastforward(v),
            Command::String(v) => Self::String(v),
            Command::DateTime(v) => Self::DateTime(v),
            other @ (Command::StopMove(_)
            | Command::NextPrevious(_)
            | Command::IncreaseDecrease(_)
            | Command::Refresh) => {
                return Err(ValueError::Conversion {
                    from: other.name(),
                    to: "State",
                });
            }
        })
    }
}

impl From<OnOff> for State {
    fn from(v: OnOff) -> Self {
        Self::OnOff(v)
    }
}

impl From<OnOff> for Command {
    fn from(v: OnOff) -> Self {
        Self::OnOff(v)
    }
}

impl From<UpDown> for Command {
    fn from(v: UpDown) -> Self {
        Self::UpDown(v)
    }
}

impl From<PlayPause> for Command {
    fn from(v: PlayPause) -> Self {
        Self::PlayPause(v)
    }
}

impl From<StopMove> for Command {
    fn from(v: StopMove) -> Self {
        Self::StopMove(v)
    }
}

impl From<NextPrevious> for Command {
    fn from(v: NextPrevious) -> Self {
        Self::NextPrevious(v)
    }
}

impl From<RewindFastforward> for Command {
    fn from(v: RewindFastforward) -> Self {
        Self::RewindFastforward(v)
    }
}

impl From<Percent> for Command {
    fn from(v: Percent) -> Self {
        Self::Percent(v)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn state(s: &str) -> State {
        s.parse().unwrap()
    }

    #[test]
    fn should_parse_keywords_case_insensitively() {
        assert_eq!(state("on"), State::OnOff(OnOff::On));
        assert_eq!(state("CLOSED"), State::OpenClosed(OpenClosed::Closed));
        assert_eq!(state("Pause"), State::PlayPause(PlayPause::Pause));
        assert_eq!(state("UNDEF"), State::Undef);
    }

    #[test]
    fn should_parse_plain_number_as_decimal() {
        assert_eq!(state("10"), State::Decimal(10.0));
        assert_eq!(state("-2.5"), State::Decimal(-2.5));
    }

    #[test]
    fn should_parse_number_with_unit_as_quantity() {
        assert_eq!(
            state("21 °C"),
            State::Quantity(Quantity::new(21.0, Unit::Celsius))
        );
    }

    #[test]
    fn should_parse_rfc3339_as_datetime() {
        assert!(matches!(state("2024-05-01T10:00:00Z"), State::DateTime(_)));
    }

    #[test]
    fn should_fall_back_to_string() {
        assert_eq!(state("hello world"), State::String("hello world".into()));
    }

    #[test]
    fn should_parse_command_only_keywords() {
        let cmd: Command = "stop".parse().unwrap();
        assert_eq!(cmd, Command::StopMove(StopMove::Stop));
        let cmd: Command = "INCREASE".parse().unwrap();
        assert_eq!(cmd, Command::IncreaseDecrease(IncreaseDecrease::Increase));
    }

    #[test]
    fn should_refuse_undef_as_command() {
        assert!("UNDEF".parse::<Command>().is_err());
        assert!(Command::try_from(State::Null).is_err());
    }

    #[test]
    fn should_refuse_command_only_values_as_state() {
        let err = State::try_from(Command::StopMove(StopMove::Stop)).unwrap_err();
        assert_eq!(
            err,
            ValueError::Conversion {
                from: "StopMove",
                to: "State"
            }
        );
    }

    #[test]
    fn should_display_values_in_wire_format() {
        assert_eq!(State::OnOff(OnOff::On).to_string(), "ON");
        assert_eq!(Command::from(StopMove::Stop).to_string(), "STOP");
        assert_eq!(Command::Decimal(15.0).to_string(), "15");
        assert_eq!(Command::Refresh.to_string(), "REFRESH");
    }

    #[test]
    fn should_serialize_state_with_type_tag() {
        let json = serde_json::to_value(State::OnOff(OnOff::Off)).unwrap();
        assert_eq!(json, serde_json::json!({"type": "on_off", "value": "OFF"}));
    }

    #[test]
    fn should_toggle_on_off() {
        assert_eq!(OnOff::On.toggled(), OnOff::Off);
        assert_eq!(OnOff::Off.toggled(), OnOff::On);
    }
}
