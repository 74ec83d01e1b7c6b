//! Channels — device-side endpoints that report states or fire triggers.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;
use crate::uid::{ChannelTypeUid, ChannelUid};

/// Whether a channel reports continuous states or momentary triggers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum ChannelKind {
    State,
    Trigger,
}

impl fmt::Display for ChannelKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::State => f.write_str("state"),
            Self::Trigger => f.write_str("trigger"),
        }
    }
}

impl FromStr for ChannelKind {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.eq_ignore_ascii_case("state") {
            Ok(Self::State)
        } else if s.eq_ignore_ascii_case("trigger") {
            Ok(Self::Trigger)
        } else {
            Err(ValidationError::UnknownChannelKind(s.to_string()))
        }
    }
}

impl TryFrom<String> for ChannelKind {
    type Error = ValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<ChannelKind> for String {
    fn from(kind: ChannelKind) -> Self {
        kind.to_string()
    }
}

/// Built-in trigger channel types.
pub mod system_channel_types {
    use crate::uid::ChannelTypeUid;

    /// Fires `SHORT_PRESSED`, `DOUBLE_PRESSED`, `LONG_PRESSED`.
    pub const BUTTON: ChannelTypeUid = ChannelTypeUid::system("button");
    /// Fires `PRESSED` and `RELEASED`.
    pub const RAWBUTTON: ChannelTypeUid = ChannelTypeUid::system("rawbutton");
    /// Fires `DIR1_PRESSED`, `DIR1_RELEASED`, `DIR2_PRESSED`, `DIR2_RELEASED`.
    pub const RAWROCKER: ChannelTypeUid = ChannelTypeUid::system("rawrocker");
}

/// Trigger payloads fired by the system channel types.
pub mod trigger_events {
    pub const PRESSED: &str = "PRESSED";
    pub const RELEASED: &str = "RELEASED";
    pub const SHORT_PRESSED: &str = "SHORT_PRESSED";
    pub const DOUBLE_PRESSED: &str = "DOUBLE_PRESSED";
    pub const LONG_PRESSED: &str = "LONG_PRESSED";
    pub const DIR1_PRESSED: &str = "DIR1_PRESSED";
    pub const DIR1_RELEASED: &str = "DIR1_RELEASED";
    pub const DIR2_PRESSED: &str = "DIR2_PRESSED";
    pub const DIR2_RELEASED: &str = "DIR2_RELEASED";
}

/// Channel categories the profile advisor knows how to handle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChannelCategory {
    Button,
    RawButton,
    RawRocker,
}

impl ChannelCategory {
    /// Category of a channel type, if it is one of the built-in trigger types.
    #[must_use]
    pub fn from_channel_type(uid: &ChannelTypeUid) -> Option<Self> {
        if *uid == system_channel_types::BUTTON {
            Some(Self::Button)
        } else if *uid == system_channel_types::RAWBUTTON {
            Some(Self::RawButton)
        } else if *uid == system_channel_types::RAWROCKER {
            Some(Self::RawRocker)
        } else {
            None
        }
    }
}

/// Describes a family of channels.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChannelType {
    pub uid: ChannelTypeUid,
    pub kind: ChannelKind,
    pub label: String,
}

impl ChannelType {
    #[must_use]
    pub fn new(uid: ChannelTypeUid, kind: ChannelKind, label: impl Into<String>) -> Self {
        Self {
            uid,
            kind,
            label: label.into(),
        }
    }

    #[must_use]
    pub fn category(&self) -> Option<ChannelCategory> {
        ChannelCategory::from_channel_type(&self.uid)
    }
}

/// One concrete channel of a thing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Channel {
    pub uid: ChannelUid,
    pub kind: ChannelKind,
    #[serde(default)]
    pub channel_type: Option<ChannelTypeUid>,
}

impl Channel {
    #[must_use]
    pub fn new(uid: ChannelUid, kind: ChannelKind) -> Self {
        Self {
            uid,
            kind,
            channel_type: None,
        }
    }

    #[must_use]
    pub fn with_channel_type(mut self, channel_type: ChannelTypeUid) -> Self {
        self.channel_type = Some(channel_type);
        self
    }
}
