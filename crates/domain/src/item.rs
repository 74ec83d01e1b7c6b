//! Item types — the kind of application-level value an item holds.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;
use crate::value::Dimension;

/// Declared type of an item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum ItemType {
    Call,
    Color,
    Contact,
    DateTime,
    Dimmer,
    Group,
    Image,
    Location,
    /// A number, optionally restricted to one dimension (`Number:Temperature`).
    Number(Option<Dimension>),
    Player,
    Rollershutter,
    String,
    Switch,
}

impl ItemType {
    #[must_use]
    pub const fn base_name(self) -> &'static str {
        match self {
            Self::Call => "Call",
            Self::Color => "Color",
            Self::Contact => "Contact",
            Self::DateTime => "DateTime",
            Self::Dimmer => "Dimmer",
            Self::Group => "Group",
            Self::Image => "Image",
            Self::Location => "Location",
            Self::Number(_) => "Number",
            Self::Player => "Player",
            Self::Rollershutter => "Rollershutter",
            Self::String => "String",
            Self::Switch => "Switch",
        }
    }

    /// Same base type, ignoring any number dimension.
    #[must_use]
    pub fn same_base(self, other: Self) -> bool {
        self.base_name() == other.base_name()
    }
}

const fn dimension_name(dimension: Dimension) -> &'static str {
    match dimension {
        Dimension::Dimensionless => "Dimensionless",
        Dimension::Temperature => "Temperature",
        Dimension::Power => "Power",
        Dimension::Energy => "Energy",
        Dimension::Length => "Length",
        Dimension::Pressure => "Pressure",
        Dimension::Illuminance => "Illuminance",
        Dimension::Time => "Time",
    }
}

fn parse_dimension(s: &str) -> Option<Dimension> {
    [
        Dimension::Dimensionless,
        Dimension::Temperature,
        Dimension::Power,
        Dimension::Energy,
        Dimension::Length,
        Dimension::Pressure,
        Dimension::Illuminance,
        Dimension::Time,
    ]
    .into_iter()
    .find(|d| dimension_name(*d).eq_ignore_ascii_case(s))
}

impl fmt::Display for ItemType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(Some(dimension)) => write!(f, "Number:{}", dimension_name(*dimension)),
            other => f.write_str(other.base_name()),
        }
    }
}

impl FromStr for ItemType {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let unknown = || ValidationError::UnknownItemType(s.to_string());
        let (base, dimension) = match s.split_once(':') {
            Some((base, dimension)) => {
                (base, Some(parse_dimension(dimension).ok_or_else(unknown)?))
            }
            None => (s, None),
        };
        let item_type = [
            Self::Call,
            Self::Color,
            Self::Contact,
            Self::DateTime,
            Self::Dimmer,
            Self::Group,
            Self::Image,
            Self::Location,
            Self::Number(None),
            Self::Player,
            Self::Rollershutter,
            Self::String,
            Self::Switch,
        ]
        .into_iter()
        .find(|t| t.base_name().eq_ignore_ascii_case(base))
        .ok_or_else(unknown)?;
        match (item_type, dimension) {
            (Self::Number(None), dimension) => Ok(Self::Number(dimension)),
            (other, None) => Ok(other),
            (_, Some(_)) => Err(unknown()),
        }
    }
}

impl TryFrom<String> for ItemType {
    type Error = ValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<ItemType> for String {
    fn from(item_type: ItemType) -> Self {
        item_type.to_string()
    }
}
