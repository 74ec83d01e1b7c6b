//! Units of measurement and dimensioned quantities.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ValueError;

/// Physical dimension of a [`Unit`]; only units of the same dimension convert.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Dimension {
    Dimensionless,
    Temperature,
    Power,
    Energy,
    Length,
    Pressure,
    Illuminance,
    Time,
}

/// A supported unit.
///
/// Every unit is an affine map onto the SI base unit of its dimension:
/// `base = value * scale + zero_point`. Only temperatures have a non-zero
/// zero point.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Unit {
    One,
    Percent,
    Celsius,
    Fahrenheit,
    Kelvin,
    Watt,
    Kilowatt,
    WattHour,
    KilowattHour,
    Millimetre,
    Centimetre,
    Metre,
    Kilometre,
    Pascal,
    Hectopascal,
    Bar,
    Lux,
    Second,
    Minute,
    Hour,
}

impl Unit {
    #[must_use]
    pub const fn symbol(self) -> &'static str {
        match self {
            Self::One => "one",
            Self::Percent => "%",
            Self::Celsius => "°C",
            Self::Fahrenheit => "°F",
            Self::Kelvin => "K",
            Self::Watt => "W",
            Self::Kilowatt => "kW",
            Self::WattHour => "Wh",
            Self::KilowattHour => "kWh",
            Self::Millimetre => "mm",
            Self::Centimetre => "cm",
            Self::Metre => "m",
            Self::Kilometre => "km",
            Self::Pascal => "Pa",
            Self::Hectopascal => "hPa",
            Self::Bar => "bar",
            Self::Lux => "lx",
            Self::Second => "s",
            Self::Minute => "min",
            Self::Hour => "h",
        }
    }

    #[must_use]
    pub const fn dimension(self) -> Dimension {
        match self {
            Self::One | Self::Percent => Dimension::Dimensionless,
            Self::Celsius | Self::Fahrenheit | Self::Kelvin => Dimension::Temperature,
            Self::Watt | Self::Kilowatt => Dimension::Power,
            Self::WattHour | Self::KilowattHour => Dimension::Energy,
            Self::Millimetre | Self::Centimetre | Self::Metre | Self::Kilometre => {
                Dimension::Length
            }
            Self::Pascal | Self::Hectopascal | Self::Bar => Dimension::Pressure,
            Self::Lux => Dimension::Illuminance,
            Self::Second | Self::Minute | Self::Hour => Dimension::Time,
        }
    }

    const fn scale(self) -> f64 {
        match self {
            Self::Percent => 0.01,
            Self::Fahrenheit => 5.0 / 9.0,
            Self::Kilowatt | Self::Kilometre => 1_000.0,
            Self::WattHour => 3_600.0,
            Self::KilowattHour => 3_600_000.0,
            Self::Millimetre => 0.001,
            Self::Centimetre => 0.01,
            Self::Hectopascal => 100.0,
            Self::Bar => 100_000.0,
            Self::Minute => 60.0,
            Self::Hour => 3_600.0,
            _ => 1.0,
        }
    }

    const fn zero_point(self) -> f64 {
        match self {
            Self::Celsius => 273.15,
            Self::Fahrenheit => 273.15 - 32.0 * 5.0 / 9.0,
            _ => 0.0,
        }
    }

    fn ensure_compatible(self, target: Self) -> Result<(), ValueError> {
        if self.dimension() == target.dimension() {
            Ok(())
        } else {
            Err(ValueError::IncompatibleUnit {
                from: self.symbol().to_string(),
                to: target.symbol().to_string(),
            })
        }
    }
}

impl fmt::Display for Unit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

impl FromStr for Unit {
    type Err = ValueError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let unit = match s.trim() {
            "" | "one" => Self::One,
            "%" => Self::Percent,
            "°C" | "℃" | "degC" => Self::Celsius,
            "°F" | "℉" | "degF" => Self::Fahrenheit,
            "K" => Self::Kelvin,
            "W" => Self::Watt,
            "kW" => Self::Kilowatt,
            "Wh" => Self::WattHour,
            "kWh" => Self::KilowattHour,
            "mm" => Self::Millimetre,
            "cm" => Self::Centimetre,
            "m" => Self::Metre,
            "km" => Self::Kilometre,
            "Pa" => Self::Pascal,
            "hPa" => Self::Hectopascal,
            "bar" => Self::Bar,
            "lx" => Self::Lux,
            "s" => Self::Second,
            "min" => Self::Minute,
            "h" => Self::Hour,
            other => return Err(ValueError::UnknownUnit(other.to_string())),
        };
        Ok(unit)
    }
}

impl TryFrom<String> for Unit {
    type Error = ValueError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Unit> for String {
    fn from(unit: Unit) -> Self {
        unit.symbol().to_string()
    }
}

/// A numeric value carrying a [`Unit`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Quantity {
    pub value: f64,
    pub unit: Unit,
}

impl Quantity {
    #[must_use]
    pub const fn new(value: f64, unit: Unit) -> Self {
        Self { value, unit }
    }

    /// A plain number with no physical dimension.
    #[must_use]
    pub const fn dimensionless(value: f64) -> Self {
        Self::new(value, Unit::One)
    }

    #[must_use]
    pub fn is_dimensionless(self) -> bool {
        self.unit.dimension() == Dimension::Dimensionless
    }

    /// Convert an absolute value (`20 °C` → `68 °F`).
    ///
    /// # Errors
    ///
    /// Returns [`ValueError::IncompatibleUnit`] across dimensions.
    pub fn to_unit(self, unit: Unit) -> Result<Self, ValueError> {
        self.unit.ensure_compatible(unit)?;
        if self.unit == unit {
            return Ok(self);
        }
        let base = self.value * self.unit.scale() + self.unit.zero_point();
        Ok(Self::new((base - unit.zero_point()) / unit.scale(), unit))
    }

    /// Convert a difference (`5 °C` → `9 °F`), ignoring zero points.
    ///
    /// # Errors
    ///
    /// Returns [`ValueError::IncompatibleUnit`] across dimensions.
    pub fn to_unit_relative(self, unit: Unit) -> Result<Self, ValueError> {
        self.unit.ensure_compatible(unit)?;
        if self.unit == unit {
            return Ok(self);
        }
        Ok(Self::new(self.value * self.unit.scale() / unit.scale(), unit))
    }

    /// Add a difference expressed in any compatible unit; the result keeps
    /// `self`'s unit.
    ///
    /// # Errors
    ///
    /// Returns [`ValueError::IncompatibleUnit`] across dimensions.
    pub fn add_delta(self, delta: Self) -> Result<Self, ValueError> {
        let delta = delta.to_unit_relative(self.unit)?;
        Ok(Self::new(self.value + delta.value, self.unit))
    }

    #[must_use]
    pub fn negate(self) -> Self {
        Self::new(-self.value, self.unit)
    }
}

impl fmt::Display for Quantity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.unit == Unit::One {
            write!(f, "{}", self.value)
        } else {
            write!(f, "{} {}", self.value, self.unit)
        }
    }
}

impl FromStr for Quantity {
    type Err = ValueError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let split = s
            .find(|c: char| !(c.is_ascii_digit() || matches!(c, '.' | '-' | '+' | 'e' | 'E')))
            .unwrap_or(s.len());
        let (number, unit) = s.split_at(split);
        let value: f64 = number
            .trim()
            .parse()
            .map_err(|_| ValueError::InvalidNumber(s.to_string()))?;
        if !value.is_finite() {
            return Err(ValueError::InvalidNumber(s.to_string()));
        }
        Ok(Self::new(value, unit.parse()?))
    }
}
