//! Percentage value in `0..=100`.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::ValueError;

/// A finite percentage between 0 and 100 inclusive.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(try_from = "f64", into = "f64")]
pub struct Percent(f64);

impl Percent {
    pub const ZERO: Self = Self(0.0);
    pub const HUNDRED: Self = Self(100.0);

    /// # Errors
    ///
    /// Returns [`ValueError::OutOfRange`] for values outside `0..=100`
    /// (including NaN).
    pub fn new(value: f64) -> Result<Self, ValueError> {
        if (0.0..=100.0).contains(&value) {
            Ok(Self(value))
        } else {
            Err(ValueError::OutOfRange {
                value,
                min: 0.0,
                max: 100.0,
            })
        }
    }

    /// Clamp into range; NaN becomes zero.
    #[must_use]
    pub fn clamped(value: f64) -> Self {
        if value.is_nan() {
            Self::ZERO
        } else {
            Self(value.clamp(0.0, 100.0))
        }
    }

    #[must_use]
    pub const fn value(self) -> f64 {
        self.0
    }
}

impl TryFrom<f64> for Percent {
    type Error = ValueError;

    fn try_from(value: f64) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Percent> for f64 {
    fn from(p: Percent) -> Self {
        p.0
    }
}

impl fmt::Display for Percent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_accept_bounds() {
        assert_eq!(Percent::new(0.0).unwrap(), Percent::ZERO);
        assert_eq!(Percent::new(100.0).unwrap(), Percent::HUNDRED);
    }

    #[test]
    fn should_reject_value_above_hundred() {
        assert!(matches!(
            Percent::new(100.5),
            Err(ValueError::OutOfRange { .. })
        ));
    }

    #[test]
    fn should_reject_nan() {
        assert!(Percent::new(f64::NAN).is_err());
    }

    #[test]
    fn should_clamp_out_of_range_values() {
        assert_eq!(Percent::clamped(-4.0), Percent::ZERO);
        assert_eq!(Percent::clamped(120.0), Percent::HUNDRED);
        assert_eq!(Percent::clamped(f64::NAN), Percent::ZERO);
    }

    #[test]
    fn should_refuse_out_of_range_json() {
        assert!(serde_json::from_str::<Percent>("150").is_err());
    }
}
