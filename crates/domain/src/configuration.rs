//! Link configuration — option name to typed value.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::error::{ConfigurationError, ValueError};
use crate::value::Quantity;

/// A single configuration value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ConfigValue {
    Bool(bool),
    Int(i64),
    Float(f64),
    String(String),
}

impl From<bool> for ConfigValue {
    fn from(v: bool) -> Self {
        Self::Bool(v)
    }
}

impl From<i64> for ConfigValue {
    fn from(v: i64) -> Self {
        Self::Int(v)
    }
}

impl From<f64> for ConfigValue {
    fn from(v: f64) -> Self {
        Self::Float(v)
    }
}

impl From<&str> for ConfigValue {
    fn from(v: &str) -> Self {
        Self::String(v.to_string())
    }
}

impl From<String> for ConfigValue {
    fn from(v: String) -> Self {
        Self::String(v)
    }
}

/// Options of one link.
///
/// Lookups distinguish "absent" (`Ok(None)`) from "present but unusable"
/// (`Err`), so profiles can fall back to defaults only for the former.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Configuration(HashMap<String, ConfigValue>);

impl Configuration {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with(mut self, name: impl Into<String>, value: impl Into<ConfigValue>) -> Self {
        self.insert(name, value);
        self
    }

    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<ConfigValue>) {
        self.0.insert(name.into(), value.into());
    }

    #[must_use]
    pub fn get(&self, name: &str) -> Option<&ConfigValue> {
        self.0.get(name)
    }

    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.0.contains_key(name)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Numeric option; numeric strings are accepted.
    ///
    /// # Errors
    ///
    /// [`ConfigurationError::InvalidType`] when present but not a number.
    #[allow(clippy::cast_precision_loss)]
    pub fn get_f64(&self, name: &str) -> Result<Option<f64>, ConfigurationError> {
        match self.get(name) {
            None => Ok(None),
            Some(ConfigValue::Int(v)) => Ok(Some(*v as f64)),
            Some(ConfigValue::Float(v)) if v.is_finite() => Ok(Some(*v)),
            Some(ConfigValue::String(s)) => s
                .trim()
                .parse::<f64>()
                .ok()
                .filter(|v| v.is_finite())
                .map(Some)
                .ok_or_else(|| invalid_type(name, "a number")),
            Some(_) => Err(invalid_type(name, "a number")),
        }
    }

    /// Boolean option; `"true"`/`"false"` strings are accepted.
    ///
    /// # Errors
    ///
    /// [`ConfigurationError::InvalidType`] when present but not a boolean.
    pub fn get_bool(&self, name: &str) -> Result<Option<bool>, ConfigurationError> {
        match self.get(name) {
            None => Ok(None),
            Some(ConfigValue::Bool(v)) => Ok(Some(*v)),
            Some(ConfigValue::String(s)) => s
                .trim()
                .parse()
                .map(Some)
                .map_err(|_| invalid_type(name, "a boolean")),
            Some(_) => Err(invalid_type(name, "a boolean")),
        }
    }

    /// String option.
    ///
    /// # Errors
    ///
    /// [`ConfigurationError::InvalidType`] when present but not a string.
    pub fn get_str(&self, name: &str) -> Result<Option<&str>, ConfigurationError> {
        match self.get(name) {
            None => Ok(None),
            Some(ConfigValue::String(s)) => Ok(Some(s.as_str())),
            Some(_) => Err(invalid_type(name, "a string")),
        }
    }

    /// Quantity option: a bare number (dimensionless) or a string such as
    /// `"5 °C"`.
    ///
    /// # Errors
    ///
    /// [`ConfigurationError::Invalid`] when the string does not parse,
    /// [`ConfigurationError::InvalidType`] for booleans.
    #[allow(clippy::cast_precision_loss)]
    pub fn get_quantity(&self, name: &str) -> Result<Option<Quantity>, ConfigurationError> {
        match self.get(name) {
            None => Ok(None),
            Some(ConfigValue::Int(v)) => Ok(Some(Quantity::dimensionless(*v as f64))),
            Some(ConfigValue::Float(v)) if v.is_finite() => Ok(Some(Quantity::dimensionless(*v))),
            Some(ConfigValue::String(s)) => s
                .parse()
                .map(Some)
                .map_err(|source| ConfigurationError::Invalid {
                    name: name.to_string(),
                    source,
                }),
            Some(_) => Err(invalid_type(name, "a number or a quantity")),
        }
    }

    /// Signed duration in milliseconds: a number of seconds, or a string
    /// with an `ms`, `s`, `m`, `h` or `d` suffix (`"-1h"`, `"90s"`).
    ///
    /// # Errors
    ///
    /// [`ConfigurationError::Invalid`] when the string does not parse.
    #[allow(clippy::cast_possible_truncation)]
    pub fn get_duration_millis(&self, name: &str) -> Result<Option<i64>, ConfigurationError> {
        let seconds = match self.get(name) {
            None => return Ok(None),
            Some(ConfigValue::String(s)) => {
                return parse_duration_millis(s).map(Some).map_err(|source| {
                    ConfigurationError::Invalid {
                        name: name.to_string(),
                        source,
                    }
                });
            }
            Some(_) => self.get_f64(name)?.unwrap_or_default(),
        };
        Ok(Some((seconds * 1_000.0).round() as i64))
    }

    /// Like [`get_f64`](Self::get_f64) but absent is an error.
    ///
    /// # Errors
    ///
    /// [`ConfigurationError::Missing`] when absent.
    pub fn require_f64(&self, name: &str) -> Result<f64, ConfigurationError> {
        self.get_f64(name)?.ok_or_else(|| missing(name))
    }

    /// Like [`get_quantity`](Self::get_quantity) but absent is an error.
    ///
    /// # Errors
    ///
    /// [`ConfigurationError::Missing`] when absent.
    pub fn require_quantity(&self, name: &str) -> Result<Quantity, ConfigurationError> {
        self.get_quantity(name)?.ok_or_else(|| missing(name))
    }
}

impl FromIterator<(String, ConfigValue)> for Configuration {
    fn from_iter<T: IntoIterator<Item = (String, ConfigValue)>>(iter: T) -> Self {
        Self(iter.into_iter().collect())
    }
}

#[allow(clippy::cast_possible_truncation)]
fn parse_duration_millis(s: &str) -> Result<i64, ValueError> {
    let s = s.trim();
    let invalid = || ValueError::InvalidNumber(s.to_string());
    let (number, factor) = if let Some(n) = s.strip_suffix("ms") {
        (n, 1.0)
    } else if let Some(n) = s.strip_suffix('s') {
        (n, 1_000.0)
    } else if let Some(n) = s.strip_suffix('m') {
        (n, 60_000.0)
    } else if let Some(n) = s.strip_suffix('h') {
        (n, 3_600_000.0)
    } else if let Some(n) = s.strip_suffix('d') {
        (n, 86_400_000.0)
    } else {
        (s, 1_000.0)
    };
    let value: f64 = number.trim().parse().map_err(|_| invalid())?;
    if !value.is_finite() {
        return Err(invalid());
    }
    Ok((value * factor).round() as i64)
}

fn invalid_type(name: &str, expected: &'static str) -> ConfigurationError {
    ConfigurationError::InvalidType {
        name: name.to_string(),
        expected,
    }
}

fn missing(name: &str) -> ConfigurationError {
    ConfigurationError::Missing {
        name: name.to_string(),
    }
}
