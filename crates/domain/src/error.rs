//! Common error types used across the workspace.
//!
//! Each layer defines its own typed errors and converts into
//! [`HubLinkError`] via `#[from]` (no `String` catch-all variants).

/// Top-level error for the hublink domain.
#[derive(Debug, thiserror::Error)]
pub enum HubLinkError {
    #[error("validation error")]
    Validation(#[from] ValidationError),

    #[error("not found")]
    NotFound(#[from] NotFoundError),

    #[error("configuration error")]
    Configuration(#[from] ConfigurationError),

    #[error("value error")]
    Value(#[from] ValueError),
}

/// A domain invariant was violated while building a value.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("name must not be empty")]
    EmptyName,

    #[error("invalid {kind} uid {value:?}")]
    InvalidUid {
        /// Which uid family was being parsed (`profile type`, `channel`, …).
        kind: &'static str,
        value: String,
    },

    #[error("unknown channel kind {0:?}")]
    UnknownChannelKind(String),

    #[error("unknown item type {0:?}")]
    UnknownItemType(String),
}

/// A lookup by identifier found nothing.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{entity} {id} not found")]
pub struct NotFoundError {
    pub entity: &'static str,
    pub id: String,
}

/// A profile could not be configured from the link's options.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ConfigurationError {
    #[error("missing required option {name:?}")]
    Missing { name: String },

    #[error("option {name:?} must be {expected}")]
    InvalidType {
        name: String,
        expected: &'static str,
    },

    #[error("option {name:?} is invalid")]
    Invalid {
        name: String,
        #[source]
        source: ValueError,
    },

    #[error("option {name:?} is out of range: {reason}")]
    OutOfRange { name: String, reason: &'static str },

    #[error("input range [{min}, {max}] is empty")]
    DegenerateRange { min: f64, max: f64 },

    #[error("no scheduler available")]
    SchedulerUnavailable,
}

/// Converting, parsing or combining a value failed.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ValueError {
    #[error("unit {from} is not compatible with {to}")]
    IncompatibleUnit { from: String, to: String },

    #[error("unknown unit {0:?}")]
    UnknownUnit(String),

    #[error("invalid number {0:?}")]
    InvalidNumber(String),

    #[error("{value} is outside {min}..={max}")]
    OutOfRange { value: f64, min: f64, max: f64 },

    #[error("cannot convert {from} to {to}")]
    Conversion {
        from: &'static str,
        to: &'static str,
    },
}
