//! Time and timestamp helpers.

use chrono::{DateTime, TimeDelta, Utc};

/// UTC timestamp carried by `DateTime` states and timestamp attributes.
pub type Timestamp = DateTime<Utc>;

/// Return the current UTC time.
#[must_use]
pub fn now() -> Timestamp {
    Utc::now()
}

/// Shift `ts` by a signed number of milliseconds, saturating at the
/// representable bounds.
#[must_use]
pub fn shift_millis(ts: Timestamp, millis: i64) -> Timestamp {
    TimeDelta::try_milliseconds(millis)
        .and_then(|delta| ts.checked_add_signed(delta))
        .unwrap_or(if millis < 0 {
            DateTime::<Utc>::MIN_UTC
        } else {
            DateTime::<Utc>::MAX_UTC
        })
}
