//! Time and timestamp helpers.

use chrono::{DateTime, Utc};

/// UTC timestamp used for `created_at`.
pub type Timestamp = DateTime<Utc>;

/// Return the current UTC time.
#[must_use]
pub fn now() -> Timestamp {
    Utc::now()
}

/// Whether `ts` is the zero value (`Timestamp::default()`, the Unix epoch).
#[must_use]
pub fn is_zero(ts: &Timestamp) -> bool {
    *ts == Timestamp::default()
}
