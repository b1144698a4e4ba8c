//! Time and timestamp helpers.

use chrono::{DateTime, Utc};

/// UTC timestamp recorded when a command is pressed.
pub type Timestamp = DateTime<Utc>;

/// Return the current UTC time.
#[must_use]
pub fn now() -> Timestamp {
    Utc::now()
}
