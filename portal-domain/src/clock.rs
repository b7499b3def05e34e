use chrono::{DateTime, Utc};

/// Source of timestamps for created/updated fields.
pub type Clock = fn() -> DateTime<Utc>;

/// The wall clock.
pub fn system_clock() -> DateTime<Utc> {
    Utc::now()
}
