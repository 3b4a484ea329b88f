//! Timestamp rendering and clock sources

use chrono::{DateTime, Utc};

/// SQL-like UTC layout: `2025-01-08 10:30:45.123`
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S%.3f";

/// Render a UTC instant as `YYYY-MM-DD HH:MM:SS.mmm`
///
/// # Examples
///
/// ```
/// use stamp_log::core::timestamp::timestamp;
/// use chrono::{TimeZone, Utc};
///
/// let at = Utc.with_ymd_and_hms(2025, 1, 8, 10, 30, 45).unwrap();
/// assert_eq!(timestamp(&at), "2025-01-08 10:30:45.000");
/// ```
#[must_use]
pub fn timestamp(datetime: &DateTime<Utc>) -> String {
    datetime.format(TIMESTAMP_FORMAT).to_string()
}

/// Source of the current instant. Read once per emitted line.
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}

/// Wall clock
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// A clock frozen at one instant, for deterministic output in tests
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub DateTime<Utc>);

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.0
    }
}
