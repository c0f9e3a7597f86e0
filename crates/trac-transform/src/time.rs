//! Timestamp to display date conversion.

use chrono::{DateTime, Local, NaiveDate};

use crate::sanitize::{Quoting, sanitize};

/// Values above this are treated as microseconds since the epoch.
pub const MICROSECOND_THRESHOLD: i64 = 9_999_999_999;

/// `Jan 02, 1970`.
pub const DISPLAY_FORMAT: &str = "%b %d, %Y";

/// Calendar used to turn an instant into a date.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum TimeZoneMode {
    /// The machine's local time zone.
    #[default]
    Local,
    Utc,
}

/// Formats legacy timestamps as `Mon DD, YYYY`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TimeFormatter {
    zone: TimeZoneMode,
}

impl TimeFormatter {
    #[must_use]
    pub const fn new(zone: TimeZoneMode) -> Self {
        Self { zone }
    }

    #[must_use]
    pub const fn zone(&self) -> TimeZoneMode {
        self.zone
    }

    /// Coerce a second- or microsecond-resolution timestamp to seconds.
    #[must_use]
    pub const fn to_seconds(timestamp: i64) -> i64 {
        if timestamp > MICROSECOND_THRESHOLD {
            timestamp.div_euclid(1_000_000)
        } else {
            timestamp
        }
    }

    /// Calendar date of a timestamp; `None` for zero or out-of-range values.
    #[must_use]
    pub fn calendar_date(&self, timestamp: i64) -> Option<NaiveDate> {
        if timestamp == 0 {
            return None;
        }
        let instant = DateTime::from_timestamp(Self::to_seconds(timestamp), 0)?;
        let date = match self.zone {
            TimeZoneMode::Local => instant.with_timezone(&Local).date_naive(),
            TimeZoneMode::Utc => instant.date_naive(),
        };
        Some(date)
    }

    /// Render a timestamp, or an empty field when there is no usable date.
    #[must_use]
    pub fn format(&self, timestamp: i64, quoting: Quoting) -> String {
        match self.calendar_date(timestamp) {
            Some(date) => sanitize(&date.format(DISPLAY_FORMAT).to_string(), quoting),
            None => String::new(),
        }
    }
}
