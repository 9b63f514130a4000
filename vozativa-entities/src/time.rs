use std::fmt;

use time::{
    format_description::FormatItem, macros::format_description, Duration, OffsetDateTime,
};

/// Point in time with second precision, stored as Unix timestamp.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Timestamp(i64);

// Brazilian date order, as rendered on all portal pages.
const DISPLAY_FORMAT: &[FormatItem<'_>] = format_description!("[day]/[month]/[year] [hour]:[minute]");

impl Timestamp {
    pub fn now() -> Self {
        Self(OffsetDateTime::now_utc().unix_timestamp())
    }

    pub const fn from_secs(secs: i64) -> Self {
        Self(secs)
    }

    pub const fn as_secs(self) -> i64 {
        self.0
    }

    pub fn checked_add(self, duration: Duration) -> Option<Self> {
        self.0.checked_add(duration.whole_seconds()).map(Self)
    }

    pub fn checked_sub(self, duration: Duration) -> Option<Self> {
        self.0.checked_sub(duration.whole_seconds()).map(Self)
    }
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let formatted = OffsetDateTime::from_unix_timestamp(self.0)
            .ok()
            .and_then(|date_time| date_time.format(DISPLAY_FORMAT).ok());
        match formatted {
            Some(formatted) => write!(f, "{formatted}"),
            None => write!(f, "-"),
        }
    }
}
