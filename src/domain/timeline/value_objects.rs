use chrono::{DateTime, FixedOffset, NaiveDateTime, TimeZone};
use derive_more::Display;
use serde::{Deserialize, Serialize};

pub const MINUTE_MS: i64 = 60_000;

/// Value Object - instant in milliseconds since the Unix epoch (UTC)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Display, Serialize, Deserialize)]
#[display(fmt = "{}", _0)]
pub struct Timestamp(i64);

impl Timestamp {
    pub const fn from_millis(millis: i64) -> Self {
        Self(millis)
    }

    pub fn value(&self) -> i64 {
        self.0
    }

    /// Drop seconds and milliseconds.
    pub fn truncate_to_minute(&self) -> Self {
        Self(self.0 - self.0.rem_euclid(MINUTE_MS))
    }

    pub fn minutes_since(&self, earlier: Timestamp) -> f64 {
        (self.0 - earlier.0) as f64 / MINUTE_MS as f64
    }

    /// Parse an ISO-8601 bucket time.
    ///
    /// Strings carrying an offset are taken as-is; naive strings are read in
    /// `local_offset_minutes`, which is how a browser's `Date` treats them.
    pub fn parse_iso(value: &str, local_offset_minutes: i32) -> Option<Self> {
        let value = value.trim();
        if let Ok(parsed) = DateTime::parse_from_rfc3339(value) {
            return Some(Self(parsed.timestamp_millis()));
        }

        let naive = ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%dT%H:%M"]
            .iter()
            .find_map(|format| NaiveDateTime::parse_from_str(value, format).ok())?;
        let offset = FixedOffset::east_opt(local_offset_minutes * 60)?;
        offset
            .from_local_datetime(&naive)
            .single()
            .map(|dt| Self(dt.timestamp_millis()))
    }
}

impl From<i64> for Timestamp {
    fn from(millis: i64) -> Self {
        Self(millis)
    }
}
