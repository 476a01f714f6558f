use std::fmt;

use chrono::{NaiveDate, NaiveDateTime};

use crate::constants::HOUR_PREFIX_LEN;

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum WindowError {
    #[error("use format 'YYYY-MM-DD HH'")]
    Format,
    #[error("end hour must be after start hour")]
    Empty,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("timestamp lacks a valid 'YYYY-MM-DD HH' prefix")]
pub struct MalformedTimestamp;

/// Half-open scan window `[start, end)` at hour granularity.
///
/// Built once per run from the four CLI tokens; immutable afterwards.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeWindow {
    start: NaiveDateTime,
    end: NaiveDateTime,
}

impl TimeWindow {
    pub fn new(start: NaiveDateTime, end: NaiveDateTime) -> Result<Self, WindowError> {
        if end <= start {
            return Err(WindowError::Empty);
        }
        Ok(Self { start, end })
    }

    /// Builds a window from `YYYY-MM-DD` date tokens and `HH` hour tokens.
    pub fn from_hour_args(
        start_date: &str,
        start_hour: &str,
        end_date: &str,
        end_hour: &str,
    ) -> Result<Self, WindowError> {
        let start = hour_precision(start_date, start_hour).ok_or(WindowError::Format)?;
        let end = hour_precision(end_date, end_hour).ok_or(WindowError::Format)?;
        Self::new(start, end)
    }

    #[must_use]
    pub const fn start(&self) -> NaiveDateTime {
        self.start
    }

    #[must_use]
    pub const fn end(&self) -> NaiveDateTime {
        self.end
    }

    /// Start inclusive, end exclusive.
    #[must_use]
    pub fn contains(&self, instant: NaiveDateTime) -> bool {
        self.start <= instant && instant < self.end
    }
}

impl fmt::Display for TimeWindow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} to {}",
            self.start.format("%Y-%m-%d %H"),
            self.end.format("%Y-%m-%d %H")
        )
    }
}

/// Parses the hour-granularity prefix of a record timestamp, exactly the
/// leading `YYYY-MM-DD HH` characters. Minutes and seconds are ignored.
pub fn hour_floor(timestamp: &str) -> Result<NaiveDateTime, MalformedTimestamp> {
    let prefix = timestamp
        .get(..HOUR_PREFIX_LEN)
        .ok_or(MalformedTimestamp)?;
    if prefix.as_bytes().get(10) != Some(&b' ') {
        return Err(MalformedTimestamp);
    }
    let date_part = prefix.get(..10).ok_or(MalformedTimestamp)?;
    let hour_part = prefix.get(11..).ok_or(MalformedTimestamp)?;
    hour_precision(date_part, hour_part).ok_or(MalformedTimestamp)
}

fn hour_precision(date: &str, hour: &str) -> Option<NaiveDateTime> {
    let date = NaiveDate::parse_from_str(date, "%Y-%m-%d").ok()?;
    let hour: u32 = hour.parse().ok()?;
    date.and_hms_opt(hour, 0, 0)
}
