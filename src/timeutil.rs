//! Clock-of-day values and minute arithmetic.
//!
//! All pay calculation happens on integer minutes since local midnight.
//! Cross-midnight spans are handled by adding a single day to the later
//! endpoint; shifts never span more than one midnight.

use crate::error::{AppError, Result};
use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Minutes in one day.
pub const MINUTES_PER_DAY: i64 = 1440;

/// A time of day with minute resolution (no date component).
///
/// Parses strictly from `HH:MM` (hours 00-23, minutes 00-59). Punch-sheet
/// ingestion paths that must survive dirty data use [`ClockTime::parse_lenient`]
/// and drop unparseable values instead of propagating the error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ClockTime(u16);

impl ClockTime {
    /// Build from minutes since midnight. Rejects values outside 0..1440.
    pub fn from_minutes(minutes: i64) -> Option<Self> {
        if (0..MINUTES_PER_DAY).contains(&minutes) {
            Some(Self(minutes as u16))
        } else {
            None
        }
    }

    /// Minutes since local midnight (0..=1439).
    pub fn minutes(self) -> i64 {
        i64::from(self.0)
    }

    /// Lenient parse: `None` for anything that is not a valid `HH:MM`.
    ///
    /// Used by the interpreter and importer, which treat malformed punches
    /// as absent rather than failing the whole record.
    pub fn parse_lenient(s: &str) -> Option<Self> {
        s.trim().parse().ok()
    }
}

impl FromStr for ClockTime {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self> {
        let bytes = s.as_bytes();
        if bytes.len() != 5
            || bytes[2] != b':'
            || !bytes[0].is_ascii_digit()
            || !bytes[1].is_ascii_digit()
            || !bytes[3].is_ascii_digit()
            || !bytes[4].is_ascii_digit()
        {
            return Err(AppError::parse(format!("Invalid time format: '{s}'")));
        }

        let hours = i64::from(bytes[0] - b'0') * 10 + i64::from(bytes[1] - b'0');
        let minutes = i64::from(bytes[3] - b'0') * 10 + i64::from(bytes[4] - b'0');
        if hours > 23 || minutes > 59 {
            return Err(AppError::parse(format!("Time out of range: '{s}'")));
        }

        Ok(Self((hours * 60 + minutes) as u16))
    }
}

impl fmt::Display for ClockTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}", self.0 / 60, self.0 % 60)
    }
}

impl TryFrom<String> for ClockTime {
    type Error = AppError;

    fn try_from(s: String) -> Result<Self> {
        s.parse()
    }
}

impl From<ClockTime> for String {
    fn from(t: ClockTime) -> Self {
        t.to_string()
    }
}

/// Lenient `HH:MM` to minutes-of-day; 0 for malformed input.
///
/// Mirrors the leniency of the punch-sheet pipeline: garbage is worth zero
/// minutes, never an error. Callers that need strict parsing use
/// `ClockTime::from_str`.
pub fn time_to_minutes(time: &str) -> i64 {
    ClockTime::parse_lenient(time).map_or(0, ClockTime::minutes)
}

/// Render a minute count as `HH:MM`.
///
/// Supports values >= 1440 (renders hours past 23). Only valid for
/// aggregated durations, not wall-clock times.
pub fn minutes_to_time(minutes: i64) -> String {
    let minutes = minutes.max(0);
    format!("{:02}:{:02}", minutes / 60, minutes % 60)
}

/// Duration in minutes from `start` to `end`, rolling over midnight once
/// when `end` is numerically earlier.
pub fn duration_minutes(start: ClockTime, end: ClockTime) -> i64 {
    let start = start.minutes();
    let mut end = end.minutes();
    if end < start {
        end += MINUTES_PER_DAY;
    }
    end - start
}

/// ISO-8601 day of week: Monday=1 .. Sunday=7.
pub fn day_of_week_iso(date: NaiveDate) -> u32 {
    date.weekday().number_from_monday()
}

/// Saturday or Sunday.
pub fn is_weekend(date: NaiveDate) -> bool {
    day_of_week_iso(date) >= 6
}

#[cfg(test)]
mod tests {
    use super::*;

    fn clock(s: &str) -> ClockTime {
        s.parse().unwrap()
    }

    #[test]
    fn test_parse_valid_clock_times() {
        assert_eq!(clock("00:00").minutes(), 0);
        assert_eq!(clock("08:30").minutes(), 510);
        assert_eq!(clock("23:59").minutes(), 1439);
    }

    #[test]
    fn test_parse_rejects_malformed() {
        assert!("8:30".parse::<ClockTime>().is_err());
        assert!("24:00".parse::<ClockTime>().is_err());
        assert!("12:60".parse::<ClockTime>().is_err());
        assert!("ab:cd".parse::<ClockTime>().is_err());
        assert!("08-30".parse::<ClockTime>().is_err());
        assert!("".parse::<ClockTime>().is_err());
    }

    #[test]
    fn test_lenient_parse_degrades_to_zero() {
        assert_eq!(time_to_minutes("07:45"), 465);
        assert_eq!(time_to_minutes("garbage"), 0);
        assert_eq!(time_to_minutes(""), 0);
    }

    #[test]
    fn test_minutes_to_time_over_24h() {
        assert_eq!(minutes_to_time(0), "00:00");
        assert_eq!(minutes_to_time(495), "08:15");
        assert_eq!(minutes_to_time(1500), "25:00");
    }

    #[test]
    fn test_duration_crosses_midnight_once() {
        assert_eq!(duration_minutes(clock("08:00"), clock("17:00")), 540);
        assert_eq!(duration_minutes(clock("22:00"), clock("05:00")), 420);
        assert_eq!(duration_minutes(clock("12:00"), clock("12:00")), 0);
    }

    #[test]
    fn test_day_of_week_iso() {
        // 2025-12-01 is a Monday
        let monday = NaiveDate::from_ymd_opt(2025, 12, 1).unwrap();
        assert_eq!(day_of_week_iso(monday), 1);
        let sunday = NaiveDate::from_ymd_opt(2025, 12, 7).unwrap();
        assert_eq!(day_of_week_iso(sunday), 7);
        assert!(is_weekend(sunday));
        assert!(!is_weekend(monday));
    }

    #[test]
    fn test_clock_time_serde_round_trip() {
        let t = clock("13:05");
        let json = serde_json::to_string(&t).unwrap();
        assert_eq!(json, "\"13:05\"");
        let back: ClockTime = serde_json::from_str(&json).unwrap();
        assert_eq!(back, t);
    }
}
