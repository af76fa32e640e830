//! Timed subtitle entries

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::RtagsError;

/// A subtitle timestamp with millisecond precision.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Timestamp(u64);

impl Timestamp {
    pub const fn from_millis(ms: u64) -> Self {
        Self(ms)
    }

    /// Build from clock fields; `None` when the total overflows.
    pub fn from_parts(hours: u64, minutes: u64, seconds: u64, millis: u64) -> Option<Self> {
        hours
            .checked_mul(3_600_000)?
            .checked_add(minutes.checked_mul(60_000)?)?
            .checked_add(seconds.checked_mul(1_000)?)?
            .checked_add(millis)
            .map(Self)
    }

    pub const fn as_millis(self) -> u64 {
        self.0
    }
}

/// SRT format: `HH:MM:SS,mmm`.
impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let ms = self.0;
        write!(
            f,
            "{:02}:{:02}:{:02},{:03}",
            ms / 3_600_000,
            (ms % 3_600_000) / 60_000,
            (ms % 60_000) / 1_000,
            ms % 1_000
        )
    }
}

/// Accepts `H:MM:SS,mmm` with either `,` or `.` before the milliseconds.
impl FromStr for Timestamp {
    type Err = RtagsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || RtagsError::InvalidInput(format!("invalid timestamp '{s}'"));

        let (clock, millis) = s.trim().split_once([',', '.']).ok_or_else(invalid)?;
        let mut fields = clock.split(':');
        let (Some(h), Some(m), Some(sec), None) =
            (fields.next(), fields.next(), fields.next(), fields.next())
        else {
            return Err(invalid());
        };

        let parse = |v: &str| v.parse::<u64>().map_err(|_| invalid());
        let (hours, minutes, seconds, millis) = (parse(h)?, parse(m)?, parse(sec)?, parse(millis)?);
        if minutes >= 60 || seconds >= 60 || millis >= 1000 {
            return Err(invalid());
        }
        Self::from_parts(hours, minutes, seconds, millis).ok_or_else(invalid)
    }
}

/// One timed caption unit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubtitleEntry {
    /// 1-based position in the file.
    pub index: usize,
    pub start: Timestamp,
    pub end: Timestamp,
    pub content: String,
}

impl SubtitleEntry {
    pub fn new(index: usize, start: Timestamp, end: Timestamp, content: impl Into<String>) -> Self {
        Self {
            index,
            start,
            end,
            content: content.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn formats_srt_timestamp() {
        assert_eq!(Timestamp::from_millis(0).to_string(), "00:00:00,000");
        assert_eq!(Timestamp::from_millis(65_123).to_string(), "00:01:05,123");
        assert_eq!(Timestamp::from_parts(1, 1, 1, 500).unwrap().to_string(), "01:01:01,500");
    }

    #[test]
    fn parses_comma_and_dot_separators() {
        let a: Timestamp = "00:01:05,123".parse().unwrap();
        let b: Timestamp = "00:01:05.123".parse().unwrap();
        assert_eq!(a, b);
        assert_eq!(a.as_millis(), 65_123);
    }

    #[test]
    fn parses_long_hours() {
        let t: Timestamp = "100:00:00,000".parse().unwrap();
        assert_eq!(t.as_millis(), 360_000_000);
    }

    #[test]
    fn overflowing_hours_are_rejected() {
        assert_eq!(Timestamp::from_parts(u64::MAX / 1_000, 0, 0, 0), None);
        let err = "9999999999999:00:00,000".parse::<Timestamp>().unwrap_err();
        assert_eq!(err.status_code(), 400);
        assert!(err.to_string().contains("invalid timestamp"));
    }

    #[test]
    fn largest_representable_hours_parse() {
        let hours = u64::MAX / 3_600_000;
        let t: Timestamp = format!("{hours}:00:00,000").parse().unwrap();
        assert_eq!(t.as_millis(), hours * 3_600_000);
    }

    #[test]
    fn rejects_malformed_timestamps() {
        for bad in ["", "00:00:00", "00:61:00,000", "00:00,000", "aa:bb:cc,ddd", "0:0:0:0,0"] {
            assert!(bad.parse::<Timestamp>().is_err(), "accepted {bad:?}");
        }
    }
}
