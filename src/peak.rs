use chrono::{Datelike, NaiveDateTime, NaiveTime, Timelike, Weekday};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::ConfigurationError;
use crate::journey::Timestamp;

const CLOCK_FORMATS: [&str; 2] = ["%H:%M:%S", "%H:%M"];

// --- Clock Time ---

/// A time of day with no date, stored as milliseconds since midnight.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ClockTime(u32);

impl ClockTime {
    pub fn parse(raw: &str) -> Result<Self, ConfigurationError> {
        let raw = raw.trim();
        CLOCK_FORMATS
            .iter()
            .find_map(|fmt| NaiveTime::parse_from_str(raw, fmt).ok())
            .map(Self::from_time)
            .ok_or_else(|| ConfigurationError::InvalidClockTime(raw.to_string()))
    }

    /// Sub-second precision is dropped so window bounds and journey times
    /// land on the same scale.
    pub fn from_time(time: NaiveTime) -> Self {
        ClockTime(time.num_seconds_from_midnight() * 1_000)
    }

    pub fn millis(&self) -> u32 {
        self.0
    }
}

impl TryFrom<String> for ClockTime {
    type Error = ConfigurationError;

    fn try_from(raw: String) -> Result<Self, Self::Error> {
        ClockTime::parse(&raw)
    }
}

impl From<ClockTime> for String {
    fn from(time: ClockTime) -> Self {
        time.to_string()
    }
}

impl fmt::Display for ClockTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let secs = self.0 / 1_000;
        write!(f, "{:02}:{:02}:{:02}", secs / 3_600, secs / 60 % 60, secs % 60)
    }
}

// --- Peak Windows ---

/// Inclusive on both ends.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PeakWindow {
    pub start: ClockTime,
    pub end: ClockTime,
}

impl PeakWindow {
    pub fn contains(&self, time: ClockTime) -> bool {
        self.start <= time && time <= self.end
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PeakSchedule {
    pub morning: PeakWindow,
    pub evening: PeakWindow,
}

impl PeakSchedule {
    pub fn contains(&self, time: ClockTime) -> bool {
        self.morning.contains(time) || self.evening.contains(time)
    }
}

/// Peak schedules for business days and for the weekend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PeakHours {
    pub weekday: PeakSchedule,
    pub weekend: PeakSchedule,
}

impl PeakHours {
    /// Whether peak pricing applies at `timestamp`.
    ///
    /// An invalid timestamp has no day or time of day; it is treated as
    /// off-peak.
    pub fn is_peak(&self, timestamp: &Timestamp) -> bool {
        match timestamp {
            Timestamp::Valid(at) => self.is_peak_at(*at),
            Timestamp::Invalid(_) => false,
        }
    }

    pub fn is_peak_at(&self, at: NaiveDateTime) -> bool {
        let schedule = if is_weekend(at) { &self.weekend } else { &self.weekday };
        schedule.contains(ClockTime::from_time(at.time()))
    }

    pub(crate) fn validate(&self) -> Result<(), ConfigurationError> {
        let windows = [
            ("weekday", "morning", &self.weekday.morning),
            ("weekday", "evening", &self.weekday.evening),
            ("weekend", "morning", &self.weekend.morning),
            ("weekend", "evening", &self.weekend.evening),
        ];
        for (day_class, period, window) in windows {
            if window.start > window.end {
                return Err(ConfigurationError::InvalidPeakWindow {
                    day_class,
                    period,
                    start: window.start.to_string(),
                    end: window.end.to_string(),
                });
            }
        }
        Ok(())
    }
}

fn is_weekend(at: NaiveDateTime) -> bool {
    matches!(at.weekday(), Weekday::Sat | Weekday::Sun)
}
