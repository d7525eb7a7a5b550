use chrono::{DateTime, NaiveDate, NaiveDateTime};
use serde::Deserialize;
use serde_json::Value;

use crate::zones::ZonePair;

pub const INVALID_DATE: &str = "Invalid Date";

const DATE_TIME_FORMATS: [&str; 4] = [
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M",
];

// --- Timestamp ---

/// A journey's date and time. Unparseable input is kept as `Invalid`
/// (with the raw text) rather than rejected.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Timestamp {
    Valid(NaiveDateTime),
    Invalid(String),
}

impl Timestamp {
    /// RFC 3339 with an offset keeps the wall-clock time in that offset.
    /// Naive date-times and bare dates (midnight) are also accepted.
    pub fn parse(raw: &str) -> Self {
        let trimmed = raw.trim();

        if let Ok(dt) = DateTime::parse_from_rfc3339(trimmed) {
            return Timestamp::Valid(dt.naive_local());
        }
        if let Some(dt) = DATE_TIME_FORMATS
            .iter()
            .find_map(|fmt| NaiveDateTime::parse_from_str(trimmed, fmt).ok())
        {
            return Timestamp::Valid(dt);
        }
        if let Some(dt) = NaiveDate::parse_from_str(trimmed, "%Y-%m-%d")
            .ok()
            .and_then(|d| d.and_hms_opt(0, 0, 0))
        {
            return Timestamp::Valid(dt);
        }

        Timestamp::Invalid(raw.to_string())
    }

    pub fn date(&self) -> Option<NaiveDate> {
        match self {
            Timestamp::Valid(dt) => Some(dt.date()),
            Timestamp::Invalid(_) => None,
        }
    }

    pub fn is_valid(&self) -> bool {
        matches!(self, Timestamp::Valid(_))
    }

    /// `Tue Jul 29 2025 16:50:00`
    pub fn trip_label(&self) -> String {
        match self {
            Timestamp::Valid(dt) => dt.format("%a %b %d %Y %H:%M:%S").to_string(),
            Timestamp::Invalid(_) => INVALID_DATE.to_string(),
        }
    }
}

impl From<NaiveDateTime> for Timestamp {
    fn from(dt: NaiveDateTime) -> Self {
        Timestamp::Valid(dt)
    }
}

/// `Tue Jul 29 2025`, or "Invalid Date" when there is no date.
pub fn day_label(date: Option<NaiveDate>) -> String {
    match date {
        Some(d) => d.format("%a %b %d %Y").to_string(),
        None => INVALID_DATE.to_string(),
    }
}

// --- Journey ---

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Journey {
    pub timestamp: Timestamp,
    pub origin_zone: i32,
    pub destination_zone: i32,
}

impl Journey {
    pub fn new(timestamp: impl Into<Timestamp>, origin_zone: i32, destination_zone: i32) -> Self {
        Journey {
            timestamp: timestamp.into(),
            origin_zone,
            destination_zone,
        }
    }

    pub fn zone_pair(&self) -> ZonePair {
        ZonePair(self.origin_zone, self.destination_zone)
    }
}

// --- Input Records ---

/// One journey entry as it appears in an input file.
#[derive(Debug, Clone, Deserialize)]
pub struct JourneyRecord {
    #[serde(rename = "dateTime", alias = "date_time", alias = "timestamp")]
    pub date_time: String,
    pub from: i32,
    pub to: i32,
}

impl From<JourneyRecord> for Journey {
    fn from(record: JourneyRecord) -> Self {
        let timestamp = Timestamp::parse(&record.date_time);
        if !timestamp.is_valid() {
            log::warn!(
                "Unparseable journey timestamp {:?}, keeping it as invalid",
                record.date_time
            );
        }
        Journey {
            timestamp,
            origin_zone: record.from,
            destination_zone: record.to,
        }
    }
}

/// Parses a journey list given either as a JSON array or as an object whose
/// values are journeys.
///
/// Object values are taken with integer-like keys first in ascending numeric
/// order, then the remaining keys in document order, so ids "1".."12" come
/// out as 1, 2, ..., 10, 11, 12.
pub fn parse_journeys(json: &str) -> Result<Vec<Journey>, serde_json::Error> {
    let values = match serde_json::from_str::<Value>(json)? {
        Value::Array(values) => values,
        Value::Object(entries) => {
            let mut entries: Vec<(String, Value)> = entries.into_iter().collect();
            entries.sort_by_key(|(key, _)| key_rank(key));
            entries.into_iter().map(|(_, value)| value).collect()
        }
        other => {
            return Err(serde::de::Error::custom(format!(
                "expected an array or object of journeys, found {other}"
            )));
        }
    };
    values
        .into_iter()
        .map(|value| serde_json::from_value::<JourneyRecord>(value).map(Journey::from))
        .collect()
}

// Keys that are canonical non-negative integers sort ahead of all others.
fn key_rank(key: &str) -> (bool, u32) {
    match key.parse::<u32>() {
        Ok(index) if index != u32::MAX && index.to_string() == key => (false, index),
        _ => (true, 0),
    }
}
