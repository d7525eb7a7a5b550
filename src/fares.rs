use chrono::NaiveDate;
use serde::Serialize;

use crate::zones::ZonePair;

/// Fare charged for one journey after the daily cap.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TripFareRecord {
    pub label: String,
    pub fare: u32,
    /// The day's dominant zone pair, shared by every trip of that day.
    pub zone_pair: ZonePair,
}

/// Fare charged for one day after the daily and then the weekly cap.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DayFareRecord {
    pub label: String,
    pub fare: u32,
    pub zone_pair: ZonePair,
    /// Calendar date the record was grouped on; `None` for the invalid-date group.
    #[serde(skip)]
    pub date: Option<NaiveDate>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FareBreakdown {
    pub trip_fares: Vec<TripFareRecord>,
    pub day_fares: Vec<DayFareRecord>,
}

impl FareBreakdown {
    pub fn is_empty(&self) -> bool {
        self.trip_fares.is_empty() && self.day_fares.is_empty()
    }

    /// What the rider pays overall, after both caps.
    pub fn total_fare(&self) -> u64 {
        self.day_fares.iter().map(|day| u64::from(day.fare)).sum()
    }
}
