use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::error::ConfigurationError;
use crate::journey::Journey;
use crate::peak::PeakHours;
use crate::zones::{FareTable, ZonePair, ZoneTable};

fn default_zone_pair() -> ZonePair {
    ZonePair(2, 2)
}

fn default_inner_zone() -> i32 {
    1
}

/// Fare and cap configuration.
///
/// Loaded once and then only read, so one instance can be shared by any
/// number of concurrent calculations.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FareRules {
    pub peak_fares: ZoneTable,
    pub off_peak_fares: ZoneTable,
    pub daily_caps: ZoneTable,
    pub weekly_caps: ZoneTable,
    pub peak_hours: PeakHours,

    /// Cap pair used for a day or week made only of same-zone travel
    /// outside the inner zone.
    #[serde(default = "default_zone_pair")]
    pub default_zone_pair: ZonePair,

    /// Same-zone travel inside this zone overrides earlier entries when
    /// picking the dominant zone pair.
    #[serde(default = "default_inner_zone")]
    pub inner_zone: i32,
}

impl FareRules {
    pub fn from_json_str(json: &str) -> Result<Self, ConfigurationError> {
        let rules: FareRules = serde_json::from_str(json)?;
        rules.validate()?;
        Ok(rules)
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ConfigurationError> {
        let path = path.as_ref();
        let json = fs::read_to_string(path).map_err(|source| ConfigurationError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let rules = Self::from_json_str(&json)?;
        log::info!("Loaded fare rules from {}", path.display());
        Ok(rules)
    }

    pub fn validate(&self) -> Result<(), ConfigurationError> {
        let tables = [
            &self.peak_fares,
            &self.off_peak_fares,
            &self.daily_caps,
            &self.weekly_caps,
        ];
        let listed = tables.iter().flat_map(|table| table.zones());
        let configured = [
            self.default_zone_pair.0,
            self.default_zone_pair.1,
            self.inner_zone,
        ];
        if let Some(zone) = listed.chain(configured).find(|zone| *zone <= 0) {
            return Err(ConfigurationError::InvalidZone(zone));
        }
        self.peak_hours.validate()
    }

    pub fn peak_fare(&self, pair: ZonePair) -> Result<u32, ConfigurationError> {
        self.peak_fares.lookup(FareTable::PeakFare, pair)
    }

    pub fn off_peak_fare(&self, pair: ZonePair) -> Result<u32, ConfigurationError> {
        self.off_peak_fares.lookup(FareTable::OffPeakFare, pair)
    }

    pub fn daily_cap(&self, pair: ZonePair) -> Result<u32, ConfigurationError> {
        self.daily_caps.lookup(FareTable::DailyCap, pair)
    }

    pub fn weekly_cap(&self, pair: ZonePair) -> Result<u32, ConfigurationError> {
        self.weekly_caps.lookup(FareTable::WeeklyCap, pair)
    }

    /// Uncapped fare for a single journey.
    pub fn raw_fare(&self, journey: &Journey) -> Result<u32, ConfigurationError> {
        let pair = journey.zone_pair();
        if self.peak_hours.is_peak(&journey.timestamp) {
            self.peak_fare(pair)
        } else {
            self.off_peak_fare(pair)
        }
    }
}
