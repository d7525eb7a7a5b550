use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

use crate::error::ConfigurationError;

// --- Zone Pair ---

/// An (origin, destination) zone pair. Serializes as `[from, to]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ZonePair(pub i32, pub i32);

impl ZonePair {
    pub fn from_zone(&self) -> i32 {
        self.0
    }

    pub fn to_zone(&self) -> i32 {
        self.1
    }

    pub fn is_cross_zone(&self) -> bool {
        self.0 != self.1
    }
}

impl fmt::Display for ZonePair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {}]", self.0, self.1)
    }
}

// --- Zone Tables ---

/// Which of the four rule tables a lookup went to. Used in error messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FareTable {
    PeakFare,
    OffPeakFare,
    DailyCap,
    WeeklyCap,
}

impl fmt::Display for FareTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            FareTable::PeakFare => "peak fare",
            FareTable::OffPeakFare => "off-peak fare",
            FareTable::DailyCap => "daily cap",
            FareTable::WeeklyCap => "weekly cap",
        };
        f.write_str(name)
    }
}

/// Two-level `from -> to -> amount` mapping.
///
/// In JSON the zone numbers are object keys: `{ "1": { "1": 30, "2": 35 } }`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ZoneTable(BTreeMap<i32, BTreeMap<i32, u32>>);

impl ZoneTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, pair: ZonePair, amount: u32) {
        self.0.entry(pair.0).or_default().insert(pair.1, amount);
    }

    pub fn lookup(&self, table: FareTable, pair: ZonePair) -> Result<u32, ConfigurationError> {
        for zone in [pair.0, pair.1] {
            if zone <= 0 {
                return Err(ConfigurationError::InvalidZone(zone));
            }
        }
        self.0
            .get(&pair.0)
            .and_then(|row| row.get(&pair.1))
            .copied()
            .ok_or(ConfigurationError::MissingEntry {
                table,
                from: pair.0,
                to: pair.1,
            })
    }

    /// Every zone number mentioned as an origin or destination.
    pub fn zones(&self) -> impl Iterator<Item = i32> + '_ {
        self.0
            .iter()
            .flat_map(|(from, row)| std::iter::once(*from).chain(row.keys().copied()))
    }
}
