//! Transit fare calculation with time-of-day pricing and daily/weekly caps.
//!
//! [`calculate_fares`] takes one rider's journeys and a set of [`FareRules`]
//! and returns the capped per-trip and per-day fares.

pub mod calculator;
pub mod capping;
pub mod error;
pub mod fares;
pub mod grouping;
pub mod journey;
pub mod peak;
pub mod rules;
pub mod trip_fares;
pub mod week_cap;
pub mod zones;

pub use calculator::calculate_fares;
pub use error::ConfigurationError;
pub use fares::{DayFareRecord, FareBreakdown, TripFareRecord};
pub use journey::{Journey, JourneyRecord, Timestamp, parse_journeys};
pub use rules::FareRules;
pub use zones::{ZonePair, ZoneTable};
