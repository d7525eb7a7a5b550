use std::path::PathBuf;

use thiserror::Error;

use crate::zones::FareTable;

/// Failures caused by missing or malformed fare rules.
///
/// Every lookup into the rule tables goes through this type, so a journey
/// between zones the rules do not describe fails the whole calculation
/// instead of being priced with a made-up default.
#[derive(Debug, Error)]
pub enum ConfigurationError {
    #[error("no {table} entry for zone pair [{from}, {to}]")]
    MissingEntry { table: FareTable, from: i32, to: i32 },

    #[error("invalid zone number {0}: zones must be positive")]
    InvalidZone(i32),

    #[error("invalid {day_class} {period} peak window: start {start} is after end {end}")]
    InvalidPeakWindow {
        day_class: &'static str,
        period: &'static str,
        start: String,
        end: String,
    },

    #[error("invalid clock time {0:?}: expected HH:MM:SS")]
    InvalidClockTime(String),

    #[error("failed to read fare rules from {}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse fare rules: {0}")]
    Json(#[from] serde_json::Error),
}
