use crate::capping::{CapAccumulator, dominant_zone_pair};
use crate::error::ConfigurationError;
use crate::fares::{DayFareRecord, TripFareRecord};
use crate::grouping::DayKey;
use crate::journey::Journey;
use crate::rules::FareRules;

/// Trip fares and the day total for one calendar day.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DayFares {
    pub trips: Vec<TripFareRecord>,
    pub day: DayFareRecord,
}

/// Prices one day's journeys (in the order given) under the daily cap.
pub fn fares_for_day(
    rules: &FareRules,
    day: DayKey,
    journeys: &[&Journey],
) -> Result<DayFares, ConfigurationError> {
    let zone_pair = dominant_zone_pair(
        journeys.iter().map(|j| j.zone_pair()),
        rules.inner_zone,
        rules.default_zone_pair,
    );
    let cap = rules.daily_cap(zone_pair)?;

    let raw_fares = journeys
        .iter()
        .map(|j| rules.raw_fare(j))
        .collect::<Result<Vec<u32>, _>>()?;

    let mut acc = CapAccumulator::new(cap);
    let trips: Vec<TripFareRecord> = journeys
        .iter()
        .zip(&raw_fares)
        .map(|(journey, &raw)| TripFareRecord {
            label: journey.timestamp.trip_label(),
            fare: acc.charge(raw),
            zone_pair,
        })
        .collect();

    let day_fare = capped_day_total(cap, &raw_fares);
    if acc.total != day_fare {
        // A trip landed exactly on the cap and nothing later crossed it.
        log::debug!(
            "{}: trip fares sum to {} but day total is {} (cap {})",
            day.label(),
            acc.total,
            day_fare,
            cap
        );
    }
    log::debug!(
        "{}: {} trips, zone pair {}, daily cap {}, day fare {}",
        day.label(),
        trips.len(),
        zone_pair,
        cap,
        day_fare
    );

    Ok(DayFares {
        trips,
        day: DayFareRecord {
            label: day.label(),
            fare: day_fare,
            zone_pair,
            date: day.0,
        },
    })
}

/// Day total from its own pass over the raw fares: the running sum, never
/// allowed past `cap`.
pub fn capped_day_total(cap: u32, raw_fares: &[u32]) -> u32 {
    raw_fares
        .iter()
        .fold(0u32, |total, &fare| cap.min(total.saturating_add(fare)))
}
