use crate::error::ConfigurationError;
use crate::fares::FareBreakdown;
use crate::grouping::{group_by_day, group_by_week};
use crate::journey::Journey;
use crate::rules::FareRules;
use crate::trip_fares::fares_for_day;
use crate::week_cap::apply_weekly_cap;

/// Computes per-trip fares (daily cap applied) and per-day fares (daily then
/// weekly cap applied) for one rider's journeys.
///
/// Days and weeks come out in the order they are first seen in `journeys`,
/// not sorted. All running totals live inside this call, so concurrent calls
/// sharing one `FareRules` do not interfere.
pub fn calculate_fares(
    rules: &FareRules,
    journeys: &[Journey],
) -> Result<FareBreakdown, ConfigurationError> {
    let by_day = group_by_day(journeys);

    let mut trip_fares = Vec::with_capacity(journeys.len());
    let mut day_fares = Vec::with_capacity(by_day.len());
    for (day, day_journeys) in by_day.iter() {
        let fares = fares_for_day(rules, *day, day_journeys)?;
        trip_fares.extend(fares.trips);
        day_fares.push(fares.day);
    }

    let mut by_week = group_by_week(day_fares);
    for (_, week) in by_week.iter_mut() {
        apply_weekly_cap(rules, week)?;
    }
    let week_count = by_week.len();
    let day_fares: Vec<_> = by_week.into_iter().flat_map(|(_, days)| days).collect();

    let breakdown = FareBreakdown {
        trip_fares,
        day_fares,
    };
    log::info!(
        "Calculated {} trip fare(s) over {} day(s) in {} week(s), total {}",
        breakdown.trip_fares.len(),
        breakdown.day_fares.len(),
        week_count,
        breakdown.total_fare()
    );
    Ok(breakdown)
}
