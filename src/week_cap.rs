use crate::capping::{CapAccumulator, dominant_zone_pair};
use crate::error::ConfigurationError;
use crate::fares::DayFareRecord;
use crate::rules::FareRules;
use crate::zones::ZonePair;

/// Applies the weekly cap to one week's day fares, in place and in order.
///
/// Returns the zone pair whose weekly cap was applied.
pub fn apply_weekly_cap(
    rules: &FareRules,
    days: &mut [DayFareRecord],
) -> Result<ZonePair, ConfigurationError> {
    let zone_pair = dominant_zone_pair(
        days.iter().map(|day| day.zone_pair),
        rules.inner_zone,
        rules.default_zone_pair,
    );
    let cap = rules.weekly_cap(zone_pair)?;

    let mut acc = CapAccumulator::new(cap);
    for day in days.iter_mut() {
        let charged = acc.charge(day.fare);
        if charged != day.fare {
            log::debug!("{}: weekly cap {} cuts {} to {}", day.label, cap, day.fare, charged);
        }
        day.fare = charged;
    }

    log::debug!(
        "Week of {} day(s): zone pair {}, weekly cap {}, charged {}",
        days.len(),
        zone_pair,
        cap,
        acc.total
    );
    Ok(zone_pair)
}
