use fare_cap::capping::dominant_zone_pair;
use fare_cap::grouping::group_by_week;
use fare_cap::{FareBreakdown, FareRules, Journey, ZonePair, calculate_fares, parse_journeys};
use pretty_assertions::assert_eq;
use std::path::Path;

const DAILY_CAP: &str = include_str!("data/journeys_daily_cap.json");
const WEEKLY_CAP_ZONE1: &str = include_str!("data/journeys_weekly_cap_zone1.json");
const NEW_YEAR: &str = include_str!("data/journeys_new_year.json");
const PEAK_HOURS: &str = include_str!("data/journeys_peak_hours.json");
const INVALID: &str = include_str!("data/journeys_invalid.json");
const KEYED_FORTNIGHT: &str = include_str!("data/journeys_keyed_fortnight.json");

const ALL_FIXTURES: [&str; 6] = [
    DAILY_CAP,
    WEEKLY_CAP_ZONE1,
    NEW_YEAR,
    PEAK_HOURS,
    INVALID,
    KEYED_FORTNIGHT,
];

fn rules() -> FareRules {
    let path = Path::new(env!("CARGO_MANIFEST_DIR")).join("config/fare_rules.json");
    FareRules::from_path(path).unwrap()
}

fn calculate(json: &str) -> FareBreakdown {
    calculate_fares(&rules(), &parse_journeys(json).unwrap()).unwrap()
}

fn trip_fares(breakdown: &FareBreakdown) -> Vec<u32> {
    breakdown.trip_fares.iter().map(|t| t.fare).collect()
}

fn day_fares(breakdown: &FareBreakdown) -> Vec<u32> {
    breakdown.day_fares.iter().map(|d| d.fare).collect()
}

// =====================================================
// DAILY FARES
// =====================================================

#[test]
fn single_off_peak_trip() {
    let breakdown = calculate(INVALID);
    assert_eq!(breakdown.trip_fares[1].label, "Tue Jul 29 2025 16:50:00");
    assert_eq!(breakdown.trip_fares[1].fare, 30);
    assert_eq!(breakdown.day_fares[1].fare, 30);
}

#[test]
fn daily_cap_reached_cross_zone() {
    let breakdown = calculate(DAILY_CAP);
    assert_eq!(breakdown.trip_fares[3].label, "Mon Jul 28 2025 09:20:00");
    assert_eq!(breakdown.trip_fares[3].fare, 15);
    assert_eq!(breakdown.trip_fares[4].label, "Mon Jul 28 2025 10:00:00");
    assert_eq!(breakdown.trip_fares[4].fare, 0);
    assert_eq!(breakdown.trip_fares[4].zone_pair, ZonePair(1, 2));
}

#[test]
fn daily_cap_reached_inner_zone() {
    let breakdown = calculate(DAILY_CAP);
    assert_eq!(breakdown.trip_fares[8].label, "Tue Jul 29 2025 18:00:00");
    assert_eq!(breakdown.trip_fares[8].fare, 10);
    assert_eq!(breakdown.trip_fares[9].label, "Tue Jul 29 2025 19:00:00");
    assert_eq!(breakdown.trip_fares[9].fare, 0);
}

#[test]
fn daily_cap_reached_outer_zone() {
    let breakdown = calculate(DAILY_CAP);
    assert_eq!(breakdown.trip_fares[15].label, "Thu Jul 31 2025 21:00:00");
    assert_eq!(breakdown.trip_fares[15].fare, 5);
    assert_eq!(breakdown.trip_fares[16].fare, 0);
    assert_eq!(breakdown.trip_fares[16].zone_pair, ZonePair(2, 2));
}

#[test]
fn daily_cap_fixture_in_full() {
    let breakdown = calculate(DAILY_CAP);
    assert_eq!(
        trip_fares(&breakdown),
        vec![35, 35, 35, 15, 0, 30, 30, 30, 10, 0, 30, 25, 25, 25, 25, 5, 0]
    );
    assert_eq!(day_fares(&breakdown), vec![120, 100, 55, 80]);
}

#[test]
fn peak_window_end_is_inclusive() {
    let breakdown = calculate(DAILY_CAP);
    assert_eq!(breakdown.trip_fares[10].label, "Wed Jul 30 2025 10:30:00");
    assert_eq!(breakdown.trip_fares[10].fare, 30);
    assert_eq!(breakdown.trip_fares[11].label, "Wed Jul 30 2025 10:30:01");
    assert_eq!(breakdown.trip_fares[11].fare, 25);
}

#[test]
fn morning_and_evening_peak() {
    let breakdown = calculate(PEAK_HOURS);
    assert_eq!(breakdown.trip_fares[0].label, "Tue Jul 29 2025 10:00:00");
    assert_eq!(breakdown.trip_fares[0].fare, 30);
    assert_eq!(breakdown.trip_fares[1].label, "Wed Jul 30 2025 19:50:00");
    assert_eq!(breakdown.trip_fares[1].fare, 25);
}

#[test]
fn off_peak_after_morning_window() {
    let breakdown = calculate(PEAK_HOURS);
    assert_eq!(breakdown.trip_fares[2].label, "Thu Jul 31 2025 10:33:00");
    assert_eq!(breakdown.trip_fares[2].fare, 20);
    assert_eq!(breakdown.trip_fares[3].label, "Fri Aug 01 2025 10:33:00");
    assert_eq!(breakdown.trip_fares[3].fare, 25);
}

#[test]
fn invalid_date_is_surfaced_in_label() {
    let breakdown = calculate(INVALID);
    assert!(breakdown.trip_fares[0].label.contains("Invalid Date"));
    assert_eq!(breakdown.trip_fares[0].fare, 25);
    assert_eq!(breakdown.day_fares[0].label, "Invalid Date");
}

// =====================================================
// KEYED INPUT
// =====================================================

#[test]
fn keyed_ids_past_nine_keep_encounter_order() {
    let breakdown = calculate(KEYED_FORTNIGHT);
    let labels: Vec<&str> = breakdown
        .day_fares
        .iter()
        .map(|d| d.label.as_str())
        .collect();
    assert_eq!(
        labels,
        vec![
            "Mon Jul 07 2025",
            "Tue Jul 08 2025",
            "Wed Jul 09 2025",
            "Thu Jul 10 2025",
            "Fri Jul 11 2025",
            "Sat Jul 12 2025",
            "Sun Jul 13 2025",
            "Mon Jul 14 2025",
        ]
    );
    assert_eq!(breakdown.trip_fares[9].label, "Fri Jul 11 2025 19:00:00");
    assert_eq!(breakdown.trip_fares[12].label, "Mon Jul 14 2025 12:00:00");
}

#[test]
fn keyed_ids_past_nine_set_the_daily_cap_pair() {
    let breakdown = calculate(KEYED_FORTNIGHT);
    // Id 10 is Friday's last trip, so [1,1] governs the day (cap 100).
    assert_eq!(breakdown.day_fares[4].zone_pair, ZonePair(1, 1));
    assert_eq!(
        trip_fares(&breakdown),
        vec![25, 25, 20, 30, 35, 35, 30, 0, 0, 0, 25, 20, 25]
    );
    assert_eq!(day_fares(&breakdown), vec![25, 25, 20, 30, 100, 25, 20, 25]);
}

// =====================================================
// WEEKLY FARES
// =====================================================

#[test]
fn weekly_cap_reached_zone1() {
    let breakdown = calculate(WEEKLY_CAP_ZONE1);
    assert_eq!(breakdown.day_fares[5].label, "Sat Aug 02 2025");
    assert_eq!(breakdown.day_fares[5].fare, 40);
    assert_eq!(breakdown.day_fares[6].label, "Sun Aug 03 2025");
    assert_eq!(breakdown.day_fares[6].fare, 0);
}

#[test]
fn next_week_starts_a_fresh_cap() {
    let breakdown = calculate(WEEKLY_CAP_ZONE1);
    assert_eq!(breakdown.day_fares[7].label, "Mon Aug 04 2025");
    assert_eq!(breakdown.day_fares[7].fare, 30);
    assert_eq!(day_fares(&breakdown), vec![100, 100, 100, 100, 60, 40, 0, 30]);
}

#[test]
fn weekly_cap_does_not_change_trip_fares() {
    let breakdown = calculate(WEEKLY_CAP_ZONE1);
    // Sunday's trip is still reported at its daily-capped fare.
    let sunday = breakdown
        .trip_fares
        .iter()
        .find(|t| t.label == "Sun Aug 03 2025 12:00:00")
        .unwrap();
    assert_eq!(sunday.fare, 25);
}

#[test]
fn weekly_cap_across_new_year() {
    let breakdown = calculate(NEW_YEAR);
    assert_eq!(breakdown.day_fares[0].label, "Mon Dec 30 2024");
    assert_eq!(breakdown.day_fares[4].label, "Fri Jan 03 2025");
    assert_eq!(breakdown.day_fares[4].fare, 90);
    assert_eq!(breakdown.day_fares[5].label, "Sat Jan 04 2025");
    assert_eq!(breakdown.day_fares[5].fare, 10);
    assert_eq!(breakdown.day_fares[6].label, "Sun Jan 05 2025");
    assert_eq!(breakdown.day_fares[6].fare, 0);
}

#[test]
fn weekend_peak_and_off_peak() {
    let breakdown = calculate(PEAK_HOURS);
    assert_eq!(breakdown.day_fares[4].label, "Sat Aug 02 2025");
    assert_eq!(breakdown.day_fares[4].fare, 35);
    assert_eq!(breakdown.day_fares[5].label, "Sun Aug 03 2025");
    assert_eq!(breakdown.day_fares[5].fare, 25);
}

// =====================================================
// PROPERTIES
// =====================================================

/// Trip fares split by day, relying on trips being emitted day by day.
fn trips_by_day(breakdown: &FareBreakdown) -> Vec<Vec<(u32, ZonePair)>> {
    let mut days: Vec<(String, Vec<(u32, ZonePair)>)> = Vec::new();
    for trip in &breakdown.trip_fares {
        let day = trip.label.rsplit_once(' ').map_or(trip.label.as_str(), |(day, _)| day);
        match days.last_mut() {
            Some((label, fares)) if label == day => fares.push((trip.fare, trip.zone_pair)),
            _ => days.push((day.to_string(), vec![(trip.fare, trip.zone_pair)])),
        }
    }
    days.into_iter().map(|(_, fares)| fares).collect()
}

#[test]
fn trip_fares_never_exceed_daily_cap() {
    let rules = rules();
    for fixture in ALL_FIXTURES {
        let breakdown = calculate(fixture);
        for day in trips_by_day(&breakdown) {
            let cap = rules.daily_cap(day[0].1).unwrap();
            assert!(day.iter().map(|(fare, _)| fare).sum::<u32>() <= cap);
        }
    }
}

#[test]
fn day_fares_never_exceed_weekly_cap() {
    let rules = rules();
    for fixture in ALL_FIXTURES {
        let breakdown = calculate(fixture);
        for (week, days) in group_by_week(breakdown.day_fares).iter() {
            let pair = dominant_zone_pair(
                days.iter().map(|d| d.zone_pair),
                rules.inner_zone,
                rules.default_zone_pair,
            );
            let cap = rules.weekly_cap(pair).unwrap();
            let charged: u32 = days.iter().map(|d| d.fare).sum();
            assert!(charged <= cap, "{week:?}: {charged} > weekly cap {cap}");
        }
    }
}

#[test]
fn fares_after_a_capped_trip_are_zero() {
    let rules = rules();
    for fixture in [DAILY_CAP, WEEKLY_CAP_ZONE1, NEW_YEAR, KEYED_FORTNIGHT] {
        let breakdown = calculate(fixture);
        for day in trips_by_day(&breakdown) {
            let cap = rules.daily_cap(day[0].1).unwrap();
            let mut total = 0;
            let mut reached = false;
            for (fare, _) in day {
                if reached {
                    assert_eq!(fare, 0);
                }
                total += fare;
                reached = total == cap;
            }
        }
    }
}

#[test]
fn repeated_calculation_gives_identical_output() {
    let rules = rules();
    let journeys: Vec<Journey> = parse_journeys(WEEKLY_CAP_ZONE1).unwrap();
    let first = calculate_fares(&rules, &journeys).unwrap();
    let second = calculate_fares(&rules, &journeys).unwrap();
    assert_eq!(first, second);
}

#[test]
fn empty_journey_list() {
    let breakdown = calculate("[]");
    assert!(breakdown.trip_fares.is_empty());
    assert!(breakdown.day_fares.is_empty());
}

#[test]
fn unknown_zone_is_a_configuration_error() {
    let json = r#"[{"dateTime": "2025-07-29T08:00:00", "from": 1, "to": 3}]"#;
    let journeys = parse_journeys(json).unwrap();
    let err = calculate_fares(&rules(), &journeys).unwrap_err();
    assert_eq!(err.to_string(), "no daily cap entry for zone pair [1, 3]");
}

#[test]
fn breakdown_serializes_with_camel_case_keys() {
    let breakdown = calculate(INVALID);
    let json = serde_json::to_value(&breakdown).unwrap();
    assert_eq!(json["tripFares"][1]["label"], "Tue Jul 29 2025 16:50:00");
    assert_eq!(json["tripFares"][1]["zonePair"], serde_json::json!([1, 2]));
    assert_eq!(json["dayFares"][1]["fare"], 30);
    assert!(json["dayFares"][1].get("date").is_none());
}
