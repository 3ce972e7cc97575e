//! Retrograde intervals from sampled speed.
//!
//! Mercury here follows `λ(t) = 0.2·t + 10·sin(2π·t/100)` (days from J2000),
//! retrograde while `cos(2π·t/100) < −0.2 / (0.2π)`, i.e. for
//! t ∈ (30.155, 69.845) and every 100 days after.

use std::f64::consts::TAU;

use horo_core::{Body, BodyMotion, SyntheticEphemeris};
use horo_search::{
    IntervalBound, SearchError, StationConfig, find_retrograde_intervals,
    retrograde_intervals_from_flags,
};
use horo_time::CalendarDate;
use proptest::prelude::*;

const EPOCH: f64 = SyntheticEphemeris::EPOCH_JD;

fn provider() -> SyntheticEphemeris {
    SyntheticEphemeris::new()
        .with_body(Body::Sun, BodyMotion::linear(280.0, 0.9856))
        .with_body(
            Body::Mercury,
            BodyMotion::epicyclic(0.0, 0.2, 10.0, 100.0, 0.0),
        )
}

/// Analytic stations (days from epoch) inside the first cycle.
fn stations() -> (f64, f64) {
    let x = (-0.2 / (10.0 * TAU / 100.0)).acos();
    (x * 100.0 / TAU, (TAU - x) * 100.0 / TAU)
}

fn date(y: i32, m: u32, d: u32) -> CalendarDate {
    CalendarDate::gregorian(y, m, d).expect("valid date")
}

#[test]
fn refined_stations_match_analytic_values() {
    let iv = find_retrograde_intervals(
        &provider(),
        Body::Mercury,
        date(2000, 1, 1),
        date(2000, 12, 31),
        &StationConfig::default(),
    )
    .expect("search runs");

    // four loops; the last is still retrograde on Dec 31 (t = 365)
    assert_eq!(iv.len(), 4, "{iv:?}");
    let (s1, s2) = stations();
    for (cycle, interval) in iv.iter().take(3).enumerate() {
        let offset = 100.0 * cycle as f64;
        let IntervalBound::Closed(from) = interval.from else {
            panic!("closed start expected: {interval:?}");
        };
        let IntervalBound::Closed(to) = interval.to else {
            panic!("closed end expected: {interval:?}");
        };
        assert!((from - (EPOCH + offset + s1)).abs() < 1e-4, "cycle {cycle}");
        assert!((to - (EPOCH + offset + s2)).abs() < 1e-4, "cycle {cycle}");
        assert!((interval.duration_days() - (s2 - s1)).abs() < 2e-4);
    }

    let last = iv[3];
    assert!((last.from.jd() - (EPOCH + 300.0 + s1)).abs() < 1e-4);
    assert_eq!(last.to, IntervalBound::Open(EPOCH + 365.0));
}

#[test]
fn unrefined_bounds_are_sample_instants() {
    let config = StationConfig {
        refine_stations: false,
        ..StationConfig::default()
    };
    let iv = find_retrograde_intervals(
        &provider(),
        Body::Mercury,
        date(2000, 1, 1),
        date(2000, 3, 31),
        &config,
    )
    .expect("search runs");
    assert_eq!(iv.len(), 1);
    assert_eq!(iv[0].from, IntervalBound::Closed(EPOCH + 31.0));
    assert_eq!(iv[0].to, IntervalBound::Closed(EPOCH + 69.0));
}

#[test]
fn range_starting_inside_a_loop_is_open() {
    // Feb 10 is t = 40
    let iv = find_retrograde_intervals(
        &provider(),
        Body::Mercury,
        date(2000, 2, 10),
        date(2000, 3, 31),
        &StationConfig::default(),
    )
    .expect("search runs");
    assert_eq!(iv.len(), 1);
    assert_eq!(iv[0].from, IntervalBound::Open(EPOCH + 40.0));
    assert!(!iv[0].to.is_open());
}

#[test]
fn luminaries_have_no_intervals() {
    let iv = find_retrograde_intervals(
        &provider(),
        Body::Sun,
        date(2000, 1, 1),
        date(2000, 12, 31),
        &StationConfig::default(),
    )
    .expect("search runs");
    assert!(iv.is_empty());
}

#[test]
fn reversed_dates_rejected() {
    let err = find_retrograde_intervals(
        &provider(),
        Body::Mercury,
        date(2000, 3, 1),
        date(2000, 1, 1),
        &StationConfig::default(),
    )
    .expect_err("reversed");
    assert!(matches!(err, SearchError::InvalidConfig(_)));
}

#[test]
fn oversampled_range_rejected_before_sampling() {
    // a year at 1e-6 day would be ~3.7e8 samples
    let config = StationConfig {
        step_days: 1e-6,
        ..StationConfig::default()
    };
    let err = find_retrograde_intervals(
        &provider(),
        Body::Mercury,
        date(2000, 1, 1),
        date(2000, 12, 31),
        &config,
    )
    .expect_err("too many samples");
    assert!(matches!(err, SearchError::InvalidConfig(_)));

    let config = StationConfig {
        max_samples: 31,
        ..StationConfig::default()
    };
    // 31 daily samples fit; 32 do not
    let search = |end: CalendarDate| {
        find_retrograde_intervals(&provider(), Body::Mercury, date(2000, 1, 1), end, &config)
    };
    assert!(search(date(2000, 1, 31)).is_ok());
    assert!(matches!(
        search(date(2000, 2, 1)),
        Err(SearchError::InvalidConfig(_))
    ));
}

#[test]
fn unserved_body_is_an_error() {
    let err = find_retrograde_intervals(
        &provider(),
        Body::Saturn,
        date(2000, 1, 1),
        date(2000, 1, 31),
        &StationConfig::default(),
    )
    .expect_err("no Saturn in provider");
    assert!(matches!(err, SearchError::Ephemeris(_)));
}

proptest! {
    #[test]
    fn intervals_cover_exactly_the_true_flags(
        flags in prop::collection::vec(any::<bool>(), 0..64),
    ) {
        let jds: Vec<f64> = (0..flags.len()).map(|i| i as f64).collect();
        let iv = retrograde_intervals_from_flags(Body::Mars, &flags, &jds);

        let runs = flags
            .iter()
            .enumerate()
            .filter(|&(i, &f)| f && (i == 0 || !flags[i - 1]))
            .count();
        prop_assert_eq!(iv.len(), runs);

        let covered: f64 = iv.iter().map(|r| r.duration_days() + 1.0).sum();
        let trues = flags.iter().filter(|&&f| f).count();
        prop_assert_eq!(covered as usize, trues);

        let last = flags.len().saturating_sub(1) as f64;
        for r in &iv {
            prop_assert!(r.from.jd() <= r.to.jd());
            prop_assert_eq!(r.from.is_open(), r.from.jd() == 0.0);
            prop_assert_eq!(r.to.is_open(), r.to.jd() == last);
        }
        for pair in iv.windows(2) {
            // runs are maximal: at least one direct step between them
            prop_assert!(pair[1].from.jd() - pair[0].to.jd() >= 2.0);
        }
    }
}
