//! Exact-aspect refinement against closed-form motion.
//!
//! The looping body is `λ(t) = 0.2·t + 10·sin(2π·t/100)`, days from J2000.
//! It stations near t = 30.16 (λ ≈ 15.51) and t = 69.85 (λ ≈ 4.49), and
//! passes 10° three times in the first 100 days: near 13.18, at exactly 50,
//! and near 86.82. The outer two are symmetric about 50.

use horo_core::{Body, BodyMotion, SyntheticEphemeris};
use horo_math::AspectKind;
use horo_search::{
    ExactSearchConfig, RefineConfig, exact_aspect_roots, next_exact_aspect, prev_exact_aspect,
    refine_exact_aspect,
};

const EPOCH: f64 = SyntheticEphemeris::EPOCH_JD;

fn looping() -> SyntheticEphemeris {
    SyntheticEphemeris::new().with_body(
        Body::Mercury,
        BodyMotion::epicyclic(0.0, 0.2, 10.0, 100.0, 0.0),
    )
}

#[test]
fn linear_sextile_converges_to_analytic_instant() {
    // Mars 0° + 0.5°/day; sextile to 47.3° when λ = 107.3 (t = 214.6)
    let eph = SyntheticEphemeris::new().with_body(Body::Mars, BodyMotion::linear(0.0, 0.5));
    let hit = refine_exact_aspect(
        &eph,
        Body::Mars,
        47.3,
        AspectKind::Sextile,
        EPOCH + 200.0,
        EPOCH + 230.0,
        &RefineConfig::default(),
    )
    .expect("search runs")
    .expect("crossing inside bracket");

    assert!((hit.jd_ut - (EPOCH + 214.6)).abs() < 1e-5, "jd = {}", hit.jd_ut);
    assert!((hit.longitude_deg - 107.3).abs() < 1e-4);
    assert_eq!(hit.body, Body::Mars);
    assert_eq!(hit.aspect, AspectKind::Sextile);
}

#[test]
fn lower_sextile_branch_is_found_too() {
    // λ = 47.3 − 60 = −12.7 ≡ 347.3 at t = 694.6
    let eph = SyntheticEphemeris::new().with_body(Body::Mars, BodyMotion::linear(0.0, 0.5));
    let roots = exact_aspect_roots(
        &eph,
        Body::Mars,
        47.3,
        AspectKind::Sextile,
        EPOCH + 100.0,
        EPOCH + 800.0,
        &RefineConfig::default(),
    )
    .expect("search runs");
    assert_eq!(roots.len(), 2, "{roots:?}");
    assert!((roots[0] - (EPOCH + 214.6)).abs() < 1e-5);
    assert!((roots[1] - (EPOCH + 694.6)).abs() < 1e-5);
}

#[test]
fn retrograde_loop_in_one_bracket_yields_every_crossing() {
    // One 100-day piece whose endpoints alone show a single sign change.
    let config = RefineConfig {
        max_piece_days: 100.0,
        ..RefineConfig::default()
    };
    let roots = exact_aspect_roots(
        &looping(),
        Body::Mercury,
        10.0,
        AspectKind::Conjunction,
        EPOCH,
        EPOCH + 100.0,
        &config,
    )
    .expect("search runs");

    assert_eq!(roots.len(), 3, "{roots:?}");
    assert!((roots[0] - (EPOCH + 13.176)).abs() < 1e-2);
    assert!((roots[1] - (EPOCH + 50.0)).abs() < 1e-6);
    assert!((roots[2] - (EPOCH + 86.825)).abs() < 1e-2);
    let symmetry = (roots[0] - EPOCH) + (roots[2] - EPOCH) - 100.0;
    assert!(symmetry.abs() < 1e-5, "asymmetric roots: {roots:?}");
}

#[test]
fn short_loop_between_speed_samples_is_rebracketed() {
    // λ(t) = t + A·sin(4π·t) with 4π·A = 1.5: speed 1 + 1.5·cos(4π·t) is
    // positive at t = 0, 0.5 and 1 but negative around 0.25 and 0.75, so a
    // one-day piece looks direct from its ends and midpoint alone. The loop
    // around t = 0.25 crosses 0.24° three times.
    let eph = SyntheticEphemeris::new().with_body(
        Body::Mercury,
        BodyMotion::epicyclic(0.0, 1.0, 1.5 / (4.0 * std::f64::consts::PI), 0.5, 0.0),
    );
    let roots = exact_aspect_roots(
        &eph,
        Body::Mercury,
        0.24,
        AspectKind::Conjunction,
        EPOCH,
        EPOCH + 1.0,
        &RefineConfig::default(),
    )
    .expect("search runs");

    assert_eq!(roots.len(), 3, "{roots:?}");
    for (root, t) in roots.iter().zip([0.120_800, 0.270_698, 0.355_969]) {
        assert!((root - (EPOCH + t)).abs() < 1e-5, "{roots:?}");
    }
}

#[test]
fn refine_reports_earliest_loop_crossing() {
    let config = RefineConfig {
        max_piece_days: 100.0,
        ..RefineConfig::default()
    };
    let hit = refine_exact_aspect(
        &looping(),
        Body::Mercury,
        10.0,
        AspectKind::Conjunction,
        EPOCH,
        EPOCH + 100.0,
        &config,
    )
    .expect("search runs")
    .expect("three crossings");
    assert!((hit.jd_ut - (EPOCH + 13.176)).abs() < 1e-2);
    assert!(hit.speed_deg_per_day > 0.0);
}

#[test]
fn station_short_of_exact_is_not_found() {
    // The loop peaks at 15.51°, 1.5° short of 17°, then turns back.
    let roots = exact_aspect_roots(
        &looping(),
        Body::Mercury,
        17.0,
        AspectKind::Conjunction,
        EPOCH + 10.0,
        EPOCH + 60.0,
        &RefineConfig::default(),
    )
    .expect("search runs");
    assert!(roots.is_empty(), "{roots:?}");

    let hit = refine_exact_aspect(
        &looping(),
        Body::Mercury,
        17.0,
        AspectKind::Conjunction,
        EPOCH + 10.0,
        EPOCH + 60.0,
        &RefineConfig::default(),
    )
    .expect("search runs");
    assert_eq!(hit, None);
}

#[test]
fn next_and_previous_opposition() {
    let eph = SyntheticEphemeris::new().with_body(Body::Sun, BodyMotion::linear(0.0, 1.0));
    let config = ExactSearchConfig::default();

    let next = next_exact_aspect(
        &eph,
        Body::Sun,
        0.0,
        AspectKind::Opposition,
        EPOCH + 10.0,
        &config,
    )
    .expect("search runs")
    .expect("within window");
    assert!((next.jd_ut - (EPOCH + 180.0)).abs() < 1e-6);

    let prev = prev_exact_aspect(
        &eph,
        Body::Sun,
        0.0,
        AspectKind::Opposition,
        EPOCH + 10.0,
        &config,
    )
    .expect("search runs")
    .expect("within window");
    assert!((prev.jd_ut - (EPOCH - 180.0)).abs() < 1e-6);
}

#[test]
fn next_skips_an_exact_start() {
    // Exact at the start instant itself; the next one is a full cycle later.
    let eph = SyntheticEphemeris::new().with_body(Body::Sun, BodyMotion::linear(0.0, 1.0));
    let next = next_exact_aspect(
        &eph,
        Body::Sun,
        0.0,
        AspectKind::Conjunction,
        EPOCH,
        &ExactSearchConfig::default(),
    )
    .expect("search runs")
    .expect("within window");
    assert!((next.jd_ut - (EPOCH + 360.0)).abs() < 1e-6);
}

#[test]
fn slow_body_outside_window_is_none() {
    let eph = SyntheticEphemeris::new().with_body(Body::Saturn, BodyMotion::linear(0.0, 0.01));
    let config = ExactSearchConfig {
        max_window_days: 100.0,
        ..ExactSearchConfig::default()
    };
    let next = next_exact_aspect(
        &eph,
        Body::Saturn,
        90.0,
        AspectKind::Conjunction,
        EPOCH,
        &config,
    )
    .expect("search runs");
    assert_eq!(next, None);
}

#[test]
fn loop_crossings_found_by_forward_search() {
    // Successive next-searches walk through all three passes of 10°.
    let eph = looping();
    let config = ExactSearchConfig::default();
    let mut jd = EPOCH;
    let mut found = Vec::new();
    for _ in 0..3 {
        let hit = next_exact_aspect(&eph, Body::Mercury, 10.0, AspectKind::Conjunction, jd, &config)
            .expect("search runs")
            .expect("within window");
        found.push(hit.jd_ut - EPOCH);
        jd = hit.jd_ut;
    }
    assert!((found[0] - 13.176).abs() < 1e-2, "{found:?}");
    assert!((found[1] - 50.0).abs() < 1e-6, "{found:?}");
    assert!((found[2] - 86.825).abs() < 1e-2, "{found:?}");
}

#[test]
fn provider_failure_propagates() {
    let eph = SyntheticEphemeris::new()
        .with_body(Body::Sun, BodyMotion::linear(0.0, 1.0))
        .with_range(EPOCH, EPOCH + 10.0);
    let res = refine_exact_aspect(
        &eph,
        Body::Sun,
        0.0,
        AspectKind::Square,
        EPOCH,
        EPOCH + 100.0,
        &RefineConfig::default(),
    );
    assert!(res.is_err());
}
