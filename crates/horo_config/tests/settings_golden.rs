//! Settings loaded from TOML documents and files.

use std::path::PathBuf;

use horo_chart::OrbConfig;
use horo_config::{ConfigError, Settings};
use horo_core::Body;
use horo_houses::HouseSystem;
use horo_math::AspectKind;
use horo_time::{CalendarDate, StepGranularity};

const FULL: &str = r#"
[chart]
house_system = "Koch"
utc_offset_hours = 1.0
bodies = ["Sun", "Moon", "Mercury", "Venus", "Mars", "True Node"]
tally_bodies = ["Sun", "Moon"]

[orbs]
luminary_bonus = 1.0
minor_body_penalty = 0.0

[orbs.default]
conjunction = 9.0
square = 7.5

[orbs.cusp]
conjunction = 3.0

[[orbs.pair]]
first = "Moon"
second = "Sun"
aspect = "opposition"
orb = 12.0

[transits]
step = "6h"
bodies = ["Mars", "Jupiter"]
targets = ["Sun", "Moon"]
aspects = ["conjunction", "square", "opposition"]
include_cusps = true
refine_exact = true
max_steps = 5000

[transits.orbs.default]
conjunction = 2.0

[exact]
max_window_days = 400.0

[stations]
step_days = 0.5
refine = false
"#;

#[test]
fn full_document() {
    let s = Settings::from_toml_str(FULL).expect("valid settings");

    assert_eq!(s.house_system, HouseSystem::Koch);
    assert_eq!(s.utc_offset_hours, 1.0);
    assert_eq!(s.chart.bodies.len(), 6);
    assert_eq!(s.chart.bodies[5], Body::TrueNode);
    assert_eq!(s.chart.tally_bodies, vec![Body::Sun, Body::Moon]);

    let orbs = &s.chart.orbs;
    assert_eq!(orbs.default_orbs, [9.0, 2.0, 6.0, 7.5, 8.0, 3.0, 10.0]);
    assert_eq!(orbs.cusp_orbs[0], 3.0);
    // luminary bonus 1 on a Sun-Mars conjunction
    assert_eq!(orbs.orb(Body::Sun, Body::Mars, AspectKind::Conjunction), 10.0);
    // pair override is unordered
    assert_eq!(orbs.orb(Body::Sun, Body::Moon, AspectKind::Opposition), 12.0);

    assert_eq!(s.transit.step, StepGranularity::Hours(6));
    assert_eq!(s.transit.transiting_bodies, vec![Body::Mars, Body::Jupiter]);
    assert_eq!(
        s.transit.aspects,
        vec![AspectKind::Conjunction, AspectKind::Square, AspectKind::Opposition]
    );
    assert!(s.transit.include_cusps);
    assert!(s.transit.refine_exact);
    assert_eq!(s.transit.max_steps, 5000);
    assert_eq!(s.transit.orbs.default_orbs[0], 2.0);
    assert_eq!(s.transit.orbs.default_orbs[3], OrbConfig::transit().default_orbs[3]);

    assert_eq!(s.exact.max_window_days, 400.0);
    assert_eq!(s.stations.step_days, 0.5);
    assert!(!s.stations.refine_stations);
}

#[test]
fn partial_document_keeps_defaults() {
    let s = Settings::from_toml_str("[chart]\nhouse_system = 4\n").expect("valid settings");
    let d = Settings::default();
    assert_eq!(s.house_system, HouseSystem::WholeSign);
    assert_eq!(s.chart, d.chart);
    assert_eq!(s.transit, d.transit);
    assert_eq!(s.source, None);
}

#[test]
fn subject_uses_configured_system_and_offset() {
    let s = Settings::from_toml_str(FULL).expect("valid settings");
    let date = CalendarDate::gregorian(1990, 6, 15).expect("valid date");
    let subject = s.subject(date, 14.5, 13.4, 52.5);
    assert_eq!(subject.house_system, HouseSystem::Koch);
    assert_eq!(subject.utc_offset_hours, 1.0);
    assert!(subject.validate().is_ok());
}

#[test]
fn invalid_values_name_their_section() {
    let cases = [
        ("[orbs.default]\nsquare = 45.0", "orbs"),
        ("[chart]\nbodies = []", "chart"),
        ("[transits]\nbodies = []", "transits"),
        ("[exact]\nstep_days = 0.0", "exact"),
        ("[stations]\nstep_days = -1.0", "stations"),
    ];
    for (text, expected) in cases {
        match Settings::from_toml_str(text) {
            Err(ConfigError::Invalid { section, .. }) => assert_eq!(section, expected, "{text}"),
            other => panic!("{text}: unexpected {other:?}"),
        }
    }
}

#[test]
fn bad_step_and_syntax() {
    assert!(matches!(
        Settings::from_toml_str("[transits]\nstep = \"0d\""),
        Err(ConfigError::Invalid { section: "transits", .. }) | Err(ConfigError::Step(_))
    ));
    assert!(matches!(
        Settings::from_toml_str("[transits]\nstep = \"fortnight\""),
        Err(ConfigError::Step(_))
    ));
    assert!(matches!(
        Settings::from_toml_str("[chart\nhouse_system = 1"),
        Err(ConfigError::Parse(_))
    ));
}

fn temp_file(name: &str, contents: &str) -> PathBuf {
    let path = std::env::temp_dir().join(format!("horo_config_{}_{name}", std::process::id()));
    std::fs::write(&path, contents).expect("write temp config");
    path
}

#[test]
fn file_round_trip_records_source() {
    let path = temp_file("full.toml", FULL);
    let s = Settings::from_file(&path).expect("valid file");
    assert_eq!(s.source.as_deref(), Some(path.as_path()));
    assert_eq!(s.house_system, HouseSystem::Koch);

    let loaded = Settings::load(Some(&path)).expect("explicit path");
    assert_eq!(loaded, s);
    let _ = std::fs::remove_file(&path);
}

#[test]
fn missing_named_file_is_an_error() {
    let path = std::env::temp_dir().join("horo_config_definitely_missing.toml");
    let err = Settings::load(Some(&path)).expect_err("missing file");
    assert!(matches!(err, ConfigError::Io { .. }));
}
