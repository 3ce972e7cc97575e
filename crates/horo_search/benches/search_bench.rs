use criterion::{Criterion, black_box, criterion_group, criterion_main};
use horo_chart::{ChartConfig, OrbConfig, Subject, compute_chart};
use horo_core::{Body, BodyMotion, CLASSICAL_BODIES, SyntheticEphemeris};
use horo_houses::HouseSystem;
use horo_math::AspectKind;
use horo_search::{
    CancelToken, RefineConfig, StationConfig, TransitConfig, compute_transit_scan,
    exact_aspect_roots, find_retrograde_intervals,
};
use horo_time::{CalendarDate, Instant};

const EPOCH: f64 = SyntheticEphemeris::EPOCH_JD;

fn provider() -> SyntheticEphemeris {
    let mut eph = SyntheticEphemeris::new();
    for (i, body) in CLASSICAL_BODIES.into_iter().enumerate() {
        let i = i as f64;
        let motion = if body.can_retrograde() {
            BodyMotion::epicyclic(36.0 * i, 1.2 / (i + 1.0), 8.0, 90.0 + 40.0 * i, 17.0 * i)
        } else {
            BodyMotion::linear(36.0 * i, 0.9856 + 12.2 * i)
        };
        eph = eph.with_body(body, motion);
    }
    eph
}

fn transit_year_bench(c: &mut Criterion) {
    let eph = provider();
    let start = CalendarDate::gregorian(2000, 1, 1).expect("valid date");
    let subject = Subject::new(start, 12.0, 13.4, 52.5, HouseSystem::Placidus);
    let natal = compute_chart(&eph, &subject, &ChartConfig::default()).expect("natal chart");
    let end = CalendarDate::gregorian(2000, 12, 31).expect("valid date");
    let from = Instant::new(start, 12.0).expect("valid instant");
    let to = Instant::new(end, 12.0).expect("valid instant");
    let config = TransitConfig {
        orbs: OrbConfig::transit(),
        ..TransitConfig::default()
    };

    c.bench_function("transit_scan_one_year_daily", |b| {
        b.iter(|| {
            compute_transit_scan(
                black_box(&eph),
                &natal,
                from,
                to,
                &config,
                &CancelToken::new(),
                None,
            )
        })
    });
}

fn retrograde_loop_roots_bench(c: &mut Criterion) {
    let eph = SyntheticEphemeris::new().with_body(
        Body::Mercury,
        BodyMotion::epicyclic(0.0, 0.2, 10.0, 100.0, 0.0),
    );
    let config = RefineConfig {
        max_piece_days: 100.0,
        ..RefineConfig::default()
    };
    c.bench_function("exact_roots_retrograde_loop", |b| {
        b.iter(|| {
            exact_aspect_roots(
                &eph,
                Body::Mercury,
                black_box(10.0),
                AspectKind::Conjunction,
                EPOCH,
                EPOCH + 100.0,
                &config,
            )
        })
    });
}

fn retrograde_year_bench(c: &mut Criterion) {
    let eph = provider();
    let start = CalendarDate::gregorian(2000, 1, 1).expect("valid date");
    let end = CalendarDate::gregorian(2000, 12, 31).expect("valid date");
    c.bench_function("retrograde_intervals_one_year", |b| {
        b.iter(|| {
            find_retrograde_intervals(
                &eph,
                black_box(Body::Mars),
                start,
                end,
                &StationConfig::default(),
            )
        })
    });
}

criterion_group!(
    benches,
    transit_year_bench,
    retrograde_loop_roots_bench,
    retrograde_year_bench
);
criterion_main!(benches);
