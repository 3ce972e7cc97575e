//! Chart orchestration.
//!
//! [`compute_chart`] validates the subject, asks the provider for time
//! quantities and body positions, then runs the house engine, placement,
//! aspect table and tallies. A chart is built fresh on every call.

use horo_core::{Body, EphemerisProvider};
use horo_houses::{HouseInput, compute_houses};
use horo_time::delta_t_days;

use crate::aspects::compute_aspect_table;
use crate::chart_types::{BodyState, Chart, ChartConfig};
use crate::error::ChartError;
use crate::placement::QualityTally;
use crate::subject::Subject;

/// Compute one chart.
///
/// Invalid preconditions fail before any provider call. Obliquity and
/// sidereal-time failures are fatal; a failed body lookup records a
/// sentinel [`BodyState`] and the chart continues; a failed Delta-T lookup
/// falls back to the built-in approximation.
pub fn compute_chart<P: EphemerisProvider>(
    provider: &P,
    subject: &Subject,
    config: &ChartConfig,
) -> Result<Chart, ChartError> {
    subject.validate()?;
    config.validate().map_err(ChartError::InvalidConfig)?;

    let jd_ut = subject.julian_day_ut();
    let delta_t = provider.delta_t_days(jd_ut).unwrap_or_else(|e| {
        log::warn!("delta-T lookup failed at JD {jd_ut:.5} ({e}); using built-in table");
        delta_t_days(jd_ut)
    });
    let obliquity_deg = provider.obliquity_deg(jd_ut)?;
    let sidereal_time_deg = provider.sidereal_time_deg(jd_ut, subject.longitude_deg)?;

    let input = HouseInput::from_ramc(sidereal_time_deg, obliquity_deg, subject.latitude_deg);
    let houses = compute_houses(subject.house_system, &input);

    let bodies: Vec<BodyState> = config
        .bodies
        .iter()
        .map(|&body| body_state(provider, body, jd_ut, &houses.cusps))
        .collect();

    let aspects = compute_aspect_table(&bodies, &config.orbs);
    let tally = QualityTally::from_signs(
        bodies
            .iter()
            .filter(|b| b.available && config.tally_bodies.contains(&b.body))
            .map(|b| b.sign),
    );

    log::debug!(
        "chart at JD {jd_ut:.6}: {} houses ({:?}), {} aspect hits",
        houses.system,
        houses.status,
        aspects.hits().count()
    );

    Ok(Chart {
        subject: *subject,
        jd_ut,
        delta_t_days: delta_t,
        sidereal_time_deg,
        obliquity_deg,
        ascendant_deg: input.ascendant_deg,
        midheaven_deg: input.midheaven_deg,
        houses,
        bodies,
        aspects,
        tally,
    })
}

/// State of one body, or the sentinel if the provider fails.
pub fn body_state<P: EphemerisProvider>(
    provider: &P,
    body: Body,
    jd_ut: f64,
    cusps: &[f64; 12],
) -> BodyState {
    match provider.body_position(body, jd_ut) {
        Ok(pos) if pos.longitude_deg.is_finite() && pos.speed_deg_per_day.is_finite() => {
            BodyState::from_position(body, &pos, cusps)
        }
        Ok(_) => {
            log::warn!("{body}: non-finite position at JD {jd_ut:.5}");
            BodyState::unavailable(body)
        }
        Err(e) => {
            log::warn!("{body}: {e}");
            BodyState::unavailable(body)
        }
    }
}
