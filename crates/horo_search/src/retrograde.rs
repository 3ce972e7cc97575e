//! Retrograde intervals.
//!
//! Two entry points share one run-collection pass:
//! - [`retrograde_intervals_from_observations`] works on the flags a transit
//!   scan already computed, reporting the observed steps.
//! - [`find_retrograde_intervals`] samples a body itself and can refine each
//!   observed station by bisection on speed.
//!
//! A run touching either end of the sampled range, or a step where the body
//! was not observed, is reported with an [`IntervalBound::Open`] end there.

use horo_core::{Body, EphemerisProvider};
use horo_time::CalendarDate;

use crate::error::SearchError;
use crate::retrograde_types::{IntervalBound, RetrogradeInterval, StationConfig};

/// Sampling hour (UT) for date-range searches.
const SAMPLE_HOUR_UT: f64 = 12.0;

/// Maximal runs of `true` as inclusive index pairs.
fn true_runs(flags: &[bool]) -> Vec<(usize, usize)> {
    let mut runs = Vec::new();
    let mut start = None;
    for (i, &f) in flags.iter().enumerate() {
        match (f, start) {
            (true, None) => start = Some(i),
            (false, Some(s)) => {
                runs.push((s, i - 1));
                start = None;
            }
            _ => {}
        }
    }
    if let Some(s) = start {
        runs.push((s, flags.len() - 1));
    }
    runs
}

/// Retrograde intervals from per-step flags and their Julian Days.
///
/// `to` is the last step at which the flag was still true. Only the common
/// prefix of `flags` and `jds` is used.
pub fn retrograde_intervals_from_flags(
    body: Body,
    flags: &[bool],
    jds: &[f64],
) -> Vec<RetrogradeInterval> {
    let observed: Vec<Option<bool>> = flags.iter().copied().map(Some).collect();
    retrograde_intervals_from_observations(body, &observed, jds)
}

/// Like [`retrograde_intervals_from_flags`], with `None` marking steps at
/// which the body's motion was not observed.
///
/// A run that borders an unobserved step ends there with an
/// [`IntervalBound::Open`] at its last observed step, the same as a run
/// touching the edge of the range.
pub fn retrograde_intervals_from_observations(
    body: Body,
    observed: &[Option<bool>],
    jds: &[f64],
) -> Vec<RetrogradeInterval> {
    let n = observed.len().min(jds.len());
    let observed = &observed[..n];
    let flags: Vec<bool> = observed.iter().map(|o| *o == Some(true)).collect();
    let seen = |i: usize| observed.get(i).is_some_and(Option::is_some);
    true_runs(&flags)
        .into_iter()
        .map(|(s, e)| RetrogradeInterval {
            body,
            from: if s == 0 || !seen(s - 1) {
                IntervalBound::Open(jds[s])
            } else {
                IntervalBound::Closed(jds[s])
            },
            to: if !seen(e + 1) {
                IntervalBound::Open(jds[e])
            } else {
                IntervalBound::Closed(jds[e])
            },
        })
        .collect()
}

/// Bisect on speed between two samples of opposite sign.
fn refine_station<P: EphemerisProvider>(
    provider: &P,
    body: Body,
    mut t_a: f64,
    mut v_a: f64,
    mut t_b: f64,
    config: &StationConfig,
) -> Result<f64, SearchError> {
    for _ in 0..config.max_iterations {
        let t_mid = 0.5 * (t_a + t_b);
        let v_mid = provider.body_position(body, t_mid)?.speed_deg_per_day;
        if v_a * v_mid <= 0.0 {
            t_b = t_mid;
        } else {
            t_a = t_mid;
            v_a = v_mid;
        }
        if (t_b - t_a).abs() < config.convergence_days {
            break;
        }
    }
    Ok(0.5 * (t_a + t_b))
}

/// Retrograde intervals of `body` between two dates, inclusive.
///
/// The body is sampled every `step_days` from 12:00 UT on `start`. The Sun
/// and Moon never go retrograde and yield no intervals. With
/// `refine_stations`, closed bounds are moved to the bisected station
/// instant; open bounds stay at the range boundary.
pub fn find_retrograde_intervals<P: EphemerisProvider>(
    provider: &P,
    body: Body,
    start: CalendarDate,
    end: CalendarDate,
    config: &StationConfig,
) -> Result<Vec<RetrogradeInterval>, SearchError> {
    config.validate().map_err(SearchError::InvalidConfig)?;
    start.validate()?;
    end.validate()?;

    let jd_start = start.julian_day(SAMPLE_HOUR_UT);
    let jd_end = end.julian_day(SAMPLE_HOUR_UT);
    if jd_end < jd_start {
        return Err(SearchError::InvalidConfig("end date must not precede start date"));
    }
    if !body.can_retrograde() {
        log::debug!("{body} never retrogrades; no intervals");
        return Ok(Vec::new());
    }

    let span = ((jd_end - jd_start) / config.step_days).floor();
    if span >= config.max_samples as f64 {
        return Err(SearchError::InvalidConfig("date range exceeds max_samples"));
    }
    let samples = span as usize + 1;
    let mut jds = Vec::with_capacity(samples);
    let mut speeds = Vec::with_capacity(samples);
    for k in 0..samples {
        let jd = jd_start + k as f64 * config.step_days;
        jds.push(jd);
        speeds.push(provider.body_position(body, jd)?.speed_deg_per_day);
    }
    let flags: Vec<bool> = speeds.iter().map(|&v| v < 0.0).collect();

    let last = jds.len() - 1;
    let mut intervals = Vec::new();
    for (s, e) in true_runs(&flags) {
        let from = if s == 0 {
            IntervalBound::Open(jds[0])
        } else if config.refine_stations {
            let t = refine_station(provider, body, jds[s - 1], speeds[s - 1], jds[s], config)?;
            IntervalBound::Closed(t)
        } else {
            IntervalBound::Closed(jds[s])
        };
        let to = if e == last {
            IntervalBound::Open(jds[last])
        } else if config.refine_stations {
            let t = refine_station(provider, body, jds[e], speeds[e], jds[e + 1], config)?;
            IntervalBound::Closed(t)
        } else {
            IntervalBound::Closed(jds[e])
        };
        intervals.push(RetrogradeInterval { body, from, to });
    }

    log::debug!("{body}: {} retrograde interval(s)", intervals.len());
    Ok(intervals)
}
