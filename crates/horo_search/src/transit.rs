//! Transit scan engine.
//!
//! A [`TransitScanner`] steps a moving copy of the natal subject from a
//! start instant to an end instant and computes a chart at each step. For
//! every (transiting body, natal target, aspect) it coalesces consecutive
//! matching steps into one [`AspectEvent`].
//!
//! States: `Idle → Stepping → (Completed | Aborted)`. The scanner is an
//! iterator of [`ScanProgress`] items the caller pulls; it checks the
//! [`CancelToken`] once per step. On abort, spans still open are dropped so
//! the result holds only closed events.
//!
//! A transiting body the provider cannot serve at some step is unobserved
//! there, not direct: spans and retrograde runs bordering the gap are
//! reported open at their last observed step.

use std::collections::BTreeMap;

use crossbeam_channel::Sender;
use horo_chart::{BodyState, Chart, ChartConfig, compute_chart};
use horo_core::{Body, EphemerisProvider};
use horo_math::{AspectKind, match_aspect, minimal_angular_distance};
use horo_time::{Instant, TimeError};

use crate::cancel::CancelToken;
use crate::error::SearchError;
use crate::exact::refine_exact_aspect;
use crate::retrograde::retrograde_intervals_from_observations;
use crate::transit_types::{
    AspectEvent, AspectTarget, ScanProgress, ScanState, TransitConfig, TransitScan,
};

type SpanKey = (Body, AspectTarget, AspectKind);

#[derive(Debug, Clone, Copy)]
struct OpenSpan {
    start_index: usize,
    open_start: bool,
    target_deg: f64,
    orb_deg: f64,
    tightest_index: usize,
    applying: bool,
    retrograde: bool,
}

/// Whether |separation − angle| is shrinking.
///
/// `d/dt |d|` is `sign(d)·speed`, where `d` is the signed distance from
/// target to body; at `|d| = 0` or `180` any motion moves |d| away from
/// that extreme.
fn is_applying(target_deg: f64, body_deg: f64, residual: f64, speed: f64) -> bool {
    if residual == 0.0 || speed == 0.0 {
        return false;
    }
    let d = minimal_angular_distance(target_deg, body_deg);
    let rate = if d == 0.0 {
        speed.abs()
    } else if d.abs() >= 180.0 {
        -speed.abs()
    } else {
        d.signum() * speed
    };
    residual * rate < 0.0
}

/// Pull-based transit scan.
pub struct TransitScanner<'a, P> {
    provider: &'a P,
    natal: &'a Chart,
    config: &'a TransitConfig,
    chart_config: ChartConfig,
    cancel: CancelToken,
    start: Instant,
    end_jd: f64,
    targets: Vec<(AspectTarget, f64)>,
    state: ScanState,
    instants: Vec<Instant>,
    jds: Vec<f64>,
    charts: Vec<Chart>,
    open: BTreeMap<SpanKey, OpenSpan>,
    events: Vec<AspectEvent>,
    retro_flags: BTreeMap<Body, Vec<Option<bool>>>,
}

impl<'a, P: EphemerisProvider> TransitScanner<'a, P> {
    /// Prepare a scan over `[start, end]` (local instants of the natal
    /// subject's clock). Nothing is computed until the first `next()`.
    pub fn new(
        provider: &'a P,
        natal: &'a Chart,
        start: Instant,
        end: Instant,
        config: &'a TransitConfig,
        cancel: CancelToken,
    ) -> Result<Self, SearchError> {
        config.validate().map_err(SearchError::InvalidConfig)?;
        start.date.validate()?;
        end.date.validate()?;

        let start_jd = start.julian_day();
        let end_jd = end.julian_day();
        if end_jd < start_jd {
            return Err(SearchError::InvalidConfig("scan end precedes scan start"));
        }
        let estimated = ((end_jd - start_jd) / config.step.approx_days()).floor() as usize + 1;
        if estimated > config.max_steps {
            return Err(SearchError::InvalidConfig("scan range exceeds max_steps"));
        }

        let mut targets = Vec::new();
        for &b in &config.natal_targets {
            match natal.body(b).filter(|s| s.available) {
                Some(s) => targets.push((AspectTarget::Body(b), s.longitude_deg)),
                None => log::warn!("natal {b} unavailable; not used as a transit target"),
            }
        }
        if config.include_cusps {
            for (i, &c) in natal.cusps().iter().enumerate() {
                targets.push((AspectTarget::Cusp(i as u8), c));
            }
        }

        let chart_config = ChartConfig {
            orbs: config.orbs.clone(),
            bodies: config.transiting_bodies.clone(),
            tally_bodies: Vec::new(),
        };

        Ok(Self {
            provider,
            natal,
            config,
            chart_config,
            cancel,
            start,
            end_jd,
            targets,
            state: ScanState::Idle,
            instants: Vec::new(),
            jds: Vec::new(),
            charts: Vec::new(),
            open: BTreeMap::new(),
            events: Vec::new(),
            retro_flags: BTreeMap::new(),
        })
    }

    pub fn state(&self) -> ScanState {
        self.state
    }

    /// Events closed so far.
    pub fn events(&self) -> &[AspectEvent] {
        &self.events
    }

    /// Compute step `k`, or `None` once past the end of the range.
    fn step(&mut self, k: usize) -> Result<Option<ScanProgress>, SearchError> {
        let config = self.config;
        if k >= config.max_steps {
            log::warn!("transit scan stopped at max_steps = {}", config.max_steps);
            return Ok(None);
        }
        let count = u32::try_from(k)
            .map_err(|_| SearchError::InvalidConfig("step index exceeds u32 stepping range"))?;
        let instant = match self.start.advanced(config.step, count) {
            Ok(i) => i,
            Err(TimeError::OutOfRange { .. }) => return Ok(None),
            Err(e) => return Err(e.into()),
        };
        if instant.julian_day() > self.end_jd {
            return Ok(None);
        }

        let subject = self.natal.subject.at(instant);
        let chart = compute_chart(self.provider, &subject, &self.chart_config)?;
        log::trace!("step {k}: {instant} (JD {:.5})", chart.jd_ut);

        self.instants.push(instant);
        self.jds.push(chart.jd_ut);
        for &body in &config.transiting_bodies {
            let state = chart.body(body).filter(|s| s.available).copied();
            let flags = self.retro_flags.entry(body).or_default();
            let seen_before = flags.last().is_some_and(Option::is_some);
            flags.push(state.map(|s| s.retrograde));
            self.match_body(k, body, state.as_ref(), seen_before);
        }

        let progress = ScanProgress {
            step_index: k,
            instant,
            jd_ut: chart.jd_ut,
            events_closed: self.events.len(),
        };
        if config.keep_charts {
            self.charts.push(chart);
        }
        Ok(Some(progress))
    }

    fn match_body(
        &mut self,
        k: usize,
        body: Body,
        state: Option<&BodyState>,
        seen_before: bool,
    ) {
        let config = self.config;
        for ti in 0..self.targets.len() {
            let (target, target_deg) = self.targets[ti];
            for &aspect in &config.aspects {
                let key = (body, target, aspect);
                let matched = state.and_then(|s| {
                    let orb = match target {
                        AspectTarget::Body(natal) => config.orbs.orb(body, natal, aspect),
                        AspectTarget::Cusp(_) => config.orbs.cusp_orb(aspect),
                    };
                    let m = match_aspect(s.longitude_deg, target_deg, aspect.angle(), orb);
                    m.matched.then_some((s, m.residual))
                });

                match (matched, self.open.get_mut(&key)) {
                    (Some((_, residual)), Some(span)) => {
                        if residual.abs() < span.orb_deg {
                            span.orb_deg = residual.abs();
                            span.tightest_index = k;
                        }
                    }
                    (Some((s, residual)), None) => {
                        let span = OpenSpan {
                            start_index: k,
                            open_start: !seen_before,
                            target_deg,
                            orb_deg: residual.abs(),
                            tightest_index: k,
                            applying: is_applying(
                                target_deg,
                                s.longitude_deg,
                                residual,
                                s.speed_deg_per_day,
                            ),
                            retrograde: s.retrograde,
                        };
                        self.open.insert(key, span);
                    }
                    (None, Some(_)) => {
                        if let Some(span) = self.open.remove(&key) {
                            self.close(key, span, k - 1, state.is_none());
                        }
                    }
                    (None, None) => {}
                }
            }
        }
    }

    fn close(&mut self, key: SpanKey, span: OpenSpan, end_index: usize, open_end: bool) {
        let (transiting, target, aspect) = key;
        let exact_jd_ut = if self.config.refine_exact {
            self.refine(transiting, aspect, &span, end_index, open_end)
        } else {
            None
        };
        self.events.push(AspectEvent {
            transiting,
            target,
            aspect,
            start_index: span.start_index,
            end_index,
            open_start: span.open_start,
            open_end,
            orb_deg: span.orb_deg,
            tightest_index: span.tightest_index,
            applying: span.applying,
            retrograde: span.retrograde,
            exact_jd_ut,
        });
    }

    /// Exact instant inside the span, bracketed by the neighbouring steps
    /// where the body was observed.
    fn refine(
        &self,
        body: Body,
        aspect: AspectKind,
        span: &OpenSpan,
        end_index: usize,
        open_end: bool,
    ) -> Option<f64> {
        let last = self.jds.len().checked_sub(1)?;
        let a = if span.open_start {
            self.jds[span.start_index]
        } else {
            self.jds[span.start_index - 1]
        };
        let b = if open_end {
            self.jds[end_index.min(last)]
        } else {
            self.jds[(end_index + 1).min(last)]
        };
        if b <= a {
            return None;
        }
        match refine_exact_aspect(
            self.provider,
            body,
            span.target_deg,
            aspect,
            a,
            b,
            &self.config.refine,
        ) {
            Ok(found) => found.map(|e| e.jd_ut),
            Err(e) => {
                log::warn!("{body} {aspect}: exact refinement failed ({e})");
                None
            }
        }
    }

    fn complete(&mut self, steps: usize) {
        let open = std::mem::take(&mut self.open);
        if let Some(last) = steps.checked_sub(1) {
            for (key, span) in open {
                self.close(key, span, last, true);
            }
        }
        self.state = ScanState::Completed { steps };
        log::info!(
            "transit scan completed: {steps} steps, {} events",
            self.events.len()
        );
    }

    /// Consume the scanner into its result.
    ///
    /// A scanner dropped before completion counts as aborted at its next
    /// step, and its open spans are discarded.
    pub fn finish(mut self) -> TransitScan {
        match self.state {
            ScanState::Idle => self.state = ScanState::Aborted { at_step: 0 },
            ScanState::Stepping { next_step } => {
                self.state = ScanState::Aborted { at_step: next_step }
            }
            _ => {}
        }
        if let ScanState::Aborted { at_step } = self.state {
            if !self.open.is_empty() {
                log::debug!("dropping {} open span(s) at step {at_step}", self.open.len());
            }
            self.open.clear();
        }

        self.events.sort_by(|a, b| {
            (a.start_index, a.transiting, a.target, a.aspect).cmp(&(
                b.start_index,
                b.transiting,
                b.target,
                b.aspect,
            ))
        });

        let retrograde = self
            .config
            .transiting_bodies
            .iter()
            .filter_map(|b| self.retro_flags.get(b).map(|f| (*b, f)))
            .flat_map(|(b, flags)| retrograde_intervals_from_observations(b, flags, &self.jds))
            .collect();

        TransitScan {
            state: self.state,
            instants: self.instants,
            jds: self.jds,
            charts: self.charts,
            events: self.events,
            retrograde,
        }
    }
}

impl<P: EphemerisProvider> Iterator for TransitScanner<'_, P> {
    type Item = Result<ScanProgress, SearchError>;

    fn next(&mut self) -> Option<Self::Item> {
        let k = match self.state {
            ScanState::Idle => 0,
            ScanState::Stepping { next_step } => next_step,
            ScanState::Completed { .. } | ScanState::Aborted { .. } => return None,
        };
        if self.cancel.is_cancelled() {
            log::info!("transit scan aborted before step {k}");
            self.state = ScanState::Aborted { at_step: k };
            return None;
        }
        match self.step(k) {
            Ok(Some(progress)) => {
                self.state = ScanState::Stepping { next_step: k + 1 };
                Some(Ok(progress))
            }
            Ok(None) => {
                self.complete(k);
                None
            }
            Err(e) => {
                self.state = ScanState::Aborted { at_step: k };
                Some(Err(e))
            }
        }
    }
}

/// Run a transit scan to completion or cancellation.
///
/// Progress items are offered to `progress` with `try_send`; a full or
/// disconnected channel never slows or fails the scan. Cancellation yields
/// `Ok` with an aborted result; provider or calendar failures are errors.
pub fn compute_transit_scan<P: EphemerisProvider>(
    provider: &P,
    natal: &Chart,
    start: Instant,
    end: Instant,
    config: &TransitConfig,
    cancel: &CancelToken,
    progress: Option<&Sender<ScanProgress>>,
) -> Result<TransitScan, SearchError> {
    let mut scanner = TransitScanner::new(provider, natal, start, end, config, cancel.clone())?;
    for item in scanner.by_ref() {
        let p = item?;
        if let Some(tx) = progress {
            let _ = tx.try_send(p);
        }
    }
    Ok(scanner.finish())
}
