//! Types for transit scans.

use horo_chart::{Chart, OrbConfig};
use horo_core::{Body, CLASSICAL_BODIES};
use horo_math::{ALL_ASPECTS, AspectKind};
use horo_time::{Instant, StepGranularity};
use serde::{Deserialize, Serialize};

use crate::exact_types::RefineConfig;
use crate::retrograde_types::RetrogradeInterval;

/// Default upper bound on scan steps.
pub const DEFAULT_MAX_STEPS: usize = 200_000;

/// What a transiting body aspects.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AspectTarget {
    /// A natal body.
    Body(Body),
    /// A natal house cusp, 0-based.
    Cusp(u8),
}

impl std::fmt::Display for AspectTarget {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Body(b) => write!(f, "natal {b}"),
            Self::Cusp(i) => write!(f, "cusp {}", i + 1),
        }
    }
}

/// Configuration for a transit scan.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TransitConfig {
    pub step: StepGranularity,
    /// Transit orbs; body-body and body-cusp.
    pub orbs: OrbConfig,
    pub transiting_bodies: Vec<Body>,
    /// Natal bodies used as targets.
    pub natal_targets: Vec<Body>,
    /// Also match against the 12 natal cusps.
    pub include_cusps: bool,
    pub aspects: Vec<AspectKind>,
    /// Refine the exact instant of each closed event.
    pub refine_exact: bool,
    pub refine: RefineConfig,
    /// Keep every per-step chart in the result.
    pub keep_charts: bool,
    pub max_steps: usize,
}

impl Default for TransitConfig {
    fn default() -> Self {
        Self {
            step: StepGranularity::default(),
            orbs: OrbConfig::transit(),
            transiting_bodies: CLASSICAL_BODIES.to_vec(),
            natal_targets: CLASSICAL_BODIES.to_vec(),
            include_cusps: false,
            aspects: ALL_ASPECTS.to_vec(),
            refine_exact: false,
            refine: RefineConfig::default(),
            keep_charts: false,
            max_steps: DEFAULT_MAX_STEPS,
        }
    }
}

impl TransitConfig {
    pub fn validate(&self) -> Result<(), &'static str> {
        if self.step.validate().is_err() {
            return Err("step count must be positive");
        }
        if self.transiting_bodies.is_empty() {
            return Err("at least one transiting body is required");
        }
        if self.natal_targets.is_empty() && !self.include_cusps {
            return Err("no natal targets selected");
        }
        if self.aspects.is_empty() {
            return Err("at least one aspect is required");
        }
        if self.max_steps == 0 {
            return Err("max_steps must be > 0");
        }
        if u32::try_from(self.max_steps).is_err() {
            return Err("max_steps must fit in u32");
        }
        self.orbs.validate()?;
        if self.refine_exact {
            self.refine.validate()?;
        }
        Ok(())
    }
}

/// A run of consecutive steps over which one aspect held.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AspectEvent {
    pub transiting: Body,
    pub target: AspectTarget,
    pub aspect: AspectKind,
    /// First matching step.
    pub start_index: usize,
    /// Last matching step.
    pub end_index: usize,
    /// The aspect already held at the first step of the scan, or at the
    /// first step after the transiting body went unobserved.
    pub open_start: bool,
    /// The aspect still held at the last step of a completed scan, or at
    /// the last step before the transiting body went unobserved.
    pub open_end: bool,
    /// Smallest |separation − angle| seen in the span.
    pub orb_deg: f64,
    /// Step at which `orb_deg` was seen.
    pub tightest_index: usize,
    /// Moving towards exactness at the first step.
    pub applying: bool,
    /// Transiting body retrograde at the first step.
    pub retrograde: bool,
    /// Refined exact instant (JD UT), when requested and found.
    pub exact_jd_ut: Option<f64>,
}

/// Progress item yielded once per computed step.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScanProgress {
    pub step_index: usize,
    /// Local date and clock of the step.
    pub instant: Instant,
    pub jd_ut: f64,
    /// Events closed so far.
    pub events_closed: usize,
}

/// Lifecycle of a scan.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScanState {
    Idle,
    Stepping { next_step: usize },
    Completed { steps: usize },
    /// Stopped by cancellation or an error before `at_step` was computed.
    Aborted { at_step: usize },
}

impl ScanState {
    pub fn is_finished(self) -> bool {
        matches!(self, Self::Completed { .. } | Self::Aborted { .. })
    }
}

/// Result of a transit scan.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransitScan {
    pub state: ScanState,
    /// Local instant of every computed step.
    pub instants: Vec<Instant>,
    /// Julian Day UT of every computed step.
    pub jds: Vec<f64>,
    /// Per-step charts, when `keep_charts` is set.
    pub charts: Vec<Chart>,
    /// Closed events ordered by start step.
    pub events: Vec<AspectEvent>,
    pub retrograde: Vec<RetrogradeInterval>,
}

impl TransitScan {
    pub fn aborted(&self) -> bool {
        matches!(self.state, ScanState::Aborted { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        assert!(TransitConfig::default().validate().is_ok());
    }

    #[test]
    fn empty_targets_rejected() {
        let c = TransitConfig {
            natal_targets: vec![],
            ..TransitConfig::default()
        };
        assert!(c.validate().is_err());
        let c = TransitConfig {
            natal_targets: vec![],
            include_cusps: true,
            ..TransitConfig::default()
        };
        assert!(c.validate().is_ok());
    }

    #[test]
    #[cfg(target_pointer_width = "64")]
    fn max_steps_beyond_u32_rejected() {
        let c = TransitConfig {
            max_steps: u32::MAX as usize + 1,
            ..TransitConfig::default()
        };
        assert!(c.validate().is_err());
        let c = TransitConfig {
            max_steps: u32::MAX as usize,
            ..TransitConfig::default()
        };
        assert!(c.validate().is_ok());
    }

    #[test]
    fn target_display() {
        assert_eq!(AspectTarget::Cusp(9).to_string(), "cusp 10");
        assert_eq!(AspectTarget::Body(Body::Moon).to_string(), "natal Moon");
    }
}
