//! Types for retrograde intervals and stations.

use horo_core::Body;
use serde::{Deserialize, Serialize};

/// Default upper bound on speed samples per search.
pub const DEFAULT_MAX_SAMPLES: usize = 200_000;

/// One end of a retrograde interval, as Julian Day UT.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IntervalBound {
    /// The run touches the scan boundary; the true station lies beyond it
    /// and was never observed.
    Open(f64),
    /// Observed (or refined) end of the run.
    Closed(f64),
}

impl IntervalBound {
    pub fn jd(self) -> f64 {
        match self {
            Self::Open(jd) | Self::Closed(jd) => jd,
        }
    }

    pub fn is_open(self) -> bool {
        matches!(self, Self::Open(_))
    }
}

/// A maximal run of retrograde motion for one body.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RetrogradeInterval {
    pub body: Body,
    pub from: IntervalBound,
    pub to: IntervalBound,
}

impl RetrogradeInterval {
    /// Length in days between the two bounds as reported.
    pub fn duration_days(&self) -> f64 {
        self.to.jd() - self.from.jd()
    }
}

/// Configuration for [`find_retrograde_intervals`](crate::find_retrograde_intervals).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StationConfig {
    /// Sampling step in days (default 1, sampled at 12:00 UT).
    pub step_days: f64,
    /// Refine closed bounds to the station instant by bisection on speed.
    pub refine_stations: bool,
    /// Maximum bisection iterations (default 50).
    pub max_iterations: u32,
    /// Convergence threshold in days (default 1e-6, ~0.09 s).
    pub convergence_days: f64,
    /// Longest date range accepted, counted in samples.
    pub max_samples: usize,
}

impl Default for StationConfig {
    fn default() -> Self {
        Self {
            step_days: 1.0,
            refine_stations: true,
            max_iterations: 50,
            convergence_days: 1e-6,
            max_samples: DEFAULT_MAX_SAMPLES,
        }
    }
}

impl StationConfig {
    pub fn validate(&self) -> Result<(), &'static str> {
        if !self.step_days.is_finite() || self.step_days <= 0.0 {
            return Err("step_days must be positive");
        }
        if self.max_iterations == 0 {
            return Err("max_iterations must be > 0");
        }
        if !self.convergence_days.is_finite() || self.convergence_days <= 0.0 {
            return Err("convergence_days must be positive");
        }
        if self.max_samples == 0 {
            return Err("max_samples must be > 0");
        }
        Ok(())
    }
}
