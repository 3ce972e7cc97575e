//! Types for exact-aspect refinement and search.

use horo_core::Body;
use horo_math::AspectKind;
use serde::{Deserialize, Serialize};

/// Time direction of a search.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SearchDirection {
    Forward,
    Backward,
}

/// Root-finding parameters for exact-aspect refinement.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RefineConfig {
    /// Brackets are cut into pieces no longer than this before the
    /// monotonicity check (default 1 day).
    pub max_piece_days: f64,
    /// A piece whose speed changes sign is halved until it is this short
    /// (default 0.001 day, ~1.4 min).
    pub min_piece_days: f64,
    /// Spacing of the speed samples that decide whether a piece is
    /// monotonic (default 0.125 day). Reversals shorter than this can
    /// still slip through.
    pub speed_step_days: f64,
    /// Maximum bisection iterations per root (default 60).
    pub max_iterations: u32,
    /// Bisection stops when the bracket is shorter than this (default 1e-7 day).
    pub convergence_days: f64,
    /// A root is accepted only if the aspect residual there is below this
    /// (default 1e-4°).
    pub tolerance_deg: f64,
}

impl Default for RefineConfig {
    fn default() -> Self {
        Self {
            max_piece_days: 1.0,
            min_piece_days: 1e-3,
            speed_step_days: 0.125,
            max_iterations: 60,
            convergence_days: 1e-7,
            tolerance_deg: 1e-4,
        }
    }
}

impl RefineConfig {
    pub fn validate(&self) -> Result<(), &'static str> {
        if !self.max_piece_days.is_finite() || self.max_piece_days <= 0.0 {
            return Err("max_piece_days must be positive");
        }
        if !self.min_piece_days.is_finite()
            || self.min_piece_days <= 0.0
            || self.min_piece_days > self.max_piece_days
        {
            return Err("min_piece_days must be positive and at most max_piece_days");
        }
        if !self.speed_step_days.is_finite() || self.speed_step_days <= 0.0 {
            return Err("speed_step_days must be positive");
        }
        if self.max_iterations == 0 {
            return Err("max_iterations must be > 0");
        }
        if !self.convergence_days.is_finite() || self.convergence_days <= 0.0 {
            return Err("convergence_days must be positive");
        }
        if !self.tolerance_deg.is_finite() || self.tolerance_deg <= 0.0 {
            return Err("tolerance_deg must be positive");
        }
        Ok(())
    }
}

/// Coarse-scan parameters for next/previous exact-aspect search.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExactSearchConfig {
    /// Coarse bracket length in days (default 1).
    pub step_days: f64,
    /// Give up after this many days (default 800).
    pub max_window_days: f64,
    pub refine: RefineConfig,
}

impl Default for ExactSearchConfig {
    fn default() -> Self {
        Self {
            step_days: 1.0,
            max_window_days: 800.0,
            refine: RefineConfig::default(),
        }
    }
}

impl ExactSearchConfig {
    pub fn validate(&self) -> Result<(), &'static str> {
        if !self.step_days.is_finite() || self.step_days <= 0.0 {
            return Err("step_days must be positive");
        }
        if !self.max_window_days.is_finite() || self.max_window_days < self.step_days {
            return Err("max_window_days must be at least step_days");
        }
        self.refine.validate()
    }
}

/// A refined exact aspect between a moving body and a fixed longitude.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ExactAspect {
    /// Instant of exactness, Julian Day UT.
    pub jd_ut: f64,
    pub body: Body,
    pub aspect: AspectKind,
    /// Fixed target longitude in degrees.
    pub target_deg: f64,
    /// Longitude of the moving body at `jd_ut`.
    pub longitude_deg: f64,
    /// Speed of the moving body at `jd_ut`; negative when retrograde.
    pub speed_deg_per_day: f64,
}
