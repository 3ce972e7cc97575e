//! Exact-aspect refinement and next/previous exact-aspect search.
//!
//! An aspect of angle `A` between a moving longitude `p(t)` and a fixed
//! longitude `n` is exact when `p − n ≡ ±A (mod 360)`. Each branch is the
//! signed function `g(t) = pm180(p(t) − n ∓ A)`, which is continuous and
//! has a simple zero at every exact instant while `p` moves monotonically.
//!
//! Algorithm:
//! 1. Cut the bracket into pieces of at most `max_piece_days`.
//! 2. If the body's speed changes sign at any of the piece's sample points
//!    (a station), halve the piece until the halves are monotonic or `min_piece_days` short. A
//!    retrograde loop can cross the same exact point two or three times
//!    inside one coarse step; re-bracketing isolates each crossing.
//! 3. On each piece, a genuine sign change of `g` is bisected.
//! 4. A root is kept only if `|g|` there is within `tolerance_deg`.

use horo_core::{Body, EphemerisProvider};
use horo_math::{AspectKind, normalize_pm180};

use crate::error::SearchError;
use crate::exact_types::{ExactAspect, ExactSearchConfig, RefineConfig, SearchDirection};

/// Branch offsets `±A` for an aspect; one branch for 0° and 180°.
fn branch_offsets(aspect: AspectKind) -> Vec<f64> {
    let a = aspect.angle();
    if a == 0.0 || a == 180.0 {
        vec![a]
    } else {
        vec![a, -a]
    }
}

/// A sign change of a wrapped residual, excluding the ±180° jump.
fn is_genuine_crossing(f_a: f64, f_b: f64) -> bool {
    f_a * f_b < 0.0 && (f_a - f_b).abs() < 270.0
}

/// Bisect to find the zero crossing of a scalar function between t_a and t_b.
fn bisect_zero<F>(
    mut t_a: f64,
    mut f_a: f64,
    mut t_b: f64,
    max_iter: u32,
    convergence_days: f64,
    f_at: &F,
) -> Result<f64, SearchError>
where
    F: Fn(f64) -> Result<f64, SearchError>,
{
    for _ in 0..max_iter {
        let t_mid = 0.5 * (t_a + t_b);
        let f_mid = f_at(t_mid)?;

        if f_a * f_mid <= 0.0 {
            t_b = t_mid;
        } else {
            t_a = t_mid;
            f_a = f_mid;
        }

        if (t_b - t_a).abs() < convergence_days {
            break;
        }
    }

    Ok(0.5 * (t_a + t_b))
}

// ---------------------------------------------------------------------------
// Root finding
// ---------------------------------------------------------------------------

struct Roots<'a, P> {
    provider: &'a P,
    body: Body,
    target_deg: f64,
    config: &'a RefineConfig,
}

impl<P: EphemerisProvider> Roots<'_, P> {
    fn residual(&self, offset: f64, jd: f64) -> Result<f64, SearchError> {
        let pos = self.provider.body_position(self.body, jd)?;
        Ok(normalize_pm180(pos.longitude_deg - self.target_deg - offset))
    }

    fn speed(&self, jd: f64) -> Result<f64, SearchError> {
        Ok(self.provider.body_position(self.body, jd)?.speed_deg_per_day)
    }

    /// Speed keeps one strict sign at both ends and at interior points no
    /// more than `speed_step_days` apart.
    fn is_monotonic(&self, a: f64, b: f64) -> Result<bool, SearchError> {
        let n = ((b - a) / self.config.speed_step_days).ceil().max(2.0) as usize;
        let first = self.speed(a)?;
        if first == 0.0 {
            return Ok(false);
        }
        for i in 1..=n {
            let t = if i == n { b } else { a + (b - a) * i as f64 / n as f64 };
            if self.speed(t)? * first <= 0.0 {
                return Ok(false);
            }
        }
        Ok(true)
    }

    fn scan_piece(
        &self,
        t0: f64,
        t1: f64,
        offsets: &[f64],
        roots: &mut Vec<f64>,
    ) -> Result<(), SearchError> {
        let mut stack = vec![(t0, t1)];
        while let Some((a, b)) = stack.pop() {
            if b - a > self.config.min_piece_days && !self.is_monotonic(a, b)? {
                let mid = 0.5 * (a + b);
                stack.push((mid, b));
                stack.push((a, mid));
                continue;
            }
            for &offset in offsets {
                let f_a = self.residual(offset, a)?;
                let f_b = self.residual(offset, b)?;
                if f_a == 0.0 {
                    roots.push(a);
                } else if f_b == 0.0 {
                    roots.push(b);
                } else if is_genuine_crossing(f_a, f_b) {
                    let g = |t: f64| self.residual(offset, t);
                    let t = bisect_zero(
                        a,
                        f_a,
                        b,
                        self.config.max_iterations,
                        self.config.convergence_days,
                        &g,
                    )?;
                    if g(t)?.abs() <= self.config.tolerance_deg {
                        roots.push(t);
                    } else {
                        log::debug!(
                            "{}: rejected non-converged root near JD {t:.6}",
                            self.body
                        );
                    }
                }
            }
        }
        Ok(())
    }
}

/// Every exact instant of `aspect` between `body` and the fixed longitude
/// `target_deg` inside `[jd_start, jd_end]`, in chronological order.
pub fn exact_aspect_roots<P: EphemerisProvider>(
    provider: &P,
    body: Body,
    target_deg: f64,
    aspect: AspectKind,
    jd_start: f64,
    jd_end: f64,
    config: &RefineConfig,
) -> Result<Vec<f64>, SearchError> {
    config.validate().map_err(SearchError::InvalidConfig)?;
    if !jd_start.is_finite() || !jd_end.is_finite() || jd_end <= jd_start {
        return Err(SearchError::InvalidConfig("bracket end must be after start"));
    }

    let ctx = Roots {
        provider,
        body,
        target_deg,
        config,
    };
    let offsets = branch_offsets(aspect);
    let pieces = ((jd_end - jd_start) / config.max_piece_days).ceil().max(1.0) as usize;
    let width = (jd_end - jd_start) / pieces as f64;

    let mut roots = Vec::new();
    for i in 0..pieces {
        let t0 = jd_start + i as f64 * width;
        let t1 = if i + 1 == pieces {
            jd_end
        } else {
            jd_start + (i + 1) as f64 * width
        };
        ctx.scan_piece(t0, t1, &offsets, &mut roots)?;
    }

    roots.sort_by(f64::total_cmp);
    let merge = 10.0 * config.convergence_days;
    roots.dedup_by(|later, earlier| (*later - *earlier).abs() < merge);
    Ok(roots)
}

fn exact_at<P: EphemerisProvider>(
    provider: &P,
    body: Body,
    target_deg: f64,
    aspect: AspectKind,
    jd_ut: f64,
) -> Result<ExactAspect, SearchError> {
    let pos = provider.body_position(body, jd_ut)?;
    Ok(ExactAspect {
        jd_ut,
        body,
        aspect,
        target_deg,
        longitude_deg: pos.longitude_deg,
        speed_deg_per_day: pos.speed_deg_per_day,
    })
}

/// Refine the earliest exact instant inside a bracket.
///
/// Returns `Ok(None)` ("not found") when the bracket holds no verified
/// root, e.g. when the body stations before reaching the exact angle.
pub fn refine_exact_aspect<P: EphemerisProvider>(
    provider: &P,
    body: Body,
    target_deg: f64,
    aspect: AspectKind,
    jd_start: f64,
    jd_end: f64,
    config: &RefineConfig,
) -> Result<Option<ExactAspect>, SearchError> {
    let roots = exact_aspect_roots(provider, body, target_deg, aspect, jd_start, jd_end, config)?;
    roots
        .first()
        .map(|&jd| exact_at(provider, body, target_deg, aspect, jd))
        .transpose()
}

// ---------------------------------------------------------------------------
// Next / previous search
// ---------------------------------------------------------------------------

fn find_exact_aspect<P: EphemerisProvider>(
    provider: &P,
    body: Body,
    target_deg: f64,
    aspect: AspectKind,
    jd_start: f64,
    direction: SearchDirection,
    config: &ExactSearchConfig,
) -> Result<Option<ExactAspect>, SearchError> {
    config.validate().map_err(SearchError::InvalidConfig)?;

    let max_steps = (config.max_window_days / config.step_days).ceil() as usize;
    let guard = 10.0 * config.refine.convergence_days;
    let mut t = jd_start;

    for _ in 0..max_steps {
        let (a, b) = match direction {
            SearchDirection::Forward => (t, t + config.step_days),
            SearchDirection::Backward => (t - config.step_days, t),
        };
        let roots = exact_aspect_roots(provider, body, target_deg, aspect, a, b, &config.refine)?;
        let hit = match direction {
            SearchDirection::Forward => roots.into_iter().find(|&r| r > jd_start + guard),
            SearchDirection::Backward => roots.into_iter().rev().find(|&r| r < jd_start - guard),
        };
        if let Some(jd) = hit {
            return exact_at(provider, body, target_deg, aspect, jd).map(Some);
        }
        t = match direction {
            SearchDirection::Forward => b,
            SearchDirection::Backward => a,
        };
    }

    Ok(None)
}

/// Next exact `aspect` after `jd_start`.
pub fn next_exact_aspect<P: EphemerisProvider>(
    provider: &P,
    body: Body,
    target_deg: f64,
    aspect: AspectKind,
    jd_start: f64,
    config: &ExactSearchConfig,
) -> Result<Option<ExactAspect>, SearchError> {
    find_exact_aspect(
        provider,
        body,
        target_deg,
        aspect,
        jd_start,
        SearchDirection::Forward,
        config,
    )
}

/// Previous exact `aspect` before `jd_start`.
pub fn prev_exact_aspect<P: EphemerisProvider>(
    provider: &P,
    body: Body,
    target_deg: f64,
    aspect: AspectKind,
    jd_start: f64,
    config: &ExactSearchConfig,
) -> Result<Option<ExactAspect>, SearchError> {
    find_exact_aspect(
        provider,
        body,
        target_deg,
        aspect,
        jd_start,
        SearchDirection::Backward,
        config,
    )
}
