//! Orb (aspect tolerance) configuration.
//!
//! Lookup order for a body pair: an explicit [`PairOrb`] override, then the
//! per-aspect default adjusted for luminaries and minor bodies.

use horo_core::Body;
use horo_math::{ALL_ASPECTS, AspectKind};
use serde::{Deserialize, Serialize};

/// Largest orb accepted anywhere, degrees.
pub const MAX_ORB_DEG: f64 = 30.0;

/// Explicit orb for one unordered body pair and aspect.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PairOrb {
    pub first: Body,
    pub second: Body,
    pub aspect: AspectKind,
    pub orb_deg: f64,
}

impl PairOrb {
    fn matches(&self, a: Body, b: Body, aspect: AspectKind) -> bool {
        self.aspect == aspect
            && ((self.first == a && self.second == b) || (self.first == b && self.second == a))
    }
}

/// Orbs for body-body and body-cusp aspects.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OrbConfig {
    /// Body-body default per aspect, indexed by [`AspectKind::index`].
    pub default_orbs: [f64; 7],
    /// Body-to-house-cusp default per aspect.
    pub cusp_orbs: [f64; 7],
    /// Added to the default when either body is the Sun or Moon.
    pub luminary_bonus_deg: f64,
    /// Subtracted from the default when either body is the node, Lilith or
    /// an asteroid. The result never drops below 1°.
    pub minor_body_penalty_deg: f64,
    pub pair_overrides: Vec<PairOrb>,
}

impl Default for OrbConfig {
    fn default() -> Self {
        Self::natal()
    }
}

impl OrbConfig {
    /// Natal orbs: 10/2/6/8/8/3/10 with +2° for luminaries and −2° for
    /// minor bodies.
    pub fn natal() -> Self {
        Self {
            default_orbs: [10.0, 2.0, 6.0, 8.0, 8.0, 3.0, 10.0],
            cusp_orbs: [2.0, 1.0, 1.5, 2.0, 2.0, 1.0, 2.0],
            luminary_bonus_deg: 2.0,
            minor_body_penalty_deg: 2.0,
            pair_overrides: Vec::new(),
        }
    }

    /// Tight orbs for transit scans, without body-class adjustment.
    pub fn transit() -> Self {
        Self {
            default_orbs: [1.0; 7],
            cusp_orbs: [0.5; 7],
            luminary_bonus_deg: 0.0,
            minor_body_penalty_deg: 0.0,
            pair_overrides: Vec::new(),
        }
    }

    /// Same orb for every aspect and body pair.
    pub fn uniform(orb_deg: f64) -> Self {
        Self {
            default_orbs: [orb_deg; 7],
            cusp_orbs: [orb_deg; 7],
            luminary_bonus_deg: 0.0,
            minor_body_penalty_deg: 0.0,
            pair_overrides: Vec::new(),
        }
    }

    pub fn with_override(
        mut self,
        first: Body,
        second: Body,
        aspect: AspectKind,
        orb_deg: f64,
    ) -> Self {
        self.pair_overrides.push(PairOrb {
            first,
            second,
            aspect,
            orb_deg,
        });
        self
    }

    /// Orb for `aspect` between bodies `a` and `b` (order irrelevant).
    pub fn orb(&self, a: Body, b: Body, aspect: AspectKind) -> f64 {
        // later overrides win
        if let Some(o) = self.pair_overrides.iter().rev().find(|o| o.matches(a, b, aspect)) {
            return o.orb_deg;
        }
        let base = self.default_orbs[aspect.index()];
        let mut orb = base;
        if is_luminary(a) || is_luminary(b) {
            orb += self.luminary_bonus_deg;
        }
        if self.minor_body_penalty_deg > 0.0 && (is_minor(a) || is_minor(b)) {
            orb = (orb - self.minor_body_penalty_deg).max(base.min(1.0));
        }
        orb
    }

    /// Orb for `aspect` between a body and a house cusp.
    pub fn cusp_orb(&self, aspect: AspectKind) -> f64 {
        self.cusp_orbs[aspect.index()]
    }

    /// Largest orb any lookup can return.
    pub fn max_orb(&self) -> f64 {
        let defaults = self
            .default_orbs
            .iter()
            .map(|o| o + self.luminary_bonus_deg.max(0.0));
        let overrides = self.pair_overrides.iter().map(|o| o.orb_deg);
        defaults
            .chain(self.cusp_orbs.iter().copied())
            .chain(overrides)
            .fold(0.0, f64::max)
    }

    pub fn validate(&self) -> Result<(), &'static str> {
        let valid = |o: f64| o.is_finite() && (0.0..=MAX_ORB_DEG).contains(&o);
        if !self.default_orbs.iter().all(|&o| valid(o)) {
            return Err("default orbs must be in [0, 30] degrees");
        }
        if !self.cusp_orbs.iter().all(|&o| valid(o)) {
            return Err("cusp orbs must be in [0, 30] degrees");
        }
        if !valid(self.luminary_bonus_deg) || !valid(self.minor_body_penalty_deg) {
            return Err("orb adjustments must be in [0, 30] degrees");
        }
        if !self.pair_overrides.iter().all(|o| valid(o.orb_deg)) {
            return Err("pair override orbs must be in [0, 30] degrees");
        }
        Ok(())
    }

    /// Iterate `(aspect, default orb)` in angle order.
    pub fn defaults(&self) -> impl Iterator<Item = (AspectKind, f64)> + '_ {
        ALL_ASPECTS.iter().map(|&k| (k, self.default_orbs[k.index()]))
    }
}

fn is_luminary(body: Body) -> bool {
    matches!(body, Body::Sun | Body::Moon)
}

fn is_minor(body: Body) -> bool {
    body >= Body::TrueNode
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn natal_defaults_with_adjustments() {
        let c = OrbConfig::natal();
        assert_eq!(c.orb(Body::Mars, Body::Venus, AspectKind::Square), 8.0);
        assert_eq!(c.orb(Body::Sun, Body::Venus, AspectKind::Square), 10.0);
        assert_eq!(c.orb(Body::Mars, Body::Ceres, AspectKind::Trine), 6.0);
        // penalty floors at 1°
        assert_eq!(c.orb(Body::Mars, Body::Ceres, AspectKind::SemiSextile), 1.0);
    }

    #[test]
    fn override_is_unordered() {
        let c =
            OrbConfig::natal().with_override(Body::Moon, Body::Saturn, AspectKind::Opposition, 4.0);
        assert_eq!(c.orb(Body::Saturn, Body::Moon, AspectKind::Opposition), 4.0);
        assert_eq!(c.orb(Body::Saturn, Body::Moon, AspectKind::Square), 10.0);
    }

    #[test]
    fn max_orb_covers_bonus() {
        assert_eq!(OrbConfig::natal().max_orb(), 12.0);
        assert_eq!(OrbConfig::transit().max_orb(), 1.0);
    }

    #[test]
    fn validate_rejects_negative() {
        let mut c = OrbConfig::natal();
        c.cusp_orbs[3] = -1.0;
        assert!(c.validate().is_err());
        assert!(OrbConfig::natal().validate().is_ok());
    }

    #[test]
    fn partial_document_fills_defaults() {
        let c: OrbConfig = serde_json::from_str(r#"{"luminary_bonus_deg": 0.0}"#).unwrap();
        assert_eq!(c.default_orbs, OrbConfig::natal().default_orbs);
        assert_eq!(c.luminary_bonus_deg, 0.0);
    }
}
