//! Pairwise aspect table.

use horo_core::Body;
use horo_math::{ALL_ASPECTS, AspectKind, match_aspect, minimal_angular_distance};
use serde::{Deserialize, Serialize};

use crate::chart_types::BodyState;
use crate::orbs::OrbConfig;

/// A matched aspect.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AspectHit {
    pub kind: AspectKind,
    /// `separation - angle`; negative inside the exact angle.
    pub residual_deg: f64,
    /// Orb the match was tested against.
    pub orb_deg: f64,
}

/// One unordered body pair, `first` before `second` in chart order.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AspectEntry {
    pub first: Body,
    pub second: Body,
    /// Unsigned separation in [0, 180], present even without a match.
    pub separation_deg: f64,
    pub hit: Option<AspectHit>,
}

/// All pair entries of one chart.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AspectTable {
    pub entries: Vec<AspectEntry>,
}

impl AspectTable {
    /// Entry for a pair in either order.
    pub fn get(&self, a: Body, b: Body) -> Option<&AspectEntry> {
        self.entries
            .iter()
            .find(|e| (e.first == a && e.second == b) || (e.first == b && e.second == a))
    }

    /// Aspect between a pair, if any matched.
    pub fn aspect(&self, a: Body, b: Body) -> Option<AspectKind> {
        self.get(a, b).and_then(|e| e.hit).map(|h| h.kind)
    }

    /// Entries with a matched aspect.
    pub fn hits(&self) -> impl Iterator<Item = (&AspectEntry, AspectHit)> {
        self.entries.iter().filter_map(|e| e.hit.map(|h| (e, h)))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Best aspect between two longitudes.
///
/// Every aspect is tested with its orb from `orb_for`; among the matches the
/// smallest |residual| wins and ties keep the lower angle. Returns the
/// unsigned separation and the winning aspect, if any.
pub fn best_aspect(
    pos1: f64,
    pos2: f64,
    mut orb_for: impl FnMut(AspectKind) -> f64,
) -> (f64, Option<AspectHit>) {
    let separation = minimal_angular_distance(pos1, pos2).abs();
    let mut best: Option<AspectHit> = None;
    for kind in ALL_ASPECTS {
        let orb = orb_for(kind);
        let m = match_aspect(pos1, pos2, kind.angle(), orb);
        if !m.matched {
            continue;
        }
        let better = best.is_none_or(|b| m.residual.abs() < b.residual_deg.abs());
        if better {
            best = Some(AspectHit {
                kind,
                residual_deg: m.residual,
                orb_deg: orb,
            });
        }
    }
    (separation, best)
}

/// Aspect table over every unordered pair of available bodies.
///
/// Bodies whose ephemeris lookup failed are left out of the table.
pub fn compute_aspect_table(bodies: &[BodyState], orbs: &OrbConfig) -> AspectTable {
    let available: Vec<&BodyState> = bodies.iter().filter(|b| b.available).collect();
    let mut entries = Vec::with_capacity(available.len() * available.len().saturating_sub(1) / 2);
    for (i, a) in available.iter().enumerate() {
        for b in &available[i + 1..] {
            let (separation_deg, hit) = best_aspect(a.longitude_deg, b.longitude_deg, |k| {
                orbs.orb(a.body, b.body, k)
            });
            entries.push(AspectEntry {
                first: a.body,
                second: b.body,
                separation_deg,
                hit,
            });
        }
    }
    AspectTable { entries }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn picks_smallest_residual() {
        // 65° is within 6° of a sextile and 25° short of a square.
        let (sep, hit) = best_aspect(10.0, 75.0, |_| 6.0);
        assert!((sep - 65.0).abs() < 1e-12);
        let hit = hit.unwrap();
        assert_eq!(hit.kind, AspectKind::Sextile);
        assert!((hit.residual_deg - 5.0).abs() < 1e-12);
    }

    #[test]
    fn large_orbs_prefer_closer_angle() {
        // 100° matches square (10) and trine (-20) with 25° orbs.
        let (_, hit) = best_aspect(0.0, 100.0, |_| 25.0);
        assert_eq!(hit.unwrap().kind, AspectKind::Square);
    }

    #[test]
    fn tie_keeps_lower_angle() {
        // 45° sits 15° from both the semisextile and the sextile.
        let (_, hit) = best_aspect(0.0, 45.0, |_| 15.0);
        assert_eq!(hit.unwrap().kind, AspectKind::SemiSextile);
    }

    #[test]
    fn no_hit_keeps_separation() {
        let (sep, hit) = best_aspect(350.0, 30.0, |_| 1.0);
        assert!((sep - 40.0).abs() < 1e-12);
        assert!(hit.is_none());
    }
}
