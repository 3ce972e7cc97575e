//! The seven classical aspects and the single-aspect match test.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::angle::minimal_angular_distance;

/// A named angular separation between two ecliptic positions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AspectKind {
    Conjunction,
    SemiSextile,
    Sextile,
    Square,
    Trine,
    Quincunx,
    Opposition,
}

/// All aspects in ascending angle order.
pub const ALL_ASPECTS: [AspectKind; 7] = [
    AspectKind::Conjunction,
    AspectKind::SemiSextile,
    AspectKind::Sextile,
    AspectKind::Square,
    AspectKind::Trine,
    AspectKind::Quincunx,
    AspectKind::Opposition,
];

impl AspectKind {
    pub const fn all() -> &'static [AspectKind; 7] {
        &ALL_ASPECTS
    }

    /// Exact separation in degrees.
    pub const fn angle(self) -> f64 {
        match self {
            Self::Conjunction => 0.0,
            Self::SemiSextile => 30.0,
            Self::Sextile => 60.0,
            Self::Square => 90.0,
            Self::Trine => 120.0,
            Self::Quincunx => 150.0,
            Self::Opposition => 180.0,
        }
    }

    /// 0-based index in [`ALL_ASPECTS`].
    pub const fn index(self) -> usize {
        self as usize
    }

    pub const fn name(self) -> &'static str {
        match self {
            Self::Conjunction => "Conjunction",
            Self::SemiSextile => "Semi-sextile",
            Self::Sextile => "Sextile",
            Self::Square => "Square",
            Self::Trine => "Trine",
            Self::Quincunx => "Quincunx",
            Self::Opposition => "Opposition",
        }
    }

    pub const fn symbol(self) -> char {
        match self {
            Self::Conjunction => '☌',
            Self::SemiSextile => '⚺',
            Self::Sextile => '⚹',
            Self::Square => '□',
            Self::Trine => '△',
            Self::Quincunx => '⚻',
            Self::Opposition => '☍',
        }
    }

    /// Parse a case-insensitive name such as `"square"` or `"semi-sextile"`.
    pub fn from_name(name: &str) -> Option<Self> {
        let key: String = name
            .chars()
            .filter(|c| c.is_ascii_alphanumeric())
            .map(|c| c.to_ascii_lowercase())
            .collect();
        ALL_ASPECTS.into_iter().find(|a| {
            a.name()
                .chars()
                .filter(|c| c.is_ascii_alphanumeric())
                .map(|c| c.to_ascii_lowercase())
                .eq(key.chars())
        })
    }
}

impl fmt::Display for AspectKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Outcome of testing one aspect between two positions.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AspectMatch {
    pub matched: bool,
    /// Unsigned separation in [0, 180].
    pub separation: f64,
    /// `separation - aspect_angle`. Negative inside the exact angle.
    pub residual: f64,
}

/// Test whether `pos1` and `pos2` form the aspect `aspect_angle` within `orb`.
///
/// The separation is `|minimal_angular_distance(pos1, pos2)|`; the match holds
/// iff `|separation - aspect_angle| <= orb`.
pub fn match_aspect(pos1: f64, pos2: f64, aspect_angle: f64, orb: f64) -> AspectMatch {
    let separation = minimal_angular_distance(pos1, pos2).abs();
    let residual = separation - aspect_angle;
    AspectMatch {
        matched: residual.abs() <= orb,
        separation,
        residual,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn square_within_orb() {
        let m = match_aspect(0.0, 88.0, 90.0, 5.0);
        assert!(m.matched);
        assert!((m.residual + 2.0).abs() < 1e-12);
    }

    #[test]
    fn square_outside_orb() {
        assert!(!match_aspect(0.0, 80.0, 90.0, 5.0).matched);
    }

    #[test]
    fn conjunction_across_seam() {
        let m = match_aspect(358.0, 3.0, 0.0, 8.0);
        assert!(m.matched);
        assert!((m.separation - 5.0).abs() < 1e-12);
    }

    #[test]
    fn opposition_residual_is_non_positive() {
        let m = match_aspect(10.0, 185.0, 180.0, 8.0);
        assert!(m.matched);
        assert!((m.residual + 5.0).abs() < 1e-12);
    }

    #[test]
    fn orb_boundary_is_inclusive() {
        assert!(match_aspect(0.0, 65.0, 60.0, 5.0).matched);
    }

    #[test]
    fn names_parse_back() {
        for a in ALL_ASPECTS {
            assert_eq!(AspectKind::from_name(a.name()), Some(a));
        }
        assert_eq!(AspectKind::from_name("semi_sextile"), Some(AspectKind::SemiSextile));
        assert_eq!(AspectKind::from_name("sesquisquare"), None);
    }

    #[test]
    fn angles_ascend() {
        let angles: Vec<f64> = ALL_ASPECTS.iter().map(|a| a.angle()).collect();
        assert!(angles.windows(2).all(|w| w[0] < w[1]));
    }
}
