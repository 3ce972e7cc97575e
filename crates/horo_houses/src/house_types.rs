//! Types for house-cusp computation.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::angles::Angles;
use crate::error::HouseError;

/// The 14 supported house division systems.
///
/// Discriminants are the stable numeric codes used by stored chart settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HouseSystem {
    /// Koch (birthplace): oblique ascension of the MC degree divided in time.
    Koch = 0,
    /// Placidus: semi-arcs trisected in time, solved iteratively.
    Placidus = 1,
    /// Equal houses of 30 degrees from the Ascendant.
    Equal = 2,
    /// Equal houses of 30 degrees with the MC on the 10th cusp.
    EqualMidheaven = 3,
    /// Whole signs: house 1 is the sign containing the Ascendant.
    WholeSign = 4,
    /// Topocentric (Polich-Page): poles of tan φ/3 and tan φ/1.5.
    Topocentric = 5,
    /// Campanus: prime vertical divided in 30-degree arcs.
    Campanus = 6,
    /// Meridian (axial rotation): equator divided from the RAMC, no latitude.
    Meridian = 7,
    /// Regiomontanus: equator divided in 30-degree arcs, projected by horizon poles.
    Regiomontanus = 8,
    /// Porphyry: each quadrant trisected along the ecliptic.
    Porphyry = 9,
    /// Porphyry variant with quadrant widths graded `30±d, 30±2d, 30±d`.
    PorphyryNeo = 10,
    /// Morinus: equator divided from the RAMC, projected through the ecliptic poles.
    Morinus = 11,
    /// Alcabitius: Ascendant's semi-arcs divided on the equator.
    Alcabitius = 12,
    /// Placeholder: equal 30-degree cusps starting at 0° Aries.
    Null = 13,
}

/// All 14 house systems in code order.
pub const ALL_HOUSE_SYSTEMS: [HouseSystem; 14] = [
    HouseSystem::Koch,
    HouseSystem::Placidus,
    HouseSystem::Equal,
    HouseSystem::EqualMidheaven,
    HouseSystem::WholeSign,
    HouseSystem::Topocentric,
    HouseSystem::Campanus,
    HouseSystem::Meridian,
    HouseSystem::Regiomontanus,
    HouseSystem::Porphyry,
    HouseSystem::PorphyryNeo,
    HouseSystem::Morinus,
    HouseSystem::Alcabitius,
    HouseSystem::Null,
];

impl HouseSystem {
    pub const fn all() -> &'static [HouseSystem; 14] {
        &ALL_HOUSE_SYSTEMS
    }

    pub const fn code(self) -> i32 {
        self as i32
    }

    pub fn from_code(code: i32) -> Result<Self, HouseError> {
        usize::try_from(code)
            .ok()
            .and_then(|i| ALL_HOUSE_SYSTEMS.get(i).copied())
            .ok_or(HouseError::UnknownCode(code))
    }

    pub const fn name(self) -> &'static str {
        match self {
            Self::Koch => "Koch",
            Self::Placidus => "Placidus",
            Self::Equal => "Equal",
            Self::EqualMidheaven => "Equal (MC)",
            Self::WholeSign => "Whole Sign",
            Self::Topocentric => "Topocentric",
            Self::Campanus => "Campanus",
            Self::Meridian => "Meridian",
            Self::Regiomontanus => "Regiomontanus",
            Self::Porphyry => "Porphyry",
            Self::PorphyryNeo => "Porphyry Neo",
            Self::Morinus => "Morinus",
            Self::Alcabitius => "Alcabitius",
            Self::Null => "Null",
        }
    }

    /// Whether the system divides diurnal/nocturnal semi-arcs and therefore
    /// has no solution inside the polar circle.
    pub const fn semi_arc_based(self) -> bool {
        matches!(
            self,
            Self::Placidus | Self::Koch | Self::Topocentric | Self::Alcabitius
        )
    }

    /// Whether every house spans exactly 30 degrees.
    pub const fn is_equal_division(self) -> bool {
        matches!(
            self,
            Self::Equal | Self::EqualMidheaven | Self::WholeSign | Self::Null
        )
    }
}

impl fmt::Display for HouseSystem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for HouseSystem {
    type Err = HouseError;

    /// Accepts a numeric code or a case-insensitive name; spaces, dashes and
    /// underscores are ignored (`"whole-sign"`, `"equal_mc"`).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if let Ok(code) = trimmed.parse::<i32>() {
            return Self::from_code(code);
        }
        let key: String = trimmed
            .chars()
            .filter(|c| c.is_ascii_alphanumeric())
            .map(|c| c.to_ascii_lowercase())
            .collect();
        let system = match key.as_str() {
            "koch" => Self::Koch,
            "placidus" => Self::Placidus,
            "equal" | "equalasc" | "equalascendant" => Self::Equal,
            "equalmc" | "equalmidheaven" => Self::EqualMidheaven,
            "whole" | "wholesign" => Self::WholeSign,
            "topocentric" | "polichpage" => Self::Topocentric,
            "campanus" => Self::Campanus,
            "meridian" | "axial" | "axialrotation" => Self::Meridian,
            "regiomontanus" => Self::Regiomontanus,
            "porphyry" => Self::Porphyry,
            "porphyryneo" => Self::PorphyryNeo,
            "morinus" => Self::Morinus,
            "alcabitius" | "alcabitus" => Self::Alcabitius,
            "null" | "none" => Self::Null,
            _ => return Err(HouseError::UnknownName(trimmed.to_string())),
        };
        Ok(system)
    }
}

/// Input shared by every house system.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HouseInput {
    /// Local sidereal time as right ascension of the meridian, degrees.
    pub ramc_deg: f64,
    /// Obliquity of the ecliptic, degrees.
    pub obliquity_deg: f64,
    /// Geographic latitude, degrees north positive.
    pub latitude_deg: f64,
    /// Ascendant longitude, degrees.
    pub ascendant_deg: f64,
    /// Midheaven longitude, degrees.
    pub midheaven_deg: f64,
}

impl HouseInput {
    /// Build the input from RAMC, deriving Ascendant and Midheaven.
    pub fn from_ramc(ramc_deg: f64, obliquity_deg: f64, latitude_deg: f64) -> Self {
        let angles = Angles::from_ramc(ramc_deg, obliquity_deg, latitude_deg);
        Self {
            ramc_deg,
            obliquity_deg,
            latitude_deg,
            ascendant_deg: angles.ascendant_deg,
            midheaven_deg: angles.midheaven_deg,
        }
    }

    /// Inside the polar circle some ecliptic degrees never rise or set.
    pub fn is_polar(&self) -> bool {
        self.latitude_deg.abs() > 90.0 - self.obliquity_deg.abs()
    }
}

/// How the cusps of a chart were obtained.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum HouseStatus {
    /// The requested system was computed as is.
    Computed,
    /// Latitude inside the polar circle; Equal houses substituted.
    PolarFallback { requested: HouseSystem },
    /// The requested system produced a non-finite cusp; Equal houses substituted.
    DegenerateFallback { requested: HouseSystem },
}

impl HouseStatus {
    pub const fn is_fallback(self) -> bool {
        !matches!(self, Self::Computed)
    }
}

/// Twelve cusps in house order and how they were produced.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HouseCusps {
    /// Cusp longitudes in [0, 360); index 0 is the first house.
    pub cusps: [f64; 12],
    /// System actually used (differs from the request after a fallback).
    pub system: HouseSystem,
    pub status: HouseStatus,
}

impl HouseCusps {
    /// Cusp of a 1-based house number.
    pub fn cusp(&self, house: usize) -> Option<f64> {
        house.checked_sub(1).and_then(|i| self.cusps.get(i)).copied()
    }
}
