//! Zodiac signs and their qualities.
//!
//! The ecliptic is divided into 12 signs of 30 degrees starting at 0° Aries.
//! Element cycles every 4 signs (Fire, Earth, Air, Water), modality every 3
//! (Cardinal, Fixed, Mutable), polarity every 2 (Masculine, Feminine).

use serde::{Deserialize, Serialize};

use crate::angle::normalize_degrees;

/// The 12 tropical zodiac signs, starting from Aries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Sign {
    Aries,
    Taurus,
    Gemini,
    Cancer,
    Leo,
    Virgo,
    Libra,
    Scorpio,
    Sagittarius,
    Capricorn,
    Aquarius,
    Pisces,
}

/// All 12 signs in zodiac order (0 = Aries, 11 = Pisces).
pub const ALL_SIGNS: [Sign; 12] = [
    Sign::Aries,
    Sign::Taurus,
    Sign::Gemini,
    Sign::Cancer,
    Sign::Leo,
    Sign::Virgo,
    Sign::Libra,
    Sign::Scorpio,
    Sign::Sagittarius,
    Sign::Capricorn,
    Sign::Aquarius,
    Sign::Pisces,
];

/// Classical element, one of four buckets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Element {
    Fire,
    Earth,
    Air,
    Water,
}

/// Modality (quadruplicity), one of three buckets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Modality {
    Cardinal,
    Fixed,
    Mutable,
}

/// Polarity: Fire and Air signs are masculine, Earth and Water feminine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Polarity {
    Masculine,
    Feminine,
}

impl Element {
    pub const ALL: [Element; 4] = [Self::Fire, Self::Earth, Self::Air, Self::Water];

    /// 0-based bucket index (Fire=0 .. Water=3).
    pub const fn index(self) -> usize {
        self as usize
    }
}

impl Modality {
    pub const ALL: [Modality; 3] = [Self::Cardinal, Self::Fixed, Self::Mutable];

    pub const fn index(self) -> usize {
        self as usize
    }
}

impl Polarity {
    pub const ALL: [Polarity; 2] = [Self::Masculine, Self::Feminine];

    pub const fn index(self) -> usize {
        self as usize
    }
}

/// Sign index 0..11 of an ecliptic longitude.
pub fn zodiac_sign_index(longitude_deg: f64) -> u8 {
    let idx = (normalize_degrees(longitude_deg) / 30.0).floor() as u8;
    idx.min(11)
}

impl Sign {
    /// Sign containing the given ecliptic longitude.
    pub fn from_longitude(longitude_deg: f64) -> Self {
        ALL_SIGNS[zodiac_sign_index(longitude_deg) as usize]
    }

    /// Sign from its 0-based index. Indices wrap modulo 12.
    pub const fn from_index(index: u8) -> Self {
        ALL_SIGNS[(index % 12) as usize]
    }

    /// 0-based index (Aries=0 .. Pisces=11).
    pub const fn index(self) -> u8 {
        self as u8
    }

    /// Longitude of the first degree of the sign.
    pub const fn start_longitude(self) -> f64 {
        self.index() as f64 * 30.0
    }

    pub const fn name(self) -> &'static str {
        match self {
            Self::Aries => "Aries",
            Self::Taurus => "Taurus",
            Self::Gemini => "Gemini",
            Self::Cancer => "Cancer",
            Self::Leo => "Leo",
            Self::Virgo => "Virgo",
            Self::Libra => "Libra",
            Self::Scorpio => "Scorpio",
            Self::Sagittarius => "Sagittarius",
            Self::Capricorn => "Capricorn",
            Self::Aquarius => "Aquarius",
            Self::Pisces => "Pisces",
        }
    }

    /// Three-letter abbreviation used in compact position strings.
    pub const fn abbreviation(self) -> &'static str {
        match self {
            Self::Aries => "Ari",
            Self::Taurus => "Tau",
            Self::Gemini => "Gem",
            Self::Cancer => "Cnc",
            Self::Leo => "Leo",
            Self::Virgo => "Vir",
            Self::Libra => "Lib",
            Self::Scorpio => "Sco",
            Self::Sagittarius => "Sgr",
            Self::Capricorn => "Cap",
            Self::Aquarius => "Aqr",
            Self::Pisces => "Psc",
        }
    }

    pub const fn element(self) -> Element {
        Element::ALL[(self.index() % 4) as usize]
    }

    pub const fn modality(self) -> Modality {
        Modality::ALL[(self.index() % 3) as usize]
    }

    pub const fn polarity(self) -> Polarity {
        Polarity::ALL[(self.index() % 2) as usize]
    }
}

impl std::fmt::Display for Sign {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}
