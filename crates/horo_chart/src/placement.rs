//! House placement and quality tallies.

use horo_math::{Element, Modality, Polarity, Sign, arc_forward};
use serde::{Deserialize, Serialize};

/// 0-based house containing `longitude_deg`.
///
/// House `i` spans `[cusps[i], cusps[i+1])` going forward, wrapping at 360°.
/// If no interval contains the longitude (non-monotonic cusps), the house
/// whose cusp most closely precedes it is returned.
pub fn house_of(longitude_deg: f64, cusps: &[f64; 12]) -> u8 {
    for i in 0..12 {
        let width = arc_forward(cusps[i], cusps[(i + 1) % 12]);
        if arc_forward(cusps[i], longitude_deg) < width {
            return i as u8;
        }
    }
    let mut best = 0;
    let mut best_arc = f64::INFINITY;
    for (i, &c) in cusps.iter().enumerate() {
        let arc = arc_forward(c, longitude_deg);
        if arc < best_arc {
            best_arc = arc;
            best = i;
        }
    }
    best as u8
}

/// Counts of bodies per element, modality and polarity.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct QualityTally {
    /// Fire, Earth, Air, Water.
    pub elements: [u32; 4],
    /// Cardinal, Fixed, Mutable.
    pub modalities: [u32; 3],
    /// Masculine, Feminine.
    pub polarities: [u32; 2],
}

impl QualityTally {
    pub fn from_signs(signs: impl IntoIterator<Item = Sign>) -> Self {
        let mut tally = Self::default();
        for sign in signs {
            tally.add(sign);
        }
        tally
    }

    pub fn add(&mut self, sign: Sign) {
        self.elements[sign.element().index()] += 1;
        self.modalities[sign.modality().index()] += 1;
        self.polarities[sign.polarity().index()] += 1;
    }

    pub fn element(&self, e: Element) -> u32 {
        self.elements[e.index()]
    }

    pub fn modality(&self, m: Modality) -> u32 {
        self.modalities[m.index()]
    }

    pub fn polarity(&self, p: Polarity) -> u32 {
        self.polarities[p.index()]
    }

    /// Number of bodies counted.
    pub fn total(&self) -> u32 {
        self.elements.iter().sum()
    }

    /// Element with the highest count; ties go to the earlier element.
    pub fn dominant_element(&self) -> Option<Element> {
        dominant(&self.elements).map(|i| Element::ALL[i])
    }

    pub fn dominant_modality(&self) -> Option<Modality> {
        dominant(&self.modalities).map(|i| Modality::ALL[i])
    }
}

fn dominant(counts: &[u32]) -> Option<usize> {
    let max = *counts.iter().max()?;
    if max == 0 {
        return None;
    }
    counts.iter().position(|&c| c == max)
}
