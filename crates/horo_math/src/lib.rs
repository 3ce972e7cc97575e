//! Angle arithmetic for horoscope charts.
//!
//! Everything here is a pure function of its arguments:
//! - Angle reduction and wrap-safe differences (`angle`)
//! - Degrees-minutes-seconds and `GG.MMSS` notation (`sexagesimal`)
//! - Zodiac signs with their element, modality and polarity (`zodiac`)
//! - The seven classical aspects and the single-aspect match test (`aspect`)

pub mod angle;
pub mod aspect;
pub mod sexagesimal;
pub mod zodiac;

pub use angle::{
    angle_of, arc_forward, minimal_angular_distance, normalize_degrees, normalize_pm180,
    normalize_radians, polar_to_rect, rect_to_polar, rect_to_spherical,
};
pub use aspect::{ALL_ASPECTS, AspectKind, AspectMatch, match_aspect};
pub use sexagesimal::{
    Sexagesimal, SignPosition, decimal_format_to_degrees, degrees_to_decimal_format,
    degrees_to_sexagesimal,
};
pub use zodiac::{ALL_SIGNS, Element, Modality, Polarity, Sign, zodiac_sign_index};
