//! House-cusp algorithms for the 14 systems.
//!
//! Notation inside the formulas: θ = RAMC, ε = obliquity, φ = latitude, all
//! in radians. Quadrant systems put cusp 1 on the Ascendant and cusp 10 on
//! the MC; Meridian, Morinus, Whole Sign and Null do not pin cusp 1 to the
//! Ascendant.
//!
//! Sources: Holden, *The Elements of House Division*; Montenbruck &
//! Pfleger, *Astronomy on the Personal Computer*.

use std::f64::consts::{PI, TAU};

use horo_math::{angle_of, arc_forward, normalize_degrees, normalize_radians};

use crate::house_types::{HouseCusps, HouseInput, HouseStatus, HouseSystem};

/// Iteration cap for the Placidus fixed-point solve.
const PLACIDUS_MAX_ITER: usize = 50;
/// Convergence threshold for the Placidus solve, radians.
const PLACIDUS_TOLERANCE: f64 = 1e-10;

/// Compute the 12 cusps for `system`.
///
/// Never fails: inside the polar circle the semi-arc systems fall back to
/// Equal houses from the Ascendant, and a system producing a non-finite
/// cusp does the same. The substitution is reported in
/// [`HouseCusps::status`].
pub fn compute_houses(system: HouseSystem, input: &HouseInput) -> HouseCusps {
    if system.semi_arc_based() && input.is_polar() {
        log::info!(
            "{system} undefined at latitude {:.4}; using Equal houses",
            input.latitude_deg
        );
        return equal_fallback(input, HouseStatus::PolarFallback { requested: system });
    }

    let raw = match system {
        HouseSystem::Koch => compute_koch(input),
        HouseSystem::Placidus => compute_placidus(input),
        HouseSystem::Equal => compute_equal(input.ascendant_deg),
        HouseSystem::EqualMidheaven => compute_equal(input.midheaven_deg + 90.0),
        HouseSystem::WholeSign => compute_whole_sign(input.ascendant_deg),
        HouseSystem::Topocentric => compute_topocentric(input),
        HouseSystem::Campanus => compute_campanus(input),
        HouseSystem::Meridian => compute_meridian(input),
        HouseSystem::Regiomontanus => compute_regiomontanus(input),
        HouseSystem::Porphyry => compute_porphyry(input.ascendant_deg, input.midheaven_deg),
        HouseSystem::PorphyryNeo => {
            compute_porphyry_neo(input.ascendant_deg, input.midheaven_deg)
        }
        HouseSystem::Morinus => compute_morinus(input),
        HouseSystem::Alcabitius => compute_alcabitius(input),
        HouseSystem::Null => compute_equal(0.0),
    };

    if raw.iter().any(|c| !c.is_finite()) {
        log::warn!(
            "{system} produced a non-finite cusp at latitude {:.4}; using Equal houses",
            input.latitude_deg
        );
        return equal_fallback(input, HouseStatus::DegenerateFallback { requested: system });
    }

    HouseCusps {
        cusps: raw.map(normalize_degrees),
        system,
        status: HouseStatus::Computed,
    }
}

fn equal_fallback(input: &HouseInput, status: HouseStatus) -> HouseCusps {
    HouseCusps {
        cusps: compute_equal(input.ascendant_deg),
        system: HouseSystem::Equal,
        status,
    }
}

// ---------------------------------------------------------------------------
// Shared helpers
// ---------------------------------------------------------------------------

/// House-system input converted to radians.
struct Sphere {
    ramc: f64,
    eps: f64,
    phi: f64,
}

impl Sphere {
    fn new(input: &HouseInput) -> Self {
        Self {
            ramc: input.ramc_deg.to_radians(),
            eps: input.obliquity_deg.to_radians(),
            phi: input.latitude_deg.to_radians(),
        }
    }
}

/// Ecliptic longitude (degrees) of the ecliptic point with right
/// ascension `ra` (radians).
fn ecliptic_from_ra(ra: f64, eps: f64) -> f64 {
    angle_of(ra.cos() * eps.cos(), ra.sin()).to_degrees()
}

/// Cusps 7..12 are the opposites of cusps 1..6.
fn with_opposites(first_six: [f64; 6]) -> [f64; 12] {
    std::array::from_fn(|i| {
        if i < 6 {
            normalize_degrees(first_six[i])
        } else {
            normalize_degrees(first_six[i - 6] + 180.0)
        }
    })
}

/// Offset of 0-based house `i` from the meridian, degrees in (0, 360].
///
/// House 1 lies 90° east of the meridian, house 10 on it.
fn house_offset_deg(i: usize) -> f64 {
    60.0 + 30.0 * (i as f64 + 1.0)
}

// ---------------------------------------------------------------------------
// Equal-division systems
// ---------------------------------------------------------------------------

/// Cusp i = start + 30°·i.
fn compute_equal(start_deg: f64) -> [f64; 12] {
    std::array::from_fn(|i| normalize_degrees(start_deg + 30.0 * i as f64))
}

/// House 1 begins at 0° of the Ascendant's sign.
fn compute_whole_sign(asc_deg: f64) -> [f64; 12] {
    let sign_start = (normalize_degrees(asc_deg) / 30.0).floor() * 30.0;
    compute_equal(sign_start)
}

// ---------------------------------------------------------------------------
// Ecliptic quadrant division
// ---------------------------------------------------------------------------

/// Trisect each quadrant along the ecliptic.
fn compute_porphyry(asc_deg: f64, mc_deg: f64) -> [f64; 12] {
    let ic_deg = mc_deg + 180.0;
    let dsc_deg = asc_deg + 180.0;
    let lower_east = arc_forward(asc_deg, ic_deg) / 3.0;
    let lower_west = arc_forward(ic_deg, dsc_deg) / 3.0;
    with_opposites([
        asc_deg,
        asc_deg + lower_east,
        asc_deg + 2.0 * lower_east,
        ic_deg,
        ic_deg + lower_west,
        ic_deg + 2.0 * lower_west,
    ])
}

/// Porphyry variant spreading the quadrant excess unevenly.
///
/// With `A` the arc MC→ASC and `d = (A − 90°)/4`, the houses adjacent to
/// the angles gain `d` and the middle house gains `2d`.
fn compute_porphyry_neo(asc_deg: f64, mc_deg: f64) -> [f64; 12] {
    let d = (arc_forward(mc_deg, asc_deg) - 90.0) / 4.0;
    let mut h = [0.0; 12];
    h[9] = mc_deg;
    h[10] = h[9] + 30.0 + d;
    h[11] = h[10] + 30.0 + 2.0 * d;
    h[8] = mc_deg - 30.0 + d;
    h[7] = h[8] - 30.0 + 2.0 * d;
    h[6] = asc_deg + 180.0;
    for i in 0..6 {
        h[i] = h[i + 6] - 180.0;
    }
    h.map(normalize_degrees)
}

// ---------------------------------------------------------------------------
// Time-based (semi-arc) systems
// ---------------------------------------------------------------------------

/// One intermediate Placidus cusp.
///
/// Solves `R = θ ± acos(∓ sin R · tan ε · tan φ) / ff` by fixed-point
/// iteration. `ff` is 3 for houses 11/3 and 1.5 for houses 12/2; `below`
/// selects the nocturnal arc.
fn placidus_cusp(s: &Sphere, offset_deg: f64, ff: f64, below: bool) -> f64 {
    let sign = if below { 1.0 } else { -1.0 };
    let tan_prod = s.eps.tan() * s.phi.tan();
    let mut r1 = s.ramc + offset_deg.to_radians();
    for _ in 0..PLACIDUS_MAX_ITER {
        let xs = (sign * r1.sin() * tan_prod).clamp(-1.0, 1.0).acos();
        let next = if below {
            s.ramc + PI - xs / ff
        } else {
            s.ramc + xs / ff
        };
        let delta = (next - r1).abs();
        r1 = next;
        if delta < PLACIDUS_TOLERANCE {
            break;
        }
    }
    ecliptic_from_ra(r1, s.eps)
}

fn compute_placidus(input: &HouseInput) -> [f64; 12] {
    let s = Sphere::new(input);
    with_opposites([
        input.ascendant_deg,
        placidus_cusp(&s, 120.0, 1.5, true),
        placidus_cusp(&s, 150.0, 3.0, true),
        input.midheaven_deg + 180.0,
        placidus_cusp(&s, 30.0, 3.0, false) + 180.0,
        placidus_cusp(&s, 60.0, 1.5, false) + 180.0,
    ])
}

/// Koch (birthplace) houses: trisect the Ascendant's oblique ascension.
fn compute_koch(input: &HouseInput) -> [f64; 12] {
    let s = Sphere::new(input);
    let a1 = (s.ramc.sin() * s.phi.tan() * s.eps.tan())
        .clamp(-1.0, 1.0)
        .asin()
        .to_degrees();
    std::array::from_fn(|i| {
        let d = normalize_degrees(house_offset_deg(i));
        let (a2, kn) = if d >= 180.0 {
            (d / 90.0 - 3.0, -1.0)
        } else {
            (d / 90.0 - 1.0, 1.0)
        };
        let a3 = (input.ramc_deg + d + a2 * a1).to_radians();
        let x = a3.cos() * s.eps.cos() - kn * s.phi.tan() * s.eps.sin();
        angle_of(x, a3.sin()).to_degrees()
    })
}

/// Polich–Page cusp: the ecliptic point rising at oblique ascension
/// `θ + offset` for a pole of height `pole`.
///
/// Equivalent to `tan λ = cos X · tan OA / cos(X + ε)` with
/// `tan X = tan pole / cos OA`, written in atan2 form so it stays
/// defined when `cos OA` vanishes.
fn topocentric_cusp(s: &Sphere, pole: f64, offset_deg: f64) -> f64 {
    let oa = normalize_radians(s.ramc + offset_deg.to_radians());
    let x = oa.cos() * s.eps.cos() - pole.tan() * s.eps.sin();
    angle_of(x, oa.sin()).to_degrees()
}

fn compute_topocentric(input: &HouseInput) -> [f64; 12] {
    let s = Sphere::new(input);
    let tan_phi = s.phi.tan();
    let p1 = (tan_phi / 3.0).atan();
    let p2 = (tan_phi / 1.5).atan();
    with_opposites([
        topocentric_cusp(&s, s.phi, 90.0),
        topocentric_cusp(&s, p2, 120.0),
        topocentric_cusp(&s, p1, 150.0),
        input.midheaven_deg + 180.0,
        topocentric_cusp(&s, p1, 30.0) + 180.0,
        topocentric_cusp(&s, p2, 60.0) + 180.0,
    ])
}

/// Alcabitius: trisect the Ascendant's diurnal and nocturnal semi-arcs in
/// right ascension, then project onto the ecliptic along hour circles.
fn compute_alcabitius(input: &HouseInput) -> [f64; 12] {
    let s = Sphere::new(input);
    let decl = (s.eps.sin() * input.ascendant_deg.to_radians().sin())
        .clamp(-1.0, 1.0)
        .asin();
    let sda = (-s.phi.tan() * decl.tan()).clamp(-1.0, 1.0).acos().to_degrees();
    let sna = 180.0 - sda;
    let ra = input.ramc_deg;
    let at = |ra_deg: f64| ecliptic_from_ra(ra_deg.to_radians(), s.eps);

    let mut h = [0.0; 12];
    h[9] = at(ra);
    h[10] = at(ra + sda / 3.0);
    h[11] = at(ra + 2.0 * sda / 3.0);
    h[8] = at(ra - sna / 3.0);
    h[7] = at(ra - 2.0 * sna / 3.0);
    h[6] = at(ra - sna);
    for i in 0..6 {
        h[i] = h[i + 6] + 180.0;
    }
    h.map(normalize_degrees)
}

// ---------------------------------------------------------------------------
// Space-based systems
// ---------------------------------------------------------------------------

/// Campanus: equal division of the prime vertical.
fn compute_campanus(input: &HouseInput) -> [f64; 12] {
    let s = Sphere::new(input);
    std::array::from_fn(|i| {
        let ko = house_offset_deg(i).to_radians();
        let dn = (ko.sin() * s.phi.cos()).atan2(ko.cos()).rem_euclid(TAU);
        let y = (s.ramc + dn).sin();
        let x = (s.ramc + dn).cos() * s.eps.cos() - dn.sin() * s.phi.tan() * s.eps.sin();
        angle_of(x, y).to_degrees()
    })
}

/// Regiomontanus: equal division of the celestial equator, projected
/// through the north and south points of the horizon.
fn compute_regiomontanus(input: &HouseInput) -> [f64; 12] {
    let s = Sphere::new(input);
    std::array::from_fn(|i| {
        let d = house_offset_deg(i).to_radians();
        let y = (s.ramc + d).sin();
        let x = (s.ramc + d).cos() * s.eps.cos() - d.sin() * s.phi.tan() * s.eps.sin();
        angle_of(x, y).to_degrees()
    })
}

/// Meridian (axial rotation): equator divided from RAMC, projected along
/// hour circles. Independent of latitude.
fn compute_meridian(input: &HouseInput) -> [f64; 12] {
    let s = Sphere::new(input);
    std::array::from_fn(|i| ecliptic_from_ra(s.ramc + house_offset_deg(i).to_radians(), s.eps))
}

/// Morinus: equator divided from RAMC, projected through the ecliptic
/// poles.
fn compute_morinus(input: &HouseInput) -> [f64; 12] {
    let s = Sphere::new(input);
    std::array::from_fn(|i| {
        let ra = s.ramc + house_offset_deg(i).to_radians();
        angle_of(ra.cos(), ra.sin() * s.eps.cos()).to_degrees()
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::house_types::ALL_HOUSE_SYSTEMS;

    const EPS: f64 = 23.44;

    fn input(ramc: f64, lat: f64) -> HouseInput {
        HouseInput::from_ramc(ramc, EPS, lat)
    }

    fn close(a: f64, b: f64, tol: f64) -> bool {
        horo_math::minimal_angular_distance(a, b).abs() < tol
    }

    #[test]
    fn quadrant_systems_pin_angles() {
        let inp = input(45.0, 40.0);
        for system in [
            HouseSystem::Koch,
            HouseSystem::Placidus,
            HouseSystem::Topocentric,
            HouseSystem::Campanus,
            HouseSystem::Regiomontanus,
            HouseSystem::Porphyry,
            HouseSystem::PorphyryNeo,
            HouseSystem::Alcabitius,
        ] {
            let h = compute_houses(system, &inp);
            assert_eq!(h.status, HouseStatus::Computed);
            assert!(close(h.cusps[0], inp.ascendant_deg, 1e-8), "{system} cusp 1");
            assert!(close(h.cusps[9], inp.midheaven_deg, 1e-8), "{system} cusp 10");
        }
    }

    #[test]
    fn placidus_reference_chart() {
        let h = compute_houses(HouseSystem::Placidus, &input(45.0, 40.0));
        let expected = [144.25844, 166.861782, 194.544339, 227.46433, 262.689056, 295.572724];
        for (i, e) in expected.iter().enumerate() {
            assert!(close(h.cusps[i], *e, 1e-5), "cusp {} = {}", i + 1, h.cusps[i]);
        }
    }

    #[test]
    fn equator_placidus_divides_right_ascension() {
        // At φ = 0 every semi-arc is 90°, so house 11 sits at RA = RAMC + 30°.
        let h = compute_houses(HouseSystem::Placidus, &input(0.0, 0.0));
        let expected = ecliptic_from_ra(30f64.to_radians(), EPS.to_radians());
        assert!(close(h.cusps[10], expected, 1e-9));
    }

    #[test]
    fn null_houses_start_at_aries() {
        let h = compute_houses(HouseSystem::Null, &input(123.0, 51.0));
        for (i, c) in h.cusps.iter().enumerate() {
            assert_eq!(*c, 30.0 * i as f64);
        }
    }

    #[test]
    fn whole_sign_anchors_to_sign_start() {
        let inp = input(200.0, 35.0);
        let h = compute_houses(HouseSystem::WholeSign, &inp);
        assert_eq!(h.cusps[0], (inp.ascendant_deg / 30.0).floor() * 30.0);
        assert_eq!(h.cusps[0] % 30.0, 0.0);
    }

    #[test]
    fn equal_mc_puts_tenth_on_midheaven() {
        let inp = input(300.0, -33.0);
        let h = compute_houses(HouseSystem::EqualMidheaven, &inp);
        assert!(close(h.cusps[9], inp.midheaven_deg, 1e-9));
    }

    #[test]
    fn polar_latitude_falls_back_for_semi_arc_systems() {
        let inp = input(10.0, 70.0);
        for system in ALL_HOUSE_SYSTEMS {
            let h = compute_houses(system, &inp);
            if system.semi_arc_based() {
                assert_eq!(h.status, HouseStatus::PolarFallback { requested: system });
                assert_eq!(h.system, HouseSystem::Equal);
                assert!(close(h.cusps[0], inp.ascendant_deg, 1e-9));
            } else {
                assert_eq!(h.status, HouseStatus::Computed, "{system}");
            }
        }
    }

    #[test]
    fn porphyry_neo_matches_porphyry_when_quadrants_are_square() {
        // RAMC 90 at the equator: ASC 180, MC 90, every quadrant exactly 90°.
        let inp = HouseInput {
            ramc_deg: 90.0,
            obliquity_deg: EPS,
            latitude_deg: 0.0,
            ascendant_deg: 180.0,
            midheaven_deg: 90.0,
        };
        let a = compute_houses(HouseSystem::Porphyry, &inp);
        let b = compute_houses(HouseSystem::PorphyryNeo, &inp);
        for i in 0..12 {
            assert!(close(a.cusps[i], b.cusps[i], 1e-9), "cusp {}", i + 1);
        }
    }

    #[test]
    fn opposite_cusps_differ_by_half_circle() {
        let inp = input(77.0, 48.0);
        for system in ALL_HOUSE_SYSTEMS {
            let h = compute_houses(system, &inp);
            for i in 0..6 {
                assert!(
                    close(h.cusps[i] + 180.0, h.cusps[i + 6], 1e-8),
                    "{system} cusp {} vs {}",
                    i + 1,
                    i + 7
                );
            }
        }
    }
}
