//! Plain-text rendering of engine results.

use std::fmt::Write as _;

use horo_chart::Chart;
use horo_houses::{HouseCusps, HouseStatus};
use horo_math::{Element, Modality, Polarity, SignPosition};
use horo_search::{AspectEvent, ExactAspect, IntervalBound, RetrogradeInterval, TransitScan};
use horo_time::calendar_from_jd;

/// Longitude as `15 Tau 30'45"`.
pub fn position(longitude_deg: f64) -> String {
    SignPosition::from_longitude(longitude_deg).to_string()
}

/// Julian Day as a Gregorian UT timestamp.
pub fn jd_stamp(jd_ut: f64) -> String {
    let (date, hours) = calendar_from_jd(jd_ut, true);
    let (h, m, s) = horo_time::decimal_hours_to_hms(hours);
    format!("{date} {h:02}:{m:02}:{s:02} UT")
}

fn house_status(status: HouseStatus) -> Option<String> {
    match status {
        HouseStatus::Computed => None,
        HouseStatus::PolarFallback { requested } => {
            Some(format!("{requested} undefined at this latitude; Equal houses used"))
        }
        HouseStatus::DegenerateFallback { requested } => {
            Some(format!("{requested} failed numerically; Equal houses used"))
        }
    }
}

pub fn houses(h: &HouseCusps) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Houses ({})", h.system);
    if let Some(note) = house_status(h.status) {
        let _ = writeln!(out, "  note: {note}");
    }
    for (i, c) in h.cusps.iter().enumerate() {
        let _ = writeln!(out, "  {:>2}  {:>9.4}  {}", i + 1, c, position(*c));
    }
    out
}

pub fn chart(c: &Chart) -> String {
    let mut out = String::new();
    let s = &c.subject;
    let _ = writeln!(
        out,
        "Chart for {} {:.4}h (UTC{:+}) at {:.4}E {:.4}N",
        s.date, s.hours, s.utc_offset_hours, s.longitude_deg, s.latitude_deg
    );
    let _ = writeln!(
        out,
        "  JD {:.6} UT  ΔT {:.1}s  RAMC {:.4}  ε {:.4}",
        c.jd_ut,
        c.delta_t_days * 86_400.0,
        c.sidereal_time_deg,
        c.obliquity_deg
    );
    let _ = writeln!(out, "  ASC {}  MC {}", position(c.ascendant_deg), position(c.midheaven_deg));
    out.push('\n');

    let _ = writeln!(out, "Bodies");
    for b in &c.bodies {
        if !b.available {
            let _ = writeln!(out, "  {:<10} unavailable", b.body.name());
            continue;
        }
        let _ = writeln!(
            out,
            "  {:<10} {:>9.4}  {}  house {:>2}  {:>+8.4}°/d{}",
            b.body.name(),
            b.longitude_deg,
            position(b.longitude_deg),
            b.house + 1,
            b.speed_deg_per_day,
            if b.retrograde { "  R" } else { "" }
        );
    }
    out.push('\n');
    out.push_str(&houses(&c.houses));
    out.push('\n');

    let _ = writeln!(out, "Aspects");
    for (e, hit) in c.aspects.hits() {
        let _ = writeln!(
            out,
            "  {:<10} {} {:<10} {:<12} orb {:>+7.3} (max {:.1})",
            e.first.name(),
            hit.kind.symbol(),
            e.second.name(),
            hit.kind.name(),
            hit.residual_deg,
            hit.orb_deg
        );
    }
    out.push('\n');

    let t = &c.tally;
    let _ = writeln!(out, "Qualities ({} bodies)", t.total());
    let _ = writeln!(
        out,
        "  Fire {}  Earth {}  Air {}  Water {}",
        t.element(Element::Fire),
        t.element(Element::Earth),
        t.element(Element::Air),
        t.element(Element::Water)
    );
    let _ = writeln!(
        out,
        "  Cardinal {}  Fixed {}  Mutable {}",
        t.modality(Modality::Cardinal),
        t.modality(Modality::Fixed),
        t.modality(Modality::Mutable)
    );
    let _ = writeln!(
        out,
        "  Masculine {}  Feminine {}",
        t.polarity(Polarity::Masculine),
        t.polarity(Polarity::Feminine)
    );
    out
}

fn event(scan: &TransitScan, e: &AspectEvent) -> String {
    let from = scan.instants[e.start_index];
    let to = scan.instants[e.end_index];
    let mut line = format!(
        "  {}{} .. {}{}  {} {} {}  orb {:.3}",
        if e.open_start { "<" } else { " " },
        from,
        to,
        if e.open_end { ">" } else { " " },
        e.transiting,
        e.aspect.name().to_lowercase(),
        e.target,
        e.orb_deg
    );
    line.push_str(if e.applying { "  applying" } else { "  separating" });
    if e.retrograde {
        line.push_str("  R");
    }
    if let Some(jd) = e.exact_jd_ut {
        let _ = write!(line, "  exact {}", jd_stamp(jd));
    }
    line
}

fn bound(b: IntervalBound) -> String {
    match b {
        IntervalBound::Open(jd) => format!("{} (open)", jd_stamp(jd)),
        IntervalBound::Closed(jd) => jd_stamp(jd),
    }
}

pub fn intervals(list: &[RetrogradeInterval]) -> String {
    let mut out = String::new();
    for iv in list {
        let _ = writeln!(
            out,
            "  {:<10} {} -> {}  ({:.1} days)",
            iv.body.name(),
            bound(iv.from),
            bound(iv.to),
            iv.duration_days()
        );
    }
    out
}

pub fn scan(s: &TransitScan) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Transit scan: {:?}, {} steps", s.state, s.jds.len());
    let _ = writeln!(out, "Events ({})", s.events.len());
    for e in &s.events {
        let _ = writeln!(out, "{}", event(s, e));
    }
    if !s.retrograde.is_empty() {
        let _ = writeln!(out, "Retrograde");
        out.push_str(&intervals(&s.retrograde));
    }
    out
}

pub fn exact(e: &ExactAspect) -> String {
    format!(
        "{} {} {:.4}° at {} (JD {:.6})  {} {:+.4}°/d",
        e.body,
        e.aspect.name().to_lowercase(),
        e.target_deg,
        jd_stamp(e.jd_ut),
        e.jd_ut,
        position(e.longitude_deg),
        e.speed_deg_per_day
    )
}
