//! `horo`: charts, house cusps and time searches from the command line.

mod parse;
mod provider;
mod render;

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use horo_chart::{Subject, compute_chart};
use horo_config::Settings;
use horo_core::Body;
use horo_houses::{ALL_HOUSE_SYSTEMS, HouseInput, HouseSystem, compute_houses};
use horo_math::{
    AspectKind, Sexagesimal, SignPosition, decimal_format_to_degrees, degrees_to_decimal_format,
};
use horo_search::{
    CancelToken, ScanProgress, compute_transit_scan, find_retrograde_intervals,
    next_exact_aspect, prev_exact_aspect,
};
use horo_time::{Instant, calendar_from_jd, decimal_hours_to_hms, delta_t_seconds};
use serde::Serialize;

use crate::parse::{parse_clock, parse_date};
use crate::provider::Provider;

#[derive(Parser)]
#[command(name = "horo", version, about = "Tropical chart engine CLI")]
struct Cli {
    /// Settings file (TOML); `HORO_CONFIG` is read when omitted
    #[arg(long, global = true)]
    config: Option<PathBuf>,
    /// Tabulated ephemeris (JSON); a demo model is used when omitted
    #[arg(long, global = true)]
    ephemeris: Option<PathBuf>,
    /// Log at debug level unless RUST_LOG says otherwise
    #[arg(short, long, global = true)]
    verbose: bool,
    /// Print results as JSON
    #[arg(long, global = true)]
    json: bool,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Args, Debug)]
struct SubjectArgs {
    /// Local date (YYYY-MM-DD)
    #[arg(long, allow_hyphen_values = true)]
    date: String,
    /// Local clock time (HH:MM or HH:MM:SS)
    #[arg(long, default_value = "12:00")]
    time: String,
    /// Latitude in degrees, north positive
    #[arg(long, allow_negative_numbers = true)]
    lat: f64,
    /// Longitude in degrees, east positive
    #[arg(long, allow_negative_numbers = true)]
    lon: f64,
    /// Local clock minus UT in hours; overrides the settings file
    #[arg(long, allow_negative_numbers = true)]
    utc_offset: Option<f64>,
    /// House system name or code (0-13); overrides the settings file
    #[arg(long)]
    house_system: Option<String>,
    /// Read the date in the Julian calendar
    #[arg(long)]
    julian: bool,
}

impl SubjectArgs {
    fn subject(&self, settings: &Settings) -> Result<Subject> {
        let date = parse_date(&self.date, self.julian)?;
        let hours = parse_clock(&self.time)?;
        let mut subject = settings.subject(date, hours, self.lon, self.lat);
        if let Some(offset) = self.utc_offset {
            subject = subject.with_utc_offset(offset);
        }
        if let Some(name) = &self.house_system {
            subject.house_system = name.parse()?;
        }
        Ok(subject)
    }
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Compute a natal chart
    Chart {
        #[command(flatten)]
        subject: SubjectArgs,
    },
    /// House cusps from RAMC, obliquity and latitude
    Houses {
        /// Right ascension of the MC in degrees
        #[arg(long)]
        ramc: f64,
        /// Geographic latitude in degrees
        #[arg(long, allow_negative_numbers = true)]
        lat: f64,
        /// Obliquity of the ecliptic in degrees
        #[arg(long, default_value = "23.4393")]
        obliquity: f64,
        /// House system name or code; every system when omitted
        #[arg(long)]
        system: Option<String>,
    },
    /// Scan transits to a natal chart over a date range
    Transits {
        #[command(flatten)]
        natal: SubjectArgs,
        /// First scan date (YYYY-MM-DD, local midnight)
        #[arg(long, allow_hyphen_values = true)]
        from: String,
        /// Last scan date (YYYY-MM-DD, local midnight)
        #[arg(long, allow_hyphen_values = true)]
        to: String,
        /// Step such as 1d, 6h, 1w, 1mo; overrides the settings file
        #[arg(long)]
        step: Option<String>,
        /// Also aspect the natal house cusps
        #[arg(long)]
        cusps: bool,
    },
    /// Retrograde intervals of one body
    Retrograde {
        /// Body name or code
        #[arg(long)]
        body: String,
        /// First date (YYYY-MM-DD, UT)
        #[arg(long, allow_hyphen_values = true)]
        from: String,
        /// Last date (YYYY-MM-DD, UT)
        #[arg(long, allow_hyphen_values = true)]
        to: String,
        /// Read the dates in the Julian calendar
        #[arg(long)]
        julian: bool,
    },
    /// Next (or previous) exact aspect of a body to a fixed longitude
    Exact {
        /// Body name or code
        #[arg(long)]
        body: String,
        /// Target ecliptic longitude in degrees
        #[arg(long)]
        target: f64,
        /// Aspect name
        #[arg(long, default_value = "conjunction")]
        aspect: String,
        /// Start date (YYYY-MM-DD, UT)
        #[arg(long, allow_hyphen_values = true)]
        date: String,
        /// Start clock time (UT)
        #[arg(long, default_value = "00:00")]
        time: String,
        /// Search backwards in time
        #[arg(long)]
        backward: bool,
    },
    /// Julian Day and Delta-T of a UT date, or the date of a Julian Day
    Jd {
        /// Date (YYYY-MM-DD, UT)
        #[arg(long, allow_hyphen_values = true, required_unless_present = "from_jd")]
        date: Option<String>,
        /// Clock time (UT)
        #[arg(long, default_value = "12:00")]
        time: String,
        /// Convert this Julian Day back to a calendar date
        #[arg(long, conflicts_with = "date")]
        from_jd: Option<f64>,
        /// Julian calendar instead of Gregorian
        #[arg(long)]
        julian: bool,
    },
    /// Degrees to sexagesimal, sign position and GG.MMSS
    Dms {
        /// Angle in decimal degrees
        #[arg(allow_negative_numbers = true)]
        deg: f64,
        /// Read the input as GG.MMSS instead
        #[arg(long)]
        from_decimal_format: bool,
    },
}

fn emit<T: Serialize>(json: bool, value: &T, text: impl FnOnce(&T) -> String) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(value)?);
    } else {
        print!("{}", text(value));
    }
    Ok(())
}

fn parse_body(name: &str) -> Result<Body> {
    name.parse().map_err(anyhow::Error::msg)
}

fn parse_aspect(name: &str) -> Result<AspectKind> {
    AspectKind::from_name(name).with_context(|| format!("unknown aspect '{name}'"))
}

fn local_midnight(date: &str, julian: bool) -> Result<Instant> {
    Ok(Instant::new(parse_date(date, julian)?, 0.0)?)
}

#[derive(Serialize)]
struct JdReport {
    jd_ut: f64,
    date: String,
    hours: f64,
    delta_t_seconds: f64,
}

#[derive(Serialize)]
struct DmsReport {
    degrees: f64,
    negative: bool,
    dms: String,
    sign_position: String,
    decimal_format: f64,
}

fn run(cli: Cli) -> Result<()> {
    let settings = Settings::load(cli.config.as_deref()).context("failed to load settings")?;
    if let Some(path) = &settings.source {
        log::info!("settings from {}", path.display());
    }
    let json = cli.json;

    match cli.command {
        Commands::Chart { subject } => {
            let provider = Provider::open(cli.ephemeris.as_deref())?;
            let subject = subject.subject(&settings)?;
            let chart = compute_chart(&provider, &subject, &settings.chart)?;
            emit(json, &chart, render::chart)
        }

        Commands::Houses {
            ramc,
            lat,
            obliquity,
            system,
        } => {
            let input = HouseInput::from_ramc(ramc, obliquity, lat);
            let systems: Vec<HouseSystem> = match system {
                Some(name) => vec![name.parse()?],
                None => ALL_HOUSE_SYSTEMS.to_vec(),
            };
            let all: Vec<_> = systems.iter().map(|s| compute_houses(*s, &input)).collect();
            emit(json, &all, |all| {
                all.iter().map(render::houses).collect::<Vec<_>>().join("\n")
            })
        }

        Commands::Transits {
            natal,
            from,
            to,
            step,
            cusps,
        } => {
            let provider = Provider::open(cli.ephemeris.as_deref())?;
            let subject = natal.subject(&settings)?;
            let natal_chart = compute_chart(&provider, &subject, &settings.chart)
                .context("failed to compute the natal chart")?;
            let start = local_midnight(&from, natal.julian)?;
            let end = local_midnight(&to, natal.julian)?;

            let mut config = settings.transit.clone();
            if let Some(step) = step {
                config.step = step.parse()?;
            }
            config.include_cusps |= cusps;

            let cancel = CancelToken::new();
            let (tx, rx) = crossbeam_channel::bounded::<ScanProgress>(64);
            let scan = std::thread::scope(|s| {
                s.spawn(move || {
                    for p in rx {
                        log::debug!(
                            "step {} at {} ({} events closed)",
                            p.step_index,
                            p.instant,
                            p.events_closed
                        );
                    }
                });
                let result = compute_transit_scan(
                    &provider,
                    &natal_chart,
                    start,
                    end,
                    &config,
                    &cancel,
                    Some(&tx),
                );
                drop(tx);
                result
            })?;
            emit(json, &scan, render::scan)
        }

        Commands::Retrograde {
            body,
            from,
            to,
            julian,
        } => {
            let provider = Provider::open(cli.ephemeris.as_deref())?;
            let body = parse_body(&body)?;
            let start = parse_date(&from, julian)?;
            let end = parse_date(&to, julian)?;
            let intervals =
                find_retrograde_intervals(&provider, body, start, end, &settings.stations)?;
            if intervals.is_empty() && !json {
                println!("{body}: no retrograde motion between {start} and {end}");
                return Ok(());
            }
            emit(json, &intervals, |v| render::intervals(v))
        }

        Commands::Exact {
            body,
            target,
            aspect,
            date,
            time,
            backward,
        } => {
            let provider = Provider::open(cli.ephemeris.as_deref())?;
            let body = parse_body(&body)?;
            let aspect = parse_aspect(&aspect)?;
            let start = Instant::new(parse_date(&date, false)?, parse_clock(&time)?)?;
            let jd_start = start.julian_day();
            let found = if backward {
                prev_exact_aspect(&provider, body, target, aspect, jd_start, &settings.exact)?
            } else {
                next_exact_aspect(&provider, body, target, aspect, jd_start, &settings.exact)?
            };
            match found {
                Some(hit) => emit(json, &hit, |h| format!("{}\n", render::exact(h))),
                None if json => emit(json, &found, |_| String::new()),
                None => {
                    println!(
                        "no exact {} within {} days",
                        aspect.name().to_lowercase(),
                        settings.exact.max_window_days
                    );
                    Ok(())
                }
            }
        }

        Commands::Jd {
            date,
            time,
            from_jd,
            julian,
        } => {
            let (jd_ut, date, hours) = match (from_jd, date) {
                (Some(jd), _) => {
                    let (date, hours) = calendar_from_jd(jd, !julian);
                    (jd, date, hours)
                }
                (None, Some(date)) => {
                    let instant = Instant::new(parse_date(&date, julian)?, parse_clock(&time)?)?;
                    (instant.julian_day(), instant.date, instant.hours)
                }
                (None, None) => anyhow::bail!("either --date or --from-jd is required"),
            };
            let report = JdReport {
                jd_ut,
                date: date.to_string(),
                hours,
                delta_t_seconds: delta_t_seconds(jd_ut),
            };
            emit(json, &report, |r| {
                let (h, m, s) = decimal_hours_to_hms(r.hours);
                format!(
                    "JD {:.6}  {} {:02}:{:02}:{:02} UT  ΔT {:.2}s\n",
                    r.jd_ut, r.date, h, m, s, r.delta_t_seconds
                )
            })
        }

        Commands::Dms {
            deg,
            from_decimal_format,
        } => {
            let degrees = if from_decimal_format {
                decimal_format_to_degrees(deg)
            } else {
                deg
            };
            let report = DmsReport {
                degrees,
                negative: degrees < 0.0,
                dms: Sexagesimal::from_degrees(degrees).to_string(),
                sign_position: SignPosition::from_longitude(degrees).to_string(),
                decimal_format: degrees_to_decimal_format(degrees),
            };
            emit(json, &report, |r| {
                format!(
                    "{:.6}°  {}{}  {}  GG.MMSS {:.4}\n",
                    r.degrees,
                    if r.negative { "-" } else { "" },
                    r.dms,
                    r.sign_position,
                    r.decimal_format
                )
            })
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let level = if cli.verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();
    run(cli)
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn negative_coordinates_parse() {
        let cli = Cli::try_parse_from([
            "horo", "chart", "--date", "1990-06-15", "--lat", "-33.87", "--lon", "-70.6",
            "--utc-offset", "-4",
        ])
        .expect("valid arguments");
        let Commands::Chart { subject } = cli.command else {
            panic!("expected chart");
        };
        assert_eq!(subject.lat, -33.87);
        assert_eq!(subject.lon, -70.6);
        assert_eq!(subject.utc_offset, Some(-4.0));
        assert_eq!(subject.time, "12:00");
    }

    #[test]
    fn subject_flags_override_settings() {
        let cli = Cli::try_parse_from([
            "horo", "chart", "--date", "1990-06-15", "--time", "14:30", "--lat", "52.5",
            "--lon", "13.4", "--house-system", "koch", "--utc-offset", "2",
        ])
        .expect("valid arguments");
        let Commands::Chart { subject } = cli.command else {
            panic!("expected chart");
        };
        let s = subject.subject(&Settings::default()).expect("valid subject");
        assert_eq!(s.house_system, HouseSystem::Koch);
        assert_eq!(s.utc_offset_hours, 2.0);
        assert_eq!(s.hours, 14.5);
    }

    #[test]
    fn jd_needs_a_date_or_a_day_number() {
        assert!(Cli::try_parse_from(["horo", "jd"]).is_err());
        assert!(Cli::try_parse_from(["horo", "jd", "--from-jd", "2451545"]).is_ok());
        assert!(
            Cli::try_parse_from(["horo", "jd", "--date", "2000-01-01", "--from-jd", "1"]).is_err()
        );
    }

    #[test]
    fn global_flags_after_subcommand() {
        let cli = Cli::try_parse_from(["horo", "dms", "-12.5", "--json", "-v"])
            .expect("valid arguments");
        assert!(cli.json);
        assert!(cli.verbose);
        assert!(matches!(cli.command, Commands::Dms { deg, .. } if deg == -12.5));
    }

    #[test]
    fn names_resolve() {
        assert_eq!(parse_body("true node").expect("known"), Body::TrueNode);
        assert!(parse_body("Vulcan").is_err());
        assert_eq!(parse_aspect("Semi-Sextile").expect("known"), AspectKind::SemiSextile);
        assert!(parse_aspect("novile").is_err());
    }
}
