//! Orbit Information Tool
//!
//! Prints scene positions of catalog bodies, dumps orbit traces, searches the
//! catalog, summarizes the star sky and computes camera fly-to poses.
//!
//! Usage:
//!   cargo run --bin orbit_info -- positions --at 2024-06-01
//!   cargo run --bin orbit_info -- path Mars --format csv
//!   cargo run --bin orbit_info -- search ar
//!   cargo run --bin orbit_info -- fly-to Jupiter --at now
//!   cargo run --bin orbit_info -- --stars bsc5.json sky --constellation Orion

use std::path::PathBuf;

use chrono::{DateTime, Utc};
use clap::{ArgAction, Parser, Subcommand, ValueEnum};
use log::{debug, info};
use tracing_subscriber::EnvFilter;

use orrery::constants::SCENE_UNITS_PER_AU;
use orrery::coordinates::scene_to_ecliptic;
use orrery::keplerlib::mean_anomaly_at;
use orrery::navigation::{fly_to_body, look_at_constellation};
use orrery::starlib::{find_constellation, SKY_SPHERE_RADIUS};
use orrery::time::{julian_date, parse_instant};
use orrery::{search, Catalog, Loader, OrbitalMechanics, OrreryError, StarCatalog};

/// Type alias for the error type used throughout this module
type Result<T> = std::result::Result<T, Box<dyn std::error::Error>>;

/// Orbit Information Tool
#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "Computes solar-system body positions and orbit traces in scene coordinates",
    long_about = None
)]
struct Args {
    /// Display detailed debugging information
    #[arg(short, long, action = ArgAction::SetTrue, global = true)]
    debug: bool,

    /// JSON body catalog to use instead of the built-in one
    #[arg(long, global = true)]
    catalog: Option<PathBuf>,

    /// Bright-star JSON file for sky and constellation queries
    #[arg(long, global = true)]
    stars: Option<PathBuf>,

    /// Scene units per astronomical unit
    #[arg(long, default_value_t = SCENE_UNITS_PER_AU, global = true)]
    scale: f64,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Positions of every catalog body at one instant
    Positions {
        /// Instant: 'now', 'J2000', RFC 3339, YYYY-MM-DD or JD<number>
        #[arg(long, default_value = "now")]
        at: String,
    },
    /// The 181-point orbit trace of one body
    Path {
        /// Body name (case-insensitive)
        name: String,

        /// Output format
        #[arg(long, value_enum, default_value_t = PathFormat::Csv)]
        format: PathFormat,
    },
    /// Case-insensitive substring search over body and constellation names
    Search {
        query: String,
    },
    /// Star counts and constellation figures on the sky sphere
    Sky {
        /// Only count stars at or brighter than this magnitude
        #[arg(long, default_value_t = 6.5)]
        magnitude: f64,

        /// Constellation whose line segments and camera pose to print
        #[arg(long)]
        constellation: Option<String>,
    },
    /// Camera pose that frames one body
    FlyTo {
        /// Body name (case-insensitive)
        name: String,

        /// Instant: 'now', 'J2000', RFC 3339, YYYY-MM-DD or JD<number>
        #[arg(long, default_value = "now")]
        at: String,
    },
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
enum PathFormat {
    Csv,
    Json,
}

fn init_logging(debug: bool) {
    let default_level = if debug { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    // Also installs the log → tracing bridge, so library `log` records show up
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init();
}

/// Prints a section header with a title and separator line
fn print_section_header(title: &str) {
    println!("\n{}:", title);
    println!("-------------------------------------------------------");
}

fn build_loader(args: &Args) -> Loader {
    let mut loader = Loader::new();
    if let Some(path) = &args.catalog {
        loader = loader.with_catalog_file(path);
    }
    if let Some(path) = &args.stars {
        loader = loader.with_star_file(path);
    }
    loader
}

fn parse_time(input: &str) -> orrery::Result<DateTime<Utc>> {
    let time = parse_instant(input)?;
    info!("Using instant {} (JD {:.5})", time.to_rfc3339(), julian_date(&time));
    Ok(time)
}

fn display_positions(catalog: &Catalog, mechanics: &OrbitalMechanics, at: &str) -> Result<()> {
    let time = parse_time(at)?;

    print_section_header(&format!("Positions at {}", time.format("%Y-%m-%d %H:%M:%S UTC")));
    println!(
        "{:<10} {:<9} {:>11} {:>11} {:>11} {:>8} {:>8}",
        "Body", "Type", "X", "Y", "Z", "r (AU)", "M (deg)"
    );
    for entry in catalog {
        let position = mechanics.compute_position(&entry.elements, &time);
        let ecliptic = scene_to_ecliptic(position, mechanics.scale());
        println!(
            "{:<10} {:<9} {:>11.3} {:>11.3} {:>11.3} {:>8.4} {:>8.3}",
            entry.name,
            entry.kind.name(),
            position.x,
            position.y,
            position.z,
            ecliptic.magnitude(),
            mean_anomaly_at(&entry.elements, &time),
        );
    }
    Ok(())
}

fn display_path(
    catalog: &Catalog,
    mechanics: &OrbitalMechanics,
    name: &str,
    format: PathFormat,
) -> Result<()> {
    let entry = catalog
        .find(name)
        .ok_or_else(|| OrreryError::ObjectNotFound(name.to_string()))?;
    let path = mechanics.compute_orbit_path(&entry.elements);

    match format {
        PathFormat::Csv => {
            println!("x,y,z");
            for point in &path {
                println!("{},{},{}", point.x, point.y, point.z);
            }
        }
        PathFormat::Json => println!("{}", serde_json::to_string_pretty(&path)?),
    }

    debug!(
        "{}: {} points, longest segment {:.4}, period {:.1} days",
        entry.name,
        path.len(),
        path.max_segment_length(),
        entry.elements.period_days(),
    );
    Ok(())
}

fn display_search(catalog: &Catalog, query: &str) {
    let hits = search(catalog, query);
    if hits.is_empty() {
        println!("No bodies or constellations match '{}'.", query);
        return;
    }

    print_section_header(&format!("Matches for '{}'", query));
    for hit in hits {
        println!("{:<12} {}", hit.name(), hit.label());
    }
}

fn display_sky(stars: &StarCatalog, magnitude: f64, constellation: Option<&str>) -> Result<()> {
    if stars.is_empty() {
        return Err("no stars loaded, pass --stars <file>".into());
    }

    print_section_header("Sky Sphere");
    println!("Stars loaded:          {}", stars.len());
    println!(
        "Brighter than {:>5.2}:  {}",
        magnitude,
        stars.brighter_than(magnitude).len()
    );

    let Some(name) = constellation else {
        return Ok(());
    };
    let figure = find_constellation(name)
        .ok_or_else(|| OrreryError::ObjectNotFound(name.to_string()))?;

    print_section_header(&format!("{} line segments", figure.name));
    let segments = stars.constellation_segments(figure, SKY_SPHERE_RADIUS);
    for (from, to) in &segments {
        println!(
            "({:>10.1}, {:>10.1}, {:>10.1}) -> ({:>10.1}, {:>10.1}, {:>10.1})",
            from.x, from.y, from.z, to.x, to.y, to.z
        );
    }
    debug!(
        "{}: {} of {} lines drawn",
        figure.name,
        segments.len(),
        figure.lines.len()
    );

    match look_at_constellation(stars, figure) {
        Some(pose) => println!("\nCamera pose:\n{}", serde_json::to_string_pretty(&pose)?),
        None => println!("\nReference star for {} is not in the catalog.", figure.name),
    }
    Ok(())
}

fn display_fly_to(
    catalog: &Catalog,
    mechanics: &OrbitalMechanics,
    name: &str,
    at: &str,
) -> Result<()> {
    let entry = catalog
        .find(name)
        .ok_or_else(|| OrreryError::ObjectNotFound(name.to_string()))?;
    let time = parse_time(at)?;
    let pose = fly_to_body(entry, &time, mechanics);

    print_section_header(&format!("Camera pose for {}", entry.name));
    println!("{}", serde_json::to_string_pretty(&pose)?);
    if let Some(summary) = entry.summary() {
        println!("\n{}", summary);
    }
    Ok(())
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(args.debug);

    if !(args.scale.is_finite() && args.scale > 0.0) {
        return Err(format!("scale must be a positive number, got {}", args.scale).into());
    }

    let loader = build_loader(&args);
    let catalog = loader.load_catalog()?;
    debug!("Catalog holds {} bodies", catalog.len());
    let mechanics = OrbitalMechanics::with_scale(args.scale);

    match &args.command {
        Command::Positions { at } => display_positions(&catalog, &mechanics, at)?,
        Command::Path { name, format } => display_path(&catalog, &mechanics, name, *format)?,
        Command::Search { query } => display_search(&catalog, query),
        Command::Sky {
            magnitude,
            constellation,
        } => display_sky(&loader.load_stars()?, *magnitude, constellation.as_deref())?,
        Command::FlyTo { name, at } => display_fly_to(&catalog, &mechanics, name, at)?,
    }

    Ok(())
}
