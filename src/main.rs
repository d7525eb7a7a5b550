use anyhow::{Context, Result};
use clap::Parser;
use csv::Writer;
use serde::Serialize;
use std::fs::{self, File};
use std::path::{Path, PathBuf};

use fare_cap::{FareBreakdown, FareRules, ZonePair, calculate_fares, parse_journeys};

// --- Command Line ---

/// Calculate capped transit fares for one rider's journeys.
#[derive(Parser, Debug)]
#[command(version, about)]
struct Cli {
    /// Fare rules JSON (fares, caps, peak hours)
    #[arg(long, default_value = "config/fare_rules.json")]
    rules: PathBuf,

    /// Journeys JSON: an array, or an object whose values are journeys
    #[arg(long)]
    journeys: PathBuf,

    /// Write trip_fares.csv and day_fares.csv into this directory
    #[arg(long)]
    output_dir: Option<PathBuf>,

    /// Print the full breakdown as JSON
    #[arg(long)]
    json: bool,
}

// --- Output Rows ---

#[derive(Debug, Serialize)]
struct FareRow<'a> {
    label: &'a str,
    fare: u32,
    from_zone: i32,
    to_zone: i32,
}

impl<'a> FareRow<'a> {
    fn new(label: &'a str, fare: u32, zone_pair: ZonePair) -> Self {
        FareRow {
            label,
            fare,
            from_zone: zone_pair.from_zone(),
            to_zone: zone_pair.to_zone(),
        }
    }
}

// --- Main Execution ---

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();

    let rules = FareRules::from_path(&cli.rules)
        .with_context(|| format!("Failed to load fare rules from {}", cli.rules.display()))?;

    let raw = fs::read_to_string(&cli.journeys)
        .with_context(|| format!("Failed to read journeys from {}", cli.journeys.display()))?;
    let journeys = parse_journeys(&raw).context("Failed to parse journeys JSON")?;
    log::info!("Loaded {} journeys from {}", journeys.len(), cli.journeys.display());

    let breakdown = calculate_fares(&rules, &journeys).context("Fare calculation failed")?;

    if let Some(output_dir) = &cli.output_dir {
        write_csv(output_dir, &breakdown)?;
    }

    if cli.json {
        println!("{}", serde_json::to_string_pretty(&breakdown)?);
    }

    println!("Fare Summary:");
    println!("  Trips: {}", breakdown.trip_fares.len());
    println!("  Days: {}", breakdown.day_fares.len());
    println!("  Total fare: {}", breakdown.total_fare());
    Ok(())
}

fn write_csv(output_dir: &Path, breakdown: &FareBreakdown) -> Result<()> {
    fs::create_dir_all(output_dir)
        .with_context(|| format!("Failed to create {}", output_dir.display()))?;

    let mut trips_writer: Writer<File> = Writer::from_path(output_dir.join("trip_fares.csv"))?;
    for trip in &breakdown.trip_fares {
        trips_writer.serialize(FareRow::new(&trip.label, trip.fare, trip.zone_pair))?;
    }
    trips_writer.flush()?;

    let mut days_writer: Writer<File> = Writer::from_path(output_dir.join("day_fares.csv"))?;
    for day in &breakdown.day_fares {
        days_writer.serialize(FareRow::new(&day.label, day.fare, day.zone_pair))?;
    }
    days_writer.flush()?;

    log::info!("Wrote fare CSVs to {}", output_dir.display());
    Ok(())
}
