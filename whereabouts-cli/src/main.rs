//! Whereabouts CLI - drive the location workflow from the terminal.
//!
//! Wires the library's collaborator traits to an in-process simulated
//! backend (see [`sim`]) so the orchestration behavior can be exercised
//! offline: resolution with caching, travel boundaries, and the summary
//! and usage panels.

mod format;
mod sim;

use chrono::Utc;
use clap::{Parser, Subcommand, ValueEnum};
use std::process;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;
use whereabouts::config::WorkflowConfig;
use whereabouts::coord::Coordinates;
use whereabouts::services::{BoundaryQuery, BoundaryUnits};
use whereabouts::usage::{UsageRefresher, DEFAULT_DEVICE_GROUP_LEVEL, DEFAULT_TIME_GROUP_LEVEL};
use whereabouts::workflow::{LocationResult, LocationWorkflow, ResolutionSource};

use sim::{ConsoleIndicator, SimulatedBackend, SimulatedPositionProvider};

#[derive(Debug, Clone, Copy, ValueEnum)]
enum UnitsArg {
    /// Drive-time boundary.
    Minutes,
    /// Drive-distance boundary.
    Miles,
}

impl From<UnitsArg> for BoundaryUnits {
    fn from(units: UnitsArg) -> Self {
        match units {
            UnitsArg::Minutes => BoundaryUnits::Minutes,
            UnitsArg::Miles => BoundaryUnits::Miles,
        }
    }
}

#[derive(Parser)]
#[command(name = "whereabouts")]
#[command(version = whereabouts::VERSION)]
#[command(about = "Resolve a position against a simulated backend", long_about = None)]
struct Args {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Resolve the simulated device position into a location record.
    Locate {
        /// Latitude the simulated device reports.
        #[arg(long)]
        lat: f64,

        /// Longitude the simulated device reports.
        #[arg(long)]
        lon: f64,

        /// Simulate the user refusing the geolocation prompt.
        #[arg(long)]
        deny: bool,

        /// Simulate a fix with no address nearby.
        #[arg(long)]
        vacant: bool,

        /// Address search distance in feet.
        #[arg(long, default_value_t = 750)]
        search_distance: u32,

        /// Resolve twice to demonstrate the cached fast path.
        #[arg(long)]
        twice: bool,
    },

    /// Resolve, then fetch the travel boundary around the location.
    Boundary {
        /// Latitude the simulated device reports.
        #[arg(long)]
        lat: f64,

        /// Longitude the simulated device reports.
        #[arg(long)]
        lon: f64,

        /// How far the boundary extends, in the chosen units.
        #[arg(long, default_value_t = 5)]
        cost: u32,

        /// Boundary cost units.
        #[arg(long, value_enum, default_value = "minutes")]
        units: UnitsArg,
    },

    /// Print the aggregate usage statistics.
    Usage,
}

#[tokio::main]
async fn main() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    let args = Args::parse();
    let outcome = match args.command {
        Command::Locate {
            lat,
            lon,
            deny,
            vacant,
            search_distance,
            twice,
        } => run_locate(lat, lon, deny, vacant, search_distance, twice).await,
        Command::Boundary {
            lat,
            lon,
            cost,
            units,
        } => run_boundary(lat, lon, cost, units.into()).await,
        Command::Usage => run_usage().await,
    };

    if let Err(message) = outcome {
        eprintln!("Error: {message}");
        process::exit(1);
    }
}

fn build_workflow(
    lat: f64,
    lon: f64,
    deny: bool,
    vacant: bool,
    search_distance: u32,
) -> LocationWorkflow {
    let provider = if deny {
        SimulatedPositionProvider::denied()
    } else {
        SimulatedPositionProvider::at(Coordinates::new(lat, lon))
    };
    let backend = if vacant {
        SimulatedBackend::vacant()
    } else {
        SimulatedBackend::new()
    };

    LocationWorkflow::builder()
        .config(WorkflowConfig::default().with_search_distance(search_distance))
        .position_provider(Arc::new(provider))
        .lookup(backend.clone())
        .boundary_service(backend.clone())
        .summary_service(backend)
        .progress_indicator(Arc::new(ConsoleIndicator))
        .build()
        .expect("all collaborators are wired")
}

async fn run_locate(
    lat: f64,
    lon: f64,
    deny: bool,
    vacant: bool,
    search_distance: u32,
    twice: bool,
) -> Result<(), String> {
    let workflow = build_workflow(lat, lon, deny, vacant, search_distance);

    locate_and_report(&workflow).await?;
    if twice {
        println!();
        println!("Resolving again from the same spot...");
        locate_and_report(&workflow).await?;
    }

    print_summaries(&workflow).await;
    Ok(())
}

async fn locate_and_report(workflow: &LocationWorkflow) -> Result<LocationResult, String> {
    let outcome = workflow.locate().await;

    if let Some(alert) = workflow.where_am_i_alert() {
        println!("[{}] {}", alert.severity, alert.message);
    }

    match outcome {
        Ok(result) => {
            println!("Resolved location {}", result.location.id);
            println!("  Coordinates: {}", result.coordinates);
            match &result.location.address {
                Some(address) if result.address_available => {
                    println!("  Address: {address}")
                }
                _ => println!("  Address: (none nearby)"),
            }
            println!("  Served by: {}", describe_source(result.source));
            Ok(result)
        }
        Err(error) => Err(error.to_string()),
    }
}

fn describe_source(source: ResolutionSource) -> &'static str {
    match source {
        ResolutionSource::Lookup => "remote lookup",
        ResolutionSource::CacheHit => "cached result",
        ResolutionSource::Seeded => "cached display seed",
    }
}

async fn print_summaries(workflow: &LocationWorkflow) {
    // The workflow fires these in the background after a resolution; the
    // direct calls here just make sure the panels are populated before we
    // print and exit.
    let summaries = workflow.summaries();
    summaries
        .refresh_popularity(workflow.config().popularity_group_level)
        .await;
    summaries.refresh_recency().await;

    println!();
    println!("Most popular:");
    for bucket in summaries.popularity() {
        println!("  {:<12} {}", bucket.key.join("/"), bucket.value);
    }

    println!();
    println!("Recently seen:");
    let now = Utc::now();
    for visit in summaries.recent_locations() {
        println!(
            "  {:<10} {:>5} ago",
            visit.id,
            format::time_since(visit.recorded_at, now)
        );
    }
}

async fn run_boundary(lat: f64, lon: f64, cost: u32, units: BoundaryUnits) -> Result<(), String> {
    let workflow = build_workflow(lat, lon, false, false, 750);

    workflow.locate().await.map_err(|error| error.to_string())?;
    let query = BoundaryQuery { cost, units };
    let outcome = workflow.travel_boundary(query).await;

    if let Some(alert) = workflow.boundary_alert() {
        println!("[{}] {}", alert.severity, alert.message);
    }

    let overlay = outcome.map_err(|error| error.to_string())?;
    let features = overlay
        .geojson
        .get("features")
        .and_then(|features| features.as_array())
        .map(|features| features.len())
        .unwrap_or(0);
    println!("Travel boundary within {cost} {units}:");
    println!("  {features} feature(s)");
    println!("{}", serde_json::to_string_pretty(&overlay.geojson).unwrap_or_default());
    Ok(())
}

async fn run_usage() -> Result<(), String> {
    let backend = SimulatedBackend::new();
    let usage = UsageRefresher::new(backend);

    usage.refresh_by_time(DEFAULT_TIME_GROUP_LEVEL).await;
    usage.refresh_by_device(DEFAULT_DEVICE_GROUP_LEVEL).await;

    let by_time = usage.by_time();
    println!("Usage by day:");
    for point in &by_time.points {
        println!(
            "  {}  {:>3}  (running total {})",
            point.date, point.value, point.running_total
        );
    }
    println!("  Total: {}   Average/day: {:.1}", by_time.total, by_time.average);

    println!();
    println!("Usage by device:");
    for row in usage.by_device() {
        println!("  {}. {:<8} {}", row.index, row.device, row.value);
    }
    Ok(())
}
