use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

use flightboard::commands::{handle_departures, handle_route, handle_search};
use flightboard::timefmt::TimeMode;

#[derive(Parser)]
#[command(name = "flightboard", about = "International departure board with SimBrief deep links")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Airport database (JSON object keyed by ICAO)
    #[arg(long, global = true, default_value = "data/airports.json")]
    airports: PathBuf,
}

#[derive(Subcommand)]
enum Commands {
    /// Show international departures from a schedule feed snapshot
    Departures {
        /// Departure airport ICAO; defaults to the settings file value
        icao: Option<String>,

        /// Schedule feed JSON file
        #[arg(long)]
        feed: PathBuf,

        /// User settings TOML file
        #[arg(long)]
        settings: Option<PathBuf>,

        /// Network controller data JSON for ATC presence badges
        #[arg(long)]
        atc: Option<PathBuf>,

        /// Time display mode
        #[arg(long, value_enum, default_value = "local")]
        time_mode: TimeMode,

        /// 12-hour clock (ignored in zulu mode)
        #[arg(long)]
        hour12: bool,
    },
    /// Print the great-circle path between two airports
    Route {
        origin: String,
        destination: String,

        /// Number of arc subdivisions
        #[arg(long, default_value_t = flightboard::geometry::great_circle::DEFAULT_ARC_POINTS)]
        points: usize,
    },
    /// Search the airport database
    Search { query: String },
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let cli = Cli::parse();
    match cli.command {
        Commands::Departures {
            icao,
            feed,
            settings,
            atc,
            time_mode,
            hour12,
        } => handle_departures(icao, feed, cli.airports, settings, atc, time_mode, hour12),
        Commands::Route {
            origin,
            destination,
            points,
        } => handle_route(origin, destination, cli.airports, points),
        Commands::Search { query } => handle_search(query, cli.airports),
    }
}
