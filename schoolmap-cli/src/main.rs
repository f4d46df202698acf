use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

mod commands;

use commands::rank::OutputFormat;

/// School proximity CLI tool
#[derive(Parser)]
#[command(name = "schoolmap")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Great-circle distance between two coordinates
    Distance {
        /// Latitude of the first point in decimal degrees
        #[arg(long, allow_negative_numbers = true)]
        from_lat: f64,

        /// Longitude of the first point in decimal degrees
        #[arg(long, allow_negative_numbers = true)]
        from_lon: f64,

        /// Latitude of the second point in decimal degrees
        #[arg(long, allow_negative_numbers = true)]
        to_lat: f64,

        /// Longitude of the second point in decimal degrees
        #[arg(long, allow_negative_numbers = true)]
        to_lon: f64,

        /// Output result as JSON
        #[arg(short, long)]
        json: bool,
    },

    /// Rank schools from a CSV file by distance from a coordinate
    Rank {
        /// Input CSV with columns name,address,latitude,longitude (id optional)
        #[arg(env = "SCHOOLMAP_CSV")]
        input: PathBuf,

        /// Query latitude in decimal degrees
        #[arg(long, allow_negative_numbers = true)]
        lat: f64,

        /// Query longitude in decimal degrees
        #[arg(long, allow_negative_numbers = true)]
        lon: f64,

        /// Only print the nearest N schools
        #[arg(short = 'n', long)]
        limit: Option<usize>,

        /// Output format
        #[arg(short, long, value_enum, default_value_t = OutputFormat::Table)]
        format: OutputFormat,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Distance {
            from_lat,
            from_lon,
            to_lat,
            to_lon,
            json,
        } => commands::distance::run(from_lat, from_lon, to_lat, to_lon, json),
        Commands::Rank {
            input,
            lat,
            lon,
            limit,
            format,
        } => commands::rank::run(input, lat, lon, limit, format),
    }
}
