use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

mod commands;

/// DTED elevation tile CLI tool
#[derive(Parser)]
#[command(name = "dted")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Directory containing .dt2 files
    #[arg(short, long, env = "DTED_DATA_DIR", global = true)]
    data_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Display information about a DTED tile
    Info {
        /// Path to .dt2 file, or tile name (e.g., n45_e005)
        tile: String,
    },

    /// Build a space around an origin and summarize it
    Space {
        /// Longitude of the origin in decimal degrees
        #[arg(long, allow_negative_numbers = true)]
        lon: f64,

        /// Latitude of the origin in decimal degrees
        #[arg(long, allow_negative_numbers = true)]
        lat: f64,

        /// Output result as JSON
        #[arg(short, long)]
        json: bool,
    },
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| "dted=info".into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Info { tile } => commands::info::run(cli.data_dir, tile),
        Commands::Space { lon, lat, json } => commands::space::run(cli.data_dir, lon, lat, json),
    }
}
