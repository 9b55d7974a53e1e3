/// Main entry point for the habit progress MCP server
///
/// This file sets up logging, loads configuration, optionally preloads a
/// snapshot and starts the MCP server on stdin/stdout.

use clap::Parser;
use std::path::PathBuf;
use tracing::info;

use habit_progress::{Config, JsonFileSource, ProgressServer};

/// Command line arguments for the habit progress MCP server
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to a TOML config file
    /// If not provided, uses the per-user config file when it exists
    #[arg(long)]
    config: Option<PathBuf>,

    /// JSON export of habits and completion records to load at startup
    #[arg(long)]
    snapshot: Option<PathBuf>,

    /// Length of the all-time view in days (overrides the config file)
    #[arg(long)]
    all_time_days: Option<u32>,

    /// Enable debug logging
    #[arg(short, long)]
    debug: bool,

    /// Enable verbose output (implies debug)
    #[arg(short, long)]
    verbose: bool,
}

/// Explicit path first, then the per-user file, then defaults
fn load_config(explicit: Option<&PathBuf>) -> Result<Config, Box<dyn std::error::Error>> {
    if let Some(path) = explicit {
        return Ok(Config::load(path)?);
    }

    match Config::default_path() {
        Some(path) if path.exists() => Ok(Config::load(path)?),
        _ => Ok(Config::default()),
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    let mut config = load_config(args.config.as_ref())?;
    if let Some(days) = args.all_time_days {
        config.engine.all_time_days = days;
    }
    config.validate()?;

    // Set up logging based on command line flags
    let log_level = if args.verbose {
        "debug".to_string()
    } else if args.debug {
        "info".to_string()
    } else {
        config.logging.level.clone()
    };

    tracing_subscriber::fmt()
        .with_env_filter(format!("habit_progress={}", log_level))
        .with_writer(std::io::stderr) // Send logs to stderr, not stdout
        .init();

    info!("Starting habit progress MCP server");

    let mut server = ProgressServer::new(config.engine)?;

    if let Some(path) = args.snapshot {
        info!("Preloading snapshot from: {}", path.display());
        server.load_from(&JsonFileSource::new(path))?;
    }

    server.run().await?;

    info!("Habit progress MCP server shutdown complete");
    Ok(())
}
