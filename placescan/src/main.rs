mod aggregate;
mod config;
mod report;
mod scan;
mod source;

use std::path::PathBuf;

use clap::Parser;
use tracing::{error, info};

use common::{PixelDecodeError, TimeWindow, WindowError};

use crate::config::{Config, ConfigError};
use crate::report::ScanReport;
use crate::scan::run_scan;
use crate::source::{SourceError, open_records};

pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[derive(Parser, Debug)]
#[command(name = "placescan")]
#[command(about = "Scan the r/place canvas history over an hour window", long_about = None)]
#[command(version = VERSION)]
struct Cli {
    /// Window start date (YYYY-MM-DD)
    start_date: String,
    /// Window start hour (HH), inclusive
    start_hour: String,
    /// Window end date (YYYY-MM-DD)
    end_date: String,
    /// Window end hour (HH), exclusive
    end_hour: String,
    /// Path to the canvas history CSV (overrides the config file)
    #[arg(short, long, value_name = "FILE")]
    file: Option<PathBuf>,
    /// Path to config file
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,
    /// Emit the report as JSON instead of plain text
    #[arg(long)]
    json: bool,
}

#[derive(Debug, thiserror::Error)]
enum CommandError {
    #[error("Error: {0}")]
    Window(#[from] WindowError),
    #[error("Config error: {0}")]
    Config(#[from] ConfigError),
    #[error("Error: {0}")]
    Source(#[from] SourceError),
    #[error("Coordinate decode error: {0}")]
    Decode(#[from] PixelDecodeError),
    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),
}

fn main() {
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();
    if let Err(e) = run(&cli) {
        error!("{e}");
        std::process::exit(1);
    }
}

fn run(cli: &Cli) -> Result<(), CommandError> {
    let window = TimeWindow::from_hour_args(
        &cli.start_date,
        &cli.start_hour,
        &cli.end_date,
        &cli.end_hour,
    )?;

    let config = match cli.config.as_ref() {
        Some(path) => Config::load(path)?,
        None => Config::default(),
    };
    let data_file = cli.file.clone().unwrap_or(config.data_file);

    let reader = open_records(&data_file)?;
    info!("Starting full scan of {}...", data_file.display());

    let outcome = run_scan(reader, &window, config.canvas_width)?;
    let report = ScanReport::new(&window, outcome);

    if cli.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        println!("{report}");
    }
    Ok(())
}
