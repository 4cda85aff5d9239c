// PeakQC - main.rs
//
// Application entry point. Handles:
// 1. CLI argument parsing
// 2. Config loading (explicit --config or platform default)
// 3. Logging initialisation (debug mode support)
// 4. The aggregation run and its exit code

use clap::Parser;
use peakqc::app::aggregate::{self, AggregateOptions};
use peakqc::platform::config::{self, LoadedConfig, PlatformPaths};
use peakqc::util::{self, error::PeakQcError};
use std::path::PathBuf;

/// PeakQC - Aggregate peak-calling logs into a QC table.
///
/// Reads one `<label>:<value>` log per sample and writes a tab-separated
/// table with a `Sample` and a `Called Peaks` column, one row per log, in
/// the order the logs are given.
#[derive(Parser, Debug)]
#[command(name = "peakqc", version, about)]
struct Cli {
    /// Peak-calling log files, one per sample, in output row order.
    logs: Vec<PathBuf>,

    /// Path of the TSV table to write.
    #[arg(short = 'o', long = "output")]
    output: PathBuf,

    /// Configuration file (defaults to config.toml in the platform config directory).
    #[arg(short = 'c', long = "config")]
    config: Option<PathBuf>,

    /// Enable debug logging (equivalent to RUST_LOG=debug).
    #[arg(short = 'd', long = "debug")]
    debug: bool,
}

/// Load the explicit config file, or the platform default.
fn load_config(cli: &Cli) -> Result<LoadedConfig, PeakQcError> {
    if let Some(ref path) = cli.config {
        return Ok(config::load_config_file(path)?);
    }

    match PlatformPaths::resolve() {
        Some(paths) => Ok(config::load_config(&paths.config_dir)),
        None => Ok(LoadedConfig {
            warnings: vec![
                "Could not determine the platform config directory. Using defaults.".to_string(),
            ],
            ..Default::default()
        }),
    }
}

fn run(cli: &Cli, loaded: LoadedConfig) -> Result<(), PeakQcError> {
    match loaded.path {
        Some(ref path) => tracing::info!(path = %path.display(), "Loaded config file"),
        None => tracing::debug!("No config file; using defaults"),
    }
    for warning in &loaded.warnings {
        tracing::warn!(warning = %warning, "Config validation warning");
    }

    let options = AggregateOptions::from(&loaded.config);
    let summary = aggregate::run(&cli.logs, &cli.output, &options)?;

    tracing::debug!(?summary, "Aggregation finished");
    Ok(())
}

fn main() {
    let cli = Cli::parse();

    // Logging is configured from the config file, so load it first and
    // report its outcome once the subscriber exists.
    let loaded = load_config(&cli);
    let config_level = loaded
        .as_ref()
        .ok()
        .and_then(|l| l.config.log_level.clone());
    util::logging::init(cli.debug, config_level.as_deref());

    tracing::info!(
        version = util::constants::APP_VERSION,
        debug = cli.debug,
        "PeakQC starting"
    );

    if let Err(e) = loaded.and_then(|l| run(&cli, l)) {
        tracing::error!(error = %e, "Aggregation failed");
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}
