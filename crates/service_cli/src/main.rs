//! Scenario MC CLI - Monte Carlo portfolio returns under discrete scenarios
//!
//! # Commands
//!
//! - `scenario-mc run [--scenarios <file> | --preset <name>]` - Simulate a scenario set
//!   and write `mc_summary.csv`, `mc_sector_stats.csv` and `mc_histograms.json`
//! - `scenario-mc check <file>` - Validate a scenario file without sampling
//! - `scenario-mc presets` - List built-in scenario families
//!
//! Any configuration error exits with status 2, any other failure with 1.
//!
//! # Architecture
//!
//! As part of the **S**ervice layer, this crate wires the kernel
//! (`scenario_engine`), the application layer (`scenario_risk`) and the
//! infra layer (`infra_config`) into a single command-line entry point.

use clap::{Parser, Subcommand};
use infra_config::RunSettings;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tracing::{debug, error};
use tracing_subscriber::filter::Directive;
use tracing_subscriber::{fmt, prelude::*, reload, EnvFilter, Registry};

mod commands;
mod error;
mod report;

pub use error::{CliError, Result};

/// Correlated scenario Monte Carlo simulator
#[derive(Parser)]
#[command(name = "scenario-mc")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Run settings file path (defaults to config/scenario_mc.toml when present)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Simulate a scenario set and write CSV/JSON artefacts
    Run {
        /// Scenario file (TOML)
        #[arg(short, long, conflicts_with = "preset")]
        scenarios: Option<PathBuf>,

        /// Built-in scenario family (see `presets`)
        #[arg(short, long)]
        preset: Option<String>,

        /// Number of Monte Carlo paths per scenario
        #[arg(short = 'n', long)]
        paths: Option<usize>,

        /// Base random seed
        #[arg(long)]
        seed: Option<u64>,

        /// Output directory
        #[arg(short, long)]
        output_dir: Option<PathBuf>,

        /// Histogram bins per scenario
        #[arg(long)]
        bins: Option<usize>,
    },

    /// Validate a scenario file without sampling
    Check {
        /// Scenario file (TOML)
        file: PathBuf,
    },

    /// List built-in scenario families
    Presets,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{}", e);
            eprintln!("error: {}", e);
            if e.is_configuration() {
                ExitCode::from(2)
            } else {
                ExitCode::FAILURE
            }
        }
    }
}

fn run(cli: Cli) -> Result<()> {
    // Installed before settings load so their warnings reach stderr.
    let filter = init_tracing(if cli.verbose { "debug" } else { "info" })?;
    let settings = load_settings(cli.config.as_deref())?;
    if !cli.verbose {
        set_log_level(&filter, &settings.log_level)?;
    }
    debug!(?settings, "Run settings resolved");

    match cli.command {
        Commands::Run {
            scenarios,
            preset,
            paths,
            seed,
            output_dir,
            bins,
        } => commands::run::run(
            commands::run::RunArgs {
                scenarios,
                preset,
                paths,
                seed,
                output_dir,
                bins,
            },
            settings,
        ),
        Commands::Check { file } => commands::check::run(&file),
        Commands::Presets => commands::presets::run(),
    }
}

fn load_settings(path: Option<&Path>) -> Result<RunSettings> {
    let settings = match path {
        Some(p) => RunSettings::load(p)?,
        None => RunSettings::load_or_default(),
    };
    Ok(settings.with_env_override())
}

type FilterHandle = reload::Handle<EnvFilter, Registry>;

fn level_filter(level: &str) -> Result<EnvFilter> {
    let directive = level
        .to_lowercase()
        .parse::<Directive>()
        .map_err(|e| CliError::InvalidArgument(format!("log level '{}': {}", level, e)))?;
    Ok(EnvFilter::from_default_env().add_directive(directive))
}

fn init_tracing(level: &str) -> Result<FilterHandle> {
    let (filter, handle) = reload::Layer::new(level_filter(level)?);

    // Logs go to stderr; stdout carries the summary table.
    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(std::io::stderr))
        .init();
    Ok(handle)
}

fn set_log_level(handle: &FilterHandle, level: &str) -> Result<()> {
    handle
        .reload(level_filter(level)?)
        .map_err(|e| CliError::InvalidArgument(format!("log level '{}': {}", level, e)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tracing::Level;

    #[test]
    fn test_unknown_log_level_rejected() {
        assert!(level_filter("warn").is_ok());
        assert!(matches!(
            level_filter("loudly"),
            Err(CliError::InvalidArgument(_))
        ));
    }

    #[test]
    fn test_log_level_replaced_after_settings_load() {
        let (filter, handle) = reload::Layer::new(level_filter("info").unwrap());
        let subscriber = tracing_subscriber::registry().with(filter);

        tracing::subscriber::with_default(subscriber, || {
            assert!(tracing::enabled!(Level::WARN));
            assert!(tracing::enabled!(Level::INFO));

            set_log_level(&handle, "error").unwrap();
            assert!(!tracing::enabled!(Level::INFO));
            assert!(tracing::enabled!(Level::ERROR));
        });
    }
}
