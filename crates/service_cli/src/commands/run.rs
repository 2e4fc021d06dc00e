//! Run command implementation
//!
//! Resolves the scenario set (file, preset or the default preset), runs it
//! and writes the report artefacts.

use infra_config::{RunSettings, ScenarioFile};
use scenario_engine::SimulationConfig;
use scenario_risk::{PresetFamily, ScenarioSet};
use std::path::PathBuf;
use tracing::info;

use crate::report;
use crate::{CliError, Result};

/// Command-line overrides for the run command.
#[derive(Debug, Default)]
pub struct RunArgs {
    /// Scenario file
    pub scenarios: Option<PathBuf>,
    /// Preset family name
    pub preset: Option<String>,
    /// Paths per scenario
    pub paths: Option<usize>,
    /// Base seed
    pub seed: Option<u64>,
    /// Output directory
    pub output_dir: Option<PathBuf>,
    /// Histogram bins
    pub bins: Option<usize>,
}

/// Run the run command
pub fn run(args: RunArgs, settings: RunSettings) -> Result<()> {
    let settings = apply_overrides(settings, &args);
    settings.validate()?;

    let set = resolve_set(&args)?;
    let config = SimulationConfig::builder()
        .n_paths(settings.paths)
        .ratio_scaling(settings.ratio_scaling)
        .build()?;

    info!("Running scenario set '{}'...", set.name());
    info!("  Scenarios: {}", set.scenarios().len());
    info!("  Paths: {}", settings.paths);
    info!("  Base seed: {}", settings.seed);
    info!("  Ratio scaling: {}", settings.ratio_scaling.name());

    let result = set.run(&config, settings.seed)?;

    println!("{}", report::format_summary_table(&result));

    let artefacts =
        report::write_artefacts(&result, &settings.output_dir, settings.histogram_bins)?;
    info!("Summary saved: {}", artefacts.summary.display());
    info!("Sector stats saved: {}", artefacts.sectors.display());
    info!("Histograms saved: {}", artefacts.histograms.display());

    Ok(())
}

fn apply_overrides(mut settings: RunSettings, args: &RunArgs) -> RunSettings {
    if let Some(paths) = args.paths {
        settings.paths = paths;
    }
    if let Some(seed) = args.seed {
        settings.seed = seed;
    }
    if let Some(dir) = &args.output_dir {
        settings.output_dir = dir.clone();
    }
    if let Some(bins) = args.bins {
        settings.histogram_bins = bins;
    }
    settings
}

/// Scenario file if given, else the named preset, else the geopolitical preset.
fn resolve_set(args: &RunArgs) -> Result<ScenarioSet> {
    if let Some(path) = &args.scenarios {
        let file = ScenarioFile::load(path)?;
        return Ok(ScenarioSet::new(file.name, file.weights, file.scenarios)?);
    }

    let family = match &args.preset {
        Some(name) => PresetFamily::from_name(name).ok_or_else(|| {
            let known: Vec<&str> = PresetFamily::all().iter().map(|f| f.name()).collect();
            CliError::InvalidArgument(format!(
                "Unknown preset: {}. Supported: {}",
                name,
                known.join(", ")
            ))
        })?,
        None => PresetFamily::Geopolitical,
    };
    Ok(family.build()?)
}
