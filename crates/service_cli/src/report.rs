//! Report artefacts for a scenario set run.
//!
//! | File | Content |
//! |------|---------|
//! | `mc_summary.csv` | one row per scenario, portfolio statistics |
//! | `mc_sector_stats.csv` | one row per scenario and sector |
//! | `mc_histograms.json` | per scenario: bin edges, counts, raw sample |
//!
//! Returns are written in native units (0.05 = +5%); only the console
//! table renders percentages.

use chrono::Utc;
use scenario_core::SummaryStatistics;
use scenario_engine::{Histogram, SimulationResult};
use scenario_risk::ScenarioSetReport;
use serde::Serialize;
use std::fmt::Write as _;
use std::fs;
use std::io::{BufWriter, Write as _};
use std::path::{Path, PathBuf};

use crate::{CliError, Result};

/// Portfolio summary file name.
pub const SUMMARY_FILE: &str = "mc_summary.csv";
/// Per-sector statistics file name.
pub const SECTOR_FILE: &str = "mc_sector_stats.csv";
/// Histogram export file name.
pub const HISTOGRAM_FILE: &str = "mc_histograms.json";

#[derive(Serialize)]
struct SummaryRow<'a> {
    scenario: &'a str,
    model: &'static str,
    horizon: f64,
    seed: u64,
    n_paths: usize,
    probability: Option<f64>,
    mean: f64,
    median: f64,
    std_dev: f64,
    p_profit: f64,
    var_5: f64,
    worst_1: f64,
    reward_to_vol: f64,
    ratio_factor: f64,
}

impl<'a> SummaryRow<'a> {
    fn new(result: &'a SimulationResult) -> Self {
        let s = &result.portfolio;
        Self {
            scenario: &result.scenario,
            model: result.model.name(),
            horizon: result.horizon,
            seed: result.seed,
            n_paths: result.n_paths,
            probability: result.probability,
            mean: s.mean,
            median: s.median,
            std_dev: s.std_dev,
            p_profit: s.p_profit,
            var_5: s.var_5,
            worst_1: s.worst_1,
            reward_to_vol: s.reward_to_vol,
            ratio_factor: result.ratio_factor,
        }
    }
}

#[derive(Serialize)]
struct SectorRow<'a> {
    scenario: &'a str,
    sector: &'a str,
    weight: f64,
    mean: f64,
    median: f64,
    std_dev: f64,
    p_profit: f64,
    var_5: f64,
    worst_1: f64,
    reward_to_vol: f64,
}

#[derive(Serialize)]
struct HistogramExport<'a> {
    generated_at: String,
    set: &'a str,
    expected_return: Option<f64>,
    scenarios: Vec<ScenarioHistogram<'a>>,
}

#[derive(Serialize)]
struct ScenarioHistogram<'a> {
    scenario: &'a str,
    mean: f64,
    #[serde(flatten)]
    histogram: Histogram,
    samples: &'a [f64],
}

/// Paths of the artefacts written by [`write_artefacts`].
#[derive(Debug)]
pub struct Artefacts {
    /// Portfolio summary CSV
    pub summary: PathBuf,
    /// Per-sector CSV
    pub sectors: PathBuf,
    /// Histogram JSON
    pub histograms: PathBuf,
}

/// Write every artefact into `output_dir`, creating it if needed.
pub fn write_artefacts(
    report: &ScenarioSetReport,
    output_dir: &Path,
    bins: usize,
) -> Result<Artefacts> {
    fs::create_dir_all(output_dir)?;

    let artefacts = Artefacts {
        summary: output_dir.join(SUMMARY_FILE),
        sectors: output_dir.join(SECTOR_FILE),
        histograms: output_dir.join(HISTOGRAM_FILE),
    };

    write_summary(report, &artefacts.summary)?;
    write_sector_stats(report, &artefacts.sectors)?;
    write_histograms(report, &artefacts.histograms, bins)?;
    Ok(artefacts)
}

fn write_summary(report: &ScenarioSetReport, path: &Path) -> Result<()> {
    let mut writer = csv::Writer::from_path(path)?;
    for result in &report.results {
        writer.serialize(SummaryRow::new(result))?;
    }
    writer.flush()?;
    Ok(())
}

fn write_sector_stats(report: &ScenarioSetReport, path: &Path) -> Result<()> {
    let mut writer = csv::Writer::from_path(path)?;
    for result in &report.results {
        for sector in &result.sectors {
            let s = &sector.stats;
            writer.serialize(SectorRow {
                scenario: &result.scenario,
                sector: &sector.sector,
                weight: sector.weight,
                mean: s.mean,
                median: s.median,
                std_dev: s.std_dev,
                p_profit: s.p_profit,
                var_5: s.var_5,
                worst_1: s.worst_1,
                reward_to_vol: s.reward_to_vol,
            })?;
        }
    }
    writer.flush()?;
    Ok(())
}

fn write_histograms(report: &ScenarioSetReport, path: &Path, bins: usize) -> Result<()> {
    let scenarios = report
        .results
        .iter()
        .map(|result| -> Result<ScenarioHistogram> {
            let histogram = result.histogram(bins).ok_or_else(|| {
                CliError::Report(format!(
                    "cannot bin the sample of scenario '{}' into {} bins",
                    result.scenario, bins
                ))
            })?;
            Ok(ScenarioHistogram {
                scenario: &result.scenario,
                mean: result.mean(),
                histogram,
                samples: result.samples(),
            })
        })
        .collect::<Result<Vec<_>>>()?;

    let export = HistogramExport {
        generated_at: Utc::now().to_rfc3339(),
        set: &report.set,
        expected_return: report.expected_return,
        scenarios,
    };

    let mut writer = BufWriter::new(fs::File::create(path)?);
    serde_json::to_writer(&mut writer, &export)?;
    writer.flush()?;
    Ok(())
}

fn pct(x: f64) -> String {
    format!("{:+.2}%", x * 100.0)
}

fn stats_line(label: &str, s: &SummaryStatistics) -> String {
    format!(
        "{:<22} {:>9} {:>9} {:>8} {:>7.1}% {:>9} {:>9} {:>7.2}",
        label,
        pct(s.mean),
        pct(s.median),
        format!("{:.2}%", s.std_dev * 100.0),
        s.p_profit * 100.0,
        pct(s.var_5),
        pct(s.worst_1),
        s.reward_to_vol,
    )
}

/// Render the console summary: one portfolio line per scenario, then the
/// sector breakdown, then the probability-weighted headline if present.
pub fn format_summary_table(report: &ScenarioSetReport) -> String {
    let header = format!(
        "{:<22} {:>9} {:>9} {:>8} {:>8} {:>9} {:>9} {:>7}",
        "Scenario", "Mean", "Median", "Std", "P(>0)", "VaR 5%", "Worst 1%", "R/Vol"
    );
    let rule = "-".repeat(header.len());

    let mut out = String::new();
    let _ = writeln!(out, "Scenario set: {}", report.set);
    let _ = writeln!(out, "{}", header);
    let _ = writeln!(out, "{}", rule);
    for result in &report.results {
        let _ = writeln!(out, "{}", stats_line(&result.scenario, &result.portfolio));
    }

    for result in &report.results {
        let _ = writeln!(
            out,
            "\n{} ({}, {} paths, seed {}, ratio x{:.3})",
            result.scenario,
            result.model,
            result.n_paths,
            result.seed,
            result.ratio_factor
        );
        for sector in &result.sectors {
            let label = format!("  {} {:.0}%", sector.sector, sector.weight * 100.0);
            let _ = writeln!(out, "{}", stats_line(&label, &sector.stats));
        }
    }

    if let Some(e) = report.expected_return {
        let _ = writeln!(out, "\nProbability-weighted expected return: {}", pct(e));
    }
    out
}
