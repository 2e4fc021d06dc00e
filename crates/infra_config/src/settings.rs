//! Run settings.
//!
//! Handles loading of run settings from TOML files with environment
//! variable override support.

use scenario_core::RatioScaling;
use scenario_engine::{DEFAULT_HISTOGRAM_BINS, DEFAULT_PATHS, MAX_PATHS};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use tracing::warn;

use crate::error::ConfigError;

/// Prefix of every environment override.
pub const ENV_PREFIX: &str = "SCENARIO_MC_";

const DEFAULT_SETTINGS_PATH: &str = "config/scenario_mc.toml";
const MAX_HISTOGRAM_BINS: usize = 10_000;
const VALID_LOG_LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];

/// Settings for one simulation run.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RunSettings {
    /// Simulated paths per scenario
    #[serde(default = "default_paths")]
    pub paths: usize,

    /// Base seed; scenario `i` without its own seed uses `seed + i`
    #[serde(default = "default_seed")]
    pub seed: u64,

    /// Directory receiving CSV and JSON artefacts
    #[serde(default = "default_output_dir")]
    pub output_dir: PathBuf,

    /// Log level
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Reward/volatility scaling
    #[serde(default)]
    pub ratio_scaling: RatioScaling,

    /// Histogram bins per scenario
    #[serde(default = "default_histogram_bins")]
    pub histogram_bins: usize,
}

fn default_paths() -> usize {
    DEFAULT_PATHS
}

fn default_seed() -> u64 {
    42
}

fn default_output_dir() -> PathBuf {
    PathBuf::from("reports")
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_histogram_bins() -> usize {
    DEFAULT_HISTOGRAM_BINS
}

impl Default for RunSettings {
    fn default() -> Self {
        Self {
            paths: default_paths(),
            seed: default_seed(),
            output_dir: default_output_dir(),
            log_level: default_log_level(),
            ratio_scaling: RatioScaling::default(),
            histogram_bins: default_histogram_bins(),
        }
    }
}

impl RunSettings {
    /// Load settings from a TOML file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::io(path, e))?;
        Ok(toml::from_str(&content)?)
    }

    /// Load settings from the default path or return defaults
    pub fn load_or_default() -> Self {
        let path = PathBuf::from(DEFAULT_SETTINGS_PATH);
        if !path.exists() {
            return Self::default();
        }
        Self::load(&path).unwrap_or_else(|e| {
            warn!(path = %path.display(), error = %e, "Ignoring unreadable settings file");
            Self::default()
        })
    }

    /// Apply `SCENARIO_MC_*` environment variable overrides
    pub fn with_env_override(self) -> Self {
        self.with_overrides(|key| std::env::var(format!("{}{}", ENV_PREFIX, key)).ok())
    }

    /// Apply overrides from `lookup`, keyed by the suffix after [`ENV_PREFIX`].
    ///
    /// Values that do not parse are ignored with a warning.
    pub fn with_overrides(mut self, lookup: impl Fn(&str) -> Option<String>) -> Self {
        if let Some(paths) = lookup("PATHS") {
            match paths.trim().parse() {
                Ok(p) => self.paths = p,
                Err(_) => warn!(value = %paths, "Ignoring invalid {}PATHS", ENV_PREFIX),
            }
        }

        if let Some(seed) = lookup("SEED") {
            match seed.trim().parse() {
                Ok(s) => self.seed = s,
                Err(_) => warn!(value = %seed, "Ignoring invalid {}SEED", ENV_PREFIX),
            }
        }

        if let Some(output_dir) = lookup("OUTPUT_DIR") {
            self.output_dir = PathBuf::from(output_dir);
        }

        if let Some(log_level) = lookup("LOG_LEVEL") {
            self.log_level = log_level;
        }

        if let Some(scaling) = lookup("RATIO_SCALING") {
            self.ratio_scaling = match scaling.to_lowercase().as_str() {
                "none" => RatioScaling::None,
                "annualised" | "annualized" => RatioScaling::Annualised,
                _ => {
                    warn!(value = %scaling, "Ignoring invalid {}RATIO_SCALING", ENV_PREFIX);
                    self.ratio_scaling
                }
            };
        }

        if let Some(bins) = lookup("HISTOGRAM_BINS") {
            match bins.trim().parse() {
                Ok(b) => self.histogram_bins = b,
                Err(_) => warn!(value = %bins, "Ignoring invalid {}HISTOGRAM_BINS", ENV_PREFIX),
            }
        }

        self
    }

    /// Validate the settings
    pub fn validate(&self) -> Result<(), ConfigError> {
        let mut errors = Vec::new();

        if !VALID_LOG_LEVELS.contains(&self.log_level.to_lowercase().as_str()) {
            errors.push(format!(
                "Invalid log_level '{}'. Valid values: {:?}",
                self.log_level, VALID_LOG_LEVELS
            ));
        }

        if self.paths == 0 {
            errors.push("paths must be greater than 0".to_string());
        }
        if self.paths > MAX_PATHS {
            errors.push(format!(
                "paths {} exceeds maximum allowed ({})",
                self.paths, MAX_PATHS
            ));
        }

        if self.histogram_bins == 0 || self.histogram_bins > MAX_HISTOGRAM_BINS {
            errors.push(format!(
                "histogram_bins {} must be in range [1, {}]",
                self.histogram_bins, MAX_HISTOGRAM_BINS
            ));
        }

        if self.output_dir.as_os_str().is_empty() {
            errors.push("output_dir cannot be empty".to_string());
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(ConfigError::Validation(errors))
        }
    }

    /// Load from file with environment overrides and validate
    pub fn load_with_env_and_validate(path: &Path) -> Result<Self, ConfigError> {
        let settings = Self::load(path)?.with_env_override();
        settings.validate()?;
        Ok(settings)
    }
}
