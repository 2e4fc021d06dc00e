//! CLI error types.

use infra_config::ConfigError;
use scenario_core::ScenarioError;
use thiserror::Error;

/// CLI error type
#[derive(Debug, Error)]
pub enum CliError {
    /// Scenario, weights or aggregation input rejected
    #[error(transparent)]
    Scenario(#[from] ScenarioError),

    /// Scenario file or run settings rejected
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// CSV writing error
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// JSON writing error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Invalid command-line argument
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// Report could not be produced
    #[error("Report error: {0}")]
    Report(String),
}

impl CliError {
    /// Whether the failure is a configuration problem rather than an
    /// environment one (IO, serialisation).
    pub fn is_configuration(&self) -> bool {
        matches!(
            self,
            Self::Scenario(_) | Self::Config(_) | Self::InvalidArgument(_)
        )
    }
}

/// Result type for CLI operations
pub type Result<T> = std::result::Result<T, CliError>;
