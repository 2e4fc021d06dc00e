//! Configuration errors.

use scenario_core::ScenarioError;
use std::path::PathBuf;
use thiserror::Error;

/// Configuration error type
#[derive(Debug, Error)]
pub enum ConfigError {
    /// IO error reading a config file
    #[error("IO error reading {}: {source}", path.display())]
    Io {
        /// File that could not be read
        path: PathBuf,
        /// Underlying error
        #[source]
        source: std::io::Error,
    },

    /// Parse error in a config file
    #[error("Parse error: {0}")]
    Parse(#[from] toml::de::Error),

    /// Validation errors in run settings
    #[error("Validation errors: {}", .0.join("; "))]
    Validation(Vec<String>),

    /// Scenario definition rejected
    #[error(transparent)]
    Scenario(#[from] ScenarioError),
}

impl ConfigError {
    /// Wrap an IO error for `path`.
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_display_joins_messages() {
        let error = ConfigError::Validation(vec!["Error 1".to_string(), "Error 2".to_string()]);
        let display = error.to_string();
        assert!(display.contains("Error 1; Error 2"));
    }

    #[test]
    fn test_scenario_error_is_transparent() {
        let error: ConfigError = ScenarioError::missing("A_Base", "vols").into();
        assert_eq!(
            error.to_string(),
            ScenarioError::missing("A_Base", "vols").to_string()
        );
    }
}
