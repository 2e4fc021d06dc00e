//! Error types for scenario configuration.
//!
//! Every failure intrinsic to the simulator is a configuration problem:
//! malformed vectors, weights, correlation matrices or missing inputs.
//! None of them is retryable with the same inputs.

use thiserror::Error;

/// Categorised scenario errors.
///
/// # Examples
/// ```
/// use scenario_core::ScenarioError;
///
/// let err = ScenarioError::invalid("Base", "weights", "sum is 2.0, expected 1.0");
/// assert_eq!(
///     err.to_string(),
///     "Invalid configuration in scenario 'Base', field 'weights': sum is 2.0, expected 1.0"
/// );
/// assert_eq!(err.field(), "weights");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ScenarioError {
    /// Malformed scenario, weights or correlation input.
    #[error("Invalid configuration in scenario '{scenario}', field '{field}': {reason}")]
    InvalidConfiguration {
        /// Scenario (or portfolio) the failing field belongs to.
        scenario: String,
        /// Name of the failing field.
        field: String,
        /// Human-readable description of the violation.
        reason: String,
    },
}

impl ScenarioError {
    /// Create an `InvalidConfiguration` error.
    pub fn invalid(
        scenario: impl Into<String>,
        field: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        Self::InvalidConfiguration {
            scenario: scenario.into(),
            field: field.into(),
            reason: reason.into(),
        }
    }

    /// Create an error for an upstream input that was not supplied.
    pub fn missing(scenario: impl Into<String>, field: impl Into<String>) -> Self {
        Self::invalid(scenario, field, "value is missing")
    }

    /// Scenario the error refers to.
    pub fn scenario(&self) -> &str {
        match self {
            Self::InvalidConfiguration { scenario, .. } => scenario,
        }
    }

    /// Field the error refers to.
    pub fn field(&self) -> &str {
        match self {
            Self::InvalidConfiguration { field, .. } => field,
        }
    }
}

/// Result alias for scenario operations.
pub type Result<T> = std::result::Result<T, ScenarioError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_is_invalid_configuration() {
        let err = ScenarioError::missing("C_Sensitivity", "vols");
        assert_eq!(err.scenario(), "C_Sensitivity");
        assert_eq!(err.field(), "vols");
        assert!(err.to_string().contains("value is missing"));
    }
}
