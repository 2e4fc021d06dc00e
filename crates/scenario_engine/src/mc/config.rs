//! Simulation configuration.

use scenario_core::{RatioScaling, Result, ScenarioError};

/// Maximum number of simulation paths allowed.
pub const MAX_PATHS: usize = 10_000_000;

/// Default number of simulation paths.
pub const DEFAULT_PATHS: usize = 10_000;

/// Label used for errors that do not belong to a named scenario.
const CONFIG_LABEL: &str = "simulation";

/// Monte Carlo simulation configuration.
///
/// Immutable; use [`SimulationConfigBuilder`] to construct instances.
///
/// # Examples
///
/// ```rust
/// use scenario_core::RatioScaling;
/// use scenario_engine::mc::SimulationConfig;
///
/// let config = SimulationConfig::builder()
///     .n_paths(50_000)
///     .ratio_scaling(RatioScaling::None)
///     .build()
///     .expect("valid configuration");
///
/// assert_eq!(config.n_paths(), 50_000);
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct SimulationConfig {
    n_paths: usize,
    ratio_scaling: RatioScaling,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            n_paths: DEFAULT_PATHS,
            ratio_scaling: RatioScaling::default(),
        }
    }
}

impl SimulationConfig {
    /// Creates a new configuration builder.
    #[inline]
    pub fn builder() -> SimulationConfigBuilder {
        SimulationConfigBuilder::default()
    }

    /// Number of simulated joint samples per scenario.
    #[inline]
    pub fn n_paths(&self) -> usize {
        self.n_paths
    }

    /// Reward/volatility scaling.
    #[inline]
    pub fn ratio_scaling(&self) -> RatioScaling {
        self.ratio_scaling
    }

    /// Validates the configuration.
    ///
    /// # Errors
    ///
    /// `InvalidConfiguration` if `n_paths` is 0 or greater than [`MAX_PATHS`].
    pub fn validate(&self) -> Result<()> {
        if self.n_paths == 0 || self.n_paths > MAX_PATHS {
            return Err(ScenarioError::invalid(
                CONFIG_LABEL,
                "n_paths",
                format!(
                    "path count {} must be in range [1, {}]",
                    self.n_paths, MAX_PATHS
                ),
            ));
        }
        Ok(())
    }
}

/// Builder for [`SimulationConfig`].
#[derive(Clone, Debug, Default)]
pub struct SimulationConfigBuilder {
    n_paths: Option<usize>,
    ratio_scaling: RatioScaling,
}

impl SimulationConfigBuilder {
    /// Sets the number of paths, in [1, 10_000_000].
    #[inline]
    pub fn n_paths(mut self, n_paths: usize) -> Self {
        self.n_paths = Some(n_paths);
        self
    }

    /// Sets the reward/volatility scaling.
    #[inline]
    pub fn ratio_scaling(mut self, ratio_scaling: RatioScaling) -> Self {
        self.ratio_scaling = ratio_scaling;
        self
    }

    /// Builds and validates the configuration.
    ///
    /// # Errors
    ///
    /// `InvalidConfiguration` if the path count is out of range.
    pub fn build(self) -> Result<SimulationConfig> {
        let config = SimulationConfig {
            n_paths: self.n_paths.unwrap_or(DEFAULT_PATHS),
            ratio_scaling: self.ratio_scaling,
        };
        config.validate()?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = SimulationConfig::builder().build().unwrap();
        assert_eq!(config.n_paths(), DEFAULT_PATHS);
        assert_eq!(config.ratio_scaling(), RatioScaling::Annualised);
    }

    #[test]
    fn test_zero_paths_rejected() {
        let err = SimulationConfig::builder().n_paths(0).build().unwrap_err();
        assert_eq!(err.field(), "n_paths");
    }

    #[test]
    fn test_too_many_paths_rejected() {
        assert!(SimulationConfig::builder()
            .n_paths(MAX_PATHS + 1)
            .build()
            .is_err());
        assert!(SimulationConfig::builder().n_paths(MAX_PATHS).build().is_ok());
    }
}
