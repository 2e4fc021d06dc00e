//! Scenario definitions.
//!
//! A [`ScenarioParameters`] bundles the sector assumptions, the sector
//! correlation matrix, the horizon and the [`ReturnModel`] for one
//! hypothetical future state. Construction validates everything that can
//! be checked without sampling; the covariance factorisation is left to
//! the simulator because it depends on the horizon-scaled volatilities.

use serde::{Deserialize, Serialize};

use super::error::{Result, ScenarioError};
use super::sector::Sector;
use super::weights::PortfolioWeights;
use crate::math::correlation::{CorrelationError, CorrelationMatrix};

/// Single-period return formulation applied to every sector of a scenario.
///
/// # Variants
/// - `Normal`: additive normal returns, `r = mean_h + vol_h·W`
/// - `LogNormal`: single-period GBM, `r = exp(mean_h - ½vol_h² + vol_h·W) - 1`
///
/// The two give materially different tails; a scenario family must pick one.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReturnModel {
    /// Additive normal returns.
    #[default]
    Normal,
    /// Log-normal (geometric) returns.
    #[serde(alias = "gbm", alias = "log_normal")]
    LogNormal,
}

impl ReturnModel {
    /// Short lowercase name, matching the configuration file spelling.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Normal => "normal",
            Self::LogNormal => "lognormal",
        }
    }

    /// Deterministic part of the horizon return (or log-return).
    #[inline]
    pub fn drift(&self, mean_h: f64, vol_h: f64) -> f64 {
        match self {
            Self::Normal => mean_h,
            Self::LogNormal => mean_h - 0.5 * vol_h * vol_h,
        }
    }

    /// Convert drift plus a correlated shock (`vol_h·W`) into a simple return.
    #[inline]
    pub fn simple_return(&self, drift: f64, shock: f64) -> f64 {
        match self {
            Self::Normal => drift + shock,
            Self::LogNormal => (drift + shock).exp_m1(),
        }
    }
}

impl std::fmt::Display for ReturnModel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// A validated scenario definition.
///
/// # Invariants
///
/// - At least one sector; sector names unique and non-blank
/// - Finite expected returns, finite non-negative volatilities
/// - Correlation matrix square with one row per sector, symmetric,
///   unit diagonal, entries in [-1, 1]
/// - Horizon finite and strictly positive
/// - Probability, when present, in [0, 1]
#[derive(Clone, Debug, PartialEq)]
pub struct ScenarioParameters {
    name: String,
    description: Option<String>,
    sectors: Vec<Sector>,
    correlation: CorrelationMatrix,
    horizon: f64,
    model: ReturnModel,
    probability: Option<f64>,
    seed: Option<u64>,
}

impl ScenarioParameters {
    /// Create a scenario from sectors and a correlation matrix given by rows.
    ///
    /// # Errors
    ///
    /// `InvalidConfiguration` naming the scenario and the failing field.
    pub fn new(
        name: impl Into<String>,
        mut sectors: Vec<Sector>,
        correlation: &[Vec<f64>],
        horizon: f64,
        model: ReturnModel,
    ) -> Result<Self> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(ScenarioError::invalid("<unnamed>", "name", "must not be blank"));
        }
        if sectors.is_empty() {
            return Err(ScenarioError::invalid(&name, "sectors", "at least one sector is required"));
        }

        // Names are compared with portfolio sector names, which are trimmed too.
        for sector in &mut sectors {
            let trimmed = sector.name.trim();
            if trimmed.len() != sector.name.len() {
                sector.name = trimmed.to_string();
            }
        }

        for (i, sector) in sectors.iter().enumerate() {
            if sector.name.is_empty() {
                return Err(ScenarioError::invalid(
                    &name,
                    "sectors",
                    format!("sector {} has a blank name", i),
                ));
            }
            if sectors[..i].iter().any(|s| s.name == sector.name) {
                return Err(ScenarioError::invalid(
                    &name,
                    "sectors",
                    format!("duplicate sector '{}'", sector.name),
                ));
            }
            if !sector.expected_return.is_finite() {
                return Err(ScenarioError::invalid(
                    &name,
                    "means",
                    format!("expected return for '{}' is not finite", sector.name),
                ));
            }
            if !sector.volatility.is_finite() || sector.volatility < 0.0 {
                return Err(ScenarioError::invalid(
                    &name,
                    "vols",
                    format!(
                        "volatility {} for '{}' must be finite and non-negative",
                        sector.volatility, sector.name
                    ),
                ));
            }
        }

        if !horizon.is_finite() || horizon <= 0.0 {
            return Err(ScenarioError::invalid(
                &name,
                "horizon",
                format!("horizon {} must be a positive number of years", horizon),
            ));
        }

        if correlation.len() != sectors.len() {
            return Err(ScenarioError::invalid(
                &name,
                "correlation",
                format!(
                    "{} rows for {} sectors",
                    correlation.len(),
                    sectors.len()
                ),
            ));
        }
        let correlation = CorrelationMatrix::from_rows(correlation)
            .map_err(|e| correlation_error(&name, e))?;

        Ok(Self {
            name,
            description: None,
            sectors,
            correlation,
            horizon,
            model,
            probability: None,
            seed: None,
        })
    }

    /// Create a scenario from parallel name / mean / volatility vectors.
    ///
    /// # Errors
    ///
    /// `InvalidConfiguration` if the vectors differ in length, plus every
    /// check performed by [`ScenarioParameters::new`].
    pub fn from_vectors<S: AsRef<str>>(
        name: impl Into<String>,
        sector_names: &[S],
        means: &[f64],
        vols: &[f64],
        correlation: &[Vec<f64>],
        horizon: f64,
        model: ReturnModel,
    ) -> Result<Self> {
        let name = name.into();
        if means.len() != sector_names.len() {
            return Err(ScenarioError::invalid(
                &name,
                "means",
                format!("{} means for {} sectors", means.len(), sector_names.len()),
            ));
        }
        if vols.len() != sector_names.len() {
            return Err(ScenarioError::invalid(
                &name,
                "vols",
                format!("{} vols for {} sectors", vols.len(), sector_names.len()),
            ));
        }

        let sectors = sector_names
            .iter()
            .zip(means.iter().zip(vols))
            .map(|(n, (&m, &v))| Sector::new(n.as_ref(), m, v))
            .collect();

        Self::new(name, sectors, correlation, horizon, model)
    }

    /// Attach an occurrence probability used for cross-scenario weighting.
    ///
    /// # Errors
    ///
    /// `InvalidConfiguration` if the probability is outside [0, 1].
    pub fn with_probability(mut self, probability: f64) -> Result<Self> {
        if !probability.is_finite() || !(0.0..=1.0).contains(&probability) {
            return Err(ScenarioError::invalid(
                &self.name,
                "probability",
                format!("probability {} must lie in [0, 1]", probability),
            ));
        }
        self.probability = Some(probability);
        Ok(self)
    }

    /// Pin the random seed used when this scenario runs inside a set.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Attach a free-text description.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Scenario name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Optional description.
    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    /// Sectors in declaration order.
    pub fn sectors(&self) -> &[Sector] {
        &self.sectors
    }

    /// Number of sectors.
    pub fn dim(&self) -> usize {
        self.sectors.len()
    }

    /// Sector correlation matrix.
    pub fn correlation(&self) -> &CorrelationMatrix {
        &self.correlation
    }

    /// Horizon in years.
    pub fn horizon(&self) -> f64 {
        self.horizon
    }

    /// Return formulation.
    pub fn model(&self) -> ReturnModel {
        self.model
    }

    /// Occurrence probability, if declared.
    pub fn probability(&self) -> Option<f64> {
        self.probability
    }

    /// Pinned seed, if declared.
    pub fn seed(&self) -> Option<u64> {
        self.seed
    }

    /// Horizon-scaled expected returns, `mean_annual · horizon`.
    pub fn horizon_means(&self) -> Vec<f64> {
        self.sectors
            .iter()
            .map(|s| s.horizon_mean(self.horizon))
            .collect()
    }

    /// Horizon-scaled volatilities, `vol_annual · sqrt(horizon)`.
    pub fn horizon_vols(&self) -> Vec<f64> {
        self.sectors
            .iter()
            .map(|s| s.horizon_volatility(self.horizon))
            .collect()
    }

    /// Verify that `weights` combine exactly this scenario's sectors, in order.
    ///
    /// # Errors
    ///
    /// `InvalidConfiguration` on a cardinality or ordering mismatch.
    pub fn check_weights(&self, weights: &PortfolioWeights) -> Result<()> {
        if weights.len() != self.dim() {
            return Err(ScenarioError::invalid(
                &self.name,
                "weights",
                format!("{} weights for {} sectors", weights.len(), self.dim()),
            ));
        }
        for (i, (sector, name)) in self.sectors.iter().zip(weights.sectors()).enumerate() {
            if &sector.name != name {
                return Err(ScenarioError::invalid(
                    &self.name,
                    "weights",
                    format!(
                        "weight {} is for '{}' but sector {} is '{}'",
                        i, name, i, sector.name
                    ),
                ));
            }
        }
        Ok(())
    }
}

fn correlation_error(scenario: &str, err: CorrelationError) -> ScenarioError {
    ScenarioError::invalid(scenario, "correlation", err.to_string())
}
