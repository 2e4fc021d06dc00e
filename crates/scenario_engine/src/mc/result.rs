//! Simulation results.

use scenario_core::math::statistics::percentile;
use scenario_core::{ReturnModel, SummaryStatistics};
use serde::Serialize;

use crate::histogram::Histogram;

/// Summary statistics of one sector's simulated returns.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct SectorStatistics {
    /// Sector name.
    pub sector: String,
    /// Portfolio weight of the sector.
    pub weight: f64,
    /// Statistics of the sector's simple returns.
    pub stats: SummaryStatistics,
}

/// Output of one [`simulate`](super::simulate) call.
///
/// Carries the raw portfolio sample (native units, 0.05 = +5%) alongside
/// the portfolio statistics and one block per sector. Nothing here is
/// persisted by the engine.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct SimulationResult {
    /// Scenario name.
    pub scenario: String,
    /// Return model used for every sector.
    pub model: ReturnModel,
    /// Horizon in years.
    pub horizon: f64,
    /// Seed of the random stream.
    pub seed: u64,
    /// Number of simulated paths.
    pub n_paths: usize,
    /// Multiplier applied to `mean / std` in every `reward_to_vol`.
    pub ratio_factor: f64,
    /// Declared scenario probability, if any.
    pub probability: Option<f64>,
    /// Portfolio statistics.
    pub portfolio: SummaryStatistics,
    /// Per-sector statistics, in sector order.
    pub sectors: Vec<SectorStatistics>,
    /// Simulated portfolio returns, one per path.
    #[serde(skip)]
    pub samples: Vec<f64>,
}

impl SimulationResult {
    /// Portfolio mean return.
    #[inline]
    pub fn mean(&self) -> f64 {
        self.portfolio.mean
    }

    /// Raw portfolio sample.
    #[inline]
    pub fn samples(&self) -> &[f64] {
        &self.samples
    }

    /// Portfolio return percentile, `p` in [0, 100].
    pub fn percentile(&self, p: f64) -> Option<f64> {
        percentile(&self.samples, p)
    }

    /// Statistics for a named sector.
    pub fn sector(&self, name: &str) -> Option<&SectorStatistics> {
        self.sectors.iter().find(|s| s.sector == name)
    }

    /// Equal-width histogram of the portfolio sample.
    pub fn histogram(&self, bins: usize) -> Option<Histogram> {
        Histogram::from_samples(&self.samples, bins)
    }
}
