//! Scenario sets sharing one portfolio.

use rayon::prelude::*;
use scenario_core::{PortfolioWeights, Result, ScenarioError, ScenarioParameters};
use scenario_engine::{simulate_seeded, SimulationConfig, SimulationResult};
use serde::Serialize;
use std::collections::HashSet;
use tracing::info;

use crate::aggregate::{aggregate_across_scenarios, check_probabilities};

/// A portfolio and the scenarios it is evaluated under.
///
/// Every scenario is checked against the weights on construction, so a
/// set that exists can always be run.
#[derive(Clone, Debug)]
pub struct ScenarioSet {
    name: String,
    weights: PortfolioWeights,
    scenarios: Vec<ScenarioParameters>,
}

/// Results of running a [`ScenarioSet`].
#[derive(Clone, Debug, Serialize)]
pub struct ScenarioSetReport {
    /// Name of the set.
    pub set: String,
    /// One result per scenario, in set order.
    pub results: Vec<SimulationResult>,
    /// Probability-weighted portfolio return, when every scenario
    /// declares a probability.
    pub expected_return: Option<f64>,
}

impl ScenarioSet {
    /// Create a scenario set.
    ///
    /// # Errors
    ///
    /// `InvalidConfiguration` if there are no scenarios, two scenarios share
    /// a name, or any scenario's sectors differ from the weights' sectors.
    pub fn new(
        name: impl Into<String>,
        weights: PortfolioWeights,
        scenarios: Vec<ScenarioParameters>,
    ) -> Result<Self> {
        let name = name.into();
        if scenarios.is_empty() {
            return Err(ScenarioError::invalid(
                name,
                "scenarios",
                "a scenario set needs at least one scenario",
            ));
        }

        let mut seen = HashSet::new();
        for scenario in &scenarios {
            if !seen.insert(scenario.name()) {
                return Err(ScenarioError::invalid(
                    scenario.name(),
                    "name",
                    "scenario names must be unique within a set",
                ));
            }
            scenario.check_weights(&weights)?;
        }

        Ok(Self {
            name,
            weights,
            scenarios,
        })
    }

    /// Set name.
    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Portfolio weights.
    #[inline]
    pub fn weights(&self) -> &PortfolioWeights {
        &self.weights
    }

    /// Scenarios in run order.
    #[inline]
    pub fn scenarios(&self) -> &[ScenarioParameters] {
        &self.scenarios
    }

    /// Seed used for the scenario at `index`: its own seed if declared,
    /// otherwise `base_seed + index`.
    pub fn seed_for(&self, index: usize, base_seed: u64) -> u64 {
        self.scenarios
            .get(index)
            .and_then(ScenarioParameters::seed)
            .unwrap_or_else(|| base_seed.wrapping_add(index as u64))
    }

    /// Declared probabilities, if every scenario has one.
    ///
    /// # Errors
    ///
    /// `InvalidConfiguration` if only some scenarios declare a probability,
    /// or the declared probabilities fail [`check_probabilities`].
    pub fn probabilities(&self) -> Result<Option<Vec<f64>>> {
        let declared: Vec<f64> = self
            .scenarios
            .iter()
            .filter_map(ScenarioParameters::probability)
            .collect();

        if declared.is_empty() {
            return Ok(None);
        }
        if declared.len() != self.scenarios.len() {
            let missing = self
                .scenarios
                .iter()
                .find(|s| s.probability().is_none())
                .map(|s| s.name().to_string())
                .unwrap_or_else(|| self.name.clone());
            return Err(ScenarioError::invalid(
                missing,
                "probability",
                "either every scenario in a set declares a probability or none does",
            ));
        }
        check_probabilities(&self.name, &declared)?;
        Ok(Some(declared))
    }

    /// Factorise every scenario's horizon covariance matrix in set order.
    ///
    /// # Errors
    ///
    /// `InvalidConfiguration` on field `correlation` for the first scenario
    /// whose matrix is not positive semi-definite.
    pub fn check_covariances(&self) -> Result<()> {
        for scenario in &self.scenarios {
            scenario
                .correlation()
                .covariance(&scenario.horizon_vols())
                .cholesky()
                .map_err(|e| {
                    ScenarioError::invalid(
                        scenario.name(),
                        "correlation",
                        format!("horizon covariance matrix rejected: {}", e),
                    )
                })?;
        }
        Ok(())
    }

    /// Probability-weighted expected return of `results`.
    ///
    /// # Errors
    ///
    /// `InvalidConfiguration` if any scenario lacks a probability or the
    /// probabilities fail [`aggregate_across_scenarios`].
    pub fn expected_return(&self, results: &[SimulationResult]) -> Result<f64> {
        match self.probabilities()? {
            Some(p) => aggregate_across_scenarios(results, &p),
            None => Err(ScenarioError::missing(self.name.clone(), "probability")),
        }
    }

    /// Run every scenario in parallel.
    ///
    /// Each scenario owns an independent stream seeded by
    /// [`seed_for`](Self::seed_for), so the output equals
    /// [`run_sequential`](Self::run_sequential).
    ///
    /// # Errors
    ///
    /// Invalid configuration, probabilities or covariance matrices are
    /// reported before any scenario is sampled; covariances fail on the
    /// first offending scenario in set order.
    pub fn run(&self, config: &SimulationConfig, base_seed: u64) -> Result<ScenarioSetReport> {
        config.validate()?;
        let probabilities = self.probabilities()?;
        self.check_covariances()?;

        info!(
            set = %self.name,
            scenarios = self.scenarios.len(),
            n_paths = config.n_paths(),
            base_seed,
            "Running scenario set"
        );

        let results = self
            .scenarios
            .par_iter()
            .enumerate()
            .map(|(i, scenario)| {
                simulate_seeded(scenario, &self.weights, config, self.seed_for(i, base_seed))
            })
            .collect::<Result<Vec<_>>>()?;

        self.report(results, probabilities)
    }

    /// Run every scenario on the calling thread.
    ///
    /// # Errors
    ///
    /// As for [`run`](Self::run).
    pub fn run_sequential(
        &self,
        config: &SimulationConfig,
        base_seed: u64,
    ) -> Result<ScenarioSetReport> {
        config.validate()?;
        let probabilities = self.probabilities()?;
        self.check_covariances()?;

        let results = self
            .scenarios
            .iter()
            .enumerate()
            .map(|(i, scenario)| {
                simulate_seeded(scenario, &self.weights, config, self.seed_for(i, base_seed))
            })
            .collect::<Result<Vec<_>>>()?;

        self.report(results, probabilities)
    }

    fn report(
        &self,
        results: Vec<SimulationResult>,
        probabilities: Option<Vec<f64>>,
    ) -> Result<ScenarioSetReport> {
        let expected_return = probabilities
            .map(|p| aggregate_across_scenarios(&results, &p))
            .transpose()?;

        if let Some(e) = expected_return {
            info!(set = %self.name, expected_return = e, "Probability-weighted return");
        }

        Ok(ScenarioSetReport {
            set: self.name.clone(),
            results,
            expected_return,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use scenario_core::ReturnModel;

    const SECTORS: [&str; 2] = ["Defense", "Gold"];

    fn scenario(name: &str, probability: Option<f64>) -> ScenarioParameters {
        let s = ScenarioParameters::from_vectors(
            name,
            &SECTORS,
            &[0.18, 0.08],
            &[0.20, 0.16],
            &[vec![1.0, -0.15], vec![-0.15, 1.0]],
            0.5,
            ReturnModel::Normal,
        )
        .unwrap();
        match probability {
            Some(p) => s.with_probability(p).unwrap(),
            None => s,
        }
    }

    fn weights() -> PortfolioWeights {
        PortfolioWeights::new(&SECTORS, &[0.6, 0.4]).unwrap()
    }

    fn config() -> SimulationConfig {
        SimulationConfig::builder().n_paths(500).build().unwrap()
    }

    #[test]
    fn test_empty_set_rejected() {
        let err = ScenarioSet::new("Empty", weights(), vec![]).unwrap_err();
        assert_eq!(err.field(), "scenarios");
    }

    #[test]
    fn test_duplicate_names_rejected() {
        let err = ScenarioSet::new(
            "Dup",
            weights(),
            vec![scenario("A", None), scenario("A", None)],
        )
        .unwrap_err();
        assert_eq!(err.scenario(), "A");
        assert_eq!(err.field(), "name");
    }

    #[test]
    fn test_sector_mismatch_rejected() {
        let other = PortfolioWeights::new(&["Defense", "Energy"], &[0.5, 0.5]).unwrap();
        let err = ScenarioSet::new("Mismatch", other, vec![scenario("A", None)]).unwrap_err();
        assert_eq!(err.field(), "weights");
    }

    #[test]
    fn test_seed_policy() {
        let set = ScenarioSet::new(
            "Seeds",
            weights(),
            vec![scenario("A", None), scenario("B", None).with_seed(99)],
        )
        .unwrap();
        assert_eq!(set.seed_for(0, 42), 42);
        assert_eq!(set.seed_for(1, 42), 99);
    }

    #[test]
    fn test_partial_probabilities_rejected_before_sampling() {
        let set = ScenarioSet::new(
            "Partial",
            weights(),
            vec![scenario("A", Some(0.5)), scenario("B", None)],
        )
        .unwrap();
        let err = set.run(&config(), 1).unwrap_err();
        assert_eq!(err.scenario(), "B");
        assert_eq!(err.field(), "probability");
    }

    #[test]
    fn test_no_probabilities_no_headline() {
        let set = ScenarioSet::new(
            "Plain",
            weights(),
            vec![scenario("A", None), scenario("B", None)],
        )
        .unwrap();
        let report = set.run(&config(), 1).unwrap();
        assert_eq!(report.expected_return, None);
        assert!(set.expected_return(&report.results).is_err());
    }

    #[test]
    fn test_bad_probability_sum_rejected_before_sampling() {
        let set = ScenarioSet::new(
            "Short",
            weights(),
            vec![scenario("A", Some(0.5)), scenario("B", Some(0.4))],
        )
        .unwrap();

        let err = set.probabilities().unwrap_err();
        assert_eq!(err.scenario(), "Short");
        assert_eq!(err.field(), "probabilities");
        assert!(err.to_string().contains("0.9"));

        // Raised by the set itself, not by aggregation after sampling.
        for err in [
            set.run(&config(), 1).unwrap_err(),
            set.run_sequential(&config(), 1).unwrap_err(),
        ] {
            assert_eq!(err.scenario(), "Short");
            assert_eq!(err.field(), "probabilities");
        }
    }

    fn three_sector(name: &str, correlation: &[Vec<f64>]) -> ScenarioParameters {
        ScenarioParameters::from_vectors(
            name,
            &["Defense", "Energy", "Gold"],
            &[0.18, 0.12, 0.08],
            &[0.20, 0.28, 0.16],
            correlation,
            1.0,
            ReturnModel::Normal,
        )
        .unwrap()
    }

    #[test]
    fn test_first_indefinite_covariance_reported() {
        let good = vec![
            vec![1.0, 0.3, 0.0],
            vec![0.3, 1.0, 0.0],
            vec![0.0, 0.0, 1.0],
        ];
        let bad = vec![
            vec![1.0, 0.9, -0.9],
            vec![0.9, 1.0, 0.9],
            vec![-0.9, 0.9, 1.0],
        ];
        let set = ScenarioSet::new(
            "Mixed",
            PortfolioWeights::new(&["Defense", "Energy", "Gold"], &[0.4, 0.3, 0.3]).unwrap(),
            vec![
                three_sector("S1", &good),
                three_sector("S2", &bad),
                three_sector("S3", &bad),
            ],
        )
        .unwrap();

        for _ in 0..10 {
            let err = set.run(&config(), 1).unwrap_err();
            assert_eq!(err.scenario(), "S2");
            assert_eq!(err.field(), "correlation");
        }
        assert_eq!(set.check_covariances().unwrap_err().scenario(), "S2");
    }
}
