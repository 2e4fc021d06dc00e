//! Correlated scenario simulator.
//!
//! # Algorithm
//!
//! 1. Scale annual inputs to the horizon: `μ_h = μ·T`, `σ_h = σ·√T`
//! 2. Build `Σ = diag(σ_h) · C · diag(σ_h)` and factorise `Σ = L·Lᵀ`
//! 3. Per path, draw `Z ~ N(0, I)` and form the shock `X = L·Z`
//! 4. Apply the scenario's [`ReturnModel`](scenario_core::ReturnModel):
//!    - `Normal`: `r = μ_h + X`
//!    - `LogNormal`: `r = exp(μ_h - ½σ_h² + X) - 1`
//! 5. Portfolio return `Σ wᵢ rᵢ`
//! 6. Reduce the portfolio and each sector to summary statistics
//!
//! All validation happens before the first draw.

use scenario_core::{
    PortfolioWeights, Result, ScenarioError, ScenarioParameters, SummaryStatistics,
};
use tracing::debug;

use super::config::SimulationConfig;
use super::result::{SectorStatistics, SimulationResult};
use crate::rng::ScenarioRng;

/// Simulate one scenario with a caller-owned random stream.
///
/// The stream is consumed path-major: `n_paths × n_sectors` standard normals.
/// The seed recorded on the result is the seed the stream was created from.
///
/// # Errors
///
/// `InvalidConfiguration` if the configuration is invalid, the weights do
/// not match the scenario's sectors, or the horizon covariance matrix is
/// not positive semi-definite. No sampling happens in any of these cases.
pub fn simulate(
    scenario: &ScenarioParameters,
    weights: &PortfolioWeights,
    config: &SimulationConfig,
    rng: &mut ScenarioRng,
) -> Result<SimulationResult> {
    config.validate()?;
    scenario.check_weights(weights)?;

    let dim = scenario.dim();
    let n_paths = config.n_paths();
    let model = scenario.model();
    let horizon = scenario.horizon();

    let mean_h = scenario.horizon_means();
    let vol_h = scenario.horizon_vols();
    let drift: Vec<f64> = mean_h
        .iter()
        .zip(&vol_h)
        .map(|(&m, &v)| model.drift(m, v))
        .collect();

    let covariance = scenario.correlation().covariance(&vol_h);
    let cholesky = covariance.cholesky().map_err(|e| {
        ScenarioError::invalid(
            scenario.name(),
            "correlation",
            format!("horizon covariance matrix rejected: {}", e),
        )
    })?;

    debug!(
        scenario = scenario.name(),
        model = %model,
        horizon,
        n_paths,
        seed = rng.seed(),
        "Simulating scenario"
    );

    let w = weights.as_slice();
    let mut z = vec![0.0; dim];
    let mut shock = vec![0.0; dim];
    let mut path_returns = vec![0.0; dim];
    let mut sector_samples: Vec<Vec<f64>> =
        (0..dim).map(|_| Vec::with_capacity(n_paths)).collect();
    let mut portfolio_samples = Vec::with_capacity(n_paths);

    for _ in 0..n_paths {
        rng.fill_normal(&mut z);
        cholesky.transform_into(&z, &mut shock);

        for i in 0..dim {
            let r = model.simple_return(drift[i], shock[i]);
            path_returns[i] = r;
            sector_samples[i].push(r);
        }
        portfolio_samples.push(weights.combine(&path_returns));
    }

    let ratio_factor = config.ratio_scaling().factor(horizon);
    let reduce = |samples: &[f64]| {
        SummaryStatistics::from_samples(samples, ratio_factor).ok_or_else(|| {
            ScenarioError::invalid(scenario.name(), "n_paths", "no samples were drawn")
        })
    };

    let portfolio = reduce(&portfolio_samples)?;
    let sectors = scenario
        .sectors()
        .iter()
        .zip(&sector_samples)
        .zip(w)
        .map(|((sector, samples), &weight)| -> Result<SectorStatistics> {
            Ok(SectorStatistics {
                sector: sector.name.clone(),
                weight,
                stats: reduce(samples)?,
            })
        })
        .collect::<Result<Vec<_>>>()?;

    debug!(
        scenario = scenario.name(),
        mean = portfolio.mean,
        p_profit = portfolio.p_profit,
        var_5 = portfolio.var_5,
        "Scenario simulated"
    );

    Ok(SimulationResult {
        scenario: scenario.name().to_string(),
        model,
        horizon,
        seed: rng.seed(),
        n_paths,
        ratio_factor,
        probability: scenario.probability(),
        portfolio,
        sectors,
        samples: portfolio_samples,
    })
}

/// Simulate one scenario with a fresh stream created from `seed`.
///
/// # Errors
///
/// As for [`simulate`].
pub fn simulate_seeded(
    scenario: &ScenarioParameters,
    weights: &PortfolioWeights,
    config: &SimulationConfig,
    seed: u64,
) -> Result<SimulationResult> {
    let mut rng = ScenarioRng::from_seed(seed);
    simulate(scenario, weights, config, &mut rng)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use scenario_core::ReturnModel;

    const SECTORS: [&str; 4] = ["Defense", "Energy", "Gold", "Utilities"];

    fn reference_correlation() -> Vec<Vec<f64>> {
        vec![
            vec![1.0, 0.45, 0.0, 0.0],
            vec![0.45, 1.0, 0.0, 0.0],
            vec![0.0, 0.0, 1.0, 0.0],
            vec![0.0, 0.0, 0.0, 1.0],
        ]
    }

    fn reference_scenario(model: ReturnModel) -> ScenarioParameters {
        ScenarioParameters::from_vectors(
            "Reference",
            &SECTORS,
            &[0.18, 0.12, 0.08, 0.09],
            &[0.20, 0.28, 0.16, 0.12],
            &reference_correlation(),
            0.5,
            model,
        )
        .unwrap()
    }

    fn reference_weights() -> PortfolioWeights {
        PortfolioWeights::new(&SECTORS, &[0.40, 0.25, 0.20, 0.15]).unwrap()
    }

    fn config(n_paths: usize) -> SimulationConfig {
        SimulationConfig::builder().n_paths(n_paths).build().unwrap()
    }

    #[test]
    fn test_reference_scenario_shape() {
        let result = simulate_seeded(
            &reference_scenario(ReturnModel::Normal),
            &reference_weights(),
            &config(10_000),
            42,
        )
        .unwrap();

        assert_eq!(result.sectors.len(), 4);
        assert_eq!(result.samples.len(), 10_000);
        assert_eq!(result.seed, 42);
        assert!(result.portfolio.p_profit > 0.0 && result.portfolio.p_profit < 1.0);
        assert_relative_eq!(result.ratio_factor, 2.0_f64.sqrt(), epsilon = 1e-15);
    }

    #[test]
    fn test_first_draws_feed_path_zero() {
        let scenario = reference_scenario(ReturnModel::Normal);
        let weights = reference_weights();
        let result = simulate_seeded(&scenario, &weights, &config(1), 11).unwrap();

        let mut rng = ScenarioRng::from_seed(11);
        let mut z = [0.0; 4];
        rng.fill_normal(&mut z);
        let chol = scenario
            .correlation()
            .covariance(&scenario.horizon_vols())
            .cholesky()
            .unwrap();
        let mut shock = [0.0; 4];
        chol.transform_into(&z, &mut shock);
        let means = scenario.horizon_means();
        let returns: Vec<f64> = (0..4).map(|i| means[i] + shock[i]).collect();

        assert_eq!(result.samples[0], weights.combine(&returns));
        assert_eq!(result.sectors[0].stats.mean, returns[0]);
    }

    #[test]
    fn test_weight_mismatch_rejected_before_sampling() {
        let scenario = reference_scenario(ReturnModel::Normal);
        let weights = PortfolioWeights::new(&["Defense", "Energy"], &[0.5, 0.5]).unwrap();
        let mut rng = ScenarioRng::from_seed(5);
        let err = simulate(&scenario, &weights, &config(100), &mut rng).unwrap_err();
        assert_eq!(err.field(), "weights");

        // The stream is untouched.
        let mut fresh = ScenarioRng::from_seed(5);
        assert_eq!(rng.gen_normal(), fresh.gen_normal());
    }

    #[test]
    fn test_indefinite_covariance_names_scenario() {
        let scenario = ScenarioParameters::from_vectors(
            "Impossible",
            &["A", "B", "C"],
            &[0.1, 0.1, 0.1],
            &[0.2, 0.2, 0.2],
            &[
                vec![1.0, 0.9, -0.9],
                vec![0.9, 1.0, 0.9],
                vec![-0.9, 0.9, 1.0],
            ],
            1.0,
            ReturnModel::Normal,
        )
        .unwrap();
        let weights = PortfolioWeights::new(&["A", "B", "C"], &[0.4, 0.3, 0.3]).unwrap();
        let err = simulate_seeded(&scenario, &weights, &config(10), 1).unwrap_err();
        assert_eq!(err.scenario(), "Impossible");
        assert_eq!(err.field(), "correlation");
        assert!(err.to_string().contains("covariance"));
    }

    #[test]
    fn test_zero_volatility_sector_is_deterministic() {
        let scenario = ScenarioParameters::from_vectors(
            "Cash",
            &["Equity", "Cash"],
            &[0.10, 0.04],
            &[0.25, 0.0],
            &[vec![1.0, 0.3], vec![0.3, 1.0]],
            1.0,
            ReturnModel::Normal,
        )
        .unwrap();
        let weights = PortfolioWeights::new(&["Equity", "Cash"], &[0.5, 0.5]).unwrap();
        let result = simulate_seeded(&scenario, &weights, &config(500), 3).unwrap();

        let cash = result.sector("Cash").unwrap();
        assert_eq!(cash.stats.mean, 0.04);
        assert_eq!(cash.stats.std_dev, 0.0);
        assert_eq!(cash.stats.reward_to_vol, 0.0);
    }

    #[test]
    fn test_lognormal_returns_bounded_below() {
        let result = simulate_seeded(
            &reference_scenario(ReturnModel::LogNormal),
            &reference_weights(),
            &config(5_000),
            8,
        )
        .unwrap();
        assert!(result.samples.iter().all(|&r| r > -1.0));
        for sector in &result.sectors {
            assert!(sector.stats.worst_1 > -1.0);
        }
    }

    #[test]
    fn test_ratio_scaling_none() {
        let cfg = SimulationConfig::builder()
            .n_paths(1_000)
            .ratio_scaling(scenario_core::RatioScaling::None)
            .build()
            .unwrap();
        let result = simulate_seeded(
            &reference_scenario(ReturnModel::Normal),
            &reference_weights(),
            &cfg,
            42,
        )
        .unwrap();
        assert_eq!(result.ratio_factor, 1.0);
        assert_relative_eq!(
            result.portfolio.reward_to_vol,
            result.portfolio.mean / result.portfolio.std_dev
        );
    }
}
