//! Probability-weighted aggregation across scenarios.
//!
//! Turns one mean per scenario into a single headline expected return:
//!
//! ```text
//! E[R] = Σ pₖ · mean(Rₖ)
//! ```

use scenario_core::{Result, ScenarioError};
use scenario_engine::SimulationResult;

/// Allowed deviation of the probability sum from 1.
pub const PROBABILITY_TOLERANCE: f64 = 1e-6;

const AGGREGATE_LABEL: &str = "aggregate";

/// Probability-weighted expected portfolio return across scenarios.
///
/// # Arguments
///
/// * `results` - One simulation result per scenario
/// * `probabilities` - Occurrence probability per scenario, same order
///
/// # Errors
///
/// `InvalidConfiguration` if the input is empty, the counts differ, any
/// probability is negative or not finite, or the probabilities do not
/// sum to 1 within [`PROBABILITY_TOLERANCE`].
pub fn aggregate_across_scenarios(
    results: &[SimulationResult],
    probabilities: &[f64],
) -> Result<f64> {
    let means: Vec<f64> = results.iter().map(SimulationResult::mean).collect();
    probability_weighted_mean(&means, probabilities)
}

/// Probability-weighted sum of per-scenario means.
///
/// # Errors
///
/// As for [`aggregate_across_scenarios`].
///
/// # Examples
///
/// ```
/// use scenario_risk::probability_weighted_mean;
///
/// let e = probability_weighted_mean(&[0.10, -0.05], &[0.6, 0.4]).unwrap();
/// assert!((e - 0.04).abs() < 1e-12);
///
/// assert!(probability_weighted_mean(&[0.10, -0.05], &[0.5, 0.4]).is_err());
/// ```
pub fn probability_weighted_mean(means: &[f64], probabilities: &[f64]) -> Result<f64> {
    if means.is_empty() {
        return Err(ScenarioError::invalid(
            AGGREGATE_LABEL,
            "results",
            "at least one scenario result is required",
        ));
    }
    if means.len() != probabilities.len() {
        return Err(ScenarioError::invalid(
            AGGREGATE_LABEL,
            "probabilities",
            format!(
                "{} probabilities for {} scenario results",
                probabilities.len(),
                means.len()
            ),
        ));
    }
    check_probabilities(AGGREGATE_LABEL, probabilities)?;

    Ok(means.iter().zip(probabilities).map(|(m, p)| m * p).sum())
}

/// Check that `probabilities` form a distribution: each finite and
/// non-negative, together summing to 1 within [`PROBABILITY_TOLERANCE`].
///
/// `label` names the owner of the probabilities in the error.
///
/// # Errors
///
/// `InvalidConfiguration` on field `probabilities`.
pub fn check_probabilities(label: &str, probabilities: &[f64]) -> Result<()> {
    if let Some((i, p)) = probabilities
        .iter()
        .enumerate()
        .find(|(_, p)| !p.is_finite() || **p < 0.0)
    {
        return Err(ScenarioError::invalid(
            label,
            "probabilities",
            format!("probability {} at index {} must be finite and >= 0", p, i),
        ));
    }

    let total: f64 = probabilities.iter().sum();
    if (total - 1.0).abs() > PROBABILITY_TOLERANCE {
        return Err(ScenarioError::invalid(
            label,
            "probabilities",
            format!("probabilities sum to {}, expected 1.0", total),
        ));
    }

    Ok(())
}
