//! Portfolio weight vectors.

use serde::Serialize;

use super::error::{Result, ScenarioError};

/// Tolerance on the sum of portfolio weights and scenario probabilities.
pub const WEIGHT_TOLERANCE: f64 = 1e-6;

/// Label used in errors raised by weight validation.
const PORTFOLIO_LABEL: &str = "portfolio";

/// Ordered, non-negative sector weights summing to one.
///
/// Weights are labelled with sector names so that a scenario can verify
/// it combines its sectors in the same order.
///
/// # Examples
///
/// ```
/// use scenario_core::PortfolioWeights;
///
/// let weights = PortfolioWeights::new(
///     &["Defense", "Energy", "Gold", "Utilities"],
///     &[0.40, 0.25, 0.20, 0.15],
/// )
/// .unwrap();
/// assert_eq!(weights.len(), 4);
///
/// // Over-allocated portfolios are rejected.
/// assert!(PortfolioWeights::new(&["A", "B"], &[0.5, 0.6]).is_err());
/// ```
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct PortfolioWeights {
    sectors: Vec<String>,
    weights: Vec<f64>,
}

impl PortfolioWeights {
    /// Create validated weights.
    ///
    /// # Errors
    ///
    /// `InvalidConfiguration` if the vectors are empty or differ in length,
    /// a weight is negative or non-finite, a sector name is blank or
    /// duplicated, or the weights do not sum to 1 within [`WEIGHT_TOLERANCE`].
    pub fn new<S: AsRef<str>>(sectors: &[S], weights: &[f64]) -> Result<Self> {
        if weights.is_empty() {
            return Err(ScenarioError::invalid(
                PORTFOLIO_LABEL,
                "weights",
                "at least one weight is required",
            ));
        }
        if sectors.len() != weights.len() {
            return Err(ScenarioError::invalid(
                PORTFOLIO_LABEL,
                "sectors",
                format!(
                    "{} sector names for {} weights",
                    sectors.len(),
                    weights.len()
                ),
            ));
        }

        let mut names: Vec<String> = Vec::with_capacity(sectors.len());
        for name in sectors {
            let name = name.as_ref().trim();
            if name.is_empty() {
                return Err(ScenarioError::invalid(
                    PORTFOLIO_LABEL,
                    "sectors",
                    "sector names must not be blank",
                ));
            }
            if names.iter().any(|n| n == name) {
                return Err(ScenarioError::invalid(
                    PORTFOLIO_LABEL,
                    "sectors",
                    format!("duplicate sector '{}'", name),
                ));
            }
            names.push(name.to_string());
        }

        for (i, &w) in weights.iter().enumerate() {
            if !w.is_finite() || w < 0.0 {
                return Err(ScenarioError::invalid(
                    PORTFOLIO_LABEL,
                    "weights",
                    format!("weight {} for '{}' must be finite and non-negative", w, names[i]),
                ));
            }
        }

        let total: f64 = weights.iter().sum();
        if (total - 1.0).abs() > WEIGHT_TOLERANCE {
            return Err(ScenarioError::invalid(
                PORTFOLIO_LABEL,
                "weights",
                format!("weights sum to {}, expected 1.0", total),
            ));
        }

        Ok(Self {
            sectors: names,
            weights: weights.to_vec(),
        })
    }

    /// Number of sectors.
    #[inline]
    pub fn len(&self) -> usize {
        self.weights.len()
    }

    /// Always false for validated weights; provided for API symmetry.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.weights.is_empty()
    }

    /// Weight values in sector order.
    #[inline]
    pub fn as_slice(&self) -> &[f64] {
        &self.weights
    }

    /// Sector names in weight order.
    #[inline]
    pub fn sectors(&self) -> &[String] {
        &self.sectors
    }

    /// Weighted sum of per-sector returns.
    ///
    /// `returns` must be ordered like the weights.
    #[inline]
    pub fn combine(&self, returns: &[f64]) -> f64 {
        self.weights
            .iter()
            .zip(returns)
            .map(|(w, r)| w * r)
            .sum()
    }

    /// Iterate over `(sector, weight)` pairs.
    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> {
        self.sectors
            .iter()
            .map(String::as_str)
            .zip(self.weights.iter().copied())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    const SECTORS: [&str; 4] = ["Defense", "Energy", "Gold", "Utilities"];

    #[test]
    fn test_valid_weights() {
        let w = PortfolioWeights::new(&SECTORS, &[0.40, 0.25, 0.20, 0.15]).unwrap();
        assert_eq!(w.len(), 4);
        assert_eq!(w.sectors()[2], "Gold");
        assert_relative_eq!(w.combine(&[0.1, 0.2, 0.3, 0.4]), 0.04 + 0.05 + 0.06 + 0.06);
    }

    #[test]
    fn test_over_allocated_weights_rejected() {
        let err = PortfolioWeights::new(&SECTORS, &[0.5, 0.5, 0.5, 0.5]).unwrap_err();
        assert_eq!(err.field(), "weights");
        assert!(err.to_string().contains("sum to 2"));
    }

    #[test]
    fn test_sum_within_tolerance_accepted() {
        assert!(PortfolioWeights::new(&["A", "B"], &[0.5, 0.5 + 5e-7]).is_ok());
        assert!(PortfolioWeights::new(&["A", "B"], &[0.5, 0.5 + 5e-6]).is_err());
    }

    #[test]
    fn test_negative_weight_rejected() {
        let err = PortfolioWeights::new(&["A", "B"], &[1.2, -0.2]).unwrap_err();
        assert!(err.to_string().contains("non-negative"));
    }

    #[test]
    fn test_length_mismatch_rejected() {
        let err = PortfolioWeights::new(&["A", "B", "C"], &[0.5, 0.5]).unwrap_err();
        assert_eq!(err.field(), "sectors");
    }

    #[test]
    fn test_duplicate_sector_rejected() {
        assert!(PortfolioWeights::new(&["A", "A"], &[0.5, 0.5]).is_err());
    }

    #[test]
    fn test_empty_rejected() {
        let empty: [&str; 0] = [];
        assert!(PortfolioWeights::new(&empty, &[]).is_err());
    }
}
