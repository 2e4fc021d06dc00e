use serde::{Deserialize, Serialize};

/// A market sector with annualised return assumptions.
///
/// Values are plain estimates; range checks happen when the sector is
/// placed into a [`ScenarioParameters`](super::ScenarioParameters).
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Sector {
    /// Sector identifier, e.g. `"Defense"`.
    pub name: String,
    /// Annualised expected return (0.18 = 18%).
    pub expected_return: f64,
    /// Annualised volatility (0.20 = 20%).
    pub volatility: f64,
}

impl Sector {
    /// Create a sector.
    pub fn new(name: impl Into<String>, expected_return: f64, volatility: f64) -> Self {
        Self {
            name: name.into(),
            expected_return,
            volatility,
        }
    }

    /// Expected return scaled to `horizon` years.
    #[inline]
    pub fn horizon_mean(&self, horizon: f64) -> f64 {
        self.expected_return * horizon
    }

    /// Volatility scaled to `horizon` years (square-root-of-time).
    #[inline]
    pub fn horizon_volatility(&self, horizon: f64) -> f64 {
        self.volatility * horizon.sqrt()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_horizon_scaling() {
        let sector = Sector::new("Energy", 0.12, 0.28);
        assert_relative_eq!(sector.horizon_mean(0.5), 0.06);
        assert_relative_eq!(sector.horizon_volatility(0.5), 0.28 * 0.5_f64.sqrt());
        assert_relative_eq!(sector.horizon_volatility(1.0), 0.28);
    }
}
