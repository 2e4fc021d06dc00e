//! Sample statistics for simulated return distributions.
//!
//! Conventions:
//! - Standard deviation is the population value (divisor `n`)
//! - Percentiles interpolate linearly between order statistics at
//!   rank `p/100 · (n - 1)`
//! - `p_profit` is the fraction of samples strictly greater than zero

use serde::{Deserialize, Serialize};

/// Scaling applied to the reward/volatility ratio.
///
/// The scaling changes comparability between scenarios of different
/// horizons, so the factor actually applied is reported alongside every
/// result.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RatioScaling {
    /// Raw `mean / std` over the scenario horizon.
    None,
    /// `mean / std · sqrt(1 / horizon)`; for a 6-month horizon this is `√2`.
    #[default]
    Annualised,
}

impl RatioScaling {
    /// Multiplier applied to `mean / std` for the given horizon in years.
    #[inline]
    pub fn factor(&self, horizon: f64) -> f64 {
        match self {
            Self::None => 1.0,
            Self::Annualised => (1.0 / horizon).sqrt(),
        }
    }

    /// Lowercase name, matching the configuration spelling.
    pub fn name(&self) -> &'static str {
        match self {
            Self::None => "none",
            Self::Annualised => "annualised",
        }
    }
}

/// Summary risk/return statistics of a one-dimensional return sample.
///
/// # Examples
///
/// ```
/// use scenario_core::SummaryStatistics;
///
/// let stats = SummaryStatistics::from_samples(&[-0.1, 0.0, 0.1, 0.2], 1.0).unwrap();
/// assert!((stats.mean - 0.05).abs() < 1e-15);
/// assert_eq!(stats.p_profit, 0.5);
/// assert!(stats.var_5 <= stats.median);
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct SummaryStatistics {
    /// Arithmetic mean.
    pub mean: f64,
    /// Median (50th percentile).
    pub median: f64,
    /// Population standard deviation.
    pub std_dev: f64,
    /// Fraction of samples strictly above zero.
    pub p_profit: f64,
    /// 5th percentile (value at risk threshold).
    pub var_5: f64,
    /// 1st percentile.
    pub worst_1: f64,
    /// `mean / std_dev` times the ratio factor; zero when `std_dev == 0`.
    pub reward_to_vol: f64,
}

impl SummaryStatistics {
    /// Reduce a sample to summary statistics.
    ///
    /// `ratio_factor` multiplies `mean / std_dev` (see [`RatioScaling::factor`]).
    /// Returns `None` for an empty sample.
    pub fn from_samples(samples: &[f64], ratio_factor: f64) -> Option<Self> {
        if samples.is_empty() {
            return None;
        }

        let mut sorted = samples.to_vec();
        sorted.sort_unstable_by(f64::total_cmp);

        // A constant sample has exactly zero spread; summation rounding must
        // not turn it into a tiny positive deviation.
        let (mean, std_dev) = if sorted[0] == sorted[sorted.len() - 1] {
            (sorted[0], 0.0)
        } else {
            let m = mean(samples);
            (m, population_std(samples, m))
        };
        let reward_to_vol = if std_dev > 0.0 {
            mean / std_dev * ratio_factor
        } else {
            0.0
        };

        Some(Self {
            mean,
            median: percentile_sorted(&sorted, 50.0),
            std_dev,
            p_profit: fraction_positive(samples),
            var_5: percentile_sorted(&sorted, 5.0),
            worst_1: percentile_sorted(&sorted, 1.0),
            reward_to_vol,
        })
    }
}

/// Arithmetic mean. Zero for an empty slice.
pub fn mean(samples: &[f64]) -> f64 {
    if samples.is_empty() {
        return 0.0;
    }
    samples.iter().sum::<f64>() / samples.len() as f64
}

/// Population standard deviation around a precomputed mean.
pub fn population_std(samples: &[f64], mean: f64) -> f64 {
    if samples.is_empty() {
        return 0.0;
    }
    let ss: f64 = samples.iter().map(|x| (x - mean) * (x - mean)).sum();
    (ss / samples.len() as f64).sqrt()
}

/// Fraction of samples strictly greater than zero.
pub fn fraction_positive(samples: &[f64]) -> f64 {
    if samples.is_empty() {
        return 0.0;
    }
    let positive = samples.iter().filter(|&&x| x > 0.0).count();
    positive as f64 / samples.len() as f64
}

/// Percentile of an ascending-sorted slice, `p` in [0, 100].
///
/// # Panics
///
/// Panics if `sorted` is empty.
pub fn percentile_sorted(sorted: &[f64], p: f64) -> f64 {
    let n = sorted.len();
    assert!(n > 0, "percentile of an empty sample");
    if n == 1 {
        return sorted[0];
    }
    let rank = (p.clamp(0.0, 100.0) / 100.0) * (n - 1) as f64;
    let lo = rank.floor() as usize;
    let hi = rank.ceil() as usize;
    let frac = rank - lo as f64;
    sorted[lo] + (sorted[hi] - sorted[lo]) * frac
}

/// Percentile of an unsorted slice. `None` when empty.
pub fn percentile(samples: &[f64], p: f64) -> Option<f64> {
    if samples.is_empty() {
        return None;
    }
    let mut sorted = samples.to_vec();
    sorted.sort_unstable_by(f64::total_cmp);
    Some(percentile_sorted(&sorted, p))
}
