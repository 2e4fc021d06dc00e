//! Equal-width histograms of simulated returns.
//!
//! Report writers render these; the engine only bins.

use serde::Serialize;

/// Suggested bin count for portfolio return histograms.
pub const DEFAULT_HISTOGRAM_BINS: usize = 80;

/// Equal-width histogram.
///
/// `edges` has `counts.len() + 1` entries. Every bin is half-open
/// `[edge_i, edge_{i+1})` except the last, which also includes its upper
/// edge, so the maximum sample is always counted.
///
/// # Examples
///
/// ```
/// use scenario_engine::Histogram;
///
/// let h = Histogram::from_samples(&[0.0, 0.25, 0.5, 0.75, 1.0], 4).unwrap();
/// assert_eq!(h.counts, vec![1, 1, 1, 2]);
/// assert_eq!(h.total(), 5);
/// ```
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Histogram {
    /// Bin edges, ascending.
    pub edges: Vec<f64>,
    /// Sample count per bin.
    pub counts: Vec<usize>,
}

impl Histogram {
    /// Bin `samples` into `bins` equal-width bins spanning `[min, max]`.
    ///
    /// A constant sample is centred in a unit-wide range around its value.
    /// Returns `None` if `samples` is empty, `bins` is zero, or any sample
    /// is not finite.
    pub fn from_samples(samples: &[f64], bins: usize) -> Option<Self> {
        if samples.is_empty() || bins == 0 || samples.iter().any(|x| !x.is_finite()) {
            return None;
        }

        let (min, max) = samples
            .iter()
            .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &x| {
                (lo.min(x), hi.max(x))
            });
        let (lo, hi) = if min == max {
            (min - 0.5, max + 0.5)
        } else {
            (min, max)
        };

        let width = (hi - lo) / bins as f64;
        let edges: Vec<f64> = (0..=bins).map(|i| lo + width * i as f64).collect();
        let mut counts = vec![0usize; bins];

        for &x in samples {
            let idx = (((x - lo) / width) as usize).min(bins - 1);
            counts[idx] += 1;
        }

        Some(Self { edges, counts })
    }

    /// Number of bins.
    pub fn bins(&self) -> usize {
        self.counts.len()
    }

    /// Total number of binned samples.
    pub fn total(&self) -> usize {
        self.counts.iter().sum()
    }
}
