//! Pseudo-random number generator wrapper for scenario simulation.

use rand::rngs::StdRng;
use rand::SeedableRng;
use rand_distr::{Distribution, StandardNormal};

/// Scenario simulation random number generator.
///
/// Wraps `StdRng` with the seed it was created from. Normal variates come
/// from `rand_distr::StandardNormal` (Ziggurat).
///
/// # Examples
///
/// ```rust
/// use scenario_engine::rng::ScenarioRng;
///
/// let mut a = ScenarioRng::from_seed(42);
/// let mut b = ScenarioRng::from_seed(42);
/// assert_eq!(a.gen_normal(), b.gen_normal());
/// ```
#[derive(Clone, Debug)]
pub struct ScenarioRng {
    inner: StdRng,
    seed: u64,
}

impl ScenarioRng {
    /// Creates a stream initialised with `seed`.
    #[inline]
    pub fn from_seed(seed: u64) -> Self {
        Self {
            inner: StdRng::seed_from_u64(seed),
            seed,
        }
    }

    /// Seed the stream was created from.
    #[inline]
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Single standard normal variate.
    #[inline]
    pub fn gen_normal(&mut self) -> f64 {
        StandardNormal.sample(&mut self.inner)
    }

    /// Fills `buffer` with standard normal variates, in index order.
    #[inline]
    pub fn fill_normal(&mut self, buffer: &mut [f64]) {
        for value in buffer.iter_mut() {
            *value = StandardNormal.sample(&mut self.inner);
        }
    }
}
