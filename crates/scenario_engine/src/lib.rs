//! # Scenario Engine (L2: Simulation Kernel)
//!
//! Correlated Monte Carlo simulation of portfolio returns under discrete
//! scenarios.
//!
//! This crate provides:
//! - [`rng::ScenarioRng`]: an explicit, seeded random stream scoped to one run
//! - [`mc::SimulationConfig`]: path count and reward/volatility scaling
//! - [`mc::simulate`]: the correlated scenario simulator
//! - [`mc::SimulationResult`]: raw portfolio sample plus summary statistics
//! - [`histogram::Histogram`]: equal-width binning for report writers
//!
//! ## Determinism
//!
//! For fixed `(scenario, weights, n_paths, seed)` the output is bit-for-bit
//! reproducible. Standard normals are consumed path-major: path 0 sector 0
//! first, then path 0 sector 1, and so on. There is no process-wide seed.
//!
//! ## Usage Example
//!
//! ```rust
//! use scenario_core::{PortfolioWeights, ReturnModel, ScenarioParameters};
//! use scenario_engine::mc::{simulate_seeded, SimulationConfig};
//!
//! let scenario = ScenarioParameters::from_vectors(
//!     "A_Base",
//!     &["Defense", "Energy"],
//!     &[0.18, 0.12],
//!     &[0.20, 0.28],
//!     &[vec![1.0, 0.45], vec![0.45, 1.0]],
//!     0.5,
//!     ReturnModel::Normal,
//! )
//! .unwrap();
//! let weights = PortfolioWeights::new(&["Defense", "Energy"], &[0.6, 0.4]).unwrap();
//! let config = SimulationConfig::builder().n_paths(2_000).build().unwrap();
//!
//! let result = simulate_seeded(&scenario, &weights, &config, 42).unwrap();
//! assert_eq!(result.sectors.len(), 2);
//! assert!(result.portfolio.p_profit > 0.0 && result.portfolio.p_profit < 1.0);
//! ```

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

pub mod histogram;
pub mod mc;
pub mod rng;

pub use histogram::{Histogram, DEFAULT_HISTOGRAM_BINS};
pub use mc::{
    simulate, simulate_seeded, SectorStatistics, SimulationConfig, SimulationResult,
    DEFAULT_PATHS, MAX_PATHS,
};
pub use rng::ScenarioRng;
