//! Monte Carlo scenario simulation.
//!
//! # Architecture
//!
//! ```text
//! simulate()
//! ├── SimulationConfig  (path count, ratio scaling)
//! ├── ScenarioRng       (explicit seeded stream)
//! ├── CholeskyFactor    (horizon covariance, from scenario_core)
//! └── SimulationResult  (raw sample + summary statistics)
//! ```
//!
//! # Examples
//!
//! ```rust
//! use scenario_core::{PortfolioWeights, ReturnModel, ScenarioParameters};
//! use scenario_engine::mc::{simulate, SimulationConfig};
//! use scenario_engine::rng::ScenarioRng;
//!
//! let scenario = ScenarioParameters::from_vectors(
//!     "Single",
//!     &["Gold"],
//!     &[0.08],
//!     &[0.16],
//!     &[vec![1.0]],
//!     1.0,
//!     ReturnModel::LogNormal,
//! )
//! .unwrap();
//! let weights = PortfolioWeights::new(&["Gold"], &[1.0]).unwrap();
//! let config = SimulationConfig::builder().n_paths(1_000).build().unwrap();
//!
//! let mut rng = ScenarioRng::from_seed(7);
//! let result = simulate(&scenario, &weights, &config, &mut rng).unwrap();
//! assert!(result.percentile(5.0).unwrap() <= result.portfolio.median);
//! ```

mod config;
mod result;
mod simulator;

pub use config::{SimulationConfig, SimulationConfigBuilder, DEFAULT_PATHS, MAX_PATHS};
pub use result::{SectorStatistics, SimulationResult};
pub use simulator::{simulate, simulate_seeded};
