//! # Random Number Generation
//!
//! Seeded pseudo-random streams for scenario simulation.
//!
//! ## Design
//!
//! - **Reproducibility**: every stream is created from an explicit seed
//! - **Isolation**: a stream is owned by one simulation call; there is no
//!   global state, so concurrent scenario runs cannot disturb each other
//! - **Efficiency**: batch operations write into caller-owned `&mut [f64]`
//!
//! ## Usage Example
//!
//! ```rust
//! use scenario_engine::rng::ScenarioRng;
//!
//! let mut rng = ScenarioRng::from_seed(12345);
//! let z = rng.gen_normal();
//!
//! let mut buffer = vec![0.0; 4];
//! rng.fill_normal(&mut buffer);
//! ```

mod prng;

pub use prng::ScenarioRng;
