//! # Infra Config
//!
//! Configuration loading for the scenario Monte Carlo workspace.
//!
//! - [`ScenarioFile`]: TOML scenario tables unified into validated
//!   [`ScenarioParameters`](scenario_core::ScenarioParameters)
//! - [`RunSettings`]: path count, seed, output directory and logging,
//!   with `SCENARIO_MC_*` environment overrides
//!
//! ## Scenario file format
//!
//! ```toml
//! name = "geopolitical"
//!
//! [portfolio]
//! sectors = ["Defense", "Energy"]
//! weights = [0.6, 0.4]
//!
//! [[scenarios]]
//! name = "Base"
//! model = "normal"
//! horizon = 0.5
//! means = [0.18, 0.12]
//! vols = [0.20, 0.28]
//! correlation = [[1.0, 0.45], [0.45, 1.0]]
//! ```

#![deny(missing_docs)]

mod error;
mod scenario_file;
mod settings;

pub use error::ConfigError;
pub use scenario_file::ScenarioFile;
pub use settings::{RunSettings, ENV_PREFIX};
