//! # Scenario Risk (L3: Application)
//!
//! Everything above a single simulation call.
//!
//! This crate provides:
//! - Probability-weighted aggregation across scenarios ([`aggregate_across_scenarios`])
//! - Scenario sets sharing one portfolio, run in parallel with Rayon ([`ScenarioSet`])
//! - Built-in preset families ([`PresetFamily`])
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │            scenario_risk (L3)           │
//! ├─────────────────────────────────────────┤
//! │  aggregate   - probability weighting    │
//! │  scenarios/  - ScenarioSet, presets     │
//! └─────────────────────────────────────────┘
//!          ↓
//! ┌─────────────────────────────────────────┐
//! │           scenario_engine (L2)          │
//! │  Seeded correlated simulator            │
//! └─────────────────────────────────────────┘
//! ```
//!
//! ## Example
//!
//! ```
//! use scenario_engine::SimulationConfig;
//! use scenario_risk::PresetFamily;
//!
//! let set = PresetFamily::EscalationBranches.build().unwrap();
//! let config = SimulationConfig::builder().n_paths(2_000).build().unwrap();
//! let report = set.run(&config, 42).unwrap();
//!
//! assert_eq!(report.results.len(), 3);
//! assert!(report.expected_return.is_some());
//! ```

#![deny(missing_docs)]

pub mod aggregate;
pub mod scenarios;

pub use aggregate::{
    aggregate_across_scenarios, check_probabilities, probability_weighted_mean,
    PROBABILITY_TOLERANCE,
};
pub use scenarios::presets::PresetFamily;
pub use scenarios::set::{ScenarioSet, ScenarioSetReport};
