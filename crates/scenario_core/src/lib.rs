//! # Scenario Core (L1: Foundation)
//!
//! Foundation types for the scenario Monte Carlo workspace.
//!
//! This crate provides:
//! - The scenario data model ([`Sector`], [`ScenarioParameters`], [`PortfolioWeights`])
//! - The return model declaration ([`ReturnModel`]) applied per scenario
//! - Correlation and covariance algebra with a positive semi-definite
//!   Cholesky factorisation ([`math::correlation`])
//! - Sample statistics used to reduce simulated returns ([`math::statistics`])
//! - The configuration error taxonomy ([`ScenarioError`])
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │            scenario_core (L1)           │
//! ├─────────────────────────────────────────┤
//! │  types/  - Sector, ScenarioParameters,  │
//! │            PortfolioWeights, errors     │
//! │  math/   - correlation, Cholesky,       │
//! │            percentiles, moments         │
//! └─────────────────────────────────────────┘
//! ```
//!
//! No randomness lives here; sampling belongs to `scenario_engine`.
//!
//! ## Example
//!
//! ```
//! use scenario_core::{PortfolioWeights, ReturnModel, ScenarioParameters};
//!
//! let scenario = ScenarioParameters::from_vectors(
//!     "Base",
//!     &["Defense", "Energy"],
//!     &[0.18, 0.12],
//!     &[0.20, 0.28],
//!     &[vec![1.0, 0.45], vec![0.45, 1.0]],
//!     0.5,
//!     ReturnModel::Normal,
//! )
//! .unwrap();
//!
//! let weights = PortfolioWeights::new(&["Defense", "Energy"], &[0.6, 0.4]).unwrap();
//! assert!(scenario.check_weights(&weights).is_ok());
//! ```

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

pub mod math;
pub mod types;

pub use math::correlation::{CholeskyFactor, CorrelationError, CorrelationMatrix, CovarianceMatrix};
pub use math::statistics::{RatioScaling, SummaryStatistics};
pub use types::{
    PortfolioWeights, Result, ReturnModel, ScenarioError, ScenarioParameters, Sector,
    WEIGHT_TOLERANCE,
};
