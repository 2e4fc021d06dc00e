//! Scenario data model.
//!
//! - [`Sector`]: name, annual expected return, annual volatility
//! - [`ScenarioParameters`]: a named, validated scenario definition
//! - [`PortfolioWeights`]: ordered sector weights summing to one
//! - [`ScenarioError`]: the configuration error taxonomy

mod error;
mod scenario;
mod sector;
mod weights;

pub use error::{Result, ScenarioError};
pub use scenario::{ReturnModel, ScenarioParameters};
pub use sector::Sector;
pub use weights::{PortfolioWeights, WEIGHT_TOLERANCE};
