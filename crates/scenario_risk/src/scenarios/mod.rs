//! Scenario sets and preset families.
//!
//! - [`set`]: a portfolio plus an ordered list of scenarios, run together
//! - [`presets`]: built-in families used when no scenario file is given

pub mod presets;
pub mod set;

pub use presets::PresetFamily;
pub use set::{ScenarioSet, ScenarioSetReport};
