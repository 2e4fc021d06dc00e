//! TOML scenario files.
//!
//! Every field is optional at the parse layer so that an absent value is
//! reported as an `InvalidConfiguration` naming the field, rather than as
//! an opaque parse failure.

use scenario_core::{PortfolioWeights, ReturnModel, ScenarioError, ScenarioParameters};
use serde::Deserialize;
use std::collections::HashSet;
use std::path::Path;
use tracing::debug;

use crate::error::ConfigError;

const PORTFOLIO_LABEL: &str = "portfolio";
const DEFAULT_SET_NAME: &str = "scenarios";

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawScenarioFile {
    name: Option<String>,
    portfolio: Option<RawPortfolio>,
    #[serde(default)]
    scenarios: Vec<RawScenario>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawPortfolio {
    sectors: Option<Vec<String>>,
    weights: Option<Vec<f64>>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawScenario {
    name: Option<String>,
    description: Option<String>,
    model: Option<ReturnModel>,
    horizon: Option<f64>,
    probability: Option<f64>,
    seed: Option<u64>,
    means: Option<Vec<f64>>,
    vols: Option<Vec<f64>>,
    correlation: Option<Vec<Vec<f64>>>,
}

/// A validated scenario file: one portfolio and the scenarios it is
/// evaluated under.
#[derive(Clone, Debug)]
pub struct ScenarioFile {
    /// Set name; the `name` key, else the file stem, else `"scenarios"`.
    pub name: String,
    /// Portfolio weights, labelled by sector.
    pub weights: PortfolioWeights,
    /// Scenarios in file order, each checked against `weights`.
    pub scenarios: Vec<ScenarioParameters>,
}

impl ScenarioFile {
    /// Load and validate a scenario file.
    ///
    /// # Errors
    ///
    /// `Io` if the file cannot be read, `Parse` if it is not valid TOML for
    /// this layout, `Scenario` for any missing or invalid value.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::io(path, e))?;
        let mut file = Self::from_toml_str(&content)?;

        if file.name == DEFAULT_SET_NAME {
            if let Some(stem) = path.file_stem().and_then(|s| s.to_str()) {
                file.name = stem.to_string();
            }
        }

        debug!(
            path = %path.display(),
            set = %file.name,
            scenarios = file.scenarios.len(),
            "Loaded scenario file"
        );
        Ok(file)
    }

    /// Parse and validate scenario file content.
    ///
    /// # Errors
    ///
    /// As for [`load`](Self::load), minus `Io`.
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let raw: RawScenarioFile = toml::from_str(content)?;

        let portfolio = raw
            .portfolio
            .ok_or_else(|| ScenarioError::missing(PORTFOLIO_LABEL, "portfolio"))?;
        let sectors = portfolio
            .sectors
            .ok_or_else(|| ScenarioError::missing(PORTFOLIO_LABEL, "sectors"))?;
        let weights = portfolio
            .weights
            .ok_or_else(|| ScenarioError::missing(PORTFOLIO_LABEL, "weights"))?;
        let weights = PortfolioWeights::new(&sectors, &weights)?;

        if raw.scenarios.is_empty() {
            return Err(ScenarioError::missing(PORTFOLIO_LABEL, "scenarios").into());
        }

        let mut names = HashSet::new();
        let mut scenarios = Vec::with_capacity(raw.scenarios.len());
        for (index, entry) in raw.scenarios.into_iter().enumerate() {
            let scenario = entry.into_parameters(index, &sectors)?;
            if !names.insert(scenario.name().to_string()) {
                return Err(ScenarioError::invalid(
                    scenario.name(),
                    "name",
                    "scenario names must be unique within a file",
                )
                .into());
            }
            scenario.check_weights(&weights)?;
            scenarios.push(scenario);
        }

        Ok(Self {
            name: raw.name.unwrap_or_else(|| DEFAULT_SET_NAME.to_string()),
            weights,
            scenarios,
        })
    }
}

impl RawScenario {
    fn into_parameters(
        self,
        index: usize,
        sectors: &[String],
    ) -> Result<ScenarioParameters, ScenarioError> {
        // Unnamed entries are labelled by position for error reporting.
        let label = format!("scenarios[{}]", index);
        let name = self.name.ok_or_else(|| ScenarioError::missing(&label, "name"))?;
        let horizon = self.horizon.ok_or_else(|| ScenarioError::missing(&name, "horizon"))?;
        let means = self.means.ok_or_else(|| ScenarioError::missing(&name, "means"))?;
        let vols = self.vols.ok_or_else(|| ScenarioError::missing(&name, "vols"))?;
        let correlation = self
            .correlation
            .ok_or_else(|| ScenarioError::missing(&name, "correlation"))?;

        let mut scenario = ScenarioParameters::from_vectors(
            name,
            sectors,
            &means,
            &vols,
            &correlation,
            horizon,
            self.model.unwrap_or_default(),
        )?;
        if let Some(p) = self.probability {
            scenario = scenario.with_probability(p)?;
        }
        if let Some(seed) = self.seed {
            scenario = scenario.with_seed(seed);
        }
        if let Some(description) = self.description {
            scenario = scenario.with_description(description);
        }
        Ok(scenario)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const VALID: &str = r#"
name = "pair"

[portfolio]
sectors = ["Defense", "Gold"]
weights = [0.6, 0.4]

[[scenarios]]
name = "Base"
horizon = 0.5
means = [0.18, 0.08]
vols = [0.20, 0.16]
correlation = [[1.0, -0.15], [-0.15, 1.0]]

[[scenarios]]
name = "Stress"
model = "lognormal"
horizon = 0.5
probability = 1.0
seed = 7
means = [0.32, 0.40]
vols = [0.28, 0.22]
correlation = [[1.0, -0.25], [-0.25, 1.0]]
"#;

    fn scenario_error(err: ConfigError) -> ScenarioError {
        match err {
            ConfigError::Scenario(e) => e,
            other => panic!("Expected scenario error, got {:?}", other),
        }
    }

    #[test]
    fn test_parses_valid_file() {
        let file = ScenarioFile::from_toml_str(VALID).unwrap();
        assert_eq!(file.name, "pair");
        assert_eq!(file.weights.sectors(), &["Defense", "Gold"]);
        assert_eq!(file.scenarios.len(), 2);

        let base = &file.scenarios[0];
        assert_eq!(base.model(), ReturnModel::Normal);
        assert_eq!(base.probability(), None);

        let stress = &file.scenarios[1];
        assert_eq!(stress.model(), ReturnModel::LogNormal);
        assert_eq!(stress.probability(), Some(1.0));
        assert_eq!(stress.seed(), Some(7));
    }

    #[test]
    fn test_missing_vols_named() {
        let content = VALID.replacen("vols = [0.20, 0.16]\n", "", 1);
        let err = scenario_error(ScenarioFile::from_toml_str(&content).unwrap_err());
        assert_eq!(err.scenario(), "Base");
        assert_eq!(err.field(), "vols");
    }

    #[test]
    fn test_missing_name_labelled_by_position() {
        let content = VALID.replacen("name = \"Stress\"\n", "", 1);
        let err = scenario_error(ScenarioFile::from_toml_str(&content).unwrap_err());
        assert_eq!(err.scenario(), "scenarios[1]");
        assert_eq!(err.field(), "name");
    }

    #[test]
    fn test_missing_portfolio_weights() {
        let content = VALID.replacen("weights = [0.6, 0.4]\n", "", 1);
        let err = scenario_error(ScenarioFile::from_toml_str(&content).unwrap_err());
        assert_eq!(err.scenario(), "portfolio");
        assert_eq!(err.field(), "weights");
    }

    #[test]
    fn test_bad_weights_rejected() {
        let content = VALID.replacen("weights = [0.6, 0.4]", "weights = [0.6, 0.6]", 1);
        let err = scenario_error(ScenarioFile::from_toml_str(&content).unwrap_err());
        assert_eq!(err.field(), "weights");
    }

    #[test]
    fn test_duplicate_scenario_names_rejected() {
        let content = VALID.replacen("name = \"Stress\"", "name = \"Base\"", 1);
        let err = scenario_error(ScenarioFile::from_toml_str(&content).unwrap_err());
        assert_eq!(err.field(), "name");
    }

    #[test]
    fn test_unknown_model_is_parse_error() {
        let content = VALID.replacen("model = \"lognormal\"", "model = \"student\"", 1);
        assert!(matches!(
            ScenarioFile::from_toml_str(&content),
            Err(ConfigError::Parse(_))
        ));
    }

    #[test]
    fn test_asymmetric_correlation_rejected() {
        let content = VALID.replacen(
            "correlation = [[1.0, -0.15], [-0.15, 1.0]]",
            "correlation = [[1.0, -0.15], [0.15, 1.0]]",
            1,
        );
        let err = scenario_error(ScenarioFile::from_toml_str(&content).unwrap_err());
        assert_eq!(err.scenario(), "Base");
        assert_eq!(err.field(), "correlation");
    }

    #[test]
    fn test_no_scenarios_rejected() {
        let content = "[portfolio]\nsectors = [\"Gold\"]\nweights = [1.0]\n";
        let err = scenario_error(ScenarioFile::from_toml_str(content).unwrap_err());
        assert_eq!(err.field(), "scenarios");
    }
}
