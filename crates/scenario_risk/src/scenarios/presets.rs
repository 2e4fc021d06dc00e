//! Preset scenario families.
//!
//! Ready-to-run sets for the four-sector defensive portfolio
//! (Defense 40%, Energy 25%, Gold 20%, Utilities 15%) over a 6-month horizon:
//! - Geopolitical: base historical, escalation weighted, stressed sensitivity
//! - Escalation branches: quick / mild / severe with occurrence probabilities

use scenario_core::{PortfolioWeights, Result, ReturnModel, ScenarioParameters};

use super::set::ScenarioSet;

/// Sector order shared by every preset.
pub const PRESET_SECTORS: [&str; 4] = ["Defense", "Energy", "Gold", "Utilities"];

/// Portfolio weights shared by every preset.
pub const PRESET_WEIGHTS: [f64; 4] = [0.40, 0.25, 0.20, 0.15];

/// Horizon of every preset scenario, in years.
pub const PRESET_HORIZON: f64 = 0.5;

/// Base seed that reproduces the reference runs (42, 43, 44, ...).
pub const PRESET_BASE_SEED: u64 = 42;

/// Five-year historical sector correlations.
fn base_correlation() -> Vec<Vec<f64>> {
    vec![
        vec![1.00, 0.45, -0.15, 0.10],
        vec![0.45, 1.00, -0.25, 0.05],
        vec![-0.15, -0.25, 1.00, -0.10],
        vec![0.10, 0.05, -0.10, 1.00],
    ]
}

/// Stressed correlations: Defense/Energy tighter, Defense/Gold more negative.
fn stressed_correlation() -> Vec<Vec<f64>> {
    let mut c = base_correlation();
    c[0][1] = 0.60;
    c[1][0] = 0.60;
    c[0][2] = -0.25;
    c[2][0] = -0.25;
    c
}

/// Built-in scenario families.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PresetFamily {
    /// Base / escalation / sensitivity, additive normal returns
    Geopolitical,
    /// Quick, mild and severe escalation branches with probabilities,
    /// log-normal returns
    EscalationBranches,
}

impl PresetFamily {
    /// All preset families.
    pub fn all() -> Vec<Self> {
        vec![Self::Geopolitical, Self::EscalationBranches]
    }

    /// Identifier used on the command line.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Geopolitical => "geopolitical",
            Self::EscalationBranches => "escalation",
        }
    }

    /// Get description.
    pub fn description(&self) -> &'static str {
        match self {
            Self::Geopolitical => {
                "A: base historical, B: escalation weighted, C: higher vol and correlation shift"
            }
            Self::EscalationBranches => {
                "25% quick de-escalation, 45% mild escalation, 30% severe escalation"
            }
        }
    }

    /// Look up a family by [`name`](Self::name), case-insensitively.
    pub fn from_name(name: &str) -> Option<Self> {
        Self::all()
            .into_iter()
            .find(|f| f.name().eq_ignore_ascii_case(name))
    }

    /// Build the family's scenario set.
    ///
    /// # Errors
    ///
    /// Never for the built-in parameters; the `Result` carries the
    /// validation every scenario goes through.
    pub fn build(&self) -> Result<ScenarioSet> {
        let weights = PortfolioWeights::new(&PRESET_SECTORS, &PRESET_WEIGHTS)?;
        let scenarios = match self {
            Self::Geopolitical => vec![
                preset(
                    "A_Base",
                    "Base historical",
                    [0.18, 0.12, 0.08, 0.09],
                    [0.20, 0.28, 0.16, 0.12],
                    base_correlation(),
                    ReturnModel::Normal,
                )?,
                preset(
                    "B_Escalation",
                    "Current escalation weighted",
                    [0.28, 0.32, 0.35, 0.09],
                    [0.22, 0.35, 0.18, 0.12],
                    base_correlation(),
                    ReturnModel::Normal,
                )?,
                preset(
                    "C_Sensitivity",
                    "Higher severe probability, correlation shift",
                    [0.32, 0.40, 0.40, 0.08],
                    [0.28, 0.42, 0.22, 0.14],
                    stressed_correlation(),
                    ReturnModel::Normal,
                )?,
            ],
            Self::EscalationBranches => vec![
                preset(
                    "Quick_Deescalation",
                    "Tensions ease within weeks",
                    [0.15, 0.10, 0.10, 0.09],
                    [0.20, 0.28, 0.16, 0.12],
                    base_correlation(),
                    ReturnModel::LogNormal,
                )?
                .with_probability(0.25)?,
                preset(
                    "Mild_Escalation",
                    "Contained escalation, elevated energy and gold",
                    [0.26, 0.30, 0.32, 0.09],
                    [0.22, 0.35, 0.18, 0.12],
                    base_correlation(),
                    ReturnModel::LogNormal,
                )?
                .with_probability(0.45)?,
                preset(
                    "Severe_Escalation",
                    "Broad conflict, stressed correlations",
                    [0.32, 0.40, 0.40, 0.08],
                    [0.28, 0.42, 0.22, 0.14],
                    stressed_correlation(),
                    ReturnModel::LogNormal,
                )?
                .with_probability(0.30)?,
            ],
        };
        ScenarioSet::new(self.name(), weights, scenarios)
    }
}

fn preset(
    name: &str,
    description: &str,
    means: [f64; 4],
    vols: [f64; 4],
    correlation: Vec<Vec<f64>>,
    model: ReturnModel,
) -> Result<ScenarioParameters> {
    Ok(ScenarioParameters::from_vectors(
        name,
        &PRESET_SECTORS,
        &means,
        &vols,
        &correlation,
        PRESET_HORIZON,
        model,
    )?
    .with_description(description))
}
