//! Check command implementation
//!
//! Validates a scenario file end to end without drawing a single sample:
//! parsing, weights, per-scenario inputs, declared probabilities and the
//! factorisation of every horizon covariance matrix.

use infra_config::ScenarioFile;
use scenario_risk::ScenarioSet;
use std::path::Path;
use tracing::info;

use crate::Result;

/// Run the check command
pub fn run(path: &Path) -> Result<()> {
    info!("Checking scenario file {}...", path.display());

    let set = check_file(path)?;

    println!("{}: OK", path.display());
    println!("  Set: {}", set.name());
    let holdings: Vec<String> = set
        .weights()
        .iter()
        .map(|(sector, weight)| format!("{} {:.1}%", sector, weight * 100.0))
        .collect();
    println!("  Portfolio: {}", holdings.join(", "));
    for scenario in set.scenarios() {
        let probability = scenario
            .probability()
            .map(|p| format!("p = {:.2}", p))
            .unwrap_or_else(|| "no probability".to_string());
        println!(
            "  - {} ({}, horizon {}y, {})",
            scenario.name(),
            scenario.model(),
            scenario.horizon(),
            probability
        );
    }
    Ok(())
}

/// Load `path` and run every check the simulator would run before sampling.
pub fn check_file(path: &Path) -> Result<ScenarioSet> {
    let file = ScenarioFile::load(path)?;
    let set = ScenarioSet::new(file.name, file.weights, file.scenarios)?;
    set.probabilities()?;
    set.check_covariances()?;
    Ok(set)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::CliError;
    use tempfile::tempdir;

    const HEADER: &str = "[portfolio]\nsectors = [\"A\", \"B\", \"C\"]\nweights = [0.4, 0.3, 0.3]\n";

    fn write(dir: &Path, body: &str) -> std::path::PathBuf {
        let path = dir.join("scenarios.toml");
        std::fs::write(&path, format!("{}{}", HEADER, body)).unwrap();
        path
    }

    #[test]
    fn test_valid_file_passes() {
        let dir = tempdir().unwrap();
        let path = write(
            dir.path(),
            r#"
[[scenarios]]
name = "Calm"
horizon = 1.0
means = [0.05, 0.06, 0.07]
vols = [0.1, 0.2, 0.0]
correlation = [[1.0, 0.3, 0.0], [0.3, 1.0, 0.0], [0.0, 0.0, 1.0]]
"#,
        );
        let set = check_file(&path).unwrap();
        assert_eq!(set.name(), "scenarios");
    }

    #[test]
    fn test_indefinite_correlation_named() {
        let dir = tempdir().unwrap();
        let path = write(
            dir.path(),
            r#"
[[scenarios]]
name = "Impossible"
horizon = 1.0
means = [0.05, 0.06, 0.07]
vols = [0.2, 0.2, 0.2]
correlation = [[1.0, 0.9, -0.9], [0.9, 1.0, 0.9], [-0.9, 0.9, 1.0]]
"#,
        );
        match check_file(&path) {
            Err(CliError::Scenario(e)) => {
                assert_eq!(e.scenario(), "Impossible");
                assert_eq!(e.field(), "correlation");
            }
            other => panic!("Expected scenario error, got {:?}", other.map(|s| s.name().to_string())),
        }
    }

    #[test]
    fn test_partial_probabilities_rejected() {
        let dir = tempdir().unwrap();
        let body = r#"
[[scenarios]]
name = "One"
horizon = 1.0
probability = 0.5
means = [0.05, 0.06, 0.07]
vols = [0.1, 0.1, 0.1]
correlation = [[1.0, 0.0, 0.0], [0.0, 1.0, 0.0], [0.0, 0.0, 1.0]]

[[scenarios]]
name = "Two"
horizon = 1.0
means = [0.05, 0.06, 0.07]
vols = [0.1, 0.1, 0.1]
correlation = [[1.0, 0.0, 0.0], [0.0, 1.0, 0.0], [0.0, 0.0, 1.0]]
"#;
        let path = write(dir.path(), body);
        let err = check_file(&path).unwrap_err();
        assert!(err.is_configuration());
    }

    #[test]
    fn test_probabilities_not_summing_to_one_rejected() {
        let dir = tempdir().unwrap();
        let body = r#"
[[scenarios]]
name = "One"
horizon = 1.0
probability = 0.5
means = [0.05, 0.06, 0.07]
vols = [0.1, 0.1, 0.1]
correlation = [[1.0, 0.0, 0.0], [0.0, 1.0, 0.0], [0.0, 0.0, 1.0]]

[[scenarios]]
name = "Two"
horizon = 1.0
probability = 0.4
means = [0.05, 0.06, 0.07]
vols = [0.1, 0.1, 0.1]
correlation = [[1.0, 0.0, 0.0], [0.0, 1.0, 0.0], [0.0, 0.0, 1.0]]
"#;
        let path = write(dir.path(), body);
        match check_file(&path) {
            Err(CliError::Scenario(e)) => {
                assert_eq!(e.field(), "probabilities");
                assert!(e.to_string().contains("0.9"));
            }
            other => panic!("Expected scenario error, got {:?}", other.map(|s| s.name().to_string())),
        }
    }
}
