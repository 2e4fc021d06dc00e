//! File-based loading tests.

use infra_config::{ConfigError, RunSettings, ScenarioFile};
use std::io::Write;
use tempfile::{tempdir, NamedTempFile};

const SCENARIOS: &str = r#"
[portfolio]
sectors = ["Defense", "Energy", "Gold", "Utilities"]
weights = [0.40, 0.25, 0.20, 0.15]

[[scenarios]]
name = "A_Base"
horizon = 0.5
means = [0.18, 0.12, 0.08, 0.09]
vols = [0.20, 0.28, 0.16, 0.12]
correlation = [
    [1.00, 0.45, -0.15, 0.10],
    [0.45, 1.00, -0.25, 0.05],
    [-0.15, -0.25, 1.00, -0.10],
    [0.10, 0.05, -0.10, 1.00],
]
"#;

#[test]
fn test_scenario_file_named_after_stem() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("defensive.toml");
    std::fs::write(&path, SCENARIOS).unwrap();

    let file = ScenarioFile::load(&path).unwrap();
    assert_eq!(file.name, "defensive");
    assert_eq!(file.scenarios.len(), 1);
    assert_eq!(file.scenarios[0].dim(), 4);
}

#[test]
fn test_missing_scenario_file_is_io_error() {
    let dir = tempdir().unwrap();
    let err = ScenarioFile::load(&dir.path().join("absent.toml")).unwrap_err();
    assert!(matches!(err, ConfigError::Io { .. }));
    assert!(err.to_string().contains("absent.toml"));
}

#[test]
fn test_settings_file_round_trip() {
    let mut file = NamedTempFile::new().unwrap();
    writeln!(file, "paths = 25000").unwrap();
    writeln!(file, "seed = 1234").unwrap();
    writeln!(file, "output_dir = \"artefacts\"").unwrap();
    writeln!(file, "log_level = \"debug\"").unwrap();

    let settings = RunSettings::load(file.path()).unwrap();
    assert_eq!(settings.paths, 25_000);
    assert_eq!(settings.seed, 1234);
    assert_eq!(settings.log_level, "debug");
    assert!(settings.validate().is_ok());
}

#[test]
fn test_settings_unknown_key_is_parse_error() {
    let mut file = NamedTempFile::new().unwrap();
    writeln!(file, "n_sims = 100").unwrap();

    assert!(matches!(
        RunSettings::load(file.path()),
        Err(ConfigError::Parse(_))
    ));
}

fn workspace_config_dir() -> std::path::PathBuf {
    std::path::Path::new(env!("CARGO_MANIFEST_DIR")).join("../../config")
}

#[test]
fn test_shipped_scenario_file_is_valid() {
    let file = ScenarioFile::load(&workspace_config_dir().join("geopolitical.toml")).unwrap();
    assert_eq!(file.name, "geopolitical-escalation");
    assert_eq!(file.scenarios.len(), 3);

    let total: f64 = file.scenarios.iter().filter_map(|s| s.probability()).sum();
    assert!((total - 1.0).abs() < 1e-12);
    assert_eq!(file.scenarios[2].seed(), Some(2026));
}

#[test]
fn test_shipped_settings_match_defaults() {
    let settings = RunSettings::load(&workspace_config_dir().join("scenario_mc.toml")).unwrap();
    assert_eq!(settings, RunSettings::default());
}
