use std::fs;
use std::path::PathBuf;

use tempfile::TempDir;
use waterfill::error::{ConfigError, Error};
use waterfill::infrastructure::config::settings::Config;
use waterfill::infrastructure::config::solver::SolverBackend;

fn write_config(dir: &TempDir, contents: &str) -> PathBuf {
    let path = dir.path().join("waterfill.toml");
    fs::write(&path, contents).expect("write temp config");
    path
}

#[test]
fn config_example_template_is_valid() {
    let template = include_str!("../waterfill.toml.example");
    let config = Config::parse_toml(template).expect("template parses");

    assert_eq!(config.solver.backend, SolverBackend::Clarabel);
    assert_eq!(config.logging.level, "warn");
}

#[test]
fn config_loads_from_file() {
    let dir = TempDir::new().unwrap();
    let path = write_config(
        &dir,
        r#"
[logging]
level = "debug"
format = "json"

[solver]
backend = "highs"
tolerance = 1e-6
max_iterations = 50
"#,
    );

    let config = Config::load(&path).unwrap();

    assert_eq!(config.logging.level, "debug");
    assert_eq!(config.logging.format, "json");
    assert_eq!(config.solver.backend, SolverBackend::Highs);
    assert_eq!(config.solver.max_iterations, 50);
    assert!(!config.solver.verbose);
}

#[test]
fn config_rejects_out_of_range_tolerance() {
    let dir = TempDir::new().unwrap();
    let path = write_config(&dir, "[solver]\ntolerance = 2.0\n");

    match Config::load(&path) {
        Err(Error::Config(ConfigError::InvalidValue {
            field: "tolerance",
            ..
        })) => {}
        Err(err) => panic!("Expected invalid tolerance error, got {err}"),
        Ok(config) => panic!(
            "Expected tolerance to be rejected, got {}",
            config.solver.tolerance
        ),
    }
}

#[test]
fn config_rejects_unknown_log_format() {
    let dir = TempDir::new().unwrap();
    let path = write_config(&dir, "[logging]\nformat = \"xml\"\n");

    assert!(matches!(
        Config::load(&path),
        Err(Error::Config(ConfigError::InvalidValue {
            field: "format",
            ..
        }))
    ));
}

#[test]
fn config_rejects_unknown_backend() {
    let dir = TempDir::new().unwrap();
    let path = write_config(&dir, "[solver]\nbackend = \"gurobi\"\n");

    assert!(matches!(
        Config::load(&path),
        Err(Error::Config(ConfigError::Parse(_)))
    ));
}

#[test]
fn config_missing_file_is_a_read_error() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("absent.toml");

    assert!(matches!(
        Config::load(&path),
        Err(Error::Config(ConfigError::ReadFile(_)))
    ));
    let fallback = Config::load_or_default(&path).unwrap();
    assert_eq!(fallback.solver.backend, SolverBackend::Clarabel);
}

#[test]
fn config_round_trips_through_toml() {
    let mut config = Config::default();
    config.solver.backend = SolverBackend::WaterLevel;

    let rendered = config.to_toml().unwrap();
    let parsed = Config::parse_toml(&rendered).unwrap();

    assert_eq!(parsed.solver.backend, SolverBackend::WaterLevel);
    assert_eq!(parsed.solver.tolerance, config.solver.tolerance);
}
