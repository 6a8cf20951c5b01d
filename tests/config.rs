//! Configuration system tests
//!
//! Tests for config paths and loading `InputConfig` from disk.

use std::fs;

use keyflow::config::{ConfigError, InputConfig, DEFAULT_DEADZONE};
use keyflow::config_paths;
use keyflow::EvaluationPolicy;

// ========================================================================
// Config Paths Tests
// ========================================================================

#[test]
fn test_config_dir_contains_app_name() {
    if let Some(dir) = config_paths::config_dir() {
        assert!(dir.to_string_lossy().contains("keyflow"));
    }
}

#[test]
fn test_config_file_ends_with_yaml() {
    if let Some(path) = config_paths::config_file() {
        assert!(path.to_string_lossy().ends_with("config.yaml"));
    }
}

#[test]
fn test_logs_dir_is_subdir_of_config() {
    if let (Some(config), Some(logs)) = (config_paths::config_dir(), config_paths::logs_dir()) {
        assert!(logs.starts_with(&config));
    }
}

// ========================================================================
// Input Config Tests
// ========================================================================

#[test]
fn test_default_config() {
    let config = InputConfig::default();
    assert_eq!(config.policy, EvaluationPolicy::Aggregate);
    assert_eq!(config.default_deadzone, DEFAULT_DEADZONE);
    assert!(config.release_on_focus_loss);
}

#[test]
fn test_load_from_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.yaml");
    fs::write(
        &path,
        "policy: first_active\ndefault_deadzone: 0.5\nrelease_on_focus_loss: false\n",
    )
    .unwrap();

    let config = InputConfig::load_from(&path).unwrap();
    assert_eq!(config.policy, EvaluationPolicy::FirstActive);
    assert_eq!(config.default_deadzone, 0.5);
    assert!(!config.release_on_focus_loss);
}

#[test]
fn test_partial_file_fills_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.yaml");
    fs::write(&path, "default_deadzone: 0.3\n").unwrap();

    let config = InputConfig::load_from(&path).unwrap();
    assert_eq!(config.policy, EvaluationPolicy::Aggregate);
    assert!(config.release_on_focus_loss);
}

#[test]
fn test_missing_file_is_io_error() {
    let dir = tempfile::tempdir().unwrap();
    let result = InputConfig::load_from(&dir.path().join("nope.yaml"));
    assert!(matches!(result, Err(ConfigError::IoError(_))));
}

#[test]
fn test_malformed_file_is_parse_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.yaml");
    fs::write(&path, "default_deadzone: [not, a, number]\n").unwrap();

    let result = InputConfig::load_from(&path);
    assert!(matches!(result, Err(ConfigError::ParseError(_))));
}

#[test]
fn test_saved_config_loads_back() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.yaml");
    let config = InputConfig {
        policy: EvaluationPolicy::FirstActive,
        default_deadzone: 0.2,
        release_on_focus_loss: true,
    };
    fs::write(&path, config.to_yaml().unwrap()).unwrap();

    assert_eq!(InputConfig::load_from(&path).unwrap(), config);
}
