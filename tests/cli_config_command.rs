//! Integration tests for the CLI config template
//!
//! Verifies the generated template round-trips through the config loader.

use std::fs;
use tempfile::TempDir;
use wikiscout::cli::generate_config_template;
use wikiscout::config::Config;

fn create_temp_dir() -> TempDir {
    TempDir::new().expect("Failed to create temp directory")
}

#[test]
fn test_generated_template_creates_valid_config_file() {
    let temp_dir = create_temp_dir();
    let config_path = temp_dir.path().join("config.toml");

    let template = generate_config_template();
    fs::write(&config_path, template).expect("Failed to write template");

    let config =
        Config::from_file(&config_path).expect("Generated template should load as valid Config");

    assert_eq!(config.server.host, "127.0.0.1");
    assert_eq!(config.server.port, 8000);
    assert_eq!(config.model.name(), "gemini-1.5-flash");
    // Timeout is commented out in the template: no timeout by default.
    assert_eq!(config.server.request_timeout(), None);
}

#[test]
fn test_template_file_content_matches_generation() {
    let temp_dir = create_temp_dir();
    let config_path = temp_dir.path().join("config.toml");

    let template = generate_config_template();
    fs::write(&config_path, template).expect("Failed to write template");

    let content = fs::read_to_string(&config_path).expect("Failed to read back");
    assert_eq!(content, template);
}

#[test]
fn test_missing_config_file_reports_path() {
    let temp_dir = create_temp_dir();
    let missing = temp_dir.path().join("absent.toml");

    let err = Config::from_file(&missing).expect_err("should fail on missing file");
    let msg = err.to_string();
    assert!(msg.contains("absent.toml"), "got: {}", msg);
}
