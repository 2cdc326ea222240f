//! Configuration loading tests
//!
//! Tests that manipulate environment variables are marked with #[serial] so they
//! run sequentially, not in parallel.

use frombuddy_common::config::{TomlConfig, API_KEY_ENV, BASE_URL_ENV, MODEL_ENV};
use serial_test::serial;
use std::env;
use std::path::PathBuf;

fn clear_env() {
    env::remove_var(API_KEY_ENV);
    env::remove_var(BASE_URL_ENV);
    env::remove_var(MODEL_ENV);
}

#[test]
fn test_defaults() {
    let config = TomlConfig::default();
    assert_eq!(config.bind, "127.0.0.1");
    assert_eq!(config.port, 8000);
    assert_eq!(config.services_dir, PathBuf::from("data/services"));
    assert_eq!(config.logging.level, "info");
    assert_eq!(config.cors.allowed_origins.len(), 2);
    assert_eq!(config.generation.model, "llama-3.3-70b-versatile");
    assert!(config.generation.temperature < 0.5);
    assert_eq!(config.generation.max_retries, 1);
    assert!(config.guardrail.extra_terms.is_empty());
}

#[test]
fn test_partial_toml_keeps_defaults() {
    let config = TomlConfig::from_toml_str(
        r#"
        port = 9100

        [generation]
        timeout_secs = 5
        "#,
    )
    .unwrap();

    assert_eq!(config.port, 9100);
    assert_eq!(config.bind, "127.0.0.1");
    assert_eq!(config.generation.timeout_secs, 5);
    assert_eq!(config.generation.model, "llama-3.3-70b-versatile");
}

#[test]
fn test_full_toml() {
    let config = TomlConfig::from_toml_str(
        r#"
        bind = "0.0.0.0"
        port = 8080
        services_dir = "/srv/frombuddy/services"

        [logging]
        level = "debug"

        [cors]
        allowed_origins = ["https://frombuddy.example"]

        [generation]
        model = "llama-3.1-8b-instant"
        base_url = "http://localhost:9999/v1"
        temperature = 0.0
        max_retries = 0

        [guardrail]
        extra_terms = ["bank account number"]
        "#,
    )
    .unwrap();

    assert_eq!(config.bind, "0.0.0.0");
    assert_eq!(config.services_dir, PathBuf::from("/srv/frombuddy/services"));
    assert_eq!(config.logging.level, "debug");
    assert_eq!(config.cors.allowed_origins, vec!["https://frombuddy.example"]);
    assert_eq!(config.generation.base_url, "http://localhost:9999/v1");
    assert_eq!(config.generation.max_retries, 0);
    assert_eq!(config.guardrail.extra_terms, vec!["bank account number"]);
}

#[test]
fn test_invalid_toml_is_error() {
    assert!(TomlConfig::from_toml_str("port = \"not a number\"").is_err());
}

#[test]
#[serial]
fn test_missing_file_uses_defaults() {
    clear_env();
    let dir = tempfile::tempdir().unwrap();
    let config = TomlConfig::load(Some(&dir.path().join("absent.toml"))).unwrap();
    assert_eq!(config.port, 8000);
}

#[test]
#[serial]
fn test_load_from_file() {
    clear_env();
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.toml");
    std::fs::write(&path, "port = 8123\n").unwrap();

    let config = TomlConfig::load(Some(&path)).unwrap();
    assert_eq!(config.port, 8123);
}

#[test]
#[serial]
fn test_env_overrides_model_and_base_url() {
    clear_env();
    env::set_var(BASE_URL_ENV, "http://127.0.0.1:4010/v1");
    env::set_var(MODEL_ENV, "test-model");

    let dir = tempfile::tempdir().unwrap();
    let config = TomlConfig::load(Some(&dir.path().join("absent.toml"))).unwrap();
    assert_eq!(config.generation.base_url, "http://127.0.0.1:4010/v1");
    assert_eq!(config.generation.model, "test-model");

    clear_env();
}

#[test]
#[serial]
fn test_api_key_env_wins_over_toml() {
    clear_env();
    let mut config = TomlConfig::default();
    config.generation.api_key = Some("toml-key".to_string());
    assert_eq!(config.generation.resolve_api_key().as_deref(), Some("toml-key"));

    env::set_var(API_KEY_ENV, "env-key");
    assert_eq!(config.generation.resolve_api_key().as_deref(), Some("env-key"));

    clear_env();
}

#[test]
#[serial]
fn test_blank_api_key_is_not_configured() {
    clear_env();
    env::set_var(API_KEY_ENV, "   ");
    let mut config = TomlConfig::default();
    config.generation.api_key = Some(String::new());
    assert_eq!(config.generation.resolve_api_key(), None);

    clear_env();
}
