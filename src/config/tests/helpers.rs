//! Shared fixtures and helper functions for config tests.

use crate::config::{AppConfig, TimingConfig};
use ortho_config::MergeComposer;
use rstest::fixture;
use std::sync::Arc;

/// Fixture providing an `AppConfig` parsed from a full TOML example.
#[fixture]
pub fn app_config_from_full_toml() -> AppConfig {
    let toml = r#"
        data_dir = "/srv/soapdrill"

        [timing]
        run_delay_min_ms = 100
        run_delay_max_ms = 200
        resolve_delay_ms = 50
        failure_latency_min_ms = 10
        failure_latency_max_ms = 20
        success_latency_min_ms = 30
        success_latency_max_ms = 40
        resolve_latency_min_ms = 5
        resolve_latency_max_ms = 15

        [export]
        file_name = "training-pack.json"
    "#;

    toml::from_str(toml).expect("TOML parsing should succeed")
}

/// Fixture providing an `AppConfig` parsed from a minimal TOML example.
#[fixture]
pub fn app_config_from_partial_toml() -> AppConfig {
    let toml = r"
        [timing]
        resolve_delay_ms = 0
    ";

    toml::from_str(toml).expect("TOML parsing should succeed")
}

/// Helper: Creates a `MergeComposer` with defaults layer already pushed.
pub fn create_composer_with_defaults() -> Result<MergeComposer, serde_json::Error> {
    let mut composer = MergeComposer::new();
    let defaults = ortho_config::serde_json::to_value(AppConfig::default())?;
    composer.push_defaults(defaults);
    Ok(composer)
}

/// Helper: Merges layers from a composer into `AppConfig`.
pub fn merge_config(composer: MergeComposer) -> Result<AppConfig, Arc<ortho_config::OrthoError>> {
    AppConfig::merge_from_layers(composer.layers())
}

/// Helper: Asserts that a config has all default values.
pub fn assert_config_has_defaults(config: &AppConfig) {
    assert!(config.data_dir.is_none(), "data_dir should be None");
    assert_eq!(
        config.timing,
        TimingConfig::default(),
        "timing should use the default pacing"
    );
    assert_eq!(
        config.export.file_name, "soap-scenarios.json",
        "export.file_name should be soap-scenarios.json"
    );
}

/// Helper: Creates a `MergeComposer` with defaults, file, and env layers for testing layer precedence.
pub fn create_composer_with_file_and_env() -> Result<MergeComposer, serde_json::Error> {
    use ortho_config::serde_json::json;

    let mut composer = create_composer_with_defaults()?;

    composer.push_file(
        json!({
            "data_dir": "/from/file",
            "export": { "file_name": "file.json" }
        }),
        None,
    );

    composer.push_environment(json!({
        "data_dir": "/from/env"
    }));

    Ok(composer)
}
