//! Configuration loading with layered precedence.
//!
//! This module provides functions to load configuration with the precedence order
//! (lowest to highest): application defaults, configuration file, environment
//! variables, command-line arguments.
//!
//! # Manual Layer Composition
//!
//! The `OrthoConfig` derive macro provides `load()`, which expects to own the
//! entire command line. soapdrill dispatches subcommands through its own
//! [`Cli`], so the layers are pushed into a `MergeComposer` by hand. The
//! environment layer is also built here so that unparseable numbers fail loudly
//! rather than being ignored.
//!
//! # Environment Variable Handling
//!
//! `SOAPDRILL_TIMING_*` variables must hold unsigned integers (milliseconds).
//! Any other value returns [`ConfigError::InvalidValue`] naming the variable.
//! String fields such as `SOAPDRILL_DATA_DIR` are always accepted.

use camino::Utf8PathBuf;
use cap_std::ambient_authority;
use cap_std::fs_utf8::Dir;
use ortho_config::discovery::ConfigDiscovery;
use ortho_config::serde_json::{self, Map, Value};
use ortho_config::{MergeComposer, toml};

use crate::config::{AppConfig, Cli};
use crate::error::{ConfigError, Result};

// ============================================================================
// Environment Variable Specification Table
// ============================================================================

/// The type of value expected from an environment variable.
#[derive(Clone, Copy)]
enum EnvVarType {
    /// String value (always accepted).
    String,
    /// Unsigned 64-bit integer. Invalid values return an error.
    U64,
}

/// Specification for a single environment variable mapping.
struct EnvVarSpec {
    /// The environment variable name (e.g., `SOAPDRILL_DATA_DIR`).
    env_var: &'static str,
    /// The JSON path segments (e.g., `["timing", "resolve_delay_ms"]`).
    path: &'static [&'static str],
    /// The expected value type.
    var_type: EnvVarType,
}

const fn timing(env_var: &'static str, path: &'static [&'static str]) -> EnvVarSpec {
    EnvVarSpec {
        env_var,
        path,
        var_type: EnvVarType::U64,
    }
}

/// Table of all environment variables and their JSON paths.
const ENV_VAR_SPECS: &[EnvVarSpec] = &[
    EnvVarSpec {
        env_var: "SOAPDRILL_DATA_DIR",
        path: &["data_dir"],
        var_type: EnvVarType::String,
    },
    EnvVarSpec {
        env_var: "SOAPDRILL_EXPORT_FILE_NAME",
        path: &["export", "file_name"],
        var_type: EnvVarType::String,
    },
    timing(
        "SOAPDRILL_TIMING_RUN_DELAY_MIN_MS",
        &["timing", "run_delay_min_ms"],
    ),
    timing(
        "SOAPDRILL_TIMING_RUN_DELAY_MAX_MS",
        &["timing", "run_delay_max_ms"],
    ),
    timing(
        "SOAPDRILL_TIMING_RESOLVE_DELAY_MS",
        &["timing", "resolve_delay_ms"],
    ),
    timing(
        "SOAPDRILL_TIMING_FAILURE_LATENCY_MIN_MS",
        &["timing", "failure_latency_min_ms"],
    ),
    timing(
        "SOAPDRILL_TIMING_FAILURE_LATENCY_MAX_MS",
        &["timing", "failure_latency_max_ms"],
    ),
    timing(
        "SOAPDRILL_TIMING_SUCCESS_LATENCY_MIN_MS",
        &["timing", "success_latency_min_ms"],
    ),
    timing(
        "SOAPDRILL_TIMING_SUCCESS_LATENCY_MAX_MS",
        &["timing", "success_latency_max_ms"],
    ),
    timing(
        "SOAPDRILL_TIMING_RESOLVE_LATENCY_MIN_MS",
        &["timing", "resolve_latency_min_ms"],
    ),
    timing(
        "SOAPDRILL_TIMING_RESOLVE_LATENCY_MAX_MS",
        &["timing", "resolve_latency_max_ms"],
    ),
];

/// Returns the list of environment variable names recognised by the config loader.
///
/// Tests use this to clear every `SOAPDRILL_*` variable without keeping a
/// second list in sync.
#[must_use]
pub fn env_var_names() -> Vec<&'static str> {
    ENV_VAR_SPECS.iter().map(|spec| spec.env_var).collect()
}

/// Load a configuration file and push it to the composer.
fn load_config_file(path: &Utf8PathBuf, composer: &mut MergeComposer) -> Result<()> {
    let current_dir = Utf8PathBuf::from(".");
    let parent = path
        .parent()
        .filter(|p| !p.as_str().is_empty())
        .unwrap_or_else(|| current_dir.as_ref());
    let file_name = path.file_name().unwrap_or(path.as_str());

    let dir = Dir::open_ambient_dir(parent, ambient_authority()).map_err(|e| {
        ConfigError::ParseError {
            message: format!("failed to open directory {parent}: {e}"),
        }
    })?;

    let content = dir
        .read_to_string(file_name)
        .map_err(|e| ConfigError::ParseError {
            message: format!("failed to read {path}: {e}"),
        })?;

    let value =
        toml::from_str::<serde_json::Value>(&content).map_err(|e| ConfigError::ParseError {
            message: format!("failed to parse {path}: {e}"),
        })?;

    tracing::debug!(%path, "loaded configuration file");
    composer.push_file(value, Some(path.clone()));
    Ok(())
}

/// Load configuration with full layer precedence.
///
/// Sources, lowest precedence first:
/// 1. Application defaults defined in the struct
/// 2. Configuration file (`--config`, `SOAPDRILL_CONFIG_PATH`, or discovered)
/// 3. Environment variables prefixed with `SOAPDRILL_`
/// 4. Command-line arguments (from the provided `Cli`)
///
/// The merged result is validated by the post-merge hook.
///
/// # Errors
///
/// Returns `ConfigError` if configuration loading fails due to:
/// - Malformed configuration files
/// - Non-numeric `SOAPDRILL_TIMING_*` values
/// - Inverted timing ranges or an empty export file name
pub fn load_config(cli: &Cli) -> Result<AppConfig> {
    let mut composer = MergeComposer::new();

    let defaults =
        serde_json::to_value(AppConfig::default()).map_err(|e| ConfigError::ParseError {
            message: format!("failed to serialise defaults: {e}"),
        })?;
    composer.push_defaults(defaults);

    let config_path: Option<Utf8PathBuf> =
        cli.config.clone().filter(|p| p.exists()).or_else(|| {
            let discovery = ConfigDiscovery::builder("soapdrill")
                .env_var("SOAPDRILL_CONFIG_PATH")
                .config_file_name("config.toml")
                .dotfile_name(".soapdrill.toml")
                .build();
            discovery
                .candidates()
                .into_iter()
                .filter(|p| p.exists())
                .find_map(|p| Utf8PathBuf::try_from(p).ok())
        });

    if let Some(ref path) = config_path {
        load_config_file(path, &mut composer)?;
    }

    let env_values = collect_env_vars()?;
    if !env_values.is_null() {
        composer.push_environment(env_values);
    }

    let cli_overrides = build_cli_overrides(cli);
    if !cli_overrides.is_null() {
        composer.push_cli(cli_overrides);
    }

    let config =
        AppConfig::merge_from_layers(composer.layers()).map_err(ConfigError::OrthoConfig)?;

    Ok(config)
}

/// Collect environment variables with the `SOAPDRILL_` prefix into a JSON value.
///
/// # Errors
///
/// Returns `ConfigError::InvalidValue` if a numeric variable has an
/// unparseable value.
fn collect_env_vars() -> Result<Value> {
    let mut root = Map::new();

    for spec in ENV_VAR_SPECS {
        let Ok(raw_value) = std::env::var(spec.env_var) else {
            continue;
        };

        let json_value = match spec.var_type {
            EnvVarType::String => Value::String(raw_value),
            EnvVarType::U64 => match raw_value.trim().parse::<u64>() {
                Ok(n) => Value::Number(n.into()),
                Err(_) => {
                    return Err(ConfigError::InvalidValue {
                        field: spec.env_var.to_owned(),
                        reason: format!("expected milliseconds as an integer, got '{raw_value}'"),
                    }
                    .into());
                }
            },
        };

        insert_at_path(&mut root, spec.path, json_value);
    }

    if root.is_empty() {
        Ok(Value::Null)
    } else {
        Ok(Value::Object(root))
    }
}

/// Insert a value at a nested path in a JSON map.
///
/// For a path like `["timing", "resolve_delay_ms"]`, this creates the
/// intermediate `timing` object if needed and inserts the field within it.
fn insert_at_path(root: &mut Map<String, Value>, path: &[&str], value: Value) {
    let Some((&field, parents)) = path.split_last() else {
        return;
    };

    let mut current = root;
    for &segment in parents {
        let entry = current
            .entry(segment.to_owned())
            .or_insert_with(|| Value::Object(Map::new()));
        let Some(obj) = entry.as_object_mut() else {
            return;
        };
        current = obj;
    }

    current.insert(field.to_owned(), value);
}

/// Build a JSON value containing CLI overrides.
fn build_cli_overrides(cli: &Cli) -> serde_json::Value {
    let mut overrides = serde_json::Map::new();

    if let Some(ref data_dir) = cli.data_dir {
        overrides.insert(
            "data_dir".to_owned(),
            serde_json::Value::String(data_dir.to_string()),
        );
    }

    if overrides.is_empty() {
        serde_json::Value::Null
    } else {
        serde_json::Value::Object(overrides)
    }
}
