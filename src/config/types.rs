//! Configuration data types for soapdrill.

use std::ops::RangeInclusive;
use std::time::Duration;

use camino::Utf8PathBuf;
use ortho_config::{OrthoConfig, OrthoError, OrthoResult, PostMergeContext, PostMergeHook};
use serde::{Deserialize, Serialize};

/// Default name of the exported scenario document.
pub const DEFAULT_EXPORT_FILE_NAME: &str = "soap-scenarios.json";

/// Simulated timing of the request workflow, in milliseconds.
///
/// Ranges are inclusive. The defaults reproduce the pacing learners are used
/// to: a one to three second "network" wait before a response, and a shorter
/// fixed pause before the corrected request is sent.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct TimingConfig {
    /// Lower bound of the wait before a run produces its outcome.
    pub run_delay_min_ms: u64,
    /// Upper bound of the wait before a run produces its outcome.
    pub run_delay_max_ms: u64,
    /// Fixed wait between resolving and receiving the corrected response.
    pub resolve_delay_ms: u64,
    /// Lower bound of the latency reported for a fault.
    pub failure_latency_min_ms: u64,
    /// Upper bound of the latency reported for a fault.
    pub failure_latency_max_ms: u64,
    /// Lower bound of the latency reported for a successful run.
    pub success_latency_min_ms: u64,
    /// Upper bound of the latency reported for a successful run.
    pub success_latency_max_ms: u64,
    /// Lower bound of the latency reported for the corrected request.
    pub resolve_latency_min_ms: u64,
    /// Upper bound of the latency reported for the corrected request.
    pub resolve_latency_max_ms: u64,
}

impl Default for TimingConfig {
    fn default() -> Self {
        Self {
            run_delay_min_ms: 1000,
            run_delay_max_ms: 3000,
            resolve_delay_ms: 500,
            failure_latency_min_ms: 200,
            failure_latency_max_ms: 700,
            success_latency_min_ms: 200,
            success_latency_max_ms: 700,
            resolve_latency_min_ms: 150,
            resolve_latency_max_ms: 450,
        }
    }
}

impl TimingConfig {
    /// Timing with every delay and latency set to zero.
    #[must_use]
    pub const fn instant() -> Self {
        Self {
            run_delay_min_ms: 0,
            run_delay_max_ms: 0,
            resolve_delay_ms: 0,
            failure_latency_min_ms: 0,
            failure_latency_max_ms: 0,
            success_latency_min_ms: 0,
            success_latency_max_ms: 0,
            resolve_latency_min_ms: 0,
            resolve_latency_max_ms: 0,
        }
    }

    /// Range of the wait before a run completes.
    #[must_use]
    pub const fn run_delay(&self) -> RangeInclusive<u64> {
        self.run_delay_min_ms..=self.run_delay_max_ms
    }

    /// Wait before the corrected request completes.
    #[must_use]
    pub const fn resolve_delay(&self) -> Duration {
        Duration::from_millis(self.resolve_delay_ms)
    }

    /// Range of reported latency for faults.
    #[must_use]
    pub const fn failure_latency(&self) -> RangeInclusive<u64> {
        self.failure_latency_min_ms..=self.failure_latency_max_ms
    }

    /// Range of reported latency for successful runs.
    #[must_use]
    pub const fn success_latency(&self) -> RangeInclusive<u64> {
        self.success_latency_min_ms..=self.success_latency_max_ms
    }

    /// Range of reported latency for the corrected request.
    #[must_use]
    pub const fn resolve_latency(&self) -> RangeInclusive<u64> {
        self.resolve_latency_min_ms..=self.resolve_latency_max_ms
    }

    /// Validates that every lower bound is no greater than its upper bound.
    ///
    /// # Errors
    ///
    /// Returns [`crate::error::ConfigError::InvalidValue`] naming the first
    /// inverted range.
    pub fn validate(&self) -> crate::error::Result<()> {
        let ranges = [
            ("run_delay", self.run_delay_min_ms, self.run_delay_max_ms),
            (
                "failure_latency",
                self.failure_latency_min_ms,
                self.failure_latency_max_ms,
            ),
            (
                "success_latency",
                self.success_latency_min_ms,
                self.success_latency_max_ms,
            ),
            (
                "resolve_latency",
                self.resolve_latency_min_ms,
                self.resolve_latency_max_ms,
            ),
        ];
        for (name, min, max) in ranges {
            if min > max {
                return Err(crate::error::ConfigError::InvalidValue {
                    field: format!("timing.{name}_min_ms"),
                    reason: format!("{min} exceeds timing.{name}_max_ms ({max})"),
                }
                .into());
            }
        }
        Ok(())
    }
}

/// Export file configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct ExportConfig {
    /// File name written by `export`.
    pub file_name: String,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            file_name: DEFAULT_EXPORT_FILE_NAME.to_owned(),
        }
    }
}

impl ExportConfig {
    /// Validates that the file name is a bare, non-empty name.
    ///
    /// # Errors
    ///
    /// Returns [`crate::error::ConfigError::InvalidValue`] for an empty name
    /// or one containing a path separator.
    pub fn validate(&self) -> crate::error::Result<()> {
        let name = self.file_name.trim();
        let reason = if name.is_empty() {
            Some("cannot be empty")
        } else if name.contains(['/', '\\']) {
            Some("must be a file name, not a path")
        } else {
            None
        };
        match reason {
            Some(why) => Err(crate::error::ConfigError::InvalidValue {
                field: String::from("export.file_name"),
                reason: why.to_owned(),
            }
            .into()),
            None => Ok(()),
        }
    }
}

/// Root application configuration.
///
/// This structure is loaded from configuration files, environment variables,
/// and command-line arguments with layered precedence. The precedence order
/// (lowest to highest) is: defaults, configuration file, environment variables,
/// command-line arguments.
///
/// Configuration files are discovered in this order:
/// 1. Path specified via `SOAPDRILL_CONFIG_PATH` environment variable
/// 2. `.soapdrill.toml` in the current working directory
/// 3. `.soapdrill.toml` in the home directory
/// 4. `~/.config/soapdrill/config.toml` (XDG default)
#[derive(Debug, Clone, Default, Deserialize, Serialize, OrthoConfig)]
#[ortho_config(
    prefix = "SOAPDRILL",
    post_merge_hook,
    discovery(
        app_name = "soapdrill",
        env_var = "SOAPDRILL_CONFIG_PATH",
        config_file_name = "config.toml",
        dotfile_name = ".soapdrill.toml",
        config_cli_long = "config",
        config_cli_visible = true,
    )
)]
pub struct AppConfig {
    /// Directory holding the persisted scenario collection.
    pub data_dir: Option<Utf8PathBuf>,

    /// Simulated workflow timing.
    #[serde(default)]
    #[ortho_config(skip_cli)]
    pub timing: TimingConfig,

    /// Export file settings.
    #[serde(default)]
    #[ortho_config(skip_cli)]
    pub export: ExportConfig,
}

impl AppConfig {
    /// Validates every section.
    ///
    /// # Errors
    ///
    /// Returns the first [`crate::error::ConfigError::InvalidValue`] found.
    pub fn validate(&self) -> crate::error::Result<()> {
        self.timing.validate()?;
        self.export.validate()
    }
}

impl PostMergeHook for AppConfig {
    fn post_merge(&mut self, _ctx: &PostMergeContext) -> OrthoResult<()> {
        self.export.file_name = self.export.file_name.trim().to_owned();
        self.validate().map_err(|error| {
            std::sync::Arc::new(OrthoError::Validation {
                key: String::from("config"),
                message: error.to_string(),
            })
        })
    }
}
