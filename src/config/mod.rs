//! Configuration system for soapdrill.
//!
//! This module provides the configuration structures and CLI definitions for
//! soapdrill. Configuration loading and precedence merging is handled by the
//! `ortho_config` crate: CLI flags override environment variables, which
//! override configuration files, which override defaults.
//!
//! The configuration file is expected at `~/.config/soapdrill/config.toml` by default.
//!
//! # Example Configuration
//!
//! ```toml
//! data_dir = "/home/user/.local/share/soapdrill"
//!
//! [timing]
//! run_delay_min_ms = 500
//! run_delay_max_ms = 1500
//! resolve_delay_ms = 250
//!
//! [export]
//! file_name = "soap-scenarios.json"
//! ```

mod cli;
mod loader;
mod types;

#[cfg(test)]
mod tests;

pub use cli::{AddArgs, Cli, Commands, ExportArgs, ImportArgs, ListArgs, RunArgs, ShowArgs};
pub use loader::{env_var_names, load_config};
pub use types::{AppConfig, DEFAULT_EXPORT_FILE_NAME, ExportConfig, TimingConfig};
