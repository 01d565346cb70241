//! Data directory resolution.
//!
//! The scenario store lives in a per-user data directory resolved through a
//! priority-based fallback chain:
//!
//! 1. The configured `data_dir` (CLI `--data-dir`, config file, or
//!    `SOAPDRILL_DATA_DIR`)
//! 2. `$XDG_DATA_HOME/soapdrill`
//! 3. `$HOME/.local/share/soapdrill`
//! 4. `./.soapdrill`

use camino::{Utf8Path, Utf8PathBuf};

/// Application directory name appended to the platform data roots.
const APP_DIR: &str = "soapdrill";

/// Last-resort directory, relative to the working directory.
const FALLBACK_DIR: &str = ".soapdrill";

/// Resolves the data directory from configuration and the environment.
///
/// # Type Parameters
///
/// * `E` - An environment provider implementing the `mockable::Env` trait,
///   allowing for testable environment variable access.
pub struct DataDirResolver<'a, E: mockable::Env> {
    env: &'a E,
}

impl<'a, E: mockable::Env> DataDirResolver<'a, E> {
    /// Creates a new resolver with the given environment provider.
    #[must_use]
    pub const fn new(env: &'a E) -> Self {
        Self { env }
    }

    /// Resolves the data directory, preferring an explicit configuration.
    #[must_use]
    pub fn resolve(&self, configured: Option<&Utf8Path>) -> Utf8PathBuf {
        if let Some(path) = configured.filter(|p| !p.as_str().is_empty()) {
            return path.to_owned();
        }
        self.resolve_from_env()
            .unwrap_or_else(|| Utf8PathBuf::from(FALLBACK_DIR))
    }

    /// Resolves the data directory from `XDG_DATA_HOME` or `HOME`.
    ///
    /// Returns `None` when neither variable is set to a non-empty value.
    #[must_use]
    pub fn resolve_from_env(&self) -> Option<Utf8PathBuf> {
        self.non_empty("XDG_DATA_HOME")
            .map(|base| Utf8PathBuf::from(base).join(APP_DIR))
            .or_else(|| {
                self.non_empty("HOME").map(|home| {
                    Utf8PathBuf::from(home)
                        .join(".local")
                        .join("share")
                        .join(APP_DIR)
                })
            })
    }

    fn non_empty(&self, key: &str) -> Option<String> {
        self.env.string(key).filter(|value| !value.is_empty())
    }
}
