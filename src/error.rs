//! Semantic error types for the soapdrill application.
//!
//! This module defines the error hierarchy for soapdrill, following the principle
//! of using semantic error enums (via `thiserror`) for conditions the caller might
//! inspect or report, while reserving opaque errors (`eyre::Report`) for the
//! application boundary.
//!
//! Most failure modes in soapdrill degrade rather than abort: a corrupt
//! persisted collection falls back to the bundled scenarios and a failed store
//! write leaves the collection in memory. The variants here cover the paths
//! that are surfaced to the user.

use std::path::PathBuf;
use std::sync::Arc;

use thiserror::Error;

/// Errors that can occur during configuration loading and validation.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The configuration file could not be parsed.
    #[error("failed to parse configuration file: {message}")]
    ParseError {
        /// A description of the parse error.
        message: String,
    },

    /// A configuration value failed validation.
    #[error("invalid configuration value for '{field}': {reason}")]
    InvalidValue {
        /// The name of the invalid field.
        field: String,
        /// The reason the value is invalid.
        reason: String,
    },

    /// The `OrthoConfig` library returned an error during configuration loading.
    ///
    /// This wraps errors from the layered configuration system, including:
    /// - Configuration file parsing errors
    /// - Environment variable parsing errors
    /// - CLI argument parsing errors
    /// - Post-merge validation failures
    #[error("configuration loading failed: {0}")]
    OrthoConfig(Arc<ortho_config::OrthoError>),
}

/// Errors raised by the scenario store.
#[derive(Debug, Error)]
pub enum StoreError {
    /// No scenario with the requested identifier exists.
    #[error("unknown scenario: {id}")]
    UnknownScenario {
        /// The identifier that was looked up.
        id: String,
    },

    /// The collection could not be serialised for persistence.
    #[error("failed to serialise scenario collection: {message}")]
    SerialiseFailed {
        /// A description of the serialisation failure.
        message: String,
    },

    /// The key-value store rejected a write.
    #[error("failed to write '{key}' to the scenario store: {message}")]
    WriteFailed {
        /// The key being written.
        key: String,
        /// A description of the write failure.
        message: String,
    },

    /// The key-value store could not be read.
    #[error("failed to read '{key}' from the scenario store: {message}")]
    ReadFailed {
        /// The key being read.
        key: String,
        /// A description of the read failure.
        message: String,
    },
}

/// Errors raised while importing or exporting scenario documents.
#[derive(Debug, Error)]
pub enum TransferError {
    /// The supplied document is not a valid scenario collection.
    #[error("failed to import scenarios, please check the file format: {message}")]
    InvalidDocument {
        /// A description of the parse failure.
        message: String,
    },

    /// The collection could not be rendered as a document.
    #[error("failed to export scenarios: {message}")]
    RenderFailed {
        /// A description of the rendering failure.
        message: String,
    },
}

/// Errors raised when a scenario draft fails validation.
#[derive(Debug, Error)]
pub enum AuthoringError {
    /// A mandatory draft field is empty after trimming.
    #[error("scenario {field} must not be empty")]
    MissingField {
        /// The name of the empty field.
        field: &'static str,
    },
}

/// Errors that can occur during filesystem operations.
#[derive(Debug, Error)]
pub enum FilesystemError {
    /// A file or directory was not found.
    #[error("path not found: {path}")]
    NotFound {
        /// The path that was not found.
        path: PathBuf,
    },

    /// Permission denied when accessing a path.
    #[error("permission denied: {path}")]
    PermissionDenied {
        /// The path that could not be accessed.
        path: PathBuf,
    },

    /// An I/O error occurred.
    #[error("I/O error at '{path}': {message}")]
    IoError {
        /// The path where the error occurred.
        path: PathBuf,
        /// A description of the I/O error.
        message: String,
    },
}

impl FilesystemError {
    /// Classify an I/O error raised while accessing `path`.
    #[must_use]
    pub fn from_io(path: impl Into<PathBuf>, error: &std::io::Error) -> Self {
        let path_buf = path.into();
        match error.kind() {
            std::io::ErrorKind::NotFound => Self::NotFound { path: path_buf },
            std::io::ErrorKind::PermissionDenied => Self::PermissionDenied { path: path_buf },
            _ => Self::IoError {
                path: path_buf,
                message: error.to_string(),
            },
        }
    }
}

/// Top-level error type for the soapdrill application.
///
/// This enum aggregates all domain-specific errors into a single type that can
/// be used throughout the application. At the application boundary (main.rs),
/// these errors are converted to `eyre::Report` for human-readable reporting.
#[derive(Debug, Error)]
pub enum SoapdrillError {
    /// An error occurred during configuration.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// An error occurred in the scenario store.
    #[error(transparent)]
    Store(#[from] StoreError),

    /// An error occurred importing or exporting scenarios.
    #[error(transparent)]
    Transfer(#[from] TransferError),

    /// A scenario draft was rejected.
    #[error(transparent)]
    Authoring(#[from] AuthoringError),

    /// An error occurred during filesystem operations.
    #[error(transparent)]
    Filesystem(#[from] FilesystemError),
}

/// A specialised `Result` type for soapdrill operations.
pub type Result<T> = std::result::Result<T, SoapdrillError>;
