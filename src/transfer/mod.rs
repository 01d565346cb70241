//! Import and export of scenario collections as JSON documents.
//!
//! The document is a JSON array of scenario records in the same camelCase
//! form the store persists, pretty-printed with two-space indentation.
//! Parsing is all-or-nothing: a document with any invalid record is rejected
//! and nothing is imported.

use camino::{Utf8Path, Utf8PathBuf};
use cap_std::ambient_authority;
use cap_std::fs_utf8::Dir;

use crate::error::{FilesystemError, Result, TransferError};
use crate::scenario::Scenario;

/// Renders `scenarios` as a pretty-printed JSON array.
///
/// # Errors
///
/// Returns [`TransferError::RenderFailed`] if serialisation fails.
pub fn render(scenarios: &[Scenario]) -> std::result::Result<String, TransferError> {
    serde_json::to_string_pretty(scenarios).map_err(|error| TransferError::RenderFailed {
        message: error.to_string(),
    })
}

/// Parses a JSON array of scenario records.
///
/// # Errors
///
/// Returns [`TransferError::InvalidDocument`] when the text is not JSON, is
/// not an array, or any element is missing a required field.
pub fn parse(document: &str) -> std::result::Result<Vec<Scenario>, TransferError> {
    serde_json::from_str(document).map_err(|error| TransferError::InvalidDocument {
        message: error.to_string(),
    })
}

/// Writes the rendered collection to `dir/file_name`, returning the path.
///
/// The directory is created if it does not exist.
///
/// # Errors
///
/// Returns a [`TransferError`] if rendering fails or a [`FilesystemError`]
/// if the directory or file cannot be written.
pub fn write_export(
    dir: &Utf8Path,
    file_name: &str,
    scenarios: &[Scenario],
) -> Result<Utf8PathBuf> {
    let document = render(scenarios)?;
    let target = dir.join(file_name);

    Dir::create_ambient_dir_all(dir, ambient_authority())
        .map_err(|error| FilesystemError::from_io(dir.as_std_path(), &error))?;
    let handle = Dir::open_ambient_dir(dir, ambient_authority())
        .map_err(|error| FilesystemError::from_io(dir.as_std_path(), &error))?;
    handle
        .write(file_name, document)
        .map_err(|error| FilesystemError::from_io(target.as_std_path(), &error))?;

    tracing::info!(path = %target, count = scenarios.len(), "scenarios exported");
    Ok(target)
}

/// Reads the UTF-8 text file at `path`.
///
/// # Errors
///
/// Returns a [`FilesystemError`] if the file cannot be read.
pub fn read_document(path: &Utf8Path) -> Result<String> {
    let parent = path
        .parent()
        .filter(|p| !p.as_str().is_empty())
        .unwrap_or_else(|| Utf8Path::new("."));
    let file_name = path.file_name().unwrap_or(path.as_str());

    let dir = Dir::open_ambient_dir(parent, ambient_authority())
        .map_err(|error| FilesystemError::from_io(parent.as_std_path(), &error))?;
    let document = dir
        .read_to_string(file_name)
        .map_err(|error| FilesystemError::from_io(path.as_std_path(), &error))?;
    Ok(document)
}

/// Reads and parses the document at `path`.
///
/// # Errors
///
/// Returns a [`FilesystemError`] if the file cannot be read or a
/// [`TransferError::InvalidDocument`] if it does not parse.
pub fn read_import(path: &Utf8Path) -> Result<Vec<Scenario>> {
    let document = read_document(path)?;
    let scenarios = parse(&document).inspect_err(|error| {
        tracing::warn!(%path, %error, "rejected scenario document");
    })?;
    tracing::debug!(%path, count = scenarios.len(), "scenario document parsed");
    Ok(scenarios)
}
