//! Local key-value persistence.
//!
//! The scenario collection lives under a single named key. Production code
//! keeps one JSON file per key inside the data directory, accessed through a
//! `cap_std` directory capability; tests and ephemeral sessions use the
//! in-memory implementation.

use std::collections::HashMap;
use std::io::ErrorKind;

use camino::{Utf8Path, Utf8PathBuf};
use cap_std::ambient_authority;
use cap_std::fs_utf8::Dir;

use crate::error::{FilesystemError, StoreError};

/// Extension appended to every key to form its file name.
const ENTRY_EXTENSION: &str = "json";

/// A minimal string key-value store.
#[cfg_attr(test, mockall::automock)]
pub trait KeyValueStore {
    /// Reads the value stored under `key`, or `None` when absent.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::ReadFailed`] when the backing medium cannot be
    /// read.
    fn get(&self, key: &str) -> Result<Option<String>, StoreError>;

    /// Replaces the value stored under `key`.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::WriteFailed`] when the backing medium rejects the
    /// write.
    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError>;
}

/// Volatile store used when nothing should touch the disk.
#[derive(Debug, Default, Clone)]
pub struct MemoryKeyValueStore {
    entries: HashMap<String, String>,
}

impl MemoryKeyValueStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store pre-populated with one entry.
    #[must_use]
    pub fn with_entry(key: &str, value: &str) -> Self {
        let mut entries = HashMap::new();
        entries.insert(key.to_owned(), value.to_owned());
        Self { entries }
    }
}

impl KeyValueStore for MemoryKeyValueStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        self.entries.insert(key.to_owned(), value.to_owned());
        Ok(())
    }
}

/// File-backed store rooted at a data directory.
///
/// Each key maps to `<root>/<key>.json`. Writes go to a sibling temporary file
/// first and are renamed into place, so a crash never leaves a truncated
/// entry behind.
#[derive(Debug)]
pub struct FileKeyValueStore {
    dir: Dir,
    root: Utf8PathBuf,
}

impl FileKeyValueStore {
    /// Opens (creating if needed) the data directory at `root`.
    ///
    /// # Errors
    ///
    /// Returns [`FilesystemError`] if the directory cannot be created or
    /// opened.
    pub fn open(root: &Utf8Path) -> Result<Self, FilesystemError> {
        Dir::create_ambient_dir_all(root, ambient_authority())
            .map_err(|error| FilesystemError::from_io(root.as_std_path(), &error))?;
        let dir = Dir::open_ambient_dir(root, ambient_authority())
            .map_err(|error| FilesystemError::from_io(root.as_std_path(), &error))?;
        Ok(Self {
            dir,
            root: root.to_owned(),
        })
    }

    /// The directory backing this store.
    #[must_use]
    pub fn root(&self) -> &Utf8Path {
        &self.root
    }

    /// Full path of the file holding `key`.
    #[must_use]
    pub fn entry_path(&self, key: &str) -> Utf8PathBuf {
        self.root.join(entry_file_name(key))
    }
}

fn entry_file_name(key: &str) -> String {
    format!("{key}.{ENTRY_EXTENSION}")
}

impl KeyValueStore for FileKeyValueStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        match self.dir.read_to_string(entry_file_name(key)) {
            Ok(contents) => Ok(Some(contents)),
            Err(error) if error.kind() == ErrorKind::NotFound => Ok(None),
            Err(error) => Err(StoreError::ReadFailed {
                key: key.to_owned(),
                message: format!("{}: {error}", self.entry_path(key)),
            }),
        }
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        let file_name = entry_file_name(key);
        let staging = format!("{file_name}.tmp");
        let write_failed = |error: std::io::Error| StoreError::WriteFailed {
            key: key.to_owned(),
            message: format!("{}: {error}", self.entry_path(key)),
        };

        self.dir.write(&staging, value).map_err(write_failed)?;
        self.dir
            .rename(&staging, &self.dir, &file_name)
            .map_err(write_failed)
    }
}
