//! Scenario state for scenario library behavioural tests.

use std::sync::{Arc, Mutex, PoisonError};

use camino::Utf8PathBuf;
use rstest::fixture;
use rstest_bdd::Slot;
use rstest_bdd_macros::ScenarioState;
use soapdrill::store::{FileKeyValueStore, ScenarioStore};
use tempfile::TempDir;

use super::StepResult;

/// Store type exercised by the library steps.
pub(crate) type LibraryStore = ScenarioStore<FileKeyValueStore>;

#[derive(Default, ScenarioState)]
pub(crate) struct LibraryState {
    pub(crate) temp_dir: Slot<Arc<TempDir>>,
    pub(crate) data_dir: Slot<Utf8PathBuf>,
    pub(crate) store: Slot<Arc<Mutex<LibraryStore>>>,
    pub(crate) visible_categories: Slot<Vec<String>>,
    pub(crate) export_path: Slot<Utf8PathBuf>,
    pub(crate) rejection: Slot<String>,
}

impl LibraryState {
    /// Runs `f` against the open store.
    pub(crate) fn with_store<T>(&self, f: impl FnOnce(&mut LibraryStore) -> T) -> StepResult<T> {
        let shared = self
            .store
            .get()
            .ok_or_else(|| String::from("store should be opened first"))?;
        let mut store = shared.lock().unwrap_or_else(PoisonError::into_inner);
        Ok(f(&mut store))
    }

    /// The data directory created by the background step.
    pub(crate) fn data_dir(&self) -> StepResult<Utf8PathBuf> {
        self.data_dir
            .get()
            .ok_or_else(|| String::from("data directory should be set"))
    }
}

#[fixture]
pub(crate) fn library_state() -> LibraryState {
    LibraryState::default()
}
