//! Given and when steps for scenario library scenarios.

use std::sync::{Arc, Mutex};

use camino::Utf8PathBuf;
use cap_std::ambient_authority;
use cap_std::fs_utf8::Dir;
use rstest_bdd_macros::{given, when};
use soapdrill::authoring::ScenarioDraft;
use soapdrill::config::DEFAULT_EXPORT_FILE_NAME;
use soapdrill::filter::{CategoryFilter, ScenarioQuery, filter};
use soapdrill::scenario::Category;
use soapdrill::store::{FileKeyValueStore, ScenarioStore, SystemClock};
use soapdrill::transfer;
use tempfile::TempDir;

use super::StepResult;
use super::state::LibraryState;

#[given("an empty data directory")]
fn empty_data_directory(library_state: &LibraryState) -> StepResult<()> {
    let temp_dir = TempDir::new().map_err(|e| format!("failed to create temp dir: {e}"))?;
    let path = Utf8PathBuf::from_path_buf(temp_dir.path().join("data"))
        .map_err(|path| format!("temp dir is not UTF-8: {}", path.display()))?;
    library_state.temp_dir.set(Arc::new(temp_dir));
    library_state.data_dir.set(path);
    Ok(())
}

fn open_store(library_state: &LibraryState) -> StepResult<()> {
    let kv = FileKeyValueStore::open(&library_state.data_dir()?).map_err(|e| e.to_string())?;
    let store = ScenarioStore::load(kv, SystemClock);
    library_state.store.set(Arc::new(Mutex::new(store)));
    Ok(())
}

#[given("the scenario store is opened")]
fn store_is_opened(library_state: &LibraryState) -> StepResult<()> {
    open_store(library_state)
}

#[when("the scenario store is opened")]
fn store_is_opened_now(library_state: &LibraryState) -> StepResult<()> {
    open_store(library_state)
}

#[when("the scenario store is opened again")]
fn store_is_reopened(library_state: &LibraryState) -> StepResult<()> {
    open_store(library_state)
}

fn author(library_state: &LibraryState, name: String) -> StepResult<()> {
    let draft = ScenarioDraft {
        name,
        description: String::from("Written during a behavioural test"),
        ..ScenarioDraft::with_templates()
    };
    library_state
        .with_store(|store| store.add(draft).map(|_| ()))?
        .map_err(|e| e.to_string())
}

#[given("a scenario named {name} is authored")]
fn scenario_is_authored(library_state: &LibraryState, name: String) -> StepResult<()> {
    author(library_state, name)
}

#[when("a scenario named {name} is authored")]
fn scenario_is_authored_now(library_state: &LibraryState, name: String) -> StepResult<()> {
    author(library_state, name)
}

#[when("a scenario without a description is authored")]
fn scenario_without_description(library_state: &LibraryState) -> StepResult<()> {
    let draft = ScenarioDraft {
        name: String::from("Nameless fault"),
        ..ScenarioDraft::with_templates()
    };
    if let Err(error) = library_state.with_store(|store| store.add(draft))? {
        library_state.rejection.set(error.to_string());
    }
    Ok(())
}

#[when("the scenarios are filtered by {text} in {category_label}")]
fn scenarios_are_filtered(
    library_state: &LibraryState,
    text: String,
    category_label: String,
) -> StepResult<()> {
    let category: Category = category_label.parse()?;
    let query = ScenarioQuery {
        text,
        category: CategoryFilter::Only(category),
        ..ScenarioQuery::default()
    };
    let visible = library_state.with_store(|store| {
        filter(store.scenarios(), &query)
            .into_iter()
            .map(|scenario| scenario.category.to_string())
            .collect::<Vec<_>>()
    })?;
    library_state.visible_categories.set(visible);
    Ok(())
}

#[when("the collection is exported")]
fn collection_is_exported(library_state: &LibraryState) -> StepResult<()> {
    let dir = library_state.data_dir()?.join("exports");
    let path = library_state
        .with_store(|store| {
            transfer::write_export(&dir, DEFAULT_EXPORT_FILE_NAME, store.scenarios())
        })?
        .map_err(|e| e.to_string())?;
    library_state.export_path.set(path);
    Ok(())
}

#[when("the export is imported")]
fn export_is_imported(library_state: &LibraryState) -> StepResult<()> {
    let path = library_state
        .export_path
        .get()
        .ok_or_else(|| String::from("collection should be exported first"))?;
    let scenarios = transfer::read_import(&path).map_err(|e| e.to_string())?;
    library_state.with_store(|store| store.merge(scenarios))?;
    Ok(())
}

#[when("a malformed document is imported")]
fn malformed_document_is_imported(library_state: &LibraryState) -> StepResult<()> {
    let dir_path = library_state.data_dir()?;
    let dir = Dir::open_ambient_dir(&dir_path, ambient_authority())
        .map_err(|e| format!("failed to open data dir: {e}"))?;
    dir.write("broken.json", r#"[{"id": "half-a-record"}]"#)
        .map_err(|e| format!("failed to write fixture: {e}"))?;

    let outcome = transfer::read_import(&dir_path.join("broken.json"));
    if let Err(error) = &outcome {
        library_state.rejection.set(error.to_string());
    }
    if let Ok(scenarios) = outcome {
        library_state.with_store(|store| store.merge(scenarios))?;
    }
    Ok(())
}

#[when("the store is reset")]
fn store_is_reset(library_state: &LibraryState) -> StepResult<()> {
    library_state.with_store(|store| store.reset())
}
