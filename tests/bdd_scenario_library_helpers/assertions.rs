//! Then steps for scenario library scenarios.

use rstest_bdd_macros::then;

use super::StepResult;
use super::state::LibraryState;

#[then("the store holds {count} scenarios")]
fn store_holds(library_state: &LibraryState, count: usize) -> StepResult<()> {
    let actual = library_state.with_store(|store| store.len())?;
    if actual == count {
        Ok(())
    } else {
        Err(format!("expected {count} scenarios, found {actual}"))
    }
}

#[then("the last scenario is named {name}")]
fn last_scenario_named(library_state: &LibraryState, name: String) -> StepResult<()> {
    let last = library_state
        .with_store(|store| store.scenarios().last().map(|scenario| scenario.name.clone()))?;
    if last.as_deref() == Some(name.as_str()) {
        Ok(())
    } else {
        Err(format!("expected last scenario '{name}', found {last:?}"))
    }
}

#[then("the draft is rejected for {field}")]
fn draft_rejected_for(library_state: &LibraryState, field: String) -> StepResult<()> {
    let rejection = library_state
        .rejection
        .get()
        .ok_or_else(|| String::from("expected the draft to be rejected"))?;
    if rejection.contains(&field) {
        Ok(())
    } else {
        Err(format!("rejection '{rejection}' does not mention {field}"))
    }
}

fn visible(library_state: &LibraryState) -> StepResult<Vec<String>> {
    library_state
        .visible_categories
        .get()
        .ok_or_else(|| String::from("scenarios should be filtered first"))
}

#[then("every visible scenario is in {category}")]
fn every_visible_in(library_state: &LibraryState, category: String) -> StepResult<()> {
    let visible = visible(library_state)?;
    match visible.iter().find(|actual| **actual != category) {
        None => Ok(()),
        Some(other) => Err(format!("found a scenario in {other}")),
    }
}

#[then("at least one scenario is visible")]
fn at_least_one_visible(library_state: &LibraryState) -> StepResult<()> {
    if visible(library_state)?.is_empty() {
        Err(String::from("expected at least one visible scenario"))
    } else {
        Ok(())
    }
}

#[then("no scenario is visible")]
fn none_visible(library_state: &LibraryState) -> StepResult<()> {
    let visible = visible(library_state)?;
    if visible.is_empty() {
        Ok(())
    } else {
        Err(format!("expected no scenarios, found {}", visible.len()))
    }
}

#[then("the import is rejected")]
fn import_is_rejected(library_state: &LibraryState) -> StepResult<()> {
    library_state
        .rejection
        .get()
        .map(|_| ())
        .ok_or_else(|| String::from("expected the import to be rejected"))
}
