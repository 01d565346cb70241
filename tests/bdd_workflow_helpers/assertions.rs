//! Then steps for workflow scenarios.

use rstest_bdd_macros::then;
use soapdrill::workbench::Workbench;

use super::StepResult;
use super::state::TrainingState;

fn workbench(training_state: &TrainingState) -> StepResult<Workbench> {
    training_state.with_session(|_, session| session.workbench().clone())
}

#[then("the workflow state is {label}")]
fn training_state_is(training_state: &TrainingState, label: String) -> StepResult<()> {
    let actual = workbench(training_state)?
        .state()
        .map(soapdrill::workbench::WorkflowState::label);
    if actual == Some(label.as_str()) {
        Ok(())
    } else {
        Err(format!("expected state '{label}', got {actual:?}"))
    }
}

#[then("the response status is {status}")]
fn response_status_is(training_state: &TrainingState, status: u16) -> StepResult<()> {
    let bench = workbench(training_state)?;
    let outcome = bench
        .outcome()
        .ok_or_else(|| String::from("expected a response to be shown"))?;
    if outcome.status_code == status {
        Ok(())
    } else {
        Err(format!(
            "expected status {status}, got {}",
            outcome.status_code
        ))
    }
}

#[then("a fix is offered")]
fn fix_is_offered(training_state: &TrainingState) -> StepResult<()> {
    if workbench(training_state)?.resolve_offered() {
        Ok(())
    } else {
        Err(String::from("expected resolve to be offered"))
    }
}

#[then("no fix is offered")]
fn no_fix_is_offered(training_state: &TrainingState) -> StepResult<()> {
    if workbench(training_state)?.resolve_offered() {
        Err(String::from("expected resolve not to be offered"))
    } else {
        Ok(())
    }
}

#[then("the editor shows the fixed request")]
fn editor_shows_fixed_request(training_state: &TrainingState) -> StepResult<()> {
    let bench = workbench(training_state)?;
    let fixed = bench
        .selected()
        .and_then(|scenario| scenario.fixed_request_xml.clone())
        .ok_or_else(|| String::from("selected scenario should have a fixed request"))?;
    if bench.content() == fixed {
        Ok(())
    } else {
        Err(format!("editor shows:\n{}", bench.content()))
    }
}

#[then("the editor is read only")]
fn editor_is_read_only(training_state: &TrainingState) -> StepResult<()> {
    if workbench(training_state)?.is_read_only() {
        Ok(())
    } else {
        Err(String::from("expected the editor to be read only"))
    }
}

#[then("the explanation is shown")]
fn explanation_is_shown(training_state: &TrainingState) -> StepResult<()> {
    workbench(training_state)?
        .explanation()
        .map(|_| ())
        .ok_or_else(|| String::from("expected the selected scenario to explain itself"))
}

#[then("no response is shown")]
fn no_response_is_shown(training_state: &TrainingState) -> StepResult<()> {
    let bench = workbench(training_state)?;
    if bench.outcome().is_none() && bench.response_label() == "No response" {
        Ok(())
    } else {
        Err(format!("expected no response, got {:?}", bench.outcome()))
    }
}
