//! Given and when steps for workflow scenarios.

use std::sync::{Arc, Mutex};

use rstest_bdd_macros::{given, when};
use soapdrill::authoring::ScenarioDraft;
use soapdrill::config::TimingConfig;
use soapdrill::session::Session;
use soapdrill::store::{MemoryKeyValueStore, ScenarioStore, SystemClock};
use soapdrill::workbench::FixedLatency;
use tokio::runtime::Runtime;

use super::StepResult;
use super::state::TrainingState;

#[given("a fresh training session")]
fn fresh_training_session(training_state: &TrainingState) -> StepResult<()> {
    let runtime = Runtime::new().map_err(|e| format!("failed to create runtime: {e}"))?;
    let store = ScenarioStore::load(MemoryKeyValueStore::new(), SystemClock);
    let session = Session::new(store, TimingConfig::instant(), FixedLatency);
    training_state.runtime.set(Arc::new(runtime));
    training_state.session.set(Arc::new(Mutex::new(session)));
    Ok(())
}

#[given("the scenario {id} is selected")]
fn scenario_is_selected(training_state: &TrainingState, id: String) -> StepResult<()> {
    select(training_state, &id)
}

#[when("the scenario {id} is selected")]
fn scenario_is_selected_later(training_state: &TrainingState, id: String) -> StepResult<()> {
    select(training_state, &id)
}

fn select(training_state: &TrainingState, id: &str) -> StepResult<()> {
    training_state
        .with_session(|_, session| session.select(id).map(|_| ()))?
        .map_err(|e| e.to_string())
}

#[given("a custom scenario without an error payload is selected")]
fn custom_scenario_selected(training_state: &TrainingState) -> StepResult<()> {
    let draft = ScenarioDraft {
        name: String::from("Healthy echo"),
        description: String::from("A request the service always accepts"),
        request_xml: String::from("<Echo/>"),
        response_xml: String::from("<EchoResponse/>"),
        ..ScenarioDraft::default()
    };
    training_state
        .with_session(|_, session| {
            let scenario = session.add(draft).map_err(|e| e.to_string())?;
            session.select(&scenario.id).map_err(|e| e.to_string())?;
            Ok(())
        })?
}

#[given("a custom scenario with a fault but no fix is selected")]
fn custom_unfixable_scenario_selected(training_state: &TrainingState) -> StepResult<()> {
    let draft = ScenarioDraft {
        name: String::from("Overloaded backend"),
        description: String::from("The service faults and nothing in the request can help"),
        request_xml: String::from("<Quote/>"),
        response_xml: String::from("<QuoteResponse/>"),
        error_xml: String::from("<soap:Fault>Service unavailable</soap:Fault>"),
        explanation: String::from("The fault comes from the server, so retry later."),
        ..ScenarioDraft::default()
    };
    training_state
        .with_session(|_, session| {
            let scenario = session.add(draft).map_err(|e| e.to_string())?;
            session.select(&scenario.id).map_err(|e| e.to_string())?;
            Ok(())
        })?
}

#[when("the request is run")]
fn request_is_run(training_state: &TrainingState) -> StepResult<()> {
    training_state.with_session(|runtime, session| {
        runtime.block_on(async {
            session.run();
            session.settle().await;
        });
    })
}

#[when("the request is started")]
fn request_is_started(training_state: &TrainingState) -> StepResult<()> {
    training_state.with_session(|runtime, session| runtime.block_on(async { session.run() }))
}

#[when("the fix is applied")]
fn fix_is_applied(training_state: &TrainingState) -> StepResult<()> {
    training_state.with_session(|runtime, session| {
        runtime.block_on(async {
            session.resolve();
            session.settle().await;
        });
    })
}

#[when("the fix is started")]
fn fix_is_started(training_state: &TrainingState) -> StepResult<()> {
    training_state.with_session(|runtime, session| runtime.block_on(async { session.resolve() }))
}

#[when("pending requests settle")]
fn pending_requests_settle(training_state: &TrainingState) -> StepResult<()> {
    training_state.with_session(|runtime, session| runtime.block_on(session.settle()))
}
