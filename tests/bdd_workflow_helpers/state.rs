//! Scenario state for workflow behavioural tests.

use std::sync::{Arc, Mutex, PoisonError};

use rstest::fixture;
use rstest_bdd::Slot;
use rstest_bdd_macros::ScenarioState;
use soapdrill::session::Session;
use soapdrill::store::MemoryKeyValueStore;
use soapdrill::workbench::FixedLatency;
use tokio::runtime::Runtime;

use super::StepResult;

/// Session type driven by the workflow steps.
pub(crate) type TestSession = Session<MemoryKeyValueStore, FixedLatency>;

/// Shared handle so the session survives `Slot::get` cloning.
pub(crate) type SharedSession = Arc<Mutex<TestSession>>;

#[derive(Default, ScenarioState)]
pub(crate) struct TrainingState {
    pub(crate) runtime: Slot<Arc<Runtime>>,
    pub(crate) session: Slot<SharedSession>,
}

impl TrainingState {
    /// Runs `f` against the session, handing it the scenario's runtime.
    pub(crate) fn with_session<T>(
        &self,
        f: impl FnOnce(&Runtime, &mut TestSession) -> T,
    ) -> StepResult<T> {
        let runtime = self
            .runtime
            .get()
            .ok_or_else(|| String::from("runtime should be initialised"))?;
        let shared = self
            .session
            .get()
            .ok_or_else(|| String::from("session should be initialised"))?;
        let mut session = shared.lock().unwrap_or_else(PoisonError::into_inner);
        Ok(f(&runtime, &mut session))
    }
}

#[fixture]
pub(crate) fn training_state() -> TrainingState {
    TrainingState::default()
}
