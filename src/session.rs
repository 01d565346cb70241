//! Top-level state for one learner session.
//!
//! A [`Session`] owns the scenario store, the current filter query and the
//! workflow driver. The store only changes through [`Session::add`],
//! [`Session::import`] and [`Session::reset`]; the workbench only changes
//! through events dispatched to the driver.

use std::sync::Arc;

use crate::authoring::ScenarioDraft;
use crate::config::TimingConfig;
use crate::error::{AuthoringError, StoreError, TransferError};
use crate::filter::{ScenarioQuery, filter};
use crate::scenario::Scenario;
use crate::store::{Clock, KeyValueStore, ScenarioStore, SystemClock};
use crate::transfer;
use crate::workbench::{Driver, Event, LatencySource, Workbench};

/// Store, query and workbench for one learner.
pub struct Session<K: KeyValueStore, L: LatencySource, C: Clock = SystemClock> {
    store: ScenarioStore<K, C>,
    query: ScenarioQuery,
    driver: Driver<L>,
}

impl<K: KeyValueStore, L: LatencySource, C: Clock> Session<K, L, C> {
    /// Starts a session over `store` with nothing selected.
    #[must_use]
    pub fn new(store: ScenarioStore<K, C>, timing: TimingConfig, latency: L) -> Self {
        Self {
            store,
            query: ScenarioQuery::default(),
            driver: Driver::new(timing, latency),
        }
    }

    /// The scenario store.
    #[must_use]
    pub const fn store(&self) -> &ScenarioStore<K, C> {
        &self.store
    }

    /// The current filter query.
    #[must_use]
    pub const fn query(&self) -> &ScenarioQuery {
        &self.query
    }

    /// Replaces the filter query.
    pub fn set_query(&mut self, query: ScenarioQuery) {
        self.query = query;
    }

    /// Scenarios matching the current query, in collection order.
    #[must_use]
    pub fn visible(&self) -> Vec<&Scenario> {
        filter(self.store.scenarios(), &self.query)
    }

    /// The workflow state of the selected scenario.
    #[must_use]
    pub const fn workbench(&self) -> &Workbench {
        self.driver.workbench()
    }

    /// Selects the scenario with `id`, resetting the workflow.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::UnknownScenario`] when no record matches.
    pub fn select(&mut self, id: &str) -> Result<Arc<Scenario>, StoreError> {
        let scenario = Arc::new(self.store.get(id)?.clone());
        self.driver.dispatch(Event::Select(Arc::clone(&scenario)));
        Ok(scenario)
    }

    /// Sends the request in the editor. Ignored while a run is in flight.
    pub fn run(&mut self) {
        self.driver.dispatch(Event::Run);
    }

    /// Loads and sends the corrected request when resolve is offered.
    pub fn resolve(&mut self) {
        self.driver.dispatch(Event::Resolve);
    }

    /// Waits for every in-flight request to complete.
    pub async fn settle(&mut self) {
        self.driver.settle().await;
    }

    /// Appends a new scenario built from `draft`.
    ///
    /// # Errors
    ///
    /// Returns [`AuthoringError::MissingField`] when the draft is rejected.
    pub fn add(&mut self, draft: ScenarioDraft) -> Result<Scenario, AuthoringError> {
        self.store.add(draft)
    }

    /// Parses `document` and appends every record, returning the count.
    ///
    /// # Errors
    ///
    /// Returns [`TransferError::InvalidDocument`]; the store is unchanged.
    pub fn import(&mut self, document: &str) -> Result<usize, TransferError> {
        let scenarios = transfer::parse(document)?;
        Ok(self.merge(scenarios))
    }

    /// Appends already-parsed records, returning the count.
    pub fn merge(&mut self, scenarios: Vec<Scenario>) -> usize {
        let count = self.store.merge(scenarios);
        tracing::info!(count, "scenarios imported");
        count
    }

    /// Renders the full collection as an export document.
    ///
    /// # Errors
    ///
    /// Returns [`TransferError::RenderFailed`] if serialisation fails.
    pub fn export(&self) -> Result<String, TransferError> {
        transfer::render(self.store.scenarios())
    }

    /// Restores the bundled catalogue.
    pub fn reset(&mut self) {
        self.store.reset();
        tracing::info!("scenarios reset to the bundled catalogue");
    }
}
