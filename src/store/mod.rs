//! The scenario store: the single owner of every scenario record.
//!
//! The store keeps the collection as a shared immutable snapshot. Every
//! mutation builds a new collection, swaps it in, and writes it to the
//! key-value store under [`SCENARIOS_KEY`]. Readers holding an older
//! [`ScenarioStore::snapshot`] are unaffected by later mutations.
//!
//! Persistence is best effort. A persisted collection that cannot be parsed
//! is replaced by the bundled catalogue, and a failed write is logged while
//! the store carries on in memory.

mod data_dir;
mod kv;


use std::sync::Arc;

use chrono::{DateTime, Utc};

use crate::authoring::ScenarioDraft;
use crate::error::{AuthoringError, StoreError};
use crate::scenario::{Scenario, bundled_scenarios};

pub use data_dir::DataDirResolver;
pub use kv::{FileKeyValueStore, KeyValueStore, MemoryKeyValueStore};

/// Key under which the collection is persisted.
pub const SCENARIOS_KEY: &str = "soap-scenarios";

/// Prefix of identifiers minted for authored scenarios.
const CUSTOM_ID_PREFIX: &str = "custom";

/// Source of the current time.
#[cfg_attr(test, mockall::automock)]
pub trait Clock {
    /// The current instant.
    fn now(&self) -> DateTime<Utc>;
}

/// [`Clock`] backed by the system time.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Ordered scenario collection with write-through persistence.
pub struct ScenarioStore<K: KeyValueStore, C: Clock = SystemClock> {
    kv: K,
    clock: C,
    scenarios: Arc<[Scenario]>,
    persistent: bool,
}

impl<K: KeyValueStore, C: Clock> ScenarioStore<K, C> {
    /// Loads the persisted collection, falling back to the bundled catalogue.
    ///
    /// Missing, unreadable and unparseable entries all yield the bundled
    /// scenarios; the latter two are logged at `warn`.
    #[must_use]
    pub fn load(kv: K, clock: C) -> Self {
        let scenarios = match kv.get(SCENARIOS_KEY) {
            Ok(Some(document)) => parse_persisted(&document),
            Ok(None) => {
                tracing::debug!("no persisted scenarios, using bundled catalogue");
                bundled_scenarios()
            }
            Err(error) => {
                tracing::warn!(%error, "failed to read persisted scenarios, using bundled catalogue");
                bundled_scenarios()
            }
        };
        Self {
            kv,
            clock,
            scenarios: scenarios.into(),
            persistent: true,
        }
    }

    /// The current collection.
    #[must_use]
    pub fn scenarios(&self) -> &[Scenario] {
        &self.scenarios
    }

    /// A cheap handle on the current collection, unaffected by later
    /// mutations.
    #[must_use]
    pub fn snapshot(&self) -> Arc<[Scenario]> {
        Arc::clone(&self.scenarios)
    }

    /// Number of scenarios in the collection.
    #[must_use]
    pub fn len(&self) -> usize {
        self.scenarios.len()
    }

    /// Whether the collection is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.scenarios.is_empty()
    }

    /// Whether the last write reached the key-value store.
    #[must_use]
    pub const fn is_persistent(&self) -> bool {
        self.persistent
    }

    /// The first scenario with the given identifier.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::UnknownScenario`] when no record matches.
    pub fn get(&self, id: &str) -> Result<&Scenario, StoreError> {
        self.scenarios
            .iter()
            .find(|scenario| scenario.id == id)
            .ok_or_else(|| StoreError::UnknownScenario { id: id.to_owned() })
    }

    /// Writes the full collection to the key-value store.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::SerialiseFailed`] or [`StoreError::WriteFailed`].
    pub fn save(&mut self) -> Result<(), StoreError> {
        let document = serde_json::to_string(&*self.scenarios).map_err(|error| {
            StoreError::SerialiseFailed {
                message: error.to_string(),
            }
        })?;
        self.kv.set(SCENARIOS_KEY, &document)
    }

    /// Validates `draft` and appends it under a freshly minted identifier.
    ///
    /// # Errors
    ///
    /// Returns [`AuthoringError::MissingField`] when the draft is rejected;
    /// the collection is left unchanged.
    pub fn add(&mut self, draft: ScenarioDraft) -> Result<Scenario, AuthoringError> {
        draft.validate()?;
        let now = self.clock.now();
        let id = self.mint_id(now);
        let scenario = draft.into_scenario(id, now)?;
        tracing::info!(id = %scenario.id, name = %scenario.name, "scenario added");

        let mut next = self.scenarios.to_vec();
        next.push(scenario.clone());
        self.replace(next);
        Ok(scenario)
    }

    /// Appends every imported record, keeping duplicates.
    ///
    /// Returns the number of records appended.
    pub fn merge(&mut self, imported: Vec<Scenario>) -> usize {
        let count = imported.len();
        let duplicates = imported
            .iter()
            .filter(|incoming| self.scenarios.iter().any(|s| s.id == incoming.id))
            .count();
        if duplicates > 0 {
            tracing::info!(duplicates, "imported scenarios reuse existing identifiers");
        }

        let mut next = self.scenarios.to_vec();
        next.extend(imported);
        self.replace(next);
        count
    }

    /// Restores the bundled catalogue, discarding authored and imported
    /// scenarios.
    pub fn reset(&mut self) {
        self.replace(bundled_scenarios());
    }

    /// Swaps in `next` and writes it through, degrading to in-memory
    /// operation when the write fails.
    fn replace(&mut self, next: Vec<Scenario>) {
        self.scenarios = next.into();
        match self.save() {
            Ok(()) => {
                if !self.persistent {
                    tracing::info!("scenario store writable again");
                }
                self.persistent = true;
                tracing::debug!(count = self.scenarios.len(), "scenarios saved");
            }
            Err(error) => {
                tracing::warn!(%error, "continuing with in-memory scenarios only");
                self.persistent = false;
            }
        }
    }

    /// `custom-<millis>`, suffixed with a counter when already taken.
    fn mint_id(&self, now: DateTime<Utc>) -> String {
        let base = format!("{CUSTOM_ID_PREFIX}-{}", now.timestamp_millis());
        let taken = |candidate: &str| self.scenarios.iter().any(|s| s.id == candidate);
        let mut candidate = base.clone();
        let mut suffix = 1_u32;
        while taken(&candidate) {
            candidate = format!("{base}-{suffix}");
            suffix = suffix.saturating_add(1);
        }
        candidate
    }
}

fn parse_persisted(document: &str) -> Vec<Scenario> {
    serde_json::from_str(document).unwrap_or_else(|error| {
        tracing::warn!(%error, "failed to load saved scenarios, using bundled catalogue");
        bundled_scenarios()
    })
}
