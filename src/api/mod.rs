//! Orchestration API for soapdrill commands.
//!
//! This module provides one function per command: [`list`], [`show`],
//! [`run`], [`add`], [`export`], [`import`] and [`reset`]. They hold the
//! behaviour behind the CLI so that it is available to library embedders too.
//!
//! All functions accept library-owned types (not clap types) and return data
//! for the caller to present. They do not print to stdout/stderr or call
//! `std::process::exit`.

use std::sync::Arc;

use camino::{Utf8Path, Utf8PathBuf};

use crate::authoring::ScenarioDraft;
use crate::config::AppConfig;
use crate::error::Result as SoapdrillResult;
use crate::filter::ScenarioQuery;
use crate::scenario::Scenario;
use crate::session::Session;
use crate::store::{
    Clock, DataDirResolver, FileKeyValueStore, KeyValueStore, ScenarioStore, SystemClock,
};
use crate::transfer;
use crate::workbench::{LatencySource, RandomLatency, Workbench};

/// Session backed by the on-disk store and random timing.
pub type DiskSession = Session<FileKeyValueStore, RandomLatency, SystemClock>;

/// Opens the scenario store in the configured data directory.
///
/// # Errors
///
/// Returns [`crate::error::FilesystemError`] if the data directory cannot
/// be created or opened.
pub fn open_session(
    config: &AppConfig,
    env: &impl mockable::Env,
) -> SoapdrillResult<DiskSession> {
    let root = DataDirResolver::new(env).resolve(config.data_dir.as_deref());
    tracing::debug!(%root, "opening scenario store");
    let kv = FileKeyValueStore::open(&root)?;
    let store = ScenarioStore::load(kv, SystemClock);
    Ok(Session::new(store, config.timing.clone(), RandomLatency::new()))
}

/// Scenarios matching `query`, in collection order.
#[must_use]
pub fn list<K, L, C>(session: &mut Session<K, L, C>, query: ScenarioQuery) -> Vec<Scenario>
where
    K: KeyValueStore,
    L: LatencySource,
    C: Clock,
{
    session.set_query(query);
    session.visible().into_iter().cloned().collect()
}

/// The scenario with `id`.
///
/// # Errors
///
/// Returns [`crate::error::StoreError::UnknownScenario`] when no record
/// matches.
pub fn show<K, L, C>(session: &Session<K, L, C>, id: &str) -> SoapdrillResult<Scenario>
where
    K: KeyValueStore,
    L: LatencySource,
    C: Clock,
{
    Ok(session.store().get(id)?.clone())
}

/// Snapshots of the workbench taken during [`run`].
#[derive(Debug, Clone)]
pub struct RunReport {
    /// The scenario that was run.
    pub scenario: Arc<Scenario>,
    /// State once the first run completed.
    pub run: Workbench,
    /// State once the corrected request completed, when resolving was
    /// requested and offered.
    pub resolved: Option<Workbench>,
}

/// Selects `id`, sends its request and optionally resolves the failure.
///
/// Completes once every simulated delay has elapsed.
///
/// # Errors
///
/// Returns [`crate::error::StoreError::UnknownScenario`] when no record
/// matches.
pub async fn run<K, L, C>(
    session: &mut Session<K, L, C>,
    id: &str,
    resolve: bool,
) -> SoapdrillResult<RunReport>
where
    K: KeyValueStore,
    L: LatencySource,
    C: Clock,
{
    let scenario = session.select(id)?;
    session.run();
    session.settle().await;
    let first = session.workbench().clone();

    let resolved = if resolve && first.resolve_offered() {
        session.resolve();
        session.settle().await;
        Some(session.workbench().clone())
    } else {
        None
    };

    Ok(RunReport {
        scenario,
        run: first,
        resolved,
    })
}

/// Validates `draft` and appends it.
///
/// # Errors
///
/// Returns [`crate::error::AuthoringError::MissingField`] when the draft is
/// rejected.
pub fn add<K, L, C>(
    session: &mut Session<K, L, C>,
    draft: ScenarioDraft,
) -> SoapdrillResult<Scenario>
where
    K: KeyValueStore,
    L: LatencySource,
    C: Clock,
{
    Ok(session.add(draft)?)
}

/// Writes the collection to `dir/file_name`, returning the written path.
///
/// # Errors
///
/// Returns a [`crate::error::TransferError`] or
/// [`crate::error::FilesystemError`].
pub fn export<K, L, C>(
    session: &Session<K, L, C>,
    dir: &Utf8Path,
    file_name: &str,
) -> SoapdrillResult<Utf8PathBuf>
where
    K: KeyValueStore,
    L: LatencySource,
    C: Clock,
{
    transfer::write_export(dir, file_name, session.store().scenarios())
}

/// Appends the scenarios in the document at `path`, returning the count.
///
/// # Errors
///
/// Returns [`crate::error::FilesystemError`] if the file cannot be read or
/// [`crate::error::TransferError::InvalidDocument`] if it does not parse. The
/// store is unchanged in both cases.
pub fn import<K, L, C>(session: &mut Session<K, L, C>, path: &Utf8Path) -> SoapdrillResult<usize>
where
    K: KeyValueStore,
    L: LatencySource,
    C: Clock,
{
    let scenarios = transfer::read_import(path)?;
    Ok(session.merge(scenarios))
}

/// Restores the bundled catalogue, returning the new collection size.
pub fn reset<K, L, C>(session: &mut Session<K, L, C>) -> usize
where
    K: KeyValueStore,
    L: LatencySource,
    C: Clock,
{
    session.reset();
    session.store().len()
}
