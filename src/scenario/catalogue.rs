//! The scenario set shipped with the binary.

use super::Scenario;

/// Bundled sample scenarios, embedded at compile time.
const SAMPLE_SCENARIOS: &str = include_str!("../../data/sample_scenarios.json");

/// Returns the bundled default collection.
///
/// The embedded document is validated by the test suite; should it ever fail
/// to parse, the failure is logged and an empty collection returned.
#[must_use]
pub fn bundled_scenarios() -> Vec<Scenario> {
    serde_json::from_str(SAMPLE_SCENARIOS).unwrap_or_else(|error| {
        tracing::error!(%error, "bundled scenario catalogue is corrupt");
        Vec::new()
    })
}
