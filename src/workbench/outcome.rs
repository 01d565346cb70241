//! Simulated responses and their reported latency.

use std::ops::RangeInclusive;
use std::time::Duration;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::scenario::Scenario;

/// Status code reported for a fault.
pub const FAILURE_STATUS: u16 = 400;

/// Status code reported for a successful exchange.
pub const SUCCESS_STATUS: u16 = 200;

/// Error summary attached to a fault.
pub const FAILURE_MESSAGE: &str = "Request failed";

/// Which request body a run submits.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Submission {
    /// The request as authored.
    Original,
    /// The corrected request revealed by resolving.
    Fixed,
}

/// The simulated response to a run or resolve.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunOutcome {
    /// Whether the exchange succeeded.
    pub success: bool,
    /// Response body: the fault on failure, the success body otherwise.
    pub xml: String,
    /// HTTP-style status code.
    pub status_code: u16,
    /// Short error summary, present only on failure.
    pub error: Option<String>,
    /// Reported round-trip latency.
    pub latency: Duration,
}

impl RunOutcome {
    /// Label for the response panel.
    #[must_use]
    pub const fn status_label(&self) -> &'static str {
        if self.success { "Success" } else { "Error" }
    }
}

/// Outcome of sending `submission` for `scenario`.
///
/// Only the original request of a scenario with a fault body fails.
#[must_use]
pub fn run_outcome(scenario: &Scenario, submission: Submission, latency: Duration) -> RunOutcome {
    match (submission, scenario.error_xml.as_deref()) {
        (Submission::Original, Some(fault)) => RunOutcome {
            success: false,
            xml: fault.to_owned(),
            status_code: FAILURE_STATUS,
            error: Some(FAILURE_MESSAGE.to_owned()),
            latency,
        },
        _ => resolve_outcome(scenario, latency),
    }
}

/// Outcome of sending the corrected request.
#[must_use]
pub fn resolve_outcome(scenario: &Scenario, latency: Duration) -> RunOutcome {
    RunOutcome {
        success: true,
        xml: scenario.response_xml.clone(),
        status_code: SUCCESS_STATUS,
        error: None,
        latency,
    }
}

/// Source of simulated delays and latencies.
pub trait LatencySource {
    /// A value drawn from `range`, in milliseconds.
    fn sample(&mut self, range: RangeInclusive<u64>) -> Duration;
}

/// Uniformly random [`LatencySource`].
#[derive(Debug)]
pub struct RandomLatency {
    rng: StdRng,
}

impl RandomLatency {
    /// Seeds from the operating system.
    #[must_use]
    pub fn new() -> Self {
        Self {
            rng: StdRng::from_entropy(),
        }
    }

    /// Deterministic source for reproducible sessions.
    #[must_use]
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl Default for RandomLatency {
    fn default() -> Self {
        Self::new()
    }
}

impl LatencySource for RandomLatency {
    fn sample(&mut self, range: RangeInclusive<u64>) -> Duration {
        let (low, high) = range.into_inner();
        if low >= high {
            return Duration::from_millis(low);
        }
        Duration::from_millis(self.rng.gen_range(low..=high))
    }
}

/// [`LatencySource`] that always yields the lower bound.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixedLatency;

impl LatencySource for FixedLatency {
    fn sample(&mut self, range: RangeInclusive<u64>) -> Duration {
        Duration::from_millis(*range.start())
    }
}
