//! Async shell that turns workflow effects into timers.

use std::time::Duration;

use tokio::task::JoinSet;

use super::outcome::{LatencySource, resolve_outcome, run_outcome};
use super::{Effect, Event, Workbench};
use crate::config::TimingConfig;

/// What happened to a completion taken off the timer queue.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Completion {
    /// The completion was current and updated the workbench.
    Applied,
    /// The completion was stale and left the workbench unchanged.
    Discarded,
}

/// Owns a [`Workbench`] and the timers its effects request.
///
/// Outcomes and their latencies are drawn when the timer is scheduled and
/// delivered when it fires. Timers are spawned on the ambient Tokio runtime
/// and aborted when the driver is dropped.
pub struct Driver<L: LatencySource> {
    workbench: Workbench,
    timing: TimingConfig,
    latency: L,
    timers: JoinSet<Event>,
}

impl<L: LatencySource> Driver<L> {
    /// Creates a driver with nothing selected.
    #[must_use]
    pub fn new(timing: TimingConfig, latency: L) -> Self {
        Self {
            workbench: Workbench::new(),
            timing,
            latency,
            timers: JoinSet::new(),
        }
    }

    /// The current workbench state.
    #[must_use]
    pub const fn workbench(&self) -> &Workbench {
        &self.workbench
    }

    /// Number of timers that have not yet been settled.
    #[must_use]
    pub fn pending(&self) -> usize {
        self.timers.len()
    }

    /// Applies `event` and schedules any resulting effect.
    ///
    /// Must be called from within a Tokio runtime.
    pub fn dispatch(&mut self, event: Event) {
        let transition = self.workbench.apply(event);
        self.workbench = transition.state;
        if let Some(effect) = transition.effect {
            self.schedule(effect);
        }
    }

    /// Waits for the next timer and applies its completion.
    ///
    /// Returns `None` when no timers are pending.
    pub async fn settle_next(&mut self) -> Option<Completion> {
        loop {
            match self.timers.join_next().await? {
                Ok(event) => {
                    let before = self.workbench.clone();
                    self.dispatch(event);
                    return Some(if self.workbench == before {
                        Completion::Discarded
                    } else {
                        Completion::Applied
                    });
                }
                Err(error) => {
                    tracing::warn!(%error, "workflow timer did not complete");
                }
            }
        }
    }

    /// Waits until every pending timer has fired.
    pub async fn settle(&mut self) {
        while self.settle_next().await.is_some() {}
    }

    fn schedule(&mut self, effect: Effect) {
        let (delay, event) = match effect {
            Effect::ScheduleRun { ticket, submission } => {
                let delay = self.latency.sample(self.timing.run_delay());
                let range = if ticket.scenario().fails_on_first_run()
                    && submission == super::Submission::Original
                {
                    self.timing.failure_latency()
                } else {
                    self.timing.success_latency()
                };
                let latency = self.latency.sample(range);
                let outcome = run_outcome(ticket.scenario(), submission, latency);
                (delay, Event::RunCompleted { ticket, outcome })
            }
            Effect::ScheduleResolve { ticket } => {
                let latency = self.latency.sample(self.timing.resolve_latency());
                let outcome = resolve_outcome(ticket.scenario(), latency);
                (
                    self.timing.resolve_delay(),
                    Event::ResolveCompleted { ticket, outcome },
                )
            }
        };
        spawn_timer(&mut self.timers, delay, event);
    }
}

fn spawn_timer(timers: &mut JoinSet<Event>, delay: Duration, event: Event) {
    timers.spawn(async move {
        tokio::time::sleep(delay).await;
        event
    });
}
