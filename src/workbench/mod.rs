//! The run/resolve workflow for the selected scenario.
//!
//! [`Workbench`] is a pure reducer: [`Workbench::apply`] consumes an
//! [`Event`] and returns the next state plus an optional [`Effect`] asking the
//! caller to schedule a delayed completion. It never sleeps and never spawns.
//! [`Driver`] is the async shell that turns effects into timers.
//!
//! ```text
//! Idle ──run──▶ Running ──completed──▶ RanFailure ──resolve──▶ Resolved
//!                  ▲                   RanSuccess               │
//!                  └───────────────run──────────────────────────┘
//! ```
//!
//! Every run, resolve and selection bumps a generation counter. A completion
//! carries the [`Ticket`] it was scheduled with and is discarded unless the
//! ticket is still current, so a timer started for one scenario can never
//! write its result into another.

mod driver;
mod outcome;


use std::sync::Arc;

use crate::scenario::Scenario;

pub use driver::{Completion, Driver};
pub use outcome::{
    FAILURE_MESSAGE, FAILURE_STATUS, FixedLatency, LatencySource, RandomLatency, RunOutcome,
    SUCCESS_STATUS, Submission, resolve_outcome, run_outcome,
};

/// Where the selected scenario is in its workflow.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WorkflowState {
    /// Nothing sent yet.
    Idle,
    /// A request is in flight.
    Running,
    /// The last run produced a fault.
    RanFailure,
    /// The last run succeeded.
    RanSuccess,
    /// The corrected request has been loaded and sent.
    Resolved,
}

impl WorkflowState {
    /// Status line shown above the editor.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Idle => "Ready to run",
            Self::Running => "Running...",
            Self::RanFailure => "Error - ready to resolve",
            Self::RanSuccess => "Success",
            Self::Resolved => "Resolved",
        }
    }
}

/// Identifies a scheduled completion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ticket {
    scenario: Arc<Scenario>,
    generation: u64,
}

impl Ticket {
    /// The scenario the completion belongs to.
    #[must_use]
    pub fn scenario(&self) -> &Arc<Scenario> {
        &self.scenario
    }

    /// Generation at which the completion was scheduled.
    #[must_use]
    pub const fn generation(&self) -> u64 {
        self.generation
    }
}

/// Inputs to the workflow.
#[derive(Debug, Clone)]
pub enum Event {
    /// A scenario was chosen; the workflow restarts for it.
    Select(Arc<Scenario>),
    /// The learner pressed run.
    Run,
    /// A scheduled run finished.
    RunCompleted {
        /// Ticket issued with the run.
        ticket: Ticket,
        /// Simulated response.
        outcome: RunOutcome,
    },
    /// The learner asked for the fix.
    Resolve,
    /// The corrected request finished.
    ResolveCompleted {
        /// Ticket issued with the resolve.
        ticket: Ticket,
        /// Simulated response.
        outcome: RunOutcome,
    },
}

/// Work the caller must schedule after a transition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Deliver [`Event::RunCompleted`] after the run delay.
    ScheduleRun {
        /// Ticket to echo back.
        ticket: Ticket,
        /// Request body being sent.
        submission: Submission,
    },
    /// Deliver [`Event::ResolveCompleted`] after the resolve delay.
    ScheduleResolve {
        /// Ticket to echo back.
        ticket: Ticket,
    },
}

/// Result of [`Workbench::apply`].
#[derive(Debug, Clone)]
pub struct Transition {
    /// The next state.
    pub state: Workbench,
    /// Work to schedule, if any.
    pub effect: Option<Effect>,
}

/// State of the request editor and response panel.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Workbench {
    selected: Option<Arc<Scenario>>,
    state: Option<WorkflowState>,
    content: String,
    has_run: bool,
    is_resolved: bool,
    outcome: Option<RunOutcome>,
    generation: u64,
}

impl Workbench {
    /// A workbench with nothing selected.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The selected scenario.
    #[must_use]
    pub const fn selected(&self) -> Option<&Arc<Scenario>> {
        self.selected.as_ref()
    }

    /// Workflow state, or `None` when nothing is selected.
    #[must_use]
    pub const fn state(&self) -> Option<WorkflowState> {
        self.state
    }

    /// Request currently shown in the editor.
    #[must_use]
    pub fn content(&self) -> &str {
        &self.content
    }

    /// The editor is never editable by the learner.
    #[must_use]
    pub const fn is_read_only(&self) -> bool {
        true
    }

    /// Whether a run has completed since selection.
    #[must_use]
    pub const fn has_run(&self) -> bool {
        self.has_run
    }

    /// Whether the editor holds the corrected request.
    #[must_use]
    pub const fn is_resolved(&self) -> bool {
        self.is_resolved
    }

    /// Whether the resolve action is offered.
    #[must_use]
    pub fn resolve_offered(&self) -> bool {
        self.state == Some(WorkflowState::RanFailure)
            && self
                .selected
                .as_ref()
                .is_some_and(|scenario| scenario.fixed_request_xml.is_some())
    }

    /// Whether the run action is available.
    #[must_use]
    pub fn run_enabled(&self) -> bool {
        self.selected.is_some() && self.state != Some(WorkflowState::Running)
    }

    /// The latest response, absent while a request is in flight.
    #[must_use]
    pub const fn outcome(&self) -> Option<&RunOutcome> {
        self.outcome.as_ref()
    }

    /// Response panel label.
    #[must_use]
    pub fn response_label(&self) -> &'static str {
        self.outcome
            .as_ref()
            .map_or("No response", RunOutcome::status_label)
    }

    /// Narrative for the selected scenario, available in every state so the
    /// caller can reveal it on request.
    #[must_use]
    pub fn explanation(&self) -> Option<&str> {
        self.selected
            .as_ref()
            .and_then(|scenario| scenario.explanation.as_deref())
    }

    /// Computes the transition for `event`.
    #[must_use]
    pub fn apply(&self, event: Event) -> Transition {
        match event {
            Event::Select(scenario) => self.select(scenario),
            Event::Run => self.run(),
            Event::RunCompleted { ticket, outcome } => self.complete_run(&ticket, outcome),
            Event::Resolve => self.resolve(),
            Event::ResolveCompleted { ticket, outcome } => self.complete_resolve(&ticket, outcome),
        }
    }

    fn unchanged(&self) -> Transition {
        Transition {
            state: self.clone(),
            effect: None,
        }
    }

    fn ticket(&self, scenario: &Arc<Scenario>) -> Ticket {
        Ticket {
            scenario: Arc::clone(scenario),
            generation: self.generation,
        }
    }

    fn is_current(&self, ticket: &Ticket) -> bool {
        ticket.generation == self.generation
            && self
                .selected
                .as_ref()
                .is_some_and(|scenario| scenario.id == ticket.scenario.id)
    }

    fn select(&self, scenario: Arc<Scenario>) -> Transition {
        tracing::debug!(id = %scenario.id, "scenario selected");
        Transition {
            state: Self {
                content: scenario.request_xml.clone(),
                selected: Some(scenario),
                state: Some(WorkflowState::Idle),
                has_run: false,
                is_resolved: false,
                outcome: None,
                generation: self.generation.wrapping_add(1),
            },
            effect: None,
        }
    }

    fn run(&self) -> Transition {
        let Some(scenario) = self.selected.as_ref().filter(|_| self.run_enabled()) else {
            return self.unchanged();
        };
        let submission = if self.is_resolved {
            Submission::Fixed
        } else {
            Submission::Original
        };
        let mut next = self.clone();
        next.generation = self.generation.wrapping_add(1);
        next.state = Some(WorkflowState::Running);
        next.outcome = None;
        let ticket = next.ticket(scenario);
        tracing::debug!(id = %scenario.id, ?submission, "run scheduled");
        Transition {
            state: next,
            effect: Some(Effect::ScheduleRun { ticket, submission }),
        }
    }

    fn complete_run(&self, ticket: &Ticket, outcome: RunOutcome) -> Transition {
        if !self.is_current(ticket) || self.state != Some(WorkflowState::Running) {
            tracing::debug!(
                id = %ticket.scenario.id,
                generation = ticket.generation,
                "discarding stale run completion"
            );
            return self.unchanged();
        }
        let mut next = self.clone();
        next.state = Some(if outcome.success {
            WorkflowState::RanSuccess
        } else {
            WorkflowState::RanFailure
        });
        next.has_run = true;
        next.outcome = Some(outcome);
        Transition {
            state: next,
            effect: None,
        }
    }

    fn resolve(&self) -> Transition {
        if !self.resolve_offered() {
            return self.unchanged();
        }
        let Some((scenario, fixed)) = self.selected.as_ref().and_then(|scenario| {
            scenario
                .fixed_request_xml
                .as_ref()
                .map(|fixed| (scenario, fixed))
        }) else {
            return self.unchanged();
        };
        let mut next = self.clone();
        next.generation = self.generation.wrapping_add(1);
        next.state = Some(WorkflowState::Resolved);
        next.content.clone_from(fixed);
        next.has_run = true;
        next.is_resolved = true;
        next.outcome = None;
        let ticket = next.ticket(scenario);
        tracing::debug!(id = %scenario.id, "resolve scheduled");
        Transition {
            state: next,
            effect: Some(Effect::ScheduleResolve { ticket }),
        }
    }

    fn complete_resolve(&self, ticket: &Ticket, outcome: RunOutcome) -> Transition {
        if !self.is_current(ticket) || self.state != Some(WorkflowState::Resolved) {
            tracing::debug!(
                id = %ticket.scenario.id,
                generation = ticket.generation,
                "discarding stale resolve completion"
            );
            return self.unchanged();
        }
        let mut next = self.clone();
        next.outcome = Some(outcome);
        Transition {
            state: next,
            effect: None,
        }
    }
}
