//! A training tool for diagnosing simulated SOAP request failures.
//!
//! `soapdrill` ships a catalogue of SOAP exchanges that go wrong in
//! instructive ways: malformed envelopes, missing credentials, expired
//! certificates, server faults, timeouts and payment validation errors. A
//! learner picks a scenario, sends its request, reads the fault, then
//! resolves it to see the corrected request and the successful response.
//!
//! # Architecture
//!
//! No network traffic is involved. Every response is canned and every delay
//! is simulated. The [`workbench`] module is a pure reducer over workflow
//! events; its async driver schedules the simulated delays on Tokio and
//! discards completions that no longer belong to the selected scenario.
//!
//! # Modules
//!
//! - [`scenario`]: Scenario records and the bundled catalogue
//! - [`store`]: Ordered scenario collection with write-through persistence
//! - [`filter`]: Text, category and difficulty filtering
//! - [`workbench`]: Run/resolve workflow and simulated outcomes
//! - [`transfer`]: JSON import and export
//! - [`authoring`]: Validation and construction of new scenarios
//! - [`session`]: Top-level state for one learner
//! - [`api`]: Command functions used by the CLI
//! - [`config`]: Configuration system with layered precedence (CLI > env > file > defaults)
//! - [`error`]: Semantic error types for the application
//! - [`logging`]: Tracing subscriber setup

pub mod api;
pub mod authoring;
pub mod config;
pub mod error;
pub mod filter;
pub mod logging;
pub mod scenario;
pub mod session;
pub mod store;
pub mod transfer;
pub mod workbench;
