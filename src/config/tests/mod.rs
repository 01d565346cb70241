//! Unit tests for soapdrill configuration types.
//!
//! This module contains tests organised into:
//! - [`helpers`] - Shared fixtures and helper functions
//! - [`types_tests`] - Defaults and TOML parsing tests
//! - [`validation`] - Timing range and export name validation tests
//! - [`layer_precedence_tests`] - `MergeComposer` layer precedence tests

mod helpers;
