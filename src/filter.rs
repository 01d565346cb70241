//! Scenario filtering by free text, category and difficulty.
//!
//! Filtering is a pure function over a borrowed collection: it never reorders
//! and never copies records. A scenario is visible when the text, category and
//! difficulty predicates all hold.

use std::str::FromStr;

use crate::scenario::{Category, Difficulty, Scenario};

/// Sentinel accepted by both classification filters.
const ALL: &str = "All";

/// Category predicate: a specific category or the `All` sentinel.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum CategoryFilter {
    /// Matches every category.
    #[default]
    All,
    /// Matches one category exactly.
    Only(Category),
}

impl CategoryFilter {
    /// Whether `category` passes this filter.
    #[must_use]
    pub fn admits(self, category: Category) -> bool {
        match self {
            Self::All => true,
            Self::Only(wanted) => wanted == category,
        }
    }
}

impl FromStr for CategoryFilter {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        if value.eq_ignore_ascii_case(ALL) {
            return Ok(Self::All);
        }
        value.parse().map(Self::Only)
    }
}

/// Difficulty predicate: a specific level or the `All` sentinel.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum DifficultyFilter {
    /// Matches every difficulty.
    #[default]
    All,
    /// Matches one difficulty exactly.
    Only(Difficulty),
}

impl DifficultyFilter {
    /// Whether `difficulty` passes this filter.
    #[must_use]
    pub fn admits(self, difficulty: Difficulty) -> bool {
        match self {
            Self::All => true,
            Self::Only(wanted) => wanted == difficulty,
        }
    }
}

impl FromStr for DifficultyFilter {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        if value.eq_ignore_ascii_case(ALL) {
            return Ok(Self::All);
        }
        value.parse().map(Self::Only)
    }
}

/// The learner's current search settings.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScenarioQuery {
    /// Free text matched against name, description and tags.
    pub text: String,
    /// Category predicate.
    pub category: CategoryFilter,
    /// Difficulty predicate.
    pub difficulty: DifficultyFilter,
}

impl ScenarioQuery {
    /// Whether `scenario` satisfies all three predicates.
    #[must_use]
    pub fn matches(&self, scenario: &Scenario) -> bool {
        self.admits(scenario, &self.text.to_lowercase())
    }

    /// `needle` is the already lower-cased search text.
    fn admits(&self, scenario: &Scenario, needle: &str) -> bool {
        self.category.admits(scenario.category)
            && self.difficulty.admits(scenario.difficulty)
            && scenario.mentions(needle)
    }
}

/// Returns the scenarios visible under `query`, in their original order.
#[must_use]
pub fn filter<'a>(scenarios: &'a [Scenario], query: &ScenarioQuery) -> Vec<&'a Scenario> {
    let needle = query.text.to_lowercase();
    scenarios
        .iter()
        .filter(|scenario| query.admits(scenario, &needle))
        .collect()
}
