//! Construction of new scenarios from author-supplied fields.
//!
//! Only the name and description are enforced: both must contain something
//! other than whitespace. Payload fields are accepted as given, and empty
//! optional payloads (fault body, fixed request, explanation) are stored as
//! absent so that an empty fault body never turns a scenario into a failing
//! one.

mod templates;

use chrono::{DateTime, Utc};

use crate::error::AuthoringError;
use crate::scenario::{Category, Difficulty, Scenario};

pub use templates::{FAULT_TEMPLATE, REQUEST_TEMPLATE, RESPONSE_TEMPLATE};

/// Ordered, duplicate-free list of tags being edited.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TagList {
    tags: Vec<String>,
}

impl TagList {
    /// Creates an empty tag list.
    #[must_use]
    pub const fn new() -> Self {
        Self { tags: Vec::new() }
    }

    /// Adds `tag` after trimming surrounding whitespace.
    ///
    /// Returns `false` without modifying the list when the trimmed tag is
    /// empty or already present.
    pub fn add(&mut self, tag: &str) -> bool {
        let trimmed = tag.trim();
        if trimmed.is_empty() || self.tags.iter().any(|existing| existing == trimmed) {
            return false;
        }
        self.tags.push(trimmed.to_owned());
        true
    }

    /// Removes `tag`, returning whether it was present.
    pub fn remove(&mut self, tag: &str) -> bool {
        let before = self.tags.len();
        self.tags.retain(|existing| existing != tag);
        self.tags.len() != before
    }

    /// The tags in insertion order.
    #[must_use]
    pub fn as_slice(&self) -> &[String] {
        &self.tags
    }

    /// Whether no tags have been added.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tags.is_empty()
    }

    /// Consumes the list, yielding the tags.
    #[must_use]
    pub fn into_vec(self) -> Vec<String> {
        self.tags
    }
}

impl<S: AsRef<str>> FromIterator<S> for TagList {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        let mut list = Self::new();
        for tag in iter {
            list.add(tag.as_ref());
        }
        list
    }
}

/// Fields collected for a new scenario.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScenarioDraft {
    /// Scenario title; required.
    pub name: String,
    /// One-line summary; required.
    pub description: String,
    /// Failure family.
    pub category: Category,
    /// Expected learner level.
    pub difficulty: Difficulty,
    /// Request shown to the learner.
    pub request_xml: String,
    /// Body returned on success.
    pub response_xml: String,
    /// Fault body; empty means the scenario succeeds on first run.
    pub error_xml: String,
    /// Corrected request; empty means no resolve step.
    pub fixed_request_xml: String,
    /// Optional narrative.
    pub explanation: String,
    /// Search tags.
    pub tags: TagList,
}

impl Default for ScenarioDraft {
    fn default() -> Self {
        Self {
            name: String::new(),
            description: String::new(),
            category: Category::XmlStructureErrors,
            difficulty: Difficulty::Beginner,
            request_xml: String::new(),
            response_xml: String::new(),
            error_xml: String::new(),
            fixed_request_xml: String::new(),
            explanation: String::new(),
            tags: TagList::new(),
        }
    }
}

impl ScenarioDraft {
    /// A draft pre-filled with request, response and fault skeletons.
    #[must_use]
    pub fn with_templates() -> Self {
        Self {
            request_xml: REQUEST_TEMPLATE.to_owned(),
            response_xml: RESPONSE_TEMPLATE.to_owned(),
            error_xml: FAULT_TEMPLATE.to_owned(),
            ..Self::default()
        }
    }

    /// Checks the mandatory fields.
    ///
    /// # Errors
    ///
    /// Returns [`AuthoringError::MissingField`] naming the first of `name`
    /// or `description` that is empty after trimming.
    pub fn validate(&self) -> Result<(), AuthoringError> {
        if self.name.trim().is_empty() {
            return Err(AuthoringError::MissingField { field: "name" });
        }
        if self.description.trim().is_empty() {
            return Err(AuthoringError::MissingField {
                field: "description",
            });
        }
        Ok(())
    }

    /// Builds the scenario record with the given identity and timestamp.
    ///
    /// # Errors
    ///
    /// Returns [`AuthoringError::MissingField`] when [`Self::validate`]
    /// fails.
    pub fn into_scenario(
        self,
        id: String,
        created_at: DateTime<Utc>,
    ) -> Result<Scenario, AuthoringError> {
        self.validate()?;
        Ok(Scenario {
            id,
            name: self.name,
            description: self.description,
            category: self.category,
            difficulty: self.difficulty,
            request_xml: self.request_xml,
            response_xml: self.response_xml,
            error_xml: present(self.error_xml),
            fixed_request_xml: present(self.fixed_request_xml),
            explanation: present(self.explanation),
            tags: self.tags.into_vec(),
            created_at,
            updated_at: created_at,
        })
    }
}

fn present(value: String) -> Option<String> {
    if value.trim().is_empty() {
        None
    } else {
        Some(value)
    }
}
