//! Scenario records and their classification.
//!
//! A [`Scenario`] is a pre-authored SOAP exchange: the request a learner sends,
//! the canned success body, and optionally a fault body and a corrected
//! request. Records are immutable once created; the store replaces whole
//! collections rather than editing records in place.
//!
//! The serialised form uses camelCase keys and the display names of
//! [`Category`] and [`Difficulty`], so documents exported by earlier versions
//! of the tool import unchanged.

mod catalogue;

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use clap::ValueEnum;
use serde::{Deserialize, Serialize};

pub use catalogue::bundled_scenarios;

/// The failure family a scenario belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, ValueEnum, Serialize, Deserialize)]
pub enum Category {
    /// Malformed envelopes, wrong namespaces, bad encodings.
    #[serde(rename = "XML Structure Errors")]
    XmlStructureErrors,
    /// Missing, expired or mismatched credentials.
    #[serde(rename = "Authentication Issues")]
    AuthenticationIssues,
    /// TLS certificate trust and expiry problems.
    #[serde(rename = "Certificate Problems")]
    CertificateProblems,
    /// Faults raised by the service itself.
    #[serde(rename = "Server-side Errors")]
    ServerSideErrors,
    /// Requests that never receive a response in time.
    #[serde(rename = "Timeout Issues")]
    TimeoutIssues,
    /// Domain validation failures in payment operations.
    #[serde(rename = "Payment-specific Errors")]
    PaymentSpecificErrors,
}

impl Category {
    /// Every category, in presentation order.
    pub const ALL: [Self; 6] = [
        Self::XmlStructureErrors,
        Self::AuthenticationIssues,
        Self::CertificateProblems,
        Self::ServerSideErrors,
        Self::TimeoutIssues,
        Self::PaymentSpecificErrors,
    ];

    /// Human-readable label, identical to the serialised form.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::XmlStructureErrors => "XML Structure Errors",
            Self::AuthenticationIssues => "Authentication Issues",
            Self::CertificateProblems => "Certificate Problems",
            Self::ServerSideErrors => "Server-side Errors",
            Self::TimeoutIssues => "Timeout Issues",
            Self::PaymentSpecificErrors => "Payment-specific Errors",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Category {
    type Err = String;

    /// Accepts either the display label or the kebab-case CLI value.
    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|category| {
                category.label() == value
                    || category
                        .to_possible_value()
                        .is_some_and(|possible| possible.matches(value, true))
            })
            .ok_or_else(|| format!("unknown scenario category '{value}'"))
    }
}

/// How much SOAP experience a scenario assumes.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, ValueEnum, Serialize, Deserialize,
)]
pub enum Difficulty {
    /// Single, obvious defect.
    Beginner,
    /// Requires reading the fault detail.
    Intermediate,
    /// Requires knowledge outside the envelope itself.
    Advanced,
}

impl Difficulty {
    /// Every difficulty, easiest first.
    pub const ALL: [Self; 3] = [Self::Beginner, Self::Intermediate, Self::Advanced];

    /// Human-readable label, identical to the serialised form.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Beginner => "Beginner",
            Self::Intermediate => "Intermediate",
            Self::Advanced => "Advanced",
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Difficulty {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|difficulty| difficulty.label().eq_ignore_ascii_case(value))
            .ok_or_else(|| format!("unknown scenario difficulty '{value}'"))
    }
}

/// A pre-authored SOAP request scenario.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Scenario {
    /// Stable identifier, unique within a single session.
    pub id: String,
    /// Short title shown in listings.
    pub name: String,
    /// One-line summary of the failure.
    pub description: String,
    /// Failure family.
    pub category: Category,
    /// Expected learner level.
    pub difficulty: Difficulty,
    /// The request as the learner first sees it.
    pub request_xml: String,
    /// Body returned once the request succeeds.
    pub response_xml: String,
    /// Fault body returned when the original request is sent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error_xml: Option<String>,
    /// Corrected request revealed by the resolve step.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fixed_request_xml: Option<String>,
    /// Why the request failed and what the fix changes.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub explanation: Option<String>,
    /// Free-form search tags.
    #[serde(default)]
    pub tags: Vec<String>,
    /// When the record was constructed.
    pub created_at: DateTime<Utc>,
    /// Equal to `created_at`; records are never edited after construction.
    pub updated_at: DateTime<Utc>,
}

impl Scenario {
    /// Whether sending the original request produces a fault.
    #[must_use]
    pub const fn fails_on_first_run(&self) -> bool {
        self.error_xml.is_some()
    }

    /// Whether a failed run can be followed by the resolve step.
    #[must_use]
    pub const fn is_resolvable(&self) -> bool {
        self.error_xml.is_some() && self.fixed_request_xml.is_some()
    }

    /// Case-insensitive match of `needle` against name, description and tags.
    ///
    /// `needle` must already be lower-cased.
    #[must_use]
    pub fn mentions(&self, needle: &str) -> bool {
        self.name.to_lowercase().contains(needle)
            || self.description.to_lowercase().contains(needle)
            || self
                .tags
                .iter()
                .any(|tag| tag.to_lowercase().contains(needle))
    }
}
