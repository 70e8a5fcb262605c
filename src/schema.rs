//! Schema validation boundary.
//!
//! The marshal/unmarshal path never validates against an XSD itself;
//! document-level schema validation is an external collaborator invoked by
//! test and verification tooling. Only the interface is defined here.

use serde::{Deserialize, Serialize};

/// External validator checking a serialized document against a schema.
pub trait SchemaValidator {
    /// Validates `document` against the schema identified by `schema_id`.
    fn validate(&self, document: &str, schema_id: &str) -> ValidationOutcome;
}

/// Result of a schema validation run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationOutcome {
    /// Whether the document conformed to the schema.
    pub valid: bool,
    /// Violation details, empty when valid.
    pub violations: Vec<String>,
}

impl ValidationOutcome {
    /// A passing outcome.
    #[must_use]
    pub fn valid() -> Self {
        Self {
            valid: true,
            violations: Vec::new(),
        }
    }

    /// A failing outcome carrying violation details.
    #[must_use]
    pub fn invalid(violations: Vec<String>) -> Self {
        Self {
            valid: false,
            violations,
        }
    }
}
