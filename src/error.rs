//! Binding error types.
//!
//! Provides the error taxonomy for marshalling and unmarshalling SAML
//! elements: missing attributes, lexical schema violations, cardinality
//! violations, and general invariant failures.

use thiserror::Error;

/// Result type for binding operations.
pub type BindResult<T> = Result<T, BindError>;

/// Errors raised while building or parsing SAML elements.
///
/// All variants are fatal to the construction that raised them: an element
/// is either fully valid or never returned at all.
#[derive(Debug, Error)]
pub enum BindError {
    /// A required attribute was absent during unmarshalling.
    #[error("Missing '{attribute}' attribute on {element}.")]
    MissingAttribute {
        /// Name of the absent attribute.
        attribute: String,
        /// Qualified name of the element it was expected on.
        element: String,
    },

    /// A present value failed lexical validation.
    #[error("invalid value for '{field}': {constraint}")]
    SchemaViolation {
        /// The attribute or field that carried the value.
        field: String,
        /// The constraint that was violated.
        constraint: String,
    },

    /// A required non-empty collection was empty.
    #[error("{0}")]
    Cardinality(String),

    /// An invariant between fields was violated.
    #[error("{0}")]
    AssertionFailure(String),

    /// The input could not be parsed as XML, or the parsed document does
    /// not have the expected shape.
    #[error("XML parsing error: {0}")]
    XmlParse(String),
}

impl BindError {
    /// Creates a [`BindError::MissingAttribute`] for the given attribute and
    /// qualified element name.
    #[must_use]
    pub fn missing_attribute(attribute: impl Into<String>, element: impl Into<String>) -> Self {
        Self::MissingAttribute {
            attribute: attribute.into(),
            element: element.into(),
        }
    }

    /// Creates a [`BindError::SchemaViolation`] for the given field and
    /// constraint description.
    #[must_use]
    pub fn schema_violation(field: impl Into<String>, constraint: impl Into<String>) -> Self {
        Self::SchemaViolation {
            field: field.into(),
            constraint: constraint.into(),
        }
    }
}

impl From<quick_xml::Error> for BindError {
    fn from(err: quick_xml::Error) -> Self {
        Self::XmlParse(err.to_string())
    }
}
