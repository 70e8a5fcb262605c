//! The element contract.
//!
//! Every concrete SAML element implements [`SamlElement`]: a fixed qualified
//! name, a marshal operation producing a DOM node, and an unmarshal factory
//! that validates and extracts the element's data. Construction is atomic —
//! a violated invariant fails the whole operation and no element escapes.

use crate::dom::Element;
use crate::error::{BindError, BindResult};

/// Contract implemented by every concrete SAML element type.
pub trait SamlElement: Sized {
    /// The fixed local name of this element.
    const LOCAL_NAME: &'static str;
    /// The fixed namespace URI of this element.
    const NAMESPACE: &'static str;
    /// The conventional namespace prefix used when marshalling.
    const PREFIX: &'static str;

    /// Builds the DOM node for this element.
    ///
    /// Attributes are set only when present — an absent optional attribute
    /// appends nothing, never an empty string. Children follow in
    /// schema-mandated order, with any extension content last.
    fn to_xml(&self) -> Element;

    /// Validates a DOM node and extracts a fully populated element.
    ///
    /// Fails with [`BindError::MissingAttribute`] for absent required
    /// attributes, [`BindError::SchemaViolation`] for lexically invalid
    /// values, and [`BindError::Cardinality`] for empty required
    /// collections.
    fn from_xml(element: &Element) -> BindResult<Self>;

    /// Returns true if nothing would be serialized inside this element:
    /// no attributes, no children, no extension content.
    fn is_empty_element(&self) -> bool {
        false
    }

    /// The qualified name of this element type, e.g. `md:Extensions`.
    #[must_use]
    fn qualified_name() -> String {
        format!("{}:{}", Self::PREFIX, Self::LOCAL_NAME)
    }

    /// Creates the bare DOM node for this element type, namespace declared.
    #[must_use]
    fn instantiate() -> Element {
        Element::qualified(Self::PREFIX, Self::LOCAL_NAME, Self::NAMESPACE)
    }

    /// Checks that a node carries exactly this type's local name and
    /// namespace.
    fn check_qname(element: &Element) -> BindResult<()> {
        if element.local_name() != Self::LOCAL_NAME {
            return Err(BindError::schema_violation(
                Self::qualified_name(),
                format!("unexpected element '{}'", element.qualified_name()),
            ));
        }
        if element.namespace() != Some(Self::NAMESPACE) {
            return Err(BindError::schema_violation(
                Self::qualified_name(),
                format!(
                    "unexpected namespace '{}'",
                    element.namespace().unwrap_or_default()
                ),
            ));
        }
        Ok(())
    }

    /// Marshals this element into its serialized form.
    #[must_use]
    fn to_xml_string(&self) -> String {
        self.to_xml().to_string()
    }

    /// Marshals this element and attaches it under `parent`.
    fn to_xml_in(&self, parent: &mut Element) {
        parent.append_child(self.to_xml());
    }

    /// Parses a serialized document as this element type.
    fn parse(xml: &str) -> BindResult<Self> {
        let element = Element::parse(xml)?;
        Self::from_xml(&element)
    }
}

/// Extracts a required attribute, failing with a [`BindError::MissingAttribute`]
/// naming the attribute and the qualified element name.
pub fn require_attribute(element: &Element, name: &str, qualified: &str) -> BindResult<String> {
    element
        .attribute(name)
        .map(str::to_string)
        .ok_or_else(|| BindError::missing_attribute(name, qualified))
}

/// Extracts an optional attribute. Absent and present-but-empty are distinct:
/// an empty string is returned as `Some("")` and left to the caller's
/// validators.
#[must_use]
pub fn optional_attribute(element: &Element, name: &str) -> Option<String> {
    element.attribute(name).map(str::to_string)
}
