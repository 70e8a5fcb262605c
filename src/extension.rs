//! Arbitrary-namespace extensibility.
//!
//! Extensible elements own an [`ExtensionContainer`]: captured child
//! elements from unrecognized namespaces and namespaced attributes outside
//! the core vocabulary, both preserved verbatim and in insertion order.
//! Capturing and re-emitting a container is lossless; extension content is
//! never validated and never rejected.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::constants::MD_NS;
use crate::dom::Element;
use crate::element::SamlElement;
use crate::error::BindResult;

/// An opaque XML fragment captured from a foreign namespace.
///
/// The wrapped element keeps its own namespace bindings, tag and content;
/// this crate never looks inside it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Chunk {
    element: Element,
}

impl Chunk {
    /// Wraps an element as an opaque fragment.
    #[must_use]
    pub fn new(element: Element) -> Self {
        Self { element }
    }

    /// Parses a serialized fragment.
    pub fn parse(xml: &str) -> BindResult<Self> {
        Ok(Self::new(Element::parse(xml)?))
    }

    /// The captured element.
    #[must_use]
    pub fn element(&self) -> &Element {
        &self.element
    }

    /// The local name of the captured element.
    #[must_use]
    pub fn local_name(&self) -> &str {
        self.element.local_name()
    }

    /// The namespace URI of the captured element, if any.
    #[must_use]
    pub fn namespace(&self) -> Option<&str> {
        self.element.namespace()
    }
}

/// A namespaced attribute outside the core vocabulary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NamespacedAttribute {
    /// The namespace URI of the attribute.
    pub namespace: String,
    /// The prefix the attribute was (or will be) written with.
    pub prefix: String,
    /// The local name of the attribute.
    pub local_name: String,
    /// The attribute value.
    pub value: String,
}

impl NamespacedAttribute {
    /// Creates a namespaced attribute.
    #[must_use]
    pub fn new(
        namespace: impl Into<String>,
        prefix: impl Into<String>,
        local_name: impl Into<String>,
        value: impl Into<String>,
    ) -> Self {
        Self {
            namespace: namespace.into(),
            prefix: prefix.into(),
            local_name: local_name.into(),
            value: value.into(),
        }
    }
}

/// Ordered container for captured foreign content.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtensionContainer {
    children: Vec<Chunk>,
    attributes: Vec<NamespacedAttribute>,
}

impl ExtensionContainer {
    /// Creates an empty container.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends an opaque child fragment. Its content is not validated.
    pub fn add_child(&mut self, chunk: Chunk) {
        self.children.push(chunk);
    }

    /// Appends a namespaced attribute. Duplicate (namespace, name) pairs are
    /// both retained in insertion order; nothing is silently overwritten.
    pub fn add_attribute(&mut self, attribute: NamespacedAttribute) {
        self.attributes.push(attribute);
    }

    /// True iff both the child and attribute sequences are empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.children.is_empty() && self.attributes.is_empty()
    }

    /// The captured child fragments, in insertion order.
    #[must_use]
    pub fn children(&self) -> &[Chunk] {
        &self.children
    }

    /// The captured attributes, in insertion order.
    #[must_use]
    pub fn attributes(&self) -> &[NamespacedAttribute] {
        &self.attributes
    }

    /// Appends all captured content to `element`, preserving the original
    /// namespace bindings.
    pub fn append_to(&self, element: &mut Element) {
        for attr in &self.attributes {
            element.set_attribute_ns(&attr.prefix, &attr.namespace, &attr.local_name, &attr.value);
        }
        for chunk in &self.children {
            element.append_child(chunk.element.clone());
        }
    }

    /// Captures everything on `element` outside the known vocabulary.
    ///
    /// A child element is captured when it is not in `owner_namespace` or
    /// its local name is not one of `known_local_names`; the caller is
    /// expected to have consumed known children already. Attributes are
    /// captured when they are namespace-qualified and outside
    /// `owner_namespace` (namespace declarations excluded).
    #[must_use]
    pub fn capture(element: &Element, owner_namespace: &str, known_local_names: &[&str]) -> Self {
        let mut container = Self::new();
        for child in element.child_elements() {
            let known = child.namespace() == Some(owner_namespace)
                && known_local_names.contains(&child.local_name());
            if !known {
                debug!(name = %child.qualified_name(), "captured foreign child element");
                container.children.push(Chunk::new(child.clone()));
            }
        }
        container.attributes = capture_attributes(element, owner_namespace);
        container
    }
}

/// Captures the namespaced attributes on `element` outside `owner_namespace`.
#[must_use]
pub fn capture_attributes(element: &Element, owner_namespace: &str) -> Vec<NamespacedAttribute> {
    element
        .attributes()
        .iter()
        .filter(|a| !a.is_namespace_declaration())
        .filter_map(|a| {
            let namespace = a.namespace.as_deref()?;
            if namespace == owner_namespace {
                return None;
            }
            Some(NamespacedAttribute::new(
                namespace,
                a.prefix.as_deref().unwrap_or_default(),
                a.local_name.clone(),
                a.value.clone(),
            ))
        })
        .collect()
}

/// The `md:Extensions` element: a bag of arbitrary non-core content carried
/// by every top-level metadata document.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Extensions {
    container: ExtensionContainer,
}

impl Extensions {
    /// Creates an Extensions element around captured content.
    #[must_use]
    pub fn new(container: ExtensionContainer) -> Self {
        Self { container }
    }

    /// The underlying container.
    #[must_use]
    pub fn container(&self) -> &ExtensionContainer {
        &self.container
    }

    /// Appends an opaque child fragment.
    pub fn add_child(&mut self, chunk: Chunk) {
        self.container.add_child(chunk);
    }
}

impl SamlElement for Extensions {
    const LOCAL_NAME: &'static str = "Extensions";
    const NAMESPACE: &'static str = MD_NS;
    const PREFIX: &'static str = "md";

    fn to_xml(&self) -> Element {
        let mut element = Self::instantiate();
        self.container.append_to(&mut element);
        element
    }

    fn from_xml(element: &Element) -> BindResult<Self> {
        Self::check_qname(element)?;
        // Everything inside Extensions is foreign by definition.
        Ok(Self::new(ExtensionContainer::capture(element, "", &[])))
    }

    fn is_empty_element(&self) -> bool {
        self.container.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_container() {
        let container = ExtensionContainer::new();
        assert!(container.is_empty());
    }

    #[test]
    fn duplicate_attributes_are_both_retained() {
        let mut container = ExtensionContainer::new();
        container.add_attribute(NamespacedAttribute::new("urn:ssp", "ssp", "attr1", "one"));
        container.add_attribute(NamespacedAttribute::new("urn:ssp", "ssp", "attr1", "two"));
        assert_eq!(container.attributes().len(), 2);
        assert_eq!(container.attributes()[0].value, "one");
        assert_eq!(container.attributes()[1].value, "two");
    }

    #[test]
    fn capture_splits_known_and_foreign() {
        let e = Element::parse(
            "<mdui:DiscoHints xmlns:mdui=\"urn:oasis:names:tc:SAML:metadata:ui\">\
             <mdui:IPHint>130.59.0.0/16</mdui:IPHint>\
             <ssp:child1 xmlns:ssp=\"urn:custom:ssp\">content of tag</ssp:child1>\
             </mdui:DiscoHints>",
        )
        .unwrap();
        let container =
            ExtensionContainer::capture(&e, "urn:oasis:names:tc:SAML:metadata:ui", &["IPHint"]);
        assert_eq!(container.children().len(), 1);
        assert_eq!(container.children()[0].local_name(), "child1");
        assert_eq!(
            container.children()[0].element().text_content(),
            "content of tag"
        );
    }

    #[test]
    fn capture_and_reemit_is_lossless() {
        let e = Element::parse(
            "<md:Extensions xmlns:md=\"urn:oasis:names:tc:SAML:2.0:metadata\">\
             <ssp:a xmlns:ssp=\"urn:ssp\">first</ssp:a>\
             <other:b xmlns:other=\"urn:other\" other:flag=\"1\"/>\
             </md:Extensions>",
        )
        .unwrap();
        let extensions = Extensions::from_xml(&e).unwrap();
        assert_eq!(extensions.container().children().len(), 2);
        assert_eq!(
            extensions.to_xml_string(),
            "<md:Extensions xmlns:md=\"urn:oasis:names:tc:SAML:2.0:metadata\">\
             <ssp:a xmlns:ssp=\"urn:ssp\">first</ssp:a>\
             <other:b xmlns:other=\"urn:other\" other:flag=\"1\"/>\
             </md:Extensions>"
        );
    }

    #[test]
    fn extensions_empty_predicate() {
        let extensions = Extensions::default();
        assert!(extensions.is_empty_element());
        assert_eq!(
            extensions.to_xml_string(),
            "<md:Extensions xmlns:md=\"urn:oasis:names:tc:SAML:2.0:metadata\"/>"
        );
    }

    #[test]
    fn namespaced_attributes_declare_their_prefix() {
        let mut container = ExtensionContainer::new();
        container.add_attribute(NamespacedAttribute::new("urn:ssp", "ssp", "attr1", "v1"));
        let mut element = Element::qualified("md", "Doc", "urn:md");
        container.append_to(&mut element);
        assert_eq!(
            element.to_string(),
            "<md:Doc xmlns:md=\"urn:md\" xmlns:ssp=\"urn:ssp\" ssp:attr1=\"v1\"/>"
        );
    }
}
