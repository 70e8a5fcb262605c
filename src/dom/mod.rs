//! Lightweight owned DOM for SAML documents.
//!
//! The binding layer needs a node model that keeps everything the wire
//! carried: attribute insertion order, namespace prefixes exactly as
//! written, and foreign content verbatim. [`Element`] is that model — a
//! plain owned tree with no interior mutability and no parent pointers.
//!
//! Parsing is event-based via quick-xml ([`Element::parse`]); serialization
//! is the deterministic contract implemented in [`write`]: attributes in
//! insertion order, `"`-quoted, childless elements rendered self-closing.

mod parse;
mod write;

use serde::{Deserialize, Serialize};

use crate::error::BindResult;

/// A single XML attribute, prefix and namespace preserved as parsed.
///
/// Namespace declarations (`xmlns`, `xmlns:p`) are kept in the attribute
/// list like any other attribute so that serialization reproduces them in
/// their original position.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Attribute {
    /// The namespace prefix, if the attribute was written with one.
    pub prefix: Option<String>,
    /// The local name of the attribute.
    pub local_name: String,
    /// The resolved namespace URI, if the attribute is namespace-qualified.
    pub namespace: Option<String>,
    /// The attribute value, unescaped.
    pub value: String,
}

impl Attribute {
    /// Returns the attribute name as written, including any prefix.
    #[must_use]
    pub fn qualified_name(&self) -> String {
        match &self.prefix {
            Some(prefix) => format!("{prefix}:{}", self.local_name),
            None => self.local_name.clone(),
        }
    }

    /// Returns true if this attribute is a namespace declaration.
    #[must_use]
    pub fn is_namespace_declaration(&self) -> bool {
        match &self.prefix {
            Some(prefix) => prefix == "xmlns",
            None => self.local_name == "xmlns",
        }
    }
}

/// A node in the owned tree.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum XmlNode {
    /// A child element.
    Element(Element),
    /// Character data, unescaped.
    Text(String),
    /// A CDATA section.
    CData(String),
    /// A comment.
    Comment(String),
    /// A processing instruction, content verbatim.
    ProcessingInstruction(String),
}

/// An XML element: qualified name, ordered attributes, ordered children.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Element {
    prefix: Option<String>,
    local_name: String,
    namespace: Option<String>,
    attributes: Vec<Attribute>,
    children: Vec<XmlNode>,
}

impl Element {
    /// Creates an element with no namespace.
    #[must_use]
    pub fn new(local_name: impl Into<String>) -> Self {
        Self {
            prefix: None,
            local_name: local_name.into(),
            namespace: None,
            attributes: Vec::new(),
            children: Vec::new(),
        }
    }

    /// Creates a namespace-qualified element and declares its namespace.
    ///
    /// The `xmlns:{prefix}` declaration is added as the first attribute;
    /// [`Element::append_child`] drops it again when the element is placed
    /// under a parent that already declares the same binding.
    #[must_use]
    pub fn qualified(prefix: &str, local_name: &str, namespace: &str) -> Self {
        let mut element = Self {
            prefix: Some(prefix.to_string()),
            local_name: local_name.to_string(),
            namespace: Some(namespace.to_string()),
            attributes: Vec::new(),
            children: Vec::new(),
        };
        element.attributes.push(Attribute {
            prefix: Some("xmlns".to_string()),
            local_name: prefix.to_string(),
            namespace: None,
            value: namespace.to_string(),
        });
        element
    }

    /// Assembles an element from already-resolved parts. Used by the parser,
    /// which records namespace declarations itself.
    pub(crate) fn from_parts(
        prefix: Option<String>,
        local_name: String,
        namespace: Option<String>,
        attributes: Vec<Attribute>,
    ) -> Self {
        Self {
            prefix,
            local_name,
            namespace,
            attributes,
            children: Vec::new(),
        }
    }

    /// Parses a complete XML document and returns its root element.
    pub fn parse(input: &str) -> BindResult<Self> {
        parse::parse_document(input)
    }

    /// The namespace prefix of this element, if any.
    #[must_use]
    pub fn prefix(&self) -> Option<&str> {
        self.prefix.as_deref()
    }

    /// The local name of this element.
    #[must_use]
    pub fn local_name(&self) -> &str {
        &self.local_name
    }

    /// The resolved namespace URI of this element, if any.
    #[must_use]
    pub fn namespace(&self) -> Option<&str> {
        self.namespace.as_deref()
    }

    /// The element name as written, including any prefix.
    #[must_use]
    pub fn qualified_name(&self) -> String {
        match &self.prefix {
            Some(prefix) => format!("{prefix}:{}", self.local_name),
            None => self.local_name.clone(),
        }
    }

    /// All attributes in insertion order, namespace declarations included.
    #[must_use]
    pub fn attributes(&self) -> &[Attribute] {
        &self.attributes
    }

    /// All child nodes in document order.
    #[must_use]
    pub fn children(&self) -> &[XmlNode] {
        &self.children
    }

    /// Returns true if this element has no child nodes at all.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.children.is_empty()
    }

    /// Sets an unqualified attribute. Appends; existing values with the same
    /// name are not overwritten.
    pub fn set_attribute(&mut self, local_name: impl Into<String>, value: impl Into<String>) {
        self.attributes.push(Attribute {
            prefix: None,
            local_name: local_name.into(),
            namespace: None,
            value: value.into(),
        });
    }

    /// Sets a namespace-qualified attribute, declaring the prefix binding
    /// first if this element does not already carry it.
    pub fn set_attribute_ns(
        &mut self,
        prefix: &str,
        namespace: &str,
        local_name: impl Into<String>,
        value: impl Into<String>,
    ) {
        if !self.declares(Some(prefix), namespace) {
            self.attributes.push(Attribute {
                prefix: Some("xmlns".to_string()),
                local_name: prefix.to_string(),
                namespace: None,
                value: namespace.to_string(),
            });
        }
        self.attributes.push(Attribute {
            prefix: Some(prefix.to_string()),
            local_name: local_name.into(),
            namespace: Some(namespace.to_string()),
            value: value.into(),
        });
    }

    /// Declares a prefix binding on this element, if not already present.
    pub fn declare_namespace(&mut self, prefix: &str, namespace: &str) {
        if !self.declares(Some(prefix), namespace) {
            self.attributes.push(Attribute {
                prefix: Some("xmlns".to_string()),
                local_name: prefix.to_string(),
                namespace: None,
                value: namespace.to_string(),
            });
        }
    }

    /// Reads an unqualified attribute.
    #[must_use]
    pub fn attribute(&self, local_name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|a| a.prefix.is_none() && a.namespace.is_none() && a.local_name == local_name)
            .map(|a| a.value.as_str())
    }

    /// Reads a namespace-qualified attribute.
    #[must_use]
    pub fn attribute_ns(&self, namespace: &str, local_name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|a| a.namespace.as_deref() == Some(namespace) && a.local_name == local_name)
            .map(|a| a.value.as_str())
    }

    /// Returns true if this element declares the given prefix-to-URI binding.
    #[must_use]
    pub fn declares(&self, prefix: Option<&str>, namespace: &str) -> bool {
        self.attributes.iter().any(|a| {
            a.is_namespace_declaration()
                && a.value == namespace
                && match prefix {
                    Some(p) => a.prefix.is_some() && a.local_name == p,
                    None => a.prefix.is_none(),
                }
        })
    }

    /// Appends a child element.
    ///
    /// Namespace declarations on the child that this element already makes
    /// identically are dropped, matching what a DOM `appendChild` under an
    /// already-bound parent serializes to.
    pub fn append_child(&mut self, mut child: Element) {
        child.attributes.retain(|a| {
            !(a.is_namespace_declaration()
                && self.declares(
                    a.prefix.as_ref().map(|_| a.local_name.as_str()),
                    &a.value,
                ))
        });
        self.children.push(XmlNode::Element(child));
    }

    /// Appends an arbitrary child node.
    pub fn append_node(&mut self, node: XmlNode) {
        self.children.push(node);
    }

    /// Appends character data.
    pub fn append_text(&mut self, text: impl Into<String>) {
        self.children.push(XmlNode::Text(text.into()));
    }

    /// Iterates over the child elements, skipping text and other nodes.
    pub fn child_elements(&self) -> impl Iterator<Item = &Element> {
        self.children.iter().filter_map(|node| match node {
            XmlNode::Element(e) => Some(e),
            _ => None,
        })
    }

    /// Iterates over child elements matching a namespace and local name.
    pub fn elements_ns<'a>(
        &'a self,
        namespace: &'a str,
        local_name: &'a str,
    ) -> impl Iterator<Item = &'a Element> {
        self.child_elements()
            .filter(move |e| e.namespace() == Some(namespace) && e.local_name() == local_name)
    }

    /// Concatenated character data of this element and its descendants.
    #[must_use]
    pub fn text_content(&self) -> String {
        let mut out = String::new();
        self.collect_text(&mut out);
        out
    }

    fn collect_text(&self, out: &mut String) {
        for node in &self.children {
            match node {
                XmlNode::Text(t) | XmlNode::CData(t) => out.push_str(t),
                XmlNode::Element(e) => e.collect_text(out),
                _ => {}
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn qualified_element_declares_namespace() {
        let e = Element::qualified("md", "Extensions", "urn:oasis:names:tc:SAML:2.0:metadata");
        assert_eq!(e.qualified_name(), "md:Extensions");
        assert!(e.declares(Some("md"), "urn:oasis:names:tc:SAML:2.0:metadata"));
        assert_eq!(
            e.to_string(),
            "<md:Extensions xmlns:md=\"urn:oasis:names:tc:SAML:2.0:metadata\"/>"
        );
    }

    #[test]
    fn append_child_drops_redundant_declaration() {
        let mut parent = Element::qualified("md", "AffiliationDescriptor", "urn:ns");
        let child = Element::qualified("md", "AffiliateMember", "urn:ns");
        parent.append_child(child);
        assert_eq!(
            parent.to_string(),
            "<md:AffiliationDescriptor xmlns:md=\"urn:ns\"><md:AffiliateMember/></md:AffiliationDescriptor>"
        );
    }

    #[test]
    fn append_child_keeps_foreign_declaration() {
        let mut parent = Element::qualified("md", "Extensions", "urn:md");
        let child = Element::qualified("ssp", "Chunk", "urn:ssp");
        parent.append_child(child);
        assert_eq!(
            parent.to_string(),
            "<md:Extensions xmlns:md=\"urn:md\"><ssp:Chunk xmlns:ssp=\"urn:ssp\"/></md:Extensions>"
        );
    }

    #[test]
    fn duplicate_attributes_are_retained() {
        let mut e = Element::new("a");
        e.set_attribute_ns("x", "urn:x", "attr", "one");
        e.set_attribute_ns("x", "urn:x", "attr", "two");
        // one xmlns declaration, two attribute values
        assert_eq!(e.attributes().len(), 3);
        assert_eq!(
            e.to_string(),
            "<a xmlns:x=\"urn:x\" x:attr=\"one\" x:attr=\"two\"/>"
        );
    }

    #[test]
    fn text_content_is_recursive() {
        let mut inner = Element::new("inner");
        inner.append_text("world");
        let mut outer = Element::new("outer");
        outer.append_text("hello ");
        outer.append_child(inner);
        assert_eq!(outer.text_content(), "hello world");
    }
}
