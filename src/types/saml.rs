//! Assertion (`saml:`) vocabulary elements.

use serde::{Deserialize, Serialize};

use std::fmt;
use std::str::FromStr;

use crate::constants::{nameid_formats, SAML_NS, XSI_NS, XS_NS};
use crate::dom::Element;
use crate::element::{optional_attribute, require_attribute, SamlElement};
use crate::error::{BindError, BindResult};
use crate::extension::ExtensionContainer;

/// The issuer of an assertion or protocol message.
///
/// Follows the NameIDType layout, with one extra constraint: when the
/// format is absent or the entity format, none of the qualifier attributes
/// may be present.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Issuer {
    value: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    name_qualifier: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    sp_name_qualifier: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    format: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    sp_provided_id: Option<String>,
}

impl Issuer {
    /// Creates an issuer, enforcing the entity-format attribute rule.
    pub fn new(
        value: impl Into<String>,
        name_qualifier: Option<String>,
        sp_name_qualifier: Option<String>,
        format: Option<String>,
        sp_provided_id: Option<String>,
    ) -> BindResult<Self> {
        let entity_format = match format.as_deref() {
            None => true,
            Some(f) => f == nameid_formats::ENTITY,
        };
        if entity_format
            && (name_qualifier.is_some() || sp_name_qualifier.is_some() || sp_provided_id.is_some())
        {
            return Err(BindError::AssertionFailure(
                "Illegal combination of attributes being used".to_string(),
            ));
        }
        Ok(Self {
            value: value.into(),
            name_qualifier,
            sp_name_qualifier,
            format,
            sp_provided_id,
        })
    }

    /// Creates an entity-format issuer carrying only an entity ID.
    pub fn entity(entity_id: impl Into<String>) -> BindResult<Self> {
        Self::new(entity_id, None, None, None, None)
    }

    /// The issuer value, usually an entity ID.
    #[must_use]
    pub fn value(&self) -> &str {
        &self.value
    }

    /// The security or administrative domain qualifier, if any.
    #[must_use]
    pub fn name_qualifier(&self) -> Option<&str> {
        self.name_qualifier.as_deref()
    }

    /// The service-provider name qualifier, if any.
    #[must_use]
    pub fn sp_name_qualifier(&self) -> Option<&str> {
        self.sp_name_qualifier.as_deref()
    }

    /// The name ID format URI, if any. Absence means the entity format.
    #[must_use]
    pub fn format(&self) -> Option<&str> {
        self.format.as_deref()
    }

    /// The SP-provided alternate identifier, if any.
    #[must_use]
    pub fn sp_provided_id(&self) -> Option<&str> {
        self.sp_provided_id.as_deref()
    }
}

impl SamlElement for Issuer {
    const LOCAL_NAME: &'static str = "Issuer";
    const NAMESPACE: &'static str = SAML_NS;
    const PREFIX: &'static str = "saml";

    fn to_xml(&self) -> Element {
        let mut element = Self::instantiate();
        if let Some(name_qualifier) = &self.name_qualifier {
            element.set_attribute("NameQualifier", name_qualifier);
        }
        if let Some(sp_name_qualifier) = &self.sp_name_qualifier {
            element.set_attribute("SPNameQualifier", sp_name_qualifier);
        }
        if let Some(format) = &self.format {
            element.set_attribute("Format", format);
        }
        if let Some(sp_provided_id) = &self.sp_provided_id {
            element.set_attribute("SPProvidedID", sp_provided_id);
        }
        element.append_text(self.value.clone());
        element
    }

    fn from_xml(element: &Element) -> BindResult<Self> {
        Self::check_qname(element)?;
        Self::new(
            element.text_content(),
            optional_attribute(element, "NameQualifier"),
            optional_attribute(element, "SPNameQualifier"),
            optional_attribute(element, "Format"),
            optional_attribute(element, "SPProvidedID"),
        )
    }
}

/// The DNS and network location an authentication happened from.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubjectLocality {
    #[serde(skip_serializing_if = "Option::is_none")]
    address: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    dns_name: Option<String>,
}

impl SubjectLocality {
    /// Creates a subject locality.
    #[must_use]
    pub fn new(address: Option<String>, dns_name: Option<String>) -> Self {
        Self { address, dns_name }
    }

    /// The network address, if any.
    #[must_use]
    pub fn address(&self) -> Option<&str> {
        self.address.as_deref()
    }

    /// The DNS name, if any.
    #[must_use]
    pub fn dns_name(&self) -> Option<&str> {
        self.dns_name.as_deref()
    }
}

impl SamlElement for SubjectLocality {
    const LOCAL_NAME: &'static str = "SubjectLocality";
    const NAMESPACE: &'static str = SAML_NS;
    const PREFIX: &'static str = "saml";

    fn to_xml(&self) -> Element {
        let mut element = Self::instantiate();
        if let Some(address) = &self.address {
            element.set_attribute("Address", address);
        }
        if let Some(dns_name) = &self.dns_name {
            element.set_attribute("DNSName", dns_name);
        }
        element
    }

    fn from_xml(element: &Element) -> BindResult<Self> {
        Self::check_qname(element)?;
        Ok(Self::new(
            optional_attribute(element, "Address"),
            optional_attribute(element, "DNSName"),
        ))
    }

    fn is_empty_element(&self) -> bool {
        self.address.is_none() && self.dns_name.is_none()
    }
}

/// A single value of a SAML attribute, optionally typed via `xsi:type`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttributeValue {
    value: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    xsi_type: Option<String>,
}

impl AttributeValue {
    /// Creates an untyped string value.
    #[must_use]
    pub fn string(value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            xsi_type: None,
        }
    }

    /// Creates an `xs:integer`-typed value.
    #[must_use]
    pub fn integer(value: i64) -> Self {
        Self {
            value: value.to_string(),
            xsi_type: Some("xs:integer".to_string()),
        }
    }

    /// Creates a value with an explicit `xsi:type`.
    #[must_use]
    pub fn typed(value: impl Into<String>, xsi_type: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            xsi_type: Some(xsi_type.into()),
        }
    }

    /// The textual value.
    #[must_use]
    pub fn value(&self) -> &str {
        &self.value
    }

    /// The declared `xsi:type`, if any.
    #[must_use]
    pub fn xsi_type(&self) -> Option<&str> {
        self.xsi_type.as_deref()
    }
}

impl SamlElement for AttributeValue {
    const LOCAL_NAME: &'static str = "AttributeValue";
    const NAMESPACE: &'static str = SAML_NS;
    const PREFIX: &'static str = "saml";

    fn to_xml(&self) -> Element {
        let mut element = Self::instantiate();
        if let Some(xsi_type) = &self.xsi_type {
            // The type value references the xs prefix, which must resolve.
            if xsi_type.starts_with("xs:") {
                element.declare_namespace("xs", XS_NS);
            }
            element.set_attribute_ns("xsi", XSI_NS, "type", xsi_type);
        }
        element.append_text(self.value.clone());
        element
    }

    fn from_xml(element: &Element) -> BindResult<Self> {
        Self::check_qname(element)?;
        Ok(Self {
            value: element.text_content(),
            xsi_type: element.attribute_ns(XSI_NS, "type").map(str::to_string),
        })
    }
}

/// A named SAML attribute and its values.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Attribute {
    name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    name_format: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    friendly_name: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    values: Vec<AttributeValue>,
}

impl Attribute {
    /// Creates an attribute.
    pub fn new(
        name: impl Into<String>,
        name_format: Option<String>,
        friendly_name: Option<String>,
        values: Vec<AttributeValue>,
    ) -> BindResult<Self> {
        let name = name.into();
        if name.is_empty() {
            return Err(BindError::schema_violation("Name", "must not be empty"));
        }
        Ok(Self {
            name,
            name_format,
            friendly_name,
            values,
        })
    }

    /// The attribute name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The name format URI, if any.
    #[must_use]
    pub fn name_format(&self) -> Option<&str> {
        self.name_format.as_deref()
    }

    /// The human-readable name, if any.
    #[must_use]
    pub fn friendly_name(&self) -> Option<&str> {
        self.friendly_name.as_deref()
    }

    /// The attribute values, in document order.
    #[must_use]
    pub fn values(&self) -> &[AttributeValue] {
        &self.values
    }
}

impl SamlElement for Attribute {
    const LOCAL_NAME: &'static str = "Attribute";
    const NAMESPACE: &'static str = SAML_NS;
    const PREFIX: &'static str = "saml";

    fn to_xml(&self) -> Element {
        let mut element = Self::instantiate();
        element.set_attribute("Name", &self.name);
        if let Some(name_format) = &self.name_format {
            element.set_attribute("NameFormat", name_format);
        }
        if let Some(friendly_name) = &self.friendly_name {
            element.set_attribute("FriendlyName", friendly_name);
        }
        for value in &self.values {
            value.to_xml_in(&mut element);
        }
        element
    }

    fn from_xml(element: &Element) -> BindResult<Self> {
        Self::check_qname(element)?;
        let name = require_attribute(element, "Name", &Self::qualified_name())?;
        let values = element
            .elements_ns(SAML_NS, AttributeValue::LOCAL_NAME)
            .map(AttributeValue::from_xml)
            .collect::<BindResult<Vec<_>>>()?;
        Self::new(
            name,
            optional_attribute(element, "NameFormat"),
            optional_attribute(element, "FriendlyName"),
            values,
        )
    }
}

/// The outcome of an authorization decision.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Decision {
    /// The requested access is permitted.
    Permit,
    /// The requested access is denied.
    Deny,
    /// No decision could be made.
    Indeterminate,
}

impl Decision {
    /// The attribute value for this decision.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Permit => "Permit",
            Self::Deny => "Deny",
            Self::Indeterminate => "Indeterminate",
        }
    }
}

impl fmt::Display for Decision {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Decision {
    type Err = BindError;

    fn from_str(s: &str) -> BindResult<Self> {
        match s {
            "Permit" => Ok(Self::Permit),
            "Deny" => Ok(Self::Deny),
            "Indeterminate" => Ok(Self::Indeterminate),
            _ => Err(BindError::schema_violation(
                "Decision",
                "must be one of Permit, Deny or Indeterminate",
            )),
        }
    }
}

/// An action the subject sought to perform on a resource.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Action {
    namespace: String,
    value: String,
}

impl Action {
    /// Creates an action within an action namespace.
    pub fn new(namespace: impl Into<String>, value: impl Into<String>) -> BindResult<Self> {
        let namespace = namespace.into();
        if namespace.is_empty() {
            return Err(BindError::schema_violation(
                "Namespace",
                "must be a non-empty URI",
            ));
        }
        Ok(Self {
            namespace,
            value: value.into(),
        })
    }

    /// The action namespace URI.
    #[must_use]
    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    /// The action name.
    #[must_use]
    pub fn value(&self) -> &str {
        &self.value
    }
}

impl SamlElement for Action {
    const LOCAL_NAME: &'static str = "Action";
    const NAMESPACE: &'static str = SAML_NS;
    const PREFIX: &'static str = "saml";

    fn to_xml(&self) -> Element {
        let mut element = Self::instantiate();
        element.set_attribute("Namespace", &self.namespace);
        element.append_text(self.value.clone());
        element
    }

    fn from_xml(element: &Element) -> BindResult<Self> {
        Self::check_qname(element)?;
        let namespace = require_attribute(element, "Namespace", &Self::qualified_name())?;
        Self::new(namespace, element.text_content())
    }
}

/// Supporting material an authorization decision was based on.
///
/// The contained assertions and references are carried as opaque fragments;
/// this crate never interprets them.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Evidence {
    container: ExtensionContainer,
}

impl Evidence {
    /// Creates an evidence element around captured content.
    #[must_use]
    pub fn new(container: ExtensionContainer) -> Self {
        Self { container }
    }

    /// The carried fragments.
    #[must_use]
    pub fn container(&self) -> &ExtensionContainer {
        &self.container
    }
}

impl SamlElement for Evidence {
    const LOCAL_NAME: &'static str = "Evidence";
    const NAMESPACE: &'static str = SAML_NS;
    const PREFIX: &'static str = "saml";

    fn to_xml(&self) -> Element {
        let mut element = Self::instantiate();
        self.container.append_to(&mut element);
        element
    }

    fn from_xml(element: &Element) -> BindResult<Self> {
        Self::check_qname(element)?;
        // Every child is opaque to this element.
        Ok(Self::new(ExtensionContainer::capture(element, "", &[])))
    }

    fn is_empty_element(&self) -> bool {
        self.container.is_empty()
    }
}

/// A statement that access to a resource was decided.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthzDecisionStatement {
    resource: String,
    decision: Decision,
    actions: Vec<Action>,
    #[serde(skip_serializing_if = "Option::is_none")]
    evidence: Option<Evidence>,
}

impl AuthzDecisionStatement {
    /// Creates an authorization decision statement; at least one action is
    /// required.
    pub fn new(
        resource: impl Into<String>,
        decision: Decision,
        actions: Vec<Action>,
        evidence: Option<Evidence>,
    ) -> BindResult<Self> {
        let resource = resource.into();
        if resource.is_empty() {
            return Err(BindError::schema_violation(
                "Resource",
                "must be a non-empty URI",
            ));
        }
        if actions.is_empty() {
            return Err(BindError::Cardinality(
                "AuthzDecisionStatement must contain at least one Action.".to_string(),
            ));
        }
        Ok(Self {
            resource,
            decision,
            actions,
            evidence,
        })
    }

    /// The resource the decision applies to.
    #[must_use]
    pub fn resource(&self) -> &str {
        &self.resource
    }

    /// The decision that was made.
    #[must_use]
    pub fn decision(&self) -> Decision {
        self.decision
    }

    /// The actions the decision covers, at least one.
    #[must_use]
    pub fn actions(&self) -> &[Action] {
        &self.actions
    }

    /// The supporting evidence, if any.
    #[must_use]
    pub fn evidence(&self) -> Option<&Evidence> {
        self.evidence.as_ref()
    }
}

impl SamlElement for AuthzDecisionStatement {
    const LOCAL_NAME: &'static str = "AuthzDecisionStatement";
    const NAMESPACE: &'static str = SAML_NS;
    const PREFIX: &'static str = "saml";

    fn to_xml(&self) -> Element {
        let mut element = Self::instantiate();
        element.set_attribute("Resource", &self.resource);
        element.set_attribute("Decision", self.decision.as_str());
        for action in &self.actions {
            action.to_xml_in(&mut element);
        }
        if let Some(evidence) = &self.evidence {
            if !evidence.is_empty_element() {
                evidence.to_xml_in(&mut element);
            }
        }
        element
    }

    fn from_xml(element: &Element) -> BindResult<Self> {
        Self::check_qname(element)?;
        let resource = require_attribute(element, "Resource", &Self::qualified_name())?;
        let decision = require_attribute(element, "Decision", &Self::qualified_name())?
            .parse::<Decision>()?;
        let actions = element
            .elements_ns(SAML_NS, Action::LOCAL_NAME)
            .map(Action::from_xml)
            .collect::<BindResult<Vec<_>>>()?;
        let evidence = match element.elements_ns(SAML_NS, Evidence::LOCAL_NAME).next() {
            Some(child) => Some(Evidence::from_xml(child)?),
            None => None,
        };
        Self::new(resource, decision, actions, evidence)
    }
}

/// A statement carrying one or more attributes about a subject.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttributeStatement {
    attributes: Vec<Attribute>,
}

impl AttributeStatement {
    /// Creates an attribute statement; at least one attribute is required.
    pub fn new(attributes: Vec<Attribute>) -> BindResult<Self> {
        if attributes.is_empty() {
            return Err(BindError::Cardinality(
                "AttributeStatement must contain at least one Attribute.".to_string(),
            ));
        }
        Ok(Self { attributes })
    }

    /// The carried attributes.
    #[must_use]
    pub fn attributes(&self) -> &[Attribute] {
        &self.attributes
    }
}

impl SamlElement for AttributeStatement {
    const LOCAL_NAME: &'static str = "AttributeStatement";
    const NAMESPACE: &'static str = SAML_NS;
    const PREFIX: &'static str = "saml";

    fn to_xml(&self) -> Element {
        let mut element = Self::instantiate();
        for attribute in &self.attributes {
            attribute.to_xml_in(&mut element);
        }
        element
    }

    fn from_xml(element: &Element) -> BindResult<Self> {
        Self::check_qname(element)?;
        let attributes = element
            .elements_ns(SAML_NS, Attribute::LOCAL_NAME)
            .map(Attribute::from_xml)
            .collect::<BindResult<Vec<_>>>()?;
        Self::new(attributes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn entity_issuer_marshalling() {
        let issuer = Issuer::entity("urn:x-simplesamlphp:idp").unwrap();
        assert_eq!(
            issuer.to_xml_string(),
            "<saml:Issuer xmlns:saml=\"urn:oasis:names:tc:SAML:2.0:assertion\">\
             urn:x-simplesamlphp:idp</saml:Issuer>"
        );
    }

    #[test]
    fn qualified_issuer_marshalling() {
        let issuer = Issuer::new(
            "TheIssuerValue",
            Some("TheNameQualifier".to_string()),
            Some("TheSPNameQualifier".to_string()),
            Some(nameid_formats::UNSPECIFIED.to_string()),
            Some("TheSPProvidedID".to_string()),
        )
        .unwrap();
        assert_eq!(
            issuer.to_xml_string(),
            "<saml:Issuer xmlns:saml=\"urn:oasis:names:tc:SAML:2.0:assertion\" \
             NameQualifier=\"TheNameQualifier\" SPNameQualifier=\"TheSPNameQualifier\" \
             Format=\"urn:oasis:names:tc:SAML:1.1:nameid-format:unspecified\" \
             SPProvidedID=\"TheSPProvidedID\">TheIssuerValue</saml:Issuer>"
        );
    }

    #[test]
    fn qualifiers_forbidden_without_format() {
        let err = Issuer::new(
            "TheIssuerValue",
            Some("TheNameQualifier".to_string()),
            None,
            None,
            None,
        )
        .unwrap_err();
        assert_eq!(err.to_string(), "Illegal combination of attributes being used");
    }

    #[test]
    fn qualifiers_forbidden_with_entity_format() {
        let err = Issuer::new(
            "TheIssuerValue",
            None,
            Some("TheSPNameQualifier".to_string()),
            Some(nameid_formats::ENTITY.to_string()),
            None,
        )
        .unwrap_err();
        assert_eq!(err.to_string(), "Illegal combination of attributes being used");
    }

    #[test]
    fn illegal_parsed_combination_is_rejected() {
        let element = Element::parse(
            "<saml:Issuer xmlns:saml=\"urn:oasis:names:tc:SAML:2.0:assertion\" \
             NameQualifier=\"TheNameQualifier\">TheIssuerValue</saml:Issuer>",
        )
        .unwrap();
        assert!(matches!(
            Issuer::from_xml(&element),
            Err(BindError::AssertionFailure(_))
        ));
    }

    #[test]
    fn issuer_roundtrip() {
        let issuer = Issuer::new(
            "TheIssuerValue",
            Some("TheNameQualifier".to_string()),
            None,
            Some(nameid_formats::PERSISTENT.to_string()),
            None,
        )
        .unwrap();
        let reparsed = Issuer::parse(&issuer.to_xml_string()).unwrap();
        assert_eq!(reparsed, issuer);
    }

    #[test]
    fn subject_locality_marshalling() {
        let locality =
            SubjectLocality::new(Some("1.2.3.4".to_string()), Some("example.org".to_string()));
        assert_eq!(
            locality.to_xml_string(),
            "<saml:SubjectLocality xmlns:saml=\"urn:oasis:names:tc:SAML:2.0:assertion\" \
             Address=\"1.2.3.4\" DNSName=\"example.org\"/>"
        );
        assert!(!locality.is_empty_element());
        assert!(SubjectLocality::default().is_empty_element());
    }

    #[test]
    fn typed_attribute_value_marshalling() {
        let value = AttributeValue::integer(2);
        assert_eq!(
            value.to_xml_string(),
            "<saml:AttributeValue xmlns:saml=\"urn:oasis:names:tc:SAML:2.0:assertion\" \
             xmlns:xs=\"http://www.w3.org/2001/XMLSchema\" \
             xmlns:xsi=\"http://www.w3.org/2001/XMLSchema-instance\" \
             xsi:type=\"xs:integer\">2</saml:AttributeValue>"
        );
    }

    #[test]
    fn attribute_marshalling() {
        let attribute = Attribute::new(
            "TheName",
            Some("TheNameFormat".to_string()),
            Some("TheFriendlyName".to_string()),
            vec![
                AttributeValue::string("FirstValue"),
                AttributeValue::string("SecondValue"),
            ],
        )
        .unwrap();
        assert_eq!(
            attribute.to_xml_string(),
            "<saml:Attribute xmlns:saml=\"urn:oasis:names:tc:SAML:2.0:assertion\" \
             Name=\"TheName\" NameFormat=\"TheNameFormat\" FriendlyName=\"TheFriendlyName\">\
             <saml:AttributeValue>FirstValue</saml:AttributeValue>\
             <saml:AttributeValue>SecondValue</saml:AttributeValue>\
             </saml:Attribute>"
        );
    }

    #[test]
    fn attribute_without_name_fails() {
        let element = Element::parse(
            "<saml:Attribute xmlns:saml=\"urn:oasis:names:tc:SAML:2.0:assertion\">\
             <saml:AttributeValue>v</saml:AttributeValue></saml:Attribute>",
        )
        .unwrap();
        let err = Attribute::from_xml(&element).unwrap_err();
        assert_eq!(err.to_string(), "Missing 'Name' attribute on saml:Attribute.");
    }

    #[test]
    fn attribute_statement_requires_attributes() {
        assert!(matches!(
            AttributeStatement::new(Vec::new()),
            Err(BindError::Cardinality(_))
        ));
    }

    fn actions() -> Vec<Action> {
        vec![
            Action::new("urn:x-simplesamlphp:namespace", "SomeAction").unwrap(),
            Action::new("urn:x-simplesamlphp:namespace", "OtherAction").unwrap(),
        ]
    }

    #[test]
    fn authz_decision_statement_marshalling() {
        let evidence = Evidence::parse(
            "<saml:Evidence xmlns:saml=\"urn:oasis:names:tc:SAML:2.0:assertion\">\
             <saml:AssertionIDRef>_abc123</saml:AssertionIDRef></saml:Evidence>",
        )
        .unwrap();
        let statement = AuthzDecisionStatement::new(
            "urn:x-simplesamlphp:resource",
            Decision::Permit,
            actions(),
            Some(evidence),
        )
        .unwrap();
        assert_eq!(
            statement.to_xml_string(),
            "<saml:AuthzDecisionStatement xmlns:saml=\"urn:oasis:names:tc:SAML:2.0:assertion\" \
             Resource=\"urn:x-simplesamlphp:resource\" Decision=\"Permit\">\
             <saml:Action Namespace=\"urn:x-simplesamlphp:namespace\">SomeAction</saml:Action>\
             <saml:Action Namespace=\"urn:x-simplesamlphp:namespace\">OtherAction</saml:Action>\
             <saml:Evidence><saml:AssertionIDRef>_abc123</saml:AssertionIDRef></saml:Evidence>\
             </saml:AuthzDecisionStatement>"
        );
    }

    #[test]
    fn authz_decision_statement_requires_actions() {
        let err = AuthzDecisionStatement::new(
            "urn:x-simplesamlphp:resource",
            Decision::Deny,
            Vec::new(),
            None,
        )
        .unwrap_err();
        assert_eq!(
            err.to_string(),
            "AuthzDecisionStatement must contain at least one Action."
        );
    }

    #[test]
    fn authz_decision_statement_requires_resource_and_decision() {
        let element = Element::parse(
            "<saml:AuthzDecisionStatement xmlns:saml=\"urn:oasis:names:tc:SAML:2.0:assertion\" \
             Decision=\"Permit\">\
             <saml:Action Namespace=\"urn:ns\">SomeAction</saml:Action>\
             </saml:AuthzDecisionStatement>",
        )
        .unwrap();
        let err = AuthzDecisionStatement::from_xml(&element).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Missing 'Resource' attribute on saml:AuthzDecisionStatement."
        );

        let element = Element::parse(
            "<saml:AuthzDecisionStatement xmlns:saml=\"urn:oasis:names:tc:SAML:2.0:assertion\" \
             Resource=\"urn:x-simplesamlphp:resource\">\
             <saml:Action Namespace=\"urn:ns\">SomeAction</saml:Action>\
             </saml:AuthzDecisionStatement>",
        )
        .unwrap();
        let err = AuthzDecisionStatement::from_xml(&element).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Missing 'Decision' attribute on saml:AuthzDecisionStatement."
        );
    }

    #[test]
    fn unknown_decision_value_is_rejected() {
        assert!(matches!(
            "Maybe".parse::<Decision>(),
            Err(BindError::SchemaViolation { .. })
        ));
        assert_eq!("Indeterminate".parse::<Decision>().unwrap(), Decision::Indeterminate);
    }

    #[test]
    fn action_without_namespace_fails() {
        let element = Element::parse(
            "<saml:Action xmlns:saml=\"urn:oasis:names:tc:SAML:2.0:assertion\">SomeAction</saml:Action>",
        )
        .unwrap();
        let err = Action::from_xml(&element).unwrap_err();
        assert_eq!(err.to_string(), "Missing 'Namespace' attribute on saml:Action.");
    }

    #[test]
    fn authz_decision_statement_roundtrip() {
        let statement = AuthzDecisionStatement::new(
            "urn:x-simplesamlphp:resource",
            Decision::Indeterminate,
            actions(),
            None,
        )
        .unwrap();
        let reparsed = AuthzDecisionStatement::parse(&statement.to_xml_string()).unwrap();
        assert_eq!(reparsed, statement);
        assert_eq!(reparsed.decision(), Decision::Indeterminate);
        assert!(reparsed.evidence().is_none());
    }

    #[test]
    fn attribute_statement_roundtrip() {
        let statement = AttributeStatement::new(vec![Attribute::new(
            "TheName",
            None,
            None,
            vec![AttributeValue::typed("2", "xs:integer")],
        )
        .unwrap()])
        .unwrap();
        let reparsed = AttributeStatement::parse(&statement.to_xml_string()).unwrap();
        assert_eq!(reparsed, statement);
        assert_eq!(
            reparsed.attributes()[0].values()[0].xsi_type(),
            Some("xs:integer")
        );
    }
}
