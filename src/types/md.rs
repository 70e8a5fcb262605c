//! Metadata (`md:`) vocabulary elements.

use serde::{Deserialize, Serialize};

use crate::constants::MD_NS;
use crate::dom::Element;
use crate::element::{require_attribute, SamlElement};
use crate::error::{BindError, BindResult};
use crate::extension::{capture_attributes, NamespacedAttribute};
use crate::metadata::DocumentMetadata;

/// A single member of an affiliation, identified by its entity ID.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AffiliateMember {
    entity_id: String,
}

impl AffiliateMember {
    /// Entity IDs are anyURI-typed and bounded by the schema.
    const MAX_LENGTH: usize = 1024;

    /// Creates an affiliate member from an entity ID.
    pub fn new(entity_id: impl Into<String>) -> BindResult<Self> {
        let entity_id = entity_id.into();
        if entity_id.is_empty() {
            return Err(BindError::schema_violation(
                "AffiliateMember",
                "entity ID must not be empty",
            ));
        }
        if entity_id.len() > Self::MAX_LENGTH {
            return Err(BindError::schema_violation(
                "AffiliateMember",
                "entity ID must not exceed 1024 characters",
            ));
        }
        Ok(Self { entity_id })
    }

    /// The member's entity ID.
    #[must_use]
    pub fn entity_id(&self) -> &str {
        &self.entity_id
    }
}

impl SamlElement for AffiliateMember {
    const LOCAL_NAME: &'static str = "AffiliateMember";
    const NAMESPACE: &'static str = MD_NS;
    const PREFIX: &'static str = "md";

    fn to_xml(&self) -> Element {
        let mut element = Self::instantiate();
        element.append_text(self.entity_id.clone());
        element
    }

    fn from_xml(element: &Element) -> BindResult<Self> {
        Self::check_qname(element)?;
        Self::new(element.text_content())
    }
}

/// A list of affiliated entities under one owner.
///
/// Top-level metadata document: carries the shared `ID`/`validUntil`/
/// `cacheDuration` attributes and an extension point via
/// [`DocumentMetadata`], plus wildcard namespaced attributes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AffiliationDescriptor {
    affiliation_owner_id: String,
    members: Vec<AffiliateMember>,
    metadata: DocumentMetadata,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    attributes: Vec<NamespacedAttribute>,
}

impl AffiliationDescriptor {
    /// Creates an affiliation descriptor.
    ///
    /// The owner ID must be non-empty and the member list must contain at
    /// least one entry; either violation fails the whole construction.
    pub fn new(
        affiliation_owner_id: impl Into<String>,
        members: Vec<AffiliateMember>,
        metadata: DocumentMetadata,
        attributes: Vec<NamespacedAttribute>,
    ) -> BindResult<Self> {
        let affiliation_owner_id = affiliation_owner_id.into();
        if affiliation_owner_id.is_empty() {
            return Err(BindError::schema_violation(
                "affiliationOwnerID",
                "must be a non-empty URI",
            ));
        }
        if members.is_empty() {
            return Err(BindError::Cardinality(
                "List of affiliated members must not be empty.".to_string(),
            ));
        }
        Ok(Self {
            affiliation_owner_id,
            members,
            metadata,
            attributes,
        })
    }

    /// The entity ID of the affiliation owner.
    #[must_use]
    pub fn affiliation_owner_id(&self) -> &str {
        &self.affiliation_owner_id
    }

    /// The affiliated members, at least one.
    #[must_use]
    pub fn members(&self) -> &[AffiliateMember] {
        &self.members
    }

    /// The shared document attributes.
    #[must_use]
    pub fn metadata(&self) -> &DocumentMetadata {
        &self.metadata
    }

    /// Wildcard namespaced attributes carried on the descriptor.
    #[must_use]
    pub fn attributes(&self) -> &[NamespacedAttribute] {
        &self.attributes
    }
}

impl SamlElement for AffiliationDescriptor {
    const LOCAL_NAME: &'static str = "AffiliationDescriptor";
    const NAMESPACE: &'static str = MD_NS;
    const PREFIX: &'static str = "md";

    fn to_xml(&self) -> Element {
        let mut element = Self::instantiate();
        element.set_attribute("affiliationOwnerID", &self.affiliation_owner_id);
        self.metadata.apply_to(&mut element);
        for attribute in &self.attributes {
            element.set_attribute_ns(
                &attribute.prefix,
                &attribute.namespace,
                &attribute.local_name,
                &attribute.value,
            );
        }
        for member in &self.members {
            member.to_xml_in(&mut element);
        }
        element
    }

    fn from_xml(element: &Element) -> BindResult<Self> {
        Self::check_qname(element)?;
        let owner = require_attribute(element, "affiliationOwnerID", &Self::qualified_name())?;
        let members = element
            .elements_ns(MD_NS, AffiliateMember::LOCAL_NAME)
            .map(AffiliateMember::from_xml)
            .collect::<BindResult<Vec<_>>>()?;
        Self::new(
            owner,
            members,
            DocumentMetadata::from_xml(element)?,
            capture_attributes(element, MD_NS),
        )
    }
}

/// Organization company name element.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Company {
    name: String,
}

impl Company {
    /// Creates a company name element; the name must not be empty or
    /// whitespace-only.
    pub fn new(name: impl Into<String>) -> BindResult<Self> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(BindError::schema_violation("Company", "must not be empty"));
        }
        Ok(Self { name })
    }

    /// The company name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }
}

impl SamlElement for Company {
    const LOCAL_NAME: &'static str = "Company";
    const NAMESPACE: &'static str = MD_NS;
    const PREFIX: &'static str = "md";

    fn to_xml(&self) -> Element {
        let mut element = Self::instantiate();
        element.append_text(self.name.clone());
        element
    }

    fn from_xml(element: &Element) -> BindResult<Self> {
        Self::check_qname(element)?;
        Self::new(element.text_content())
    }
}

/// A supported name identifier format, carried as element content.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NameIdFormat {
    uri: String,
}

impl NameIdFormat {
    /// Creates a name ID format element from a format URI.
    pub fn new(uri: impl Into<String>) -> BindResult<Self> {
        let uri = uri.into();
        if uri.trim().is_empty() || uri.contains(char::is_whitespace) {
            return Err(BindError::schema_violation(
                "NameIDFormat",
                "must be a URI",
            ));
        }
        Ok(Self { uri })
    }

    /// The format URI.
    #[must_use]
    pub fn uri(&self) -> &str {
        &self.uri
    }
}

impl SamlElement for NameIdFormat {
    const LOCAL_NAME: &'static str = "NameIDFormat";
    const NAMESPACE: &'static str = MD_NS;
    const PREFIX: &'static str = "md";

    fn to_xml(&self) -> Element {
        let mut element = Self::instantiate();
        element.append_text(self.uri.clone());
        element
    }

    fn from_xml(element: &Element) -> BindResult<Self> {
        Self::check_qname(element)?;
        Self::new(element.text_content())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::nameid_formats;
    use crate::error::BindError;
    use chrono::{TimeZone, Utc};

    const ENTITY_IDP: &str = "urn:x-simplesamlphp:idp";
    const ENTITY_SP: &str = "urn:x-simplesamlphp:sp";
    const ENTITY_OTHER: &str = "urn:x-simplesamlphp:other";

    fn members() -> Vec<AffiliateMember> {
        vec![
            AffiliateMember::new(ENTITY_SP).unwrap(),
            AffiliateMember::new(ENTITY_OTHER).unwrap(),
        ]
    }

    #[test]
    fn affiliation_descriptor_marshalling() {
        let descriptor = AffiliationDescriptor::new(
            ENTITY_IDP,
            members(),
            DocumentMetadata::new(
                Some("TheID".to_string()),
                Some(Utc.with_ymd_and_hms(2009, 2, 13, 23, 31, 30).unwrap()),
                Some("PT5000S".to_string()),
                None,
            )
            .unwrap(),
            vec![NamespacedAttribute::new(
                "urn:x-simplesamlphp:namespace",
                "ssp",
                "attr1",
                "value1",
            )],
        )
        .unwrap();

        assert_eq!(
            descriptor.to_xml_string(),
            "<md:AffiliationDescriptor xmlns:md=\"urn:oasis:names:tc:SAML:2.0:metadata\" \
             affiliationOwnerID=\"urn:x-simplesamlphp:idp\" ID=\"TheID\" \
             validUntil=\"2009-02-13T23:31:30Z\" cacheDuration=\"PT5000S\" \
             xmlns:ssp=\"urn:x-simplesamlphp:namespace\" ssp:attr1=\"value1\">\
             <md:AffiliateMember>urn:x-simplesamlphp:sp</md:AffiliateMember>\
             <md:AffiliateMember>urn:x-simplesamlphp:other</md:AffiliateMember>\
             </md:AffiliationDescriptor>"
        );
    }

    #[test]
    fn empty_owner_id_is_rejected() {
        let result =
            AffiliationDescriptor::new("", members(), DocumentMetadata::empty(), Vec::new());
        assert!(matches!(result, Err(BindError::SchemaViolation { .. })));
    }

    #[test]
    fn empty_member_list_is_rejected() {
        let err =
            AffiliationDescriptor::new(ENTITY_IDP, Vec::new(), DocumentMetadata::empty(), Vec::new())
                .unwrap_err();
        assert_eq!(err.to_string(), "List of affiliated members must not be empty.");
    }

    #[test]
    fn unmarshalling_without_members_fails() {
        let element = Element::parse(
            "<md:AffiliationDescriptor xmlns:md=\"urn:oasis:names:tc:SAML:2.0:metadata\" \
             affiliationOwnerID=\"urn:x-simplesamlphp:idp\" ID=\"TheID\" \
             validUntil=\"2009-02-13T23:31:30Z\" cacheDuration=\"PT5000S\"/>",
        )
        .unwrap();
        let err = AffiliationDescriptor::from_xml(&element).unwrap_err();
        assert_eq!(err.to_string(), "List of affiliated members must not be empty.");
    }

    #[test]
    fn unmarshalling_without_owner_fails() {
        let element = Element::parse(
            "<md:AffiliationDescriptor xmlns:md=\"urn:oasis:names:tc:SAML:2.0:metadata\" ID=\"TheID\">\
             <md:AffiliateMember>urn:x-simplesamlphp:sp</md:AffiliateMember>\
             </md:AffiliationDescriptor>",
        )
        .unwrap();
        let err = AffiliationDescriptor::from_xml(&element).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Missing 'affiliationOwnerID' attribute on md:AffiliationDescriptor."
        );
    }

    #[test]
    fn affiliation_descriptor_roundtrip() {
        let descriptor = AffiliationDescriptor::new(
            ENTITY_IDP,
            members(),
            DocumentMetadata::new(Some("TheID".to_string()), None, None, None).unwrap(),
            vec![NamespacedAttribute::new("urn:ssp", "ssp", "attr1", "value1")],
        )
        .unwrap();
        let reparsed = AffiliationDescriptor::parse(&descriptor.to_xml_string()).unwrap();
        assert_eq!(reparsed, descriptor);
    }

    #[test]
    fn affiliate_member_validation() {
        assert!(AffiliateMember::new("").is_err());
        assert!(AffiliateMember::new("u".repeat(1025)).is_err());
        assert!(AffiliateMember::new(ENTITY_SP).is_ok());
    }

    #[test]
    fn company_marshalling() {
        let company = Company::new("Company").unwrap();
        assert_eq!(
            company.to_xml_string(),
            "<md:Company xmlns:md=\"urn:oasis:names:tc:SAML:2.0:metadata\">Company</md:Company>"
        );
        let reparsed = Company::parse(&company.to_xml_string()).unwrap();
        assert_eq!(reparsed, company);
    }

    #[test]
    fn empty_company_name_is_rejected() {
        assert!(matches!(
            Company::new(""),
            Err(BindError::SchemaViolation { .. })
        ));
        assert!(Company::new("   ").is_err());
        assert!(Company::parse(
            "<md:Company xmlns:md=\"urn:oasis:names:tc:SAML:2.0:metadata\"></md:Company>"
        )
        .is_err());
    }

    #[test]
    fn name_id_format_marshalling() {
        let format = NameIdFormat::new(nameid_formats::PERSISTENT).unwrap();
        assert_eq!(
            format.to_xml_string(),
            "<md:NameIDFormat xmlns:md=\"urn:oasis:names:tc:SAML:2.0:metadata\">\
             urn:oasis:names:tc:SAML:2.0:nameid-format:persistent</md:NameIDFormat>"
        );
        assert!(NameIdFormat::new("not a uri").is_err());
    }
}
