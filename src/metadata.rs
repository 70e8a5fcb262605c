//! Common metadata-document attributes.
//!
//! Every top-level metadata artifact carries the same optional trio — a
//! document `ID`, a `validUntil` deadline and a `cacheDuration` lifetime —
//! plus an `md:Extensions` extension point. [`DocumentMetadata`] bundles
//! them so concrete document types compose the behavior instead of
//! inheriting it.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::assert::{
    assert_nullable_duration, assert_nullable_ncname, format_instant, generate_id, parse_instant,
};
use crate::constants::MD_NS;
use crate::dom::Element;
use crate::element::{optional_attribute, SamlElement};
use crate::error::BindResult;
use crate::extension::Extensions;

/// The shared optional attributes of a metadata document.
///
/// Immutable once constructed; both construction paths validate atomically
/// and an invalid input never yields a half-built value.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentMetadata {
    #[serde(skip_serializing_if = "Option::is_none")]
    id: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    valid_until: Option<DateTime<Utc>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    cache_duration: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    extensions: Option<Extensions>,
}

impl DocumentMetadata {
    /// Creates document metadata, validating the identifier against the
    /// NCName lexical class and the cache duration against the ISO-8601
    /// duration grammar.
    pub fn new(
        id: Option<String>,
        valid_until: Option<DateTime<Utc>>,
        cache_duration: Option<String>,
        extensions: Option<Extensions>,
    ) -> BindResult<Self> {
        assert_nullable_ncname("ID", id.as_deref())?;
        assert_nullable_duration("cacheDuration", cache_duration.as_deref())?;
        Ok(Self {
            id,
            valid_until,
            cache_duration,
            extensions,
        })
    }

    /// Metadata with every attribute absent.
    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }

    /// Replaces the identifier with a freshly generated one.
    #[must_use]
    pub fn with_generated_id(mut self) -> Self {
        self.id = Some(generate_id());
        self
    }

    /// The document identifier, if present.
    #[must_use]
    pub fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    /// The validity deadline, if present.
    #[must_use]
    pub fn valid_until(&self) -> Option<&DateTime<Utc>> {
        self.valid_until.as_ref()
    }

    /// The cache lifetime, if present. Lexically validated, never
    /// semantically interpreted.
    #[must_use]
    pub fn cache_duration(&self) -> Option<&str> {
        self.cache_duration.as_deref()
    }

    /// The extension point, if present.
    #[must_use]
    pub fn extensions(&self) -> Option<&Extensions> {
        self.extensions.as_ref()
    }

    /// True if nothing here would serialize.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.id.is_none()
            && self.valid_until.is_none()
            && self.cache_duration.is_none()
            && self.extensions.as_ref().map_or(true, Extensions::is_empty_element)
    }

    /// Applies these attributes to a document element.
    ///
    /// Each attribute is set only when present; the Extensions child is
    /// appended only when present and non-empty, in that order.
    pub fn apply_to(&self, element: &mut Element) {
        if let Some(id) = &self.id {
            element.set_attribute("ID", id);
        }
        if let Some(valid_until) = &self.valid_until {
            element.set_attribute("validUntil", format_instant(valid_until));
        }
        if let Some(cache_duration) = &self.cache_duration {
            element.set_attribute("cacheDuration", cache_duration);
        }
        if let Some(extensions) = &self.extensions {
            if !extensions.is_empty_element() {
                extensions.to_xml_in(element);
            }
        }
    }

    /// Extracts the shared attributes from a parsed document element.
    pub fn from_xml(element: &Element) -> BindResult<Self> {
        let valid_until = match optional_attribute(element, "validUntil") {
            Some(raw) => Some(parse_instant("validUntil", &raw)?),
            None => None,
        };
        let extensions = match element.elements_ns(MD_NS, "Extensions").next() {
            Some(child) => Some(Extensions::from_xml(child)?),
            None => None,
        };
        Self::new(
            optional_attribute(element, "ID"),
            valid_until,
            optional_attribute(element, "cacheDuration"),
            extensions,
        )
    }
}
