//! Algorithm support (`alg:`) vocabulary elements.

use serde::{Deserialize, Serialize};

use crate::constants::ALG_NS;
use crate::dom::Element;
use crate::element::{optional_attribute, require_attribute, SamlElement};
use crate::error::{BindError, BindResult};
use crate::extension::ExtensionContainer;

/// Advertises a signing algorithm an entity supports, with optional key
/// size bounds. Extensible: foreign child elements are carried verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SigningMethod {
    algorithm: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    min_key_size: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    max_key_size: Option<u32>,
    #[serde(default, skip_serializing_if = "ExtensionContainer::is_empty")]
    children: ExtensionContainer,
}

impl SigningMethod {
    /// Creates a signing method advertisement.
    pub fn new(
        algorithm: impl Into<String>,
        min_key_size: Option<u32>,
        max_key_size: Option<u32>,
        children: ExtensionContainer,
    ) -> BindResult<Self> {
        let algorithm = algorithm.into();
        if algorithm.is_empty() {
            return Err(BindError::schema_violation(
                "Algorithm",
                "must be a non-empty URI",
            ));
        }
        Ok(Self {
            algorithm,
            min_key_size,
            max_key_size,
            children,
        })
    }

    /// The algorithm URI.
    #[must_use]
    pub fn algorithm(&self) -> &str {
        &self.algorithm
    }

    /// The smallest acceptable key size, if bounded.
    #[must_use]
    pub fn min_key_size(&self) -> Option<u32> {
        self.min_key_size
    }

    /// The largest acceptable key size, if bounded.
    #[must_use]
    pub fn max_key_size(&self) -> Option<u32> {
        self.max_key_size
    }

    /// Captured foreign child elements.
    #[must_use]
    pub fn children(&self) -> &ExtensionContainer {
        &self.children
    }

    fn parse_key_size(element: &Element, name: &str) -> BindResult<Option<u32>> {
        match optional_attribute(element, name) {
            Some(raw) => raw
                .parse::<u32>()
                .map(Some)
                .map_err(|_| BindError::schema_violation(name, "must be a positive integer")),
            None => Ok(None),
        }
    }
}

impl SamlElement for SigningMethod {
    const LOCAL_NAME: &'static str = "SigningMethod";
    const NAMESPACE: &'static str = ALG_NS;
    const PREFIX: &'static str = "alg";

    fn to_xml(&self) -> Element {
        let mut element = Self::instantiate();
        element.set_attribute("Algorithm", &self.algorithm);
        if let Some(min) = self.min_key_size {
            element.set_attribute("MinKeySize", min.to_string());
        }
        if let Some(max) = self.max_key_size {
            element.set_attribute("MaxKeySize", max.to_string());
        }
        self.children.append_to(&mut element);
        element
    }

    fn from_xml(element: &Element) -> BindResult<Self> {
        Self::check_qname(element)?;
        let algorithm = require_attribute(element, "Algorithm", &Self::qualified_name())?;
        Self::new(
            algorithm,
            Self::parse_key_size(element, "MinKeySize")?,
            Self::parse_key_size(element, "MaxKeySize")?,
            ExtensionContainer::capture(element, ALG_NS, &[]),
        )
    }
}
