//! Discovery UI (`mdui:`) vocabulary elements.

use serde::{Deserialize, Serialize};

use crate::constants::MDUI_NS;
use crate::dom::Element;
use crate::element::SamlElement;
use crate::error::{BindError, BindResult};
use crate::extension::{Chunk, ExtensionContainer};

macro_rules! string_hint {
    ($(#[$doc:meta])* $name:ident, $local:literal, $field:literal) => {
        $(#[$doc])*
        #[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
        pub struct $name {
            value: String,
        }

        impl $name {
            /// Creates the hint; the value must be non-empty.
            pub fn new(value: impl Into<String>) -> BindResult<Self> {
                let value = value.into();
                if value.is_empty() {
                    return Err(BindError::schema_violation($field, "must not be empty"));
                }
                Ok(Self { value })
            }

            /// The hint value.
            #[must_use]
            pub fn value(&self) -> &str {
                &self.value
            }
        }

        impl SamlElement for $name {
            const LOCAL_NAME: &'static str = $local;
            const NAMESPACE: &'static str = MDUI_NS;
            const PREFIX: &'static str = "mdui";

            fn to_xml(&self) -> Element {
                let mut element = Self::instantiate();
                element.append_text(self.value.clone());
                element
            }

            fn from_xml(element: &Element) -> BindResult<Self> {
                Self::check_qname(element)?;
                Self::new(element.text_content())
            }
        }
    };
}

string_hint!(
    /// An IP address or CIDR block hinting at the entity's user network.
    IpHint,
    "IPHint",
    "IPHint"
);

string_hint!(
    /// A DNS domain hinting at the entity's user population.
    DomainHint,
    "DomainHint",
    "DomainHint"
);

string_hint!(
    /// A geolocation URI (`geo:lat,long`) hinting at the entity's locale.
    GeolocationHint,
    "GeolocationHint",
    "GeolocationHint"
);

/// Discovery hints for an entity: IP ranges, DNS domains and geolocations,
/// plus arbitrary foreign child elements.
///
/// The only accumulating type in the vocabulary; hints and extension
/// children may be appended after construction.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiscoHints {
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    ip_hints: Vec<IpHint>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    domain_hints: Vec<DomainHint>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    geolocation_hints: Vec<GeolocationHint>,
    #[serde(default, skip_serializing_if = "ExtensionContainer::is_empty")]
    children: ExtensionContainer,
}

impl DiscoHints {
    const KNOWN_CHILDREN: [&'static str; 3] = ["IPHint", "DomainHint", "GeolocationHint"];

    /// Creates an empty hint set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends an IP hint.
    pub fn add_ip_hint(&mut self, hint: IpHint) {
        self.ip_hints.push(hint);
    }

    /// Appends a domain hint.
    pub fn add_domain_hint(&mut self, hint: DomainHint) {
        self.domain_hints.push(hint);
    }

    /// Appends a geolocation hint.
    pub fn add_geolocation_hint(&mut self, hint: GeolocationHint) {
        self.geolocation_hints.push(hint);
    }

    /// Appends an opaque foreign child.
    pub fn add_child(&mut self, chunk: Chunk) {
        self.children.add_child(chunk);
    }

    /// The IP hints, in insertion order.
    #[must_use]
    pub fn ip_hints(&self) -> &[IpHint] {
        &self.ip_hints
    }

    /// The domain hints, in insertion order.
    #[must_use]
    pub fn domain_hints(&self) -> &[DomainHint] {
        &self.domain_hints
    }

    /// The geolocation hints, in insertion order.
    #[must_use]
    pub fn geolocation_hints(&self) -> &[GeolocationHint] {
        &self.geolocation_hints
    }

    /// Captured foreign children, in document order.
    #[must_use]
    pub fn children(&self) -> &ExtensionContainer {
        &self.children
    }
}

impl SamlElement for DiscoHints {
    const LOCAL_NAME: &'static str = "DiscoHints";
    const NAMESPACE: &'static str = MDUI_NS;
    const PREFIX: &'static str = "mdui";

    fn to_xml(&self) -> Element {
        let mut element = Self::instantiate();
        for hint in &self.ip_hints {
            hint.to_xml_in(&mut element);
        }
        for hint in &self.domain_hints {
            hint.to_xml_in(&mut element);
        }
        for hint in &self.geolocation_hints {
            hint.to_xml_in(&mut element);
        }
        // Extension children always follow the typed hints.
        self.children.append_to(&mut element);
        element
    }

    fn from_xml(element: &Element) -> BindResult<Self> {
        Self::check_qname(element)?;
        let ip_hints = element
            .elements_ns(MDUI_NS, "IPHint")
            .map(IpHint::from_xml)
            .collect::<BindResult<Vec<_>>>()?;
        let domain_hints = element
            .elements_ns(MDUI_NS, "DomainHint")
            .map(DomainHint::from_xml)
            .collect::<BindResult<Vec<_>>>()?;
        let geolocation_hints = element
            .elements_ns(MDUI_NS, "GeolocationHint")
            .map(GeolocationHint::from_xml)
            .collect::<BindResult<Vec<_>>>()?;
        Ok(Self {
            ip_hints,
            domain_hints,
            geolocation_hints,
            children: ExtensionContainer::capture(element, MDUI_NS, &Self::KNOWN_CHILDREN),
        })
    }

    fn is_empty_element(&self) -> bool {
        self.ip_hints.is_empty()
            && self.domain_hints.is_empty()
            && self.geolocation_hints.is_empty()
            && self.children.is_empty()
    }
}
