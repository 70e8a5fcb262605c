//! Signature-safe element wrapping.
//!
//! A detached XML signature is computed over specific bytes. Reparsing and
//! re-emitting a document may legally reorder attributes, change prefix
//! choices or reflow whitespace, so a rebuilt node cannot be trusted to
//! reproduce the signed bytes. [`SignedElement`] therefore retains the
//! original input exactly as parsed and hands that — never a re-serialized
//! form — to the signature engine.

use std::borrow::Cow;

use tracing::debug;

use crate::dom::Element;
use crate::element::SamlElement;
use crate::error::BindResult;

/// Engine performing detached XML signature operations.
///
/// Interface only: the binding layer's sole contribution is supplying the
/// exact signable text via [`SignedElement::signable_xml`]. Key material and
/// canonicalization live behind the implementation.
pub trait SignatureEngine {
    /// Computes a detached signature over the signable text.
    fn sign(&self, signable: &str) -> BindResult<Vec<u8>>;

    /// Verifies a detached signature against the signable text.
    fn verify(&self, signable: &str, signature: &[u8]) -> BindResult<bool>;
}

/// The node and raw text captured at parse time, kept unmodified for the
/// wrapper's entire lifetime.
#[derive(Debug, Clone)]
struct ParsedOriginal {
    node: Element,
    raw: String,
}

/// Wraps an element, distinguishing parsed originals from fresh builds.
///
/// Two states, with no transition back:
///
/// * **Unsigned-built** — created via [`SignedElement::new`]; the signable
///   form is rebuilt from the element on each call, deterministic for equal
///   element state.
/// * **Parsed** — created via [`SignedElement::parse`]; the signable form is
///   always the retained input text, byte for byte, regardless of any later
///   unsigned re-serialization.
#[derive(Debug, Clone)]
pub struct SignedElement<T: SamlElement> {
    element: T,
    original: Option<ParsedOriginal>,
}

impl<T: SamlElement> SignedElement<T> {
    /// Wraps a programmatically built element. Unsigned-built state.
    #[must_use]
    pub fn new(element: T) -> Self {
        Self {
            element,
            original: None,
        }
    }

    /// Parses an element from its serialized form, retaining the input.
    /// Parsed state.
    pub fn parse(xml: &str) -> BindResult<Self> {
        let node = Element::parse(xml)?;
        let element = T::from_xml(&node)?;
        debug!(name = %T::qualified_name(), bytes = xml.len(), "retained original element");
        Ok(Self {
            element,
            original: Some(ParsedOriginal {
                node,
                raw: xml.to_string(),
            }),
        })
    }

    /// The wrapped element.
    #[must_use]
    pub fn element(&self) -> &T {
        &self.element
    }

    /// Unwraps the element, discarding any retained original.
    #[must_use]
    pub fn into_inner(self) -> T {
        self.element
    }

    /// True if this wrapper was created from parsed input.
    #[must_use]
    pub fn is_parsed(&self) -> bool {
        self.original.is_some()
    }

    /// The DOM node captured at parse time, if any.
    #[must_use]
    pub fn original_node(&self) -> Option<&Element> {
        self.original.as_ref().map(|o| &o.node)
    }

    /// Builds a fresh unsigned node from the wrapped element.
    #[must_use]
    pub fn unsigned_xml(&self) -> Element {
        self.element.to_xml()
    }

    /// The exact text a signature must be computed over or verified
    /// against: the retained original when parsed, else a fresh unsigned
    /// build.
    #[must_use]
    pub fn signable_xml(&self) -> Cow<'_, str> {
        match &self.original {
            Some(original) => Cow::Borrowed(original.raw.as_str()),
            None => Cow::Owned(self.unsigned_xml().to_string()),
        }
    }

    /// Signs the signable form with the given engine.
    pub fn sign(&self, engine: &dyn SignatureEngine) -> BindResult<Vec<u8>> {
        engine.sign(&self.signable_xml())
    }

    /// Verifies a detached signature over the signable form.
    pub fn verify(&self, engine: &dyn SignatureEngine, signature: &[u8]) -> BindResult<bool> {
        engine.verify(&self.signable_xml(), signature)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::MDUI_NS;
    use crate::dom::Element;
    use crate::error::BindResult;

    /// Minimal element whose rebuilt form differs from arbitrary input
    /// formatting, which is exactly what the wrapper must tolerate.
    #[derive(Debug, Clone, PartialEq)]
    struct Hint {
        value: String,
    }

    impl SamlElement for Hint {
        const LOCAL_NAME: &'static str = "DomainHint";
        const NAMESPACE: &'static str = MDUI_NS;
        const PREFIX: &'static str = "mdui";

        fn to_xml(&self) -> Element {
            let mut e = Self::instantiate();
            e.append_text(self.value.clone());
            e
        }

        fn from_xml(element: &Element) -> BindResult<Self> {
            Self::check_qname(element)?;
            Ok(Self {
                value: element.text_content(),
            })
        }
    }

    /// Engine that just echoes its input, making assertions easy.
    struct Echo;

    impl SignatureEngine for Echo {
        fn sign(&self, signable: &str) -> BindResult<Vec<u8>> {
            Ok(signable.as_bytes().to_vec())
        }

        fn verify(&self, signable: &str, signature: &[u8]) -> BindResult<bool> {
            Ok(signable.as_bytes() == signature)
        }
    }

    #[test]
    fn built_wrapper_rebuilds_deterministically() {
        let wrapper = SignedElement::new(Hint {
            value: "example.com".to_string(),
        });
        assert!(!wrapper.is_parsed());
        assert_eq!(wrapper.signable_xml(), wrapper.signable_xml());
        assert_eq!(
            wrapper.signable_xml(),
            "<mdui:DomainHint xmlns:mdui=\"urn:oasis:names:tc:SAML:metadata:ui\">example.com</mdui:DomainHint>"
        );
    }

    #[test]
    fn parsed_wrapper_returns_original_bytes() {
        // Deliberately formatted unlike anything the builder would emit.
        let input = "<mdui:DomainHint \n   xmlns:mdui=\"urn:oasis:names:tc:SAML:metadata:ui\"  >example.com</mdui:DomainHint>";
        let wrapper: SignedElement<Hint> = SignedElement::parse(input).unwrap();
        assert!(wrapper.is_parsed());
        assert_eq!(wrapper.element().value, "example.com");
        assert_eq!(wrapper.signable_xml(), input);
    }

    #[test]
    fn unsigned_rebuild_does_not_disturb_original() {
        let input = "<mdui:DomainHint xmlns:mdui=\"urn:oasis:names:tc:SAML:metadata:ui\"><!-- c -->example.com</mdui:DomainHint>";
        let wrapper: SignedElement<Hint> = SignedElement::parse(input).unwrap();
        let rebuilt = wrapper.unsigned_xml().to_string();
        assert_ne!(rebuilt, input);
        assert_eq!(wrapper.signable_xml(), input);
    }

    #[test]
    fn signature_over_original_verifies() {
        let input = "<mdui:DomainHint xmlns:mdui=\"urn:oasis:names:tc:SAML:metadata:ui\">example.com</mdui:DomainHint>";
        let wrapper: SignedElement<Hint> = SignedElement::parse(input).unwrap();
        let signature = wrapper.sign(&Echo).unwrap();
        assert!(wrapper.verify(&Echo, &signature).unwrap());
        assert!(!wrapper.verify(&Echo, b"tampered").unwrap());
    }
}
