//! Typed XML binding for the SAML 2.0 metadata and assertion vocabulary.
//!
//! Every element type implements [`SamlElement`], the bidirectional
//! contract between an in-memory value and its XML form: `to_xml` builds a
//! namespace-correct [`Element`], `from_xml` reconstructs the value and
//! rejects anything schema-invalid before a value exists. Construction is
//! atomic throughout; no partially valid element ever escapes.
//!
//! Around that core:
//!
//! * a lightweight owned DOM ([`dom`]) with deterministic serialization
//!   and namespace-prefix preservation,
//! * a lossless extension slot ([`extension`]) for foreign-namespace
//!   children and attributes,
//! * a signature-safe wrapper ([`SignedElement`]) that keeps the exact
//!   bytes an element was parsed from,
//! * the shared attribute trio of metadata documents
//!   ([`DocumentMetadata`]).
//!
//! ```
//! use saml_xml_bind::{Issuer, SamlElement};
//!
//! let issuer = Issuer::entity("https://idp.example.org")?;
//! let xml = issuer.to_xml_string();
//! assert_eq!(Issuer::parse(&xml)?, issuer);
//! # Ok::<(), saml_xml_bind::BindError>(())
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod assert;
pub mod constants;
pub mod dom;
pub mod element;
pub mod error;
pub mod extension;
pub mod metadata;
pub mod schema;
pub mod signed;
pub mod types;

pub use dom::{Element, XmlNode};
pub use element::SamlElement;
pub use error::{BindError, BindResult};
pub use extension::{Chunk, ExtensionContainer, Extensions, NamespacedAttribute};
pub use metadata::DocumentMetadata;
pub use schema::{SchemaValidator, ValidationOutcome};
pub use signed::{SignatureEngine, SignedElement};
pub use types::{
    Action, AffiliateMember, AffiliationDescriptor, Attribute, AttributeStatement,
    AttributeValue, AuthzDecisionStatement, Company, Decision, DiscoHints, DomainHint,
    Evidence, GeolocationHint, IpHint, Issuer, NameIdFormat, SigningMethod, SubjectLocality,
};
