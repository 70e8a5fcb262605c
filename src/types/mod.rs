//! The concrete element vocabulary, grouped by namespace.

pub mod alg;
pub mod md;
pub mod mdui;
pub mod saml;

pub use alg::SigningMethod;
pub use md::{AffiliateMember, AffiliationDescriptor, Company, NameIdFormat};
pub use mdui::{DiscoHints, DomainHint, GeolocationHint, IpHint};
pub use saml::{
    Action, Attribute, AttributeStatement, AttributeValue, AuthzDecisionStatement, Decision,
    Evidence, Issuer, SubjectLocality,
};
