//! SAML 2.0 namespace URIs and related constants.
//!
//! Namespace URIs are fixed per element type and resolved at compile time;
//! nothing in this module is mutable process-wide state.

/// SAML 2.0 assertion namespace URI.
pub const SAML_NS: &str = "urn:oasis:names:tc:SAML:2.0:assertion";

/// SAML 2.0 metadata namespace URI.
pub const MD_NS: &str = "urn:oasis:names:tc:SAML:2.0:metadata";

/// SAML metadata UI extension namespace URI.
pub const MDUI_NS: &str = "urn:oasis:names:tc:SAML:metadata:ui";

/// SAML metadata algorithm-support extension namespace URI.
pub const ALG_NS: &str = "urn:oasis:names:tc:SAML:metadata:algsupport";

/// XML Digital Signature namespace URI.
pub const XMLDSIG_NS: &str = "http://www.w3.org/2000/09/xmldsig#";

/// XSI namespace URI.
pub const XSI_NS: &str = "http://www.w3.org/2001/XMLSchema-instance";

/// XS namespace URI.
pub const XS_NS: &str = "http://www.w3.org/2001/XMLSchema";

/// The built-in `xml` prefix namespace URI.
pub const XML_NS: &str = "http://www.w3.org/XML/1998/namespace";

/// SAML name identifier format URIs.
pub mod nameid_formats {
    /// Unspecified name ID format.
    pub const UNSPECIFIED: &str = "urn:oasis:names:tc:SAML:1.1:nameid-format:unspecified";

    /// Email address format.
    pub const EMAIL: &str = "urn:oasis:names:tc:SAML:1.1:nameid-format:emailAddress";

    /// X.509 subject name format.
    pub const X509_SUBJECT_NAME: &str = "urn:oasis:names:tc:SAML:1.1:nameid-format:X509SubjectName";

    /// Windows domain qualified name format.
    pub const WINDOWS_DOMAIN_QUALIFIED_NAME: &str =
        "urn:oasis:names:tc:SAML:1.1:nameid-format:WindowsDomainQualifiedName";

    /// Kerberos principal name format.
    pub const KERBEROS: &str = "urn:oasis:names:tc:SAML:2.0:nameid-format:kerberos";

    /// Entity identifier format. This is the default format for `NameIDType`
    /// elements that carry no `Format` attribute.
    pub const ENTITY: &str = "urn:oasis:names:tc:SAML:2.0:nameid-format:entity";

    /// Persistent identifier format.
    pub const PERSISTENT: &str = "urn:oasis:names:tc:SAML:2.0:nameid-format:persistent";

    /// Transient identifier format.
    pub const TRANSIENT: &str = "urn:oasis:names:tc:SAML:2.0:nameid-format:transient";
}
