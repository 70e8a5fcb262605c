//! Deterministic serialization.
//!
//! The output contract: attributes in insertion order, values double-quoted,
//! text escaping `&`/`<`/`>` and attribute values additionally `"`, childless
//! elements rendered self-closing. Marshalled and reparsed trees therefore
//! serialize identically.

use std::fmt;

use super::{Element, XmlNode};

impl fmt::Display for Element {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = self.qualified_name();
        write!(f, "<{name}")?;
        for attr in self.attributes() {
            write!(
                f,
                " {}=\"{}\"",
                attr.qualified_name(),
                escape_attribute(&attr.value)
            )?;
        }
        if self.is_empty() {
            return write!(f, "/>");
        }
        write!(f, ">")?;
        for child in self.children() {
            match child {
                XmlNode::Element(e) => write!(f, "{e}")?,
                XmlNode::Text(t) => write!(f, "{}", escape_text(t))?,
                XmlNode::CData(t) => write!(f, "<![CDATA[{t}]]>")?,
                XmlNode::Comment(t) => write!(f, "<!--{t}-->")?,
                XmlNode::ProcessingInstruction(t) => write!(f, "<?{t}?>")?,
            }
        }
        write!(f, "</{name}>")
    }
}

fn escape_text(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            _ => out.push(c),
        }
    }
    out
}

fn escape_attribute(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            _ => out.push(c),
        }
    }
    out
}
