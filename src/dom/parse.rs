//! Event-based document parsing.
//!
//! Drives a quick-xml reader and assembles the owned [`Element`] tree,
//! resolving namespace prefixes against the declarations in scope while
//! keeping the declarations themselves in the attribute lists.

use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;
use tracing::trace;

use crate::constants::XML_NS;
use crate::error::{BindError, BindResult};

use super::{Attribute, Element, XmlNode};

/// One prefix-to-URI binding introduced by an element.
type Binding = (Option<String>, String);

/// Parses a complete document, returning the single root element.
pub(crate) fn parse_document(input: &str) -> BindResult<Element> {
    let mut reader = Reader::from_str(input);
    let mut scopes: Vec<Vec<Binding>> = Vec::new();
    let mut stack: Vec<Element> = Vec::new();
    let mut root: Option<Element> = None;

    loop {
        let event = reader
            .read_event()
            .map_err(|e| BindError::XmlParse(e.to_string()))?;
        match event {
            Event::Decl(_) | Event::DocType(_) => {}
            Event::Start(start) => {
                let element = open_element(&start, &mut scopes)?;
                stack.push(element);
            }
            Event::Empty(start) => {
                let element = open_element(&start, &mut scopes)?;
                scopes.pop();
                attach(element, &mut stack, &mut root)?;
            }
            Event::End(_) => {
                let element = stack
                    .pop()
                    .ok_or_else(|| BindError::XmlParse("unexpected closing tag".to_string()))?;
                scopes.pop();
                attach(element, &mut stack, &mut root)?;
            }
            Event::Text(text) => {
                let text = text
                    .unescape()
                    .map_err(|e| BindError::XmlParse(e.to_string()))?;
                match stack.last_mut() {
                    Some(parent) => parent.append_node(XmlNode::Text(text.into_owned())),
                    None if text.trim().is_empty() => {}
                    None => {
                        return Err(BindError::XmlParse(
                            "character data outside the root element".to_string(),
                        ))
                    }
                }
            }
            Event::CData(cdata) => {
                let content = String::from_utf8(cdata.into_inner().into_owned())
                    .map_err(|e| BindError::XmlParse(e.to_string()))?;
                match stack.last_mut() {
                    Some(parent) => parent.append_node(XmlNode::CData(content)),
                    None => {
                        return Err(BindError::XmlParse(
                            "CDATA outside the root element".to_string(),
                        ))
                    }
                }
            }
            Event::Comment(comment) => {
                if let Some(parent) = stack.last_mut() {
                    let content = String::from_utf8(comment.to_vec())
                        .map_err(|e| BindError::XmlParse(e.to_string()))?;
                    parent.append_node(XmlNode::Comment(content));
                }
            }
            Event::PI(pi) => {
                if let Some(parent) = stack.last_mut() {
                    let content = String::from_utf8(pi.to_vec())
                        .map_err(|e| BindError::XmlParse(e.to_string()))?;
                    parent.append_node(XmlNode::ProcessingInstruction(content));
                }
            }
            Event::Eof => break,
        }
    }

    if !stack.is_empty() {
        return Err(BindError::XmlParse("unclosed element".to_string()));
    }
    root.ok_or_else(|| BindError::XmlParse("document has no root element".to_string()))
}

/// Attaches a completed element to its parent, or records it as the root.
fn attach(
    element: Element,
    stack: &mut Vec<Element>,
    root: &mut Option<Element>,
) -> BindResult<()> {
    match stack.last_mut() {
        Some(parent) => {
            parent.append_node(XmlNode::Element(element));
            Ok(())
        }
        None if root.is_none() => {
            trace!(name = %element.qualified_name(), "parsed root element");
            *root = Some(element);
            Ok(())
        }
        None => Err(BindError::XmlParse(
            "document has more than one root element".to_string(),
        )),
    }
}

/// Builds an element from a start tag and pushes its namespace scope.
fn open_element(start: &BytesStart<'_>, scopes: &mut Vec<Vec<Binding>>) -> BindResult<Element> {
    let mut attributes = Vec::new();
    let mut bindings: Vec<Binding> = Vec::new();

    for attr in start.attributes() {
        let attr = attr.map_err(|e| BindError::XmlParse(e.to_string()))?;
        let prefix = attr
            .key
            .prefix()
            .map(|p| utf8(p.as_ref()))
            .transpose()?;
        let local_name = utf8(attr.key.local_name().as_ref())?;
        let value = attr
            .unescape_value()
            .map_err(|e| BindError::XmlParse(e.to_string()))?
            .into_owned();

        match prefix.as_deref() {
            Some("xmlns") => bindings.push((Some(local_name.clone()), value.clone())),
            None if local_name == "xmlns" => bindings.push((None, value.clone())),
            _ => {}
        }

        attributes.push(Attribute {
            prefix,
            local_name,
            namespace: None,
            value,
        });
    }

    scopes.push(bindings);

    // Resolve the element name and any prefixed attributes now that this
    // element's own declarations are in scope.
    let prefix = start
        .name()
        .prefix()
        .map(|p| utf8(p.as_ref()))
        .transpose()?;
    let local_name = utf8(start.name().local_name().as_ref())?;
    let namespace = match prefix.as_deref() {
        Some(p) => Some(
            resolve(scopes, Some(p))
                .ok_or_else(|| BindError::XmlParse(format!("undeclared prefix '{p}'")))?
                .to_string(),
        ),
        None => resolve(scopes, None).map(str::to_string),
    };

    for attr in &mut attributes {
        if attr.is_namespace_declaration() {
            continue;
        }
        if let Some(p) = attr.prefix.as_deref() {
            let uri = resolve(scopes, Some(p))
                .ok_or_else(|| BindError::XmlParse(format!("undeclared prefix '{p}'")))?;
            attr.namespace = Some(uri.to_string());
        }
    }

    Ok(Element::from_parts(prefix, local_name, namespace, attributes))
}

/// Resolves a prefix against the scopes in effect, innermost first.
///
/// An unprefixed name resolves against the default namespace; the `xml`
/// prefix is bound implicitly.
fn resolve<'a>(scopes: &'a [Vec<Binding>], prefix: Option<&str>) -> Option<&'a str> {
    if prefix == Some("xml") {
        return Some(XML_NS);
    }
    for scope in scopes.iter().rev() {
        for (bound, uri) in scope.iter().rev() {
            if bound.as_deref() == prefix {
                // An empty URI un-declares the default namespace.
                return (!uri.is_empty()).then_some(uri.as_str());
            }
        }
    }
    None
}

fn utf8(bytes: &[u8]) -> BindResult<String> {
    std::str::from_utf8(bytes)
        .map(str::to_string)
        .map_err(|e| BindError::XmlParse(e.to_string()))
}
