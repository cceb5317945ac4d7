//! RFC XML parser producing a [`SourceNode`] tree.

use std::borrow::Cow;
use std::collections::HashMap;
use std::sync::LazyLock;

use quick_xml::events::{BytesStart, Event};
use quick_xml::reader::Reader;
use regex::Regex;

use crate::error::ParseError;
use crate::tree::SourceNode;

/// `<!ENTITY name SYSTEM "url">` declarations in the DOCTYPE internal subset.
///
/// v2 documents pull in bibliographic entries this way; a reference to such
/// an entity becomes an `xi:include` node pointing at the same location.
static SYSTEM_ENTITY_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"<!ENTITY\s+([A-Za-z0-9_.\-]+)\s+SYSTEM\s+["']([^"']+)["']\s*>"#)
        .expect("invalid entity regex")
});

/// Parse an RFC XML document into its root element.
///
/// Comments, processing instructions and namespace declarations are dropped.
/// CDATA sections are kept verbatim so artwork survives untouched.
///
/// # Errors
///
/// Returns [`ParseError`] when the input is not well-formed XML or has no
/// root element.
pub fn parse_document(xml: &str) -> Result<SourceNode, ParseError> {
    let mut reader = Reader::from_str(xml);
    reader.config_mut().trim_text(false);

    let mut stack: Vec<SourceNode> = Vec::new();
    let mut root: Option<SourceNode> = None;
    let mut system_entities: HashMap<String, String> = HashMap::new();

    loop {
        match reader.read_event()? {
            Event::Start(e) => stack.push(open_element(&reader, &e)),
            Event::Empty(e) => {
                let node = open_element(&reader, &e);
                attach(&mut stack, &mut root, node);
            }
            Event::End(_) => {
                if let Some(node) = stack.pop() {
                    attach(&mut stack, &mut root, node);
                }
            }
            Event::Text(e) => {
                let text = reader.decoder().decode(&e)?;
                append_text(&mut stack, &text);
            }
            Event::CData(e) => {
                let text = String::from_utf8_lossy(&e);
                append_text(&mut stack, &text);
            }
            Event::GeneralRef(e) => {
                let entity = reader.decoder().decode(&e)?;
                if let Some(href) = system_entities.get(entity.as_ref()) {
                    let include = SourceNode::new("xi:include").with_attr("href", href.clone());
                    attach(&mut stack, &mut root, include);
                } else {
                    append_text(&mut stack, &decode_entity(&entity));
                }
            }
            Event::DocType(e) => {
                let doctype = reader.decoder().decode(&e)?;
                system_entities = collect_system_entities(&doctype);
            }
            Event::Eof => break,
            Event::Comment(_) | Event::Decl(_) | Event::PI(_) => {}
        }
    }

    if !stack.is_empty() {
        return Err(ParseError::Unclosed(stack.len()));
    }
    root.ok_or(ParseError::NoRoot)
}

fn open_element(reader: &Reader<&[u8]>, e: &BytesStart) -> SourceNode {
    let name = decode_name(reader, e.name().as_ref());
    let mut node = SourceNode::new(name);
    for attr in e.attributes().flatten() {
        let key = decode_name(reader, attr.key.as_ref());
        if key.starts_with("xmlns") {
            continue;
        }
        let value = attr.unescape_value().map_or_else(
            |_| String::from_utf8_lossy(&attr.value).into_owned(),
            Cow::into_owned,
        );
        node.attrs.insert(key, value);
    }
    node
}

fn decode_name(reader: &Reader<&[u8]>, name: &[u8]) -> String {
    reader.decoder().decode(name).map_or_else(
        |_| String::from_utf8_lossy(name).into_owned(),
        Cow::into_owned,
    )
}

/// Attach a finished element to its parent, or make it the root.
fn attach(stack: &mut [SourceNode], root: &mut Option<SourceNode>, node: SourceNode) {
    if let Some(parent) = stack.last_mut() {
        parent.children.push(node);
    } else if root.is_none() {
        *root = Some(node);
    }
}

/// Append text to the open element's text or its last child's tail.
fn append_text(stack: &mut [SourceNode], text: &str) {
    let Some(node) = stack.last_mut() else {
        return;
    };
    if let Some(last_child) = node.children.last_mut() {
        last_child.tail.push_str(text);
    } else {
        node.text.push_str(text);
    }
}

fn collect_system_entities(doctype: &str) -> HashMap<String, String> {
    SYSTEM_ENTITY_PATTERN
        .captures_iter(doctype)
        .map(|caps| (caps[1].to_owned(), caps[2].to_owned()))
        .collect()
}

/// Decode XML entity references to their character values.
fn decode_entity(entity: &str) -> String {
    match entity {
        "lt" => "<".to_owned(),
        "gt" => ">".to_owned(),
        "amp" => "&".to_owned(),
        "apos" => "'".to_owned(),
        "quot" => "\"".to_owned(),
        "nbsp" => "\u{00a0}".to_owned(),
        s if s.starts_with('#') => {
            let code = if s.starts_with("#x") || s.starts_with("#X") {
                u32::from_str_radix(&s[2..], 16).ok()
            } else {
                s[1..].parse::<u32>().ok()
            };
            code.and_then(char::from_u32)
                .map_or_else(|| format!("&{entity};"), |c| c.to_string())
        }
        _ => format!("&{entity};"),
    }
}
