//! XML-to-JSON-value conversion for the TMD feeds
//!
//! The 7-day forecast feed is XML; everything downstream of the fetch works
//! on a loosely-typed `serde_json::Value` tree. The mapping is the
//! conventional one: attributes become `@`-prefixed keys, element text that
//! coexists with attributes or children lands under `"#text"`, and repeated
//! sibling elements collapse into an array. A leaf element with neither
//! attributes nor children becomes a plain string.

use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;
use serde_json::{Map, Value};

/// Parse an XML document into a `Value` tree.
pub fn parse_document(xml: &str) -> Result<Value, quick_xml::Error> {
    let mut reader = Reader::from_str(xml);
    let mut root = ElementNode::default();
    let mut stack: Vec<(String, ElementNode)> = Vec::new();

    loop {
        match reader.read_event()? {
            Event::Start(start) => {
                let name = element_name(&start);
                let node = node_from_start(&start);
                stack.push((name, node));
            }
            Event::Empty(start) => {
                let name = element_name(&start);
                let node = node_from_start(&start);
                attach(&mut stack, &mut root, name, node.into_value());
            }
            Event::End(_) => {
                if let Some((name, node)) = stack.pop() {
                    attach(&mut stack, &mut root, name, node.into_value());
                }
            }
            Event::Text(text) => {
                let decoded = text.unescape()?;
                let trimmed = decoded.trim();
                if !trimmed.is_empty() {
                    if let Some((_, node)) = stack.last_mut() {
                        node.text.push_str(trimmed);
                    }
                }
            }
            Event::CData(cdata) => {
                let decoded = String::from_utf8_lossy(&cdata.into_inner()).into_owned();
                let trimmed = decoded.trim();
                if !trimmed.is_empty() {
                    if let Some((_, node)) = stack.last_mut() {
                        node.text.push_str(trimmed);
                    }
                }
            }
            Event::Eof => break,
            _ => {}
        }
    }

    Ok(root.into_value())
}

/// One element under construction.
#[derive(Default)]
struct ElementNode {
    attributes: Map<String, Value>,
    children: Map<String, Value>,
    text: String,
}

impl ElementNode {
    fn into_value(self) -> Value {
        if self.attributes.is_empty() && self.children.is_empty() {
            if self.text.is_empty() {
                Value::Null
            } else {
                Value::String(self.text)
            }
        } else {
            let mut map = self.attributes;
            for (name, child) in self.children {
                map.insert(name, child);
            }
            if !self.text.is_empty() {
                map.insert("#text".to_string(), Value::String(self.text));
            }
            Value::Object(map)
        }
    }
}

fn element_name(start: &BytesStart<'_>) -> String {
    String::from_utf8_lossy(start.name().as_ref()).into_owned()
}

fn node_from_start(start: &BytesStart<'_>) -> ElementNode {
    let mut node = ElementNode::default();
    for attr in start.attributes().flatten() {
        let key = format!("@{}", String::from_utf8_lossy(attr.key.as_ref()));
        let value = match attr.unescape_value() {
            Ok(v) => v.into_owned(),
            Err(_) => String::from_utf8_lossy(&attr.value).into_owned(),
        };
        node.attributes.insert(key, Value::String(value));
    }
    node
}

/// Attach a finished element to its parent, or to the document root when
/// the stack is empty. Repeated siblings collapse into an array.
fn attach(
    stack: &mut [(String, ElementNode)],
    root: &mut ElementNode,
    name: String,
    value: Value,
) {
    let parent = match stack.last_mut() {
        Some((_, node)) => node,
        None => root,
    };
    match parent.children.get_mut(&name) {
        Some(Value::Array(items)) => items.push(value),
        Some(existing) => {
            let first = existing.take();
            *existing = Value::Array(vec![first, value]);
        }
        None => {
            parent.children.insert(name, value);
        }
    }
}
