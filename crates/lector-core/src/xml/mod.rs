//! XML ingestion: parse a CFDI document into a generic attributed tree.
//!
//! The tree is a [`serde_json::Value`] shaped like the output of a
//! lenient XML-to-object parser:
//!
//! - attributes are merged into the element's object without a prefix;
//! - namespace prefixes are stripped from element and attribute names;
//! - repeated children collapse into a JSON array, a singleton child
//!   stays a plain object;
//! - text-only elements become strings, mixed elements keep their text
//!   under `#text`.
//!
//! The singleton-vs-array ambiguity this produces is resolved once, at
//! the boundary, through [`NodeSet`].

use quick_xml::Reader;
use quick_xml::events::Event;
use serde_json::{Map, Value};
use tracing::debug;

use crate::error::XmlError;

/// One element being assembled while its subtree is read.
struct Frame {
    name: String,
    object: Map<String, Value>,
    text: String,
}

impl Frame {
    fn new(name: String) -> Self {
        Self {
            name,
            object: Map::new(),
            text: String::new(),
        }
    }

    /// Collapse the frame into its final value.
    fn into_value(mut self) -> (String, Value) {
        if self.object.is_empty() {
            return (self.name, Value::String(self.text));
        }
        if !self.text.is_empty() {
            self.object.insert("#text".to_string(), Value::String(self.text));
        }
        (self.name, Value::Object(self.object))
    }
}

/// Insert a child value under `name`, collapsing repeats into an array.
fn insert_child(object: &mut Map<String, Value>, name: String, value: Value) {
    match object.get_mut(&name) {
        None => {
            object.insert(name, value);
        }
        Some(Value::Array(items)) => {
            items.push(value);
        }
        Some(existing) => {
            let first = existing.take();
            *existing = Value::Array(vec![first, value]);
        }
    }
}

fn utf8_name(raw: &[u8]) -> Result<String, XmlError> {
    std::str::from_utf8(raw)
        .map(str::to_string)
        .map_err(|e| XmlError::Malformed(e.to_string()))
}

/// Parse an XML document into the attributed tree described above.
///
/// On failure no partial tree is produced.
pub fn parse_document(xml: &str) -> Result<Value, XmlError> {
    let mut reader = Reader::from_str(xml);
    let config = reader.config_mut();
    config.trim_text(true);
    config.expand_empty_elements = true;

    let mut document = Map::new();
    let mut stack: Vec<Frame> = Vec::new();

    loop {
        let event = reader
            .read_event()
            .map_err(|e| XmlError::Malformed(e.to_string()))?;

        match event {
            Event::Start(start) => {
                let name = utf8_name(start.local_name().as_ref())?;
                let mut frame = Frame::new(name);

                for attr in start.attributes() {
                    let attr = attr.map_err(|e| XmlError::Malformed(e.to_string()))?;
                    let raw_key = attr.key.as_ref();
                    // Namespace declarations are not data.
                    if raw_key == b"xmlns" || raw_key.starts_with(b"xmlns:") {
                        continue;
                    }
                    let key = utf8_name(attr.key.local_name().as_ref())?;
                    let value = attr
                        .unescape_value()
                        .map_err(|e| XmlError::Malformed(e.to_string()))?;
                    frame.object.insert(key, Value::String(value.into_owned()));
                }

                stack.push(frame);
            }
            Event::End(_) => {
                // check_end_names guarantees the tag matches.
                let frame = stack.pop().ok_or_else(|| {
                    XmlError::Malformed("closing tag without opening tag".to_string())
                })?;
                let (name, value) = frame.into_value();
                match stack.last_mut() {
                    Some(parent) => insert_child(&mut parent.object, name, value),
                    None => insert_child(&mut document, name, value),
                }
            }
            Event::Text(text) => {
                let text = text
                    .unescape()
                    .map_err(|e| XmlError::Malformed(e.to_string()))?;
                if let Some(frame) = stack.last_mut() {
                    frame.text.push_str(&text);
                }
            }
            Event::CData(cdata) => {
                if let Some(frame) = stack.last_mut() {
                    frame.text.push_str(&String::from_utf8_lossy(&cdata.into_inner()));
                }
            }
            Event::Eof => break,
            // Declarations, comments, processing instructions and doctypes
            // carry no document data.
            _ => {}
        }
    }

    if !stack.is_empty() {
        return Err(XmlError::Malformed("unexpected end of document".to_string()));
    }
    if document.is_empty() {
        return Err(XmlError::Empty);
    }

    debug!("parsed XML document with {} root node(s)", document.len());
    Ok(Value::Object(document))
}

/// A node value normalized out of the singleton-vs-array ambiguity.
///
/// Resolved once right after lookup so downstream code only ever sees a
/// sequence, possibly of length one.
#[derive(Debug, Clone, Copy)]
pub enum NodeSet<'a> {
    /// The node is absent.
    Empty,
    /// A singleton child.
    Single(&'a Value),
    /// An already repeated child.
    Many(&'a [Value]),
}

impl<'a> NodeSet<'a> {
    /// Normalize an optional node into sequence form.
    pub fn from_value(value: Option<&'a Value>) -> Self {
        match value {
            None => NodeSet::Empty,
            Some(Value::Array(items)) => NodeSet::Many(items),
            Some(single) => NodeSet::Single(single),
        }
    }

    /// View the set as a slice.
    pub fn as_slice(&self) -> &'a [Value] {
        match self {
            NodeSet::Empty => &[],
            NodeSet::Single(value) => std::slice::from_ref(value),
            NodeSet::Many(items) => items,
        }
    }

    pub fn iter(&self) -> std::slice::Iter<'a, Value> {
        self.as_slice().iter()
    }

    pub fn len(&self) -> usize {
        self.as_slice().len()
    }

    pub fn is_empty(&self) -> bool {
        self.as_slice().is_empty()
    }
}

/// Walk a nested object path, returning the node at the end of it.
pub fn node_at<'a>(root: &'a Value, path: &[&str]) -> Option<&'a Value> {
    let mut current = root;
    for key in path {
        current = current.as_object()?.get(*key)?;
    }
    Some(current)
}

/// Walk a nested object path down to a string leaf.
pub fn text_at<'a>(root: &'a Value, path: &[&str]) -> Option<&'a str> {
    node_at(root, path)?.as_str()
}
