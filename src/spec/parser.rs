//! Event-loop markup parser.
//!
//! Builds the [`SpecNode`] tree from quick-xml events. The raw text is
//! wrapped in a synthetic `<annotations>` root unless it already carries an
//! explicit one, so a specification may list several top-level
//! `<corner>`/`<edge>` elements without supplying a root tag itself.

use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;

use super::ast::{NodeKind, SpecNode};
use crate::model::TagAttributes;
use crate::{Error, Result};

/// Parse a full specification document.
pub fn parse_document(raw: &str) -> Result<SpecNode> {
    if raw.trim().is_empty() {
        return Err(parse_failure("empty specification text", raw));
    }

    let wrapped = format!("<annotations>{raw}</annotations>");
    let mut reader = Reader::from_str(&wrapped);

    // Stack of open elements; index 0 is always the root.
    let mut stack: Vec<SpecNode> = vec![SpecNode::root()];

    loop {
        match reader.read_event() {
            Ok(Event::Start(e)) => {
                let node = open_element(&e, stack.len(), raw)?;
                stack.push(node);
            }
            Ok(Event::Empty(e)) => {
                let node = open_element(&e, stack.len(), raw)?;
                attach(&mut stack, node);
            }
            Ok(Event::End(_)) => {
                if stack.len() <= 1 {
                    return Err(parse_failure("unmatched closing tag", raw));
                }
                let node = stack.pop().expect("stack underflow");
                attach(&mut stack, node);
            }
            Ok(Event::Eof) => break,
            // Character data and processing instructions carry no
            // annotation content.
            Ok(_) => {}
            Err(e) => {
                let message =
                    format!("markup error at byte {}: {e}", reader.buffer_position());
                return Err(parse_failure(&message, raw));
            }
        }
    }

    if stack.len() != 1 {
        return Err(parse_failure("unexpected end of input: unclosed element", raw));
    }

    let root = stack.pop().expect("root always present");
    Ok(promote_explicit_root(root))
}

/// Text that already carried its own `<annotations>` root parses as a single
/// child of the synthetic wrapper; descend into it so the explicit form is
/// equivalent to the implicit one.
fn promote_explicit_root(mut root: SpecNode) -> SpecNode {
    let is_explicit = root.children.len() == 1
        && root.children[0].name == "annotations"
        && root.children[0].kind == NodeKind::CornerOrEdge;
    if !is_explicit {
        return root;
    }

    let mut explicit = root.children.remove(0);
    for child in &mut explicit.children {
        // These parsed one level deeper than they were written.
        child.kind = NodeKind::CornerOrEdge;
    }
    root.attributes = explicit.attributes;
    root.children = explicit.children;
    root
}

/// Build a node from a start/empty tag. Depth 1 inside the root parses as a
/// corner-or-edge element, anything deeper as a property.
fn open_element(e: &BytesStart<'_>, depth: usize, raw: &str) -> Result<SpecNode> {
    let name = String::from_utf8_lossy(e.name().as_ref()).into_owned();

    let mut attributes = TagAttributes::new();
    for attr in e.attributes() {
        let attr =
            attr.map_err(|err| parse_failure(&format!("bad attribute on <{name}>: {err}"), raw))?;
        let value = attr
            .unescape_value()
            .map_err(|err| parse_failure(&format!("bad attribute value on <{name}>: {err}"), raw))?;
        let key = String::from_utf8_lossy(attr.key.as_ref()).into_owned();
        attributes.insert(key, value.into_owned());
    }

    let kind = if depth <= 1 {
        NodeKind::CornerOrEdge
    } else {
        NodeKind::Property
    };

    Ok(SpecNode::element(kind, name, attributes))
}

fn attach(stack: &mut [SpecNode], node: SpecNode) {
    stack
        .last_mut()
        .expect("root always present")
        .children
        .push(node);
}

fn parse_failure(message: &str, raw: &str) -> Error {
    Error::ParseFailure {
        message: message.to_string(),
        source_text: raw.to_string(),
    }
}
