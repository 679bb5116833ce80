//! The parsed specification tree.

use crate::model::TagAttributes;

/// Element kind, assigned by nesting depth during parsing.
///
/// The parser deliberately does not validate element names or positions —
/// a depth-1 element named anything other than `corner`/`edge` still parses
/// as `CornerOrEdge` and is rejected later by the generator's structural
/// pass, which owns the fail-fast policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeKind {
    /// The synthetic (or explicit `<annotations>`) root.
    Root,
    /// A depth-1 element, expected to be `<corner>` or `<edge>`.
    CornerOrEdge,
    /// A depth-2+ element, expected to be a self-closing `<property/>`.
    Property,
}

/// One element of the parsed specification.
///
/// The tree is owned exclusively by the parse result and is rebuilt on every
/// generation call — the underlying raw text can change between calls, so
/// nothing here is cached.
#[derive(Debug, Clone, PartialEq)]
pub struct SpecNode {
    pub kind: NodeKind,
    /// Element name as written ("corner", "edge", "property", ...).
    pub name: String,
    /// The raw `position` attribute; only meaningful on depth-1 nodes.
    pub position: Option<String>,
    pub attributes: TagAttributes,
    pub children: Vec<SpecNode>,
}

impl SpecNode {
    pub(crate) fn root() -> Self {
        SpecNode {
            kind: NodeKind::Root,
            name: "annotations".to_string(),
            position: None,
            attributes: TagAttributes::new(),
            children: Vec::new(),
        }
    }

    pub(crate) fn element(kind: NodeKind, name: String, attributes: TagAttributes) -> Self {
        let position = attributes.get("position").map(str::to_owned);
        SpecNode {
            kind,
            name,
            position,
            attributes,
            children: Vec::new(),
        }
    }

    /// Number of direct children.
    pub fn child_count(&self) -> usize {
        self.children.len()
    }
}
