//! # Specification Markup
//!
//! Parser for the per-view annotation markup producing a typed tree.
//! Pure functions — no I/O, no state, no host dependency.
//!
//! ```text
//! <corner position="bottom-left">
//!     <property name="PatientName" display-level="always"/>
//! </corner>
//! <edge position="bottom">
//!     <property name="VolumeName" layer="background" prefix="Vol: "/>
//! </edge>
//! ```
//!
//! The text need not have a single root element: a synthetic root is
//! supplied so multiple top-level corner/edge elements are legal.

pub mod ast;
pub mod parser;

pub use ast::{NodeKind, SpecNode};

use crate::Result;

/// Parse raw specification text into a [`SpecNode`] tree.
///
/// Fails only for empty input or malformed markup; structural checks
/// (element names, positions, nesting rules) belong to the generator.
pub fn parse(raw: &str) -> Result<SpecNode> {
    parser::parse_document(raw)
}
