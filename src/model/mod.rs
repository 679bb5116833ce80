//! # Annotation Model
//!
//! Clean DTOs crossing every boundary: parser ↔ registry ↔ generator ↔ host.
//!
//! Design rule: this module is pure data — no I/O, no state, no host types.

pub mod attributes;
pub mod location;
pub mod view;

pub use attributes::{DisplayLevel, Layer, TagAttributes};
pub use location::Location;
pub use view::{DicomTags, SlabKind, SlabReconstruction, SliceViewContext, VolumeLayer};
