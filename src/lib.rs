//! # cornertext-rs — Corner-Text Annotation Engine
//!
//! Generates the text overlaid in the corners and edges of a 2D slice view
//! (patient name, volume name, slab thickness, ...) from a small per-view
//! markup specification.
//!
//! ## Design Principles
//!
//! 1. **Trait-first**: `PropertyValueProvider` is the contract between the
//!    generator and anything that can answer a property name
//! 2. **Clean DTOs**: `SliceViewContext`, `TagAttributes`, `Location` cross
//!    all boundaries
//! 3. **Parser owns nothing**: markup → `SpecNode` tree is a pure function
//! 4. **Generation is infallible**: a malformed or partially-resolvable
//!    specification degrades to reduced or blank corner text, never a failed
//!    render
//!
//! ## Quick Start
//!
//! ```rust
//! use cornertext_rs::{AnnotationEngine, GenerateOptions, Location, SliceViewContext};
//!
//! let engine = AnnotationEngine::with_standard_providers();
//!
//! let view = SliceViewContext::new("Red")
//!     .with_background_volume("CT_Scan_01");
//!
//! let result = engine.generate(
//!     &view,
//!     r#"<corner position="bottom-left">
//!            <property name="VolumeName" layer="background"/>
//!        </corner>"#,
//!     &GenerateOptions::default(),
//! );
//!
//! assert_eq!(&result[Location::CornerBl], "CT_Scan_01\n");
//! ```
//!
//! ## Locations
//!
//! | Location | Position string | Numeric alias |
//! |----------|-----------------|---------------|
//! | `CornerBl` | `bottom-left` | 0 |
//! | `CornerBr` | `bottom-right` | 1 |
//! | `CornerTl` | `top-left` | 2 |
//! | `CornerTr` | `top-right` | 3 |
//! | `EdgeB` | `bottom` | 4 |
//! | `EdgeR` | `right` | 5 |
//! | `EdgeL` | `left` | 6 |
//! | `EdgeT` | `top` | 7 |

// ============================================================================
// Modules
// ============================================================================

pub mod config;
pub mod generate;
pub mod model;
pub mod provider;
pub mod spec;

// ============================================================================
// Re-exports: Model (the DTOs)
// ============================================================================

pub use model::{
    DicomTags, DisplayLevel, Layer, Location, SlabKind, SliceViewContext, TagAttributes,
    VolumeLayer,
};

// ============================================================================
// Re-exports: Specification tree
// ============================================================================

pub use spec::{NodeKind, SpecNode};

// ============================================================================
// Re-exports: Providers
// ============================================================================

pub use provider::{
    DefaultAnnotationProvider, DicomAnnotationProvider, PropertyValueProvider, ProviderRegistry,
};

// ============================================================================
// Re-exports: Generation
// ============================================================================

pub use generate::{GenerateOptions, GenerationResult};

// ============================================================================
// Re-exports: Configuration
// ============================================================================

pub use config::{AnnotationSettings, LocationMask};

use std::sync::Arc;

// ============================================================================
// Top-level engine handle
// ============================================================================

/// The primary entry point. An `AnnotationEngine` owns a provider registry
/// and turns (view context, specification text) into per-location text.
///
/// Registration is single-writer during setup; generation treats the
/// registry as read-only. The engine provides no interior locking — a host
/// that mutates the registry concurrently must supply its own.
pub struct AnnotationEngine {
    providers: ProviderRegistry,
}

impl AnnotationEngine {
    /// Create an engine with an empty provider registry.
    pub fn new() -> Self {
        Self {
            providers: ProviderRegistry::new(),
        }
    }

    /// Create an engine with the "default" and "dicom" providers registered.
    pub fn with_standard_providers() -> Self {
        let mut engine = Self::new();
        engine.register_provider("default", Arc::new(DefaultAnnotationProvider::new()));
        engine.register_provider("dicom", Arc::new(DicomAnnotationProvider::new()));
        engine
    }

    /// Register a provider under a unique name.
    ///
    /// First registration wins: a colliding name leaves the existing
    /// provider in place, logs a warning, and returns `false`.
    pub fn register_provider(
        &mut self,
        name: impl Into<String>,
        provider: Arc<dyn PropertyValueProvider>,
    ) -> bool {
        self.providers.register(name, provider)
    }

    /// Generate annotation text for all eight locations.
    ///
    /// Never fails: parse and structural problems degrade to an all-empty
    /// result, with diagnostics routed through `tracing` when
    /// `options.emit_diagnostics` is set.
    pub fn generate(
        &self,
        view: &SliceViewContext,
        spec_text: &str,
        options: &GenerateOptions,
    ) -> GenerationResult {
        generate::generate(&self.providers, view, spec_text, options)
    }

    /// Access the underlying registry (for advanced use).
    pub fn providers(&self) -> &ProviderRegistry {
        &self.providers
    }
}

impl Default for AnnotationEngine {
    fn default() -> Self {
        Self::new()
    }
}

// ============================================================================
// Error Types
// ============================================================================

/// Everything that can go wrong between raw specification text and the
/// assembled result.
///
/// Only `ParseFailure` ever crosses a public `Result` boundary (from
/// [`spec::parse`]); the generator recovers every variant internally and
/// reports through diagnostics instead.
#[derive(Debug, Clone, thiserror::Error)]
pub enum Error {
    /// Raw text is empty or not well-formed markup. Aborts the call.
    #[error("specification parse failure: {message} (text: {source_text:?})")]
    ParseFailure {
        message: String,
        source_text: String,
    },

    /// Top-level shape is wrong: no children, an element that is not
    /// `corner`/`edge`, or a missing/unknown `position`. Aborts the call.
    #[error("structural violation: {0}")]
    StructuralViolation(String),

    /// A bad child inside one corner/edge node. Aborts only that node's
    /// remaining children.
    #[error("node-level violation: {0}")]
    NodeLevelViolation(String),

    /// A named property for which no registered provider produced a
    /// non-empty value. Skipped.
    #[error("no value for property {name:?} at position {position:?}")]
    UnresolvedProperty { name: String, position: String },

    /// Settings snapshot could not be serialized or restored.
    #[error("settings error: {0}")]
    Settings(String),
}

pub type Result<T> = std::result::Result<T, Error>;
