//! # Property Value Providers
//!
//! This is THE contract between the annotation generator and anything that
//! can turn a property name into display text.
//!
//! ## Implementations
//!
//! | Provider | Module | Description |
//! |----------|--------|-------------|
//! | `DefaultAnnotationProvider` | `default` | Session-level display properties (layer volume names, slab state) |
//! | `DicomAnnotationProvider` | `dicom` | Per-image DICOM metadata (patient, series, acquisition) |
//!
//! Providers are registered once during module setup and treated as
//! read-only during generation. Resolution is deliberately
//! **last-writer-wins**: every supporting provider is queried in
//! registration order and the last non-empty value overwrites earlier
//! ones, letting late registrations override stock behavior.

pub mod default;
pub mod dicom;

pub use default::DefaultAnnotationProvider;
pub use dicom::DicomAnnotationProvider;

use std::collections::HashSet;
use std::sync::Arc;

use tracing::warn;

use crate::model::{SliceViewContext, TagAttributes};

// ============================================================================
// PropertyValueProvider Trait
// ============================================================================

/// The universal provider contract.
///
/// Implementations must be side-effect-free and fast: `value_for` runs once
/// per property per generation pass, potentially dozens of times per UI
/// refresh. An empty returned string means "no value available".
pub trait PropertyValueProvider: Send + Sync {
    /// Whether this provider can answer the given property name.
    fn supports(&self, property: &str) -> bool;

    /// Produce the value for a property, given the element's attributes and
    /// the viewing context. Empty string signals no value.
    fn value_for(
        &self,
        property: &str,
        attributes: &TagAttributes,
        view: &SliceViewContext,
    ) -> String;

    /// The full set of property names this provider answers.
    fn supported_names(&self) -> HashSet<String>;
}

// ============================================================================
// ProviderRegistry
// ============================================================================

/// Insertion-ordered collection of named providers.
///
/// Lifecycle contract: single writer during setup, read-only during
/// generation. No interior locking is provided.
#[derive(Default)]
pub struct ProviderRegistry {
    providers: Vec<(String, Arc<dyn PropertyValueProvider>)>,
}

impl ProviderRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a provider under a unique name.
    ///
    /// First registration wins: on collision the existing provider stays,
    /// a warning is logged, and `false` is returned.
    pub fn register(
        &mut self,
        name: impl Into<String>,
        provider: Arc<dyn PropertyValueProvider>,
    ) -> bool {
        let name = name.into();
        if self.providers.iter().any(|(n, _)| *n == name) {
            warn!(provider = %name, "provider already registered; keeping existing");
            return false;
        }
        self.providers.push((name, provider));
        true
    }

    /// Resolve a property through every supporting provider, in insertion
    /// order. The last non-empty value wins; `None` when no provider
    /// produced one.
    pub fn resolve(
        &self,
        property: &str,
        attributes: &TagAttributes,
        view: &SliceViewContext,
    ) -> Option<String> {
        let mut value = None;
        for (_, provider) in &self.providers {
            if !provider.supports(property) {
                continue;
            }
            let candidate = provider.value_for(property, attributes, view);
            if !candidate.is_empty() {
                value = Some(candidate);
            }
        }
        value
    }

    /// Union of every registered provider's supported property names.
    pub fn supported_names(&self) -> HashSet<String> {
        self.providers
            .iter()
            .flat_map(|(_, p)| p.supported_names())
            .collect()
    }

    /// Registered provider names, in registration order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.providers.iter().map(|(n, _)| n.as_str())
    }

    pub fn len(&self) -> usize {
        self.providers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.providers.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Fixed-answer provider for registry policy tests.
    struct Fixed {
        property: &'static str,
        value: &'static str,
    }

    impl PropertyValueProvider for Fixed {
        fn supports(&self, property: &str) -> bool {
            property == self.property
        }

        fn value_for(&self, _: &str, _: &TagAttributes, _: &SliceViewContext) -> String {
            self.value.to_string()
        }

        fn supported_names(&self) -> HashSet<String> {
            [self.property.to_string()].into()
        }
    }

    fn fixed(property: &'static str, value: &'static str) -> Arc<dyn PropertyValueProvider> {
        Arc::new(Fixed { property, value })
    }

    #[test]
    fn test_first_registration_wins() {
        let mut registry = ProviderRegistry::new();
        assert!(registry.register("a", fixed("X", "one")));
        assert!(!registry.register("a", fixed("X", "two")));
        assert_eq!(registry.len(), 1);

        let view = SliceViewContext::new("Red");
        let attrs = TagAttributes::new();
        assert_eq!(registry.resolve("X", &attrs, &view).as_deref(), Some("one"));
    }

    #[test]
    fn test_last_writer_wins_resolution() {
        let mut registry = ProviderRegistry::new();
        registry.register("a", fixed("X", "from-a"));
        registry.register("b", fixed("X", "from-b"));

        let view = SliceViewContext::new("Red");
        let attrs = TagAttributes::new();
        assert_eq!(
            registry.resolve("X", &attrs, &view).as_deref(),
            Some("from-b")
        );
    }

    #[test]
    fn test_empty_values_do_not_overwrite() {
        let mut registry = ProviderRegistry::new();
        registry.register("a", fixed("X", "kept"));
        registry.register("b", fixed("X", ""));

        let view = SliceViewContext::new("Red");
        let attrs = TagAttributes::new();
        assert_eq!(
            registry.resolve("X", &attrs, &view).as_deref(),
            Some("kept")
        );
    }

    #[test]
    fn test_unsupported_property_unresolved() {
        let mut registry = ProviderRegistry::new();
        registry.register("a", fixed("X", "x"));

        let view = SliceViewContext::new("Red");
        let attrs = TagAttributes::new();
        assert_eq!(registry.resolve("Y", &attrs, &view), None);
    }

    #[test]
    fn test_supported_names_union() {
        let mut registry = ProviderRegistry::new();
        registry.register("a", fixed("X", "x"));
        registry.register("b", fixed("Y", "y"));

        let names = registry.supported_names();
        assert!(names.contains("X"));
        assert!(names.contains("Y"));
        assert_eq!(names.len(), 2);
    }
}
