//! # Annotation Generation
//!
//! The orchestrator: walks the parsed specification tree, resolves each
//! property through the registry, applies display-level filtering and
//! prefixing, and assembles text per location.
//!
//! Each call is a fresh deterministic pass — no state survives between
//! calls. `generate` itself never fails; every problem in the taxonomy
//! (parse failure, structural violation, node-level violation, unresolved
//! property) is recovered locally and optionally reported through
//! `tracing` diagnostics.

use std::ops::{Index, IndexMut};

use smallvec::SmallVec;
use tracing::warn;

use crate::config::{AnnotationSettings, LocationMask};
use crate::model::{DisplayLevel, Location, SliceViewContext};
use crate::provider::ProviderRegistry;
use crate::spec::{self, SpecNode};
use crate::Error;

// ============================================================================
// GenerationResult
// ============================================================================

/// The assembled multi-line text for all eight locations, indexed by
/// [`Location`]. Default is the empty string at every slot.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GenerationResult {
    slots: [String; 8],
}

impl GenerationResult {
    /// All-empty result — the disabled/failed-call value.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Iterate `(location, text)` pairs in canonical order.
    pub fn iter(&self) -> impl Iterator<Item = (Location, &str)> {
        Location::ALL
            .into_iter()
            .map(move |loc| (loc, self.slots[loc.index()].as_str()))
    }

    /// True when every slot is empty.
    pub fn is_empty(&self) -> bool {
        self.slots.iter().all(String::is_empty)
    }
}

impl Index<Location> for GenerationResult {
    type Output = String;

    fn index(&self, location: Location) -> &String {
        &self.slots[location.index()]
    }
}

impl IndexMut<Location> for GenerationResult {
    fn index_mut(&mut self, location: Location) -> &mut String {
        &mut self.slots[location.index()]
    }
}

// ============================================================================
// GenerateOptions
// ============================================================================

/// Per-call knobs, usually derived from [`AnnotationSettings`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerateOptions {
    /// Master switch; when false the call returns the all-empty result.
    pub enabled: bool,
    /// Strictness threshold: a property is included only when its
    /// `display-level` is ≥ this value.
    pub strictness: DisplayLevel,
    /// Route warnings through `tracing`. Hosts suppress this for implicit
    /// re-renders so periodic scene updates do not spam the log, and set it
    /// for explicit user-triggered refreshes.
    pub emit_diagnostics: bool,
    /// Per-location output mask; disabled locations yield empty slots.
    pub locations: LocationMask,
}

impl Default for GenerateOptions {
    fn default() -> Self {
        Self {
            enabled: true,
            strictness: DisplayLevel::Always,
            emit_diagnostics: false,
            locations: LocationMask::all_enabled(),
        }
    }
}

impl GenerateOptions {
    /// Derive per-call options from the host-facing settings snapshot.
    pub fn from_settings(settings: &AnnotationSettings, emit_diagnostics: bool) -> Self {
        Self {
            enabled: settings.enabled,
            strictness: settings.strictness,
            emit_diagnostics,
            locations: settings.locations,
        }
    }
}

// ============================================================================
// Generation pass
// ============================================================================

/// Generate annotation text for all eight locations.
///
/// Stages: gate → parse → top-level validation → per-node walk →
/// per-property resolution/filtering → assembly → location mask.
pub fn generate(
    registry: &ProviderRegistry,
    view: &SliceViewContext,
    spec_text: &str,
    options: &GenerateOptions,
) -> GenerationResult {
    // Stage 1: gate. Disabled or blank input is the documented empty state,
    // not an error.
    if !options.enabled || spec_text.trim().is_empty() {
        return GenerationResult::empty();
    }

    // Stage 2: parse.
    let root = match spec::parse(spec_text) {
        Ok(root) => root,
        Err(err) => {
            diagnose(options, &err);
            return GenerationResult::empty();
        }
    };

    // Stage 3: top-level validation — all-or-nothing. A malformed
    // specification produces no partial output.
    let blocks = match validate_top_level(&root) {
        Ok(blocks) => blocks,
        Err(err) => {
            diagnose(options, &err);
            return GenerationResult::empty();
        }
    };

    // Stages 4-7: walk each corner/edge, appending in document order so
    // multiple blocks targeting one location concatenate rather than
    // overwrite.
    let mut result = GenerationResult::empty();
    for (location, node) in blocks {
        let text = render_block(registry, view, node, location, options);
        result[location].push_str(&text);
    }

    // Stage 8: per-location output mask.
    for location in Location::ALL {
        if !options.locations[location] {
            result[location].clear();
        }
    }

    result
}

/// Validate the root's children: at least one, each named corner/edge with
/// a resolvable position and at least one nested element. Any violation
/// fails the entire call.
fn validate_top_level(root: &SpecNode) -> Result<Vec<(Location, &SpecNode)>, Error> {
    if root.children.is_empty() {
        return Err(Error::StructuralViolation(
            "specification has no corner or edge elements".to_string(),
        ));
    }

    let mut blocks = Vec::with_capacity(root.children.len());
    for node in &root.children {
        if node.name != "corner" && node.name != "edge" {
            return Err(Error::StructuralViolation(format!(
                "unexpected top-level element <{}>; only <corner> and <edge> are allowed",
                node.name
            )));
        }

        let position = node.position.as_deref().unwrap_or_default();
        if position.is_empty() {
            return Err(Error::StructuralViolation(format!(
                "<{}> element is missing its position attribute \
                 (e.g. <corner position=\"bottom-left\">)",
                node.name
            )));
        }

        let location = Location::from_position(position).ok_or_else(|| {
            Error::StructuralViolation(format!(
                "unknown position {position:?} on <{}> element",
                node.name
            ))
        })?;

        if node.children.is_empty() {
            return Err(Error::StructuralViolation(format!(
                "<{} position={position:?}> has no nested elements",
                node.name
            )));
        }

        blocks.push((location, node));
    }

    Ok(blocks)
}

/// Render one corner/edge block: resolve each property child in order,
/// filter by display level, and join accepted lines.
///
/// Node-level violations (a non-property child, a property without a name)
/// stop this block's remaining children but keep the text accepted so far.
fn render_block(
    registry: &ProviderRegistry,
    view: &SliceViewContext,
    node: &SpecNode,
    location: Location,
    options: &GenerateOptions,
) -> String {
    let mut lines: SmallVec<[String; 4]> = SmallVec::new();

    for child in &node.children {
        if child.name != "property" {
            diagnose(
                options,
                &Error::NodeLevelViolation(format!(
                    "<{} position=\"{location}\"> may only contain self-closing \
                     <property/> elements, found <{}>",
                    node.name, child.name
                )),
            );
            break;
        }

        let Some(name) = child.attributes.name().filter(|n| !n.is_empty()) else {
            diagnose(
                options,
                &Error::NodeLevelViolation(format!(
                    "<{} position=\"{location}\"> has a property with a missing name",
                    node.name
                )),
            );
            break;
        };

        // Display-level filter: numerically smaller levels are more
        // exclusive; "always" passes any strictness.
        let level = child.attributes.display_level(DisplayLevel::Always);
        if level < options.strictness {
            continue;
        }

        let Some(value) = registry.resolve(name, &child.attributes, view) else {
            diagnose(
                options,
                &Error::UnresolvedProperty {
                    name: name.to_string(),
                    position: location.to_string(),
                },
            );
            continue;
        };

        let prefix = child.attributes.prefix().unwrap_or_default();
        lines.push(format!("{prefix}{value}\n"));
    }

    lines.concat()
}

fn diagnose(options: &GenerateOptions, err: &Error) {
    if options.emit_diagnostics {
        warn!(error = %err, "annotation generation diagnostic");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_options() {
        let options = GenerateOptions::default();
        assert!(options.enabled);
        assert_eq!(options.strictness, DisplayLevel::Always);
        assert!(!options.emit_diagnostics);
        assert!(options.locations[Location::EdgeT]);
    }

    #[test]
    fn test_result_indexing() {
        let mut result = GenerationResult::empty();
        assert!(result.is_empty());

        result[Location::CornerTl].push_str("hello\n");
        assert_eq!(&result[Location::CornerTl], "hello\n");
        assert!(!result.is_empty());

        let filled: Vec<_> = result.iter().filter(|(_, t)| !t.is_empty()).collect();
        assert_eq!(filled, vec![(Location::CornerTl, "hello\n")]);
    }
}
