//! Host-facing configuration surface.
//!
//! A thin snapshot of the settings the surrounding application persists:
//! master enable, strictness, font, and per-location switches. The host
//! owns storage and mutation; the engine only reads a snapshot per call.

use std::ops::{Index, IndexMut};

use serde::{Deserialize, Serialize};

use crate::model::{DisplayLevel, Location};
use crate::{Error, Result};

// ============================================================================
// LocationMask
// ============================================================================

/// Per-location enable flags, indexed by [`Location`] in canonical order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LocationMask {
    flags: [bool; 8],
}

impl LocationMask {
    pub fn all_enabled() -> Self {
        Self { flags: [true; 8] }
    }

    pub fn all_disabled() -> Self {
        Self { flags: [false; 8] }
    }

    pub fn with(mut self, location: Location, enabled: bool) -> Self {
        self.flags[location.index()] = enabled;
        self
    }

    /// Locations currently enabled, in canonical order.
    pub fn enabled(&self) -> impl Iterator<Item = Location> + '_ {
        Location::ALL
            .into_iter()
            .filter(move |loc| self.flags[loc.index()])
    }
}

impl Default for LocationMask {
    fn default() -> Self {
        Self::all_enabled()
    }
}

impl Index<Location> for LocationMask {
    type Output = bool;

    fn index(&self, location: Location) -> &bool {
        &self.flags[location.index()]
    }
}

impl IndexMut<Location> for LocationMask {
    fn index_mut(&mut self, location: Location) -> &mut bool {
        &mut self.flags[location.index()]
    }
}

// ============================================================================
// AnnotationSettings
// ============================================================================

/// The persisted annotation preferences.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnnotationSettings {
    /// Master switch for corner-text annotations.
    pub enabled: bool,
    /// Global verbosity threshold (least = show everything only at the
    /// most verbose setting; always = shown everywhere).
    pub strictness: DisplayLevel,
    pub font_family: String,
    pub font_size: u32,
    /// Which of the eight locations are drawn at all.
    pub locations: LocationMask,
}

impl Default for AnnotationSettings {
    fn default() -> Self {
        Self {
            enabled: true,
            strictness: DisplayLevel::Always,
            font_family: "Times".to_string(),
            font_size: 14,
            locations: LocationMask::all_enabled(),
        }
    }
}

impl AnnotationSettings {
    /// Serialize for the host's settings store.
    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string_pretty(self).map_err(|e| Error::Settings(e.to_string()))
    }

    /// Restore from the host's settings store.
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json).map_err(|e| Error::Settings(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let settings = AnnotationSettings::default();
        assert!(settings.enabled);
        assert_eq!(settings.strictness, DisplayLevel::Always);
        assert_eq!(settings.font_family, "Times");
        assert_eq!(settings.font_size, 14);
        assert_eq!(settings.locations.enabled().count(), 8);
    }

    #[test]
    fn test_json_round_trip() {
        let mut settings = AnnotationSettings::default();
        settings.enabled = false;
        settings.strictness = DisplayLevel::Sometimes;
        settings.font_size = 18;
        settings.locations = LocationMask::all_enabled().with(Location::EdgeT, false);

        let json = settings.to_json().unwrap();
        let restored = AnnotationSettings::from_json(&json).unwrap();
        assert_eq!(settings, restored);
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let restored = AnnotationSettings::from_json(r#"{"font_size": 10}"#).unwrap();
        assert_eq!(restored.font_size, 10);
        assert!(restored.enabled);
        assert_eq!(restored.font_family, "Times");
    }

    #[test]
    fn test_mask_indexing() {
        let mut mask = LocationMask::all_disabled();
        assert!(!mask[Location::CornerBl]);
        mask[Location::CornerBl] = true;
        assert!(mask[Location::CornerBl]);
        assert_eq!(mask.enabled().count(), 1);
    }

    #[test]
    fn test_bad_json_is_a_settings_error() {
        assert!(matches!(
            AnnotationSettings::from_json("{nope"),
            Err(Error::Settings(_))
        ));
    }
}
