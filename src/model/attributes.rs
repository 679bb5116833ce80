//! Tag attributes — the flat string map carried by each specification
//! element, plus typed accessors for the shared attribute convention
//! (`layer`, `display-level`, `prefix`).

use hashbrown::HashMap;
use serde::{Deserialize, Serialize};

// ============================================================================
// Layer
// ============================================================================

/// One of the 3 image layers a property value may be scoped to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Layer {
    Foreground = 0,
    Background = 1,
    Label = 2,
}

impl Layer {
    /// Parse a `layer` attribute value: keyword or decimal alias.
    pub fn parse(s: &str) -> Option<Layer> {
        match s {
            "foreground" | "0" => Some(Layer::Foreground),
            "background" | "1" => Some(Layer::Background),
            "label" | "2" => Some(Layer::Label),
            _ => None,
        }
    }
}

// ============================================================================
// Display level
// ============================================================================

/// The 3-tier verbosity filter: a property is included only when its level
/// is numerically ≥ the caller's strictness threshold. `Least` properties
/// show only at strictness 1; `Always` properties show at any strictness.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum DisplayLevel {
    Least = 1,
    Sometimes = 2,
    Always = 3,
}

impl DisplayLevel {
    /// Parse a `display-level` attribute value: keyword or decimal alias.
    pub fn parse(s: &str) -> Option<DisplayLevel> {
        match s {
            "least" | "1" => Some(DisplayLevel::Least),
            "sometimes" | "2" => Some(DisplayLevel::Sometimes),
            "always" | "3" => Some(DisplayLevel::Always),
            _ => None,
        }
    }

    /// Numeric value (1..=3).
    pub fn as_int(self) -> i64 {
        self as i64
    }
}

// ============================================================================
// TagAttributes
// ============================================================================

/// Attribute map of one specification element. Keys unique; insertion order
/// irrelevant; read-only to consumers.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TagAttributes {
    map: HashMap<String, String>,
}

impl TagAttributes {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert an attribute. Later inserts for the same key overwrite.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.map.insert(key.into(), value.into());
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.map.get(key).map(String::as_str)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.map.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.map.len()
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    // ========================================================================
    // Shared attribute convention
    // ========================================================================

    /// Required `name` attribute of a property element.
    pub fn name(&self) -> Option<&str> {
        self.get("name")
    }

    /// `prefix` attribute: string prepended to a non-empty resolved value.
    pub fn prefix(&self) -> Option<&str> {
        self.get("prefix")
    }

    /// `layer` attribute as a [`Layer`]; keyword or decimal alias, any other
    /// value falls back to `default`.
    pub fn layer(&self, default: Layer) -> Layer {
        self.get("layer").and_then(Layer::parse).unwrap_or(default)
    }

    /// `display-level` attribute as a [`DisplayLevel`]; keyword or decimal
    /// alias, any other value falls back to `default`.
    pub fn display_level(&self, default: DisplayLevel) -> DisplayLevel {
        self.get("display-level")
            .and_then(DisplayLevel::parse)
            .unwrap_or(default)
    }

    /// Any attribute as a decimal integer, with fallback.
    pub fn int(&self, key: &str, default: i64) -> i64 {
        self.get(key)
            .and_then(|v| v.parse::<i64>().ok())
            .unwrap_or(default)
    }
}

impl<K, V> FromIterator<(K, V)> for TagAttributes
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut attrs = TagAttributes::new();
        for (k, v) in iter {
            attrs.insert(k, v);
        }
        attrs
    }
}
