//! The eight fixed screen-relative text-placement zones around a slice view.

use std::fmt;

use serde::{Deserialize, Serialize};

/// One of the 8 fixed annotation locations: 4 corners + 4 edges.
///
/// The canonical order (BL, BR, TL, TR, bottom, right, left, top) is
/// process-wide constant data; result slots and numeric position aliases
/// both follow it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Location {
    CornerBl,
    CornerBr,
    CornerTl,
    CornerTr,
    EdgeB,
    EdgeR,
    EdgeL,
    EdgeT,
}

impl Location {
    /// All locations in canonical order.
    pub const ALL: [Location; 8] = [
        Location::CornerBl,
        Location::CornerBr,
        Location::CornerTl,
        Location::CornerTr,
        Location::EdgeB,
        Location::EdgeR,
        Location::EdgeL,
        Location::EdgeT,
    ];

    /// Slot index in canonical order (0..8).
    pub fn index(self) -> usize {
        match self {
            Location::CornerBl => 0,
            Location::CornerBr => 1,
            Location::CornerTl => 2,
            Location::CornerTr => 3,
            Location::EdgeB => 4,
            Location::EdgeR => 5,
            Location::EdgeL => 6,
            Location::EdgeT => 7,
        }
    }

    /// The canonical `position` attribute string for this location.
    pub fn position_str(self) -> &'static str {
        match self {
            Location::CornerBl => "bottom-left",
            Location::CornerBr => "bottom-right",
            Location::CornerTl => "top-left",
            Location::CornerTr => "top-right",
            Location::EdgeB => "bottom",
            Location::EdgeR => "right",
            Location::EdgeL => "left",
            Location::EdgeT => "top",
        }
    }

    /// Resolve a `position` attribute value.
    ///
    /// Accepts the 8 canonical strings and their numeric aliases "0".."7"
    /// (canonical order). Anything else is unresolvable.
    pub fn from_position(s: &str) -> Option<Location> {
        match s {
            "bottom-left" | "0" => Some(Location::CornerBl),
            "bottom-right" | "1" => Some(Location::CornerBr),
            "top-left" | "2" => Some(Location::CornerTl),
            "top-right" | "3" => Some(Location::CornerTr),
            "bottom" | "4" => Some(Location::EdgeB),
            "right" | "5" => Some(Location::EdgeR),
            "left" | "6" => Some(Location::EdgeL),
            "top" | "7" => Some(Location::EdgeT),
            _ => None,
        }
    }

    /// Whether this is one of the four corners (as opposed to an edge).
    pub fn is_corner(self) -> bool {
        matches!(
            self,
            Location::CornerBl | Location::CornerBr | Location::CornerTl | Location::CornerTr
        )
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.position_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_canonical_order_matches_indices() {
        for (i, loc) in Location::ALL.iter().enumerate() {
            assert_eq!(loc.index(), i);
        }
    }

    #[test]
    fn test_position_strings_round_trip() {
        for loc in Location::ALL {
            assert_eq!(Location::from_position(loc.position_str()), Some(loc));
        }
    }

    #[test]
    fn test_numeric_aliases() {
        for (i, loc) in Location::ALL.iter().enumerate() {
            assert_eq!(Location::from_position(&i.to_string()), Some(*loc));
        }
    }

    #[test]
    fn test_unknown_positions_rejected() {
        assert_eq!(Location::from_position(""), None);
        assert_eq!(Location::from_position("center"), None);
        assert_eq!(Location::from_position("8"), None);
        assert_eq!(Location::from_position("Bottom-Left"), None);
    }

    #[test]
    fn test_corner_edge_split() {
        let corners: Vec<_> = Location::ALL.iter().filter(|l| l.is_corner()).collect();
        assert_eq!(corners.len(), 4);
    }
}
