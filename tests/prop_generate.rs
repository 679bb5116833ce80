//! Property-based tests: the generator must stay total and deterministic
//! under arbitrary specification text.

use proptest::prelude::*;

use cornertext_rs::{AnnotationEngine, GenerateOptions, Location, SliceViewContext};

fn engine() -> AnnotationEngine {
    AnnotationEngine::with_standard_providers()
}

proptest! {
    /// Arbitrary input never panics and always yields all eight slots.
    #[test]
    fn generate_is_total(spec_text in ".{0,400}") {
        let engine = engine();
        let view = SliceViewContext::new("Red").with_background_volume("CT");
        let result = engine.generate(&view, &spec_text, &GenerateOptions::default());
        prop_assert_eq!(result.iter().count(), 8);
    }

    /// The same inputs always produce the same result.
    #[test]
    fn generate_is_deterministic(spec_text in ".{0,400}") {
        let engine = engine();
        let view = SliceViewContext::new("Red").with_background_volume("CT");
        let options = GenerateOptions::default();
        let first = engine.generate(&view, &spec_text, &options);
        let second = engine.generate(&view, &spec_text, &options);
        prop_assert_eq!(first, second);
    }

    /// A well-formed single-corner specification lands in exactly the slot
    /// its position names, whichever of the eight it is.
    #[test]
    fn position_routes_to_one_slot(index in 0usize..8) {
        let location = Location::ALL[index];
        let spec = format!(
            r#"<corner position="{}"><property name="VolumeName" layer="background"/></corner>"#,
            location.position_str()
        );

        let engine = engine();
        let view = SliceViewContext::new("Red").with_background_volume("CT");
        let result = engine.generate(&view, &spec, &GenerateOptions::default());

        for (slot, text) in result.iter() {
            if slot == location {
                prop_assert_eq!(text, "CT\n");
            } else {
                prop_assert_eq!(text, "");
            }
        }
    }

    /// Canonical position strings and their numeric aliases agree.
    #[test]
    fn numeric_alias_matches_canonical(index in 0usize..8) {
        let location = Location::ALL[index];
        prop_assert_eq!(
            Location::from_position(&index.to_string()),
            Some(location)
        );
        prop_assert_eq!(
            Location::from_position(location.position_str()),
            Some(location)
        );
    }
}
