//! The "default" provider: session-level display properties read straight
//! off the slice view context.

use std::collections::HashSet;

use super::PropertyValueProvider;
use crate::model::{Layer, SliceViewContext, TagAttributes};

const SUPPORTED: &[&str] = &[
    "Background",
    "Foreground",
    "Label",
    "VolumeName",
    "SlabReconstructionThickness",
    "SlabReconstructionType",
];

/// Answers the built-in display properties every slice view has: which
/// volumes occupy the three layers and the slab reconstruction state.
#[derive(Debug, Default)]
pub struct DefaultAnnotationProvider;

impl DefaultAnnotationProvider {
    pub fn new() -> Self {
        Self
    }

    fn layer_volume_name(view: &SliceViewContext, layer: Layer) -> String {
        view.layer(layer)
            .map(|l| l.name.clone())
            .unwrap_or_default()
    }
}

impl PropertyValueProvider for DefaultAnnotationProvider {
    fn supports(&self, property: &str) -> bool {
        SUPPORTED.contains(&property)
    }

    fn value_for(
        &self,
        property: &str,
        attributes: &TagAttributes,
        view: &SliceViewContext,
    ) -> String {
        match property {
            "Background" => Self::layer_volume_name(view, Layer::Background),
            "Foreground" => Self::layer_volume_name(view, Layer::Foreground),
            "Label" => match view.label.as_ref() {
                Some(layer) => {
                    format!("{} ({:.0}%)", layer.name, view.label_opacity * 100.0)
                }
                None => String::new(),
            },
            "VolumeName" => {
                let layer = attributes.layer(Layer::Foreground);
                Self::layer_volume_name(view, layer)
            }
            "SlabReconstructionThickness" => match view.slab.as_ref() {
                Some(slab) => format!("Thickness: {}", slab.thickness),
                None => String::new(),
            },
            "SlabReconstructionType" => match view.slab.as_ref() {
                Some(slab) => format!("Type: {}", slab.kind.as_str()),
                None => String::new(),
            },
            _ => String::new(),
        }
    }

    fn supported_names(&self) -> HashSet<String> {
        SUPPORTED.iter().map(|s| s.to_string()).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{SlabKind, VolumeLayer};

    fn view() -> SliceViewContext {
        SliceViewContext::new("Red")
            .with_background_volume("CT_Scan_01")
            .with_foreground_volume("PET_Scan_01")
            .with_label(VolumeLayer::named("Segmentation"))
            .with_label_opacity(0.5)
            .with_slab(2.5, SlabKind::Max)
    }

    fn attrs(pairs: &[(&str, &str)]) -> TagAttributes {
        pairs.iter().copied().collect()
    }

    #[test]
    fn test_layer_names() {
        let p = DefaultAnnotationProvider::new();
        let v = view();
        let a = TagAttributes::new();

        assert_eq!(p.value_for("Background", &a, &v), "CT_Scan_01");
        assert_eq!(p.value_for("Foreground", &a, &v), "PET_Scan_01");
        assert_eq!(p.value_for("Label", &a, &v), "Segmentation (50%)");
    }

    #[test]
    fn test_volume_name_is_layer_scoped() {
        let p = DefaultAnnotationProvider::new();
        let v = view();

        assert_eq!(
            p.value_for("VolumeName", &attrs(&[("layer", "background")]), &v),
            "CT_Scan_01"
        );
        assert_eq!(
            p.value_for("VolumeName", &attrs(&[("layer", "1")]), &v),
            "CT_Scan_01"
        );
        // Default layer is foreground.
        assert_eq!(
            p.value_for("VolumeName", &TagAttributes::new(), &v),
            "PET_Scan_01"
        );
    }

    #[test]
    fn test_slab_properties() {
        let p = DefaultAnnotationProvider::new();
        let v = view();
        let a = TagAttributes::new();

        assert_eq!(
            p.value_for("SlabReconstructionThickness", &a, &v),
            "Thickness: 2.5"
        );
        assert_eq!(p.value_for("SlabReconstructionType", &a, &v), "Type: Max");
    }

    #[test]
    fn test_absent_state_yields_empty() {
        let p = DefaultAnnotationProvider::new();
        let empty = SliceViewContext::new("Red");
        let a = TagAttributes::new();

        for name in SUPPORTED {
            assert_eq!(p.value_for(name, &a, &empty), "", "property {name}");
        }
    }

    #[test]
    fn test_supports_matches_supported_names() {
        let p = DefaultAnnotationProvider::new();
        for name in p.supported_names() {
            assert!(p.supports(&name));
        }
        assert!(!p.supports("PatientName"));
    }
}
