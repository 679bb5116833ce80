//! The viewing context handed to providers on every generation pass.
//!
//! These DTOs carry the slice-view state a host exposes: which volumes sit
//! in the three layers, label opacity, slab reconstruction, and per-volume
//! DICOM metadata. Pure data — the image-processing machinery that fills
//! them in lives in the host.

use serde::{Deserialize, Serialize};

use super::Layer;

// ============================================================================
// Slab reconstruction
// ============================================================================

/// Slab reconstruction mode of a slice view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SlabKind {
    Max,
    Min,
    Mean,
    Sum,
}

impl SlabKind {
    pub fn as_str(self) -> &'static str {
        match self {
            SlabKind::Max => "Max",
            SlabKind::Min => "Min",
            SlabKind::Mean => "Mean",
            SlabKind::Sum => "Sum",
        }
    }
}

/// Slab reconstruction state; present on the context only when enabled.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SlabReconstruction {
    pub thickness: f64,
    pub kind: SlabKind,
}

// ============================================================================
// DICOM metadata
// ============================================================================

/// Per-image DICOM metadata of one volume, in raw DICOM encoding
/// (dates `YYYYMMDD`, times `HHMMSS[.ffff]`, names with `^` separators).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DicomTags {
    pub patient_name: Option<String>,
    pub patient_id: Option<String>,
    pub patient_birth_date: Option<String>,
    pub patient_sex: Option<String>,
    pub patient_age: Option<String>,
    pub patient_position: Option<String>,
    pub modality: Option<String>,
    pub series_date: Option<String>,
    pub series_time: Option<String>,
    pub series_description: Option<String>,
    pub institution_name: Option<String>,
    pub referring_physician: Option<String>,
    pub manufacturer: Option<String>,
    pub model: Option<String>,
    pub repetition_time: Option<String>,
    pub echo_time: Option<String>,
}

impl DicomTags {
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether the identity fields (patient name/id/birth date) match
    /// another instance. Used to decide if background and foreground
    /// volumes belong to the same acquisition.
    pub fn same_patient(&self, other: &DicomTags) -> bool {
        self.patient_name == other.patient_name
            && self.patient_id == other.patient_id
            && self.patient_birth_date == other.patient_birth_date
    }
}

// ============================================================================
// Volume layer
// ============================================================================

/// One occupied image layer of the slice view.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct VolumeLayer {
    /// Display name of the volume in this layer.
    pub name: String,
    /// DICOM metadata, when the volume was loaded from DICOM.
    pub dicom: Option<DicomTags>,
}

impl VolumeLayer {
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            dicom: None,
        }
    }

    pub fn with_dicom(mut self, dicom: DicomTags) -> Self {
        self.dicom = Some(dicom);
        self
    }
}

// ============================================================================
// Slice view context
// ============================================================================

/// Everything a provider may read about the slice being annotated.
///
/// Supplied fresh on every `generate` call; the engine never caches it.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SliceViewContext {
    /// Host-side view name (e.g. "Red", "Axial").
    pub view_name: String,
    pub foreground: Option<VolumeLayer>,
    pub background: Option<VolumeLayer>,
    pub label: Option<VolumeLayer>,
    /// Label layer opacity in [0, 1].
    pub label_opacity: f64,
    /// Present only while slab reconstruction is enabled on the view.
    pub slab: Option<SlabReconstruction>,
}

impl SliceViewContext {
    pub fn new(view_name: impl Into<String>) -> Self {
        Self {
            view_name: view_name.into(),
            label_opacity: 1.0,
            ..Self::default()
        }
    }

    /// The layer slot for a [`Layer`] selector.
    pub fn layer(&self, layer: Layer) -> Option<&VolumeLayer> {
        match layer {
            Layer::Foreground => self.foreground.as_ref(),
            Layer::Background => self.background.as_ref(),
            Layer::Label => self.label.as_ref(),
        }
    }

    // ========================================================================
    // Builder-style constructors
    // ========================================================================

    pub fn with_foreground(mut self, layer: VolumeLayer) -> Self {
        self.foreground = Some(layer);
        self
    }

    pub fn with_background(mut self, layer: VolumeLayer) -> Self {
        self.background = Some(layer);
        self
    }

    pub fn with_label(mut self, layer: VolumeLayer) -> Self {
        self.label = Some(layer);
        self
    }

    /// Shorthand: background layer with just a volume name.
    pub fn with_background_volume(self, name: impl Into<String>) -> Self {
        self.with_background(VolumeLayer::named(name))
    }

    /// Shorthand: foreground layer with just a volume name.
    pub fn with_foreground_volume(self, name: impl Into<String>) -> Self {
        self.with_foreground(VolumeLayer::named(name))
    }

    pub fn with_label_opacity(mut self, opacity: f64) -> Self {
        self.label_opacity = opacity;
        self
    }

    pub fn with_slab(mut self, thickness: f64, kind: SlabKind) -> Self {
        self.slab = Some(SlabReconstruction { thickness, kind });
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_layer_selection() {
        let view = SliceViewContext::new("Red")
            .with_background_volume("CT")
            .with_foreground_volume("PET");

        assert_eq!(view.layer(Layer::Background).unwrap().name, "CT");
        assert_eq!(view.layer(Layer::Foreground).unwrap().name, "PET");
        assert!(view.layer(Layer::Label).is_none());
    }

    #[test]
    fn test_same_patient() {
        let a = DicomTags {
            patient_name: Some("Doe^Jane".into()),
            patient_id: Some("42".into()),
            ..DicomTags::default()
        };
        let mut b = a.clone();
        assert!(a.same_patient(&b));
        b.patient_id = Some("43".into());
        assert!(!a.same_patient(&b));
    }
}
