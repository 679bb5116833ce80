//! The "dicom" provider: per-image metadata of the volume under the view.
//!
//! Values come from the [`DicomTags`] attached to the background/foreground
//! layers. When both layers carry DICOM metadata they must belong to the
//! same patient, otherwise every property resolves empty rather than mixing
//! two acquisitions; the background volume is the canonical source.

use std::collections::HashSet;

use chrono::{NaiveDate, NaiveTime};

use super::PropertyValueProvider;
use crate::model::{DicomTags, Layer, SliceViewContext, TagAttributes};

const SUPPORTED: &[&str] = &[
    "PatientName",
    "PatientID",
    "PatientBirthDate",
    "PatientInfo",
    "SeriesDate",
    "SeriesTime",
    "SeriesDescription",
    "InstitutionName",
    "ReferringPhysician",
    "Manufacturer",
    "Model",
    "Patient-Position",
    "TR",
    "TE",
];

/// Per-image DICOM metadata provider.
#[derive(Debug, Default)]
pub struct DicomAnnotationProvider;

impl DicomAnnotationProvider {
    pub fn new() -> Self {
        Self
    }

    /// Pick the metadata source: background wins when both layers carry
    /// tags for the same patient; a patient mismatch yields nothing.
    fn source<'v>(view: &'v SliceViewContext) -> Option<&'v DicomTags> {
        let background = view.background.as_ref().and_then(|l| l.dicom.as_ref());
        let foreground = view.foreground.as_ref().and_then(|l| l.dicom.as_ref());

        match (background, foreground) {
            (Some(bg), Some(fg)) => {
                if bg.same_patient(fg) {
                    Some(bg)
                } else {
                    None
                }
            }
            (Some(bg), None) => Some(bg),
            (None, Some(fg)) => Some(fg),
            (None, None) => None,
        }
    }

    /// Series-level fields may differ between background and foreground of
    /// the same patient; an explicit `layer` attribute selects which one and
    /// marks the value with a "B: "/"F: " disambiguation prefix.
    fn series_field(
        view: &SliceViewContext,
        attributes: &TagAttributes,
        field: fn(&DicomTags) -> Option<&String>,
        format: fn(&str) -> String,
    ) -> String {
        let background = view.background.as_ref().and_then(|l| l.dicom.as_ref());
        let foreground = view.foreground.as_ref().and_then(|l| l.dicom.as_ref());

        if let (Some(bg), Some(fg)) = (background, foreground) {
            if !bg.same_patient(fg) {
                return String::new();
            }
            if field(bg) != field(fg) {
                if let Some(selected) = attributes.get("layer").and_then(Layer::parse) {
                    let (tags, marker) = match selected {
                        Layer::Background => (bg, "B: "),
                        _ => (fg, "F: "),
                    };
                    return match field(tags) {
                        Some(v) => format!("{marker}{}", format(v)),
                        None => String::new(),
                    };
                }
            }
        }

        Self::source(view)
            .and_then(|tags| field(tags).map(|v| format(v)))
            .unwrap_or_default()
    }
}

impl PropertyValueProvider for DicomAnnotationProvider {
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
            "SeriesDate" => {
                return Self::series_field(view, attributes, |t| t.series_date.as_ref(), |v| {
                    format_dicom_date(v)
                });
            }
            "SeriesTime" => {
                return Self::series_field(view, attributes, |t| t.series_time.as_ref(), |v| {
                    format_dicom_time(v)
                });
            }
            "SeriesDescription" => {
                return Self::series_field(
                    view,
                    attributes,
                    |t| t.series_description.as_ref(),
                    str::to_string,
                );
            }
            _ => {}
        }

        let Some(tags) = Self::source(view) else {
            return String::new();
        };

        let field = |value: &Option<String>| value.clone().unwrap_or_default();

        match property {
            "PatientName" => field(&tags.patient_name).replace('^', ", "),
            "PatientID" => match tags.patient_id.as_deref() {
                Some(id) if !id.is_empty() => format!("ID: {id}"),
                _ => String::new(),
            },
            "PatientBirthDate" => format_dicom_date(&field(&tags.patient_birth_date)),
            "PatientInfo" => patient_info(tags),
            "InstitutionName" => field(&tags.institution_name),
            "ReferringPhysician" => field(&tags.referring_physician).replace('^', ", "),
            "Manufacturer" => field(&tags.manufacturer),
            "Model" => field(&tags.model),
            "Patient-Position" => field(&tags.patient_position),
            "TR" => match tags.repetition_time.as_deref() {
                Some(tr) if !tr.is_empty() => format!("TR: {tr}"),
                _ => String::new(),
            },
            "TE" => match tags.echo_time.as_deref() {
                Some(te) if !te.is_empty() => format!("TE: {te}"),
                _ => String::new(),
            },
            _ => String::new(),
        }
    }

    fn supported_names(&self) -> HashSet<String> {
        SUPPORTED.iter().map(|s| s.to_string()).collect()
    }
}

// ============================================================================
// DICOM value formatting
// ============================================================================

/// `YYYYMMDD` → ISO 8601 `YYYY-MM-DD`; unparseable values pass through
/// trimmed.
fn format_dicom_date(raw: &str) -> String {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return String::new();
    }
    match NaiveDate::parse_from_str(trimmed, "%Y%m%d") {
        Ok(date) => date.format("%Y-%m-%d").to_string(),
        Err(_) => trimmed.to_string(),
    }
}

/// `HHMMSS[.ffff]` → 12-hour clock "H:MM:SS AM/PM"; unparseable values pass
/// through trimmed.
fn format_dicom_time(raw: &str) -> String {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return String::new();
    }
    let seconds = trimmed.split('.').next().unwrap_or(trimmed);
    match NaiveTime::parse_from_str(seconds, "%H%M%S") {
        Ok(time) => time.format("%-I:%M:%S %p").to_string(),
        Err(_) => trimmed.to_string(),
    }
}

/// "Doe, Jane (F, 64Y)" — whichever of name, sex, age are present.
fn patient_info(tags: &DicomTags) -> String {
    let name = tags
        .patient_name
        .as_deref()
        .unwrap_or_default()
        .replace('^', ", ");

    let details: Vec<&str> = [tags.patient_sex.as_deref(), tags.patient_age.as_deref()]
        .into_iter()
        .flatten()
        .filter(|s| !s.is_empty())
        .collect();

    match (name.is_empty(), details.is_empty()) {
        (false, false) => format!("{name} ({})", details.join(", ")),
        (false, true) => name,
        (true, false) => details.join(", "),
        (true, true) => String::new(),
    }
}
