//! Backend payloads and their mapping onto [`ReportDocument`].
//!
//! The REST backend owns persistence. This module only reads its JSON and
//! maps fields 1:1 onto the layout input.

mod record;
mod settings;

pub use record::*;
pub use settings::*;

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use thiserror::Error;

use crate::classifier::parse_leading_number;
use crate::models::{
    BandBlock, DisplayToggles, MetadataField, ParameterRow, ReferenceRange,
    ReportDocument, ResultFlag, Sex, SignatureBlock, StyleOverrides,
};

/// Backend mapping errors.
#[derive(Error, Debug)]
pub enum BackendError {
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid payload: {0}")]
    InvalidPayload(String),
}

pub type BackendResult<T> = Result<T, BackendError>;

/// Shown for metadata the backend left empty.
const MISSING: &str = "-";

/// Display format for dates in the metadata grid.
const DATE_TIME_FORMAT: &str = "%d %b %Y %H:%M";
const DATE_FORMAT: &str = "%d %b %Y";

/// Parse a report record.
pub fn parse_record(json: &str) -> BackendResult<ReportRecord> {
    let record: ReportRecord = serde_json::from_str(json)?;
    if let Some(index) = record
        .results
        .iter()
        .position(|r| r.parameter.trim().is_empty())
    {
        return Err(BackendError::InvalidPayload(format!(
            "results[{}] has no parameter name",
            index
        )));
    }
    Ok(record)
}

/// Parse lab report settings. An empty payload yields defaults.
pub fn parse_settings(json: &str) -> BackendResult<ReportSettings> {
    if json.trim().is_empty() {
        return Ok(ReportSettings::default());
    }
    Ok(serde_json::from_str(json)?)
}

/// Render a backend timestamp for display; unrecognised text passes through.
pub fn format_timestamp(text: &str) -> String {
    let text = text.trim();
    if let Ok(parsed) = DateTime::parse_from_rfc3339(text) {
        return parsed.format(DATE_TIME_FORMAT).to_string();
    }
    if let Ok(parsed) = NaiveDateTime::parse_from_str(text, "%Y-%m-%dT%H:%M:%S") {
        return parsed.format(DATE_TIME_FORMAT).to_string();
    }
    if let Ok(parsed) = NaiveDate::parse_from_str(text, "%Y-%m-%d") {
        return parsed.format(DATE_FORMAT).to_string();
    }
    text.to_string()
}

fn display(value: Option<&str>) -> String {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .unwrap_or(MISSING)
        .to_string()
}

fn non_blank(value: &Option<String>) -> Option<String> {
    value
        .as_deref()
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}

fn font_size(value: &Option<Scalar>) -> Option<f64> {
    match value.as_ref()? {
        Scalar::Number(size) => Some(*size),
        Scalar::Text(text) => parse_leading_number(text),
    }
}

impl From<&ResultRecord> for ParameterRow {
    fn from(result: &ResultRecord) -> Self {
        ParameterRow {
            name: result.parameter.trim().to_string(),
            value: result.value.clone().unwrap_or_default(),
            unit: result.unit.clone().unwrap_or_default(),
            reference_range: ReferenceRange::new(result.reference_range.clone().unwrap_or_default()),
            flag: result.flag.as_deref().and_then(ResultFlag::from_backend),
        }
    }
}

impl ReportDocument {
    /// Assemble a layout input from a backend record and lab settings.
    pub fn assemble(record: &ReportRecord, settings: &ReportSettings, toggles: DisplayToggles) -> Self {
        let patient = &record.patient_info;
        let test = &record.test_info;

        let metadata = vec![
            MetadataField::new("Patient Name", display(patient.name.as_deref())),
            MetadataField::new("Patient ID", display(patient.patient_id.as_deref())),
            MetadataField::new(
                "Age",
                display(patient.age.as_ref().map(Scalar::to_string).as_deref()),
            ),
            MetadataField::new("Gender", display(patient.gender.as_deref())),
            MetadataField::new("Referred By", display(patient.referred_by.as_deref())),
            MetadataField::new("Sample Type", display(test.sample_type.as_deref())),
            MetadataField::new(
                "Collected",
                display(test.collected_at.as_deref().map(format_timestamp).as_deref()),
            ),
            MetadataField::new(
                "Reported",
                display(test.reported_at.as_deref().map(format_timestamp).as_deref()),
            ),
        ];

        let parameter_rows: Vec<ParameterRow> = record.results.iter().map(ParameterRow::from).collect();

        let document = ReportDocument {
            header: BandBlock::new(non_blank(&settings.header.header_image), toggles.show_header),
            lab_name: non_blank(&settings.header.lab_name),
            patient: metadata,
            patient_sex: patient.gender.as_deref().map(Sex::parse).unwrap_or_default(),
            test_name: test.test_name.clone().unwrap_or_default().trim().to_string(),
            parameter_rows,
            notes: non_blank(&record.notes),
            signature: SignatureBlock {
                image: non_blank(&settings.footer.signature),
                verified_by: non_blank(&settings.footer.verified_by),
                designation: non_blank(&settings.footer.designation),
                show: toggles.show_signature,
            },
            footer: BandBlock::new(non_blank(&settings.footer.footer_image), toggles.show_footer),
            styling: StyleOverrides {
                primary_color: non_blank(&settings.styling.primary_color),
                secondary_color: non_blank(&settings.styling.secondary_color),
                font_family: non_blank(&settings.styling.font_family),
                font_size_pt: font_size(&settings.styling.font_size),
            },
        };

        tracing::debug!(
            test = %document.test_name,
            rows = document.parameter_rows.len(),
            header_image = document.header.image.is_some(),
            footer_image = document.footer.image.is_some(),
            "Report document assembled"
        );

        document
    }
}

/// Parse both payloads and assemble the layout input.
pub fn assemble_from_json(
    record_json: &str,
    settings_json: &str,
    toggles: DisplayToggles,
) -> BackendResult<ReportDocument> {
    let record = parse_record(record_json)?;
    let settings = parse_settings(settings_json)?;
    Ok(ReportDocument::assemble(&record, &settings, toggles))
}
