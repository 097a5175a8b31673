//! Pathlab Report Core Library
//!
//! Reference-range classification and fixed-page A4 report layout for
//! pathology lab reports.
//!
//! # Architecture
//!
//! ```text
//! Backend report JSON ──┐
//!                       ├─→ ReportDocument ─→ LayoutEngine ─→ RenderPlan ─→ print / PDF
//! Lab settings JSON ────┘                          │                │
//!                                                  │                └─→ ResultSummary (JSON/CSV)
//!                                                  ▼
//!                                   Classifier (per parameter row)
//!                             value + reference range + sex → flag
//! ```
//!
//! # Core Principle
//!
//! **The page never reflows.** Header and footer bands are reserved whether or
//! not they are shown, so screen preview, PDF export and letterhead print put
//! every block at the same coordinates.
//!
//! # Modules
//!
//! - [`models`]: Domain types (ReferenceRange, Classification, ReportDocument, etc.)
//! - [`classifier`]: Reference-range dialect parsing and classification
//! - [`layout`]: A4 band layout, parameter table, render plan
//! - [`backend`]: Backend record/settings payloads and their mapping
//! - [`export`]: Flagged-result summary export

pub mod backend;
pub mod classifier;
pub mod export;
pub mod layout;
pub mod models;

// Re-export commonly used types
pub use backend::{assemble_from_json, ReportRecord, ReportSettings};
pub use classifier::{assess, classify, Classifier};
pub use export::ResultSummary;
pub use layout::{layout, layout_with, LayoutConfig, LayoutEngine, RenderMode, RenderPlan};
pub use models::{
    Assessment, Classification, Deviation, DisplayToggles, MeasuredValue, ParameterRow,
    ReferenceRange, ReportDocument, Sex,
};

// UniFFI setup - using proc macros
uniffi::setup_scaffolding!();

// =========================================================================
// FFI Error Type
// =========================================================================

#[derive(Debug, thiserror::Error, uniffi::Error)]
pub enum PathlabError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Serialization error: {0}")]
    SerializationError(String),
}

impl From<backend::BackendError> for PathlabError {
    fn from(e: backend::BackendError) -> Self {
        match e {
            backend::BackendError::Json(e) => PathlabError::InvalidInput(e.to_string()),
            backend::BackendError::InvalidPayload(msg) => PathlabError::InvalidInput(msg),
        }
    }
}

impl From<serde_json::Error> for PathlabError {
    fn from(e: serde_json::Error) -> Self {
        PathlabError::SerializationError(e.to_string())
    }
}

// =========================================================================
// Classification (exported to FFI)
// =========================================================================

/// Classify a measured value against a reference range.
///
/// Unreadable values or ranges come back as `Normal`.
#[uniffi::export]
pub fn classify_result(value: String, reference_range: String, sex: FfiSex) -> FfiClassification {
    classifier::classify(value, reference_range, sex.into()).into()
}

/// Full assessment, keeping indeterminate results distinct from normal ones.
#[uniffi::export]
pub fn assess_result(value: String, reference_range: String, sex: FfiSex) -> FfiAssessment {
    classifier::assess(value, reference_range, sex.into()).into()
}

// =========================================================================
// Layout and Export (exported to FFI)
// =========================================================================

/// Lay out a backend report and return the render plan as JSON.
#[uniffi::export]
pub fn layout_report(
    record_json: String,
    settings_json: String,
    toggles: FfiDisplayToggles,
    mode: FfiRenderMode,
) -> Result<String, PathlabError> {
    let document = assemble_from_json(&record_json, &settings_json, toggles.into())?;
    let plan = layout(&document, mode.into());
    Ok(plan.to_json()?)
}

/// Export the flagged-result summary of a backend report as CSV.
#[uniffi::export]
pub fn export_result_summary_csv(
    record_json: String,
    settings_json: String,
) -> Result<String, PathlabError> {
    Ok(summarize(&record_json, &settings_json)?.to_csv())
}

/// Export the flagged-result summary of a backend report as JSON.
#[uniffi::export]
pub fn export_result_summary_json(
    record_json: String,
    settings_json: String,
) -> Result<String, PathlabError> {
    Ok(summarize(&record_json, &settings_json)?.to_json()?)
}

fn summarize(record_json: &str, settings_json: &str) -> Result<ResultSummary, PathlabError> {
    let document = assemble_from_json(record_json, settings_json, DisplayToggles::default())?;
    let plan = layout(&document, RenderMode::Screen);
    Ok(ResultSummary::from_plan(&plan))
}

// =========================================================================
// FFI Types
// =========================================================================

/// FFI-safe patient sex.
#[derive(Debug, Clone, Copy, PartialEq, Eq, uniffi::Enum)]
pub enum FfiSex {
    Male,
    Female,
    Unspecified,
}

impl From<FfiSex> for Sex {
    fn from(sex: FfiSex) -> Self {
        match sex {
            FfiSex::Male => Sex::Male,
            FfiSex::Female => Sex::Female,
            FfiSex::Unspecified => Sex::Unspecified,
        }
    }
}

/// FFI-safe classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, uniffi::Enum)]
pub enum FfiClassification {
    Normal,
    Abnormal,
    Indeterminate,
}

impl From<Classification> for FfiClassification {
    fn from(classification: Classification) -> Self {
        match classification {
            Classification::Normal => FfiClassification::Normal,
            Classification::Abnormal => FfiClassification::Abnormal,
            Classification::Indeterminate => FfiClassification::Indeterminate,
        }
    }
}

/// FFI-safe deviation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, uniffi::Enum)]
pub enum FfiDeviation {
    Low,
    High,
}

impl From<Deviation> for FfiDeviation {
    fn from(deviation: Deviation) -> Self {
        match deviation {
            Deviation::Low => FfiDeviation::Low,
            Deviation::High => FfiDeviation::High,
        }
    }
}

/// FFI-safe assessment.
#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiAssessment {
    pub classification: FfiClassification,
    pub deviation: Option<FfiDeviation>,
    /// Matched dialect (`dash_range`, `gender_split`, ...)
    pub dialect: Option<String>,
    /// Why the result is indeterminate (`empty_range`, `non_numeric_value`, ...)
    pub reason: Option<String>,
}

impl From<Assessment> for FfiAssessment {
    fn from(assessment: Assessment) -> Self {
        Self {
            classification: assessment.classification.into(),
            deviation: assessment.deviation.map(FfiDeviation::from),
            dialect: assessment.dialect.map(|d| d.as_str().to_string()),
            reason: assessment.reason.map(|r| r.as_str().to_string()),
        }
    }
}

/// FFI-safe display toggles.
#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiDisplayToggles {
    pub show_header: bool,
    pub show_footer: bool,
    pub show_signature: bool,
}

impl From<FfiDisplayToggles> for DisplayToggles {
    fn from(toggles: FfiDisplayToggles) -> Self {
        DisplayToggles {
            show_header: toggles.show_header,
            show_footer: toggles.show_footer,
            show_signature: toggles.show_signature,
        }
    }
}

/// FFI-safe render mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, uniffi::Enum)]
pub enum FfiRenderMode {
    Screen,
    Print,
}

impl From<FfiRenderMode> for RenderMode {
    fn from(mode: FfiRenderMode) -> Self {
        match mode {
            FfiRenderMode::Screen => RenderMode::Screen,
            FfiRenderMode::Print => RenderMode::Print,
        }
    }
}
