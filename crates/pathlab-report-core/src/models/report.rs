//! Report document models: the layout input assembled fresh for each render.

use serde::{Deserialize, Serialize};

use super::classification::ResultFlag;
use super::range::{MeasuredValue, ReferenceRange, Sex};

/// Header or footer band content.
///
/// The band's space is always reserved on the page; `show` only decides
/// whether the image (or its placeholder) paints.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct BandBlock {
    /// Image reference (URL or data URI)
    pub image: Option<String>,
    pub show: bool,
}

impl BandBlock {
    pub fn new(image: Option<String>, show: bool) -> Self {
        Self { image, show }
    }

    /// The configured image, ignoring empty strings.
    pub fn image(&self) -> Option<&str> {
        self.image.as_deref().filter(|src| !src.trim().is_empty())
    }
}

impl Default for BandBlock {
    fn default() -> Self {
        Self {
            image: None,
            show: true,
        }
    }
}

/// Verifier signature block.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SignatureBlock {
    /// Signature image reference
    pub image: Option<String>,
    /// Name of the verifying pathologist
    pub verified_by: Option<String>,
    /// Verifier designation (e.g., "Consultant Pathologist")
    pub designation: Option<String>,
    pub show: bool,
}

impl Default for SignatureBlock {
    fn default() -> Self {
        Self {
            image: None,
            verified_by: None,
            designation: None,
            show: true,
        }
    }
}

/// One label/value pair in the patient/test metadata grid.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MetadataField {
    pub label: String,
    pub value: String,
}

impl MetadataField {
    pub fn new(label: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            value: value.into(),
        }
    }
}

/// One row of the parameter table.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ParameterRow {
    /// Parameter name (e.g., "Hemoglobin")
    pub name: String,
    /// Measured result
    pub value: MeasuredValue,
    /// Unit (e.g., "g/dL")
    pub unit: String,
    /// Reference range as authored
    pub reference_range: ReferenceRange,
    /// Flag computed upstream; `None` lets the classifier decide
    pub flag: Option<ResultFlag>,
}

impl ParameterRow {
    /// Create a row with no upstream flag.
    pub fn new(
        name: impl Into<String>,
        value: impl Into<MeasuredValue>,
        unit: impl Into<String>,
        reference_range: impl Into<ReferenceRange>,
    ) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
            unit: unit.into(),
            reference_range: reference_range.into(),
            flag: None,
        }
    }

    /// Upstream abnormal verdict, if the backend computed one.
    pub fn is_abnormal(&self) -> Option<bool> {
        self.flag.map(ResultFlag::is_abnormal)
    }
}

/// Per-lab styling. Unset fields fall back to the layout defaults.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct StyleOverrides {
    pub primary_color: Option<String>,
    pub secondary_color: Option<String>,
    pub font_family: Option<String>,
    pub font_size_pt: Option<f64>,
}

/// Which optional regions of the page paint.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct DisplayToggles {
    pub show_header: bool,
    pub show_footer: bool,
    pub show_signature: bool,
}

impl Default for DisplayToggles {
    fn default() -> Self {
        Self {
            show_header: true,
            show_footer: true,
            show_signature: true,
        }
    }
}

/// Everything the layout model needs to place one report on one page.
///
/// Built fresh for each render and never mutated in place: toggling a band
/// means building a new document and laying it out again.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct ReportDocument {
    pub header: BandBlock,
    /// Lab name, carried through for exports
    pub lab_name: Option<String>,
    /// Patient/test metadata in display order
    pub patient: Vec<MetadataField>,
    /// Sex used for gender-split ranges
    pub patient_sex: Sex,
    /// Centered title above the table
    pub test_name: String,
    pub parameter_rows: Vec<ParameterRow>,
    /// Free-text notes printed under the table
    pub notes: Option<String>,
    pub signature: SignatureBlock,
    pub footer: BandBlock,
    pub styling: StyleOverrides,
}

impl ReportDocument {
    /// Create an empty document for a test.
    pub fn new(test_name: impl Into<String>) -> Self {
        Self {
            test_name: test_name.into(),
            ..Self::default()
        }
    }

    /// Copy with header/footer/signature visibility replaced.
    pub fn with_toggles(&self, toggles: DisplayToggles) -> Self {
        let mut next = self.clone();
        next.header.show = toggles.show_header;
        next.footer.show = toggles.show_footer;
        next.signature.show = toggles.show_signature;
        next
    }

    /// Metadata value for a label, if present.
    pub fn patient_field(&self, label: &str) -> Option<&str> {
        self.patient
            .iter()
            .find(|field| field.label == label)
            .map(|field| field.value.as_str())
    }
}
