//! Lab report settings as returned by the backend `lab-settings` endpoint.

use serde::{Deserialize, Serialize};

use super::record::Scalar;

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct HeaderSettings {
    pub header_image: Option<String>,
    pub lab_name: Option<String>,
    pub doctor_name: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct FooterSettings {
    /// Signature image
    pub signature: Option<String>,
    pub verified_by: Option<String>,
    pub designation: Option<String>,
    pub footer_image: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct StylingSettings {
    pub primary_color: Option<String>,
    pub secondary_color: Option<String>,
    pub font_family: Option<String>,
    /// Points; `12` or `"12px"`
    pub font_size: Option<Scalar>,
}

/// Per-lab report settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct ReportSettings {
    pub header: HeaderSettings,
    pub footer: FooterSettings,
    pub styling: StylingSettings,
}
