//! Report record as returned by the backend `reports` endpoint.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::models::MeasuredValue;

/// A metadata value the backend may send as a number or a string (e.g. age).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum Scalar {
    Number(f64),
    Text(String),
}

impl fmt::Display for Scalar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Scalar::Number(value) => write!(f, "{}", value),
            Scalar::Text(text) => f.write_str(text.trim()),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct PatientInfo {
    pub name: Option<String>,
    pub age: Option<Scalar>,
    pub gender: Option<String>,
    pub patient_id: Option<String>,
    pub referred_by: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct TestInfo {
    pub test_name: Option<String>,
    pub sample_type: Option<String>,
    /// Sample collection time (RFC 3339 or `YYYY-MM-DD`)
    pub collected_at: Option<String>,
    /// Report time (RFC 3339 or `YYYY-MM-DD`)
    pub reported_at: Option<String>,
}

/// One entry of `results[]`.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct ResultRecord {
    pub parameter: String,
    pub value: Option<MeasuredValue>,
    pub unit: Option<String>,
    pub reference_range: Option<String>,
    /// Backend-computed flag (`H`, `L`, `N`, ...)
    pub flag: Option<String>,
}

/// A report with patient, test and result data.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct ReportRecord {
    pub patient_info: PatientInfo,
    pub test_info: TestInfo,
    pub results: Vec<ResultRecord>,
    pub notes: Option<String>,
}
