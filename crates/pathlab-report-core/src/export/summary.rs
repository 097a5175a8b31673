//! Result summary export for lab review queues and audit.

use serde::{Deserialize, Serialize};

use crate::layout::{RenderMode, RenderPlan, RowContent};
use crate::models::Deviation;

/// Summary export metadata.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SummaryMetadata {
    /// Lab name from report settings
    pub lab_name: Option<String>,
    /// Test title
    pub test_name: String,
    /// Patient name from the metadata grid
    pub patient_name: Option<String>,
    /// Render mode the plan was computed for
    pub mode: RenderMode,
    /// Export timestamp
    pub exported_at: String,
}

/// Single result line.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SummaryRow {
    pub parameter: String,
    pub value: String,
    pub unit: String,
    pub reference_range: String,
    /// `H`, `L`, `A` (abnormal, direction unknown) or empty
    pub flag: String,
    pub indeterminate: bool,
}

/// Flagged-result summary of one laid-out report.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResultSummary {
    pub metadata: SummaryMetadata,
    pub rows: Vec<SummaryRow>,
    pub abnormal_count: usize,
    pub indeterminate_count: usize,
    /// False when the printed page would overflow
    pub fits_single_page: bool,
}

fn flag_marker(abnormal: bool, deviation: Option<Deviation>) -> String {
    match (abnormal, deviation) {
        (false, _) => String::new(),
        (true, Some(deviation)) => deviation.marker().to_string(),
        (true, None) => "A".to_string(),
    }
}

impl ResultSummary {
    /// Summarise the parameter table of a render plan.
    pub fn from_plan(plan: &RenderPlan) -> Self {
        let rows: Vec<SummaryRow> = plan
            .table()
            .map(|table| {
                table
                    .rows
                    .iter()
                    .filter_map(|row| match &row.content {
                        RowContent::Result(result) => Some(SummaryRow {
                            parameter: result.name.clone(),
                            value: result.value.clone(),
                            unit: result.unit.clone(),
                            reference_range: result.reference_range.clone(),
                            flag: flag_marker(result.abnormal, result.deviation),
                            indeterminate: result.indeterminate,
                        }),
                        RowContent::Placeholder { .. } => None,
                    })
                    .collect()
            })
            .unwrap_or_default();

        let abnormal_count = rows.iter().filter(|row| !row.flag.is_empty()).count();
        let indeterminate_count = rows.iter().filter(|row| row.indeterminate).count();

        Self {
            metadata: SummaryMetadata {
                lab_name: plan.lab_name.clone(),
                test_name: plan.title().unwrap_or_default().to_string(),
                patient_name: plan
                    .metadata_value("Patient Name")
                    .filter(|name| *name != "-")
                    .map(str::to_string),
                mode: plan.mode,
                exported_at: chrono::Utc::now().to_rfc3339(),
            },
            rows,
            abnormal_count,
            indeterminate_count,
            fits_single_page: plan.fits_single_page,
        }
    }

    /// Export to JSON.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Export to CSV format.
    pub fn to_csv(&self) -> String {
        let mut csv = String::new();

        csv.push_str("test_name,patient_name,parameter,value,unit,reference_range,flag,indeterminate,exported_at\n");

        for row in &self.rows {
            csv.push_str(&format!(
                "{},{},{},{},{},{},{},{},{}\n",
                escape_csv(&self.metadata.test_name),
                escape_csv(self.metadata.patient_name.as_deref().unwrap_or("")),
                escape_csv(&row.parameter),
                escape_csv(&row.value),
                escape_csv(&row.unit),
                escape_csv(&row.reference_range),
                row.flag,
                row.indeterminate,
                escape_csv(&self.metadata.exported_at),
            ));
        }

        csv
    }
}

/// Escape a string for CSV output.
fn escape_csv(s: &str) -> String {
    if s.contains(',') || s.contains('"') || s.contains('\n') {
        format!("\"{}\"", s.replace('"', "\"\""))
    } else {
        s.to_string()
    }
}
