//! Layout configuration: every constant the layout model uses, in one place.

use serde::{Deserialize, Serialize};

use super::geometry::{RenderMode, A4_HEIGHT_MM, A4_WIDTH_MM};
use crate::models::StyleOverrides;

/// Resolved report styling.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Styling {
    pub primary_color: String,
    pub secondary_color: String,
    pub font_family: String,
    pub font_size_pt: f64,
}

impl Default for Styling {
    fn default() -> Self {
        Self {
            primary_color: "#1e3a8a".into(),
            secondary_color: "#475569".into(),
            font_family: "Arial, sans-serif".into(),
            font_size_pt: 11.0,
        }
    }
}

impl Styling {
    /// Apply a lab's overrides on top of these defaults.
    pub fn merged(&self, overrides: &StyleOverrides) -> Self {
        fn pick(value: &Option<String>, fallback: &str) -> String {
            value
                .as_deref()
                .map(str::trim)
                .filter(|v| !v.is_empty())
                .unwrap_or(fallback)
                .to_string()
        }

        Self {
            primary_color: pick(&overrides.primary_color, &self.primary_color),
            secondary_color: pick(&overrides.secondary_color, &self.secondary_color),
            font_family: pick(&overrides.font_family, &self.font_family),
            font_size_pt: overrides
                .font_size_pt
                .filter(|size| size.is_finite() && *size > 0.0)
                .unwrap_or(self.font_size_pt),
        }
    }
}

/// Parameter table column widths as fractions of the content width.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ColumnWidths {
    pub test: f64,
    pub result: f64,
    pub unit: f64,
    pub reference_range: f64,
}

impl Default for ColumnWidths {
    fn default() -> Self {
        Self {
            test: 0.40,
            result: 0.15,
            unit: 0.10,
            reference_range: 0.35,
        }
    }
}

impl ColumnWidths {
    pub fn as_array(&self) -> [f64; 4] {
        [self.test, self.result, self.unit, self.reference_range]
    }
}

/// Placeholder and empty-state texts.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct PlaceholderTexts {
    pub header: String,
    pub footer: String,
    pub empty_table: String,
    pub empty_value: String,
}

impl Default for PlaceholderTexts {
    fn default() -> Self {
        Self {
            header: "Header image not configured".into(),
            footer: "Footer image not configured".into(),
            empty_table: "No parameters available".into(),
            empty_value: "-".into(),
        }
    }
}

/// Layout configuration. Every field has a default, so JSON overrides may be partial.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct LayoutConfig {
    pub page_width_mm: f64,
    pub page_height_mm: f64,
    /// Header band in screen/PDF-export mode
    pub header_screen_mm: f64,
    /// Header band in direct-print mode; the print stylesheet compresses it
    pub header_print_mm: f64,
    pub footer_mm: f64,
    /// Inner padding of the content band, all sides
    pub content_padding_mm: f64,
    pub divider_thickness_mm: f64,
    /// Vertical gap after each stacked block
    pub block_gap_mm: f64,
    pub metadata_row_mm: f64,
    pub title_mm: f64,
    pub table_header_row_mm: f64,
    pub table_row_mm: f64,
    /// Rows are compressed down to this height before a plan is declared overflowing
    pub min_table_row_mm: f64,
    pub notes_mm: f64,
    pub signature_width_mm: f64,
    pub signature_height_mm: f64,
    pub columns: ColumnWidths,
    /// Fill of abnormal result cells
    pub abnormal_fill: String,
    pub placeholders: PlaceholderTexts,
    pub styling: Styling,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            page_width_mm: A4_WIDTH_MM,
            page_height_mm: A4_HEIGHT_MM,
            header_screen_mm: 35.0,
            header_print_mm: 25.0,
            footer_mm: 30.0,
            content_padding_mm: 5.0,
            divider_thickness_mm: 0.5,
            block_gap_mm: 3.0,
            metadata_row_mm: 6.0,
            title_mm: 8.0,
            table_header_row_mm: 8.0,
            table_row_mm: 7.0,
            min_table_row_mm: 4.5,
            notes_mm: 12.0,
            signature_width_mm: 60.0,
            signature_height_mm: 28.0,
            columns: ColumnWidths::default(),
            abnormal_fill: "#fde2e2".into(),
            placeholders: PlaceholderTexts::default(),
            styling: Styling::default(),
        }
    }
}

impl LayoutConfig {
    /// Parse a (possibly partial) JSON override on top of the defaults.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Reserved header height for a render mode.
    pub fn header_height(&self, mode: RenderMode) -> f64 {
        match mode {
            RenderMode::Screen => self.header_screen_mm,
            RenderMode::Print => self.header_print_mm,
        }
    }

    /// Reserved footer height; identical in both modes.
    pub fn footer_height(&self, _mode: RenderMode) -> f64 {
        self.footer_mm
    }
}
