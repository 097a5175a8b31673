//! Render plan: computed block geometry, independent of the renderer.

use serde::{Deserialize, Serialize};

use super::config::Styling;
use super::geometry::{Rect, RenderMode};
use crate::models::Deviation;

/// Page band a block belongs to.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum Region {
    Header,
    Content,
    Footer,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Align {
    Left,
    Center,
    Right,
}

/// A label/value cell in the metadata grid.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MetadataCell {
    pub label: String,
    pub value: String,
    pub rect: Rect,
}

/// One parameter table column.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TableColumn {
    pub heading: String,
    /// Fraction of the table width
    pub width_fraction: f64,
    pub x: f64,
    pub width: f64,
}

/// Where a row's abnormal flag came from.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum FlagSource {
    /// Precomputed by the backend
    Upstream,
    /// Computed by the reference-range classifier
    Classifier,
}

/// Visual treatment of the Result cell.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct CellStyle {
    pub bold: bool,
    pub background: Option<String>,
}

/// A populated parameter row.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ResultRow {
    pub name: String,
    pub value: String,
    pub unit: String,
    pub reference_range: String,
    pub abnormal: bool,
    /// `L`/`H` direction when the classifier could tell
    pub deviation: Option<Deviation>,
    /// Classifier could not read the value or range; shown as unflagged
    pub indeterminate: bool,
    pub flag_source: FlagSource,
    pub result_style: CellStyle,
}

/// Row content.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum RowContent {
    Result(ResultRow),
    /// A message spanning several columns
    Placeholder { text: String, column_span: usize },
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TableRow {
    pub rect: Rect,
    pub content: RowContent,
}

impl TableRow {
    pub fn result(&self) -> Option<&ResultRow> {
        match &self.content {
            RowContent::Result(row) => Some(row),
            RowContent::Placeholder { .. } => None,
        }
    }
}

/// The parameter table with its rows laid out.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ParameterTable {
    pub columns: Vec<TableColumn>,
    pub header_rect: Rect,
    pub row_height: f64,
    pub rows: Vec<TableRow>,
}

/// Signature block contents.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SignaturePlan {
    pub image: Option<String>,
    /// Draw a blank signing line when there is no image
    pub signing_line: bool,
    pub verified_by: Option<String>,
    pub designation: Option<String>,
    pub align: Align,
}

/// What a block paints.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Block {
    Image { source: String },
    /// Explicit "not configured" warning
    Placeholder { message: String },
    Divider { thickness: f64, color: String },
    MetadataGrid { columns: usize, cells: Vec<MetadataCell> },
    Title { text: String, align: Align },
    ParameterTable(ParameterTable),
    Notes { text: String },
    Signature(SignaturePlan),
}

/// A block with its position on the page.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PlacedBlock {
    pub region: Region,
    pub rect: Rect,
    /// Hidden blocks keep their space but do not paint
    pub visible: bool,
    pub block: Block,
}

/// Output of the layout model. All lengths are millimetres.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RenderPlan {
    pub mode: RenderMode,
    pub page: Rect,
    pub header_band: Rect,
    pub content_band: Rect,
    /// Content band minus padding
    pub content_area: Rect,
    pub footer_band: Rect,
    pub blocks: Vec<PlacedBlock>,
    pub styling: Styling,
    pub lab_name: Option<String>,
    /// False when rows could not be compressed enough to fit the page
    pub fits_single_page: bool,
    /// Rows whose value or range could not be read
    pub indeterminate_rows: usize,
}

impl RenderPlan {
    /// Export to JSON for a rasterizer.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    pub fn blocks_in(&self, region: Region) -> impl Iterator<Item = &PlacedBlock> {
        self.blocks.iter().filter(move |b| b.region == region)
    }

    pub fn header_block(&self) -> Option<&PlacedBlock> {
        self.blocks_in(Region::Header).next()
    }

    pub fn footer_block(&self) -> Option<&PlacedBlock> {
        self.blocks_in(Region::Footer).next()
    }

    pub fn table(&self) -> Option<&ParameterTable> {
        self.blocks.iter().find_map(|b| match &b.block {
            Block::ParameterTable(table) => Some(table),
            _ => None,
        })
    }

    pub fn title(&self) -> Option<&str> {
        self.blocks.iter().find_map(|b| match &b.block {
            Block::Title { text, .. } => Some(text.as_str()),
            _ => None,
        })
    }

    pub fn signature(&self) -> Option<&PlacedBlock> {
        self.blocks
            .iter()
            .find(|b| matches!(b.block, Block::Signature(_)))
    }

    /// Value of a metadata grid cell by label.
    pub fn metadata_value(&self, label: &str) -> Option<&str> {
        self.blocks.iter().find_map(|b| match &b.block {
            Block::MetadataGrid { cells, .. } => cells
                .iter()
                .find(|cell| cell.label == label)
                .map(|cell| cell.value.as_str()),
            _ => None,
        })
    }
}
