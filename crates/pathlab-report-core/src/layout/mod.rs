//! Fixed-page report layout model.
//!
//! Turns a [`ReportDocument`] into a [`RenderPlan`]: a single A4 page split
//! into a header band, a content band and a footer band.
//!
//! ```text
//! ┌──────────────────────────────┐  y = 0
//! │ header band (always reserved)│  35 mm screen / 25 mm print
//! ├──────────────────────────────┤
//! │  divider                     │
//! │  metadata grid (2 columns)   │
//! │        test title            │  content band, 5 mm padding
//! │  parameter table             │
//! │  notes                       │
//! │              signature block │
//! ├──────────────────────────────┤
//! │ footer band (always reserved)│  30 mm
//! └──────────────────────────────┘  y = 297
//! ```
//!
//! Band visibility never moves the content band. Hidden bands keep their
//! block with `visible = false`.

mod config;
mod geometry;
mod plan;
pub mod table;

pub use config::*;
pub use geometry::*;
pub use plan::*;

use crate::classifier::Classifier;
use crate::models::{BandBlock, ReportDocument};

const FIT_EPSILON: f64 = 1e-6;

/// Lay out a document with the default configuration.
pub fn layout(document: &ReportDocument, mode: RenderMode) -> RenderPlan {
    layout_with(document, mode, &LayoutConfig::default())
}

/// Lay out a document with an explicit configuration.
pub fn layout_with(document: &ReportDocument, mode: RenderMode, config: &LayoutConfig) -> RenderPlan {
    LayoutEngine::new(config).layout(document, mode)
}

/// Layout engine bound to a configuration and a classifier.
pub struct LayoutEngine<'a> {
    config: &'a LayoutConfig,
    classifier: &'a Classifier,
}

impl<'a> LayoutEngine<'a> {
    /// Create an engine using the shared classifier.
    pub fn new(config: &'a LayoutConfig) -> Self {
        Self {
            config,
            classifier: Classifier::shared(),
        }
    }

    /// Use a specific classifier for row flags.
    pub fn with_classifier(mut self, classifier: &'a Classifier) -> Self {
        self.classifier = classifier;
        self
    }

    /// Compute the plan. Never fails; missing data degrades to placeholders.
    pub fn layout(&self, document: &ReportDocument, mode: RenderMode) -> RenderPlan {
        let config = self.config;
        let bands = PageBands::split(
            config.page_width_mm,
            config.page_height_mm,
            config.header_height(mode),
            config.footer_height(mode),
        );
        let area = bands.content.inset(config.content_padding_mm);
        let styling = config.styling.merged(&document.styling);

        let mut blocks = Vec::new();

        blocks.push(self.band(
            Region::Header,
            bands.header,
            &document.header,
            &config.placeholders.header,
        ));

        let mut cursor = area.y;

        blocks.push(PlacedBlock {
            region: Region::Content,
            rect: Rect::new(area.x, cursor, area.width, config.divider_thickness_mm),
            visible: true,
            block: Block::Divider {
                thickness: config.divider_thickness_mm,
                color: styling.primary_color.clone(),
            },
        });
        cursor += config.divider_thickness_mm + config.block_gap_mm;

        if !document.patient.is_empty() {
            let grid = self.metadata_grid(document, area, cursor);
            cursor = grid.rect.bottom() + config.block_gap_mm;
            blocks.push(grid);
        }

        if !document.test_name.trim().is_empty() {
            blocks.push(PlacedBlock {
                region: Region::Content,
                rect: Rect::new(area.x, cursor, area.width, config.title_mm),
                visible: true,
                block: Block::Title {
                    text: document.test_name.trim().to_string(),
                    align: Align::Center,
                },
            });
            cursor += config.title_mm + config.block_gap_mm;
        }

        // Space left for table rows, above the notes and the pinned signature
        let notes = document
            .notes
            .as_deref()
            .map(str::trim)
            .filter(|text| !text.is_empty());
        let signature_reserve = if document.signature.show {
            config.signature_height_mm + config.block_gap_mm
        } else {
            0.0
        };
        let notes_reserve = if notes.is_some() {
            config.notes_mm + config.block_gap_mm
        } else {
            0.0
        };
        let body_top = cursor + config.table_header_row_mm;
        let available = area.bottom() - signature_reserve - notes_reserve - body_top;

        let row_count = document.parameter_rows.len().max(1);
        let (row_height, fits_single_page) = fit_rows(config, row_count, available);

        let table_rows = table::rows(
            self.classifier,
            config,
            &document.parameter_rows,
            document.patient_sex,
            Rect::new(area.x, body_top, area.width, 0.0),
            row_height,
        );
        let indeterminate_rows = table_rows
            .iter()
            .filter_map(TableRow::result)
            .filter(|row| row.indeterminate)
            .count();

        let table_rect = Rect::new(
            area.x,
            cursor,
            area.width,
            config.table_header_row_mm + row_count as f64 * row_height,
        );
        blocks.push(PlacedBlock {
            region: Region::Content,
            rect: table_rect,
            visible: true,
            block: Block::ParameterTable(ParameterTable {
                columns: table::columns(config, area.x, area.width),
                header_rect: Rect::new(area.x, cursor, area.width, config.table_header_row_mm),
                row_height,
                rows: table_rows,
            }),
        });
        cursor = table_rect.bottom() + config.block_gap_mm;

        if let Some(text) = notes {
            blocks.push(PlacedBlock {
                region: Region::Content,
                rect: Rect::new(area.x, cursor, area.width, config.notes_mm),
                visible: true,
                block: Block::Notes {
                    text: text.to_string(),
                },
            });
        }

        if document.signature.show {
            blocks.push(self.signature(document, area));
        }

        blocks.push(self.band(
            Region::Footer,
            bands.footer,
            &document.footer,
            &config.placeholders.footer,
        ));

        if indeterminate_rows > 0 {
            tracing::warn!(
                test = %document.test_name,
                rows = indeterminate_rows,
                "Rows with unreadable value or reference range shown as unflagged"
            );
        }
        if !fits_single_page {
            tracing::warn!(
                test = %document.test_name,
                rows = document.parameter_rows.len(),
                row_height,
                available,
                "Parameter table does not fit on a single page"
            );
        }
        tracing::debug!(
            ?mode,
            rows = document.parameter_rows.len(),
            row_height,
            content_top = bands.content.y,
            "Report laid out"
        );

        RenderPlan {
            mode,
            page: bands.page,
            header_band: bands.header,
            content_band: bands.content,
            content_area: area,
            footer_band: bands.footer,
            blocks,
            styling,
            lab_name: document.lab_name.clone(),
            fits_single_page,
            indeterminate_rows,
        }
    }

    /// Header/footer: image or placeholder filling the whole reserved band.
    fn band(&self, region: Region, rect: Rect, band: &BandBlock, placeholder: &str) -> PlacedBlock {
        let block = match band.image() {
            Some(source) => Block::Image {
                source: source.to_string(),
            },
            None => Block::Placeholder {
                message: placeholder.to_string(),
            },
        };
        PlacedBlock {
            region,
            rect,
            visible: band.show,
            block,
        }
    }

    fn metadata_grid(&self, document: &ReportDocument, area: Rect, top: f64) -> PlacedBlock {
        const COLUMNS: usize = 2;
        let row_height = self.config.metadata_row_mm;
        let cell_width = area.width / COLUMNS as f64;

        let cells: Vec<MetadataCell> = document
            .patient
            .iter()
            .enumerate()
            .map(|(index, field)| {
                let column = index % COLUMNS;
                let row = index / COLUMNS;
                MetadataCell {
                    label: field.label.clone(),
                    value: field.value.clone(),
                    rect: Rect::new(
                        area.x + column as f64 * cell_width,
                        top + row as f64 * row_height,
                        cell_width,
                        row_height,
                    ),
                }
            })
            .collect();

        let rows = document.patient.len().div_ceil(COLUMNS);
        PlacedBlock {
            region: Region::Content,
            rect: Rect::new(area.x, top, area.width, rows as f64 * row_height),
            visible: true,
            block: Block::MetadataGrid {
                columns: COLUMNS,
                cells,
            },
        }
    }

    /// Right-aligned, pinned to the bottom of the content area.
    fn signature(&self, document: &ReportDocument, area: Rect) -> PlacedBlock {
        let width = self.config.signature_width_mm.min(area.width);
        let height = self.config.signature_height_mm.min(area.height);
        let signature = &document.signature;
        let image = signature
            .image
            .as_deref()
            .filter(|src| !src.trim().is_empty())
            .map(str::to_string);

        PlacedBlock {
            region: Region::Content,
            rect: Rect::new(area.right() - width, area.bottom() - height, width, height),
            visible: true,
            block: Block::Signature(SignaturePlan {
                signing_line: image.is_none(),
                image,
                verified_by: signature.verified_by.clone(),
                designation: signature.designation.clone(),
                align: Align::Right,
            }),
        }
    }
}

/// Pick a row height that fits `available`, compressing down to the configured minimum.
fn fit_rows(config: &LayoutConfig, row_count: usize, available: f64) -> (f64, bool) {
    let rows = row_count as f64;
    let natural = config.table_row_mm;
    if rows * natural <= available + FIT_EPSILON {
        return (natural, true);
    }

    let compressed = (available / rows).max(config.min_table_row_mm).min(natural);
    (compressed, rows * compressed <= available + FIT_EPSILON)
}
