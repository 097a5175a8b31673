//! Parameter table construction. The only place layout consults the classifier.

use super::config::LayoutConfig;
use super::geometry::Rect;
use super::plan::{CellStyle, FlagSource, ResultRow, RowContent, TableColumn, TableRow};
use crate::classifier::Classifier;
use crate::models::{ParameterRow, Sex};

const HEADINGS: [&str; 4] = ["Test", "Result", "Unit", "Reference Range"];

/// Lay out the four fixed columns across `width`, starting at `x`.
pub fn columns(config: &LayoutConfig, x: f64, width: f64) -> Vec<TableColumn> {
    let mut cursor = x;
    HEADINGS
        .iter()
        .zip(config.columns.as_array())
        .map(|(heading, fraction)| {
            let column = TableColumn {
                heading: (*heading).to_string(),
                width_fraction: fraction,
                x: cursor,
                width: width * fraction,
            };
            cursor += column.width;
            column
        })
        .collect()
}

/// Flag and style a single parameter row.
pub fn result_row(
    classifier: &Classifier,
    config: &LayoutConfig,
    row: &ParameterRow,
    sex: Sex,
) -> ResultRow {
    let assessment = classifier.assess(&row.value, &row.reference_range, sex);

    let (abnormal, deviation, flag_source) = match row.flag {
        Some(flag) => (
            flag.is_abnormal(),
            flag.deviation().or(assessment.deviation),
            FlagSource::Upstream,
        ),
        None => (
            assessment.classification.is_abnormal(),
            assessment.deviation,
            FlagSource::Classifier,
        ),
    };

    let result_style = if abnormal {
        CellStyle {
            bold: true,
            background: Some(config.abnormal_fill.clone()),
        }
    } else {
        CellStyle::default()
    };

    let value = if row.value.is_blank() {
        config.placeholders.empty_value.clone()
    } else {
        row.value.to_string()
    };

    ResultRow {
        name: row.name.clone(),
        value,
        unit: row.unit.clone(),
        reference_range: row.reference_range.to_string(),
        abnormal,
        deviation: if abnormal { deviation } else { None },
        indeterminate: flag_source == FlagSource::Classifier && assessment.is_indeterminate(),
        flag_source,
        result_style,
    }
}

/// Build table rows from the top-left of `body`, each `row_height` tall.
///
/// Only `body.x`, `body.y` and `body.width` are used. An empty input yields
/// a single placeholder spanning all columns.
pub fn rows(
    classifier: &Classifier,
    config: &LayoutConfig,
    parameter_rows: &[ParameterRow],
    sex: Sex,
    body: Rect,
    row_height: f64,
) -> Vec<TableRow> {
    if parameter_rows.is_empty() {
        return vec![TableRow {
            rect: Rect::new(body.x, body.y, body.width, row_height),
            content: RowContent::Placeholder {
                text: config.placeholders.empty_table.clone(),
                column_span: HEADINGS.len(),
            },
        }];
    }

    parameter_rows
        .iter()
        .enumerate()
        .map(|(index, row)| TableRow {
            rect: Rect::new(
                body.x,
                body.y + index as f64 * row_height,
                body.width,
                row_height,
            ),
            content: RowContent::Result(result_row(classifier, config, row, sex)),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Deviation, MeasuredValue, ResultFlag};

    fn body() -> Rect {
        Rect::new(5.0, 100.0, 200.0, 0.0)
    }

    #[test]
    fn test_columns_follow_fractions() {
        let config = LayoutConfig::default();
        let cols = columns(&config, 5.0, 200.0);

        assert_eq!(cols.len(), 4);
        assert_eq!(cols[0].heading, "Test");
        assert!((cols[0].width - 80.0).abs() < 1e-9);
        assert!((cols[1].x - 85.0).abs() < 1e-9);
        assert!((cols[1].width - 30.0).abs() < 1e-9);
        assert!((cols[2].width - 20.0).abs() < 1e-9);
        assert!((cols[3].width - 70.0).abs() < 1e-9);
        assert!((cols[3].x + cols[3].width - 205.0).abs() < 1e-9);
    }

    #[test]
    fn test_abnormal_row_is_bold_and_shaded() {
        let config = LayoutConfig::default();
        let row = ParameterRow::new("Hemoglobin", "19", "g/dL", "M: 13.5-18.0; F: 11.5-16.4");

        let result = result_row(Classifier::shared(), &config, &row, Sex::Male);

        assert!(result.abnormal);
        assert_eq!(result.deviation, Some(Deviation::High));
        assert!(result.result_style.bold);
        assert_eq!(result.result_style.background, Some(config.abnormal_fill.clone()));
        assert_eq!(result.flag_source, FlagSource::Classifier);
    }

    #[test]
    fn test_upstream_flag_wins() {
        let config = LayoutConfig::default();
        let mut row = ParameterRow::new("Glucose", 90.0, "mg/dL", "70-110");
        row.flag = Some(ResultFlag::Abnormal);

        let result = result_row(Classifier::shared(), &config, &row, Sex::Unspecified);

        assert!(result.abnormal);
        assert_eq!(result.flag_source, FlagSource::Upstream);
        assert!(result.result_style.bold);
        // Classifier said normal, so no direction
        assert_eq!(result.deviation, None);
    }

    #[test]
    fn test_upstream_direction_is_kept() {
        let config = LayoutConfig::default();
        let mut high = ParameterRow::new("ESR", "12", "mm/hr", "Up to 20");
        high.flag = Some(ResultFlag::High);
        let mut low = ParameterRow::new("Potassium", "3", "mmol/L", "See note");
        low.flag = Some(ResultFlag::Low);

        let high = result_row(Classifier::shared(), &config, &high, Sex::Male);
        let low = result_row(Classifier::shared(), &config, &low, Sex::Male);

        assert_eq!(high.deviation, Some(Deviation::High));
        assert_eq!(low.deviation, Some(Deviation::Low));
        assert!(!low.indeterminate);
    }

    #[test]
    fn test_upstream_normal_clears_classifier_direction() {
        let config = LayoutConfig::default();
        let mut row = ParameterRow::new("Glucose", 150.0, "mg/dL", "70-110");
        row.flag = Some(ResultFlag::Normal);

        let result = result_row(Classifier::shared(), &config, &row, Sex::Male);

        assert!(!result.abnormal);
        assert_eq!(result.deviation, None);
    }

    #[test]
    fn test_unreadable_row_is_unflagged_but_marked() {
        let config = LayoutConfig::default();
        let row = ParameterRow::new("HIV I & II", "Non-reactive", "", "Non-reactive");

        let result = result_row(Classifier::shared(), &config, &row, Sex::Female);

        assert!(!result.abnormal);
        assert!(result.indeterminate);
        assert_eq!(result.result_style, CellStyle::default());
    }

    #[test]
    fn test_blank_value_shows_dash() {
        let config = LayoutConfig::default();
        let row = ParameterRow {
            value: MeasuredValue::default(),
            ..ParameterRow::new("ESR", "", "mm/hr", "0-20")
        };

        let result = result_row(Classifier::shared(), &config, &row, Sex::Male);
        assert_eq!(result.value, "-");
    }

    #[test]
    fn test_empty_rows_placeholder() {
        let config = LayoutConfig::default();
        let built = rows(Classifier::shared(), &config, &[], Sex::Male, body(), 7.0);

        assert_eq!(built.len(), 1);
        assert_eq!(
            built[0].content,
            RowContent::Placeholder {
                text: "No parameters available".into(),
                column_span: 4,
            }
        );
    }

    #[test]
    fn test_rows_stack_downwards() {
        let config = LayoutConfig::default();
        let params = vec![
            ParameterRow::new("WBC", 7.2, "10^3/uL", "4-11"),
            ParameterRow::new("RBC", 4.9, "10^6/uL", "4.5-5.9"),
        ];
        let built = rows(Classifier::shared(), &config, &params, Sex::Male, body(), 7.0);

        assert_eq!(built.len(), 2);
        assert_eq!(built[0].rect.y, 100.0);
        assert_eq!(built[1].rect.y, 107.0);
        assert_eq!(built[1].result().unwrap().name, "RBC");
    }
}
