//! Layout tests: fixed bands, placeholders and end-to-end flagging.

use pathlab_report_core::backend::assemble_from_json;
use pathlab_report_core::layout::{layout, Block, RenderMode, RenderPlan, RowContent};
use pathlab_report_core::models::{DisplayToggles, ParameterRow, ReportDocument, Sex};

const RECORD_JSON: &str = r#"{
    "patientInfo": {"name": "Ravi Kumar", "age": 42, "gender": "M", "patientId": "P-1042"},
    "testInfo": {"testName": "Complete Blood Count", "sampleType": "Whole blood (EDTA)",
                 "collectedAt": "2024-03-05T08:30:00Z"},
    "results": [
        {"parameter": "Hemoglobin", "value": "19", "unit": "g/dL",
         "referenceRange": "M: 13.5-18.0; F: 11.5-16.4"},
        {"parameter": "Total WBC", "value": 7400, "unit": "/uL",
         "referenceRange": "4,000-11,000"},
        {"parameter": "ESR", "value": "12", "unit": "mm/hr",
         "referenceRange": "Up to 20", "flag": "H"}
    ],
    "notes": "Sample received in good condition."
}"#;

const SETTINGS_JSON: &str = r##"{
    "header": {"headerImage": "https://cdn.example/sunrise/header.png", "labName": "Sunrise Diagnostics"},
    "footer": {"verifiedBy": "Dr. Meera Iyer", "designation": "MD Pathology"},
    "styling": {"primaryColor": "#0f766e"}
}"##;

fn plan_for(toggles: DisplayToggles, mode: RenderMode) -> RenderPlan {
    let document = assemble_from_json(RECORD_JSON, SETTINGS_JSON, toggles).unwrap();
    layout(&document, mode)
}

#[test]
fn test_content_top_ignores_header_visibility() {
    for mode in [RenderMode::Screen, RenderMode::Print] {
        let shown = plan_for(DisplayToggles::default(), mode);
        let hidden = plan_for(
            DisplayToggles {
                show_header: false,
                show_footer: false,
                show_signature: true,
            },
            mode,
        );

        assert_eq!(shown.content_band, hidden.content_band, "{:?}", mode);
        assert_eq!(shown.footer_band, hidden.footer_band, "{:?}", mode);

        let header = hidden.header_block().unwrap();
        assert!(!header.visible);
        assert_eq!(header.rect, hidden.header_band);
    }
}

#[test]
fn test_band_heights_per_mode() {
    let screen = plan_for(DisplayToggles::default(), RenderMode::Screen);
    let print = plan_for(DisplayToggles::default(), RenderMode::Print);

    assert_eq!(screen.header_band.height, 35.0);
    assert_eq!(print.header_band.height, 25.0);
    assert_eq!(screen.footer_band.height, 30.0);
    assert_eq!(print.footer_band.height, 30.0);
    assert_eq!(screen.footer_band.bottom(), 297.0);
    assert_eq!(screen.page.width, 210.0);
}

#[test]
fn test_empty_table_placeholder_spans_all_columns() {
    let plan = layout(&ReportDocument::new("Lipid Profile"), RenderMode::Screen);
    let table = plan.table().unwrap();

    assert_eq!(table.columns.len(), 4);
    assert_eq!(table.rows.len(), 1);
    match &table.rows[0].content {
        RowContent::Placeholder { text, column_span } => {
            assert_eq!(*column_span, 4);
            assert_eq!(text, "No parameters available");
        }
        other => panic!("expected placeholder row, got {:?}", other),
    }
}

#[test]
fn test_missing_header_image_placeholder_fills_band() {
    let document = ReportDocument::new("Lipid Profile");

    for (mode, height) in [(RenderMode::Screen, 35.0), (RenderMode::Print, 25.0)] {
        let plan = layout(&document, mode);
        let header = plan.header_block().unwrap();

        assert!(matches!(header.block, Block::Placeholder { .. }));
        assert_eq!(header.rect.height, height);
        assert_eq!(header.rect.height, plan.header_band.height);

        let footer = plan.footer_block().unwrap();
        assert!(matches!(footer.block, Block::Placeholder { .. }));
        assert_eq!(footer.rect.height, 30.0);
    }
}

#[test]
fn test_hemoglobin_end_to_end() {
    let plan = plan_for(DisplayToggles::default(), RenderMode::Screen);
    let table = plan.table().unwrap();

    let hemoglobin = table.rows[0].result().unwrap();
    assert_eq!(hemoglobin.name, "Hemoglobin");
    assert!(hemoglobin.abnormal);
    assert!(hemoglobin.result_style.bold);
    assert!(hemoglobin.result_style.background.is_some());

    let wbc = table.rows[1].result().unwrap();
    assert!(!wbc.abnormal);
    assert!(!wbc.result_style.bold);
    assert_eq!(wbc.result_style.background, None);

    // Upstream flag wins over the classifier
    let esr = table.rows[2].result().unwrap();
    assert!(esr.abnormal);
}

#[test]
fn test_same_document_female_is_normal() {
    let mut document = ReportDocument::new("Hemogram");
    document.patient_sex = Sex::Female;
    document.parameter_rows = vec![ParameterRow::new("Hemoglobin", "12.1", "g/dL", "M: 13.5-18.0; F: 11.5-16.4")];

    let plan = layout(&document, RenderMode::Print);
    let row = plan.table().unwrap().rows[0].result().unwrap().clone();
    assert!(!row.abnormal);
    assert_eq!(plan.indeterminate_rows, 0);
}

#[test]
fn test_plan_metadata_and_signature() {
    let plan = plan_for(DisplayToggles::default(), RenderMode::Screen);

    assert_eq!(plan.title(), Some("Complete Blood Count"));
    assert_eq!(plan.metadata_value("Patient Name"), Some("Ravi Kumar"));
    assert_eq!(plan.metadata_value("Referred By"), Some("-"));
    assert_eq!(plan.lab_name.as_deref(), Some("Sunrise Diagnostics"));
    assert_eq!(plan.styling.primary_color, "#0f766e");

    let signature = plan.signature().unwrap();
    match &signature.block {
        Block::Signature(sig) => {
            assert!(sig.signing_line);
            assert_eq!(sig.designation.as_deref(), Some("MD Pathology"));
        }
        other => panic!("expected signature, got {:?}", other),
    }
}

#[test]
fn test_plan_json() {
    let plan = plan_for(DisplayToggles::default(), RenderMode::Print);
    let json = plan.to_json().unwrap();

    assert!(json.contains("\"mode\": \"print\""));
    assert!(json.contains("https://cdn.example/sunrise/header.png"));
    assert!(json.contains("Hemoglobin"));
}
