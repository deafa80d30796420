use tabchart::chart2d::{build_payload, render_2d, RecordingBackend};
use tabchart::data::{CellValue, Column, ColumnSet};
use tabchart::model::{
    build_chart_model, ChartKind, ChartSpec, ColorAssignment, CATEGORICAL_PALETTE,
};

fn columns_with_rows(rows: usize) -> ColumnSet {
    let labels = (0..rows)
        .map(|i| CellValue::Text(format!("cat-{i}")))
        .collect();
    let values = (0..rows).map(|i| CellValue::Number(i as f64)).collect();
    ColumnSet::from_columns([Column::new("Category", labels), Column::new("Count", values)])
}

fn ready_payload(kind: ChartKind, rows: usize) -> tabchart::chart2d::Chart2dPayload {
    let columns = columns_with_rows(rows);
    let spec = ChartSpec::new("Category", "Count", kind, "Counts");
    let model = build_chart_model(&columns, &spec);
    build_payload(&model, &spec).expect("ready model should yield a payload")
}

#[test]
fn non_pie_kinds_use_one_uniform_series_color() {
    for kind in [ChartKind::Bar, ChartKind::Line, ChartKind::Scatter] {
        let payload = ready_payload(kind, 4);
        assert_eq!(payload.datasets.len(), 1);
        let dataset = &payload.datasets[0];
        assert_eq!(dataset.label, "Count");
        assert_eq!(dataset.border_width, 2.0);
        assert!(matches!(dataset.background_color, ColorAssignment::Uniform(_)));
        assert!(matches!(dataset.border_color, ColorAssignment::Uniform(_)));
    }
}

#[test]
fn pie_cycles_the_six_color_palette_past_its_length() {
    let payload = ready_payload(ChartKind::Pie, 8);
    let dataset = &payload.datasets[0];
    let ColorAssignment::Cycled(fills) = &dataset.background_color else {
        panic!("pie fills should be per-slice");
    };
    assert_eq!(fills.len(), 8);
    // Slice 6 wraps back to the first palette entry.
    assert_eq!(fills[6], CATEGORICAL_PALETTE[0].with_alpha(0.8));
    assert_eq!(fills[7], CATEGORICAL_PALETTE[1].with_alpha(0.8));

    let ColorAssignment::Cycled(borders) = &dataset.border_color else {
        panic!("pie borders should be per-slice");
    };
    assert_eq!(borders[6], CATEGORICAL_PALETTE[0]);
}

#[test]
fn payload_serializes_colors_as_css_strings() {
    let payload = ready_payload(ChartKind::Bar, 2);
    let json = serde_json::to_value(&payload).expect("payload serializes");

    assert_eq!(json["kind"], "bar");
    assert_eq!(json["title"], "Counts");
    assert_eq!(json["labels"][0], "cat-0");
    let dataset = &json["datasets"][0];
    assert_eq!(dataset["backgroundColor"], "rgba(59, 130, 246, 0.8)");
    assert_eq!(dataset["borderColor"], "rgba(59, 130, 246, 1)");
    assert_eq!(dataset["borderWidth"], 2.0);
}

#[test]
fn placeholder_models_never_reach_the_backend() {
    let columns = columns_with_rows(3);
    let spec = ChartSpec::new("", "", ChartKind::Bar, "Chart");
    let model = build_chart_model(&columns, &spec);

    let mut backend = RecordingBackend::default();
    let drew = render_2d(&mut backend, &model, &spec).expect("render never errors here");
    assert!(!drew);
    assert_eq!(backend.draw_count, 0);
    assert!(backend.last_payload.is_none());
}

#[test]
fn every_input_change_rebuilds_the_payload_wholesale() {
    let columns = columns_with_rows(3);
    let mut backend = RecordingBackend::default();

    let bar_spec = ChartSpec::new("Category", "Count", ChartKind::Bar, "Counts");
    let model = build_chart_model(&columns, &bar_spec);
    assert!(render_2d(&mut backend, &model, &bar_spec).expect("draw"));

    let pie_spec = ChartSpec::new("Category", "Count", ChartKind::Pie, "Counts");
    let model = build_chart_model(&columns, &pie_spec);
    assert!(render_2d(&mut backend, &model, &pie_spec).expect("draw"));

    assert_eq!(backend.draw_count, 2);
    let latest = backend.last_payload.expect("payload recorded");
    assert_eq!(latest.kind, ChartKind::Pie);
    assert!(matches!(
        latest.datasets[0].background_color,
        ColorAssignment::Cycled(_)
    ));
}
