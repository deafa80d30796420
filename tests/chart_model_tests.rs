use tabchart::data::{CellValue, Column, ColumnSet, Upload};
use tabchart::model::{build_chart_model, ChartKind, ChartModel, ChartSpec, PlaceholderReason};

fn sample_columns() -> ColumnSet {
    ColumnSet::from_columns([
        Column::new(
            "Region",
            vec![
                CellValue::Text("North".to_owned()),
                CellValue::Text("South".to_owned()),
                CellValue::Null,
            ],
        ),
        Column::new(
            "Sales",
            vec![
                CellValue::Number(120.0),
                CellValue::Number(80.5),
                CellValue::Text("n/a".to_owned()),
            ],
        ),
        Column::new(
            "Year",
            vec![
                CellValue::Number(2023.0),
                CellValue::Number(2024.0),
                CellValue::Number(2025.0),
            ],
        ),
    ])
}

#[test]
fn ready_model_carries_coerced_labels_and_raw_values() {
    let columns = sample_columns();
    let spec = ChartSpec::new("Region", "Sales", ChartKind::Bar, "Sales by region");

    let model = build_chart_model(&columns, &spec);
    let data = model.data().expect("model should be ready");

    assert_eq!(data.labels, vec!["North", "South", "null"]);
    assert_eq!(data.series_label, "Sales");
    assert_eq!(
        data.values,
        vec![
            CellValue::Number(120.0),
            CellValue::Number(80.5),
            CellValue::Text("n/a".to_owned()),
        ]
    );
}

#[test]
fn numeric_x_column_coerces_integral_labels() {
    let columns = sample_columns();
    let spec = ChartSpec::new("Year", "Sales", ChartKind::Line, "Sales by year");

    let data = build_chart_model(&columns, &spec);
    let data = data.data().expect("model should be ready");
    assert_eq!(data.labels, vec!["2023", "2024", "2025"]);
}

#[test]
fn unset_axes_yield_an_axes_placeholder() {
    let columns = sample_columns();
    for (x, y) in [("", "Sales"), ("Region", ""), ("", "")] {
        let spec = ChartSpec::new(x, y, ChartKind::Bar, "Chart");
        assert_eq!(
            build_chart_model(&columns, &spec),
            ChartModel::Placeholder(PlaceholderReason::AxesUnselected)
        );
    }
}

#[test]
fn unknown_headers_yield_a_column_placeholder() {
    let columns = sample_columns();
    let spec = ChartSpec::new("Region", "Profit", ChartKind::Bar, "Chart");
    let model = build_chart_model(&columns, &spec);
    assert_eq!(
        model,
        ChartModel::Placeholder(PlaceholderReason::ColumnNotFound)
    );
    assert!(!model.is_ready());
    assert!(model.data().is_none());
}

#[test]
fn upload_deserializes_and_seeds_axes_from_latest_config() {
    let upload: Upload = serde_json::from_str(
        r#"{
            "id": "u-42",
            "user_id": "alice",
            "filename": "f8a1.xlsx",
            "original_filename": "sales.xlsx",
            "file_size": 2048,
            "columns": [
                {"header": "Region", "values": ["North", "South"]},
                {"header": "Sales", "values": [120, 80.5]}
            ],
            "row_count": 2,
            "chart_configs": [
                {
                    "x_axis": "Region",
                    "y_axis": "Sales",
                    "chart_type": "bar",
                    "created_at": "2025-01-01T00:00:00Z"
                },
                {
                    "x_axis": "Sales",
                    "y_axis": "Region",
                    "chart_type": "3d_column",
                    "title": "Inverted",
                    "created_at": "2025-02-01T00:00:00Z"
                }
            ],
            "created_at": "2025-01-01T00:00:00Z",
            "updated_at": "2025-02-01T00:00:00Z"
        }"#,
    )
    .expect("upload should parse");

    let config = upload.latest_chart_config().expect("config present");
    assert_eq!(config.chart_type, ChartKind::Bar3d);
    assert_eq!(config.title, "Inverted");
    assert_eq!(
        upload.initial_axis_selection(),
        Some(("Sales".to_owned(), "Region".to_owned()))
    );

    let columns = upload.column_set();
    assert_eq!(columns.len(), 2);
    assert_eq!(columns.headers().collect::<Vec<_>>(), vec!["Region", "Sales"]);
}

#[test]
fn upload_without_configs_seeds_axes_from_first_two_headers() {
    let upload: Upload = serde_json::from_str(
        r#"{
            "id": "u-7",
            "user_id": "bob",
            "filename": "a.xlsx",
            "original_filename": "a.xlsx",
            "file_size": 10,
            "columns": [
                {"header": "Month", "values": ["Jan"]},
                {"header": "Count", "values": [3]}
            ],
            "created_at": "2025-03-01T00:00:00Z",
            "updated_at": "2025-03-01T00:00:00Z"
        }"#,
    )
    .expect("upload should parse");

    assert_eq!(
        upload.initial_axis_selection(),
        Some(("Month".to_owned(), "Count".to_owned()))
    );

    let title_defaults: Upload = serde_json::from_str(
        r#"{
            "id": "u-8",
            "user_id": "bob",
            "filename": "b.xlsx",
            "original_filename": "b.xlsx",
            "file_size": 10,
            "columns": [{"header": "Only", "values": [1]}],
            "created_at": "2025-03-01T00:00:00Z",
            "updated_at": "2025-03-01T00:00:00Z"
        }"#,
    )
    .expect("upload should parse");
    assert_eq!(title_defaults.initial_axis_selection(), None);
}

#[test]
fn chart_config_title_defaults_when_absent() {
    let upload: Upload = serde_json::from_str(
        r#"{
            "id": "u-9",
            "user_id": "carol",
            "filename": "c.xlsx",
            "original_filename": "c.xlsx",
            "file_size": 10,
            "columns": [],
            "chart_configs": [
                {
                    "x_axis": "A",
                    "y_axis": "B",
                    "chart_type": "pie",
                    "created_at": "2025-04-01T00:00:00Z"
                }
            ],
            "created_at": "2025-04-01T00:00:00Z",
            "updated_at": "2025-04-01T00:00:00Z"
        }"#,
    )
    .expect("upload should parse");

    let config = upload.latest_chart_config().expect("config present");
    assert_eq!(config.title, "Chart");
    assert_eq!(config.chart_type, ChartKind::Pie);
}
