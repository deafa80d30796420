//! Collaborator data model: upload aggregates as served by the upload store.
//!
//! The core only reads `columns` and the most recent `chart_configs` entry;
//! everything else is carried for wire parity with the backend.

use chrono::{DateTime, Utc};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::model::ChartKind;

/// One cell of an uploaded table: numeric, textual, or empty.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CellValue {
    Null,
    Number(f64),
    Text(String),
}

impl CellValue {
    #[must_use]
    pub fn as_number(&self) -> Option<f64> {
        match self {
            Self::Number(value) => Some(*value),
            _ => None,
        }
    }

    /// String coercion used for chart labels: integral numbers drop their
    /// fraction, empty cells render as `null`.
    #[must_use]
    pub fn coerce_label(&self) -> String {
        match self {
            Self::Null => "null".to_owned(),
            Self::Number(value) => format_label_number(*value),
            Self::Text(text) => text.clone(),
        }
    }
}

fn format_label_number(value: f64) -> String {
    if value.is_finite() && value.fract() == 0.0 && value.abs() < 1e15 {
        format!("{}", value as i64)
    } else {
        format!("{value}")
    }
}

/// A named column of an upload. Immutable after creation; value order is
/// the upload's row order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Column {
    pub header: String,
    pub values: Vec<CellValue>,
}

impl Column {
    #[must_use]
    pub fn new(header: impl Into<String>, values: Vec<CellValue>) -> Self {
        Self {
            header: header.into(),
            values,
        }
    }
}

/// Insertion-ordered column lookup by header.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ColumnSet {
    columns: IndexMap<String, Column>,
}

impl ColumnSet {
    #[must_use]
    pub fn from_columns(columns: impl IntoIterator<Item = Column>) -> Self {
        let columns = columns
            .into_iter()
            .map(|column| (column.header.clone(), column))
            .collect();
        Self { columns }
    }

    #[must_use]
    pub fn get(&self, header: &str) -> Option<&Column> {
        self.columns.get(header)
    }

    pub fn headers(&self) -> impl Iterator<Item = &str> {
        self.columns.keys().map(String::as_str)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.columns.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }
}

/// One persisted chart configuration entry.
///
/// Persistence itself belongs to the upload store; the core only reads the
/// latest entry to seed axis selection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartConfig {
    pub x_axis: String,
    pub y_axis: String,
    pub chart_type: ChartKind,
    #[serde(default = "default_chart_title")]
    pub title: String,
    pub created_at: DateTime<Utc>,
}

fn default_chart_title() -> String {
    "Chart".to_owned()
}

/// Upload aggregate as served by the upload store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Upload {
    pub id: String,
    pub user_id: String,
    pub filename: String,
    pub original_filename: String,
    pub file_size: u64,
    #[serde(default)]
    pub columns: Vec<Column>,
    #[serde(default)]
    pub row_count: u64,
    #[serde(default)]
    pub chart_configs: Vec<ChartConfig>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Upload {
    #[must_use]
    pub fn column_set(&self) -> ColumnSet {
        ColumnSet::from_columns(self.columns.iter().cloned())
    }

    #[must_use]
    pub fn latest_chart_config(&self) -> Option<&ChartConfig> {
        self.chart_configs.last()
    }

    /// Axis selection seeded from the most recent saved configuration,
    /// falling back to the first two column headers.
    #[must_use]
    pub fn initial_axis_selection(&self) -> Option<(String, String)> {
        if let Some(config) = self.latest_chart_config() {
            return Some((config.x_axis.clone(), config.y_axis.clone()));
        }
        if self.columns.len() >= 2 {
            return Some((
                self.columns[0].header.clone(),
                self.columns[1].header.clone(),
            ));
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::CellValue;

    #[test]
    fn cell_values_deserialize_untagged() {
        let values: Vec<CellValue> = serde_json::from_str(r#"[1.5, "north", null, 3]"#)
            .expect("cell values should parse");
        assert_eq!(
            values,
            vec![
                CellValue::Number(1.5),
                CellValue::Text("north".to_owned()),
                CellValue::Null,
                CellValue::Number(3.0),
            ]
        );
    }

    #[test]
    fn label_coercion_drops_integral_fractions() {
        assert_eq!(CellValue::Number(3.0).coerce_label(), "3");
        assert_eq!(CellValue::Number(3.25).coerce_label(), "3.25");
        assert_eq!(CellValue::Text("Q1".to_owned()).coerce_label(), "Q1");
        assert_eq!(CellValue::Null.coerce_label(), "null");
    }
}
