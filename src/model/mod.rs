//! Chart model builder: pure mapping from (columns, chart spec) to the data
//! a renderer consumes, plus the fixed color-assignment policy.

use serde::{Deserialize, Serialize};

use crate::data::{CellValue, ColumnSet};
use crate::render::Color;

/// Closed set of chart kinds, with wire tags matching the upload store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChartKind {
    #[default]
    Bar,
    Line,
    Scatter,
    Pie,
    #[serde(rename = "3d_column")]
    Bar3d,
}

impl ChartKind {
    /// Parses a wire tag; unknown tags fall back to `Bar`.
    #[must_use]
    pub fn parse(tag: &str) -> Self {
        match tag {
            "line" => Self::Line,
            "scatter" => Self::Scatter,
            "pie" => Self::Pie,
            "3d_column" => Self::Bar3d,
            _ => Self::Bar,
        }
    }

    #[must_use]
    pub const fn wire_tag(self) -> &'static str {
        match self {
            Self::Bar => "bar",
            Self::Line => "line",
            Self::Scatter => "scatter",
            Self::Pie => "pie",
            Self::Bar3d => "3d_column",
        }
    }

    /// Whether this kind is drawn by the 3D bar scene engine instead of the
    /// external 2D charting capability.
    #[must_use]
    pub const fn is_three_dimensional(self) -> bool {
        matches!(self, Self::Bar3d)
    }
}

/// The resolved (axes, kind, title) tuple driving one render pass.
///
/// Built fresh on every configuration change; never persisted by the core.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartSpec {
    pub x_axis: String,
    pub y_axis: String,
    pub kind: ChartKind,
    pub title: String,
}

impl ChartSpec {
    #[must_use]
    pub fn new(
        x_axis: impl Into<String>,
        y_axis: impl Into<String>,
        kind: ChartKind,
        title: impl Into<String>,
    ) -> Self {
        Self {
            x_axis: x_axis.into(),
            y_axis: y_axis.into(),
            kind,
            title: title.into(),
        }
    }

    #[must_use]
    pub fn has_axes(&self) -> bool {
        !self.x_axis.is_empty() && !self.y_axis.is_empty()
    }
}

/// Why a chart model could not be materialized.
///
/// Both states are user-correctable selections, not faults.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlaceholderReason {
    /// One or both axis selections are unset.
    AxesUnselected,
    /// A selected header does not exist in the upload.
    ColumnNotFound,
}

/// Labels and the single data series for one render pass.
#[derive(Debug, Clone, PartialEq)]
pub struct ChartData {
    pub labels: Vec<String>,
    pub series_label: String,
    pub values: Vec<CellValue>,
}

/// Output of the chart model builder: ready data or a placeholder state.
#[derive(Debug, Clone, PartialEq)]
pub enum ChartModel {
    Placeholder(PlaceholderReason),
    Ready(ChartData),
}

impl ChartModel {
    #[must_use]
    pub fn is_ready(&self) -> bool {
        matches!(self, Self::Ready(_))
    }

    #[must_use]
    pub fn data(&self) -> Option<&ChartData> {
        match self {
            Self::Ready(data) => Some(data),
            Self::Placeholder(_) => None,
        }
    }
}

/// Builds the chart model for one configuration.
///
/// Labels are the string-coerced x-column values in insertion order; the
/// series carries the raw y-column values. Unset axes and unknown headers
/// yield placeholders instead of errors.
#[must_use]
pub fn build_chart_model(columns: &ColumnSet, spec: &ChartSpec) -> ChartModel {
    if !spec.has_axes() {
        return ChartModel::Placeholder(PlaceholderReason::AxesUnselected);
    }
    let Some(x_column) = columns.get(&spec.x_axis) else {
        return ChartModel::Placeholder(PlaceholderReason::ColumnNotFound);
    };
    let Some(y_column) = columns.get(&spec.y_axis) else {
        return ChartModel::Placeholder(PlaceholderReason::ColumnNotFound);
    };

    ChartModel::Ready(ChartData {
        labels: x_column.values.iter().map(CellValue::coerce_label).collect(),
        series_label: spec.y_axis.clone(),
        values: y_column.values.clone(),
    })
}

/// Constant series color used by every non-categorical kind.
pub const SERIES_COLOR: Color = Color::from_rgb8(59, 130, 246);

/// Fixed 6-color palette cycled by index for categorical kinds.
///
/// Exact values are a visual-regression contract, not a styling option.
pub const CATEGORICAL_PALETTE: [Color; 6] = [
    Color::from_rgb8(59, 130, 246),
    Color::from_rgb8(16, 185, 129),
    Color::from_rgb8(249, 115, 22),
    Color::from_rgb8(236, 72, 153),
    Color::from_rgb8(168, 85, 247),
    Color::from_rgb8(234, 179, 8),
];

pub const FILL_ALPHA: f64 = 0.8;
pub const BORDER_WIDTH: f64 = 2.0;

/// Per-series color assignment handed to the 2D charting capability.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ColorAssignment {
    Uniform(Color),
    Cycled(Vec<Color>),
}

/// Fill colors: pie cycles the fixed palette by index, everything else is
/// the constant series color.
#[must_use]
pub fn fill_colors(kind: ChartKind, len: usize) -> ColorAssignment {
    match kind {
        ChartKind::Pie => ColorAssignment::Cycled(
            (0..len)
                .map(|i| CATEGORICAL_PALETTE[i % CATEGORICAL_PALETTE.len()].with_alpha(FILL_ALPHA))
                .collect(),
        ),
        _ => ColorAssignment::Uniform(SERIES_COLOR.with_alpha(FILL_ALPHA)),
    }
}

/// Border colors follow the fill assignment at full opacity.
#[must_use]
pub fn border_colors(kind: ChartKind, len: usize) -> ColorAssignment {
    match kind {
        ChartKind::Pie => ColorAssignment::Cycled(
            (0..len)
                .map(|i| CATEGORICAL_PALETTE[i % CATEGORICAL_PALETTE.len()])
                .collect(),
        ),
        _ => ColorAssignment::Uniform(SERIES_COLOR),
    }
}

#[cfg(test)]
mod tests {
    use super::ChartKind;

    #[test]
    fn unknown_kind_tags_fall_back_to_bar() {
        assert_eq!(ChartKind::parse("histogram"), ChartKind::Bar);
        assert_eq!(ChartKind::parse(""), ChartKind::Bar);
        assert_eq!(ChartKind::parse("3d_column"), ChartKind::Bar3d);
    }

    #[test]
    fn wire_tags_round_trip_through_serde() {
        for kind in [
            ChartKind::Bar,
            ChartKind::Line,
            ChartKind::Scatter,
            ChartKind::Pie,
            ChartKind::Bar3d,
        ] {
            let tag = serde_json::to_string(&kind).expect("serialize kind");
            assert_eq!(tag, format!("\"{}\"", kind.wire_tag()));
            let parsed: ChartKind = serde_json::from_str(&tag).expect("parse kind");
            assert_eq!(parsed, kind);
        }
    }
}
