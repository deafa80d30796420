//! Stateless adapter for the external 2D charting capability.
//!
//! On every input change the payload is discarded and rebuilt wholesale;
//! the external capability owns its own redraw optimization, so no diffing
//! happens here.

use serde::Serialize;

use crate::data::CellValue;
use crate::error::ChartResult;
use crate::model::{
    border_colors, fill_colors, ChartKind, ChartModel, ChartSpec, ColorAssignment, BORDER_WIDTH,
};

/// Renderer-ready payload handed to the external 2D charting capability.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Chart2dPayload {
    pub kind: ChartKind,
    pub title: String,
    pub labels: Vec<String>,
    pub datasets: Vec<Dataset2d>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Dataset2d {
    pub label: String,
    pub data: Vec<CellValue>,
    pub background_color: ColorAssignment,
    pub border_color: ColorAssignment,
    pub border_width: f64,
}

/// Contract implemented by the external 2D charting capability.
///
/// Backends receive a fully materialized payload so drawing remains
/// isolated from chart domain logic.
pub trait Chart2dBackend {
    fn draw(&mut self, payload: &Chart2dPayload) -> ChartResult<()>;
}

/// Builds the payload for a ready chart model.
///
/// Placeholder models yield `None`; no backend is ever invoked for them.
#[must_use]
pub fn build_payload(model: &ChartModel, spec: &ChartSpec) -> Option<Chart2dPayload> {
    let data = model.data()?;
    let len = data.values.len();
    Some(Chart2dPayload {
        kind: spec.kind,
        title: spec.title.clone(),
        labels: data.labels.clone(),
        datasets: vec![Dataset2d {
            label: data.series_label.clone(),
            data: data.values.clone(),
            background_color: fill_colors(spec.kind, len),
            border_color: border_colors(spec.kind, len),
            border_width: BORDER_WIDTH,
        }],
    })
}

/// Rebuilds the payload and delegates drawing to the backend.
///
/// Returns whether a draw happened; placeholders draw nothing.
pub fn render_2d<B: Chart2dBackend>(
    backend: &mut B,
    model: &ChartModel,
    spec: &ChartSpec,
) -> ChartResult<bool> {
    let Some(payload) = build_payload(model, spec) else {
        return Ok(false);
    };
    backend.draw(&payload)?;
    Ok(true)
}

/// Recording backend used by tests and headless hosts.
#[derive(Debug, Default)]
pub struct RecordingBackend {
    pub draw_count: usize,
    pub last_payload: Option<Chart2dPayload>,
}

impl Chart2dBackend for RecordingBackend {
    fn draw(&mut self, payload: &Chart2dPayload) -> ChartResult<()> {
        self.draw_count += 1;
        self.last_payload = Some(payload.clone());
        Ok(())
    }
}
