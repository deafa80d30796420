use crate::data::CellValue;

/// Hard cap on constructed bars regardless of dataset size.
pub const MAX_BARS: usize = 50;
/// World-unit height of the tallest bar.
pub const HEIGHT_SCALE: f64 = 10.0;
/// Square footprint of every bar in world units.
pub const BAR_FOOTPRINT: f64 = 0.5;
/// Center-to-center spacing along the data axis in world units.
pub const BAR_SPACING: f64 = 0.8;

/// Placement of one bar, computed before any mesh or resource allocation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BarLayout {
    pub index: usize,
    pub normalized_height: f64,
    /// Bar center along the data axis; the whole row is centered around the
    /// origin.
    pub offset: f64,
}

/// Computes bar placements for one (x, y) configuration.
///
/// `n = min(|x|, |y|, MAX_BARS)`; heights normalize the numeric maximum of
/// the y series to `HEIGHT_SCALE`, with non-numeric entries treated as zero.
/// A y series with no numeric entries yields an empty layout so no
/// degenerate geometry is ever constructed; an all-zero series yields flat
/// bars instead of dividing by zero.
#[must_use]
pub fn layout_bars(x_data: &[CellValue], y_data: &[CellValue]) -> Vec<BarLayout> {
    let count = x_data.len().min(y_data.len()).min(MAX_BARS);
    let Some(max_y) = max_numeric(y_data) else {
        return Vec::new();
    };

    (0..count)
        .map(|index| {
            let value = y_data[index].as_number().unwrap_or(0.0);
            let normalized_height = if max_y == 0.0 {
                0.0
            } else {
                (value / max_y) * HEIGHT_SCALE
            };
            BarLayout {
                index,
                normalized_height,
                offset: (index as f64 - count as f64 / 2.0) * BAR_SPACING,
            }
        })
        .collect()
}

fn max_numeric(values: &[CellValue]) -> Option<f64> {
    values
        .iter()
        .filter_map(CellValue::as_number)
        .filter(|value| value.is_finite())
        .fold(None, |max, value| {
            Some(max.map_or(value, |current: f64| current.max(value)))
        })
}
