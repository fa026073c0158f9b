//! Line chart datasets built from aligned series.

use crate::{color::Rgb, series::AlignedSeries};
use serde::Serialize;

/// Line colors, assigned by request position and reused cyclically.
pub const PALETTE: [Rgb; 6] = [
    Rgb::from_hex(0x3366cc),
    Rgb::from_hex(0xdc3912),
    Rgb::from_hex(0xff9900),
    Rgb::from_hex(0x109618),
    Rgb::from_hex(0x990099),
    Rgb::from_hex(0x0099c6),
];

/// Curve smoothing passed through to the chart renderer.
pub const LINE_TENSION: f64 = 0.4;

/// Color for the series at `position` in the request.
pub fn palette_color(position: usize) -> Rgb {
    PALETTE[position % PALETTE.len()]
}

/// One drawable line: label, aligned values and styling.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartDataset {
    pub label: String,
    pub data: Vec<Option<f64>>,
    pub border_color: Rgb,
    pub fill: bool,
    pub tension: f64,
}

/// Everything a line chart needs: x-axis labels and one dataset per entity.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LineChart {
    pub labels: Vec<String>,
    pub datasets: Vec<ChartDataset>,
}

impl LineChart {
    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }
}

/// Turn aligned series into chart datasets, labelling each entity with `label`.
///
/// Colors follow series order, not entity identity: reordering the request
/// can recolor an entity.
pub fn build_chart<E, F>(aligned: &AlignedSeries<E>, label: F) -> LineChart
where
    F: Fn(&E) -> String,
{
    let datasets = aligned
        .series
        .iter()
        .enumerate()
        .map(|(position, series)| ChartDataset {
            label: label(&series.entity),
            data: series.values.clone(),
            border_color: palette_color(position),
            fill: false,
            tension: LINE_TENSION,
        })
        .collect();
    LineChart {
        labels: aligned.dates.clone(),
        datasets,
    }
}
