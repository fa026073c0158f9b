//! Plain-text, CSV and GeoJSON writers for command results.

use anyhow::Context;
use regnes_data::{dataset::LineChart, geo::BoundLayer, status::StatItem};
use std::{fs::File, io::Write, path::Path};

/// Cell text for an absent value in printed tables.
const ABSENT: &str = "-";

fn cell(value: Option<f64>) -> String {
    value.map(|v| format!("{:.3}", v)).unwrap_or_else(|| ABSENT.to_string())
}

pub fn write_status<W: Write>(items: &[StatItem], mut out: W) -> std::io::Result<()> {
    for item in items {
        writeln!(out, "{}: {}", item.title, item.value)?;
    }
    Ok(())
}

/// Tab-separated table: one row per date, one column per dataset.
pub fn write_chart_table<W: Write>(chart: &LineChart, mut out: W) -> std::io::Result<()> {
    let mut header = vec!["date"];
    header.extend(chart.datasets.iter().map(|d| d.label.as_str()));
    writeln!(out, "{}", header.join("\t"))?;
    for (i, date) in chart.labels.iter().enumerate() {
        let mut row = vec![date.clone()];
        row.extend(chart.datasets.iter().map(|d| cell(d.data[i])));
        writeln!(out, "{}", row.join("\t"))?;
    }
    Ok(())
}

/// CSV with a `date` column followed by one column per dataset label.
/// Absent values are empty cells.
pub fn write_chart_csv<W: Write>(chart: &LineChart, out: W) -> anyhow::Result<()> {
    let mut writer = csv::Writer::from_writer(out);
    let mut header = vec!["date".to_string()];
    header.extend(chart.datasets.iter().map(|d| d.label.clone()));
    writer.write_record(&header)?;
    for (i, date) in chart.labels.iter().enumerate() {
        let mut record = vec![date.clone()];
        record.extend(
            chart
                .datasets
                .iter()
                .map(|d| d.data[i].map(|v| v.to_string()).unwrap_or_default()),
        );
        writer.write_record(&record)?;
    }
    writer.flush()?;
    Ok(())
}

pub fn save_chart_csv(chart: &LineChart, path: &Path) -> anyhow::Result<()> {
    let file = File::create(path).with_context(|| format!("Failed to create {}", path.display()))?;
    write_chart_csv(chart, file).with_context(|| format!("Failed to write {}", path.display()))
}

/// One line per region: name, value and fill color, after a date line.
pub fn write_layer<W: Write>(layer: &BoundLayer, mut out: W) -> std::io::Result<()> {
    writeln!(out, "{} as of {}", layer.metric.label(), layer.date)?;
    for feature in &layer.features {
        writeln!(
            out,
            "{}\t{}\t{}",
            feature.name.as_deref().unwrap_or("Unknown"),
            cell(feature.value),
            feature.style.fill_color
        )?;
    }
    Ok(())
}

/// Write the styled layer as a GeoJSON FeatureCollection.
pub fn save_geojson(layer: &BoundLayer, path: &Path) -> anyhow::Result<()> {
    let json = serde_json::to_string_pretty(&layer.to_feature_collection())
        .context("Failed to serialize feature collection")?;
    std::fs::write(path, json).with_context(|| format!("Failed to write {}", path.display()))
}
