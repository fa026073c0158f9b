//! Subcommand bodies: refresh one dashboard stream and print its view.

use crate::{
    dashboard::{Backend, Dashboard, GlobalTrendParams, MapParams, RegionalTrendParams},
    output,
    state::{View, ViewState},
};
use anyhow::{anyhow, bail};
use log::info;
use regnes_api::{region::Region, trend::DateWindow, HeatMetric, Indicator};
use regnes_data::{dataset::LineChart, status::summarize};
use std::{io::Write, path::Path};

const NO_DATA: &str = "No data available";

/// Data of a refreshed view, `None` when it came back empty. A failed view
/// becomes an error carrying the backend message.
fn settled<T>(view: &View<T>) -> anyhow::Result<Option<&T>> {
    match view.state() {
        ViewState::Error(message) => bail!("{}", message),
        ViewState::Populated => Ok(view.data()),
        ViewState::Empty | ViewState::Idle | ViewState::Loading => Ok(None),
    }
}

pub async fn run_status<B: Backend, W: Write>(
    dashboard: &mut Dashboard<B>,
    mut out: W,
) -> anyhow::Result<()> {
    dashboard.refresh_status().await;
    if let Some(status) = settled(dashboard.status())? {
        output::write_status(&summarize(status), &mut out)?;
    }
    Ok(())
}

pub async fn run_regions<B: Backend, W: Write>(
    dashboard: &mut Dashboard<B>,
    mut out: W,
) -> anyhow::Result<()> {
    dashboard.refresh_regions().await;
    match settled(dashboard.regions())? {
        Some(regions) => {
            for region in regions {
                writeln!(out, "{}\t{}", region.region_id, region.region_name)?;
            }
        }
        None => writeln!(out, "{}", NO_DATA)?,
    }
    Ok(())
}

fn emit_chart<W: Write>(chart: Option<&LineChart>, csv: Option<&Path>, mut out: W) -> anyhow::Result<()> {
    let Some(chart) = chart else {
        writeln!(out, "{}", NO_DATA)?;
        return Ok(());
    };
    match csv {
        Some(path) => {
            output::save_chart_csv(chart, path)?;
            info!("Wrote {} dates to {}", chart.labels.len(), path.display());
        }
        None => output::write_chart_table(chart, &mut out)?,
    }
    Ok(())
}

pub async fn run_global<B: Backend, W: Write>(
    dashboard: &mut Dashboard<B>,
    countries: Vec<String>,
    indicator: Indicator,
    window: DateWindow,
    csv: Option<&Path>,
    out: W,
) -> anyhow::Result<()> {
    let params = GlobalTrendParams {
        countries,
        indicator,
        window,
    };
    dashboard.refresh_global(params).await;
    emit_chart(settled(dashboard.global())?, csv, out)
}

/// Turn region arguments into ids. Names are looked up in the regions list,
/// which is only fetched when some argument is not numeric.
async fn resolve_regions<B: Backend>(
    dashboard: &mut Dashboard<B>,
    args: &[String],
) -> anyhow::Result<Vec<i64>> {
    let known: Vec<Region> = if args.iter().any(|a| a.parse::<i64>().is_err()) {
        dashboard.refresh_regions().await;
        settled(dashboard.regions())?.cloned().unwrap_or_default()
    } else {
        Vec::new()
    };
    args.iter()
        .map(|arg| Region::resolve(arg, &known).ok_or_else(|| anyhow!("Unknown region '{}'", arg)))
        .collect()
}

pub async fn run_regional<B: Backend, W: Write>(
    dashboard: &mut Dashboard<B>,
    regions: &[String],
    indicator: Indicator,
    window: DateWindow,
    csv: Option<&Path>,
    out: W,
) -> anyhow::Result<()> {
    let regions = resolve_regions(dashboard, regions).await?;
    let params = RegionalTrendParams {
        regions,
        indicator,
        window,
    };
    dashboard.refresh_regional(params).await;
    emit_chart(settled(dashboard.regional())?, csv, out)
}

pub async fn run_map<B: Backend, W: Write>(
    dashboard: &mut Dashboard<B>,
    metric: HeatMetric,
    date: Option<String>,
    geojson: Option<&Path>,
    mut out: W,
) -> anyhow::Result<()> {
    dashboard.refresh_map(MapParams { metric, date }).await;
    let view = dashboard.map();
    settled(view)?;
    let Some(layer) = view.data() else {
        writeln!(out, "{}", NO_DATA)?;
        return Ok(());
    };
    if layer.is_empty() {
        writeln!(out, "{} ({} as of {})", NO_DATA, metric.label(), layer.date)?;
    } else {
        output::write_layer(layer, &mut out)?;
    }
    if let Some(path) = geojson {
        output::save_geojson(layer, path)?;
        info!("Wrote {} features to {}", layer.features.len(), path.display());
    }
    Ok(())
}
