//! The dashboard controller.
//!
//! Each data stream (status, regions, global trends, regional trends, heat
//! map) is driven in two steps. `begin_*` issues a fresh ticket and marks the
//! view as loading. `complete_*` applies a backend result, but only if its
//! ticket is still the newest one for that stream. A response that arrives
//! after a newer request was started is logged and dropped.

use crate::{
    sequencer::{Sequencer, Ticket},
    state::View,
};
use log::{error, warn};
use regnes_api::{
    client::ApiClient,
    heatmap::HeatmapResponse,
    region::Region,
    status::StatusResponse,
    trend::{DateWindow, GlobalTrend, RegionalTrend},
    HeatMetric, Indicator, Result,
};
use regnes_data::{
    dataset::{build_chart, LineChart},
    geo::{bind, BoundLayer},
    series::align,
};
use std::collections::HashMap;

/// Source of dashboard data.
#[allow(async_fn_in_trait)]
pub trait Backend {
    async fn status(&self) -> Result<StatusResponse>;
    async fn regions(&self) -> Result<Vec<Region>>;
    async fn global_trends(&self, params: &GlobalTrendParams) -> Result<Vec<GlobalTrend>>;
    async fn regional_trends(&self, params: &RegionalTrendParams) -> Result<Vec<RegionalTrend>>;
    async fn heatmap(&self, params: &MapParams) -> Result<HeatmapResponse>;
}

impl Backend for ApiClient {
    async fn status(&self) -> Result<StatusResponse> {
        ApiClient::status(self).await
    }

    async fn regions(&self) -> Result<Vec<Region>> {
        ApiClient::regions(self).await
    }

    async fn global_trends(&self, params: &GlobalTrendParams) -> Result<Vec<GlobalTrend>> {
        ApiClient::global_trends(self, &params.countries, params.indicator, &params.window).await
    }

    async fn regional_trends(&self, params: &RegionalTrendParams) -> Result<Vec<RegionalTrend>> {
        ApiClient::regional_trends(self, &params.regions, &params.window).await
    }

    async fn heatmap(&self, params: &MapParams) -> Result<HeatmapResponse> {
        ApiClient::heatmap(self, params.metric, params.date.as_deref()).await
    }
}

/// Countries, in display order, plus the indicator to chart.
#[derive(Debug, Clone, PartialEq)]
pub struct GlobalTrendParams {
    pub countries: Vec<String>,
    pub indicator: Indicator,
    pub window: DateWindow,
}

/// Region ids, in display order, plus the indicator to chart.
#[derive(Debug, Clone, PartialEq)]
pub struct RegionalTrendParams {
    pub regions: Vec<i64>,
    pub indicator: Indicator,
    pub window: DateWindow,
}

#[derive(Debug, Clone, PartialEq)]
pub struct MapParams {
    pub metric: HeatMetric,
    /// Reporting date; latest when unset.
    pub date: Option<String>,
}

/// A started request: its ticket and the parameters it was issued with.
#[derive(Debug, Clone, PartialEq)]
pub struct Pending<P> {
    pub ticket: Ticket,
    pub params: P,
}

/// A view together with the sequencer that guards it.
#[derive(Debug)]
struct Tracked<T> {
    name: &'static str,
    view: View<T>,
    sequencer: Sequencer,
}

impl<T> Tracked<T> {
    fn new(name: &'static str) -> Self {
        Self {
            name,
            view: View::new(),
            sequencer: Sequencer::new(),
        }
    }

    fn begin(&mut self) -> Ticket {
        let ticket = self.sequencer.issue();
        self.view.start_loading();
        ticket
    }

    /// Apply `result` if `ticket` is current. Returns whether it was applied.
    fn complete<R>(
        &mut self,
        ticket: Ticket,
        result: Result<R>,
        build: impl FnOnce(R) -> (T, bool),
    ) -> bool {
        if !self.sequencer.is_current(ticket) {
            warn!(
                "Discarding stale {} response {} (latest {:?})",
                self.name,
                ticket,
                self.sequencer.latest()
            );
            return false;
        }
        match result {
            Ok(raw) => {
                let (data, empty) = build(raw);
                self.view.succeed(data, empty);
            }
            Err(e) => {
                error!("Loading {} failed: {}", self.name, e);
                self.view.fail(e.to_string());
            }
        }
        true
    }
}

/// Holds the current state of every dashboard view.
#[derive(Debug)]
pub struct Dashboard<B> {
    backend: B,
    status: Tracked<StatusResponse>,
    regions: Tracked<Vec<Region>>,
    global: Tracked<LineChart>,
    regional: Tracked<LineChart>,
    map: Tracked<BoundLayer>,
}

impl<B: Backend> Dashboard<B> {
    pub fn new(backend: B) -> Self {
        Self {
            backend,
            status: Tracked::new("status"),
            regions: Tracked::new("regions"),
            global: Tracked::new("global trends"),
            regional: Tracked::new("regional trends"),
            map: Tracked::new("heat map"),
        }
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn status(&self) -> &View<StatusResponse> {
        &self.status.view
    }

    pub fn regions(&self) -> &View<Vec<Region>> {
        &self.regions.view
    }

    pub fn global(&self) -> &View<LineChart> {
        &self.global.view
    }

    pub fn regional(&self) -> &View<LineChart> {
        &self.regional.view
    }

    pub fn map(&self) -> &View<BoundLayer> {
        &self.map.view
    }

    pub fn begin_status(&mut self) -> Ticket {
        self.status.begin()
    }

    pub fn complete_status(&mut self, ticket: Ticket, result: Result<StatusResponse>) -> bool {
        self.status.complete(ticket, result, |status| (status, false))
    }

    pub async fn refresh_status(&mut self) -> bool {
        let ticket = self.begin_status();
        let result = self.backend.status().await;
        self.complete_status(ticket, result)
    }

    pub fn begin_regions(&mut self) -> Ticket {
        self.regions.begin()
    }

    pub fn complete_regions(&mut self, ticket: Ticket, result: Result<Vec<Region>>) -> bool {
        self.regions.complete(ticket, result, |regions| {
            let empty = regions.is_empty();
            (regions, empty)
        })
    }

    pub async fn refresh_regions(&mut self) -> bool {
        let ticket = self.begin_regions();
        let result = self.backend.regions().await;
        self.complete_regions(ticket, result)
    }

    /// Start a global trends request. An empty country list needs no request:
    /// the view goes straight to `Empty` and `None` is returned. Either way
    /// any request still in flight is superseded.
    pub fn begin_global(&mut self, params: GlobalTrendParams) -> Option<Pending<GlobalTrendParams>> {
        let ticket = self.global.begin();
        if params.countries.is_empty() {
            self.global.view.succeed(empty_chart(), true);
            return None;
        }
        Some(Pending { ticket, params })
    }

    pub fn complete_global(
        &mut self,
        pending: Pending<GlobalTrendParams>,
        result: Result<Vec<GlobalTrend>>,
    ) -> bool {
        let Pending { ticket, params } = pending;
        self.global.complete(ticket, result, |rows| {
            let aligned = align(&rows, &params.countries, params.indicator);
            let chart = build_chart(&aligned, |country| country.clone());
            let empty = chart.is_empty();
            (chart, empty)
        })
    }

    pub async fn refresh_global(&mut self, params: GlobalTrendParams) -> bool {
        let Some(pending) = self.begin_global(params) else {
            return true;
        };
        let result = self.backend.global_trends(&pending.params).await;
        self.complete_global(pending, result)
    }

    /// Start a regional trends request. Behaves like [`Self::begin_global`]
    /// for an empty region list.
    pub fn begin_regional(
        &mut self,
        params: RegionalTrendParams,
    ) -> Option<Pending<RegionalTrendParams>> {
        let ticket = self.regional.begin();
        if params.regions.is_empty() {
            self.regional.view.succeed(empty_chart(), true);
            return None;
        }
        Some(Pending { ticket, params })
    }

    pub fn complete_regional(
        &mut self,
        pending: Pending<RegionalTrendParams>,
        result: Result<Vec<RegionalTrend>>,
    ) -> bool {
        let Pending { ticket, params } = pending;
        self.regional.complete(ticket, result, |rows| {
            let names = region_names(&rows);
            let aligned = align(&rows, &params.regions, params.indicator);
            let chart = build_chart(&aligned, |id| {
                names
                    .get(id)
                    .map(|name| name.to_string())
                    .unwrap_or_else(|| id.to_string())
            });
            let empty = chart.is_empty();
            (chart, empty)
        })
    }

    pub async fn refresh_regional(&mut self, params: RegionalTrendParams) -> bool {
        let Some(pending) = self.begin_regional(params) else {
            return true;
        };
        let result = self.backend.regional_trends(&pending.params).await;
        self.complete_regional(pending, result)
    }

    pub fn begin_map(&mut self, params: MapParams) -> Pending<MapParams> {
        Pending {
            ticket: self.map.begin(),
            params,
        }
    }

    /// Apply a heat map response. The bound layer replaces the previous one
    /// entirely, including when it has no features.
    pub fn complete_map(&mut self, pending: Pending<MapParams>, result: Result<HeatmapResponse>) -> bool {
        let metric = pending.params.metric;
        self.map.complete(pending.ticket, result, |response| {
            let layer = bind(response, metric);
            let empty = layer.is_empty();
            (layer, empty)
        })
    }

    pub async fn refresh_map(&mut self, params: MapParams) -> bool {
        let pending = self.begin_map(params);
        let result = self.backend.heatmap(&pending.params).await;
        self.complete_map(pending, result)
    }
}

fn empty_chart() -> LineChart {
    LineChart {
        labels: Vec::new(),
        datasets: Vec::new(),
    }
}

/// Display names carried by regional rows. The first non-empty name seen for
/// a region is kept.
fn region_names(rows: &[RegionalTrend]) -> HashMap<i64, &str> {
    let mut names = HashMap::new();
    for row in rows {
        if let Some(name) = row.region_name.as_deref().filter(|n| !n.is_empty()) {
            names.entry(row.region_id).or_insert(name);
        }
    }
    names
}
