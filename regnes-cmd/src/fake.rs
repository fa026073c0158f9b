//! In-memory backend for controller and command tests.

use crate::dashboard::{Backend, GlobalTrendParams, MapParams, RegionalTrendParams};
use regnes_api::{
    heatmap::HeatmapResponse,
    region::Region,
    status::StatusResponse,
    trend::{GlobalTrend, RegionalTrend},
    ApiError, Result,
};
use std::cell::Cell;

/// Serves canned data, or a 500 for every call when `fail` is set.
#[derive(Debug, Default)]
pub struct FakeBackend {
    pub status: Option<StatusResponse>,
    pub regions: Vec<Region>,
    pub global: Vec<GlobalTrend>,
    pub regional: Vec<RegionalTrend>,
    pub map: Option<HeatmapResponse>,
    pub fail: bool,
    pub(crate) calls: Cell<usize>,
}

impl FakeBackend {
    pub fn calls(&self) -> usize {
        self.calls.get()
    }

    fn serve<T>(&self, endpoint: &str, data: T) -> Result<T> {
        self.calls.set(self.calls.get() + 1);
        if self.fail {
            return Err(ApiError::Status {
                endpoint: endpoint.to_string(),
                status: 500,
            });
        }
        Ok(data)
    }
}

impl Backend for FakeBackend {
    async fn status(&self) -> Result<StatusResponse> {
        let status = self.status.clone().unwrap_or(StatusResponse {
            last_update: None,
            total_news: 0,
            channels_count: 0,
            sources_count: 0,
            news_today: 0,
            sentiment_today: None,
        });
        self.serve("/status", status)
    }

    async fn regions(&self) -> Result<Vec<Region>> {
        self.serve("/trends/regions", self.regions.clone())
    }

    async fn global_trends(&self, params: &GlobalTrendParams) -> Result<Vec<GlobalTrend>> {
        let rows = self
            .global
            .iter()
            .filter(|row| params.countries.contains(&row.country))
            .cloned()
            .collect();
        self.serve("/trends/global", rows)
    }

    async fn regional_trends(&self, params: &RegionalTrendParams) -> Result<Vec<RegionalTrend>> {
        let rows = self
            .regional
            .iter()
            .filter(|row| params.regions.contains(&row.region_id))
            .cloned()
            .collect();
        self.serve("/trends/regional", rows)
    }

    async fn heatmap(&self, params: &MapParams) -> Result<HeatmapResponse> {
        let response = self.map.clone().unwrap_or_else(|| HeatmapResponse {
            date: params
                .date
                .clone()
                .unwrap_or_else(|| "2025-04-01".to_string()),
            features: Vec::new(),
        });
        self.serve("/map/heat", response)
    }
}
