//! Async HTTP client for the dashboard backend.

use crate::{
    error::{ApiError, Result},
    heatmap::HeatmapResponse,
    indicator::{HeatMetric, Indicator},
    region::Region,
    status::StatusResponse,
    trend::{DateWindow, GlobalTrend, RegionalTrend},
};
use log::{debug, info};
use regnes_utils::lists::join_csv;
use reqwest::Client;
use serde::de::DeserializeOwned;
use std::time::Duration;

/// Default backend mount point.
pub const DEFAULT_BASE_URL: &str = "http://localhost:5000/api";

/// Default request timeout, matching the dashboard's 10 second budget.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Connection settings for [`ApiClient`].
#[derive(Debug, Clone, PartialEq)]
pub struct ApiConfig {
    pub base_url: String,
    pub timeout: Duration,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: DEFAULT_TIMEOUT,
        }
    }
}

/// Typed wrapper over the backend's JSON endpoints.
///
/// Requests are single-shot: a failure is returned to the caller as-is, with
/// no retry and no substitute data.
#[derive(Debug, Clone)]
pub struct ApiClient {
    client: Client,
    base_url: String,
}

impl ApiClient {
    pub fn new(config: &ApiConfig) -> Result<Self> {
        let client = Client::builder().timeout(config.timeout).build()?;
        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Full URL for an endpoint path such as `/status`.
    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, String)],
    ) -> Result<T> {
        let url = self.url(path);
        debug!("GET {} {:?}", url, query);
        let response = self.client.get(&url).query(query).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(ApiError::Status {
                endpoint: path.to_string(),
                status: status.as_u16(),
            });
        }
        let body = response.text().await?;
        serde_json::from_str(&body).map_err(|source| ApiError::Decode {
            endpoint: path.to_string(),
            source,
        })
    }

    pub async fn status(&self) -> Result<StatusResponse> {
        self.get_json("/status", &[]).await
    }

    pub async fn regions(&self) -> Result<Vec<Region>> {
        let regions: Vec<Region> = self.get_json("/trends/regions", &[]).await?;
        info!("Loaded {} regions", regions.len());
        Ok(regions)
    }

    /// Per-country series for `countries`.
    pub async fn global_trends(
        &self,
        countries: &[String],
        indicator: Indicator,
        window: &DateWindow,
    ) -> Result<Vec<GlobalTrend>> {
        let mut query = vec![
            ("countries", join_csv(countries)),
            ("metric", indicator.as_str().to_string()),
        ];
        query.extend(window.query_pairs());
        let rows: Vec<GlobalTrend> = self.get_json("/trends/global", &query).await?;
        info!(
            "Loaded {} global {} rows for {} countries",
            rows.len(),
            indicator,
            countries.len()
        );
        Ok(rows)
    }

    /// Per-region series for `regions`. All metric columns are always returned.
    pub async fn regional_trends(
        &self,
        regions: &[i64],
        window: &DateWindow,
    ) -> Result<Vec<RegionalTrend>> {
        let mut query = vec![("regions", join_csv(regions))];
        query.extend(window.query_pairs());
        let rows: Vec<RegionalTrend> = self.get_json("/trends/regional", &query).await?;
        info!("Loaded {} regional rows for {} regions", rows.len(), regions.len());
        Ok(rows)
    }

    /// Region geometry with the latest value of `metric`, or the value on
    /// `date` when given.
    pub async fn heatmap(&self, metric: HeatMetric, date: Option<&str>) -> Result<HeatmapResponse> {
        let mut query = vec![("metric", metric.as_str().to_string())];
        if let Some(date) = date {
            query.push(("date", date.to_string()));
        }
        let response: HeatmapResponse = self.get_json("/map/heat", &query).await?;
        info!(
            "Loaded {} features for {} as of {}",
            response.features.len(),
            metric,
            response.date
        );
        Ok(response)
    }
}
