use serde::{Deserialize, Serialize};

/// Ingestion statistics from `/status`.
///
/// Counts are always present; the last update time and today's mean
/// sentiment are `null` until data exists.
#[derive(Debug, PartialEq, Clone, Serialize, Deserialize)]
pub struct StatusResponse {
    pub last_update: Option<String>,
    pub total_news: u64,
    pub channels_count: u64,
    pub sources_count: u64,
    pub news_today: u64,
    pub sentiment_today: Option<f64>,
}
