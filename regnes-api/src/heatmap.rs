use geojson::{feature::Id, Feature};
use serde::{Deserialize, Serialize};

/// Property holding the metric value on each heat map feature.
pub const VALUE_PROPERTY: &str = "value";

/// Property holding the region name on each heat map feature.
pub const NAME_PROPERTY: &str = "NAME";

/// Fallback property for the region id when a feature has no `id`.
pub const REGION_ID_PROPERTY: &str = "region_id";

/// Body of `/map/heat`: region geometry with one metric value each, all
/// reported for the same `date`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HeatmapResponse {
    /// As-of date shared by every feature (ISO `YYYY-MM-DD`).
    pub date: String,
    pub features: Vec<Feature>,
}

/// Metric value of a feature. Missing, `null`, non-numeric and NaN are absent.
pub fn feature_value(feature: &Feature) -> Option<f64> {
    feature
        .property(VALUE_PROPERTY)
        .and_then(|v| v.as_f64())
        .filter(|v| !v.is_nan())
}

/// Region name of a feature, if present and non-empty.
pub fn feature_name(feature: &Feature) -> Option<&str> {
    feature
        .property(NAME_PROPERTY)
        .and_then(|v| v.as_str())
        .filter(|s| !s.is_empty())
}

/// Region id of a feature, from its `id` member or its `region_id` property.
pub fn feature_region_id(feature: &Feature) -> Option<String> {
    match &feature.id {
        Some(Id::String(s)) => Some(s.clone()),
        Some(Id::Number(n)) => Some(n.to_string()),
        None => feature.property(REGION_ID_PROPERTY).and_then(|v| match v {
            serde_json::Value::String(s) => Some(s.clone()),
            serde_json::Value::Number(n) => Some(n.to_string()),
            _ => None,
        }),
    }
}
