//! Binding heat map geometry to metric values and styles.

use crate::color::{style_feature, tooltip, ColorScale, FeatureStyle};
use geojson::{feature::Id, Feature, FeatureCollection, Geometry, JsonObject};
use log::info;
use regnes_api::{
    heatmap::{feature_name, feature_region_id, feature_value, HeatmapResponse},
    HeatMetric,
};
use serde_json::Value;

/// One region ready to draw.
#[derive(Debug, Clone, PartialEq)]
pub struct BoundFeature {
    pub region_id: Option<String>,
    pub name: Option<String>,
    pub geometry: Option<Geometry>,
    /// The backend value, untouched. Absent stays `None` here even though it
    /// is drawn as 0.
    pub value: Option<f64>,
    pub style: FeatureStyle,
    pub tooltip: String,
}

/// A full choropleth layer for one metric.
///
/// Layers are never patched: a new metric or a new response produces a new
/// layer that replaces the old one whole.
#[derive(Debug, Clone, PartialEq)]
pub struct BoundLayer {
    pub metric: HeatMetric,
    /// As-of date shared by every feature. For display only.
    pub date: String,
    pub features: Vec<BoundFeature>,
}

impl BoundLayer {
    /// Identity for render caching. A renderer must rebuild when this changes.
    pub fn key(&self) -> HeatMetric {
        self.metric
    }

    pub fn is_empty(&self) -> bool {
        self.features.is_empty()
    }

    /// Export as GeoJSON, with style and tooltip written into each feature's
    /// properties and `date`/`metric` as foreign members of the collection.
    pub fn to_feature_collection(&self) -> FeatureCollection {
        let features = self
            .features
            .iter()
            .map(|bound| {
                let mut properties = JsonObject::new();
                if let Some(id) = &bound.region_id {
                    properties.insert("region_id".to_string(), Value::from(id.clone()));
                }
                properties.insert(
                    "NAME".to_string(),
                    bound.name.clone().map(Value::from).unwrap_or(Value::Null),
                );
                properties.insert(
                    "value".to_string(),
                    bound.value.map(Value::from).unwrap_or(Value::Null),
                );
                properties.insert(
                    "fillColor".to_string(),
                    Value::from(bound.style.fill_color.to_string()),
                );
                properties.insert(
                    "color".to_string(),
                    Value::from(bound.style.stroke_color.to_string()),
                );
                properties.insert("weight".to_string(), Value::from(bound.style.stroke_weight));
                properties.insert(
                    "fillOpacity".to_string(),
                    Value::from(bound.style.fill_opacity),
                );
                properties.insert("tooltip".to_string(), Value::from(bound.tooltip.clone()));
                Feature {
                    bbox: None,
                    geometry: bound.geometry.clone(),
                    id: bound.region_id.clone().map(Id::String),
                    properties: Some(properties),
                    foreign_members: None,
                }
            })
            .collect();

        let mut members = JsonObject::new();
        members.insert("date".to_string(), Value::from(self.date.clone()));
        members.insert("metric".to_string(), Value::from(self.metric.as_str()));

        FeatureCollection {
            bbox: None,
            features,
            foreign_members: Some(members),
        }
    }
}

/// Bind a heat map response for `metric` using the standard map scale.
pub fn bind(response: HeatmapResponse, metric: HeatMetric) -> BoundLayer {
    bind_with(response, metric, &ColorScale::heatmap())
}

/// Bind a heat map response for `metric`, coloring with `scale`.
pub fn bind_with(response: HeatmapResponse, metric: HeatMetric, scale: &ColorScale) -> BoundLayer {
    let HeatmapResponse { date, features } = response;
    let features: Vec<BoundFeature> = features
        .into_iter()
        .map(|feature| {
            let value = feature_value(&feature);
            let name = feature_name(&feature).map(String::from);
            BoundFeature {
                region_id: feature_region_id(&feature),
                style: style_feature(scale, value),
                tooltip: tooltip(name.as_deref(), value),
                name,
                value,
                geometry: feature.geometry,
            }
        })
        .collect();
    info!(
        "Bound {} features for {} as of {}",
        features.len(),
        metric,
        date
    );
    BoundLayer {
        metric,
        date,
        features,
    }
}
