use crate::indicator::{Field, Indicator, RecordShape};
use chrono::NaiveDate;
use regnes_utils::dates::format_date;
use serde::{Deserialize, Serialize};
use std::{fmt::Display, hash::Hash};

/// A row from a trends endpoint: one entity, one date, several metric columns.
///
/// Metric columns are `Option<f64>`; a column the backend omitted or sent as
/// `null` is absent, never zero.
pub trait TrendRecord {
    /// Series key: country name for global rows, region id for regional rows.
    type Entity: Clone + Eq + Hash + Display;

    const SHAPE: RecordShape;

    /// ISO `YYYY-MM-DD` date of the row.
    fn date(&self) -> &str;

    fn entity(&self) -> &Self::Entity;

    /// Raw column lookup. Columns this shape does not carry are `None`.
    fn field(&self, field: Field) -> Option<f64>;

    /// Value of `indicator`, read through the shape's field mapping.
    fn value(&self, indicator: Indicator) -> Option<f64> {
        self.field(indicator.resolve(Self::SHAPE))
    }
}

/// A per-country row from `/trends/global`.
///
/// The backend only guarantees the requested metric; the others are
/// frequently missing.
#[derive(Debug, PartialEq, Clone, Serialize, Deserialize)]
pub struct GlobalTrend {
    pub date: String,
    pub country: String,
    #[serde(default)]
    pub sentiment: Option<f64>,
    #[serde(default)]
    pub happiness: Option<f64>,
    #[serde(default)]
    pub valenz: Option<f64>,
}

/// A per-region row from `/trends/regional`.
#[derive(Debug, PartialEq, Clone, Serialize, Deserialize)]
pub struct RegionalTrend {
    pub date: String,
    pub region_id: i64,
    #[serde(default)]
    pub region_name: Option<String>,
    /// Regional sentiment, under its pre-unification column name.
    #[serde(default)]
    pub rauh: Option<f64>,
    #[serde(default)]
    pub happiness: Option<f64>,
    #[serde(default)]
    pub valenz: Option<f64>,
}

impl TrendRecord for GlobalTrend {
    type Entity = String;

    const SHAPE: RecordShape = RecordShape::Global;

    fn date(&self) -> &str {
        &self.date
    }

    fn entity(&self) -> &String {
        &self.country
    }

    fn field(&self, field: Field) -> Option<f64> {
        match field {
            Field::Sentiment => self.sentiment,
            Field::Happiness => self.happiness,
            Field::Valenz => self.valenz,
            Field::Rauh => None,
        }
    }
}

impl TrendRecord for RegionalTrend {
    type Entity = i64;

    const SHAPE: RecordShape = RecordShape::Regional;

    fn date(&self) -> &str {
        &self.date
    }

    fn entity(&self) -> &i64 {
        &self.region_id
    }

    fn field(&self, field: Field) -> Option<f64> {
        match field {
            Field::Rauh => self.rauh,
            Field::Happiness => self.happiness,
            Field::Valenz => self.valenz,
            Field::Sentiment => None,
        }
    }
}

/// Optional `from`/`to` bounds accepted by both trend endpoints.
///
/// Left empty, the backend defaults to 2019-01-01 through today.
#[derive(Debug, Default, PartialEq, Eq, Clone, Copy)]
pub struct DateWindow {
    pub from: Option<NaiveDate>,
    pub to: Option<NaiveDate>,
}

impl DateWindow {
    /// Query pairs for the bounds that are set.
    pub fn query_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = Vec::new();
        if let Some(from) = &self.from {
            pairs.push(("from", format_date(from)));
        }
        if let Some(to) = &self.to {
            pairs.push(("to", format_date(to)));
        }
        pairs
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_regional_sentiment_value() {
        let json = r#"{"date":"2024-02-01","region_id":7,"rauh":-0.3,"happiness":0.1,"valenz":0.4}"#;
        let record: RegionalTrend = serde_json::from_str(json).unwrap();
        assert_eq!(record.value(Indicator::Sentiment), Some(-0.3));
        assert_eq!(record.value(Indicator::Happiness), Some(0.1));
        assert_eq!(record.value(Indicator::Valenz), Some(0.4));
        assert_eq!(record.region_name, None);
    }

    #[test]
    fn test_global_reads_literal_fields() {
        let json = r#"{"date":"2024-01-01","country":"Schweiz","sentiment":0.2}"#;
        let record: GlobalTrend = serde_json::from_str(json).unwrap();
        assert_eq!(record.value(Indicator::Sentiment), Some(0.2));
        // only the requested metric is sent; the rest are absent
        assert_eq!(record.value(Indicator::Happiness), None);
        assert_eq!(record.field(Field::Rauh), None);
    }

    #[test]
    fn test_null_metric_is_absent() {
        let json = r#"{"date":"2024-01-01","country":"A","sentiment":null,"happiness":0.0}"#;
        let record: GlobalTrend = serde_json::from_str(json).unwrap();
        assert_eq!(record.value(Indicator::Sentiment), None);
        assert_eq!(record.value(Indicator::Happiness), Some(0.0));
    }

    #[test]
    fn test_missing_date_is_rejected() {
        let json = r#"[{"country":"A","sentiment":0.1}]"#;
        assert!(serde_json::from_str::<Vec<GlobalTrend>>(json).is_err());
    }

    #[test]
    fn test_non_array_body_is_rejected() {
        let json = r#"{"error":"No countries specified."}"#;
        assert!(serde_json::from_str::<Vec<GlobalTrend>>(json).is_err());
    }

    #[test]
    fn test_date_window_query_pairs() {
        assert!(DateWindow::default().query_pairs().is_empty());
        let window = DateWindow {
            from: NaiveDate::from_ymd_opt(2024, 3, 1),
            to: None,
        };
        assert_eq!(window.query_pairs(), vec![("from", "2024-03-01".to_string())]);
    }
}
