use crate::error::ApiError;
use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};

/// One of the three scalar metrics the dashboard charts.
#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Indicator {
    Sentiment,
    Happiness,
    Valenz,
}

/// Which backend endpoint a record came from.
///
/// Global (per-country) and regional records name their columns differently,
/// so the same indicator can live in different fields.
#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash)]
pub enum RecordShape {
    Global,
    Regional,
}

/// A concrete metric column on a trend record.
#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash)]
pub enum Field {
    Sentiment,
    /// Legacy regional sentiment column, never renamed at the source.
    Rauh,
    Happiness,
    Valenz,
}

/// Metric keys accepted by the heat map endpoint.
#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HeatMetric {
    SentimentMean,
    HappinessMean,
    ValenzMean,
}

impl Indicator {
    pub const ALL: [Indicator; 3] = [Indicator::Sentiment, Indicator::Happiness, Indicator::Valenz];

    /// Name used in query strings and on global records.
    pub fn as_str(self) -> &'static str {
        match self {
            Indicator::Sentiment => "sentiment",
            Indicator::Happiness => "happiness",
            Indicator::Valenz => "valenz",
        }
    }

    /// Human-readable label for selectors and chart titles.
    pub fn label(self) -> &'static str {
        match self {
            Indicator::Sentiment => "Sentiment",
            Indicator::Happiness => "Happiness",
            Indicator::Valenz => "Valenz",
        }
    }

    /// Resolve the field holding this indicator on records of `shape`.
    ///
    /// `sentiment` is stored as `rauh` on regional records only; every other
    /// pairing maps to the like-named field.
    pub fn resolve(self, shape: RecordShape) -> Field {
        match (self, shape) {
            (Indicator::Sentiment, RecordShape::Global) => Field::Sentiment,
            (Indicator::Sentiment, RecordShape::Regional) => Field::Rauh,
            (Indicator::Happiness, _) => Field::Happiness,
            (Indicator::Valenz, _) => Field::Valenz,
        }
    }
}

impl Field {
    /// JSON key of this column.
    pub fn name(self) -> &'static str {
        match self {
            Field::Sentiment => "sentiment",
            Field::Rauh => "rauh",
            Field::Happiness => "happiness",
            Field::Valenz => "valenz",
        }
    }
}

impl HeatMetric {
    pub const ALL: [HeatMetric; 3] = [
        HeatMetric::SentimentMean,
        HeatMetric::HappinessMean,
        HeatMetric::ValenzMean,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            HeatMetric::SentimentMean => "sentiment_mean",
            HeatMetric::HappinessMean => "happiness_mean",
            HeatMetric::ValenzMean => "valenz_mean",
        }
    }

    /// The indicator this daily mean summarises.
    pub fn indicator(self) -> Indicator {
        match self {
            HeatMetric::SentimentMean => Indicator::Sentiment,
            HeatMetric::HappinessMean => Indicator::Happiness,
            HeatMetric::ValenzMean => Indicator::Valenz,
        }
    }

    pub fn label(self) -> &'static str {
        self.indicator().label()
    }
}

impl From<Indicator> for HeatMetric {
    fn from(indicator: Indicator) -> Self {
        match indicator {
            Indicator::Sentiment => HeatMetric::SentimentMean,
            Indicator::Happiness => HeatMetric::HappinessMean,
            Indicator::Valenz => HeatMetric::ValenzMean,
        }
    }
}

impl FromStr for Indicator {
    type Err = ApiError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "sentiment" => Ok(Indicator::Sentiment),
            "happiness" => Ok(Indicator::Happiness),
            "valenz" => Ok(Indicator::Valenz),
            _ => Err(ApiError::UnknownIndicator(s.to_string())),
        }
    }
}

impl FromStr for HeatMetric {
    type Err = ApiError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "sentiment_mean" => Ok(HeatMetric::SentimentMean),
            "happiness_mean" => Ok(HeatMetric::HappinessMean),
            "valenz_mean" => Ok(HeatMetric::ValenzMean),
            _ => Err(ApiError::UnknownMetric(s.to_string())),
        }
    }
}

impl fmt::Display for Indicator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Display for HeatMetric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
