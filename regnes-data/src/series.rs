//! Alignment of sparse trend rows onto a shared date axis.

use log::{debug, warn};
use regnes_api::{trend::TrendRecord, Indicator};
use regnes_utils::dates::is_canonical_iso;
use serde::Serialize;
use std::collections::{BTreeSet, HashMap};

/// One entity's values, position-aligned with [`AlignedSeries::dates`].
///
/// `None` marks a date with no value for this entity. It is never filled
/// with zero or interpolated.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Series<E> {
    pub entity: E,
    pub values: Vec<Option<f64>>,
}

/// A date axis plus one series per requested entity, in request order.
///
/// Every series has exactly `dates.len()` values.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AlignedSeries<E> {
    pub dates: Vec<String>,
    pub series: Vec<Series<E>>,
}

impl<E: PartialEq> AlignedSeries<E> {
    /// An empty axis with an empty series for each entity.
    pub fn empty(entities: &[E]) -> Self
    where
        E: Clone,
    {
        Self {
            dates: Vec::new(),
            series: entities
                .iter()
                .map(|entity| Series {
                    entity: entity.clone(),
                    values: Vec::new(),
                })
                .collect(),
        }
    }

    /// Series for `entity`, if it was requested.
    pub fn get(&self, entity: &E) -> Option<&Series<E>> {
        self.series.iter().find(|s| &s.entity == entity)
    }

    /// True when no dates were present in the data.
    pub fn is_empty(&self) -> bool {
        self.dates.is_empty()
    }
}

/// Align `records` for the requested `entities`, reading `indicator`.
///
/// The axis is the sorted set of dates present in `records` (string order,
/// which is chronological for zero-padded ISO dates). When several rows
/// share a `(date, entity)` pair, the first one in `records` is used.
/// Entities with no rows still get a series, filled with `None`.
pub fn align<R: TrendRecord>(
    records: &[R],
    entities: &[R::Entity],
    indicator: Indicator,
) -> AlignedSeries<R::Entity> {
    let dates: Vec<String> = records
        .iter()
        .map(|r| r.date().to_string())
        .collect::<BTreeSet<String>>()
        .into_iter()
        .collect();

    if let Some(date) = dates.iter().find(|d| !is_canonical_iso(d)) {
        warn!(
            "Date '{}' is not a zero-padded ISO date; axis order may not be chronological",
            date
        );
    }

    let mut index: HashMap<(&str, &R::Entity), &R> = HashMap::with_capacity(records.len());
    for record in records {
        index.entry((record.date(), record.entity())).or_insert(record);
    }

    let series = entities
        .iter()
        .map(|entity| Series {
            entity: entity.clone(),
            values: dates
                .iter()
                .map(|date| {
                    index
                        .get(&(date.as_str(), entity))
                        .and_then(|record| record.value(indicator))
                })
                .collect(),
        })
        .collect::<Vec<_>>();

    debug!(
        "Aligned {} rows into {} dates x {} series ({})",
        records.len(),
        dates.len(),
        series.len(),
        indicator
    );

    AlignedSeries { dates, series }
}

#[cfg(test)]
mod tests {
    use super::*;
    use regnes_api::trend::{GlobalTrend, RegionalTrend};

    fn global(date: &str, country: &str, sentiment: Option<f64>) -> GlobalTrend {
        GlobalTrend {
            date: date.to_string(),
            country: country.to_string(),
            sentiment,
            happiness: None,
            valenz: None,
        }
    }

    fn regional(date: &str, region_id: i64, rauh: f64, happiness: f64) -> RegionalTrend {
        RegionalTrend {
            date: date.to_string(),
            region_id,
            region_name: None,
            rauh: Some(rauh),
            happiness: Some(happiness),
            valenz: None,
        }
    }

    fn countries(names: &[&str]) -> Vec<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_gaps_are_absent() {
        let records = vec![
            global("2024-01-01", "A", Some(0.2)),
            global("2024-01-02", "B", Some(0.5)),
        ];
        let aligned = align(&records, &countries(&["A", "B"]), Indicator::Sentiment);
        assert_eq!(aligned.dates, vec!["2024-01-01", "2024-01-02"]);
        assert_eq!(aligned.get(&"A".to_string()).unwrap().values, vec![Some(0.2), None]);
        assert_eq!(aligned.get(&"B".to_string()).unwrap().values, vec![None, Some(0.5)]);
    }

    #[test]
    fn test_empty_records() {
        let aligned = align::<GlobalTrend>(&[], &countries(&["A", "B"]), Indicator::Sentiment);
        assert!(aligned.is_empty());
        assert_eq!(aligned.series.len(), 2);
        assert!(aligned.series.iter().all(|s| s.values.is_empty()));
        assert_eq!(aligned, AlignedSeries::empty(&countries(&["A", "B"])));
    }

    #[test]
    fn test_axis_is_sorted_union_of_dates() {
        let records = vec![
            global("2024-03-01", "A", Some(0.1)),
            global("2024-01-15", "B", Some(0.2)),
            global("2024-03-01", "B", Some(0.3)),
            global("2024-02-10", "C", Some(0.4)),
        ];
        let aligned = align(&records, &countries(&["A", "B"]), Indicator::Sentiment);
        // C is not requested but its date still belongs to the axis
        assert_eq!(aligned.dates, vec!["2024-01-15", "2024-02-10", "2024-03-01"]);
        for series in &aligned.series {
            assert_eq!(series.values.len(), aligned.dates.len());
        }
        assert_eq!(
            aligned.get(&"B".to_string()).unwrap().values,
            vec![Some(0.2), None, Some(0.3)]
        );
    }

    #[test]
    fn test_first_duplicate_wins() {
        let records = vec![
            global("2024-01-01", "A", Some(0.2)),
            global("2024-01-01", "A", Some(0.9)),
        ];
        let aligned = align(&records, &countries(&["A"]), Indicator::Sentiment);
        assert_eq!(aligned.series[0].values, vec![Some(0.2)]);
    }

    #[test]
    fn test_first_duplicate_wins_even_when_its_value_is_absent() {
        let records = vec![
            global("2024-01-01", "A", None),
            global("2024-01-01", "A", Some(0.9)),
        ];
        let aligned = align(&records, &countries(&["A"]), Indicator::Sentiment);
        assert_eq!(aligned.series[0].values, vec![None]);
    }

    #[test]
    fn test_unknown_entity_is_all_absent() {
        let records = vec![global("2024-01-01", "A", Some(0.2))];
        let aligned = align(&records, &countries(&["Z"]), Indicator::Sentiment);
        assert_eq!(aligned.series[0].entity, "Z");
        assert_eq!(aligned.series[0].values, vec![None]);
    }

    #[test]
    fn test_series_follow_request_order() {
        let records = vec![
            global("2024-01-01", "A", Some(0.2)),
            global("2024-01-01", "B", Some(0.5)),
        ];
        let aligned = align(&records, &countries(&["B", "A"]), Indicator::Sentiment);
        let order: Vec<&str> = aligned.series.iter().map(|s| s.entity.as_str()).collect();
        assert_eq!(order, vec!["B", "A"]);
    }

    #[test]
    fn test_align_is_idempotent() {
        let records = vec![
            global("2024-01-02", "A", Some(0.2)),
            global("2024-01-01", "B", Some(0.5)),
        ];
        let entities = countries(&["A", "B"]);
        let first = align(&records, &entities, Indicator::Sentiment);
        let second = align(&records, &entities, Indicator::Sentiment);
        assert_eq!(first, second);
    }

    #[test]
    fn test_regional_sentiment_uses_rauh() {
        let records = vec![
            regional("2024-02-01", 7, -0.3, 0.1),
            regional("2024-02-02", 7, -0.1, 0.2),
        ];
        let sentiment = align(&records, &[7], Indicator::Sentiment);
        assert_eq!(sentiment.series[0].values, vec![Some(-0.3), Some(-0.1)]);
        let happiness = align(&records, &[7], Indicator::Happiness);
        assert_eq!(happiness.series[0].values, vec![Some(0.1), Some(0.2)]);
        let valenz = align(&records, &[7], Indicator::Valenz);
        assert_eq!(valenz.series[0].values, vec![None, None]);
    }
}
