//! Data processing for the sentiment dashboard.
//!
//! This crate turns backend responses into display-ready structures:
//! aligned multi-series line charts and styled choropleth layers. Every
//! function here is pure; callers rebuild outputs whenever their
//! parameters change.

pub mod color;
pub mod dataset;
pub mod geo;
pub mod series;

/// Headline figures for the status page.
pub mod status {
    use regnes_api::status::StatusResponse;
    use serde::Serialize;

    /// Shown in place of values the backend has not produced yet.
    pub const PLACEHOLDER: &str = "—";

    /// A titled figure.
    #[derive(Debug, Clone, PartialEq, Serialize)]
    pub struct StatItem {
        pub title: &'static str,
        pub value: String,
    }

    /// Group digits in threes, e.g. `1234567` -> `1,234,567`.
    pub fn group_thousands(n: u64) -> String {
        let digits = n.to_string();
        let mut out = String::with_capacity(digits.len() + digits.len() / 3);
        for (i, ch) in digits.chars().enumerate() {
            if i > 0 && (digits.len() - i) % 3 == 0 {
                out.push(',');
            }
            out.push(ch);
        }
        out
    }

    /// The six status figures in display order.
    pub fn summarize(status: &StatusResponse) -> Vec<StatItem> {
        vec![
            StatItem {
                title: "Last Update",
                value: status
                    .last_update
                    .clone()
                    .unwrap_or_else(|| PLACEHOLDER.to_string()),
            },
            StatItem {
                title: "Total News",
                value: group_thousands(status.total_news),
            },
            StatItem {
                title: "Current Channels",
                value: status.channels_count.to_string(),
            },
            StatItem {
                title: "Current Sources",
                value: status.sources_count.to_string(),
            },
            StatItem {
                title: "News Today",
                value: status.news_today.to_string(),
            },
            StatItem {
                title: "Mean Sentiment Today",
                value: status
                    .sentiment_today
                    .map(|v| format!("{:.3}", v))
                    .unwrap_or_else(|| PLACEHOLDER.to_string()),
            },
        ]
    }

    #[cfg(test)]
    mod tests {
        use super::*;

        fn status(last_update: Option<&str>, sentiment_today: Option<f64>) -> StatusResponse {
            StatusResponse {
                last_update: last_update.map(String::from),
                total_news: 1234567,
                channels_count: 4,
                sources_count: 31,
                news_today: 120,
                sentiment_today,
            }
        }

        #[test]
        fn test_group_thousands() {
            assert_eq!(group_thousands(0), "0");
            assert_eq!(group_thousands(999), "999");
            assert_eq!(group_thousands(1000), "1,000");
            assert_eq!(group_thousands(1234567), "1,234,567");
        }

        #[test]
        fn test_summarize_populated() {
            let items = summarize(&status(Some("2025-04-01 06:00"), Some(0.12345)));
            assert_eq!(items.len(), 6);
            assert_eq!(items[0].value, "2025-04-01 06:00");
            assert_eq!(items[1].value, "1,234,567");
            assert_eq!(items[5].title, "Mean Sentiment Today");
            assert_eq!(items[5].value, "0.123");
        }

        #[test]
        fn test_summarize_nulls_use_placeholder() {
            let items = summarize(&status(None, None));
            assert_eq!(items[0].value, PLACEHOLDER);
            assert_eq!(items[5].value, PLACEHOLDER);
        }
    }
}
