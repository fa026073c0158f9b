//! Command implementations for the RegNeS CLI.
//!
//! Provides subcommands for inspecting news sentiment trends and the
//! regional heat map served by the dashboard backend.

use clap::{Args, Subcommand};
use regnes_api::{
    client::{ApiClient, ApiConfig, DEFAULT_BASE_URL},
    trend::DateWindow,
    HeatMetric, Indicator,
};
use regnes_utils::{
    dates::{format_date, parse_date},
    lists::split_csv,
};
use std::{io, path::PathBuf, time::Duration};

pub mod dashboard;
pub mod output;
pub mod query;
pub mod sequencer;
pub mod state;

#[cfg(test)]
mod fake;

pub use dashboard::Dashboard;

/// Backend connection options shared by every subcommand.
#[derive(Args, Debug, Clone)]
pub struct ApiArgs {
    /// Base URL of the dashboard API
    #[arg(long, global = true, default_value = DEFAULT_BASE_URL)]
    pub base_url: String,

    /// Per-request timeout in seconds
    #[arg(long, global = true, default_value_t = 10)]
    pub timeout_secs: u64,
}

impl ApiArgs {
    pub fn config(&self) -> ApiConfig {
        ApiConfig {
            base_url: self.base_url.clone(),
            timeout: Duration::from_secs(self.timeout_secs),
        }
    }
}

/// Optional date bounds for trend queries.
#[derive(Args, Debug, Clone, Default)]
pub struct WindowArgs {
    /// First date to include (YYYY-MM-DD)
    #[arg(long)]
    pub from: Option<String>,

    /// Last date to include (YYYY-MM-DD)
    #[arg(long)]
    pub to: Option<String>,
}

impl WindowArgs {
    pub fn window(&self) -> anyhow::Result<DateWindow> {
        Ok(DateWindow {
            from: self.from.as_deref().map(parse_date).transpose()?,
            to: self.to.as_deref().map(parse_date).transpose()?,
        })
    }
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Show ingestion statistics
    Status,

    /// List regions with their ids
    Regions,

    /// Per-country trends for one indicator
    Global {
        /// Comma-separated country names, in display order
        #[arg(short = 'c', long)]
        countries: String,

        /// sentiment, happiness or valenz
        #[arg(short = 'i', long, default_value = "sentiment")]
        indicator: Indicator,

        #[command(flatten)]
        window: WindowArgs,

        /// Write the aligned series as CSV instead of printing a table
        #[arg(long)]
        csv: Option<PathBuf>,
    },

    /// Per-region trends for one indicator
    Regional {
        /// Comma-separated region ids or names, in display order
        #[arg(short = 'r', long)]
        regions: String,

        /// sentiment, happiness or valenz
        #[arg(short = 'i', long, default_value = "sentiment")]
        indicator: Indicator,

        #[command(flatten)]
        window: WindowArgs,

        /// Write the aligned series as CSV instead of printing a table
        #[arg(long)]
        csv: Option<PathBuf>,
    },

    /// Regional heat map values for one metric
    Map {
        /// sentiment_mean, happiness_mean or valenz_mean
        #[arg(short = 'm', long, default_value = "sentiment_mean")]
        metric: HeatMetric,

        /// Reporting date (YYYY-MM-DD); latest when omitted
        #[arg(long)]
        date: Option<String>,

        /// Write the styled map as GeoJSON
        #[arg(short = 'o', long)]
        output: Option<PathBuf>,
    },
}

pub async fn run(api: &ApiArgs, command: Command) -> anyhow::Result<()> {
    let client = ApiClient::new(&api.config())?;
    let mut dashboard = Dashboard::new(client);
    let stdout = io::stdout().lock();
    match command {
        Command::Status => query::run_status(&mut dashboard, stdout).await,
        Command::Regions => query::run_regions(&mut dashboard, stdout).await,
        Command::Global {
            countries,
            indicator,
            window,
            csv,
        } => {
            query::run_global(
                &mut dashboard,
                split_csv(&countries),
                indicator,
                window.window()?,
                csv.as_deref(),
                stdout,
            )
            .await
        }
        Command::Regional {
            regions,
            indicator,
            window,
            csv,
        } => {
            query::run_regional(
                &mut dashboard,
                &split_csv(&regions),
                indicator,
                window.window()?,
                csv.as_deref(),
                stdout,
            )
            .await
        }
        Command::Map {
            metric,
            date,
            output,
        } => {
            let date = date
                .as_deref()
                .map(parse_date)
                .transpose()?
                .map(|d| format_date(&d));
            query::run_map(&mut dashboard, metric, date, output.as_deref(), stdout).await
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[derive(Parser)]
    struct TestCli {
        #[command(flatten)]
        api: ApiArgs,
        #[command(subcommand)]
        command: Command,
    }

    #[test]
    fn test_global_args() {
        let cli = TestCli::parse_from([
            "regnes",
            "global",
            "--countries",
            "Deutschland, Schweiz",
            "--indicator",
            "Happiness",
            "--from",
            "2024-01-01",
        ]);
        assert_eq!(cli.api.base_url, DEFAULT_BASE_URL);
        assert_eq!(cli.api.config().timeout, Duration::from_secs(10));
        match cli.command {
            Command::Global {
                countries,
                indicator,
                window,
                csv,
            } => {
                assert_eq!(split_csv(&countries), vec!["Deutschland", "Schweiz"]);
                assert_eq!(indicator, Indicator::Happiness);
                let window = window.window().unwrap();
                assert_eq!(window.from, Some(parse_date("2024-01-01").unwrap()));
                assert_eq!(window.to, None);
                assert!(csv.is_none());
            }
            other => panic!("unexpected command {:?}", other),
        }
    }

    #[test]
    fn test_map_defaults_and_global_flags() {
        let cli = TestCli::parse_from([
            "regnes",
            "map",
            "--base-url",
            "http://backend:8080/api",
            "--timeout-secs",
            "3",
        ]);
        assert_eq!(cli.api.config().base_url, "http://backend:8080/api");
        assert_eq!(cli.api.config().timeout, Duration::from_secs(3));
        match cli.command {
            Command::Map { metric, date, .. } => {
                assert_eq!(metric, HeatMetric::SentimentMean);
                assert!(date.is_none());
            }
            other => panic!("unexpected command {:?}", other),
        }
    }

    #[test]
    fn test_unknown_indicator_rejected() {
        let result = TestCli::try_parse_from(["regnes", "global", "-c", "DE", "-i", "mood"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_bad_window_date() {
        let args = WindowArgs {
            from: Some("01.02.2024".to_string()),
            to: None,
        };
        assert!(args.window().is_err());
    }
}
