/// Error types for the RegNeS backend API
use thiserror::Error;

/// Main error type for backend requests and parameter parsing
#[derive(Error, Debug)]
pub enum ApiError {
    /// HTTP request failed (connection, timeout, body read)
    #[cfg(feature = "api")]
    #[error("HTTP request failed: {0}")]
    HttpRequest(#[from] reqwest::Error),

    /// Backend answered with a non-success status
    #[error("Failed to load {endpoint} ({status})")]
    Status { endpoint: String, status: u16 },

    /// Response body did not match the expected shape
    #[error("Failed to decode response from {endpoint}: {source}")]
    Decode {
        endpoint: String,
        #[source]
        source: serde_json::Error,
    },

    /// Indicator name outside sentiment/happiness/valenz
    #[error("Unknown indicator '{0}', expected one of: sentiment, happiness, valenz")]
    UnknownIndicator(String),

    /// Heat map metric outside the *_mean set
    #[error("Unknown map metric '{0}', expected one of: sentiment_mean, happiness_mean, valenz_mean")]
    UnknownMetric(String),
}

/// Type alias for Results using ApiError
pub type Result<T> = std::result::Result<T, ApiError>;
