/// Error types for the groundwater wells library
use thiserror::Error;

/// Main error type for fallible well-data operations.
///
/// The statistics engine itself never fails; these errors come from the
/// edges: reading input files, configuration, history persistence and
/// the prediction API.
#[derive(Error, Debug)]
pub enum WellsError {
    /// HTTP request failed
    #[cfg(feature = "api")]
    #[error("HTTP request failed: {0}")]
    HttpRequest(#[from] reqwest::Error),

    /// Non-2xx response from the prediction API
    #[error("Bad response status from {endpoint}: {status}")]
    BadStatus { endpoint: String, status: u16 },

    /// Every configured prediction endpoint failed
    #[error("All {tried} prediction endpoints failed")]
    AllEndpointsFailed { tried: usize },

    /// No prediction endpoint configured
    #[error("No prediction endpoints configured")]
    NoEndpoints,

    /// Failed to parse CSV data
    #[error("Failed to parse CSV: {0}")]
    CsvParse(#[from] csv::Error),

    /// Failed to parse or write JSON data
    #[error("Failed to parse JSON: {0}")]
    JsonParse(#[from] serde_json::Error),

    /// Filesystem access failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A prediction request failed validation before it was sent
    #[error("Invalid prediction request: {0}")]
    InvalidRequest(String),

    /// Configuration values are out of range
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

/// Type alias for Results using WellsError
pub type Result<T> = std::result::Result<T, WellsError>;
