use thiserror::Error;

/// Application-wide error type - single point of truth
#[derive(Error, Debug)]
pub enum AppError {
    /// Payload decoding
    #[error("Decode error: {0}")]
    Decode(#[from] crate::decoder::DecodeError),

    /// Block explorer requests
    #[error("Fetch error: {0}")]
    Fetch(#[from] FetchError),

    /// File I/O operations
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration issues
    #[error("Configuration error: {0}")]
    Config(String),

    /// Data validation/parsing
    #[error("Invalid data: {0}")]
    InvalidData(String),

    /// Writing decoded output
    #[error("Output error: {0}")]
    Output(#[from] crate::decoder::OutputError),
}

/// Block explorer error types
#[derive(Error, Debug)]
pub enum FetchError {
    /// Transport-level failure (DNS, connection reset, TLS)
    #[error("HTTP request failed: {0}")]
    Http(String),

    /// Explorer answered with a non-success status
    #[error("Explorer returned HTTP {status} for {url}")]
    Status { status: u16, url: String },

    /// TXID string format is invalid (not valid hex or wrong length)
    #[error("Invalid txid: {txid}")]
    InvalidTxid { txid: String },

    /// Failed to deserialise the transaction document
    #[error("Deserialisation failed: {0}")]
    Deserialisation(String),

    /// Explorer returned a document for another transaction
    #[error("Requested {requested} but explorer returned {returned}")]
    HashMismatch { requested: String, returned: String },

    /// Retry limit exceeded
    #[error("Max retries exceeded: {operation}")]
    MaxRetriesExceeded { operation: String },

    /// Request timed out
    #[error("Request timeout: {timeout_seconds}s for {operation}")]
    Timeout {
        timeout_seconds: u64,
        operation: String,
    },
}

impl FetchError {
    /// Whether retrying the request could succeed
    ///
    /// Rate limiting (429) and server errors are transient; other statuses
    /// and malformed input are not.
    pub fn is_transient(&self) -> bool {
        match self {
            FetchError::Http(_) | FetchError::Timeout { .. } => true,
            FetchError::Status { status, .. } => *status == 429 || *status >= 500,
            FetchError::InvalidTxid { .. }
            | FetchError::Deserialisation(_)
            | FetchError::HashMismatch { .. }
            | FetchError::MaxRetriesExceeded { .. } => false,
        }
    }
}

/// Application-wide result type - single point of truth
pub type AppResult<T> = Result<T, AppError>;

/// Result type for explorer operations
pub type FetchResult<T> = Result<T, FetchError>;

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        AppError::InvalidData(format!("JSON error: {}", err))
    }
}

impl From<config::ConfigError> for AppError {
    fn from(err: config::ConfigError) -> Self {
        AppError::Config(err.to_string())
    }
}

impl From<reqwest::Error> for FetchError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            FetchError::Deserialisation(err.to_string())
        } else {
            FetchError::Http(err.to_string())
        }
    }
}
