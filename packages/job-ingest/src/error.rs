//! Typed errors for the ingestion library.
//!
//! Uses `thiserror` for library errors (not `anyhow`); the binary wraps
//! these with context at the edges.

use std::path::PathBuf;

use jsearch_client::JSearchError;
use thiserror::Error;

/// Why a fetch produced no listings.
///
/// Fetch failures never propagate to callers; they are logged and carried
/// inside [`FetchOutcome`](crate::fetcher::FetchOutcome) instead.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FetchFailure {
    /// The request exceeded the client timeout.
    #[error("request timed out")]
    Timeout,

    /// The API answered but reported a non-OK status.
    #[error("API error: {message}")]
    ApiStatus { status: String, message: String },

    /// Any other request failure (network, auth, undecodable body).
    #[error("request failed: {0}")]
    Request(String),
}

impl From<JSearchError> for FetchFailure {
    fn from(err: JSearchError) -> Self {
        match err {
            JSearchError::Timeout => FetchFailure::Timeout,
            other => FetchFailure::Request(other.to_string()),
        }
    }
}

/// Errors from a listing cache backend.
#[derive(Debug, Error)]
pub enum CacheError {
    #[error("cache backend error: {0}")]
    Backend(#[source] Box<dyn std::error::Error + Send + Sync>),
}

/// Errors raised while flattening a nested JSON value into rows.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NormalizeError {
    /// The value is neither an object nor an array of objects.
    #[error("cannot normalize {kind} into records")]
    NotARecord { kind: &'static str },
}

/// Errors that skip a whole source during conversion.
#[derive(Debug, Error)]
pub enum ConvertError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("content is not valid UTF-8: {0}")]
    Utf8(#[from] std::string::FromUtf8Error),

    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// Parsed JSON has no `data` list.
    #[error("JSON structure does not match the expected format")]
    UnexpectedFormat,

    #[error("item {index} is not a JSON object")]
    ItemNotObject { index: usize },

    #[error("flattening `{field}` on item {index} produced no records")]
    EmptyFlatten { field: String, index: usize },

    #[error("failed to flatten `{field}` on item {index}: {source}")]
    Normalize {
        field: String,
        index: usize,
        #[source]
        source: NormalizeError,
    },
}

/// Errors raised while driving a dataflow.
#[derive(Debug, Error)]
pub enum DataflowError {
    #[error("sink write failed: {0}")]
    Sink(#[from] std::io::Error),

    #[error("failed to serialize item: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value for {var}: {value:?}")]
    Invalid { var: &'static str, value: String },

    #[error("no query keys configured")]
    NoQueries,
}

/// Result type alias for cache operations.
pub type CacheResult<T> = std::result::Result<T, CacheError>;

/// Result type alias for conversion operations.
pub type ConvertResult<T> = std::result::Result<T, ConvertError>;
