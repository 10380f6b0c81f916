use thiserror::Error;

/// Errors returned by the JSearch client.
#[derive(Debug, Error)]
pub enum JSearchError {
    /// The request did not complete within the client timeout.
    #[error("request timed out")]
    Timeout,

    /// Transport-level failure (connect, TLS, body read).
    #[error("request failed: {0}")]
    Request(#[source] reqwest::Error),

    /// The API answered with a non-success HTTP status.
    #[error("API error ({status}): {message}")]
    Api { status: u16, message: String },

    /// The response body was not the expected JSON envelope.
    #[error("failed to decode response: {0}")]
    Decode(#[from] serde_json::Error),

    /// The underlying HTTP client could not be constructed.
    #[error("failed to build HTTP client: {0}")]
    Build(#[source] reqwest::Error),
}

impl From<reqwest::Error> for JSearchError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            JSearchError::Timeout
        } else {
            JSearchError::Request(err)
        }
    }
}

impl JSearchError {
    pub fn is_timeout(&self) -> bool {
        matches!(self, JSearchError::Timeout)
    }
}

pub type Result<T> = std::result::Result<T, JSearchError>;
