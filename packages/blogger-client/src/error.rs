//! Error types for the Blogger client.

use serde::Deserialize;
use thiserror::Error;

/// Result type for Blogger client operations.
pub type Result<T> = std::result::Result<T, BloggerError>;

/// Blogger client errors.
#[derive(Debug, Error)]
pub enum BloggerError {
    /// The request did not complete within the client's timeout.
    #[error("Request timed out")]
    Timeout,

    /// Connection failed or the response body could not be read.
    #[error("Network error: {0}")]
    Network(String),

    /// A blog or post id, or the base URL, cannot form a request URL.
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    /// Non-2xx response from the Blogger API.
    #[error("API error ({status}): {message}")]
    Api { status: u16, message: String },

    /// 2xx response whose body did not match the expected resource.
    #[error("Parse error: {0}")]
    Parse(String),
}

impl BloggerError {
    /// HTTP status of an API error, if any.
    pub fn status(&self) -> Option<u16> {
        match self {
            BloggerError::Api { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Build an API error from a non-2xx response body.
    ///
    /// Google APIs wrap failures as `{"error": {"code": 404, "message": "Not Found"}}`;
    /// anything else is kept verbatim.
    pub(crate) fn from_response(status: u16, body: &str) -> Self {
        #[derive(Deserialize)]
        struct Envelope {
            error: ErrorBody,
        }

        #[derive(Deserialize)]
        struct ErrorBody {
            message: String,
        }

        let message = serde_json::from_str::<Envelope>(body)
            .map(|e| e.error.message)
            .unwrap_or_else(|_| body.trim().to_string());

        BloggerError::Api { status, message }
    }
}

impl From<reqwest::Error> for BloggerError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            BloggerError::Timeout
        } else if err.is_decode() {
            BloggerError::Parse(err.to_string())
        } else {
            BloggerError::Network(err.to_string())
        }
    }
}
