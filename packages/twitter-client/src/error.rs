//! Error types for the Twitter client.

use serde::Deserialize;
use thiserror::Error;

/// Result type for Twitter client operations.
pub type Result<T> = std::result::Result<T, TwitterError>;

/// v1.1 error code for "Status is a duplicate."
const DUPLICATE_STATUS_CODE: i64 = 187;

/// Twitter client errors.
#[derive(Debug, Error)]
pub enum TwitterError {
    /// The exact status text was already posted.
    #[error("Duplicate content: {0}")]
    Duplicate(String),

    /// The request did not complete within the client's timeout.
    #[error("Request timed out")]
    Timeout,

    /// Connection failed or the response body could not be read.
    #[error("Network error: {0}")]
    Network(String),

    /// Non-2xx response from the Twitter API.
    #[error("API error ({status}): {message}")]
    Api { status: u16, message: String },

    /// Media could not be fetched from its source URL.
    #[error("Media error: {0}")]
    Media(String),

    /// 2xx response whose body did not match the expected shape.
    #[error("Parse error: {0}")]
    Parse(String),
}

impl TwitterError {
    pub fn is_duplicate(&self) -> bool {
        matches!(self, TwitterError::Duplicate(_))
    }

    /// Classify a non-2xx response body.
    ///
    /// v2 reports duplicates as a 403 problem document whose `detail` mentions
    /// "duplicate content"; v1.1 uses error code 187.
    pub fn from_response(status: u16, body: &str) -> Self {
        #[derive(Deserialize)]
        struct V1Errors {
            errors: Vec<V1Error>,
        }

        #[derive(Deserialize)]
        struct V1Error {
            code: i64,
            message: String,
        }

        #[derive(Deserialize)]
        struct Problem {
            detail: Option<String>,
            title: Option<String>,
        }

        if let Ok(v1) = serde_json::from_str::<V1Errors>(body) {
            if let Some(dup) = v1.errors.iter().find(|e| e.code == DUPLICATE_STATUS_CODE) {
                return TwitterError::Duplicate(dup.message.clone());
            }
            if let Some(first) = v1.errors.first() {
                return TwitterError::Api {
                    status,
                    message: first.message.clone(),
                };
            }
        }

        let message = serde_json::from_str::<Problem>(body)
            .ok()
            .and_then(|p| p.detail.or(p.title))
            .unwrap_or_else(|| body.trim().to_string());

        if message.to_lowercase().contains("duplicate content") {
            TwitterError::Duplicate(message)
        } else {
            TwitterError::Api { status, message }
        }
    }
}

impl From<reqwest::Error> for TwitterError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            TwitterError::Timeout
        } else if err.is_decode() {
            TwitterError::Parse(err.to_string())
        } else {
            TwitterError::Network(err.to_string())
        }
    }
}
