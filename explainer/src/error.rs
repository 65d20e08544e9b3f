//! Error types for the explanation adapters

use thiserror::Error;

pub type ExplainResult<T> = Result<T, ExplainError>;

#[derive(Error, Debug)]
pub enum ExplainError {
    #[error("Cannot connect to LLM service: {0}")]
    ServiceUnavailable(String),

    #[error("Invalid explanation context: {0}")]
    InvalidContext(String),

    #[error("LLM API error (HTTP {status}): {message}")]
    Api { status: u16, message: String },

    #[error("{0}")]
    NotConfigured(String),

    #[error("LLM returned an invalid response: {0}")]
    InvalidResponse(String),
}

impl ExplainError {
    /// Transient failures worth another attempt: connection problems,
    /// timeouts and server-side (5xx) errors.
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::ServiceUnavailable(_) => true,
            Self::Api { status, .. } => *status >= 500,
            _ => false,
        }
    }
}

impl From<reqwest::Error> for ExplainError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_decode() {
            Self::InvalidResponse(e.to_string())
        } else if let Some(status) = e.status() {
            Self::Api {
                status: status.as_u16(),
                message: e.to_string(),
            }
        } else {
            Self::ServiceUnavailable(e.to_string())
        }
    }
}
