/*
[INPUT]:  Error sources (HTTP, API, serialization, live channel transport)
[OUTPUT]: Structured error types with retry hints
[POS]:    Error handling layer - unified error types for entire crate
[UPDATE]: When adding new error sources or improving error messages
*/

use reqwest::StatusCode;
use thiserror::Error;

/// Main error type for the dashboard adapter
#[derive(Error, Debug)]
pub enum DashboardError {
    /// HTTP request failed
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// Server answered with a non-success status
    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },

    /// Live channel could not be opened, or dropped
    #[error("Transport error: {0}")]
    Transport(String),

    /// Inbound live message could not be decoded
    #[error("Malformed payload: {0}")]
    MalformedPayload(String),

    /// Reconnect attempts used up
    #[error("Reconnect attempts exhausted after {attempts} tries")]
    ExhaustedRetries { attempts: u32 },

    /// Serialization/deserialization failed
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// URL parsing failed
    #[error("Invalid URL: {0}")]
    UrlParse(#[from] url::ParseError),

    /// Invalid response from server
    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),
}

impl DashboardError {
    /// Check if the error is retryable
    pub fn is_retryable(&self) -> bool {
        match self {
            DashboardError::Http(_)
            | DashboardError::Transport(_)
            | DashboardError::InvalidResponse(_) => true,
            DashboardError::Api { status, .. } => *status >= 500 || *status == 429,
            _ => false,
        }
    }

    /// Create an API error from status code and message
    pub fn api_error(status: StatusCode, message: impl Into<String>) -> Self {
        DashboardError::Api {
            status: status.as_u16(),
            message: message.into(),
        }
    }
}

/// Result type alias for dashboard operations
pub type Result<T> = std::result::Result<T, DashboardError>;
