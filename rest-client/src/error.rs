//! Error types for the HTTP transport

use thiserror::Error;

/// Errors that can occur while talking to the gateway
#[derive(Debug, Error)]
pub enum RestError {
    /// Network or HTTP communication error
    #[error("Network/HTTP error: {0}")]
    Network(String),

    /// The gateway answered with a non-success status
    #[error("HTTP status {0}")]
    Status(u16),

    /// Body could not be decoded
    #[error("Body parsing error: {0}")]
    Parse(String),

    /// The URI could not be parsed
    #[error("Invalid URI: {0}")]
    InvalidUri(String),
}

impl From<reqwest::Error> for RestError {
    fn from(error: reqwest::Error) -> Self {
        match error.status() {
            Some(status) => RestError::Status(status.as_u16()),
            None => RestError::Network(error.to_string()),
        }
    }
}

impl From<serde_json::Error> for RestError {
    fn from(error: serde_json::Error) -> Self {
        RestError::Parse(error.to_string())
    }
}
