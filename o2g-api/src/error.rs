use rest_client::RestError;
use thiserror::Error;

/// High-level API errors for gateway operations
///
/// These abstract away the transport details and describe what went wrong
/// in terms of the remote operation that was attempted.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Network communication error
    ///
    /// The gateway could not be reached or the connection dropped before a
    /// response was received.
    #[error("Network error: {0}")]
    NetworkError(String),

    /// Response parsing error
    ///
    /// The gateway answered with a success status but the body does not
    /// match the expected shape.
    #[error("Parse error: {0}")]
    ParseError(String),

    /// The gateway answered with a non-success status
    #[error("HTTP status {0}")]
    HttpStatus(u16),

    /// Invalid parameter value
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),
}

/// Type alias for results that can return an ApiError
pub type Result<T> = std::result::Result<T, ApiError>;

impl From<RestError> for ApiError {
    fn from(error: RestError) -> Self {
        match error {
            RestError::Network(msg) => ApiError::NetworkError(msg),
            RestError::Status(code) => ApiError::HttpStatus(code),
            RestError::Parse(msg) => ApiError::ParseError(msg),
            RestError::InvalidUri(msg) => ApiError::InvalidParameter(msg),
        }
    }
}
