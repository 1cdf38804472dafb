use o2g_api::{ApiError, ServiceId};
use o2g_stream::StreamError;
use thiserror::Error;

use crate::logging::LoggingError;

#[derive(Error, Debug)]
pub enum SdkError {
    /// A required argument is missing or empty. Raised before any I/O.
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// No configured address answered with a gateway descriptor
    #[error("Unable to connect: no reachable address in {0}")]
    Unreachable(String),

    #[error("Unsupported API version: {0}")]
    UnsupportedVersion(String),

    #[error("No current API version advertised by the gateway")]
    NoCurrentVersion,

    #[error("Authentication failed for {0}")]
    AuthenticationFailed(String),

    #[error("Open session failed")]
    OpenSessionFailed,

    /// The gateway did not accept the subscription
    #[error("Subscription refused: {0}")]
    SubscriptionRefused(String),

    /// No URI is registered for the service in this session
    #[error("Service not available: {0}")]
    ServiceUnavailable(ServiceId),

    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("API error: {0}")]
    Api(#[from] ApiError),

    #[error("Event stream error: {0}")]
    Stream(#[from] StreamError),

    #[error("Logging error: {0}")]
    Logging(#[from] LoggingError),
}

pub type SdkResult<T> = Result<T, SdkError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        assert_eq!(
            SdkError::InvalidArgument("login".to_string()).to_string(),
            "Invalid argument: login"
        );
        assert_eq!(
            SdkError::Unreachable("[10.1.1.1, o2g.example.com]".to_string()).to_string(),
            "Unable to connect: no reachable address in [10.1.1.1, o2g.example.com]"
        );
        assert_eq!(
            SdkError::ServiceUnavailable(ServiceId::Telephony).to_string(),
            "Service not available: telephony"
        );
        assert_eq!(
            SdkError::from(ApiError::HttpStatus(503)).to_string(),
            "API error: HTTP status 503"
        );
    }
}
