//! Error types for the o2g-stream crate.

use rest_client::RestError;

/// Errors that can occur while setting up or running an event stream.
#[derive(Debug, thiserror::Error)]
pub enum StreamError {
    /// `start` was called on a dispatcher that already left the idle state
    #[error("Event dispatcher already started")]
    AlreadyStarted,

    /// The polling request could not be opened
    #[error("Transport error: {0}")]
    Transport(#[from] RestError),

    /// Invalid configuration provided
    #[error("Configuration error: {0}")]
    Configuration(String),
}

pub type StreamResult<T> = Result<T, StreamError>;
