//! SDK configuration

use std::time::Duration;

use o2g_stream::StreamConfig;

use crate::error::{SdkError, SdkResult};

/// Configuration for an [`Application`](crate::Application)
#[derive(Debug, Clone)]
pub struct SdkConfig {
    /// API version to use. When unset, the version the gateway marks as
    /// current is selected.
    /// Default: None
    pub api_version: Option<String>,

    /// TCP connect timeout for every request
    /// Default: 5 seconds
    pub connect_timeout: Duration,

    /// Overall timeout for regular requests. Event streams are not bounded.
    /// Default: 30 seconds
    pub request_timeout: Duration,

    /// Capacity of the notification channel of an event stream
    /// Default: 1000
    pub event_buffer_size: usize,
}

impl Default for SdkConfig {
    fn default() -> Self {
        Self {
            api_version: None,
            connect_timeout: Duration::from_secs(5),
            request_timeout: Duration::from_secs(30),
            event_buffer_size: 1000,
        }
    }
}

impl SdkConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pin the API version instead of using the current one
    pub fn with_api_version(mut self, version: impl Into<String>) -> Self {
        self.api_version = Some(version.into());
        self
    }

    pub fn with_connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = timeout;
        self
    }

    pub fn with_request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = timeout;
        self
    }

    pub fn with_event_buffer_size(mut self, size: usize) -> Self {
        self.event_buffer_size = size;
        self
    }

    pub(crate) fn stream_config(&self) -> StreamConfig {
        StreamConfig::new().with_event_buffer_size(self.event_buffer_size)
    }

    /// Validate the configuration
    pub fn validate(&self) -> SdkResult<()> {
        if matches!(self.api_version.as_deref(), Some(v) if v.trim().is_empty()) {
            return Err(SdkError::Configuration(
                "api_version must not be empty".to_string(),
            ));
        }

        if self.connect_timeout.is_zero() {
            return Err(SdkError::Configuration(
                "connect_timeout must be greater than 0".to_string(),
            ));
        }

        if self.request_timeout.is_zero() {
            return Err(SdkError::Configuration(
                "request_timeout must be greater than 0".to_string(),
            ));
        }

        self.stream_config()
            .validate()
            .map_err(|e| SdkError::Configuration(e.to_string()))
    }
}
