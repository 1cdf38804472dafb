//! Configuration for event dispatch

use crate::error::{StreamError, StreamResult};

/// Configuration for the [`EventDispatcher`](crate::EventDispatcher)
#[derive(Debug, Clone)]
pub struct StreamConfig {
    /// Capacity of the notification broadcast channel. Listeners that fall
    /// further behind skip the oldest notifications.
    /// Default: 1000
    pub event_buffer_size: usize,
}

impl Default for StreamConfig {
    fn default() -> Self {
        Self {
            event_buffer_size: 1000,
        }
    }
}

impl StreamConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_event_buffer_size(mut self, size: usize) -> Self {
        self.event_buffer_size = size;
        self
    }

    /// Validate the configuration
    pub fn validate(&self) -> StreamResult<()> {
        if self.event_buffer_size == 0 {
            return Err(StreamError::Configuration(
                "event_buffer_size must be greater than 0".to_string(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = StreamConfig::default();
        assert_eq!(config.event_buffer_size, 1000);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_zero_buffer_is_rejected() {
        let config = StreamConfig::new().with_event_buffer_size(0);
        assert!(matches!(config.validate(), Err(StreamError::Configuration(_))));
    }
}
