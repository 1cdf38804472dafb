//! Logging setup for applications using the SDK
//!
//! The SDK itself only emits `tracing` events. Applications that do not
//! install their own subscriber can call [`init_logging`].

use tracing_subscriber::{fmt, EnvFilter, Registry};

/// Environment variable overriding the level filter
pub const LOG_LEVEL_ENV: &str = "O2G_LOG_LEVEL";

/// Logging mode for different use cases
#[derive(Debug, Clone, Copy)]
pub enum LoggingMode {
    /// No output
    Silent,
    /// Compact stderr output at info level
    Development,
    /// Verbose output with source locations
    Debug,
}

#[derive(Debug, thiserror::Error)]
pub enum LoggingError {
    #[error("Failed to initialize tracing subscriber: {0}")]
    TracingInit(String),

    #[error("Invalid environment variable: {0}")]
    InvalidEnv(String),
}

/// Initialize logging with the specified mode
///
/// `O2G_LOG_LEVEL` (for example `debug` or `o2g_stream=trace`) overrides the
/// default level of the mode.
///
/// ```rust,ignore
/// o2g_sdk::logging::init_logging(LoggingMode::Development)?;
/// ```
pub fn init_logging(mode: LoggingMode) -> Result<(), LoggingError> {
    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

    match mode {
        LoggingMode::Silent => Ok(()),
        LoggingMode::Development => {
            let filter = create_env_filter("info")?;

            Registry::default()
                .with(
                    fmt::layer()
                        .with_target(false)
                        .with_thread_ids(false)
                        .with_file(false)
                        .with_line_number(false)
                        .compact(),
                )
                .with(filter)
                .try_init()
                .map_err(|e| LoggingError::TracingInit(e.to_string()))
        }
        LoggingMode::Debug => {
            let filter = create_env_filter("debug")?;

            Registry::default()
                .with(
                    fmt::layer()
                        .pretty()
                        .with_thread_ids(true)
                        .with_file(true)
                        .with_line_number(true),
                )
                .with(filter)
                .try_init()
                .map_err(|e| LoggingError::TracingInit(e.to_string()))
        }
    }
}

fn create_env_filter(default_level: &str) -> Result<EnvFilter, LoggingError> {
    match std::env::var(LOG_LEVEL_ENV) {
        Ok(level) => EnvFilter::try_new(&level)
            .map_err(|e| LoggingError::InvalidEnv(format!("{LOG_LEVEL_ENV}={level}: {e}"))),
        Err(_) => Ok(EnvFilter::new(default_level)),
    }
}

/// Check if a global subscriber has been installed
pub fn is_initialized() -> bool {
    tracing::dispatcher::has_been_set()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_silent_mode() {
        assert!(init_logging(LoggingMode::Silent).is_ok());
    }

    #[test]
    fn test_default_filter() {
        if std::env::var(LOG_LEVEL_ENV).is_err() {
            let filter = create_env_filter("warn").unwrap();
            assert_eq!(filter.to_string(), "warn");
        }
    }
}
