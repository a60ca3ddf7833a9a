//! Telemetry error types.

use thiserror::Error;

/// Failure to install a logging or metrics backend.
#[derive(Debug, Error)]
pub enum TelemetryError {
    /// The log filter directive did not parse.
    #[error("invalid log filter '{directive}': {message}")]
    InvalidFilter {
        /// Directive as given.
        directive: String,
        /// Parser message.
        message: String,
    },

    /// A global `tracing` subscriber is already installed.
    #[error("failed to install log subscriber: {0}")]
    Subscriber(String),

    /// The Prometheus recorder could not be built or installed.
    #[error("failed to install metrics recorder: {0}")]
    Recorder(#[from] metrics_exporter_prometheus::BuildError),
}

impl TelemetryError {
    /// Get the error category for logs.
    pub fn category(&self) -> &'static str {
        match self {
            Self::InvalidFilter { .. } => "config",
            Self::Subscriber(_) => "logging",
            Self::Recorder(_) => "metrics",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_filter_display() {
        let err = TelemetryError::InvalidFilter {
            directive: "docstore=loud".to_string(),
            message: "bad level".to_string(),
        };
        assert_eq!(err.to_string(), "invalid log filter 'docstore=loud': bad level");
        assert_eq!(err.category(), "config");
    }

    #[test]
    fn test_subscriber_category() {
        let err = TelemetryError::Subscriber("already set".to_string());
        assert_eq!(err.category(), "logging");
    }
}
