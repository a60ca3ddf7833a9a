//! Logging and metrics for docstore clients.
//!
//! The client always emits `tracing` events and `metrics` samples; both are
//! dropped unless the process installs a subscriber and a recorder. This
//! crate installs a `tracing-subscriber` formatter and a Prometheus recorder
//! for processes that have none.
//!
//! # Example
//!
//! ```rust,ignore
//! use docstore_telemetry::{init_telemetry, metrics::render_metrics, TelemetryConfig};
//!
//! let config = TelemetryConfig::builder()
//!     .service_name("orders")
//!     .metrics(true)
//!     .build();
//! init_telemetry(&config)?;
//!
//! // later, from a scrape handler
//! let body = render_metrics().unwrap_or_default();
//! ```

#![warn(missing_docs)]

pub mod config;
pub mod error;
pub mod logging;
pub mod metrics;

pub use config::{TelemetryConfig, TelemetryConfigBuilder};
pub use error::TelemetryError;
pub use logging::{init_logging, LogConfig, LogFormat};
pub use metrics::{init_metrics, render_metrics, MetricsConfig};

/// Result type for telemetry operations.
pub type TelemetryResult<T> = Result<T, TelemetryError>;

/// Installs the log subscriber, then the metrics recorder.
///
/// # Errors
///
/// Returns `TelemetryError` if either subsystem fails to initialize.
pub fn init_telemetry(config: &TelemetryConfig) -> TelemetryResult<()> {
    init_logging(&config.logging)?;
    init_metrics(&config.metrics)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_init_with_everything_disabled() {
        let mut config = TelemetryConfig::default();
        config.logging.enabled = false;

        assert!(init_telemetry(&config).is_ok());
    }
}
