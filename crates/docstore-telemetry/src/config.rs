//! Combined telemetry configuration.

use crate::logging::LogConfig;
use crate::metrics::MetricsConfig;

/// Logging and metrics settings for one process.
#[derive(Debug, Clone, Default)]
pub struct TelemetryConfig {
    /// Log subscriber settings.
    pub logging: LogConfig,
    /// Prometheus recorder settings.
    pub metrics: MetricsConfig,
}

impl TelemetryConfig {
    /// Starts a builder from the defaults.
    #[must_use]
    pub fn builder() -> TelemetryConfigBuilder {
        TelemetryConfigBuilder::default()
    }

    /// Defaults plus `DOCSTORE_LOG`, `DOCSTORE_LOG_FORMAT` and
    /// `DOCSTORE_METRICS` (`true`/`1` enables the recorder).
    #[must_use]
    pub fn from_env() -> Self {
        let mut config = Self {
            logging: LogConfig::default().with_env_overrides(),
            ..Self::default()
        };
        if let Ok(value) = std::env::var("DOCSTORE_METRICS") {
            config.metrics.enabled = matches!(value.as_str(), "1" | "true" | "TRUE" | "yes");
        }
        config
    }
}

/// Builder for [`TelemetryConfig`].
#[derive(Debug, Default)]
pub struct TelemetryConfigBuilder {
    config: TelemetryConfig,
}

impl TelemetryConfigBuilder {
    /// Sets the `service` label on every metric.
    #[must_use]
    pub fn service_name(mut self, name: impl Into<String>) -> Self {
        self.config.metrics.service_name = name.into();
        self
    }

    /// Sets the log filter directive.
    #[must_use]
    pub fn log_filter(mut self, directive: impl Into<String>) -> Self {
        self.config.logging.filter = directive.into();
        self
    }

    /// Replaces the logging settings.
    #[must_use]
    pub fn logging(mut self, logging: LogConfig) -> Self {
        self.config.logging = logging;
        self
    }

    /// Turns the Prometheus recorder on or off.
    #[must_use]
    pub fn metrics(mut self, enabled: bool) -> Self {
        self.config.metrics.enabled = enabled;
        self
    }

    /// Finishes the builder.
    #[must_use]
    pub fn build(self) -> TelemetryConfig {
        self.config
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logging::LogFormat;

    #[test]
    fn test_default_config() {
        let config = TelemetryConfig::default();
        assert!(config.logging.enabled);
        assert!(!config.metrics.enabled);
        assert_eq!(config.metrics.service_name, "docstore");
    }

    #[test]
    fn test_builder() {
        let config = TelemetryConfig::builder()
            .service_name("orders")
            .log_filter("warn,docstore_client=debug")
            .metrics(true)
            .build();

        assert_eq!(config.metrics.service_name, "orders");
        assert!(config.metrics.enabled);
        assert_eq!(config.logging.filter, "warn,docstore_client=debug");
    }

    #[test]
    fn test_builder_logging() {
        let config = TelemetryConfig::builder()
            .logging(LogConfig::development())
            .build();

        assert_eq!(config.logging.format, LogFormat::Pretty);
    }
}
