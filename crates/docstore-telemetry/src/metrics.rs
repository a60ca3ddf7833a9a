//! Prometheus metrics for docstore clients.
//!
//! # Standard Metrics
//!
//! | Metric | Type | Labels | Description |
//! |--------|------|--------|-------------|
//! | `docstore_requests_total` | Counter | `route`, `status` | API calls issued |
//! | `docstore_request_duration_seconds` | Histogram | `route` | API call latency |
//! | `docstore_response_size_bytes` | Histogram | `route` | Response body size |
//! | `docstore_batch_entries_total` | Counter | `outcome` | Batch-read entries by outcome |
//!
//! Recording functions are no-ops until a recorder is installed with
//! [`init_metrics`].

use std::sync::OnceLock;
use std::time::Duration;

use metrics::{counter, describe_counter, describe_histogram, histogram};
use metrics_exporter_prometheus::{Matcher, PrometheusBuilder, PrometheusHandle};

use crate::TelemetryResult;

static METRICS_HANDLE: OnceLock<PrometheusHandle> = OnceLock::new();

/// Status label used when no HTTP response was received.
pub const STATUS_TRANSPORT_ERROR: &str = "transport_error";

/// Latency buckets for `docstore_request_duration_seconds`.
pub const DURATION_BUCKETS: &[f64] = &[0.005, 0.01, 0.025, 0.05, 0.1, 0.25, 0.5, 1.0, 2.5, 5.0, 10.0];

/// Metrics configuration.
///
/// The recorder does not serve HTTP itself. Expose [`render_metrics`] from
/// the application's own scrape endpoint.
#[derive(Debug, Clone)]
pub struct MetricsConfig {
    /// Install a Prometheus recorder.
    pub enabled: bool,
    /// Value of the global `service` label.
    pub service_name: String,
}

impl Default for MetricsConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            service_name: "docstore".to_string(),
        }
    }
}

/// Installs the global Prometheus recorder.
///
/// Calling it again after a successful install fails, since only one global
/// recorder can exist.
///
/// # Errors
///
/// Returns [`TelemetryError::Recorder`](crate::TelemetryError::Recorder) if
/// the recorder cannot be built or another recorder is installed.
pub fn init_metrics(config: &MetricsConfig) -> TelemetryResult<()> {
    if !config.enabled {
        return Ok(());
    }

    let handle = PrometheusBuilder::new()
        .add_global_label("service", config.service_name.clone())
        .set_buckets_for_metric(
            Matcher::Full("docstore_request_duration_seconds".to_string()),
            DURATION_BUCKETS,
        )?
        .install_recorder()?;

    let _ = METRICS_HANDLE.set(handle);
    register_metric_descriptions();

    tracing::info!(service = %config.service_name, "Prometheus recorder installed");

    Ok(())
}

/// Renders metrics in the Prometheus text format.
///
/// Returns `None` until [`init_metrics`] has installed a recorder.
#[must_use]
pub fn render_metrics() -> Option<String> {
    METRICS_HANDLE.get().map(PrometheusHandle::render)
}

fn register_metric_descriptions() {
    describe_counter!("docstore_requests_total", "Total number of API calls issued");
    describe_histogram!(
        "docstore_request_duration_seconds",
        metrics::Unit::Seconds,
        "API call duration"
    );
    describe_histogram!(
        "docstore_response_size_bytes",
        metrics::Unit::Bytes,
        "API response body size"
    );
    describe_counter!(
        "docstore_batch_entries_total",
        "Batch-read response entries by outcome"
    );
}

// ============================================================================
// Metric Recording Functions
// ============================================================================

/// Records a completed API call.
///
/// `status` is the HTTP status code, or [`STATUS_TRANSPORT_ERROR`] when the
/// call failed before a response arrived.
pub fn record_request(route: &str, status: &str, duration: Duration) {
    counter!(
        "docstore_requests_total",
        "route" => route.to_string(),
        "status" => status.to_string()
    )
    .increment(1);

    histogram!(
        "docstore_request_duration_seconds",
        "route" => route.to_string()
    )
    .record(duration.as_secs_f64());
}

/// Records a response body size.
pub fn record_response_size(route: &str, size_bytes: usize) {
    histogram!(
        "docstore_response_size_bytes",
        "route" => route.to_string()
    )
    .record(size_bytes as f64);
}

/// Records the outcome counts of one batch-read response.
pub fn record_batch_entries(found: usize, missing: usize) {
    counter!("docstore_batch_entries_total", "outcome" => "found").increment(found as u64);
    counter!("docstore_batch_entries_total", "outcome" => "missing").increment(missing as u64);
}
