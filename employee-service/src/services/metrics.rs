//! Prometheus export for request and store-operation metrics.

use metrics::counter;
use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};
use std::sync::OnceLock;

static METRICS_HANDLE: OnceLock<PrometheusHandle> = OnceLock::new();

/// Install the Prometheus recorder. Later calls are no-ops, so tests may call
/// this freely.
pub fn init_metrics() {
    METRICS_HANDLE.get_or_init(|| {
        PrometheusBuilder::new()
            .install_recorder()
            .expect("failed to install Prometheus recorder")
    });
}

/// Current metrics in Prometheus text format, for `GET /metrics`.
pub fn get_metrics() -> String {
    METRICS_HANDLE
        .get()
        .map(|handle| handle.render())
        .unwrap_or_else(|| "# Metrics recorder not initialized".to_string())
}

/// Count one employee store operation (`list`, `create`, `update`, `delete`)
/// with its outcome (`ok`, `not_found`, `error`).
pub fn record_operation(operation: &'static str, outcome: &'static str) {
    counter!(
        "employee_operations_total",
        "operation" => operation,
        "outcome" => outcome
    )
    .increment(1);
}
