//! Metrics collection and exposition.
//!
//! # Metrics
//! - `route_provider_requests_total` (counter): provider calls by waypoint, status
//! - `route_provider_request_duration_seconds` (histogram): provider latency
//! - `route_comparisons_total` (counter): comparisons by result
//! - `route_provider_ready` (gauge): 1=ready, 0=loading or failed

use metrics_exporter_prometheus::PrometheusBuilder;
use std::net::SocketAddr;
use std::time::Instant;

/// Start the Prometheus scrape endpoint. Must run inside a Tokio runtime.
pub fn init_metrics(addr: SocketAddr) {
    match PrometheusBuilder::new().with_http_listener(addr).install() {
        Ok(()) => tracing::info!(address = %addr, "Metrics endpoint listening"),
        Err(e) => tracing::error!(error = %e, "Failed to install metrics exporter"),
    }
}

/// Record one provider call.
pub fn record_provider_call(waypoint: &str, status: &str, start: Instant) {
    metrics::counter!(
        "route_provider_requests_total",
        "waypoint" => waypoint.to_string(),
        "status" => status.to_string()
    )
    .increment(1);
    metrics::histogram!("route_provider_request_duration_seconds")
        .record(start.elapsed().as_secs_f64());
}

/// Record a finished comparison ("best_first", "best_second", "failed", ...).
pub fn record_comparison(result: &'static str) {
    metrics::counter!("route_comparisons_total", "result" => result).increment(1);
}

/// Record provider readiness.
pub fn record_provider_ready(ready: bool) {
    metrics::gauge!("route_provider_ready").set(if ready { 1.0 } else { 0.0 });
}
