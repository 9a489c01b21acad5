//! Metrics collection and exposition.
//!
//! # Metrics
//! - `upstream_requests_total` (counter): upstream calls by method, status
//! - `upstream_request_duration_seconds` (histogram): upstream call latency
//!
//! Without an installed recorder the macros are no-ops, so recording is
//! always safe to call.

use std::net::SocketAddr;
use std::time::Instant;

use metrics::{counter, histogram};
use metrics_exporter_prometheus::{BuildError, PrometheusBuilder};

/// Install the Prometheus recorder and serve it on `addr`.
pub fn init_metrics(addr: SocketAddr) -> Result<(), BuildError> {
    PrometheusBuilder::new().with_http_listener(addr).install()?;
    tracing::info!(address = %addr, "Metrics endpoint listening");
    Ok(())
}

/// Record one upstream call. `status` is `None` when no response arrived.
pub fn record_upstream_call(method: &str, status: Option<u16>, start: Instant) {
    let status = status.map_or_else(|| "error".to_string(), |s| s.to_string());
    counter!(
        "upstream_requests_total",
        "method" => method.to_string(),
        "status" => status
    )
    .increment(1);
    histogram!(
        "upstream_request_duration_seconds",
        "method" => method.to_string()
    )
    .record(start.elapsed().as_secs_f64());
}
