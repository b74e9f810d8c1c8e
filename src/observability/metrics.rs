//! Metrics collection and exposition.
//!
//! # Metrics
//! - `router_requests_total` (counter): requests by matched pattern and status
//! - `router_request_duration_seconds` (histogram): dispatch latency by pattern
//!
//! # Design Decisions
//! - Recording goes through the `metrics` facade and is a no-op until an
//!   exporter is installed
//! - The route label is the raw pattern, so cardinality is bounded by the registry

use std::net::SocketAddr;
use std::time::Instant;

use metrics_exporter_prometheus::{BuildError, PrometheusBuilder};

/// Route label used for requests that matched nothing.
pub const UNMATCHED_ROUTE: &str = "none";

/// Install the Prometheus exporter with an HTTP scrape endpoint on `addr`.
pub fn init_metrics(addr: SocketAddr) -> Result<(), BuildError> {
    PrometheusBuilder::new().with_http_listener(addr).install()?;
    tracing::info!(address = %addr, "Metrics endpoint listening");
    Ok(())
}

/// Record one dispatched request.
pub fn record_request(route: &str, status: u16, start_time: Instant) {
    metrics::counter!(
        "router_requests_total",
        "route" => route.to_string(),
        "status" => status.to_string()
    )
    .increment(1);
    metrics::histogram!("router_request_duration_seconds", "route" => route.to_string())
        .record(start_time.elapsed().as_secs_f64());
}
