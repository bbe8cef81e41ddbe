//! Metrics collection and exposition.
//!
//! # Metrics
//! - `routekit_requests_total` (counter): requests by route, status
//! - `routekit_request_duration_seconds` (histogram): latency by route, status
//!
//! Requests that match no route are labelled `route="none"`.

use std::net::SocketAddr;
use std::time::Instant;

use metrics_exporter_prometheus::{BuildError, PrometheusBuilder};
use thiserror::Error;

pub const REQUESTS_TOTAL: &str = "routekit_requests_total";
pub const REQUEST_DURATION_SECONDS: &str = "routekit_request_duration_seconds";

#[derive(Debug, Error)]
pub enum MetricsError {
    #[error("Failed to install Prometheus exporter: {0}")]
    Build(#[from] BuildError),
}

/// Install the global recorder and serve `/metrics` on `addr`.
///
/// Must be called from within a Tokio runtime.
pub fn init_metrics(addr: SocketAddr) -> Result<(), MetricsError> {
    PrometheusBuilder::new().with_http_listener(addr).install()?;
    tracing::info!(address = %addr, "Metrics exporter listening");
    Ok(())
}

/// Record one finished request.
pub fn record_request(route: &str, status: u16, start: Instant) {
    let route = route.to_string();
    let status = status.to_string();

    ::metrics::counter!(REQUESTS_TOTAL, "route" => route.clone(), "status" => status.clone())
        .increment(1);
    ::metrics::histogram!(REQUEST_DURATION_SECONDS, "route" => route, "status" => status)
        .record(start.elapsed().as_secs_f64());
}
