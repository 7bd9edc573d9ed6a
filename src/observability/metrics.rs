//! Metrics collection and exposition.
//!
//! # Metrics
//! - `router_requests_total` (counter): dispatched requests by outcome
//! - `router_dispatch_duration_seconds` (histogram): time spent in dispatch,
//!   including the delegated handler
//!
//! # Design Decisions
//! - Low-overhead metric updates via the `metrics` facade
//! - Prometheus exporter only installed when enabled in config

use std::net::SocketAddr;
use std::time::Instant;

use metrics_exporter_prometheus::{BuildError, PrometheusBuilder};

/// How a request left the dispatcher.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DispatchOutcome {
    Discovery,
    Handled,
    NotFound,
    Error,
}

impl DispatchOutcome {
    pub fn as_str(self) -> &'static str {
        match self {
            DispatchOutcome::Discovery => "discovery",
            DispatchOutcome::Handled => "handled",
            DispatchOutcome::NotFound => "not_found",
            DispatchOutcome::Error => "error",
        }
    }
}

/// Install the Prometheus exporter listening on `addr`.
pub fn init_metrics(addr: SocketAddr) -> Result<(), BuildError> {
    PrometheusBuilder::new().with_http_listener(addr).install()?;
    tracing::info!(address = %addr, "Metrics exporter listening");
    Ok(())
}

pub fn record_dispatch(outcome: DispatchOutcome, start: Instant) {
    let outcome = outcome.as_str();
    metrics::counter!("router_requests_total", "outcome" => outcome).increment(1);
    metrics::histogram!("router_dispatch_duration_seconds", "outcome" => outcome)
        .record(start.elapsed().as_secs_f64());
}
