//! Metrics collection and exposition.
//!
//! # Metrics
//! - `bridge_route_fetch_total` (counter): route config fetches by direction, outcome
//! - `bridge_route_fetch_stale_total` (counter): fetch results discarded as stale
//! - `bridge_route_config_updates_total` (counter): route edits by direction
//! - `bridge_validation_rejections_total` (counter): blocked transfer requests by field
//! - `bridge_auth_attempts_total` (counter): password gate attempts by outcome
//! - `bridge_transfers_total` (counter): submissions by direction, outcome
//!
//! # Design Decisions
//! - Recording is a no-op until a recorder is installed
//! - Prometheus exporter only when enabled in config

use metrics::counter;
use metrics_exporter_prometheus::PrometheusBuilder;
use std::net::SocketAddr;

/// Install the Prometheus exporter listening on `addr`.
///
/// Must be called from within a tokio runtime.
pub fn init_metrics(addr: SocketAddr) {
    match PrometheusBuilder::new().with_http_listener(addr).install() {
        Ok(()) => tracing::info!(address = %addr, "Metrics exporter listening"),
        Err(e) => tracing::error!(error = %e, "Failed to install metrics exporter"),
    }
}

pub fn record_route_fetch(direction: &'static str, outcome: &'static str) {
    counter!("bridge_route_fetch_total", "direction" => direction, "outcome" => outcome).increment(1);
}

pub fn record_stale_route_fetch() {
    counter!("bridge_route_fetch_stale_total").increment(1);
}

pub fn record_route_config_update(direction: &'static str) {
    counter!("bridge_route_config_updates_total", "direction" => direction).increment(1);
}

pub fn record_validation_rejection(field: &'static str) {
    counter!("bridge_validation_rejections_total", "field" => field).increment(1);
}

pub fn record_auth_attempt(outcome: &'static str) {
    counter!("bridge_auth_attempts_total", "outcome" => outcome).increment(1);
}

pub fn record_transfer(direction: &'static str, outcome: &'static str) {
    counter!("bridge_transfers_total", "direction" => direction, "outcome" => outcome).increment(1);
}
