//! Metrics collection and exposition.
//!
//! # Metrics
//! - `pwa_requests_total` (counter): requests by kind and status
//! - `pwa_request_duration_seconds` (histogram): handler latency by kind
//! - `pwa_proxy_fetches_total` (counter): upstream fetches by outcome
//! - `pwa_cache_entries` (gauge): entries per cache
//!
//! # Design Decisions
//! - Label values come from fixed sets, never from request paths

use metrics_exporter_prometheus::PrometheusBuilder;
use std::net::SocketAddr;
use std::time::Instant;

/// Install the Prometheus recorder and its scrape endpoint.
///
/// Must be called from within a Tokio runtime.
pub fn init_metrics(addr: SocketAddr) {
    match PrometheusBuilder::new().with_http_listener(addr).install() {
        Ok(()) => tracing::info!(address = %addr, "Metrics endpoint listening"),
        Err(e) => {
            tracing::error!(address = %addr, error = %e, "Failed to install metrics exporter")
        }
    }
}

/// Record a handled request. `kind` is the dispatch branch that answered.
pub fn record_request(kind: &'static str, status: u16, start: Instant) {
    let status = status.to_string();
    ::metrics::counter!("pwa_requests_total", "kind" => kind, "status" => status).increment(1);
    ::metrics::histogram!("pwa_request_duration_seconds", "kind" => kind)
        .record(start.elapsed().as_secs_f64());
}

/// Record a proxy resource fetch outcome.
pub fn record_proxy_fetch(outcome: &'static str) {
    ::metrics::counter!("pwa_proxy_fetches_total", "outcome" => outcome).increment(1);
}

/// Record the number of entries held by a cache.
pub fn record_cache_size(cache: &'static str, entries: usize) {
    ::metrics::gauge!("pwa_cache_entries", "cache" => cache).set(entries as f64);
}
