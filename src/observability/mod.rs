//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! Handler, proxy fetches, server:
//!     → logging.rs (structured log events)
//!     → metrics.rs (counters, gauges, histograms)
//!
//! Consumers:
//!     → Log aggregation (stdout)
//!     → Metrics endpoint (Prometheus scrape)
//! ```
//!
//! # Design Decisions
//! - Structured logging (JSON) for machine parsing
//! - Request ID flows through log events
//! - Metric updates are no-ops until a recorder is installed

pub mod logging;
pub mod metrics;
