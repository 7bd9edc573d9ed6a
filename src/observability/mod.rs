//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! dispatcher, server, registry produce:
//!     → logging.rs (structured log events)
//!     → metrics.rs (dispatch counters and latency)
//!
//! Consumers:
//!     → stdout (pretty or JSON)
//!     → Metrics endpoint (Prometheus scrape)
//! ```
//!
//! # Design Decisions
//! - Request ID flows through dispatch log events
//! - Unmatched requests are informational, never errors

pub mod logging;
pub mod metrics;
