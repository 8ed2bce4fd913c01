//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! All handlers produce:
//!     → logging.rs (structured log events via tracing)
//!     → metrics.rs (per-request counters and latency histograms)
//!
//! Consumers:
//!     → Log aggregation (stdout)
//!     → Metrics endpoint (Prometheus scrape, opt-in)
//! ```
//!
//! # Design Decisions
//! - Request ID flows through all log events (tower-http layers)
//! - Metrics are cheap (atomic increments) and disabled by default

pub mod logging;
pub mod metrics;
