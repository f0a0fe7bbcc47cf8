//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! HTTP handlers and provider clients produce:
//!     → logging.rs (structured log events)
//!     → metrics.rs (counters, histograms)
//!
//! Consumers:
//!     → stdout log stream
//!     → Prometheus scrape endpoint (optional)
//! ```
//!
//! # Design Decisions
//! - Request ID is attached to the per-request span
//! - Metrics are cheap facade calls, no-ops until a recorder is installed

pub mod logging;
pub mod metrics;

pub use logging::init_logging;
