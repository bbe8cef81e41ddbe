//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! Startup, config load, reload, dispatch produce:
//!     → logging.rs (structured log events)
//!     → metrics.rs (counters, histograms)
//!
//! Consumers:
//!     → stdout (pretty or JSON)
//!     → Metrics endpoint (Prometheus scrape)
//! ```
//!
//! # Design Decisions
//! - Structured logging (JSON) for machine parsing
//! - The routing core never logs; only the layers around it do
//! - Metrics are recorded unconditionally and are no-ops until an
//!   exporter is installed

pub mod logging;
pub mod metrics;

pub use logging::{init_logging, LoggingError};
pub use metrics::{init_metrics, record_request, MetricsError};
