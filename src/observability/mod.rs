//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! Monitor loop produces:
//!     → logging.rs (one structured line per cycle, transitions, send failures)
//!     → metrics.rs (state, streak, latency, alert counters)
//!
//! Consumers:
//!     → stdout (pretty or JSON)
//!     → Metrics endpoint (Prometheus scrape, optional)
//! ```

pub mod logging;
pub mod metrics;
