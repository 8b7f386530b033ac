//! Health checking subsystem.
//!
//! # Data Flow
//! ```text
//! Prober (prober.rs):
//!     DNS lookup + concurrent HTTP GETs
//!     → ProbeResult per target
//!     → CycleSummary (summary.rs)
//!
//! Classifier (state.rs):
//!     CycleSummary + prior state + failure streak
//!     → new HealthState + new failure streak
//! ```
//!
//! # Design Decisions
//! - Probe failures are data, not errors
//! - DOWN requires a streak of failing cycles
//! - Aggregate state covers the whole path, not single targets

pub mod prober;
pub mod state;
pub mod summary;

pub use prober::Prober;
pub use state::{classify, HealthState};
pub use summary::{CycleSummary, ProbeResult};
