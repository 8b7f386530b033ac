//! Monitor orchestration.
//!
//! `session.rs` holds the state threaded through cycles; `runner.rs`
//! drives the probe/classify/notify loop until shutdown.

pub mod runner;
pub mod session;

pub use runner::Monitor;
pub use session::{AlertDecision, CycleOutcome, MonitorSession};
