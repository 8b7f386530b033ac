//! Resilience subsystem.
//!
//! # Design Decisions
//! - Timeouts are non-negotiable; every external call has a deadline
//! - No retries within a cycle: the next cycle is the retry

pub mod timeouts;

pub use timeouts::{timed, Timed};
