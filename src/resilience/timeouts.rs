//! Timeout enforcement.
//!
//! # Responsibilities
//! - Wrap network calls with a deadline
//! - Measure wall-clock time spent, whether or not the call finished
//!
//! # Design Decisions
//! - Uses Tokio's timeout facilities
//! - Timeout errors are distinct from call errors

use std::future::Future;
use std::time::{Duration, Instant};

use thiserror::Error;

#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
#[error("deadline of {0:?} elapsed")]
pub struct TimeoutError(pub Duration);

/// Outcome of a deadline-bounded call plus the time it took.
#[derive(Debug)]
pub struct Timed<T> {
    pub outcome: Result<T, TimeoutError>,
    pub elapsed: Duration,
}

impl<T> Timed<T> {
    pub fn elapsed_ms(&self) -> f64 {
        self.elapsed.as_secs_f64() * 1000.0
    }
}

/// Run `fut` with a deadline of `limit`, timing it.
pub async fn timed<F, T>(limit: Duration, fut: F) -> Timed<T>
where
    F: Future<Output = T>,
{
    let start = Instant::now();
    let outcome = tokio::time::timeout(limit, fut)
        .await
        .map_err(|_| TimeoutError(limit));

    Timed {
        outcome,
        elapsed: start.elapsed(),
    }
}
