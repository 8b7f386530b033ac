//! Aggregate connectivity state machine.
//!
//! # States
//! - Unknown: nothing classified yet
//! - Up: enough HTTP targets answered
//! - Degraded: up, but average latency at or above the threshold
//! - Down: not up for `consecutive_failures_for_down` cycles in a row
//!
//! # State Transitions
//! ```text
//! any → Down:      failure streak >= consecutive_failures_for_down
//! any → Degraded:  up && avg_latency >= degraded_latency_ms
//! any → Up:        up && (avg_latency unknown || avg_latency < degraded_latency_ms)
//! not up, streak below threshold: state holds
//! ```
//!
//! # Design Decisions
//! - Hysteresis prevents flapping on single-cycle blips
//! - Latency is only judged when connectivity is up
//! - Classification is a pure function of its inputs

use std::fmt;

use crate::config::ThresholdsConfig;
use crate::health::summary::CycleSummary;

/// Aggregate health state.
#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum HealthState {
    #[default]
    Unknown = 0,
    Up = 1,
    Degraded = 2,
    Down = 3,
}

impl HealthState {
    pub fn as_str(&self) -> &'static str {
        match self {
            HealthState::Unknown => "UNKNOWN",
            HealthState::Up => "UP",
            HealthState::Degraded => "DEGRADED",
            HealthState::Down => "DOWN",
        }
    }
}

impl fmt::Display for HealthState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Classify one cycle.
///
/// Returns the new state and the new consecutive-failure count.
pub fn classify(
    cycle: &CycleSummary,
    prior_state: HealthState,
    failure_counter: u32,
    thresholds: &ThresholdsConfig,
) -> (HealthState, u32) {
    let up = cycle.ok_count >= thresholds.min_ok_for_up;

    let failures = if up {
        0
    } else {
        failure_counter.saturating_add(1)
    };

    let degraded = cycle
        .average_latency_ms
        .is_some_and(|avg| avg >= thresholds.degraded_latency_ms);

    let state = if !up && failures >= thresholds.consecutive_failures_for_down {
        HealthState::Down
    } else if up && degraded {
        HealthState::Degraded
    } else if up {
        HealthState::Up
    } else {
        prior_state
    };

    (state, failures)
}
