//! Per-transition alert cooldown.
//!
//! # Design Decisions
//! - Keyed by the exact `(from, to)` pair; different pairs cool down independently
//! - The ledger is stamped when an alert is *attempted*, not when it is delivered
//! - Self-transitions never alert and never touch the ledger

use std::collections::HashMap;
use std::fmt;
use std::time::{Duration, Instant};

use crate::health::HealthState;

/// A state change, used as the cooldown key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Transition {
    pub from: HealthState,
    pub to: HealthState,
}

impl Transition {
    pub fn new(from: HealthState, to: HealthState) -> Self {
        Self { from, to }
    }
}

impl fmt::Display for Transition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}->{}", self.from, self.to)
    }
}

/// Last alert time per transition.
#[derive(Debug, Default, Clone)]
pub struct AlertLedger {
    last_alert: HashMap<Transition, Instant>,
}

impl AlertLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Decide whether the change `prior → new` should alert at `now`.
    ///
    /// Returns `true` and stamps the ledger when the transition has never
    /// alerted or its last alert is at least `cooldown` old.
    pub fn should_alert(
        &mut self,
        prior: HealthState,
        new: HealthState,
        now: Instant,
        cooldown: Duration,
    ) -> bool {
        if prior == new {
            return false;
        }

        let key = Transition::new(prior, new);
        let due = match self.last_alert.get(&key) {
            Some(last) => now.saturating_duration_since(*last) >= cooldown,
            None => true,
        };

        if due {
            self.last_alert.insert(key, now);
        }
        due
    }

    pub fn last_alert(&self, transition: &Transition) -> Option<Instant> {
        self.last_alert.get(transition).copied()
    }

    pub fn len(&self) -> usize {
        self.last_alert.len()
    }

    pub fn is_empty(&self) -> bool {
        self.last_alert.is_empty()
    }
}
