//! Per-process monitoring state.
//!
//! A `MonitorSession` owns the three pieces of mutable state: the current
//! aggregate state, the failure streak and the alert ledger. It is threaded
//! through every cycle by the runner; nothing else writes to it.

use std::time::{Duration, Instant};

use chrono::{DateTime, TimeZone};

use crate::config::{MonitorConfig, ThresholdsConfig};
use crate::health::{classify, CycleSummary, HealthState};
use crate::notify::{compose_alert, AlertLedger, NotificationSender, Transition};
use crate::observability::metrics;

/// What the gate decided for a cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AlertDecision {
    /// No transition.
    Silent,
    /// Transition inside its cooldown window.
    Suppressed(Transition),
    /// Transition due for an alert.
    Due(Transition),
    /// Alert handed to the sender; `delivered` is its verdict.
    Sent { transition: Transition, delivered: bool },
}

/// Result of folding one cycle into the session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CycleOutcome {
    pub previous: HealthState,
    pub current: HealthState,
    pub failure_streak: u32,
    pub alert: AlertDecision,
}

impl CycleOutcome {
    pub fn changed(&self) -> bool {
        self.previous != self.current
    }
}

#[derive(Debug)]
pub struct MonitorSession {
    state: HealthState,
    failure_streak: u32,
    ledger: AlertLedger,
    thresholds: ThresholdsConfig,
    cooldown: Duration,
}

impl MonitorSession {
    pub fn new(thresholds: ThresholdsConfig, cooldown: Duration) -> Self {
        Self {
            state: HealthState::Unknown,
            failure_streak: 0,
            ledger: AlertLedger::new(),
            thresholds,
            cooldown,
        }
    }

    /// Build from a validated config.
    ///
    /// Validation rejects cooldowns no `Duration` can hold; anything that
    /// slips past saturates to `Duration::MAX` (alert once per transition).
    pub fn from_config(config: &MonitorConfig) -> Self {
        let cooldown =
            Duration::try_from_secs_f64(config.alerts.cooldown_secs).unwrap_or(Duration::MAX);
        Self::new(config.thresholds.clone(), cooldown)
    }

    pub fn state(&self) -> HealthState {
        self.state
    }

    pub fn failure_streak(&self) -> u32 {
        self.failure_streak
    }

    pub fn ledger(&self) -> &AlertLedger {
        &self.ledger
    }

    /// Classify `cycle`, advance the tracked state and consult the gate.
    ///
    /// The state advances even when the alert is suppressed.
    pub fn observe(&mut self, cycle: &CycleSummary, now: Instant) -> CycleOutcome {
        let previous = self.state;
        let (current, failure_streak) =
            classify(cycle, previous, self.failure_streak, &self.thresholds);

        let alert = if current == previous {
            AlertDecision::Silent
        } else if self.ledger.should_alert(previous, current, now, self.cooldown) {
            AlertDecision::Due(Transition::new(previous, current))
        } else {
            AlertDecision::Suppressed(Transition::new(previous, current))
        };

        self.state = current;
        self.failure_streak = failure_streak;

        CycleOutcome {
            previous,
            current,
            failure_streak,
            alert,
        }
    }

    /// Observe `cycle` and deliver the alert through `sender` if one is due.
    ///
    /// `wall_clock` only feeds the human-readable timestamp; `now` drives
    /// the cooldown.
    pub async fn process<S, Tz>(
        &mut self,
        cycle: &CycleSummary,
        now: Instant,
        wall_clock: &DateTime<Tz>,
        sender: &S,
    ) -> CycleOutcome
    where
        S: NotificationSender,
        Tz: TimeZone,
        Tz::Offset: std::fmt::Display,
    {
        let mut outcome = self.observe(cycle, now);

        tracing::info!(
            state = %outcome.current,
            failure_streak = outcome.failure_streak,
            "{}",
            cycle
        );
        metrics::record_cycle(cycle);
        metrics::record_state(outcome.current, outcome.failure_streak);

        match outcome.alert {
            AlertDecision::Silent | AlertDecision::Sent { .. } => {}
            AlertDecision::Suppressed(transition) => {
                tracing::info!(%transition, "State changed; alert suppressed by cooldown");
                metrics::record_suppressed(transition);
            }
            AlertDecision::Due(transition) => {
                tracing::info!(%transition, "State changed; sending alert");
                let text = compose_alert(outcome.previous, outcome.current, wall_clock, cycle);
                let delivered = sender.send(&text).await;
                if delivered {
                    tracing::info!(%transition, "Alert delivered");
                } else {
                    tracing::warn!(%transition, "Alert delivery failed; not retried until cooldown expires");
                }
                metrics::record_alert(transition, delivered);
                outcome.alert = AlertDecision::Sent {
                    transition,
                    delivered,
                };
            }
        }

        outcome
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::health::ProbeResult;
    use chrono::Utc;
    use std::sync::Mutex;
    use crate::health::HealthState::*;

    /// Records every message; answers with a fixed verdict.
    struct RecordingSender {
        delivered: bool,
        sent: Mutex<Vec<String>>,
    }

    impl RecordingSender {
        fn new(delivered: bool) -> Self {
            Self {
                delivered,
                sent: Mutex::new(Vec::new()),
            }
        }

        fn count(&self) -> usize {
            self.sent.lock().unwrap().len()
        }
    }

    impl NotificationSender for RecordingSender {
        async fn send(&self, text: &str) -> bool {
            self.sent.lock().unwrap().push(text.to_string());
            self.delivered
        }
    }

    fn session() -> MonitorSession {
        MonitorSession::new(ThresholdsConfig::default(), Duration::from_secs(60))
    }

    fn cycle(ok: usize, latency: f64) -> CycleSummary {
        let results = (0..3)
            .map(|i| {
                let target = format!("https://t{}.example", i);
                if i < ok {
                    ProbeResult::success(target, latency, 200)
                } else {
                    ProbeResult::failure(target, Some(4000.0))
                }
            })
            .collect();
        CycleSummary::new(true, 8.0, results)
    }

    #[tokio::test]
    async fn test_unknown_to_up_then_degraded() {
        let mut session = session();
        let sender = RecordingSender::new(true);
        let t0 = Instant::now();
        let wall = Utc::now();

        let outcome = session.process(&cycle(3, 150.0), t0, &wall, &sender).await;
        assert_eq!((outcome.previous, outcome.current), (Unknown, Up));
        assert_eq!(
            outcome.alert,
            AlertDecision::Sent {
                transition: Transition::new(Unknown, Up),
                delivered: true
            }
        );
        assert_eq!(session.ledger().last_alert(&Transition::new(Unknown, Up)), Some(t0));

        let t1 = t0 + Duration::from_secs(5);
        let outcome = session.process(&cycle(3, 400.0), t1, &wall, &sender).await;
        assert_eq!(outcome.current, Degraded);
        assert!(matches!(outcome.alert, AlertDecision::Sent { .. }));
        assert_eq!(sender.count(), 2);
        assert!(sender.sent.lock().unwrap()[1].contains("UP ➜ DEGRADED"));
    }

    #[tokio::test]
    async fn test_down_alerts_only_on_third_failure() {
        let mut session = session();
        let sender = RecordingSender::new(true);
        let t0 = Instant::now();
        let wall = Utc::now();

        session.process(&cycle(3, 100.0), t0, &wall, &sender).await;
        assert_eq!(sender.count(), 1);

        let mut states = Vec::new();
        for i in 1..=3 {
            let now = t0 + Duration::from_secs(5 * i);
            let outcome = session.process(&cycle(0, 0.0), now, &wall, &sender).await;
            states.push((outcome.current, outcome.failure_streak));
        }

        assert_eq!(states, vec![(Up, 1), (Up, 2), (Down, 3)]);
        assert_eq!(sender.count(), 2);
        assert!(sender.sent.lock().unwrap()[1].contains("UP ➜ DOWN"));
    }

    #[tokio::test]
    async fn test_cooldown_suppresses_but_state_advances() {
        let mut t = ThresholdsConfig::default();
        t.consecutive_failures_for_down = 1;
        let mut session = MonitorSession::new(t, Duration::from_secs(60));
        let sender = RecordingSender::new(true);
        let wall = Utc::now();
        let t0 = Instant::now();
        let at = |s: u64| t0 + Duration::from_secs(s);

        session.process(&cycle(3, 100.0), at(0), &wall, &sender).await;
        let first = session.process(&cycle(0, 0.0), at(1), &wall, &sender).await;
        assert!(matches!(first.alert, AlertDecision::Sent { .. }));

        session.process(&cycle(3, 100.0), at(10), &wall, &sender).await;
        let second = session.process(&cycle(0, 0.0), at(30), &wall, &sender).await;
        assert_eq!(second.alert, AlertDecision::Suppressed(Transition::new(Up, Down)));
        assert_eq!(session.state(), Down);

        session.process(&cycle(3, 100.0), at(40), &wall, &sender).await;
        let third = session.process(&cycle(0, 0.0), at(65), &wall, &sender).await;
        assert!(matches!(third.alert, AlertDecision::Sent { .. }));

        // UNKNOWN->UP, UP->DOWN, DOWN->UP (t=10), UP->DOWN (t=65)
        assert_eq!(sender.count(), 4);
    }

    #[tokio::test]
    async fn test_failed_delivery_still_stamps_ledger() {
        let mut session = session();
        let sender = RecordingSender::new(false);
        let t0 = Instant::now();
        let wall = Utc::now();

        let outcome = session.process(&cycle(3, 100.0), t0, &wall, &sender).await;
        assert_eq!(
            outcome.alert,
            AlertDecision::Sent {
                transition: Transition::new(Unknown, Up),
                delivered: false
            }
        );
        assert_eq!(session.ledger().len(), 1);
    }

    #[test]
    fn test_from_config_never_panics_on_cooldown() {
        let mut config = MonitorConfig::default();
        config.alerts.cooldown_secs = 1e20;
        let mut session = MonitorSession::from_config(&config);

        assert_eq!(session.cooldown, Duration::MAX);
        let outcome = session.observe(&cycle(3, 100.0), Instant::now());
        assert_eq!(outcome.alert, AlertDecision::Due(Transition::new(Unknown, Up)));

        config.alerts.cooldown_secs = 2.5;
        let session = MonitorSession::from_config(&config);
        assert_eq!(session.cooldown, Duration::from_millis(2500));
    }

    #[test]
    fn test_steady_state_is_silent() {
        let mut session = session();
        let t0 = Instant::now();
        session.observe(&cycle(3, 100.0), t0);

        let outcome = session.observe(&cycle(3, 120.0), t0 + Duration::from_secs(5));
        assert!(!outcome.changed());
        assert_eq!(outcome.alert, AlertDecision::Silent);
        assert_eq!(session.ledger().len(), 1);
    }

    #[test]
    fn test_short_outage_holds_state_silently() {
        let mut session = session();
        let t0 = Instant::now();
        session.observe(&cycle(3, 100.0), t0);

        let outcome = session.observe(&cycle(1, 100.0), t0 + Duration::from_secs(5));
        assert_eq!(outcome.current, Up);
        assert_eq!(outcome.failure_streak, 1);
        assert_eq!(outcome.alert, AlertDecision::Silent);
    }
}
