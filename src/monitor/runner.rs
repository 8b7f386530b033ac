//! The monitoring loop.
//!
//! ```text
//! loop:
//!     probe (DNS, HTTP) → classify → gate → maybe send
//!     sleep interval
//! until shutdown
//! ```

use std::time::{Duration, Instant};

use chrono::Local;
use tokio::sync::broadcast;

use crate::config::MonitorConfig;
use crate::health::Prober;
use crate::monitor::session::MonitorSession;
use crate::notify::NotificationSender;

pub struct Monitor<S> {
    prober: Prober,
    sender: S,
    session: MonitorSession,
    interval: Duration,
}

impl<S: NotificationSender> Monitor<S> {
    pub fn new(config: &MonitorConfig, prober: Prober, sender: S) -> Self {
        Self {
            prober,
            sender,
            session: MonitorSession::from_config(config),
            interval: Duration::from_secs(config.interval_secs),
        }
    }

    pub fn session(&self) -> &MonitorSession {
        &self.session
    }

    /// Run one probe cycle through the session.
    pub async fn run_cycle(&mut self) {
        let summary = self.prober.probe_cycle().await;
        self.session
            .process(&summary, Instant::now(), &Local::now(), &self.sender)
            .await;
    }

    /// Cycle until `shutdown` fires. Returns the session for inspection.
    pub async fn run(mut self, mut shutdown: broadcast::Receiver<()>) -> MonitorSession {
        tracing::info!(
            targets = self.prober.targets().len(),
            interval_secs = self.interval.as_secs(),
            "Connectivity monitor starting"
        );

        loop {
            tokio::select! {
                _ = self.run_cycle() => {}
                _ = shutdown.recv() => break,
            }

            tokio::select! {
                _ = tokio::time::sleep(self.interval) => {}
                _ = shutdown.recv() => break,
            }
        }

        tracing::info!(state = %self.session.state(), "Connectivity monitor stopped");
        self.session
    }
}
