//! Active connectivity probing.
//!
//! # Responsibilities
//! - Resolve the configured DNS host
//! - Issue one GET per HTTP target, concurrently
//! - Fold the results into a `CycleSummary`
//!
//! Every failure is reported as data (`success = false`), never as an error.
//! Probes bypass any system proxy: the direct path is what is being measured.

use std::time::Duration;

use futures_util::future::join_all;
use reqwest::Client;

use crate::config::ProbeConfig;
use crate::health::summary::{CycleSummary, ProbeResult};
use crate::resilience::timed;

const USER_AGENT: &str = concat!("isp-monitor/", env!("CARGO_PKG_VERSION"));

pub struct Prober {
    client: Client,
    config: ProbeConfig,
    timeout: Duration,
}

impl Prober {
    pub fn new(config: ProbeConfig) -> Result<Self, reqwest::Error> {
        let timeout = Duration::from_secs(config.timeout_secs);
        let client = Client::builder()
            .user_agent(USER_AGENT)
            .no_proxy()
            .timeout(timeout)
            .build()?;

        Ok(Self {
            client,
            config,
            timeout,
        })
    }

    pub fn targets(&self) -> &[String] {
        &self.config.targets
    }

    /// Run one full cycle: DNS first, then all HTTP targets.
    pub async fn probe_cycle(&self) -> CycleSummary {
        let (dns_ok, dns_latency_ms) = self.check_dns().await;

        let checks = self.config.targets.iter().map(|t| self.check_http(t));
        let http_results = join_all(checks).await;

        CycleSummary::new(dns_ok, dns_latency_ms, http_results)
    }

    /// Resolve `dns_host`; returns success and elapsed milliseconds.
    pub async fn check_dns(&self) -> (bool, f64) {
        let host = self.config.dns_host.as_str();
        let lookup = timed(self.timeout, tokio::net::lookup_host((host, 80))).await;
        let elapsed = lookup.elapsed_ms();

        let ok = match lookup.outcome {
            Ok(Ok(mut addrs)) => addrs.next().is_some(),
            Ok(Err(e)) => {
                tracing::debug!(host = %host, error = %e, "DNS check failed: lookup error");
                false
            }
            Err(e) => {
                tracing::debug!(host = %host, error = %e, "DNS check failed: timeout");
                false
            }
        };

        (ok, elapsed)
    }

    /// GET a single target.
    pub async fn check_http(&self, target: &str) -> ProbeResult {
        let request = timed(self.timeout, self.client.get(target).send()).await;
        let elapsed = request.elapsed_ms();

        match request.outcome {
            Ok(Ok(response)) => {
                let status = response.status();
                if self.config.require_success_status
                    && !(status.is_success() || status.is_redirection())
                {
                    tracing::debug!(url = %target, status = %status, "HTTP check failed: non-success status");
                    return ProbeResult::rejected(target, elapsed, status.as_u16());
                }
                ProbeResult::success(target, elapsed, status.as_u16())
            }
            Ok(Err(e)) => {
                tracing::debug!(url = %target, error = %e, "HTTP check failed: connection error");
                ProbeResult::failure(target, Some(elapsed))
            }
            Err(e) => {
                tracing::debug!(url = %target, error = %e, "HTTP check failed: timeout");
                ProbeResult::failure(target, Some(elapsed))
            }
        }
    }
}
