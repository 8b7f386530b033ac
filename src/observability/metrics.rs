//! Metrics collection and exposition.
//!
//! # Metrics
//! - `isp_monitor_state` (gauge): 0=unknown, 1=up, 2=degraded, 3=down
//! - `isp_monitor_failure_streak` (gauge): consecutive not-up cycles
//! - `isp_monitor_http_ok` (gauge): successful HTTP checks last cycle
//! - `isp_monitor_dns_ok` (gauge): 1 if the last DNS check resolved
//! - `isp_monitor_dns_latency_ms` (histogram)
//! - `isp_monitor_probe_latency_ms` (histogram): per target, successes only
//! - `isp_monitor_alerts_total` (counter): by transition and outcome
//! - `isp_monitor_alerts_suppressed_total` (counter): by transition
//!
//! Without an installed recorder every call here is a no-op.

use std::net::SocketAddr;

use metrics::{counter, gauge, histogram};
use metrics_exporter_prometheus::{BuildError, PrometheusBuilder};

use crate::health::{CycleSummary, HealthState};
use crate::notify::Transition;

/// Install the Prometheus recorder and its HTTP listener.
///
/// Must be called from within a Tokio runtime.
pub fn init_metrics(addr: SocketAddr) -> Result<(), BuildError> {
    PrometheusBuilder::new().with_http_listener(addr).install()?;
    tracing::info!(address = %addr, "Metrics endpoint listening");
    Ok(())
}

pub fn record_cycle(summary: &CycleSummary) {
    gauge!("isp_monitor_dns_ok").set(if summary.dns_ok { 1.0 } else { 0.0 });
    histogram!("isp_monitor_dns_latency_ms").record(summary.dns_latency_ms);
    gauge!("isp_monitor_http_ok").set(summary.ok_count as f64);

    for result in summary.http_results.iter().filter(|r| r.success) {
        if let Some(ms) = result.latency_ms {
            histogram!("isp_monitor_probe_latency_ms", "target" => result.target.clone()).record(ms);
        }
    }
}

pub fn record_state(state: HealthState, failure_streak: u32) {
    gauge!("isp_monitor_state").set(state as u8 as f64);
    gauge!("isp_monitor_failure_streak").set(failure_streak as f64);
}

pub fn record_alert(transition: Transition, delivered: bool) {
    let outcome = if delivered { "sent" } else { "failed" };
    counter!(
        "isp_monitor_alerts_total",
        "transition" => transition.to_string(),
        "outcome" => outcome
    )
    .increment(1);
}

pub fn record_suppressed(transition: Transition) {
    counter!("isp_monitor_alerts_suppressed_total", "transition" => transition.to_string())
        .increment(1);
}
