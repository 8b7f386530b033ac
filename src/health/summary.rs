//! Per-cycle probe results and their aggregate.

use std::fmt;

use serde::Serialize;

/// Outcome of a single HTTP check.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProbeResult {
    /// URL that was probed.
    pub target: String,
    /// Whether the target answered within the timeout.
    pub success: bool,
    /// Elapsed time in milliseconds. Best-effort on failure.
    pub latency_ms: Option<f64>,
    /// HTTP status code, if a response arrived.
    pub status_code: Option<u16>,
}

impl ProbeResult {
    pub fn success(target: impl Into<String>, latency_ms: f64, status_code: u16) -> Self {
        Self {
            target: target.into(),
            success: true,
            latency_ms: Some(latency_ms),
            status_code: Some(status_code),
        }
    }

    pub fn failure(target: impl Into<String>, latency_ms: Option<f64>) -> Self {
        Self {
            target: target.into(),
            success: false,
            latency_ms,
            status_code: None,
        }
    }

    /// The target answered, but with a status that does not count as success.
    pub fn rejected(target: impl Into<String>, latency_ms: f64, status_code: u16) -> Self {
        Self {
            target: target.into(),
            success: false,
            latency_ms: Some(latency_ms),
            status_code: Some(status_code),
        }
    }
}

impl fmt::Display for ProbeResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mark = if self.success { "OK  " } else { "FAIL" };
        write!(f, "{} {}", mark, self.target)?;
        match (self.status_code, self.latency_ms) {
            (Some(code), Some(ms)) => write!(f, " ({}, {:.0}ms)", code, ms),
            (None, Some(ms)) => write!(f, " ({:.0}ms)", ms),
            (Some(code), None) => write!(f, " ({})", code),
            (None, None) => Ok(()),
        }
    }
}

/// Aggregate of one monitoring cycle.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CycleSummary {
    pub dns_ok: bool,
    pub dns_latency_ms: f64,
    /// HTTP results in configured target order.
    pub http_results: Vec<ProbeResult>,
    pub ok_count: usize,
    /// Mean latency over successful checks; `None` when nothing succeeded.
    pub average_latency_ms: Option<f64>,
}

impl CycleSummary {
    /// Fold a cycle's results into a summary.
    pub fn new(dns_ok: bool, dns_latency_ms: f64, http_results: Vec<ProbeResult>) -> Self {
        let latencies: Vec<f64> = http_results
            .iter()
            .filter(|r| r.success)
            .filter_map(|r| r.latency_ms)
            .collect();
        let ok_count = http_results.iter().filter(|r| r.success).count();

        let average_latency_ms = if latencies.is_empty() {
            None
        } else {
            Some(latencies.iter().sum::<f64>() / latencies.len() as f64)
        };

        Self {
            dns_ok,
            dns_latency_ms,
            http_results,
            ok_count,
            average_latency_ms,
        }
    }

    /// Number of HTTP targets checked this cycle.
    pub fn total(&self) -> usize {
        self.http_results.len()
    }
}

/// Single-line cycle narration, e.g. `DNS=OK 12ms | HTTP 3/3 | avg=150ms`.
impl fmt::Display for CycleSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "DNS={} {:.0}ms | HTTP {}/{} | ",
            if self.dns_ok { "OK" } else { "FAIL" },
            self.dns_latency_ms,
            self.ok_count,
            self.total()
        )?;
        match self.average_latency_ms {
            Some(avg) => write!(f, "avg={:.0}ms", avg),
            None => write!(f, "avg=--"),
        }
    }
}
