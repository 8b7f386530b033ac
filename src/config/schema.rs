//! Configuration schema definitions.
//!
//! This module defines the complete configuration structure for the monitor.
//! All types derive Serde traits for deserialization from config files.

use serde::{Deserialize, Serialize};

/// Root configuration for the connectivity monitor.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct MonitorConfig {
    /// Sleep between the end of one cycle and the start of the next, in seconds.
    pub interval_secs: u64,

    /// What to probe and how.
    pub probe: ProbeConfig,

    /// Classification thresholds.
    pub thresholds: ThresholdsConfig,

    /// Notification debounce settings.
    pub alerts: AlertConfig,

    /// Telegram transport settings (credentials come from the environment).
    pub telegram: TelegramConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,
}

impl Default for MonitorConfig {
    fn default() -> Self {
        Self {
            interval_secs: 5,
            probe: ProbeConfig::default(),
            thresholds: ThresholdsConfig::default(),
            alerts: AlertConfig::default(),
            telegram: TelegramConfig::default(),
            observability: ObservabilityConfig::default(),
        }
    }
}

/// Probe configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ProbeConfig {
    /// HTTP endpoints checked every cycle.
    pub targets: Vec<String>,

    /// Host name resolved for the DNS check.
    pub dns_host: String,

    /// Per-check timeout in seconds (DNS and each HTTP check).
    pub timeout_secs: u64,

    /// Count only 2xx/3xx responses as success. By default any response counts.
    pub require_success_status: bool,
}

impl Default for ProbeConfig {
    fn default() -> Self {
        Self {
            targets: vec![
                "https://www.google.com/generate_204".to_string(),
                "https://www.cloudflare.com/cdn-cgi/trace".to_string(),
                "https://github.com".to_string(),
            ],
            dns_host: "google.com".to_string(),
            timeout_secs: 4,
            require_success_status: false,
        }
    }
}

/// Thresholds driving the health classifier.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct ThresholdsConfig {
    /// Successful HTTP checks needed for a cycle to count as up.
    pub min_ok_for_up: usize,

    /// Consecutive not-up cycles before declaring DOWN.
    pub consecutive_failures_for_down: u32,

    /// Average latency at or above which an up cycle is DEGRADED.
    pub degraded_latency_ms: f64,
}

impl Default for ThresholdsConfig {
    fn default() -> Self {
        Self {
            min_ok_for_up: 2,
            consecutive_failures_for_down: 3,
            degraded_latency_ms: 300.0,
        }
    }
}

/// Alert debounce configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct AlertConfig {
    /// Minimum seconds between two alerts for the same transition.
    pub cooldown_secs: f64,
}

impl Default for AlertConfig {
    fn default() -> Self {
        Self { cooldown_secs: 60.0 }
    }
}

/// Telegram Bot API transport configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct TelegramConfig {
    /// Bot API base URL.
    pub api_base: String,

    /// Call `getMe` before each send to fail fast when Telegram is unreachable.
    pub precheck: bool,

    /// Timeout for the `getMe` precheck in seconds.
    pub precheck_timeout_secs: u64,

    /// Timeout for `sendMessage` in seconds.
    pub send_timeout_secs: u64,
}

impl Default for TelegramConfig {
    fn default() -> Self {
        Self {
            api_base: "https://api.telegram.org".to_string(),
            precheck: true,
            precheck_timeout_secs: 10,
            send_timeout_secs: 15,
        }
    }
}

/// Log output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log line format.
    pub log_format: LogFormat,

    /// Expose Prometheus metrics.
    pub metrics_enabled: bool,

    /// Address for the metrics HTTP listener.
    pub metrics_address: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_format: LogFormat::Pretty,
            metrics_enabled: false,
            metrics_address: "127.0.0.1:9184".to_string(),
        }
    }
}
