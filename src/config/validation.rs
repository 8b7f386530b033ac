//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Validate value ranges (timeouts > 0, thresholds reachable)
//! - Check that every URL and address parses
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: MonitorConfig → Result<(), Vec<ValidationError>>
//! - Runs before config is accepted into the system

use std::net::SocketAddr;
use std::time::Duration;

use thiserror::Error;
use url::Url;

use crate::config::schema::MonitorConfig;

/// A single semantic problem with a configuration.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    #[error("probe.targets must not be empty")]
    NoTargets,

    #[error("probe target '{target}' is not an http(s) URL: {reason}")]
    InvalidTarget { target: String, reason: String },

    #[error("probe.dns_host must not be empty")]
    EmptyDnsHost,

    #[error("{field} must be greater than zero")]
    Zero { field: &'static str },

    #[error("thresholds.min_ok_for_up ({min_ok}) must be between 1 and the number of targets ({targets})")]
    UnreachableUp { min_ok: usize, targets: usize },

    #[error("{field} must be a finite, non-negative number (got {value})")]
    InvalidNumber { field: &'static str, value: f64 },

    #[error("{field} is too large to represent as a duration (got {value})")]
    DurationOutOfRange { field: &'static str, value: f64 },

    #[error("telegram.api_base '{0}' is not a valid URL")]
    InvalidApiBase(String),

    #[error("observability.metrics_address '{0}' is not a socket address")]
    InvalidMetricsAddress(String),
}

/// Check a parsed configuration for semantic errors.
pub fn validate_config(config: &MonitorConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.interval_secs == 0 {
        errors.push(ValidationError::Zero { field: "interval_secs" });
    }

    let probe = &config.probe;
    if probe.targets.is_empty() {
        errors.push(ValidationError::NoTargets);
    }
    for target in &probe.targets {
        if let Err(reason) = check_http_url(target) {
            errors.push(ValidationError::InvalidTarget {
                target: target.clone(),
                reason,
            });
        }
    }
    if probe.dns_host.trim().is_empty() {
        errors.push(ValidationError::EmptyDnsHost);
    }
    if probe.timeout_secs == 0 {
        errors.push(ValidationError::Zero { field: "probe.timeout_secs" });
    }

    let thresholds = &config.thresholds;
    if thresholds.min_ok_for_up == 0 || thresholds.min_ok_for_up > probe.targets.len() {
        errors.push(ValidationError::UnreachableUp {
            min_ok: thresholds.min_ok_for_up,
            targets: probe.targets.len(),
        });
    }
    if thresholds.consecutive_failures_for_down == 0 {
        errors.push(ValidationError::Zero {
            field: "thresholds.consecutive_failures_for_down",
        });
    }
    check_non_negative(
        &mut errors,
        "thresholds.degraded_latency_ms",
        thresholds.degraded_latency_ms,
    );
    check_duration_secs(&mut errors, "alerts.cooldown_secs", config.alerts.cooldown_secs);

    let telegram = &config.telegram;
    if Url::parse(&telegram.api_base).is_err() {
        errors.push(ValidationError::InvalidApiBase(telegram.api_base.clone()));
    }
    if telegram.send_timeout_secs == 0 {
        errors.push(ValidationError::Zero { field: "telegram.send_timeout_secs" });
    }
    if telegram.precheck && telegram.precheck_timeout_secs == 0 {
        errors.push(ValidationError::Zero { field: "telegram.precheck_timeout_secs" });
    }

    let observability = &config.observability;
    if observability.metrics_enabled
        && observability.metrics_address.parse::<SocketAddr>().is_err()
    {
        errors.push(ValidationError::InvalidMetricsAddress(
            observability.metrics_address.clone(),
        ));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

fn check_http_url(target: &str) -> Result<(), String> {
    let url = Url::parse(target).map_err(|e| e.to_string())?;
    match url.scheme() {
        "http" | "https" => Ok(()),
        other => Err(format!("unsupported scheme '{}'", other)),
    }
}

fn check_non_negative(errors: &mut Vec<ValidationError>, field: &'static str, value: f64) {
    if !value.is_finite() || value < 0.0 {
        errors.push(ValidationError::InvalidNumber { field, value });
    }
}

fn check_duration_secs(errors: &mut Vec<ValidationError>, field: &'static str, value: f64) {
    if !value.is_finite() || value < 0.0 {
        errors.push(ValidationError::InvalidNumber { field, value });
    } else if Duration::try_from_secs_f64(value).is_err() {
        errors.push(ValidationError::DurationOutOfRange { field, value });
    }
}
