//! Prober tests against local mock backends.

use std::time::Duration;

use isp_monitor::config::ProbeConfig;
use isp_monitor::health::Prober;

mod common;

fn probe_config(targets: Vec<String>) -> ProbeConfig {
    ProbeConfig {
        targets,
        dns_host: "localhost".to_string(),
        timeout_secs: 1,
        require_success_status: false,
    }
}

#[tokio::test]
async fn test_all_targets_answering() {
    let a = common::start_mock_backend(204).await;
    let b = common::start_mock_backend(200).await;
    let targets = vec![format!("http://{}/generate_204", a), format!("http://{}/", b)];

    let prober = Prober::new(probe_config(targets.clone())).unwrap();
    let summary = prober.probe_cycle().await;

    assert!(summary.dns_ok, "localhost should resolve");
    assert_eq!(summary.ok_count, 2);
    assert!(summary.average_latency_ms.is_some());

    let order: Vec<&str> = summary.http_results.iter().map(|r| r.target.as_str()).collect();
    assert_eq!(order, vec![targets[0].as_str(), targets[1].as_str()]);
    assert_eq!(summary.http_results[0].status_code, Some(204));
}

#[tokio::test]
async fn test_refused_connection_is_a_failed_result() {
    let up = common::start_mock_backend(200).await;
    let down = common::closed_port().await;

    let prober = Prober::new(probe_config(vec![
        format!("http://{}/", up),
        format!("http://{}/", down),
    ]))
    .unwrap();
    let summary = prober.probe_cycle().await;

    assert_eq!(summary.ok_count, 1);
    let failed = &summary.http_results[1];
    assert!(!failed.success);
    assert_eq!(failed.status_code, None);
    assert!(failed.latency_ms.is_some());
}

#[tokio::test]
async fn test_hung_target_times_out() {
    let silent = common::start_silent_backend().await;
    let prober = Prober::new(probe_config(vec![format!("http://{}/", silent)])).unwrap();

    let started = std::time::Instant::now();
    let result = prober.check_http(&format!("http://{}/", silent)).await;

    assert!(!result.success);
    assert!(started.elapsed() < Duration::from_secs(3));
    let summary = prober.probe_cycle().await;
    assert_eq!(summary.ok_count, 0);
    assert_eq!(summary.average_latency_ms, None);
}

#[tokio::test]
async fn test_error_status_counts_as_reachable_by_default() {
    let broken = common::start_mock_backend(503).await;
    let target = format!("http://{}/", broken);

    let lenient = Prober::new(probe_config(vec![target.clone()])).unwrap();
    let result = lenient.check_http(&target).await;
    assert!(result.success);
    assert_eq!(result.status_code, Some(503));

    let mut strict_config = probe_config(vec![target.clone()]);
    strict_config.require_success_status = true;
    let strict = Prober::new(strict_config).unwrap();
    let result = strict.check_http(&target).await;
    assert!(!result.success);
    assert_eq!(result.status_code, Some(503));
}

#[tokio::test]
async fn test_unresolvable_dns_host() {
    let mut config = probe_config(vec!["http://127.0.0.1:9/".to_string()]);
    config.dns_host = "name.invalid".to_string();

    let prober = Prober::new(config).unwrap();
    let (ok, latency) = prober.check_dns().await;

    assert!(!ok);
    assert!(latency >= 0.0);
}
