//! Human-readable alert text.

use std::fmt::Write;

use chrono::{DateTime, TimeZone};

use crate::health::{CycleSummary, HealthState};

/// Build the alert for a `from → to` change observed in `cycle`.
pub fn compose_alert<Tz>(
    from: HealthState,
    to: HealthState,
    at: &DateTime<Tz>,
    cycle: &CycleSummary,
) -> String
where
    Tz: TimeZone,
    Tz::Offset: std::fmt::Display,
{
    let mut msg = String::new();

    // Writing into a String cannot fail.
    let _ = writeln!(msg, "📡 ISP MONITOR");
    let _ = writeln!(msg, "State: {} ➜ {}", from, to);
    let _ = writeln!(msg, "Time: {}", at.format("%Y-%m-%d %H:%M:%S"));
    let _ = writeln!(
        msg,
        "DNS: {} ({:.0}ms)",
        if cycle.dns_ok { "OK" } else { "FAIL" },
        cycle.dns_latency_ms
    );
    let _ = writeln!(msg, "HTTP OK: {}/{}", cycle.ok_count, cycle.total());
    if let Some(avg) = cycle.average_latency_ms {
        let _ = writeln!(msg, "Average latency: {:.0} ms", avg);
    }

    msg.push('\n');
    let lines: Vec<String> = cycle
        .http_results
        .iter()
        .map(|r| {
            let mark = if r.success { "✅" } else { "❌" };
            match r.latency_ms {
                Some(ms) => format!("{} {} ({:.0}ms)", mark, r.target, ms),
                None => format!("{} {}", mark, r.target),
            }
        })
        .collect();
    msg.push_str(&lines.join("\n"));

    msg
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::health::ProbeResult;
    use chrono::Utc;

    #[test]
    fn test_alert_carries_every_field() {
        let cycle = CycleSummary::new(
            true,
            12.3,
            vec![
                ProbeResult::success("https://a.example", 140.0, 204),
                ProbeResult::success("https://b.example", 160.0, 200),
                ProbeResult::failure("https://c.example", Some(4000.0)),
            ],
        );
        let at = Utc.with_ymd_and_hms(2026, 3, 1, 8, 30, 5).unwrap();

        let msg = compose_alert(HealthState::Unknown, HealthState::Up, &at, &cycle);

        assert!(msg.contains("State: UNKNOWN ➜ UP"));
        assert!(msg.contains("Time: 2026-03-01 08:30:05"));
        assert!(msg.contains("DNS: OK (12ms)"));
        assert!(msg.contains("HTTP OK: 2/3"));
        assert!(msg.contains("Average latency: 150 ms"));
        assert!(msg.contains("✅ https://a.example (140ms)"));
        assert!(msg.contains("❌ https://c.example (4000ms)"));
        assert!(msg.ends_with("❌ https://c.example (4000ms)"));
    }

    #[test]
    fn test_alert_omits_absent_latency() {
        let cycle = CycleSummary::new(false, 4000.0, vec![ProbeResult::failure("https://a.example", None)]);
        let at = Utc.with_ymd_and_hms(2026, 3, 1, 8, 30, 5).unwrap();

        let msg = compose_alert(HealthState::Up, HealthState::Down, &at, &cycle);

        assert!(msg.contains("DNS: FAIL (4000ms)"));
        assert!(msg.contains("HTTP OK: 0/1"));
        assert!(!msg.contains("Average latency"));
        assert!(msg.contains("❌ https://a.example"));
    }
}
