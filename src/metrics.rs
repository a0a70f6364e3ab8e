//! Prometheus request metrics.
//!
//! Recording goes through the `metrics` facade, so it is a no-op until
//! [`init_metrics`] installs the exporter.

use std::time::Duration;

use anyhow::Context;
use axum::{Router, routing::get};
use metrics::{counter, histogram};
use metrics_exporter_prometheus::{Matcher, PrometheusBuilder, PrometheusHandle};

const REQUEST_DURATION: &str = "http_request_duration_seconds";

const DURATION_BUCKETS: &[f64] = &[
    0.001, 0.005, 0.01, 0.025, 0.05, 0.1, 0.25, 0.5, 1.0, 2.5, 5.0, 10.0,
];

/// Installs the global Prometheus recorder and starts its upkeep task.
pub fn init_metrics() -> anyhow::Result<PrometheusHandle> {
    let handle = PrometheusBuilder::new()
        .set_buckets_for_metric(Matcher::Full(REQUEST_DURATION.to_string()), DURATION_BUCKETS)
        .context("invalid histogram buckets")?
        .install_recorder()
        .context("failed to install Prometheus recorder")?;

    let upkeep = handle.clone();
    tokio::spawn(async move {
        loop {
            tokio::time::sleep(Duration::from_secs(5)).await;
            upkeep.run_upkeep();
        }
    });

    Ok(handle)
}

/// `GET /metrics` in the Prometheus text format.
pub fn metrics_router(handle: PrometheusHandle) -> Router {
    Router::new().route("/metrics", get(move || async move { handle.render() }))
}

fn status_class(status: u16) -> &'static str {
    match status {
        100..=199 => "1xx",
        200..=299 => "2xx",
        300..=399 => "3xx",
        400..=499 => "4xx",
        500..=599 => "5xx",
        _ => "other",
    }
}

pub fn record_request(method: &str, path: &str, status: u16, latency: Duration) {
    counter!(
        "http_requests_total",
        "method" => method.to_string(),
        "path" => path.to_string(),
        "status" => status.to_string()
    )
    .increment(1);

    counter!("http_requests_by_status", "status_class" => status_class(status)).increment(1);

    histogram!(REQUEST_DURATION, "method" => method.to_string(), "path" => path.to_string())
        .record(latency.as_secs_f64());
}

/// Counts a login attempt; `outcome` is `success`, `rejected` or `error`.
pub fn track_login(outcome: &'static str) {
    counter!("user_logins_total", "outcome" => outcome).increment(1);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_class() {
        assert_eq!(status_class(200), "2xx");
        assert_eq!(status_class(201), "2xx");
        assert_eq!(status_class(401), "4xx");
        assert_eq!(status_class(429), "4xx");
        assert_eq!(status_class(500), "5xx");
        assert_eq!(status_class(999), "other");
    }

    #[test]
    fn test_request_metrics_are_rendered() {
        let recorder = PrometheusBuilder::new().build_recorder();
        let handle = recorder.handle();

        metrics::with_local_recorder(&recorder, || {
            record_request("GET", "/me", 200, Duration::from_millis(12));
            record_request("GET", "/me", 401, Duration::from_millis(3));
            track_login("rejected");
        });

        let rendered = handle.render();
        assert!(rendered.contains("http_requests_total"));
        assert!(rendered.contains("path=\"/me\""));
        assert!(rendered.contains("status=\"401\""));
        assert!(rendered.contains("status_class=\"2xx\""));
        assert!(rendered.contains(REQUEST_DURATION));
        assert!(rendered.contains("user_logins_total{outcome=\"rejected\"} 1"));
    }
}
