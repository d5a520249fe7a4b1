// SPDX-License-Identifier: Apache-2.0

use std::collections::BTreeMap;
use std::fmt::Write as _;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;
use tokio::sync::Mutex;

pub(crate) const METRIC_SUBSYSTEM: &str = "statusboard";
pub(crate) const METRIC_VERSION: &str = env!("CARGO_PKG_VERSION");
const LATENCY_BOUNDS_SECONDS: [f64; 7] = [0.001, 0.005, 0.01, 0.05, 0.1, 0.5, 1.0];

#[derive(Debug, Default, Clone)]
struct LatencyHistogram {
    buckets: [u64; LATENCY_BOUNDS_SECONDS.len()],
    count: u64,
    sum_seconds: f64,
}

impl LatencyHistogram {
    fn observe(&mut self, latency: Duration) {
        let seconds = latency.as_secs_f64();
        for (i, bound) in LATENCY_BOUNDS_SECONDS.iter().enumerate() {
            if seconds <= *bound {
                self.buckets[i] += 1;
            }
        }
        self.count += 1;
        self.sum_seconds += seconds;
    }
}

/// Counters rendered by `/metrics`.
#[derive(Default)]
pub(crate) struct RequestMetrics {
    counts: Mutex<BTreeMap<(String, u16), u64>>,
    latency: Mutex<BTreeMap<String, LatencyHistogram>>,
    pub(crate) urgent_submitted: AtomicU64,
    pub(crate) replies_sent: AtomicU64,
    pub(crate) status_updates: AtomicU64,
    pub(crate) login_failures: AtomicU64,
    pub(crate) login_rate_limited: AtomicU64,
}

impl RequestMetrics {
    pub(crate) async fn observe_request(&self, route: &str, status: u16, latency: Duration) {
        let mut counts = self.counts.lock().await;
        *counts.entry((route.to_string(), status)).or_insert(0) += 1;
        drop(counts);
        self.latency
            .lock()
            .await
            .entry(route.to_string())
            .or_default()
            .observe(latency);
    }

    pub(crate) fn incr(counter: &AtomicU64) {
        counter.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) async fn render(&self) -> String {
        let base = format!("subsystem=\"{METRIC_SUBSYSTEM}\",version=\"{METRIC_VERSION}\"");
        let mut body = String::new();

        body.push_str("# TYPE statusboard_http_requests_total counter\n");
        for ((route, status), count) in self.counts.lock().await.iter() {
            let _ = writeln!(
                body,
                "statusboard_http_requests_total{{{base},route=\"{route}\",status=\"{status}\"}} {count}"
            );
        }

        body.push_str("# TYPE statusboard_http_request_duration_seconds histogram\n");
        for (route, hist) in self.latency.lock().await.iter() {
            let labels = format!("{base},route=\"{route}\"");
            for (i, bound) in LATENCY_BOUNDS_SECONDS.iter().enumerate() {
                let _ = writeln!(
                    body,
                    "statusboard_http_request_duration_seconds_bucket{{{labels},le=\"{bound}\"}} {}",
                    hist.buckets[i]
                );
            }
            let _ = writeln!(
                body,
                "statusboard_http_request_duration_seconds_bucket{{{labels},le=\"+Inf\"}} {}",
                hist.count
            );
            let _ = writeln!(
                body,
                "statusboard_http_request_duration_seconds_sum{{{labels}}} {:.9}",
                hist.sum_seconds
            );
            let _ = writeln!(
                body,
                "statusboard_http_request_duration_seconds_count{{{labels}}} {}",
                hist.count
            );
        }

        for (name, counter) in [
            ("statusboard_urgent_submitted_total", &self.urgent_submitted),
            ("statusboard_replies_sent_total", &self.replies_sent),
            ("statusboard_status_updates_total", &self.status_updates),
            ("statusboard_login_failures_total", &self.login_failures),
            ("statusboard_login_rate_limited_total", &self.login_rate_limited),
        ] {
            let _ = writeln!(body, "# TYPE {name} counter");
            let _ = writeln!(body, "{name}{{{base}}} {}", counter.load(Ordering::Relaxed));
        }
        body
    }
}
