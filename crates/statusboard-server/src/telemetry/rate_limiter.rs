// SPDX-License-Identifier: Apache-2.0

use crate::config::RateLimitConfig;
use std::collections::HashMap;
use std::time::Instant;
use tokio::sync::Mutex;

/// Bucket count that triggers a sweep of fully refilled buckets.
const MAX_TRACKED_CLIENTS: usize = 4096;

#[derive(Debug, Clone)]
struct Bucket {
    tokens: f64,
    last_refill: Instant,
}

impl Bucket {
    fn refilled(&self, now: Instant, cfg: &RateLimitConfig) -> f64 {
        let elapsed = now.duration_since(self.last_refill).as_secs_f64();
        (self.tokens + (elapsed * cfg.refill_per_sec)).min(cfg.capacity)
    }
}

/// Token bucket per client key.
pub(crate) struct RateLimiter {
    buckets: Mutex<HashMap<String, Bucket>>,
    max_buckets: usize,
}

impl Default for RateLimiter {
    fn default() -> Self {
        Self::with_max_buckets(MAX_TRACKED_CLIENTS)
    }
}

impl RateLimiter {
    pub(crate) fn with_max_buckets(max_buckets: usize) -> Self {
        Self {
            buckets: Mutex::new(HashMap::new()),
            max_buckets: max_buckets.max(1),
        }
    }

    pub(crate) async fn allow(&self, key: &str, cfg: &RateLimitConfig) -> bool {
        self.allow_at(key, cfg, Instant::now()).await
    }

    async fn allow_at(&self, key: &str, cfg: &RateLimitConfig, now: Instant) -> bool {
        let mut lock = self.buckets.lock().await;
        if lock.len() >= self.max_buckets && !lock.contains_key(key) {
            // A full bucket behaves exactly like a fresh one.
            lock.retain(|_, bucket| bucket.refilled(now, cfg) < cfg.capacity);
        }
        let bucket = lock.entry(key.to_string()).or_insert_with(|| Bucket {
            tokens: cfg.capacity,
            last_refill: now,
        });
        bucket.tokens = bucket.refilled(now, cfg);
        bucket.last_refill = now;
        if bucket.tokens >= 1.0 {
            bucket.tokens -= 1.0;
            true
        } else {
            false
        }
    }

    #[cfg(test)]
    async fn tracked(&self) -> usize {
        self.buckets.lock().await.len()
    }
}
