use std::{
    sync::Arc,
    sync::atomic::{AtomicU64, Ordering},
    time::{Duration, Instant},
};
use dashmap::DashMap;
use parking_lot::Mutex;

use crate::errors::AppError;

const EVICT_EVERY_N_CHECKS: u64 = 256;

/// A token bucket which allows fractional tokens for precise refill
#[derive(Debug)]
pub struct TokenBucket {
    capacity: f64,
    tokens: f64,
    refill_per_sec: f64,
    last_refill: Instant,
}

impl TokenBucket {
    fn new(capacity: f64, refill_per_sec: f64, now: Instant) -> Self {
        Self {
            capacity,
            tokens: capacity,
            refill_per_sec,
            last_refill: now,
        }
    }

    fn refill(&mut self, now: Instant) {
        let elapsed = now.saturating_duration_since(self.last_refill).as_secs_f64();
        if elapsed > 0.0 {
            self.tokens = (self.tokens + elapsed * self.refill_per_sec).min(self.capacity);
            self.last_refill = now;
        }
    }

    /// Small epsilon to avoid fp surprises
    fn try_consume(&mut self, now: Instant) -> bool {
        self.refill(now);
        if self.tokens + 1e-12 >= 1.0 {
            self.tokens -= 1.0;
            true
        } else {
            false
        }
    }

    /// Whole seconds until the next token, never less than one.
    fn retry_after_secs(&self) -> u64 {
        let tokens_needed = (1.0 - self.tokens).max(0.0);
        ((tokens_needed / self.refill_per_sec).ceil() as u64).max(1)
    }

    fn is_idle(&self, now: Instant, ttl: Duration) -> bool {
        now.saturating_duration_since(self.last_refill) > ttl
    }
}

/// Per-key send throttle. Buckets idle past `bucket_ttl` are dropped during later checks.
#[derive(Clone)]
pub struct SendLimiter {
    map: Arc<DashMap<String, Arc<Mutex<TokenBucket>>>>,
    checks: Arc<AtomicU64>,
    capacity: f64,
    refill_per_sec: f64,
    bucket_ttl: Duration,
}

impl SendLimiter {
    pub fn per_minute(limit: u32) -> Self {
        let capacity = f64::from(limit.max(1));
        Self::new(capacity, capacity / 60.0, Duration::from_secs(300))
    }

    pub fn new(capacity: f64, refill_per_sec: f64, bucket_ttl: Duration) -> Self {
        Self {
            map: Arc::new(DashMap::new()),
            checks: Arc::new(AtomicU64::new(0)),
            capacity,
            refill_per_sec,
            bucket_ttl,
        }
    }

    fn get_bucket(&self, key: &str, now: Instant) -> Arc<Mutex<TokenBucket>> {
        if let Some(existing) = self.map.get(key) {
            return existing.clone();
        }

        self.map
            .entry(key.to_string())
            .or_insert_with(|| {
                Arc::new(Mutex::new(TokenBucket::new(self.capacity, self.refill_per_sec, now)))
            })
            .clone()
    }

    fn evict_idle(&self, now: Instant) {
        let ttl = self.bucket_ttl;
        self.map.retain(|_, bucket| !bucket.lock().is_idle(now, ttl));
    }

    pub fn check(&self, key: &str) -> Result<(), AppError> {
        self.check_at(key, Instant::now())
    }

    pub fn check_at(&self, key: &str, now: Instant) -> Result<(), AppError> {
        if self.checks.fetch_add(1, Ordering::Relaxed) % EVICT_EVERY_N_CHECKS == EVICT_EVERY_N_CHECKS - 1 {
            self.evict_idle(now);
        }

        let bucket = self.get_bucket(key, now);
        let mut b = bucket.lock();
        if b.try_consume(now) {
            Ok(())
        } else {
            let retry_after_secs = b.retry_after_secs();
            tracing::warn!(key, retry_after_secs, "Send limit reached");
            Err(AppError::RateLimited {
                message: "Too many messages. Please try again later.".to_string(),
                retry_after_secs,
            })
        }
    }

    pub fn tracked_keys(&self) -> usize {
        self.map.len()
    }
}
