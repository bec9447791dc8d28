use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::{Arc, Mutex, PoisonError};
use std::time::Instant;

use axum::body::Body;
use axum::extract::ConnectInfo;
use axum::extract::Request;
use axum::http::StatusCode;
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};
use tracing::warn;

/// Buckets kept before idle, fully refilled ones are dropped.
const PRUNE_THRESHOLD: usize = 10_000;

/// Token-bucket rate limiter keyed by client IP.
pub struct RateLimiter {
    buckets: Mutex<HashMap<String, Bucket>>,
    max_tokens: u32,
    refill_rate: f64, // tokens per second
}

struct Bucket {
    tokens: f64,
    last_refill: Instant,
}

impl RateLimiter {
    /// Create a rate limiter.
    /// - `max_tokens`: burst capacity
    /// - `per_seconds`: refill one token every N seconds
    pub fn new(max_tokens: u32, per_seconds: f64) -> Self {
        Self {
            buckets: Mutex::new(HashMap::new()),
            max_tokens: max_tokens.max(1),
            refill_rate: 1.0 / per_seconds.max(f64::EPSILON),
        }
    }

    /// Take one token for `key`. Returns false when the bucket is empty.
    pub fn check(&self, key: &str) -> bool {
        let mut buckets = self.buckets.lock().unwrap_or_else(PoisonError::into_inner);
        let now = Instant::now();

        if buckets.len() >= PRUNE_THRESHOLD {
            self.prune(&mut buckets, now);
        }

        let bucket = buckets.entry(key.to_string()).or_insert(Bucket {
            tokens: self.max_tokens as f64,
            last_refill: now,
        });

        let elapsed = now.duration_since(bucket.last_refill).as_secs_f64();
        bucket.tokens = (bucket.tokens + elapsed * self.refill_rate).min(self.max_tokens as f64);
        bucket.last_refill = now;

        if bucket.tokens >= 1.0 {
            bucket.tokens -= 1.0;
            true
        } else {
            false
        }
    }

    /// Drop buckets that would be full by now; they behave like absent ones.
    fn prune(&self, buckets: &mut HashMap<String, Bucket>, now: Instant) {
        let max = self.max_tokens as f64;
        buckets.retain(|_, b| {
            b.tokens + now.duration_since(b.last_refill).as_secs_f64() * self.refill_rate < max
        });
    }
}

/// Extract client IP from request, only trusting proxy headers from loopback.
fn client_ip(req: &Request<Body>) -> String {
    let peer_ip = req
        .extensions()
        .get::<ConnectInfo<SocketAddr>>()
        .map(|c| c.0.ip());
    let from_loopback = peer_ip.is_some_and(|ip| ip.is_loopback());

    if from_loopback {
        if let Some(forwarded) = req.headers().get("x-forwarded-for")
            && let Ok(val) = forwarded.to_str()
            && let Some(first) = val.split(',').next()
        {
            return first.trim().to_string();
        }

        if let Some(real_ip) = req.headers().get("x-real-ip")
            && let Ok(val) = real_ip.to_str()
        {
            return val.trim().to_string();
        }
    }

    peer_ip
        .map(|ip| ip.to_string())
        .unwrap_or_else(|| "unknown".to_string())
}

/// Middleware rate limiting the stats endpoints per client IP.
pub async fn api_rate_limit(req: Request<Body>, next: Next) -> Response {
    if let Some(limiter) = req.extensions().get::<Arc<RateLimiter>>() {
        let ip = client_ip(&req);
        if !limiter.check(&ip) {
            warn!(ip = %ip, path = %req.uri().path(), "rate limit exceeded");
            return (
                StatusCode::TOO_MANY_REQUESTS,
                "Rate limit exceeded. Please try again later.",
            )
                .into_response();
        }
    }
    next.run(req).await
}
