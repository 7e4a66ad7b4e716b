//! Rate limiting middleware
//!
//! Fixed-window request limiter keyed by client IP. Excess requests are
//! answered with 429 before they reach a handler.

use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;
use std::time::{Duration, Instant};

use actix_web::body::EitherBody;
use actix_web::dev::{Service, ServiceRequest, ServiceResponse, Transform, forward_ready};
use actix_web::{Error, HttpResponse};
use dashmap::DashMap;
use futures::future::{Ready, ready};
use tracing::warn;

use crate::config::RateLimitConfig;

/// Stale-entry sweep trigger; keeps the hit map bounded under churn
const MAX_TRACKED_CLIENTS: usize = 10_000;

#[derive(Debug)]
struct Window {
    count: u32,
    started: Instant,
}

/// Shared fixed-window counters
#[derive(Debug)]
struct WindowCounter {
    enabled: bool,
    max_requests: u32,
    window: Duration,
    hits: DashMap<String, Window>,
}

impl WindowCounter {
    /// Record a hit; true when the client is within its allowance
    fn record(&self, peer: &str) -> bool {
        if !self.enabled {
            return true;
        }

        let now = Instant::now();
        let allowed = {
            let mut entry = self.hits.entry(peer.to_string()).or_insert(Window {
                count: 0,
                started: now,
            });
            if now.duration_since(entry.started) > self.window {
                entry.count = 0;
                entry.started = now;
            }
            entry.count += 1;
            entry.count <= self.max_requests
        };

        if self.hits.len() > MAX_TRACKED_CLIENTS {
            let window = self.window;
            self.hits
                .retain(|_, state| now.duration_since(state.started) <= window);
        }

        allowed
    }
}

/// Rate limit middleware for Actix-web
#[derive(Clone)]
pub struct RateLimit {
    counter: Arc<WindowCounter>,
}

impl RateLimit {
    pub fn new(config: &RateLimitConfig) -> Self {
        Self {
            counter: Arc::new(WindowCounter {
                enabled: config.enabled,
                max_requests: config.max_requests,
                window: Duration::from_secs(config.window_secs),
                hits: DashMap::new(),
            }),
        }
    }
}

impl<S, B> Transform<S, ServiceRequest> for RateLimit
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error>,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type InitError = ();
    type Transform = RateLimitService<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(RateLimitService {
            service,
            counter: Arc::clone(&self.counter),
        }))
    }
}

/// Service implementation for rate limit middleware
pub struct RateLimitService<S> {
    service: S,
    counter: Arc<WindowCounter>,
}

impl<S, B> Service<ServiceRequest> for RateLimitService<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error>,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Future = Pin<Box<dyn Future<Output = Result<Self::Response, Self::Error>>>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let peer = req
            .peer_addr()
            .map(|addr| addr.ip().to_string())
            .unwrap_or_else(|| "unknown".to_string());

        if !self.counter.record(&peer) {
            warn!(peer = %peer, "rate limit exceeded");
            let response = HttpResponse::TooManyRequests().json(serde_json::json!({
                "error": "Too many requests, please try again later."
            }));
            let res = req.into_response(response).map_into_right_body();
            return Box::pin(async move { Ok(res) });
        }

        let fut = self.service.call(req);
        Box::pin(async move { Ok(fut.await?.map_into_left_body()) })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn counter(max_requests: u32, window: Duration) -> WindowCounter {
        WindowCounter {
            enabled: true,
            max_requests,
            window,
            hits: DashMap::new(),
        }
    }

    #[test]
    fn allows_up_to_the_limit_then_rejects() {
        let counter = counter(3, Duration::from_secs(60));
        assert!(counter.record("1.2.3.4"));
        assert!(counter.record("1.2.3.4"));
        assert!(counter.record("1.2.3.4"));
        assert!(!counter.record("1.2.3.4"));
    }

    #[test]
    fn clients_are_tracked_independently() {
        let counter = counter(1, Duration::from_secs(60));
        assert!(counter.record("1.2.3.4"));
        assert!(!counter.record("1.2.3.4"));
        assert!(counter.record("5.6.7.8"));
    }

    #[test]
    fn window_expiry_resets_the_count() {
        let counter = counter(1, Duration::from_millis(20));
        assert!(counter.record("1.2.3.4"));
        assert!(!counter.record("1.2.3.4"));
        std::thread::sleep(Duration::from_millis(30));
        assert!(counter.record("1.2.3.4"));
    }

    #[test]
    fn disabled_limiter_always_allows() {
        let counter = WindowCounter {
            enabled: false,
            max_requests: 1,
            window: Duration::from_secs(60),
            hits: DashMap::new(),
        };
        for _ in 0..10 {
            assert!(counter.record("1.2.3.4"));
        }
    }
}
