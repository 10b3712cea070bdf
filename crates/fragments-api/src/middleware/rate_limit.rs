//! Sliding-window rate limiter for the unauthenticated auth endpoints.

use std::net::{IpAddr, SocketAddr};
use std::sync::Arc;
use std::time::{Duration, Instant};

use axum::extract::{ConnectInfo, Request, State};
use axum::http::{HeaderMap, HeaderValue, header};
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};
use dashmap::DashMap;
use tracing::warn;

use fragments_core::error::AppError;

use crate::error::ApiError;
use crate::state::AppState;

/// Tracked-address count above which idle entries are swept inline.
const PRUNE_THRESHOLD: usize = 10_000;

/// Per-IP sliding window of request instants.
#[derive(Debug, Clone)]
pub struct RateLimiter {
    hits: Arc<DashMap<IpAddr, Vec<Instant>>>,
    max_requests: usize,
    window: Duration,
}

impl RateLimiter {
    /// Allows `max_requests` per `window` for each client address.
    pub fn new(max_requests: usize, window: Duration) -> Self {
        Self {
            hits: Arc::new(DashMap::new()),
            max_requests,
            window,
        }
    }

    /// Records a request from `ip` at `now`.
    ///
    /// Returns the time until a slot frees up when the window is full.
    pub fn check_at(&self, ip: IpAddr, now: Instant) -> Result<(), Duration> {
        let mut entry = self.hits.entry(ip).or_default();
        let timestamps = entry.value_mut();

        timestamps.retain(|&t| {
            now.checked_duration_since(t)
                .map(|d| d < self.window)
                .unwrap_or(true)
        });

        if timestamps.len() >= self.max_requests {
            let oldest = timestamps.first().copied().unwrap_or(now);
            let elapsed = now.checked_duration_since(oldest).unwrap_or_default();
            return Err(self.window.saturating_sub(elapsed).max(Duration::from_secs(1)));
        }

        timestamps.push(now);
        Ok(())
    }

    /// Records a request from `ip` now.
    pub fn check(&self, ip: IpAddr) -> Result<(), Duration> {
        self.check_at(ip, Instant::now())
    }

    /// Drops addresses with no requests left inside the window.
    pub fn prune(&self) {
        let now = Instant::now();
        self.hits.retain(|_, timestamps| {
            timestamps.retain(|&t| {
                now.checked_duration_since(t)
                    .map(|d| d < self.window)
                    .unwrap_or(true)
            });
            !timestamps.is_empty()
        });
    }

    /// Number of addresses currently tracked.
    pub fn tracked(&self) -> usize {
        self.hits.len()
    }
}

/// Client address from `X-Forwarded-For` (first hop), `X-Real-IP`, then
/// the socket peer. Falls back to loopback when none is available.
pub fn client_ip(headers: &HeaderMap, peer: Option<IpAddr>) -> IpAddr {
    if let Some(ip) = headers
        .get("x-forwarded-for")
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.split(',').next())
        .and_then(|first| first.trim().parse::<IpAddr>().ok())
    {
        return ip;
    }
    if let Some(ip) = headers
        .get("x-real-ip")
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.trim().parse::<IpAddr>().ok())
    {
        return ip;
    }
    peer.unwrap_or(IpAddr::from([127, 0, 0, 1]))
}

/// Rejects requests over the auth limit with 429 and `Retry-After`.
pub async fn auth_rate_limit(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Response {
    let peer = request
        .extensions()
        .get::<ConnectInfo<SocketAddr>>()
        .map(|info| info.0.ip());
    let ip = client_ip(request.headers(), peer);

    if state.auth_rate_limiter.tracked() > PRUNE_THRESHOLD {
        state.auth_rate_limiter.prune();
    }

    match state.auth_rate_limiter.check(ip) {
        Ok(()) => next.run(request).await,
        Err(retry_after) => {
            let secs = retry_after.as_secs().max(1);
            warn!(ip = %ip, path = %request.uri().path(), retry_after = secs, "Auth rate limit exceeded");

            let mut response = ApiError(AppError::rate_limited(format!(
                "Too many requests. Please retry after {secs} seconds"
            )))
            .into_response();
            response
                .headers_mut()
                .insert(header::RETRY_AFTER, HeaderValue::from(secs));
            response
        }
    }
}
