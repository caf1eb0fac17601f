//! Application-layer rate limiting for the login route
//!
//! Counters live in process memory only: they reset on restart and are not
//! shared between instances.

use axum::{
    extract::{ConnectInfo, Request, State},
    http::{HeaderValue, header},
    middleware::Next,
    response::{IntoResponse, Response},
};
use shared::error::AppError;
use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Mutex;
use tokio::time::Instant;

/// Attempts allowed per window
pub const MAX_LOGIN_ATTEMPTS: u32 = 5;
/// Window length
pub const LOGIN_WINDOW: Duration = Duration::from_secs(15 * 60);
/// How often stale entries are swept
pub const CLEANUP_INTERVAL: Duration = Duration::from_secs(30 * 60);

struct IpEntry {
    count: u32,
    window_start: Instant,
}

/// Client IP as seen by the rate limiter, available to handlers behind it
#[derive(Debug, Clone)]
pub struct ClientIp(pub String);

#[derive(Clone)]
pub struct LoginRateLimiter {
    /// IP -> entry
    inner: Arc<Mutex<HashMap<String, IpEntry>>>,
    max_attempts: u32,
    window: Duration,
}

impl Default for LoginRateLimiter {
    fn default() -> Self {
        Self::new()
    }
}

impl LoginRateLimiter {
    pub fn new() -> Self {
        Self::with_limits(MAX_LOGIN_ATTEMPTS, LOGIN_WINDOW)
    }

    pub fn with_limits(max_attempts: u32, window: Duration) -> Self {
        Self {
            inner: Arc::new(Mutex::new(HashMap::new())),
            max_attempts,
            window,
        }
    }

    /// Record an attempt. `Err(secs)` carries the wait before the window reopens.
    pub async fn check(&self, ip: &str) -> Result<(), u64> {
        self.check_at(ip, Instant::now()).await
    }

    pub(crate) async fn check_at(&self, ip: &str, now: Instant) -> Result<(), u64> {
        let mut map = self.inner.lock().await;

        let entry = map.entry(ip.to_owned()).or_insert_with(|| IpEntry {
            count: 0,
            window_start: now,
        });

        // Reset window if expired
        let elapsed = now.saturating_duration_since(entry.window_start);
        if elapsed >= self.window {
            entry.count = 0;
            entry.window_start = now;
        }

        if entry.count >= self.max_attempts {
            let remaining = self
                .window
                .saturating_sub(now.saturating_duration_since(entry.window_start));
            return Err(remaining.as_secs().max(1));
        }

        entry.count += 1;
        Ok(())
    }

    /// Forget an IP (after a successful login)
    pub async fn reset(&self, ip: &str) {
        self.inner.lock().await.remove(ip);
    }

    /// Remove entries whose window has passed
    pub async fn cleanup(&self) {
        self.cleanup_at(Instant::now()).await;
    }

    async fn cleanup_at(&self, now: Instant) {
        let mut map = self.inner.lock().await;
        let window = self.window;
        map.retain(|_, entry| now.saturating_duration_since(entry.window_start) < window);
    }

    #[cfg(test)]
    async fn tracked(&self) -> usize {
        self.inner.lock().await.len()
    }
}

/// Extract client IP: the peer address, or the last X-Forwarded-For hop when
/// the server sits behind a trusted reverse proxy.
pub fn extract_ip(request: &Request, trust_proxy: bool) -> String {
    if trust_proxy
        && let Some(hop) = request
            .headers()
            .get_all("x-forwarded-for")
            .iter()
            .filter_map(|v| v.to_str().ok())
            .flat_map(|v| v.split(','))
            .map(str::trim)
            .filter(|hop| !hop.is_empty())
            .last()
    {
        // The proxy appends the address it saw; earlier hops are client-supplied
        return hop.to_owned();
    }

    request
        .extensions()
        .get::<ConnectInfo<SocketAddr>>()
        .map(|ci| ci.0.ip().to_string())
        .unwrap_or_else(|| "unknown".to_owned())
}

fn too_many_attempts(retry_after_secs: u64) -> Response {
    let mut response = AppError::too_many_attempts(retry_after_secs).into_response();
    if let Ok(value) = HeaderValue::from_str(&retry_after_secs.to_string()) {
        response.headers_mut().insert(header::RETRY_AFTER, value);
    }
    response
}

/// Rate limit middleware for login: 5 attempts / 15 minutes per IP
pub async fn login_rate_limit(
    State(state): State<crate::state::AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, Response> {
    let ip = extract_ip(&request, state.trust_proxy);
    if let Err(retry_after) = state.rate_limiter.check(&ip).await {
        tracing::warn!(ip = %ip, "Login rate limit exceeded");
        return Err(too_many_attempts(retry_after));
    }
    request.extensions_mut().insert(ClientIp(ip));
    Ok(next.run(request).await)
}

/// Periodically sweep stale limiter entries
pub fn spawn_cleanup(limiter: LoginRateLimiter) {
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(CLEANUP_INTERVAL);
        loop {
            interval.tick().await;
            limiter.cleanup().await;
        }
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;

    #[tokio::test]
    async fn test_sixth_attempt_rejected() {
        let limiter = LoginRateLimiter::new();
        let t0 = Instant::now();
        for _ in 0..MAX_LOGIN_ATTEMPTS {
            assert!(limiter.check_at("10.0.0.1", t0).await.is_ok());
        }
        let retry = limiter
            .check_at("10.0.0.1", t0 + Duration::from_secs(60))
            .await
            .unwrap_err();
        assert_eq!(retry, 14 * 60);

        // Other clients are unaffected
        assert!(limiter.check_at("10.0.0.2", t0).await.is_ok());
    }

    #[tokio::test]
    async fn test_window_restarts() {
        let limiter = LoginRateLimiter::new();
        let t0 = Instant::now();
        for _ in 0..MAX_LOGIN_ATTEMPTS {
            limiter.check_at("10.0.0.1", t0).await.unwrap();
        }
        assert!(limiter.check_at("10.0.0.1", t0).await.is_err());
        assert!(
            limiter
                .check_at("10.0.0.1", t0 + LOGIN_WINDOW)
                .await
                .is_ok()
        );
    }

    #[tokio::test]
    async fn test_reset_clears_counter() {
        let limiter = LoginRateLimiter::new();
        let t0 = Instant::now();
        for _ in 0..MAX_LOGIN_ATTEMPTS {
            limiter.check_at("10.0.0.1", t0).await.unwrap();
        }
        limiter.reset("10.0.0.1").await;
        assert!(limiter.check_at("10.0.0.1", t0).await.is_ok());
    }

    #[tokio::test]
    async fn test_cleanup_drops_stale_entries() {
        let limiter = LoginRateLimiter::new();
        let t0 = Instant::now();
        limiter.check_at("10.0.0.1", t0).await.unwrap();
        limiter
            .check_at("10.0.0.2", t0 + Duration::from_secs(600))
            .await
            .unwrap();

        limiter.cleanup_at(t0 + LOGIN_WINDOW).await;
        assert_eq!(limiter.tracked().await, 1);
    }

    fn request_from(peer: &str, forwarded: Option<&str>) -> Request {
        let mut builder = Request::builder();
        if let Some(forwarded) = forwarded {
            builder = builder.header("x-forwarded-for", forwarded);
        }
        let mut request = builder.body(Body::empty()).unwrap();
        let addr: SocketAddr = peer.parse().unwrap();
        request.extensions_mut().insert(ConnectInfo(addr));
        request
    }

    #[test]
    fn test_extract_ip_ignores_forwarded_header_by_default() {
        let request = request_from("192.0.2.10:50000", Some("198.51.100.1"));
        assert_eq!(extract_ip(&request, false), "192.0.2.10");

        let request = Request::builder().body(Body::empty()).unwrap();
        assert_eq!(extract_ip(&request, false), "unknown");
    }

    #[test]
    fn test_extract_ip_behind_proxy_takes_last_hop() {
        let request = request_from("10.0.0.1:50000", Some("198.51.100.1, 203.0.113.7"));
        assert_eq!(extract_ip(&request, true), "203.0.113.7");

        let request = request_from("10.0.0.1:50000", Some(" , "));
        assert_eq!(extract_ip(&request, true), "10.0.0.1");

        let request = request_from("10.0.0.1:50000", None);
        assert_eq!(extract_ip(&request, true), "10.0.0.1");
    }

    #[test]
    fn test_too_many_attempts_response() {
        let response = too_many_attempts(600);
        assert_eq!(response.status(), axum::http::StatusCode::TOO_MANY_REQUESTS);
        assert_eq!(response.headers()[header::RETRY_AFTER], "600");
    }
}
