//! Security Headers Middleware
//!
//! Adds browser hardening headers to every HTTP response. A header the
//! handler already set is left alone.

use axum::{
    body::Body,
    http::{header, HeaderName, HeaderValue, Request, Response},
};
use std::{
    future::Future,
    pin::Pin,
    sync::Arc,
    task::{Context, Poll},
};
use tower::{Layer, Service};

/// Swagger UI is served from unpkg, so scripts and styles allow that host.
const DEFAULT_CSP: &str = "default-src 'self'; \
    script-src 'self' 'unsafe-inline' https://unpkg.com; \
    style-src 'self' 'unsafe-inline' https://unpkg.com; \
    img-src 'self' data: https:; \
    connect-src 'self' ws: wss:; \
    frame-ancestors 'none'; \
    object-src 'none'";

/// Security headers configuration
#[derive(Clone, Debug)]
pub struct SecurityHeadersConfig {
    /// Send Strict-Transport-Security (only meaningful behind HTTPS)
    pub enable_hsts: bool,
    /// HSTS max-age in seconds
    pub hsts_max_age: u64,
    pub content_security_policy: String,
    pub referrer_policy: String,
}

impl Default for SecurityHeadersConfig {
    fn default() -> Self {
        Self {
            enable_hsts: false,
            hsts_max_age: 15_552_000, // 180 days
            content_security_policy: DEFAULT_CSP.to_string(),
            referrer_policy: "no-referrer".to_string(),
        }
    }
}

impl SecurityHeadersConfig {
    /// HSTS is only sent in production.
    pub fn for_environment(environment: &str) -> Self {
        Self {
            enable_hsts: environment.eq_ignore_ascii_case("production"),
            ..Default::default()
        }
    }

    fn headers(&self) -> Vec<(HeaderName, HeaderValue)> {
        let mut headers = vec![
            (
                header::X_CONTENT_TYPE_OPTIONS,
                HeaderValue::from_static("nosniff"),
            ),
            (header::X_FRAME_OPTIONS, HeaderValue::from_static("SAMEORIGIN")),
            (header::X_XSS_PROTECTION, HeaderValue::from_static("0")),
            (
                header::X_DNS_PREFETCH_CONTROL,
                HeaderValue::from_static("off"),
            ),
            (
                HeaderName::from_static("cross-origin-opener-policy"),
                HeaderValue::from_static("same-origin"),
            ),
            (
                HeaderName::from_static("cross-origin-resource-policy"),
                HeaderValue::from_static("same-origin"),
            ),
            (
                HeaderName::from_static("origin-agent-cluster"),
                HeaderValue::from_static("?1"),
            ),
        ];

        if let Ok(value) = HeaderValue::from_str(&self.content_security_policy) {
            headers.push((header::CONTENT_SECURITY_POLICY, value));
        }
        if let Ok(value) = HeaderValue::from_str(&self.referrer_policy) {
            headers.push((header::REFERRER_POLICY, value));
        }
        if self.enable_hsts {
            let hsts = format!("max-age={}; includeSubDomains", self.hsts_max_age);
            if let Ok(value) = HeaderValue::from_str(&hsts) {
                headers.push((header::STRICT_TRANSPORT_SECURITY, value));
            }
        }

        headers
    }
}

/// Layer that adds security headers to responses
#[derive(Clone)]
pub struct SecurityHeadersLayer {
    headers: Arc<Vec<(HeaderName, HeaderValue)>>,
}

impl SecurityHeadersLayer {
    pub fn with_config(config: SecurityHeadersConfig) -> Self {
        Self {
            headers: Arc::new(config.headers()),
        }
    }
}

impl<S> Layer<S> for SecurityHeadersLayer {
    type Service = SecurityHeadersMiddleware<S>;

    fn layer(&self, inner: S) -> Self::Service {
        SecurityHeadersMiddleware {
            inner,
            headers: self.headers.clone(),
        }
    }
}

/// Middleware service that adds security headers
#[derive(Clone)]
pub struct SecurityHeadersMiddleware<S> {
    inner: S,
    headers: Arc<Vec<(HeaderName, HeaderValue)>>,
}

impl<S> Service<Request<Body>> for SecurityHeadersMiddleware<S>
where
    S: Service<Request<Body>, Response = Response<Body>> + Clone + Send + 'static,
    S::Future: Send + 'static,
{
    type Response = S::Response;
    type Error = S::Error;
    type Future = Pin<Box<dyn Future<Output = Result<Self::Response, Self::Error>> + Send>>;

    fn poll_ready(&mut self, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.inner.poll_ready(cx)
    }

    fn call(&mut self, request: Request<Body>) -> Self::Future {
        let clone = self.inner.clone();
        let mut inner = std::mem::replace(&mut self.inner, clone);
        let extra = self.headers.clone();

        Box::pin(async move {
            let mut response = inner.call(request).await?;
            let headers = response.headers_mut();

            for (name, value) in extra.iter() {
                if !headers.contains_key(name) {
                    headers.insert(name.clone(), value.clone());
                }
            }

            Ok(response)
        })
    }
}

/// Create the security headers layer for `environment`
pub fn create_security_headers_layer(environment: &str) -> SecurityHeadersLayer {
    SecurityHeadersLayer::with_config(SecurityHeadersConfig::for_environment(environment))
}
