//! Prometheus Metrics Module
//!
//! Provides application-wide metrics collection using Prometheus.
//!
//! # Metrics Collected
//! - HTTP request counts by method, route, and status
//! - HTTP request latency histograms
//! - Open relay (WebSocket) connections
//! - Messages persisted through `POST /api/msgs`

use once_cell::sync::Lazy;
use prometheus::{
    Encoder, HistogramOpts, HistogramVec, IntCounter, IntCounterVec, IntGauge, Opts, Registry,
    TextEncoder,
};

const NAMESPACE: &str = "messaging_backend";

/// All collectors, registered against a private registry.
pub struct Metrics {
    registry: Registry,
    http_requests_total: IntCounterVec,
    http_request_duration_seconds: HistogramVec,
    relay_connections_active: IntGauge,
    messages_sent_total: IntCounter,
}

impl Metrics {
    fn new() -> prometheus::Result<Self> {
        let registry = Registry::new();

        let http_requests_total = IntCounterVec::new(
            Opts::new("http_requests_total", "Total number of HTTP requests").namespace(NAMESPACE),
            &["method", "path", "status"],
        )?;

        let buckets = vec![0.001, 0.005, 0.01, 0.025, 0.05, 0.1, 0.25, 0.5, 1.0, 2.5, 5.0, 10.0];
        let http_request_duration_seconds = HistogramVec::new(
            HistogramOpts::new(
                "http_request_duration_seconds",
                "HTTP request latency in seconds",
            )
            .namespace(NAMESPACE)
            .buckets(buckets),
            &["method", "path"],
        )?;

        let relay_connections_active = IntGauge::with_opts(
            Opts::new(
                "relay_connections_active",
                "Number of open relay WebSocket connections",
            )
            .namespace(NAMESPACE),
        )?;

        let messages_sent_total = IntCounter::with_opts(
            Opts::new("messages_sent_total", "Messages persisted via the HTTP API")
                .namespace(NAMESPACE),
        )?;

        registry.register(Box::new(http_requests_total.clone()))?;
        registry.register(Box::new(http_request_duration_seconds.clone()))?;
        registry.register(Box::new(relay_connections_active.clone()))?;
        registry.register(Box::new(messages_sent_total.clone()))?;

        Ok(Self {
            registry,
            http_requests_total,
            http_request_duration_seconds,
            relay_connections_active,
            messages_sent_total,
        })
    }
}

/// Global metrics; `None` only if collector construction failed at startup.
static METRICS: Lazy<Option<Metrics>> = Lazy::new(|| match Metrics::new() {
    Ok(metrics) => Some(metrics),
    Err(e) => {
        tracing::error!(error = %e, "Failed to initialize metrics");
        None
    }
});

/// Collect and encode all metrics as Prometheus text format
pub fn gather_metrics() -> Result<String, prometheus::Error> {
    let Some(metrics) = METRICS.as_ref() else {
        return Ok(String::new());
    };

    let encoder = TextEncoder::new();
    let metric_families = metrics.registry.gather();
    let mut buffer = Vec::new();
    encoder.encode(&metric_families, &mut buffer)?;
    String::from_utf8(buffer).map_err(|e| prometheus::Error::Msg(e.to_string()))
}

/// Helper to record HTTP request metrics
pub fn record_http_request(method: &str, path: &str, status: u16, duration_secs: f64) {
    if let Some(metrics) = METRICS.as_ref() {
        metrics
            .http_requests_total
            .with_label_values(&[method, path, &status.to_string()])
            .inc();
        metrics
            .http_request_duration_seconds
            .with_label_values(&[method, path])
            .observe(duration_secs);
    }
}

/// Helper to update the open relay connection count
pub fn set_relay_connections(count: usize) {
    if let Some(metrics) = METRICS.as_ref() {
        metrics.relay_connections_active.set(count as i64);
    }
}

pub fn record_message_sent() {
    if let Some(metrics) = METRICS.as_ref() {
        metrics.messages_sent_total.inc();
    }
}
