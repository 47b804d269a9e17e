//! Metric families published by the content server.

use std::time::Duration;

use quickserve_core::obs::{CounterVec, GaugeVec, HistogramVec};

/// Request latency buckets in seconds.
pub const DURATION_BUCKETS_SECONDS: [f64; 11] =
    [0.005, 0.01, 0.025, 0.05, 0.1, 0.25, 0.5, 1.0, 2.5, 5.0, 10.0];

pub struct WebMetrics {
    /// Incremented by the content handlers themselves.
    pub requests_by_method: CounterVec,
    /// Incremented by the request-tracking middleware.
    pub request_total: CounterVec,
    pub request_duration: HistogramVec,
    pub app_version: GaugeVec,
}

impl Default for WebMetrics {
    fn default() -> Self {
        Self::new()
    }
}

impl WebMetrics {
    pub fn new() -> Self {
        Self {
            requests_by_method: CounterVec::default(),
            request_total: CounterVec::default(),
            request_duration: HistogramVec::new(&DURATION_BUCKETS_SECONDS),
            app_version: GaugeVec::default(),
        }
    }

    /// Publish the constant info gauge.
    pub fn set_app_info(&self, version: &str, config: &str) {
        self.app_version
            .set(&[("version", version), ("config", config)], 1.0);
    }

    pub fn record_request(&self, method: &str, endpoint: &str, status: &str, elapsed: Duration) {
        let labels = [("method", method), ("endpoint", endpoint), ("status", status)];
        self.request_total.inc(&labels);
        self.request_duration.observe(&labels, elapsed.as_secs_f64());
    }

    pub fn render(&self) -> String {
        let mut out = String::new();
        self.requests_by_method.render("http_requests_total", "Total HTTP Requests", &mut out);
        self.request_total.render("http_request_total", "Total HTTP requests handled by the app, by endpoint and status.", &mut out);
        self.request_duration.render("http_request_duration_seconds", "HTTP request latency in seconds.", &mut out);
        self.app_version.render("app_version", "Application version and config.", &mut out);
        out
    }
}
