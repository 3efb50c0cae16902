//! Metrics and observability utilities
//!
//! Provides Prometheus metrics with standardized naming conventions.

use metrics::{counter, describe_counter, describe_gauge, describe_histogram, gauge, histogram, Unit};
use std::time::Instant;

/// Metrics prefix for all ScholarGraph metrics
pub const METRICS_PREFIX: &str = "scholargraph";

/// Register all metric descriptions
pub fn register_metrics() {
    // Request metrics
    describe_counter!(
        format!("{}_requests_total", METRICS_PREFIX),
        Unit::Count,
        "Total number of HTTP requests"
    );

    describe_histogram!(
        format!("{}_request_duration_seconds", METRICS_PREFIX),
        Unit::Seconds,
        "HTTP request latency in seconds"
    );

    // Search metrics
    describe_counter!(
        format!("{}_search_queries_total", METRICS_PREFIX),
        Unit::Count,
        "Total number of paper searches"
    );

    describe_histogram!(
        format!("{}_search_duration_seconds", METRICS_PREFIX),
        Unit::Seconds,
        "End-to-end search pipeline latency in seconds"
    );

    describe_gauge!(
        format!("{}_search_papers_count", METRICS_PREFIX),
        Unit::Count,
        "Number of papers extracted for the last search"
    );

    // Scholar API metrics
    describe_counter!(
        format!("{}_scholar_requests_total", METRICS_PREFIX),
        Unit::Count,
        "Total scholar API requests"
    );

    describe_counter!(
        format!("{}_scholar_errors_total", METRICS_PREFIX),
        Unit::Count,
        "Total scholar API errors"
    );

    describe_histogram!(
        format!("{}_scholar_duration_seconds", METRICS_PREFIX),
        Unit::Seconds,
        "Scholar API request latency in seconds"
    );

    // Render metrics
    describe_counter!(
        format!("{}_graphs_rendered_total", METRICS_PREFIX),
        Unit::Count,
        "Total citation graph images rendered"
    );

    describe_histogram!(
        format!("{}_render_duration_seconds", METRICS_PREFIX),
        Unit::Seconds,
        "Graph render latency in seconds"
    );

    tracing::info!("Metrics registered");
}

/// Helper to record request metrics
pub struct RequestMetrics {
    start: Instant,
    endpoint: String,
    method: String,
}

impl RequestMetrics {
    /// Start tracking a request
    pub fn start(method: &str, endpoint: &str) -> Self {
        Self {
            start: Instant::now(),
            endpoint: endpoint.to_string(),
            method: method.to_string(),
        }
    }

    /// Record request completion
    pub fn finish(self, status: u16) {
        let duration = self.start.elapsed().as_secs_f64();

        counter!(
            format!("{}_requests_total", METRICS_PREFIX),
            "method" => self.method.clone(),
            "endpoint" => self.endpoint.clone(),
            "status" => status.to_string()
        )
        .increment(1);

        histogram!(
            format!("{}_request_duration_seconds", METRICS_PREFIX),
            "method" => self.method,
            "endpoint" => self.endpoint
        )
        .record(duration);
    }
}

/// Helper to record search pipeline metrics
pub fn record_search(duration_secs: f64, paper_count: usize) {
    counter!(format!("{}_search_queries_total", METRICS_PREFIX)).increment(1);

    histogram!(format!("{}_search_duration_seconds", METRICS_PREFIX)).record(duration_secs);

    gauge!(format!("{}_search_papers_count", METRICS_PREFIX)).set(paper_count as f64);
}

/// Helper to record scholar API call metrics
pub fn record_scholar_request(duration_secs: f64, success: bool) {
    let status = if success { "success" } else { "error" };

    counter!(
        format!("{}_scholar_requests_total", METRICS_PREFIX),
        "status" => status.to_string()
    )
    .increment(1);

    if success {
        histogram!(format!("{}_scholar_duration_seconds", METRICS_PREFIX)).record(duration_secs);
    } else {
        counter!(format!("{}_scholar_errors_total", METRICS_PREFIX)).increment(1);
    }
}

/// Helper to record graph render metrics
pub fn record_render(duration_secs: f64, images: usize) {
    counter!(format!("{}_graphs_rendered_total", METRICS_PREFIX)).increment(images as u64);

    histogram!(format!("{}_render_duration_seconds", METRICS_PREFIX)).record(duration_secs);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_metrics() {
        let metrics = RequestMetrics::start("POST", "/search");
        std::thread::sleep(std::time::Duration::from_millis(10));
        metrics.finish(200);
        // Just verify it runs without panic
    }

    #[test]
    fn test_record_helpers() {
        record_search(0.25, 20);
        record_scholar_request(0.1, true);
        record_scholar_request(0.1, false);
        record_render(0.05, 2);
    }
}
