//! Metrics and observability utilities
//!
//! Prometheus metric descriptions and recording helpers for graph builds,
//! filter queries and HTTP requests.

use metrics::{counter, describe_counter, describe_gauge, describe_histogram, gauge, histogram, Unit};
use std::time::Instant;

/// Metrics prefix for all citenet metrics
pub const METRICS_PREFIX: &str = "citenet";

/// Histogram buckets for request latency (in seconds)
pub const LATENCY_BUCKETS: &[f64] = &[
    0.001,  // 1ms
    0.005,  // 5ms
    0.010,  // 10ms
    0.025,  // 25ms
    0.050,  // 50ms
    0.100,  // 100ms
    0.250,  // 250ms
    0.500,  // 500ms
    1.000,  // 1s
    2.500,  // 2.5s
    5.000,  // 5s
];

/// Buckets for graph builds, which include the corpus fetch
pub const BUILD_BUCKETS: &[f64] = &[
    0.010,  // 10ms
    0.050,  // 50ms
    0.100,  // 100ms
    0.250,  // 250ms
    0.500,  // 500ms
    1.000,  // 1s
    2.000,  // 2s
    5.000,  // 5s
    10.00,  // 10s
    30.00,  // 30s
];

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

    // Graph build metrics
    describe_counter!(
        format!("{}_graph_builds_total", METRICS_PREFIX),
        Unit::Count,
        "Total citation graph builds"
    );

    describe_histogram!(
        format!("{}_graph_build_duration_seconds", METRICS_PREFIX),
        Unit::Seconds,
        "Corpus fetch plus graph build latency in seconds"
    );

    describe_gauge!(
        format!("{}_graph_nodes", METRICS_PREFIX),
        Unit::Count,
        "Nodes in the cached citation graph"
    );

    describe_gauge!(
        format!("{}_graph_edges", METRICS_PREFIX),
        Unit::Count,
        "Edges in the cached citation graph"
    );

    describe_gauge!(
        format!("{}_graph_connected_nodes", METRICS_PREFIX),
        Unit::Count,
        "Nodes with at least one incident edge"
    );

    // Filter metrics
    describe_counter!(
        format!("{}_filter_queries_total", METRICS_PREFIX),
        Unit::Count,
        "Total title filter queries"
    );

    describe_gauge!(
        format!("{}_filter_result_nodes", METRICS_PREFIX),
        Unit::Count,
        "Nodes kept by the last title filter"
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

/// Record a finished graph build
pub fn record_graph_build(
    duration_secs: f64,
    source: &str,
    nodes: usize,
    edges: usize,
    connected: usize,
) {
    counter!(
        format!("{}_graph_builds_total", METRICS_PREFIX),
        "source" => source.to_string()
    )
    .increment(1);

    histogram!(
        format!("{}_graph_build_duration_seconds", METRICS_PREFIX),
        "source" => source.to_string()
    )
    .record(duration_secs);

    gauge!(format!("{}_graph_nodes", METRICS_PREFIX)).set(nodes as f64);
    gauge!(format!("{}_graph_edges", METRICS_PREFIX)).set(edges as f64);
    gauge!(format!("{}_graph_connected_nodes", METRICS_PREFIX)).set(connected as f64);
}

/// Record a title filter query
pub fn record_filter(kept_nodes: usize) {
    counter!(format!("{}_filter_queries_total", METRICS_PREFIX)).increment(1);
    gauge!(format!("{}_filter_result_nodes", METRICS_PREFIX)).set(kept_nodes as f64);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_buckets_sorted() {
        for buckets in [LATENCY_BUCKETS, BUILD_BUCKETS] {
            let mut prev = 0.0;
            for &bucket in buckets {
                assert!(bucket > prev);
                prev = bucket;
            }
        }
    }

    #[test]
    fn test_recording_without_recorder() {
        let metrics = RequestMetrics::start("GET", "/api/citation-network");
        metrics.finish(200);
        record_graph_build(0.01, "memory", 3, 1, 2);
        record_filter(2);
        // Just verify it runs without panic
    }
}
