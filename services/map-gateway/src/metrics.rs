//! Gateway metrics.
//!
//! Recorded through the `metrics` facade; `main` installs the Prometheus
//! recorder, and without one (unit tests) these calls are no-ops.

use std::time::Duration;

use metrics::{counter, histogram};

/// Count an inbound request on one of the `/api/maps` routes.
pub fn record_request(route: &'static str) {
    counter!("gateway_requests_total", "route" => route).increment(1);
}

/// Record one forwarded worker call and how it ended.
pub fn record_worker_call(operation: &'static str, outcome: &'static str, elapsed: Duration) {
    counter!("worker_calls_total", "operation" => operation, "outcome" => outcome).increment(1);
    histogram!("worker_call_duration_ms", "operation" => operation)
        .record(elapsed.as_secs_f64() * 1000.0);
}

/// Count a render answered with the placeholder overlay.
pub fn record_fallback(reason: &'static str) {
    counter!("render_fallbacks_total", "reason" => reason).increment(1);
}
