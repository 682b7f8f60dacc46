//! Prometheus metrics for request traffic and classification outcomes.

use std::{sync::LazyLock, time::Instant};

use axum::{
    extract::Request,
    http::StatusCode,
    middleware::Next,
    response::{IntoResponse, Response},
};
use metrics::{counter, histogram};
use metrics_exporter_prometheus::{Matcher, PrometheusBuilder, PrometheusHandle};
use regex::Regex;
use scribe_match::MatchResult;

/// Initialize Prometheus metrics exporter
pub fn init_metrics() -> anyhow::Result<PrometheusHandle> {
    let builder = PrometheusBuilder::new();

    // Request duration buckets, in seconds
    let builder = builder.set_buckets_for_metric(
        Matcher::Full("http_request_duration_seconds".to_string()),
        &[
            0.001, 0.0025, 0.005, 0.01, 0.025, 0.05, 0.1, 0.25, 0.5, 1.0,
        ],
    )?;

    let handle = builder.install_recorder()?;

    Ok(handle)
}

/// Middleware to record HTTP request metrics
pub async fn track_metrics(req: Request, next: Next) -> Response {
    let start = Instant::now();
    let method = req.method().to_string();
    let path = normalize_path(req.uri().path());

    let response: Response = next.run(req).await;

    let duration = start.elapsed().as_secs_f64();
    let status = response.status().as_u16().to_string();

    counter!(
        "http_requests_total",
        "method" => method.clone(),
        "path" => path.clone(),
        "status" => status.clone()
    )
    .increment(1);

    histogram!(
        "http_request_duration_seconds",
        "method" => method,
        "path" => path,
        "status" => status
    )
    .record(duration);

    response
}

static QUESTION_SEGMENT: LazyLock<Option<Regex>> =
    LazyLock::new(|| Regex::new(r"^/v1/questions/[^/]+").ok());

/// Collapse question ids in URL paths so they do not blow up label cardinality
fn normalize_path(path: &str) -> String {
    match QUESTION_SEGMENT.as_ref() {
        Some(re) => re.replace(path, "/v1/questions/:id").into_owned(),
        None => path.to_string(),
    }
}

/// Handler for the /metrics endpoint
pub async fn metrics_handler(
    axum::extract::State(handle): axum::extract::State<PrometheusHandle>,
) -> impl IntoResponse {
    (StatusCode::OK, handle.render())
}

/// Record which cascade rule decided a classification
pub fn record_classification(result: &MatchResult) {
    counter!(
        "classifications_total",
        "outcome" => result.outcome.label()
    )
    .increment(1);

    counter!(
        "classification_found",
        "found" => result.found.to_string()
    )
    .increment(1);
}
