//! HTTP request/response tracing middleware.

use tower_http::LatencyUnit;
use tower_http::classify::{ServerErrorsAsFailures, SharedClassifier};
use tower_http::trace::{DefaultMakeSpan, DefaultOnFailure, DefaultOnResponse, TraceLayer};
use tracing::Level;

/// Creates a tracing middleware for HTTP requests.
///
/// Request spans are opened at `INFO` and responses are logged with status
/// and latency. Server errors (5xx, mostly an unreachable basket store) are
/// additionally logged at `WARN` so they stand out from routine 404s.
///
/// # Example Logs
///
/// ```text
/// INFO request{method=POST uri=/api/basket version=HTTP/1.1}: finished processing request latency=3 ms status=200
/// WARN request{method=GET uri=/api/basket?id=cart-3 version=HTTP/1.1}: response failed classification=Status code: 503 Service Unavailable latency=2001 ms
/// ```
pub fn layer() -> TraceLayer<SharedClassifier<ServerErrorsAsFailures>> {
    TraceLayer::new_for_http()
        .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
        .on_response(
            DefaultOnResponse::new()
                .level(Level::INFO)
                .latency_unit(LatencyUnit::Millis),
        )
        .on_failure(
            DefaultOnFailure::new()
                .level(Level::WARN)
                .latency_unit(LatencyUnit::Millis),
        )
}
