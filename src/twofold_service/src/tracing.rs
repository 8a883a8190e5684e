//! Request-scoped tracing for the HTTP surface.

use std::time::Duration;

use axum::body::Body;
use axum::http::{Request, Response};
use tracing::Span;
use uuid::Uuid;

/// Opens a span per request, tagged with a fresh request id so log lines
/// from concurrent requests can be told apart.
pub fn make_span_with_request_id(request: &Request<Body>) -> Span {
    let request_id = Uuid::new_v4();
    tracing::span!(
        tracing::Level::INFO,
        "request",
        request_id = tracing::field::display(request_id),
        method = tracing::field::display(request.method()),
        uri = tracing::field::display(request.uri()),
    )
}

pub fn on_request(_request: &Request<Body>, _span: &Span) {
    tracing::event!(tracing::Level::INFO, "[REQUEST START]");
}

pub fn on_response(response: &Response<Body>, latency: Duration, _span: &Span) {
    tracing::event!(
        tracing::Level::INFO,
        status = tracing::field::display(response.status()),
        latency = tracing::field::display(format!("{}ms", latency.as_millis())),
        "[REQUEST END]"
    );
}
