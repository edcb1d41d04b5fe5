// ABOUTME: Request tracing middleware for correlation and structured logging
// ABOUTME: Resolves one request id per call, traces it in a span, and echoes it on responses and error bodies
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Nutrilog Contributors

use axum::{
    body::Body,
    extract::Request,
    http::{header, HeaderMap, HeaderValue},
    middleware::Next,
    response::Response,
};
use tracing::{warn, Span};
use uuid::Uuid;

use crate::errors::ErrorResponse;

/// Header carrying the caller's correlation id
pub const REQUEST_ID_HEADER: &str = "x-request-id";

fn header_request_id(headers: &HeaderMap) -> Option<&str> {
    headers
        .get(REQUEST_ID_HEADER)
        .and_then(|v| v.to_str().ok())
        .filter(|id| !id.is_empty())
}

/// Span factory for `TraceLayer::make_span_with`
///
/// Uses the caller's `x-request-id` when present, otherwise generates one.
pub fn make_request_span<B>(request: &axum::http::Request<B>) -> Span {
    let request_id = header_request_id(request.headers())
        .map_or_else(|| format!("req_{}", Uuid::new_v4().simple()), str::to_owned);

    tracing::info_span!(
        "http_request",
        method = %request.method(),
        path = %request.uri().path(),
        request_id = %request_id,
    )
}

/// Pin a request id on every request and echo it back
///
/// Runs outside the trace layer so the span sees the same id. Error bodies
/// produced by `AppError` get the id in `error.request_id`.
pub async fn propagate_request_id(mut request: Request, next: Next) -> Response {
    let request_id = header_request_id(request.headers())
        .map_or_else(|| format!("req_{}", Uuid::new_v4().simple()), str::to_owned);
    let header_value = HeaderValue::from_str(&request_id).ok();
    if let Some(value) = &header_value {
        request.headers_mut().insert(REQUEST_ID_HEADER, value.clone());
    }

    let mut response = next.run(request).await;
    if let Some(mut body) = response.extensions_mut().remove::<ErrorResponse>() {
        body.error.request_id = Some(request_id);
        response = restamp_error_body(response, &body);
    }
    if let Some(value) = header_value {
        response.headers_mut().insert(REQUEST_ID_HEADER, value);
    }
    response
}

fn restamp_error_body(response: Response, body: &ErrorResponse) -> Response {
    let (mut parts, original) = response.into_parts();
    match serde_json::to_vec(body) {
        Ok(bytes) => {
            parts.headers.remove(header::CONTENT_LENGTH);
            Response::from_parts(parts, Body::from(bytes))
        }
        Err(e) => {
            warn!(error = %e, "Failed to re-encode error body with request id");
            Response::from_parts(parts, original)
        }
    }
}
