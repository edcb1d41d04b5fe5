// ABOUTME: HTTP middleware for the Nutrilog API
// ABOUTME: CORS configuration, request-id propagation, and request tracing applied to every route
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Nutrilog Contributors

/// Cross-origin resource sharing
pub mod cors;
/// Request spans with correlation ids
pub mod tracing;

pub use cors::setup_cors;
pub use tracing::{make_request_span, propagate_request_id, REQUEST_ID_HEADER};
