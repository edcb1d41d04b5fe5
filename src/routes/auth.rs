// ABOUTME: Session route handlers for unlocking and locking AI analysis
// ABOUTME: Thin wrappers over the shared SessionGate
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Nutrilog Contributors

use std::sync::Arc;

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};

use crate::{errors::AppError, resources::ServerResources};

/// Unlock request body
#[derive(Deserialize)]
pub struct UnlockRequest {
    /// Passcode to check
    pub passcode: String,
}

/// Current session state
#[derive(Debug, Serialize, Deserialize)]
pub struct SessionStatus {
    /// Whether AI analysis is available
    pub unlocked: bool,
}

/// Session routes
pub struct AuthRoutes;

impl AuthRoutes {
    /// Create all session routes
    pub fn routes(resources: Arc<ServerResources>) -> Router {
        Router::new()
            .route("/api/auth/unlock", post(Self::handle_unlock))
            .route("/api/auth/lock", post(Self::handle_lock))
            .route("/api/auth/status", get(Self::handle_status))
            .with_state(resources)
    }

    /// Handle POST /api/auth/unlock
    async fn handle_unlock(
        State(resources): State<Arc<ServerResources>>,
        Json(request): Json<UnlockRequest>,
    ) -> Result<Response, AppError> {
        resources.session.unlock(&request.passcode)?;
        Ok((StatusCode::OK, Json(SessionStatus { unlocked: true })).into_response())
    }

    /// Handle POST /api/auth/lock
    async fn handle_lock(State(resources): State<Arc<ServerResources>>) -> Response {
        resources.session.lock();
        (StatusCode::OK, Json(SessionStatus { unlocked: false })).into_response()
    }

    async fn handle_status(State(resources): State<Arc<ServerResources>>) -> Response {
        let status = SessionStatus {
            unlocked: resources.session.is_unlocked(),
        };
        (StatusCode::OK, Json(status)).into_response()
    }
}
