// ABOUTME: HTTP integration tests for the AI analysis routes
// ABOUTME: Session gating, mock results, serving types, and upstream failure status mapping
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Nutrilog Contributors

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

mod common;
mod helpers;

use std::sync::Arc;
use std::time::Duration;

use helpers::axum_test::AxumTestRequest;
use nutrilog::config::environment::DEFAULT_ANALYSIS_MODEL;
use nutrilog::config::ServerConfig;
use nutrilog::external::{GeminiClient, NutritionAnalyzer};
use nutrilog::server::router;
use serde_json::json;
use wiremock::matchers::method;
use wiremock::{Mock, MockServer, ResponseTemplate};

#[tokio::test]
async fn test_analysis_requires_unlock() {
    let resources = common::create_test_resources().await.unwrap();

    let response = AxumTestRequest::post("/api/analyze/food")
        .json(&json!({ "description": "two slices of pizza" }))
        .send(router(resources))
        .await;

    assert_eq!(response.status(), 401);
    let body: serde_json::Value = response.json();
    assert_eq!(body["error"]["code"], "AUTH_REQUIRED");
}

#[tokio::test]
async fn test_mock_food_analysis_after_unlock() {
    let resources = common::create_test_resources().await.unwrap();
    resources.session.unlock(common::TEST_PASSCODE).unwrap();

    let response = AxumTestRequest::post("/api/analyze/food")
        .json(&json!({ "description": "two slices of pizza" }))
        .send(router(resources))
        .await;

    assert_eq!(response.status(), 200);
    let body: serde_json::Value = response.json();
    assert_eq!(body["source"], "mock");
    assert_eq!(body["name"], "Grilled Chicken Breast");
    assert_eq!(body["calories"], 165.0);
    assert_eq!(body["confidence"], 0.85);
}

#[tokio::test]
async fn test_ingredient_serving_type_selects_mock_unit() {
    let resources = common::create_test_resources().await.unwrap();
    resources.session.unlock(common::TEST_PASSCODE).unwrap();

    let whole: serde_json::Value = AxumTestRequest::post("/api/analyze/ingredient")
        .json(&json!({ "description": "banana", "servingType": "whole" }))
        .send(router(resources.clone()))
        .await
        .json();
    assert_eq!(whole["unit"], "1 whole");

    let default: serde_json::Value = AxumTestRequest::post("/api/analyze/ingredient")
        .json(&json!({ "description": "banana" }))
        .send(router(resources))
        .await
        .json();
    assert_eq!(default["unit"], "100g");
}

#[tokio::test]
async fn test_blank_description_is_bad_request() {
    let resources = common::create_test_resources().await.unwrap();
    resources.session.unlock(common::TEST_PASSCODE).unwrap();

    let response = AxumTestRequest::post("/api/analyze/food")
        .json(&json!({ "description": "  " }))
        .send(router(resources))
        .await;
    assert_eq!(response.status(), 400);
}

#[tokio::test]
async fn test_upstream_failure_is_bad_gateway() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(429).set_body_json(json!({
            "error": { "code": 429, "message": "quota exceeded" }
        })))
        .mount(&server)
        .await;

    let client = GeminiClient::new(
        "test-key",
        server.uri(),
        DEFAULT_ANALYSIS_MODEL,
        Duration::from_secs(5),
    )
    .unwrap();
    let resources = common::create_test_resources_with(
        ServerConfig::for_testing(common::TEST_PASSCODE),
        NutritionAnalyzer::with_upstream(Arc::new(client)),
    )
    .await
    .unwrap();
    resources.session.unlock(common::TEST_PASSCODE).unwrap();

    let response = AxumTestRequest::post("/api/analyze/food")
        .json(&json!({ "description": "toast" }))
        .send(router(resources))
        .await;

    assert_eq!(response.status(), 502);
    let body: serde_json::Value = response.json();
    assert_eq!(body["error"]["code"], "EXTERNAL_SERVICE_ERROR");
    assert_eq!(body["error"]["details"]["status"], 429);
}
