// ABOUTME: HTTP integration tests for ingredient and meal catalog routes
// ABOUTME: Creation, listing, lookups, meal composition on save, and mod-generated meals
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Nutrilog Contributors

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

mod common;
mod helpers;

use helpers::axum_test::AxumTestRequest;
use nutrilog::config::ServerConfig;
use nutrilog::external::NutritionAnalyzer;
use nutrilog::server::router;
use nutrilog_intelligence::MissingIngredientPolicy;
use serde_json::json;
use uuid::Uuid;

#[tokio::test]
async fn test_create_and_list_ingredients() {
    let resources = common::create_test_resources().await.unwrap();

    let response = AxumTestRequest::post("/api/ingredients")
        .json(&json!({
            "name": "Greek Yogurt",
            "calories": 59,
            "protein": 10.2,
            "carbs": 3.6,
            "fat": 0.4,
            "servingSize": 100,
            "servingUnit": "g",
            "isStaple": true
        }))
        .send(router(resources.clone()))
        .await;
    assert_eq!(response.status(), 201);
    let created: serde_json::Value = response.json();
    let id = created["id"].as_str().unwrap().to_owned();

    let listed: serde_json::Value = AxumTestRequest::get("/api/ingredients")
        .send(router(resources.clone()))
        .await
        .json();
    assert_eq!(listed.as_array().unwrap().len(), 1);
    assert_eq!(listed[0]["name"], "Greek Yogurt");

    let fetched = AxumTestRequest::get(&format!("/api/ingredients/{id}"))
        .send(router(resources))
        .await;
    assert_eq!(fetched.status(), 200);
    let fetched: serde_json::Value = fetched.json();
    assert_eq!(fetched["isStaple"], true);
}

#[tokio::test]
async fn test_invalid_ingredient_rejected() {
    let resources = common::create_test_resources().await.unwrap();

    let response = AxumTestRequest::post("/api/ingredients")
        .json(&json!({ "name": "Broken", "calories": -5, "protein": 0, "carbs": 0, "fat": 0 }))
        .send(router(resources))
        .await;

    assert_eq!(response.status(), 400);
    let body: serde_json::Value = response.json();
    assert_eq!(body["error"]["code"], "VALUE_OUT_OF_RANGE");
}

#[tokio::test]
async fn test_unknown_ingredient_is_not_found() {
    let resources = common::create_test_resources().await.unwrap();
    let id = Uuid::new_v4();

    let response = AxumTestRequest::get(&format!("/api/ingredients/{id}"))
        .send(router(resources))
        .await;

    assert_eq!(response.status(), 404);
    let body: serde_json::Value = response.json();
    assert_eq!(body["error"]["resource_id"], id.to_string());
}

#[tokio::test]
async fn test_error_body_carries_caller_request_id() {
    let resources = common::create_test_resources().await.unwrap();

    let response = AxumTestRequest::get(&format!("/api/meals/{}", Uuid::new_v4()))
        .header("x-request-id", "req-checkout-42")
        .send(router(resources))
        .await;

    assert_eq!(response.status(), 404);
    assert_eq!(response.header("x-request-id"), Some("req-checkout-42"));
    let body: serde_json::Value = response.json();
    assert_eq!(body["error"]["request_id"], "req-checkout-42");
    assert_eq!(body["error"]["code"], "RESOURCE_NOT_FOUND");
}

#[tokio::test]
async fn test_generated_request_id_matches_header() {
    let resources = common::create_test_resources().await.unwrap();

    let response = AxumTestRequest::get(&format!("/api/ingredients/{}", Uuid::new_v4()))
        .send(router(resources))
        .await;

    let header = response.header("x-request-id").unwrap().to_owned();
    assert!(header.starts_with("req_"));
    let body: serde_json::Value = response.json();
    assert_eq!(body["error"]["request_id"], header);
}

#[tokio::test]
async fn test_saved_meal_totals_come_from_catalog() {
    let (resources, seeded) = common::create_seeded_resources().await.unwrap();
    let (chicken, rice) = (&seeded[0], &seeded[1]);

    let response = AxumTestRequest::post("/api/meals")
        .json(&json!({
            "name": "Chicken and rice",
            "mealType": "composed",
            "totals": { "calories": 1, "protein": 1, "carbs": 1, "fat": 1 },
            "ingredients": [
                { "ingredientId": chicken.id, "quantity": 2.0 },
                { "ingredientId": rice.id, "quantity": 2.0 }
            ]
        }))
        .send(router(resources.clone()))
        .await;

    assert_eq!(response.status(), 201);
    let body: serde_json::Value = response.json();
    assert_eq!(body["meal"]["calories"], 590.0);
    assert_eq!(body["meal"]["protein"], 67.4);
    assert_eq!(body["meal"]["carbs"], 56.4);
    assert_eq!(body["meal"]["fat"], 7.8);
    assert_eq!(body["unresolved"].as_array().unwrap().len(), 0);

    let meal_id = body["meal"]["id"].as_str().unwrap().to_owned();
    let stored: serde_json::Value = AxumTestRequest::get(&format!("/api/meals/{meal_id}"))
        .send(router(resources))
        .await
        .json();
    assert_eq!(stored["calories"], 590.0);
    assert_eq!(stored["ingredients"].as_array().unwrap().len(), 2);
    assert_eq!(stored["ingredients"][0]["ingredientId"], chicken.id.to_string());
    assert_eq!(stored["mealType"], "composed");
}

#[tokio::test]
async fn test_unknown_reference_passes_through_by_default() {
    let (resources, seeded) = common::create_seeded_resources().await.unwrap();
    let ghost = Uuid::new_v4();

    let body: serde_json::Value = AxumTestRequest::post("/api/meals")
        .json(&json!({
            "name": "Partial",
            "ingredients": [
                { "ingredientId": seeded[2].id, "quantity": 2.0 },
                { "ingredientId": ghost, "quantity": 1.0 }
            ]
        }))
        .send(router(resources))
        .await
        .json();

    assert_eq!(body["meal"]["calories"], 144.0);
    assert_eq!(body["unresolved"][0]["ingredientId"], ghost.to_string());
}

#[tokio::test]
async fn test_unknown_reference_fails_under_strict_policy() {
    let mut config = ServerConfig::for_testing(common::TEST_PASSCODE);
    config.missing_ingredient_policy = MissingIngredientPolicy::Fail;
    let resources = common::create_test_resources_with(config, NutritionAnalyzer::mock())
        .await
        .unwrap();

    let response = AxumTestRequest::post("/api/meals")
        .json(&json!({
            "name": "Ghost meal",
            "ingredients": [{ "ingredientId": Uuid::new_v4(), "quantity": 1.0 }]
        }))
        .send(router(resources.clone()))
        .await;

    assert_eq!(response.status(), 404);
    let meals: serde_json::Value = AxumTestRequest::get("/api/meals")
        .send(router(resources))
        .await
        .json();
    assert!(meals.as_array().unwrap().is_empty());
}

#[tokio::test]
async fn test_standalone_meal_keeps_entered_totals() {
    let resources = common::create_test_resources().await.unwrap();

    let body: serde_json::Value = AxumTestRequest::post("/api/meals")
        .json(&json!({
            "name": "Cafe sandwich",
            "mealType": "standalone",
            "totals": { "calories": 480, "protein": 22, "carbs": 51, "fat": 19 }
        }))
        .send(router(resources))
        .await
        .json();

    assert_eq!(body["meal"]["calories"], 480.0);
    assert_eq!(body["meal"]["mealType"], "standalone");
}

#[tokio::test]
async fn test_meals_listed_by_name() {
    let resources = common::create_test_resources().await.unwrap();
    for name in ["dinner", "Breakfast", "lunch"] {
        let response = AxumTestRequest::post("/api/meals")
            .json(&json!({ "name": name, "mealType": "standalone" }))
            .send(router(resources.clone()))
            .await;
        assert_eq!(response.status(), 201);
    }

    let meals: serde_json::Value = AxumTestRequest::get("/api/meals")
        .send(router(resources))
        .await
        .json();
    let names: Vec<&str> = meals
        .as_array()
        .unwrap()
        .iter()
        .map(|m| m["name"].as_str().unwrap())
        .collect();
    assert_eq!(names, vec!["Breakfast", "dinner", "lunch"]);
}

#[tokio::test]
async fn test_meal_from_mod_submission() {
    let resources = common::create_test_resources().await.unwrap();

    let response = AxumTestRequest::post("/api/meals/from-mod")
        .json(&json!({
            "definition": {
                "id": "quick_add",
                "name": "Quick add",
                "inputs": [
                    { "type": "grid_macros", "id": "macros", "label": "Macros" }
                ]
            },
            "mealName": "Vending machine snack",
            "values": {
                "macros": { "type": "macros",
                            "value": { "calories": 250, "protein": 4, "carbs": 31, "fat": 12 } }
            }
        }))
        .send(router(resources.clone()))
        .await;

    assert_eq!(response.status(), 201);
    let meal: serde_json::Value = response.json();
    assert_eq!(meal["mealType"], "mod_generated");
    assert_eq!(meal["calories"], 250.0);
    assert_eq!(meal["notes"], "Generated by Quick add");

    let meals: serde_json::Value = AxumTestRequest::get("/api/meals")
        .send(router(resources))
        .await
        .json();
    assert_eq!(meals.as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn test_incomplete_mod_submission_rejected() {
    let resources = common::create_test_resources().await.unwrap();

    let response = AxumTestRequest::post("/api/meals/from-mod")
        .json(&json!({
            "definition": {
                "id": "quick_add",
                "name": "Quick add",
                "inputs": [{ "type": "grid_macros", "id": "macros", "label": "Macros" }]
            },
            "mealName": "Nothing",
            "values": {}
        }))
        .send(router(resources))
        .await;

    assert_eq!(response.status(), 400);
    let body: serde_json::Value = response.json();
    assert_eq!(body["error"]["code"], "MISSING_REQUIRED_FIELD");
}
