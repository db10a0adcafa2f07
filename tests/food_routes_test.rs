// ABOUTME: Integration tests for the food diary, food search and photo analysis routes
// ABOUTME: Checks serving conversion on logged foods, meal grouping, ownership and client wiring
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Fitlog Contributors

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

mod common;
mod helpers;

use std::sync::Arc;

use axum::http::StatusCode;
use common::{default_clients, food_hit, MockFoodSearch, MockVision, TestApp};
use fitlog_server::resources::ExternalClients;
use helpers::axum_test::AxumTestRequest;
use serde_json::{json, Value};

const CHEESE: &str =
    "Per 100g - Calories: 289kcal | Fat: 19.45g | Carbs: 0.00g | Protein: 26.63g";
const APPLE: &str = "Per 1 apple - Calories: 95kcal | Fat: 0.3g | Carbs: 25g | Protein: 0.5g";

fn assert_close(value: &Value, expected: f64) {
    let actual = value.as_f64().unwrap_or_else(|| panic!("{value} is not a number"));
    assert!(
        (actual - expected).abs() < 1e-9,
        "expected {expected}, got {actual}"
    );
}

async fn log_food(app: &TestApp, token: &str, body: &Value) -> Value {
    AxumTestRequest::post("/api/foods")
        .bearer(token)
        .json(body)
        .send(app.router())
        .await
        .assert_status(StatusCode::CREATED)
        .json()
}

#[tokio::test]
async fn test_logging_two_apples_doubles_the_values() {
    let app = TestApp::new().await;
    let token = app.register_and_login("ana").await;

    let entry = log_food(
        &app,
        &token,
        &json!({
            "food_id": "35718",
            "food_name": "Manzana",
            "food_description": APPLE,
            "meal_type": "almuerzo",
            "serving": { "quantity": 2, "unit": "unit" },
        }),
    )
    .await;

    assert_close(&entry["calories"], 190.0);
    assert_close(&entry["fat"], 0.6);
    assert_close(&entry["carbs"], 50.0);
    assert_close(&entry["protein"], 1.0);
    assert_eq!(entry["meal_type"], "lunch");
    assert_eq!(entry["serving_unit"], "unit");
    assert_eq!(entry["description"], APPLE);
    assert_eq!(entry["is_editable"], true);

    let day: Value = AxumTestRequest::get("/api/foods")
        .bearer(&token)
        .send(app.router())
        .await
        .assert_status(StatusCode::OK)
        .json();
    assert_eq!(day["is_today"], true);
    assert_eq!(day["foods"]["lunch"].as_array().unwrap().len(), 1);
    assert!(day["foods"]["breakfast"].as_array().unwrap().is_empty());
    assert_eq!(day["foods"]["lunch"][0]["food_name"], "Manzana");
}

#[tokio::test]
async fn test_serving_given_as_description_is_rescaled() {
    let app = TestApp::new().await;
    let token = app.register_and_login("bruno").await;

    let entry = log_food(
        &app,
        &token,
        &json!({
            "food_id": "1",
            "food_name": "Queso",
            "food_description": CHEESE,
            "type": "cena",
            "serving": "Per 200g",
        }),
    )
    .await;

    assert_close(&entry["calories"], 578.0);
    assert_close(&entry["fat"], 38.9);
    assert_close(&entry["carbs"], 0.0);
    assert_close(&entry["protein"], 53.26);
    assert_close(&entry["serving_quantity"], 200.0);
    assert_eq!(entry["serving_unit"], "gram");
}

#[tokio::test]
async fn test_cup_serving_against_gram_reference_is_rescaled() {
    let app = TestApp::new().await;
    let token = app.register_and_login("carla").await;

    let entry = log_food(
        &app,
        &token,
        &json!({
            "food_id": "1",
            "food_name": "Queso",
            "food_description": CHEESE,
            "meal_type": "breakfast",
            "serving": { "quantity": 1, "unit": "cup" },
        }),
    )
    .await;

    assert_close(&entry["calories"], 694.0);
    assert_close(&entry["fat"], 46.68);
    assert_close(&entry["carbs"], 0.0);
    assert_close(&entry["protein"], 63.91);
    assert_close(&entry["serving_quantity"], 1.0);
    assert_eq!(entry["serving_unit"], "cup");
}

#[tokio::test]
async fn test_unconvertible_serving_keeps_reference_values() {
    let app = TestApp::new().await;
    let token = app.register_and_login("carmen").await;

    let entry = log_food(
        &app,
        &token,
        &json!({
            "food_id": "1",
            "food_name": "Queso",
            "food_description": CHEESE,
            "meal_type": "breakfast",
            "serving": { "quantity": 1, "unit": "unit" },
        }),
    )
    .await;

    assert_close(&entry["calories"], 289.0);
    assert_close(&entry["protein"], 26.63);
    assert_close(&entry["serving_quantity"], 100.0);
    assert_eq!(entry["serving_unit"], "gram");
}

#[tokio::test]
async fn test_add_food_validates_input() {
    let app = TestApp::new().await;
    let token = app.register_and_login("dario").await;

    let code = AxumTestRequest::post("/api/foods")
        .bearer(&token)
        .json(&json!({
            "food_id": " ",
            "food_name": "Queso",
            "food_description": CHEESE,
            "meal_type": "dinner",
        }))
        .send(app.router())
        .await
        .assert_status(StatusCode::BAD_REQUEST)
        .error_code();
    assert_eq!(code, "MISSING_REQUIRED_FIELD");

    AxumTestRequest::post("/api/foods")
        .bearer(&token)
        .json(&json!({
            "food_id": "1",
            "food_name": "Queso",
            "food_description": CHEESE,
            "meal_type": "dinner",
            "serving": "a big bowl",
        }))
        .send(app.router())
        .await
        .assert_status(StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_past_days_are_listed_but_not_today() {
    let app = TestApp::new().await;
    let token = app.register_and_login("elena").await;

    let day: Value = AxumTestRequest::get("/api/foods?date=2020-02-29")
        .bearer(&token)
        .send(app.router())
        .await
        .assert_status(StatusCode::OK)
        .json();
    assert_eq!(day["date"], "2020-02-29");
    assert_eq!(day["is_today"], false);
    assert!(day["foods"]["dinner"].as_array().unwrap().is_empty());

    AxumTestRequest::get("/api/foods?date=29-02-2020")
        .bearer(&token)
        .send(app.router())
        .await
        .assert_status(StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_entries_are_scoped_to_their_owner() {
    let app = TestApp::new().await;
    let owner = app.register_and_login("fede").await;
    let intruder = app.register_and_login("gala").await;

    let entry = log_food(
        &app,
        &owner,
        &json!({
            "food_id": "1",
            "food_name": "Queso",
            "food_description": CHEESE,
            "meal_type": "snack",
        }),
    )
    .await;
    let uri = format!("/api/foods/{}", entry["id"]);

    let intruder_day: Value = AxumTestRequest::get("/api/foods")
        .bearer(&intruder)
        .send(app.router())
        .await
        .json();
    assert!(intruder_day["foods"]["snack"].as_array().unwrap().is_empty());

    AxumTestRequest::delete(&uri)
        .bearer(&intruder)
        .send(app.router())
        .await
        .assert_status(StatusCode::NOT_FOUND);

    let deleted: Value = AxumTestRequest::delete(&uri)
        .bearer(&owner)
        .send(app.router())
        .await
        .assert_status(StatusCode::OK)
        .json();
    assert_eq!(deleted["deleted"], true);

    AxumTestRequest::delete(&uri)
        .bearer(&owner)
        .send(app.router())
        .await
        .assert_status(StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_search_translates_query_and_results() {
    let search = Arc::new(MockFoodSearch {
        hits: vec![
            food_hit("33691", "Apple", APPLE),
            food_hit("1", "Cheddar Cheese", CHEESE),
        ],
        ..MockFoodSearch::default()
    });
    let app = TestApp::with_clients(ExternalClients {
        food_search: search.clone(),
        ..default_clients()
    })
    .await;
    let token = app.register_and_login("hugo").await;

    let body: Value = AxumTestRequest::get("/api/foods/search?query=manzana&max_results=1")
        .bearer(&token)
        .send(app.router())
        .await
        .assert_status(StatusCode::OK)
        .json();

    assert_eq!(search.queries.lock().unwrap().as_slice(), ["[en] manzana"]);
    assert_eq!(body["total_results"], 1);
    assert_eq!(body["foods"][0]["food_name"], "[es] Apple");
    assert_eq!(body["foods"][0]["food_id"], "33691");
    assert_close(&body["foods"][0]["nutrition"]["calories"], 95.0);
    assert_eq!(body["foods"][0]["nutrition"]["reference_unit"], "unit");

    AxumTestRequest::get("/api/foods/search")
        .bearer(&token)
        .send(app.router())
        .await
        .assert_status(StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_analyze_image_returns_a_loggable_food() {
    let app = TestApp::new().await;
    let token = app.register_and_login("ines").await;

    let body: Value = AxumTestRequest::post("/api/foods/analyze-image")
        .bearer(&token)
        .json(&json!({
            "image_base64": "data:image/jpeg;base64,aGVsbG8gd29ybGQ=",
            "mime_type": "image/jpeg",
        }))
        .send(app.router())
        .await
        .assert_status(StatusCode::OK)
        .json();

    let food = &body["foods"][0];
    assert_eq!(food["food_name"], "Grilled chicken");
    assert_eq!(food["food_id"].as_str().unwrap().len(), 7);
    assert_eq!(
        food["food_description"],
        "Per 100g - Calories: 165kcal | Fat: 3.57g | Carbs: 0.00g | Protein: 31.02g"
    );
    assert_close(&food["nutrition"]["protein"], 31.02);
}

#[tokio::test]
async fn test_analyze_image_rejects_bad_input_and_bad_replies() {
    let app = TestApp::with_clients(ExternalClients {
        vision: Arc::new(MockVision {
            reply: "I cannot tell what this is.".to_owned(),
        }),
        ..default_clients()
    })
    .await;
    let token = app.register_and_login("jorge").await;

    AxumTestRequest::post("/api/foods/analyze-image")
        .bearer(&token)
        .json(&json!({ "image_base64": "aGVsbG8=", "mime_type": "text/plain" }))
        .send(app.router())
        .await
        .assert_status(StatusCode::BAD_REQUEST);

    AxumTestRequest::post("/api/foods/analyze-image")
        .bearer(&token)
        .json(&json!({ "image_base64": "%%% not base64 %%%", "mime_type": "image/png" }))
        .send(app.router())
        .await
        .assert_status(StatusCode::BAD_REQUEST);

    let code = AxumTestRequest::post("/api/foods/analyze-image")
        .bearer(&token)
        .json(&json!({ "image_base64": "aGVsbG8=", "mime_type": "image/png" }))
        .send(app.router())
        .await
        .assert_status(StatusCode::BAD_GATEWAY)
        .error_code();
    assert_eq!(code, "EXTERNAL_SERVICE_ERROR");
}
