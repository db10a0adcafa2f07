// ABOUTME: Integration tests for the one-rep-max routes
// ABOUTME: Covers formula selection, range validation, stored records and progress ordering
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Fitlog Contributors

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

mod common;
mod helpers;

use axum::http::StatusCode;
use common::TestApp;
use helpers::axum_test::AxumTestRequest;
use serde_json::{json, Value};

#[tokio::test]
async fn test_calculate_picks_formula_by_exercise() {
    let app = TestApp::new().await;
    let token = app.register_and_login("pilar").await;

    let squat: Value = AxumTestRequest::post("/api/one-rep-max/calculate")
        .bearer(&token)
        .json(&json!({
            "weight": 100.0, "unit": "kg", "reps": 5, "rpe": 10.0, "exercise": "Sentadilla"
        }))
        .send(app.router())
        .await
        .assert_status(StatusCode::OK)
        .json();
    assert_eq!(squat["one_rep_max"], 117.0);
    assert_eq!(squat["formula"], "epley");
    assert_eq!(squat["unit"], "kg");

    let curl: Value = AxumTestRequest::post("/api/one-rep-max/calculate")
        .bearer(&token)
        .json(&json!({
            "weight": 20.0, "unit": "kg", "reps": 10, "rpe": 10.0, "exercise": "Curl de bíceps"
        }))
        .send(app.router())
        .await
        .assert_status(StatusCode::OK)
        .json();
    assert_eq!(curl["one_rep_max"], 27.0);
    assert_eq!(curl["formula"], "brzycki");
}

#[tokio::test]
async fn test_calculate_rejects_out_of_range_sets() {
    let app = TestApp::new().await;
    let token = app.register_and_login("quim").await;

    for set in [
        json!({ "weight": 0.0, "unit": "kg", "reps": 5, "rpe": 8.0, "exercise": "Press" }),
        json!({ "weight": 50.0, "unit": "kg", "reps": 0, "rpe": 8.0, "exercise": "Press" }),
        json!({ "weight": 50.0, "unit": "kg", "reps": 31, "rpe": 8.0, "exercise": "Press" }),
        json!({ "weight": 50.0, "unit": "kg", "reps": 5, "rpe": 11.0, "exercise": "Press" }),
    ] {
        let code = AxumTestRequest::post("/api/one-rep-max/calculate")
            .bearer(&token)
            .json(&set)
            .send(app.router())
            .await
            .assert_status(StatusCode::BAD_REQUEST)
            .error_code();
        assert_eq!(code, "VALUE_OUT_OF_RANGE");
    }
}

#[tokio::test]
async fn test_saved_records_form_a_progress_series() {
    let app = TestApp::new().await;
    let token = app.register_and_login("rosa").await;

    let later: Value = AxumTestRequest::post("/api/one-rep-max")
        .bearer(&token)
        .json(&json!({
            "weight": 100.0, "unit": "kg", "reps": 5, "rpe": 10.0,
            "exercise": "Sentadilla", "date": "2024-03-08"
        }))
        .send(app.router())
        .await
        .assert_status(StatusCode::CREATED)
        .json();
    assert_eq!(later["one_rep_max"], 117.0);

    AxumTestRequest::post("/api/one-rep-max")
        .bearer(&token)
        .json(&json!({
            "weight": 90.0, "unit": "kg", "reps": 5, "rpe": 9.0,
            "exercise": "Sentadilla", "date": "2024-03-01", "one_rep_max": 110.0
        }))
        .send(app.router())
        .await
        .assert_status(StatusCode::CREATED);

    AxumTestRequest::post("/api/one-rep-max")
        .bearer(&token)
        .json(&json!({
            "weight": 60.0, "unit": "kg", "reps": 5, "rpe": 9.0,
            "exercise": "Press militar", "date": "2024-03-02"
        }))
        .send(app.router())
        .await
        .assert_status(StatusCode::CREATED);

    let progress: Value = AxumTestRequest::get("/api/one-rep-max/progress?exercise=Sentadilla")
        .bearer(&token)
        .send(app.router())
        .await
        .assert_status(StatusCode::OK)
        .json();

    let records = progress["records"].as_array().unwrap();
    assert_eq!(records.len(), 2);
    assert_eq!(records[0]["recorded_on"], "2024-03-01");
    assert_eq!(records[0]["one_rep_max"], 110.0);
    assert_eq!(records[1]["recorded_on"], "2024-03-08");

    let other = app.register_and_login("sara").await;
    let progress: Value = AxumTestRequest::get("/api/one-rep-max/progress?exercise=Sentadilla")
        .bearer(&other)
        .send(app.router())
        .await
        .json();
    assert!(progress["records"].as_array().unwrap().is_empty());
}

#[tokio::test]
async fn test_save_rejects_non_positive_max_and_progress_needs_exercise() {
    let app = TestApp::new().await;
    let token = app.register_and_login("tomas").await;

    AxumTestRequest::post("/api/one-rep-max")
        .bearer(&token)
        .json(&json!({
            "weight": 100.0, "unit": "kg", "reps": 5, "rpe": 10.0,
            "exercise": "Sentadilla", "one_rep_max": 0.0
        }))
        .send(app.router())
        .await
        .assert_status(StatusCode::BAD_REQUEST);

    let code = AxumTestRequest::get("/api/one-rep-max/progress")
        .bearer(&token)
        .send(app.router())
        .await
        .assert_status(StatusCode::BAD_REQUEST)
        .error_code();
    assert_eq!(code, "MISSING_REQUIRED_FIELD");
}
