// ABOUTME: Integration tests for the weekly routine routes
// ABOUTME: Creates, reads, updates and deletes routines and checks other users cannot see them
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
async fn test_routine_lifecycle() {
    let app = TestApp::new().await;
    let token = app.register_and_login("ursula").await;

    let created: Value = AxumTestRequest::post("/api/routines")
        .bearer(&token)
        .json(&json!({
            "day": "Miércoles",
            "name": "Pierna",
            "exercises": [{ "name": "Sentadilla", "sets": 4, "reps": 8 }],
        }))
        .send(app.router())
        .await
        .assert_status(StatusCode::CREATED)
        .json();
    assert_eq!(created["day"], "wednesday");
    assert_eq!(created["exercises"][0]["sets"], 4);
    let uri = format!("/api/routines/{}", created["id"]);

    AxumTestRequest::post("/api/routines")
        .bearer(&token)
        .json(&json!({ "day": "monday", "name": "Empuje" }))
        .send(app.router())
        .await
        .assert_status(StatusCode::CREATED);

    let list: Value = AxumTestRequest::get("/api/routines")
        .bearer(&token)
        .send(app.router())
        .await
        .assert_status(StatusCode::OK)
        .json();
    let days: Vec<&str> = list["routines"]
        .as_array()
        .unwrap()
        .iter()
        .map(|routine| routine["day"].as_str().unwrap())
        .collect();
    assert_eq!(days, ["monday", "wednesday"]);

    let updated: Value = AxumTestRequest::put(&uri)
        .bearer(&token)
        .json(&json!({ "exercises": [{ "name": "Zancadas" }] }))
        .send(app.router())
        .await
        .assert_status(StatusCode::OK)
        .json();
    assert_eq!(updated["exercises"], json!([{ "name": "Zancadas" }]));

    let fetched: Value = AxumTestRequest::get(&uri)
        .bearer(&token)
        .send(app.router())
        .await
        .assert_status(StatusCode::OK)
        .json();
    assert_eq!(fetched, updated);

    AxumTestRequest::delete(&uri)
        .bearer(&token)
        .send(app.router())
        .await
        .assert_status(StatusCode::NO_CONTENT);
    AxumTestRequest::get(&uri)
        .bearer(&token)
        .send(app.router())
        .await
        .assert_status(StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_routines_are_invisible_to_other_users() {
    let app = TestApp::new().await;
    let owner = app.register_and_login("victor").await;
    let intruder = app.register_and_login("wanda").await;

    let created: Value = AxumTestRequest::post("/api/routines")
        .bearer(&owner)
        .json(&json!({ "day": "friday", "name": "Espalda", "exercises": [] }))
        .send(app.router())
        .await
        .json();
    let uri = format!("/api/routines/{}", created["id"]);

    AxumTestRequest::get(&uri)
        .bearer(&intruder)
        .send(app.router())
        .await
        .assert_status(StatusCode::NOT_FOUND);
    AxumTestRequest::put(&uri)
        .bearer(&intruder)
        .json(&json!({ "exercises": [] }))
        .send(app.router())
        .await
        .assert_status(StatusCode::NOT_FOUND);
    AxumTestRequest::delete(&uri)
        .bearer(&intruder)
        .send(app.router())
        .await
        .assert_status(StatusCode::NOT_FOUND);

    let list: Value = AxumTestRequest::get("/api/routines")
        .bearer(&intruder)
        .send(app.router())
        .await
        .json();
    assert!(list["routines"].as_array().unwrap().is_empty());
}

#[tokio::test]
async fn test_routine_requires_valid_day_and_name() {
    let app = TestApp::new().await;
    let token = app.register_and_login("ximena").await;

    AxumTestRequest::post("/api/routines")
        .bearer(&token)
        .json(&json!({ "day": "someday", "name": "Brazos" }))
        .send(app.router())
        .await
        .assert_status(StatusCode::BAD_REQUEST);

    AxumTestRequest::post("/api/routines")
        .bearer(&token)
        .json(&json!({ "day": "sábado", "name": "   " }))
        .send(app.router())
        .await
        .assert_status(StatusCode::BAD_REQUEST);
}
