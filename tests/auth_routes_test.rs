// ABOUTME: Integration tests for registration, login and bearer-token checks
// ABOUTME: Drives the full router in-process against an in-memory database
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Fitlog Contributors

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

mod common;
mod helpers;

use axum::http::StatusCode;
use common::{TestApp, TEST_PASSWORD};
use helpers::axum_test::AxumTestRequest;
use serde_json::{json, Value};

#[tokio::test]
async fn test_register_and_login_by_username_or_email() {
    let app = TestApp::new().await;

    let body: Value = AxumTestRequest::post("/api/auth/register")
        .json(&json!({
            "username": "Marta",
            "email": "marta@example.com",
            "password": TEST_PASSWORD,
        }))
        .send(app.router())
        .await
        .assert_status(StatusCode::CREATED)
        .json();
    assert_eq!(body["username"], "marta");

    for identifier in ["MARTA", "marta@example.com"] {
        let login: Value = AxumTestRequest::post("/api/auth/login")
            .json(&json!({ "identifier": identifier, "password": TEST_PASSWORD }))
            .send(app.router())
            .await
            .assert_status(StatusCode::OK)
            .json();
        assert_eq!(login["token_type"], "Bearer");
        assert_eq!(login["expires_in"], 24 * 3600);
        assert_eq!(login["user"]["email"], "marta@example.com");
        assert!(!login["token"].as_str().unwrap().is_empty());
    }
}

#[tokio::test]
async fn test_register_rejects_duplicates() {
    let app = TestApp::new().await;
    app.register_and_login("pablo").await;

    let code = AxumTestRequest::post("/api/auth/register")
        .json(&json!({
            "username": "Pablo",
            "email": "other@example.com",
            "password": TEST_PASSWORD,
        }))
        .send(app.router())
        .await
        .assert_status(StatusCode::CONFLICT)
        .error_code();
    assert_eq!(code, "RESOURCE_ALREADY_EXISTS");

    AxumTestRequest::post("/api/auth/register")
        .json(&json!({
            "username": "someone-else",
            "email": "pablo@example.com",
            "password": TEST_PASSWORD,
        }))
        .send(app.router())
        .await
        .assert_status(StatusCode::CONFLICT);
}

#[tokio::test]
async fn test_register_enforces_password_policy() {
    let app = TestApp::new().await;

    for password in ["short1!", "alllowercase1!", "NoDigitsHere!", "NoSpecial123"] {
        AxumTestRequest::post("/api/auth/register")
            .json(&json!({
                "username": "weak",
                "email": "weak@example.com",
                "password": password,
            }))
            .send(app.router())
            .await
            .assert_status(StatusCode::BAD_REQUEST);
    }
}

#[tokio::test]
async fn test_login_with_wrong_password_is_unauthorized() {
    let app = TestApp::new().await;
    app.register_and_login("lucia").await;

    let code = AxumTestRequest::post("/api/auth/login")
        .json(&json!({ "username": "lucia", "password": "Wrong-pass1" }))
        .send(app.router())
        .await
        .assert_status(StatusCode::UNAUTHORIZED)
        .error_code();
    assert_eq!(code, "AUTH_INVALID");

    AxumTestRequest::post("/api/auth/login")
        .json(&json!({ "username": "nobody", "password": TEST_PASSWORD }))
        .send(app.router())
        .await
        .assert_status(StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_protected_routes_require_a_valid_token() {
    let app = TestApp::new().await;

    let code = AxumTestRequest::get("/api/foods")
        .send(app.router())
        .await
        .assert_status(StatusCode::UNAUTHORIZED)
        .error_code();
    assert_eq!(code, "AUTH_REQUIRED");

    AxumTestRequest::get("/api/water")
        .bearer("not-a-jwt")
        .send(app.router())
        .await
        .assert_status(StatusCode::UNAUTHORIZED);

    AxumTestRequest::get("/api/routines")
        .header("authorization", "Basic dXNlcjpwYXNz")
        .send(app.router())
        .await
        .assert_status(StatusCode::UNAUTHORIZED);
}
