// ABOUTME: Registration and login route handlers
// ABOUTME: Validates credentials, stores bcrypt hashes and issues bearer tokens
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Fitlog Contributors

//! Authentication routes
//!
//! `POST /auth/register` creates an account and `POST /auth/login` exchanges
//! a username or email plus password for a JWT.

use std::sync::Arc;

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::post;
use axum::{Json, Router};
use chrono::Utc;
use fitlog_core::models::User;
use serde::{Deserialize, Serialize};
use tokio::task;
use uuid::Uuid;

use crate::auth::{hash_password, validate_password_policy, verify_password};
use crate::errors::{AppError, AppResult};
use crate::logging::AppLogger;
use crate::resources::ServerResources;

/// Registration request
#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    /// Desired username, stored lower-cased
    pub username: String,
    /// Email address
    pub email: String,
    /// Plain-text password, checked against the password policy
    pub password: String,
}

/// Registration response
#[derive(Debug, Serialize, Deserialize)]
pub struct RegisterResponse {
    /// New user id
    pub user_id: Uuid,
    /// Stored username
    pub username: String,
    /// Stored email
    pub email: String,
}

/// Login request
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    /// Username or email; values containing `@` are treated as email
    #[serde(alias = "username", alias = "email")]
    pub identifier: String,
    /// Plain-text password
    pub password: String,
}

/// Public user fields returned on login
#[derive(Debug, Serialize, Deserialize)]
pub struct UserInfo {
    /// User id
    pub id: Uuid,
    /// Username
    pub username: String,
    /// Email
    pub email: String,
}

/// Login response with token
#[derive(Debug, Serialize, Deserialize)]
pub struct LoginResponse {
    /// Bearer token
    pub token: String,
    /// Always `Bearer`
    pub token_type: String,
    /// Token lifetime in seconds
    pub expires_in: i64,
    /// Authenticated user
    pub user: UserInfo,
}

/// Authentication routes
pub struct AuthRoutes;

impl AuthRoutes {
    /// Create all authentication routes
    pub fn routes(resources: Arc<ServerResources>) -> Router {
        Router::new()
            .route("/auth/register", post(Self::handle_register))
            .route("/auth/login", post(Self::handle_login))
            .with_state(resources)
    }

    async fn handle_register(
        State(resources): State<Arc<ServerResources>>,
        Json(request): Json<RegisterRequest>,
    ) -> Result<Response, AppError> {
        let username = request.username.trim().to_lowercase();
        let email = request.email.trim().to_owned();

        if username.is_empty() {
            return Err(AppError::missing_field("username"));
        }
        if !email.contains('@') {
            return Err(AppError::invalid_input("A valid email address is required"));
        }
        validate_password_policy(&request.password)?;

        let users = resources.database.users();
        if users.get_by_username(&username).await?.is_some() {
            return Err(AppError::conflict("Username is already taken"));
        }
        if users.get_by_email(&email).await?.is_some() {
            return Err(AppError::conflict("Email is already registered"));
        }

        let password = request.password;
        let password_hash = task::spawn_blocking(move || hash_password(&password))
            .await
            .map_err(|e| AppError::internal(format!("Password hashing task failed: {e}")))??;

        let user = User {
            id: Uuid::new_v4(),
            username,
            email,
            password_hash,
            created_at: Utc::now(),
        };
        users.create(&user).await?;

        AppLogger::log_auth_event(&user.id.to_string(), "register", true, None);

        Ok((
            StatusCode::CREATED,
            Json(RegisterResponse {
                user_id: user.id,
                username: user.username,
                email: user.email,
            }),
        )
            .into_response())
    }

    async fn handle_login(
        State(resources): State<Arc<ServerResources>>,
        Json(request): Json<LoginRequest>,
    ) -> Result<Response, AppError> {
        let identifier = request.identifier.trim();
        let Some(user) = Self::find_user(&resources, identifier).await? else {
            AppLogger::log_auth_event("unknown", "login", false, Some("unknown user"));
            return Err(AppError::auth_invalid("Invalid credentials"));
        };

        let password = request.password;
        let hash = user.password_hash.clone();
        let valid = task::spawn_blocking(move || verify_password(&password, &hash))
            .await
            .map_err(|e| AppError::internal(format!("Password check task failed: {e}")))?;

        if !valid {
            AppLogger::log_auth_event(&user.id.to_string(), "login", false, Some("bad password"));
            return Err(AppError::auth_invalid("Invalid credentials"));
        }

        let token = resources.auth_manager.generate_token(&user)?;
        AppLogger::log_auth_event(&user.id.to_string(), "login", true, None);

        Ok((
            StatusCode::OK,
            Json(LoginResponse {
                token,
                token_type: "Bearer".to_owned(),
                expires_in: resources.auth_manager.token_expiry_hours() * 3600,
                user: UserInfo {
                    id: user.id,
                    username: user.username,
                    email: user.email,
                },
            }),
        )
            .into_response())
    }

    async fn find_user(resources: &ServerResources, identifier: &str) -> AppResult<Option<User>> {
        let users = resources.database.users();
        if identifier.contains('@') {
            users.get_by_email(identifier).await
        } else {
            users.get_by_username(&identifier.to_lowercase()).await
        }
    }
}
