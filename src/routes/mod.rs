// ABOUTME: Route module organization for the Fitlog HTTP API
// ABOUTME: Groups routes by domain and provides bearer-token authentication for handlers
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Fitlog Contributors

//! Route module for the Fitlog server
//!
//! Each domain module exposes a `*Routes::routes(resources)` constructor and
//! thin handlers that delegate to the database managers and the
//! `fitlog_intelligence` algorithms.

/// Registration and login
pub mod auth;
/// Intake dashboard and calorie goal
pub mod dashboard;
/// Exercise catalog lookup
pub mod exercises;
/// Food diary, food search and photo analysis
pub mod foods;
/// Health check and readiness endpoints
pub mod health;
/// One-rep-max calculator and history
pub mod one_rep_max;
/// Weekly training routines
pub mod routines;
/// Water intake tracking
pub mod water;

pub use auth::AuthRoutes;
pub use dashboard::DashboardRoutes;
pub use exercises::ExerciseRoutes;
pub use foods::FoodRoutes;
pub use health::HealthRoutes;
pub use one_rep_max::OneRepMaxRoutes;
pub use routines::RoutineRoutes;
pub use water::WaterRoutes;

use axum::http::header::AUTHORIZATION;
use axum::http::HeaderMap;
use chrono::NaiveDate;
use uuid::Uuid;

use crate::errors::{AppError, AppResult, ErrorCode};
use crate::logging::AppLogger;
use crate::resources::ServerResources;

/// Caller identity resolved from the bearer token
#[derive(Debug, Clone)]
pub struct AuthenticatedUser {
    /// User id from the token subject
    pub user_id: Uuid,
    /// Email the token was issued for
    pub email: String,
}

/// Extract and validate the `Authorization: Bearer <jwt>` header
///
/// # Errors
///
/// Returns `AuthRequired` when the header is missing and `AuthInvalid` or
/// `AuthExpired` when the token does not validate
pub fn authenticate(headers: &HeaderMap, resources: &ServerResources) -> AppResult<AuthenticatedUser> {
    let header = headers
        .get(AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .ok_or_else(AppError::auth_required)?;

    let token = header
        .strip_prefix("Bearer ")
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .ok_or_else(|| AppError::auth_invalid("Authorization header must use the Bearer scheme"))?;

    let claims = resources
        .auth_manager
        .validate_token(token)
        .inspect_err(|e| {
            if e.code == ErrorCode::AuthInvalid {
                AppLogger::log_security_event("invalid_token", "medium", &e.message, None);
            }
        })?;
    Ok(AuthenticatedUser {
        user_id: claims.user_id()?,
        email: claims.email,
    })
}

/// Parse a `YYYY-MM-DD` request value
///
/// # Errors
///
/// Returns `InvalidInput` naming the field when the value is not a date
pub fn parse_date(field: &str, value: &str) -> AppResult<NaiveDate> {
    NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d").map_err(|_| {
        AppError::invalid_input(format!("{field} must be a date formatted as YYYY-MM-DD"))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_date_accepts_iso_dates() {
        assert_eq!(
            parse_date("date", "2024-03-09").unwrap(),
            NaiveDate::from_ymd_opt(2024, 3, 9).unwrap()
        );
        assert_eq!(
            parse_date("start_date", "09/03/2024").unwrap_err().code,
            ErrorCode::InvalidInput
        );
    }
}
