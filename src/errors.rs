// ABOUTME: Error types for the Fitlog server, re-exported from fitlog-core
// ABOUTME: Adds conversions from the server's third-party error types into AppError
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Fitlog Contributors

//! Server error handling
//!
//! The error model lives in `fitlog_core::errors` so the intelligence crate can
//! share it. The conversions here cover the crates only the server links.

pub use fitlog_core::errors::{AppError, AppResult, ErrorCode, ErrorResponse};

/// Convert a `sqlx` failure into a database error, keeping the source
#[must_use]
pub fn database_error(context: &str, error: sqlx::Error) -> AppError {
    AppError::database(format!("{context}: {error}")).with_source(error)
}

/// Convert a `reqwest` failure into an external-service error
#[must_use]
pub fn external_error(service: &str, error: &reqwest::Error) -> AppError {
    if error.is_timeout() || error.is_connect() {
        AppError::new(
            ErrorCode::ExternalServiceUnavailable,
            format!("{service}: {error}"),
        )
    } else {
        AppError::external_service(service, error.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sqlx::Error as SqlxError;

    #[test]
    fn test_database_error_keeps_source() {
        let error = database_error("Failed to load routine", SqlxError::RowNotFound);

        assert_eq!(error.code, ErrorCode::DatabaseError);
        assert!(error.message.starts_with("Failed to load routine"));
        assert!(error.source.is_some());
    }
}
