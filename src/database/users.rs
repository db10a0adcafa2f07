// ABOUTME: User account storage
// ABOUTME: Inserts accounts and looks them up by id, username or email
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Fitlog Contributors

use chrono::{DateTime, Utc};
use fitlog_core::models::User;
use sqlx::sqlite::SqliteRow;
use sqlx::{Row, SqlitePool};
use uuid::Uuid;

use crate::errors::{database_error, AppError, AppResult};

/// User account database operations
pub struct UserManager {
    pool: SqlitePool,
}

impl UserManager {
    /// Create a new user manager
    #[must_use]
    pub const fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Insert a new account
    ///
    /// # Errors
    ///
    /// Returns `ResourceAlreadyExists` if the username or email is taken, or
    /// a database error
    pub async fn create(&self, user: &User) -> AppResult<()> {
        sqlx::query(
            r"
            INSERT INTO users (id, username, email, password_hash, created_at)
            VALUES ($1, $2, $3, $4, $5)
            ",
        )
        .bind(user.id.to_string())
        .bind(&user.username)
        .bind(&user.email)
        .bind(&user.password_hash)
        .bind(user.created_at.to_rfc3339())
        .execute(&self.pool)
        .await
        .map_err(|e| {
            if e.as_database_error().is_some_and(|db| db.is_unique_violation()) {
                AppError::conflict("Username or email already registered")
            } else {
                database_error("Failed to create user", e)
            }
        })?;

        Ok(())
    }

    /// Look up an account by id
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails or the row is malformed
    pub async fn get_by_id(&self, id: Uuid) -> AppResult<Option<User>> {
        self.fetch_one_by(Lookup::Id, &id.to_string()).await
    }

    /// Look up an account by username, ignoring case
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails or the row is malformed
    pub async fn get_by_username(&self, username: &str) -> AppResult<Option<User>> {
        self.fetch_one_by(Lookup::Username, &username.to_lowercase()).await
    }

    /// Look up an account by email, ignoring case
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails or the row is malformed
    pub async fn get_by_email(&self, email: &str) -> AppResult<Option<User>> {
        self.fetch_one_by(Lookup::Email, &email.to_lowercase()).await
    }

    async fn fetch_one_by(&self, lookup: Lookup, value: &str) -> AppResult<Option<User>> {
        let row = sqlx::query(lookup.query())
            .bind(value)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| database_error(&format!("Failed to get user by {lookup:?}"), e))?;

        row.as_ref().map(row_to_user).transpose()
    }
}

#[derive(Debug, Clone, Copy)]
enum Lookup {
    Id,
    Username,
    Email,
}

impl Lookup {
    const fn query(self) -> &'static str {
        match self {
            Self::Id => {
                "SELECT id, username, email, password_hash, created_at FROM users WHERE id = $1"
            }
            Self::Username => {
                "SELECT id, username, email, password_hash, created_at FROM users WHERE username = $1"
            }
            Self::Email => {
                "SELECT id, username, email, password_hash, created_at FROM users WHERE lower(email) = $1"
            }
        }
    }
}

fn row_to_user(row: &SqliteRow) -> AppResult<User> {
    let id: String = row.get("id");
    let created_at: String = row.get("created_at");

    Ok(User {
        id: Uuid::parse_str(&id).map_err(|e| AppError::internal(format!("Invalid UUID: {e}")))?,
        username: row.get("username"),
        email: row.get("email"),
        password_hash: row.get("password_hash"),
        created_at: DateTime::parse_from_rfc3339(&created_at)
            .map_err(|e| AppError::internal(format!("Invalid datetime: {e}")))?
            .with_timezone(&Utc),
    })
}
