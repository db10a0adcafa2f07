// ABOUTME: Daily calorie goal storage, one value per user
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Fitlog Contributors

use sqlx::{Row, SqlitePool};
use uuid::Uuid;

use crate::errors::{database_error, AppResult};

/// Calorie goal database operations
pub struct CalorieGoalManager {
    pool: SqlitePool,
}

impl CalorieGoalManager {
    /// Create a new calorie goal manager
    #[must_use]
    pub const fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Stored goal, if the user ever set one
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails
    pub async fn get(&self, user_id: Uuid) -> AppResult<Option<f64>> {
        let row = sqlx::query("SELECT calorie_goal FROM calorie_goals WHERE user_id = $1")
            .bind(user_id.to_string())
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| database_error("Failed to get calorie goal", e))?;

        Ok(row.map(|r| r.get("calorie_goal")))
    }

    /// Store or replace the goal
    ///
    /// # Errors
    ///
    /// Returns an error if the upsert fails
    pub async fn set(&self, user_id: Uuid, calorie_goal: f64) -> AppResult<()> {
        sqlx::query(
            r"
            INSERT INTO calorie_goals (user_id, calorie_goal) VALUES ($1, $2)
            ON CONFLICT(user_id) DO UPDATE SET calorie_goal = excluded.calorie_goal
            ",
        )
        .bind(user_id.to_string())
        .bind(calorie_goal)
        .execute(&self.pool)
        .await
        .map_err(|e| database_error("Failed to save calorie goal", e))?;

        Ok(())
    }
}
