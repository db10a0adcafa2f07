// ABOUTME: Weekly training routine storage
// ABOUTME: CRUD on routines scoped to their owner, exercises kept as a JSON array
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Fitlog Contributors

use chrono::Utc;
use fitlog_core::models::{Routine, RoutineDay};
use serde_json::Value;
use sqlx::sqlite::SqliteRow;
use sqlx::{Row, SqlitePool};
use uuid::Uuid;

use crate::errors::{database_error, AppError, AppResult};

/// Routine database operations
pub struct RoutineManager {
    pool: SqlitePool,
}

impl RoutineManager {
    /// Create a new routine manager
    #[must_use]
    pub const fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// All routines of a user ordered by weekday
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails or a row is malformed
    pub async fn list(&self, user_id: Uuid) -> AppResult<Vec<Routine>> {
        let rows = sqlx::query(
            "SELECT id, day, name, exercises FROM routines WHERE user_id = $1 ORDER BY id",
        )
        .bind(user_id.to_string())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| database_error("Failed to list routines", e))?;

        let mut routines = rows
            .iter()
            .map(row_to_routine)
            .collect::<AppResult<Vec<_>>>()?;
        routines.sort_by_key(|routine| routine.day);
        Ok(routines)
    }

    /// One routine, if it exists and belongs to the user
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails or the row is malformed
    pub async fn get(&self, user_id: Uuid, routine_id: i64) -> AppResult<Option<Routine>> {
        let row = sqlx::query(
            "SELECT id, day, name, exercises FROM routines WHERE id = $1 AND user_id = $2",
        )
        .bind(routine_id)
        .bind(user_id.to_string())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| database_error("Failed to get routine", e))?;

        row.as_ref().map(row_to_routine).transpose()
    }

    /// Store a new routine
    ///
    /// # Errors
    ///
    /// Returns an error if the exercises cannot be serialized or the insert fails
    pub async fn create(
        &self,
        user_id: Uuid,
        day: RoutineDay,
        name: &str,
        exercises: Vec<Value>,
    ) -> AppResult<Routine> {
        let exercises_json = serde_json::to_string(&exercises)?;

        let result = sqlx::query(
            r"
            INSERT INTO routines (user_id, day, name, exercises, created_at)
            VALUES ($1, $2, $3, $4, $5)
            ",
        )
        .bind(user_id.to_string())
        .bind(day.as_str())
        .bind(name)
        .bind(exercises_json)
        .bind(Utc::now().to_rfc3339())
        .execute(&self.pool)
        .await
        .map_err(|e| database_error("Failed to create routine", e))?;

        Ok(Routine {
            id: result.last_insert_rowid(),
            day,
            name: name.to_owned(),
            exercises,
        })
    }

    /// Replace the exercises of a routine
    ///
    /// Returns `None` when the routine does not belong to the user.
    ///
    /// # Errors
    ///
    /// Returns an error if the exercises cannot be serialized or the update fails
    pub async fn update_exercises(
        &self,
        user_id: Uuid,
        routine_id: i64,
        exercises: Vec<Value>,
    ) -> AppResult<Option<Routine>> {
        let exercises_json = serde_json::to_string(&exercises)?;

        let result =
            sqlx::query("UPDATE routines SET exercises = $1 WHERE id = $2 AND user_id = $3")
                .bind(exercises_json)
                .bind(routine_id)
                .bind(user_id.to_string())
                .execute(&self.pool)
                .await
                .map_err(|e| database_error("Failed to update routine", e))?;

        if result.rows_affected() == 0 {
            return Ok(None);
        }
        self.get(user_id, routine_id).await
    }

    /// Delete a routine
    ///
    /// Returns `false` when the routine does not belong to the user.
    ///
    /// # Errors
    ///
    /// Returns an error if the delete fails
    pub async fn delete(&self, user_id: Uuid, routine_id: i64) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM routines WHERE id = $1 AND user_id = $2")
            .bind(routine_id)
            .bind(user_id.to_string())
            .execute(&self.pool)
            .await
            .map_err(|e| database_error("Failed to delete routine", e))?;

        Ok(result.rows_affected() > 0)
    }
}

fn row_to_routine(row: &SqliteRow) -> AppResult<Routine> {
    let day: String = row.get("day");
    let exercises: String = row.get("exercises");

    Ok(Routine {
        id: row.get("id"),
        day: RoutineDay::parse(&day)
            .ok_or_else(|| AppError::internal(format!("Invalid routine day: {day}")))?,
        name: row.get("name"),
        exercises: serde_json::from_str(&exercises)?,
    })
}
