// ABOUTME: One-rep-max history storage
// ABOUTME: Appends estimates and returns an exercise's progression ordered by date
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Fitlog Contributors

use chrono::NaiveDate;
use fitlog_core::models::{OneRepMaxRecord, WeightUnit};
use sqlx::sqlite::SqliteRow;
use sqlx::{Row, SqlitePool};
use uuid::Uuid;

use crate::errors::{database_error, AppError, AppResult};

/// One-rep-max record about to be stored
#[derive(Debug, Clone)]
pub struct NewOneRepMaxRecord {
    /// Exercise name
    pub exercise: String,
    /// Weight lifted
    pub weight: f64,
    /// Unit of `weight` and `one_rep_max`
    pub unit: WeightUnit,
    /// Repetitions performed
    pub reps: u32,
    /// Rate of perceived exertion
    pub rpe: f64,
    /// Estimated one-rep max
    pub one_rep_max: f64,
    /// Day the set was performed
    pub recorded_on: NaiveDate,
}

/// One-rep-max database operations
pub struct OneRepMaxManager {
    pool: SqlitePool,
}

impl OneRepMaxManager {
    /// Create a new one-rep-max manager
    #[must_use]
    pub const fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Append a record
    ///
    /// # Errors
    ///
    /// Returns an error if the insert fails
    pub async fn insert(
        &self,
        user_id: Uuid,
        record: NewOneRepMaxRecord,
    ) -> AppResult<OneRepMaxRecord> {
        let result = sqlx::query(
            r"
            INSERT INTO one_rep_max_records (user_id, exercise, weight, unit, reps, rpe, one_rep_max, recorded_on)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            ",
        )
        .bind(user_id.to_string())
        .bind(&record.exercise)
        .bind(record.weight)
        .bind(record.unit.as_str())
        .bind(i64::from(record.reps))
        .bind(record.rpe)
        .bind(record.one_rep_max)
        .bind(record.recorded_on.to_string())
        .execute(&self.pool)
        .await
        .map_err(|e| database_error("Failed to save one-rep max", e))?;

        Ok(OneRepMaxRecord {
            id: result.last_insert_rowid(),
            exercise: record.exercise,
            weight: record.weight,
            unit: record.unit,
            reps: record.reps,
            rpe: record.rpe,
            one_rep_max: record.one_rep_max,
            recorded_on: record.recorded_on,
        })
    }

    /// Records of one exercise, oldest first
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails or a row is malformed
    pub async fn progress(&self, user_id: Uuid, exercise: &str) -> AppResult<Vec<OneRepMaxRecord>> {
        let rows = sqlx::query(
            r"
            SELECT id, exercise, weight, unit, reps, rpe, one_rep_max, recorded_on
            FROM one_rep_max_records
            WHERE user_id = $1 AND exercise = $2
            ORDER BY recorded_on ASC, id ASC
            ",
        )
        .bind(user_id.to_string())
        .bind(exercise)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| database_error("Failed to load one-rep-max progress", e))?;

        rows.iter().map(row_to_record).collect()
    }
}

fn row_to_record(row: &SqliteRow) -> AppResult<OneRepMaxRecord> {
    let unit: String = row.get("unit");
    let reps: i64 = row.get("reps");
    let recorded_on: String = row.get("recorded_on");

    Ok(OneRepMaxRecord {
        id: row.get("id"),
        exercise: row.get("exercise"),
        weight: row.get("weight"),
        unit: WeightUnit::parse(&unit)
            .ok_or_else(|| AppError::internal(format!("Invalid weight unit: {unit}")))?,
        reps: u32::try_from(reps)
            .map_err(|e| AppError::internal(format!("Invalid reps {reps}: {e}")))?,
        rpe: row.get("rpe"),
        one_rep_max: row.get("one_rep_max"),
        recorded_on: NaiveDate::parse_from_str(&recorded_on, "%Y-%m-%d")
            .map_err(|e| AppError::internal(format!("Invalid date: {e}")))?,
    })
}
