// ABOUTME: Water intake storage, one row per user and local day
// ABOUTME: Reads and upserts glass counts and lists them over a date range
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Fitlog Contributors

use chrono::NaiveDate;
use fitlog_core::models::WaterIntake;
use sqlx::sqlite::SqliteRow;
use sqlx::{Row, SqlitePool};
use uuid::Uuid;

use crate::errors::{database_error, AppError, AppResult};

/// Water intake database operations
pub struct WaterManager {
    pool: SqlitePool,
}

impl WaterManager {
    /// Create a new water manager
    #[must_use]
    pub const fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Glasses logged on a day, if any
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails
    pub async fn get(&self, user_id: Uuid, date: NaiveDate) -> AppResult<Option<WaterIntake>> {
        let row = sqlx::query("SELECT date, glasses FROM water_intake WHERE user_id = $1 AND date = $2")
            .bind(user_id.to_string())
            .bind(date.to_string())
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| database_error("Failed to get water intake", e))?;

        row.as_ref().map(row_to_water_intake).transpose()
    }

    /// Replace the glass count for a day
    ///
    /// # Errors
    ///
    /// Returns an error if the upsert fails
    pub async fn upsert(&self, user_id: Uuid, intake: WaterIntake) -> AppResult<WaterIntake> {
        sqlx::query(
            r"
            INSERT INTO water_intake (user_id, date, glasses)
            VALUES ($1, $2, $3)
            ON CONFLICT(user_id, date) DO UPDATE SET glasses = excluded.glasses
            ",
        )
        .bind(user_id.to_string())
        .bind(intake.date.to_string())
        .bind(i64::from(intake.glasses))
        .execute(&self.pool)
        .await
        .map_err(|e| database_error("Failed to save water intake", e))?;

        Ok(intake)
    }

    /// Days with logged water between two dates, both inclusive
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails
    pub async fn list_in_range(
        &self,
        user_id: Uuid,
        start: NaiveDate,
        end: NaiveDate,
    ) -> AppResult<Vec<WaterIntake>> {
        let rows = sqlx::query(
            r"
            SELECT date, glasses FROM water_intake
            WHERE user_id = $1 AND date >= $2 AND date <= $3
            ORDER BY date
            ",
        )
        .bind(user_id.to_string())
        .bind(start.to_string())
        .bind(end.to_string())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| database_error("Failed to list water intake", e))?;

        rows.iter().map(row_to_water_intake).collect()
    }
}

fn row_to_water_intake(row: &SqliteRow) -> AppResult<WaterIntake> {
    let date: String = row.get("date");
    let glasses: i64 = row.get("glasses");

    Ok(WaterIntake {
        date: NaiveDate::parse_from_str(&date, "%Y-%m-%d")
            .map_err(|e| AppError::internal(format!("Invalid date: {e}")))?,
        glasses: u32::try_from(glasses)
            .map_err(|e| AppError::internal(format!("Invalid glass count {glasses}: {e}")))?,
    })
}
