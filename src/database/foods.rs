// ABOUTME: Food diary storage
// ABOUTME: Inserts converted food entries and lists them per local day or date range
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Fitlog Contributors

use chrono::{DateTime, NaiveDate, Utc};
use fitlog_core::models::{FoodLogEntry, MealType, ServingQuantity, ServingSpec, ServingUnit};
use sqlx::sqlite::SqliteRow;
use sqlx::{Row, SqlitePool};
use uuid::Uuid;

use crate::errors::{database_error, AppError, AppResult};

const FOOD_COLUMNS: &str = "id, food_id, food_name, description, meal_type, logged_at, logged_on, \
     calories, fat, carbs, protein, serving_quantity, serving_unit";

/// Food entry about to be stored, with nutrients already scaled to `serving`
#[derive(Debug, Clone)]
pub struct NewFoodEntry {
    /// Identifier of the food in the source database
    pub food_id: String,
    /// Display name
    pub food_name: String,
    /// Raw nutrition description
    pub description: String,
    /// Meal the food belongs to
    pub meal_type: MealType,
    /// Creation time
    pub logged_at: DateTime<Utc>,
    /// Local calendar day
    pub logged_on: NaiveDate,
    /// Energy in kcal
    pub calories: Option<f64>,
    /// Fat in grams
    pub fat: Option<f64>,
    /// Carbohydrates in grams
    pub carbs: Option<f64>,
    /// Protein in grams
    pub protein: Option<f64>,
    /// Serving the values correspond to
    pub serving: Option<ServingSpec>,
}

/// Food diary database operations
pub struct FoodLogManager {
    pool: SqlitePool,
}

impl FoodLogManager {
    /// Create a new food log manager
    #[must_use]
    pub const fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Store an entry for a user
    ///
    /// # Errors
    ///
    /// Returns an error if the insert fails
    pub async fn insert(&self, user_id: Uuid, entry: NewFoodEntry) -> AppResult<FoodLogEntry> {
        let serving_quantity = entry.serving.as_ref().map(|s| s.quantity.to_string());
        let serving_unit = entry.serving.as_ref().map(|s| s.unit.as_str());

        let result = sqlx::query(
            r"
            INSERT INTO food_entries (
                user_id, food_id, food_name, description, meal_type, logged_at, logged_on,
                calories, fat, carbs, protein, serving_quantity, serving_unit
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13)
            ",
        )
        .bind(user_id.to_string())
        .bind(&entry.food_id)
        .bind(&entry.food_name)
        .bind(&entry.description)
        .bind(entry.meal_type.as_str())
        .bind(entry.logged_at.to_rfc3339())
        .bind(entry.logged_on.to_string())
        .bind(entry.calories)
        .bind(entry.fat)
        .bind(entry.carbs)
        .bind(entry.protein)
        .bind(serving_quantity)
        .bind(serving_unit)
        .execute(&self.pool)
        .await
        .map_err(|e| database_error("Failed to log food", e))?;

        let (serving_quantity, serving_unit) = entry
            .serving
            .map_or((None, None), |s| (Some(s.quantity), Some(s.unit)));

        Ok(FoodLogEntry {
            id: result.last_insert_rowid(),
            food_id: entry.food_id,
            food_name: entry.food_name,
            description: entry.description,
            meal_type: entry.meal_type,
            logged_at: entry.logged_at,
            logged_on: entry.logged_on,
            calories: entry.calories,
            fat: entry.fat,
            carbs: entry.carbs,
            protein: entry.protein,
            serving_quantity,
            serving_unit,
        })
    }

    /// Entries logged on one local day, oldest first
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails or a row is malformed
    pub async fn list_for_day(&self, user_id: Uuid, day: NaiveDate) -> AppResult<Vec<FoodLogEntry>> {
        self.list_in_range(user_id, day, day).await
    }

    /// Entries logged between two local days, both inclusive, oldest first
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails or a row is malformed
    pub async fn list_in_range(
        &self,
        user_id: Uuid,
        start: NaiveDate,
        end: NaiveDate,
    ) -> AppResult<Vec<FoodLogEntry>> {
        let rows = sqlx::query(&format!(
            "SELECT {FOOD_COLUMNS} FROM food_entries \
             WHERE user_id = $1 AND logged_on >= $2 AND logged_on <= $3 \
             ORDER BY logged_at, id"
        ))
        .bind(user_id.to_string())
        .bind(start.to_string())
        .bind(end.to_string())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| database_error("Failed to list food entries", e))?;

        rows.iter().map(row_to_food_entry).collect()
    }

    /// Delete one of the user's entries
    ///
    /// Returns `false` when no entry with that id belongs to the user.
    ///
    /// # Errors
    ///
    /// Returns an error if the delete fails
    pub async fn delete(&self, user_id: Uuid, entry_id: i64) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM food_entries WHERE id = $1 AND user_id = $2")
            .bind(entry_id)
            .bind(user_id.to_string())
            .execute(&self.pool)
            .await
            .map_err(|e| database_error("Failed to delete food entry", e))?;

        Ok(result.rows_affected() > 0)
    }
}

fn row_to_food_entry(row: &SqliteRow) -> AppResult<FoodLogEntry> {
    let meal_type: String = row.get("meal_type");
    let logged_at: String = row.get("logged_at");
    let logged_on: String = row.get("logged_on");
    let serving_quantity: Option<String> = row.get("serving_quantity");
    let serving_unit: Option<String> = row.get("serving_unit");

    Ok(FoodLogEntry {
        id: row.get("id"),
        food_id: row.get("food_id"),
        food_name: row.get("food_name"),
        description: row.get("description"),
        meal_type: MealType::parse(&meal_type)
            .ok_or_else(|| AppError::internal(format!("Invalid meal type: {meal_type}")))?,
        logged_at: DateTime::parse_from_rfc3339(&logged_at)
            .map_err(|e| AppError::internal(format!("Invalid datetime: {e}")))?
            .with_timezone(&Utc),
        logged_on: NaiveDate::parse_from_str(&logged_on, "%Y-%m-%d")
            .map_err(|e| AppError::internal(format!("Invalid date: {e}")))?,
        calories: row.get("calories"),
        fat: row.get("fat"),
        carbs: row.get("carbs"),
        protein: row.get("protein"),
        serving_quantity: serving_quantity.as_deref().map(ServingQuantity::from_storage),
        serving_unit: serving_unit.as_deref().and_then(ServingUnit::parse),
    })
}
