// ABOUTME: SQLite persistence for users, food log, water, routines, 1RM records and goals
// ABOUTME: Opens the connection pool, creates the schema and exposes one manager per table
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Fitlog Contributors

//! # Database Management
//!
//! [`Database`] owns the `SQLite` pool. Each table is accessed through a small
//! manager (`UserManager`, `FoodLogManager`, ...) holding a clone of the pool,
//! so handlers never share mutable state. All per-user queries filter on
//! `user_id`: a row that belongs to another user is indistinguishable from a
//! missing one.

mod calorie_goals;
mod foods;
mod one_rep_max;
mod routines;
mod users;
mod water;

pub use calorie_goals::CalorieGoalManager;
pub use foods::{FoodLogManager, NewFoodEntry};
pub use one_rep_max::{NewOneRepMaxRecord, OneRepMaxManager};
pub use routines::RoutineManager;
pub use users::UserManager;
pub use water::WaterManager;

use std::str::FromStr;

use anyhow::Result;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::SqlitePool;
use tokio::fs;
use tracing::{debug, info};

use crate::config::DatabaseUrl;

const FILE_POOL_SIZE: u32 = 5;

/// Connection pool plus schema management
#[derive(Clone)]
pub struct Database {
    pool: SqlitePool,
}

impl Database {
    /// Open (creating if needed) the database and apply the schema
    ///
    /// # Errors
    ///
    /// Returns an error if the parent directory cannot be created, the
    /// connection fails, or a schema statement fails
    pub async fn new(url: &DatabaseUrl) -> Result<Self> {
        if let DatabaseUrl::SQLite { path } = url {
            if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
                fs::create_dir_all(parent).await?;
            }
        }

        let options = SqliteConnectOptions::from_str(&url.to_connection_string())?
            .create_if_missing(true)
            .foreign_keys(true);

        // Every in-memory connection is its own database, so keep exactly one alive
        let pool_options = if url.is_memory() {
            SqlitePoolOptions::new()
                .max_connections(1)
                .min_connections(1)
                .idle_timeout(None)
                .max_lifetime(None)
        } else {
            SqlitePoolOptions::new().max_connections(FILE_POOL_SIZE)
        };

        let pool = pool_options.connect_with(options).await?;
        let db = Self { pool };
        db.migrate().await?;

        info!(database = %url, "Database ready");
        Ok(db)
    }

    /// Get a reference to the database pool
    #[must_use]
    pub const fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// User accounts
    #[must_use]
    pub fn users(&self) -> UserManager {
        UserManager::new(self.pool.clone())
    }

    /// Food diary
    #[must_use]
    pub fn foods(&self) -> FoodLogManager {
        FoodLogManager::new(self.pool.clone())
    }

    /// Water intake per day
    #[must_use]
    pub fn water(&self) -> WaterManager {
        WaterManager::new(self.pool.clone())
    }

    /// Weekly routines
    #[must_use]
    pub fn routines(&self) -> RoutineManager {
        RoutineManager::new(self.pool.clone())
    }

    /// One-rep-max history
    #[must_use]
    pub fn one_rep_max(&self) -> OneRepMaxManager {
        OneRepMaxManager::new(self.pool.clone())
    }

    /// Calorie goals
    #[must_use]
    pub fn calorie_goals(&self) -> CalorieGoalManager {
        CalorieGoalManager::new(self.pool.clone())
    }

    /// Check the connection with a trivial query
    ///
    /// # Errors
    ///
    /// Returns an error if the database does not answer
    pub async fn ping(&self) -> Result<()> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }

    /// Create tables and indexes if they do not exist
    ///
    /// # Errors
    ///
    /// Returns an error if any statement fails
    pub async fn migrate(&self) -> Result<()> {
        for statement in SCHEMA {
            sqlx::query(statement).execute(&self.pool).await?;
        }
        debug!(statements = SCHEMA.len(), "Schema applied");
        Ok(())
    }
}

const SCHEMA: &[&str] = &[
    r"
    CREATE TABLE IF NOT EXISTS users (
        id TEXT PRIMARY KEY,
        username TEXT UNIQUE NOT NULL,
        email TEXT UNIQUE NOT NULL,
        password_hash TEXT NOT NULL,
        created_at TEXT NOT NULL
    )
    ",
    r"
    CREATE TABLE IF NOT EXISTS food_entries (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        user_id TEXT NOT NULL REFERENCES users(id) ON DELETE CASCADE,
        food_id TEXT NOT NULL,
        food_name TEXT NOT NULL,
        description TEXT NOT NULL,
        meal_type TEXT NOT NULL CHECK (meal_type IN ('breakfast', 'lunch', 'snack', 'dinner')),
        logged_at TEXT NOT NULL,
        logged_on TEXT NOT NULL,
        calories REAL,
        fat REAL,
        carbs REAL,
        protein REAL,
        serving_quantity TEXT,
        serving_unit TEXT
    )
    ",
    "CREATE INDEX IF NOT EXISTS idx_food_entries_user_day ON food_entries(user_id, logged_on)",
    r"
    CREATE TABLE IF NOT EXISTS water_intake (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        user_id TEXT NOT NULL REFERENCES users(id) ON DELETE CASCADE,
        date TEXT NOT NULL,
        glasses INTEGER NOT NULL CHECK (glasses >= 0),
        UNIQUE(user_id, date)
    )
    ",
    r"
    CREATE TABLE IF NOT EXISTS routines (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        user_id TEXT NOT NULL REFERENCES users(id) ON DELETE CASCADE,
        day TEXT NOT NULL,
        name TEXT NOT NULL,
        exercises TEXT NOT NULL DEFAULT '[]',
        created_at TEXT NOT NULL
    )
    ",
    "CREATE INDEX IF NOT EXISTS idx_routines_user ON routines(user_id)",
    r"
    CREATE TABLE IF NOT EXISTS one_rep_max_records (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        user_id TEXT NOT NULL REFERENCES users(id) ON DELETE CASCADE,
        exercise TEXT NOT NULL,
        weight REAL NOT NULL,
        unit TEXT NOT NULL CHECK (unit IN ('kg', 'lb')),
        reps INTEGER NOT NULL,
        rpe REAL NOT NULL,
        one_rep_max REAL NOT NULL,
        recorded_on TEXT NOT NULL
    )
    ",
    "CREATE INDEX IF NOT EXISTS idx_one_rep_max_user_exercise ON one_rep_max_records(user_id, exercise, recorded_on)",
    r"
    CREATE TABLE IF NOT EXISTS calorie_goals (
        user_id TEXT PRIMARY KEY REFERENCES users(id) ON DELETE CASCADE,
        calorie_goal REAL NOT NULL
    )
    ",
];
