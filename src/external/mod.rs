// ABOUTME: External API clients (FatSecret, OpenAI, ExerciseDB) and the traits routes depend on
// ABOUTME: Traits let tests swap in mock clients without touching the network
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Fitlog Contributors

//! External API Clients
//!
//! Routes only see the traits defined here. The concrete clients talk to
//! FatSecret (food search), OpenAI (translation and food photo recognition)
//! and ExerciseDB on RapidAPI (exercise catalog).

pub mod exercisedb_client;
pub mod fatsecret_client;
pub mod openai_client;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::errors::AppResult;

pub use exercisedb_client::ExerciseDbClient;
pub use fatsecret_client::FatSecretClient;
pub use openai_client::{OpenAiClient, PassthroughTranslator};

/// One food returned by a food database search
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FoodSearchHit {
    /// Identifier in the source database
    pub food_id: String,
    /// Display name
    pub food_name: String,
    /// Nutrition description (`Per 100g - Calories: ...`)
    pub food_description: String,
    /// `Generic` or `Brand`
    pub food_type: String,
    /// Link to the food page, empty when unknown
    #[serde(default)]
    pub food_url: String,
    /// Brand for branded foods
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub brand_name: Option<String>,
}

/// Exercise from the exercise catalog
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Exercise {
    /// Catalog identifier
    pub id: String,
    /// Exercise name
    pub name: String,
    /// Primary target muscle
    pub target: String,
    /// Equipment needed
    pub equipment: String,
    /// Body part group
    pub body_part: String,
    /// Animated demonstration
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gif_url: Option<String>,
    /// Step-by-step instructions
    #[serde(default)]
    pub instructions: Vec<String>,
    /// Other muscles involved
    #[serde(default)]
    pub secondary_muscles: Vec<String>,
}

/// Food database search
#[async_trait]
pub trait FoodSearchProvider: Send + Sync {
    /// Search foods by an English query
    async fn search_foods(&self, query: &str, max_results: u32) -> AppResult<Vec<FoodSearchHit>>;
}

/// Text translation
#[async_trait]
pub trait Translator: Send + Sync {
    /// Translate `text` into `target_language` (ISO code such as `es` or `en`)
    async fn translate(&self, text: &str, target_language: &str) -> AppResult<String>;
}

/// Food photo recognition
#[async_trait]
pub trait FoodVision: Send + Sync {
    /// Ask the vision model about a photo and return its raw text reply
    async fn describe_food_image(&self, image_base64: &str, mime_type: &str) -> AppResult<String>;
}

/// Exercise catalog lookup
#[async_trait]
pub trait ExerciseCatalog: Send + Sync {
    /// Exercises for one body part
    async fn exercises_by_body_part(&self, body_part: &str) -> AppResult<Vec<Exercise>>;
}
