// ABOUTME: Food diary route handlers: logging, daily listing, deletion, search and photo analysis
// ABOUTME: Parses nutrition descriptions and rescales them to the logged serving before storing
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Fitlog Contributors

//! Food routes
//!
//! Logged foods keep the raw description next to the nutrient values scaled
//! to the serving the user ate. Search results and photo analyses share one
//! response shape so clients can log either the same way.

use std::sync::Arc;
use std::time::Instant;

use axum::extract::{Path, Query, State};
use axum::http::{HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::{delete, get, post};
use axum::{Json, Router};
use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use chrono::{NaiveDate, Utc};
use fitlog_core::models::{FoodLogEntry, MealType, ServingSpec};
use fitlog_intelligence::nutrition::{
    convert_serving, parse_description, parse_serving_clause, parse_vision_reply, scaling_factor,
    ParsedNutrition,
};
use futures_util::future::try_join_all;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::{authenticate, parse_date};
use crate::constants::{defaults, service_names, vision_ids};
use crate::database::NewFoodEntry;
use crate::errors::{AppError, AppResult};
use crate::external::FoodSearchHit;
use crate::logging::AppLogger;
use crate::resources::ServerResources;

/// Serving the user ate, as a structured value or a `Per ...` description
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum ServingInput {
    /// `{"quantity": 150, "unit": "g"}`
    Spec(ServingSpec),
    /// `"Per 150g"`; a trailing nutrient list is ignored
    Description(String),
}

impl ServingInput {
    fn into_spec(self) -> AppResult<ServingSpec> {
        match self {
            Self::Spec(spec) => Ok(spec),
            Self::Description(text) => parse_serving_clause(&text).ok_or_else(|| {
                AppError::invalid_input(format!("Serving has no recognizable size: {text}"))
            }),
        }
    }
}

/// Request to log a food
#[derive(Debug, Deserialize)]
pub struct AddFoodRequest {
    /// Identifier of the food in the source database
    pub food_id: String,
    /// Display name
    pub food_name: String,
    /// Nutrition description as returned by search
    pub food_description: String,
    /// Meal the food belongs to (English or Spanish name)
    #[serde(alias = "type")]
    pub meal_type: MealType,
    /// Serving eaten; the description's own serving when absent
    #[serde(default)]
    pub serving: Option<ServingInput>,
}

#[derive(Debug, Deserialize)]
struct FoodsQuery {
    date: Option<String>,
}

#[derive(Debug, Deserialize)]
struct SearchQuery {
    query: Option<String>,
    max_results: Option<u32>,
}

/// Photo analysis request
#[derive(Debug, Deserialize)]
pub struct AnalyzeImageRequest {
    /// Image bytes in base64, optionally as a `data:` URL
    pub image_base64: String,
    /// Image MIME type such as `image/jpeg`
    pub mime_type: String,
}

/// Logged food with its editability flag
#[derive(Debug, Serialize, Deserialize)]
pub struct FoodEntryView {
    /// Stored entry
    #[serde(flatten)]
    pub entry: FoodLogEntry,
    /// True while the entry belongs to the current local day
    pub is_editable: bool,
}

/// A day's entries grouped by meal
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct MealGroups {
    /// Breakfast entries
    pub breakfast: Vec<FoodEntryView>,
    /// Lunch entries
    pub lunch: Vec<FoodEntryView>,
    /// Snack entries
    pub snack: Vec<FoodEntryView>,
    /// Dinner entries
    pub dinner: Vec<FoodEntryView>,
}

impl MealGroups {
    fn push(&mut self, view: FoodEntryView) {
        let group = match view.entry.meal_type {
            MealType::Breakfast => &mut self.breakfast,
            MealType::Lunch => &mut self.lunch,
            MealType::Snack => &mut self.snack,
            MealType::Dinner => &mut self.dinner,
        };
        group.push(view);
    }
}

/// Food diary for one day
#[derive(Debug, Serialize, Deserialize)]
pub struct DailyFoodsResponse {
    /// Requested day
    pub date: NaiveDate,
    /// Entries grouped by meal
    pub foods: MealGroups,
    /// True when `date` is the current local day
    pub is_today: bool,
}

/// Search hit with its parsed nutrition
#[derive(Debug, Serialize, Deserialize)]
pub struct FoodSearchResult {
    /// Food as returned by the source
    #[serde(flatten)]
    pub food: FoodSearchHit,
    /// Parsed `food_description`
    pub nutrition: ParsedNutrition,
}

/// Search or photo analysis results
#[derive(Debug, Serialize, Deserialize)]
pub struct FoodSearchResponse {
    /// Matching foods
    pub foods: Vec<FoodSearchResult>,
    /// Number of foods returned
    pub total_results: usize,
}

impl FoodSearchResponse {
    fn from_hits(hits: Vec<FoodSearchHit>) -> Self {
        let foods: Vec<_> = hits
            .into_iter()
            .map(|food| FoodSearchResult {
                nutrition: parse_description(&food.food_description),
                food,
            })
            .collect();
        Self {
            total_results: foods.len(),
            foods,
        }
    }
}

/// Food routes
pub struct FoodRoutes;

impl FoodRoutes {
    /// Create all food routes
    pub fn routes(resources: Arc<ServerResources>) -> Router {
        Router::new()
            .route("/foods", post(Self::handle_add_food).get(Self::handle_list_foods))
            .route("/foods/search", get(Self::handle_search))
            .route("/foods/analyze-image", post(Self::handle_analyze_image))
            .route("/foods/:id", delete(Self::handle_delete_food))
            .with_state(resources)
    }

    async fn handle_add_food(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
        Json(request): Json<AddFoodRequest>,
    ) -> Result<Response, AppError> {
        let user = authenticate(&headers, &resources)?;

        for (field, value) in [
            ("food_id", &request.food_id),
            ("food_name", &request.food_name),
            ("food_description", &request.food_description),
        ] {
            if value.trim().is_empty() {
                return Err(AppError::missing_field(field));
            }
        }

        let target = request.serving.map(ServingInput::into_spec).transpose()?;
        let new_entry = build_entry(
            request.food_id,
            request.food_name,
            request.food_description,
            request.meal_type,
            target,
            &resources,
        );

        let entry = resources.database.foods().insert(user.user_id, new_entry).await?;
        tracing::info!(
            user_id = %user.user_id,
            entry_id = entry.id,
            meal = entry.meal_type.as_str(),
            "Food logged"
        );

        Ok((
            StatusCode::CREATED,
            Json(FoodEntryView {
                entry,
                is_editable: true,
            }),
        )
            .into_response())
    }

    async fn handle_list_foods(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
        Query(params): Query<FoodsQuery>,
    ) -> Result<Response, AppError> {
        let user = authenticate(&headers, &resources)?;

        let today = resources.today();
        let date = params
            .date
            .as_deref()
            .map(|value| parse_date("date", value))
            .transpose()?
            .unwrap_or(today);

        let entries = resources.database.foods().list_for_day(user.user_id, date).await?;

        let mut foods = MealGroups::default();
        for entry in entries {
            let is_editable = entry.logged_on == today;
            foods.push(FoodEntryView { entry, is_editable });
        }

        Ok((
            StatusCode::OK,
            Json(DailyFoodsResponse {
                date,
                foods,
                is_today: date == today,
            }),
        )
            .into_response())
    }

    async fn handle_delete_food(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
        Path(entry_id): Path<i64>,
    ) -> Result<Response, AppError> {
        let user = authenticate(&headers, &resources)?;

        if !resources.database.foods().delete(user.user_id, entry_id).await? {
            return Err(AppError::not_found(format!("Food entry {entry_id}")));
        }

        Ok((
            StatusCode::OK,
            Json(serde_json::json!({ "deleted": true, "id": entry_id })),
        )
            .into_response())
    }

    async fn handle_search(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
        Query(params): Query<SearchQuery>,
    ) -> Result<Response, AppError> {
        authenticate(&headers, &resources)?;

        let query = params
            .query
            .filter(|q| !q.trim().is_empty())
            .ok_or_else(|| AppError::missing_field("query"))?;
        let max_results = params.max_results.unwrap_or(defaults::FOOD_SEARCH_RESULTS);

        let translator = &resources.clients.translator;
        let english_query = translator.translate(&query, "en").await?;

        let started = Instant::now();
        let search = resources
            .clients
            .food_search
            .search_foods(&english_query, max_results)
            .await;
        AppLogger::log_external_call(
            service_names::FATSECRET,
            "foods.search",
            search.is_ok(),
            u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX),
        );
        let hits = search?;

        let language = resources.config.user_language.as_str();
        let hits = try_join_all(hits.into_iter().map(|mut hit| async move {
            hit.food_name = translator.translate(&hit.food_name, language).await?;
            Ok::<_, AppError>(hit)
        }))
        .await?;

        Ok((StatusCode::OK, Json(FoodSearchResponse::from_hits(hits))).into_response())
    }

    async fn handle_analyze_image(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
        Json(request): Json<AnalyzeImageRequest>,
    ) -> Result<Response, AppError> {
        let user = authenticate(&headers, &resources)?;

        let mime_type = request.mime_type.trim();
        if !mime_type.starts_with("image/") {
            return Err(AppError::invalid_input(format!(
                "mime_type must be an image type, got '{mime_type}'"
            )));
        }
        let image_base64 = strip_data_url(&request.image_base64);
        match STANDARD.decode(image_base64) {
            Ok(bytes) if !bytes.is_empty() => {}
            _ => return Err(AppError::invalid_input("image_base64 is not a valid base64 image")),
        }

        let reply = resources
            .clients
            .vision
            .describe_food_image(image_base64, mime_type)
            .await?;
        let recognized = parse_vision_reply(&reply).map_err(|e| {
            tracing::warn!(user_id = %user.user_id, reply = %reply, "Unusable vision reply");
            AppError::external_service(service_names::OPENAI, e.to_string())
        })?;

        let hit = FoodSearchHit {
            food_id: generate_vision_food_id(),
            food_name: recognized.food_name,
            food_description: recognized.food_description,
            food_type: "Generic".to_owned(),
            food_url: String::new(),
            brand_name: None,
        };

        Ok((StatusCode::OK, Json(FoodSearchResponse::from_hits(vec![hit]))).into_response())
    }
}

/// Parse, rescale and date a food before it is stored
///
/// The stored serving is the target when it converts from the reference
/// serving, otherwise the reference serving the values are reported per.
fn build_entry(
    food_id: String,
    food_name: String,
    description: String,
    meal_type: MealType,
    target: Option<ServingSpec>,
    resources: &ServerResources,
) -> NewFoodEntry {
    let parsed = parse_description(&description);
    let converted = convert_serving(&parsed, target.as_ref());

    let reference = parsed.reference_serving();
    let serving = match (target, reference) {
        (Some(target), Some(reference)) if scaling_factor(&reference, &target).is_some() => {
            Some(target)
        }
        (_, reference) => reference,
    };

    let logged_at = Utc::now();
    NewFoodEntry {
        food_id,
        food_name,
        description,
        meal_type,
        logged_at,
        logged_on: resources.local_date(logged_at),
        calories: converted.calories,
        fat: converted.fat,
        carbs: converted.carbs,
        protein: converted.protein,
        serving,
    }
}

/// Accept both bare base64 and `data:<mime>;base64,<payload>`
fn strip_data_url(image: &str) -> &str {
    let image = image.trim();
    image
        .strip_prefix("data:")
        .and_then(|rest| rest.split_once(";base64,"))
        .map_or(image, |(_, payload)| payload)
}

/// Random 7-digit identifier for foods recognized from photos
fn generate_vision_food_id() -> String {
    rand::thread_rng()
        .gen_range(vision_ids::MIN..=vision_ids::MAX)
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use fitlog_core::models::{ServingQuantity, ServingUnit};

    #[test]
    fn test_serving_input_accepts_spec_or_description() {
        let spec: ServingInput =
            serde_json::from_value(serde_json::json!({"quantity": 150, "unit": "g"})).unwrap();
        assert_eq!(
            spec.into_spec().unwrap(),
            ServingSpec::new(150.0, ServingUnit::Gram)
        );

        let text: ServingInput = serde_json::from_value(serde_json::json!(
            "Per 2/3 cup - Calories: 170kcal"
        ))
        .unwrap();
        let spec = text.into_spec().unwrap();
        assert_eq!(spec.quantity, ServingQuantity::Fraction("2/3".into()));
        assert_eq!(spec.unit, ServingUnit::Cup);

        let bare: ServingInput = serde_json::from_value(serde_json::json!("Per 150g")).unwrap();
        assert_eq!(
            bare.into_spec().unwrap(),
            ServingSpec::new(150.0, ServingUnit::Gram)
        );

        let unusable: ServingInput = serde_json::from_value(serde_json::json!("a bowl")).unwrap();
        assert!(unusable.into_spec().is_err());
    }

    #[test]
    fn test_strip_data_url() {
        assert_eq!(strip_data_url("data:image/png;base64,QUJD"), "QUJD");
        assert_eq!(strip_data_url(" QUJD "), "QUJD");
    }

    #[test]
    fn test_vision_food_id_has_seven_digits() {
        for _ in 0..100 {
            let id = generate_vision_food_id();
            assert_eq!(id.len(), 7);
            assert!(!id.starts_with('0'));
        }
    }
}
