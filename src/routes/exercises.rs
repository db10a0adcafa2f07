// ABOUTME: Exercise catalog route handler
// ABOUTME: Validates the body part, fetches exercises and translates them into the user language
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Fitlog Contributors

use std::sync::Arc;
use std::time::Instant;

use axum::extract::{Query, State};
use axum::http::{HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use futures_util::future::try_join_all;
use serde::{Deserialize, Serialize};

use super::authenticate;
use crate::constants::{service_names, EXERCISE_BODY_PARTS};
use crate::errors::{AppError, AppResult};
use crate::external::{Exercise, Translator};
use crate::logging::AppLogger;
use crate::resources::ServerResources;

#[derive(Debug, Deserialize)]
struct ExercisesQuery {
    #[serde(alias = "bodyPart")]
    body_part: Option<String>,
}

/// Exercises for a body part
#[derive(Debug, Serialize, Deserialize)]
pub struct ExercisesResponse {
    /// Requested body part
    pub body_part: String,
    /// Translated exercises
    pub exercises: Vec<Exercise>,
}

/// Exercise catalog routes
pub struct ExerciseRoutes;

impl ExerciseRoutes {
    /// Create all exercise routes
    pub fn routes(resources: Arc<ServerResources>) -> Router {
        Router::new()
            .route("/exercises", get(Self::handle_list))
            .with_state(resources)
    }

    async fn handle_list(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
        Query(params): Query<ExercisesQuery>,
    ) -> Result<Response, AppError> {
        authenticate(&headers, &resources)?;

        let body_part = normalize_body_part(params.body_part.as_deref())?;

        let started = Instant::now();
        let fetched = resources
            .clients
            .exercises
            .exercises_by_body_part(&body_part)
            .await;
        AppLogger::log_external_call(
            service_names::EXERCISEDB,
            "exercises.bodyPart",
            fetched.is_ok(),
            u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX),
        );

        let translator = resources.clients.translator.as_ref();
        let language = resources.config.user_language.as_str();
        let exercises = try_join_all(
            fetched?
                .into_iter()
                .map(|exercise| translate_exercise(translator, exercise, language)),
        )
        .await?;

        Ok((StatusCode::OK, Json(ExercisesResponse { body_part, exercises })).into_response())
    }
}

/// Validate a body part against the catalog's list
fn normalize_body_part(raw: Option<&str>) -> AppResult<String> {
    let raw = raw
        .map(|value| value.replace("%20", " ").trim().to_lowercase())
        .filter(|value| !value.is_empty())
        .ok_or_else(|| AppError::missing_field("body_part"))?;

    if EXERCISE_BODY_PARTS.contains(&raw.as_str()) {
        Ok(raw)
    } else {
        Err(AppError::invalid_input(format!(
            "Invalid body part '{raw}'. Must be one of: {}",
            EXERCISE_BODY_PARTS.join(", ")
        )))
    }
}

/// Translate every human-readable field of an exercise
async fn translate_exercise(
    translator: &dyn Translator,
    exercise: Exercise,
    language: &str,
) -> AppResult<Exercise> {
    let (name, target, equipment, body_part) = futures_util::try_join!(
        translator.translate(&exercise.name, language),
        translator.translate(&exercise.target, language),
        translator.translate(&exercise.equipment, language),
        translator.translate(&exercise.body_part, language),
    )?;
    let instructions = translate_list(translator, &exercise.instructions, language).await?;
    let secondary_muscles =
        translate_list(translator, &exercise.secondary_muscles, language).await?;

    Ok(Exercise {
        id: exercise.id,
        name,
        target,
        equipment,
        body_part,
        gif_url: exercise.gif_url,
        instructions,
        secondary_muscles,
    })
}

async fn translate_list(
    translator: &dyn Translator,
    items: &[String],
    language: &str,
) -> AppResult<Vec<String>> {
    try_join_all(items.iter().map(|item| translator.translate(item, language))).await
}
