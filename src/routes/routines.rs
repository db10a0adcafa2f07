// ABOUTME: Training routine route handlers
// ABOUTME: CRUD on weekday routines owned by the caller; other users' routines read as missing
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Fitlog Contributors

use std::sync::Arc;

use axum::extract::{Path, State};
use axum::http::{HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use fitlog_core::models::{Routine, RoutineDay};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::authenticate;
use crate::errors::AppError;
use crate::resources::ServerResources;

/// Request to create a routine
#[derive(Debug, Deserialize)]
pub struct CreateRoutineRequest {
    /// Weekday name, English or Spanish
    pub day: String,
    /// Routine name
    pub name: String,
    /// Exercises, stored as given
    #[serde(default)]
    pub exercises: Vec<Value>,
}

/// Request to replace a routine's exercises
#[derive(Debug, Deserialize)]
pub struct UpdateRoutineRequest {
    /// New exercise list
    pub exercises: Vec<Value>,
}

/// All routines of the caller
#[derive(Debug, Serialize, Deserialize)]
pub struct RoutineListResponse {
    /// Routines ordered by weekday
    pub routines: Vec<Routine>,
}

/// Routine routes
pub struct RoutineRoutes;

impl RoutineRoutes {
    /// Create all routine routes
    pub fn routes(resources: Arc<ServerResources>) -> Router {
        Router::new()
            .route("/routines", get(Self::handle_list).post(Self::handle_create))
            .route(
                "/routines/:id",
                get(Self::handle_get)
                    .put(Self::handle_update)
                    .delete(Self::handle_delete),
            )
            .with_state(resources)
    }

    async fn handle_list(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
    ) -> Result<Response, AppError> {
        let user = authenticate(&headers, &resources)?;
        let routines = resources.database.routines().list(user.user_id).await?;
        Ok((StatusCode::OK, Json(RoutineListResponse { routines })).into_response())
    }

    async fn handle_create(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
        Json(request): Json<CreateRoutineRequest>,
    ) -> Result<Response, AppError> {
        let user = authenticate(&headers, &resources)?;

        let day = RoutineDay::parse(&request.day).ok_or_else(|| {
            AppError::invalid_input(format!("'{}' is not a day of the week", request.day))
        })?;
        let name = request.name.trim();
        if name.is_empty() {
            return Err(AppError::missing_field("name"));
        }

        let routine = resources
            .database
            .routines()
            .create(user.user_id, day, name, request.exercises)
            .await?;
        tracing::info!(user_id = %user.user_id, routine_id = routine.id, day = day.as_str(), "Routine created");

        Ok((StatusCode::CREATED, Json(routine)).into_response())
    }

    async fn handle_get(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
        Path(routine_id): Path<i64>,
    ) -> Result<Response, AppError> {
        let user = authenticate(&headers, &resources)?;
        let routine = resources
            .database
            .routines()
            .get(user.user_id, routine_id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("Routine {routine_id}")))?;
        Ok((StatusCode::OK, Json(routine)).into_response())
    }

    async fn handle_update(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
        Path(routine_id): Path<i64>,
        Json(request): Json<UpdateRoutineRequest>,
    ) -> Result<Response, AppError> {
        let user = authenticate(&headers, &resources)?;
        let routine = resources
            .database
            .routines()
            .update_exercises(user.user_id, routine_id, request.exercises)
            .await?
            .ok_or_else(|| AppError::not_found(format!("Routine {routine_id}")))?;
        Ok((StatusCode::OK, Json(routine)).into_response())
    }

    async fn handle_delete(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
        Path(routine_id): Path<i64>,
    ) -> Result<Response, AppError> {
        let user = authenticate(&headers, &resources)?;
        if !resources
            .database
            .routines()
            .delete(user.user_id, routine_id)
            .await?
        {
            return Err(AppError::not_found(format!("Routine {routine_id}")));
        }
        Ok(StatusCode::NO_CONTENT.into_response())
    }
}
