// ABOUTME: One-rep-max route handlers
// ABOUTME: Estimates a max from a performed set, stores records and returns per-exercise progress
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Fitlog Contributors

use std::sync::Arc;

use axum::extract::{Query, State};
use axum::http::{HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use fitlog_core::models::OneRepMaxRecord;
use fitlog_intelligence::strength::{estimate_one_rep_max, OneRepMaxInput};
use serde::{Deserialize, Serialize};

use super::{authenticate, parse_date};
use crate::database::NewOneRepMaxRecord;
use crate::errors::AppError;
use crate::resources::ServerResources;

/// Request to store a one-rep-max record
#[derive(Debug, Deserialize)]
pub struct SaveOneRepMaxRequest {
    /// The set the estimate came from
    #[serde(flatten)]
    pub set: OneRepMaxInput,
    /// Estimated max; computed from the set when absent
    #[serde(default)]
    pub one_rep_max: Option<f64>,
    /// Day of the set, `YYYY-MM-DD`; today when absent
    #[serde(default)]
    pub date: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ProgressQuery {
    exercise: Option<String>,
}

/// Progress of one exercise
#[derive(Debug, Serialize, Deserialize)]
pub struct ProgressResponse {
    /// Exercise name
    pub exercise: String,
    /// Records oldest first
    pub records: Vec<OneRepMaxRecord>,
}

/// One-rep-max routes
pub struct OneRepMaxRoutes;

impl OneRepMaxRoutes {
    /// Create all one-rep-max routes
    pub fn routes(resources: Arc<ServerResources>) -> Router {
        Router::new()
            .route("/one-rep-max/calculate", post(Self::handle_calculate))
            .route("/one-rep-max", post(Self::handle_save))
            .route("/one-rep-max/progress", get(Self::handle_progress))
            .with_state(resources)
    }

    async fn handle_calculate(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
        Json(input): Json<OneRepMaxInput>,
    ) -> Result<Response, AppError> {
        authenticate(&headers, &resources)?;
        let estimate = estimate_one_rep_max(&input)?;
        Ok((StatusCode::OK, Json(estimate)).into_response())
    }

    async fn handle_save(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
        Json(request): Json<SaveOneRepMaxRequest>,
    ) -> Result<Response, AppError> {
        let user = authenticate(&headers, &resources)?;

        let one_rep_max = match request.one_rep_max {
            Some(value) => {
                request.set.validate()?;
                value
            }
            None => estimate_one_rep_max(&request.set)?.one_rep_max,
        };
        if !one_rep_max.is_finite() || one_rep_max <= 0.0 {
            return Err(AppError::out_of_range(format!(
                "one_rep_max must be greater than 0, got {one_rep_max}"
            )));
        }

        let recorded_on = match request.date.as_deref() {
            Some(value) => parse_date("date", value)?,
            None => resources.today(),
        };

        let set = request.set;
        let record = resources
            .database
            .one_rep_max()
            .insert(
                user.user_id,
                NewOneRepMaxRecord {
                    exercise: set.exercise.trim().to_owned(),
                    weight: set.weight,
                    unit: set.unit,
                    reps: set.reps,
                    rpe: set.rpe,
                    one_rep_max,
                    recorded_on,
                },
            )
            .await?;

        Ok((StatusCode::CREATED, Json(record)).into_response())
    }

    async fn handle_progress(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
        Query(params): Query<ProgressQuery>,
    ) -> Result<Response, AppError> {
        let user = authenticate(&headers, &resources)?;
        let exercise = params
            .exercise
            .map(|e| e.trim().to_owned())
            .filter(|e| !e.is_empty())
            .ok_or_else(|| AppError::missing_field("exercise"))?;

        let records = resources
            .database
            .one_rep_max()
            .progress(user.user_id, &exercise)
            .await?;

        Ok((StatusCode::OK, Json(ProgressResponse { exercise, records })).into_response())
    }
}
