// ABOUTME: Dashboard route handlers for intake totals and the daily calorie goal
// ABOUTME: Sums food and water over a local date range and reads or stores the user's goal
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Fitlog Contributors

//! Dashboard routes
//!
//! The summary itself is computed by `fitlog_intelligence::dashboard`; these
//! handlers only load the rows for the requested range.

use std::sync::Arc;

use axum::extract::{Query, State};
use axum::http::{HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use fitlog_intelligence::DashboardSummary;
use serde::{Deserialize, Serialize};

use super::{authenticate, parse_date};
use crate::errors::AppError;
use crate::resources::ServerResources;

#[derive(Debug, Deserialize)]
struct DashboardQuery {
    start_date: Option<String>,
    end_date: Option<String>,
}

/// Calorie goal payload
#[derive(Debug, Serialize, Deserialize)]
pub struct CalorieGoal {
    /// Daily target in kcal
    pub calorie_goal: f64,
}

/// Calorie goal with its origin
#[derive(Debug, Serialize, Deserialize)]
pub struct CalorieGoalResponse {
    /// Daily target in kcal
    pub calorie_goal: f64,
    /// True when the user never stored a goal
    pub is_default: bool,
}

/// Dashboard routes
pub struct DashboardRoutes;

impl DashboardRoutes {
    /// Create all dashboard routes
    pub fn routes(resources: Arc<ServerResources>) -> Router {
        Router::new()
            .route("/dashboard", get(Self::handle_summary))
            .route(
                "/dashboard/calorie-goal",
                get(Self::handle_get_goal).put(Self::handle_set_goal),
            )
            .with_state(resources)
    }

    async fn handle_summary(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
        Query(params): Query<DashboardQuery>,
    ) -> Result<Response, AppError> {
        let user = authenticate(&headers, &resources)?;

        let start = params
            .start_date
            .as_deref()
            .ok_or_else(|| AppError::missing_field("start_date"))
            .and_then(|value| parse_date("start_date", value))?;
        let end = params
            .end_date
            .as_deref()
            .ok_or_else(|| AppError::missing_field("end_date"))
            .and_then(|value| parse_date("end_date", value))?;
        if start > end {
            return Err(AppError::invalid_input(
                "start_date must not be after end_date",
            ));
        }

        let database = &resources.database;
        let entries = database.foods().list_in_range(user.user_id, start, end).await?;
        let water = database.water().list_in_range(user.user_id, start, end).await?;
        let goal = database
            .calorie_goals()
            .get(user.user_id)
            .await?
            .unwrap_or(resources.config.default_calorie_goal);

        let summary = DashboardSummary::new(&entries, Some(goal), &water);
        tracing::debug!(
            user_id = %user.user_id,
            %start,
            %end,
            entries = entries.len(),
            "Dashboard summary computed"
        );

        Ok((StatusCode::OK, Json(summary)).into_response())
    }

    async fn handle_get_goal(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
    ) -> Result<Response, AppError> {
        let user = authenticate(&headers, &resources)?;
        let stored = resources.database.calorie_goals().get(user.user_id).await?;

        Ok((
            StatusCode::OK,
            Json(CalorieGoalResponse {
                calorie_goal: stored.unwrap_or(resources.config.default_calorie_goal),
                is_default: stored.is_none(),
            }),
        )
            .into_response())
    }

    async fn handle_set_goal(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
        Json(request): Json<CalorieGoal>,
    ) -> Result<Response, AppError> {
        let user = authenticate(&headers, &resources)?;
        if !request.calorie_goal.is_finite() || request.calorie_goal <= 0.0 {
            return Err(AppError::out_of_range(format!(
                "calorie_goal must be greater than 0, got {}",
                request.calorie_goal
            )));
        }

        resources
            .database
            .calorie_goals()
            .set(user.user_id, request.calorie_goal)
            .await?;

        Ok((StatusCode::OK, Json(request)).into_response())
    }
}
