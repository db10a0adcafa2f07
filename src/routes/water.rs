// ABOUTME: Water intake route handlers
// ABOUTME: Reads and replaces the number of glasses logged for a local day
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Fitlog Contributors

use std::sync::Arc;

use axum::extract::{Query, State};
use axum::http::{HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use fitlog_core::models::WaterIntake;
use serde::Deserialize;

use super::{authenticate, parse_date};
use crate::errors::AppError;
use crate::resources::ServerResources;

#[derive(Debug, Deserialize)]
struct WaterQuery {
    date: Option<String>,
}

/// Request to set a day's glass count
#[derive(Debug, Deserialize)]
pub struct SetWaterRequest {
    /// Day, `YYYY-MM-DD`; today when absent
    #[serde(default)]
    pub date: Option<String>,
    /// Glasses drunk that day
    pub glasses: u32,
}

/// Water intake routes
pub struct WaterRoutes;

impl WaterRoutes {
    /// Create all water intake routes
    pub fn routes(resources: Arc<ServerResources>) -> Router {
        Router::new()
            .route("/water", get(Self::handle_get).put(Self::handle_set))
            .with_state(resources)
    }

    async fn handle_get(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
        Query(params): Query<WaterQuery>,
    ) -> Result<Response, AppError> {
        let user = authenticate(&headers, &resources)?;
        let date = match params.date.as_deref() {
            Some(value) => parse_date("date", value)?,
            None => resources.today(),
        };

        let intake = resources
            .database
            .water()
            .get(user.user_id, date)
            .await?
            .unwrap_or(WaterIntake { date, glasses: 0 });

        Ok((StatusCode::OK, Json(intake)).into_response())
    }

    async fn handle_set(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
        Json(request): Json<SetWaterRequest>,
    ) -> Result<Response, AppError> {
        let user = authenticate(&headers, &resources)?;
        let date = match request.date.as_deref() {
            Some(value) => parse_date("date", value)?,
            None => resources.today(),
        };

        let intake = resources
            .database
            .water()
            .upsert(
                user.user_id,
                WaterIntake {
                    date,
                    glasses: request.glasses,
                },
            )
            .await?;

        Ok((StatusCode::OK, Json(intake)).into_response())
    }
}
