// ABOUTME: ExerciseDB (RapidAPI) client for the exercise catalog
// ABOUTME: Fetches exercises by body part with the RapidAPI key and host headers
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Fitlog Contributors

use async_trait::async_trait;
use reqwest::Url;

use super::{Exercise, ExerciseCatalog};
use crate::config::ExerciseDbConfig;
use crate::constants::{limits, service_names};
use crate::errors::{external_error, AppError, AppResult};

const RAPIDAPI_KEY_HEADER: &str = "x-rapidapi-key";
const RAPIDAPI_HOST_HEADER: &str = "x-rapidapi-host";

/// ExerciseDB API client
pub struct ExerciseDbClient {
    config: ExerciseDbConfig,
    http_client: reqwest::Client,
}

impl ExerciseDbClient {
    /// Create a new ExerciseDB client
    #[must_use]
    pub fn new(config: ExerciseDbConfig) -> Self {
        Self {
            config,
            http_client: reqwest::Client::new(),
        }
    }

    /// Request URL for one body part
    fn body_part_url(&self, body_part: &str) -> AppResult<Url> {
        let mut url = Url::parse(&self.config.base_url)
            .map_err(|e| AppError::config(format!("Invalid EXERCISEDB_BASE_URL: {e}")))?;
        url.path_segments_mut()
            .map_err(|()| AppError::config("EXERCISEDB_BASE_URL cannot be a base"))?
            .pop_if_empty()
            .extend(["exercises", "bodyPart", body_part]);
        url.query_pairs_mut()
            .append_pair("limit", &limits::EXERCISES_PER_BODY_PART.to_string());
        Ok(url)
    }
}

#[async_trait]
impl ExerciseCatalog for ExerciseDbClient {
    async fn exercises_by_body_part(&self, body_part: &str) -> AppResult<Vec<Exercise>> {
        let api_key = self
            .config
            .api_key
            .as_deref()
            .ok_or_else(|| AppError::external_unavailable(service_names::EXERCISEDB))?;

        let url = self.body_part_url(body_part)?;
        let host = url.host_str().unwrap_or_default().to_owned();

        let response = self
            .http_client
            .get(url)
            .header(RAPIDAPI_KEY_HEADER, api_key)
            .header(RAPIDAPI_HOST_HEADER, host)
            .send()
            .await
            .map_err(|e| external_error(service_names::EXERCISEDB, &e))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(AppError::external_service(
                service_names::EXERCISEDB,
                format!("HTTP {status}: {body}"),
            ));
        }

        response.json().await.map_err(|e| {
            AppError::external_service(service_names::EXERCISEDB, format!("JSON parse error: {e}"))
        })
    }
}
