// ABOUTME: Shared test utilities and setup functions for integration tests
// ABOUTME: Builds an in-memory server with mock external clients and registers test users
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Fitlog Contributors
#![allow(
    dead_code,
    clippy::missing_errors_doc,
    clippy::missing_panics_doc,
    clippy::must_use_candidate,
    clippy::unwrap_used,
    clippy::expect_used
)]
//! Shared test utilities for `fitlog_server`

use std::env;
use std::sync::{Arc, Mutex, Once};

use async_trait::async_trait;
use axum::http::StatusCode;
use axum::Router;
use fitlog_server::config::{
    AuthConfig, DatabaseUrl, Environment, ExerciseDbConfig, ExternalServicesConfig,
    FatSecretConfig, OpenAiConfig, ServerConfig,
};
use fitlog_server::database::Database;
use fitlog_server::errors::{AppError, AppResult};
use fitlog_server::external::{
    Exercise, ExerciseCatalog, FoodSearchHit, FoodSearchProvider, FoodVision, Translator,
};
use fitlog_server::resources::{ExternalClients, ServerResources};
use fitlog_server::server::build_router;
use serde_json::{json, Value};

use crate::helpers::axum_test::AxumTestRequest;

static INIT_LOGGER: Once = Once::new();

/// Password accepted by the password policy
pub const TEST_PASSWORD: &str = "Secreta1!";

/// Initialize quiet logging for tests (call once per test process)
pub fn init_test_logging() {
    INIT_LOGGER.call_once(|| {
        let log_level = match env::var("TEST_LOG").as_deref() {
            Ok("TRACE") => tracing::Level::TRACE,
            Ok("DEBUG") => tracing::Level::DEBUG,
            Ok("INFO") => tracing::Level::INFO,
            _ => tracing::Level::WARN,
        };

        tracing_subscriber::fmt()
            .with_max_level(log_level)
            .with_test_writer()
            .init();
    });
}

/// Configuration for an in-memory server with no external credentials
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_owned(),
        http_port: 0,
        environment: Environment::Testing,
        database_url: DatabaseUrl::Memory,
        auth: AuthConfig {
            jwt_secret: "integration-test-secret-that-is-long-enough".to_owned(),
            jwt_expiry_hours: 24,
        },
        external: ExternalServicesConfig {
            fatsecret: FatSecretConfig {
                consumer_key: None,
                consumer_secret: None,
                base_url: "http://127.0.0.1:9/rest/server.api".to_owned(),
            },
            openai: OpenAiConfig {
                api_key: None,
                base_url: "http://127.0.0.1:9/v1".to_owned(),
                model: "gpt-4o-mini".to_owned(),
            },
            exercisedb: ExerciseDbConfig {
                api_key: None,
                base_url: "http://127.0.0.1:9".to_owned(),
            },
        },
        user_language: "es".to_owned(),
        local_utc_offset_hours: 0,
        default_calorie_goal: 2000.0,
        cors_allowed_origins: vec!["*".to_owned()],
    }
}

/// Food search returning a fixed list and recording the queries it saw
#[derive(Default)]
pub struct MockFoodSearch {
    pub hits: Vec<FoodSearchHit>,
    pub queries: Mutex<Vec<String>>,
}

#[async_trait]
impl FoodSearchProvider for MockFoodSearch {
    async fn search_foods(&self, query: &str, max_results: u32) -> AppResult<Vec<FoodSearchHit>> {
        self.queries.lock().unwrap().push(query.to_owned());
        Ok(self.hits.iter().take(max_results as usize).cloned().collect())
    }
}

/// Translator that tags text with the target language
pub struct TaggingTranslator;

#[async_trait]
impl Translator for TaggingTranslator {
    async fn translate(&self, text: &str, target_language: &str) -> AppResult<String> {
        Ok(format!("[{target_language}] {text}"))
    }
}

/// Vision model that always gives the same reply
pub struct MockVision {
    pub reply: String,
}

#[async_trait]
impl FoodVision for MockVision {
    async fn describe_food_image(&self, _image: &str, _mime_type: &str) -> AppResult<String> {
        Ok(self.reply.clone())
    }
}

/// Exercise catalog returning a fixed list, or failing when empty
#[derive(Default)]
pub struct MockExercises {
    pub exercises: Vec<Exercise>,
}

#[async_trait]
impl ExerciseCatalog for MockExercises {
    async fn exercises_by_body_part(&self, _body_part: &str) -> AppResult<Vec<Exercise>> {
        if self.exercises.is_empty() {
            return Err(AppError::external_unavailable("ExerciseDB"));
        }
        Ok(self.exercises.clone())
    }
}

/// A search hit as the food database returns it
pub fn food_hit(id: &str, name: &str, description: &str) -> FoodSearchHit {
    FoodSearchHit {
        food_id: id.to_owned(),
        food_name: name.to_owned(),
        food_description: description.to_owned(),
        food_type: "Generic".to_owned(),
        food_url: String::new(),
        brand_name: None,
    }
}

/// Clients used when a test does not care about external services
pub fn default_clients() -> ExternalClients {
    ExternalClients {
        food_search: Arc::new(MockFoodSearch {
            hits: vec![food_hit(
                "33691",
                "Apple",
                "Per 1 medium - Calories: 95kcal | Fat: 0.31g | Carbs: 25.13g | Protein: 0.47g",
            )],
            ..MockFoodSearch::default()
        }),
        translator: Arc::new(TaggingTranslator),
        vision: Arc::new(MockVision {
            reply: "Food name: Grilled chicken.\nPer 100g - Calories: 165kcal | Fat: 3.57g | Carbs: 0.00g | Protein: 31.02g".to_owned(),
        }),
        exercises: Arc::new(MockExercises::default()),
    }
}

/// In-memory server for one test
pub struct TestApp {
    pub resources: Arc<ServerResources>,
}

impl TestApp {
    /// Server with the default mock clients
    pub async fn new() -> Self {
        Self::with_clients(default_clients()).await
    }

    /// Server with caller-supplied clients
    pub async fn with_clients(clients: ExternalClients) -> Self {
        init_test_logging();
        let config = test_config();
        let database = Database::new(&config.database_url)
            .await
            .expect("in-memory database");
        let resources = ServerResources::with_clients(database, config, clients)
            .expect("test resources");
        Self {
            resources: Arc::new(resources),
        }
    }

    /// Fresh router over the shared resources
    pub fn router(&self) -> Router {
        build_router(&self.resources)
    }

    /// Register a user and return a bearer token for them
    pub async fn register_and_login(&self, username: &str) -> String {
        AxumTestRequest::post("/api/auth/register")
            .json(&json!({
                "username": username,
                "email": format!("{username}@example.com"),
                "password": TEST_PASSWORD,
            }))
            .send(self.router())
            .await
            .assert_status(StatusCode::CREATED);

        let body: Value = AxumTestRequest::post("/api/auth/login")
            .json(&json!({ "username": username, "password": TEST_PASSWORD }))
            .send(self.router())
            .await
            .assert_status(StatusCode::OK)
            .json();

        body["token"].as_str().expect("token in login response").to_owned()
    }
}
