// ABOUTME: Shared server resources handed to every route as axum state
// ABOUTME: Bundles the database, token manager, configuration and external API clients
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Fitlog Contributors

//! Server resources
//!
//! Created once at startup and shared as `Arc<ServerResources>`. External
//! clients are trait objects so integration tests can plug in mocks.

use std::sync::Arc;

use anyhow::Result;
use chrono::{DateTime, FixedOffset, NaiveDate, Utc};
use tracing::info;

use crate::auth::AuthManager;
use crate::config::{ExternalServicesConfig, ServerConfig};
use crate::database::Database;
use crate::external::{
    ExerciseCatalog, ExerciseDbClient, FatSecretClient, FoodSearchProvider, FoodVision,
    OpenAiClient, PassthroughTranslator, Translator,
};

/// External API clients used by the routes
#[derive(Clone)]
pub struct ExternalClients {
    /// Food database search
    pub food_search: Arc<dyn FoodSearchProvider>,
    /// Text translation
    pub translator: Arc<dyn Translator>,
    /// Food photo recognition
    pub vision: Arc<dyn FoodVision>,
    /// Exercise catalog
    pub exercises: Arc<dyn ExerciseCatalog>,
}

impl ExternalClients {
    /// Build the real clients from configuration
    ///
    /// Translation falls back to passing text through unchanged when no
    /// OpenAI key is configured.
    #[must_use]
    pub fn from_config(config: &ExternalServicesConfig) -> Self {
        let openai = Arc::new(OpenAiClient::new(config.openai.clone()));
        let translator: Arc<dyn Translator> = if openai.is_configured() {
            openai.clone()
        } else {
            info!("OPENAI_API_KEY not set, translations are disabled");
            Arc::new(PassthroughTranslator)
        };

        Self {
            food_search: Arc::new(FatSecretClient::new(config.fatsecret.clone())),
            translator,
            vision: openai,
            exercises: Arc::new(ExerciseDbClient::new(config.exercisedb.clone())),
        }
    }
}

/// Resources shared by all request handlers
pub struct ServerResources {
    /// Database handle
    pub database: Database,
    /// Token issuing and validation
    pub auth_manager: AuthManager,
    /// Loaded configuration
    pub config: Arc<ServerConfig>,
    /// Third-party API clients
    pub clients: ExternalClients,
    local_offset: FixedOffset,
}

impl ServerResources {
    /// Build resources with the real external clients
    ///
    /// # Errors
    ///
    /// Returns an error if the configured UTC offset is invalid
    pub fn new(database: Database, config: ServerConfig) -> Result<Self> {
        let clients = ExternalClients::from_config(&config.external);
        Self::with_clients(database, config, clients)
    }

    /// Build resources with caller-supplied external clients
    ///
    /// # Errors
    ///
    /// Returns an error if the configured UTC offset is invalid
    pub fn with_clients(
        database: Database,
        config: ServerConfig,
        clients: ExternalClients,
    ) -> Result<Self> {
        let local_offset = config.local_offset()?;
        Ok(Self {
            database,
            auth_manager: AuthManager::new(&config.auth),
            config: Arc::new(config),
            clients,
            local_offset,
        })
    }

    /// Calendar day an instant falls on in the configured timezone
    #[must_use]
    pub fn local_date(&self, instant: DateTime<Utc>) -> NaiveDate {
        instant.with_timezone(&self.local_offset).date_naive()
    }

    /// Current calendar day in the configured timezone
    #[must_use]
    pub fn today(&self) -> NaiveDate {
        self.local_date(Utc::now())
    }
}
