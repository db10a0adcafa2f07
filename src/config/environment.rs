// ABOUTME: Environment configuration management for deployment-specific settings
// ABOUTME: Parses ports, database URL, JWT settings and third-party API credentials from env vars
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Fitlog Contributors

//! Environment-based configuration

use std::env;
use std::error::Error as StdError;
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

use anyhow::{anyhow, Context, Result};
use chrono::FixedOffset;
use rand::distributions::Alphanumeric;
use rand::Rng;
use tracing::{info, warn};

use crate::constants::defaults;

const DEFAULT_HTTP_PORT: u16 = 8081;
const DEFAULT_HOST: &str = "0.0.0.0";
const DEFAULT_DATABASE_URL: &str = "sqlite:./data/fitlog.db";
const DEFAULT_FATSECRET_BASE_URL: &str = "https://platform.fatsecret.com/rest/server.api";
const DEFAULT_OPENAI_BASE_URL: &str = "https://api.openai.com/v1";
const DEFAULT_OPENAI_MODEL: &str = "gpt-4o-mini";
const DEFAULT_EXERCISEDB_BASE_URL: &str = "https://exercisedb.p.rapidapi.com";
const GENERATED_JWT_SECRET_LENGTH: usize = 64;

/// Deployment environment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Environment {
    /// Local development
    #[default]
    Development,
    /// Production deployment
    Production,
    /// Automated tests
    Testing,
}

impl Environment {
    /// Parse from string with fallback to development
    #[must_use]
    pub fn from_str_or_default(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "production" | "prod" => Self::Production,
            "testing" | "test" => Self::Testing,
            _ => Self::Development,
        }
    }

    /// Check if this is a production environment
    #[must_use]
    pub const fn is_production(self) -> bool {
        matches!(self, Self::Production)
    }
}

impl fmt::Display for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Development => write!(f, "development"),
            Self::Production => write!(f, "production"),
            Self::Testing => write!(f, "testing"),
        }
    }
}

/// Type-safe database location
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DatabaseUrl {
    /// `SQLite` database file
    SQLite {
        /// Path of the database file
        path: PathBuf,
    },
    /// In-memory `SQLite`, gone when the pool closes
    Memory,
}

impl DatabaseUrl {
    /// Parse a `sqlite:` URL; a bare value is taken as a file path
    #[must_use]
    pub fn parse_url(s: &str) -> Self {
        let path = s.strip_prefix("sqlite:").unwrap_or(s);
        let path = path.strip_prefix("//").unwrap_or(path);
        if path == ":memory:" {
            Self::Memory
        } else {
            Self::SQLite {
                path: PathBuf::from(path),
            }
        }
    }

    /// Convert to a connection string understood by `sqlx`
    #[must_use]
    pub fn to_connection_string(&self) -> String {
        match self {
            Self::SQLite { path } => format!("sqlite:{}", path.display()),
            Self::Memory => "sqlite::memory:".to_owned(),
        }
    }

    /// Check if this is an in-memory database
    #[must_use]
    pub const fn is_memory(&self) -> bool {
        matches!(self, Self::Memory)
    }
}

impl Default for DatabaseUrl {
    fn default() -> Self {
        Self::parse_url(DEFAULT_DATABASE_URL)
    }
}

impl fmt::Display for DatabaseUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_connection_string())
    }
}

/// Token signing settings
#[derive(Clone)]
pub struct AuthConfig {
    /// HS256 signing secret
    pub jwt_secret: String,
    /// Token lifetime in hours
    pub jwt_expiry_hours: i64,
}

impl fmt::Debug for AuthConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AuthConfig")
            .field("jwt_secret", &"[REDACTED]")
            .field("jwt_expiry_hours", &self.jwt_expiry_hours)
            .finish()
    }
}

/// `FatSecret` platform API credentials
#[derive(Debug, Clone)]
pub struct FatSecretConfig {
    /// OAuth 1.0 consumer key
    pub consumer_key: Option<String>,
    /// OAuth 1.0 consumer secret
    pub consumer_secret: Option<String>,
    /// REST endpoint
    pub base_url: String,
}

/// `OpenAI` chat-completions settings, used for translation and food photos
#[derive(Debug, Clone)]
pub struct OpenAiConfig {
    /// API key; translation falls back to passthrough without it
    pub api_key: Option<String>,
    /// API base URL (without `/chat/completions`)
    pub base_url: String,
    /// Model name
    pub model: String,
}

/// `ExerciseDB` on `RapidAPI`
#[derive(Debug, Clone)]
pub struct ExerciseDbConfig {
    /// `RapidAPI` key
    pub api_key: Option<String>,
    /// API base URL
    pub base_url: String,
}

/// Third-party service settings
#[derive(Debug, Clone)]
pub struct ExternalServicesConfig {
    /// Food search
    pub fatsecret: FatSecretConfig,
    /// Translation and vision
    pub openai: OpenAiConfig,
    /// Exercise catalog
    pub exercisedb: ExerciseDbConfig,
}

/// Complete server configuration
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Interface the HTTP server binds to
    pub host: String,
    /// HTTP API port
    pub http_port: u16,
    /// Deployment environment
    pub environment: Environment,
    /// Database location
    pub database_url: DatabaseUrl,
    /// Token settings
    pub auth: AuthConfig,
    /// Third-party APIs
    pub external: ExternalServicesConfig,
    /// Language food and exercise names are translated into
    pub user_language: String,
    /// Offset from UTC, in hours, that defines a user's calendar day
    pub local_utc_offset_hours: i32,
    /// Calorie goal for users who never stored one
    pub default_calorie_goal: f64,
    /// Allowed CORS origins; `*` allows any
    pub cors_allowed_origins: Vec<String>,
}

impl ServerConfig {
    /// Load configuration from environment variables
    ///
    /// # Errors
    ///
    /// Returns an error if a numeric variable does not parse, the UTC offset is
    /// out of range, or `JWT_SECRET` is missing in production.
    pub fn from_env() -> Result<Self> {
        info!("Loading configuration from environment variables");

        let environment = Environment::from_str_or_default(&env_var_or("ENVIRONMENT", ""));

        let config = Self {
            host: env_var_or("HOST", DEFAULT_HOST),
            http_port: parse_env("HTTP_PORT", DEFAULT_HTTP_PORT)?,
            environment,
            database_url: DatabaseUrl::parse_url(&env_var_or("DATABASE_URL", DEFAULT_DATABASE_URL)),
            auth: AuthConfig {
                jwt_secret: jwt_secret_from_env(environment)?,
                jwt_expiry_hours: parse_env("JWT_EXPIRY_HOURS", defaults::JWT_EXPIRY_HOURS)?,
            },
            external: ExternalServicesConfig {
                fatsecret: FatSecretConfig {
                    consumer_key: optional_env("FATSECRET_CONSUMER_KEY"),
                    consumer_secret: optional_env("FATSECRET_CONSUMER_SECRET"),
                    base_url: env_var_or("FATSECRET_BASE_URL", DEFAULT_FATSECRET_BASE_URL),
                },
                openai: OpenAiConfig {
                    api_key: optional_env("OPENAI_API_KEY"),
                    base_url: env_var_or("OPENAI_BASE_URL", DEFAULT_OPENAI_BASE_URL),
                    model: env_var_or("OPENAI_MODEL", DEFAULT_OPENAI_MODEL),
                },
                exercisedb: ExerciseDbConfig {
                    api_key: optional_env("RAPIDAPI_KEY"),
                    base_url: env_var_or("EXERCISEDB_BASE_URL", DEFAULT_EXERCISEDB_BASE_URL),
                },
            },
            user_language: env_var_or("USER_LANGUAGE", defaults::USER_LANGUAGE),
            local_utc_offset_hours: parse_env(
                "LOCAL_UTC_OFFSET_HOURS",
                defaults::LOCAL_UTC_OFFSET_HOURS,
            )?,
            default_calorie_goal: parse_env("DEFAULT_CALORIE_GOAL", defaults::CALORIE_GOAL)?,
            cors_allowed_origins: parse_origins(&env_var_or("CORS_ALLOWED_ORIGINS", "*")),
        };

        config.validate()?;
        config.log_summary();
        Ok(config)
    }

    /// Check cross-field constraints
    ///
    /// # Errors
    ///
    /// Returns an error for an out-of-range UTC offset, a non-positive default
    /// calorie goal, or a non-positive token lifetime
    pub fn validate(&self) -> Result<()> {
        self.local_offset()?;
        if !(self.default_calorie_goal.is_finite() && self.default_calorie_goal > 0.0) {
            return Err(anyhow!(
                "DEFAULT_CALORIE_GOAL must be positive, got {}",
                self.default_calorie_goal
            ));
        }
        if self.auth.jwt_expiry_hours <= 0 {
            return Err(anyhow!(
                "JWT_EXPIRY_HOURS must be positive, got {}",
                self.auth.jwt_expiry_hours
            ));
        }
        Ok(())
    }

    /// Timezone that defines a user's calendar day
    ///
    /// # Errors
    ///
    /// Returns an error if the offset is beyond +/-23 hours
    pub fn local_offset(&self) -> Result<FixedOffset> {
        FixedOffset::east_opt(self.local_utc_offset_hours * 3600).ok_or_else(|| {
            anyhow!(
                "LOCAL_UTC_OFFSET_HOURS out of range: {}",
                self.local_utc_offset_hours
            )
        })
    }

    fn log_summary(&self) {
        info!(
            host = %self.host,
            http_port = self.http_port,
            environment = %self.environment,
            database = %self.database_url,
            fatsecret_configured = self.external.fatsecret.consumer_key.is_some(),
            openai_configured = self.external.openai.api_key.is_some(),
            exercisedb_configured = self.external.exercisedb.api_key.is_some(),
            user_language = %self.user_language,
            utc_offset_hours = self.local_utc_offset_hours,
            "Configuration loaded"
        );
    }
}

fn jwt_secret_from_env(environment: Environment) -> Result<String> {
    if let Some(secret) = optional_env("JWT_SECRET") {
        return Ok(secret);
    }
    if environment.is_production() {
        return Err(anyhow!("JWT_SECRET must be set in production"));
    }

    warn!("JWT_SECRET not set, generating an ephemeral secret; tokens will not survive a restart");
    Ok(rand::thread_rng()
        .sample_iter(&Alphanumeric)
        .take(GENERATED_JWT_SECRET_LENGTH)
        .map(char::from)
        .collect())
}

/// Get environment variable or default value
fn env_var_or(key: &str, default: &str) -> String {
    env::var(key).unwrap_or_else(|_| default.to_owned())
}

/// Non-empty environment variable
fn optional_env(key: &str) -> Option<String> {
    env::var(key).ok().filter(|value| !value.trim().is_empty())
}

fn parse_env<T>(key: &str, default: T) -> Result<T>
where
    T: FromStr,
    T::Err: StdError + Send + Sync + 'static,
{
    optional_env(key).map_or(Ok(default), |value| {
        value
            .trim()
            .parse()
            .with_context(|| format!("Invalid {key} value: {value}"))
    })
}

/// Parse comma-separated CORS origins
fn parse_origins(origins: &str) -> Vec<String> {
    if origins.trim() == "*" {
        return vec!["*".to_owned()];
    }
    origins
        .split(',')
        .map(|origin| origin.trim().to_owned())
        .filter(|origin| !origin.is_empty())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_database_url_parsing() {
        assert_eq!(DatabaseUrl::parse_url("sqlite::memory:"), DatabaseUrl::Memory);
        assert_eq!(
            DatabaseUrl::parse_url("sqlite:./data/fitlog.db"),
            DatabaseUrl::SQLite {
                path: PathBuf::from("./data/fitlog.db")
            }
        );
        assert_eq!(
            DatabaseUrl::parse_url("/tmp/fitlog.db").to_connection_string(),
            "sqlite:/tmp/fitlog.db"
        );
    }

    #[test]
    fn test_environment_fallback() {
        assert_eq!(Environment::from_str_or_default("PROD"), Environment::Production);
        assert_eq!(Environment::from_str_or_default("test"), Environment::Testing);
        assert_eq!(Environment::from_str_or_default("staging"), Environment::Development);
    }

    #[test]
    fn test_parse_origins() {
        assert_eq!(parse_origins("*"), vec!["*"]);
        assert_eq!(
            parse_origins("http://localhost:3000, https://fitlog.app,"),
            vec!["http://localhost:3000", "https://fitlog.app"]
        );
    }

    #[test]
    fn test_auth_config_debug_redacts_secret() {
        let auth = AuthConfig {
            jwt_secret: "super-secret".to_owned(),
            jwt_expiry_hours: 24,
        };
        assert!(!format!("{auth:?}").contains("super-secret"));
    }
}
