// ABOUTME: Configuration management module for the Fitlog server
// ABOUTME: Loads server, database, auth and external-service settings from the environment
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Fitlog Contributors

//! Configuration module for the Fitlog server
//!
//! All settings come from environment variables; there is no configuration
//! file. See [`environment::ServerConfig::from_env`] for the full list.

/// Environment and server configuration
pub mod environment;

pub use environment::{
    AuthConfig, DatabaseUrl, Environment, ExerciseDbConfig, ExternalServicesConfig,
    FatSecretConfig, OpenAiConfig, ServerConfig,
};
