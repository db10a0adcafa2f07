// ABOUTME: Main library entry point for the Fitlog fitness backend
// ABOUTME: Exposes the REST server, its database layer and external API clients
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Fitlog Contributors

#![recursion_limit = "256"]
#![deny(unsafe_code)]

//! # Fitlog Server
//!
//! A REST backend for a personal fitness log: food diary with serving
//! conversion, water intake, one-rep-max tracking, weekly routines, an
//! exercise catalog and a calorie dashboard.
//!
//! ## Architecture
//!
//! - **`fitlog-core`**: shared models, error types and constants
//! - **`fitlog-intelligence`**: nutrition parsing, serving conversion,
//!   strength estimates and dashboard arithmetic (no I/O)
//! - **this crate**: configuration, `SQLite` persistence, JWT auth, the
//!   `FatSecret`/`OpenAI`/`ExerciseDB` clients and the axum routes
//!
//! ## Example Usage
//!
//! ```rust,no_run
//! use std::sync::Arc;
//!
//! use fitlog_server::config::ServerConfig;
//! use fitlog_server::database::Database;
//! use fitlog_server::resources::ServerResources;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = ServerConfig::from_env()?;
//!     let database = Database::new(&config.database_url).await?;
//!     let resources = Arc::new(ServerResources::new(database, config)?);
//!     fitlog_server::server::run(resources).await
//! }
//! ```

/// JWT issuing and password hashing
pub mod auth;

/// Environment-based configuration
pub mod config;

/// Application constants
pub mod constants;

/// `SQLite` persistence
pub mod database;

/// Error types re-exported from `fitlog-core`
pub mod errors;

/// Third-party API clients
pub mod external;

/// Structured logging setup
pub mod logging;

/// HTTP middleware
pub mod middleware;

/// Shared state handed to route handlers
pub mod resources;

/// HTTP route handlers
pub mod routes;

/// Router assembly and serving
pub mod server;
