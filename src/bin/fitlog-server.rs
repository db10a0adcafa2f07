// ABOUTME: Fitlog server binary
// ABOUTME: Loads configuration, opens the database and serves the REST API
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Fitlog Contributors

#![recursion_limit = "256"]

//! # Fitlog Server Binary
//!
//! Configuration comes from the environment; the flags below override the
//! matching variables.

use std::sync::Arc;

use anyhow::Result;
use clap::Parser;
use fitlog_server::config::{DatabaseUrl, ServerConfig};
use fitlog_server::database::Database;
use fitlog_server::logging;
use fitlog_server::resources::ServerResources;
use fitlog_server::server;
use tracing::{error, info};

#[derive(Parser)]
#[command(name = "fitlog-server")]
#[command(about = "Fitlog - food, water and strength training log API")]
pub struct Args {
    /// Override HTTP port (`HTTP_PORT`)
    #[arg(long)]
    http_port: Option<u16>,

    /// Override database location (`DATABASE_URL`)
    #[arg(long)]
    database_url: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    logging::init_from_env()?;

    let mut config = ServerConfig::from_env()?;
    if let Some(http_port) = args.http_port {
        config.http_port = http_port;
    }
    if let Some(url) = args.database_url.as_deref() {
        config.database_url = DatabaseUrl::parse_url(url);
    }

    info!("Starting Fitlog server");

    let database = Database::new(&config.database_url).await?;
    let resources = Arc::new(ServerResources::new(database, config)?);

    if let Err(e) = server::run(resources).await {
        error!("Server error: {e}");
        return Err(e);
    }

    Ok(())
}
