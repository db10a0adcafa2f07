// ABOUTME: HTTP server assembly and lifecycle
// ABOUTME: Mounts every route group under /api, applies middleware layers and serves until shutdown
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Fitlog Contributors

//! HTTP server
//!
//! [`build_router`] is separate from [`run`] so integration tests can drive
//! the full router in-process.

use std::sync::Arc;

use anyhow::Result;
use axum::Router;
use tokio::net::TcpListener;
use tokio::signal;
use tower_http::request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer};
use tracing::{info, warn};

use crate::middleware::{http_trace_layer, setup_cors};
use crate::resources::ServerResources;
use crate::routes::{
    AuthRoutes, DashboardRoutes, ExerciseRoutes, FoodRoutes, HealthRoutes, OneRepMaxRoutes,
    RoutineRoutes, WaterRoutes,
};

/// Build the complete application router
///
/// Domain routes live under `/api`; `/health` and `/ready` stay at the root.
pub fn build_router(resources: &Arc<ServerResources>) -> Router {
    let api = Router::new()
        .merge(AuthRoutes::routes(Arc::clone(resources)))
        .merge(FoodRoutes::routes(Arc::clone(resources)))
        .merge(WaterRoutes::routes(Arc::clone(resources)))
        .merge(OneRepMaxRoutes::routes(Arc::clone(resources)))
        .merge(RoutineRoutes::routes(Arc::clone(resources)))
        .merge(ExerciseRoutes::routes(Arc::clone(resources)))
        .merge(DashboardRoutes::routes(Arc::clone(resources)));

    // Layers run outermost-last: the request ID is set before the span opens
    Router::new()
        .nest("/api", api)
        .merge(HealthRoutes::routes(Arc::clone(resources)))
        .layer(setup_cors(&resources.config))
        .layer(PropagateRequestIdLayer::x_request_id())
        .layer(http_trace_layer())
        .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
}

/// Bind the configured address and serve until Ctrl-C
///
/// # Errors
///
/// Returns an error if the address cannot be bound or the server fails
pub async fn run(resources: Arc<ServerResources>) -> Result<()> {
    let host = resources.config.host.clone();
    let port = resources.config.http_port;
    let router = build_router(&resources);

    let listener = TcpListener::bind((host.as_str(), port)).await?;
    info!(
        address = %listener.local_addr()?,
        environment = %resources.config.environment,
        "Fitlog server listening"
    );

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Fitlog server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = signal::ctrl_c().await {
        warn!(error = %e, "Failed to listen for shutdown signal");
        return;
    }
    info!("Shutdown signal received, draining connections");
}
