// SPDX-FileCopyrightText: 2026 Fieldline Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Gateway HTTP server built on axum.
//!
//! Sets up routes, middleware, and shared state.

use std::sync::Arc;
use std::time::Instant;

use axum::{
    middleware as axum_middleware,
    routing::{get, post},
    Router,
};
use tower_http::trace::TraceLayer;

use fieldline_core::{FieldlineError, Store};

use crate::auth::{auth_middleware, AuthConfig};
use crate::handlers;

/// Shared state for axum request handlers.
#[derive(Clone)]
pub struct GatewayState {
    /// Relational store the reconcile pipeline runs against.
    pub store: Arc<dyn Store>,
    /// Process start time for uptime reporting.
    pub start_time: Instant,
}

/// Gateway server configuration (mirrors GatewayConfig from fieldline-config).
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Host address to bind.
    pub host: String,
    /// Port to bind.
    pub port: u16,
    /// Shared secret for the webhook route (None = check disabled).
    pub webhook_token: Option<String>,
}

/// Build the gateway router.
///
/// Exposed separately from [`start_server`] so tests can drive the router
/// without binding a socket.
pub fn build_router(state: GatewayState, webhook_token: Option<String>) -> Router {
    let auth = AuthConfig { webhook_token };

    let webhook_routes = Router::new()
        .route("/webhooks/sms", post(handlers::post_sms_webhook))
        .route_layer(axum_middleware::from_fn_with_state(auth, auth_middleware))
        .with_state(state.clone());

    let public_routes = Router::new()
        .route("/health", get(handlers::get_health))
        .with_state(state);

    Router::new()
        .merge(webhook_routes)
        .merge(public_routes)
        .layer(TraceLayer::new_for_http())
}

/// Start the gateway HTTP server and serve until the task is aborted.
pub async fn start_server(config: &ServerConfig, state: GatewayState) -> Result<(), FieldlineError> {
    let app = build_router(state, config.webhook_token.clone());

    let addr = format!("{}:{}", config.host, config.port);
    let listener =
        tokio::net::TcpListener::bind(&addr)
            .await
            .map_err(|e| FieldlineError::Internal(format!("failed to bind gateway to {addr}: {e}")))?;

    tracing::info!("gateway listening on {addr}");

    axum::serve(listener, app)
        .await
        .map_err(|e| FieldlineError::Internal(format!("gateway server error: {e}")))?;

    Ok(())
}
