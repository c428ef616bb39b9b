// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! LinkedIn-Connect API Server
//!
//! Signs browser sessions in with LinkedIn and exposes the user's profile,
//! connections, network updates and status posting as a JSON API.

use linkedin_connect::{config::Config, AppState};
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize structured JSON logging
    init_logging();

    // Load configuration from environment
    let config = Config::from_env()?;
    tracing::info!(port = config.port, "Starting LinkedIn-Connect API");

    if !config.credentials().is_complete() {
        tracing::error!("LINKEDIN_APP_KEY and LINKEDIN_APP_SECRET must not be empty");
        return Err(linkedin_connect::error::ProviderError::Configuration.into());
    }

    let endpoints = config.endpoints();
    tracing::info!(
        api = %endpoints.api_base_url,
        oauth = %endpoints.oauth_base_url,
        "LinkedIn endpoints configured"
    );

    // Build shared state
    let port = config.port;
    let state = Arc::new(AppState::new(config));

    // Build router
    let app = linkedin_connect::routes::create_router(state);

    // Start server
    let addr = format!("0.0.0.0:{}", port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!(address = %addr, "Server listening");

    axum::serve(listener, app).await?;
    Ok(())
}

/// Initialize structured JSON logging.
fn init_logging() {
    let format = tracing_subscriber::fmt::layer()
        .json()
        .with_target(false)
        .with_current_span(true)
        .flatten_event(true);

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("linkedin_connect=debug,info"));

    tracing_subscriber::registry()
        .with(filter)
        .with(format)
        .init();
}
