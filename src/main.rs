// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! PaperHearts web server
//!
//! Serves the PaperHearts site pages and handles social login through the
//! configured identity providers.

use paperhearts::{
    config::Config, models::SiteMetadata, services::IdentityService, time_utils::SystemClock,
    AppState,
};
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize structured JSON logging
    init_logging();

    // Load configuration from environment
    let config = Config::from_env().expect("Failed to load configuration");
    tracing::info!(port = config.port, site_url = %config.site_url, "Starting PaperHearts");

    let clock = Arc::new(SystemClock);
    let identity =
        IdentityService::new(&config, clock.clone()).expect("Failed to initialize identity service");
    tracing::info!(
        providers = ?identity.providers().iter().map(|p| p.id.as_str()).collect::<Vec<_>>(),
        "Identity providers registered"
    );

    // Build shared state
    let state = Arc::new(AppState {
        metadata: SiteMetadata::paperhearts(&config.site_url),
        config: config.clone(),
        identity,
        clock,
    });

    // Build router
    let app = paperhearts::routes::create_router(state);

    // Start server
    let addr = format!("0.0.0.0:{}", config.port);
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

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("paperhearts=debug".parse().unwrap())
                .add_directive("info".parse().unwrap()),
        )
        .with(format)
        .init();
}
