// SPDX-License-Identifier: MIT

//! Fitbit Sleep Export server
//!
//! Runs the OAuth flow against Fitbit and exports the authorized user's
//! complete sleep history as a CSV file.

use fitbit_sleep_export::{
    config::Config,
    services::{session, FitbitClient, SleepService},
    AppState,
};
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    init_logging();

    // Load configuration from environment
    let config = Config::from_env().expect("Failed to load configuration");
    tracing::info!(port = config.port, "Starting Fitbit sleep export service");

    // Single in-memory session: verifier + token pair live for the process
    let session = session::new_shared();

    let client = FitbitClient::new(
        config.fitbit_client_id.clone(),
        config.fitbit_client_secret.clone(),
        config.redirect_uri.clone(),
    );
    let sleep_service = SleepService::new(client, session);

    // Build shared state
    let state = Arc::new(AppState {
        config: config.clone(),
        sleep_service,
    });

    // Build router
    let app = fitbit_sleep_export::routes::create_router(state);

    // Start server
    let addr = format!("0.0.0.0:{}", config.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!(address = %addr, "Server listening");

    axum::serve(listener, app).await?;
    Ok(())
}

/// Initialize structured logging.
fn init_logging() {
    let format = tracing_subscriber::fmt::layer().with_target(false);

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("fitbit_sleep_export=debug".parse().unwrap())
                .add_directive("info".parse().unwrap()),
        )
        .with(format)
        .init();
}
