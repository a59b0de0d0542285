// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Surfspot API Server
//!
//! Serves surf spots from Firestore merged with wave, wind and tide
//! forecasts from a marine weather API.

use surfspot_api::{
    config::{Config, StoreBackend},
    db::{FirestoreDb, MemoryStore, SpotStore},
    services::{ForecastClient, SpotForecaster},
    AppState,
};
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize structured JSON logging for GCP
    init_logging();

    let config = Config::from_env()?;
    tracing::info!(port = config.port, "Starting Surfspot API");

    let store: Arc<dyn SpotStore> = match config.store_backend {
        StoreBackend::Firestore => Arc::new(FirestoreDb::new(&config.gcp_project_id).await?),
        StoreBackend::Memory => {
            tracing::warn!("Using in-memory store; data is lost on restart");
            Arc::new(MemoryStore::new())
        }
    };

    let forecast_client = ForecastClient::new(&config)?;
    let forecaster = SpotForecaster::new(forecast_client, config.max_concurrent_spots);
    tracing::info!(
        base_url = %config.forecast_api_base_url,
        timeout_secs = config.forecast_timeout_secs,
        max_concurrent_spots = config.max_concurrent_spots,
        "Forecast client initialized"
    );

    let state = Arc::new(AppState {
        config: config.clone(),
        store,
        forecaster,
    });

    let app = surfspot_api::routes::create_router(state);

    let addr = format!("0.0.0.0:{}", config.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!(address = %addr, "Server listening");

    axum::serve(listener, app).await?;
    Ok(())
}

/// Initialize structured JSON logging (GCP-compliant).
fn init_logging() {
    let format = tracing_subscriber::fmt::layer()
        .json()
        .with_target(false)
        .with_current_span(true)
        .flatten_event(true);

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("surfspot_api=debug,info"));

    tracing_subscriber::registry()
        .with(filter)
        .with(format)
        .init();
}
