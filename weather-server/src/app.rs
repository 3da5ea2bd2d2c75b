//! Router construction and the listener loop.

use anyhow::Context;
use axum::{Router, routing::get};
use cep_weather_core::{ServerConfig, WeatherLookup};
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;

use crate::handler;

/// Shared by every request; holds no mutable state.
#[derive(Debug)]
pub struct AppState {
    pub lookup: WeatherLookup,
}

pub fn router(lookup: WeatherLookup) -> Router {
    let state = Arc::new(AppState { lookup });

    Router::new()
        .route("/", get(handler::openapi_json))
        .route("/openapi.json", get(handler::openapi_json))
        .route("/health", get(handler::health_check))
        .route("/weather/{cep}", get(handler::get_weather))
        .with_state(state)
        .layer(TraceLayer::new_for_http())
}

pub async fn serve(config: &ServerConfig, lookup: WeatherLookup) -> anyhow::Result<()> {
    let addr = config.bind_address();
    let listener =
        TcpListener::bind(&addr).await.with_context(|| format!("Failed to bind {addr}"))?;

    tracing::info!("cep-weather listening on {}", listener.local_addr()?);

    axum::serve(listener, router(lookup))
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("HTTP server error")?;

    tracing::info!("server shutdown complete");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!("failed to listen for shutdown signal: {e}");
    }
}
