//! HTTP request handlers.
//!
//! Handlers stay thin: the lookup itself lives in `cep_weather_core::pipeline`.

use axum::{
    Json,
    extract::{Path, State, rejection::PathRejection},
};
use cep_weather_core::WeatherLookupResult;
use serde::Serialize;
use std::sync::Arc;
use utoipa::{OpenApi, ToSchema};

use crate::{
    app::AppState,
    error::{ApiError, ErrorResponse},
    openapi::ApiDoc,
};

#[derive(Debug, Serialize, ToSchema)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
}

/// GET /weather/{cep}
#[utoipa::path(
    get,
    path = "/weather/{cep}",
    tag = "weather",
    params(
        ("cep" = String, Path, description = "CEP to look up, forwarded verbatim to the address service")
    ),
    responses(
        (status = 200, description = "Address, coordinates and current weather for the CEP", body = WeatherLookupResult),
        (status = 400, description = "An external service failed or returned incomplete data", body = ErrorResponse),
        (status = 404, description = "The CEP or its coordinates could not be found", body = ErrorResponse)
    )
)]
#[tracing::instrument(skip(state))]
pub async fn get_weather(
    State(state): State<Arc<AppState>>,
    cep: Result<Path<String>, PathRejection>,
) -> Result<Json<WeatherLookupResult>, ApiError> {
    let Path(cep) = cep?;
    let result = state.lookup.lookup(&cep).await?;
    Ok(Json(result))
}

#[utoipa::path(
    get,
    path = "/health",
    tag = "meta",
    responses(
        (status = 200, description = "Service is running", body = HealthResponse)
    )
)]
pub async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

/// Machine-readable description of this API, served at the root.
#[utoipa::path(
    get,
    path = "/",
    tag = "meta",
    responses(
        (status = 200, description = "OpenAPI document", body = String, content_type = "application/json")
    )
)]
pub async fn openapi_json() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}
