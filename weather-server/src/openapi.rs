//! OpenAPI document generated from the handler annotations with utoipa.

use cep_weather_core::{Address, Coordinates, WeatherLookupResult};
use utoipa::OpenApi;

use crate::{
    error::ErrorResponse,
    handler::{self, HealthResponse},
};

#[derive(OpenApi)]
#[openapi(
    info(
        title = "CEP Weather API",
        version = env!("CARGO_PKG_VERSION"),
        description = "Current weather for a Brazilian postal code (CEP), resolved through ViaCEP, Nominatim and Open-Meteo."
    ),
    paths(
        handler::get_weather,
        handler::health_check,
        handler::openapi_json,
    ),
    components(
        schemas(
            WeatherLookupResult,
            Address,
            Coordinates,
            ErrorResponse,
            HealthResponse,
        )
    ),
    tags(
        (name = "weather", description = "Weather lookup by CEP"),
        (name = "meta", description = "Service discovery and health"),
    ),
)]
pub struct ApiDoc;
