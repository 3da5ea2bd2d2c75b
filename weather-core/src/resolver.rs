//! Capability traits for the three external services, plus their HTTP
//! implementations.

use async_trait::async_trait;
use reqwest::{RequestBuilder, StatusCode};
use serde::de::DeserializeOwned;
use std::fmt::Debug;

use crate::{
    error::{LookupError, UpstreamError},
    model::{Address, Coordinates, CurrentWeather},
};

pub mod nominatim;
pub mod open_meteo;
pub mod viacep;

pub use nominatim::NominatimResolver;
pub use open_meteo::OpenMeteoResolver;
pub use viacep::ViaCepResolver;

/// Maps a CEP to its city and state.
#[async_trait]
pub trait AddressResolver: Send + Sync + Debug {
    async fn resolve_address(&self, cep: &str) -> Result<Address, LookupError>;
}

/// Maps an address to coordinates.
#[async_trait]
pub trait GeocodeResolver: Send + Sync + Debug {
    async fn resolve_coordinates(&self, address: &Address) -> Result<Coordinates, LookupError>;
}

/// Fetches current conditions at a pair of coordinates.
#[async_trait]
pub trait WeatherResolver: Send + Sync + Debug {
    async fn resolve_weather(
        &self,
        coordinates: &Coordinates,
    ) -> Result<CurrentWeather, LookupError>;
}

/// Sends `request` once and decodes a `200 OK` JSON body.
///
/// Any other status is an error, including other 2xx codes.
pub(crate) async fn fetch_json<T: DeserializeOwned>(
    request: RequestBuilder,
) -> Result<T, UpstreamError> {
    let res = request.send().await?;

    let status = res.status();
    let body = res.text().await?;

    if status != StatusCode::OK {
        return Err(UpstreamError::Status { status, body: truncate_body(&body) });
    }

    Ok(serde_json::from_str(&body)?)
}

fn truncate_body(body: &str) -> String {
    const MAX: usize = 200;
    match body.char_indices().nth(MAX) {
        Some((cut, _)) => format!("{}...", &body[..cut]),
        None => body.to_string(),
    }
}
