use async_trait::async_trait;
use reqwest::{Client, header::USER_AGENT};
use serde::Deserialize;

use crate::{
    error::LookupError,
    model::{Address, Coordinates},
};

use super::{GeocodeResolver, fetch_json};

#[derive(Debug, Clone)]
pub struct NominatimResolver {
    search_url: String,
    user_agent: String,
    http: Client,
}

impl NominatimResolver {
    pub fn new(http: Client, search_url: impl Into<String>, user_agent: impl Into<String>) -> Self {
        Self { search_url: search_url.into(), user_agent: user_agent.into(), http }
    }
}

#[derive(Debug, Deserialize)]
struct NominatimPlace {
    lat: Option<String>,
    lon: Option<String>,
}

#[async_trait]
impl GeocodeResolver for NominatimResolver {
    async fn resolve_coordinates(&self, address: &Address) -> Result<Coordinates, LookupError> {
        let query = address.geocoding_query();
        tracing::debug!(%query, "resolving coordinates");

        let request = self
            .http
            .get(&self.search_url)
            .query(&[("q", query.as_str()), ("format", "json"), ("limit", "1")])
            .header(USER_AGENT, &self.user_agent);

        let places: Vec<NominatimPlace> =
            fetch_json(request).await.map_err(LookupError::GeocodingService)?;

        coordinates_from_places(places)
    }
}

fn coordinates_from_places(places: Vec<NominatimPlace>) -> Result<Coordinates, LookupError> {
    let place = places.into_iter().next().ok_or(LookupError::CoordinatesNotFound)?;

    match (place.lat.filter(|s| !s.is_empty()), place.lon.filter(|s| !s.is_empty())) {
        (Some(latitude), Some(longitude)) => Ok(Coordinates { latitude, longitude }),
        _ => Err(LookupError::CoordinatesUnavailable),
    }
}
