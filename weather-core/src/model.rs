use serde::{Deserialize, Serialize};
use serde_json::Value;
use utoipa::ToSchema;

/// City and state resolved from a CEP.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Address {
    /// City name as reported by the address service.
    pub city: String,
    /// State abbreviation, e.g. "SP".
    pub state: String,
}

impl Address {
    /// Free-text query understood by the geocoder.
    pub fn geocoding_query(&self) -> String {
        format!("{}, {}, Brazil", self.city, self.state)
    }
}

/// Decimal coordinates exactly as the geocoder returned them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Coordinates {
    pub latitude: String,
    pub longitude: String,
}

/// Opaque current-conditions object, passed through untouched.
pub type CurrentWeather = Value;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct WeatherLookupResult {
    /// The CEP as supplied by the caller.
    pub cep: String,
    pub address: Address,
    pub coordinates: Coordinates,
    /// Current conditions returned by the weather service.
    #[schema(value_type = Object)]
    pub current_weather: CurrentWeather,
}
