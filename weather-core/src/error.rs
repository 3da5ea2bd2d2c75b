use reqwest::StatusCode;
use thiserror::Error;

/// Why a call to one of the external services failed.
#[derive(Debug, Error)]
pub enum UpstreamError {
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("unexpected status {status}: {body}")]
    Status { status: StatusCode, body: String },

    #[error("failed to decode JSON payload: {0}")]
    Decode(#[from] serde_json::Error),
}

/// Every way a CEP lookup can end without a result.
///
/// The display text is the message returned to callers; the upstream cause,
/// when there is one, is only reachable through [`std::error::Error::source`].
#[derive(Debug, Error)]
pub enum LookupError {
    #[error("Failed to fetch address data for the CEP.")]
    AddressService(#[source] UpstreamError),

    #[error("CEP not found.")]
    PostalCodeNotFound,

    #[error("Incomplete address data.")]
    IncompleteAddress,

    #[error("Failed to fetch coordinates for the address.")]
    GeocodingService(#[source] UpstreamError),

    #[error("Coordinates not found for the given CEP.")]
    CoordinatesNotFound,

    #[error("Coordinates unavailable.")]
    CoordinatesUnavailable,

    #[error("Failed to fetch weather data.")]
    WeatherService(#[source] UpstreamError),

    #[error("Weather data unavailable.")]
    WeatherDataUnavailable,
}

impl LookupError {
    /// Stable identifier of the variant, used in logs.
    pub fn kind(&self) -> &'static str {
        match self {
            LookupError::AddressService(_) => "address_service_error",
            LookupError::PostalCodeNotFound => "postal_code_not_found",
            LookupError::IncompleteAddress => "incomplete_address",
            LookupError::GeocodingService(_) => "geocoding_service_error",
            LookupError::CoordinatesNotFound => "coordinates_not_found",
            LookupError::CoordinatesUnavailable => "coordinates_unavailable",
            LookupError::WeatherService(_) => "weather_service_error",
            LookupError::WeatherDataUnavailable => "weather_data_unavailable",
        }
    }

    /// True when the CEP or its coordinates do not exist upstream.
    /// Everything else is a failed or incomplete upstream answer.
    pub fn is_not_found(&self) -> bool {
        matches!(self, LookupError::PostalCodeNotFound | LookupError::CoordinatesNotFound)
    }
}
