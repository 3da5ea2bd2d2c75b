use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use serde_json::Value;

use crate::{
    error::LookupError,
    model::{Coordinates, CurrentWeather},
};

use super::{WeatherResolver, fetch_json};

#[derive(Debug, Clone)]
pub struct OpenMeteoResolver {
    forecast_url: String,
    timezone: String,
    http: Client,
}

impl OpenMeteoResolver {
    pub fn new(http: Client, forecast_url: impl Into<String>, timezone: impl Into<String>) -> Self {
        Self { forecast_url: forecast_url.into(), timezone: timezone.into(), http }
    }
}

#[derive(Debug, Deserialize)]
struct ForecastResponse {
    current_weather: Option<Value>,
}

#[async_trait]
impl WeatherResolver for OpenMeteoResolver {
    async fn resolve_weather(
        &self,
        coordinates: &Coordinates,
    ) -> Result<CurrentWeather, LookupError> {
        tracing::debug!(
            latitude = %coordinates.latitude,
            longitude = %coordinates.longitude,
            "resolving current weather"
        );

        let request = self.http.get(&self.forecast_url).query(&[
            ("latitude", coordinates.latitude.as_str()),
            ("longitude", coordinates.longitude.as_str()),
            ("current_weather", "true"),
            ("timezone", self.timezone.as_str()),
        ]);

        let forecast: ForecastResponse =
            fetch_json(request).await.map_err(LookupError::WeatherService)?;

        forecast.current_weather.filter(has_content).ok_or(LookupError::WeatherDataUnavailable)
    }
}

/// Null, `false`, zero and empty containers carry no conditions.
fn has_content(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(items) => !items.is_empty(),
        Value::Object(fields) => !fields.is_empty(),
    }
}
