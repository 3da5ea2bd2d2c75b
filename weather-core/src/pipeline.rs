//! The CEP → address → coordinates → weather chain.
//!
//! Each step needs the previous step's output, so the calls are issued one
//! after another and the first failure ends the lookup.

use anyhow::Context;
use reqwest::Client;
use std::sync::Arc;

use crate::{
    config::UpstreamConfig,
    error::LookupError,
    model::WeatherLookupResult,
    resolver::{
        AddressResolver, GeocodeResolver, NominatimResolver, OpenMeteoResolver, ViaCepResolver,
        WeatherResolver,
    },
};

#[derive(Debug, Clone)]
pub struct WeatherLookup {
    address: Arc<dyn AddressResolver>,
    geocoder: Arc<dyn GeocodeResolver>,
    weather: Arc<dyn WeatherResolver>,
}

impl WeatherLookup {
    pub fn new(
        address: Arc<dyn AddressResolver>,
        geocoder: Arc<dyn GeocodeResolver>,
        weather: Arc<dyn WeatherResolver>,
    ) -> Self {
        Self { address, geocoder, weather }
    }

    /// Wire the ViaCEP, Nominatim and Open-Meteo resolvers over one HTTP client.
    pub fn from_config(config: &UpstreamConfig) -> anyhow::Result<Self> {
        let http = Client::builder().build().context("Failed to build HTTP client")?;

        Ok(Self::new(
            Arc::new(ViaCepResolver::new(http.clone(), &config.address_base_url)),
            Arc::new(NominatimResolver::new(
                http.clone(),
                &config.geocoding_base_url,
                &config.user_agent,
            )),
            Arc::new(OpenMeteoResolver::new(http, &config.weather_base_url, &config.timezone)),
        ))
    }

    pub async fn lookup(&self, cep: &str) -> Result<WeatherLookupResult, LookupError> {
        let address = self.address.resolve_address(cep).await?;
        tracing::debug!(cep, city = %address.city, state = %address.state, "address resolved");

        let coordinates = self.geocoder.resolve_coordinates(&address).await?;
        tracing::debug!(
            cep,
            latitude = %coordinates.latitude,
            longitude = %coordinates.longitude,
            "coordinates resolved"
        );

        let current_weather = self.weather.resolve_weather(&coordinates).await?;

        Ok(WeatherLookupResult { cep: cep.to_string(), address, coordinates, current_weather })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Address, Coordinates, CurrentWeather};
    use async_trait::async_trait;
    use serde_json::json;
    use std::sync::{
        Mutex,
        atomic::{AtomicUsize, Ordering},
    };

    #[derive(Debug, Default)]
    struct Calls {
        address: AtomicUsize,
        geocode: AtomicUsize,
        weather: AtomicUsize,
    }

    #[derive(Debug)]
    struct FakeAddress {
        calls: Arc<Calls>,
        outcome: fn() -> Result<Address, LookupError>,
        seen: Mutex<Vec<String>>,
    }

    #[async_trait]
    impl AddressResolver for FakeAddress {
        async fn resolve_address(&self, cep: &str) -> Result<Address, LookupError> {
            self.calls.address.fetch_add(1, Ordering::SeqCst);
            self.seen.lock().unwrap().push(cep.to_string());
            (self.outcome)()
        }
    }

    #[derive(Debug)]
    struct FakeGeocoder {
        calls: Arc<Calls>,
        outcome: fn() -> Result<Coordinates, LookupError>,
        seen: Mutex<Vec<Address>>,
    }

    #[async_trait]
    impl GeocodeResolver for FakeGeocoder {
        async fn resolve_coordinates(&self, address: &Address) -> Result<Coordinates, LookupError> {
            self.calls.geocode.fetch_add(1, Ordering::SeqCst);
            self.seen.lock().unwrap().push(address.clone());
            (self.outcome)()
        }
    }

    #[derive(Debug)]
    struct FakeWeather {
        calls: Arc<Calls>,
        outcome: fn() -> Result<CurrentWeather, LookupError>,
        seen: Mutex<Vec<Coordinates>>,
    }

    #[async_trait]
    impl WeatherResolver for FakeWeather {
        async fn resolve_weather(
            &self,
            coordinates: &Coordinates,
        ) -> Result<CurrentWeather, LookupError> {
            self.calls.weather.fetch_add(1, Ordering::SeqCst);
            self.seen.lock().unwrap().push(coordinates.clone());
            (self.outcome)()
        }
    }

    fn sao_paulo() -> Result<Address, LookupError> {
        Ok(Address { city: "São Paulo".into(), state: "SP".into() })
    }

    fn se_square() -> Result<Coordinates, LookupError> {
        Ok(Coordinates { latitude: "-23.5506507".into(), longitude: "-46.6333824".into() })
    }

    fn sunny() -> Result<CurrentWeather, LookupError> {
        Ok(json!({ "temperature": 25.4, "weathercode": 0 }))
    }

    struct Harness {
        calls: Arc<Calls>,
        address: Arc<FakeAddress>,
        geocoder: Arc<FakeGeocoder>,
        weather: Arc<FakeWeather>,
        lookup: WeatherLookup,
    }

    fn harness(
        address: fn() -> Result<Address, LookupError>,
        geocode: fn() -> Result<Coordinates, LookupError>,
        weather: fn() -> Result<CurrentWeather, LookupError>,
    ) -> Harness {
        let calls = Arc::new(Calls::default());
        let address = Arc::new(FakeAddress {
            calls: calls.clone(),
            outcome: address,
            seen: Mutex::default(),
        });
        let geocoder = Arc::new(FakeGeocoder {
            calls: calls.clone(),
            outcome: geocode,
            seen: Mutex::default(),
        });
        let weather = Arc::new(FakeWeather {
            calls: calls.clone(),
            outcome: weather,
            seen: Mutex::default(),
        });
        let lookup = WeatherLookup::new(address.clone(), geocoder.clone(), weather.clone());

        Harness { calls, address, geocoder, weather, lookup }
    }

    fn counts(calls: &Calls) -> (usize, usize, usize) {
        (
            calls.address.load(Ordering::SeqCst),
            calls.geocode.load(Ordering::SeqCst),
            calls.weather.load(Ordering::SeqCst),
        )
    }

    #[tokio::test]
    async fn successful_chain_assembles_all_fields() {
        let h = harness(sao_paulo, se_square, sunny);

        let result = h.lookup.lookup("01001-000").await.unwrap();

        assert_eq!(result.cep, "01001-000");
        assert_eq!(result.address, sao_paulo().unwrap());
        assert_eq!(result.coordinates, se_square().unwrap());
        assert_eq!(result.current_weather, sunny().unwrap());
        assert_eq!(counts(&h.calls), (1, 1, 1));
    }

    #[tokio::test]
    async fn each_step_receives_previous_output() {
        let h = harness(sao_paulo, se_square, sunny);

        h.lookup.lookup("01001000").await.unwrap();

        assert_eq!(*h.address.seen.lock().unwrap(), vec!["01001000".to_string()]);
        assert_eq!(*h.geocoder.seen.lock().unwrap(), vec![sao_paulo().unwrap()]);
        assert_eq!(*h.weather.seen.lock().unwrap(), vec![se_square().unwrap()]);
    }

    #[tokio::test]
    async fn unknown_cep_stops_before_geocoding() {
        let h = harness(|| Err(LookupError::PostalCodeNotFound), se_square, sunny);

        let err = h.lookup.lookup("99999999").await.unwrap_err();

        assert!(matches!(err, LookupError::PostalCodeNotFound));
        assert!(err.is_not_found());
        assert_eq!(counts(&h.calls), (1, 0, 0));
    }

    #[tokio::test]
    async fn incomplete_address_stops_before_geocoding() {
        let h = harness(|| Err(LookupError::IncompleteAddress), se_square, sunny);

        let err = h.lookup.lookup("01001000").await.unwrap_err();

        assert!(matches!(err, LookupError::IncompleteAddress));
        assert!(!err.is_not_found());
        assert_eq!(counts(&h.calls), (1, 0, 0));
    }

    #[tokio::test]
    async fn missing_coordinates_stop_before_weather() {
        let h = harness(sao_paulo, || Err(LookupError::CoordinatesNotFound), sunny);

        let err = h.lookup.lookup("01001000").await.unwrap_err();

        assert!(matches!(err, LookupError::CoordinatesNotFound));
        assert_eq!(counts(&h.calls), (1, 1, 0));
    }

    #[tokio::test]
    async fn unavailable_coordinates_stop_before_weather() {
        let h = harness(sao_paulo, || Err(LookupError::CoordinatesUnavailable), sunny);

        let err = h.lookup.lookup("01001000").await.unwrap_err();

        assert!(matches!(err, LookupError::CoordinatesUnavailable));
        assert_eq!(counts(&h.calls), (1, 1, 0));
    }

    #[tokio::test]
    async fn weather_failure_is_reported() {
        let h = harness(sao_paulo, se_square, || Err(LookupError::WeatherDataUnavailable));

        let err = h.lookup.lookup("01001000").await.unwrap_err();

        assert!(matches!(err, LookupError::WeatherDataUnavailable));
        assert_eq!(counts(&h.calls), (1, 1, 1));
    }

    #[tokio::test]
    async fn repeated_lookups_are_structurally_identical() {
        let h = harness(sao_paulo, se_square, sunny);

        let first = h.lookup.lookup("01001000").await.unwrap();
        let second = h.lookup.lookup("01001000").await.unwrap();

        assert_eq!(first, second);
        assert_eq!(counts(&h.calls), (2, 2, 2));
    }

    #[test]
    fn from_config_builds_http_resolvers() {
        let lookup = WeatherLookup::from_config(&UpstreamConfig::default()).unwrap();
        let debug = format!("{lookup:?}");

        assert!(debug.contains("ViaCepResolver"));
        assert!(debug.contains("NominatimResolver"));
        assert!(debug.contains("OpenMeteoResolver"));
    }
}
