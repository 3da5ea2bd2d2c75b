//! Core library for the `cep-weather` service.
//!
//! This crate defines:
//! - Configuration of the listener and the external services
//! - Capability traits over the address, geocoding and weather services
//! - The lookup pipeline chaining them together
//! - Shared domain models and the error taxonomy
//!
//! It is used by `cep-weather-server`, but can also be reused by other binaries or services.

pub mod config;
pub mod error;
pub mod model;
pub mod pipeline;
pub mod resolver;

pub use config::{Config, ServerConfig, UpstreamConfig};
pub use error::{LookupError, UpstreamError};
pub use model::{Address, Coordinates, CurrentWeather, WeatherLookupResult};
pub use pipeline::WeatherLookup;
pub use resolver::{AddressResolver, GeocodeResolver, WeatherResolver};
